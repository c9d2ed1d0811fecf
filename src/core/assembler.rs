use crate::core::models::{
    ArgMap, BuildConfig, BuildMode, CacheConfig, EnvMap, ModuleConfig, ResolveConfig,
};
use crate::core::{dev_server, entry, optimization, output, plugins, rules, transpiler};
use crate::utils::{hash, Result, RiggerError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Environment key carrying the version/commit identifier.
pub const COMMIT_SHA_KEY: &str = "COMMIT_SHA";

/// Sentinel used when no commit identifier is supplied.
pub const DEFAULT_COMMIT_SHA: &str = "local";

/// Cache directory for the external tool's filesystem cache.
pub const CACHE_DIR: &str = ".cache/rigger";

static PATH_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+$").expect("path segment pattern is valid")
});

/// Assemble the full build configuration for one invocation.
///
/// Pure and deterministic: the returned value is a function of
/// `(mode, env, argv)` alone. No field depends on wall-clock time;
/// content fingerprints are placeholders the external tool resolves
/// from output content.
pub fn assemble(mode: BuildMode, env: &EnvMap, argv: &ArgMap) -> Result<BuildConfig> {
    let is_production = mode.is_production();
    let is_development = mode.is_development();

    let commit_sha = commit_segment(env)?;
    let cache_version = hash::partition_key(env, argv)?;

    let dev_server = if is_development {
        Some(dev_server::descriptor("/")?)
    } else {
        None
    };

    Ok(BuildConfig {
        mode,
        bail: is_production,
        context: rules::SOURCE_DIR.to_string(),
        devtool: "source-map".to_string(),
        entry: entry::entry_graph(mode),
        output: output::output_config(mode, &commit_sha),
        cache: CacheConfig {
            cache_type: "filesystem".to_string(),
            version: cache_version,
            cache_directory: CACHE_DIR.to_string(),
            store: "pack".to_string(),
        },
        module: ModuleConfig {
            strict_export_presence: true,
            rules: rules::module_rules(mode, &commit_sha),
        },
        resolve: ResolveConfig {
            alias: BTreeMap::new(),
        },
        plugins: plugins::plugin_list(mode, env, &commit_sha),
        optimization: optimization::optimization(mode),
        dev_server,
        transpiler: transpiler::transpiler_config(mode),
    })
}

/// Resolve the commit identifier to a filesystem-safe path segment.
///
/// Absent keys fall back to the `local` sentinel; a supplied value that
/// cannot serve as a path segment is a configuration error, since every
/// output template embeds it.
fn commit_segment(env: &EnvMap) -> Result<String> {
    let value = env
        .get(COMMIT_SHA_KEY)
        .map(String::as_str)
        .unwrap_or(DEFAULT_COMMIT_SHA);

    if value == "." || value == ".." || !PATH_SEGMENT.is_match(value) {
        return Err(RiggerError::config(format!(
            "{} value {:?} is not a filesystem-safe path segment",
            COMMIT_SHA_KEY, value
        )));
    }

    Ok(value.to_string())
}
