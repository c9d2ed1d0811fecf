use crate::core::keep_ordered;
use crate::core::models::{BuildMode, EnvMap, PluginEntry};
use crate::core::output::FINGERPRINT;
use serde_json::json;

/// Maximum byte size precached by the service worker. Raised above the
/// tool default so lazy-loading failure scenarios stay unlikely.
pub const MAX_PRECACHE_BYTES: u64 = 5 * 1024 * 1024;

/// Assemble the plugin list for the given mode.
///
/// The master list below is the single source of ordering truth:
/// conditional entries are declared inline and dropped by one stable
/// filter pass, so the relative order of the survivors always equals
/// their order here.
pub fn plugin_list(mode: BuildMode, env: &EnvMap, commit_sha: &str) -> Vec<PluginEntry> {
    let is_production = mode.is_production();
    let is_development = mode.is_development();

    keep_ordered(vec![
        (
            true,
            PluginEntry::new(
                "ignore",
                json!({
                    "resourceRegExp": r"^\./locale$",
                    "contextRegExp": "moment",
                }),
            ),
        ),
        (
            is_development,
            PluginEntry::bare("case-sensitive-paths"),
        ),
        (
            true,
            PluginEntry::new("remove-empty-scripts", json!({ "enabled": is_production })),
        ),
        (true, define_env_plugin(env)),
        (true, html_plugin(is_production)),
        (is_production, favicons_plugin()),
        (
            is_development,
            PluginEntry::new("react-refresh", json!({ "overlay": false })),
        ),
        (true, css_extract_plugin(mode, commit_sha)),
        (true, copy_plugin()),
        (is_production, manifest_plugin()),
        (is_production, service_worker_plugin()),
    ])
}

/// Expose every environment pair to the bundled code. Values are
/// JSON-quoted so they substitute as string literals, not identifiers.
fn define_env_plugin(env: &EnvMap) -> PluginEntry {
    let mut defined = serde_json::Map::new();
    for (key, value) in env {
        defined.insert(
            key.clone(),
            serde_json::Value::String(serde_json::Value::String(value.clone()).to_string()),
        );
    }

    PluginEntry::new("define", json!({ "process.env": defined }))
}

fn html_plugin(is_production: bool) -> PluginEntry {
    let mut options = json!({
        "template": "src/assets/index.html",
        "filename": "index.html",
        "inject": true,
    });

    if is_production {
        options["minify"] = json!({
            "removeComments": true,
            "removeCommentsFromCDATA": true,
            "removeCDATASectionsFromCDATA": true,
            "collapseWhitespace": true,
            "collapseBooleanAttributes": true,
            "removeAttributeQuotes": true,
            "removeRedundantAttributes": true,
            "useShortDoctype": true,
            "removeEmptyAttributes": true,
            "removeScriptTypeAttributes": true,
            "caseSensitive": true,
            "minifyJS": true,
            "minifyCSS": true,
        });
    }

    PluginEntry::new("html", options)
}

fn favicons_plugin() -> PluginEntry {
    PluginEntry::new(
        "favicons",
        json!({
            "logo": "src/assets/favicon/logo.png",
            "mode": "webapp",
            "devMode": "light",
            "cache": true,
            "inject": true,
            "prefix": "favicon/",
            "publicPath": "/",
            "icons": {
                "android": false,
                "appleIcon": false,
                "appleStartup": false,
                "favicons": true,
                "windows": false,
                "yandex": false,
            },
        }),
    )
}

fn css_extract_plugin(mode: BuildMode, commit_sha: &str) -> PluginEntry {
    let (filename, chunk_filename) = if mode.is_production() {
        (
            format!("{commit_sha}/assets/css/[name].{FINGERPRINT}.css"),
            format!("{commit_sha}/assets/css/[id].{FINGERPRINT}.css"),
        )
    } else {
        (
            format!("{commit_sha}/assets/css/[name].css"),
            format!("{commit_sha}/assets/css/[id].css"),
        )
    };

    PluginEntry::new(
        "css-extract",
        json!({
            "filename": filename,
            "chunkFilename": chunk_filename,
        }),
    )
}

fn copy_plugin() -> PluginEntry {
    PluginEntry::new(
        "copy",
        json!({
            "patterns": [
                { "from": "src/assets/robots.txt", "to": "./" },
                { "from": "env.js", "to": "./" },
            ],
        }),
    )
}

fn manifest_plugin() -> PluginEntry {
    PluginEntry::new(
        "asset-manifest",
        json!({
            "fileName": "asset-manifest.json",
            "publicPath": "/",
            // Entry point listings never include source maps.
            "excludeSourceMapsFromEntrypoints": true,
        }),
    )
}

fn service_worker_plugin() -> PluginEntry {
    PluginEntry::new(
        "service-worker-inject-manifest",
        json!({
            "swSrc": "src/service-worker.js",
            "dontCacheBustURLsMatching": r"\.[0-9a-f]{8}\.",
            "exclude": [r"\.map$", r"asset-manifest\.json$", r"env\.js$", "LICENSE"],
            "maximumFileSizeToCacheInBytes": MAX_PRECACHE_BYTES,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(mode: BuildMode) -> Vec<String> {
        let env = EnvMap::new();
        plugin_list(mode, &env, "local")
            .into_iter()
            .map(|p| p.name)
            .collect()
    }

    #[test]
    fn test_development_plugin_selection() {
        let names = names(BuildMode::Development);
        assert!(names.contains(&"case-sensitive-paths".to_string()));
        assert!(names.contains(&"react-refresh".to_string()));
        assert!(!names.contains(&"favicons".to_string()));
        assert!(!names.contains(&"asset-manifest".to_string()));
        assert!(!names.contains(&"service-worker-inject-manifest".to_string()));
    }

    #[test]
    fn test_production_plugin_selection() {
        let names = names(BuildMode::Production);
        assert!(!names.contains(&"case-sensitive-paths".to_string()));
        assert!(!names.contains(&"react-refresh".to_string()));
        assert!(names.contains(&"favicons".to_string()));
        assert!(names.contains(&"asset-manifest".to_string()));
        assert!(names.contains(&"service-worker-inject-manifest".to_string()));
    }

    #[test]
    fn test_unconditional_entries_keep_relative_order_across_modes() {
        let unconditional = ["ignore", "remove-empty-scripts", "define", "html", "css-extract", "copy"];
        for mode in [BuildMode::Development, BuildMode::Production] {
            let names = names(mode);
            let positions: Vec<usize> = unconditional
                .iter()
                .map(|n| names.iter().position(|x| x == n).unwrap())
                .collect();
            let mut sorted = positions.clone();
            sorted.sort_unstable();
            assert_eq!(positions, sorted, "order broken in {} mode", mode);
        }
    }

    #[test]
    fn test_define_plugin_json_quotes_values() {
        let mut env = EnvMap::new();
        env.insert("COMMIT_SHA".to_string(), "abc123".to_string());
        env.insert("GREETING".to_string(), "say \"hi\"".to_string());

        let plugins = plugin_list(BuildMode::Production, &env, "abc123");
        let define = plugins.iter().find(|p| p.name == "define").unwrap();
        let defined = &define.options["process.env"];

        assert_eq!(defined["COMMIT_SHA"], json!("\"abc123\""));
        assert_eq!(defined["GREETING"], json!("\"say \\\"hi\\\"\""));
    }

    #[test]
    fn test_service_worker_exclusions_and_ceiling() {
        let env = EnvMap::new();
        let plugins = plugin_list(BuildMode::Production, &env, "abc123");
        let sw = plugins
            .iter()
            .find(|p| p.name == "service-worker-inject-manifest")
            .unwrap();

        assert_eq!(sw.options["maximumFileSizeToCacheInBytes"], json!(5242880));
        let excludes = sw.options["exclude"].as_array().unwrap();
        assert_eq!(excludes.len(), 4);
    }

    #[test]
    fn test_html_minify_options_only_in_production() {
        let env = EnvMap::new();
        let prod = plugin_list(BuildMode::Production, &env, "abc123");
        let html = prod.iter().find(|p| p.name == "html").unwrap();
        assert!(html.options.get("minify").is_some());

        let dev = plugin_list(BuildMode::Development, &env, "local");
        let html = dev.iter().find(|p| p.name == "html").unwrap();
        assert!(html.options.get("minify").is_none());
    }
}
