use crate::utils::RiggerError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Environment variable map. `BTreeMap` keeps key order canonical so
/// hashes and serialized output never depend on insertion order.
pub type EnvMap = BTreeMap<String, String>;

/// Command-line argument map passed through to the cache key.
pub type ArgMap = BTreeMap<String, String>;

/// The two-valued build target. Exactly one value per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub fn is_production(self) -> bool {
        self == BuildMode::Production
    }

    pub fn is_development(self) -> bool {
        self == BuildMode::Development
    }
}

impl FromStr for BuildMode {
    type Err = RiggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(BuildMode::Development),
            "production" => Ok(BuildMode::Production),
            other => Err(RiggerError::config(format!(
                "unrecognized build mode: {:?} (expected \"development\" or \"production\")",
                other
            ))),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Development => write!(f, "development"),
            BuildMode::Production => write!(f, "production"),
        }
    }
}

/// Fully resolved configuration for the external build executor.
///
/// Constructed once per invocation, never mutated after return. The
/// section names follow the executor's documented schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub mode: BuildMode,
    pub bail: bool,
    pub context: String,
    pub devtool: String,
    pub entry: EntryGraph,
    pub output: OutputConfig,
    pub cache: CacheConfig,
    pub module: ModuleConfig,
    pub resolve: ResolveConfig,
    pub plugins: Vec<PluginEntry>,
    pub optimization: OptimizationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerConfig>,
    pub transpiler: TranspilerConfig,
}

/// The entry graph: exactly two named bundles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryGraph {
    pub app: AppEntry,
    pub vendor: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    pub import: String,
    pub depend_on: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    pub path: String,
    pub pathinfo: bool,
    pub filename: String,
    pub chunk_filename: String,
    pub asset_module_filename: String,
    pub css_filename: String,
    pub css_chunk_filename: String,
    pub public_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    #[serde(rename = "type")]
    pub cache_type: String,
    /// Cache partition key derived from the canonicalized inputs.
    pub version: String,
    pub cache_directory: String,
    pub store: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    pub strict_export_presence: bool,
    pub rules: Vec<ModuleRule>,
}

/// One asset-handling rule. Rule order is significant: the first
/// matching rule wins, and the catch-all rule must stay last.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub exclude: Vec<String>,
    #[serde(rename = "use", skip_serializing_if = "Vec::is_empty", default)]
    pub stages: Vec<LoaderStage>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub rule_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub side_effects: bool,
}

impl ModuleRule {
    pub fn new(test: &str) -> Self {
        Self {
            test: Some(test.to_string()),
            include: None,
            exclude: Vec::new(),
            stages: Vec::new(),
            rule_type: None,
            generator: None,
            side_effects: false,
        }
    }

    /// Rule with no `test` matcher at all (the trailing catch-all).
    pub fn catch_all() -> Self {
        Self {
            test: None,
            include: None,
            exclude: Vec::new(),
            stages: Vec::new(),
            rule_type: None,
            generator: None,
            side_effects: false,
        }
    }
}

/// One stage in a rule's transform pipeline. Stages run in list order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderStage {
    pub loader: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl LoaderStage {
    pub fn bare(loader: &str) -> Self {
        Self {
            loader: loader.to_string(),
            options: None,
        }
    }

    pub fn with_options(loader: &str, options: serde_json::Value) -> Self {
        Self {
            loader: loader.to_string(),
            options: Some(options),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConfig {
    pub alias: BTreeMap<String, String>,
}

/// A named tool extension with its option payload. The options are
/// inert data for the external tool; list order is execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginEntry {
    pub name: String,
    #[serde(skip_serializing_if = "serde_json::Value::is_null", default)]
    pub options: serde_json::Value,
}

impl PluginEntry {
    pub fn new(name: &str, options: serde_json::Value) -> Self {
        Self {
            name: name.to_string(),
            options,
        }
    }

    pub fn bare(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: serde_json::Value::Null,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationConfig {
    pub runtime_chunk: String,
    pub minimize: bool,
    pub minimizer: Vec<PluginEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerConfig {
    pub client: DevServerClient,
    pub history_api_fallback: bool,
    pub port: u16,
    pub hot: bool,
    pub middleware: Vec<MiddlewareEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevServerClient {
    pub overlay: bool,
}

/// Descriptor for an injected dev-server middleware. The behaviors
/// themselves live in the middleware host; order is chain order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranspilerConfig {
    pub presets: Vec<PluginEntry>,
    pub plugins: Vec<PluginEntry>,
}
