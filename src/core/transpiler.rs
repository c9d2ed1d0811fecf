use crate::core::keep_ordered;
use crate::core::models::{BuildMode, PluginEntry, TranspilerConfig};
use serde_json::json;

/// Assemble the transpiler options section: three fixed presets and one
/// master-ordered plugin list filtered by mode.
///
/// Production adds the prop-types-stripping and import-rewriting
/// plugins; development adds the hot-refresh plugin. Neither mode ever
/// sees the other's additions.
pub fn transpiler_config(mode: BuildMode) -> TranspilerConfig {
    let is_production = mode.is_production();
    let is_development = mode.is_development();

    let presets = vec![
        PluginEntry::new(
            "preset-env",
            json!({
                "useBuiltIns": "usage",
                "corejs": { "version": 3, "proposals": true },
            }),
        ),
        PluginEntry::new(
            "preset-react",
            json!({ "development": is_development, "runtime": "automatic" }),
        ),
        PluginEntry::bare("preset-flow"),
    ];

    let plugins = keep_ordered(vec![
        (
            true,
            PluginEntry::new(
                "prismjs",
                json!({
                    "languages": ["javascript", "php", "html"],
                    "plugins": ["line-numbers", "show-language"],
                }),
            ),
        ),
        (true, PluginEntry::bare("lodash")),
        (true, PluginEntry::bare("macros")),
        (true, PluginEntry::bare("add-react-displayname")),
        (true, PluginEntry::bare("transform-runtime")),
        (true, PluginEntry::bare("syntax-dynamic-import")),
        (true, PluginEntry::bare("syntax-import-meta")),
        (
            true,
            PluginEntry::new("proposal-decorators", json!({ "legacy": true })),
        ),
        (true, PluginEntry::bare("proposal-function-sent")),
        (true, PluginEntry::bare("proposal-throw-expressions")),
        (true, PluginEntry::bare("proposal-export-default-from")),
        (
            true,
            PluginEntry::new("proposal-pipeline-operator", json!({ "proposal": "minimal" })),
        ),
        (true, PluginEntry::bare("proposal-do-expressions")),
        (true, PluginEntry::bare("proposal-function-bind")),
        (
            is_production,
            PluginEntry::new(
                "transform-react-remove-prop-types",
                json!({ "mode": "wrap", "ignoreFilenames": ["node_modules"] }),
            ),
        ),
        (
            is_production,
            PluginEntry::new(
                "transform-imports",
                json!({
                    "lodash": {
                        "transform": "lodash/${member}",
                        "preventFullImport": true,
                    },
                    "react-router": {
                        "transform": "react-router/${member}",
                        "preventFullImport": true,
                    },
                }),
            ),
        ),
        (is_development, PluginEntry::bare("react-refresh")),
    ]);

    TranspilerConfig { presets, plugins }
}
