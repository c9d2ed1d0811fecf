use crate::core::keep_ordered;
use crate::core::models::{BuildMode, OptimizationConfig, PluginEntry};
use serde_json::json;

/// Assemble the optimization section.
///
/// Minification only runs in production (`minimize` gates the whole
/// minimizer list), but the style minimizer entry is declared for both
/// modes, matching the executor's semantics: an inert entry in
/// development, active in production.
pub fn optimization(mode: BuildMode) -> OptimizationConfig {
    let is_production = mode.is_production();

    OptimizationConfig {
        runtime_chunk: "single".to_string(),
        minimize: is_production,
        minimizer: keep_ordered(vec![
            (is_production, script_minifier()),
            (true, style_minifier()),
        ]),
    }
}

/// Script minifier: parse modern syntax, emit broadly-compatible output.
/// `comparisons` and `inline` are pinned to values known not to break
/// valid code under aggressive compression.
fn script_minifier() -> PluginEntry {
    PluginEntry::new(
        "script-minifier",
        json!({
            "minifierOptions": {
                "parse": { "ecma": 8 },
                "compress": {
                    "ecma": 5,
                    "warnings": false,
                    "comparisons": false,
                    "inline": 2,
                },
                "mangle": { "safari10": true },
                // Kept for profiling in browser devtools.
                "keep_classnames": true,
                "keep_fnames": true,
                "output": {
                    "ecma": 5,
                    "comments": false,
                    "ascii_only": true,
                },
            },
        }),
    )
}

/// Style minifier running three backends in the tool's default
/// combination mode.
fn style_minifier() -> PluginEntry {
    PluginEntry::new(
        "style-minifier",
        json!({
            "minimizerOptions": {
                "plugins": ["autoprefixer", "postcss-preset-env"],
                "minify": ["cssnanoMinify", "cleanCssMinify", "esbuildMinify"],
                "preset": [
                    "default",
                    {
                        "discardComments": false,
                        "discardEmpty": false,
                        "mergeIdents": true,
                    },
                ],
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_runs_script_then_style_minifier() {
        let opt = optimization(BuildMode::Production);
        assert!(opt.minimize);
        let names: Vec<&str> = opt.minimizer.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["script-minifier", "style-minifier"]);
    }

    #[test]
    fn test_development_declares_style_minifier_but_never_minimizes() {
        let opt = optimization(BuildMode::Development);
        assert!(!opt.minimize);
        let names: Vec<&str> = opt.minimizer.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["style-minifier"]);
    }

    #[test]
    fn test_runtime_chunk_is_single_in_both_modes() {
        for mode in [BuildMode::Development, BuildMode::Production] {
            assert_eq!(optimization(mode).runtime_chunk, "single");
        }
    }

    #[test]
    fn test_script_minifier_parses_modern_emits_compatible() {
        let opt = optimization(BuildMode::Production);
        let script = &opt.minimizer[0].options["minifierOptions"];
        assert_eq!(script["parse"]["ecma"], json!(8));
        assert_eq!(script["compress"]["ecma"], json!(5));
        assert_eq!(script["output"]["ecma"], json!(5));
        assert_eq!(script["output"]["ascii_only"], json!(true));
    }

    #[test]
    fn test_style_minifier_lists_three_backends() {
        let opt = optimization(BuildMode::Production);
        let backends = opt.minimizer[1].options["minimizerOptions"]["minify"]
            .as_array()
            .unwrap()
            .len();
        assert_eq!(backends, 3);
    }
}
