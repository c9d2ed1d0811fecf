use crate::core::models::{BuildMode, LoaderStage, ModuleRule};
use crate::core::{keep_ordered, output};
use serde_json::json;

/// Source directory the script rule is scoped to.
pub const SOURCE_DIR: &str = "src";

/// Assemble the ordered asset-handling rule list.
///
/// Order is significant: the first matching rule wins, and the trailing
/// catch-all must stay last so script, markup and data files keep going
/// through the tool's internal handling.
pub fn module_rules(mode: BuildMode, commit_sha: &str) -> Vec<ModuleRule> {
    vec![
        stylus_rule(mode),
        css_rule(mode),
        env_stub_rule(),
        script_rule(mode),
        media_rule(mode, commit_sha),
        fallback_rule(),
    ]
}

fn stylus_rule(mode: BuildMode) -> ModuleRule {
    let mut rule = ModuleRule::new(r"\.styl$");
    rule.stages = keep_ordered(vec![
        (mode.is_development(), LoaderStage::bare("css-hot-loader")),
        (true, LoaderStage::bare("css-extract-loader")),
        (true, LoaderStage::bare("css-loader")),
        (true, postcss_stage(mode)),
        (true, LoaderStage::bare("stylus-loader")),
    ]);
    // Style imports are never dead code, whatever the package claims.
    rule.side_effects = true;
    rule
}

fn css_rule(mode: BuildMode) -> ModuleRule {
    let mut rule = ModuleRule::new(r"\.css$");
    rule.stages = vec![
        LoaderStage::bare("css-extract-loader"),
        LoaderStage::bare("css-loader"),
        postcss_stage(mode),
    ];
    rule.side_effects = true;
    rule
}

fn postcss_stage(mode: BuildMode) -> LoaderStage {
    LoaderStage::with_options(
        "postcss-loader",
        json!({
            "sourceMap": mode.is_production(),
            "postcssOptions": {
                "config": false,
                "plugins": [
                    "postcss-preset-env",
                    { "autoprefixer": { "context": SOURCE_DIR } },
                    "postcss-normalize",
                ],
            },
        }),
    )
}

/// The environment stub is emitted verbatim under its own name so the
/// deployed bundle can swap it without a rebuild.
fn env_stub_rule() -> ModuleRule {
    let mut rule = ModuleRule::new(r"env\.js$");
    rule.stages = vec![LoaderStage::bare("file-loader")];
    rule.generator = Some(json!({ "filename": "env.js" }));
    rule
}

fn script_rule(mode: BuildMode) -> ModuleRule {
    let is_development = mode.is_development();
    let plugins: Vec<&str> = keep_ordered(vec![(is_development, "react-refresh")]);

    let mut rule = ModuleRule::new(r"\.(js|mjs|jsx|ts|tsx)$");
    rule.include = Some(SOURCE_DIR.to_string());
    rule.stages = vec![LoaderStage::with_options(
        "transpiler-loader",
        json!({
            "exclude": [r"[\\/]core-js[\\/]", r"[\\/]buildin[\\/]"],
            "plugins": plugins,
            "compact": mode.is_production(),
        }),
    )];
    rule
}

fn media_rule(mode: BuildMode, commit_sha: &str) -> ModuleRule {
    let mut rule = ModuleRule::new(r"(?i)\.(jpe?g|svg|png|gif|ico|eot|ttf|woff2?)(\?v=\d+\.\d+\.\d+)?$");
    rule.exclude = vec![
        r"ckeditor5-[^/\\]+[/\\]theme[/\\]icons[/\\][^/\\]+\.svg$".to_string(),
        r"ckeditor5-[^/\\]+[/\\]theme[/\\].+\.css$".to_string(),
    ];
    rule.rule_type = Some("asset/resource".to_string());
    rule.generator = Some(json!({ "filename": output::media_filename(mode, commit_sha) }));
    rule
}

/// Catch-all: anything no other rule matched becomes an emitted asset,
/// excluding script, markup and data files.
fn fallback_rule() -> ModuleRule {
    let mut rule = ModuleRule::catch_all();
    rule.exclude = vec![
        "^$".to_string(),
        r"\.(js|mjs|jsx|ts|tsx)$".to_string(),
        r"\.html$".to_string(),
        r"\.json$".to_string(),
    ];
    rule.rule_type = Some("asset/resource".to_string());
    rule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_rule_is_last_and_has_no_matcher() {
        let rules = module_rules(BuildMode::Production, "abc123");
        let last = rules.last().unwrap();
        assert!(last.test.is_none());
        assert_eq!(last.rule_type.as_deref(), Some("asset/resource"));
        assert!(last.exclude.iter().any(|p| p.contains("js|mjs")));
    }

    #[test]
    fn test_only_fallback_rule_lacks_a_matcher() {
        let rules = module_rules(BuildMode::Development, "local");
        let unmatched = rules.iter().filter(|r| r.test.is_none()).count();
        assert_eq!(unmatched, 1);
    }

    #[test]
    fn test_stylus_pipeline_gains_hot_loader_in_development() {
        let dev = module_rules(BuildMode::Development, "local");
        let stylus = dev.iter().find(|r| r.test.as_deref() == Some(r"\.styl$")).unwrap();
        assert_eq!(stylus.stages[0].loader, "css-hot-loader");
        assert_eq!(stylus.stages.len(), 5);

        let prod = module_rules(BuildMode::Production, "abc123");
        let stylus = prod.iter().find(|r| r.test.as_deref() == Some(r"\.styl$")).unwrap();
        assert_eq!(stylus.stages[0].loader, "css-extract-loader");
        assert_eq!(stylus.stages.len(), 4);
    }

    #[test]
    fn test_style_rules_keep_side_effects() {
        for rule in module_rules(BuildMode::Production, "abc123") {
            let is_style = matches!(rule.test.as_deref(), Some(r"\.styl$") | Some(r"\.css$"));
            assert_eq!(rule.side_effects, is_style);
        }
    }

    #[test]
    fn test_script_rule_compacts_only_in_production() {
        let prod = module_rules(BuildMode::Production, "abc123");
        let script = prod
            .iter()
            .find(|r| r.include.as_deref() == Some(SOURCE_DIR))
            .unwrap();
        let options = script.stages[0].options.as_ref().unwrap();
        assert_eq!(options["compact"], serde_json::json!(true));
        assert!(options["plugins"].as_array().unwrap().is_empty());

        let dev = module_rules(BuildMode::Development, "local");
        let script = dev
            .iter()
            .find(|r| r.include.as_deref() == Some(SOURCE_DIR))
            .unwrap();
        let options = script.stages[0].options.as_ref().unwrap();
        assert_eq!(options["compact"], serde_json::json!(false));
        assert_eq!(
            options["plugins"],
            serde_json::json!(["react-refresh"])
        );
    }

    #[test]
    fn test_media_rule_fingerprints_only_in_production() {
        let rules = module_rules(BuildMode::Production, "abc123");
        let media = rules.iter().find(|r| r.exclude.iter().any(|p| p.contains("ckeditor5"))).unwrap();
        let generator = media.generator.as_ref().unwrap();
        assert!(generator["filename"]
            .as_str()
            .unwrap()
            .contains("[contenthash:8]"));

        let rules = module_rules(BuildMode::Development, "local");
        let media = rules.iter().find(|r| r.exclude.iter().any(|p| p.contains("ckeditor5"))).unwrap();
        let generator = media.generator.as_ref().unwrap();
        assert!(!generator["filename"].as_str().unwrap().contains("[contenthash"));
    }
}
