use crate::core::models::{ArgMap, EnvMap};
use crate::utils::Result;

/// Derive the cache partition key for a build invocation.
///
/// The key must be identical for any two invocations with the same
/// environment and argument content, regardless of the order the maps
/// were populated in. Both maps are `BTreeMap`s, so the serialized form
/// is canonical (lexicographic key order) by construction.
pub fn partition_key(env: &EnvMap, argv: &ArgMap) -> Result<String> {
    let canonical = serde_json::to_string(&serde_json::json!({
        "argv": argv,
        "env": env,
    }))?;

    Ok(blake3::hash(canonical.as_bytes()).to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_partition_key_ignores_insertion_order() {
        let mut forward = EnvMap::new();
        forward.insert("COMMIT_SHA".to_string(), "abc123".to_string());
        forward.insert("API_URL".to_string(), "https://api.example.com".to_string());

        let mut reverse = EnvMap::new();
        reverse.insert("API_URL".to_string(), "https://api.example.com".to_string());
        reverse.insert("COMMIT_SHA".to_string(), "abc123".to_string());

        let argv = BTreeMap::new();
        assert_eq!(
            partition_key(&forward, &argv).unwrap(),
            partition_key(&reverse, &argv).unwrap()
        );
    }

    #[test]
    fn test_partition_key_changes_with_content() {
        let mut a = EnvMap::new();
        a.insert("COMMIT_SHA".to_string(), "abc123".to_string());

        let mut b = EnvMap::new();
        b.insert("COMMIT_SHA".to_string(), "def456".to_string());

        let argv = BTreeMap::new();
        assert_ne!(
            partition_key(&a, &argv).unwrap(),
            partition_key(&b, &argv).unwrap()
        );
    }

    #[test]
    fn test_partition_key_includes_argv() {
        let env = EnvMap::new();
        let empty = ArgMap::new();

        let mut argv = ArgMap::new();
        argv.insert("watch".to_string(), "true".to_string());

        assert_ne!(
            partition_key(&env, &empty).unwrap(),
            partition_key(&env, &argv).unwrap()
        );
    }
}
