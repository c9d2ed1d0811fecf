// Core configuration assembly
pub mod assembler;
pub mod dev_server;
pub mod entry;
pub mod models;
pub mod optimization;
pub mod output;
pub mod plugins;
pub mod rules;
pub mod transpiler;

/// Filter an ordered list of (condition, value) candidates, keeping the
/// declaration order of the survivors. Every conditional list in the
/// assembled configuration goes through this single stable filter so a
/// dropped entry can never reorder its neighbours.
pub fn keep_ordered<T>(candidates: Vec<(bool, T)>) -> Vec<T> {
    candidates
        .into_iter()
        .filter(|(keep, _)| *keep)
        .map(|(_, value)| value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_ordered_preserves_declaration_order() {
        let kept = keep_ordered(vec![
            (true, "a"),
            (false, "b"),
            (true, "c"),
            (true, "d"),
            (false, "e"),
        ]);
        assert_eq!(kept, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_keep_ordered_empty_when_nothing_matches() {
        let kept: Vec<&str> = keep_ordered(vec![(false, "a"), (false, "b")]);
        assert!(kept.is_empty());
    }
}
