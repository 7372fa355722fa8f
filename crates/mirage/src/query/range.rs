///
/// RangeKeys
///
/// Key material for range-typed query targets. Nested groups render with
/// array-literal syntax; flat sequences fold with the `..` separator.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RangeKeys {
    Groups(Vec<Vec<String>>),
    Flat(Vec<i64>),
}

/// Join range key material with the `..` range separator.
#[must_use]
pub fn join_range(keys: &RangeKeys) -> String {
    match keys {
        RangeKeys::Groups(groups) => groups
            .iter()
            .map(|group| format!("['{}']", group.join("', '")))
            .collect::<Vec<_>>()
            .join(".."),
        RangeKeys::Flat(items) => items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_groups_render_array_literals() {
        let keys = RangeKeys::Groups(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ]);

        assert_eq!(join_range(&keys), "['a', 'b']..['c']");
    }

    #[test]
    fn flat_sequences_fold_with_separator() {
        assert_eq!(join_range(&RangeKeys::Flat(vec![1, 2, 3])), "1..2..3");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(join_range(&RangeKeys::Groups(vec![])), "");
        assert_eq!(join_range(&RangeKeys::Flat(vec![])), "");
    }
}
