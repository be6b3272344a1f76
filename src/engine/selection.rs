//! Selection resolution: committed item, exact-match detection and
//! require-match validity.

/// Holds the selected item and the rules for comparing item text to the query.
#[derive(Debug)]
pub(crate) struct SelectionResolver<T> {
    selected: Option<T>,
    case_insensitive: bool,
    require_match: bool,
}

impl<T> SelectionResolver<T>
where
    T: Clone + PartialEq,
{
    pub fn new(case_insensitive: bool, require_match: bool) -> Self {
        Self {
            selected: None,
            case_insensitive,
            require_match,
        }
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Replace the selected item; returns whether it changed
    pub fn set(&mut self, item: Option<T>) -> bool {
        if self.selected == item {
            return false;
        }
        self.selected = item;
        true
    }

    /// Compare item text with the query under the configured case rule
    pub fn text_matches(&self, text: &str, query: &str) -> bool {
        if self.case_insensitive {
            text.to_lowercase() == query.to_lowercase()
        } else {
            text == query
        }
    }

    /// Index of the entry to auto-commit, if any
    ///
    /// Only a list holding exactly one entry whose text equals the query
    /// qualifies; ties are never broken.
    pub fn evaluate_auto_match(
        &self,
        items: &[T],
        query: &str,
        item_text: &dyn Fn(&T) -> String,
    ) -> Option<usize> {
        match items {
            [only] if self.text_matches(&item_text(only), query) => Some(0),
            _ => None,
        }
    }

    /// Require-match validity of the current query
    ///
    /// Always valid when require-match is off or the query is empty; otherwise
    /// an item must be selected and its text must equal the query.
    pub fn is_valid(&self, query: &str, item_text: &dyn Fn(&T) -> String) -> bool {
        if !self.require_match || query.is_empty() {
            return true;
        }
        self.selected
            .as_ref()
            .is_some_and(|item| item_text(item) == query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &String) -> String {
        s.clone()
    }

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_set_reports_changes() {
        let mut resolver = SelectionResolver::new(false, false);
        assert!(resolver.set(Some("Ohio".to_string())));
        assert!(!resolver.set(Some("Ohio".to_string())));
        assert!(resolver.set(None));
        assert!(!resolver.set(None));
    }

    #[test]
    fn test_auto_match_case_insensitive() {
        let resolver = SelectionResolver::<String>::new(true, false);
        assert_eq!(
            resolver.evaluate_auto_match(&items(&["Alaska"]), "alaska", &text),
            Some(0)
        );
    }

    #[test]
    fn test_auto_match_case_sensitive() {
        let resolver = SelectionResolver::<String>::new(false, false);
        assert_eq!(
            resolver.evaluate_auto_match(&items(&["Alaska"]), "alaska", &text),
            None
        );
        assert_eq!(
            resolver.evaluate_auto_match(&items(&["Alaska"]), "Alaska", &text),
            Some(0)
        );
    }

    #[test]
    fn test_auto_match_needs_single_entry() {
        let resolver = SelectionResolver::<String>::new(true, false);
        assert_eq!(
            resolver.evaluate_auto_match(&items(&["Alaska", "Alabama"]), "al", &text),
            None
        );
        assert_eq!(
            resolver.evaluate_auto_match(&items(&["Alaska", "alaska"]), "alaska", &text),
            None
        );
        assert_eq!(resolver.evaluate_auto_match(&[], "alaska", &text), None);
    }

    #[test]
    fn test_validity() {
        let mut resolver = SelectionResolver::new(false, true);
        assert!(resolver.is_valid("", &text));
        assert!(!resolver.is_valid("Ala", &text));

        resolver.set(Some("Alaska".to_string()));
        assert!(resolver.is_valid("Alaska", &text));
        assert!(!resolver.is_valid("Alask", &text));
    }

    #[test]
    fn test_validity_without_require_match() {
        let resolver = SelectionResolver::<String>::new(false, false);
        assert!(resolver.is_valid("anything", &text));
    }
}
