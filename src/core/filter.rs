use std::collections::BTreeSet;

// Select value meaning "no restriction"; the newsletters screen uses "" for the same thing
pub const ALL: &str = "all";

/// What a list screen shows: a free-text search plus one select-based filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub selection: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { search: String::new(), selection: ALL.to_string() }
    }
}

pub trait Searchable {
    // Fields matched case-insensitively by the search box
    fn search_fields(&self) -> Vec<&str>;

    // Whether the record passes the screen's select filter (status, tag, type...)
    fn matches_selection(&self, selection: &str) -> bool;
}

impl ListQuery {
    pub fn new(search: impl Into<String>, selection: impl Into<String>) -> Self {
        Self { search: search.into(), selection: selection.into() }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.search.trim().is_empty() && is_any(&self.selection)
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));

        matches_search && (is_any(&self.selection) || item.matches_selection(&self.selection))
    }

    pub fn apply<T: Searchable + Clone>(&self, items: &[T]) -> Vec<T> {
        items.iter().filter(|item| self.matches(*item)).cloned().collect()
    }
}

pub fn is_any(selection: &str) -> bool {
    selection.is_empty() || selection == ALL
}

// Sorted, de-duplicated option values for filters built from the data itself
pub fn distinct_values<T, F, I>(items: &[T], values: F) -> Vec<String>
where
    F: Fn(&T) -> I,
    I: IntoIterator<Item = String>,
{
    items
        .iter()
        .flat_map(values)
        .filter(|v| !v.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        name: &'static str,
        kind: &'static str,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name]
        }

        fn matches_selection(&self, selection: &str) -> bool {
            self.kind == selection
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Alpha Launch", kind: "a" },
            Row { name: "beta", kind: "b" },
        ]
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let query = ListQuery::new("LAUNCH", ALL);
        assert_eq!(query.apply(&rows()), vec![rows()[0].clone()]);
    }

    #[test]
    fn unmatched_search_yields_nothing() {
        let query = ListQuery::new("zzz", ALL);
        assert!(query.apply(&rows()).is_empty());
    }

    #[test]
    fn selection_and_search_combine() {
        assert_eq!(ListQuery::new("", "b").apply(&rows()).len(), 1);
        assert!(ListQuery::new("alpha", "b").apply(&rows()).is_empty());
        assert_eq!(ListQuery::new("", "").apply(&rows()).len(), 2);
        assert!(ListQuery::default().is_unfiltered());
    }

    #[test]
    fn distinct_values_are_sorted_and_unique() {
        let tags = vec![vec!["rust", "web"], vec!["web", " "], vec!["ai"]];
        let values = distinct_values(&tags, |t| t.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        assert_eq!(values, vec!["ai", "rust", "web"]);
    }
}
