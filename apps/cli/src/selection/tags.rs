//! Tag Filter: selects entries whose tag set contains the focus tag.
//!
//! A bare string tag field is a one-element set. Entries without tags never
//! pass a tag-filtered view. Matching is exact and case-sensitive.

use serde::{Deserialize, Serialize};

use crate::records::value::Field;

/// Ordered, de-duplicated set of tags on one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for tag in tags {
            set.insert(tag);
        }
        set
    }

    /// Normalizes a raw `tags` field: text → singleton, list → set, absent → empty.
    pub fn from_field(field: Option<&Field>) -> Self {
        match field {
            Some(field) => Self::new(field.to_strings()),
            None => Self::default(),
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Adds a tag unless already present. Blank tags are dropped.
    pub fn insert(&mut self, tag: impl Into<String>) {
        let owned = tag.into();
        let tag = owned.trim();
        if !tag.is_empty() && !self.contains(tag) {
            self.0.push(tag.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Anything carrying a tag set.
pub trait Tagged {
    fn tags(&self) -> &TagSet;
}

/// Returns the entries tagged with `focus_tag`, preserving order.
pub fn filter_by_tag<'a, T: Tagged>(entries: &'a [T], focus_tag: &str) -> Vec<&'a T> {
    entries
        .iter()
        .filter(|entry| entry.tags().contains(focus_tag))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Entry {
        id: u32,
        tags: TagSet,
    }

    impl Tagged for Entry {
        fn tags(&self) -> &TagSet {
            &self.tags
        }
    }

    fn entry(id: u32, tags: &[&str]) -> Entry {
        Entry {
            id,
            tags: TagSet::new(tags.iter().copied()),
        }
    }

    #[test]
    fn test_entry_with_both_tags_matches_either_focus() {
        let entries = vec![entry(1, &["core", "backend"])];
        assert_eq!(filter_by_tag(&entries, "backend").len(), 1);
        assert_eq!(filter_by_tag(&entries, "core").len(), 1);
        assert!(filter_by_tag(&entries, "frontend").is_empty());
    }

    #[test]
    fn test_membership_iff_tag_present() {
        let entries = vec![
            entry(1, &["core"]),
            entry(2, &[]),
            entry(3, &["backend", "core"]),
            entry(4, &["Core"]),
            entry(5, &["backend"]),
        ];
        for focus in ["core", "backend", "Core", "missing"] {
            let selected: Vec<u32> = filter_by_tag(&entries, focus).iter().map(|e| e.id).collect();
            let expected: Vec<u32> = entries
                .iter()
                .filter(|e| e.tags.iter().any(|t| t == focus))
                .map(|e| e.id)
                .collect();
            assert_eq!(selected, expected, "focus tag {focus}");
        }
    }

    #[test]
    fn test_order_preserved() {
        let entries = vec![entry(3, &["x"]), entry(1, &["x"]), entry(2, &["x"])];
        let ids: Vec<u32> = filter_by_tag(&entries, "x").iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let entries: Vec<Entry> = Vec::new();
        assert!(filter_by_tag(&entries, "core").is_empty());
        assert!(filter_by_tag(&entries, "").is_empty());
    }

    #[test]
    fn test_untagged_entry_never_selected() {
        let entries = vec![entry(1, &[])];
        assert!(filter_by_tag(&entries, "").is_empty());
        assert!(filter_by_tag(&entries, "core").is_empty());
    }

    #[test]
    fn test_string_field_is_singleton_set() {
        let tags = TagSet::from_field(Some(&Field::Text("backend".to_string())));
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["backend"]);
        assert!(TagSet::from_field(None).is_empty());
    }

    #[test]
    fn test_insert_dedupes_and_trims() {
        let mut tags = TagSet::new(["core", " core ", "", "ml"]);
        tags.insert("ml");
        tags.insert("acme");
        assert_eq!(tags.into_vec(), vec!["core", "ml", "acme"]);
    }
}
