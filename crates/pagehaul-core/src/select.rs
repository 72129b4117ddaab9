//! Selection tracking for the preview list.
//!
//! Membership is by URL, so a checked item stays checked when the filter
//! view changes, even while it is filtered out of sight.

use std::collections::HashSet;

use crate::candidate::Candidate;

#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    urls: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn insert(&mut self, url: &str) {
        self.urls.insert(url.to_string());
    }

    pub fn remove(&mut self, url: &str) {
        self.urls.remove(url);
    }

    /// Flips membership; returns the new state.
    pub fn toggle(&mut self, url: &str) -> bool {
        if self.urls.remove(url) {
            false
        } else {
            self.urls.insert(url.to_string());
            true
        }
    }

    pub fn select_all<'a>(&mut self, files: impl IntoIterator<Item = &'a Candidate>) {
        for file in files {
            self.urls.insert(file.url.clone());
        }
    }

    pub fn clear(&mut self) {
        self.urls.clear();
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Selected candidates in snapshot order. URLs selected in an earlier
    /// snapshot but absent from this one are skipped, not erred.
    pub fn materialize(&self, snapshot: &[Candidate]) -> Vec<Candidate> {
        snapshot
            .iter()
            .filter(|c| self.urls.contains(&c.url))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::FileKind;

    fn file(url: &str) -> Candidate {
        Candidate::from_page(url.to_string(), FileKind::Image, 0)
    }

    #[test]
    fn toggle_flips_membership() {
        let mut sel = SelectionSet::new();
        assert!(sel.toggle("https://x/a.jpg"));
        assert!(sel.contains("https://x/a.jpg"));
        assert!(!sel.toggle("https://x/a.jpg"));
        assert!(sel.is_empty());
    }

    #[test]
    fn selection_survives_refiltering() {
        let all = vec![file("https://x/a.jpg"), file("https://x/b.mp4")];
        let mut sel = SelectionSet::new();
        sel.insert("https://x/b.mp4");

        // A narrower view drops the selected item from sight...
        let narrowed = vec![file("https://x/a.jpg")];
        assert!(sel.materialize(&narrowed).is_empty());
        // ...but the selection is intact once the view widens again.
        let widened = sel.materialize(&all);
        assert_eq!(widened.len(), 1);
        assert_eq!(widened[0].url, "https://x/b.mp4");
    }

    #[test]
    fn materialize_keeps_snapshot_order() {
        let all = vec![file("https://x/1"), file("https://x/2"), file("https://x/3")];
        let mut sel = SelectionSet::new();
        sel.insert("https://x/3");
        sel.insert("https://x/1");
        let picked = sel.materialize(&all);
        let urls: Vec<_> = picked.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["https://x/1", "https://x/3"]);
    }

    #[test]
    fn select_all_and_clear() {
        let all = vec![file("https://x/1"), file("https://x/2")];
        let mut sel = SelectionSet::new();
        sel.select_all(&all);
        assert_eq!(sel.len(), 2);
        sel.clear();
        assert!(sel.is_empty());
    }
}
