//! Item search
//!
//! Filtering always starts from a snapshot of the unfiltered items taken on
//! the first search, never from a previous result. Clearing the query hands
//! back the snapshot itself rather than a re-filtered copy.

use super::item::{Item, ItemPath};
use crossterm::event::KeyCode;
use std::sync::Arc;

/// Whether `item` matches an already lower-cased, non-empty query
pub fn matches(item: &Item, query: &str) -> bool {
    match &item.label {
        Some(label) if !item.is_structural() => label.to_lowercase().contains(query),
        _ => false,
    }
}

/// Result of one search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The untouched snapshot
    pub original: Arc<[Item]>,
    /// Filtered view, or the snapshot itself for an empty query
    pub filtered: Arc<[Item]>,
}

/// Top-level snapshot index of each displayed item while filtering
type SourceIndices = Arc<[usize]>;

/// Snapshot-based search state
#[derive(Debug, Clone, Default)]
pub struct ItemSearch {
    original: Option<Arc<[Item]>>,
    query: String,
    /// `None` when the displayed list is the snapshot itself
    source: Option<SourceIndices>,
}

impl ItemSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a search for `value` against the snapshot, taking it from `current` if needed
    pub fn apply(&mut self, current: &Arc<[Item]>, value: &str) -> SearchOutcome {
        self.query = value.to_lowercase();
        let original = Arc::clone(self.original.get_or_insert_with(|| Arc::clone(current)));

        let filtered = if self.query.is_empty() {
            self.source = None;
            Arc::clone(&original)
        } else {
            let (source, filtered): (Vec<usize>, Vec<Item>) = original
                .iter()
                .enumerate()
                .filter(|(_, item)| matches(item, &self.query))
                .map(|(i, item)| (i, item.clone()))
                .unzip();
            self.source = Some(source.into());
            filtered.into()
        };

        SearchOutcome { original, filtered }
    }

    /// Translate a path in the displayed list into the same item's path in the snapshot
    pub fn snapshot_path(&self, displayed: &[usize]) -> Option<ItemPath> {
        let Some(source) = &self.source else {
            return Some(displayed.to_vec());
        };
        let (first, rest) = displayed.split_first()?;
        let mut path = vec![*source.get(*first)?];
        path.extend_from_slice(rest);
        Some(path)
    }

    /// Translate a snapshot path into the displayed list; `None` when filtered out
    pub fn displayed_path(&self, snapshot: &[usize]) -> Option<ItemPath> {
        let Some(source) = &self.source else {
            return Some(snapshot.to_vec());
        };
        let (first, rest) = snapshot.split_first()?;
        let mut path = vec![source.iter().position(|i| i == first)?];
        path.extend_from_slice(rest);
        Some(path)
    }

    /// Snapshot taken by the first search, if any
    pub fn original(&self) -> Option<&Arc<[Item]>> {
        self.original.as_ref()
    }

    /// Swap the snapshot for an updated one (e.g. after toggling a checkbox)
    pub fn replace_original(&mut self, items: Arc<[Item]>) {
        if self.original.is_some() {
            self.original = Some(items);
        }
    }

    /// Whether the displayed items are currently a filtered view
    pub fn is_filtering(&self) -> bool {
        !self.query.is_empty()
    }

    /// Forget the snapshot and query
    pub fn reset(&mut self) {
        self.original = None;
        self.query.clear();
        self.source = None;
    }
}

/// Single-line text field behind the menu's search box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBox {
    value: String,
    /// Cursor position in characters
    cursor: usize,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Apply an editing key; returns true when the value changed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        let len = self.value.chars().count();
        match key {
            KeyCode::Char(c) => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            KeyCode::Delete if self.cursor < len => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len);
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = len;
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit() -> Arc<[Item]> {
        vec![
            Item::new("Apple"),
            Item::new("Banana"),
            Item::separator(),
            Item::new("Grape"),
        ]
        .into()
    }

    fn filter(items: &Arc<[Item]>, query: &str) -> Vec<Item> {
        ItemSearch::new().apply(items, query).filtered.to_vec()
    }

    #[test]
    fn filter_matches_label_substrings_case_insensitively() {
        let items = fruit();
        assert_eq!(filter(&items, "an"), vec![Item::new("Banana")]);
        assert_eq!(filter(&items, "AP").len(), 2);
        assert!(filter(&items, "kiwi").is_empty());
    }

    #[test]
    fn structural_and_unlabelled_items_never_match() {
        let items: Arc<[Item]> =
            vec![Item::header("Apples"), Item::separator(), Item::new("Apple")].into();
        assert_eq!(filter(&items, "apple"), vec![Item::new("Apple")]);
    }

    #[test]
    fn paths_translate_between_view_and_snapshot() {
        let items = fruit();
        let mut search = ItemSearch::new();
        assert_eq!(search.snapshot_path(&[1]), Some(vec![1]));

        search.apply(&items, "ap");
        // Apple and Grape remain, Grape came from index 3
        assert_eq!(search.snapshot_path(&[1]), Some(vec![3]));
        assert_eq!(search.snapshot_path(&[2]), None);
        assert_eq!(search.displayed_path(&[3, 0]), Some(vec![1, 0]));
        assert_eq!(search.displayed_path(&[1]), None);

        search.apply(&items, "");
        assert_eq!(search.displayed_path(&[3]), Some(vec![3]));
    }

    #[test]
    fn clearing_restores_snapshot_identity() {
        let items = fruit();
        let mut search = ItemSearch::new();

        let filtered = search.apply(&items, "an");
        assert_eq!(&*filtered.filtered, &[Item::new("Banana")]);
        assert!(Arc::ptr_eq(&filtered.original, &items));

        // Later searches start from the snapshot, not from the filtered view
        let again = search.apply(&filtered.filtered, "gr");
        assert_eq!(&*again.filtered, &[Item::new("Grape")]);

        let cleared = search.apply(&again.filtered, "");
        assert!(Arc::ptr_eq(&cleared.filtered, &items));
        assert!(!search.is_filtering());
    }

    #[test]
    fn every_result_is_a_matching_subset() {
        let items = fruit();
        for query in ["a", "p", "e", "ra", "x", "BAN"] {
            let result = filter(&items, query);
            let lowered = query.to_lowercase();
            for item in &result {
                assert!(items.contains(item));
                assert!(!item.is_structural());
                assert!(item.label.as_ref().unwrap().to_lowercase().contains(&lowered));
            }
        }
    }

    #[test]
    fn search_box_edits_at_cursor() {
        let mut input = SearchBox::new();
        for c in "gape".chars() {
            assert!(input.handle_key(KeyCode::Char(c)));
        }
        for _ in 0..3 {
            input.handle_key(KeyCode::Left);
        }
        input.handle_key(KeyCode::Char('r'));
        assert_eq!(input.value(), "grape");

        assert!(input.handle_key(KeyCode::Backspace));
        assert_eq!(input.value(), "gape");
        input.handle_key(KeyCode::Home);
        assert!(!input.handle_key(KeyCode::Backspace));
        assert!(input.handle_key(KeyCode::Delete));
        assert_eq!(input.value(), "ape");
    }
}
