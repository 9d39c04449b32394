//! Locally cached history listing for one category.

use crate::core::models::{Category, PersistedWordEntry, WordEntry};

#[derive(Debug, Clone)]
pub struct HistoryBook {
    category: Category,
    entries: Vec<PersistedWordEntry>,
    selected: usize,
}

impl HistoryBook {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            entries: Vec::new(),
            selected: 0,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn entries(&self) -> &[PersistedWordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the listing with a fresh load from the store.
    pub fn replace(&mut self, entries: Vec<PersistedWordEntry>) {
        self.entries = entries;
        self.clamp_selection();
    }

    /// Insert or update an entry that belongs to this category.
    pub fn upsert(&mut self, entry: PersistedWordEntry) {
        if entry.category != self.category {
            return;
        }
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.insert(0, entry),
        }
    }

    /// Remove the entry with `id`. Other entries keep their relative order.
    pub fn remove(&mut self, id: &str) -> Option<PersistedWordEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        let removed = self.entries.remove(idx);
        if idx < self.selected {
            self.selected -= 1;
        }
        self.clamp_selection();
        Some(removed)
    }

    pub fn selected(&self) -> Option<&PersistedWordEntry> {
        self.entries.get(self.selected)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Plain word entries, as a quiz pool.
    pub fn words(&self) -> Vec<WordEntry> {
        self.entries.iter().map(|e| e.entry.clone()).collect()
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.entries.len() {
            self.selected = self.entries.len().saturating_sub(1);
        }
    }
}
