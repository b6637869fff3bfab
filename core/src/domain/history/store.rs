use uuid::Uuid;

use crate::domain::history::entities::AnalysisHistoryEntry;

pub const HISTORY_CAPACITY: usize = 10;

/// Newest-first, capacity-bounded list of past analyses for one session.
#[derive(Debug, Clone)]
pub struct SessionHistory {
    entries: Vec<AnalysisHistoryEntry>,
    capacity: usize,
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Prepends `entry` and drops whatever falls past the capacity.
    pub fn record(&mut self, entry: AnalysisHistoryEntry) {
        // ids stay unique even if the same entry is recorded twice
        self.entries.retain(|existing| existing.id != entry.id);
        self.entries.insert(0, entry);

        if self.entries.len() > self.capacity {
            let evicted = self.entries.len() - self.capacity;
            self.entries.truncate(self.capacity);
            tracing::debug!(evicted, "history truncated to capacity");
        }
    }

    pub fn list(&self) -> &[AnalysisHistoryEntry] {
        &self.entries
    }

    pub fn select(&self, id: Uuid) -> Option<&AnalysisHistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
