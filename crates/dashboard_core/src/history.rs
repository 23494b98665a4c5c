use crate::{Effect, FetchFailure, HistoryEntry};

/// Entries shown in the compact header preview.
pub const HISTORY_PREVIEW_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryPanel {
    pub(crate) entries: Vec<HistoryEntry>,
    pub(crate) loading: bool,
    pub(crate) generation: u64,
}

impl HistoryPanel {
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// At most `limit` entries, newest first as served.
    pub fn preview(&self, limit: usize) -> &[HistoryEntry] {
        &self.entries[..self.entries.len().min(limit)]
    }

    pub(crate) fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }

    pub(crate) fn refresh(&mut self) -> Effect {
        self.loading = true;
        Effect::FetchHistory {
            generation: self.generation,
        }
    }

    pub(crate) fn loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<HistoryEntry>, FetchFailure>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        if let Ok(entries) = result {
            self.entries = entries;
        }
        true
    }
}
