#[cfg(test)]
#[path = "history_test.rs"]
mod tests;

use anyhow::Result;

use super::FormulaComposer;
use crate::domain::models::Action;
use crate::domain::models::HistoryEntry;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryStatus {
    #[default]
    NotRequested,
    Loading,
    Loaded,
    Failed,
}

/// The user's prior formula pairs. Fetched once per interface session and
/// never required for solving.
#[derive(Default)]
pub struct HistoryProvider {
    entries: Vec<HistoryEntry>,
    status: HistoryStatus,
}

impl HistoryProvider {
    pub fn entries(&self) -> &[HistoryEntry] {
        return &self.entries;
    }

    pub fn status(&self) -> HistoryStatus {
        return self.status;
    }

    /// Issues the single history request. Any later call is a no-op, as is a
    /// call without a token.
    pub fn start(&mut self, token: Option<&str>) -> Option<Action> {
        if self.status != HistoryStatus::NotRequested {
            return None;
        }

        let token = token?;
        self.status = HistoryStatus::Loading;

        return Some(Action::HistoryRequest(token.to_string()));
    }

    pub fn handle_response(&mut self, res: Result<Vec<HistoryEntry>>) {
        match res {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "Loaded formula history");
                self.entries = entries;
                self.status = HistoryStatus::Loaded;
            }
            Err(err) => {
                tracing::warn!(error = ?err, "Failed to load formula history");
                self.entries = vec![];
                self.status = HistoryStatus::Failed;
            }
        }
    }

    /// Replaces both draft fields with the entry at `idx`, discarding any
    /// unsaved edits.
    pub fn select(&self, idx: usize, composer: &mut FormulaComposer) -> bool {
        let entry = match self.entries.get(idx) {
            Some(entry) => entry,
            None => return false,
        };

        composer.set_premise(&entry.premise);
        composer.set_conclusion(&entry.conclusion);

        return true;
    }
}
