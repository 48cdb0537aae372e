//! Display cap for conflict lists.

use serde::Serialize;

use super::ConflictPair;

/// The head of a conflict list plus how many entries were held back.
#[derive(Debug, Clone, Serialize)]
pub struct CappedConflicts<'a> {
    pub shown: Vec<ConflictPair<'a>>,
    pub hidden: usize,
}

impl CappedConflicts<'_> {
    pub fn total(&self) -> usize {
        self.shown.len() + self.hidden
    }

    pub fn is_truncated(&self) -> bool {
        self.hidden > 0
    }
}

/// Keep the first `limit` conflicts in detector order.
pub fn cap_conflicts(conflicts: Vec<ConflictPair<'_>>, limit: usize) -> CappedConflicts<'_> {
    let hidden = conflicts.len().saturating_sub(limit);
    let shown = conflicts.into_iter().take(limit).collect();
    CappedConflicts { shown, hidden }
}
