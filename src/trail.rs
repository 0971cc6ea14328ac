// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Undo log for domain edits.
//!
//! Every table removed from a unit's domain is recorded here, whether by the
//! AC-3 pass or by the search committing a table. Backtracking rewinds the
//! log to a mark, re-inserting the removed pairs in reverse order. This keeps
//! the public domain API shrink-only: restoration happens exclusively through
//! a rewind, never through ad-hoc insertion.

use crate::domain::DomainStore;

/// Log of (unit, table) domain removals with mark-based rewind.
#[derive(Debug, Default)]
pub struct Trail {
    entries: Vec<(usize, usize)>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position; pass it to [`Trail::rewind_to`] later to undo
    /// everything recorded after this point.
    pub fn mark(&self) -> usize {
        self.entries.len()
    }

    /// Record the removal of `table` from `unit`'s domain.
    pub fn record(&mut self, unit: usize, table: usize) {
        self.entries.push((unit, table));
    }

    /// Undo every removal recorded since `mark`, restoring the domains.
    pub fn rewind_to(&mut self, mark: usize, domains: &mut DomainStore) {
        while self.entries.len() > mark {
            if let Some((unit, table)) = self.entries.pop() {
                domains.restore(unit, table);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
