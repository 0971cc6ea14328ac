// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! In-memory snapshot of one event, taken once per assignment run.
//!
//! Guests and tables live in arenas and are referenced by dense index
//! everywhere inside the engine. The avoid/prefer id sets are resolved to
//! index sets up front so every later constraint check is a membership test,
//! never an object-graph walk.

use std::collections::{BTreeSet, HashMap};

use crate::model::{Guest, GuestId, SeatingTable};

/// Immutable view of the event the run operates on.
#[derive(Debug)]
pub struct Snapshot {
    pub guests: Vec<Guest>,
    pub tables: Vec<SeatingTable>,
    /// Per guest index: indices of guests it must avoid (directed).
    pub avoid: Vec<BTreeSet<usize>>,
    /// Per guest index: indices of guests it prefers to sit with (directed).
    pub prefer: Vec<BTreeSet<usize>>,
}

impl Snapshot {
    /// Build the arena and resolve the id-based relations to indices.
    ///
    /// References to guests outside the snapshot (declined, deleted, or from
    /// another event) are dropped; they cannot constrain a seating in which
    /// the referenced guest does not appear.
    pub fn new(guests: Vec<Guest>, tables: Vec<SeatingTable>) -> Self {
        let index: HashMap<GuestId, usize> =
            guests.iter().enumerate().map(|(i, g)| (g.id, i)).collect();

        let resolve = |ids: &BTreeSet<GuestId>| -> BTreeSet<usize> {
            ids.iter().filter_map(|id| index.get(id).copied()).collect()
        };

        let avoid = guests.iter().map(|g| resolve(&g.avoid)).collect();
        let prefer = guests.iter().map(|g| resolve(&g.prefer)).collect();

        Self {
            guests,
            tables,
            avoid,
            prefer,
        }
    }

    /// True when either guest lists the other in its avoid set.
    pub fn avoids(&self, a: usize, b: usize) -> bool {
        self.avoid[a].contains(&b) || self.avoid[b].contains(&a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_avoid_ids_to_indices() {
        let guests = vec![
            Guest::confirmed(10, "A", 1).avoids(20),
            Guest::confirmed(20, "B", 1),
        ];
        let snap = Snapshot::new(guests, vec![]);
        assert!(snap.avoids(0, 1));
        assert!(snap.avoids(1, 0)); // one-directional listing still conflicts
    }

    #[test]
    fn drops_references_to_unknown_guests() {
        let guests = vec![Guest::confirmed(1, "A", 1).avoids(99).prefers(98)];
        let snap = Snapshot::new(guests, vec![]);
        assert!(snap.avoid[0].is_empty());
        assert!(snap.prefer[0].is_empty());
    }
}
