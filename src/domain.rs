// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Candidate-table domains and the AC-3 pruning pass.
//!
//! Each seating unit carries the set of tables that could still hold it. The
//! AC-3 variant here runs over a shared-resource compatibility relation
//! rather than classic binary inequality constraints: two units may pick the
//! *same* table only if their combined seats fit it, while different tables
//! only require each unit to satisfy its own hard constraints.
//!
//! Pruning is an optimization, not a correctness gate: the search re-checks
//! every hard constraint itself. On a domain wipeout the pass rewinds its own
//! edits and gives up rather than leaving the search space corrupted.

use std::collections::{BTreeSet, VecDeque};

use tracing::debug;

use crate::model::{SeatingTable, SeatingUnit};
use crate::trail::Trail;

/// Per-unit candidate table sets, indexed by unit. Shrink-only through the
/// public API; restoration goes through [`Trail::rewind_to`].
#[derive(Debug)]
pub struct DomainStore {
    domains: Vec<BTreeSet<usize>>,
}

impl DomainStore {
    /// Initial domains: tables big enough for the unit, and accessible when
    /// the unit requires accessibility.
    pub fn seed(units: &[SeatingUnit], tables: &[SeatingTable]) -> Self {
        let domains = units
            .iter()
            .map(|unit| {
                tables
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| satisfies(unit, t))
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();
        Self { domains }
    }

    pub fn domain(&self, unit: usize) -> &BTreeSet<usize> {
        &self.domains[unit]
    }

    /// Remove one table from one unit's domain, recording it on the trail.
    pub fn remove(&mut self, unit: usize, table: usize, trail: &mut Trail) {
        if self.domains[unit].remove(&table) {
            trail.record(unit, table);
        }
    }

    /// Remove a table from the domains of units it can no longer hold, given
    /// the seats left after a committed assignment. Called after each real
    /// (non-speculative) assignment in the search; units that still fit keep
    /// the table, so a partly filled table stays shareable until exhausted.
    pub fn prune_exhausted_table(
        &mut self,
        table: usize,
        free_seats: u32,
        units: &[SeatingUnit],
        trail: &mut Trail,
    ) {
        for (unit, u) in units.iter().enumerate() {
            if u.total_seats > free_seats {
                self.remove(unit, table, trail);
            }
        }
    }

    /// AC-3 over all ordered pairs of `active` units.
    ///
    /// Returns `false` when a domain wiped out; in that case all edits made
    /// by this pass have been rewound and nothing changed.
    pub fn ac3(
        &mut self,
        units: &[SeatingUnit],
        tables: &[SeatingTable],
        active: &[bool],
        trail: &mut Trail,
    ) -> bool {
        let n = units.len();
        let mark = trail.mark();

        let mut arcs: VecDeque<(usize, usize)> = VecDeque::new();
        for u1 in 0..n {
            for u2 in 0..n {
                if u1 != u2 && active[u1] && active[u2] {
                    arcs.push_back((u1, u2));
                }
            }
        }

        while let Some((u1, u2)) = arcs.pop_front() {
            if self.revise(u1, u2, units, tables, trail) {
                if self.domains[u1].is_empty() {
                    debug!(unit = u1, "domain wipeout during AC-3, rewinding pass");
                    trail.rewind_to(mark, self);
                    return false;
                }
                for other in 0..n {
                    if other != u1 && other != u2 && active[other] {
                        arcs.push_back((other, u1));
                    }
                }
            }
        }
        true
    }

    /// Remove from `u1`'s domain every table without a supporting choice in
    /// `u2`'s domain. Returns whether anything was removed.
    fn revise(
        &mut self,
        u1: usize,
        u2: usize,
        units: &[SeatingUnit],
        tables: &[SeatingTable],
        trail: &mut Trail,
    ) -> bool {
        let candidates: Vec<usize> = self.domains[u1].iter().copied().collect();
        let mut revised = false;

        for t1 in candidates {
            let supported = self.domains[u2]
                .iter()
                .any(|&t2| compatible(units, tables, u1, t1, u2, t2));
            if !supported {
                self.remove(u1, t1, trail);
                revised = true;
            }
        }
        revised
    }

    /// Re-insert a table into a unit's domain. Only the trail rewind may do
    /// this.
    pub(crate) fn restore(&mut self, unit: usize, table: usize) {
        self.domains[unit].insert(table);
    }
}

/// Hard per-unit constraints: capacity and accessibility.
fn satisfies(unit: &SeatingUnit, table: &SeatingTable) -> bool {
    table.max_seats >= unit.total_seats && (!unit.requires_accessibility || table.accessibility)
}

/// Joint feasibility of (u1 at t1, u2 at t2): sharing a table additionally
/// requires the combined seats to fit it.
fn compatible(
    units: &[SeatingUnit],
    tables: &[SeatingTable],
    u1: usize,
    t1: usize,
    u2: usize,
    t2: usize,
) -> bool {
    if !satisfies(&units[u1], &tables[t1]) || !satisfies(&units[u2], &tables[t2]) {
        return false;
    }
    t1 != t2 || units[u1].total_seats + units[u2].total_seats <= tables[t1].max_seats
}

/// Convenience for callers that prune before any unit is assigned.
pub fn all_active(n: usize) -> Vec<bool> {
    vec![true; n]
}
