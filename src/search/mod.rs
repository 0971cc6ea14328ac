// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Backtracking search over unit-to-table assignments.
//!
//! Depth-first search with full state restoration after every branch:
//!
//! 1. **MRV**: pick the unassigned unit with the fewest live tables (still
//!    in its domain, enough free seats, no avoidance conflict with guests
//!    already seated there). Ties prefer the unit with the larger raw
//!    domain.
//! 2. **LCV**: order that unit's live candidates by ascending penalty, so
//!    the cheapest branch is explored first.
//! 3. **Commit**: seat the unit, prune the table (on the trail) from the
//!    domains of units its remaining seats can no longer hold, and
//!    optionally re-run AC-3 for deeper pruning. Units that still fit keep
//!    the table, so tables fill up across units instead of holding one
//!    unit each.
//! 4. **Forward check**: every still-unassigned unit must keep at least one
//!    live table, otherwise the commit is undone immediately.
//!
//! The tree is explored exhaustively. The best solution is kept by most
//! units assigned, then fewest open tables; partial assignments are recorded
//! at dead ends so an infeasible setup still yields the largest seating
//! found instead of nothing.
//!
//! Table and assignment bookkeeping are undone in place after each branch;
//! domain edits are undone by rewinding the trail. Recursion depth is
//! bounded by the unit count, so the search always terminates.

pub mod table_state;

pub use table_state::TableState;

use tracing::{debug, trace};

use crate::domain::{self, DomainStore};
use crate::model::{SeatingUnit, Snapshot};
use crate::penalty::{PenaltyCalculator, PenaltyWeights, SidePolicy};
use crate::trail::Trail;

/// Knobs for one solver run.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Re-run AC-3 over the unassigned units after every committed
    /// assignment. Costs time per node, prunes more of the tree.
    pub propagate_after_commit: bool,
    pub weights: PenaltyWeights,
    pub side_policy: SidePolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            propagate_after_commit: true,
            weights: PenaltyWeights::default(),
            side_policy: SidePolicy::default(),
        }
    }
}

/// Counters for one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Recursive calls into the search.
    pub nodes: u64,
    /// Branches fully explored and undone.
    pub backtracks: u64,
    /// Tentative commits rejected by forward checking.
    pub forward_failures: u64,
}

/// The best assignment found by a run.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Table index per unit, `None` for units left unseated.
    pub placement: Vec<Option<usize>>,
    pub assigned: usize,
    pub open_tables: usize,
}

/// Result of a solver run.
#[derive(Debug)]
pub struct SolveOutcome {
    pub best: Option<Solution>,
    pub stats: SearchStats,
}

/// One backtracking run over a snapshot and its seating units.
///
/// Owns every piece of mutable search state; nothing is shared across
/// invocations, so concurrent runs on different snapshots cannot alias.
pub struct Solver<'a> {
    snap: &'a Snapshot,
    units: &'a [SeatingUnit],
    config: SolverConfig,
    penalty: PenaltyCalculator,
    domains: DomainStore,
    trail: Trail,
    tables: Vec<TableState>,
    assignment: Vec<Option<usize>>,
    assigned: usize,
    /// Pairwise unit conflict matrix, precomputed once.
    conflict: Vec<Vec<bool>>,
    best: Option<Solution>,
    stats: SearchStats,
}

impl<'a> Solver<'a> {
    pub fn new(snap: &'a Snapshot, units: &'a [SeatingUnit], config: SolverConfig) -> Self {
        let n = units.len();
        let penalty = PenaltyCalculator::new(config.weights, config.side_policy, snap);
        let domains = DomainStore::seed(units, &snap.tables);
        let tables = snap
            .tables
            .iter()
            .map(|t| TableState::new(t.max_seats))
            .collect();

        let mut conflict = vec![vec![false; n]; n];
        for a in 0..n {
            for b in a + 1..n {
                if units[a].conflicts_with(&units[b], snap) {
                    conflict[a][b] = true;
                    conflict[b][a] = true;
                }
            }
        }

        Self {
            snap,
            units,
            config,
            penalty,
            domains,
            trail: Trail::new(),
            tables,
            assignment: vec![None; n],
            assigned: 0,
            conflict,
            best: None,
            stats: SearchStats::default(),
        }
    }

    /// Run the exhaustive search and return the best assignment found.
    pub fn solve(mut self) -> SolveOutcome {
        // Initial pruning pass over all units. Its edits stay for the whole
        // run; only search-time edits are rewound during backtracking.
        let active = domain::all_active(self.units.len());
        self.domains
            .ac3(self.units, &self.snap.tables, &active, &mut self.trail);

        self.backtrack();

        debug!(
            nodes = self.stats.nodes,
            backtracks = self.stats.backtracks,
            forward_failures = self.stats.forward_failures,
            "search finished"
        );
        SolveOutcome {
            best: self.best,
            stats: self.stats,
        }
    }

    fn backtrack(&mut self) {
        self.stats.nodes += 1;

        if self.assigned == self.units.len() {
            self.record_candidate();
            return;
        }

        let Some(unit) = self.select_unit() else {
            return;
        };

        let candidates: Vec<usize> = self
            .domains
            .domain(unit)
            .iter()
            .copied()
            .filter(|&t| self.is_live(unit, t))
            .collect();

        if candidates.is_empty() {
            // Dead end: no seat for this unit under the current partial
            // state. Keep the partial assignment if it is the best so far.
            trace!(unit, "no live candidate tables, abandoning branch");
            self.record_candidate();
            return;
        }

        let mut scored: Vec<(i64, usize)> = candidates
            .into_iter()
            .map(|t| (self.score_candidate(unit, t), t))
            .collect();
        scored.sort_unstable();

        for (_, table) in scored {
            let mark = self.trail.mark();
            self.commit(unit, table);

            if self.config.propagate_after_commit {
                let active: Vec<bool> = self.assignment.iter().map(|a| a.is_none()).collect();
                self.domains
                    .ac3(self.units, &self.snap.tables, &active, &mut self.trail);
            }

            if self.forward_check() {
                self.backtrack();
            } else {
                self.stats.forward_failures += 1;
                // The tentative commit itself may still be the largest
                // partial seating seen; record it before undoing.
                self.record_candidate();
            }

            self.undo(unit, table, mark);
            self.stats.backtracks += 1;
        }
    }

    /// MRV with a larger-raw-domain tie break.
    fn select_unit(&self) -> Option<usize> {
        let mut best: Option<(usize, usize, usize)> = None; // (unit, live, raw)
        for u in 0..self.units.len() {
            if self.assignment[u].is_some() {
                continue;
            }
            let live = self.live_options(u);
            let raw = self.domains.domain(u).len();
            let better = match best {
                None => true,
                Some((_, b_live, b_raw)) => live < b_live || (live == b_live && raw > b_raw),
            };
            if better {
                best = Some((u, live, raw));
            }
        }
        best.map(|(u, _, _)| u)
    }

    /// A table is live for a unit when it is still in the unit's domain
    /// (checked by the caller), has the free seats, and seats nobody the
    /// unit's guests must avoid.
    fn is_live(&self, unit: usize, table: usize) -> bool {
        self.tables[table].free_seats() >= self.units[unit].total_seats
            && self.conflict_free(unit, table)
    }

    fn conflict_free(&self, unit: usize, table: usize) -> bool {
        self.tables[table]
            .units
            .iter()
            .all(|&v| !self.conflict[unit][v])
    }

    fn live_options(&self, unit: usize) -> usize {
        self.domains
            .domain(unit)
            .iter()
            .filter(|&&t| self.is_live(unit, t))
            .count()
    }

    fn score_candidate(&self, unit: usize, table: usize) -> i64 {
        let has_conflict = !self.conflict_free(unit, table);
        self.penalty.score(
            self.snap,
            self.units,
            &self.tables[table],
            table,
            &self.units[unit],
            has_conflict,
        )
    }

    fn commit(&mut self, unit: usize, table: usize) {
        trace!(unit, table, "tentative commit");
        self.tables[table].seat(unit, self.units[unit].total_seats);
        self.assignment[unit] = Some(table);
        self.assigned += 1;
        self.domains.prune_exhausted_table(
            table,
            self.tables[table].free_seats(),
            self.units,
            &mut self.trail,
        );
    }

    fn undo(&mut self, unit: usize, table: usize, mark: usize) {
        self.trail.rewind_to(mark, &mut self.domains);
        self.tables[table].unseat(unit, self.units[unit].total_seats);
        self.assignment[unit] = None;
        self.assigned -= 1;
    }

    /// Every unassigned unit still has a live table somewhere.
    fn forward_check(&self) -> bool {
        (0..self.units.len())
            .filter(|&u| self.assignment[u].is_none())
            .all(|u| self.live_options(u) > 0)
    }

    /// Keep the current assignment if it beats the incumbent: most units
    /// assigned first, then fewest open tables. A complete assignment only
    /// replaces another complete one when it opens strictly fewer tables.
    fn record_candidate(&mut self) {
        let open = self.tables.iter().filter(|ts| ts.is_open()).count();
        let better = match &self.best {
            None => true,
            Some(b) => {
                self.assigned > b.assigned || (self.assigned == b.assigned && open < b.open_tables)
            }
        };
        if better {
            debug!(
                assigned = self.assigned,
                total = self.units.len(),
                open_tables = open,
                "new best assignment"
            );
            self.best = Some(Solution {
                placement: self.assignment.clone(),
                assigned: self.assigned,
                open_tables: open,
            });
        }
    }
}
