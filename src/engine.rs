// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Run orchestration: load, validate, group, solve, persist, report.
//!
//! The engine talks to the outside world through two collaborator traits, a
//! read-side [`GuestSource`] and a write-side [`AssignmentSink`]. One call to
//! [`AssignmentEngine::assign_all`] is idempotent: stale table links are
//! cleared through the sink before the fresh assignment is computed, so two
//! runs over unchanged data produce the same seating.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::PlanError;
use crate::grouping;
use crate::model::{Guest, GuestId, GuestSide, GuestStatus, SeatingTable, Snapshot, TableId};
use crate::search::{SearchStats, Solver, SolverConfig};
use crate::warnings::Warning;

/// Identifier scoping one run to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

/// One guest's table reference in the final plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub guest: GuestId,
    pub table: TableId,
}

/// Read-side collaborator: supplies the event snapshot.
///
/// Implementations must deliver guests with their avoid/prefer relations
/// fully resolved; the engine never fetches anything lazily during a run.
pub trait GuestSource {
    fn load_confirmed_guests(&mut self, event: EventId) -> anyhow::Result<Vec<Guest>>;
    fn load_tables(&mut self, event: EventId) -> anyhow::Result<Vec<SeatingTable>>;
}

/// Write-side collaborator: receives the computed plan.
pub trait AssignmentSink {
    /// Drop any table references left over from a previous run.
    fn clear_assignments(&mut self, event: EventId) -> anyhow::Result<()>;

    /// Store the winning plan. Guests absent from `placements` stay without
    /// a table.
    fn persist(&mut self, placements: &[Placement]) -> anyhow::Result<()>;
}

/// Outcome of one `assign_all` run.
#[derive(Debug, Clone)]
pub struct AssignmentReport {
    pub warnings: Vec<Warning>,
    pub placements: Vec<Placement>,
    pub assigned_units: usize,
    pub total_units: usize,
    /// Tables with at least one guest in the winning plan.
    pub open_tables: usize,
    pub stats: SearchStats,
}

impl AssignmentReport {
    /// The warnings as display lines, the shape outer layers hand to users.
    pub fn warning_lines(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }
}

/// The assignment engine, generic over its collaborators.
pub struct AssignmentEngine<S, K> {
    source: S,
    sink: K,
    config: SolverConfig,
}

impl<S: GuestSource, K: AssignmentSink> AssignmentEngine<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self::with_config(source, sink, SolverConfig::default())
    }

    pub fn with_config(source: S, sink: K, config: SolverConfig) -> Self {
        Self {
            source,
            sink,
            config,
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Assign every confirmed guest of `event` to a table.
    ///
    /// Returns the report with accumulated warnings; fails only on
    /// configuration-fatal conditions or collaborator errors.
    pub fn assign_all(&mut self, event: EventId) -> Result<AssignmentReport, PlanError> {
        let guests = self.source.load_confirmed_guests(event)?;
        let tables = self.source.load_tables(event)?;

        // Reset any previous seating before computing the new one.
        self.sink.clear_assignments(event)?;

        let confirmed: Vec<Guest> = guests
            .into_iter()
            .filter(|g| g.status == GuestStatus::Confirmed)
            .collect();
        info!(
            guests = confirmed.len(),
            tables = tables.len(),
            "loaded event snapshot"
        );

        let snap = Snapshot::new(confirmed, tables);
        let mut warnings = validate_setup(&snap);

        let (units, split_warnings) = grouping::build_units(&snap)?;
        warnings.extend(split_warnings);
        for unit in &units {
            debug!(
                names = %unit.names(&snap),
                seats = unit.total_seats,
                relation = unit.relation.map(|r| r.to_string()).unwrap_or_default(),
                "created seating unit"
            );
        }

        info!(units = units.len(), "starting backtracking search");
        let outcome = Solver::new(&snap, &units, self.config.clone()).solve();

        let mut placements = Vec::new();
        let (assigned_units, open_tables) = match &outcome.best {
            Some(best) => {
                for (u, unit) in units.iter().enumerate() {
                    if let Some(t) = best.placement[u] {
                        let table = &snap.tables[t];
                        for &m in &unit.members {
                            placements.push(Placement {
                                guest: snap.guests[m].id,
                                table: table.id,
                            });
                        }
                    }
                }
                (best.assigned, best.open_tables)
            }
            None => (0, 0),
        };
        self.sink.persist(&placements)?;
        info!(
            placements = placements.len(),
            open_tables, "persisted best assignment"
        );

        for (u, unit) in units.iter().enumerate() {
            let placed = outcome
                .best
                .as_ref()
                .is_some_and(|b| b.placement[u].is_some());
            if !placed {
                let names = unit.names(&snap);
                warn!(%names, "unit left without a table");
                warnings.push(Warning::UnitUnassigned { names });
            }
        }

        Ok(AssignmentReport {
            warnings,
            placements,
            assigned_units,
            total_units: units.len(),
            open_tables,
            stats: outcome.stats,
        })
    }
}

/// Up-front feasibility checks. None of these stop the run; they flag
/// setups where the search is likely to leave guests unseated.
fn validate_setup(snap: &Snapshot) -> Vec<Warning> {
    let mut warnings = Vec::new();

    let needs_access = snap.guests.iter().filter(|g| g.accessibility).count();
    let access_tables = snap.tables.iter().filter(|t| t.accessibility).count();
    if needs_access > access_tables {
        warnings.push(Warning::NotEnoughAccessibleTables {
            needed: needs_access,
            available: access_tables,
        });
    }

    let wants_stage = snap.guests.iter().filter(|g| g.near_stage).count();
    let stage_tables = snap.tables.iter().filter(|t| t.near_stage).count();
    if wants_stage > stage_tables {
        warnings.push(Warning::NotEnoughNearStageTables {
            needed: wants_stage,
            available: stage_tables,
        });
    }

    let bride = snap
        .guests
        .iter()
        .filter(|g| g.side == Some(GuestSide::Bride))
        .count();
    let groom = snap
        .guests
        .iter()
        .filter(|g| g.side == Some(GuestSide::Groom))
        .count();
    let half_tables = snap.tables.len() / 2;
    if groom > bride + half_tables || bride > groom + half_tables {
        warnings.push(Warning::SideImbalance { bride, groom });
    }

    for w in &warnings {
        warn!(warning = %w, "setup validation");
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_flags_missing_accessible_tables() {
        let snap = Snapshot::new(
            vec![Guest::confirmed(1, "A", 2).needs_accessibility()],
            vec![SeatingTable::new(1, 1, 4)],
        );
        let warnings = validate_setup(&snap);
        assert!(warnings.contains(&Warning::NotEnoughAccessibleTables {
            needed: 1,
            available: 0
        }));
    }

    #[test]
    fn validation_flags_side_imbalance() {
        let guests = vec![
            Guest::confirmed(1, "A", 1).with_side(GuestSide::Groom),
            Guest::confirmed(2, "B", 1).with_side(GuestSide::Groom),
            Guest::confirmed(3, "C", 1).with_side(GuestSide::Groom),
        ];
        let snap = Snapshot::new(guests, vec![SeatingTable::new(1, 1, 8)]);
        let warnings = validate_setup(&snap);
        assert!(warnings.contains(&Warning::SideImbalance { bride: 0, groom: 3 }));
    }

    #[test]
    fn balanced_setup_passes_validation() {
        let guests = vec![
            Guest::confirmed(1, "A", 1).with_side(GuestSide::Groom),
            Guest::confirmed(2, "B", 1).with_side(GuestSide::Bride),
        ];
        let snap = Snapshot::new(
            guests,
            vec![SeatingTable::new(1, 1, 4), SeatingTable::new(2, 2, 4)],
        );
        assert!(validate_setup(&snap).is_empty());
    }
}
