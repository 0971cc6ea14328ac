// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Penalty scoring for (unit, table) pairings.
//!
//! The score is a soft ordering signal only, never a hard filter: candidate
//! tables are sorted by ascending penalty before the search tries them, and
//! the same weights rank complete solutions. Hard filtering happens in the
//! domain seed and the search's own capacity/conflict checks; the large
//! conflict term here is a defensive fallback in case a conflicting
//! candidate ever slips past the primary filter.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{GuestSide, SeatingUnit, Snapshot};
use crate::search::TableState;

/// Weights of the individual penalty terms. Lower total is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyWeights {
    /// Unit requires accessibility but the table has none.
    pub accessibility_unmet: i64,
    /// Unit wants the stage but the table is far from it.
    pub near_stage_unmet: i64,
    /// Per already-seated guest sharing the unit's relation (subtracted).
    pub same_relation_bonus: i64,
    /// Per already-seated guest in the unit's prefer sets (subtracted).
    pub preferred_guest_bonus: i64,
    /// Side-zone mismatch. A soft nudge, meaningful in the 20..=300 range.
    pub side_mismatch: i64,
    /// Multiplier on the cube of the free seats left after placement.
    pub empty_seat_factor: i64,
    /// Defensive fallback for a hard avoidance conflict.
    pub hard_conflict: i64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            accessibility_unmet: 1000,
            near_stage_unmet: 200,
            same_relation_bonus: 250,
            preferred_guest_bonus: 150,
            side_mismatch: 100,
            empty_seat_factor: 10,
            hard_conflict: 2000,
        }
    }
}

/// How tables are zoned between the bride and groom sides.
///
/// The exact side policy is event-specific, so it stays configurable rather
/// than fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidePolicy {
    /// No side zoning; the mismatch term never applies.
    Ignore,
    /// Tables (ordered by table number) split into two equal halves,
    /// bride zone first.
    #[default]
    SplitHalf,
    /// Zone sizes proportional to the per-side guest counts.
    Proportional,
}

/// Scores candidate pairings against one run's snapshot.
#[derive(Debug, Clone)]
pub struct PenaltyCalculator {
    weights: PenaltyWeights,
    /// Side zone per table index, `None` when unzoned.
    zones: Vec<Option<GuestSide>>,
}

impl PenaltyCalculator {
    pub fn new(weights: PenaltyWeights, policy: SidePolicy, snap: &Snapshot) -> Self {
        Self {
            weights,
            zones: zone_tables(policy, snap),
        }
    }

    /// Total penalty for seating `unit` at `table_idx` given the table's
    /// current occupancy. Lower is better; bonuses may drive it negative.
    pub fn score(
        &self,
        snap: &Snapshot,
        units: &[SeatingUnit],
        state: &TableState,
        table_idx: usize,
        unit: &SeatingUnit,
        has_conflict: bool,
    ) -> i64 {
        let table = &snap.tables[table_idx];
        let w = &self.weights;
        let mut penalty = 0i64;

        if unit.requires_accessibility && !table.accessibility {
            penalty += w.accessibility_unmet;
        }
        if unit.wants_near_stage && !table.near_stage {
            penalty += w.near_stage_unmet;
        }

        let seated: BTreeSet<usize> = state
            .units
            .iter()
            .flat_map(|&v| units[v].members.iter().copied())
            .collect();

        if let Some(relation) = unit.relation {
            let same = seated
                .iter()
                .filter(|&&g| snap.guests[g].relation == Some(relation))
                .count() as i64;
            penalty -= same * w.same_relation_bonus;
        }

        let preferred: i64 = unit
            .members
            .iter()
            .map(|&m| snap.prefer[m].iter().filter(|g| seated.contains(g)).count() as i64)
            .sum();
        penalty -= preferred * w.preferred_guest_bonus;

        if let (Some(side), Some(zone)) = (unit.side, self.zones[table_idx]) {
            if side != GuestSide::Both && side != zone {
                penalty += w.side_mismatch;
            }
        }

        let free_after = state.free_seats() as i64 - unit.total_seats as i64;
        if free_after > 0 {
            penalty += free_after.pow(3) * w.empty_seat_factor;
        }

        if has_conflict {
            penalty += w.hard_conflict;
        }

        penalty
    }
}

/// Assign a side zone to each table under the given policy.
fn zone_tables(policy: SidePolicy, snap: &Snapshot) -> Vec<Option<GuestSide>> {
    let n = snap.tables.len();
    let bride_tables = match policy {
        SidePolicy::Ignore => return vec![None; n],
        SidePolicy::SplitHalf => n / 2,
        SidePolicy::Proportional => {
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
            if bride + groom == 0 {
                return vec![None; n];
            }
            (n * bride + (bride + groom) / 2) / (bride + groom)
        }
    };

    // Zone in table-number order so the bride zone is a contiguous block of
    // the floor plan, not an artifact of provider ordering.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| (snap.tables[i].table_number, i));

    let mut zones = vec![None; n];
    for (rank, &i) in order.iter().enumerate() {
        zones[i] = Some(if rank < bride_tables {
            GuestSide::Bride
        } else {
            GuestSide::Groom
        });
    }
    zones
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Guest, GuestRelation, SeatingTable};
    use crate::search::TableState;

    fn calc(snap: &Snapshot, policy: SidePolicy) -> PenaltyCalculator {
        PenaltyCalculator::new(PenaltyWeights::default(), policy, snap)
    }

    fn empty_state(seats: u32) -> TableState {
        TableState::new(seats)
    }

    #[test]
    fn unmet_hard_preferences_add_flat_penalties() {
        let snap = Snapshot::new(
            vec![Guest::confirmed(1, "A", 4).needs_accessibility().wants_near_stage()],
            vec![SeatingTable::new(1, 1, 4)],
        );
        let unit = SeatingUnit::new(&snap, vec![0]);
        let score = calc(&snap, SidePolicy::Ignore).score(
            &snap,
            &[unit.clone()],
            &empty_state(4),
            0,
            &unit,
            false,
        );
        // 1000 (accessibility) + 200 (stage), no free seats left.
        assert_eq!(score, 1200);
    }

    #[test]
    fn same_relation_guests_reduce_penalty() {
        let snap = Snapshot::new(
            vec![
                Guest::confirmed(1, "A", 2).with_relation(GuestRelation::GroomFamily),
                Guest::confirmed(2, "B", 2).with_relation(GuestRelation::GroomFamily),
            ],
            vec![SeatingTable::new(1, 1, 4)],
        );
        let units: Vec<_> = (0..2).map(|i| SeatingUnit::new(&snap, vec![i])).collect();

        let mut state = empty_state(4);
        state.seat(0, 2); // A already seated

        let score = calc(&snap, SidePolicy::Ignore).score(&snap, &units, &state, 0, &units[1], false);
        // -250 (one same-relation guest), table full after placement.
        assert_eq!(score, -250);
    }

    #[test]
    fn preferred_guests_reduce_penalty() {
        let snap = Snapshot::new(
            vec![
                Guest::confirmed(1, "A", 2),
                Guest::confirmed(2, "B", 2).prefers(1),
            ],
            vec![SeatingTable::new(1, 1, 4)],
        );
        let units: Vec<_> = (0..2).map(|i| SeatingUnit::new(&snap, vec![i])).collect();

        let mut state = empty_state(4);
        state.seat(0, 2);

        let score = calc(&snap, SidePolicy::Ignore).score(&snap, &units, &state, 0, &units[1], false);
        assert_eq!(score, -150);
    }

    #[test]
    fn empty_seats_cost_cubically() {
        let snap = Snapshot::new(
            vec![Guest::confirmed(1, "A", 2)],
            vec![SeatingTable::new(1, 1, 8)],
        );
        let unit = SeatingUnit::new(&snap, vec![0]);
        let score = calc(&snap, SidePolicy::Ignore).score(
            &snap,
            &[unit.clone()],
            &empty_state(8),
            0,
            &unit,
            false,
        );
        // 6 free seats left: 6^3 * 10.
        assert_eq!(score, 2160);
    }

    #[test]
    fn conflict_fallback_dominates_bonuses() {
        let snap = Snapshot::new(
            vec![Guest::confirmed(1, "A", 4)],
            vec![SeatingTable::new(1, 1, 4)],
        );
        let unit = SeatingUnit::new(&snap, vec![0]);
        let score = calc(&snap, SidePolicy::Ignore).score(
            &snap,
            &[unit.clone()],
            &empty_state(4),
            0,
            &unit,
            true,
        );
        assert_eq!(score, 2000);
    }

    #[test]
    fn split_half_zones_by_table_number() {
        let snap = Snapshot::new(
            vec![Guest::confirmed(1, "A", 2).with_side(GuestSide::Groom)],
            vec![
                SeatingTable::new(1, 2, 4), // second by number: groom zone
                SeatingTable::new(2, 1, 4), // first by number: bride zone
            ],
        );
        let unit = SeatingUnit::new(&snap, vec![0]);
        let calc = calc(&snap, SidePolicy::SplitHalf);

        let groom_zone = calc.score(&snap, &[unit.clone()], &empty_state(4), 0, &unit, false);
        let bride_zone = calc.score(&snap, &[unit.clone()], &empty_state(4), 1, &unit, false);
        assert_eq!(bride_zone - groom_zone, 100); // mismatch nudge only
    }

    #[test]
    fn both_side_units_never_pay_mismatch() {
        let snap = Snapshot::new(
            vec![Guest::confirmed(1, "A", 4).with_side(GuestSide::Both)],
            vec![SeatingTable::new(1, 1, 4), SeatingTable::new(2, 2, 4)],
        );
        let unit = SeatingUnit::new(&snap, vec![0]);
        let calc = calc(&snap, SidePolicy::SplitHalf);
        let a = calc.score(&snap, &[unit.clone()], &empty_state(4), 0, &unit, false);
        let b = calc.score(&snap, &[unit.clone()], &empty_state(4), 1, &unit, false);
        assert_eq!(a, b);
    }

    #[test]
    fn proportional_policy_gives_whole_floor_to_only_side() {
        let snap = Snapshot::new(
            vec![Guest::confirmed(1, "A", 2).with_side(GuestSide::Bride)],
            vec![SeatingTable::new(1, 1, 4)],
        );
        // Single table, single bride guest: the whole floor is bride zone.
        let calc = calc(&snap, SidePolicy::Proportional);
        let unit = SeatingUnit::new(&snap, vec![0]);
        let score = calc.score(&snap, &[unit.clone()], &empty_state(4), 0, &unit, false);
        // 2 free seats left: 2^3 * 10, no mismatch.
        assert_eq!(score, 80);
    }
}
