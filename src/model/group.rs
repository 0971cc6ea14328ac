// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Seating units: the indivisible blocks the search places.
//!
//! A unit is an ephemeral aggregate of guest indices that must share a
//! table. Units are rebuilt from scratch on every run and never persisted.

use crate::model::{GuestRelation, GuestSide, Snapshot};

/// A group of guests seated together, with its derived requirements.
#[derive(Debug, Clone)]
pub struct SeatingUnit {
    /// Guest indices into the snapshot arena, in stable input order.
    pub members: Vec<usize>,
    /// Sum of the members' seat counts.
    pub total_seats: u32,
    /// Relation label, taken from the first member.
    pub relation: Option<GuestRelation>,
    /// Side label, taken from the first member declaring one.
    pub side: Option<GuestSide>,
    /// Any member requires an accessible table (hard constraint).
    pub requires_accessibility: bool,
    /// Any member prefers a near-stage table (soft preference).
    pub wants_near_stage: bool,
}

impl SeatingUnit {
    pub fn new(snap: &Snapshot, members: Vec<usize>) -> Self {
        let total_seats = members.iter().map(|&m| snap.guests[m].seats).sum();
        let relation = members.first().and_then(|&m| snap.guests[m].relation);
        let side = members.iter().find_map(|&m| snap.guests[m].side);
        let requires_accessibility = members.iter().any(|&m| snap.guests[m].accessibility);
        let wants_near_stage = members.iter().any(|&m| snap.guests[m].near_stage);
        Self {
            members,
            total_seats,
            relation,
            side,
            requires_accessibility,
            wants_near_stage,
        }
    }

    /// Comma-joined member names, used in warnings and logs.
    pub fn names(&self, snap: &Snapshot) -> String {
        self.members
            .iter()
            .map(|&m| snap.guests[m].name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Two members of this unit avoid each other. Such a unit can never be
    /// seated as one block and must be dissolved into singletons.
    pub fn has_internal_conflict(&self, snap: &Snapshot) -> bool {
        for (i, &a) in self.members.iter().enumerate() {
            for &b in &self.members[i + 1..] {
                if snap.avoids(a, b) {
                    return true;
                }
            }
        }
        false
    }

    /// A member of one unit avoids a member of the other, in either
    /// direction. Units in conflict may never share a table.
    pub fn conflicts_with(&self, other: &SeatingUnit, snap: &Snapshot) -> bool {
        self.members
            .iter()
            .any(|&a| other.members.iter().any(|&b| snap.avoids(a, b)))
    }
}
