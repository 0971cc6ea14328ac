// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Guest records as supplied by the data provider.
//!
//! The avoid/prefer relations form a directed graph over guests. They are
//! kept as sets of [`GuestId`] and queried by membership test only; the
//! graph may contain cycles and is not required to be symmetric.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Stable identifier for a guest, assigned by the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(pub u64);

/// RSVP status. Only [`GuestStatus::Confirmed`] guests take part in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GuestStatus {
    Confirmed,
    WaitingApproval,
    NotInvited,
    NotConfirmed,
    ViewOnly,
}

/// Which side of the celebration a guest belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GuestSide {
    Groom,
    Bride,
    Both,
}

/// Relation category, per side.
///
/// Drives the grouping partition and the same-relation clustering bonus.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum GuestRelation {
    GroomFamily,
    BrideFamily,
    GroomFriends,
    BrideFriends,
    GroomWork,
    BrideWork,
    GroomStudy,
    BrideStudy,
    GroomArmy,
    BrideArmy,
    BrideMotherFamily,
    BrideFatherFamily,
    GroomMotherFamily,
    GroomFatherFamily,
    GroomParentsInvitees,
    BrideParentsInvitees,
}

/// A guest with its seat count, grouping attributes and seating relations.
///
/// The avoid/prefer sets are fully resolved by the provider; the engine never
/// lazy-loads anything at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    /// Seats this guest occupies (party size), at least 1.
    pub seats: u32,
    #[serde(default)]
    pub relation: Option<GuestRelation>,
    #[serde(default)]
    pub side: Option<GuestSide>,
    /// Requires a wheelchair-accessible table (hard constraint).
    #[serde(default)]
    pub accessibility: bool,
    /// Prefers a table near the stage (soft preference).
    #[serde(default)]
    pub near_stage: bool,
    pub status: GuestStatus,
    /// Guests this guest must not share a table with (directed).
    #[serde(default)]
    pub avoid: BTreeSet<GuestId>,
    /// Guests this guest would like to sit with (directed).
    #[serde(default)]
    pub prefer: BTreeSet<GuestId>,
}

impl Guest {
    /// A confirmed guest with no relations set; the usual test/demo starting
    /// point, refined through the `with_*` builders below.
    pub fn confirmed(id: u64, name: &str, seats: u32) -> Self {
        Self {
            id: GuestId(id),
            name: name.to_owned(),
            seats,
            relation: None,
            side: None,
            accessibility: false,
            near_stage: false,
            status: GuestStatus::Confirmed,
            avoid: BTreeSet::new(),
            prefer: BTreeSet::new(),
        }
    }

    pub fn with_status(mut self, status: GuestStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_relation(mut self, relation: GuestRelation) -> Self {
        self.relation = Some(relation);
        self
    }

    pub fn with_side(mut self, side: GuestSide) -> Self {
        self.side = Some(side);
        self
    }

    pub fn needs_accessibility(mut self) -> Self {
        self.accessibility = true;
        self
    }

    pub fn wants_near_stage(mut self) -> Self {
        self.near_stage = true;
        self
    }

    pub fn avoids(mut self, other: u64) -> Self {
        self.avoid.insert(GuestId(other));
        self
    }

    pub fn prefers(mut self, other: u64) -> Self {
        self.prefer.insert(GuestId(other));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_displays_wire_name() {
        assert_eq!(GuestRelation::GroomFamily.to_string(), "GROOM_FAMILY");
        assert_eq!(
            GuestRelation::BrideParentsInvitees.to_string(),
            "BRIDE_PARENTS_INVITEES"
        );
    }

    #[test]
    fn status_round_trips_through_json() {
        let json = serde_json::to_string(&GuestStatus::WaitingApproval).unwrap();
        assert_eq!(json, "\"WAITING_APPROVAL\"");
        let back: GuestStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GuestStatus::WaitingApproval);
    }

    #[test]
    fn builder_sets_relations() {
        let g = Guest::confirmed(7, "Dana", 2).avoids(3).prefers(4);
        assert!(g.avoid.contains(&GuestId(3)));
        assert!(g.prefer.contains(&GuestId(4)));
        assert_eq!(g.status, GuestStatus::Confirmed);
    }
}
