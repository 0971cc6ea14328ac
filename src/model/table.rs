// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Seating tables as supplied by the data provider.

use serde::{Deserialize, Serialize};

/// Stable identifier for a seating table, assigned by the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub u64);

/// A physical table. Immutable during an assignment run; per-run seat
/// bookkeeping lives in the search's table state, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatingTable {
    pub id: TableId,
    pub table_number: u32,
    pub max_seats: u32,
    /// Wheelchair accessible.
    #[serde(default)]
    pub accessibility: bool,
    /// Positioned near the stage.
    #[serde(default)]
    pub near_stage: bool,
}

impl SeatingTable {
    pub fn new(id: u64, table_number: u32, max_seats: u32) -> Self {
        Self {
            id: TableId(id),
            table_number,
            max_seats,
            accessibility: false,
            near_stage: false,
        }
    }

    pub fn accessible(mut self) -> Self {
        self.accessibility = true;
        self
    }

    pub fn by_stage(mut self) -> Self {
        self.near_stage = true;
        self
    }
}
