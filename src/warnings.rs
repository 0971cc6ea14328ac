// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Warnings accumulated during an assignment run.
//!
//! Everything short of a configuration-fatal error degrades into one of
//! these; the caller surfaces them to an end user instead of failing the
//! request.

use std::fmt;

/// A human-readable diagnostic produced by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// More guests require accessibility than there are accessible tables.
    NotEnoughAccessibleTables { needed: usize, available: usize },

    /// More guests want near-stage seats than there are near-stage tables.
    NotEnoughNearStageTables { needed: usize, available: usize },

    /// One side outnumbers the other by more than half the table count.
    SideImbalance { bride: usize, groom: usize },

    /// A unit contained guests that avoid each other and was dissolved into
    /// singleton units before the search.
    UnitSplitOnConflict { names: String },

    /// A unit remained outside the best assignment after exhaustive search.
    UnitUnassigned { names: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NotEnoughAccessibleTables { needed, available } => {
                write!(
                    f,
                    "not enough accessible tables: needed {}, available {}",
                    needed, available
                )
            }
            Warning::NotEnoughNearStageTables { needed, available } => {
                write!(
                    f,
                    "not enough near-stage tables: needed {}, available {}",
                    needed, available
                )
            }
            Warning::SideImbalance { bride, groom } => {
                write!(
                    f,
                    "potential side imbalance: {} bride guests vs {} groom guests",
                    bride, groom
                )
            }
            Warning::UnitSplitOnConflict { names } => {
                write!(f, "group split due to internal conflicts: {}", names)
            }
            Warning::UnitUnassigned { names } => {
                write!(f, "could not assign group: {}", names)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lines_are_human_readable() {
        let w = Warning::NotEnoughAccessibleTables {
            needed: 3,
            available: 1,
        };
        assert_eq!(
            w.to_string(),
            "not enough accessible tables: needed 3, available 1"
        );

        let w = Warning::UnitUnassigned {
            names: "A, B".into(),
        };
        assert_eq!(w.to_string(), "could not assign group: A, B");
    }
}
