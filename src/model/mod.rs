// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Data model for one assignment run.
//!
//! Persistent entities ([`Guest`], [`SeatingTable`]) mirror what the data
//! provider supplies. Everything else is ephemeral run state: the
//! [`Snapshot`] arena holds guests and tables by dense index with the
//! avoid/prefer relations resolved to index sets, and [`SeatingUnit`] is the
//! indivisible block of guests the search actually places.

pub mod group;
pub mod guest;
pub mod snapshot;
pub mod table;

pub use group::SeatingUnit;
pub use guest::{Guest, GuestId, GuestRelation, GuestSide, GuestStatus};
pub use snapshot::Snapshot;
pub use table::{SeatingTable, TableId};
