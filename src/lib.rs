// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Constraint-based seating assignment for event guests.
//!
//! Given the confirmed guests of an event and its seating tables, the engine
//! produces an assignment of guests to tables that respects hard constraints
//! (table capacity, accessibility, mutual avoidance) while optimizing soft
//! preferences (relation clustering, stated seat-mate preferences, side
//! balance, stage proximity) and the number of tables opened.
//!
//! # Architecture
//!
//! One assignment run is a pipeline of stages, each operating on an in-memory
//! snapshot taken once at the start:
//!
//! 1. **Grouping** ([`grouping`]): confirmed guests are partitioned into
//!    indivisible seating units by relation and accessibility, greedily packed
//!    up to the largest table capacity, and split apart again when a unit
//!    contains an internal avoidance conflict.
//! 2. **Domains** ([`domain`]): each unit starts with the set of tables that
//!    could feasibly hold it; an AC-3 pass over a shared-resource
//!    compatibility relation prunes tables that can never take part in a
//!    consistent assignment.
//! 3. **Search** ([`search`]): depth-first backtracking with MRV unit
//!    selection, penalty-ordered (LCV) table candidates and forward checking
//!    after every tentative commit. Domain edits are undone through the
//!    [`trail`]; table bookkeeping is undone in place.
//! 4. **Scoring** ([`penalty`]): an integer penalty per (unit, table) pairing
//!    drives candidate ordering and the ranking of complete solutions.
//! 5. **Write-back** ([`engine`]): the best assignment found is handed to the
//!    result sink, and everything that could not be seated is reported as a
//!    warning rather than an error.
//!
//! The engine is single-threaded and deterministic given deterministic input
//! order. Loading and persistence happen through the [`engine::GuestSource`]
//! and [`engine::AssignmentSink`] collaborator traits; no I/O happens during
//! the search itself.
//!
//! # Example
//!
//! ```
//! use tableplan::{AssignmentEngine, EventId};
//! use tableplan::model::{Guest, SeatingTable};
//! use tableplan::snapshot::InMemoryEvent;
//!
//! let guests = vec![Guest::confirmed(1, "Noa Levi", 2)];
//! let tables = vec![SeatingTable::new(1, 1, 4)];
//!
//! let event = InMemoryEvent::new(guests, tables);
//! let mut engine = AssignmentEngine::new(event.clone(), event);
//!
//! let report = engine.assign_all(EventId(1)).unwrap();
//! assert_eq!(report.placements.len(), 1);
//! assert!(report.warnings.is_empty());
//! ```

pub mod domain;
pub mod engine;
pub mod error;
pub mod grouping;
pub mod model;
pub mod penalty;
pub mod search;
pub mod snapshot;
pub mod trail;
pub mod warnings;

// Re-export the types most callers need.
pub use engine::{AssignmentEngine, AssignmentReport, AssignmentSink, EventId, GuestSource, Placement};
pub use error::PlanError;
pub use penalty::{PenaltyWeights, SidePolicy};
pub use search::{SearchStats, Solver, SolverConfig};
pub use trail::Trail;
pub use warnings::Warning;
