// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Shared builders for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use tableplan::model::{Guest, GuestId, SeatingTable, TableId};
use tableplan::snapshot::InMemoryEvent;
use tableplan::{AssignmentEngine, AssignmentReport, EventId};

pub fn guest(id: u64, name: &str, seats: u32) -> Guest {
    Guest::confirmed(id, name, seats)
}

pub fn table(id: u64, number: u32, seats: u32) -> SeatingTable {
    SeatingTable::new(id, number, seats)
}

/// Run one assignment over an in-memory event, returning the report and the
/// engine (whose sink holds the persisted plan).
pub fn run(
    guests: Vec<Guest>,
    tables: Vec<SeatingTable>,
) -> (
    AssignmentReport,
    AssignmentEngine<InMemoryEvent, InMemoryEvent>,
) {
    let event = InMemoryEvent::new(guests, tables);
    let mut engine = AssignmentEngine::new(event.clone(), event);
    let report = engine.assign_all(EventId(1)).expect("assignment run");
    (report, engine)
}

/// Table id per guest id from a report.
pub fn placement_map(report: &AssignmentReport) -> BTreeMap<GuestId, TableId> {
    report
        .placements
        .iter()
        .map(|p| (p.guest, p.table))
        .collect()
}

/// Seats used per table, computed from the report and the guest list.
pub fn seats_per_table(report: &AssignmentReport, guests: &[Guest]) -> BTreeMap<TableId, u32> {
    let mut used = BTreeMap::new();
    for p in &report.placements {
        let guest = guests
            .iter()
            .find(|g| g.id == p.guest)
            .expect("placement references a known guest");
        *used.entry(p.table).or_insert(0) += guest.seats;
    }
    used
}
