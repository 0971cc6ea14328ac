// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! End-to-end scenarios through the full engine: load, validate, group,
//! search, persist, warn.

mod common;

use common::{guest, placement_map, run, seats_per_table, table};
use tableplan::model::GuestRelation::*;
use tableplan::warnings::Warning;

#[test]
fn accessible_unit_never_lands_on_inaccessible_table() {
    // One inaccessible table, one unit that needs accessibility: the table
    // is filtered out of the domain, never merely penalized.
    let guests = vec![guest(1, "Rivka", 2).needs_accessibility()];
    let tables = vec![table(1, 1, 4)];

    let (report, _) = run(guests, tables);

    assert!(report.placements.is_empty());
    assert!(report.warnings.contains(&Warning::NotEnoughAccessibleTables {
        needed: 1,
        available: 0
    }));
    assert!(report
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::UnitUnassigned { .. })));
}

#[test]
fn mutual_avoidance_splits_the_unit_before_search() {
    let guests = vec![
        guest(1, "Avi", 2).with_relation(GroomFriends).avoids(2),
        guest(2, "Beni", 2).with_relation(GroomFriends).avoids(1),
    ];
    // Both fit one table by seats, so grouping packs them together first
    // and must then dissolve the unit.
    let tables = vec![table(1, 1, 4), table(2, 2, 4)];

    let (report, _) = run(guests, tables);

    assert!(report
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::UnitSplitOnConflict { .. })));

    // Both singles seated, at different tables.
    let map = placement_map(&report);
    assert_eq!(map.len(), 2);
    let mut tables_used: Vec<_> = map.values().collect();
    tables_used.dedup();
    assert_eq!(tables_used.len(), 2);
}

#[test]
fn three_full_units_open_exactly_three_tables() {
    let guests = vec![
        guest(1, "A", 4).with_relation(GroomFamily),
        guest(2, "B", 4).with_relation(BrideFamily),
        guest(3, "C", 4).with_relation(GroomWork),
    ];
    let tables = vec![table(1, 1, 4), table(2, 2, 4), table(3, 3, 4)];

    let (report, _) = run(guests.clone(), tables);

    assert_eq!(report.assigned_units, 3);
    assert_eq!(report.open_tables, 3);
    let used = seats_per_table(&report, &guests);
    assert_eq!(used.len(), 3);
    assert!(used.values().all(|&s| s == 4));
}

#[test]
fn capacity_shortfall_leaves_units_in_warnings() {
    // 6 seats wanted, 4 available: someone stays unseated but no table is
    // ever overfilled.
    let guests = vec![
        guest(1, "A", 2).with_relation(BrideFriends),
        guest(2, "B", 2).with_relation(BrideFriends),
        guest(3, "C", 2).with_relation(BrideFriends),
    ];
    let tables = vec![table(1, 1, 4)];

    let (report, _) = run(guests.clone(), tables);

    assert!(report
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::UnitUnassigned { .. })));
    for (_, seats) in seats_per_table(&report, &guests) {
        assert!(seats <= 4);
    }
    assert!(report.assigned_units < report.total_units);
}

#[test]
fn contended_single_table_seats_one_unit_and_warns_about_the_other() {
    // Two units whose only feasible table is the same one, with combined
    // seats over its capacity: one gets it, the other becomes a warning.
    let guests = vec![
        guest(1, "A", 3).with_relation(GroomArmy),
        guest(2, "B", 3).with_relation(BrideArmy),
    ];
    let tables = vec![table(1, 1, 4)];

    let (report, _) = run(guests.clone(), tables);

    assert_eq!(report.assigned_units, 1);
    let unassigned: Vec<_> = report
        .warnings
        .iter()
        .filter(|w| matches!(w, Warning::UnitUnassigned { .. }))
        .collect();
    assert_eq!(unassigned.len(), 1);

    let used = seats_per_table(&report, &guests);
    assert_eq!(used.values().copied().max(), Some(3)); // 3 <= 4, no overflow
}

#[test]
fn stage_preference_is_soft_but_warned() {
    let guests = vec![guest(1, "Maya", 2).wants_near_stage()];
    let tables = vec![table(1, 1, 4)];

    let (report, _) = run(guests, tables);

    assert!(report.warnings.contains(&Warning::NotEnoughNearStageTables {
        needed: 1,
        available: 0
    }));
    // Unlike accessibility, stage proximity never blocks the seating.
    assert_eq!(report.placements.len(), 1);
}

#[test]
fn same_relation_guests_cluster_on_one_table() {
    let guests = vec![
        guest(1, "A", 2).with_relation(GroomFamily),
        guest(2, "B", 2).with_relation(GroomFamily),
    ];
    let tables = vec![table(1, 1, 4), table(2, 2, 4)];

    let (report, _) = run(guests, tables);

    let map = placement_map(&report);
    assert_eq!(map.len(), 2);
    assert_eq!(
        map.values().collect::<std::collections::BTreeSet<_>>().len(),
        1,
        "one shared table expected"
    );
    assert_eq!(report.open_tables, 1);
}

#[test]
fn unconfirmed_guests_are_ignored() {
    use tableplan::model::GuestStatus;

    let guests = vec![
        guest(1, "A", 2),
        guest(2, "B", 2).with_status(GuestStatus::NotConfirmed),
        guest(3, "C", 2).with_status(GuestStatus::WaitingApproval),
    ];
    let tables = vec![table(1, 1, 4)];

    let (report, _) = run(guests, tables);

    let map = placement_map(&report);
    assert_eq!(map.len(), 1);
    assert!(map.contains_key(&tableplan::model::GuestId(1)));
}

#[test]
fn oversized_guest_aborts_the_run() {
    use tableplan::snapshot::InMemoryEvent;
    use tableplan::{AssignmentEngine, EventId, PlanError};

    let event = InMemoryEvent::new(vec![guest(1, "Clan", 12)], vec![table(1, 1, 6)]);
    let mut engine = AssignmentEngine::new(event.clone(), event);

    let err = engine.assign_all(EventId(1)).unwrap_err();
    assert!(matches!(err, PlanError::GuestExceedsCapacity { .. }));
}
