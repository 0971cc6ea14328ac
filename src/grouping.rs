// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Grouping stage: partition guests into seating units.
//!
//! Guests are partitioned by relation, split by accessibility requirement
//! where a partition mixes both kinds, and greedily packed into units no
//! larger than the biggest table. Units with an internal avoidance conflict
//! are dissolved into singletons, with a warning naming the unit.

use std::collections::BTreeMap;

use crate::error::PlanError;
use crate::model::{GuestRelation, SeatingTable, SeatingUnit, Snapshot};
use crate::warnings::Warning;

/// Capacity assumed when the event has no tables at all, so grouping still
/// produces units the validation stage can complain about.
pub const FALLBACK_TABLE_CAPACITY: u32 = 4;

/// Largest table capacity, i.e. the hard ceiling on unit size.
pub fn max_table_capacity(tables: &[SeatingTable]) -> u32 {
    tables
        .iter()
        .map(|t| t.max_seats)
        .max()
        .unwrap_or(FALLBACK_TABLE_CAPACITY)
}

/// Build the ordered list of seating units for this run.
///
/// Every returned unit fits the largest table and is free of internal
/// avoidance conflicts. Fails only on the configuration-fatal case of a
/// single guest exceeding every table's capacity.
pub fn build_units(snap: &Snapshot) -> Result<(Vec<SeatingUnit>, Vec<Warning>), PlanError> {
    let cap = max_table_capacity(&snap.tables);

    // Relation partitions, in stable guest order within each partition.
    // Guests without a relation form their own partition; they still need
    // seats even if nobody categorized them.
    let mut partitions: BTreeMap<Option<GuestRelation>, Vec<usize>> = BTreeMap::new();
    for i in 0..snap.guests.len() {
        partitions.entry(snap.guests[i].relation).or_default().push(i);
    }

    let mut units = Vec::new();
    for members in partitions.values() {
        let needs: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| snap.guests[i].accessibility)
            .collect();
        let plain: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| !snap.guests[i].accessibility)
            .collect();

        // A mixed partition would force non-accessibility guests onto the
        // scarce accessible tables; pack the two kinds separately.
        if !needs.is_empty() && !plain.is_empty() {
            units.extend(pack(snap, &needs, cap)?);
            units.extend(pack(snap, &plain, cap)?);
        } else {
            units.extend(pack(snap, members, cap)?);
        }
    }

    // Dissolve units that avoid themselves: no table choice can fix those.
    let mut warnings = Vec::new();
    let mut out = Vec::with_capacity(units.len());
    for unit in units {
        if unit.members.len() > 1 && unit.has_internal_conflict(snap) {
            warnings.push(Warning::UnitSplitOnConflict {
                names: unit.names(snap),
            });
            for m in unit.members {
                out.push(SeatingUnit::new(snap, vec![m]));
            }
        } else {
            out.push(unit);
        }
    }

    Ok((out, warnings))
}

/// Greedily pack guests into units of at most `cap` seats, preserving order.
fn pack(snap: &Snapshot, members: &[usize], cap: u32) -> Result<Vec<SeatingUnit>, PlanError> {
    let mut units = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut seats = 0u32;

    for &m in members {
        let need = snap.guests[m].seats;
        if need > cap {
            return Err(PlanError::GuestExceedsCapacity {
                name: snap.guests[m].name.clone(),
                seats: need,
                max: cap,
            });
        }
        if seats + need > cap && !current.is_empty() {
            units.push(SeatingUnit::new(snap, std::mem::take(&mut current)));
            seats = 0;
        }
        current.push(m);
        seats += need;
    }
    if !current.is_empty() {
        units.push(SeatingUnit::new(snap, current));
    }
    Ok(units)
}
