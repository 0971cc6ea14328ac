// Copyright (C) 2025 The tableplan authors. See LICENSE for details.

//! Per-table seat bookkeeping during the search.

/// Ephemeral accumulator for one table: which units currently sit at it and
/// how many seats they use. Invariant: `used_seats` equals the seat sum of
/// `units` and never exceeds `capacity`.
#[derive(Debug, Clone)]
pub struct TableState {
    pub capacity: u32,
    pub used_seats: u32,
    /// Unit indices currently assigned, in commit order.
    pub units: Vec<usize>,
}

impl TableState {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            used_seats: 0,
            units: Vec::new(),
        }
    }

    pub fn free_seats(&self) -> u32 {
        self.capacity - self.used_seats
    }

    /// At least one unit sits here.
    pub fn is_open(&self) -> bool {
        !self.units.is_empty()
    }

    pub fn seat(&mut self, unit: usize, seats: u32) {
        debug_assert!(seats <= self.free_seats(), "seating past capacity");
        self.units.push(unit);
        self.used_seats += seats;
    }

    pub fn unseat(&mut self, unit: usize, seats: u32) {
        let pos = self
            .units
            .iter()
            .rposition(|&v| v == unit)
            .expect("unseating a unit that is not here");
        self.units.remove(pos);
        self.used_seats -= seats;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_and_unseat_restore_state() {
        let mut ts = TableState::new(8);
        ts.seat(3, 4);
        ts.seat(5, 2);
        assert_eq!(ts.free_seats(), 2);
        assert!(ts.is_open());

        ts.unseat(3, 4);
        assert_eq!(ts.free_seats(), 6);
        assert_eq!(ts.units, vec![5]);

        ts.unseat(5, 2);
        assert!(!ts.is_open());
        assert_eq!(ts.free_seats(), 8);
    }
}
