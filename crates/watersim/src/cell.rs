//! Water cell state for the simulation grid.

use std::fmt;

use crate::coords::GridPos;

/// Default capacity of a cell before it starts compressing.
pub const MAX_WATER_PER_CELL: f32 = 1.0;

/// Amounts at or below this are treated as dry.
pub const MIN_WATER_PER_CELL: f32 = 0.001;

/// One grid position: current amount, capacity and wall flag.
/// `value` and `max_value` never go below zero.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WaterCell {
    cell_pos: GridPos,
    value: f32,
    max_value: f32,
    pub is_wall: bool,
}

impl fmt::Display for WaterCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wall {
            write!(f, "{} wall", self.cell_pos)
        } else {
            write!(f, "{} {:.3}/{:.3}", self.cell_pos, self.value, self.max_value)
        }
    }
}

impl WaterCell {
    #[must_use]
    pub fn new(cell_pos: GridPos) -> Self {
        Self::with_capacity(cell_pos, MAX_WATER_PER_CELL)
    }

    #[must_use]
    pub fn with_capacity(cell_pos: GridPos, max_value: f32) -> Self {
        Self {
            cell_pos,
            value: 0.0,
            max_value: max_value.max(0.0),
            is_wall: false,
        }
    }

    #[must_use]
    pub fn cell_pos(&self) -> GridPos {
        self.cell_pos
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value.max(0.0);
    }

    #[must_use]
    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    pub fn set_max_value(&mut self, max_value: f32) {
        self.max_value = max_value.max(0.0);
    }

    /// Holds more than the dry threshold.
    #[must_use]
    pub fn has_water(&self) -> bool {
        self.value >= MIN_WATER_PER_CELL
    }

    #[must_use]
    pub fn is_overfull(&self) -> bool {
        self.value > self.max_value
    }

    #[must_use]
    pub fn can_hold_water(&self) -> bool {
        !self.is_wall
    }

    /// Moves `amount` from this cell into `dest`. Both sides clamp at zero,
    /// so a transfer larger than this cell's value creates water in `dest`.
    pub fn transfer_to(&mut self, dest: &mut WaterCell, amount: f32) {
        self.set_value(self.value - amount);
        dest.set_value(dest.value + amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_cell_is_empty_with_default_capacity() {
        let cell = WaterCell::new(GridPos::new(4, -1));
        assert_eq!(cell.cell_pos(), GridPos::new(4, -1));
        assert_eq!(cell.value(), 0.0);
        assert_eq!(cell.max_value(), MAX_WATER_PER_CELL);
        assert!(!cell.is_wall);
        assert!(!cell.has_water());
    }

    #[test]
    fn negative_assignments_clamp_to_zero() {
        let mut cell = WaterCell::with_capacity(GridPos::ZERO, -3.0);
        assert_eq!(cell.max_value(), 0.0);
        cell.set_value(-1.0);
        assert_eq!(cell.value(), 0.0);
        cell.set_max_value(-0.5);
        assert_eq!(cell.max_value(), 0.0);
    }

    #[test]
    fn overdrawn_transfer_clamps_source() {
        let mut a = WaterCell::new(GridPos::ZERO);
        let mut b = WaterCell::new(GridPos::RIGHT);
        a.set_value(0.25);
        a.transfer_to(&mut b, 1.0);
        assert_eq!(a.value(), 0.0);
        assert_eq!(b.value(), 1.0);
    }

    #[test]
    fn negative_transfer_reverses_direction() {
        let mut a = WaterCell::new(GridPos::ZERO);
        let mut b = WaterCell::new(GridPos::RIGHT);
        a.set_value(1.0);
        b.set_value(1.0);
        a.transfer_to(&mut b, -0.5);
        assert_eq!(a.value(), 1.5);
        assert_eq!(b.value(), 0.5);
    }

    #[test]
    fn display_shows_level_or_wall() {
        let mut cell = WaterCell::new(GridPos::new(1, 2));
        cell.set_value(0.5);
        assert_eq!(format!("{cell}"), "(1, 2) 0.500/1.000");
        cell.is_wall = true;
        assert_eq!(format!("{cell}"), "(1, 2) wall");
    }

    proptest! {
        #[test]
        fn prop_transfer_conserves_sum(
            src in 0.0f32..100.0,
            dst in 0.0f32..100.0,
            fraction in 0.0f32..=1.0,
        ) {
            let mut a = WaterCell::new(GridPos::ZERO);
            let mut b = WaterCell::new(GridPos::UP);
            a.set_value(src);
            b.set_value(dst);
            let amount = src * fraction;
            a.transfer_to(&mut b, amount);
            prop_assert!(a.value() >= 0.0 && b.value() >= 0.0);
            prop_assert!(((a.value() + b.value()) - (src + dst)).abs() <= 1e-3);
        }

        #[test]
        fn prop_values_never_negative(values in proptest::collection::vec(-10.0f32..10.0, 1..20)) {
            let mut cell = WaterCell::new(GridPos::ZERO);
            for v in values {
                cell.set_value(cell.value() + v);
                cell.set_max_value(v);
                prop_assert!(cell.value() >= 0.0);
                prop_assert!(cell.max_value() >= 0.0);
            }
        }
    }
}
