//! Relative-offset API for directional distribution routines.

use std::collections::HashMap;

use crate::cell::WaterCell;
use crate::config::SimConfig;
use crate::coords::GridPos;

/// View over the sparse cell store anchored at the cell being distributed.
/// Missing cells read as `None` and never receive water.
#[derive(Debug)]
pub struct FlowApi<'a> {
    pub cells: &'a mut HashMap<GridPos, WaterCell>,
    pub origin: GridPos,
    pub config: &'a SimConfig,
}

impl<'a> FlowApi<'a> {
    pub fn new(
        cells: &'a mut HashMap<GridPos, WaterCell>,
        origin: GridPos,
        config: &'a SimConfig,
    ) -> Self {
        Self {
            cells,
            origin,
            config,
        }
    }

    #[must_use]
    pub fn get(&self, offset: GridPos) -> Option<&WaterCell> {
        self.cells.get(&(self.origin + offset))
    }

    #[must_use]
    pub fn source(&self) -> Option<&WaterCell> {
        self.get(GridPos::ZERO)
    }

    /// Present and not a wall.
    #[must_use]
    pub fn can_hold_water(&self, offset: GridPos) -> bool {
        self.get(offset).is_some_and(WaterCell::can_hold_water)
    }

    /// Whether water may move from the anchor to `offset`. Diagonal moves
    /// need both corner-adjacent cardinals open, so water cannot squeeze
    /// between two touching wall corners.
    #[must_use]
    pub fn can_reach(&self, offset: GridPos) -> bool {
        if !offset.is_diagonal_step() {
            return true;
        }
        self.can_hold_water(GridPos::new(offset.x, 0))
            && self.can_hold_water(GridPos::new(0, offset.y))
    }

    /// Moves `amount` from the anchor into the cell at `offset`, clamping both
    /// sides at zero. No-op when the target is missing.
    pub fn transfer(&mut self, offset: GridPos, amount: f32) {
        let target = self.origin + offset;
        if target == self.origin || !self.cells.contains_key(&target) {
            return;
        }
        if let Some(src) = self.cells.get_mut(&self.origin) {
            src.set_value(src.value() - amount);
        }
        if let Some(dest) = self.cells.get_mut(&target) {
            dest.set_value(dest.value() + amount);
        }
    }
}
