//! Sparse water grid attached to a tile structure.
//!
//! The grid covers the structure's bounds with one [`WaterCell`] per
//! position. It never watches the structure: after any tile edit the owner
//! calls [`WaterSimulation::rebuild_from_structure_bounds`] (or
//! [`WaterSimulation::refresh_walls_from_structure`] when only wall flags
//! changed). The structure is passed in to every call that needs it.

use std::collections::HashMap;

use glam::Vec2;
use log::{debug, trace};

use crate::api::FlowApi;
use crate::cell::WaterCell;
use crate::config::SimConfig;
use crate::coords::{Bounds, GridPos};
use crate::direction::FlowDirection;
use crate::distribute;
use crate::structure::StructureView;

#[derive(Clone, Debug)]
pub struct WaterSimulation {
    bounds: Bounds,
    cells: HashMap<GridPos, WaterCell>,
    config: SimConfig,
}

impl WaterSimulation {
    #[must_use]
    pub fn new<S: StructureView>(structure: &S) -> Self {
        Self::with_config(structure, SimConfig::default())
    }

    #[must_use]
    pub fn with_config<S: StructureView>(structure: &S, config: SimConfig) -> Self {
        let mut sim = Self {
            bounds: structure.bounds(),
            cells: HashMap::new(),
            config,
        };
        sim.rebuild_from_structure_bounds(structure);
        sim
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn size(&self) -> GridPos {
        self.bounds.int_size()
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cells(&self) -> impl Iterator<Item = &WaterCell> {
        self.cells.values()
    }

    #[must_use]
    pub fn cell_at(&self, cell_pos: GridPos) -> Option<&WaterCell> {
        self.cells.get(&cell_pos)
    }

    pub fn cell_at_mut(&mut self, cell_pos: GridPos) -> Option<&mut WaterCell> {
        self.cells.get_mut(&cell_pos)
    }

    /// Sum of every cell's value.
    #[must_use]
    pub fn total_water(&self) -> f32 {
        self.cells.values().map(WaterCell::value).sum()
    }

    /// Resyncs the grid with the structure's current bounds. Cells that fall
    /// outside are dropped along with their water; new positions start dry.
    pub fn rebuild_from_structure_bounds<S: StructureView>(&mut self, structure: &S) {
        self.bounds = structure.bounds();
        let bounds = self.bounds;

        let before = self.cells.len();
        self.cells.retain(|pos, _| bounds.contains(*pos));
        let dropped = before - self.cells.len();

        let capacity = self.config.max_water_per_cell;
        for pos in bounds.positions() {
            self.cells
                .entry(pos)
                .or_insert_with(|| WaterCell::with_capacity(pos, capacity));
        }

        self.refresh_walls_from_structure(structure);
        debug!(
            "water grid rebuilt: {} cells over {}..{} ({} dropped)",
            self.cells.len(),
            bounds.min(),
            bounds.max(),
            dropped
        );
    }

    /// Re-reads the water-wall flag of every cell. Positions without a tile
    /// are open.
    pub fn refresh_walls_from_structure<S: StructureView>(&mut self, structure: &S) {
        for (pos, cell) in &mut self.cells {
            cell.is_wall = structure.water_wall_at(*pos).unwrap_or(false);
        }
    }

    /// Adds `delta` to the open cell under `world_pos`. Walls and positions
    /// outside the grid are left alone.
    pub fn modify_water_at_world_pos<S: StructureView>(
        &mut self,
        structure: &S,
        world_pos: Vec2,
        delta: f32,
    ) {
        let cell_pos = structure.world_to_tile(world_pos);
        if let Some(cell) = self.cells.get_mut(&cell_pos) {
            if !cell.is_wall {
                cell.set_value(cell.value() + delta);
            }
        }
    }

    /// Grid cell under `world_pos`, if it lies inside the current bounds.
    #[must_use]
    pub fn world_to_cell<S: StructureView>(
        &self,
        structure: &S,
        world_pos: Vec2,
    ) -> Option<GridPos> {
        let cell_pos = structure.world_to_tile(world_pos);
        self.bounds.contains(cell_pos).then_some(cell_pos)
    }

    /// World-space origin corner of an existing cell.
    #[must_use]
    pub fn cell_to_world<S: StructureView>(
        &self,
        structure: &S,
        cell_pos: GridPos,
    ) -> Option<Vec2> {
        self.cells
            .contains_key(&cell_pos)
            .then(|| structure.tile_to_world(cell_pos))
    }

    /// Advance the whole grid `times` steps.
    pub fn step<S: StructureView>(&mut self, structure: &S, times: u32) {
        for _ in 0..times {
            self.step_once(structure);
        }
    }

    /// One step: every wet cell, bottom to top in world space, pours down,
    /// right, left and finally up if overfull. Each pass re-checks that the
    /// cell still has water since earlier passes may have drained it.
    fn step_once<S: StructureView>(&mut self, structure: &S) {
        let rotation = structure.rotation();
        let order = self.ordered_active_cells(structure);
        trace!("water step: {} active cells", order.len());

        for pos in order {
            for direction in FlowDirection::ORDER {
                if !self.validate_cell_value(pos) {
                    break;
                }
                let mut api = FlowApi::new(&mut self.cells, pos, &self.config);
                distribute::distribute(direction, &mut api, rotation);
            }
        }
    }

    /// Wet cells sorted by world Y then world X. Grid (y, x) breaks exact
    /// ties so the order never depends on hash iteration.
    fn ordered_active_cells<S: StructureView>(&self, structure: &S) -> Vec<GridPos> {
        let min = self.config.min_water_per_cell;
        let mut active: Vec<(Vec2, GridPos)> = self
            .cells
            .values()
            .filter(|cell| cell.value() > min)
            .map(|cell| (structure.tile_to_world(cell.cell_pos()), cell.cell_pos()))
            .collect();

        active.sort_by(|(a_world, a_pos), (b_world, b_pos)| {
            a_world
                .y
                .total_cmp(&b_world.y)
                .then_with(|| a_world.x.total_cmp(&b_world.x))
                .then_with(|| a_pos.y.cmp(&b_pos.y))
                .then_with(|| a_pos.x.cmp(&b_pos.x))
        });

        active.into_iter().map(|(_, pos)| pos).collect()
    }

    /// True if the cell still holds enough water to distribute. A cell that
    /// dropped below the threshold has its residue cleared.
    fn validate_cell_value(&mut self, pos: GridPos) -> bool {
        let min = self.config.min_water_per_cell;
        let Some(cell) = self.cells.get_mut(&pos) else {
            return false;
        };
        if cell.value() >= min {
            return true;
        }
        cell.set_value(0.0);
        false
    }
}
