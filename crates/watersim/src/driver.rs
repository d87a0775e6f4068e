//! Host-facing behaviour: owns a structure and its water, and advances the
//! simulation at a fixed rate independent of the render frame rate.

use glam::Vec2;
use log::{debug, info, warn};

use crate::cell::WaterCell;
use crate::config::DriverConfig;
use crate::coords::{Bounds, GridPos};
use crate::rooms::{FloodFillRoomDetector, Room, RoomDetector};
use crate::simulation::WaterSimulation;
use crate::structure::{Structure, StructureTile, StructureView};

/// Intervals the stepper will catch up on in one frame before dropping the
/// rest of its backlog.
const MAX_CATCH_UP_INTERVALS: u32 = 8;

/// Upper bound on configured steps per interval.
pub const MAX_STEPS_PER_TICK: u32 = 64;

/// Accumulates frame time and reports how many fixed intervals have elapsed.
#[derive(Clone, Copy, Debug)]
pub struct FixedStepper {
    interval: f32,
    accumulated: f32,
}

impl FixedStepper {
    #[must_use]
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            accumulated: 0.0,
        }
    }

    #[must_use]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Adds `dt` seconds and returns the number of whole intervals now due.
    /// A backlog beyond [`MAX_CATCH_UP_INTERVALS`] is discarded.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulated += dt.max(0.0);
        let due = (self.accumulated / self.interval).floor() as u32;
        if due > MAX_CATCH_UP_INTERVALS {
            warn!("water stepper {due} intervals behind, dropping backlog");
            self.accumulated = 0.0;
            return MAX_CATCH_UP_INTERVALS;
        }
        self.accumulated = self.accumulated.rem_euclid(self.interval);
        due
    }
}

#[derive(Debug)]
pub struct WaterWorld {
    structure: Structure,
    sim: WaterSimulation,
    stepper: FixedStepper,
    config: DriverConfig,
    rooms: Vec<Room>,
}

impl Default for WaterWorld {
    fn default() -> Self {
        Self::new(Structure::default(), DriverConfig::default())
    }
}

impl WaterWorld {
    /// `config.steps_per_tick` is capped at [`MAX_STEPS_PER_TICK`].
    #[must_use]
    pub fn new(structure: Structure, mut config: DriverConfig) -> Self {
        if config.steps_per_tick > MAX_STEPS_PER_TICK {
            warn!(
                "steps_per_tick {} capped at {MAX_STEPS_PER_TICK}",
                config.steps_per_tick
            );
            config.steps_per_tick = MAX_STEPS_PER_TICK;
        }
        let sim = WaterSimulation::with_config(&structure, config.sim);
        let rooms = FloodFillRoomDetector.find_rooms(&structure);
        Self {
            structure,
            sim,
            stepper: FixedStepper::new(config.step_interval()),
            config,
            rooms,
        }
    }

    #[must_use]
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    #[must_use]
    pub fn simulation(&self) -> &WaterSimulation {
        &self.sim
    }

    #[must_use]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Advances by `dt` seconds of frame time. Returns how many simulation
    /// steps ran.
    pub fn tick(&mut self, dt: f32) -> u32 {
        let intervals = self.stepper.advance(dt);
        let steps = intervals.saturating_mul(self.config.steps_per_tick);
        if steps > 0 {
            self.sim.step(&self.structure, steps);
        }
        steps
    }

    /// Pours for `dt` seconds at the configured rate into the cell under
    /// `world_pos`.
    pub fn pour(&mut self, world_pos: Vec2, dt: f32) {
        let amount = self.config.injection_rate * dt;
        self.sim
            .modify_water_at_world_pos(&self.structure, world_pos, amount);
    }

    /// Pumps water out of the cell under `world_pos`.
    pub fn drain(&mut self, world_pos: Vec2, dt: f32) {
        let amount = self.config.injection_rate * dt;
        self.sim
            .modify_water_at_world_pos(&self.structure, world_pos, -amount);
    }

    pub fn place_tile_at_world(&mut self, world_pos: Vec2) -> bool {
        let placed = self.structure.try_place_tile_at_world(world_pos);
        if placed {
            info!("tile placed at {}", self.structure.world_to_tile(world_pos));
            self.after_structure_edit();
        }
        placed
    }

    pub fn place_tile(&mut self, tile_pos: GridPos, tile: StructureTile) -> bool {
        let placed = self.structure.place_tile(tile_pos, tile);
        if placed {
            self.after_structure_edit();
        }
        placed
    }

    pub fn remove_tile_at_world(&mut self, world_pos: Vec2) -> bool {
        let removed = self.structure.try_remove_tile_at_world(world_pos);
        if removed {
            info!("tile removed at {}", self.structure.world_to_tile(world_pos));
            self.after_structure_edit();
        }
        removed
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.structure.set_rotation(rotation);
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.structure.set_position(position);
    }

    fn after_structure_edit(&mut self) {
        self.sim.rebuild_from_structure_bounds(&self.structure);
        self.rooms = FloodFillRoomDetector.find_rooms(&self.structure);
        debug!(
            "structure edited: {} tiles, {} rooms",
            self.structure.tile_count(),
            self.rooms.len()
        );
    }

    /// Cell values row by row from the bottom of the bounds, for rendering.
    #[must_use]
    pub fn values(&self) -> Vec<f32> {
        self.row_major(|cell| cell.map_or(0.0, WaterCell::value))
    }

    /// 1 where a cell is a wall, 0 elsewhere, in the same layout as `values`.
    #[must_use]
    pub fn walls(&self) -> Vec<u8> {
        self.row_major(|cell| u8::from(cell.is_some_and(|c| c.is_wall)))
    }

    fn row_major<T>(&self, f: impl Fn(Option<&WaterCell>) -> T) -> Vec<T> {
        let bounds: Bounds = self.sim.bounds();
        bounds.positions().map(|pos| f(self.sim.cell_at(pos))).collect()
    }
}
