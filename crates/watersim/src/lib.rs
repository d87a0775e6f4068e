//! Rotation-aware cellular water simulation for tile structures.
//!
//! A [`Structure`] is a rigid grid of tiles with a world position and
//! rotation. [`WaterSimulation`] keeps one [`WaterCell`] per grid position in
//! the structure's padded bounds and moves water between them each step,
//! always downhill in world space however the structure is turned.
//! [`WaterWorld`] ties the two together behind a fixed-rate tick.

pub mod api;
pub mod cell;
pub mod config;
pub mod coords;
pub mod direction;
pub mod distribute;
pub mod driver;
pub mod rooms;
pub mod simulation;
pub mod structure;
pub mod wasm;


pub use cell::{WaterCell, MAX_WATER_PER_CELL, MIN_WATER_PER_CELL};
pub use config::{DriverConfig, SimConfig};
pub use coords::{Bounds, GridPos};
pub use direction::{targets_in_world_dir, FlowDirection, TransferTarget};
pub use driver::{FixedStepper, WaterWorld};
pub use rooms::{FloodFillRoomDetector, Room, RoomDetector};
pub use simulation::WaterSimulation;
pub use structure::{Structure, StructureTile, StructureView};
pub use wasm::{init_logging, WasmWaterWorld};
