//! Tunable simulation and driver parameters.
//!
//! Defaults live as constants next to the code that uses them; these structs
//! let a host override them at runtime, e.g. from a JSON blob. Missing fields
//! keep their defaults.

use serde::{Deserialize, Serialize};

use crate::cell::{MAX_WATER_PER_CELL, MIN_WATER_PER_CELL};
use crate::direction::ALIGNMENT_FLOOR;
use crate::distribute::{MAX_COMPRESSION, MAX_TRANSFER_AMOUNT};

/// Rate at which the driver advances the simulation, in steps per second.
pub const SIM_FRAMERATE: u32 = 30;

/// Simulation steps run each time the fixed interval elapses.
pub const STEPS_PER_TICK: u32 = 3;

/// Water poured per second while the host holds the pour input.
pub const INJECTION_RATE: f32 = 50.0;

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Capacity given to freshly created cells.
    pub max_water_per_cell: f32,
    /// Cells at or below this amount are skipped and zeroed.
    pub min_water_per_cell: f32,
    /// Upper bound on any single transfer.
    pub max_transfer_amount: f32,
    /// Extra amount a full cell accepts per unit of pressure from above.
    pub max_compression: f32,
    /// Alignment (dot product) mapped to zero transfer weight.
    pub alignment_floor: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_water_per_cell: MAX_WATER_PER_CELL,
            min_water_per_cell: MIN_WATER_PER_CELL,
            max_transfer_amount: MAX_TRANSFER_AMOUNT,
            max_compression: MAX_COMPRESSION,
            alignment_floor: ALIGNMENT_FLOOR,
        }
    }
}

impl SimConfig {
    /// Parses a config from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub sim_rate_hz: u32,
    pub steps_per_tick: u32,
    pub injection_rate: f32,
    pub sim: SimConfig,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            sim_rate_hz: SIM_FRAMERATE,
            steps_per_tick: STEPS_PER_TICK,
            injection_rate: INJECTION_RATE,
            sim: SimConfig::default(),
        }
    }
}

impl DriverConfig {
    /// Parses a driver config from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Seconds between fixed steps. A zero rate is treated as one step per second.
    #[must_use]
    pub fn step_interval(&self) -> f32 {
        (1.0 / f64::from(self.sim_rate_hz.max(1))) as f32
    }
}
