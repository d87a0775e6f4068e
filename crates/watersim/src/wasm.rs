//! JS-facing wrapper. Buffers are copied out row by row from the bottom of
//! the grid bounds; `width`/`height`/`min_x`/`min_y` describe the layout.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::config::DriverConfig;
use crate::driver::WaterWorld;
use crate::structure::Structure;

/// Installs the panic hook and routes `log` output to the browser console.
/// Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        // A second init fails because a logger is already set; nothing to do.
        let _ = console_log::init_with_level(log::Level::Info);
    }
}

#[wasm_bindgen]
#[derive(Debug)]
pub struct WasmWaterWorld {
    inner: WaterWorld,
}

impl WasmWaterWorld {
    fn with_config(config: DriverConfig, x: f32, y: f32, rotation: f32) -> Self {
        Self {
            inner: WaterWorld::new(Structure::new(Vec2::new(x, y), rotation), config),
        }
    }
}

#[wasm_bindgen]
impl WasmWaterWorld {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self::with_config(DriverConfig::default(), x, y, rotation)
    }

    /// Builds a world from a JSON `DriverConfig`. Missing fields take their
    /// defaults.
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(
        json: &str,
        x: f32,
        y: f32,
        rotation: f32,
    ) -> Result<WasmWaterWorld, JsValue> {
        let config =
            DriverConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_config(config, x, y, rotation))
    }

    /// Returns the number of simulation steps that ran.
    pub fn tick(&mut self, dt: f32) -> u32 {
        self.inner.tick(dt)
    }

    pub fn pour(&mut self, x: f32, y: f32, dt: f32) {
        self.inner.pour(Vec2::new(x, y), dt);
    }

    pub fn drain(&mut self, x: f32, y: f32, dt: f32) {
        self.inner.drain(Vec2::new(x, y), dt);
    }

    #[wasm_bindgen(js_name = placeTile)]
    pub fn place_tile(&mut self, x: f32, y: f32) -> bool {
        self.inner.place_tile_at_world(Vec2::new(x, y))
    }

    #[wasm_bindgen(js_name = removeTile)]
    pub fn remove_tile(&mut self, x: f32, y: f32) -> bool {
        self.inner.remove_tile_at_world(Vec2::new(x, y))
    }

    #[wasm_bindgen(js_name = setRotation)]
    pub fn set_rotation(&mut self, degrees: f32) {
        self.inner.set_rotation(degrees);
    }

    #[wasm_bindgen(js_name = setPosition)]
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.inner.set_position(Vec2::new(x, y));
    }

    #[must_use]
    pub fn values(&self) -> Vec<f32> {
        self.inner.values()
    }

    #[must_use]
    pub fn walls(&self) -> Vec<u8> {
        self.inner.walls()
    }

    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.inner.simulation().size().x.unsigned_abs()
    }

    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.inner.simulation().size().y.unsigned_abs()
    }

    #[wasm_bindgen(getter, js_name = minX)]
    #[must_use]
    pub fn min_x(&self) -> i32 {
        self.inner.simulation().bounds().left()
    }

    #[wasm_bindgen(getter, js_name = minY)]
    #[must_use]
    pub fn min_y(&self) -> i32 {
        self.inner.simulation().bounds().bottom()
    }

    #[wasm_bindgen(js_name = roomCount)]
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.inner.rooms().len()
    }

    #[wasm_bindgen(js_name = totalWater)]
    #[must_use]
    pub fn total_water(&self) -> f32 {
        self.inner.simulation().total_water()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_match_reported_dimensions() {
        let mut world = WasmWaterWorld::new(0.0, 0.0, 0.0);
        assert_eq!(world.values().len(), 0);
        assert!(world.place_tile(0.5, 0.5));
        assert!(world.place_tile(2.5, 0.5));

        let cells = (world.width() * world.height()) as usize;
        assert_eq!(world.values().len(), cells);
        assert_eq!(world.walls().len(), cells);
        assert_eq!(world.min_x(), -1);
        assert_eq!(world.min_y(), -1);
        assert_eq!(world.walls().iter().filter(|&&w| w == 1).count(), 2);
    }

    #[test]
    fn config_json_overrides_defaults() {
        let world =
            WasmWaterWorld::from_config_json(r#"{"steps_per_tick": 5}"#, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(world.inner.config().steps_per_tick, 5);
        assert_eq!(world.inner.config().sim_rate_hz, 30);
    }

    #[test]
    fn config_json_cannot_overflow_tick() {
        let mut world =
            WasmWaterWorld::from_config_json(r#"{"steps_per_tick": 4294967295}"#, 0.0, 0.0, 0.0)
                .unwrap();
        assert_eq!(world.tick(1.0 / 30.0 * 2.5), 2 * crate::driver::MAX_STEPS_PER_TICK);
    }

    #[test]
    fn pour_and_tick_move_water() {
        let mut world = WasmWaterWorld::new(0.0, 0.0, 0.0);
        for x in 0..3 {
            world.place_tile(x as f32 + 0.5, 0.5);
        }
        world.pour(1.5, 1.5, 0.01);
        assert!(world.total_water() > 0.0);
        assert_eq!(world.tick(1.0 / 30.0 + 0.001), 3);
    }
}
