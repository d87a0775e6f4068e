//! Tile structure the water grid is attached to.
//!
//! A structure is a sparse set of tiles in its own local grid, placed in the
//! world by a position and a rotation in degrees. The simulation only reads
//! it, through [`StructureView`].

use std::collections::HashMap;

use glam::{Affine2, Vec2};

use crate::coords::{Bounds, GridPos};

/// What the water simulation needs from its structure.
pub trait StructureView {
    /// Bounds over occupied tiles, padded by the implementation.
    fn bounds(&self) -> Bounds;

    /// Rotation in degrees, counter-clockwise.
    fn rotation(&self) -> f32;

    fn world_to_tile(&self, world_pos: Vec2) -> GridPos;

    fn tile_to_world(&self, tile_pos: GridPos) -> Vec2;

    /// `None` when no tile occupies `tile_pos`, otherwise its water-wall flag.
    fn water_wall_at(&self, tile_pos: GridPos) -> Option<bool>;
}

/// One tile of a structure.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StructureTile {
    pub is_collision_wall: bool,
    pub is_water_wall: bool,
}

impl Default for StructureTile {
    fn default() -> Self {
        Self::wall()
    }
}

impl StructureTile {
    /// Solid to both movement and water.
    #[must_use]
    pub fn wall() -> Self {
        Self {
            is_collision_wall: true,
            is_water_wall: true,
        }
    }

    /// Walkable and permeable, e.g. a grate.
    #[must_use]
    pub fn open() -> Self {
        Self {
            is_collision_wall: false,
            is_water_wall: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Structure {
    tiles: HashMap<GridPos, StructureTile>,
    position: Vec2,
    rotation: f32,
    transform: Affine2,
    bounds: Bounds,
}

impl Default for Structure {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }
}

impl Structure {
    #[must_use]
    pub fn new(position: Vec2, rotation: f32) -> Self {
        Self {
            tiles: HashMap::new(),
            position,
            rotation,
            transform: Self::compose(position, rotation),
            bounds: Bounds::default(),
        }
    }

    fn compose(position: Vec2, rotation: f32) -> Affine2 {
        Affine2::from_angle_translation(rotation.to_radians(), position)
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.transform = Self::compose(self.position, self.rotation);
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.rotation = rotation;
        self.transform = Self::compose(self.position, self.rotation);
    }

    #[must_use]
    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn tiles(&self) -> impl Iterator<Item = (GridPos, &StructureTile)> {
        self.tiles.iter().map(|(pos, tile)| (*pos, tile))
    }

    /// Places a tile unless one is already there. Returns whether it was placed.
    pub fn place_tile(&mut self, tile_pos: GridPos, tile: StructureTile) -> bool {
        if self.tiles.contains_key(&tile_pos) {
            return false;
        }
        self.tiles.insert(tile_pos, tile);
        self.regenerate_bounds();
        true
    }

    pub fn remove_tile(&mut self, tile_pos: GridPos) -> Option<StructureTile> {
        let removed = self.tiles.remove(&tile_pos)?;
        self.regenerate_bounds();
        Some(removed)
    }

    pub fn try_place_tile_at_world(&mut self, world_pos: Vec2) -> bool {
        let tile_pos = self.world_to_tile(world_pos);
        self.place_tile(tile_pos, StructureTile::wall())
    }

    pub fn try_remove_tile_at_world(&mut self, world_pos: Vec2) -> bool {
        let tile_pos = self.world_to_tile(world_pos);
        self.remove_tile(tile_pos).is_some()
    }

    #[must_use]
    pub fn tile_at_tile_pos(&self, tile_pos: GridPos) -> Option<&StructureTile> {
        self.tiles.get(&tile_pos)
    }

    #[must_use]
    pub fn tile_at_world_pos(&self, world_pos: Vec2) -> Option<&StructureTile> {
        self.tile_at_tile_pos(self.world_to_tile(world_pos))
    }

    #[must_use]
    pub fn has_tile_at_tile_pos(&self, tile_pos: GridPos) -> bool {
        self.tiles.contains_key(&tile_pos)
    }

    #[must_use]
    pub fn has_tile_at_world_pos(&self, world_pos: Vec2) -> bool {
        self.has_tile_at_tile_pos(self.world_to_tile(world_pos))
    }

    #[must_use]
    pub fn has_collision_wall_at_tile_pos(&self, tile_pos: GridPos) -> bool {
        self.tiles.get(&tile_pos).is_some_and(|t| t.is_collision_wall)
    }

    #[must_use]
    pub fn has_collision_wall_at_world_pos(&self, world_pos: Vec2) -> bool {
        self.has_collision_wall_at_tile_pos(self.world_to_tile(world_pos))
    }

    #[must_use]
    pub fn has_water_wall_at_tile_pos(&self, tile_pos: GridPos) -> bool {
        self.tiles.get(&tile_pos).is_some_and(|t| t.is_water_wall)
    }

    #[must_use]
    pub fn has_water_wall_at_world_pos(&self, world_pos: Vec2) -> bool {
        self.has_water_wall_at_tile_pos(self.world_to_tile(world_pos))
    }

    fn regenerate_bounds(&mut self) {
        self.bounds = Bounds::from_positions(self.tiles.keys().copied(), true);
    }
}

impl StructureView for Structure {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn world_to_tile(&self, world_pos: Vec2) -> GridPos {
        GridPos::floor(self.transform.inverse().transform_point2(world_pos))
    }

    fn tile_to_world(&self, tile_pos: GridPos) -> Vec2 {
        self.transform.transform_point2(tile_pos.as_vec2())
    }

    fn water_wall_at(&self, tile_pos: GridPos) -> Option<bool> {
        self.tiles.get(&tile_pos).map(|t| t.is_water_wall)
    }
}
