//! Room detection over a structure's collision walls.
//!
//! Everything reachable from the outside corner of the structure's bounds is
//! exterior. Whatever is left is split into rooms, one flood fill each.

use std::collections::{BTreeSet, HashSet};

use crate::coords::{Bounds, GridPos};
use crate::structure::{Structure, StructureView};

const NEIGHBOURS: [GridPos; 4] = [GridPos::UP, GridPos::DOWN, GridPos::RIGHT, GridPos::LEFT];

/// An enclosed region of open tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    pub bounds: Bounds,
    pub tiles: Vec<GridPos>,
}

impl Room {
    fn new(mut tiles: Vec<GridPos>) -> Self {
        tiles.sort_by_key(|p| (p.y, p.x));
        let bounds = Bounds::from_positions(tiles.iter().copied(), false);
        Self { bounds, tiles }
    }

    #[must_use]
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.tiles.binary_search_by_key(&(pos.y, pos.x), |p| (p.y, p.x)).is_ok()
    }
}

pub trait RoomDetector {
    fn find_rooms(&self, structure: &Structure) -> Vec<Room>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FloodFillRoomDetector;

impl RoomDetector for FloodFillRoomDetector {
    fn find_rooms(&self, structure: &Structure) -> Vec<Room> {
        let bounds = structure.bounds();
        // Ordered so seeds, and therefore room order, are deterministic.
        let mut unvisited: BTreeSet<(i32, i32)> = bounds.positions().map(|p| (p.y, p.x)).collect();

        // The padded bounds guarantee the min corner is outside every wall.
        flood_fill(bounds.min(), structure, &mut unvisited);

        let mut rooms = Vec::new();
        while let Some((y, x)) = unvisited.pop_first() {
            let tiles = flood_fill(GridPos::new(x, y), structure, &mut unvisited);
            if !tiles.is_empty() {
                rooms.push(Room::new(tiles));
            }
        }
        rooms
    }
}

/// Fills from `origin` through open tiles, consuming every visited position
/// (walls included) from `unvisited`. Returns the open tiles reached.
fn flood_fill(
    origin: GridPos,
    structure: &Structure,
    unvisited: &mut BTreeSet<(i32, i32)>,
) -> Vec<GridPos> {
    let bounds = structure.bounds();
    let mut found = Vec::new();
    let mut queued: HashSet<GridPos> = HashSet::from([origin]);
    let mut stack = vec![origin];

    while let Some(pos) = stack.pop() {
        if !bounds.contains(pos) {
            continue;
        }
        unvisited.remove(&(pos.y, pos.x));

        if structure.has_collision_wall_at_tile_pos(pos) {
            continue;
        }
        found.push(pos);

        for offset in NEIGHBOURS {
            let next = pos + offset;
            if unvisited.contains(&(next.y, next.x)) && queued.insert(next) {
                stack.push(next);
            }
        }
    }

    found
}
