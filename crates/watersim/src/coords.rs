//! Integer grid coordinates and axis-aligned integer bounds.

use std::fmt;
use std::ops::{Add, Sub};

use glam::{IVec2, Vec2};

/// Integer cell/tile coordinate. Used as the key of every sparse store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const ZERO: Self = Self::new(0, 0);
    pub const ONE: Self = Self::new(1, 1);
    pub const UP: Self = Self::new(0, 1);
    pub const DOWN: Self = Self::new(0, -1);
    pub const LEFT: Self = Self::new(-1, 0);
    pub const RIGHT: Self = Self::new(1, 0);

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Floors a float point onto the cell containing it.
    #[must_use]
    pub fn floor(point: Vec2) -> Self {
        Self::new(point.x.floor() as i32, point.y.floor() as i32)
    }

    #[must_use]
    pub fn as_vec2(self) -> Vec2 {
        IVec2::from(self).as_vec2()
    }

    /// True when both components have magnitude one.
    #[must_use]
    pub fn is_diagonal_step(self) -> bool {
        self.x.abs() == 1 && self.y.abs() == 1
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for GridPos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for GridPos {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<IVec2> for GridPos {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<GridPos> for IVec2 {
    fn from(p: GridPos) -> Self {
        IVec2::new(p.x, p.y)
    }
}

/// Axis-aligned integer rectangle: `min` inclusive, `max` exclusive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Bounds {
    min: GridPos,
    max: GridPos,
}

impl Bounds {
    /// Builds bounds from two corners. A `max` below `min` on either axis is
    /// raised to `min`, so the rectangle is never inverted.
    #[must_use]
    pub fn new(min: GridPos, max: GridPos) -> Self {
        Self {
            min,
            max: GridPos::new(max.x.max(min.x), max.y.max(min.y)),
        }
    }

    /// Smallest bounds covering every position, optionally grown by one cell
    /// on every side. An empty input yields zero-sized bounds at the origin.
    #[must_use]
    pub fn from_positions<I>(positions: I, pad: bool) -> Self
    where
        I: IntoIterator<Item = GridPos>,
    {
        let mut iter = positions.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };

        let (mut min, mut max) = (first, first);
        for pos in iter {
            min.x = min.x.min(pos.x);
            min.y = min.y.min(pos.y);
            max.x = max.x.max(pos.x);
            max.y = max.y.max(pos.y);
        }

        if pad {
            Self::new(min - GridPos::ONE, max + GridPos::ONE + GridPos::ONE)
        } else {
            Self::new(min, max + GridPos::ONE)
        }
    }

    #[must_use]
    pub fn min(&self) -> GridPos {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> GridPos {
        self.max
    }

    #[must_use]
    pub fn int_size(&self) -> GridPos {
        self.max - self.min
    }

    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.int_size().as_vec2()
    }

    #[must_use]
    pub fn extents(&self) -> Vec2 {
        self.size() / 2.0
    }

    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min.as_vec2() + self.max.as_vec2()) / 2.0
    }

    #[must_use]
    pub fn top(&self) -> i32 {
        self.max.y
    }

    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.min.y
    }

    #[must_use]
    pub fn left(&self) -> i32 {
        self.min.x
    }

    #[must_use]
    pub fn right(&self) -> i32 {
        self.max.x
    }

    /// Number of positions covered.
    #[must_use]
    pub fn area(&self) -> usize {
        let size = self.int_size();
        size.x as usize * size.y as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= self.min.x && pos.x < self.max.x && pos.y >= self.min.y && pos.y < self.max.y
    }

    #[must_use]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.cmpge(self.min.as_vec2()).all() && point.cmplt(self.max.as_vec2()).all()
    }

    /// Every covered position, row by row from the bottom.
    #[must_use]
    pub fn positions(&self) -> impl Iterator<Item = GridPos> {
        let (min, max) = (self.min, self.max);
        (min.y..max.y).flat_map(move |y| (min.x..max.x).map(move |x| GridPos::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_positions_give_zero_bounds_at_origin() {
        let bounds = Bounds::from_positions(std::iter::empty(), true);
        assert_eq!(bounds.min(), GridPos::ZERO);
        assert_eq!(bounds.max(), GridPos::ZERO);
        assert!(bounds.is_empty());
        assert_eq!(bounds.positions().count(), 0);
    }

    #[test]
    fn single_position_unpadded_is_one_cell() {
        let bounds = Bounds::from_positions([GridPos::new(3, -2)], false);
        assert_eq!(bounds.min(), GridPos::new(3, -2));
        assert_eq!(bounds.max(), GridPos::new(4, -1));
        assert_eq!(bounds.area(), 1);
        assert!(bounds.contains(GridPos::new(3, -2)));
        assert!(!bounds.contains(GridPos::new(4, -2)));
    }

    #[test]
    fn padding_grows_every_side_by_one() {
        let bounds = Bounds::from_positions([GridPos::new(0, 0), GridPos::new(2, 1)], true);
        assert_eq!(bounds.min(), GridPos::new(-1, -1));
        assert_eq!(bounds.max(), GridPos::new(4, 3));
        assert_eq!(bounds.int_size(), GridPos::new(5, 4));
        assert_eq!(bounds.left(), -1);
        assert_eq!(bounds.right(), 4);
        assert_eq!(bounds.bottom(), -1);
        assert_eq!(bounds.top(), 3);
    }

    #[test]
    fn derived_float_measures() {
        let bounds = Bounds::new(GridPos::new(0, 0), GridPos::new(4, 2));
        assert_eq!(bounds.size(), Vec2::new(4.0, 2.0));
        assert_eq!(bounds.extents(), Vec2::new(2.0, 1.0));
        assert_eq!(bounds.center(), Vec2::new(2.0, 1.0));
        assert!(bounds.contains_point(Vec2::new(3.9, 0.0)));
        assert!(!bounds.contains_point(Vec2::new(4.0, 0.0)));
    }

    #[test]
    fn inverted_corners_collapse() {
        let bounds = Bounds::new(GridPos::new(2, 2), GridPos::new(0, 5));
        assert_eq!(bounds.max(), GridPos::new(2, 5));
        assert!(bounds.is_empty());
    }

    #[test]
    fn converts_to_and_from_glam() {
        let pos = GridPos::from(IVec2::new(-3, 7));
        assert_eq!(pos, GridPos::new(-3, 7));
        assert_eq!(IVec2::from(pos), IVec2::new(-3, 7));
        assert_eq!(pos.as_vec2(), Vec2::new(-3.0, 7.0));
        assert_eq!(pos - GridPos::ONE + GridPos::UP, GridPos::new(-4, 7));
    }

    #[test]
    fn floor_rounds_towards_negative_infinity() {
        assert_eq!(GridPos::floor(Vec2::new(-0.5, 1.5)), GridPos::new(-1, 1));
        assert_eq!(GridPos::floor(Vec2::new(2.0, -3.0)), GridPos::new(2, -3));
    }

    proptest! {
        #[test]
        fn prop_bounds_cover_every_input(
            raw in proptest::collection::vec((-50i32..50, -50i32..50), 1..40),
            pad in any::<bool>(),
        ) {
            let positions: Vec<GridPos> = raw.iter().map(|&(x, y)| GridPos::new(x, y)).collect();
            let bounds = Bounds::from_positions(positions.iter().copied(), pad);
            prop_assert!(bounds.max().x >= bounds.min().x);
            prop_assert!(bounds.max().y >= bounds.min().y);
            for pos in &positions {
                prop_assert!(bounds.contains(*pos));
            }
            prop_assert_eq!(bounds.positions().count(), bounds.area());
        }
    }
}
