//! World-to-grid direction remapping.
//!
//! The cell grid stays axis-aligned in structure-local space while the
//! structure itself can sit at any angle, so a world direction such as
//! "down" usually falls between two grid neighbours. The transfer is split
//! across the nearest 45° neighbour and the better of its two adjacent
//! neighbours, weighted by how well each lines up with the true direction.

use glam::Vec2;

use crate::coords::GridPos;

/// Alignment at or below which a neighbour gets zero weight. Slightly above
/// cos(45°) so a neighbour a full 45° off never receives anything.
pub const ALIGNMENT_FLOOR: f32 = 0.71;

/// A world-space direction water is distributed in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FlowDirection {
    Down,
    Right,
    Left,
    Up,
}

impl FlowDirection {
    /// Order in which a cell distributes its water each step.
    pub const ORDER: [FlowDirection; 4] = [Self::Down, Self::Right, Self::Left, Self::Up];

    #[must_use]
    pub fn world_vector(self) -> Vec2 {
        match self {
            Self::Down => Vec2::NEG_Y,
            Self::Right => Vec2::X,
            Self::Left => Vec2::NEG_X,
            Self::Up => Vec2::Y,
        }
    }
}

/// A neighbour offset in grid space and its share of a transfer.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TransferTarget {
    pub offset: GridPos,
    pub weight: f32,
}

/// Angle of `dir` in degrees, in `[0, 360)`.
#[must_use]
pub fn direction_to_degrees(dir: Vec2) -> f32 {
    dir.y.atan2(dir.x).to_degrees().rem_euclid(360.0)
}

#[must_use]
pub fn degrees_to_direction(degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(cos, sin)
}

/// Maps `value` from `[from_min, from_max]` onto `[0, 1]` without clamping.
fn remap01(value: f32, from_min: f32, from_max: f32) -> f32 {
    (value - from_min) / (from_max - from_min)
}

/// Snaps `angle` to the nearest multiple of 45° and scores that neighbour
/// against the exact local direction.
fn snapped_neighbour(angle: f32, exact: Vec2, alignment_floor: f32) -> (GridPos, f32) {
    let snapped = degrees_to_direction((angle / 45.0).round_ties_even() * 45.0);
    let offset = GridPos::new(snapped.x.round() as i32, snapped.y.round() as i32);
    let alignment = remap01(snapped.dot(exact), alignment_floor, 1.0).clamp(0.0, 1.0);
    (offset, alignment)
}

/// Resolves a world direction into two weighted grid-local neighbour offsets
/// for a structure rotated by `rotation_deg`. Weights are in `[0, 1]` and sum
/// to one. At multiples of 90° the secondary target carries no weight.
#[must_use]
pub fn targets_in_world_dir(
    world_dir: Vec2,
    rotation_deg: f32,
    alignment_floor: f32,
) -> [TransferTarget; 2] {
    let local_angle = direction_to_degrees(world_dir) - rotation_deg;
    let exact = degrees_to_direction(local_angle);

    let (primary, primary_weight) = snapped_neighbour(local_angle, exact, alignment_floor);
    let upper = snapped_neighbour(local_angle + 45.0, exact, alignment_floor);
    let lower = snapped_neighbour(local_angle - 45.0, exact, alignment_floor);
    let (secondary, secondary_weight) = if upper.1 > lower.1 { upper } else { lower };

    let sum = primary_weight + secondary_weight;
    let (primary_weight, secondary_weight) = if sum > 0.0 {
        (primary_weight / sum, secondary_weight / sum)
    } else {
        (1.0, 0.0)
    };

    [
        TransferTarget {
            offset: primary,
            weight: primary_weight,
        },
        TransferTarget {
            offset: secondary,
            weight: secondary_weight,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn resolve(dir: FlowDirection, rotation: f32) -> [TransferTarget; 2] {
        targets_in_world_dir(dir.world_vector(), rotation, ALIGNMENT_FLOOR)
    }

    #[test]
    fn unrotated_directions_map_to_cardinals() {
        let cases = [
            (FlowDirection::Down, GridPos::DOWN),
            (FlowDirection::Right, GridPos::RIGHT),
            (FlowDirection::Left, GridPos::LEFT),
            (FlowDirection::Up, GridPos::UP),
        ];
        for (dir, expected) in cases {
            let [primary, secondary] = resolve(dir, 0.0);
            assert_eq!(primary.offset, expected, "{dir:?}");
            assert!((primary.weight - 1.0).abs() < 1e-5, "{dir:?}");
            assert!(secondary.weight.abs() < 1e-5, "{dir:?}");
        }
    }

    #[test]
    fn quarter_turn_remaps_down_onto_local_left() {
        // Rotated 90° counter-clockwise, world down runs along local -x.
        let [primary, secondary] = resolve(FlowDirection::Down, 90.0);
        assert_eq!(primary.offset, GridPos::LEFT);
        assert!((primary.weight - 1.0).abs() < 1e-5);
        assert!(secondary.weight < 1e-5);
    }

    #[test]
    fn half_turn_flips_down_to_local_up() {
        let [primary, _] = resolve(FlowDirection::Down, 180.0);
        assert_eq!(primary.offset, GridPos::UP);
    }

    #[test]
    fn eighth_turn_prefers_diagonal() {
        // World down is local 225°: exactly the (-1, -1) diagonal.
        let [primary, _] = resolve(FlowDirection::Down, 45.0);
        assert_eq!(primary.offset, GridPos::new(-1, -1));
        assert!((primary.weight - 1.0).abs() < 1e-5);
    }

    #[test]
    fn small_tilt_splits_between_cardinal_and_diagonal() {
        // Local angle 260°: between straight down (270°) and down-left (225°).
        let [primary, secondary] = resolve(FlowDirection::Down, 10.0);
        assert_eq!(primary.offset, GridPos::DOWN);
        assert_eq!(secondary.offset, GridPos::new(-1, -1));
        assert!(primary.weight > secondary.weight);
        assert!(secondary.weight > 0.0);
    }

    #[test]
    fn angle_helpers_round_trip_cardinals() {
        assert!((direction_to_degrees(Vec2::NEG_Y) - 270.0).abs() < 1e-4);
        assert!((direction_to_degrees(Vec2::X) - 0.0).abs() < 1e-4);
        assert!((degrees_to_direction(90.0) - Vec2::Y).length() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_weights_normalized_and_offsets_adjacent(
            rotation in -720.0f32..720.0,
            dir_index in 0usize..4,
        ) {
            let dir = FlowDirection::ORDER[dir_index];
            let targets = resolve(dir, rotation);
            let sum: f32 = targets.iter().map(|t| t.weight).sum();
            prop_assert!((sum - 1.0).abs() < 1e-4);
            for t in &targets {
                prop_assert!((0.0..=1.0).contains(&t.weight));
                prop_assert!(t.offset.x.abs() <= 1 && t.offset.y.abs() <= 1);
                prop_assert!(t.offset != GridPos::ZERO);
            }
        }

        #[test]
        fn prop_primary_target_points_along_direction(rotation in -360.0f32..360.0) {
            let world = FlowDirection::Down.world_vector();
            let local = degrees_to_direction(direction_to_degrees(world) - rotation);
            let [primary, _] = resolve(FlowDirection::Down, rotation);
            let offset = primary.offset.as_vec2().normalize();
            // Nearest 45° neighbour is within 22.5° (plus float slack).
            prop_assert!(offset.dot(local) >= 0.92);
        }
    }
}
