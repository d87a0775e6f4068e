//! Per-direction distribution routines dispatched from the step loop.

mod horizontal;
mod vertical;

pub use vertical::level_target;

use crate::api::FlowApi;
use crate::cell::WaterCell;
use crate::direction::{targets_in_world_dir, FlowDirection, TransferTarget};

/// Upper bound on a single transfer.
pub const MAX_TRANSFER_AMOUNT: f32 = 50.0;

/// How much extra a full cell holds per unit of water stacked above it.
pub const MAX_COMPRESSION: f32 = 0.1;

/// Distribute the anchor cell's water in one world direction, splitting the
/// transfer across the grid neighbours that direction resolves to under the
/// structure's `rotation` (degrees).
pub fn distribute(direction: FlowDirection, api: &mut FlowApi, rotation: f32) {
    let targets =
        targets_in_world_dir(direction.world_vector(), rotation, api.config.alignment_floor);
    match direction {
        FlowDirection::Down => vertical::distribute_down(api, &targets),
        FlowDirection::Up => vertical::distribute_up(api, &targets),
        FlowDirection::Right | FlowDirection::Left => {
            horizontal::distribute_sideways(api, &targets);
        }
    }
}

/// A target the anchor may pour into right now: present, not a wall, and
/// not across a blocked diagonal.
fn open_target(api: &FlowApi, target: &TransferTarget) -> Option<WaterCell> {
    let dest = *api.get(target.offset)?;
    (dest.can_hold_water() && api.can_reach(target.offset)).then_some(dest)
}

/// Clamp a raw amount into `[0, min(max_transfer, source)]`.
fn clamp_transfer(amount: f32, source: f32, max_transfer: f32) -> f32 {
    amount.max(0.0).min(max_transfer.min(source))
}
