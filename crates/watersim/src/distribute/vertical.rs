//! Vertical distribution: gravity pulls water down, overflow pushes it up.
//!
//! Both directions level against the same target: a destination accepts
//! water up to its capacity, past which the pair settles into a compressed
//! split where the lower cell holds slightly more than the upper one.

use super::{clamp_transfer, open_target};
use crate::api::FlowApi;
use crate::cell::WaterCell;
use crate::direction::TransferTarget;

/// Level the lower of two stacked cells settles at, given the source amount
/// `src`, the destination amount `dest` and its capacity `dest_max`.
#[must_use]
pub fn level_target(src: f32, dest: f32, dest_max: f32, compression: f32) -> f32 {
    let sum = src + dest;
    if sum <= dest_max {
        dest_max
    } else if sum < 2.0 * dest_max + compression {
        (dest_max * dest_max + sum * compression) / (dest_max + compression)
    } else {
        (sum + compression) / 2.0
    }
}

pub fn distribute_down(api: &mut FlowApi, targets: &[TransferTarget]) {
    for target in targets {
        let Some(dest) = open_target(api, target) else {
            continue;
        };
        let Some(src) = api.source().map(WaterCell::value) else {
            return;
        };

        let raw = level_target(src, dest.value(), dest.max_value(), api.config.max_compression)
            - dest.value();
        let amount = clamp_transfer(raw, src, api.config.max_transfer_amount);
        if amount <= 0.0 {
            continue;
        }
        api.transfer(target.offset, amount * target.weight);
    }
}

pub fn distribute_up(api: &mut FlowApi, targets: &[TransferTarget]) {
    if !api.source().is_some_and(WaterCell::is_overfull) {
        return;
    }

    for target in targets {
        let Some(dest) = open_target(api, target) else {
            continue;
        };
        let Some(src) = api.source().map(WaterCell::value) else {
            return;
        };

        let level = level_target(src, dest.value(), dest.max_value(), api.config.max_compression);
        let raw = src - level;
        let amount = clamp_transfer(raw, src, api.config.max_transfer_amount);
        if amount <= 0.0 {
            continue;
        }
        api.transfer(target.offset, amount * target.weight);
    }
}
