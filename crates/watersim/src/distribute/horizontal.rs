//! Horizontal distribution: equalise with the neighbour by moving half the
//! difference. Unlike the vertical pass this ignores capacity.

use super::{clamp_transfer, open_target};
use crate::api::FlowApi;
use crate::cell::WaterCell;
use crate::direction::TransferTarget;

pub fn distribute_sideways(api: &mut FlowApi, targets: &[TransferTarget]) {
    for target in targets {
        let Some(dest) = open_target(api, target) else {
            continue;
        };
        let Some(src) = api.source().map(WaterCell::value) else {
            return;
        };

        let raw = (src - dest.value()) / 2.0;
        let amount = clamp_transfer(raw, src, api.config.max_transfer_amount);
        if amount <= 0.0 {
            continue;
        }
        api.transfer(target.offset, amount * target.weight);
    }
}
