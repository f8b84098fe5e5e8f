//! Transfer batch and cache capacity sizing.

use super::Tuning;
use crate::table::config::ClassTableConfig;
use crate::table::descriptor::narrow;

/// Objects per transfer: enough to move `transfer_target_bytes` at once,
/// bounded by the batch ceiling and by what one span holds.
pub(crate) fn transfer_batch(
    size: usize,
    objects: usize,
    config: &ClassTableConfig,
    tuning: &Tuning,
) -> u32 {
    let wanted = (tuning.transfer_target_bytes / size)
        .max(tuning.min_transfer_batch)
        .max(1);
    narrow(wanted.min(objects).min(config.batch_ceiling as usize))
}

/// Objects a per-core cache holds: the cache budget spread over objects of
/// this size, clamped, and never less than one batch.
pub(crate) fn cache_capacity(size: usize, batch: u32, tuning: &Tuning) -> u32 {
    let budget = (tuning.cache_budget_bytes / size)
        .clamp(tuning.cache_capacity_min, tuning.cache_capacity_max);
    narrow(budget).max(batch)
}
