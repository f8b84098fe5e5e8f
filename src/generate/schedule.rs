//! Candidate size schedule.
//!
//! Below the ladder limit sizes double. Above it the grid step is a fixed
//! fraction of the size's power-of-two bucket, never finer than the ABI
//! alignment, and the fraction coarsens once sizes pass the fine limit.

use super::Tuning;
use crate::table::config::ClassTableConfig;
use crate::table::metrics;
use crate::table::page::prev_power_of_two;

pub(crate) struct Schedule<'a> {
    config: &'a ClassTableConfig,
    tuning: &'a Tuning,
}

impl<'a> Schedule<'a> {
    pub(crate) fn new(config: &'a ClassTableConfig, tuning: &'a Tuning) -> Self {
        Self { config, tuning }
    }

    fn on_ladder(&self, size: usize) -> bool {
        size < self.config.ladder_limit
    }

    /// Grid step for sizes in the bucket of `size`.
    pub(crate) fn step(&self, size: usize) -> usize {
        let shift = if size < self.tuning.fine_limit {
            self.tuning.fine_shift
        } else {
            self.tuning.coarse_shift
        };
        (prev_power_of_two(size) >> shift).max(self.config.abi_alignment)
    }

    /// The grid point after `size`, clamped to the maximum block size.
    pub(crate) fn next(&self, size: usize) -> usize {
        let next = if self.on_ladder(size) {
            size.saturating_mul(2)
        } else {
            let step = self.step(size);
            (size / step + 1).saturating_mul(step)
        };
        next.min(self.config.max_block_size)
    }

    /// Largest size the class after `prev` may take.
    pub(crate) fn growth_limit(&self, prev: usize) -> usize {
        let limit = if self.on_ladder(prev) {
            prev.saturating_mul(2)
        } else {
            metrics::growth_limit(prev, self.config.growth_ceiling_bps)
        };
        limit.min(self.config.max_block_size)
    }

    /// Step used when falling back below the grid.
    pub(crate) fn fallback_step(&self, prev: usize) -> usize {
        if prev >= self.config.abi_alignment {
            self.config.abi_alignment
        } else {
            self.config.min_alignment
        }
    }
}
