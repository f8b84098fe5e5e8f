//! Greedy forward construction of size-class tables.
//!
//! Starting from the smallest aligned size, each class is the first grid
//! candidate inside the growth window above its predecessor that admits a
//! span within the waste ceiling. Generation is pure: the same configuration
//! and tuning always yield the same table, byte for byte.

mod heuristics;
mod schedule;
mod span;


use serde::{Deserialize, Serialize};

use crate::error::{Ceiling, Infeasible, TableError};
use crate::table::config::ClassTableConfig;
use crate::table::descriptor::{narrow, SizeClassDescriptor};
use crate::table::metrics::SpanGeometry;
use crate::table::page::align_down;
use crate::table::Table;

use schedule::Schedule;

/// Generator heuristics that shape a table without being table invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tuning {
    /// How far above the least achievable waste a smaller span may sit and
    /// still be preferred, in basis points.
    pub waste_tolerance_bps: u32,
    /// Sizes below this use the fine grid shift.
    pub fine_limit: usize,
    /// Grid step is the size's power-of-two bucket shifted right by this below `fine_limit`.
    pub fine_shift: u32,
    /// Grid shift at and above `fine_limit`.
    pub coarse_shift: u32,
    /// Bytes one transfer aims to move.
    pub transfer_target_bytes: usize,
    /// Smallest batch the transfer target may produce.
    pub min_transfer_batch: usize,
    /// Bytes a per-core cache aims to hold per class.
    pub cache_budget_bytes: usize,
    /// Smallest per-core cache capacity.
    pub cache_capacity_min: usize,
    /// Largest per-core cache capacity.
    pub cache_capacity_max: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            waste_tolerance_bps: 150,
            fine_limit: 512,
            fine_shift: 3,
            coarse_shift: 2,
            transfer_target_bytes: 64 << 10,
            min_transfer_batch: 2,
            cache_budget_bytes: 256 << 10,
            cache_capacity_min: 128,
            cache_capacity_max: 2048,
        }
    }
}

impl Tuning {
    /// Rejects heuristics that cannot produce a table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidParameter`] naming the first bad field.
    pub fn check(&self) -> Result<(), TableError> {
        if self.fine_shift >= usize::BITS {
            return Err(TableError::InvalidParameter {
                name: "fine_shift",
                value: self.fine_shift as usize,
            });
        }
        if self.coarse_shift >= usize::BITS {
            return Err(TableError::InvalidParameter {
                name: "coarse_shift",
                value: self.coarse_shift as usize,
            });
        }
        if self.cache_capacity_min == 0 || self.cache_capacity_min > self.cache_capacity_max {
            return Err(TableError::InvalidParameter {
                name: "cache_capacity_min",
                value: self.cache_capacity_min,
            });
        }
        Ok(())
    }
}

/// Builds a table for one configuration.
#[derive(Debug, Clone)]
pub struct ClassTableGenerator {
    config: ClassTableConfig,
    tuning: Tuning,
}

impl ClassTableGenerator {
    /// Creates a generator with default tuning.
    #[must_use]
    pub fn new(config: ClassTableConfig) -> Self {
        Self {
            config,
            tuning: Tuning::default(),
        }
    }

    /// Replaces the tuning.
    #[must_use]
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// The configuration this generator targets.
    #[must_use]
    pub fn config(&self) -> &ClassTableConfig {
        &self.config
    }

    /// Builds the table.
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidParameter`] for malformed parameters and
    /// [`TableError::InfeasibleConfiguration`] when the ceilings cannot all
    /// be met within the class budget.
    pub fn generate(&self) -> Result<Table, TableError> {
        self.config.check()?;
        self.tuning.check()?;
        let schedule = Schedule::new(&self.config, &self.tuning);

        let mut classes = vec![SizeClassDescriptor::SENTINEL];
        let mut prev = None;
        loop {
            if classes.len() >= self.config.max_classes {
                return Err(self.infeasible(Ceiling::ClassCount, prev.unwrap_or(0), classes.len()));
            }
            let (size, span) = match prev {
                None => self.first_class(&schedule)?,
                Some(prev) => self.next_class(&schedule, prev, classes.len())?,
            };
            let descriptor = self.describe(size, &span);
            trace_debug!(
                class = classes.len(),
                size,
                pages = span.pages,
                objects = span.objects,
                batch = descriptor.transfer_batch,
                capacity = descriptor.cache_capacity,
                "accepted size class"
            );
            classes.push(descriptor);
            if size == self.config.max_block_size {
                break;
            }
            prev = Some(size);
        }

        trace_info!(
            page_size = self.config.page_size,
            abi_alignment = self.config.abi_alignment,
            classes = classes.len(),
            "generated size-class table"
        );
        Ok(Table::from(classes))
    }

    fn first_class(&self, schedule: &Schedule<'_>) -> Result<(usize, SpanGeometry), TableError> {
        let mut candidate = self.config.min_alignment;
        loop {
            if let Some(span) = self.try_size(candidate) {
                return Ok((candidate, span));
            }
            if candidate >= self.config.max_block_size {
                return Err(self.infeasible(Ceiling::Waste, candidate, 1));
            }
            candidate = schedule.next(candidate);
        }
    }

    fn next_class(
        &self,
        schedule: &Schedule<'_>,
        prev: usize,
        built: usize,
    ) -> Result<(usize, SpanGeometry), TableError> {
        let limit = schedule.growth_limit(prev);
        if limit <= prev {
            return Err(self.infeasible(Ceiling::Growth, prev, built));
        }

        let target = schedule.next(prev);
        let mut candidate = target;
        while candidate <= limit {
            if let Some(span) = self.try_size(candidate) {
                return Ok((candidate, span));
            }
            if candidate >= self.config.max_block_size {
                break;
            }
            candidate = schedule.next(candidate);
        }

        // Every grid point in the window was rejected: settle for alignment
        // granularity, first walking down from just below the first grid
        // target, then up through the gaps between grid points.
        let step = schedule.fallback_step(prev);
        let mut candidate = align_down(target.min(limit + 1) - 1, step);
        while candidate > prev {
            if let Some(span) = self.try_size(candidate) {
                trace_debug!(prev, size = candidate, "grid exhausted, chose smaller size");
                return Ok((candidate, span));
            }
            candidate -= step;
        }
        let mut candidate = align_down(target, step) + step;
        while candidate <= limit {
            if let Some(span) = self.try_size(candidate) {
                trace_debug!(prev, size = candidate, "grid exhausted, chose off-grid size");
                return Ok((candidate, span));
            }
            candidate += step;
        }

        trace_warn!(prev, limit, "no size in growth window admits a span");
        Err(self.infeasible(Ceiling::Waste, prev, built))
    }

    fn try_size(&self, size: usize) -> Option<SpanGeometry> {
        if !self.config.is_aligned(size) {
            return None;
        }
        span::select_span(size, &self.config, self.tuning.waste_tolerance_bps)
    }

    fn describe(&self, size: usize, span: &SpanGeometry) -> SizeClassDescriptor {
        let batch = heuristics::transfer_batch(size, span.objects, &self.config, &self.tuning);
        let capacity = heuristics::cache_capacity(size, batch, &self.tuning);
        SizeClassDescriptor::new(narrow(size), narrow(span.pages), batch, capacity)
    }

    fn infeasible(&self, ceiling: Ceiling, size: usize, classes: usize) -> TableError {
        TableError::InfeasibleConfiguration(Infeasible {
            ceiling,
            size,
            classes,
            config: self.config,
        })
    }
}

/// Builds the table for `config` with default tuning.
///
/// # Errors
///
/// See [`ClassTableGenerator::generate`].
pub fn generate(config: &ClassTableConfig) -> Result<Table, TableError> {
    ClassTableGenerator::new(*config).generate()
}
