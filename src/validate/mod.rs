//! Independent certification of size-class tables.
//!
//! The validator trusts nothing about where a table came from: every metric
//! is re-derived from the stored fields and the configuration, so generated,
//! literal and deserialized tables are all held to the same invariants. It
//! never modifies the table it inspects.

mod render;
mod report;


pub use render::TableListing;
pub use report::{ClassMetrics, Invariant, InvariantOutcome, ValidationReport, Violation};

use crate::table::config::{BatchBound, ClassTableConfig};
use crate::table::descriptor::SizeClassDescriptor;
use crate::table::metrics::{growth_pct, growth_within};

/// Walks a table once and reports every broken invariant.
#[derive(Debug, Clone, Copy)]
pub struct ClassTableValidator<'a> {
    config: &'a ClassTableConfig,
}

impl<'a> ClassTableValidator<'a> {
    /// Creates a validator for tables built against `config`.
    #[must_use]
    pub fn new(config: &'a ClassTableConfig) -> Self {
        Self { config }
    }

    /// Validates `classes`.
    ///
    /// A malformed configuration fails [`Invariant::Parameters`] and no row
    /// is inspected.
    #[must_use]
    pub fn validate(&self, classes: &[SizeClassDescriptor]) -> ValidationReport {
        let config = self.config;
        if let Err(error) = config.check() {
            trace_warn!(%error, "refusing to validate against malformed parameters");
            return ValidationReport::new(
                config.page_size,
                config.max_classes,
                classes.len(),
                Vec::new(),
                vec![Violation {
                    class: 0,
                    invariant: Invariant::Parameters,
                    detail: error.to_string(),
                }],
            );
        }
        let mut violations = Vec::new();
        let mut metrics = Vec::with_capacity(classes.len().saturating_sub(1));
        let mut flag = |class, invariant, detail: String| {
            violations.push(Violation {
                class,
                invariant,
                detail,
            });
        };

        match classes.first() {
            None => flag(0, Invariant::Sentinel, "table is empty".into()),
            Some(first) if !first.is_sentinel() => {
                flag(0, Invariant::Sentinel, format!("class 0 is {first:?}"));
            }
            Some(_) => {}
        }
        if classes.len() > config.max_classes {
            flag(
                config.max_classes,
                Invariant::ClassCount,
                format!(
                    "{} classes exceed the budget of {}",
                    classes.len(),
                    config.max_classes
                ),
            );
        }

        for (class, row) in classes.iter().enumerate().skip(1) {
            let size = row.size();
            let prev = (class >= 2).then(|| classes[class - 1].size());

            if let Some(prev) = prev {
                if size <= prev {
                    flag(
                        class,
                        Invariant::Monotonic,
                        format!("size {size} does not exceed previous {prev}"),
                    );
                }
            }
            if !config.is_aligned(size) {
                flag(
                    class,
                    Invariant::Alignment,
                    format!(
                        "size {size} is not a multiple of {}",
                        config.required_alignment(size)
                    ),
                );
            }

            let geometry = row
                .geometry(config.page_size)
                .filter(|span| span.objects >= 1);
            match geometry {
                None => flag(
                    class,
                    Invariant::SpanFitsObject,
                    format!(
                        "{} pages of {} bytes hold no {size}-byte object",
                        row.pages(),
                        config.page_size
                    ),
                ),
                Some(span) => {
                    if span.pages > config.max_pages_per_span {
                        flag(
                            class,
                            Invariant::SpanPageCap,
                            format!(
                                "{} pages exceed the cap of {}",
                                span.pages, config.max_pages_per_span
                            ),
                        );
                    }
                    if !span.waste_within(config.waste_ceiling_bps) {
                        flag(
                            class,
                            Invariant::FixedWaste,
                            format!(
                                "fixed waste {:.2}% exceeds {} bps",
                                span.waste_pct(),
                                config.waste_ceiling_bps
                            ),
                        );
                    }
                }
            }

            if let Some(prev) = prev.filter(|&prev| prev > 0 && size > prev) {
                let within = if prev < config.ladder_limit {
                    size <= prev.saturating_mul(2)
                } else {
                    growth_within(prev, size, config.growth_ceiling_bps)
                };
                if !within {
                    flag(
                        class,
                        Invariant::Growth,
                        format!(
                            "growth {:.2}% from {prev} to {size} exceeds {} bps",
                            growth_pct(prev, size),
                            config.growth_ceiling_bps
                        ),
                    );
                }
            }

            if row.transfer_batch == 0 || row.transfer_batch > config.batch_ceiling {
                flag(
                    class,
                    Invariant::BatchCeiling,
                    format!(
                        "batch {} outside 1..={}",
                        row.transfer_batch, config.batch_ceiling
                    ),
                );
            }
            let objects = geometry.map_or(0, |span| span.objects);
            if config.batch_bound == BatchBound::ObjectsPerSpan
                && geometry.is_some()
                && row.transfer_batch as usize > objects
            {
                flag(
                    class,
                    Invariant::BatchWithinSpan,
                    format!(
                        "batch {} exceeds {objects} objects per span",
                        row.transfer_batch
                    ),
                );
            }
            if row.cache_capacity < row.transfer_batch {
                flag(
                    class,
                    Invariant::CacheHoldsBatch,
                    format!(
                        "capacity {} below batch {}",
                        row.cache_capacity, row.transfer_batch
                    ),
                );
            }

            metrics.push(ClassMetrics {
                class,
                size_bytes: size,
                pages_per_span: row.pages(),
                objects_per_span: objects,
                transfer_batch: row.transfer_batch,
                cache_capacity: row.cache_capacity,
                fixed_waste_pct: row.geometry(config.page_size).map(|span| span.waste_pct()),
                growth_pct: prev.map_or(0.0, |prev| growth_pct(prev, size)),
            });
        }

        let last = classes.len().saturating_sub(1);
        match classes.get(1..).and_then(<[_]>::last) {
            Some(row) if row.size() == config.max_block_size => {}
            Some(row) => flag(
                last,
                Invariant::MaxBlockSize,
                format!(
                    "largest class is {} bytes, expected {}",
                    row.size(),
                    config.max_block_size
                ),
            ),
            None => flag(last, Invariant::MaxBlockSize, "table has no real classes".into()),
        }

        let report = ValidationReport::new(
            config.page_size,
            config.max_classes,
            classes.len(),
            metrics,
            violations,
        );
        trace_debug!(
            classes = report.class_count,
            violations = report.violations.len(),
            "validated size-class table"
        );
        report
    }
}

/// Validates `classes` against `config`.
#[must_use]
pub fn validate(classes: &[SizeClassDescriptor], config: &ClassTableConfig) -> ValidationReport {
    ClassTableValidator::new(config).validate(classes)
}
