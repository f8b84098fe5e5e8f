use core::fmt;

use serde::Serialize;

use crate::error::TableError;

/// A named table invariant.
///
/// Declaration order is the order violations of one class are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Invariant {
    /// The configuration itself is well formed.
    Parameters,
    /// Class 0 is the all-zero sentinel.
    Sentinel,
    /// The table fits the class budget, sentinel included.
    ClassCount,
    /// The last class is exactly the maximum block size.
    MaxBlockSize,
    /// Sizes strictly increase from class 1 on.
    Monotonic,
    /// Every size is a positive multiple of its required alignment.
    Alignment,
    /// A span holds at least one object.
    SpanFitsObject,
    /// Spans stay within the page cap.
    SpanPageCap,
    /// Fixed waste stays within the waste ceiling.
    FixedWaste,
    /// Growth between neighbours stays within the growth ceiling.
    Growth,
    /// Batches are non-zero and within the batch ceiling.
    BatchCeiling,
    /// Batches never exceed the objects one span holds.
    BatchWithinSpan,
    /// Per-core caches hold at least one batch.
    CacheHoldsBatch,
}

impl Invariant {
    /// Every invariant, in report order.
    pub const ALL: [Self; 13] = [
        Self::Parameters,
        Self::Sentinel,
        Self::ClassCount,
        Self::MaxBlockSize,
        Self::Monotonic,
        Self::Alignment,
        Self::SpanFitsObject,
        Self::SpanPageCap,
        Self::FixedWaste,
        Self::Growth,
        Self::BatchCeiling,
        Self::BatchWithinSpan,
        Self::CacheHoldsBatch,
    ];

    /// Stable snake-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Parameters => "parameters",
            Self::Sentinel => "sentinel",
            Self::ClassCount => "class_count",
            Self::MaxBlockSize => "max_block_size",
            Self::Monotonic => "monotonic",
            Self::Alignment => "alignment",
            Self::SpanFitsObject => "span_fits_object",
            Self::SpanPageCap => "span_page_cap",
            Self::FixedWaste => "fixed_waste",
            Self::Growth => "growth",
            Self::BatchCeiling => "batch_ceiling",
            Self::BatchWithinSpan => "batch_within_span",
            Self::CacheHoldsBatch => "cache_holds_batch",
        }
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One broken invariant at one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The offending class. Whole-table checks report the class where the
    /// table goes wrong, and malformed parameters report class 0.
    pub class: usize,
    /// The invariant broken.
    pub invariant: Invariant,
    /// What was found.
    pub detail: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}: {}: {}", self.class, self.invariant, self.detail)
    }
}

/// Outcome of one invariant across the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvariantOutcome {
    /// The invariant.
    pub invariant: Invariant,
    /// Number of violations.
    pub violations: usize,
    /// First class that broke it.
    pub first_class: Option<usize>,
}

impl InvariantOutcome {
    /// Whether the invariant held everywhere.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.violations == 0
    }
}

/// Metrics re-derived for one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    /// Class id.
    pub class: usize,
    /// Object size in bytes.
    pub size_bytes: usize,
    /// Pages per span.
    pub pages_per_span: usize,
    /// Objects per span.
    pub objects_per_span: usize,
    /// Transfer batch.
    pub transfer_batch: u32,
    /// Per-core cache capacity.
    pub cache_capacity: u32,
    /// Fixed waste as a percentage of the span; `None` without a span.
    pub fixed_waste_pct: Option<f64>,
    /// Growth over the previous class as a percentage.
    pub growth_pct: f64,
}

/// Everything a validation pass found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Page size validated against.
    pub page_size: usize,
    /// Class budget validated against.
    pub max_classes: usize,
    /// Rows in the table, sentinel included.
    pub class_count: usize,
    /// Per-invariant outcomes, in [`Invariant::ALL`] order.
    pub outcomes: Vec<InvariantOutcome>,
    /// Per-class metrics for every real class.
    pub classes: Vec<ClassMetrics>,
    /// Every violation, ordered by class then invariant.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub(crate) fn new(
        page_size: usize,
        max_classes: usize,
        class_count: usize,
        classes: Vec<ClassMetrics>,
        mut violations: Vec<Violation>,
    ) -> Self {
        violations.sort_by_key(|v| (v.class, v.invariant));
        let outcomes = Invariant::ALL
            .into_iter()
            .map(|invariant| {
                let mut hits = violations.iter().filter(|v| v.invariant == invariant);
                let first_class = hits.next().map(|v| v.class);
                InvariantOutcome {
                    invariant,
                    violations: first_class.map_or(0, |_| 1 + hits.count()),
                    first_class,
                }
            })
            .collect();
        Self {
            page_size,
            max_classes,
            class_count,
            outcomes,
            classes,
            violations,
        }
    }

    /// Whether every invariant held.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether `invariant` was broken anywhere.
    #[must_use]
    pub fn failed(&self, invariant: Invariant) -> bool {
        self.violations.iter().any(|v| v.invariant == invariant)
    }

    /// The outcome for `invariant`.
    #[must_use]
    pub fn outcome(&self, invariant: Invariant) -> Option<&InvariantOutcome> {
        self.outcomes.iter().find(|o| o.invariant == invariant)
    }

    /// The first violation in class order.
    #[must_use]
    pub fn first_failure(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// Violations of one invariant.
    pub fn violations_of(&self, invariant: Invariant) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.invariant == invariant)
    }

    /// Largest fixed waste across classes, in percent.
    #[must_use]
    pub fn max_waste_pct(&self) -> f64 {
        self.classes
            .iter()
            .filter_map(|c| c.fixed_waste_pct)
            .fold(0.0, f64::max)
    }

    /// Largest class-to-class growth, in percent.
    #[must_use]
    pub fn max_growth_pct(&self) -> f64 {
        self.classes.iter().map(|c| c.growth_pct).fold(0.0, f64::max)
    }

    /// Fails with the first violation, if any.
    ///
    /// # Errors
    ///
    /// [`TableError::InvariantViolation`] carrying the first violation.
    pub fn check(&self) -> Result<(), TableError> {
        match self.first_failure() {
            Some(violation) => Err(violation.clone().into()),
            None => Ok(()),
        }
    }

    /// Consumes the report, failing with the first violation, if any.
    ///
    /// # Errors
    ///
    /// [`TableError::InvariantViolation`] carrying the first violation.
    pub fn into_result(self) -> Result<(), TableError> {
        self.check()
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
