//! Table configuration: page geometry, alignment, and the ceilings every
//! table is held to.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::page::prev_power_of_two;
use crate::error::TableError;

/// Per-span bookkeeping cost charged against every span's fixed waste.
pub const SPAN_METADATA_BYTES: usize = 48;

/// Basis points in one whole (ceilings are expressed in 1/100 of a percent).
pub const BPS_SCALE: u64 = 10_000;

/// Page sizes a table can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PageSize {
    /// 4 KiB pages (small-but-slow builds).
    K4,
    /// 8 KiB pages (the default).
    K8,
    /// 32 KiB pages.
    K32,
    /// 256 KiB pages.
    K256,
}

impl PageSize {
    /// Every supported page size, smallest first.
    pub const ALL: [Self; 4] = [Self::K4, Self::K8, Self::K32, Self::K256];

    /// Base-two logarithm of the page size.
    #[must_use]
    pub const fn shift(self) -> u32 {
        match self {
            Self::K4 => 12,
            Self::K8 => 13,
            Self::K32 => 15,
            Self::K256 => 18,
        }
    }

    /// Page size in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        1 << self.shift()
    }

    /// The size regime this page size belongs to.
    #[must_use]
    pub const fn regime(self) -> SizeRegime {
        match self {
            Self::K4 => SizeRegime::Small,
            _ => SizeRegime::Standard,
        }
    }

    /// Looks up the page size with the given byte count.
    #[must_use]
    pub fn from_bytes(bytes: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.bytes() == bytes)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}k", self.bytes() >> 10)
    }
}

impl FromStr for PageSize {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim_end_matches(['k', 'K']);
        let kib: usize = digits.parse().map_err(|_| TableError::InvalidParameter {
            name: "page_size",
            value: 0,
        })?;
        Self::from_bytes(kib << 10).ok_or(TableError::InvalidParameter {
            name: "page_size",
            value: kib << 10,
        })
    }
}

/// Default alignment of `new` for the build a table targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlignmentMode {
    /// Default new alignment of at most 8 bytes.
    Align8,
    /// Default new alignment above 8 bytes (16).
    Align16,
}

impl AlignmentMode {
    /// Both modes.
    pub const ALL: [Self; 2] = [Self::Align8, Self::Align16];

    /// The ABI alignment in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Align8 => 8,
            Self::Align16 => 16,
        }
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "align{}", self.bytes())
    }
}

impl FromStr for AlignmentMode {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "align8" | "8" => Ok(Self::Align8),
            "align16" | "16" => Ok(Self::Align16),
            _ => Err(TableError::InvalidParameter {
                name: "abi_alignment",
                value: s.trim_start_matches("align").parse().unwrap_or(0),
            }),
        }
    }
}

/// Groups of page sizes whose tables must agree on the maximum block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeRegime {
    /// 4 KiB pages: tables top out at 8 KiB.
    Small,
    /// Every larger page size: tables top out at 256 KiB.
    Standard,
}

impl SizeRegime {
    /// The maximum block size builtin configurations of this regime use.
    #[must_use]
    pub const fn max_block_size(self) -> usize {
        match self {
            Self::Small => 8 << 10,
            Self::Standard => 256 << 10,
        }
    }
}

impl fmt::Display for SizeRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Small => "small",
            Self::Standard => "standard",
        })
    }
}

/// Identifies one configuration: a page size paired with an alignment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigKey {
    /// Page size.
    pub page: PageSize,
    /// ABI alignment mode.
    pub alignment: AlignmentMode,
}

impl ConfigKey {
    /// All eight supported keys.
    pub const ALL: [Self; 8] = [
        Self::new(PageSize::K4, AlignmentMode::Align8),
        Self::new(PageSize::K4, AlignmentMode::Align16),
        Self::new(PageSize::K8, AlignmentMode::Align8),
        Self::new(PageSize::K8, AlignmentMode::Align16),
        Self::new(PageSize::K32, AlignmentMode::Align8),
        Self::new(PageSize::K32, AlignmentMode::Align16),
        Self::new(PageSize::K256, AlignmentMode::Align8),
        Self::new(PageSize::K256, AlignmentMode::Align16),
    ];

    /// Creates a key.
    #[must_use]
    pub const fn new(page: PageSize, alignment: AlignmentMode) -> Self {
        Self { page, alignment }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.page, self.alignment)
    }
}

impl FromStr for ConfigKey {
    type Err = TableError;

    /// Parses keys of the form `8k-align16`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (page, alignment) = s.split_once('-').ok_or(TableError::InvalidParameter {
            name: "config_key",
            value: s.len(),
        })?;
        Ok(Self::new(page.parse()?, alignment.parse()?))
    }
}

/// How `transfer_batch` is bounded beyond the batch ceiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchBound {
    /// A batch never exceeds the objects one span holds.
    #[default]
    ObjectsPerSpan,
    /// Only the batch ceiling applies; the central free list refills a
    /// transfer from as many spans as it needs.
    Ceiling,
}

/// Everything generation and validation need to know about a target build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassTableConfig {
    /// Page size in bytes.
    pub page_size: usize,
    /// Size of the largest class.
    pub max_block_size: usize,
    /// Every class size is a multiple of this.
    pub min_alignment: usize,
    /// Alignment guaranteed to any class at least this large.
    pub abi_alignment: usize,
    /// Table length limit, sentinel included.
    pub max_classes: usize,
    /// Largest span, in pages.
    pub max_pages_per_span: usize,
    /// Fixed-waste ceiling in basis points.
    pub waste_ceiling_bps: u32,
    /// Class-to-class growth ceiling in basis points.
    pub growth_ceiling_bps: u32,
    /// Largest transfer batch.
    pub batch_ceiling: u32,
    /// Below this size consecutive classes may double instead of obeying the
    /// growth ceiling.
    pub ladder_limit: usize,
    /// Whether batches are bounded by span capacity.
    pub batch_bound: BatchBound,
}

impl ClassTableConfig {
    /// Parameters that certify the shipped table for `key`.
    #[must_use]
    pub const fn builtin(key: ConfigKey) -> Self {
        let (max_classes, max_pages_per_span, waste_ceiling_bps, growth_ceiling_bps) =
            match key.page {
                PageSize::K4 => (46, 8, 800, 3400),
                PageSize::K8 => (89, 32, 900, 2500),
                PageSize::K32 => (89, 8, 700, 2550),
                PageSize::K256 => (89, 4, 500, 2510),
            };
        Self {
            page_size: key.page.bytes(),
            max_block_size: key.page.regime().max_block_size(),
            min_alignment: 8,
            abi_alignment: key.alignment.bytes(),
            max_classes,
            max_pages_per_span,
            waste_ceiling_bps,
            growth_ceiling_bps,
            batch_ceiling: 32,
            ladder_limit: 64,
            batch_bound: BatchBound::Ceiling,
        }
    }

    /// Replaces the class budget.
    #[must_use]
    pub const fn with_max_classes(mut self, max_classes: usize) -> Self {
        self.max_classes = max_classes;
        self
    }

    /// Replaces the fixed-waste ceiling.
    #[must_use]
    pub const fn with_waste_ceiling(mut self, bps: u32) -> Self {
        self.waste_ceiling_bps = bps;
        self
    }

    /// Replaces the growth ceiling.
    #[must_use]
    pub const fn with_growth_ceiling(mut self, bps: u32) -> Self {
        self.growth_ceiling_bps = bps;
        self
    }

    /// Replaces the batch bound.
    #[must_use]
    pub const fn with_batch_bound(mut self, bound: BatchBound) -> Self {
        self.batch_bound = bound;
        self
    }

    /// Alignment a class of `size` bytes must carry:
    /// `min(abi_alignment, largest power of two <= size)`, never below
    /// `min_alignment`.
    #[must_use]
    pub const fn required_alignment(&self, size: usize) -> usize {
        let natural = prev_power_of_two(size);
        let capped = if natural < self.abi_alignment {
            natural
        } else {
            self.abi_alignment
        };
        if capped < self.min_alignment {
            self.min_alignment
        } else {
            capped
        }
    }

    /// Whether `size` is a legal class size.
    #[must_use]
    pub const fn is_aligned(&self, size: usize) -> bool {
        size != 0 && size % self.required_alignment(size) == 0
    }

    /// Rejects malformed parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidParameter`] naming the first bad field.
    pub fn check(&self) -> Result<(), TableError> {
        let invalid = |name, value| Err(TableError::InvalidParameter { name, value });

        if !self.page_size.is_power_of_two() {
            return invalid("page_size", self.page_size);
        }
        if !self.min_alignment.is_power_of_two() {
            return invalid("min_alignment", self.min_alignment);
        }
        if !self.abi_alignment.is_power_of_two() || self.abi_alignment < self.min_alignment {
            return invalid("abi_alignment", self.abi_alignment);
        }
        if self.max_block_size < self.min_alignment
            || !self.is_aligned(self.max_block_size)
            || u32::try_from(self.max_block_size).is_err()
        {
            return invalid("max_block_size", self.max_block_size);
        }
        if self.max_classes < 2 {
            return invalid("max_classes", self.max_classes);
        }
        if self.max_pages_per_span == 0
            || u32::try_from(self.max_pages_per_span).is_err()
            || self
                .max_pages_per_span
                .checked_mul(self.page_size)
                .map_or(true, |bytes| bytes < self.max_block_size)
        {
            return invalid("max_pages_per_span", self.max_pages_per_span);
        }
        if self.waste_ceiling_bps == 0 {
            return invalid("waste_ceiling_bps", 0);
        }
        if self.growth_ceiling_bps == 0 {
            return invalid("growth_ceiling_bps", 0);
        }
        if self.batch_ceiling == 0 {
            return invalid("batch_ceiling", 0);
        }
        Ok(())
    }
}
