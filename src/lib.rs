//! # `sizeclass` - Size-Class Tables for Segregated Allocators
//!
//! Generates and certifies the size-class table a segregated-storage
//! allocator rounds requests up to. Each real class names an object size, the
//! span (run of contiguous pages) that objects of that size are carved from,
//! how many objects move per transfer between the central free list and a
//! per-core cache, and how many a per-core cache may hold.
//!
//! ## Guarantees
//!
//! Every table handed out for use has passed the validator:
//!
//! - Class 0 is an all-zero sentinel and the table fits its class budget.
//! - Sizes strictly increase, respect the ABI alignment, and end exactly at
//!   the maximum block size.
//! - Every span holds at least one object, stays within the page cap, and
//!   wastes no more than the fixed-waste ceiling (tail bytes plus span
//!   metadata).
//! - Neighbouring classes grow by no more than the growth ceiling.
//! - Transfer batches and cache capacities are within their bounds.
//!
//! Ceilings are compared with integer arithmetic in basis points, so a table
//! sitting exactly on a ceiling is decided exactly.
//!
//! ## Architecture
//!
//! 1. **Tables** ([`table`]): descriptors, derived span metrics and
//!    configuration parameters.
//! 2. **Generation** ([`generate`]): greedy forward construction over a
//!    coarsening size grid.
//! 3. **Validation** ([`validate`]): an independent pass that re-derives every
//!    metric and reports each broken invariant by name.
//! 4. **Configuration sets** ([`config_set`]): the closed set of
//!    page-size/alignment pairs, their lifecycle, and one-time process-wide
//!    activation.
//!
//! ## Example
//!
//! ```rust
//! use sizeclass::{generate, validate, ClassTableConfig, ConfigKey};
//!
//! let key: ConfigKey = "8k-align8".parse().unwrap();
//! let config = ClassTableConfig::builtin(key);
//! let table = generate(&config).unwrap();
//!
//! let report = validate(table.classes(), &config);
//! assert!(report.passed());
//! assert_eq!(table.max_size(), 256 * 1024);
//! assert_eq!(table.class_index(100).map(|c| table.classes()[c].size_bytes), Some(104));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[macro_use]
mod trace;

pub mod config_set;
pub mod error;
pub mod generate;
pub mod table;
pub mod validate;

pub use config_set::{ActiveTable, AssembledSet, ConfigState, ConfigurationSet, TableSource};
pub use error::{Ceiling, Conflict, Infeasible, TableError};
pub use generate::{generate, ClassTableGenerator, Tuning};
pub use table::{
    AlignmentMode, BatchBound, ClassTableConfig, ConfigKey, PageSize, SizeClassDescriptor,
    SizeRegime, Table,
};
pub use validate::{
    validate, ClassTableValidator, Invariant, TableListing, ValidationReport, Violation,
};

// Descriptors are stored back to back with no padding, so a table's byte
// image is exactly sixteen bytes per class.
const _: () = {
    use core::mem;

    assert!(mem::size_of::<SizeClassDescriptor>() == 16);
    assert!(mem::align_of::<SizeClassDescriptor>() == 4);
};
