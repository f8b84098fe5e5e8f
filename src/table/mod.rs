//! Size-class tables and the parameters they are built against.
//!
//! A [`Table`] is an immutable, ordered array of [`SizeClassDescriptor`]s
//! indexed by class id. Class 0 is the all-zero sentinel; every real class
//! follows in strictly increasing size order, ending at the configured
//! maximum block size.

pub mod config;
pub mod descriptor;
pub mod metrics;
pub mod page;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use zerocopy::AsBytes;

pub use config::{
    AlignmentMode, BatchBound, ClassTableConfig, ConfigKey, PageSize, SizeRegime,
    SPAN_METADATA_BYTES,
};
pub use descriptor::SizeClassDescriptor;
pub use metrics::SpanGeometry;

/// An immutable size-class table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    classes: Box<[SizeClassDescriptor]>,
}

impl Table {
    /// Wraps rows as a table. No invariant is checked here; run the rows
    /// through the validator before trusting them.
    #[must_use]
    pub fn from_classes(classes: impl Into<Box<[SizeClassDescriptor]>>) -> Self {
        Self {
            classes: classes.into(),
        }
    }

    /// Number of rows, sentinel included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the table has no rows at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The row for `class`.
    #[inline]
    #[must_use]
    pub fn get(&self, class: usize) -> Option<&SizeClassDescriptor> {
        self.classes.get(class)
    }

    /// Iterates rows in class order.
    pub fn iter(&self) -> core::slice::Iter<'_, SizeClassDescriptor> {
        self.classes.iter()
    }

    /// All rows.
    #[inline]
    #[must_use]
    pub fn classes(&self) -> &[SizeClassDescriptor] {
        &self.classes
    }

    /// The table's byte image, four native-endian `u32`s per row.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.classes.as_bytes()
    }

    /// Size of the largest class, or zero for a table without real classes.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.classes.last().map_or(0, SizeClassDescriptor::size)
    }

    /// Smallest class whose size is at least `request`.
    ///
    /// Zero-byte requests map to class 1. Requests above the largest class
    /// have no class.
    #[must_use]
    pub fn class_index(&self, request: usize) -> Option<usize> {
        let real = self.classes.get(1..)?;
        let offset = real.partition_point(|class| class.size() < request);
        (offset < real.len()).then_some(offset + 1)
    }
}

impl AsRef<[SizeClassDescriptor]> for Table {
    fn as_ref(&self) -> &[SizeClassDescriptor] {
        &self.classes
    }
}

impl From<Vec<SizeClassDescriptor>> for Table {
    fn from(classes: Vec<SizeClassDescriptor>) -> Self {
        Self::from_classes(classes)
    }
}

impl From<&[SizeClassDescriptor]> for Table {
    fn from(classes: &[SizeClassDescriptor]) -> Self {
        Self::from_classes(classes)
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a SizeClassDescriptor;
    type IntoIter = core::slice::Iter<'a, SizeClassDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}
