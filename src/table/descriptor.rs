//! Size-class table rows.

use serde::{Deserialize, Serialize};
use zerocopy::AsBytes;

use super::metrics::SpanGeometry;

/// One row of a size-class table.
///
/// Rows are stored as four `u32`s with no padding, so a whole table has a
/// stable byte image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, AsBytes, Serialize, Deserialize)]
#[repr(C)]
pub struct SizeClassDescriptor {
    /// Object size in bytes.
    pub size_bytes: u32,
    /// Pages in each span carved for this class.
    pub pages_per_span: u32,
    /// Objects moved per transfer between the central list and a cache.
    pub transfer_batch: u32,
    /// Objects a per-core cache may hold for this class.
    pub cache_capacity: u32,
}

impl SizeClassDescriptor {
    /// The class 0 row.
    pub const SENTINEL: Self = Self::new(0, 0, 0, 0);

    /// Creates a row.
    #[must_use]
    pub const fn new(
        size_bytes: u32,
        pages_per_span: u32,
        transfer_batch: u32,
        cache_capacity: u32,
    ) -> Self {
        Self {
            size_bytes,
            pages_per_span,
            transfer_batch,
            cache_capacity,
        }
    }

    /// Whether this is the all-zero sentinel.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        self.size_bytes == 0
            && self.pages_per_span == 0
            && self.transfer_batch == 0
            && self.cache_capacity == 0
    }

    /// Object size in bytes.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size_bytes as usize
    }

    /// Pages per span.
    #[inline]
    #[must_use]
    pub const fn pages(&self) -> usize {
        self.pages_per_span as usize
    }

    /// Objects a span holds on pages of `page_size` bytes.
    #[must_use]
    pub const fn objects_per_span(&self, page_size: usize) -> usize {
        match self.geometry(page_size) {
            Some(span) => span.objects,
            None => 0,
        }
    }

    /// Span geometry on pages of `page_size` bytes.
    #[must_use]
    pub const fn geometry(&self, page_size: usize) -> Option<SpanGeometry> {
        SpanGeometry::new(self.size(), self.pages(), page_size)
    }
}

/// Narrows a value already bounded by a checked configuration.
#[inline]
pub(crate) fn narrow(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
