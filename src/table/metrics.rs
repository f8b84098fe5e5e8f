//! Derived span metrics.
//!
//! Ceilings are compared with integer cross-multiplication so values that sit
//! exactly on a ceiling are decided exactly. Percentages are for reports only.

use core::cmp::Ordering;

use super::config::{BPS_SCALE, SPAN_METADATA_BYTES};

/// Geometry of one span carved into objects of a single size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanGeometry {
    /// Pages in the span.
    pub pages: usize,
    /// Bytes in the span.
    pub span_bytes: usize,
    /// Objects the span holds.
    pub objects: usize,
    /// Tail bytes left over plus the per-span metadata cost.
    pub waste_bytes: usize,
}

impl SpanGeometry {
    /// Computes the geometry of a `pages`-page span of `size`-byte objects.
    ///
    /// Returns `None` for zero sizes, empty spans and spans too large to address.
    #[must_use]
    pub const fn new(size: usize, pages: usize, page_size: usize) -> Option<Self> {
        if size == 0 || pages == 0 {
            return None;
        }
        let Some(span_bytes) = pages.checked_mul(page_size) else {
            return None;
        };
        let objects = span_bytes / size;
        Some(Self {
            pages,
            span_bytes,
            objects,
            waste_bytes: span_bytes - objects * size + SPAN_METADATA_BYTES,
        })
    }

    /// Fixed waste as a percentage of the span.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn waste_pct(&self) -> f64 {
        100.0 * self.waste_bytes as f64 / self.span_bytes as f64
    }

    /// Whether fixed waste stays within `ceiling_bps`.
    #[must_use]
    pub fn waste_within(&self, ceiling_bps: u32) -> bool {
        wide(self.waste_bytes) * u128::from(BPS_SCALE)
            <= u128::from(ceiling_bps) * wide(self.span_bytes)
    }

    /// Orders two spans by waste ratio.
    #[must_use]
    pub fn cmp_waste(&self, other: &Self) -> Ordering {
        (wide(self.waste_bytes) * wide(other.span_bytes))
            .cmp(&(wide(other.waste_bytes) * wide(self.span_bytes)))
    }

    /// Whether this span's waste ratio exceeds `best`'s by at most `tolerance_bps`.
    #[must_use]
    pub fn within_tolerance_of(&self, best: &Self, tolerance_bps: u32) -> bool {
        let scale = u128::from(BPS_SCALE);
        let lhs = wide(self.waste_bytes) * wide(best.span_bytes) * scale;
        let rhs = wide(best.waste_bytes) * wide(self.span_bytes) * scale
            + u128::from(tolerance_bps) * wide(self.span_bytes) * wide(best.span_bytes);
        lhs <= rhs
    }
}

/// Growth from `prev` to `size` as a percentage; zero when there is no predecessor.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn growth_pct(prev: usize, size: usize) -> f64 {
    if prev == 0 {
        0.0
    } else {
        100.0 * (size as f64 - prev as f64) / prev as f64
    }
}

/// Whether `size` grows on `prev` by at most `ceiling_bps`.
#[must_use]
pub fn growth_within(prev: usize, size: usize, ceiling_bps: u32) -> bool {
    size <= prev
        || wide(size - prev) * u128::from(BPS_SCALE) <= u128::from(ceiling_bps) * wide(prev)
}

/// Largest size that grows on `prev` by at most `ceiling_bps`.
#[must_use]
pub fn growth_limit(prev: usize, ceiling_bps: u32) -> usize {
    let step = wide(prev) * u128::from(ceiling_bps) / u128::from(BPS_SCALE);
    usize::try_from(step).map_or(usize::MAX, |step| prev.saturating_add(step))
}

#[inline]
fn wide(value: usize) -> u128 {
    value as u128
}
