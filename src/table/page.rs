//! Page and alignment arithmetic.

/// Rounds `value` down to a multiple of `step`.
#[inline]
pub const fn align_down(value: usize, step: usize) -> usize {
    if step == 0 {
        value
    } else {
        value / step * step
    }
}

/// Largest power of two not above `value`; zero maps to zero.
#[inline]
pub const fn prev_power_of_two(value: usize) -> usize {
    if value == 0 {
        0
    } else {
        1 << (usize::BITS - 1 - value.leading_zeros())
    }
}

/// Pages needed to hold one object of `size` bytes.
#[inline]
pub const fn pages_for(size: usize, page_size: usize) -> usize {
    size.div_ceil(page_size)
}
