//! Power-of-two arithmetic and zero-padding helpers.

use crate::num::{Complex, Float};

/// Returns `true` for 1, 2, 4, 8, ... and `false` otherwise (including 0).
#[inline]
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// Smallest power of two `>= n`. `0` maps to `1`.
#[inline]
pub fn next_power_of_two(n: usize) -> usize {
    n.next_power_of_two()
}

/// Copy `x` into a new zero-filled buffer of length `n`.
///
/// If `x` is longer than `n` the copy is truncated. `x` itself is never
/// modified. This allocates; keep it out of hot loops.
pub fn zero_pad<T: Float>(x: &[Complex<T>], n: usize) -> Vec<Complex<T>> {
    let mut out = vec![Complex::zero(); n];
    let len = x.len().min(n);
    out[..len].copy_from_slice(&x[..len]);
    out
}

/// [`zero_pad`] to the next power of two at or above `x.len()`.
pub fn zero_pad_to_next_power_of_two<T: Float>(x: &[Complex<T>]) -> Vec<Complex<T>> {
    zero_pad(x, next_power_of_two(x.len()))
}
