//! Closed-form transforms for the smallest lengths.
//!
//! These skip the permutation and table lookup entirely. They evaluate the
//! same butterflies as the general path, so results agree up to floating-point
//! reordering.

use crate::num::{Complex, Float};

#[inline(always)]
pub fn fft2<T: Float>(input: &mut [Complex<T>]) {
    debug_assert_eq!(input.len(), 2);
    let a = input[0];
    let b = input[1];
    input[0] = a.add(b);
    input[1] = a.sub(b);
}

#[inline(always)]
pub fn fft4<T: Float>(input: &mut [Complex<T>]) {
    debug_assert_eq!(input.len(), 4);
    let a0 = input[0];
    let a1 = input[1];
    let a2 = input[2];
    let a3 = input[3];
    // first stage on the bit-reversed pairs (0,2) and (1,3)
    let even0 = a0.add(a2);
    let even1 = a0.sub(a2);
    let odd0 = a1.add(a3);
    let odd1 = a1.sub(a3);
    // W4^1 = -i
    let t1 = Complex::new(odd1.im, -odd1.re);
    input[0] = even0.add(odd0);
    input[2] = even0.sub(odd0);
    input[1] = even1.add(t1);
    input[3] = even1.sub(t1);
}
