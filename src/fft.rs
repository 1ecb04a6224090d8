//! In-place radix-2 Fast Fourier Transform.
//!
//! [`Radix2Fft`] implements the iterative
//! [Cooley–Tukey](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm)
//! decimation-in-time transform for power-of-two lengths. The buffer is first
//! put into bit-reversed order with a precomputed swap table, then `log2(n)`
//! butterfly stages merge sub-transforms of doubling size. Everything happens
//! inside the caller's buffer: once the tables for a length are cached, a
//! transform performs no heap allocation.
//!
//! Butterfly diagram for `n = 8`, after the permutation (`Wm^k` is
//! `exp(-2πi k / m)`):
//!
//! ```text
//!   stage 1 (half=1)     stage 2 (half=2)       stage 3 (half=4)
//! x0 ─┬─ x0 + W2^0·x1    x0 ─┬─ x0 + W4^0·x2    x0 ─┬─ x0 + W8^0·x4
//! x1 ─┴─ x0 - W2^0·x1    x1 ─┼─ x1 + W4^1·x3    x1 ─┼─ x1 + W8^1·x5
//! x2 ─┬─ ...             x2 ─┼─ x0 - W4^0·x2    x2 ─┼─ x2 + W8^2·x6
//! x3 ─┴─                 x3 ─┴─ x1 - W4^1·x3    x3 ─┼─ x3 + W8^3·x7
//! x4 ─┬─                 x4 ─┬─ ...             x4 ─┼─ x0 - W8^0·x4
//! x5 ─┴─                 x5 ─┤                  x5 ─┼─ x1 - W8^1·x5
//! x6 ─┬─                 x6 ─┤                  x6 ─┼─ x2 - W8^2·x6
//! x7 ─┴─                 x7 ─┴─                 x7 ─┴─ x3 - W8^3·x7
//! ```
//!
//! Twiddles for every stage come from the single length-`n` table: `Wm^k` is
//! entry `k · n/m`.

use std::sync::Arc;

use crate::cache::TwiddleCache;
use crate::error::{ensure_power_of_two, InputSizeError};
use crate::fft_kernels::{fft2, fft4};
use crate::num::{Complex, Float};
use crate::permutation::permute;

pub use crate::num::{Complex32, Complex64};

/// An in-place complex FFT.
///
/// Implementations must leave the buffer untouched when they return an error.
pub trait FftImpl<T: Float>: Send + Sync {
    /// Forward transform, in place.
    fn fft(&self, input: &mut [Complex<T>]) -> Result<(), InputSizeError>;
    /// Inverse transform including the `1/n` normalisation, in place.
    fn ifft(&self, input: &mut [Complex<T>]) -> Result<(), InputSizeError>;

    /// Precompute whatever a transform of length `n` needs.
    fn prepare(&self, n: usize) -> Result<(), InputSizeError> {
        ensure_power_of_two("transform length", n)
    }

    /// Forward transform of a copy of `input`.
    fn fft_vec(&self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>, InputSizeError> {
        let mut out = input.to_vec();
        self.fft(&mut out)?;
        Ok(out)
    }

    /// Inverse transform of a copy of `input`.
    fn ifft_vec(&self, input: &[Complex<T>]) -> Result<Vec<Complex<T>>, InputSizeError> {
        let mut out = input.to_vec();
        self.ifft(&mut out)?;
        Ok(out)
    }
}

/// Iterative radix-2 FFT backed by a shared [`TwiddleCache`].
///
/// Cloning is cheap and clones share the cache.
#[derive(Debug, Clone)]
pub struct Radix2Fft<T: Float> {
    cache: Arc<TwiddleCache<T>>,
}

impl<T: Float> Default for Radix2Fft<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Radix2Fft<T> {
    /// A transform with its own, initially empty, cache.
    pub fn new() -> Self {
        Self::with_cache(Arc::new(TwiddleCache::new()))
    }

    /// A transform drawing its tables from an existing cache.
    pub fn with_cache(cache: Arc<TwiddleCache<T>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<TwiddleCache<T>> {
        &self.cache
    }
}

impl<T: Float> FftImpl<T> for Radix2Fft<T> {
    fn prepare(&self, n: usize) -> Result<(), InputSizeError> {
        self.cache.prepare(n)
    }

    fn fft(&self, input: &mut [Complex<T>]) -> Result<(), InputSizeError> {
        let n = input.len();
        ensure_power_of_two("buffer", n)?;
        match n {
            1 => return Ok(()),
            2 => {
                fft2(input);
                return Ok(());
            }
            4 => {
                fft4(input);
                return Ok(());
            }
            _ => {}
        }
        let tables = self.cache.tables(n)?;
        permute(input, tables.permutation());
        butterfly_stages(input, tables.twiddles());
        Ok(())
    }

    /// Runs the forward machinery on the index-reversed buffer: reversing
    /// `x[1..n]` maps `x[j]` to `x[-j mod n]`, which turns the forward
    /// transform into `n` times the inverse.
    fn ifft(&self, input: &mut [Complex<T>]) -> Result<(), InputSizeError> {
        let n = input.len();
        ensure_power_of_two("buffer", n)?;
        input[1..].reverse();
        self.fft(input)?;
        let scale = T::one() / T::from_f64(n as f64);
        for c in input.iter_mut() {
            *c = c.scale(scale);
        }
        Ok(())
    }
}

/// The `log2(n)` merge stages of a permuted buffer.
///
/// At each stage every group of `2·half` elements combines its lower and upper
/// halves with one complex multiplication per butterfly.
#[inline]
fn butterfly_stages<T: Float>(data: &mut [Complex<T>], twiddles: &[Complex<T>]) {
    let n = data.len();
    let mut half = 1;
    while half < n {
        let stride = n / (half << 1);
        for group in data.chunks_exact_mut(half << 1) {
            let (lo, hi) = group.split_at_mut(half);
            for (k, (a, b)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
                let f = twiddles[k * stride].mul(*b);
                *b = a.sub(f);
                *a = a.add(f);
            }
        }
        half <<= 1;
    }
}
