//! FFT-based linear convolution.
//!
//! Every routine here reduces to one primitive: transform two equal-length
//! buffers, multiply the spectra into the first, zero the second and
//! inverse-transform the first. On top of that sit
//!
//! * [`Convolver::convolve`]: allocating convolution of two arbitrary slices,
//! * [`Convolver::fast_convolve`]: the allocation-free primitive for
//!   pre-padded buffers,
//! * [`Convolver::multi_convolve`]: many sequences of arbitrary lengths, merged
//!   smallest-first through length buckets,
//! * [`Convolver::fast_multi_convolve`]: many equal-width blocks packed into one
//!   buffer, merged level by level in place, optionally across threads.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use crate::error::{ensure_power_of_two, InputSizeError};
use crate::fft::{FftImpl, Radix2Fft};
use crate::num::{Complex, Float};
use crate::parallel::{items_per_task, parallel_threads};
use crate::util::{next_power_of_two, zero_pad};

/// Convolution engine driving an [`FftImpl`].
///
/// The default engine uses [`Radix2Fft`], so all lengths it meets are cached
/// in that transform's [`TwiddleCache`](crate::cache::TwiddleCache).
#[derive(Debug, Clone)]
pub struct Convolver<T: Float, F: FftImpl<T> = Radix2Fft<T>> {
    fft: F,
    _marker: PhantomData<T>,
}

impl<T: Float> Default for Convolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Convolver<T> {
    pub fn new() -> Self {
        Self::with_fft(Radix2Fft::new())
    }
}

impl<T: Float, F: FftImpl<T>> Convolver<T, F> {
    pub fn with_fft(fft: F) -> Self {
        Self {
            fft,
            _marker: PhantomData,
        }
    }

    /// The transform used for every convolution.
    pub fn fft(&self) -> &F {
        &self.fft
    }

    /// Precompute the tables for buffers of length `n`.
    pub fn prepare(&self, n: usize) -> Result<(), InputSizeError> {
        self.fft.prepare(n)
    }

    /// Linear convolution of `x` and `y`, of length `x.len() + y.len() - 1`.
    ///
    /// Both inputs are copied into zero-padded power-of-two buffers, so they
    /// are left untouched. Two empty inputs give an empty result.
    pub fn convolve(
        &self,
        x: &[Complex<T>],
        y: &[Complex<T>],
    ) -> Result<Vec<Complex<T>>, InputSizeError> {
        if x.is_empty() && y.is_empty() {
            return Ok(Vec::new());
        }
        let len = x.len() + y.len() - 1;
        let n = next_power_of_two(len);
        let mut xp = zero_pad(x, n);
        let mut yp = zero_pad(y, n);
        self.fast_convolve(&mut xp, &mut yp)?;
        xp.truncate(len);
        Ok(xp)
    }

    /// Convolve `x` with `y` in place, storing the result in `x`.
    ///
    /// **Consumes and zeroes `y`**: on success every element of `y` is zero.
    ///
    /// Performs no allocation. The product is circular over `x.len()`, so for
    /// a linear convolution both operands must already be zero-padded such
    /// that their combined content length minus one fits in `x.len()`
    /// (padding each to twice its content is always enough).
    ///
    /// Both slices must have the same power-of-two length; two empty slices
    /// are accepted and left as they are. On error neither slice is modified.
    pub fn fast_convolve(
        &self,
        x: &mut [Complex<T>],
        y: &mut [Complex<T>],
    ) -> Result<(), InputSizeError> {
        if x.is_empty() && y.is_empty() {
            return Ok(());
        }
        if x.len() != y.len() {
            return Err(InputSizeError::new(
                "y",
                format!("equal to the length of x ({})", x.len()),
                y.len(),
            ));
        }
        ensure_power_of_two("x", x.len())?;
        self.convolve_pair(x, y)
    }

    /// Convolve an arbitrary list of sequences.
    ///
    /// Each sequence is padded to the next power of two above twice its
    /// length and filed under that length. The smallest bucket is then merged
    /// pairwise (an odd entry out is carried along unchanged) and its results
    /// move up one bucket, until everything sits in a single bucket. One or
    /// two entries left there are finished directly; three or more are packed
    /// with identity blocks and handed to [`Self::fast_multi_convolve`].
    ///
    /// The result has length `1 + Σ(len - 1)`; no sequences (or a
    /// non-positive result length) give an empty result.
    pub fn multi_convolve<S: AsRef<[Complex<T>]>>(
        &self,
        sequences: &[S],
    ) -> Result<Vec<Complex<T>>, InputSizeError> {
        if sequences.is_empty() {
            return Ok(Vec::new());
        }
        let mut plan = ConvolutionPlan::new();
        let mut result_len: isize = 1;
        for seq in sequences {
            let seq = seq.as_ref();
            plan.insert(zero_pad(seq, next_power_of_two(2 * seq.len())));
            result_len += seq.len() as isize - 1;
        }
        if result_len <= 0 {
            return Ok(Vec::new());
        }
        let result_len = result_len as usize;
        crate::debug_log!(
            "multi_convolve: {} sequences in {} buckets, result length {}",
            sequences.len(),
            plan.bucket_count(),
            result_len
        );

        while plan.bucket_count() > 1 {
            if let Some((len, bucket)) = plan.pop_smallest() {
                self.merge_bucket(&mut plan, len, bucket)?;
            }
        }
        let bucket = plan.pop_smallest().map(|(_, b)| b).unwrap_or_default();
        self.convolve_bucket(bucket, result_len)
    }

    /// Convolve `data`, a concatenation of equal-width zero-padded blocks,
    /// down to a single sequence stored at the front of `data`.
    ///
    /// `block_len` and the number of blocks `data.len() / block_len` must both
    /// be powers of two, and `data.len()` must be a multiple of `block_len`.
    /// Every block must be padded to at least twice its content; the number
    /// of blocks can be rounded up with identity blocks (`[1, 0, 0, ...]`).
    ///
    /// At each level adjacent pairs of width-`n` blocks are convolved in
    /// place, the right block of each pair being **consumed and zeroed**, so
    /// afterwards the result occupies the leading positions and everything
    /// after it is zero. With `use_concurrency` the pairs of one level are
    /// split into contiguous ranges over at most [`parallel_threads`]
    /// tasks, and the level completes before the next one starts.
    ///
    /// Performs no allocation when `use_concurrency` is `false` and the tables
    /// for every level width are already prepared. On error `data` is left
    /// untouched.
    ///
    /// [`parallel_threads`]: crate::parallel::parallel_threads
    pub fn fast_multi_convolve(
        &self,
        data: &mut [Complex<T>],
        block_len: usize,
        use_concurrency: bool,
    ) -> Result<(), InputSizeError> {
        let total = data.len();
        ensure_power_of_two("block_len", block_len)?;
        if total % block_len != 0 {
            return Err(InputSizeError::new(
                "data",
                format!("a multiple of block_len ({})", block_len),
                total,
            ));
        }
        ensure_power_of_two("number of blocks", total / block_len)?;

        let mut n = block_len;
        while n < total {
            let pairs = total / (n << 1);
            if use_concurrency && pairs > 1 {
                self.merge_level_concurrent(data, n)?;
            } else {
                crate::trace_log!("fast_multi_convolve: width {} x {} pairs", n, pairs);
                self.merge_level(data, n)?;
            }
            n <<= 1;
        }
        Ok(())
    }

    /// Forward-transform both operands, multiply into `x`, zero `y`,
    /// inverse-transform `x`. Lengths must already be validated.
    fn convolve_pair(
        &self,
        x: &mut [Complex<T>],
        y: &mut [Complex<T>],
    ) -> Result<(), InputSizeError> {
        self.fft.fft(x)?;
        self.fft.fft(y)?;
        for (a, b) in x.iter_mut().zip(y.iter_mut()) {
            *a = a.mul(*b);
            *b = Complex::zero();
        }
        self.fft.ifft(x)
    }

    fn merge_bucket(
        &self,
        plan: &mut ConvolutionPlan<T>,
        len: usize,
        bucket: Vec<Vec<Complex<T>>>,
    ) -> Result<(), InputSizeError> {
        crate::trace_log!("multi_convolve: merging {} entries of length {}", bucket.len(), len);
        let mut entries = bucket.into_iter();
        while let Some(mut first) = entries.next() {
            if let Some(mut second) = entries.next() {
                self.convolve_pair(&mut first, &mut second)?;
            }
            first.resize(len << 1, Complex::zero());
            plan.insert(first);
        }
        Ok(())
    }

    /// Finish a plan that has collapsed to one bucket of equal-length entries.
    fn convolve_bucket(
        &self,
        bucket: Vec<Vec<Complex<T>>>,
        result_len: usize,
    ) -> Result<Vec<Complex<T>>, InputSizeError> {
        match bucket.len() {
            0 => Ok(Vec::new()),
            1 | 2 => {
                let mut entries = bucket.into_iter();
                let mut first = entries.next().unwrap_or_default();
                if let Some(mut second) = entries.next() {
                    self.convolve_pair(&mut first, &mut second)?;
                }
                first.truncate(result_len);
                Ok(first)
            }
            count => {
                let block = bucket[0].len();
                let blocks = next_power_of_two(count);
                crate::debug_log!(
                    "multi_convolve: packing {} entries of length {} into {} blocks",
                    count,
                    block,
                    blocks
                );
                let mut packed = vec![Complex::zero(); blocks * block];
                for (dst, src) in packed.chunks_exact_mut(block).zip(bucket.iter()) {
                    dst.copy_from_slice(src);
                }
                drop(bucket);
                for identity in packed.chunks_exact_mut(block).skip(count) {
                    identity[0] = Complex::one();
                }
                self.fast_multi_convolve(&mut packed, block, false)?;
                packed.truncate(result_len);
                Ok(packed)
            }
        }
    }

    fn merge_level(&self, data: &mut [Complex<T>], n: usize) -> Result<(), InputSizeError> {
        for pair in data.chunks_exact_mut(n << 1) {
            let (x, y) = pair.split_at_mut(n);
            self.convolve_pair(x, y)?;
        }
        Ok(())
    }

    #[cfg(feature = "parallel")]
    fn merge_level_concurrent(
        &self,
        data: &mut [Complex<T>],
        n: usize,
    ) -> Result<(), InputSizeError> {
        use rayon::prelude::*;

        let pairs = data.len() / (n << 1);
        let per_task = items_per_task(pairs, parallel_threads());
        crate::debug_log!(
            "fast_multi_convolve: width {} x {} pairs over {} tasks",
            n,
            pairs,
            pairs.div_ceil(per_task)
        );
        data.par_chunks_mut(per_task * (n << 1))
            .try_for_each(|range| self.merge_level(range, n))
    }

    #[cfg(not(feature = "parallel"))]
    fn merge_level_concurrent(
        &self,
        data: &mut [Complex<T>],
        n: usize,
    ) -> Result<(), InputSizeError> {
        let pairs = data.len() / (n << 1);
        let per_task = items_per_task(pairs, parallel_threads());
        crate::debug_log!(
            "fast_multi_convolve: width {} x {} pairs over {} threads",
            n,
            pairs,
            pairs.div_ceil(per_task)
        );
        std::thread::scope(|scope| {
            let handles: Vec<_> = data
                .chunks_mut(per_task * (n << 1))
                .map(|range| scope.spawn(move || self.merge_level(range, n)))
                .collect();
            handles.into_iter().try_for_each(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
        })
    }
}

/// Sequences awaiting convolution, bucketed by padded length.
///
/// Only lives for the duration of one [`Convolver::multi_convolve`] call. The
/// ordered map keeps the smallest length first.
struct ConvolutionPlan<T: Float> {
    buckets: BTreeMap<usize, Vec<Vec<Complex<T>>>>,
}

impl<T: Float> ConvolutionPlan<T> {
    fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    fn insert(&mut self, padded: Vec<Complex<T>>) {
        self.buckets.entry(padded.len()).or_default().push(padded);
    }

    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn pop_smallest(&mut self) -> Option<(usize, Vec<Vec<Complex<T>>>)> {
        self.buckets.pop_first()
    }
}
