//! Per-length twiddle and permutation tables.
//!
//! A [`TwiddleCache`] maps a transform length to an immutable [`FftTables`]
//! entry. Entries are built once, handed out as `Arc`s and never evicted, so
//! any number of threads can transform buffers of the same length against one
//! shared table.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hashbrown::HashMap;

use crate::error::{ensure_power_of_two, InputSizeError};
use crate::num::{Complex, Float};
use crate::permutation::permutation_table;

/// Precomputed data for transforms of one length `n`.
#[derive(Debug)]
pub struct FftTables<T: Float> {
    n: usize,
    /// `exp(-2πi k / n)` for `k = 0..n/2`.
    twiddles: Box<[Complex<T>]>,
    /// Swap table driving the in-place bit-reversal, see [`crate::permutation`].
    permutation: Box<[usize]>,
}

impl<T: Float> FftTables<T> {
    fn build(n: usize) -> Self {
        let half = n / 2;
        let mut twiddles = Vec::with_capacity(half);
        for k in 0..half {
            let angle = -2.0 * core::f64::consts::PI * k as f64 / n as f64;
            let (sin, cos) = angle.sin_cos();
            twiddles.push(Complex::new(T::from_f64(cos), T::from_f64(sin)));
        }
        Self {
            n,
            twiddles: twiddles.into_boxed_slice(),
            permutation: permutation_table(n).into_boxed_slice(),
        }
    }

    /// Transform length these tables serve.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn twiddles(&self) -> &[Complex<T>] {
        &self.twiddles
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }
}

/// Thread-safe get-or-build store of [`FftTables`], keyed by length.
///
/// Readers only take the read lock. The first caller for a new length takes
/// the write lock, checks again whether another thread got there first, and
/// only then builds the tables; concurrent [`prepare`](Self::prepare) calls for
/// the same length therefore build it exactly once.
#[derive(Debug)]
pub struct TwiddleCache<T: Float> {
    tables: RwLock<HashMap<usize, Arc<FftTables<T>>>>,
}

impl<T: Float> Default for TwiddleCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> TwiddleCache<T> {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    // Entries are only inserted fully built, so a poisoned lock still guards a
    // consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<usize, Arc<FftTables<T>>>> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<usize, Arc<FftTables<T>>>> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Build the tables for length `n` unless they already exist.
    ///
    /// Returns [`InputSizeError`] if `n` is not a power of two.
    pub fn prepare(&self, n: usize) -> Result<(), InputSizeError> {
        self.tables(n).map(|_| ())
    }

    /// Fetch the tables for length `n`, building them on first use.
    pub fn tables(&self, n: usize) -> Result<Arc<FftTables<T>>, InputSizeError> {
        ensure_power_of_two("transform length", n)?;
        if let Some(tables) = self.read().get(&n) {
            return Ok(Arc::clone(tables));
        }
        let mut map = self.write();
        if let Some(tables) = map.get(&n) {
            return Ok(Arc::clone(tables));
        }
        crate::debug_log!("building twiddle and permutation tables for n={}", n);
        let built = Arc::new(FftTables::build(n));
        map.insert(n, Arc::clone(&built));
        Ok(built)
    }

    pub fn contains(&self, n: usize) -> bool {
        self.read().contains_key(&n)
    }

    /// Number of distinct lengths prepared so far.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twiddles_are_roots_of_unity() {
        let cache = TwiddleCache::<f64>::new();
        let tables = cache.tables(16).unwrap();
        assert_eq!(tables.n(), 16);
        assert_eq!(tables.twiddles().len(), 8);
        assert_eq!(tables.permutation().len(), 16);
        for (k, w) in tables.twiddles().iter().enumerate() {
            let angle = -2.0 * core::f64::consts::PI * k as f64 / 16.0;
            assert!((w.re - angle.cos()).abs() < 1e-15);
            assert!((w.im - angle.sin()).abs() < 1e-15);
        }
        assert_eq!(tables.twiddles()[0], Complex::new(1.0, 0.0));
    }

    #[test]
    fn length_one_has_no_twiddles() {
        let cache = TwiddleCache::<f32>::new();
        let tables = cache.tables(1).unwrap();
        assert_eq!(tables.n(), 1);
        assert!(tables.twiddles().is_empty());
        assert_eq!(tables.permutation(), &[0]);
    }

    #[test]
    fn prepare_is_idempotent() {
        let cache = TwiddleCache::<f64>::new();
        assert!(cache.is_empty());
        cache.prepare(64).unwrap();
        let first = cache.tables(64).unwrap();
        cache.prepare(64).unwrap();
        let second = cache.tables(64).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(64));
        assert!(!cache.contains(32));
    }

    #[test]
    fn rejects_non_power_of_two() {
        let cache = TwiddleCache::<f64>::new();
        for n in [0usize, 3, 6, 12, 100] {
            let err = cache.prepare(n).unwrap_err();
            assert_eq!(err.size, n);
        }
        assert!(cache.is_empty());
    }
}
