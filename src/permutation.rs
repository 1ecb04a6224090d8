//! In-place bit-reversal permutation.
//!
//! The reordering is driven by a precomputed swap table: entry `i` names the
//! index to exchange with `i`. Walking the table once in ascending order
//! (skipping the fixed points `0` and `n - 1`) leaves the buffer in
//! bit-reversed order, swapping every transposed pair exactly once and using no
//! scratch memory besides the table itself.

/// The raw bit-reversal table: `index[i]` is `i` with its `log2(n)` low bits
/// reversed.
///
/// Built by doubling. Starting from `[0]` at size 1, every step shifts the
/// existing entries left by one bit and appends each shifted entry plus one.
pub fn bit_reversal_index(n: usize) -> Vec<usize> {
    let mut index = vec![0usize; n];
    let mut half = 1;
    while half < n {
        for i in 0..half {
            index[i] <<= 1;
            index[i + half] = index[i] + 1;
        }
        half <<= 1;
    }
    index
}

/// Turn a raw bit-reversal table into a swap table.
///
/// Using the raw table directly as a swap list exchanges every transposed pair
/// twice. For each position the chain of already-visited targets is followed
/// until it reaches a position not yet processed; that is the element's
/// current home.
pub fn swap_table(mut index: Vec<usize>) -> Vec<usize> {
    let n = index.len();
    for i in 1..n.saturating_sub(1) {
        let mut ind = index[i];
        while ind < i {
            ind = index[ind];
        }
        index[i] = ind;
    }
    index
}

/// Build the swap table for length `n`.
pub fn permutation_table(n: usize) -> Vec<usize> {
    swap_table(bit_reversal_index(n))
}

/// Reorder `data` into bit-reversed order using a table from
/// [`permutation_table`] built for `data.len()`.
#[inline]
pub fn permute<E>(data: &mut [E], table: &[usize]) {
    debug_assert_eq!(data.len(), table.len());
    let n = data.len();
    for i in 1..n.saturating_sub(1) {
        data.swap(i, table[i]);
    }
}
