//! Benchmarks for `ipfft`; see `benches/`.

use ipfft::Complex64;

/// Deterministic test signal of length `n`.
pub fn signal(n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|i| Complex64::new((i as f64 * 0.37).sin(), (i as f64 * 0.11).cos()))
        .collect()
}

/// `blocks` two-tap sequences, each padded to `block_len`.
pub fn packed_blocks(blocks: usize, block_len: usize) -> Vec<Complex64> {
    let mut data = vec![Complex64::zero(); blocks * block_len];
    for (b, block) in data.chunks_exact_mut(block_len).enumerate() {
        block[0] = Complex64::one();
        block[1] = Complex64::new(1.0 / (b + 1) as f64, 0.0);
    }
    data
}
