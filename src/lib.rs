//! # ipfft - in-place power-of-two FFT and FFT-based convolution
//!
//! A small transform library built around one primitive: an iterative radix-2
//! FFT that works inside the caller's buffer. Twiddle factors and the
//! bit-reversal swap table for each length are computed once, cached, and
//! shared across threads.
//!
//! ## Features
//!
//! - **In-place transforms**: [`Radix2Fft`] never allocates once a length is prepared
//! - **Shared table cache**: [`TwiddleCache`] is safe to use from many threads
//! - **Linear convolution**: [`Convolver`] handles two sequences, many sequences
//!   of arbitrary length, or many equal-width blocks packed into one buffer
//! - **Concurrent merging**: block convolution can fan out across worker threads
//!
//! ## Cargo Features
//!
//! - `parallel` (default): run concurrent block merges on the Rayon pool
//!   (without it, scoped std threads are used)
//! - `verbose-logging`: emit `log` records for table builds and merge plans
//!
//! ## Quick start
//!
//! ```
//! use ipfft::{Complex64, Convolver, FftImpl, Radix2Fft};
//!
//! let fft = Radix2Fft::<f64>::new();
//! let mut data: Vec<Complex64> = (1..=8).map(|i| Complex64::new(i as f64, 0.0)).collect();
//! fft.fft(&mut data).unwrap();
//! fft.ifft(&mut data).unwrap();
//! assert!((data[2].re - 3.0).abs() < 1e-12);
//!
//! let conv = Convolver::<f64>::new();
//! let x = [Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)];
//! let y = conv.convolve(&x, &x).unwrap();
//! assert_eq!(y.len(), 3);
//! assert!((y[1].re - 2.0).abs() < 1e-12);
//! ```
//!
//! ## Worker threads
//!
//! Concurrent convolution uses [`set_parallel_threads`] when set, otherwise
//! the `IPFFT_THREADS` environment variable, otherwise the number of logical
//! CPUs.
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#[cfg(feature = "verbose-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "verbose-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

#[cfg(feature = "verbose-logging")]
macro_rules! trace_log {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "verbose-logging"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {{
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

pub(crate) use debug_log;
pub(crate) use trace_log;

/// Scalar and complex number types
pub mod num;

/// Error type for invalid buffer sizes
pub mod error;

/// Power-of-two and zero-padding helpers
pub mod util;

/// Bit-reversal permutation tables
pub mod permutation;

/// Shared twiddle and permutation table cache
pub mod cache;

/// Closed-form transforms for lengths 2 and 4
pub mod fft_kernels;

pub mod fft;

/// Worker-count configuration for concurrent convolution
pub mod parallel;

/// FFT-based linear convolution
pub mod convolve;

/// Window functions for signal processing
pub mod window;

pub use cache::{FftTables, TwiddleCache};
pub use convolve::Convolver;
pub use error::InputSizeError;
pub use fft::{FftImpl, Radix2Fft};
pub use num::{Complex, Complex32, Complex64, Float};
pub use parallel::{parallel_threads, set_parallel_threads};
pub use util::{is_power_of_two, next_power_of_two, zero_pad, zero_pad_to_next_power_of_two};
pub use window::{apply_window, power_spectrum, Window};
