//! Worker-count configuration for concurrent convolution.
//!
//! Resolution order: [`set_parallel_threads`] override, then the
//! `IPFFT_THREADS` environment variable (read once), then the number of
//! logical CPUs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Environment variable consulted for the default worker count.
pub const THREADS_ENV: &str = "IPFFT_THREADS";

/// `0` means no override.
static PARALLEL_THREAD_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
static DEFAULT_THREADS: OnceLock<usize> = OnceLock::new();

/// Override the number of workers used by concurrent convolution. `0`
/// reverts to the environment variable or CPU count.
pub fn set_parallel_threads(threads: usize) {
    PARALLEL_THREAD_OVERRIDE.store(threads, Ordering::Relaxed);
}

fn default_threads() -> usize {
    *DEFAULT_THREADS.get_or_init(|| {
        std::env::var(THREADS_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&t| t > 0)
            .unwrap_or_else(|| num_cpus::get().max(1))
    })
}

/// Maximum number of concurrent tasks per merge level.
pub fn parallel_threads() -> usize {
    match PARALLEL_THREAD_OVERRIDE.load(Ordering::Relaxed) {
        0 => default_threads(),
        t => t,
    }
}

/// Split `items` into at most `tasks` contiguous ranges, returning how many
/// items each range holds (the last one may be shorter).
#[inline]
pub(crate) fn items_per_task(items: usize, tasks: usize) -> usize {
    let tasks = tasks.clamp(1, items.max(1));
    items.div_ceil(tasks).max(1)
}
