// Test intent: verifies table caching is idempotent, thread-safe and scoped per cache instance.
use ipfft::{Complex64, FftImpl, Radix2Fft, TwiddleCache};
use std::sync::Arc;
use std::thread;

#[test]
fn repeated_prepare_returns_the_same_tables() {
    let cache = TwiddleCache::<f64>::new();
    cache.prepare(64).unwrap();
    let first = cache.tables(64).unwrap();
    cache.prepare(64).unwrap();
    let second = cache.tables(64).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
    assert_eq!(first.n(), 64);
    assert_eq!(first.twiddles().len(), 32);
    assert_eq!(first.permutation().len(), 64);
}

#[test]
fn twiddles_are_roots_of_unity() {
    let cache = TwiddleCache::<f64>::new();
    let tables = cache.tables(16).unwrap();
    for (k, w) in tables.twiddles().iter().enumerate() {
        let angle = -2.0 * std::f64::consts::PI * k as f64 / 16.0;
        assert!((w.re - angle.cos()).abs() < 1e-15);
        assert!((w.im - angle.sin()).abs() < 1e-15);
    }
}

#[test]
fn concurrent_prepare_builds_once() {
    let cache = Arc::new(TwiddleCache::<f64>::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.tables(4096).unwrap())
        })
        .collect();
    let tables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for t in &tables[1..] {
        assert!(Arc::ptr_eq(&tables[0], t));
    }
    assert_eq!(cache.len(), 1);
}

#[test]
fn concurrent_transforms_share_one_cache() {
    let fft = Radix2Fft::<f64>::new();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let fft = fft.clone();
            thread::spawn(move || {
                let n = 1usize << (6 + t % 2);
                let input: Vec<Complex64> =
                    (0..n).map(|i| Complex64::new(i as f64, t as f64)).collect();
                let mut data = input.clone();
                fft.fft(&mut data).unwrap();
                fft.ifft(&mut data).unwrap();
                data.iter()
                    .zip(input.iter())
                    .all(|(a, b)| (a.re - b.re).abs() < 1e-9 && (a.im - b.im).abs() < 1e-9)
            })
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap());
    }
    assert!(fft.cache().contains(64));
    assert!(fft.cache().contains(128));
}

#[test]
fn separate_instances_do_not_share_tables() {
    let a = Radix2Fft::<f64>::new();
    let b = Radix2Fft::<f64>::new();
    a.prepare(256).unwrap();
    assert!(a.cache().contains(256));
    assert!(!b.cache().contains(256));

    let shared = Arc::new(TwiddleCache::new());
    let c = Radix2Fft::<f64>::with_cache(Arc::clone(&shared));
    let d = Radix2Fft::<f64>::with_cache(Arc::clone(&shared));
    c.prepare(512).unwrap();
    assert!(d.cache().contains(512));
}

#[test]
fn rejects_non_power_of_two_lengths() {
    let cache = TwiddleCache::<f32>::new();
    for n in [0usize, 3, 10, 1000] {
        let err = cache.prepare(n).unwrap_err();
        assert_eq!(err.size, n);
    }
    assert!(cache.is_empty());
}
