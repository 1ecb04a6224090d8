// Test intent: verifies two-sequence convolution against a direct sum, including buffer contracts and errors.
use ipfft::{Complex64, Convolver};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn reals(values: &[f64]) -> Vec<Complex64> {
    values.iter().map(|&v| Complex64::new(v, 0.0)).collect()
}

fn slow_convolve(x: &[Complex64], y: &[Complex64]) -> Vec<Complex64> {
    if x.is_empty() && y.is_empty() {
        return Vec::new();
    }
    let mut out = vec![Complex64::zero(); x.len() + y.len() - 1];
    for (i, a) in x.iter().enumerate() {
        for (j, b) in y.iter().enumerate() {
            out[i + j] = out[i + j] + *a * *b;
        }
    }
    out
}

fn assert_close(actual: &[Complex64], expected: &[Complex64], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!((a.re - e.re).abs() < tol, "index {}: {:?} vs {:?}", i, a, e);
        assert!((a.im - e.im).abs() < tol, "index {}: {:?} vs {:?}", i, a, e);
    }
}

#[test]
fn self_convolution_of_one_to_eight() {
    let conv = Convolver::<f64>::new();
    let x = reals(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    let out = conv.convolve(&x, &x).unwrap();
    let expected = reals(&[
        1.0, 4.0, 10.0, 20.0, 35.0, 56.0, 84.0, 120.0, 147.0, 164.0, 170.0, 164.0, 145.0, 112.0,
        64.0,
    ]);
    assert_close(&out, &expected, 1e-9);
}

#[test]
fn matches_direct_sum_for_random_lengths() {
    let conv = Convolver::<f64>::new();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let lx = rng.gen_range(1..100);
        let ly = rng.gen_range(1..100);
        let x: Vec<Complex64> = (0..lx)
            .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        let y: Vec<Complex64> = (0..ly)
            .map(|_| Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        let out = conv.convolve(&x, &y).unwrap();
        assert_close(&out, &slow_convolve(&x, &y), 1e-9);
    }
}

#[test]
fn convolve_leaves_inputs_untouched() {
    let conv = Convolver::<f64>::new();
    let x = reals(&[1.0, -1.0, 2.0]);
    let y = reals(&[0.5, 0.5]);
    let (x0, y0) = (x.clone(), y.clone());
    conv.convolve(&x, &y).unwrap();
    assert_eq!(x, x0);
    assert_eq!(y, y0);
}

#[test]
fn empty_operands() {
    let conv = Convolver::<f64>::new();
    assert!(conv.convolve(&[], &[]).unwrap().is_empty());
    let y = reals(&[1.0, 2.0, 3.0]);
    let out = conv.convolve(&[], &y).unwrap();
    assert_eq!(out, vec![Complex64::zero(); 2]);
}

#[test]
fn fast_convolve_zeroes_the_second_operand() {
    let conv = Convolver::<f64>::new();
    let mut x = reals(&[1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let mut y = reals(&[1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    conv.fast_convolve(&mut x, &mut y).unwrap();
    assert_close(&x, &reals(&[1.0, 3.0, 5.0, 3.0, 0.0, 0.0, 0.0, 0.0]), 1e-12);
    assert!(y.iter().all(|c| *c == Complex64::zero()));
}

#[test]
fn fast_convolve_is_circular_without_padding() {
    let conv = Convolver::<f64>::new();
    let mut x = reals(&[1.0, 1.0, 1.0, 1.0]);
    let mut y = reals(&[0.0, 1.0, 0.0, 0.0]);
    conv.fast_convolve(&mut x, &mut y).unwrap();
    assert_close(&x, &reals(&[1.0, 1.0, 1.0, 1.0]), 1e-12);
}

#[test]
fn fast_convolve_errors_leave_buffers_unchanged() {
    let conv = Convolver::<f64>::new();
    let mut x = reals(&[1.0; 4]);
    let mut y = reals(&[2.0; 8]);
    let err = conv.fast_convolve(&mut x, &mut y).unwrap_err();
    assert_eq!(err.parameter, "y");
    assert_eq!(err.size, 8);
    assert_eq!(x, reals(&[1.0; 4]));
    assert_eq!(y, reals(&[2.0; 8]));

    let mut x = reals(&[1.0; 6]);
    let mut y = reals(&[2.0; 6]);
    let err = conv.fast_convolve(&mut x, &mut y).unwrap_err();
    assert_eq!(err.parameter, "x");
    assert_eq!(err.size, 6);
    assert_eq!(x, reals(&[1.0; 6]));
    assert_eq!(y, reals(&[2.0; 6]));
}

#[test]
fn fast_convolve_accepts_two_empty_slices() {
    let conv = Convolver::<f64>::new();
    let mut x: Vec<Complex64> = Vec::new();
    let mut y: Vec<Complex64> = Vec::new();
    conv.fast_convolve(&mut x, &mut y).unwrap();
}
