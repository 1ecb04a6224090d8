//! Window functions and power spectrum for complex buffers.

use crate::num::{Complex, Float};

/// Symmetric window shapes, evaluated with an `N - 1` denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    #[default]
    Rectangular,
    Hann,
    Hamming,
    Blackman,
}

impl Window {
    /// Weight of sample `i` in a window of length `len`.
    ///
    /// Windows of length 0 or 1 have unit weight.
    pub fn coefficient<T: Float>(self, i: usize, len: usize) -> T {
        if len <= 1 {
            return T::one();
        }
        let phase = 2.0 * core::f64::consts::PI * i as f64 / (len - 1) as f64;
        let w = match self {
            Window::Rectangular => 1.0,
            Window::Hann => 0.5 * (1.0 - phase.cos()),
            Window::Hamming => 0.54 - 0.46 * phase.cos(),
            Window::Blackman => 0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos(),
        };
        T::from_f64(w)
    }

    /// All `len` weights of this window.
    pub fn coefficients<T: Float>(self, len: usize) -> Vec<T> {
        (0..len).map(|i| self.coefficient(i, len)).collect()
    }
}

/// Scale both parts of every sample by the window weight, in place.
pub fn apply_window<T: Float>(data: &mut [Complex<T>], window: Window) {
    if window == Window::Rectangular {
        return;
    }
    let len = data.len();
    for (i, c) in data.iter_mut().enumerate() {
        *c = c.scale(window.coefficient(i, len));
    }
}

/// `|X_k|²` for every bin of a spectrum.
pub fn power_spectrum<T: Float>(spectrum: &[Complex<T>]) -> Vec<T> {
    spectrum.iter().map(|c| c.norm_sqr()).collect()
}
