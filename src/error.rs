//! The error returned for every shape violation in this crate.

use std::borrow::Cow;
use std::fmt;

/// A buffer or parameter had an unusable size.
///
/// Carries the name of the offending parameter, the shape it was expected to
/// have and the value actually received. Every operation validates its inputs
/// before touching them, so when this error is returned all buffers are
/// exactly as the caller passed them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSizeError {
    /// Name of the parameter that failed validation.
    pub parameter: Cow<'static, str>,
    /// Human-readable requirement, e.g. `"a power of 2"`.
    pub requirement: Cow<'static, str>,
    /// The size that was actually supplied.
    pub size: usize,
}

impl InputSizeError {
    pub fn new(
        parameter: impl Into<Cow<'static, str>>,
        requirement: impl Into<Cow<'static, str>>,
        size: usize,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            requirement: requirement.into(),
            size,
        }
    }

    pub(crate) fn not_power_of_two(parameter: &'static str, size: usize) -> Self {
        Self::new(parameter, "a power of 2", size)
    }
}

impl fmt::Display for InputSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Size of {} must be {}, is: {}",
            self.parameter, self.requirement, self.size
        )
    }
}

impl std::error::Error for InputSizeError {}

/// Fail with [`InputSizeError`] unless `size` is a power of two.
pub(crate) fn ensure_power_of_two(parameter: &'static str, size: usize) -> Result<(), InputSizeError> {
    if crate::util::is_power_of_two(size) {
        Ok(())
    } else {
        Err(InputSizeError::not_power_of_two(parameter, size))
    }
}
