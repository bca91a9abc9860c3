//! Numeric and Sequence Helpers

use serde::{Deserialize, Serialize};

/// Repetition factor used by [`zoom_array`] callers that have no preference
pub const DEFAULT_ZOOM_FACTOR: usize = 2;

/// An integer or a float
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
}

impl Number {
    /// Value as `f64`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Largest integer value not greater than `n`
#[must_use]
pub fn floor(n: f64) -> f64 {
    n.floor()
}

/// Sum of integers and floats as `f64`; the empty list sums to `0.0`
#[must_use]
pub fn sum_mixed_list(mixed: &[Number]) -> f64 {
    mixed.iter().map(|n| n.as_f64()).sum()
}

/// Repeat every item `factor` times in place
///
/// `zoom_array(&[1, 2], 2)` is `[1, 1, 2, 2]`. A factor of zero yields an
/// empty vector.
#[must_use]
pub fn zoom_array<T: Clone>(items: &[T], factor: usize) -> Vec<T> {
    items
        .iter()
        .flat_map(|item| std::iter::repeat(item).take(factor).cloned())
        .collect()
}
