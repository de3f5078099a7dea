//! Gradient-state error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradientError {
    #[error("invalid color {0:?} (expected #rrggbb)")]
    InvalidColor(String),

    #[error("angle {0} out of range (0..=360)")]
    AngleOutOfRange(i64),

    #[error("stop list full (max {max})")]
    CapacityExceeded { max: usize },

    #[error("stop list at minimum (min {min})")]
    CapacityUnderflow { min: usize },

    #[error("stop index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl GradientError {
    /// Capacity errors are silent no-ops; nothing to show the user.
    pub fn is_capacity(&self) -> bool {
        matches!(
            self,
            GradientError::CapacityExceeded { .. } | GradientError::CapacityUnderflow { .. }
        )
    }
}

pub type GradientResult<T> = Result<T, GradientError>;
