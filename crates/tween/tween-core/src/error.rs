//! Error types for tween construction.
//!
//! Tick-time paths are infallible; everything that can be malformed is
//! rejected when the tween is built.

use serde::{Deserialize, Serialize};

use crate::value::ValueKind;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TweenError {
    /// Start and end values must share a kind to have an interpolation law.
    #[error("value kind mismatch: from is {from:?}, to is {to:?}")]
    KindMismatch { from: ValueKind, to: ValueKind },

    /// NaN or infinite duration can never terminate.
    #[error("duration must be finite, got {duration}")]
    NonFiniteDuration { duration: f32 },
}
