//! Tween core (engine-agnostic)
//!
//! A time-driven value interpolation core: single tweens, parallel groups,
//! ordered sequences, and a scheduler that advances everything once per host
//! tick. The host supplies the clock (`Scheduler::tick(dt)`) and each tween
//! carries a setter closure that writes the interpolated value back into
//! host-owned state.

pub mod config;
pub mod ease;
pub mod error;
pub mod events;
pub mod group;
pub mod ids;
pub mod interp;
pub mod scheduler;
pub mod sequence;
pub mod tween;
pub mod value;

// Re-exports for consumers (adapters)
pub use config::Config;
pub use ease::Easing;
pub use error::TweenError;
pub use events::TweenEvent;
pub use group::Group;
pub use ids::{IdAllocator, TweenId};
pub use interp::lerp_value;
pub use scheduler::{Entry, Scheduler};
pub use sequence::Sequence;
pub use tween::{LoopMode, TimeScaleMode, Tween};
pub use value::{Value, ValueKind};
