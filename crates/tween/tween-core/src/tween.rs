//! The tween primitive: one time-bounded interpolation of a single value.
//!
//! A tween owns nothing but a write capability (the setter closure); the
//! caller guarantees the target outlives the tween, or kills the tween on
//! target teardown.

use serde::{Deserialize, Serialize};

use crate::ease::Easing;
use crate::error::TweenError;
use crate::interp::lerp_value;
use crate::value::Value;

/// What happens when elapsed time reaches the duration.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoopMode {
    /// Clamp to the end value, fire completion, and finish.
    #[default]
    Once,
    /// Wrap back to the start and keep going.
    Loop,
    /// Reverse direction at each end.
    PingPong,
}

/// Whether the scheduler's global time scale applies to this tween.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeScaleMode {
    #[default]
    Scaled,
    Unscaled,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Status {
    Running,
    Completed,
    Killed,
}

type Setter = Box<dyn FnMut(&Value)>;
type CompleteFn = Box<dyn FnOnce()>;

/// A single animated value transition.
///
/// Invariants: `elapsed` stays in `[0, duration]`; pre-easing progress stays
/// in `[0, 1]`; finishing writes exactly the end value and fires the
/// completion callback exactly once.
pub struct Tween {
    from: Value,
    to: Value,
    duration: f32,
    elapsed: f32,
    easing: Easing,
    time_scale: f32,
    scale_mode: TimeScaleMode,
    loop_mode: LoopMode,
    /// Ping-pong direction (true = towards `to`).
    forward: bool,
    paused: bool,
    status: Status,
    setter: Option<Setter>,
    on_complete: Option<CompleteFn>,
}

impl std::fmt::Debug for Tween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("easing", &self.easing)
            .field("time_scale", &self.time_scale)
            .field("scale_mode", &self.scale_mode)
            .field("loop_mode", &self.loop_mode)
            .field("paused", &self.paused)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Tween {
    /// Build a tween from `from` to `to` over `duration` seconds.
    ///
    /// `duration <= 0` is accepted as an instant-set request: the first
    /// advance writes the end value and completes. Mismatched value kinds
    /// and non-finite durations are configuration errors.
    pub fn new(
        from: Value,
        to: Value,
        duration: f32,
        setter: impl FnMut(&Value) + 'static,
    ) -> Result<Self, TweenError> {
        if from.kind() != to.kind() {
            return Err(TweenError::KindMismatch {
                from: from.kind(),
                to: to.kind(),
            });
        }
        if !duration.is_finite() {
            return Err(TweenError::NonFiniteDuration { duration });
        }
        Ok(Self::raw(from, to, duration, Some(Box::new(setter))))
    }

    /// A setter-less tween that only consumes time. Used for delays between
    /// sequence steps and as the carrier for appended callbacks.
    pub fn interval(duration: f32) -> Self {
        let duration = if duration.is_finite() { duration } else { 0.0 };
        Self::raw(Value::Scalar(0.0), Value::Scalar(1.0), duration, None)
    }

    fn raw(from: Value, to: Value, duration: f32, setter: Option<Setter>) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing: Easing::Linear,
            time_scale: 1.0,
            scale_mode: TimeScaleMode::Scaled,
            loop_mode: LoopMode::Once,
            forward: true,
            paused: false,
            status: Status::Running,
            setter,
            on_complete: None,
        }
    }

    // -- Builder methods --

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Per-tween playback rate. Non-positive values freeze the tween.
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn with_scale_mode(mut self, mode: TimeScaleMode) -> Self {
        self.scale_mode = mode;
        self
    }

    pub fn with_loop(mut self, mode: LoopMode) -> Self {
        self.loop_mode = mode;
        self
    }

    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn paused(mut self) -> Self {
        self.paused = true;
        self
    }

    // -- Accessors --

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn scale_mode(&self) -> TimeScaleMode {
        self.scale_mode
    }

    /// Normalized progress in [0, 1] before easing.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            if self.is_complete() {
                1.0
            } else {
                0.0
            }
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.status == Status::Completed
    }

    #[inline]
    pub fn is_killed(&self) -> bool {
        self.status == Status::Killed
    }

    /// Completed or killed; either way it no longer advances.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status != Status::Running
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Effective span of this tween in caller time, for composite duration
    /// accounting. Looping tweens never finish on their own.
    pub(crate) fn span(&self) -> f32 {
        match self.loop_mode {
            LoopMode::Once => self.duration / self.time_scale.abs().max(1e-6),
            LoopMode::Loop | LoopMode::PingPong => f32::INFINITY,
        }
    }

    /// Advance by `dt` seconds of caller time, write the interpolated value,
    /// and return the unconsumed remainder of `dt`.
    ///
    /// Each call applies exactly its own `dt` once; total progress is the sum
    /// of the dts seen. The remainder is non-zero only on the call that
    /// completes the tween, so composites can carry it into their next entry.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.is_finished() {
            return dt;
        }
        if self.paused {
            return 0.0;
        }
        if self.duration <= 0.0 {
            self.finish();
            return dt;
        }
        if self.time_scale <= 0.0 {
            // Frozen; the whole tick is consumed without progress.
            return 0.0;
        }
        let scaled = dt * self.time_scale;

        if self.loop_mode == LoopMode::Once {
            let remaining = self.duration - self.elapsed;
            if scaled >= remaining {
                self.elapsed = self.duration;
                self.finish();
                return (scaled - remaining) / self.time_scale;
            }
            self.elapsed += scaled;
            self.apply_at(self.elapsed / self.duration);
            return 0.0;
        }

        let mut e = self.elapsed + scaled;
        match self.loop_mode {
            LoopMode::Loop => {
                self.elapsed = e % self.duration;
                self.apply_at(self.elapsed / self.duration);
            }
            LoopMode::PingPong => {
                while e >= self.duration {
                    e -= self.duration;
                    self.forward = !self.forward;
                }
                self.elapsed = e;
                let t = if self.forward {
                    e / self.duration
                } else {
                    1.0 - e / self.duration
                };
                self.apply_at(t);
            }
            LoopMode::Once => unreachable!(),
        }
        0.0
    }

    /// Stop in place without touching the value. Idempotent.
    pub fn kill(&mut self) {
        if self.is_finished() {
            return;
        }
        self.status = Status::Killed;
    }

    /// Jump to the end value and fire completion synchronously. Idempotent.
    pub fn complete(&mut self) {
        if self.is_finished() {
            return;
        }
        self.elapsed = self.duration;
        self.finish();
    }

    fn finish(&mut self) {
        let end = self.to.clone();
        self.write(&end);
        self.status = Status::Completed;
        if let Some(cb) = self.on_complete.take() {
            cb();
        }
    }

    fn apply_at(&mut self, t: f32) {
        let eased = self.easing.apply(t.clamp(0.0, 1.0));
        let value = lerp_value(&self.from, &self.to, eased);
        self.write(&value);
    }

    #[inline]
    fn write(&mut self, value: &Value) {
        if let Some(setter) = self.setter.as_mut() {
            setter(value);
        }
    }
}
