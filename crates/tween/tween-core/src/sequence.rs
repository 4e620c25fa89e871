//! Ordered composite: steps run strictly one after another, each step being
//! a parallel group built with append/join.

use crate::group::Group;
use crate::tween::Tween;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Status {
    Running,
    Completed,
    Killed,
}

type CompleteFn = Box<dyn FnOnce()>;

/// An ordered list of groups with a cursor.
///
/// `append` starts a new step after everything already queued; `join` merges
/// into the most recent step, so consecutive joins extend one group and the
/// next append closes it. Leftover tick time from a finishing step carries
/// into the next step within the same tick, so the total runtime of appended
/// steps is exact rather than quantized to tick boundaries.
pub struct Sequence {
    steps: Vec<Group>,
    cursor: usize,
    time_scale: f32,
    paused: bool,
    status: Status,
    on_complete: Option<CompleteFn>,
}

impl std::fmt::Debug for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequence")
            .field("steps", &self.steps)
            .field("cursor", &self.cursor)
            .field("time_scale", &self.time_scale)
            .field("paused", &self.paused)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequence {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            cursor: 0,
            time_scale: 1.0,
            paused: false,
            status: Status::Running,
            on_complete: None,
        }
    }

    // -- Builders --

    /// Queue a tween to run strictly after all previously appended steps.
    pub fn append(mut self, tween: Tween) -> Self {
        self.steps.push(Group::of(tween));
        self
    }

    /// Run a tween in parallel with the most recently appended step.
    /// Joining into an empty sequence starts the first step.
    pub fn join(mut self, tween: Tween) -> Self {
        match self.steps.last_mut() {
            Some(step) => step.push(tween),
            None => self.steps.push(Group::of(tween)),
        }
        self
    }

    /// Queue a delay between steps.
    pub fn append_interval(self, seconds: f32) -> Self {
        self.append(Tween::interval(seconds))
    }

    /// Queue a callback that fires once the previous step finishes.
    pub fn append_callback(self, f: impl FnOnce() + 'static) -> Self {
        self.append(Tween::interval(0.0).on_complete(f))
    }

    /// Playback rate of the whole sequence. Non-positive freezes it.
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
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
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.status == Status::Completed
    }

    #[inline]
    pub fn is_killed(&self) -> bool {
        self.status == Status::Killed
    }

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

    /// Total runtime in caller time: steps in order, each gated by its
    /// longest child. Infinite if any step loops forever.
    pub fn duration(&self) -> f32 {
        let local: f32 = self.steps.iter().map(|s| s.span()).sum();
        local / self.time_scale.abs().max(1e-6)
    }

    /// Advance the step under the cursor, carrying leftover time into
    /// following steps within this same call. Returns the unconsumed
    /// remainder of `dt` once the final step finishes.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.is_finished() {
            return dt;
        }
        if self.paused {
            return 0.0;
        }
        if self.time_scale <= 0.0 {
            return 0.0;
        }
        let mut remaining = dt * self.time_scale;
        while self.cursor < self.steps.len() {
            let step = &mut self.steps[self.cursor];
            let overflow = step.advance(remaining);
            if step.is_finished() {
                self.cursor += 1;
                remaining = overflow;
            } else {
                return 0.0;
            }
        }
        self.finish();
        remaining / self.time_scale
    }

    /// Stop everything in place: the current and remaining steps are killed
    /// where they stand. Idempotent.
    pub fn kill(&mut self) {
        if self.is_finished() {
            return;
        }
        for step in &mut self.steps[self.cursor..] {
            step.kill();
        }
        self.status = Status::Killed;
    }

    /// Fast-forward the remaining steps in order, driving each to its end
    /// value and firing completions, then fire the sequence completion.
    /// Idempotent.
    pub fn complete(&mut self) {
        if self.is_finished() {
            return;
        }
        for step in &mut self.steps[self.cursor..] {
            step.complete();
        }
        self.cursor = self.steps.len();
        self.finish();
    }

    fn finish(&mut self) {
        self.status = Status::Completed;
        if let Some(cb) = self.on_complete.take() {
            cb();
        }
    }
}
