//! Parallel composite: children start together, the composite finishes when
//! the last child does.

use crate::tween::Tween;

/// A set of tweens advanced in lockstep.
///
/// A killed child counts as finished for completion purposes: killing one
/// child never stalls the rest of the group.
#[derive(Debug, Default)]
pub struct Group {
    children: Vec<Tween>,
    paused: bool,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(tween: Tween) -> Self {
        Self {
            children: vec![tween],
            paused: false,
        }
    }

    /// Add a child that runs in parallel with the existing ones.
    pub fn push(&mut self, tween: Tween) {
        self.children.push(tween);
    }

    pub fn with(mut self, tween: Tween) -> Self {
        self.push(tween);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// All children completed or killed. An empty group is trivially done.
    pub fn is_finished(&self) -> bool {
        self.children.iter().all(|c| c.is_finished())
    }

    /// Every child was killed; a mixed outcome counts as completion.
    pub fn is_killed(&self) -> bool {
        !self.children.is_empty() && self.children.iter().all(|c| c.is_killed())
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

    /// Effective span in caller time: the longest-running child gates the
    /// group.
    pub(crate) fn span(&self) -> f32 {
        self.children.iter().map(|c| c.span()).fold(0.0, f32::max)
    }

    /// Advance every unfinished child by `dt` and return the unconsumed
    /// remainder, which is non-zero only on the call where the last child
    /// finishes.
    pub fn advance(&mut self, dt: f32) -> f32 {
        if self.paused {
            return 0.0;
        }
        if self.children.is_empty() {
            return dt;
        }
        // Already-finished children contribute dt so the slowest child still
        // running decides the group's leftover.
        let mut overflow = dt;
        for child in &mut self.children {
            let ov = child.advance(dt);
            overflow = overflow.min(ov);
        }
        if self.is_finished() {
            overflow
        } else {
            0.0
        }
    }

    /// Kill every child in place. Idempotent.
    pub fn kill(&mut self) {
        for child in &mut self.children {
            child.kill();
        }
    }

    /// Force every child to its end value, firing completions in insertion
    /// order. Idempotent.
    pub fn complete(&mut self) {
        for child in &mut self.children {
            child.complete();
        }
    }
}
