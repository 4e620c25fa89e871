//! Scheduler/registry: owns every active top-level entry and advances each
//! exactly once per tick.
//!
//! Single-threaded and cooperative by construction: `tick(&mut self)` cannot
//! overlap itself, and the host supplies the clock. Registrations land in a
//! pending queue spliced in at the start of the next tick, so the active set
//! never changes under iteration; finished entries are dropped in one retain
//! pass after the sweep.

use log::{debug, trace};

use crate::config::Config;
use crate::events::TweenEvent;
use crate::group::Group;
use crate::ids::{IdAllocator, TweenId};
use crate::sequence::Sequence;
use crate::tween::{TimeScaleMode, Tween};

/// A top-level schedulable unit.
#[derive(Debug)]
pub enum Entry {
    Tween(Tween),
    Group(Group),
    Sequence(Sequence),
}

impl From<Tween> for Entry {
    fn from(t: Tween) -> Self {
        Entry::Tween(t)
    }
}

impl From<Group> for Entry {
    fn from(g: Group) -> Self {
        Entry::Group(g)
    }
}

impl From<Sequence> for Entry {
    fn from(s: Sequence) -> Self {
        Entry::Sequence(s)
    }
}

impl Entry {
    fn advance(&mut self, scaled_dt: f32, raw_dt: f32) {
        match self {
            Entry::Tween(t) => {
                let dt = match t.scale_mode() {
                    TimeScaleMode::Scaled => scaled_dt,
                    TimeScaleMode::Unscaled => raw_dt,
                };
                let _ = t.advance(dt);
            }
            Entry::Group(g) => {
                let _ = g.advance(scaled_dt);
            }
            Entry::Sequence(s) => {
                let _ = s.advance(scaled_dt);
            }
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Entry::Tween(t) => t.is_finished(),
            Entry::Group(g) => g.is_finished(),
            Entry::Sequence(s) => s.is_finished(),
        }
    }

    fn is_killed(&self) -> bool {
        match self {
            Entry::Tween(t) => t.is_killed(),
            Entry::Group(g) => g.is_killed(),
            Entry::Sequence(s) => s.is_killed(),
        }
    }

    fn kill(&mut self) {
        match self {
            Entry::Tween(t) => t.kill(),
            Entry::Group(g) => g.kill(),
            Entry::Sequence(s) => s.kill(),
        }
    }

    fn complete(&mut self) {
        match self {
            Entry::Tween(t) => t.complete(),
            Entry::Group(g) => g.complete(),
            Entry::Sequence(s) => s.complete(),
        }
    }

    fn pause(&mut self) {
        match self {
            Entry::Tween(t) => t.pause(),
            Entry::Group(g) => g.pause(),
            Entry::Sequence(s) => s.pause(),
        }
    }

    fn resume(&mut self) {
        match self {
            Entry::Tween(t) => t.resume(),
            Entry::Group(g) => g.resume(),
            Entry::Sequence(s) => s.resume(),
        }
    }
}

/// Process-wide active set of tweens, groups, and sequences.
#[derive(Debug)]
pub struct Scheduler {
    cfg: Config,
    ids: IdAllocator,
    active: Vec<(TweenId, Entry)>,
    pending: Vec<(TweenId, Entry)>,
    events: Vec<TweenEvent>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Scheduler {
    pub fn new(cfg: Config) -> Self {
        Self {
            active: Vec::with_capacity(cfg.capacity),
            pending: Vec::new(),
            events: Vec::new(),
            ids: IdAllocator::new(),
            cfg,
        }
    }

    /// Add an entry to the active set. It starts advancing on the next tick.
    pub fn register(&mut self, entry: impl Into<Entry>) -> TweenId {
        let id = self.ids.alloc();
        trace!("register entry {id:?}");
        self.pending.push((id, entry.into()));
        id
    }

    /// Global time scale applied to every entry in Scaled mode.
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.cfg.time_scale = time_scale;
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.cfg.time_scale
    }

    /// Number of live entries, including ones not yet ticked.
    #[inline]
    pub fn len(&self) -> usize {
        self.active.len() + self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.pending.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: TweenId) -> bool {
        self.iter_ids().any(|i| i == id)
    }

    fn iter_ids(&self) -> impl Iterator<Item = TweenId> + '_ {
        self.active
            .iter()
            .map(|(i, _)| *i)
            .chain(self.pending.iter().map(|(i, _)| *i))
    }

    fn find_mut(&mut self, id: TweenId) -> Option<&mut Entry> {
        self.active
            .iter_mut()
            .chain(self.pending.iter_mut())
            .find(|(i, _)| *i == id)
            .map(|(_, e)| e)
    }

    /// Advance every active entry once by `dt` seconds and sweep out the
    /// finished ones. Entries registered since the last tick join the set
    /// first and are advanced this tick like everything else.
    pub fn tick(&mut self, dt: f32) {
        if !self.pending.is_empty() {
            self.active.append(&mut self.pending);
        }
        let scaled_dt = dt * self.cfg.time_scale;
        for (id, entry) in &mut self.active {
            entry.advance(scaled_dt, dt);
            if entry.is_finished() {
                self.events.push(if entry.is_killed() {
                    TweenEvent::Killed { id: *id }
                } else {
                    TweenEvent::Completed { id: *id }
                });
            }
        }
        let before = self.active.len();
        self.active.retain(|(_, e)| !e.is_finished());
        let removed = before - self.active.len();
        if removed > 0 {
            debug!("tick swept {removed} finished entries, {} active", self.active.len());
        }
    }

    /// Stop one entry in place. Takes effect before the next tick; the entry
    /// is swept out (with a Killed event) on that tick. No-op for unknown or
    /// already-finished ids.
    pub fn kill(&mut self, id: TweenId) {
        if let Some(entry) = self.find_mut(id) {
            entry.kill();
        }
    }

    /// Force one entry to its end state, firing its completions now. The
    /// entry is swept out (with a Completed event) on the next tick.
    pub fn complete(&mut self, id: TweenId) {
        if let Some(entry) = self.find_mut(id) {
            entry.complete();
        }
    }

    pub fn pause(&mut self, id: TweenId) {
        if let Some(entry) = self.find_mut(id) {
            entry.pause();
        }
    }

    pub fn resume(&mut self, id: TweenId) {
        if let Some(entry) = self.find_mut(id) {
            entry.resume();
        }
    }

    /// Kill everything and empty the set immediately. Values stay wherever
    /// they were.
    pub fn stop_all(&mut self) {
        debug!("stop_all over {} entries", self.len());
        let drained: Vec<_> = self
            .active
            .drain(..)
            .chain(self.pending.drain(..))
            .collect();
        for (id, mut entry) in drained {
            entry.kill();
            self.events.push(if entry.is_killed() {
                TweenEvent::Killed { id }
            } else {
                TweenEvent::Completed { id }
            });
        }
    }

    /// Drive everything to its end state (firing completion callbacks) and
    /// empty the set immediately.
    pub fn complete_all(&mut self) {
        debug!("complete_all over {} entries", self.len());
        let drained: Vec<_> = self
            .active
            .drain(..)
            .chain(self.pending.drain(..))
            .collect();
        for (id, mut entry) in drained {
            entry.complete();
            self.events.push(TweenEvent::Completed { id });
        }
    }

    /// Drain the lifecycle events collected since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, TweenEvent> {
        self.events.drain(..)
    }
}
