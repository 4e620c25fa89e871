//! Discrete lifecycle signals collected by the scheduler during a tick.
//!
//! The scheduler buffers these per tick; the host drains them after calling
//! `tick` and reacts (spawn followups, release resources, and so on).

use serde::{Deserialize, Serialize};

use crate::ids::TweenId;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum TweenEvent {
    /// Entry ran to its end (naturally or via complete/complete_all).
    Completed { id: TweenId },
    /// Entry was killed before finishing (kill or stop_all).
    Killed { id: TweenId },
}
