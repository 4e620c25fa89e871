//! Core configuration for tween-core.

use serde::{Deserialize, Serialize};

/// Configuration for scheduler sizing and global time scaling.
/// Keep this minimal; expand as needed without breaking API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Initial capacity hint for the active-entry registry.
    pub capacity: usize,

    /// Global time scale applied to every entry in Scaled mode.
    /// Unscaled entries receive the raw host dt.
    pub time_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 64,
            time_scale: 1.0,
        }
    }
}
