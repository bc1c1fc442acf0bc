//! Engine configuration
//!
//! Loaded from JSON or from the runtime environment:
//!
//! | Variable                 | Field    |
//! |--------------------------|----------|
//! | `EAR_DYNAIS_WINDOW_SIZE` | `window` |
//! | `EAR_DYNAIS_LEVELS`      | `levels` |

use crate::{DEFAULT_LEVELS, DEFAULT_WINDOW, DynaisError, DynaisResult, MAX_LEVELS, MAX_WINDOW};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the window
pub const ENV_WINDOW: &str = "EAR_DYNAIS_WINDOW_SIZE";

/// Environment variable overriding the level count
pub const ENV_LEVELS: &str = "EAR_DYNAIS_LEVELS";

/// DynAIS engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynaisConfig {
    /// Observations kept per level
    #[serde(default = "default_window")]
    pub window: usize,
    /// Number of hierarchy levels
    #[serde(default = "default_levels")]
    pub levels: usize,
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}
fn default_levels() -> usize {
    DEFAULT_LEVELS
}

impl Default for DynaisConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            levels: DEFAULT_LEVELS,
        }
    }
}

impl DynaisConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> DynaisResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    ///
    /// Values that are not positive integers are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(window) = positive(&lookup, ENV_WINDOW) {
            self.window = window;
        }
        if let Some(levels) = positive(&lookup, ENV_LEVELS) {
            self.levels = levels;
        }
        self
    }

    /// Set the window
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the number of levels
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Reject values the engine cannot start with
    ///
    /// Values above the limits are accepted; the engine clamps them.
    pub fn validate(&self) -> DynaisResult<()> {
        if self.window == 0 {
            return Err(DynaisError::InvalidConfig("window must be > 0".into()));
        }
        if self.levels == 0 {
            return Err(DynaisError::InvalidConfig("levels must be > 0".into()));
        }
        if self.window > MAX_WINDOW {
            log::warn!("DynAIS window {} above {}, will be clamped", self.window, MAX_WINDOW);
        }
        if self.levels > MAX_LEVELS {
            log::warn!("DynAIS levels {} above {}, will be clamped", self.levels, MAX_LEVELS);
        }
        Ok(())
    }
}

fn positive<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            log::warn!("Ignoring {}={:?}: expected a positive integer", key, raw);
            None
        }
    }
}
