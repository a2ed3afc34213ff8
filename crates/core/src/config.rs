//! Game configuration.
//!
//! Defaults come from the shared constants in the types crate. A config is
//! checked once, when the game is built.

use crate::error::ConfigError;
use crate::types::{
    COLLAPSE_SCORES, COLLAPSE_SETTLE_MS, COLLAPSE_SHRINK_MS, END_ANIMATION_MS, FIELD_HEIGHT,
    FIELD_WIDTH, INITIAL_DROP_MS, KEY_REPEAT_MS, MIN_DROP_MS, SOFT_DROP_FACTOR, SPEEDUP_FACTOR,
    WAIT_DELAY_MS,
};

/// Smallest accepted field side; every piece must fit at spawn.
pub const MIN_FIELD_SIDE: i32 = 4;
/// Largest accepted field side; keeps `width * height` far from `i32` overflow.
pub const MAX_FIELD_SIDE: i32 = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub initial_drop_ms: f64,
    pub min_drop_ms: f64,
    pub speedup_factor: f64,
    pub soft_drop_factor: f64,
    pub key_repeat_ms: u32,
    pub wait_delay_ms: u32,
    pub collapse_shrink_ms: u32,
    pub collapse_settle_ms: u32,
    pub end_animation_ms: u32,
    /// Points per collapse, indexed by rows cleared.
    pub collapse_scores: [u32; 5],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            initial_drop_ms: INITIAL_DROP_MS,
            min_drop_ms: MIN_DROP_MS,
            speedup_factor: SPEEDUP_FACTOR,
            soft_drop_factor: SOFT_DROP_FACTOR,
            key_repeat_ms: KEY_REPEAT_MS,
            wait_delay_ms: WAIT_DELAY_MS,
            collapse_shrink_ms: COLLAPSE_SHRINK_MS,
            collapse_settle_ms: COLLAPSE_SETTLE_MS,
            end_animation_ms: END_ANIMATION_MS,
            collapse_scores: COLLAPSE_SCORES,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_FIELD_SIDE || self.height < MIN_FIELD_SIDE {
            return Err(ConfigError::FieldTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_FIELD_SIDE,
            });
        }
        if self.width > MAX_FIELD_SIDE || self.height > MAX_FIELD_SIDE {
            return Err(ConfigError::FieldTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_FIELD_SIDE,
            });
        }

        let durations = [
            ("initial_drop_ms", self.initial_drop_ms),
            ("min_drop_ms", self.min_drop_ms),
            ("key_repeat_ms", f64::from(self.key_repeat_ms)),
            ("wait_delay_ms", f64::from(self.wait_delay_ms)),
            ("collapse_shrink_ms", f64::from(self.collapse_shrink_ms)),
            ("collapse_settle_ms", f64::from(self.collapse_settle_ms)),
            ("end_animation_ms", f64::from(self.end_animation_ms)),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDuration { name, value });
            }
        }
        if self.min_drop_ms > self.initial_drop_ms {
            return Err(ConfigError::InvalidDuration {
                name: "min_drop_ms",
                value: self.min_drop_ms,
            });
        }

        if !self.speedup_factor.is_finite() || self.speedup_factor < 1.0 {
            return Err(ConfigError::InvalidFactor {
                name: "speedup_factor",
                value: self.speedup_factor,
            });
        }
        if !(0.0..1.0).contains(&self.soft_drop_factor) {
            return Err(ConfigError::InvalidFactor {
                name: "soft_drop_factor",
                value: self.soft_drop_factor,
            });
        }
        Ok(())
    }
}
