//! Data-driven game balance
//!
//! Every speed, capacity and duration the simulation uses. Loaded from JSON so
//! balance can change without a rebuild; missing fields fall back to defaults.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Error loading or validating a [`Tuning`]
#[derive(Debug)]
pub enum TuningError {
    /// The tuning file could not be read
    Io(std::io::Error),
    /// The tuning JSON was malformed
    Parse(serde_json::Error),
    /// A value is out of range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            TuningError::Parse(e) => write!(f, "failed to parse tuning JSON: {e}"),
            TuningError::Invalid { field, reason } => {
                write!(f, "invalid tuning value `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(e) => Some(e),
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(e: std::io::Error) -> Self {
        TuningError::Io(e)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Speeds ===
    pub ship_speed: f32,
    pub laser_speed: f32,
    pub meteor_speed: f32,
    /// Radians per second
    pub meteor_rotation_speed: f32,

    // === Pool capacities ===
    pub star_count: usize,
    pub laser_capacity: usize,
    pub meteor_capacity: usize,
    pub explosion_capacity: usize,

    // === Timing ===
    /// Seconds between meteor spawns
    pub spawn_interval: f64,
    /// Explosion frames advanced per second
    pub explosion_frame_rate: f32,
    pub explosion_frame_count: usize,

    // === Offsets ===
    pub muzzle_offset: f32,
    pub explosion_trail_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            ship_speed: SHIP_SPEED,
            laser_speed: LASER_SPEED,
            meteor_speed: METEOR_SPEED,
            meteor_rotation_speed: METEOR_ROTATION_SPEED,

            star_count: NUM_STARS,
            laser_capacity: NUM_LASERS,
            meteor_capacity: NUM_METEORS,
            explosion_capacity: NUM_EXPLOSIONS,

            spawn_interval: METEOR_SPAWN_INTERVAL,
            explosion_frame_rate: EXPLOSION_FRAME_RATE,
            explosion_frame_count: EXPLOSION_FRAME_COUNT,

            muzzle_offset: MUZZLE_OFFSET,
            explosion_trail_offset: EXPLOSION_TRAIL_OFFSET,
        }
    }
}

impl Tuning {
    /// Playfield size as a vector
    #[inline]
    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.playfield_width, self.playfield_height)
    }

    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for writing a starter tuning file)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let floats = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("ship_speed", self.ship_speed),
            ("laser_speed", self.laser_speed),
            ("meteor_speed", self.meteor_speed),
            ("meteor_rotation_speed", self.meteor_rotation_speed),
            ("explosion_frame_rate", self.explosion_frame_rate),
            ("muzzle_offset", self.muzzle_offset),
            ("explosion_trail_offset", self.explosion_trail_offset),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return invalid(field, "must be a finite number");
            }
        }
        if !self.spawn_interval.is_finite() {
            return invalid("spawn_interval", "must be a finite number");
        }

        if self.playfield_width <= 0.0 {
            return invalid("playfield_width", "must be positive");
        }
        if self.playfield_height <= 0.0 {
            return invalid("playfield_height", "must be positive");
        }

        let speeds = [
            ("ship_speed", self.ship_speed),
            ("laser_speed", self.laser_speed),
            ("meteor_speed", self.meteor_speed),
            ("explosion_frame_rate", self.explosion_frame_rate),
        ];
        for (field, value) in speeds {
            if value < 0.0 {
                return invalid(field, "must be zero or positive");
            }
        }

        let capacities = [
            ("laser_capacity", self.laser_capacity),
            ("meteor_capacity", self.meteor_capacity),
            ("explosion_capacity", self.explosion_capacity),
            ("explosion_frame_count", self.explosion_frame_count),
        ];
        for (field, value) in capacities {
            if value == 0 {
                return invalid(field, "must be at least 1");
            }
        }

        if self.spawn_interval <= 0.0 {
            return invalid("spawn_interval", "must be positive");
        }
        if self.explosion_frame_rate == 0.0 {
            log::warn!("explosion_frame_rate is 0: explosions will never finish");
        }

        Ok(())
    }
}
