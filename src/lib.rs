//! Space Blaster - a pooled-entity arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity pools, spawn timer, collisions)
//! - `platform`: Clock/input/renderer collaborator traits plus a headless backend
//! - `renderer`: Render pass that reads the simulation after each update
//! - `audio`: Sound cue mapping for simulation events
//! - `assets`: Opaque sprite/sound handles and their extents
//! - `tuning`: Data-driven game balance
//! - `game`: Frame driver gluing the above together

pub mod assets;
pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use assets::{AssetCatalog, SpriteExtents};
pub use game::Game;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 1000.0;
    pub const PLAYFIELD_HEIGHT: f32 = 750.0;

    /// Movement speeds (pixels/s)
    pub const SHIP_SPEED: f32 = 400.0;
    pub const LASER_SPEED: f32 = 600.0;
    pub const METEOR_SPEED: f32 = 400.0;
    /// Meteor spin (radians/s)
    pub const METEOR_ROTATION_SPEED: f32 = 0.9;

    /// Pool capacities - each entity kind has its own
    pub const NUM_STARS: usize = 30;
    pub const NUM_LASERS: usize = 10;
    pub const NUM_METEORS: usize = 10;
    pub const NUM_EXPLOSIONS: usize = 10;

    /// Seconds between meteor spawns
    pub const METEOR_SPAWN_INTERVAL: f64 = 0.4;

    /// Explosion animation
    pub const EXPLOSION_FRAME_RATE: f32 = 20.0;
    pub const EXPLOSION_FRAME_COUNT: usize = 28;

    /// Distance above the ship's top edge where lasers appear
    pub const MUZZLE_OFFSET: f32 = 30.0;
    /// How far behind a laser's nose its explosion is centered
    pub const EXPLOSION_TRAIL_OFFSET: f32 = 20.0;

    /// Star scale range
    pub const STAR_SCALE_MIN: f32 = 0.5;
    pub const STAR_SCALE_MAX: f32 = 1.6;

    /// Horizontal drift range for freshly spawned meteors
    pub const METEOR_DRIFT: f32 = 0.5;
}

/// Signed sum of two opposing controls: `1.0`, `-1.0` or `0.0`
#[inline]
pub fn axis(positive: bool, negative: bool) -> f32 {
    (positive as i8 - negative as i8) as f32
}

/// Unit vector along `v`, or zero when `v` has no length.
///
/// Keeps NaN out of position updates when no key is held.
#[inline]
pub fn unit_or_zero(v: Vec2) -> Vec2 {
    let len_sq = v.length_squared();
    if len_sq > 0.0 {
        v / len_sq.sqrt()
    } else {
        Vec2::ZERO
    }
}

/// Clamp a top-left position so a sprite of `extent` stays within `bounds`
#[inline]
pub fn clamp_to_bounds(pos: Vec2, extent: Vec2, bounds: Vec2) -> Vec2 {
    let max = (bounds - extent).max(Vec2::ZERO);
    pos.clamp(Vec2::ZERO, max)
}
