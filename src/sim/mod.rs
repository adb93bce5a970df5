//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Fixed-capacity pools, stable slot order
//! - No rendering or platform dependencies beyond the input trait

pub mod collision;
pub mod pool;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Circle, Rect, circle_rect_overlap, circles_overlap, rect_circle_overlap};
pub use pool::{EntityPool, PoolPolicy, Pooled, RingCursor, SlotId};
pub use state::{
    Explosion, ExplosionSpawn, GameEvent, Laser, LaserSpawn, Meteor, MeteorSpawn, Ship,
    Simulation, Star,
};
pub use tick::{TickInput, tick};
pub use timer::{SpawnTimer, TimerState};
