//! Opaque asset handles
//!
//! Loading textures and sounds is the platform's job. The simulation only needs
//! sprite extents for clamping and offsets; the renderer and audio layer only
//! need ids to hand back to the platform.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Platform-assigned sprite handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// Platform-assigned sound handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundId(pub u32);

/// A sprite handle plus its pixel size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteHandle {
    pub id: SpriteId,
    pub size: Vec2,
}

impl SpriteHandle {
    pub fn new(id: u32, width: f32, height: f32) -> Self {
        Self {
            id: SpriteId(id),
            size: Vec2::new(width, height),
        }
    }
}

/// Sprite sizes the simulation reads
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteExtents {
    pub ship: Vec2,
    pub laser: Vec2,
    pub meteor: Vec2,
    pub explosion: Vec2,
}

impl Default for SpriteExtents {
    fn default() -> Self {
        AssetCatalog::placeholder(crate::consts::EXPLOSION_FRAME_COUNT).extents()
    }
}

/// Every handle the game draws or plays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetCatalog {
    pub ship: SpriteHandle,
    pub star: SpriteHandle,
    pub laser: SpriteHandle,
    pub meteor: SpriteHandle,
    /// Explosion animation, one sprite per frame
    pub explosion_frames: Vec<SpriteHandle>,
    pub laser_sound: SoundId,
    pub explosion_sound: SoundId,
}

impl AssetCatalog {
    /// Catalog with fixed ids and the stock sprite sizes, for headless runs
    pub fn placeholder(explosion_frame_count: usize) -> Self {
        let frames = (0..explosion_frame_count as u32)
            .map(|i| SpriteHandle::new(100 + i, 192.0, 192.0))
            .collect();
        Self {
            ship: SpriteHandle::new(1, 112.0, 75.0),
            star: SpriteHandle::new(2, 24.0, 24.0),
            laser: SpriteHandle::new(3, 9.0, 54.0),
            meteor: SpriteHandle::new(4, 101.0, 84.0),
            explosion_frames: frames,
            laser_sound: SoundId(1),
            explosion_sound: SoundId(2),
        }
    }

    /// Sprite sizes for the simulation
    pub fn extents(&self) -> SpriteExtents {
        SpriteExtents {
            ship: self.ship.size,
            laser: self.laser.size,
            meteor: self.meteor.size,
            explosion: self
                .explosion_frames
                .first()
                .map(|f| f.size)
                .unwrap_or(Vec2::ZERO),
        }
    }

    /// Sprite for explosion frame `index`, clamped to the last frame
    pub fn explosion_frame(&self, index: usize) -> Option<&SpriteHandle> {
        self.explosion_frames
            .get(index)
            .or_else(|| self.explosion_frames.last())
    }
}
