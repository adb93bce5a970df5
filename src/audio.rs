//! Sound cues for simulation events
//!
//! The simulation never plays sounds itself; it records [`GameEvent`]s and the
//! frame driver turns them into cues for whatever [`AudioOut`] the platform
//! provides.

use crate::assets::{AssetCatalog, SoundId};
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Laser fired
    LaserFire,
    /// Meteor blown up
    Explosion,
}

impl SoundCue {
    /// Cue for an event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::LaserFired { .. } => Some(SoundCue::LaserFire),
            GameEvent::MeteorDestroyed { .. } => Some(SoundCue::Explosion),
            GameEvent::MeteorSpawned { .. } | GameEvent::ShipHit { .. } => None,
        }
    }

    /// Platform handle for this cue
    pub fn sound(self, assets: &AssetCatalog) -> SoundId {
        match self {
            SoundCue::LaserFire => assets.laser_sound,
            SoundCue::Explosion => assets.explosion_sound,
        }
    }
}

/// Audio output provided by the platform
pub trait AudioOut {
    fn play_cue(&mut self, sound: SoundId);
}

/// Play the cue (if any) for each event
pub fn play_events<'a>(
    events: impl IntoIterator<Item = &'a GameEvent>,
    assets: &AssetCatalog,
    audio: &mut impl AudioOut,
) {
    for cue in events.into_iter().filter_map(SoundCue::for_event) {
        audio.play_cue(cue.sound(assets));
    }
}
