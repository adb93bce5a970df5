//! Frame driver
//!
//! One call per displayed frame: sample input, step the simulation, play the
//! frame's sound cues, then render. Update always finishes before rendering
//! starts.

use serde::Serialize;

use crate::assets::AssetCatalog;
use crate::audio::{AudioOut, play_events};
use crate::platform::{Clock, Input, Renderer};
use crate::renderer::render_frame;
use crate::sim::{GameEvent, Simulation, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

/// Running totals for a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub frames: u64,
    pub lasers_fired: u64,
    pub meteors_spawned: u64,
    pub meteors_destroyed: u64,
    /// Frames x meteors in contact with the ship
    pub ship_contacts: u64,
}

impl SessionStats {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::LaserFired { .. } => self.lasers_fired += 1,
            GameEvent::MeteorSpawned { .. } => self.meteors_spawned += 1,
            GameEvent::MeteorDestroyed { .. } => self.meteors_destroyed += 1,
            GameEvent::ShipHit { .. } => self.ship_contacts += 1,
        }
    }
}

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    pub sim: Simulation,
    pub assets: AssetCatalog,
    pub stats: SessionStats,
}

impl Game {
    /// Validate `tuning` and build the simulation
    pub fn new(
        seed: u64,
        tuning: Tuning,
        assets: AssetCatalog,
        now: f64,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        if assets.explosion_frames.len() != tuning.explosion_frame_count {
            log::warn!(
                "Explosion has {} frame sprites but tuning animates {} frames",
                assets.explosion_frames.len(),
                tuning.explosion_frame_count
            );
        }
        let sim = Simulation::new(seed, tuning, assets.extents(), now);
        Ok(Self {
            sim,
            assets,
            stats: SessionStats::default(),
        })
    }

    /// Update then render one frame. Returns the frame's events.
    pub fn run_frame(
        &mut self,
        clock: &impl Clock,
        input: &impl Input,
        renderer: &mut impl Renderer,
        audio: &mut impl AudioOut,
    ) -> Vec<GameEvent> {
        let tick_input = TickInput::poll(input);
        tick(&mut self.sim, &tick_input, clock.frame_time(), clock.now());

        let events = self.sim.drain_events();
        for event in &events {
            self.stats.record(event);
        }
        self.stats.frames += 1;
        play_events(&events, &self.assets, audio);

        render_frame(&self.sim, &self.assets, renderer);
        events
    }
}
