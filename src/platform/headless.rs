//! Headless platform backend
//!
//! Fixed-step clock, scripted input and recording renderer/audio. Drives the
//! native runner and the tests without a window.

use std::collections::HashSet;

use glam::Vec2;

use super::{Clock, Color, Control, Input, Renderer};
use crate::assets::{SoundId, SpriteId};
use crate::audio::AudioOut;

/// Clock that advances a fixed step per frame
#[derive(Debug, Clone)]
pub struct FixedClock {
    dt: f32,
    now: f64,
}

impl FixedClock {
    pub fn new(fps: u32) -> Self {
        Self {
            dt: 1.0 / fps.max(1) as f32,
            now: 0.0,
        }
    }

    /// Move to the next frame
    pub fn advance(&mut self) {
        self.now += self.dt as f64;
    }
}

impl Clock for FixedClock {
    fn frame_time(&self) -> f32 {
        self.dt
    }

    fn now(&self) -> f64 {
        self.now
    }
}

/// Input set by hand
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    held: HashSet<Control>,
    pressed: HashSet<Control>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(&mut self, control: Control) {
        self.held.insert(control);
    }

    pub fn release(&mut self, control: Control) {
        self.held.remove(&control);
    }

    /// Press for this frame only
    pub fn press(&mut self, control: Control) {
        self.pressed.insert(control);
        self.held.insert(control);
    }

    /// Clear edge-triggered presses and everything held
    pub fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}

impl Input for ScriptedInput {
    fn is_down(&self, control: Control) -> bool {
        self.held.contains(&control)
    }

    fn is_pressed(&self, control: Control) -> bool {
        self.pressed.contains(&control)
    }
}

/// Demo pilot: sweeps left and right, bobbing, firing on a fixed cadence
#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    pub fire_every: u64,
    pub sweep_frames: u64,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_every: 8,
            sweep_frames: 90,
        }
    }
}

impl Autopilot {
    /// Controls for frame number `frame`
    pub fn input_for(&self, frame: u64, input: &mut ScriptedInput) {
        input.clear();

        let sweep = self.sweep_frames.max(1);
        let phase = frame / sweep;
        input.hold(if phase % 2 == 0 {
            Control::Right
        } else {
            Control::Left
        });
        if (frame / (sweep * 2)) % 2 == 1 {
            input.hold(Control::Up);
        }

        if frame % self.fire_every.max(1) == 0 {
            input.press(Control::Fire);
        }
    }
}

/// One recorded `draw_sprite` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub sprite: SpriteId,
    pub pos: Vec2,
    pub rotation: f32,
    pub scale: f32,
    pub tint: Color,
}

/// Renderer that records draw calls for the current frame
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    /// Draw calls of the last (or current) frame
    pub calls: Vec<DrawCall>,
    pub background: Option<Color>,
    /// Completed frames
    pub frames: u64,
    in_frame: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    /// Calls that drew `sprite`
    pub fn count_of(&self, sprite: SpriteId) -> usize {
        self.calls.iter().filter(|c| c.sprite == sprite).count()
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) {
        if self.in_frame {
            log::warn!("begin_frame called twice without end_frame");
        }
        self.in_frame = true;
        self.calls.clear();
        self.background = None;
    }

    fn clear_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2, rotation: f32, scale: f32, tint: Color) {
        self.calls.push(DrawCall {
            sprite,
            pos,
            rotation,
            scale,
            tint,
        });
    }

    fn end_frame(&mut self) {
        self.in_frame = false;
        self.frames += 1;
    }
}

/// Audio sink that remembers what was played
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub played: Vec<SoundId>,
}

impl AudioOut for RecordingAudio {
    fn play_cue(&mut self, sound: SoundId) {
        log::trace!("Playing sound {:?}", sound);
        self.played.push(sound);
    }
}
