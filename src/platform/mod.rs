//! Platform abstraction layer
//!
//! The simulation never talks to a window, keyboard, GPU or speaker directly.
//! A platform backend implements these traits:
//! - [`Clock`]: frame time and a monotonic timestamp
//! - [`Input`]: held and freshly pressed controls
//! - [`Renderer`]: sprite drawing inside a begin/end frame bracket
//!
//! Audio output lives in [`crate::audio::AudioOut`].

pub mod headless;

use glam::Vec2;

use crate::assets::SpriteId;

/// Logical controls (keyboard layout is the platform's concern)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

/// Frame timing
pub trait Clock {
    /// Seconds since the previous frame
    fn frame_time(&self) -> f32;
    /// Monotonic seconds since startup
    fn now(&self) -> f64;
}

/// Control state for the current frame
pub trait Input {
    /// Control is held down
    fn is_down(&self, control: Control) -> bool;
    /// Control went down this frame (edge-triggered)
    fn is_pressed(&self, control: Control) -> bool;
}

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Deep purple space backdrop
    pub const BACKGROUND: Color = Color::rgba(28, 22, 37, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Sprite drawing
pub trait Renderer {
    fn begin_frame(&mut self);
    fn clear_background(&mut self, color: Color);
    /// Draw `sprite` with its top-left at `pos`, rotated `rotation` radians
    /// about its center
    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2, rotation: f32, scale: f32, tint: Color);
    fn end_frame(&mut self);
}
