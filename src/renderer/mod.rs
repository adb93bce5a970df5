//! Render pass
//!
//! Reads the simulation after the update step and issues sprite draws through
//! the platform [`Renderer`]. Draw order, back to front: stars, ship,
//! lasers, meteors, explosions.

use glam::Vec2;

use crate::assets::AssetCatalog;
use crate::platform::{Color, Renderer};
use crate::sim::Simulation;

/// Draw one complete frame
pub fn render_frame(sim: &Simulation, assets: &AssetCatalog, renderer: &mut impl Renderer) {
    renderer.begin_frame();
    renderer.clear_background(Color::BACKGROUND);

    for star in &sim.stars {
        renderer.draw_sprite(assets.star.id, star.pos, 0.0, star.scale, Color::WHITE);
    }

    renderer.draw_sprite(assets.ship.id, sim.ship.pos, 0.0, 1.0, Color::WHITE);

    for (_, laser) in sim.lasers.iter_active() {
        renderer.draw_sprite(assets.laser.id, laser.pos, 0.0, 1.0, Color::WHITE);
    }

    // Meteor position is its center; the sprite is placed by its corner
    for (_, meteor) in sim.meteors.iter_active() {
        renderer.draw_sprite(
            assets.meteor.id,
            centered(meteor.pos, assets.meteor.size),
            meteor.rotation,
            1.0,
            Color::WHITE,
        );
    }

    for (_, explosion) in sim.explosions.iter_active() {
        if let Some(frame) = assets.explosion_frame(explosion.frame_index()) {
            renderer.draw_sprite(frame.id, explosion.pos, 0.0, 1.0, Color::WHITE);
        }
    }

    renderer.end_frame();
}

/// Top-left corner that centers a sprite of `size` on `center`
#[inline]
pub fn centered(center: Vec2, size: Vec2) -> Vec2 {
    center - size / 2.0
}
