//! Per-frame simulation step
//!
//! Order matters: pools advance before collision testing so entities that just
//! expired can't be hit, and the spawn timer runs after pool updates so a new
//! meteor isn't moved on the frame it appears.

use glam::Vec2;

use super::collision::{circle_rect_overlap, circles_overlap};
use super::pool::Pooled;
use super::state::{GameEvent, Simulation};
use crate::axis;
use crate::platform::{Control, Input};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire edge: true only on the frame the button went down
    pub fire: bool,
}

impl TickInput {
    /// Sample the platform's input for this frame
    pub fn poll(input: &impl Input) -> Self {
        Self {
            up: input.is_down(Control::Up),
            down: input.is_down(Control::Down),
            left: input.is_down(Control::Left),
            right: input.is_down(Control::Right),
            fire: input.is_pressed(Control::Fire),
        }
    }

    /// Raw (unnormalized) steering vector, screen space (y down)
    pub fn steering(&self) -> Vec2 {
        Vec2::new(axis(self.right, self.left), axis(self.down, self.up))
    }
}

/// Advance the simulation by one frame of `dt` seconds; `now` is the
/// monotonic clock used by the spawn timer.
pub fn tick(sim: &mut Simulation, input: &TickInput, dt: f32, now: f64) {
    let dt = dt.max(0.0);
    sim.time_ticks += 1;

    // Ship
    let playfield = sim.tuning.playfield();
    sim.ship.steer(input.steering());
    sim.ship.advance(dt, playfield);

    if input.fire {
        sim.fire_laser();
    }

    // Pools
    sim.lasers.update_all(dt, &sim.tuning);
    sim.meteors.update_all(dt, &sim.tuning);
    sim.explosions.update_all(dt, &sim.tuning);

    if sim.spawn_timer.tick(now) {
        sim.spawn_meteor();
    }

    detect_ship_hits(sim);
    resolve_laser_hits(sim);
}

/// Report meteors touching the ship. Nothing else happens to either.
fn detect_ship_hits(sim: &mut Simulation) {
    let ship = sim.ship.collider();
    for (id, meteor) in sim.meteors.iter_active() {
        if circles_overlap(&ship, &meteor.collider()) {
            log::debug!("Ship touching meteor in slot {}", id.index());
            sim.events.push(GameEvent::ShipHit { meteor: id });
        }
    }
}

/// Every live laser against every live meteor. A hit removes both and starts
/// an explosion just behind the laser's nose; a spent laser stops scanning.
fn resolve_laser_hits(sim: &mut Simulation) {
    let trail = sim.tuning.explosion_trail_offset;
    let meteor_ids = sim.meteors.active_ids();

    for laser_id in sim.lasers.active_ids() {
        for &meteor_id in &meteor_ids {
            let (Some(laser), Some(meteor)) = (sim.lasers.get(laser_id), sim.meteors.get(meteor_id))
            else {
                continue;
            };
            if !meteor.is_active() || !circle_rect_overlap(&meteor.collider(), &laser.rect()) {
                continue;
            }

            let impact = laser.nose() + Vec2::new(0.0, trail);
            sim.lasers.deactivate(laser_id);
            sim.meteors.deactivate(meteor_id);
            sim.explode_at(impact);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteExtents;
    use crate::sim::pool::PoolPolicy;
    use crate::sim::state::{LaserSpawn, MeteorSpawn};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn sim_with(tuning: Tuning) -> Simulation {
        Simulation::new(12345, tuning, SpriteExtents::default(), 0.0)
    }

    /// Tuning with spawning pushed far out so tests control every meteor
    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_interval: 1.0e9,
            ..Tuning::default()
        }
    }

    fn place_meteor(sim: &mut Simulation, pos: Vec2) {
        let radius = sim.extents().meteor.y / 2.0;
        sim.meteor_cursor = sim.meteors.activate(
            sim.meteor_cursor,
            MeteorSpawn {
                pos,
                dir: Vec2::new(0.0, 1.0),
                radius,
            },
        );
    }

    fn place_laser(sim: &mut Simulation, pos: Vec2) {
        let size = sim.extents().laser;
        sim.laser_cursor = sim
            .lasers
            .activate(sim.laser_cursor, LaserSpawn { pos, size });
    }

    #[test]
    fn test_idle_input_keeps_ship_still() {
        let mut sim = sim_with(quiet_tuning());
        let start = sim.ship.pos;
        tick(&mut sim, &TickInput::default(), DT, 0.0);
        assert_eq!(sim.ship.pos, start);
        assert_eq!(sim.ship.dir, Vec2::ZERO);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let input = TickInput {
            left: true,
            right: true,
            up: true,
            ..Default::default()
        };
        assert_eq!(input.steering(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_ship_moves_at_speed() {
        let mut sim = sim_with(quiet_tuning());
        let start = sim.ship.pos;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut sim, &input, 0.1, 0.1);
        assert!((sim.ship.pos.x - (start.x + sim.ship.speed * 0.1)).abs() < 1e-3);
        assert_eq!(sim.ship.pos.y, start.y);
    }

    #[test]
    fn test_dt_spike_is_clamped() {
        let mut sim = sim_with(quiet_tuning());
        let input = TickInput {
            right: true,
            down: true,
            ..Default::default()
        };
        tick(&mut sim, &input, 1000.0, 1.0);
        let max = sim.tuning().playfield() - sim.ship.size;
        assert_eq!(sim.ship.pos, max);
    }

    #[test]
    fn test_fire_spawns_laser_and_event() {
        let mut sim = sim_with(quiet_tuning());
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut sim, &input, DT, DT as f64);
        assert_eq!(sim.lasers.active_count(), 1);
        assert!(matches!(
            sim.events().first(),
            Some(GameEvent::LaserFired { .. })
        ));
    }

    #[test]
    fn test_rapid_fire_evicts_oldest() {
        let mut sim = sim_with(quiet_tuning());
        let capacity = sim.tuning().laser_capacity;
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        for frame in 0..=capacity {
            tick(&mut sim, &input, 0.0, frame as f64 * 1.0e-3);
        }
        assert_eq!(sim.lasers.active_count(), capacity);
        assert_eq!(sim.laser_cursor().index(), 1);
    }

    #[test]
    fn test_rejected_shots_are_not_reported() {
        let tuning = Tuning {
            laser_capacity: 2,
            ..quiet_tuning()
        };
        let mut sim = Simulation::with_policy(
            12345,
            tuning,
            SpriteExtents::default(),
            0.0,
            PoolPolicy::RejectIfFull,
        );
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        for frame in 0..5 {
            tick(&mut sim, &input, 0.0, frame as f64 * 1.0e-3);
        }

        let fired = sim
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::LaserFired { .. }))
            .count();
        assert_eq!(sim.lasers.active_count(), 2);
        assert_eq!(fired, sim.lasers.active_count());
    }

    #[test]
    fn test_laser_destroys_meteor() {
        let mut sim = sim_with(quiet_tuning());
        place_meteor(&mut sim, Vec2::new(300.0, 200.0));
        place_laser(&mut sim, Vec2::new(296.0, 210.0));

        tick(&mut sim, &TickInput::default(), 0.0, 0.0);

        assert_eq!(sim.lasers.active_count(), 0);
        assert_eq!(sim.meteors.active_count(), 0);
        assert_eq!(sim.explosions.active_count(), 1);
        assert_eq!(sim.explosion_cursor().index(), 1);

        let destroyed: Vec<_> = sim
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::MeteorDestroyed { .. }))
            .collect();
        assert_eq!(destroyed.len(), 1);
    }

    #[test]
    fn test_explosion_sits_behind_laser_nose() {
        let mut sim = sim_with(quiet_tuning());
        place_meteor(&mut sim, Vec2::new(300.0, 200.0));
        let laser_pos = Vec2::new(296.0, 210.0);
        place_laser(&mut sim, laser_pos);

        tick(&mut sim, &TickInput::default(), 0.0, 0.0);

        let laser_size = sim.extents().laser;
        let expected_center = Vec2::new(
            laser_pos.x + laser_size.x / 2.0,
            laser_pos.y + sim.tuning().explosion_trail_offset,
        );
        assert_eq!(
            sim.events().last(),
            Some(&GameEvent::MeteorDestroyed { at: expected_center })
        );
        let (_, explosion) = sim.explosions.iter_active().next().expect("explosion");
        assert_eq!(explosion.pos, expected_center - sim.extents().explosion / 2.0);
    }

    #[test]
    fn test_all_pairs_resolved_in_one_pass() {
        let mut sim = sim_with(quiet_tuning());
        place_meteor(&mut sim, Vec2::new(200.0, 300.0));
        place_meteor(&mut sim, Vec2::new(600.0, 300.0));
        place_laser(&mut sim, Vec2::new(196.0, 300.0));
        place_laser(&mut sim, Vec2::new(596.0, 300.0));

        tick(&mut sim, &TickInput::default(), 0.0, 0.0);

        assert_eq!(sim.meteors.active_count(), 0);
        assert_eq!(sim.lasers.active_count(), 0);
        assert_eq!(sim.explosions.active_count(), 2);
    }

    #[test]
    fn test_one_laser_takes_one_meteor() {
        let mut sim = sim_with(quiet_tuning());
        // Two overlapping meteors, one laser through both
        place_meteor(&mut sim, Vec2::new(400.0, 300.0));
        place_meteor(&mut sim, Vec2::new(410.0, 300.0));
        place_laser(&mut sim, Vec2::new(400.0, 290.0));

        tick(&mut sim, &TickInput::default(), 0.0, 0.0);

        assert_eq!(sim.meteors.active_count(), 1);
        assert_eq!(sim.lasers.active_count(), 0);
        assert_eq!(sim.explosions.active_count(), 1);
    }

    #[test]
    fn test_ship_hit_is_detection_only() {
        let mut sim = sim_with(quiet_tuning());
        let center = sim.ship.center();
        place_meteor(&mut sim, center);

        tick(&mut sim, &TickInput::default(), 0.0, 0.0);

        assert!(sim
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::ShipHit { .. })));
        // Meteor is untouched, ship still there
        assert_eq!(sim.meteors.active_count(), 1);
        assert_eq!(sim.ship.center(), center);
    }

    #[test]
    fn test_spawn_schedule_over_one_second() {
        let tuning = Tuning {
            spawn_interval: 0.4,
            ..Tuning::default()
        };
        let capacity = tuning.meteor_capacity;
        let mut sim = sim_with(tuning);

        let mut spawned = 0;
        for frame in 0..=60 {
            let now = frame as f64 / 60.0;
            tick(&mut sim, &TickInput::default(), DT, now);
            spawned += sim
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::MeteorSpawned { .. }))
                .count();
        }

        assert_eq!(spawned, 2);
        assert_eq!(sim.meteor_cursor().index(), 2 % capacity);
    }

    #[test]
    fn test_negative_dt_treated_as_zero() {
        let mut sim = sim_with(quiet_tuning());
        let start = sim.ship.pos;
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut sim, &input, -1.0, 0.0);
        assert_eq!(sim.ship.pos, start);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                up: true,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        let mut a = sim_with(Tuning::default());
        let mut b = sim_with(Tuning::default());
        for frame in 0..240 {
            let input = &inputs[frame % inputs.len()];
            let now = frame as f64 * DT as f64;
            tick(&mut a, input, DT, now);
            tick(&mut b, input, DT, now);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.ship.pos, b.ship.pos);
        let meteors_a: Vec<_> = a.meteors.iter_active().map(|(_, m)| m.pos).collect();
        let meteors_b: Vec<_> = b.meteors.iter_active().map(|(_, m)| m.pos).collect();
        assert_eq!(meteors_a, meteors_b);
        assert_eq!(a.events(), b.events());
    }

    proptest! {
        #[test]
        fn prop_ship_stays_in_bounds(
            steps in prop::collection::vec(
                (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), 0.0f32..5.0),
                1..64,
            )
        ) {
            let mut sim = sim_with(quiet_tuning());
            let max = sim.tuning().playfield() - sim.ship.size;
            let mut now = 0.0;
            for (up, down, left, right, dt) in steps {
                now += dt as f64;
                let input = TickInput { up, down, left, right, fire: false };
                tick(&mut sim, &input, dt, now);
                prop_assert!(sim.ship.pos.x >= 0.0 && sim.ship.pos.x <= max.x);
                prop_assert!(sim.ship.pos.y >= 0.0 && sim.ship.pos.y <= max.y);
            }
        }
    }
}
