//! Simulation state and entity types
//!
//! The [`Simulation`] owns the ship, the starfield, every entity pool and the
//! seeded RNG. Nothing outside it holds onto entities between frames.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Circle, Rect};
use super::pool::{EntityPool, PoolPolicy, Pooled, RingCursor, SlotId};
use super::timer::SpawnTimer;
use crate::assets::SpriteExtents;
use crate::consts::{METEOR_DRIFT, STAR_SCALE_MAX, STAR_SCALE_MIN};
use crate::tuning::Tuning;
use crate::{clamp_to_bounds, unit_or_zero};

/// Something the outside world may want to react to (sound, UI, rules)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A laser left the muzzle at `at`
    LaserFired { at: Vec2 },
    /// A meteor entered at `at`
    MeteorSpawned { at: Vec2 },
    /// A laser blew up a meteor, explosion centered at `at`
    MeteorDestroyed { at: Vec2 },
    /// The ship is touching a meteor. Detection only, no damage is applied.
    ShipHit { meteor: SlotId },
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Unit length or zero
    pub dir: Vec2,
    pub speed: f32,
    pub size: Vec2,
}

impl Ship {
    /// Ship centered horizontally, halfway down the playfield
    pub fn new(size: Vec2, speed: f32, playfield: Vec2) -> Self {
        Self {
            pos: Vec2::new((playfield.x - size.x) / 2.0, playfield.y / 2.0),
            dir: Vec2::ZERO,
            speed,
            size,
        }
    }

    /// Set heading from a raw input vector
    pub fn steer(&mut self, raw: Vec2) {
        self.dir = unit_or_zero(raw);
    }

    /// Move along the heading, staying fully inside the playfield
    pub fn advance(&mut self, dt: f32, playfield: Vec2) {
        let moved = self.pos + self.dir * self.speed * dt;
        self.pos = clamp_to_bounds(moved, self.size, playfield);
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Collision radius: half the sprite height
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.y / 2.0
    }

    pub fn collider(&self) -> Circle {
        Circle::new(self.center(), self.radius())
    }

    /// Top-left of a laser sprite leaving the ship's nose
    pub fn muzzle(&self, laser_size: Vec2, offset: f32) -> Vec2 {
        Vec2::new(
            self.pos.x + (self.size.x - laser_size.x) / 2.0,
            self.pos.y - offset,
        )
    }
}

/// A background star (static)
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Vec2,
    pub scale: f32,
}

/// A laser bolt
#[derive(Debug, Clone, Default)]
pub struct Laser {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
}

/// Where a new laser appears and how big it is
#[derive(Debug, Clone, Copy)]
pub struct LaserSpawn {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Laser {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Center of the leading (top) edge
    pub fn nose(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y)
    }
}

impl Pooled for Laser {
    type Spawn = LaserSpawn;

    fn is_active(&self) -> bool {
        self.active
    }

    fn spawn(&mut self, spawn: LaserSpawn) {
        self.pos = spawn.pos;
        self.size = spawn.size;
        self.active = true;
    }

    fn retire(&mut self) {
        self.active = false;
    }

    fn advance(&mut self, dt: f32, tuning: &Tuning) {
        self.pos.y -= tuning.laser_speed * dt;
    }

    /// Off the top of the screen
    fn expired(&self, _tuning: &Tuning) -> bool {
        self.pos.y < 0.0
    }
}

/// A drifting, spinning meteor
#[derive(Debug, Clone, Default)]
pub struct Meteor {
    /// Center
    pub pos: Vec2,
    /// Not normalized: y is always 1, x drifts
    pub dir: Vec2,
    /// Radians
    pub rotation: f32,
    pub radius: f32,
    pub active: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct MeteorSpawn {
    pub pos: Vec2,
    pub dir: Vec2,
    pub radius: f32,
}

impl Meteor {
    pub fn collider(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

impl Pooled for Meteor {
    type Spawn = MeteorSpawn;

    fn is_active(&self) -> bool {
        self.active
    }

    fn spawn(&mut self, spawn: MeteorSpawn) {
        self.pos = spawn.pos;
        self.dir = spawn.dir;
        self.radius = spawn.radius;
        self.rotation = 0.0;
        self.active = true;
    }

    fn retire(&mut self) {
        self.active = false;
    }

    fn advance(&mut self, dt: f32, tuning: &Tuning) {
        self.pos += self.dir * tuning.meteor_speed * dt;
        self.rotation += tuning.meteor_rotation_speed * dt;
    }

    /// Past the left or top edge. Meteors only drift downward, so the bottom
    /// and right edges are never checked; the ring recycles those slots.
    fn expired(&self, _tuning: &Tuning) -> bool {
        self.pos.x < 0.0 || self.pos.y < 0.0
    }
}

/// An explosion animation
#[derive(Debug, Clone, Default)]
pub struct Explosion {
    /// Top-left corner of the frame sprite
    pub pos: Vec2,
    /// Fractional frame counter
    pub frame: f32,
    pub active: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ExplosionSpawn {
    pub pos: Vec2,
}

impl Explosion {
    /// Frame to draw
    #[inline]
    pub fn frame_index(&self) -> usize {
        self.frame as usize
    }
}

impl Pooled for Explosion {
    type Spawn = ExplosionSpawn;

    fn is_active(&self) -> bool {
        self.active
    }

    fn spawn(&mut self, spawn: ExplosionSpawn) {
        self.pos = spawn.pos;
        self.frame = 0.0;
        self.active = true;
    }

    /// Done animating; rewind for the next use of this slot
    fn retire(&mut self) {
        self.active = false;
        self.frame = 0.0;
    }

    fn advance(&mut self, dt: f32, tuning: &Tuning) {
        self.frame += tuning.explosion_frame_rate * dt;
    }

    fn expired(&self, tuning: &Tuning) -> bool {
        self.frame_index() >= tuning.explosion_frame_count
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) tuning: Tuning,
    extents: SpriteExtents,
    pub ship: Ship,
    pub stars: Vec<Star>,
    pub lasers: EntityPool<Laser>,
    pub meteors: EntityPool<Meteor>,
    pub explosions: EntityPool<Explosion>,
    pub(crate) laser_cursor: RingCursor,
    pub(crate) meteor_cursor: RingCursor,
    pub(crate) explosion_cursor: RingCursor,
    pub(crate) spawn_timer: SpawnTimer,
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl Simulation {
    /// Create a simulation whose pools overwrite their oldest slot when full.
    /// The spawn timer starts counting at `now`.
    ///
    /// `tuning` must already pass [`Tuning::validate`]; a zero pool capacity
    /// panics. [`crate::Game::new`] validates before calling this.
    pub fn new(seed: u64, tuning: Tuning, extents: SpriteExtents, now: f64) -> Self {
        Self::with_policy(seed, tuning, extents, now, PoolPolicy::OverwriteOldest)
    }

    pub fn with_policy(
        seed: u64,
        tuning: Tuning,
        extents: SpriteExtents,
        now: f64,
        policy: PoolPolicy,
    ) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let playfield = tuning.playfield();

        let stars = (0..tuning.star_count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..=playfield.x),
                    rng.random_range(0.0..=playfield.y),
                ),
                scale: rng.random_range(STAR_SCALE_MIN..=STAR_SCALE_MAX),
            })
            .collect();

        log::info!(
            "Simulation seed {seed}: {} lasers, {} meteors, {} explosions, spawn every {}s",
            tuning.laser_capacity,
            tuning.meteor_capacity,
            tuning.explosion_capacity,
            tuning.spawn_interval
        );

        Self {
            seed,
            ship: Ship::new(extents.ship, tuning.ship_speed, playfield),
            stars,
            lasers: EntityPool::new(tuning.laser_capacity, policy),
            meteors: EntityPool::new(tuning.meteor_capacity, policy),
            explosions: EntityPool::new(tuning.explosion_capacity, policy),
            laser_cursor: RingCursor::new(),
            meteor_cursor: RingCursor::new(),
            explosion_cursor: RingCursor::new(),
            spawn_timer: SpawnTimer::new(tuning.spawn_interval, true, true, now),
            rng,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
            extents,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn extents(&self) -> &SpriteExtents {
        &self.extents
    }

    pub fn spawn_timer(&self) -> &SpawnTimer {
        &self.spawn_timer
    }

    pub fn laser_cursor(&self) -> RingCursor {
        self.laser_cursor
    }

    pub fn meteor_cursor(&self) -> RingCursor {
        self.meteor_cursor
    }

    pub fn explosion_cursor(&self) -> RingCursor {
        self.explosion_cursor
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Launch a laser from the ship's nose. `None` if the pool rejected it.
    pub fn fire_laser(&mut self) -> Option<SlotId> {
        let size = self.extents.laser;
        let pos = self.ship.muzzle(size, self.tuning.muzzle_offset);
        let slot = self
            .lasers
            .try_activate(&mut self.laser_cursor, LaserSpawn { pos, size })?;
        self.events.push(GameEvent::LaserFired { at: pos });
        Some(slot)
    }

    /// Drop a meteor in at a random point along the top edge. `None` if the
    /// pool rejected it.
    pub fn spawn_meteor(&mut self) -> Option<SlotId> {
        let pos = Vec2::new(self.rng.random_range(0.0..=self.tuning.playfield_width), 0.0);
        let dir = Vec2::new(self.rng.random_range(-METEOR_DRIFT..=METEOR_DRIFT), 1.0);
        let radius = self.extents.meteor.y / 2.0;

        let slot = self
            .meteors
            .try_activate(&mut self.meteor_cursor, MeteorSpawn { pos, dir, radius })?;
        self.events.push(GameEvent::MeteorSpawned { at: pos });
        Some(slot)
    }

    /// Start an explosion centered on `center`. The meteor is gone either
    /// way, so the destroyed event is recorded even if the explosion pool
    /// rejects the animation.
    pub fn explode_at(&mut self, center: Vec2) -> Option<SlotId> {
        let pos = center - self.extents.explosion / 2.0;
        let slot = self
            .explosions
            .try_activate(&mut self.explosion_cursor, ExplosionSpawn { pos });
        self.events.push(GameEvent::MeteorDestroyed { at: center });
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Simulation {
        Simulation::new(7, Tuning::default(), SpriteExtents::default(), 0.0)
    }

    #[test]
    fn test_new_simulation() {
        let sim = sim();
        assert_eq!(sim.stars.len(), Tuning::default().star_count);
        assert_eq!(sim.lasers.active_count(), 0);
        assert_eq!(sim.meteors.active_count(), 0);
        assert!(sim.spawn_timer().is_running());

        let field = sim.tuning().playfield();
        for star in &sim.stars {
            assert!(star.pos.x >= 0.0 && star.pos.x <= field.x);
            assert!(star.pos.y >= 0.0 && star.pos.y <= field.y);
            assert!((STAR_SCALE_MIN..=STAR_SCALE_MAX).contains(&star.scale));
        }
    }

    #[test]
    fn test_same_seed_same_stars() {
        let a = sim();
        let b = sim();
        for (sa, sb) in a.stars.iter().zip(&b.stars) {
            assert_eq!(sa.pos, sb.pos);
            assert_eq!(sa.scale, sb.scale);
        }
    }

    #[test]
    fn test_ship_steer_zero_stays_zero() {
        let mut ship = Ship::new(Vec2::new(10.0, 10.0), 100.0, Vec2::new(200.0, 200.0));
        ship.steer(Vec2::ZERO);
        assert_eq!(ship.dir, Vec2::ZERO);

        let before = ship.pos;
        ship.advance(1.0, Vec2::new(200.0, 200.0));
        assert_eq!(ship.pos, before);
        assert!(!ship.pos.x.is_nan());
    }

    #[test]
    fn test_ship_diagonal_is_normalized() {
        let mut ship = Ship::new(Vec2::new(10.0, 10.0), 100.0, Vec2::new(1000.0, 1000.0));
        ship.steer(Vec2::new(1.0, 1.0));
        assert!((ship.dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_laser_moves_up_and_expires() {
        let tuning = Tuning::default();
        let mut laser = Laser::default();
        laser.spawn(LaserSpawn {
            pos: Vec2::new(50.0, 10.0),
            size: Vec2::new(9.0, 54.0),
        });
        laser.advance(0.01, &tuning);
        assert_eq!(laser.pos.y, 10.0 - tuning.laser_speed * 0.01);
        assert!(!laser.expired(&tuning));
        laser.advance(0.1, &tuning);
        assert!(laser.expired(&tuning));
    }

    #[test]
    fn test_meteor_expiry_edges() {
        let tuning = Tuning::default();
        let mut meteor = Meteor::default();
        meteor.spawn(MeteorSpawn {
            pos: Vec2::new(5.0, 0.0),
            dir: Vec2::new(-0.5, 1.0),
            radius: 40.0,
        });
        assert!(!meteor.expired(&tuning));

        meteor.advance(0.01, &tuning);
        assert!(meteor.rotation > 0.0);
        assert!(!meteor.expired(&tuning));

        // Drifting left off screen
        meteor.advance(0.05, &tuning);
        assert!(meteor.pos.x < 0.0);
        assert!(meteor.expired(&tuning));

        // Below the bottom edge is not end of life
        meteor.pos = Vec2::new(100.0, tuning.playfield_height + 500.0);
        assert!(!meteor.expired(&tuning));
    }

    #[test]
    fn test_explosion_runs_to_last_frame() {
        let tuning = Tuning {
            explosion_frame_rate: 10.0,
            explosion_frame_count: 28,
            ..Tuning::default()
        };
        let mut pool = EntityPool::<Explosion>::new(2, PoolPolicy::OverwriteOldest);
        let _ = pool.activate(RingCursor::new(), ExplosionSpawn { pos: Vec2::ZERO });

        // 27 x 0.1s = 2.7s: still animating
        for _ in 0..27 {
            pool.update_all(0.1, &tuning);
        }
        let slot = pool.active_ids()[0];
        assert_eq!(pool.get(slot).map(Explosion::frame_index), Some(27));

        // 2.8s reached
        pool.update_all(0.1, &tuning);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.get(slot).map(|e| e.frame), Some(0.0));
    }

    #[test]
    fn test_explosion_large_steps() {
        let tuning = Tuning {
            explosion_frame_rate: 10.0,
            explosion_frame_count: 28,
            ..Tuning::default()
        };
        let mut explosion = Explosion::default();
        explosion.spawn(ExplosionSpawn { pos: Vec2::ZERO });
        for _ in 0..3 {
            explosion.advance(0.7, &tuning);
            assert!(!explosion.expired(&tuning));
        }
        explosion.advance(0.7, &tuning);
        assert!(explosion.expired(&tuning));
    }

    #[test]
    fn test_fire_laser_uses_muzzle() {
        let mut sim = sim();
        sim.fire_laser();
        let (_, laser) = sim.lasers.iter_active().next().expect("one laser");
        let expected = sim.ship.muzzle(sim.extents().laser, sim.tuning().muzzle_offset);
        assert_eq!(laser.pos, expected);
        assert_eq!(sim.laser_cursor().index(), 1);
        assert_eq!(sim.events(), &[GameEvent::LaserFired { at: expected }]);
    }

    #[test]
    fn test_spawn_meteor_on_top_edge() {
        let mut sim = sim();
        for _ in 0..50 {
            sim.spawn_meteor();
        }
        for (_, meteor) in sim.meteors.iter_active() {
            assert_eq!(meteor.pos.y, 0.0);
            assert!(meteor.pos.x >= 0.0 && meteor.pos.x <= sim.tuning().playfield_width);
            assert!(meteor.dir.x.abs() <= METEOR_DRIFT);
            assert_eq!(meteor.dir.y, 1.0);
            assert_eq!(meteor.radius, sim.extents().meteor.y / 2.0);
        }
        assert_eq!(sim.meteors.active_count(), sim.tuning().meteor_capacity);
        assert_eq!(sim.meteor_cursor().index(), 50 % sim.tuning().meteor_capacity);
    }
}
