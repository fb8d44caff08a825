// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! The simulation: object collection, per-step pipeline and commands
//!
//! One step is always "advance every object, then resolve every pair". All
//! integrations of a step complete before the first pair is resolved.
//!
//! [`Simulation`] is single-threaded. [`SimulationRunner`] puts one behind a
//! mutex and drives it from a dedicated thread; input and rendering then go
//! through [`SimulationRunner::command`] and [`SimulationRunner::with_scene`].
//!
//! # Examples
//!
//! ```
//! use rigid_sandbox::config::PhysicsConfig;
//! use rigid_sandbox::simulation::Simulation;
//!
//! let mut sim = Simulation::new(PhysicsConfig::default()).unwrap();
//! let id = sim.spawn_ball(400.0, 100.0, 0.0, 0.0, 20.0).unwrap();
//! for _ in 0..100 {
//!     sim.step(0.001);
//! }
//! let y = sim.get(id).unwrap().position().y();
//! assert!(y > 100.0);
//! ```

mod context;
mod runner;
mod timestep;
mod world;

pub use context::{FpsCounter, SimulationContext, DEFAULT_TARGET_FPS, FPS_WINDOW, HIGH_TARGET_FPS};
pub use runner::SimulationRunner;
pub use timestep::{Drain, FixedTimestep, REMAINDER_EPSILON};
pub use world::World;

use crate::collision::{self, CollisionParams};
use crate::config::PhysicsConfig;
use crate::error::{Result, SimError};
use crate::integration::Environment;
use crate::objects::{Ball, Color, Mass, Object, ObjectId, StaticBox};
use log::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Radius of balls spawned by gestures and the spawn key
pub const DEFAULT_BALL_RADIUS: f64 = 20.0;

/// Drag vector to launch velocity factor for drag-to-spawn
pub const DEFAULT_VELOCITY_MULTIPLIER: f64 = 3.0;

/// Smallest box side a drag gesture produces
pub const MIN_BOX_SIDE: f64 = 5.0;

/// Launch speed per pixel of distance to the target
pub const DEFAULT_LAUNCH_SCALE: f64 = 2.0;

/// Launch speed cap in px/s
pub const DEFAULT_MAX_LAUNCH_SPEED: f64 = 1000.0;

/// Height of the default spawn point below the ceiling
const DEFAULT_SPAWN_HEIGHT: f64 = 100.0;

/// Grid spacing between consecutive default spawns
const DEFAULT_SPAWN_SPACING: f64 = 30.0;

/// Below this many objects integration stays on the calling thread
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 256;

/// A completed mouse drag, turned into an object on release
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnGesture {
    /// Ball at the drag start, launched along the drag vector
    Ball {
        /// Press position
        start: (f64, f64),
        /// Release position
        end: (f64, f64),
        /// Drag vector to velocity factor
        multiplier: f64,
    },
    /// Box spanning the dragged rectangle
    Box {
        /// Press position
        start: (f64, f64),
        /// Release position
        end: (f64, f64),
    },
}

impl SpawnGesture {
    /// Ball gesture
    pub fn ball(start: (f64, f64), end: (f64, f64), multiplier: f64) -> Self {
        SpawnGesture::Ball {
            start,
            end,
            multiplier,
        }
    }

    /// Box gesture
    pub fn boxed(start: (f64, f64), end: (f64, f64)) -> Self {
        SpawnGesture::Box { start, end }
    }
}

/// What one call to [`Simulation::run_frame`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameSummary {
    /// Steps taken, including the partial one
    pub steps: usize,
    /// Overlapping pairs resolved over all steps
    pub collisions: usize,
}

/// A 2D world of balls and boxes
#[derive(Debug, Clone)]
pub struct Simulation {
    config: PhysicsConfig,
    context: SimulationContext,
    world: World,
    timestep: FixedTimestep,
}

impl Simulation {
    /// Create an empty simulation after validating the configuration
    pub fn new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;
        let timestep = FixedTimestep::from_config(&config);
        Ok(Simulation {
            config,
            context: SimulationContext::new(),
            world: World::new(),
            timestep,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Runtime toggles
    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    /// Mutable runtime toggles
    pub fn context_mut(&mut self) -> &mut SimulationContext {
        &mut self.context
    }

    /// Object collection
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Objects in collection order
    pub fn objects(&self) -> &[Object] {
        self.world.objects()
    }

    /// Look up an object by id
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.world.get(id)
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.world.len()
    }

    /// Whether there are no objects
    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    /// Integration environment for the current toggles
    pub fn environment(&self) -> Environment {
        Environment::new(&self.config, self.context.gravity_enabled())
    }

    /// Collision coefficients
    pub fn collision_params(&self) -> CollisionParams {
        CollisionParams::from_config(&self.config)
    }

    /// Advance by `dt` seconds and resolve collisions
    ///
    /// Returns the number of overlapping pairs that were resolved. A `dt`
    /// that is not positive and finite is ignored.
    pub fn step(&mut self, dt: f64) -> usize {
        if !(dt > 0.0 && dt.is_finite()) {
            warn!("Ignoring step with invalid dt {}", dt);
            return 0;
        }
        self.advance_all(dt);
        self.resolve_collisions()
    }

    /// Integrate every object over `dt`; boxes are untouched
    pub fn advance_all(&mut self, dt: f64) {
        let env = self.environment();
        let objects = self.world.objects_mut();

        #[cfg(feature = "parallel")]
        {
            if objects.len() >= PARALLEL_THRESHOLD {
                objects.par_iter_mut().for_each(|object| object.advance(dt, &env));
                return;
            }
        }

        for object in objects {
            object.advance(dt, &env);
        }
    }

    /// Resolve every overlapping pair in collection order
    pub fn resolve_collisions(&mut self) -> usize {
        let params = self.collision_params();
        collision::resolve_all(self.world.objects_mut(), &params)
    }

    /// Add wall-clock time to the fixed-step accumulator without stepping
    ///
    /// Returns the amount actually added after clamping.
    pub fn accumulate_time(&mut self, delta: f64) -> f64 {
        self.timestep.accumulate(delta)
    }

    /// Time waiting in the accumulator
    pub fn pending_time(&self) -> f64 {
        self.timestep.accumulated()
    }

    /// Run the next planned step from the accumulator
    ///
    /// Returns the number of pairs resolved, or `None` once the accumulator
    /// is drained.
    pub fn step_pending(&mut self) -> Option<usize> {
        let dt = self.timestep.next_step()?;
        Some(self.step(dt))
    }

    /// Feed one frame of wall-clock time through the fixed-step accumulator
    pub fn run_frame(&mut self, delta: f64) -> FrameSummary {
        self.accumulate_time(delta);
        let mut summary = FrameSummary::default();
        while let Some(collisions) = self.step_pending() {
            summary.collisions += collisions;
            summary.steps += 1;
        }
        summary
    }

    fn check_capacity(&self) -> Result<()> {
        if self.world.len() >= self.config.max_objects {
            return Err(SimError::CapacityExceeded {
                limit: self.config.max_objects,
            });
        }
        Ok(())
    }

    /// Insert an already constructed object
    pub fn spawn(&mut self, object: impl Into<Object>) -> Result<ObjectId> {
        self.check_capacity()?;
        let object = object.into();
        let kind = object.kind();
        let id = self.world.insert(object);
        debug!("Spawned {:?} {} ({} objects)", kind, id, self.world.len());
        Ok(id)
    }

    /// Spawn a unit-mass ball
    pub fn spawn_ball(&mut self, x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Result<ObjectId> {
        ensure_positive("radius", radius)?;
        self.spawn(Ball::new(x, y, vx, vy, radius))
    }

    /// Spawn a ball with explicit mass and color
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_ball_with(
        &mut self,
        x: f64,
        y: f64,
        vx: f64,
        vy: f64,
        radius: f64,
        mass: f64,
        color: Color,
    ) -> Result<ObjectId> {
        ensure_positive("radius", radius)?;
        let mass = Mass::try_new(mass).ok_or(SimError::InvalidShape {
            what: "mass",
            value: mass,
        })?;
        self.spawn(Ball::new(x, y, vx, vy, radius).with_mass(mass).with_color(color))
    }

    /// Spawn a static box centered at `(x, y)`
    pub fn spawn_box(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<ObjectId> {
        ensure_positive("width", width)?;
        ensure_positive("height", height)?;
        self.spawn(StaticBox::new(x, y, width, height))
    }

    /// Spawn whatever a drag gesture describes
    pub fn spawn_gesture(&mut self, gesture: SpawnGesture) -> Result<ObjectId> {
        match gesture {
            SpawnGesture::Ball {
                start,
                end,
                multiplier,
            } => {
                let vx = (end.0 - start.0) * multiplier;
                let vy = (end.1 - start.1) * multiplier;
                self.spawn_ball(start.0, start.1, vx, vy, DEFAULT_BALL_RADIUS)
            }
            SpawnGesture::Box { start, end } => {
                let width = (end.0 - start.0).abs().max(MIN_BOX_SIDE);
                let height = (end.1 - start.1).abs().max(MIN_BOX_SIDE);
                let cx = (start.0 + end.0) * 0.5;
                let cy = (start.1 + end.1) * 0.5;
                self.spawn_box(cx, cy, width, height)
            }
        }
    }

    /// Spawn a red ball near the top center
    ///
    /// Consecutive spawns are laid out on a grid three columns wide so they
    /// do not start on top of each other.
    pub fn spawn_default_ball(&mut self) -> Result<ObjectId> {
        let n = self.world.len();
        let x = self.config.arena.width * 0.5 + (n % 3) as f64 * DEFAULT_SPAWN_SPACING;
        let y = DEFAULT_SPAWN_HEIGHT - (n / 3) as f64 * DEFAULT_SPAWN_SPACING;
        self.spawn(Ball::new(x, y, 0.0, 0.0, DEFAULT_BALL_RADIUS).with_color(Color::RED))
    }

    fn ball_mut(&mut self, id: ObjectId) -> Result<&mut Ball> {
        match self.world.get_mut(id) {
            Some(Object::Ball(ball)) => Ok(ball),
            Some(Object::Box(_)) => Err(SimError::StaticObject(id)),
            None => Err(SimError::UnknownObject(id)),
        }
    }

    /// Add `(dvx, dvy)` to a ball's velocity
    pub fn apply_impulse(&mut self, id: ObjectId, dvx: f64, dvy: f64) -> Result<()> {
        self.ball_mut(id)?.velocity_mut().add(dvx, dvy);
        debug!("Impulse ({:.1}, {:.1}) on {}", dvx, dvy, id);
        Ok(())
    }

    /// Point a ball's velocity at `(target_x, target_y)`
    ///
    /// The speed is `min(distance * scale, max_speed)`. Nothing changes when
    /// the target is the ball's own center.
    pub fn launch_towards(
        &mut self,
        id: ObjectId,
        target_x: f64,
        target_y: f64,
        scale: f64,
        max_speed: f64,
    ) -> Result<()> {
        let ball = self.ball_mut(id)?;
        let pos = ball.position();
        let dx = target_x - pos.x();
        let dy = target_y - pos.y();
        let distance = dx.hypot(dy);
        if distance <= 0.0 {
            return Ok(());
        }
        let speed = (distance * scale).min(max_speed);
        let velocity = ball.velocity_mut();
        velocity.set_dx(dx / distance * speed);
        velocity.set_dy(dy / distance * speed);
        debug!("Launched {} at {:.1} px/s", id, speed);
        Ok(())
    }

    /// Remove every object; returns how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.world.clear();
        debug!("Cleared {} objects", removed);
        removed
    }

    /// Clear and spawn a single default ball
    pub fn reset(&mut self) -> Result<ObjectId> {
        self.clear();
        self.timestep.reset();
        self.spawn_default_ball()
    }

    /// Flip gravity; returns the new state
    pub fn toggle_gravity(&mut self) -> bool {
        let enabled = self.context.toggle_gravity();
        debug!("Gravity {}", if enabled { "enabled" } else { "disabled" });
        enabled
    }

    /// Turn gravity on or off
    pub fn set_gravity(&mut self, enabled: bool) {
        self.context.set_gravity_enabled(enabled);
    }

    /// Set the target render frame rate
    pub fn set_target_fps(&mut self, fps: u32) -> Result<()> {
        self.context.set_target_fps(fps)
    }

    /// Switch the target frame rate between 60 and 144
    pub fn toggle_target_fps(&mut self) -> u32 {
        self.context.toggle_target_fps()
    }

    /// Total kinetic energy of the dynamic bodies
    pub fn kinetic_energy(&self) -> f64 {
        self.balls().map(Ball::kinetic_energy).sum()
    }

    /// Total linear momentum `Σ m·v` of the dynamic bodies
    pub fn momentum(&self) -> (f64, f64) {
        self.balls().fold((0.0, 0.0), |(px, py), ball| {
            let m = ball.mass().value();
            (px + m * ball.velocity().dx(), py + m * ball.velocity().dy())
        })
    }

    fn balls(&self) -> impl Iterator<Item = &Ball> {
        self.world.objects().iter().filter_map(Object::as_ball)
    }
}

fn ensure_positive(what: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidShape { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::DragModel;

    fn quiet() -> PhysicsConfig {
        PhysicsConfig::default().with_drag(DragModel::None)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = Simulation::new(PhysicsConfig::default().with_restitution(2.0));
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_spawn_validates_shape() {
        let mut sim = Simulation::new(quiet()).unwrap();
        assert!(matches!(
            sim.spawn_ball(0.0, 0.0, 0.0, 0.0, 0.0),
            Err(SimError::InvalidShape { what: "radius", .. })
        ));
        assert!(matches!(
            sim.spawn_box(0.0, 0.0, 10.0, -1.0),
            Err(SimError::InvalidShape { what: "height", .. })
        ));
        assert!(matches!(
            sim.spawn_ball_with(0.0, 0.0, 0.0, 0.0, 5.0, 0.0, Color::RED),
            Err(SimError::InvalidShape { what: "mass", .. })
        ));
        assert!(sim.is_empty());
    }

    #[test]
    fn test_capacity_limit() {
        let mut sim = Simulation::new(quiet().with_max_objects(2)).unwrap();
        sim.spawn_default_ball().unwrap();
        sim.spawn_default_ball().unwrap();
        assert!(matches!(
            sim.spawn_default_ball(),
            Err(SimError::CapacityExceeded { limit: 2 })
        ));
    }

    #[test]
    fn test_default_ball_grid() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let ids: Vec<_> = (0..4).map(|_| sim.spawn_default_ball().unwrap()).collect();
        let pos = |i: usize| sim.get(ids[i]).unwrap().position();
        assert_eq!((pos(0).x(), pos(0).y()), (400.0, 100.0));
        assert_eq!((pos(1).x(), pos(1).y()), (430.0, 100.0));
        assert_eq!((pos(2).x(), pos(2).y()), (460.0, 100.0));
        assert_eq!((pos(3).x(), pos(3).y()), (400.0, 70.0));
    }

    #[test]
    fn test_gestures() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let ball = sim
            .spawn_gesture(SpawnGesture::ball((100.0, 100.0), (110.0, 95.0), DEFAULT_VELOCITY_MULTIPLIER))
            .unwrap();
        let rect = sim.spawn_gesture(SpawnGesture::boxed((300.0, 200.0), (302.0, 260.0))).unwrap();

        let ball = sim.get(ball).unwrap();
        assert_eq!(ball.position().x(), 100.0);
        assert_eq!(ball.velocity().dx(), 30.0);
        assert_eq!(ball.velocity().dy(), -15.0);

        let rect = sim.get(rect).unwrap().bounding_box();
        assert_eq!(rect.width(), MIN_BOX_SIDE);
        assert_eq!(rect.height(), 60.0);
        assert_eq!(rect.center(), (301.0, 230.0));
    }

    #[test]
    fn test_impulse_targets() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let ball = sim.spawn_ball(100.0, 100.0, 1.0, 0.0, 10.0).unwrap();
        let rect = sim.spawn_box(300.0, 300.0, 50.0, 50.0).unwrap();

        sim.apply_impulse(ball, 4.0, -2.0).unwrap();
        assert_eq!(sim.get(ball).unwrap().velocity().dx(), 5.0);
        assert!(matches!(sim.apply_impulse(rect, 1.0, 0.0), Err(SimError::StaticObject(_))));

        sim.clear();
        assert!(matches!(sim.apply_impulse(ball, 1.0, 0.0), Err(SimError::UnknownObject(id)) if id == ball));
    }

    #[test]
    fn test_launch_towards_caps_speed() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let id = sim.spawn_ball(100.0, 100.0, 0.0, 0.0, 10.0).unwrap();

        sim.launch_towards(id, 130.0, 140.0, DEFAULT_LAUNCH_SCALE, DEFAULT_MAX_LAUNCH_SPEED)
            .unwrap();
        let v = sim.get(id).unwrap().velocity();
        assert!((v.dx() - 60.0).abs() < 1e-9);
        assert!((v.dy() - 80.0).abs() < 1e-9);

        sim.launch_towards(id, 700.0, 100.0, DEFAULT_LAUNCH_SCALE, DEFAULT_MAX_LAUNCH_SPEED)
            .unwrap();
        assert!((sim.get(id).unwrap().velocity().dx() - 1000.0).abs() < 1e-9);

        // Target on the center leaves velocity alone
        sim.launch_towards(id, 100.0, 100.0, 2.0, 1000.0).unwrap();
        assert!((sim.get(id).unwrap().velocity().dx() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_leaves_one_default_ball() {
        let mut sim = Simulation::new(quiet()).unwrap();
        for _ in 0..5 {
            sim.spawn_default_ball().unwrap();
        }
        let id = sim.reset().unwrap();
        assert_eq!(sim.len(), 1);
        assert_eq!(sim.get(id).unwrap().position().x(), 400.0);
    }

    #[test]
    fn test_gravity_toggle_stops_fall() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let id = sim.spawn_ball(400.0, 100.0, 0.0, 0.0, 10.0).unwrap();
        assert!(!sim.toggle_gravity());
        for _ in 0..100 {
            sim.step(0.001);
        }
        assert_eq!(sim.get(id).unwrap().position().y(), 100.0);
    }

    #[test]
    fn test_invalid_dt_is_ignored() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let id = sim.spawn_ball(400.0, 100.0, 0.0, 0.0, 10.0).unwrap();
        sim.step(0.0);
        sim.step(f64::NAN);
        sim.step(-0.01);
        assert_eq!(sim.get(id).unwrap().position().y(), 100.0);
    }

    #[test]
    fn test_run_frame_counts_steps() {
        let mut sim = Simulation::new(quiet().with_fixed_step(0.125)).unwrap();
        sim.spawn_default_ball().unwrap();
        let summary = sim.run_frame(0.1875);
        assert_eq!(summary.steps, 2);
    }

    #[test]
    fn test_reset_discards_pending_time() {
        let mut sim = Simulation::new(quiet().with_fixed_step(0.125)).unwrap();
        assert_eq!(sim.accumulate_time(0.25), 0.25);
        assert_eq!(sim.pending_time(), 0.25);

        let id = sim.reset().unwrap();
        assert_eq!(sim.pending_time(), 0.0);
        assert_eq!(sim.step_pending(), None);
        assert_eq!(sim.get(id).unwrap().position().y(), DEFAULT_SPAWN_HEIGHT);
    }

    #[test]
    fn test_step_pending_drains_one_step_at_a_time() {
        let mut sim = Simulation::new(quiet().with_fixed_step(0.125)).unwrap();
        sim.accumulate_time(0.3125);
        assert_eq!(sim.step_pending(), Some(0));
        assert_eq!(sim.pending_time(), 0.1875);
        assert_eq!(sim.step_pending(), Some(0));
        assert_eq!(sim.step_pending(), Some(0));
        assert_eq!(sim.step_pending(), None);
        assert_eq!(sim.pending_time(), 0.0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_advance_matches_sequential() {
        let config = PhysicsConfig::default().with_max_objects(1024);
        let mut sim = Simulation::new(config).unwrap();
        for i in 0..(PARALLEL_THRESHOLD + 144) {
            let x = 30.0 + (i % 37) as f64 * 20.0;
            let y = 30.0 + (i / 37) as f64 * 40.0;
            let vx = (i % 7) as f64 * 15.0 - 45.0;
            let vy = (i % 5) as f64 * -20.0;
            sim.spawn_ball(x, y, vx, vy, 5.0).unwrap();
        }
        sim.spawn_box(400.0, 550.0, 200.0, 20.0).unwrap();
        assert!(sim.len() >= PARALLEL_THRESHOLD);

        let env = sim.environment();
        let mut expected: Vec<Object> = sim.objects().to_vec();
        for object in &mut expected {
            object.advance(0.001, &env);
        }

        sim.advance_all(0.001);
        assert_eq!(sim.objects(), expected.as_slice());
    }

    #[test]
    fn test_momentum_and_energy() {
        let mut sim = Simulation::new(quiet()).unwrap();
        sim.spawn_ball_with(100.0, 100.0, 3.0, 0.0, 10.0, 2.0, Color::WHITE).unwrap();
        sim.spawn_ball(300.0, 100.0, -1.0, 4.0, 10.0).unwrap();
        sim.spawn_box(500.0, 500.0, 10.0, 10.0).unwrap();

        assert_eq!(sim.momentum(), (5.0, 4.0));
        assert_eq!(sim.kinetic_energy(), 9.0 + 8.5);
    }

    #[test]
    fn test_target_fps_commands() {
        let mut sim = Simulation::new(quiet()).unwrap();
        assert_eq!(sim.toggle_target_fps(), HIGH_TARGET_FPS);
        assert!(sim.set_target_fps(0).is_err());
        sim.set_target_fps(30).unwrap();
        assert_eq!(sim.context().target_fps(), 30);
    }
}
