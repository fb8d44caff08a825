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
//! Numerical integration of ball motion
//!
//! Each ball's axes are integrated as decoupled 1-D ODEs:
//!
//! ```text
//! dx/dt = v
//! dv/dt = a(x, v)
//! ```
//!
//! where `a` is gravity (vertical axis only, when enabled) plus drag. After
//! the free-motion step the ball is clamped against the arena boundaries.
//!
//! # Integrators
//!
//! - **RK4 (Runge-Kutta 4th order)**: the default. Four acceleration samples
//!   per step; keeps bounce heights stable at the millisecond step sizes the
//!   simulation thread uses.
//! - **Explicit Euler**: one sample per step, `v += a·dt; x += v·dt`.
//!
//! The method is chosen once in [`PhysicsConfig`](crate::config::PhysicsConfig)
//! and applies to every ball.

use crate::config::{Arena, PhysicsConfig};
use crate::objects::{Ball, Position, Velocity};
use serde::{Deserialize, Serialize};

mod boundary;
mod euler;
mod forces;
mod rk4;

pub use boundary::{apply_boundaries, apply_ground_friction, BoundaryContacts};
pub use euler::EulerIntegrator;
pub use forces::{DragModel, MIN_DRAG_SPEED_SQ};
pub use rk4::RK4Integrator;

/// Position and velocity along a single axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisState {
    /// Coordinate along the axis
    pub position: f64,
    /// Velocity along the axis
    pub velocity: f64,
}

impl AxisState {
    /// Create a new axis state
    pub fn new(position: f64, velocity: f64) -> Self {
        AxisState { position, velocity }
    }

    /// Check if both values are finite
    pub fn is_valid(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Trait for single-axis integration schemes
///
/// `acceleration` receives the stage position and velocity and returns the
/// acceleration at that sample point.
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Advance one axis by `dt`
    fn step_axis<F>(&self, state: AxisState, dt: f64, acceleration: F) -> AxisState
    where
        F: Fn(f64, f64) -> f64;
}

/// Integration scheme applied to every ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationMethod {
    /// Classical 4-stage Runge-Kutta
    #[default]
    Rk4,
    /// Explicit Euler
    Euler,
}

impl IntegrationMethod {
    /// Human readable name of the selected integrator
    pub fn name(&self) -> &str {
        match self {
            IntegrationMethod::Rk4 => RK4Integrator.name(),
            IntegrationMethod::Euler => EulerIntegrator.name(),
        }
    }

    /// Advance one axis with the selected integrator
    pub fn step_axis<F>(&self, state: AxisState, dt: f64, acceleration: F) -> AxisState
    where
        F: Fn(f64, f64) -> f64,
    {
        match self {
            IntegrationMethod::Rk4 => RK4Integrator.step_axis(state, dt, acceleration),
            IntegrationMethod::Euler => EulerIntegrator.step_axis(state, dt, acceleration),
        }
    }
}

/// Per-tick physical environment derived from the configuration and the
/// simulation context
///
/// Built once per step under the collection lock and shared read-only by
/// every ball, so a gravity toggle never takes effect halfway through a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    /// Effective vertical acceleration (zero when gravity is disabled)
    pub gravity: f64,
    /// Drag model
    pub drag: DragModel,
    /// Boundary restitution coefficient
    pub restitution: f64,
    /// Ground friction coefficient μ
    pub ground_friction: f64,
    /// Arena extents
    pub arena: Arena,
    /// Integration scheme
    pub method: IntegrationMethod,
}

impl Environment {
    /// Build the environment for the current step
    pub fn new(config: &PhysicsConfig, gravity_enabled: bool) -> Self {
        Environment {
            gravity: if gravity_enabled { config.gravity } else { 0.0 },
            drag: config.drag,
            restitution: config.restitution,
            ground_friction: config.ground_friction,
            arena: config.arena,
            method: config.method,
        }
    }

    /// Deceleration applied to horizontal motion while on the floor
    ///
    /// Coulomb friction `μ·m·g / m`; the mass cancels.
    pub fn friction_deceleration(&self) -> f64 {
        self.ground_friction * self.gravity.abs()
    }
}

/// Integrate a ball's free motion (no boundaries) over `dt`
///
/// Returns `None` if the result is not finite. The other axis' velocity is
/// held at its start-of-step value while evaluating quadratic drag so that
/// the two axes stay decoupled.
pub fn integrate_free_motion(ball: &Ball, dt: f64, env: &Environment) -> Option<(Position, Velocity)> {
    let pos = ball.position();
    let vel = ball.velocity();
    let area = std::f64::consts::PI * ball.radius() * ball.radius();
    let inv_mass = ball.inverse_mass();
    let drag = env.drag;
    let (vx0, vy0) = (vel.dx(), vel.dy());

    let x = env.method.step_axis(AxisState::new(pos.x(), vx0), dt, |_, v| {
        drag.acceleration(v, vy0, area, inv_mass)
    });
    let y = env.method.step_axis(AxisState::new(pos.y(), vy0), dt, |_, v| {
        env.gravity + drag.acceleration(v, vx0, area, inv_mass)
    });

    if !x.is_valid() || !y.is_valid() {
        return None;
    }
    Some((
        Position::new(x.position, y.position),
        Velocity::new(x.velocity, y.velocity),
    ))
}
