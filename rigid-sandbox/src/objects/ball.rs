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
//! Dynamic circular bodies

use super::components::{Color, Mass, Position, Velocity};
use super::Aabb;
use crate::integration::{self, Environment};

/// A dynamic circle affected by gravity, drag, boundaries and collisions
///
/// # Examples
///
/// ```
/// use rigid_sandbox::objects::{Ball, Mass};
///
/// let ball = Ball::new(400.0, 100.0, 0.0, 0.0, 20.0).with_mass(Mass::new(2.0));
/// assert_eq!(ball.radius(), 20.0);
/// assert_eq!(ball.inverse_mass(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    position: Position,
    velocity: Velocity,
    radius: f64,
    mass: Mass,
    color: Color,
}

impl Ball {
    /// Create a ball with unit mass and the default color
    ///
    /// # Panics
    ///
    /// Panics if the radius is not positive and finite. The simulation's
    /// spawn commands validate the radius and report `SimError::InvalidShape`
    /// instead.
    pub fn new(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Self {
        assert!(
            radius > 0.0 && radius.is_finite(),
            "Radius must be positive and finite"
        );
        Ball {
            position: Position::new(x, y),
            velocity: Velocity::new(vx, vy),
            radius,
            mass: Mass::default(),
            color: Color::default(),
        }
    }

    /// Replace the ball's mass
    pub fn with_mass(mut self, mass: Mass) -> Self {
        self.mass = mass;
        self
    }

    /// Replace the ball's color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Current center position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Mutable access to the center position
    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Mutable access to the velocity
    pub fn velocity_mut(&mut self) -> &mut Velocity {
        &mut self.velocity
    }

    /// Radius in pixels
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Mass of the ball
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Inverse mass used by the impulse solver
    pub fn inverse_mass(&self) -> f64 {
        self.mass.inverse()
    }

    /// Render color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Square of side `2 * radius` centred on the ball
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_center(
            self.position.x(),
            self.position.y(),
            2.0 * self.radius,
            2.0 * self.radius,
        )
    }

    /// Integrate free motion over `dt` and then apply arena boundaries
    ///
    /// Each axis is integrated as an independent 1-D ODE with the configured
    /// integrator. A step that would produce a non-finite state is discarded
    /// and the ball keeps its previous state.
    pub fn advance(&mut self, dt: f64, env: &Environment) {
        let Some((position, velocity)) = integration::integrate_free_motion(self, dt, env) else {
            log::warn!(
                "Discarding non-finite integration result for ball at ({:.3}, {:.3})",
                self.position.x(),
                self.position.y()
            );
            return;
        };
        self.position = position;
        self.velocity = velocity;
        integration::apply_boundaries(self, dt, env);
    }

    /// Kinetic energy `½·m·|v|²`
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass.value() * self.velocity.magnitude().powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_creation() {
        let ball = Ball::new(1.0, 2.0, 3.0, 4.0, 5.0);
        assert_eq!(ball.position(), Position::new(1.0, 2.0));
        assert_eq!(ball.velocity(), Velocity::new(3.0, 4.0));
        assert_eq!(ball.radius(), 5.0);
        assert_eq!(ball.mass().value(), 1.0);
        assert_eq!(ball.color(), Color::WHITE);
    }

    #[test]
    #[should_panic(expected = "Radius must be positive and finite")]
    fn test_zero_radius_panics() {
        Ball::new(0.0, 0.0, 0.0, 0.0, 0.0);
    }

    #[test]
    fn test_bounding_box_follows_position() {
        let mut ball = Ball::new(10.0, 20.0, 0.0, 0.0, 5.0);
        assert_eq!(ball.bounding_box(), Aabb::new(5.0, 15.0, 15.0, 25.0));

        ball.position_mut().translate(1.0, 1.0);
        assert_eq!(ball.bounding_box(), Aabb::new(6.0, 16.0, 16.0, 26.0));
    }

    #[test]
    fn test_kinetic_energy() {
        let ball = Ball::new(0.0, 0.0, 3.0, 4.0, 1.0).with_mass(Mass::new(2.0));
        assert_eq!(ball.kinetic_energy(), 25.0);
    }
}
