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
//! Arena boundary handling
//!
//! Applied to each ball after its free-motion step. A boundary only
//! reflects velocity directed into it, so a ball that is already
//! separating is clamped but not bounced a second time.

use super::Environment;
use crate::objects::Ball;

/// Boundaries touched during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryContacts {
    /// Bottom edge (`y = arena.height`)
    pub floor: bool,
    /// Top edge (`y = 0`)
    pub ceiling: bool,
    /// Left edge (`x = 0`)
    pub left: bool,
    /// Right edge (`x = arena.width`)
    pub right: bool,
}

impl BoundaryContacts {
    /// Whether any boundary was touched
    pub fn any(&self) -> bool {
        self.floor || self.ceiling || self.left || self.right
    }
}

/// Clamp a ball inside the arena, reflecting and damping velocity that
/// points into a boundary, then apply ground friction on floor contact
pub fn apply_boundaries(ball: &mut Ball, dt: f64, env: &Environment) -> BoundaryContacts {
    let r = ball.radius();
    let e = env.restitution;
    let width = env.arena.width;
    let height = env.arena.height;
    let mut contacts = BoundaryContacts::default();

    let mut pos = ball.position();
    let mut vel = ball.velocity();

    if pos.y() + r > height {
        pos.set_y(height - r);
        if vel.dy() > 0.0 {
            vel.set_dy(-vel.dy() * e);
        }
        vel.set_dx(apply_ground_friction(vel.dx(), env.friction_deceleration(), dt));
        contacts.floor = true;
    }

    if pos.y() - r < 0.0 {
        pos.set_y(r);
        if vel.dy() < 0.0 {
            vel.set_dy(-vel.dy() * e);
        }
        contacts.ceiling = true;
    }

    if pos.x() - r < 0.0 {
        pos.set_x(r);
        if vel.dx() < 0.0 {
            vel.set_dx(-vel.dx() * e);
        }
        contacts.left = true;
    }

    if pos.x() + r > width {
        pos.set_x(width - r);
        if vel.dx() > 0.0 {
            vel.set_dx(-vel.dx() * e);
        }
        contacts.right = true;
    }

    *ball.position_mut() = pos;
    *ball.velocity_mut() = vel;
    contacts
}

/// Reduce `|vx|` by `deceleration·dt`, stopping at zero instead of
/// reversing direction
pub fn apply_ground_friction(vx: f64, deceleration: f64, dt: f64) -> f64 {
    let delta = deceleration * dt;
    if vx.abs() <= delta {
        0.0
    } else {
        vx - delta.copysign(vx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use crate::objects::Velocity;

    fn env() -> Environment {
        let config = PhysicsConfig::default()
            .with_restitution(0.5)
            .with_ground_friction(0.5)
            .with_gravity(1000.0);
        Environment::new(&config, true)
    }

    #[test]
    fn test_floor_reflects_downward_motion() {
        let env = env();
        let mut ball = Ball::new(400.0, 595.0, 0.0, 200.0, 20.0);
        let contacts = apply_boundaries(&mut ball, 0.001, &env);

        assert!(contacts.floor);
        assert_eq!(ball.position().y(), 580.0);
        assert_eq!(ball.velocity().dy(), -100.0);
    }

    #[test]
    fn test_floor_does_not_reflect_separating_ball() {
        let env = env();
        let mut ball = Ball::new(400.0, 590.0, 0.0, -50.0, 20.0);
        apply_boundaries(&mut ball, 0.001, &env);

        assert_eq!(ball.position().y(), 580.0);
        assert_eq!(ball.velocity().dy(), -50.0);
    }

    #[test]
    fn test_floor_friction_slows_horizontal_motion() {
        let env = env();
        let mut ball = Ball::new(400.0, 585.0, 100.0, 0.0, 20.0);
        apply_boundaries(&mut ball, 0.01, &env);
        // μ·g·dt = 0.5 * 1000 * 0.01 = 5
        assert!((ball.velocity().dx() - 95.0).abs() < 1e-12);
    }

    #[test]
    fn test_ground_friction_clamps_to_zero() {
        assert_eq!(apply_ground_friction(3.0, 500.0, 0.01), 0.0);
        assert_eq!(apply_ground_friction(-3.0, 500.0, 0.01), 0.0);
        assert_eq!(apply_ground_friction(-10.0, 500.0, 0.01), -5.0);
        assert_eq!(apply_ground_friction(10.0, 0.0, 0.01), 10.0);
    }

    #[test]
    fn test_walls_and_ceiling() {
        let env = env();

        let mut left = Ball::new(5.0, 300.0, -40.0, 0.0, 10.0);
        assert!(apply_boundaries(&mut left, 0.001, &env).left);
        assert_eq!(left.position().x(), 10.0);
        assert_eq!(left.velocity(), Velocity::new(20.0, 0.0));

        let mut right = Ball::new(795.0, 300.0, 40.0, 0.0, 10.0);
        assert!(apply_boundaries(&mut right, 0.001, &env).right);
        assert_eq!(right.position().x(), 790.0);
        assert_eq!(right.velocity().dx(), -20.0);

        let mut top = Ball::new(400.0, 2.0, 0.0, -60.0, 10.0);
        assert!(apply_boundaries(&mut top, 0.001, &env).ceiling);
        assert_eq!(top.position().y(), 10.0);
        assert_eq!(top.velocity().dy(), 30.0);
    }

    #[test]
    fn test_interior_ball_untouched() {
        let env = env();
        let mut ball = Ball::new(400.0, 300.0, 10.0, -10.0, 10.0);
        let before = ball.clone();
        let contacts = apply_boundaries(&mut ball, 0.001, &env);
        assert!(!contacts.any());
        assert_eq!(ball, before);
    }
}
