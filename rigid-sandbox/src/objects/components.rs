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
//! Kinematic state shared by every object
//!
//! Positions and velocities are expressed in pixels and pixels per second.
//! Values use double precision; the collision code reads and writes the
//! raw components through the accessor pairs below.

use serde::{Deserialize, Serialize};

/// 2D position of an object's center in pixels
///
/// # Examples
///
/// ```
/// use rigid_sandbox::objects::Position;
///
/// let pos = Position::new(400.0, 100.0);
/// assert_eq!(pos.x(), 400.0);
/// assert!(pos.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Create a new position with the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Create a position at the origin (top-left corner of the arena)
    pub fn zero() -> Self {
        Position::new(0.0, 0.0)
    }

    /// Get the x coordinate
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y coordinate
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Set the x coordinate
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Set the y coordinate
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Shift the position by the given offset
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Euclidean distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Check if both coordinates are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::zero()
    }
}

/// 2D velocity in pixels per second
///
/// ```
/// use rigid_sandbox::objects::Velocity;
///
/// let vel = Velocity::new(3.0, 4.0);
/// assert_eq!(vel.magnitude(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    dx: f64,
    dy: f64,
}

impl Velocity {
    /// Create a new velocity with the given components
    pub fn new(dx: f64, dy: f64) -> Self {
        Velocity { dx, dy }
    }

    /// Create a zero velocity (at rest)
    pub fn zero() -> Self {
        Velocity::new(0.0, 0.0)
    }

    /// Get the x component
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Get the y component
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Set the x component
    pub fn set_dx(&mut self, dx: f64) {
        self.dx = dx;
    }

    /// Set the y component
    pub fn set_dy(&mut self, dy: f64) {
        self.dy = dy;
    }

    /// Add a velocity change to both components
    pub fn add(&mut self, ddx: f64, ddy: f64) {
        self.dx += ddx;
        self.dy += ddy;
    }

    /// Dot product with an arbitrary direction
    pub fn dot(&self, nx: f64, ny: f64) -> f64 {
        self.dx * nx + self.dy * ny
    }

    /// Calculate the magnitude (speed) of the velocity vector
    pub fn magnitude(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Velocity::zero()
    }
}

/// Mass of a dynamic body
///
/// Static boxes carry no `Mass`; they participate in collisions with an
/// inverse mass of zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mass {
    value: f64,
}

impl Mass {
    /// Create a new mass
    ///
    /// # Panics
    ///
    /// Panics if the mass is not positive and finite. For fallible
    /// construction, use `try_new`.
    pub fn new(value: f64) -> Self {
        assert!(value > 0.0 && value.is_finite(), "Mass must be positive and finite");
        Mass { value }
    }

    /// Try to create a new mass, returning `None` for non-positive or non-finite values
    pub fn try_new(value: f64) -> Option<Self> {
        if value > 0.0 && value.is_finite() {
            Some(Mass { value })
        } else {
            None
        }
    }

    /// Get the mass value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get the inverse mass (1/m) used by the impulse solver
    pub fn inverse(&self) -> f64 {
        1.0 / self.value
    }
}

impl Default for Mass {
    fn default() -> Self {
        Mass::new(1.0)
    }
}

/// RGBA color handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Color {
    /// Default ball color
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Default box color
    pub const GRAY: Color = Color::rgb(180, 180, 180);
    /// Debug overlay color
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    /// Mass-aware ball color
    pub const RED: Color = Color::rgb(255, 0, 0);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_translate() {
        let mut pos = Position::new(1.0, 2.0);
        pos.translate(0.5, -1.0);
        assert_eq!(pos, Position::new(1.5, 1.0));
    }

    #[test]
    fn test_position_validation() {
        assert!(Position::new(1.0, 2.0).is_valid());
        assert!(!Position::new(f64::NAN, 2.0).is_valid());
        assert!(!Position::new(1.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_velocity_dot() {
        let vel = Velocity::new(2.0, -3.0);
        assert_eq!(vel.dot(1.0, 0.0), 2.0);
        assert_eq!(vel.dot(0.0, 1.0), -3.0);
    }

    #[test]
    fn test_velocity_validation() {
        assert!(Velocity::new(1.0, 2.0).is_valid());
        assert!(!Velocity::new(f64::NAN, 2.0).is_valid());
    }

    #[test]
    fn test_mass_try_new() {
        assert_eq!(Mass::try_new(2.0).map(|m| m.value()), Some(2.0));
        assert!(Mass::try_new(0.0).is_none());
        assert!(Mass::try_new(-1.0).is_none());
        assert!(Mass::try_new(f64::NAN).is_none());
        assert!(Mass::try_new(f64::INFINITY).is_none());
    }

    #[test]
    #[should_panic(expected = "Mass must be positive and finite")]
    fn test_mass_zero_panics() {
        Mass::new(0.0);
    }

    #[test]
    fn test_mass_inverse() {
        assert_eq!(Mass::new(2.0).inverse(), 0.5);
        assert_eq!(Mass::new(100.0).inverse(), 0.01);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Position::default(), Position::zero());
        assert_eq!(Velocity::default(), Velocity::zero());
        assert_eq!(Mass::default().value(), 1.0);
        assert_eq!(Color::default(), Color::WHITE);
    }
}
