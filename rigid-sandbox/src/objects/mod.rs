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
//! Entity model: balls, boxes and the `Object` sum type
//!
//! The simulation stores a flat sequence of [`Object`] values. Dispatch
//! over the two variants is an explicit `match`; there is no trait object
//! per entity.
//!
//! | Capability | Ball | Box |
//! |---|---|---|
//! | `advance(dt)` | integrate + boundaries | no-op |
//! | `bounding_box()` | square of side `2r` | own rectangle |
//! | `render()` | filled circle | filled rectangle |
//! | `render_debug_overlay()` | bounding box outline | bounding box outline |

mod ball;
mod components;
mod static_box;

pub use ball::Ball;
pub use components::{Color, Mass, Position, Velocity};
pub use static_box::StaticBox;

use crate::integration::Environment;
use crate::render::Renderer;
use std::fmt;

/// Stable handle to an object in the simulation
///
/// Ids are assigned in increasing order and never reused, so a handle held
/// by the input layer can never alias a newer object after a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Create an id from a raw value
    pub fn new(id: u64) -> Self {
        ObjectId(id)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object({})", self.0)
    }
}

/// Axis-aligned bounding box in arena coordinates (+y points down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Left edge
    pub min_x: f64,
    /// Top edge
    pub min_y: f64,
    /// Right edge
    pub max_x: f64,
    /// Bottom edge
    pub max_y: f64,
}

impl Aabb {
    /// Create a box from its edges
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Aabb { min_x, min_y, max_x, max_y }
    }

    /// Create a box from its center and size
    pub fn from_center(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Aabb::new(cx - hw, cy - hh, cx + hw, cy + hh)
    }

    /// Width of the box
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center of the box
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// Whether the interiors intersect; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Overlap extent along x (negative when separated)
    pub fn overlap_x(&self, other: &Aabb) -> f64 {
        self.max_x.min(other.max_x) - self.min_x.max(other.min_x)
    }

    /// Overlap extent along y (negative when separated)
    pub fn overlap_y(&self, other: &Aabb) -> f64 {
        self.max_y.min(other.max_y) - self.min_y.max(other.min_y)
    }

    /// Closest point inside the box to `(x, y)`
    pub fn closest_point(&self, x: f64, y: f64) -> (f64, f64) {
        (x.clamp(self.min_x, self.max_x), y.clamp(self.min_y, self.max_y))
    }
}

/// Static/dynamic classification of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Dynamic circle
    Ball,
    /// Static rectangle
    Box,
}

/// A simulated entity
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Dynamic circle
    Ball(Ball),
    /// Static rectangle
    Box(StaticBox),
}

impl Object {
    /// Variant tag
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Ball(_) => ObjectKind::Ball,
            Object::Box(_) => ObjectKind::Box,
        }
    }

    /// Boxes are static, balls are dynamic
    pub fn is_static(&self) -> bool {
        matches!(self, Object::Box(_))
    }

    /// Center position
    pub fn position(&self) -> Position {
        match self {
            Object::Ball(ball) => ball.position(),
            Object::Box(b) => b.position(),
        }
    }

    /// Current velocity; always zero for boxes
    pub fn velocity(&self) -> Velocity {
        match self {
            Object::Ball(ball) => ball.velocity(),
            Object::Box(_) => Velocity::zero(),
        }
    }

    /// Inverse mass; zero for boxes (infinite mass)
    pub fn inverse_mass(&self) -> f64 {
        match self {
            Object::Ball(ball) => ball.inverse_mass(),
            Object::Box(_) => 0.0,
        }
    }

    /// Advance the object by `dt` seconds
    pub fn advance(&mut self, dt: f64, env: &Environment) {
        match self {
            Object::Ball(ball) => ball.advance(dt, env),
            Object::Box(_) => {}
        }
    }

    /// Minimal axis-aligned rectangle enclosing the object's current state
    pub fn bounding_box(&self) -> Aabb {
        match self {
            Object::Ball(ball) => ball.bounding_box(),
            Object::Box(b) => b.bounding_box(),
        }
    }

    /// Borrow the ball if this is a dynamic object
    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            Object::Ball(ball) => Some(ball),
            Object::Box(_) => None,
        }
    }

    /// Mutably borrow the ball if this is a dynamic object
    pub fn as_ball_mut(&mut self) -> Option<&mut Ball> {
        match self {
            Object::Ball(ball) => Some(ball),
            Object::Box(_) => None,
        }
    }

    /// Draw the object's shape
    pub fn render(&self, renderer: &mut dyn Renderer) {
        match self {
            Object::Ball(ball) => {
                let pos = ball.position();
                renderer.fill_circle(pos.x(), pos.y(), ball.radius(), ball.color());
            }
            Object::Box(b) => renderer.fill_rect(&b.bounding_box(), b.color()),
        }
    }

    /// Draw the `v: (vx, vy)` label above a ball; boxes draw nothing
    pub fn render_velocity_info(&self, renderer: &mut dyn Renderer) {
        if let Object::Ball(ball) = self {
            let pos = ball.position();
            let vel = ball.velocity();
            let label = format!("v: ({}, {})", vel.dx() as i64, vel.dy() as i64);
            renderer.draw_text(pos.x(), pos.y() - ball.radius() - 2.0, &label, Color::WHITE);
        }
    }

    /// Outline the bounding box
    pub fn render_debug_overlay(&self, renderer: &mut dyn Renderer) {
        renderer.stroke_rect(&self.bounding_box(), Color::GREEN);
    }
}

impl From<Ball> for Object {
    fn from(ball: Ball) -> Self {
        Object::Ball(ball)
    }
}

impl From<StaticBox> for Object {
    fn from(b: StaticBox) -> Self {
        Object::Box(b)
    }
}
