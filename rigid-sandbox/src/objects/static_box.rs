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
//! Static axis-aligned rectangles

use super::components::{Color, Position};
use super::Aabb;

/// A static rectangle described by its center and size
///
/// Boxes never move: their velocity is always zero, `advance` is a no-op,
/// and the collision resolver never writes to them.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBox {
    position: Position,
    width: f64,
    height: f64,
    color: Color,
}

impl StaticBox {
    /// Create a box centred on `(x, y)`
    ///
    /// # Panics
    ///
    /// Panics if either dimension is not positive and finite.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        assert!(
            width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite(),
            "Box dimensions must be positive and finite"
        );
        StaticBox {
            position: Position::new(x, y),
            width,
            height,
            color: Color::GRAY,
        }
    }

    /// Replace the box's color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Center position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Width in pixels
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Render color
    pub fn color(&self) -> Color {
        self.color
    }

    /// The box's own rectangle
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_center(self.position.x(), self.position.y(), self.width, self.height)
    }
}
