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
//! Drawing contract for whatever displays the simulation
//!
//! The crate does not open windows. A front end implements [`Renderer`] on
//! top of its graphics library and calls [`render_scene`] with a borrowed
//! [`Simulation`], typically from inside
//! [`SimulationRunner::with_scene`](crate::simulation::SimulationRunner::with_scene)
//! so the whole frame is drawn from one consistent snapshot.

use crate::objects::{Aabb, Color};
use crate::simulation::Simulation;

/// Primitive drawing operations in arena coordinates (pixels, +y down)
pub trait Renderer {
    /// Filled circle centered at `(x, y)`
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color);

    /// Filled rectangle
    fn fill_rect(&mut self, rect: &Aabb, color: Color);

    /// Rectangle outline
    fn stroke_rect(&mut self, rect: &Aabb, color: Color);

    /// Text with its top-left corner at `(x, y)`
    fn draw_text(&mut self, x: f64, y: f64, text: &str, color: Color);
}

/// Which overlays to draw on top of the shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// `v: (vx, vy)` label above each ball
    pub show_velocity: bool,
    /// Bounding box outline around every object
    pub debug: bool,
    /// FPS, gravity state and object count in the top-left corner
    pub show_hud: bool,
}

/// Draw every object in collection order, then the requested overlays
pub fn render_scene(simulation: &Simulation, renderer: &mut dyn Renderer, options: RenderOptions) {
    for object in simulation.objects() {
        object.render(renderer);
        if options.show_velocity {
            object.render_velocity_info(renderer);
        }
        if options.debug {
            object.render_debug_overlay(renderer);
        }
    }

    if options.show_hud {
        let context = simulation.context();
        let lines = [
            format!("FPS: {:.0}", context.fps().current()),
            format!("Gravity: {}", if context.gravity_enabled() { "ON" } else { "OFF" }),
            format!("Objects: {}", simulation.len()),
        ];
        for (row, line) in lines.iter().enumerate() {
            renderer.draw_text(10.0, 10.0 + row as f64 * 20.0, line, Color::WHITE);
        }
    }
}
