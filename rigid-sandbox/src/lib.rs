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
//! # Rigid Sandbox
//!
//! A 2D rigid-body sandbox: dynamic balls and static boxes under gravity,
//! drag and ground friction, with pairwise collision resolution and a
//! fixed-timestep simulation thread.
//!
//! ## Features
//!
//! - **Integration**: per-axis 4-stage Runge–Kutta (default) or explicit Euler
//! - **Boundaries**: floor, walls and ceiling with restitution and Coulomb ground friction
//! - **Collisions**: impulse-based ball–ball and ball–box response, plus a bounding-box fallback
//! - **Threading**: a runner that steps the world on its own thread behind one lock
//! - **Parallelization**: optional Rayon integration of large object sets
//!
//! ## Example
//!
//! ```rust
//! use rigid_sandbox::config::PhysicsConfig;
//! use rigid_sandbox::simulation::Simulation;
//!
//! let mut sim = Simulation::new(PhysicsConfig::default()).unwrap();
//! let ball = sim.spawn_ball(400.0, 100.0, 0.0, 0.0, 20.0).unwrap();
//! sim.spawn_box(400.0, 400.0, 200.0, 20.0).unwrap();
//!
//! for _ in 0..1000 {
//!     sim.step(0.001);
//! }
//! assert!(sim.get(ball).unwrap().position().y() > 100.0);
//! ```

#![warn(missing_docs)]

/// Physical constants and loop tuning
pub mod config;

/// Error types
pub mod error;

/// Balls, boxes and their components
pub mod objects;

/// Numerical integration and boundary handling
pub mod integration;

/// Pairwise collision detection and response
pub mod collision;

/// Object collection, stepping and the simulation thread
pub mod simulation;

/// Drawing contract for front ends
pub mod render;

pub use config::PhysicsConfig;
pub use error::{ConfigError, Result, SimError};
pub use objects::{Ball, Object, ObjectId, StaticBox};
pub use simulation::{Simulation, SimulationRunner};
