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
//! Simulation configuration
//!
//! All lengths are in pixels and all times in seconds. The arena origin is
//! the top-left corner with +y pointing down, so gravity is positive and
//! the floor sits at `y = arena.height`.
//!
//! ```
//! use rigid_sandbox::config::PhysicsConfig;
//! use rigid_sandbox::integration::DragModel;
//!
//! let config = PhysicsConfig::default()
//!     .with_restitution(0.9)
//!     .with_drag(DragModel::None);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::ConfigError;
use crate::integration::{DragModel, IntegrationMethod};
use crate::simulation::REMAINDER_EPSILON;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rectangular play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Arena {
    /// Create an arena of the given size
    pub fn new(width: f64, height: f64) -> Self {
        Arena { width, height }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new(800.0, 600.0)
    }
}

/// Physical constants and loop tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Arena extents
    pub arena: Arena,
    /// Gravitational acceleration in px/s² along +y
    pub gravity: f64,
    /// Drag model applied to balls
    pub drag: DragModel,
    /// Restitution for boundaries and contacts, in [0, 1]
    pub restitution: f64,
    /// Ground friction coefficient μ (deceleration `μ·g`)
    pub ground_friction: f64,
    /// Tangential friction coefficient for ball contacts; 0 disables it
    pub contact_friction: f64,
    /// Integration scheme
    pub method: IntegrationMethod,
    /// Fixed simulation step in seconds
    pub fixed_step: f64,
    /// Sleep between accumulator drains on the simulation thread
    pub idle_sleep: Duration,
    /// Maximum number of objects accepted by spawn commands
    pub max_objects: usize,
    /// Wall-clock frame deltas above this are clamped, in seconds
    pub max_frame_delta: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            arena: Arena::default(),
            gravity: 980.0,
            drag: DragModel::default(),
            restitution: 0.7,
            ground_friction: 0.5,
            contact_friction: 0.0,
            method: IntegrationMethod::Rk4,
            fixed_step: 0.001,
            idle_sleep: Duration::from_micros(100),
            max_objects: 4096,
            max_frame_delta: 0.25,
        }
    }
}

impl PhysicsConfig {
    /// Set the arena size
    pub fn with_arena(mut self, width: f64, height: f64) -> Self {
        self.arena = Arena::new(width, height);
        self
    }

    /// Set gravitational acceleration
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the drag model
    pub fn with_drag(mut self, drag: DragModel) -> Self {
        self.drag = drag;
        self
    }

    /// Set the restitution coefficient
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set the ground friction coefficient
    pub fn with_ground_friction(mut self, mu: f64) -> Self {
        self.ground_friction = mu;
        self
    }

    /// Set the contact friction coefficient
    pub fn with_contact_friction(mut self, mu: f64) -> Self {
        self.contact_friction = mu;
        self
    }

    /// Set the integration scheme
    pub fn with_method(mut self, method: IntegrationMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the fixed step
    pub fn with_fixed_step(mut self, fixed_step: f64) -> Self {
        self.fixed_step = fixed_step;
        self
    }

    /// Set the idle sleep between accumulator drains
    pub fn with_idle_sleep(mut self, idle_sleep: Duration) -> Self {
        self.idle_sleep = idle_sleep;
        self
    }

    /// Set the object capacity
    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = max_objects;
        self
    }

    /// Set the frame delta clamp
    pub fn with_max_frame_delta(mut self, max_frame_delta: f64) -> Self {
        self.max_frame_delta = max_frame_delta;
        self
    }

    /// Check every field, reporting the first one out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Arena { width, height } = self.arena;
        if !(width > 0.0 && width.is_finite() && height > 0.0 && height.is_finite()) {
            return Err(ConfigError::InvalidArena { width, height });
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::InvalidGravity(self.gravity));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::InvalidRestitution(self.restitution));
        }
        check_non_negative(self.ground_friction).map_err(|value| ConfigError::InvalidFriction {
            which: "ground",
            value,
        })?;
        check_non_negative(self.contact_friction).map_err(|value| ConfigError::InvalidFriction {
            which: "contact",
            value,
        })?;
        match self.drag {
            DragModel::None => {}
            DragModel::Linear { k } => {
                check_non_negative(k).map_err(|value| ConfigError::InvalidDrag { name: "k", value })?;
            }
            DragModel::Quadratic {
                fluid_density,
                drag_coefficient,
            } => {
                check_non_negative(fluid_density).map_err(|value| ConfigError::InvalidDrag {
                    name: "fluid_density",
                    value,
                })?;
                check_non_negative(drag_coefficient).map_err(|value| ConfigError::InvalidDrag {
                    name: "drag_coefficient",
                    value,
                })?;
            }
        }
        if !(self.fixed_step > 0.0 && self.fixed_step.is_finite()) {
            return Err(ConfigError::InvalidStep(self.fixed_step));
        }
        if self.fixed_step <= REMAINDER_EPSILON {
            return Err(ConfigError::StepTooSmall {
                fixed_step: self.fixed_step,
                minimum: REMAINDER_EPSILON,
            });
        }
        if !(self.max_frame_delta >= self.fixed_step && self.max_frame_delta.is_finite()) {
            return Err(ConfigError::InvalidFrameDelta {
                max_frame_delta: self.max_frame_delta,
                fixed_step: self.fixed_step,
            });
        }
        if self.max_objects == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

fn check_non_negative(value: f64) -> Result<(), f64> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(value)
    }
}
