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
//! Error types for the sandbox
//!
//! The numeric core (integration and collision resolution) is infallible.
//! Errors only arise at the edges: validating configuration, spawning
//! objects with invalid shapes, addressing objects that no longer exist,
//! and managing the simulation thread.

use crate::objects::ObjectId;
use thiserror::Error;

/// A configuration value was out of range
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Arena width or height was non-positive or non-finite
    #[error("arena dimensions must be positive and finite, got {width}x{height}")]
    InvalidArena {
        /// Requested width
        width: f64,
        /// Requested height
        height: f64,
    },

    /// Gravity was NaN or infinite
    #[error("gravity must be finite, got {0}")]
    InvalidGravity(f64),

    /// Restitution outside of [0, 1]
    #[error("restitution must lie in [0, 1], got {0}")]
    InvalidRestitution(f64),

    /// Negative or non-finite friction coefficient
    #[error("{which} friction must be non-negative and finite, got {value}")]
    InvalidFriction {
        /// Which coefficient was rejected ("ground" or "contact")
        which: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Negative or non-finite drag parameter
    #[error("drag parameter {name} must be non-negative and finite, got {value}")]
    InvalidDrag {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: f64,
    },

    /// Fixed step was non-positive or non-finite
    #[error("fixed step must be positive and finite, got {0}")]
    InvalidStep(f64),

    /// Fixed step no larger than the accumulator's remainder tolerance
    #[error("fixed step {fixed_step} must be larger than {minimum}")]
    StepTooSmall {
        /// Requested step
        fixed_step: f64,
        /// Smallest step the accumulator can tell apart from rounding noise
        minimum: f64,
    },

    /// Frame delta clamp smaller than a single fixed step
    #[error("max frame delta {max_frame_delta} must be at least the fixed step {fixed_step}")]
    InvalidFrameDelta {
        /// Requested clamp
        max_frame_delta: f64,
        /// Configured fixed step
        fixed_step: f64,
    },

    /// Object capacity of zero
    #[error("object capacity must be at least 1")]
    ZeroCapacity,
}

/// Errors raised by simulation commands and the simulation thread
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A spawned shape had a non-positive or non-finite dimension
    #[error("{what} must be positive and finite, got {value}")]
    InvalidShape {
        /// Dimension name ("radius", "width", "height", "mass")
        what: &'static str,
        /// Rejected value
        value: f64,
    },

    /// The object collection is full
    #[error("object capacity of {limit} reached")]
    CapacityExceeded {
        /// Configured capacity
        limit: usize,
    },

    /// No object carries this id (never spawned or already cleared)
    #[error("no object with id {0}")]
    UnknownObject(ObjectId),

    /// Boxes are static and never change velocity
    #[error("{0} is static and cannot be moved")]
    StaticObject(ObjectId),

    /// Target frame rate of zero
    #[error("target frame rate must be at least 1")]
    InvalidFrameRate,

    /// The simulation thread could not be spawned
    #[error("failed to spawn simulation thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),

    /// `start` was called while the thread was already running
    #[error("simulation thread is already running")]
    AlreadyRunning,

    /// The simulation thread panicked before it could be joined
    #[error("simulation thread panicked")]
    WorkerPanicked,
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SimError>;
