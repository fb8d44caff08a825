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
//! Fixed-timestep accumulator
//!
//! Wall-clock time is added with [`FixedTimestep::accumulate`] and turned
//! into simulation steps with [`FixedTimestep::drain`]: whole multiples of
//! the fixed step first, then a single partial step with whatever is left.
//! The partial step consumes the remainder, so the accumulator is empty
//! after every drain.
//!
//! ```
//! use rigid_sandbox::simulation::FixedTimestep;
//!
//! let mut timestep = FixedTimestep::new(0.25, 1.0);
//! timestep.accumulate(0.625);
//! let steps: Vec<f64> = timestep.drain().collect();
//! assert_eq!(steps, vec![0.25, 0.25, 0.125]);
//! ```

use crate::config::PhysicsConfig;
use log::{trace, warn};

/// Leftover time below this is dropped instead of producing a partial step
pub const REMAINDER_EPSILON: f64 = 1e-9;

/// Accumulates frame time and plans fixed-size steps
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    step: f64,
    max_delta: f64,
    accumulator: f64,
}

impl FixedTimestep {
    /// Create an accumulator with the given step and per-frame clamp
    pub fn new(step: f64, max_delta: f64) -> Self {
        FixedTimestep {
            step,
            max_delta,
            accumulator: 0.0,
        }
    }

    /// Take the step and clamp from a configuration
    pub fn from_config(config: &PhysicsConfig) -> Self {
        FixedTimestep::new(config.fixed_step, config.max_frame_delta)
    }

    /// Fixed step size in seconds
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Time waiting to be simulated
    pub fn accumulated(&self) -> f64 {
        self.accumulator
    }

    /// Add a wall-clock delta; returns the amount actually added
    ///
    /// Deltas longer than the clamp are cut short so a stalled thread does
    /// not try to catch up on seconds of simulation at once. Negative or
    /// non-finite deltas add nothing.
    pub fn accumulate(&mut self, delta: f64) -> f64 {
        if !delta.is_finite() || delta <= 0.0 {
            return 0.0;
        }
        let added = if delta > self.max_delta {
            warn!(
                "Frame delta {:.3}s exceeds {:.3}s, clamping",
                delta, self.max_delta
            );
            self.max_delta
        } else {
            delta
        };
        self.accumulator += added;
        added
    }

    /// Plan the steps for the accumulated time
    pub fn drain(&mut self) -> Drain<'_> {
        trace!("Draining {:.6}s in steps of {}s", self.accumulator, self.step);
        Drain { timestep: self }
    }

    /// Take the next planned step out of the accumulator
    ///
    /// Leftover time within the tolerance of a whole step counts as one.
    /// The tolerance never exceeds half a step, so every whole step
    /// consumes time and a drain always ends. A step that is not positive
    /// and finite plans no whole steps at all.
    pub fn next_step(&mut self) -> Option<f64> {
        let step = self.step;
        if step > 0.0 && step.is_finite() {
            let tolerance = REMAINDER_EPSILON.min(step * 0.5);
            if self.accumulator >= step - tolerance {
                self.accumulator = (self.accumulator - step).max(0.0);
                return Some(step);
            }
        }
        let remainder = self.accumulator;
        self.accumulator = 0.0;
        (remainder > REMAINDER_EPSILON).then_some(remainder)
    }

    /// Drop any accumulated time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Iterator over planned step sizes, produced by [`FixedTimestep::drain`]
#[derive(Debug)]
pub struct Drain<'a> {
    timestep: &'a mut FixedTimestep,
}

impl Iterator for Drain<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.timestep.next_step()
    }
}
