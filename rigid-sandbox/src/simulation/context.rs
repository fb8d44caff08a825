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
//! Simulation context: runtime toggles that used to be global state

use crate::error::{Result, SimError};
use std::time::Duration;

/// Default target frame rate
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Frame rate selected by [`SimulationContext::toggle_target_fps`]
pub const HIGH_TARGET_FPS: u32 = 144;

/// Length of the window the FPS counter averages over, in seconds
pub const FPS_WINDOW: f64 = 0.5;

/// Frames-per-second meter fed by the render side
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f64,
    current: f64,
}

impl FpsCounter {
    /// Create a counter reading zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one rendered frame that took `delta` seconds
    ///
    /// Returns the new reading whenever a full window has elapsed.
    pub fn record_frame(&mut self, delta: f64) -> Option<f64> {
        if !delta.is_finite() || delta < 0.0 {
            return None;
        }
        self.frames += 1;
        self.elapsed += delta;
        if self.elapsed < FPS_WINDOW {
            return None;
        }
        self.current = f64::from(self.frames) / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(self.current)
    }

    /// Most recent reading
    pub fn current(&self) -> f64 {
        self.current
    }
}

/// Toggles shared between the input layer, the loop and the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationContext {
    gravity_enabled: bool,
    target_fps: u32,
    fps: FpsCounter,
}

impl SimulationContext {
    /// Gravity on, 60 FPS target
    pub fn new() -> Self {
        SimulationContext {
            gravity_enabled: true,
            target_fps: DEFAULT_TARGET_FPS,
            fps: FpsCounter::new(),
        }
    }

    /// Whether gravity is applied
    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    /// Turn gravity on or off
    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    /// Flip gravity; returns the new state
    pub fn toggle_gravity(&mut self) -> bool {
        self.gravity_enabled = !self.gravity_enabled;
        self.gravity_enabled
    }

    /// Target render frame rate
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Set the target render frame rate
    pub fn set_target_fps(&mut self, fps: u32) -> Result<()> {
        if fps == 0 {
            return Err(SimError::InvalidFrameRate);
        }
        self.target_fps = fps;
        Ok(())
    }

    /// Switch between 60 and 144 FPS; any other target goes to 60
    pub fn toggle_target_fps(&mut self) -> u32 {
        self.target_fps = if self.target_fps == DEFAULT_TARGET_FPS {
            HIGH_TARGET_FPS
        } else {
            DEFAULT_TARGET_FPS
        };
        self.target_fps
    }

    /// Time budget of one rendered frame at the target rate
    pub fn frame_delay(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.target_fps))
    }

    /// FPS meter
    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    /// Mutable FPS meter, for the render loop to feed
    pub fn fps_mut(&mut self) -> &mut FpsCounter {
        &mut self.fps
    }
}

impl Default for SimulationContext {
    fn default() -> Self {
        Self::new()
    }
}
