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
//! Drag models
//!
//! Drag is the only velocity-dependent force acting on a ball. Gravity is a
//! constant vertical acceleration and is added by the caller.

use serde::{Deserialize, Serialize};

/// Squared speed below which quadratic drag is skipped
///
/// Avoids normalising a near-zero velocity vector.
pub const MIN_DRAG_SPEED_SQ: f64 = 1e-4;

/// Velocity-dependent drag acting on balls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum DragModel {
    /// No drag
    None,
    /// Linear drag `a = -k·v` (k in 1/s, mass independent)
    Linear {
        /// Drag constant
        k: f64,
    },
    /// Quadratic drag `F = -½·ρ·Cd·A·|v|·v` with `A = π·r²`
    Quadratic {
        /// Fluid density ρ
        fluid_density: f64,
        /// Drag coefficient Cd (0.47 for a sphere)
        drag_coefficient: f64,
    },
}

impl DragModel {
    /// Acceleration along one axis
    ///
    /// * `v` - velocity along the integrated axis
    /// * `v_other` - velocity along the other axis, used for the speed `|v|`
    /// * `area` - cross-sectional area of the ball
    /// * `inverse_mass` - 1/m of the ball
    pub fn acceleration(&self, v: f64, v_other: f64, area: f64, inverse_mass: f64) -> f64 {
        match *self {
            DragModel::None => 0.0,
            DragModel::Linear { k } => -k * v,
            DragModel::Quadratic {
                fluid_density,
                drag_coefficient,
            } => {
                let speed_sq = v * v + v_other * v_other;
                if speed_sq < MIN_DRAG_SPEED_SQ {
                    return 0.0;
                }
                -0.5 * fluid_density * drag_coefficient * area * speed_sq.sqrt() * v * inverse_mass
            }
        }
    }
}

impl Default for DragModel {
    fn default() -> Self {
        DragModel::Linear { k: 0.1 }
    }
}
