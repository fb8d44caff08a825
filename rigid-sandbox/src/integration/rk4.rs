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
//! Runge-Kutta 4th order (RK4) integrator implementation
//!
//! The RK4 method is a classical explicit integrator that provides fourth-order
//! accuracy for smooth ordinary differential equations.
//!
//! # Algorithm
//!
//! For the second-order system along one axis (position `x`, velocity `v`):
//!
//! ```text
//! k1_v = a(x, v)                               k1_x = v
//! k2_v = a(x + k1_x*dt/2, v + k1_v*dt/2)       k2_x = v + k1_v*dt/2
//! k3_v = a(x + k2_x*dt/2, v + k2_v*dt/2)       k3_x = v + k2_v*dt/2
//! k4_v = a(x + k3_x*dt,   v + k3_v*dt)         k4_x = v + k3_v*dt
//!
//! x(t + dt) = x + (k1_x + 2*k2_x + 2*k3_x + k4_x)*dt/6
//! v(t + dt) = v + (k1_v + 2*k2_v + 2*k3_v + k4_v)*dt/6
//! ```
//!
//! # Properties
//!
//! - **Fourth-order accurate**: Local error O(dt⁵), global error O(dt⁴)
//! - **Exact for constant acceleration**: free fall is reproduced to rounding
//! - **Not symplectic**: Energy may drift over long simulations
//! - **Four evaluations per step**
//!
//! # References
//!
//! - Butcher, J. C. (2016). Numerical Methods for Ordinary Differential Equations
//!   (3rd ed.). Wiley. Chapter 3.
//! - Press, W. H., Teukolsky, S. A., Vetterling, W. T., & Flannery, B. P. (2007).
//!   Numerical Recipes: The Art of Scientific Computing (3rd ed.). Cambridge
//!   University Press. Section 17.1.

use super::{AxisState, Integrator};

/// Runge-Kutta 4th order integrator
///
/// # Example
///
/// ```
/// use rigid_sandbox::integration::{AxisState, Integrator, RK4Integrator};
///
/// // Constant acceleration of 2 units/s² from rest
/// let next = RK4Integrator.step_axis(AxisState::new(0.0, 0.0), 1.0, |_, _| 2.0);
/// assert!((next.position - 1.0).abs() < 1e-12);
/// assert!((next.velocity - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Integrator;

impl Integrator for RK4Integrator {
    fn name(&self) -> &str {
        "Runge-Kutta 4"
    }

    fn step_axis<F>(&self, state: AxisState, dt: f64, acceleration: F) -> AxisState
    where
        F: Fn(f64, f64) -> f64,
    {
        let dt_2 = dt * 0.5;
        let dt_6 = dt / 6.0;
        let x = state.position;
        let v = state.velocity;

        let k1_x = v;
        let k1_v = acceleration(x, v);

        let k2_x = v + k1_v * dt_2;
        let k2_v = acceleration(x + k1_x * dt_2, k2_x);

        let k3_x = v + k2_v * dt_2;
        let k3_v = acceleration(x + k2_x * dt_2, k3_x);

        let k4_x = v + k3_v * dt;
        let k4_v = acceleration(x + k3_x * dt, k4_x);

        AxisState {
            position: x + (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt_6,
            velocity: v + (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt_6,
        }
    }
}
