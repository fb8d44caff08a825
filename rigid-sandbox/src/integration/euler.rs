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
//! Explicit Euler integrator
//!
//! ```text
//! v(t + dt) = v(t) + a(x, v)*dt
//! x(t + dt) = x(t) + v(t + dt)*dt
//! ```
//!
//! First-order accurate. Cheaper than RK4 but loses bounce height at
//! larger steps; kept for comparison runs and small-step configurations.

use super::{AxisState, Integrator};

/// Explicit Euler integrator
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerIntegrator;

impl Integrator for EulerIntegrator {
    fn name(&self) -> &str {
        "Explicit Euler"
    }

    fn step_axis<F>(&self, state: AxisState, dt: f64, acceleration: F) -> AxisState
    where
        F: Fn(f64, f64) -> f64,
    {
        let velocity = state.velocity + acceleration(state.position, state.velocity) * dt;
        AxisState {
            position: state.position + velocity * dt,
            velocity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euler_single_step() {
        let next = EulerIntegrator.step_axis(AxisState::new(0.0, 1.0), 0.5, |_, _| 2.0);
        assert_eq!(next.velocity, 2.0);
        assert_eq!(next.position, 1.0);
    }

    #[test]
    fn test_euler_converges_with_smaller_steps() {
        let run = |dt: f64| {
            let mut state = AxisState::new(0.0, 0.0);
            let steps = (1.0 / dt).round() as usize;
            for _ in 0..steps {
                state = EulerIntegrator.step_axis(state, dt, |_, _| 10.0);
            }
            (state.position - 5.0).abs()
        };
        assert!(run(0.001) < run(0.01));
        assert!(run(0.001) < 0.01);
    }
}
