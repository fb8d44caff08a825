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
//! Integrator accuracy against analytical solutions

use rigid_sandbox::integration::{AxisState, EulerIntegrator, Integrator, RK4Integrator};

/// Linear drag: v(t) = v0·e^(-kt), x(t) = x0 + v0/k·(1 - e^(-kt))
fn linear_drag_exact(x0: f64, v0: f64, k: f64, t: f64) -> AxisState {
    let decay = (-k * t).exp();
    AxisState::new(x0 + v0 / k * (1.0 - decay), v0 * decay)
}

fn run<I: Integrator>(integrator: &I, state: AxisState, dt: f64, steps: usize, accel: impl Fn(f64, f64) -> f64) -> AxisState {
    let mut s = state;
    for _ in 0..steps {
        s = integrator.step_axis(s, dt, &accel);
    }
    s
}

#[test]
fn test_rk4_constant_gravity_is_exact() {
    let g = 980.0;
    let end = run(&RK4Integrator, AxisState::new(100.0, 0.0), 0.01, 100, |_, _| g);
    // After 1 s: x = 100 + ½·g, v = g
    assert!((end.position - (100.0 + 0.5 * g)).abs() < 1e-9);
    assert!((end.velocity - g).abs() < 1e-9);
}

#[test]
fn test_rk4_linear_drag_matches_closed_form() {
    let k = 0.8;
    let exact = linear_drag_exact(0.0, 200.0, k, 2.0);
    let end = run(&RK4Integrator, AxisState::new(0.0, 200.0), 0.05, 40, |_, v| -k * v);

    assert!((end.position - exact.position).abs() < 1e-4, "x {} vs {}", end.position, exact.position);
    assert!((end.velocity - exact.velocity).abs() < 1e-4);
}

#[test]
fn test_rk4_beats_euler_at_large_steps() {
    let k = 2.0;
    let exact = linear_drag_exact(0.0, 100.0, k, 1.0);
    let rk4 = run(&RK4Integrator, AxisState::new(0.0, 100.0), 0.1, 10, |_, v| -k * v);
    let euler = run(&EulerIntegrator, AxisState::new(0.0, 100.0), 0.1, 10, |_, v| -k * v);

    let rk4_err = (rk4.velocity - exact.velocity).abs();
    let euler_err = (euler.velocity - exact.velocity).abs();
    assert!(rk4_err * 100.0 < euler_err, "rk4 {} euler {}", rk4_err, euler_err);
}

#[test]
fn test_rk4_fourth_order_convergence() {
    // Harmonic oscillator x'' = -x; halving dt should cut the error ~16x
    let exact = 1.0f64.cos();
    let err = |steps: usize| {
        let dt = 1.0 / steps as f64;
        let end = run(&RK4Integrator, AxisState::new(1.0, 0.0), dt, steps, |x, _| -x);
        (end.position - exact).abs()
    };
    let ratio = err(20) / err(40);
    assert!(ratio > 12.0 && ratio < 20.0, "convergence ratio {}", ratio);
}

#[test]
fn test_euler_matches_its_update_rule() {
    let s = EulerIntegrator.step_axis(AxisState::new(1.0, 2.0), 0.5, |_, _| 4.0);
    // v += a·dt, then x += v·dt
    assert_eq!(s.velocity, 4.0);
    assert_eq!(s.position, 3.0);
}

#[test]
fn test_integrator_names() {
    assert_eq!(RK4Integrator.name(), "Runge-Kutta 4");
    assert_eq!(EulerIntegrator.name(), "Explicit Euler");
}
