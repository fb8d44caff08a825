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
//! Collision detection and resolution
//!
//! Every unordered pair `(i, j), i < j` is tested each step, in collection
//! order. There is no broad phase: the cost is O(n²) in the object count
//! and callers bound it through `PhysicsConfig::max_objects`.
//!
//! Resolution per pair is always detect → separate → impulse:
//!
//! - **Ball–Ball**: separate along the center line in proportion to inverse
//!   mass, then apply a restitution impulse and an optional friction impulse.
//! - **Ball–Box**: the box has infinite mass. The ball is pushed out along
//!   the normal from the closest point on the rectangle, and only the ball's
//!   velocity changes.
//! - **Box–Box**: both static, nothing to do. [`resolve_aabb`] is the generic
//!   bounding-box fallback usable for any pair.
//!
//! Because pairs are resolved in order, a body moved by pair `(0, 1)` is
//! tested against body 2 at its new position when pair `(0, 2)` runs.

use crate::config::PhysicsConfig;
use crate::objects::{Object, Velocity};

mod aabb;
mod ball_ball;
mod ball_box;

pub use aabb::resolve_aabb;
pub use ball_ball::resolve_ball_ball;
pub use ball_box::resolve_ball_box;

/// Tangential relative speed below which no friction impulse is applied
const TANGENT_EPSILON: f64 = 1e-9;

/// Coefficients used by the resolver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionParams {
    /// Restitution in [0, 1]
    pub restitution: f64,
    /// Tangential friction coefficient; 0 disables friction impulses
    pub friction: f64,
}

impl CollisionParams {
    /// Create parameters explicitly
    pub fn new(restitution: f64, friction: f64) -> Self {
        CollisionParams {
            restitution,
            friction,
        }
    }

    /// Take restitution and contact friction from a configuration
    pub fn from_config(config: &PhysicsConfig) -> Self {
        CollisionParams::new(config.restitution, config.contact_friction)
    }
}

/// Outcome of resolving an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionReport {
    /// Unit contact normal pointing from the first object to the second
    pub normal: (f64, f64),
    /// Overlap along the normal at detection time
    pub penetration: f64,
    /// Magnitude of the normal impulse (0 when the pair was already separating)
    pub normal_impulse: f64,
}

impl CollisionReport {
    /// Same contact seen from the other object
    pub fn flipped(self) -> Self {
        CollisionReport {
            normal: (-self.normal.0, -self.normal.1),
            ..self
        }
    }
}

/// Velocity changes produced by a contact impulse
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ImpulseDelta {
    pub delta_a: (f64, f64),
    pub delta_b: (f64, f64),
    pub normal_impulse: f64,
}

/// Compute the restitution and friction impulse for two bodies in contact
///
/// `normal` points from `a` to `b`. Returns `None` when the bodies are
/// already separating along the normal or both are immovable.
pub(crate) fn contact_impulse(
    va: Velocity,
    inv_a: f64,
    vb: Velocity,
    inv_b: f64,
    normal: (f64, f64),
    params: &CollisionParams,
) -> Option<ImpulseDelta> {
    let (nx, ny) = normal;
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return None;
    }

    let relative = Velocity::new(vb.dx() - va.dx(), vb.dy() - va.dy());
    let vn = relative.dot(nx, ny);
    if vn > 0.0 {
        return None;
    }

    let j = -(1.0 + params.restitution) * vn / inv_sum;
    let mut ix = j * nx;
    let mut iy = j * ny;

    if params.friction > 0.0 {
        let tx = relative.dx() - vn * nx;
        let ty = relative.dy() - vn * ny;
        let vt = tx.hypot(ty);
        if vt > TANGENT_EPSILON {
            // Capped so the impulse at most stops tangential sliding
            let max_jt = params.friction * j;
            let jt = (vt / inv_sum).min(max_jt);
            ix -= jt * tx / vt;
            iy -= jt * ty / vt;
        }
    }

    Some(ImpulseDelta {
        delta_a: (-ix * inv_a, -iy * inv_a),
        delta_b: (ix * inv_b, iy * inv_b),
        normal_impulse: j,
    })
}

/// Resolve a single pair, dispatching on the variant of each object
pub fn resolve_pair(a: &mut Object, b: &mut Object, params: &CollisionParams) -> Option<CollisionReport> {
    match (a, b) {
        (Object::Ball(a), Object::Ball(b)) => resolve_ball_ball(a, b, params),
        (Object::Ball(ball), Object::Box(rect)) => {
            resolve_ball_box(ball, rect, params).map(CollisionReport::flipped)
        }
        (Object::Box(rect), Object::Ball(ball)) => resolve_ball_box(ball, rect, params),
        // Both static: no motion
        (Object::Box(_), Object::Box(_)) => None,
    }
}

/// Resolve every unordered pair in increasing index order
///
/// Returns the number of pairs that were overlapping.
pub fn resolve_all(objects: &mut [Object], params: &CollisionParams) -> usize {
    let n = objects.len();
    let mut resolved = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = objects.split_at_mut(j);
            if resolve_pair(&mut head[i], &mut tail[0], params).is_some() {
                resolved += 1;
            }
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Ball, StaticBox};

    #[test]
    fn test_impulse_skips_separating_bodies() {
        let params = CollisionParams::new(1.0, 0.0);
        let va = Velocity::new(-1.0, 0.0);
        let vb = Velocity::new(1.0, 0.0);
        assert!(contact_impulse(va, 1.0, vb, 1.0, (1.0, 0.0), &params).is_none());
    }

    #[test]
    fn test_impulse_skips_two_immovable_bodies() {
        let params = CollisionParams::new(1.0, 0.0);
        let va = Velocity::new(1.0, 0.0);
        assert!(contact_impulse(va, 0.0, Velocity::zero(), 0.0, (1.0, 0.0), &params).is_none());
    }

    #[test]
    fn test_friction_never_reverses_tangential_velocity() {
        let params = CollisionParams::new(0.5, 10.0);
        // b slides along +y relative to a while approaching along -x
        let va = Velocity::zero();
        let vb = Velocity::new(-1.0, 5.0);
        let delta = contact_impulse(va, 0.0, vb, 1.0, (1.0, 0.0), &params).unwrap();
        let vb_after = (vb.dx() + delta.delta_b.0, vb.dy() + delta.delta_b.1);
        assert!((vb_after.0 - 0.5).abs() < 1e-12);
        assert!(vb_after.1.abs() < 1e-12, "friction overshot: {}", vb_after.1);
    }

    #[test]
    fn test_friction_is_capped_by_normal_impulse() {
        let params = CollisionParams::new(0.0, 0.1);
        let vb = Velocity::new(-1.0, 5.0);
        let delta = contact_impulse(Velocity::zero(), 0.0, vb, 1.0, (1.0, 0.0), &params).unwrap();
        // j = 1, tangential change limited to 0.1
        assert!((delta.delta_b.1 + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_pair_box_box_is_noop() {
        let params = CollisionParams::new(0.7, 0.0);
        let mut a = Object::from(StaticBox::new(0.0, 0.0, 10.0, 10.0));
        let mut b = Object::from(StaticBox::new(5.0, 5.0, 10.0, 10.0));
        let (a0, b0) = (a.clone(), b.clone());
        assert!(resolve_pair(&mut a, &mut b, &params).is_none());
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn test_resolve_pair_normal_orientation() {
        let params = CollisionParams::new(0.7, 0.0);
        let mut ball = Object::from(Ball::new(100.0, 85.0, 0.0, 10.0, 10.0));
        let mut rect = Object::from(StaticBox::new(100.0, 100.0, 40.0, 20.0));

        let report = resolve_pair(&mut ball, &mut rect, &params).unwrap();
        assert_eq!(report.normal, (0.0, 1.0), "ball above box: normal points down to the box");

        let mut ball = Object::from(Ball::new(100.0, 85.0, 0.0, 10.0, 10.0));
        let report = resolve_pair(&mut rect, &mut ball, &params).unwrap();
        assert_eq!(report.normal, (-0.0, -1.0));
    }

    #[test]
    fn test_resolve_all_counts_pairs() {
        let params = CollisionParams::new(0.7, 0.0);
        let mut objects = vec![
            Object::from(Ball::new(100.0, 100.0, 0.0, 0.0, 10.0)),
            Object::from(Ball::new(115.0, 100.0, 0.0, 0.0, 10.0)),
            Object::from(Ball::new(400.0, 400.0, 0.0, 0.0, 10.0)),
        ];
        assert_eq!(resolve_all(&mut objects, &params), 1);
    }

    #[test]
    fn test_resolve_all_order_is_observable() {
        // Pair (0, 1) moves ball 0 onto ball 2's center, so pair (0, 2)
        // takes the coincident-center path and pair (1, 2) sees both moves.
        let params = CollisionParams::new(0.0, 0.0);
        let mut objects = vec![
            Object::from(Ball::new(100.0, 100.0, 0.0, 0.0, 10.0)),
            Object::from(Ball::new(110.0, 100.0, 0.0, 0.0, 10.0)),
            Object::from(Ball::new(95.0, 100.0, 0.0, 0.0, 10.0)),
        ];
        assert_eq!(resolve_all(&mut objects, &params), 3);
        assert!((objects[0].position().x() - 85.0).abs() < 1e-9);
        assert!((objects[1].position().x() - 120.0).abs() < 1e-9);
        assert!((objects[2].position().x() - 100.0).abs() < 1e-9);
    }
}
