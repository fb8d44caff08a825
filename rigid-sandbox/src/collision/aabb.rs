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
//! Bounding-box fallback resolver

use super::{CollisionParams, CollisionReport};
use crate::objects::{Ball, Object};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn shift(self, ball: &mut Ball, amount: f64) {
        match self {
            Axis::X => ball.position_mut().translate(amount, 0.0),
            Axis::Y => ball.position_mut().translate(0.0, amount),
        }
    }

    fn speed(self, ball: &Ball) -> f64 {
        match self {
            Axis::X => ball.velocity().dx(),
            Axis::Y => ball.velocity().dy(),
        }
    }

    fn set_speed(self, ball: &mut Ball, speed: f64) {
        match self {
            Axis::X => ball.velocity_mut().set_dx(speed),
            Axis::Y => ball.velocity_mut().set_dy(speed),
        }
    }
}

/// Resolve any two objects using their bounding boxes only
///
/// The pair is separated along the axis of least penetration. Two dynamic
/// objects each move half the overlap, swap their velocity component along
/// that axis and have it scaled by the restitution. Against a static object
/// the dynamic one moves the full overlap and its component is reflected
/// and scaled. Static objects are never modified, and a pair of static
/// objects is left alone.
pub fn resolve_aabb(a: &mut Object, b: &mut Object, params: &CollisionParams) -> Option<CollisionReport> {
    if a.is_static() && b.is_static() {
        return None;
    }
    let box_a = a.bounding_box();
    let box_b = b.bounding_box();
    if !box_a.overlaps(&box_b) {
        return None;
    }

    let overlap_x = box_a.overlap_x(&box_b);
    let overlap_y = box_a.overlap_y(&box_b);
    let (center_a, center_b) = (box_a.center(), box_b.center());
    let (axis, overlap, a_first) = if overlap_x < overlap_y {
        (Axis::X, overlap_x, center_a.0 < center_b.0)
    } else {
        (Axis::Y, overlap_y, center_a.1 < center_b.1)
    };
    // Direction `a` moves to get out of `b`
    let away = if a_first { -1.0 } else { 1.0 };
    let damping = params.restitution;

    match (a.as_ball_mut(), b.as_ball_mut()) {
        (Some(a), Some(b)) => {
            axis.shift(a, away * overlap * 0.5);
            axis.shift(b, -away * overlap * 0.5);
            let (va, vb) = (axis.speed(a), axis.speed(b));
            axis.set_speed(a, vb * damping);
            axis.set_speed(b, va * damping);
        }
        (Some(a), None) => {
            axis.shift(a, away * overlap);
            let va = axis.speed(a);
            axis.set_speed(a, -va * damping);
        }
        (None, Some(b)) => {
            axis.shift(b, -away * overlap);
            let vb = axis.speed(b);
            axis.set_speed(b, -vb * damping);
        }
        (None, None) => return None,
    }

    let normal = match axis {
        Axis::X => (-away, 0.0),
        Axis::Y => (0.0, -away),
    };
    Some(CollisionReport {
        normal,
        penetration: overlap,
        normal_impulse: 0.0,
    })
}
