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
//! Circle against circle

use super::{contact_impulse, CollisionParams, CollisionReport};
use crate::objects::Ball;

/// Normal used when both centers coincide: push the second ball along +x
const COINCIDENT_NORMAL: (f64, f64) = (1.0, 0.0);

/// Resolve two overlapping balls
///
/// Positions are separated along the center line, split by inverse mass so
/// the lighter ball moves further. A restitution impulse is applied only
/// while the balls are approaching. Returns `None` when the balls do not
/// overlap (`d >= r1 + r2`).
pub fn resolve_ball_ball(a: &mut Ball, b: &mut Ball, params: &CollisionParams) -> Option<CollisionReport> {
    let pa = a.position();
    let pb = b.position();
    let dx = pb.x() - pa.x();
    let dy = pb.y() - pa.y();
    let distance = dx.hypot(dy);
    let radii = a.radius() + b.radius();
    if distance >= radii {
        return None;
    }

    let normal = if distance > 0.0 {
        (dx / distance, dy / distance)
    } else {
        COINCIDENT_NORMAL
    };
    let penetration = radii - distance;

    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    let share_a = inv_a / inv_sum;
    let share_b = inv_b / inv_sum;
    a.position_mut()
        .translate(-normal.0 * penetration * share_a, -normal.1 * penetration * share_a);
    b.position_mut()
        .translate(normal.0 * penetration * share_b, normal.1 * penetration * share_b);

    let normal_impulse = match contact_impulse(a.velocity(), inv_a, b.velocity(), inv_b, normal, params) {
        Some(delta) => {
            a.velocity_mut().add(delta.delta_a.0, delta.delta_a.1);
            b.velocity_mut().add(delta.delta_b.0, delta.delta_b.1);
            delta.normal_impulse
        }
        None => 0.0,
    };

    Some(CollisionReport {
        normal,
        penetration,
        normal_impulse,
    })
}
