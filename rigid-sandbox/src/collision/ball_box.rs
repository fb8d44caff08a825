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
//! Circle against static rectangle

use super::{contact_impulse, CollisionParams, CollisionReport};
use crate::objects::{Aabb, Ball, StaticBox, Velocity};

/// Resolve a ball overlapping a static box
///
/// The returned normal points from the box toward the ball. The box is
/// immovable, so only the ball's position and velocity change. When the
/// ball's center has tunnelled inside the rectangle it is pushed out
/// through the nearest edge.
pub fn resolve_ball_box(ball: &mut Ball, rect: &StaticBox, params: &CollisionParams) -> Option<CollisionReport> {
    let bounds = rect.bounding_box();
    let center = ball.position();
    let radius = ball.radius();

    let (cx, cy) = bounds.closest_point(center.x(), center.y());
    let dx = center.x() - cx;
    let dy = center.y() - cy;
    let dist_sq = dx * dx + dy * dy;
    if dist_sq >= radius * radius {
        return None;
    }

    let (normal, penetration) = if dist_sq > 0.0 {
        let distance = dist_sq.sqrt();
        ((dx / distance, dy / distance), radius - distance)
    } else {
        nearest_edge_exit(&bounds, center.x(), center.y(), radius)
    };

    ball.position_mut()
        .translate(normal.0 * penetration, normal.1 * penetration);

    let inv_ball = ball.inverse_mass();
    let normal_impulse = match contact_impulse(Velocity::zero(), 0.0, ball.velocity(), inv_ball, normal, params) {
        Some(delta) => {
            ball.velocity_mut().add(delta.delta_b.0, delta.delta_b.1);
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

/// Outward normal and push distance for a center inside the rectangle
fn nearest_edge_exit(bounds: &Aabb, x: f64, y: f64, radius: f64) -> ((f64, f64), f64) {
    let exits = [
        ((-1.0, 0.0), x - bounds.min_x),
        ((1.0, 0.0), bounds.max_x - x),
        ((0.0, -1.0), y - bounds.min_y),
        ((0.0, 1.0), bounds.max_y - y),
    ];
    let mut best = exits[0];
    for exit in &exits[1..] {
        if exit.1 < best.1 {
            best = *exit;
        }
    }
    (best.0, best.1 + radius)
}
