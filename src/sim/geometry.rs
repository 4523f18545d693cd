//! Geometry kernel: obstacles, ray marching, polygon overlap
//!
//! Everything here is a pure query. Obstacles are axis-aligned rectangles in
//! arena space (y grows downward, angles grow clockwise on screen).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::heading_vector;

/// An axis-aligned rectangular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from two opposite corners (any order)
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Half-open containment: left/top edges are inside, right/bottom are not
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Corners in clockwise screen order starting top-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.right(), self.y),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.x, self.bottom()),
        ]
    }
}

/// Where a ray stopped and how far it travelled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Hit point, or the max-range endpoint when nothing was hit
    pub point: Vec2,
    pub distance: f32,
}

/// March a ray in unit steps and report the first obstacle it enters
///
/// Steps are taken at `d = 0, 1, 2, ...` while `d < max_range`. At each step
/// every obstacle is tested; the first step whose point lies inside any
/// obstacle wins, so the result does not depend on obstacle order. With no
/// hit the ray ends at exactly `max_range`.
pub fn cast_ray(origin: Vec2, angle_deg: f32, max_range: f32, obstacles: &[Rect]) -> RayHit {
    let dir = heading_vector(angle_deg);

    let mut step = 0u32;
    loop {
        let dist = step as f32;
        if dist >= max_range {
            break;
        }

        let point = origin + dir * dist;
        if obstacles.iter().any(|obs| obs.contains_point(point)) {
            return RayHit {
                point,
                distance: dist,
            };
        }
        step += 1;
    }

    RayHit {
        point: origin + dir * max_range,
        distance: max_range,
    }
}

/// Project a point set onto an axis, returning (min, max)
fn project(points: &[Vec2], axis: Vec2) -> (f32, f32) {
    points
        .iter()
        .map(|p| p.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        })
}

/// Signed shoelace area
pub fn polygon_area(polygon: &[Vec2]) -> f32 {
    let n = polygon.len();
    (0..n)
        .map(|i| polygon[i].perp_dot(polygon[(i + 1) % n]))
        .sum::<f32>()
        / 2.0
}

/// Exact overlap test between a convex polygon and a rectangle
///
/// Separating axis test over the rectangle's two axes and every polygon edge
/// normal. Overlap must be strictly positive on every axis: shapes that only
/// share an edge or a vertex do not collide, and a zero-area polygon never
/// collides.
pub fn polygon_overlaps_rect(polygon: &[Vec2], rect: &Rect) -> bool {
    if polygon.len() < 3 || polygon_area(polygon).abs() <= f32::EPSILON {
        return false;
    }

    let corners = rect.corners();
    let rect_axes = [Vec2::X, Vec2::Y];
    let edge_axes = polygon.iter().enumerate().map(|(i, a)| {
        let b = polygon[(i + 1) % polygon.len()];
        (b - *a).perp()
    });

    for axis in rect_axes.into_iter().chain(edge_axes) {
        let (poly_lo, poly_hi) = project(polygon, axis);
        let (rect_lo, rect_hi) = project(&corners, axis);
        if poly_hi <= rect_lo || rect_hi <= poly_lo {
            return false;
        }
    }

    true
}
