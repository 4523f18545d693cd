//! Obstacle layouts
//!
//! The reference layout is compiled in. Seeded layouts are for soak runs and
//! tests: the same seed always yields the same rectangles.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geometry::Rect;
use super::state::Arena;

/// The three rectangles of the reference arena
pub fn reference_obstacles() -> Vec<Rect> {
    vec![
        Rect::new(300.0, 200.0, 100.0, 50.0),
        Rect::new(500.0, 400.0, 120.0, 60.0),
        Rect::new(600.0, 100.0, 50.0, 200.0),
    ]
}

/// Knobs for random layouts
#[derive(Debug, Clone, Copy)]
pub struct LayoutParams {
    pub count: usize,
    pub min_side: f32,
    pub max_side: f32,
    /// Rectangles never cover this point (plus `keep_out_radius`)
    pub keep_out: Vec2,
    pub keep_out_radius: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            count: 6,
            min_side: 20.0,
            max_side: 160.0,
            keep_out: Vec2::new(400.0, 300.0),
            keep_out_radius: 40.0,
        }
    }
}

/// Max attempts per rectangle before giving up on it
const MAX_PLACEMENT_TRIES: u32 = 64;

/// Generate a deterministic random layout inside `arena`
///
/// Rectangles may overlap each other but never intrude on the keep-out
/// circle, so a rover starting there begins in free space. Fewer than
/// `params.count` rectangles come back if placement keeps failing.
pub fn random_obstacles(seed: u64, arena: &Arena, params: &LayoutParams) -> Vec<Rect> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut obstacles = Vec::with_capacity(params.count);

    for _ in 0..params.count {
        for _ in 0..MAX_PLACEMENT_TRIES {
            let w = rng.random_range(params.min_side..=params.max_side);
            let h = rng.random_range(params.min_side..=params.max_side);
            if w >= arena.width || h >= arena.height {
                continue;
            }
            let x = rng.random_range(0.0..arena.width - w);
            let y = rng.random_range(0.0..arena.height - h);
            let rect = Rect::new(x, y, w, h);

            if clearance(&rect, params.keep_out) > params.keep_out_radius {
                obstacles.push(rect);
                break;
            }
        }
    }

    log::debug!(
        "Layout seed {}: placed {}/{} obstacles",
        seed,
        obstacles.len(),
        params.count
    );
    obstacles
}

/// Distance from a point to the nearest point of a rectangle (0 inside)
fn clearance(rect: &Rect, p: Vec2) -> f32 {
    let nearest = p.clamp(
        Vec2::new(rect.x, rect.y),
        Vec2::new(rect.right(), rect.bottom()),
    );
    (p - nearest).length()
}
