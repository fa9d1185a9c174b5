//! Static ornaments hung on a secondary spiral around the tree.
//!
//! They are placed once and never simulated; the renderer draws them as-is.

use std::f32::consts::PI;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_ORNAMENT_COUNT: usize = 30;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ornament {
    pub position: Vec3,
    pub scale: f32,
}

/// Place `count` ornaments: four turns, rising from y = -1.5, radius shrinking with height
pub fn ornaments(count: usize, seed: u64) -> Vec<Ornament> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            let angle = t * PI * 8.0;
            let y = t * 4.0 - 1.5;
            let radius = 1.8 - (y + 1.5) * 0.35;

            Ornament {
                position: Vec3::new(angle.sin() * radius, y, angle.cos() * radius),
                scale: rng.random_range(0.1..0.25),
            }
        })
        .collect()
}
