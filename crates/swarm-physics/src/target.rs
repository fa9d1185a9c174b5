//! Target field: the spiral "tree" silhouette the swarm settles into

use std::f32::consts::TAU;

use glam::Vec3;

use crate::constants::{
    SPIRAL_HEIGHT_OFFSET, SPIRAL_HEIGHT_RANGE, SPIRAL_MAX_RADIUS, SPIRAL_TURNS,
};

/// Parametric spiral that tapers from `max_radius` at the base to a point at the tip
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpiralShape {
    pub turns: f32,
    pub max_radius: f32,
    pub height_range: f32,
    pub height_offset: f32,
}

impl Default for SpiralShape {
    fn default() -> Self {
        Self {
            turns: SPIRAL_TURNS,
            max_radius: SPIRAL_MAX_RADIUS,
            height_range: SPIRAL_HEIGHT_RANGE,
            height_offset: SPIRAL_HEIGHT_OFFSET,
        }
    }
}

impl SpiralShape {
    /// Point on the spiral for normalized parameter `t` in [0, 1)
    pub fn point(&self, t: f32) -> Vec3 {
        let angle = t * self.turns * TAU;
        let radius = (1.0 - t) * self.max_radius;
        let height = t * self.height_range - self.height_offset;

        Vec3::new(angle.sin() * radius, height, angle.cos() * radius)
    }
}

/// Generate one target per particle on the default spiral
pub fn generate(count: usize) -> Vec<Vec3> {
    generate_with(count, &SpiralShape::default())
}

/// Generate one target per particle, particle `i` sitting at `t = i / count`
pub fn generate_with(count: usize, shape: &SpiralShape) -> Vec<Vec3> {
    (0..count)
        .map(|i| shape.point(i as f32 / count as f32))
        .collect()
}
