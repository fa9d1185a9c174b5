//! Per-frame render output handed to the presentation layer

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use swarm_physics::ParticleAttributes;

/// Per-instance vertex data for a GPU instance buffer
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    /// Column-major model matrix, swarm root rotation included
    pub model: [[f32; 4]; 4],
    /// Linear RGBA
    pub color: [f32; 4],
}

/// Everything a renderer needs to draw the swarm for one frame.
///
/// Rebuilt in full every tick and never read back by the simulation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOutput {
    /// One entry per particle, in store order, in swarm-local space
    pub attributes: Vec<ParticleAttributes>,
    /// Rotation of the swarm root about +Y, radians in [0, 2π)
    pub root_rotation: f32,
}

impl RenderOutput {
    pub(crate) fn with_len(len: usize) -> Self {
        Self {
            attributes: vec![ParticleAttributes::default(); len],
            root_rotation: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParticleAttributes> {
        self.attributes.iter()
    }

    pub fn root_transform(&self) -> Mat4 {
        Mat4::from_rotation_y(self.root_rotation)
    }

    /// World-space model matrix of one particle
    pub fn model_matrix(&self, index: usize) -> Option<Mat4> {
        self.attributes
            .get(index)
            .map(|a| self.root_transform() * local_matrix(a))
    }

    /// Pack the frame into instance data, ready for `bytemuck::cast_slice`
    pub fn instances(&self) -> Vec<InstanceRaw> {
        let root = self.root_transform();
        self.attributes
            .iter()
            .map(|a| InstanceRaw {
                model: (root * local_matrix(a)).to_cols_array_2d(),
                color: a.color.to_array(),
            })
            .collect()
    }
}

fn local_matrix(attributes: &ParticleAttributes) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(attributes.scale),
        attributes.rotation_quat(),
        attributes.position,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_physics::Color;

    fn one_particle(position: Vec3, scale: f32) -> RenderOutput {
        RenderOutput {
            attributes: vec![ParticleAttributes {
                position,
                rotation: Vec3::ZERO,
                scale,
                color: Color::rgb(1.0, 0.5, 0.25),
            }],
            root_rotation: 0.0,
        }
    }

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<InstanceRaw>(), 80);
    }

    #[test]
    fn test_instances_carry_translation_scale_and_color() {
        let output = one_particle(Vec3::new(1.0, 2.0, 3.0), 0.5);
        let instances = output.instances();

        assert_eq!(instances.len(), 1);
        let m = instances[0].model;
        assert_eq!(m[3][..3], [1.0, 2.0, 3.0]);
        assert_eq!(m[0][0], 0.5);
        assert_eq!(instances[0].color, [1.0, 0.5, 0.25, 1.0]);

        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 80);
    }

    #[test]
    fn test_root_rotation_is_applied() {
        let mut output = one_particle(Vec3::new(1.0, 0.0, 0.0), 1.0);
        output.root_rotation = std::f32::consts::FRAC_PI_2;

        let world = output.model_matrix(0).unwrap().transform_point3(Vec3::ZERO);
        // +X rotated a quarter turn about +Y lands on -Z
        assert!((world - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!(output.model_matrix(1).is_none());
    }
}
