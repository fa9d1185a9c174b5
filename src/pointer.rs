//! Scripted pointer standing in for mouse input in headless runs

use glam::Vec3;
use swarm_simulation::PerturbationSource;

use crate::config::DriverSection;

/// Pointer orbiting the swarm with a periodic hover window
#[derive(Debug, Clone, Copy)]
pub struct PointerScript {
    radius: f32,
    speed: f32,
    height: f32,
    hover_period: usize,
    hover_duration: usize,
}

impl PointerScript {
    pub fn from_driver(driver: &DriverSection) -> Self {
        Self {
            radius: driver.orbit_radius,
            speed: driver.orbit_speed,
            height: driver.orbit_height,
            hover_period: driver.hover_period,
            hover_duration: driver.hover_duration,
        }
    }

    /// Pointer state for `frame`, already mapped into swarm space
    pub fn sample(&self, frame: usize) -> PerturbationSource {
        let angle = frame as f32 * self.speed;
        let position = Vec3::new(
            angle.cos() * self.radius,
            self.height,
            angle.sin() * self.radius,
        );

        let hovering = self.hover_period > 0 && frame % self.hover_period < self.hover_duration;
        PerturbationSource::new(position, hovering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_window() {
        let driver = DriverSection {
            hover_period: 10,
            hover_duration: 3,
            ..Default::default()
        };
        let script = PointerScript::from_driver(&driver);

        let hovering: Vec<bool> = (0..12).map(|f| script.sample(f).active).collect();
        assert_eq!(
            hovering,
            [true, true, true, false, false, false, false, false, false, false, true, true]
        );
    }

    #[test]
    fn test_zero_period_never_hovers() {
        let driver = DriverSection {
            hover_period: 0,
            ..Default::default()
        };
        let script = PointerScript::from_driver(&driver);
        assert!((0..100).all(|f| !script.sample(f).active));
    }

    #[test]
    fn test_orbit_radius() {
        let script = PointerScript::from_driver(&DriverSection::default());
        for frame in [0, 17, 250] {
            let p = script.sample(frame).position;
            assert!(((p.x * p.x + p.z * p.z).sqrt() - 3.0).abs() < 1e-4);
        }
    }
}
