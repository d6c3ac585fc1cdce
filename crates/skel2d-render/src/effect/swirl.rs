use skel2d_pose::SkeletonPose;

use super::{EffectVertex, VertexEffect};
use crate::interpolation::Interpolation;

/// Twists vertices around a point relative to the skeleton position.
///
/// Vertices closer to the centre rotate further; anything outside `radius`
/// is left alone.
#[derive(Debug, Clone)]
pub struct SwirlVertexEffect {
    pub radius: f32,
    pub center_x: f32,
    pub center_y: f32,
    /// Degrees at the centre.
    pub angle: f32,
    pub interpolation: Interpolation,
    world_x: f32,
    world_y: f32,
    angle_rad: f32,
}

impl SwirlVertexEffect {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            center_x: 0.0,
            center_y: 0.0,
            angle: 0.0,
            interpolation: Interpolation::PowOut(2),
            world_x: 0.0,
            world_y: 0.0,
            angle_rad: 0.0,
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn with_center(mut self, x: f32, y: f32) -> Self {
        self.center_x = x;
        self.center_y = y;
        self
    }
}

impl VertexEffect for SwirlVertexEffect {
    fn begin(&mut self, pose: &SkeletonPose) {
        self.world_x = pose.x + self.center_x;
        self.world_y = pose.y + self.center_y;
        self.angle_rad = self.angle.to_radians();
    }

    fn transform(&mut self, vertex: &mut EffectVertex) {
        let px = vertex.x - self.world_x;
        let py = vertex.y - self.world_y;
        let dist = (px * px + py * py).sqrt();
        if dist < self.radius {
            let theta =
                self.interpolation
                    .interpolate(0.0, self.angle_rad, (self.radius - dist) / self.radius);
            let (sin, cos) = theta.sin_cos();
            vertex.x = cos * px - sin * py + self.world_x;
            vertex.y = sin * px + cos * py + self.world_y;
        }
    }

    fn end(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use skel2d_pose::Color;

    fn vertex(x: f32, y: f32) -> EffectVertex {
        EffectVertex {
            x,
            y,
            u: 0.0,
            v: 0.0,
            light: Color::WHITE,
            dark: Color::TRANSPARENT,
        }
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let mut effect = SwirlVertexEffect::new(100.0);
        effect.begin(&SkeletonPose::new());
        let mut v = vertex(10.0, 5.0);
        effect.transform(&mut v);
        assert!((v.x - 10.0).abs() < 1e-5);
        assert!((v.y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_outside_radius_untouched() {
        let mut effect = SwirlVertexEffect::new(10.0);
        effect.angle = 90.0;
        effect.begin(&SkeletonPose::new());
        let mut v = vertex(50.0, 0.0);
        effect.transform(&mut v);
        assert_eq!((v.x, v.y), (50.0, 0.0));
    }

    #[test]
    fn test_rotation_preserves_distance_to_center() {
        let mut pose = SkeletonPose::new();
        pose.x = 100.0;
        pose.y = 200.0;
        let mut effect = SwirlVertexEffect::new(50.0).with_center(0.0, -20.0);
        effect.angle = 60.0;
        effect.begin(&pose);

        let mut v = vertex(110.0, 180.0);
        effect.transform(&mut v);
        let dist = ((v.x - 100.0).powi(2) + (v.y - 180.0).powi(2)).sqrt();
        assert!((dist - 10.0).abs() < 1e-3);
        assert!((v.x - 110.0).abs() > 1e-3);
    }

    #[test]
    fn test_linear_swirl_at_half_radius() {
        let mut effect = SwirlVertexEffect::new(2.0).with_interpolation(Interpolation::Linear);
        effect.angle = 180.0;
        effect.begin(&SkeletonPose::new());
        // dist 1 of radius 2 -> half the angle -> 90 degrees
        let mut v = vertex(1.0, 0.0);
        effect.transform(&mut v);
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 1.0).abs() < 1e-5);
    }
}
