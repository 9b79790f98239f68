//! Fixed-axis rotation and perspective projection
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::geometry::{ProjectedPoint, ShapeParameters};

/// Maximum pitch magnitude accepted by the interaction controller
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_3;

/// Maps object-local points to screen offsets from the surface center.
///
/// There is no near-plane clipping: the focal length is a configuration
/// constant chosen larger than the shape's envelope radius, so the divisor
/// `focal_length + depth` stays positive for every point the generators can
/// emit. `depth_margin` exposes the worst case for the bounds tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projector {
    pub focal_length: f32,
}

impl Projector {
    pub fn new(focal_length: f32) -> Self {
        Self { focal_length }
    }

    /// Rotate `point` by yaw about the vertical axis, then pitch, then apply
    /// the perspective divide. Returned x/y are offsets from the surface
    /// center; `depth` is the rotated z, kept for depth-ordering decisions.
    pub fn project(&self, point: &Point3<f32>, pitch: f32, yaw: f32) -> ProjectedPoint {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.sin_cos();

        let spun_z = point.z * cos_yaw - point.x * sin_yaw;
        let spun_x = point.z * sin_yaw + point.x * cos_yaw;
        let tilted_y = point.y * cos_pitch - spun_z * sin_pitch;
        let depth = point.y * sin_pitch + spun_z * cos_pitch;

        let scale = self.focal_length / (self.focal_length + depth);
        ProjectedPoint {
            x: spun_x * scale,
            y: tilted_y * scale,
            depth,
        }
    }

    /// Worst-case distance between the perspective divisor and zero over the
    /// whole envelope. |depth| never exceeds the point norm, which never
    /// exceeds the envelope radius, so a positive margin here means no
    /// generated point can reach the focal plane at any rotation.
    pub fn depth_margin(&self, params: &ShapeParameters) -> f32 {
        self.focal_length - params.envelope_radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-2;

    // Expected values below are hand-derived from the rotation formula at
    // pitch = 0.3, yaw = 0 (sin 0.3 = 0.295520, cos 0.3 = 0.955336) for the
    // 32x16x8 shape at scale 6.5 with focal length 650.
    fn projector() -> Projector {
        Projector::new(650.0)
    }

    #[test]
    fn longitudinal_tip_sits_on_focal_plane() {
        // Yaw 0 leaves the tip's z at zero and the pitch rotation mixes
        // y and z, both zero here, so depth is exactly 0 and scale is 1.
        let p = projector().project(&Point3::new(104.0, 0.0, 0.0), 0.3, 0.0);
        assert!((p.depth - 0.0).abs() < EPS);
        assert!((p.x - 104.0).abs() < EPS);
        assert!((p.y - 0.0).abs() < EPS);
    }

    #[test]
    fn lateral_probe_recedes() {
        // depth = 52 * cos 0.3, scale = 650 / (650 + depth)
        let p = projector().project(&Point3::new(0.0, 0.0, 52.0), 0.3, 0.0);
        assert!((p.depth - 49.6775).abs() < EPS);
        assert!((p.x - 0.0).abs() < EPS);
        assert!((p.y - -14.2760).abs() < EPS);
    }

    #[test]
    fn vertical_probe_approaches() {
        // depth = -52 * sin 0.3, so the point projects slightly enlarged
        let p = projector().project(&Point3::new(0.0, -52.0, 0.0), 0.3, 0.0);
        assert!((p.depth - -15.3671).abs() < EPS);
        assert!((p.x - 0.0).abs() < EPS);
        assert!((p.y - -50.8803).abs() < EPS);
    }

    #[test]
    fn quarter_yaw_swaps_axes() {
        let p = projector().project(
            &Point3::new(104.0, 0.0, 0.0),
            0.0,
            std::f32::consts::FRAC_PI_2,
        );
        // At yaw pi/2 the tip rotates fully into depth
        assert!((p.depth - -104.0).abs() < EPS);
        let expected_x = 0.0;
        assert!((p.x - expected_x).abs() < EPS);
    }

    #[test]
    fn identity_rotation_is_pure_divide() {
        let proj = projector();
        let p = proj.project(&Point3::new(30.0, -20.0, 10.0), 0.0, 0.0);
        let scale = 650.0 / (650.0 + 10.0);
        assert!((p.x - 30.0 * scale).abs() < 1e-4);
        assert!((p.y - -20.0 * scale).abs() < 1e-4);
        assert!((p.depth - 10.0).abs() < 1e-4);
    }

    #[test]
    fn classic_configuration_clears_focal_plane() {
        let shape = ShapeParameters::canonical(13.0);
        assert!(projector().depth_margin(&shape) > 300.0);
    }
}
