//! Conceptual point cloud alignment.
//!
//! Random points are moved by a canned ground-truth pose and by a slightly
//! wrong "predicted" pose so the effect of registration error can be shown.
//! Nothing here performs registration.

use std::f64::consts::PI;

use nalgebra::{Isometry3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_NUM_POINTS: usize = 100;
pub const DEFAULT_OVERLAP_TAU: f64 = 0.5;

/// Side length of the cube the original points are drawn from.
const EXTENT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CloudKind {
    Original,
    GroundTruth,
    Predicted,
}

impl CloudKind {
    pub fn label(&self) -> &'static str {
        match self {
            CloudKind::Original => "Original Point Cloud",
            CloudKind::GroundTruth => "Ground Truth Aligned",
            CloudKind::Predicted => "Predicted Aligned",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            CloudKind::Original => "blue",
            CloudKind::GroundTruth => "green",
            CloudKind::Predicted => "red",
        }
    }

    pub fn all() -> &'static [CloudKind] {
        &[CloudKind::Original, CloudKind::GroundTruth, CloudKind::Predicted]
    }
}

/// A rigid transform described by a yaw angle and a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub yaw_rad: f64,
    pub translation: Vector3<f64>,
}

impl Pose {
    pub fn new(yaw_rad: f64, translation: Vector3<f64>) -> Self {
        Self {
            yaw_rad,
            translation,
        }
    }

    /// Ground-truth pose: 30 degrees about Z, shifted by (1, 2, 3).
    pub fn ground_truth() -> Self {
        Self::new(PI / 6.0, Vector3::new(1.0, 2.0, 3.0))
    }

    /// Predicted pose, close to but not equal to the ground truth.
    pub fn predicted() -> Self {
        Self::new(PI / 5.5, Vector3::new(1.1, 1.9, 3.2))
    }

    pub fn rotation(&self) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), self.yaw_rad)
    }

    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::from(self.translation),
            UnitQuaternion::from_rotation_matrix(&self.rotation()),
        )
    }

    pub fn apply(&self, points: &[Point3<f64>]) -> Vec<Point3<f64>> {
        let iso = self.isometry();
        points.iter().map(|p| iso.transform_point(p)).collect()
    }
}

/// Angle in degrees between two rotations.
pub fn rotation_error_deg(predicted: &Rotation3<f64>, ground_truth: &Rotation3<f64>) -> f64 {
    let relative = predicted.matrix().transpose() * ground_truth.matrix();
    let cos = ((relative.trace() - 1.0) / 2.0).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

pub fn translation_error(predicted: &Vector3<f64>, ground_truth: &Vector3<f64>) -> f64 {
    (predicted - ground_truth).norm()
}

/// Root mean square distance between paired points.
///
/// Returns 0 for empty input; extra points on the longer side are ignored.
pub fn rmse(a: &[Point3<f64>], b: &[Point3<f64>]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(p, q)| (p - q).norm_squared())
        .sum();
    (sum / n as f64).sqrt()
}

/// Fraction of paired points closer than `tau`.
pub fn overlap_ratio(a: &[Point3<f64>], b: &[Point3<f64>], tau: f64) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let inliers = a.iter().zip(b).filter(|(p, q)| (*p - *q).norm() <= tau).count();
    inliers as f64 / n as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlignmentSummary {
    pub rotation_error_deg: f64,
    pub translation_error: f64,
    pub rmse: f64,
    pub overlap_ratio: f64,
    pub overlap_tau: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConceptualScene {
    pub seed: u64,
    pub ground_truth: Pose,
    pub predicted: Pose,
    pub original: Vec<Point3<f64>>,
    pub ground_truth_aligned: Vec<Point3<f64>>,
    pub predicted_aligned: Vec<Point3<f64>>,
}

impl Default for ConceptualScene {
    fn default() -> Self {
        Self::generate(DEFAULT_SEED, DEFAULT_NUM_POINTS)
    }
}

impl ConceptualScene {
    pub fn generate(seed: u64, num_points: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let original: Vec<Point3<f64>> = (0..num_points)
            .map(|_| {
                Point3::new(
                    rng.gen::<f64>() * EXTENT,
                    rng.gen::<f64>() * EXTENT,
                    rng.gen::<f64>() * EXTENT,
                )
            })
            .collect();

        let ground_truth = Pose::ground_truth();
        let predicted = Pose::predicted();

        tracing::debug!(seed, num_points, "Generated conceptual scene");

        Self {
            seed,
            ground_truth,
            predicted,
            ground_truth_aligned: ground_truth.apply(&original),
            predicted_aligned: predicted.apply(&original),
            original,
        }
    }

    pub fn cloud(&self, kind: CloudKind) -> &[Point3<f64>] {
        match kind {
            CloudKind::Original => &self.original,
            CloudKind::GroundTruth => &self.ground_truth_aligned,
            CloudKind::Predicted => &self.predicted_aligned,
        }
    }

    pub fn summary(&self, tau: f64) -> AlignmentSummary {
        AlignmentSummary {
            rotation_error_deg: rotation_error_deg(
                &self.predicted.rotation(),
                &self.ground_truth.rotation(),
            ),
            translation_error: translation_error(
                &self.predicted.translation,
                &self.ground_truth.translation,
            ),
            rmse: rmse(&self.predicted_aligned, &self.ground_truth_aligned),
            overlap_ratio: overlap_ratio(&self.predicted_aligned, &self.ground_truth_aligned, tau),
            overlap_tau: tau,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_generation_is_deterministic() {
        let a = ConceptualScene::generate(7, 20);
        let b = ConceptualScene::generate(7, 20);
        assert_eq!(a, b);
        assert_ne!(a.original, ConceptualScene::generate(8, 20).original);
    }

    #[test]
    fn test_points_inside_cube() {
        let scene = ConceptualScene::default();
        assert_eq!(scene.original.len(), DEFAULT_NUM_POINTS);
        for p in &scene.original {
            assert!(p.coords.iter().all(|c| (0.0..EXTENT).contains(c)));
        }
    }

    #[test]
    fn test_ground_truth_applies_pose() {
        let scene = ConceptualScene::generate(1, 5);
        let rot = Pose::ground_truth().rotation();
        for (p, q) in scene.original.iter().zip(&scene.ground_truth_aligned) {
            let expected = rot * p + Vector3::new(1.0, 2.0, 3.0);
            assert!((expected - q).norm() < EPS);
        }
    }

    #[test]
    fn test_pose_errors_of_canned_transforms() {
        let summary = ConceptualScene::default().summary(DEFAULT_OVERLAP_TAU);
        // pi/5.5 - pi/6 = pi/66
        assert!((summary.rotation_error_deg - 180.0 / 66.0).abs() < 1e-6);
        assert!((summary.translation_error - 0.06f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_rmse_and_overlap() {
        let a = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let b = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 0.0)];
        assert!((rmse(&a, &b) - 2.0f64.sqrt()).abs() < EPS);
        assert_eq!(overlap_ratio(&a, &b, 0.5), 0.5);
        assert_eq!(overlap_ratio(&a, &b, 2.0), 1.0);
        assert_eq!(rmse(&[], &b), 0.0);
    }

    #[test]
    fn test_identical_rotations_have_zero_error() {
        let r = Pose::predicted().rotation();
        assert!(rotation_error_deg(&r, &r).abs() < 1e-6);
    }
}
