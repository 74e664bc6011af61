//! Joint weighting from reference motion.
//!
//! A joint's weight is its share of the total path length travelled by all
//! joints across the reference sequence, so joints that drive the exercise
//! dominate the score and a planted stance leg barely counts.

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::pose::{self, PoseFrame, Point3};

/// What to do when no joint moves across the reference sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegenerateMotionPolicy {
    /// Every joint gets `1 / num_joints`
    #[default]
    Uniform,
    /// Fail with [`ScoreError::DegenerateReferenceMotion`]
    Error,
}

/// Visibility gating for [`visible_joint_weights`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityMask {
    /// A landmark counts as visible at or above this confidence
    pub visible_threshold: f64,
    /// A joint is dropped when its visible-frame ratio falls below `1 - cutoff_ratio`
    pub cutoff_ratio: f64,
}

impl Default for VisibilityMask {
    fn default() -> Self {
        Self {
            visible_threshold: 0.5,
            cutoff_ratio: 0.4,
        }
    }
}

fn distance(a: &Point3, b: &Point3) -> f64 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let dz = b[2] - a[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Total path length of every joint across `reference`.
///
/// # Errors
/// - `InsufficientFrames` if `reference` has fewer than 2 frames
/// - `ShapeMismatch` if any frame does not hold `num_joints` joints
pub fn joint_displacements(
    reference: &[PoseFrame],
    num_joints: usize,
) -> Result<Vec<f64>, ScoreError> {
    pose::validate_sequence(reference, "reference", num_joints, 2)?;

    let mut displacements = vec![0.0; num_joints];
    for pair in reference.windows(2) {
        for (j, total) in displacements.iter_mut().enumerate() {
            *total += distance(&pair[0][j], &pair[1][j]);
        }
    }
    Ok(displacements)
}

/// Normalize raw displacements into a distribution summing to 1.
pub fn normalize_displacements(
    displacements: &[f64],
    policy: DegenerateMotionPolicy,
) -> Result<Vec<f64>, ScoreError> {
    let total: f64 = displacements.iter().sum();
    if total == 0.0 {
        return match policy {
            DegenerateMotionPolicy::Uniform => {
                tracing::warn!(
                    joints = displacements.len(),
                    "reference motion is static, falling back to uniform joint weights"
                );
                let uniform = 1.0 / displacements.len() as f64;
                Ok(vec![uniform; displacements.len()])
            }
            DegenerateMotionPolicy::Error => Err(ScoreError::DegenerateReferenceMotion),
        };
    }
    Ok(displacements.iter().map(|d| d / total).collect())
}

/// Per-joint weights derived from how far each joint travels in `reference`.
pub fn joint_weights(
    reference: &[PoseFrame],
    num_joints: usize,
    policy: DegenerateMotionPolicy,
) -> Result<Vec<f64>, ScoreError> {
    let displacements = joint_displacements(reference, num_joints)?;
    tracing::debug!(?displacements, "joint displacements");
    normalize_displacements(&displacements, policy)
}

/// Path lengths that only count motion the tracker could see.
///
/// Joints visible in too few frames get zero displacement. For the rest, a
/// step only counts when the joint is visible in both frames of the step.
pub fn visible_joint_displacements(
    reference: &[PoseFrame],
    visibility: &[Vec<f64>],
    num_joints: usize,
    mask: VisibilityMask,
) -> Result<Vec<f64>, ScoreError> {
    pose::validate_sequence(reference, "reference", num_joints, 2)?;
    pose::validate_visibility(visibility, reference.len(), num_joints)?;

    let frames = reference.len();
    let is_visible = |f: usize, j: usize| visibility[f][j] >= mask.visible_threshold;

    Ok((0..num_joints)
        .map(|j| {
            let visible_count = (0..frames).filter(|&f| is_visible(f, j)).count();
            let ratio = visible_count as f64 / frames as f64;
            if ratio < 1.0 - mask.cutoff_ratio {
                return 0.0;
            }
            (1..frames)
                .filter(|&f| is_visible(f, j) && is_visible(f - 1, j))
                .map(|f| distance(&reference[f - 1][j], &reference[f][j]))
                .sum()
        })
        .collect())
}

/// Joint weights from [`visible_joint_displacements`].
pub fn visible_joint_weights(
    reference: &[PoseFrame],
    visibility: &[Vec<f64>],
    num_joints: usize,
    mask: VisibilityMask,
    policy: DegenerateMotionPolicy,
) -> Result<Vec<f64>, ScoreError> {
    let displacements = visible_joint_displacements(reference, visibility, num_joints, mask)?;
    tracing::debug!(?displacements, "visibility-masked joint displacements");
    normalize_displacements(&displacements, policy)
}
