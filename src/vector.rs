//! Flattening pose sequences into fixed-length vectors.

use crate::error::ScoreError;
use crate::pose::{self, PoseFrame};

/// Time-average every joint across `sequence` and flatten joint-major.
///
/// The result holds `num_joints * 3` values: joint 0's mean x, y, z, then
/// joint 1's, and so on. Motion detail is discarded; only the average posture
/// survives.
pub fn pose_sequence_to_vector(
    sequence: &[PoseFrame],
    name: &'static str,
    num_joints: usize,
) -> Result<Vec<f64>, ScoreError> {
    pose::validate_sequence(sequence, name, num_joints, 1)?;

    let mut sums = vec![0.0; num_joints * 3];
    for frame in sequence {
        for (j, point) in frame.iter().enumerate() {
            for (axis, value) in point.iter().enumerate() {
                sums[j * 3 + axis] += value;
            }
        }
    }

    let frames = sequence.len() as f64;
    for value in &mut sums {
        *value /= frames;
    }
    Ok(sums)
}

/// Repeat each joint weight over its x, y and z components.
pub fn expand_weights(weights: &[f64]) -> Vec<f64> {
    weights.iter().flat_map(|&w| [w, w, w]).collect()
}
