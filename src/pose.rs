//! Pose data model: frames of 3D joint positions and tracker landmarks.
//!
//! Joint indices follow the BlazePose 33-landmark topology by default, but the
//! scorer only relies on the count being consistent across frames.

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

/// BlazePose / MediaPipe Pose landmark count
pub const DEFAULT_NUM_JOINTS: usize = 33;

/// (x, y, z) position of one joint
pub type Point3 = [f64; 3];

/// One time-sampled snapshot of every joint
pub type PoseFrame = Vec<Point3>;

/// Ordered frames describing motion over time
pub type PoseSequence = Vec<PoseFrame>;

/// Per-frame, per-joint tracker confidence in [0, 1]
pub type VisibilityMatrix = Vec<Vec<f64>>;

/// Landmark as emitted by a pose tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default = "full_visibility")]
    pub visibility: f64,
}

fn full_visibility() -> f64 {
    1.0
}

impl Landmark {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, visibility: 1.0 }
    }

    pub fn position(&self) -> Point3 {
        [self.x, self.y, self.z]
    }
}

/// Split landmark frames into coordinates and a visibility matrix.
pub fn split_landmarks(frames: &[Vec<Landmark>]) -> (PoseSequence, VisibilityMatrix) {
    let poses = frames
        .iter()
        .map(|frame| frame.iter().map(Landmark::position).collect())
        .collect();
    let visibility = frames
        .iter()
        .map(|frame| frame.iter().map(|l| l.visibility).collect())
        .collect();
    (poses, visibility)
}

/// Check that `sequence` has at least `min_frames` frames of `num_joints` joints each.
pub fn validate_sequence(
    sequence: &[PoseFrame],
    name: &'static str,
    num_joints: usize,
    min_frames: usize,
) -> Result<(), ScoreError> {
    if sequence.len() < min_frames {
        return Err(ScoreError::InsufficientFrames {
            sequence: name,
            required: min_frames,
            actual: sequence.len(),
        });
    }
    for (i, frame) in sequence.iter().enumerate() {
        if frame.len() != num_joints {
            return Err(ScoreError::shape(
                format!("{name} frame {i}"),
                num_joints,
                frame.len(),
            ));
        }
    }
    Ok(())
}

/// Check that a visibility matrix lines up with a `frames` x `num_joints` sequence.
pub fn validate_visibility(
    visibility: &[Vec<f64>],
    frames: usize,
    num_joints: usize,
) -> Result<(), ScoreError> {
    if visibility.len() != frames {
        return Err(ScoreError::shape("visibility frames", frames, visibility.len()));
    }
    for (i, row) in visibility.iter().enumerate() {
        if row.len() != num_joints {
            return Err(ScoreError::shape(
                format!("visibility frame {i}"),
                num_joints,
                row.len(),
            ));
        }
    }
    Ok(())
}
