//! Motion-weighted pose similarity scorer.
//!
//! The scorer holds only immutable configuration, so one instance can be
//! shared across threads and reused for any number of comparisons.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ScoreError;
use crate::pose::{self, Landmark, PoseFrame, DEFAULT_NUM_JOINTS};
use crate::similarity::{self, DEFAULT_EPSILON};
use crate::vector;
use crate::weights::{self, DegenerateMotionPolicy, VisibilityMask};

/// Outcome of one reference/user comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub similarity: f64,
    pub joint_weights: Vec<f64>,
    /// Joint weights as percentages. Not physical displacement; the name is
    /// kept for compatibility with existing consumers.
    pub joint_displacements: Vec<f64>,
}

impl ComparisonResult {
    fn new(similarity: f64, joint_weights: Vec<f64>) -> Self {
        let joint_displacements = joint_weights.iter().map(|w| w * 100.0).collect();
        Self {
            similarity,
            joint_weights,
            joint_displacements,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoseSimilarityScorer {
    num_joints: usize,
    epsilon: f64,
    degenerate_motion: DegenerateMotionPolicy,
    visibility: VisibilityMask,
}

impl Default for PoseSimilarityScorer {
    fn default() -> Self {
        Self {
            num_joints: DEFAULT_NUM_JOINTS,
            epsilon: DEFAULT_EPSILON,
            degenerate_motion: DegenerateMotionPolicy::default(),
            visibility: VisibilityMask::default(),
        }
    }
}

impl PoseSimilarityScorer {
    pub fn new(num_joints: usize, epsilon: f64) -> Result<Self, ScoreError> {
        Self::from_config(&Config {
            num_joints,
            epsilon,
            ..Config::default()
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ScoreError> {
        config.validate()?;
        Ok(Self {
            num_joints: config.num_joints,
            epsilon: config.epsilon,
            degenerate_motion: config.degenerate_motion,
            visibility: config.visibility_mask(),
        })
    }

    pub fn with_degenerate_motion(mut self, policy: DegenerateMotionPolicy) -> Self {
        self.degenerate_motion = policy;
        self
    }

    pub fn num_joints(&self) -> usize {
        self.num_joints
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Total path length of each joint across `reference`.
    pub fn compute_joint_displacements(
        &self,
        reference: &[PoseFrame],
    ) -> Result<Vec<f64>, ScoreError> {
        weights::joint_displacements(reference, self.num_joints)
    }

    /// Normalized joint weights; `reference` needs at least 2 frames.
    pub fn compute_joint_weights(&self, reference: &[PoseFrame]) -> Result<Vec<f64>, ScoreError> {
        weights::joint_weights(reference, self.num_joints, self.degenerate_motion)
    }

    /// Joint weights ignoring motion the tracker flagged as not visible.
    pub fn compute_visible_joint_weights(
        &self,
        reference: &[PoseFrame],
        visibility: &[Vec<f64>],
    ) -> Result<Vec<f64>, ScoreError> {
        weights::visible_joint_weights(
            reference,
            visibility,
            self.num_joints,
            self.visibility,
            self.degenerate_motion,
        )
    }

    pub fn pose_sequence_to_vector(&self, sequence: &[PoseFrame]) -> Result<Vec<f64>, ScoreError> {
        vector::pose_sequence_to_vector(sequence, "pose", self.num_joints)
    }

    pub fn weighted_cosine_similarity(
        &self,
        ref_vec: &[f64],
        user_vec: &[f64],
        weights: &[f64],
    ) -> Result<f64, ScoreError> {
        similarity::weighted_cosine_similarity(ref_vec, user_vec, weights, self.epsilon)
    }

    /// Score `user` against `reference`.
    ///
    /// Weights come from the reference alone, so swapping the arguments can
    /// change the score.
    pub fn compare_poses(
        &self,
        reference: &[PoseFrame],
        user: &[PoseFrame],
    ) -> Result<ComparisonResult, ScoreError> {
        let joint_weights = self.compute_joint_weights(reference)?;
        self.score(reference, user, joint_weights)
    }

    /// Like [`compare_poses`](Self::compare_poses) with visibility-masked weights.
    pub fn compare_poses_with_visibility(
        &self,
        reference: &[PoseFrame],
        user: &[PoseFrame],
        visibility: &[Vec<f64>],
    ) -> Result<ComparisonResult, ScoreError> {
        let joint_weights = self.compute_visible_joint_weights(reference, visibility)?;
        self.score(reference, user, joint_weights)
    }

    /// Compare tracker landmarks, gating reference motion by the user's visibility.
    ///
    /// Both sequences must have the same number of frames.
    pub fn compare_landmarks(
        &self,
        reference: &[Vec<Landmark>],
        user: &[Vec<Landmark>],
    ) -> Result<ComparisonResult, ScoreError> {
        let (reference, _) = pose::split_landmarks(reference);
        let (user, visibility) = pose::split_landmarks(user);
        self.compare_poses_with_visibility(&reference, &user, &visibility)
    }

    fn score(
        &self,
        reference: &[PoseFrame],
        user: &[PoseFrame],
        joint_weights: Vec<f64>,
    ) -> Result<ComparisonResult, ScoreError> {
        let ref_vec = vector::pose_sequence_to_vector(reference, "reference", self.num_joints)?;
        let user_vec = vector::pose_sequence_to_vector(user, "user", self.num_joints)?;
        let similarity = self.weighted_cosine_similarity(&ref_vec, &user_vec, &joint_weights)?;

        tracing::debug!(
            similarity,
            reference_frames = reference.len(),
            user_frames = user.len(),
            "compared pose sequences"
        );
        Ok(ComparisonResult::new(similarity, joint_weights))
    }
}
