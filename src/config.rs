use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ScoreError;
use crate::feedback::GradeThresholds;
use crate::pose::DEFAULT_NUM_JOINTS;
use crate::similarity::DEFAULT_EPSILON;
use crate::weights::{DegenerateMotionPolicy, VisibilityMask};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub num_joints: usize,
    pub epsilon: f64,
    pub degenerate_motion: DegenerateMotionPolicy,
    pub visible_threshold: f64,
    pub visibility_cutoff_ratio: f64,
    pub grade_excellent: f64,
    pub grade_good: f64,
}

impl Default for Config {
    fn default() -> Self {
        let mask = VisibilityMask::default();
        let grades = GradeThresholds::default();
        Self {
            num_joints: DEFAULT_NUM_JOINTS,
            epsilon: DEFAULT_EPSILON,
            degenerate_motion: DegenerateMotionPolicy::default(),
            visible_threshold: mask.visible_threshold,
            visibility_cutoff_ratio: mask.cutoff_ratio,
            grade_excellent: grades.excellent,
            grade_good: grades.good,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)
            .with_context(|| format!("writing config {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.num_joints == 0 {
            return Err(ScoreError::InvalidConfig("num_joints must be positive".into()));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ScoreError::InvalidConfig(format!(
                "epsilon must be finite and positive, got {}",
                self.epsilon
            )));
        }
        for (name, value) in [
            ("visible_threshold", self.visible_threshold),
            ("visibility_cutoff_ratio", self.visibility_cutoff_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScoreError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.grade_good > self.grade_excellent {
            return Err(ScoreError::InvalidConfig(
                "grade_good must not exceed grade_excellent".into(),
            ));
        }
        Ok(())
    }

    pub fn visibility_mask(&self) -> VisibilityMask {
        VisibilityMask {
            visible_threshold: self.visible_threshold,
            cutoff_ratio: self.visibility_cutoff_ratio,
        }
    }

    pub fn grade_thresholds(&self) -> GradeThresholds {
        GradeThresholds {
            excellent: self.grade_excellent,
            good: self.grade_good,
        }
    }
}
