//! Coaching feedback for a similarity score.

use serde::{Deserialize, Serialize};

/// Percentage cut-offs for each grade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeThresholds {
    pub excellent: f64,
    pub good: f64,
}

impl Default for GradeThresholds {
    fn default() -> Self {
        Self {
            excellent: 80.0,
            good: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreGrade {
    Excellent,
    Good,
    NeedsPractice,
}

impl ScoreGrade {
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Great job! Your form is excellent!",
            Self::Good => "Good effort! Try to keep your movements more controlled.",
            Self::NeedsPractice => {
                "Keep practicing! Focus on matching the reference video more closely."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Similarity clamped to [0, 1] and scaled to a percentage
    pub score: f64,
    pub grade: ScoreGrade,
    pub message: String,
}

/// Map a similarity to a percentage score and a grade.
pub fn grade(similarity: f64, thresholds: GradeThresholds) -> Feedback {
    let score = if similarity.is_nan() {
        0.0
    } else {
        similarity.clamp(0.0, 1.0) * 100.0
    };
    let grade = if score >= thresholds.excellent {
        ScoreGrade::Excellent
    } else if score >= thresholds.good {
        ScoreGrade::Good
    } else {
        ScoreGrade::NeedsPractice
    };
    Feedback {
        score,
        grade,
        message: grade.message().to_string(),
    }
}
