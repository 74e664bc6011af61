//! Pose similarity: motion-weighted comparison of pose sequences
//!
//! Scores how closely a user's motion-capture sequence matches a reference
//! sequence. Each joint is weighted by how far it travels in the reference, the
//! two sequences are time-averaged into flat pose vectors, and the weighted
//! cosine of those vectors is the similarity.
//!
//! ```rust,ignore
//! let scorer = PoseSimilarityScorer::default();
//! let result = scorer.compare_poses(&reference, &user)?;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! ```

pub mod config;
pub mod error;
pub mod feedback;
pub mod loader;
pub mod pose;
pub mod scorer;
pub mod similarity;
pub mod vector;
pub mod weights;

pub use config::Config;
pub use error::ScoreError;
pub use feedback::{grade, Feedback, GradeThresholds, ScoreGrade};
pub use pose::{Landmark, Point3, PoseFrame, PoseSequence, VisibilityMatrix, DEFAULT_NUM_JOINTS};
pub use scorer::{ComparisonResult, PoseSimilarityScorer};
pub use similarity::DEFAULT_EPSILON;
pub use weights::{DegenerateMotionPolicy, VisibilityMask};
