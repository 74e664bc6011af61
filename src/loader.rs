//! JSON pose sequence files.
//!
//! A file is an array of frames. Each frame is an array of either `[x, y, z]`
//! triples or tracker landmark objects `{"x", "y", "z", "visibility"?}`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::pose::{self, Landmark, PoseSequence};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SequenceFile {
    Points(PoseSequence),
    Landmarks(Vec<Vec<Landmark>>),
}

impl SequenceFile {
    pub fn frame_count(&self) -> usize {
        match self {
            Self::Points(frames) => frames.len(),
            Self::Landmarks(frames) => frames.len(),
        }
    }

    pub fn has_visibility(&self) -> bool {
        matches!(self, Self::Landmarks(_))
    }

    pub fn into_poses(self) -> PoseSequence {
        match self {
            Self::Points(frames) => frames,
            Self::Landmarks(frames) => pose::split_landmarks(&frames).0,
        }
    }

    /// Landmarks for every joint; plain triples are treated as fully visible.
    pub fn into_landmarks(self) -> Vec<Vec<Landmark>> {
        match self {
            Self::Points(frames) => frames
                .into_iter()
                .map(|frame| {
                    frame
                        .into_iter()
                        .map(|[x, y, z]| Landmark::new(x, y, z))
                        .collect()
                })
                .collect(),
            Self::Landmarks(frames) => frames,
        }
    }
}

pub fn parse_sequence(json: &str) -> Result<SequenceFile> {
    serde_json::from_str(json)
        .context("expected an array of frames of [x, y, z] triples or landmark objects")
}

pub fn load_sequence(path: impl AsRef<Path>) -> Result<SequenceFile> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading pose sequence {}", path.display()))?;
    let sequence = parse_sequence(&content)
        .with_context(|| format!("parsing pose sequence {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        frames = sequence.frame_count(),
        landmarks = sequence.has_visibility(),
        "loaded pose sequence"
    );
    Ok(sequence)
}
