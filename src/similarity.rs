//! Weighted cosine similarity between two pose vectors.

use crate::error::ScoreError;
use crate::vector::expand_weights;

/// Default regularization added to the cosine denominator.
pub const DEFAULT_EPSILON: f64 = 1e-8;

#[inline]
fn l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine similarity of `ref_vec` and `user_vec` after scaling each joint by its weight.
///
/// Both vectors are multiplied component-wise by the joint weights (each weight
/// broadcast over its joint's 3 axes), and the plain cosine of the weighted
/// vectors is taken:
///
/// `dot(w⊙ref, w⊙user) / (‖w⊙ref‖ · ‖w⊙user‖ + epsilon)`
///
/// `epsilon` keeps the result finite when either weighted vector is zero, and
/// pulls near-degenerate results slightly toward 0.
///
/// # Errors
/// - `ShapeMismatch` if the vectors differ in length or do not hold 3 values per weight
pub fn weighted_cosine_similarity(
    ref_vec: &[f64],
    user_vec: &[f64],
    weights: &[f64],
    epsilon: f64,
) -> Result<f64, ScoreError> {
    let expected = weights.len() * 3;
    if ref_vec.len() != expected {
        return Err(ScoreError::shape("reference vector", expected, ref_vec.len()));
    }
    if user_vec.len() != expected {
        return Err(ScoreError::shape("user vector", expected, user_vec.len()));
    }

    let expanded = expand_weights(weights);
    let weighted_ref: Vec<f64> = expanded.iter().zip(ref_vec).map(|(w, r)| w * r).collect();
    let weighted_user: Vec<f64> = expanded.iter().zip(user_vec).map(|(w, u)| w * u).collect();

    let dot: f64 = weighted_ref
        .iter()
        .zip(&weighted_user)
        .map(|(r, u)| r * u)
        .sum();
    let norm_ref = l2_norm(&weighted_ref);
    let norm_user = l2_norm(&weighted_user);

    Ok(dot / (norm_ref * norm_user + epsilon))
}
