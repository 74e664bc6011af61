//! End-to-end behaviour of `PoseSimilarityScorer::compare_poses`.

use pose_similarity::{
    loader, ComparisonResult, DegenerateMotionPolicy, PoseFrame, PoseSequence,
    PoseSimilarityScorer, ScoreError,
};

fn uniform_frame(value: f64) -> PoseFrame {
    vec![[value; 3]; 33]
}

/// Two 33-joint frames: reference (0,0,0) -> (1,1,1), user offset by 0.1.
fn reference_example() -> (PoseSequence, PoseSequence) {
    (
        vec![uniform_frame(0.0), uniform_frame(1.0)],
        vec![uniform_frame(0.1), uniform_frame(1.1)],
    )
}

/// Small 4-joint motion with one static joint.
fn squat_like() -> PoseSequence {
    vec![
        vec![[0.0, 1.0, 0.0], [0.2, 0.5, 0.1], [0.3, 0.0, 0.0], [-0.3, 0.0, 0.0]],
        vec![[0.0, 0.8, 0.1], [0.25, 0.35, 0.2], [0.3, 0.0, 0.0], [-0.3, 0.05, 0.0]],
        vec![[0.0, 0.6, 0.2], [0.3, 0.2, 0.3], [0.3, 0.0, 0.0], [-0.3, 0.1, 0.0]],
        vec![[0.0, 0.8, 0.1], [0.25, 0.35, 0.2], [0.3, 0.0, 0.0], [-0.3, 0.05, 0.0]],
    ]
}

fn scale(seq: &[PoseFrame], k: f64) -> PoseSequence {
    seq.iter()
        .map(|frame| frame.iter().map(|p| [p[0] * k, p[1] * k, p[2] * k]).collect())
        .collect()
}

#[test]
fn test_reference_example() {
    let scorer = PoseSimilarityScorer::default();
    let (reference, user) = reference_example();
    let result = scorer.compare_poses(&reference, &user).unwrap();

    assert_eq!(result.joint_weights.len(), 33);
    for w in &result.joint_weights {
        assert!((w - 1.0 / 33.0).abs() < 1e-12, "weight {w}");
    }
    assert!((result.similarity - 1.0).abs() < 1e-5, "similarity {}", result.similarity);
    assert!(result.similarity <= 1.0);
}

#[test]
fn test_result_json_shape() {
    let scorer = PoseSimilarityScorer::default();
    let (reference, user) = reference_example();
    let result = scorer.compare_poses(&reference, &user).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 3);
    assert!(obj["similarity"].is_number());
    assert_eq!(obj["joint_weights"].as_array().unwrap().len(), 33);
    assert_eq!(obj["joint_displacements"].as_array().unwrap().len(), 33);

    let back: ComparisonResult = serde_json::from_value(json).unwrap();
    assert!((back.similarity - result.similarity).abs() < 1e-12);
    assert_eq!(back.joint_weights.len(), result.joint_weights.len());
}

#[test]
fn test_weights_are_a_distribution() {
    let scorer = PoseSimilarityScorer::new(4, 1e-8).unwrap();
    let result = scorer.compare_poses(&squat_like(), &squat_like()).unwrap();
    let sum: f64 = result.joint_weights.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
    assert!(result.joint_weights.iter().all(|&w| w >= 0.0));
    for (w, d) in result.joint_weights.iter().zip(&result.joint_displacements) {
        assert_eq!(*d, w * 100.0);
    }
}

#[test]
fn test_static_joint_never_dominates() {
    let scorer = PoseSimilarityScorer::new(4, 1e-8).unwrap();
    let weights = scorer.compute_joint_weights(&squat_like()).unwrap();
    // joint 2 never moves
    assert_eq!(weights[2], 0.0);
    for j in [0, 1, 3] {
        assert!(weights[2] < weights[j]);
    }
}

#[test]
fn test_self_similarity() {
    let scorer = PoseSimilarityScorer::new(4, 1e-8).unwrap();
    let result = scorer.compare_poses(&squat_like(), &squat_like()).unwrap();
    assert!((result.similarity - 1.0).abs() < 1e-6);
}

#[test]
fn test_scale_invariance() {
    let scorer = PoseSimilarityScorer::new(4, 1e-8).unwrap();
    let reference = squat_like();
    let user: PoseSequence = reference
        .iter()
        .map(|frame| frame.iter().map(|p| [p[0] + 0.05, p[1] * 0.9, p[2] - 0.1]).collect())
        .collect();

    let base = scorer.compare_poses(&reference, &user).unwrap().similarity;
    let scaled = scorer
        .compare_poses(&scale(&reference, 2.5), &scale(&user, 2.5))
        .unwrap()
        .similarity;
    assert!((base - scaled).abs() < 1e-6, "{base} vs {scaled}");
}

#[test]
fn test_argument_order_matters() {
    let scorer = PoseSimilarityScorer::new(2, 1e-8).unwrap();
    // a: joint 0 travels, joint 1 holds; b: the reverse
    let a = vec![
        vec![[0.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        vec![[2.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    ];
    let b = vec![
        vec![[1.0, 0.0, 0.0], [0.0, 0.0, 0.0]],
        vec![[1.0, 0.0, 0.0], [0.0, 0.0, 2.0]],
    ];

    let ab = scorer.compare_poses(&a, &b).unwrap().similarity;
    let ba = scorer.compare_poses(&b, &a).unwrap().similarity;
    assert!((ab - 1.0).abs() < 1e-6);
    assert!(ba.abs() < 1e-6);
    assert!((ab - ba).abs() > 0.5);
}

#[test]
fn test_two_frame_reference_accepted() {
    let scorer = PoseSimilarityScorer::default();
    let (reference, user) = reference_example();
    assert_eq!(reference.len(), 2);
    assert!(scorer.compare_poses(&reference, &user).is_ok());
}

#[test]
fn test_one_frame_reference_rejected() {
    let scorer = PoseSimilarityScorer::default();
    let reference = vec![uniform_frame(0.0)];
    let user = vec![uniform_frame(0.1)];
    let err = scorer.compare_poses(&reference, &user).unwrap_err();
    assert_eq!(
        err,
        ScoreError::InsufficientFrames { sequence: "reference", required: 2, actual: 1 }
    );
}

#[test]
fn test_static_reference_policies() {
    let still = vec![uniform_frame(0.4), uniform_frame(0.4)];
    let user = vec![uniform_frame(0.5)];

    let result = PoseSimilarityScorer::default().compare_poses(&still, &user).unwrap();
    assert!(result.joint_weights.iter().all(|&w| w == 1.0 / 33.0));
    assert!(result.similarity.is_finite());

    let strict = PoseSimilarityScorer::default().with_degenerate_motion(DegenerateMotionPolicy::Error);
    assert_eq!(
        strict.compare_poses(&still, &user).unwrap_err(),
        ScoreError::DegenerateReferenceMotion
    );
}

#[test]
fn test_loaded_files_score_like_in_memory() {
    let dir = tempfile::TempDir::new().unwrap();
    let (reference, user) = reference_example();
    let ref_path = dir.path().join("reference.json");
    let user_path = dir.path().join("user.json");
    std::fs::write(&ref_path, serde_json::to_string(&reference).unwrap()).unwrap();
    std::fs::write(&user_path, serde_json::to_string(&user).unwrap()).unwrap();

    let scorer = PoseSimilarityScorer::default();
    let from_files = scorer
        .compare_poses(
            &loader::load_sequence(&ref_path).unwrap().into_poses(),
            &loader::load_sequence(&user_path).unwrap().into_poses(),
        )
        .unwrap();
    assert_eq!(from_files, scorer.compare_poses(&reference, &user).unwrap());
}
