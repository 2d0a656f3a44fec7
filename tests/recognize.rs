use handsign::{
    extract::LandmarkExtractor,
    gesture::{classify, Gesture, GestureClassifier},
    landmark::{Handedness, LandmarkSet, LANDMARK_COUNT},
    nn::{tensor::Tensor, Outputs},
    recognizer::Recognizer,
};
use rayon::prelude::*;

/// Right-hand fist, thumb raised beside the index finger.
const FIST: [[f32; 2]; LANDMARK_COUNT] = [
    [0.52, 0.80],
    [0.45, 0.72],
    [0.41, 0.63],
    [0.40, 0.53],
    [0.40, 0.45],
    [0.45, 0.50],
    [0.45, 0.46],
    [0.46, 0.52],
    [0.46, 0.58],
    [0.50, 0.50],
    [0.50, 0.46],
    [0.51, 0.52],
    [0.51, 0.58],
    [0.55, 0.51],
    [0.55, 0.47],
    [0.56, 0.53],
    [0.56, 0.59],
    [0.60, 0.53],
    [0.60, 0.50],
    [0.61, 0.55],
    [0.61, 0.60],
];

/// Right hand, fingers up, thumb folded onto the index knuckle.
const PALM: [[f32; 2]; LANDMARK_COUNT] = [
    [0.52, 0.80],
    [0.42, 0.72],
    [0.40, 0.64],
    [0.43, 0.57],
    [0.47, 0.52],
    [0.45, 0.50],
    [0.45, 0.40],
    [0.45, 0.33],
    [0.45, 0.28],
    [0.50, 0.50],
    [0.50, 0.38],
    [0.50, 0.31],
    [0.50, 0.25],
    [0.55, 0.51],
    [0.55, 0.41],
    [0.55, 0.34],
    [0.55, 0.29],
    [0.60, 0.53],
    [0.60, 0.45],
    [0.60, 0.40],
    [0.60, 0.36],
];

/// Network output for one hand in the 2-channel `[1, 21, 2]` layout.
fn network_outputs(points: &[[f32; 2]; LANDMARK_COUNT], score: f32) -> Outputs {
    Outputs::new(vec![
        Tensor::from_iter(&[1, LANDMARK_COUNT, 2], points.iter().flatten().copied()),
        Tensor::from_iter(&[1, 1], [0.0]),
        Tensor::from_iter(&[1, 1], [score]),
    ])
}

#[test]
fn extract_then_classify() {
    let extractor = LandmarkExtractor::new();

    let fist = extractor
        .extract_outputs(&network_outputs(&FIST, 0.8))
        .unwrap();
    assert_eq!(classify(&fist, Handedness::Right), Some(Gesture::A));

    let palm = extractor
        .extract_outputs(&network_outputs(&PALM, 0.5))
        .unwrap();
    assert_eq!(classify(&palm, Handedness::Right), Some(Gesture::B));

    assert!(extractor
        .extract_outputs(&network_outputs(&PALM, 0.49))
        .is_none());
}

#[test]
fn empty_landmarks_are_no_match() {
    let classifier = GestureClassifier::new();
    assert_eq!(classifier.classify_points(&[], Handedness::Right), None);
    assert_eq!(classifier.classify_points(&[[0.5; 3]; 20], Handedness::Left), None);
}

#[test]
fn concurrent_recognition() {
    let recognizer = Recognizer::default();
    let frames = (0..256)
        .map(|i| {
            let (points, hand) = match i % 3 {
                0 => (&FIST, Handedness::Right),
                1 => (&PALM, Handedness::Right),
                _ => (&FIST, Handedness::Left),
            };
            (network_outputs(points, 0.9), hand)
        })
        .collect::<Vec<_>>();

    let sequential = frames
        .iter()
        .map(|(outputs, hand)| recognizer.recognize(outputs, *hand).gesture())
        .collect::<Vec<_>>();
    let parallel = frames
        .par_iter()
        .map(|(outputs, hand)| recognizer.recognize(outputs, *hand).gesture())
        .collect::<Vec<_>>();

    assert_eq!(sequential, parallel);
    assert_eq!(sequential[0], Some(Gesture::A));
    assert_eq!(sequential[1], Some(Gesture::B));
    assert_eq!(sequential[2], None);
}

#[test]
fn landmark_set_round_trips_through_tensor() {
    let points = FIST.map(|[x, y]| [x, y, 0.0]);
    let set = LandmarkSet::from_positions(points);
    let tensor = Tensor::from_iter(&[1, LANDMARK_COUNT * 3], set.positions().flatten());
    assert_eq!(LandmarkExtractor::new().extract(&tensor, None), Some(set));
}
