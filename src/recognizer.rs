//! Per-frame hand sign recognition.

use crate::extract::{LandmarkExtractor, Rejection};
use crate::gesture::{Gesture, GestureClassifier};
use crate::landmark::{Handedness, LandmarkSet};
use crate::nn::{tensor::Tensor, Outputs};

/// The outcome of running a [`Recognizer`] on one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Recognition {
    /// No hand was extracted from the network output.
    NoHand(Rejection),
    /// A hand was found. `gesture` is [`None`] if it doesn't form a known sign.
    Hand {
        landmarks: LandmarkSet,
        gesture: Option<Gesture>,
    },
}

impl Recognition {
    pub fn landmarks(&self) -> Option<&LandmarkSet> {
        match self {
            Recognition::NoHand(_) => None,
            Recognition::Hand { landmarks, .. } => Some(landmarks),
        }
    }

    pub fn gesture(&self) -> Option<Gesture> {
        match self {
            Recognition::NoHand(_) => None,
            Recognition::Hand { gesture, .. } => *gesture,
        }
    }
}

/// Combines a [`LandmarkExtractor`] and a [`GestureClassifier`].
///
/// Frames are processed independently of each other; a [`Recognizer`] keeps no per-frame state
/// and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Recognizer {
    extractor: LandmarkExtractor,
    classifier: GestureClassifier,
}

impl Recognizer {
    pub fn new(extractor: LandmarkExtractor, classifier: GestureClassifier) -> Self {
        Self {
            extractor,
            classifier,
        }
    }

    pub fn extractor(&self) -> &LandmarkExtractor {
        &self.extractor
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Recognizes the hand sign in the outputs of a hand landmark network.
    pub fn recognize(&self, outputs: &Outputs, hand: Handedness) -> Recognition {
        self.finish(self.extractor.try_extract_outputs(outputs), hand)
    }

    /// Recognizes the hand sign from a landmark tensor and optional detection confidence.
    pub fn recognize_tensor(
        &self,
        landmarks: &Tensor,
        confidence: Option<f32>,
        hand: Handedness,
    ) -> Recognition {
        self.finish(self.extractor.try_extract(landmarks, confidence), hand)
    }

    fn finish(&self, extracted: Result<LandmarkSet, Rejection>, hand: Handedness) -> Recognition {
        match extracted {
            Ok(landmarks) => {
                let gesture = self.classifier.classify(&landmarks, hand);
                Recognition::Hand { landmarks, gesture }
            }
            Err(rejection) => {
                log::trace!("no hand: {rejection}");
                Recognition::NoHand(rejection)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test;

    fn outputs(hand: &LandmarkSet, score: f32) -> Outputs {
        let coords = hand.positions().flatten();
        Outputs::new(vec![
            Tensor::from_iter(&[1, 63], coords),
            Tensor::from_iter(&[1, 1], [1.0]),
            Tensor::from_iter(&[1, 1], [score]),
        ])
    }

    #[test]
    fn recognize_frames() {
        let recognizer = Recognizer::default();

        let result = recognizer.recognize(&outputs(&test::open_palm(), 0.9), Handedness::Right);
        assert_eq!(result.gesture(), Some(Gesture::B));
        assert_eq!(result.landmarks(), Some(&test::open_palm()));

        let result = recognizer.recognize(&outputs(&test::c_shape(), 0.9), Handedness::Right);
        assert_eq!(result.gesture(), Some(Gesture::C));
    }

    #[test]
    fn low_confidence_frame() {
        let recognizer = Recognizer::default();
        let result = recognizer.recognize(&outputs(&test::fist(), 0.1), Handedness::Right);
        assert!(matches!(
            result,
            Recognition::NoHand(Rejection::LowConfidence { .. })
        ));
        assert_eq!(result.landmarks(), None);
        assert_eq!(result.gesture(), None);
    }

    #[test]
    fn hand_without_sign() {
        let recognizer = Recognizer::default();
        let left = test::mirror(&test::fist());
        let result = recognizer.recognize(&outputs(&left, 0.9), Handedness::Right);
        assert_eq!(result.landmarks(), Some(&left));
        assert_eq!(result.gesture(), None);
    }

    #[test]
    fn recognize_tensor() {
        let mut extractor = LandmarkExtractor::new();
        extractor.set_threshold(0.95);
        let recognizer = Recognizer::new(extractor, GestureClassifier::new());
        let tensor = Tensor::from_iter(&[1, 21, 3], test::fist().positions().flatten());

        assert_eq!(
            recognizer
                .recognize_tensor(&tensor, Some(0.97), Handedness::Right)
                .gesture(),
            Some(Gesture::A)
        );
        assert!(matches!(
            recognizer.recognize_tensor(&tensor, Some(0.9), Handedness::Right),
            Recognition::NoHand(_)
        ));
    }
}
