//! Turning raw hand landmark network output into a [`LandmarkSet`].
//!
//! The extractor is deliberately forgiving about *values*: coordinates are passed through as the
//! network produced them, even when they lie outside of the frame. It is strict about *shapes*:
//! anything but a single hand of exactly [`LANDMARK_COUNT`] landmarks is rejected.

use crate::landmark::{Landmark, LandmarkSet, LANDMARK_COUNT};
use crate::nn::{tensor::Tensor, Outputs};

/// Reason why no [`LandmarkSet`] was extracted from a network output.
///
/// None of these are faults: a frame without a (confidently detected) hand is an expected outcome
/// that callers handle by skipping the frame.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Rejection {
    /// The landmark tensor does not have the shape of a single hand.
    #[error("landmark tensor has unexpected shape {shape:?}")]
    MalformedOutput { shape: Vec<usize> },
    /// The network did not produce the output at `index`.
    #[error("network output {index} is missing")]
    MissingOutput { index: usize },
    /// The detection confidence is below the extractor's threshold.
    #[error("detection confidence {confidence} is below threshold {threshold}")]
    LowConfidence { confidence: f32, threshold: f32 },
}

/// Validates hand landmark network output and extracts a [`LandmarkSet`] from it.
///
/// Accepted landmark tensor shapes are `[1, 21, C]` with `C >= 2` channels per landmark, and the
/// flattened `[1, 63]` and `[1, 42]` layouts. The first three channels are used as X, Y and Z,
/// further channels are ignored. With only two channels, Z is set to `0.0`.
#[derive(Debug, Clone)]
pub struct LandmarkExtractor {
    threshold: f32,
}

impl Default for LandmarkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkExtractor {
    /// Detections with a confidence below this value are rejected.
    pub const DEFAULT_THRESHOLD: f32 = 0.5;

    /// Index of the landmark tensor in the network's outputs.
    pub const LANDMARK_OUTPUT: usize = 0;

    /// Index of the confidence score in the network's outputs.
    ///
    /// Only networks with more than two outputs provide a score.
    pub const SCORE_OUTPUT: usize = 2;

    pub fn new() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    /// Sets the confidence threshold.
    ///
    /// A confidence exactly equal to the threshold is accepted.
    ///
    /// By default, [`LandmarkExtractor::DEFAULT_THRESHOLD`] is used.
    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Extracts landmarks from a landmark tensor and an optional detection confidence.
    ///
    /// Returns [`None`] for any [`Rejection`].
    pub fn extract(&self, landmarks: &Tensor, confidence: Option<f32>) -> Option<LandmarkSet> {
        self.try_extract(landmarks, confidence)
            .map_err(|rejection| log::trace!("no hand: {rejection}"))
            .ok()
    }

    /// Extracts landmarks from all outputs of a hand landmark network.
    ///
    /// Output [`LandmarkExtractor::LANDMARK_OUTPUT`] holds the landmarks. If the network has more
    /// than two outputs, output [`LandmarkExtractor::SCORE_OUTPUT`] holds the detection
    /// confidence.
    pub fn extract_outputs(&self, outputs: &Outputs) -> Option<LandmarkSet> {
        self.try_extract_outputs(outputs)
            .map_err(|rejection| log::trace!("no hand: {rejection}"))
            .ok()
    }

    pub fn try_extract_outputs(&self, outputs: &Outputs) -> Result<LandmarkSet, Rejection> {
        let landmarks = outputs
            .get(Self::LANDMARK_OUTPUT)
            .ok_or(Rejection::MissingOutput {
                index: Self::LANDMARK_OUTPUT,
            })?;

        let confidence = match outputs.get(Self::SCORE_OUTPUT) {
            Some(score) => Some(score.first().ok_or_else(|| Rejection::MalformedOutput {
                shape: score.shape().to_vec(),
            })?),
            None => None,
        };

        self.try_extract(landmarks, confidence)
    }

    /// Like [`LandmarkExtractor::extract`], but reports why extraction failed.
    pub fn try_extract(
        &self,
        landmarks: &Tensor,
        confidence: Option<f32>,
    ) -> Result<LandmarkSet, Rejection> {
        if let Some(confidence) = confidence {
            if confidence < self.threshold {
                return Err(Rejection::LowConfidence {
                    confidence,
                    threshold: self.threshold,
                });
            }
        }

        let malformed = || Rejection::MalformedOutput {
            shape: landmarks.shape().to_vec(),
        };

        // Bring flattened outputs into `[1, 21, C]` form.
        let reshaped;
        let landmarks = match *landmarks.shape() {
            [1, n, c] if n == LANDMARK_COUNT && c >= 2 => landmarks,
            [1, len] if len == LANDMARK_COUNT * 3 || len == LANDMARK_COUNT * 2 => {
                reshaped = landmarks
                    .reshape(&[1, LANDMARK_COUNT, len / LANDMARK_COUNT])
                    .ok_or_else(malformed)?;
                &reshaped
            }
            _ => return Err(malformed()),
        };

        let hand = landmarks.index([0]);
        let mut out = [Landmark::default(); LANDMARK_COUNT];
        for (i, lm) in out.iter_mut().enumerate() {
            *lm = match *hand.index([i]).as_slice() {
                [x, y] => Landmark::new([x, y, 0.0]),
                [x, y, z, ..] => Landmark::new([x, y, z]),
                _ => return Err(malformed()),
            };
        }

        Ok(LandmarkSet::new(out))
    }
}
