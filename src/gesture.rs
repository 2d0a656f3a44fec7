//! Rule-based hand sign classification.
//!
//! Each letter is recognized by a fixed geometric rule over the hand's landmarks. Rules are tried
//! in a fixed order and the first one that matches wins, so a hand pose satisfying several rules
//! is always reported as the earliest of them. New letters are appended to the end of the rule
//! table without affecting the existing ones.

pub mod probe;

use std::fmt;

use crate::landmark::{Handedness, LandmarkSet, LANDMARK_COUNT};

use self::probe::{Probe, Thresholds};

/// The letters of the manual alphabet that can be recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Closed fist, thumb pressed upward along the side of the index finger.
    A,
    /// Flat hand, fingers up, thumb folded across the palm.
    B,
    /// Hand curved like the letter, fingers bunched above a hooked thumb.
    C,
}

impl Gesture {
    /// All gestures, in the order their rules are evaluated.
    pub const ALL: [Gesture; 3] = [Gesture::A, Gesture::B, Gesture::C];

    pub fn letter(self) -> char {
        match self {
            Gesture::A => 'A',
            Gesture::B => 'B',
            Gesture::C => 'C',
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Errors reported by [`GestureClassifier::try_classify_points`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("expected {} landmarks, got {found}", LANDMARK_COUNT)]
    IncompleteLandmarks { found: usize },
}

struct Rule {
    gesture: Gesture,
    matches: fn(&Probe<'_>) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        gesture: Gesture::A,
        matches: |p| p.thumb_raised() && p.thumb_outside() && p.all_curled(),
    },
    Rule {
        gesture: Gesture::B,
        matches: |p| p.thumb_tucked() && p.all_extended(),
    },
    Rule {
        gesture: Gesture::C,
        matches: |p| p.tips_clustered() && p.pip_depth_gradient() && p.thumb_hooked(),
    },
];

/// Classifies a hand pose using the default [`Thresholds`].
pub fn classify(landmarks: &LandmarkSet, hand: Handedness) -> Option<Gesture> {
    GestureClassifier::new().classify(landmarks, hand)
}

/// Maps a [`LandmarkSet`] and its [`Handedness`] to a [`Gesture`].
///
/// The classifier is stateless: every call only looks at the landmarks it is given, so one
/// instance can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    thresholds: Thresholds,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::DEFAULT)
    }

    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Returns the recognizable gestures in the order their rules are tried.
    pub fn rules(&self) -> impl Iterator<Item = Gesture> {
        RULES.iter().map(|rule| rule.gesture)
    }

    /// Returns the first gesture whose rule matches, or [`None`] if no rule does.
    pub fn classify(&self, landmarks: &LandmarkSet, hand: Handedness) -> Option<Gesture> {
        let gesture = self.matching_rules(landmarks, hand).next();
        log::debug!("{hand} hand classified as {gesture:?}");
        gesture
    }

    /// Returns every gesture whose rule matches, in rule order.
    ///
    /// [`GestureClassifier::classify`] reports only the first of these.
    pub fn matching_rules<'a>(
        &'a self,
        landmarks: &'a LandmarkSet,
        hand: Handedness,
    ) -> impl Iterator<Item = Gesture> + 'a {
        let probe = Probe::new(landmarks, hand, &self.thresholds);
        RULES
            .iter()
            .filter(move |rule| (rule.matches)(&probe))
            .map(|rule| rule.gesture)
    }

    /// Classifies a list of landmark positions of unchecked length.
    ///
    /// Lists with fewer than [`LANDMARK_COUNT`] entries are rejected; entries past the first
    /// [`LANDMARK_COUNT`] are ignored.
    pub fn try_classify_points(
        &self,
        points: &[[f32; 3]],
        hand: Handedness,
    ) -> Result<Option<Gesture>, ClassifyError> {
        let landmarks = points
            .get(..LANDMARK_COUNT)
            .and_then(LandmarkSet::from_slice)
            .ok_or(ClassifyError::IncompleteLandmarks {
                found: points.len(),
            })?;
        Ok(self.classify(&landmarks, hand))
    }

    /// Like [`GestureClassifier::try_classify_points`], but treats incomplete input as "no match".
    pub fn classify_points(&self, points: &[[f32; 3]], hand: Handedness) -> Option<Gesture> {
        self.try_classify_points(points, hand)
            .unwrap_or_else(|e| {
                log::debug!("not classifying hand: {e}");
                None
            })
    }
}
