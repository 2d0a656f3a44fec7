//! Hand landmarks.

use std::{fmt, ops::Index, str::FromStr};

use crate::resolution::Resolution;

/// Number of landmarks the hand landmark network estimates per hand.
pub const LANDMARK_COUNT: usize = 21;

type Position = [f32; 3];

/// A landmark in 3D space.
///
/// X and Y are normalized to the frame's width and height (Y pointing down), Z is a relative depth.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Default)]
pub struct Landmark {
    pos: Position,
}

impl Landmark {
    pub fn new(position: Position) -> Self {
        Self { pos: position }
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos[0]
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos[1]
    }

    #[inline]
    pub fn z(&self) -> f32 {
        self.pos[2]
    }
}

/// The 21 landmarks of a single hand, indexed by [`LandmarkIdx`].
///
/// A [`LandmarkSet`] always holds exactly [`LANDMARK_COUNT`] landmarks; incomplete network output
/// never produces one.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    pub fn from_positions(positions: [Position; LANDMARK_COUNT]) -> Self {
        Self {
            landmarks: positions.map(Landmark::new),
        }
    }

    /// Creates a [`LandmarkSet`] from a slice of exactly [`LANDMARK_COUNT`] positions.
    ///
    /// Returns [`None`] if `positions` has any other length.
    pub fn from_slice(positions: &[Position]) -> Option<Self> {
        let positions: &[Position; LANDMARK_COUNT] = positions.try_into().ok()?;
        Some(Self::from_positions(*positions))
    }

    #[inline]
    pub fn get(&self, index: LandmarkIdx) -> Landmark {
        self.landmarks[index as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = Landmark> + '_ {
        self.landmarks.iter().copied()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter().map(|lm| lm.position())
    }

    /// Projects every landmark onto a frame of the given [`Resolution`].
    ///
    /// This is what an overlay renderer needs to draw the hand; the [`LandmarkSet`] itself is left
    /// untouched.
    pub fn pixel_positions(&self, res: Resolution) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.iter().map(move |lm| res.to_pixel(lm.x(), lm.y()))
    }
}

impl Index<LandmarkIdx> for LandmarkSet {
    type Output = Landmark;

    #[inline]
    fn index(&self, index: LandmarkIdx) -> &Landmark {
        &self.landmarks[index as usize]
    }
}

/// Names for the hand landmarks.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand. This is the *base* of a finger.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Pairs of landmarks connected by a bone, for drawing the hand skeleton.
pub const CONNECTIVITY: &[(LandmarkIdx, LandmarkIdx)] = {
    use LandmarkIdx::*;
    &[
        // Thumb:
        (Wrist, ThumbCmc),
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        // Index:
        (Wrist, IndexFingerMcp),
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        // Middle:
        (Wrist, MiddleFingerMcp),
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        // Ring:
        (Wrist, RingFingerMcp),
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        // Pinky:
        (Wrist, PinkyMcp),
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
        // Knuckles:
        (IndexFingerMcp, MiddleFingerMcp),
        (MiddleFingerMcp, RingFingerMcp),
        (RingFingerMcp, PinkyMcp),
    ]
};

/// Which hand a [`LandmarkSet`] belongs to.
///
/// Thumb geometry is mirrored between the two hands. This is supplied by the caller; nothing in
/// this crate estimates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parses a handedness label, falling back to [`Handedness::Right`] for unknown labels.
    ///
    /// A warning is logged whenever the fallback is taken.
    pub fn from_label_lenient(label: &str) -> Self {
        label.parse().unwrap_or_else(|e| {
            log::warn!("{e}, using right-hand geometry");
            Handedness::Right
        })
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        })
    }
}

/// Error returned when parsing an unknown [`Handedness`] label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown handedness `{0}` (expected `left` or `right`)")]
pub struct ParseHandednessError(String);

/// Parses `left` or `right`, ignoring case.
impl FromStr for Handedness {
    type Err = ParseHandednessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("left") {
            Ok(Handedness::Left)
        } else if s.eq_ignore_ascii_case("right") {
            Ok(Handedness::Right)
        } else {
            Err(ParseHandednessError(s.to_string()))
        }
    }
}
