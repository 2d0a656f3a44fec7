//! Geometric predicates over a [`LandmarkSet`].
//!
//! All comparisons work on the raw normalized coordinates, where Y grows *downward*: a finger tip
//! with a larger Y than its knuckle sits lower in the image, folded toward the palm.

use crate::landmark::{Handedness, Landmark, LandmarkIdx, LandmarkSet};

/// Tunable distance thresholds used by the gesture rules.
///
/// All values are in normalized image coordinates (or relative depth units for
/// [`Thresholds::depth_gradient`]). The defaults were tuned by hand on webcam footage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Maximum horizontal drift of a curled finger tip away from its knuckle.
    pub curl_lateral: f32,
    /// Maximum vertical distance of a tucked thumb tip from the index knuckle.
    pub tuck_vertical: f32,
    /// Maximum horizontal distance of a tucked thumb tip from the index knuckle.
    pub tuck_lateral: f32,
    /// Maximum vertical spread between neighboring finger tips of a clustered hand.
    pub cluster_vertical: f32,
    /// Maximum horizontal spread between the index and middle finger tips of a clustered hand.
    pub cluster_index_middle: f32,
    /// Maximum horizontal spread between the middle and ring finger tips of a clustered hand.
    pub cluster_middle_ring: f32,
    /// Minimum depth difference between neighboring PIP joints of a curved hand.
    pub depth_gradient: f32,
    /// Maximum horizontal distance of a hooked thumb tip from the middle finger tip.
    pub hook_lateral: f32,
    /// Minimum vertical gap between a hooked thumb tip and the index finger tip.
    pub hook_vertical_gap: f32,
}

impl Thresholds {
    pub const DEFAULT: Self = Self {
        curl_lateral: 0.05,
        tuck_vertical: 0.06,
        tuck_lateral: 0.04,
        cluster_vertical: 0.03,
        cluster_index_middle: 0.05,
        cluster_middle_ring: 0.3,
        depth_gradient: 0.02,
        hook_lateral: 0.05,
        hook_vertical_gap: 0.11,
    };
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// The four non-thumb fingers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    /// The knuckle at the base of the finger.
    pub fn mcp(self) -> LandmarkIdx {
        match self {
            Finger::Index => LandmarkIdx::IndexFingerMcp,
            Finger::Middle => LandmarkIdx::MiddleFingerMcp,
            Finger::Ring => LandmarkIdx::RingFingerMcp,
            Finger::Pinky => LandmarkIdx::PinkyMcp,
        }
    }

    pub fn pip(self) -> LandmarkIdx {
        match self {
            Finger::Index => LandmarkIdx::IndexFingerPip,
            Finger::Middle => LandmarkIdx::MiddleFingerPip,
            Finger::Ring => LandmarkIdx::RingFingerPip,
            Finger::Pinky => LandmarkIdx::PinkyPip,
        }
    }

    pub fn dip(self) -> LandmarkIdx {
        match self {
            Finger::Index => LandmarkIdx::IndexFingerDip,
            Finger::Middle => LandmarkIdx::MiddleFingerDip,
            Finger::Ring => LandmarkIdx::RingFingerDip,
            Finger::Pinky => LandmarkIdx::PinkyDip,
        }
    }

    pub fn tip(self) -> LandmarkIdx {
        match self {
            Finger::Index => LandmarkIdx::IndexFingerTip,
            Finger::Middle => LandmarkIdx::MiddleFingerTip,
            Finger::Ring => LandmarkIdx::RingFingerTip,
            Finger::Pinky => LandmarkIdx::PinkyTip,
        }
    }
}

/// A finger is curled if its tip has dropped below its knuckle without drifting sideways.
pub fn curled(tip: Landmark, base: Landmark, lateral_tolerance: f32) -> bool {
    tip.y() > base.y() && (tip.x() - base.x()).abs() < lateral_tolerance
}

/// A finger is extended if its tip sits above its own DIP joint.
pub fn extended(tip: Landmark, mid: Landmark) -> bool {
    tip.y() < mid.y()
}

/// Predicates evaluated against one hand.
///
/// The handedness is resolved once, when the probe is created.
pub(crate) struct Probe<'a> {
    landmarks: &'a LandmarkSet,
    thresholds: &'a Thresholds,
    thumb_outside: fn(thumb: f32, knuckle: f32) -> bool,
}

impl<'a> Probe<'a> {
    pub(crate) fn new(
        landmarks: &'a LandmarkSet,
        hand: Handedness,
        thresholds: &'a Thresholds,
    ) -> Self {
        // The thumb sits on the image-left of a right hand's index knuckle, and mirrored for a left
        // hand.
        let thumb_outside: fn(f32, f32) -> bool = match hand {
            Handedness::Right => |thumb, knuckle| thumb < knuckle,
            Handedness::Left => |thumb, knuckle| thumb > knuckle,
        };
        Self {
            landmarks,
            thresholds,
            thumb_outside,
        }
    }

    fn lm(&self, index: LandmarkIdx) -> Landmark {
        self.landmarks.get(index)
    }

    pub(crate) fn curled(&self, finger: Finger) -> bool {
        curled(
            self.lm(finger.tip()),
            self.lm(finger.mcp()),
            self.thresholds.curl_lateral,
        )
    }

    pub(crate) fn extended(&self, finger: Finger) -> bool {
        extended(self.lm(finger.tip()), self.lm(finger.dip()))
    }

    pub(crate) fn all_curled(&self) -> bool {
        Finger::ALL.into_iter().all(|finger| self.curled(finger))
    }

    pub(crate) fn all_extended(&self) -> bool {
        Finger::ALL.into_iter().all(|finger| self.extended(finger))
    }

    /// Thumb tip is above the index knuckle.
    pub(crate) fn thumb_raised(&self) -> bool {
        self.lm(LandmarkIdx::ThumbTip).y() < self.lm(LandmarkIdx::IndexFingerMcp).y()
    }

    /// Thumb tip is on the outer side of the index knuckle.
    pub(crate) fn thumb_outside(&self) -> bool {
        (self.thumb_outside)(
            self.lm(LandmarkIdx::ThumbTip).x(),
            self.lm(LandmarkIdx::IndexFingerMcp).x(),
        )
    }

    /// Thumb tip rests against the index knuckle.
    pub(crate) fn thumb_tucked(&self) -> bool {
        let thumb = self.lm(LandmarkIdx::ThumbTip);
        let knuckle = self.lm(LandmarkIdx::IndexFingerMcp);
        (thumb.y() - knuckle.y()).abs() < self.thresholds.tuck_vertical
            && (thumb.x() - knuckle.x()).abs() < self.thresholds.tuck_lateral
    }

    /// Index, middle and ring finger tips are bunched together.
    pub(crate) fn tips_clustered(&self) -> bool {
        let t = self.thresholds;
        let index = self.lm(LandmarkIdx::IndexFingerTip);
        let middle = self.lm(LandmarkIdx::MiddleFingerTip);
        let ring = self.lm(LandmarkIdx::RingFingerTip);
        (index.y() - middle.y()).abs() < t.cluster_vertical
            && (middle.y() - ring.y()).abs() < t.cluster_vertical
            && (index.x() - middle.x()).abs() < t.cluster_index_middle
            && (middle.x() - ring.x()).abs() < t.cluster_middle_ring
    }

    /// The index, middle and ring PIP joints step away from the camera one after another.
    pub(crate) fn pip_depth_gradient(&self) -> bool {
        let min = self.thresholds.depth_gradient;
        let index = self.lm(LandmarkIdx::IndexFingerPip);
        let middle = self.lm(LandmarkIdx::MiddleFingerPip);
        let ring = self.lm(LandmarkIdx::RingFingerPip);
        (index.z() - middle.z()).abs() > min && (middle.z() - ring.z()).abs() > min
    }

    /// Thumb tip sits under the middle finger tip, well below the index tip.
    pub(crate) fn thumb_hooked(&self) -> bool {
        let t = self.thresholds;
        let thumb = self.lm(LandmarkIdx::ThumbTip);
        let index = self.lm(LandmarkIdx::IndexFingerTip);
        let middle = self.lm(LandmarkIdx::MiddleFingerTip);
        (thumb.x() - middle.x()).abs() < t.hook_lateral
            && (thumb.y() - index.y()).abs() > t.hook_vertical_gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test;

    fn lm(x: f32, y: f32) -> Landmark {
        Landmark::new([x, y, 0.0])
    }

    #[test]
    fn curl() {
        assert!(curled(lm(0.51, 0.6), lm(0.5, 0.5), 0.05));
        // tip above the knuckle
        assert!(!curled(lm(0.5, 0.4), lm(0.5, 0.5), 0.05));
        // tip drifted sideways
        assert!(!curled(lm(0.6, 0.6), lm(0.5, 0.5), 0.05));
        assert!(!curled(lm(0.4, 0.6), lm(0.5, 0.5), 0.05));
        // level with the knuckle is not curled
        assert!(!curled(lm(0.5, 0.5), lm(0.5, 0.5), 0.05));
    }

    #[test]
    fn extension() {
        assert!(extended(lm(0.5, 0.2), lm(0.5, 0.3)));
        assert!(!extended(lm(0.5, 0.3), lm(0.5, 0.3)));
        assert!(!extended(lm(0.5, 0.4), lm(0.5, 0.3)));
    }

    #[test]
    fn finger_joints_are_consecutive() {
        for finger in Finger::ALL {
            let mcp = finger.mcp() as usize;
            assert_eq!(finger.pip() as usize, mcp + 1);
            assert_eq!(finger.dip() as usize, mcp + 2);
            assert_eq!(finger.tip() as usize, mcp + 3);
        }
    }

    #[test]
    fn thumb_side_mirrors_with_handedness() {
        let fist = test::fist();
        let thresholds = Thresholds::DEFAULT;
        assert!(Probe::new(&fist, Handedness::Right, &thresholds).thumb_outside());
        assert!(!Probe::new(&fist, Handedness::Left, &thresholds).thumb_outside());

        let mirrored = test::mirror(&fist);
        assert!(Probe::new(&mirrored, Handedness::Left, &thresholds).thumb_outside());
        assert!(!Probe::new(&mirrored, Handedness::Right, &thresholds).thumb_outside());
    }

    #[test]
    fn fist_probes() {
        let fist = test::fist();
        let thresholds = Thresholds::DEFAULT;
        let probe = Probe::new(&fist, Handedness::Right, &thresholds);
        assert!(probe.all_curled());
        assert!(!probe.all_extended());
        assert!(probe.thumb_raised());
        assert!(!probe.thumb_tucked());
    }

    #[test]
    fn palm_probes() {
        let palm = test::open_palm();
        let thresholds = Thresholds::DEFAULT;
        let probe = Probe::new(&palm, Handedness::Right, &thresholds);
        assert!(probe.all_extended());
        assert!(!probe.all_curled());
        assert!(probe.thumb_tucked());
        assert!(!probe.thumb_raised());
    }

    #[test]
    fn c_shape_probes() {
        let c = test::c_shape();
        let thresholds = Thresholds::DEFAULT;
        let probe = Probe::new(&c, Handedness::Right, &thresholds);
        assert!(probe.tips_clustered());
        assert!(probe.pip_depth_gradient());
        assert!(probe.thumb_hooked());
    }

    #[test]
    fn thresholds_are_configurable() {
        let palm = test::open_palm();
        let strict = Thresholds {
            tuck_lateral: 0.001,
            ..Thresholds::DEFAULT
        };
        assert!(!Probe::new(&palm, Handedness::Right, &strict).thumb_tucked());
        assert_eq!(Thresholds::default(), Thresholds::DEFAULT);
    }
}
