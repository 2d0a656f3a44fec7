//! Hand sign recognition from 21-point hand landmark estimates.
//!
//! The crate sits behind a hand landmark network (such as MediaPipe's `hand_landmark_lite`): the
//! network's raw output tensors are validated and turned into a [`LandmarkSet`] by the
//! [`LandmarkExtractor`], and a [`GestureClassifier`] maps the landmarks to a letter of the manual
//! alphabet.
//!
//! # Coordinates
//!
//! Landmark coordinates are used exactly as the network outputs them: X and Y are normalized to
//! the input frame's width and height, so they nominally lie in `[0.0, 1.0]`, and Y points *down*.
//! Z is a relative depth with no fixed range. Nothing in this crate clamps or rescales them.
//!
//! # Environment Variables
//!
//! * `RUST_LOG`: overrides the log filter set up by [`init_logger!`].
//! * `HANDSIGN_THRESHOLD`: default detection confidence threshold of the `handsign` binary.
//!
//! [`LandmarkSet`]: landmark::LandmarkSet
//! [`LandmarkExtractor`]: extract::LandmarkExtractor
//! [`GestureClassifier`]: gesture::GestureClassifier

use log::LevelFilter;

pub mod extract;
pub mod gesture;
pub mod landmark;
pub mod nn;
pub mod recognizer;
pub mod resolution;


/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and `handsign` will log at *trace*
/// level. Otherwise, they will log at *debug* level. `RUST_LOG` is applied on top.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
