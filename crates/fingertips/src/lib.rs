//! Finger extension classification on top of a hand landmark model.
//!
//! This crate does not perform any inference itself. A third-party hand landmark model is plugged
//! in via the [`HandLandmarker`] trait, and frames are supplied by a [`FrameSource`]. The crate
//! then converts the model's normalized landmarks into pixel space and derives which fingers are
//! extended.
//!
//! # Coordinates
//!
//! Landmark models report coordinates normalized to `[0, 1]`, relative to the input image's width
//! and height. X points to the right, Y points *down*. [`extract_landmarks`] converts them to
//! pixel coordinates of the frame the detection ran on.
//!
//! # Environment Variables
//!
//! [`DetectorOptions::from_env`] overrides its defaults from these variables:
//!
//! * `FINGERTIPS_MAX_HANDS`: maximum number of hands reported per frame (at least 1).
//! * `FINGERTIPS_MIN_DETECTION_CONFIDENCE`: hands with a lower score are discarded.
//! * `FINGERTIPS_MIN_TRACKING_CONFIDENCE`: forwarded to the landmark model.
//! * `FINGERTIPS_STATIC_IMAGE_MODE`: `1`/`true` to treat every frame as an unrelated image.
//!
//! [`HandLandmarker`]: detection::HandLandmarker
//! [`FrameSource`]: video::FrameSource
//! [`extract_landmarks`]: hand::extract_landmarks
//! [`DetectorOptions::from_env`]: detector::DetectorOptions::from_env

use log::LevelFilter;

pub mod detection;
pub mod detector;
pub mod error;
pub mod hand;
pub mod image;
pub mod landmark;
pub mod timer;
pub mod video;

pub use error::InvalidInput;

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
/// If `cfg!(debug_assertions)` is enabled, the calling crate and `fingertips` will log at *trace*
/// level. Otherwise, they will log at *debug* level. `RUST_LOG` can override this.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
