//! Hand landmarks and finger classification.
//!
//! [`extract_landmarks`] maps one hand of a [`Detection`][crate::detection::Detection] into the
//! pixel space of its frame, yielding a [`HandObservation`]. [`fingers_up`] then classifies which
//! fingers of that hand are extended.

mod fingers;
mod landmark;

pub use fingers::{fingers_up, Axis, Digit, DigitLandmarks, FingerState, DIGIT_LANDMARKS};
pub use landmark::{extract_landmarks, HandObservation, LandmarkIdx, NUM_LANDMARKS};
