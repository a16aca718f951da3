//! Per-frame hand detection and finger classification.
//!
//! [`HandDetector`] drives a [`HandLandmarker`] one frame at a time. For every frame it returns a
//! [`FrameResult`] holding that frame's hands; nothing is carried over from previous frames, so a
//! hand that leaves the image is reported as absent immediately.

use std::{env, str::FromStr};

use anyhow::Context;

use crate::detection::{Detection, Handedness, HandLandmarker};
use crate::error::InvalidInput;
use crate::hand::{fingers_up, FingerState, HandObservation};
use crate::image::{Image, Resolution};
use crate::timer::Timer;

/// Configuration of a [`HandDetector`].
///
/// The confidence thresholds and `static_image_mode` are forwarded to the landmark model via
/// [`HandLandmarker::configure`]. `max_hands` and `min_detection_confidence` are additionally
/// enforced by the [`HandDetector`] itself, so they apply even if the model ignores them.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorOptions {
    static_image_mode: bool,
    max_hands: usize,
    min_detection_confidence: f32,
    min_tracking_confidence: f32,
    draw: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            static_image_mode: false,
            max_hands: 2,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
            draw: true,
        }
    }
}

impl DetectorOptions {
    /// Creates options from the defaults, overridden by `FINGERTIPS_*` environment variables.
    ///
    /// Variables that fail to parse are logged and ignored. See the crate documentation for the
    /// list of variables.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(max_hands) = env_var("FINGERTIPS_MAX_HANDS") {
            opts.max_hands = max_hands;
        }
        if let Some(conf) = env_var("FINGERTIPS_MIN_DETECTION_CONFIDENCE") {
            opts.min_detection_confidence = conf;
        }
        if let Some(conf) = env_var("FINGERTIPS_MIN_TRACKING_CONFIDENCE") {
            opts.min_tracking_confidence = conf;
        }
        if let Some(Flag(mode)) = env_var("FINGERTIPS_STATIC_IMAGE_MODE") {
            opts.static_image_mode = mode;
        }
        opts
    }

    /// Sets whether every frame is treated as an unrelated still image.
    ///
    /// If `false` (the default), models may track hands across frames instead of running full
    /// detection on every frame.
    #[inline]
    pub fn static_image_mode(self, static_image_mode: bool) -> Self {
        Self {
            static_image_mode,
            ..self
        }
    }

    /// Sets the maximum number of hands reported per frame. Must be at least 1.
    #[inline]
    pub fn max_hands(self, max_hands: usize) -> Self {
        Self { max_hands, ..self }
    }

    /// Sets the minimum score a detected hand needs to be reported, in range 0.0 to 1.0.
    #[inline]
    pub fn min_detection_confidence(self, min_detection_confidence: f32) -> Self {
        Self {
            min_detection_confidence,
            ..self
        }
    }

    /// Sets the minimum confidence for the model to keep tracking a hand, in range 0.0 to 1.0.
    #[inline]
    pub fn min_tracking_confidence(self, min_tracking_confidence: f32) -> Self {
        Self {
            min_tracking_confidence,
            ..self
        }
    }

    /// Sets whether [`HandDetector::process`] draws the detected hands onto the frame.
    #[inline]
    pub fn draw(self, draw: bool) -> Self {
        Self { draw, ..self }
    }

    /// Returns whether every frame is treated as an unrelated still image.
    #[inline]
    pub fn is_static_image_mode(&self) -> bool {
        self.static_image_mode
    }

    /// Returns the maximum number of hands kept per frame.
    #[inline]
    pub fn hand_limit(&self) -> usize {
        self.max_hands
    }

    /// Returns the minimum score a detected hand needs to be kept.
    #[inline]
    pub fn detection_threshold(&self) -> f32 {
        self.min_detection_confidence
    }

    /// Returns the minimum confidence for the model to keep tracking a hand across frames.
    #[inline]
    pub fn tracking_threshold(&self) -> f32 {
        self.min_tracking_confidence
    }

    /// Returns whether [`HandDetector::process`] draws onto the frame.
    #[inline]
    pub fn draws_hands(&self) -> bool {
        self.draw
    }

    /// Checks that all values are in range.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.max_hands == 0 {
            return Err(InvalidInput::Option {
                name: "max_hands",
                value: self.max_hands.to_string(),
            });
        }
        for (name, value) in [
            ("min_detection_confidence", self.min_detection_confidence),
            ("min_tracking_confidence", self.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(InvalidInput::Option {
                    name,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A boolean environment flag, accepting `1`/`0` as well as `true`/`false`.
struct Flag(bool);

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(Flag(true)),
            "0" | "false" | "no" => Ok(Flag(false)),
            other => Err(format!("expected a boolean, got '{other}'")),
        }
    }
}

fn env_var<T: FromStr>(name: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    let value = env::var(name).ok()?;
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("ignoring invalid value for {name} ('{value}'): {e}");
            None
        }
    }
}

/// Detects hands in frames and classifies their fingers.
pub struct HandDetector<L: HandLandmarker> {
    landmarker: L,
    options: DetectorOptions,
    t_infer: Timer,
    t_classify: Timer,
}

impl<L: HandLandmarker> HandDetector<L> {
    /// Creates a detector that uses `landmarker` to find hands.
    ///
    /// The options are validated and then passed to [`HandLandmarker::configure`].
    pub fn new(mut landmarker: L, options: DetectorOptions) -> Result<Self, InvalidInput> {
        options.validate()?;
        landmarker.configure(&options);
        log::debug!("hand detector configured with {:?}", options);

        Ok(Self {
            landmarker,
            options,
            t_infer: Timer::new("infer"),
            t_classify: Timer::new("classify"),
        })
    }

    #[inline]
    pub fn landmarker(&self) -> &L {
        &self.landmarker
    }

    #[inline]
    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    /// Returns profiling timers for this detector.
    pub fn timers(&self) -> impl Iterator<Item = &Timer> + '_ {
        [&self.t_infer, &self.t_classify].into_iter()
    }

    /// Detects and classifies the hands in `image`, without drawing anything.
    pub fn detect(&mut self, image: &Image) -> anyhow::Result<FrameResult> {
        let resolution = image.resolution();
        let mut detection = self
            .t_infer
            .time(|| self.landmarker.detect(image))
            .with_context(|| format!("hand landmark inference failed on {resolution} frame"))?;

        let reported = detection.len();
        detection.retain_confident(self.options.min_detection_confidence);
        detection.truncate(self.options.max_hands);
        if detection.len() != reported {
            log::trace!("{reported} hands reported, {} kept", detection.len());
        }

        let hands: Vec<TrackedHand> = self.t_classify.time(|| {
            detection
                .hands()
                .iter()
                .map(|hand| {
                    let observation = HandObservation::from_detected(hand, resolution);
                    TrackedHand {
                        fingers: fingers_up(&observation),
                        observation,
                        handedness: hand.handedness(),
                    }
                })
                .collect()
        });

        Ok(FrameResult {
            detection,
            resolution,
            hands,
        })
    }

    /// Detects and classifies the hands in `image`, drawing them onto it if enabled in the
    /// [`DetectorOptions`].
    pub fn process(&mut self, image: &mut Image) -> anyhow::Result<FrameResult> {
        let result = self.detect(image)?;
        if self.options.draw {
            for hand in result.hands() {
                hand.observation.draw(image);
            }
        }
        Ok(result)
    }
}

/// The hands found in a single frame.
#[derive(Debug, Clone)]
pub struct FrameResult {
    detection: Detection,
    resolution: Resolution,
    hands: Vec<TrackedHand>,
}

impl FrameResult {
    /// Returns the (filtered) raw detection result of the landmark model.
    #[inline]
    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    /// Returns the resolution of the frame the hands were detected in.
    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[inline]
    pub fn hands(&self) -> &[TrackedHand] {
        &self.hands
    }

    /// Returns the hand at `index`, or [`None`] if fewer hands are in view.
    #[inline]
    pub fn hand(&self, index: usize) -> Option<&TrackedHand> {
        self.hands.get(index)
    }

    /// Returns the finger state of the hand at `index`.
    ///
    /// Returns [`InvalidInput::NoHand`] if fewer hands are in view; use [`FrameResult::hand`] to
    /// check for presence first.
    pub fn fingers_up(&self, index: usize) -> Result<FingerState, InvalidInput> {
        self.hand(index)
            .map(|hand| hand.fingers)
            .ok_or(InvalidInput::NoHand)
    }
}

/// A hand detected in a frame, along with its classified [`FingerState`].
#[derive(Debug, Clone)]
pub struct TrackedHand {
    observation: HandObservation,
    fingers: FingerState,
    handedness: Option<Handedness>,
}

impl TrackedHand {
    #[inline]
    pub fn observation(&self) -> &HandObservation {
        &self.observation
    }

    #[inline]
    pub fn fingers(&self) -> FingerState {
        self.fingers
    }

    #[inline]
    pub fn handedness(&self) -> Option<Handedness> {
        self.handedness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = DetectorOptions::default();
        assert!(!opts.is_static_image_mode());
        assert_eq!(opts.hand_limit(), 2);
        assert_eq!(opts.detection_threshold(), 0.5);
        assert_eq!(opts.tracking_threshold(), 0.5);
        assert!(opts.draws_hands());
        assert_eq!(opts.validate(), Ok(()));
    }

    #[test]
    fn validate() {
        let err = DetectorOptions::default().max_hands(0).validate().unwrap_err();
        assert!(matches!(err, InvalidInput::Option { name: "max_hands", .. }));

        let err = DetectorOptions::default()
            .min_tracking_confidence(1.5)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            InvalidInput::Option {
                name: "min_tracking_confidence",
                ..
            }
        ));

        let err = DetectorOptions::default()
            .min_detection_confidence(f32::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            InvalidInput::Option {
                name: "min_detection_confidence",
                ..
            }
        ));
    }

    #[test]
    fn flag() {
        assert!(matches!("1".parse::<Flag>(), Ok(Flag(true))));
        assert!(matches!("TRUE".parse::<Flag>(), Ok(Flag(true))));
        assert!(matches!(" no ".parse::<Flag>(), Ok(Flag(false))));
        assert!("maybe".parse::<Flag>().is_err());
    }

    #[test]
    fn from_env() {
        // Variable names are unique to this test, so it can't race with other tests.
        env::set_var("FINGERTIPS_MAX_HANDS", "1");
        env::set_var("FINGERTIPS_MIN_DETECTION_CONFIDENCE", "not a number");
        env::set_var("FINGERTIPS_STATIC_IMAGE_MODE", "true");
        let opts = DetectorOptions::from_env();
        env::remove_var("FINGERTIPS_MAX_HANDS");
        env::remove_var("FINGERTIPS_MIN_DETECTION_CONFIDENCE");
        env::remove_var("FINGERTIPS_STATIC_IMAGE_MODE");

        assert_eq!(opts.hand_limit(), 1);
        assert_eq!(opts.detection_threshold(), 0.5);
        assert!(opts.is_static_image_mode());
    }
}
