//! Runs the detection loop on still frames with a synthetic landmark model that slowly opens and
//! closes a hand, logging the finger count of every frame.
//!
//! Usage: `finger_count [OUTPUT] [BACKGROUND]`
//!
//! `OUTPUT` is a path ending in `.png` that the annotated last frame is saved to. `BACKGROUND` is
//! a PNG or JPEG image used as the camera frame instead of a black 1080x720 one.

use std::env;

use fingertips::{
    detection::{DetectedHand, Detection, HandLandmarker, Handedness},
    detector::{DetectorOptions, HandDetector},
    hand::{LandmarkIdx, NUM_LANDMARKS},
    image::{draw, Color, Image, Resolution},
    landmark::NormalizedLandmark,
    timer::{FpsCounter, FrameClock},
    video::{FrameSource, StillFrames},
};

const FRAMES: usize = 280;

/// Pretends to see nothing for 40 frames, then an upright right hand that extends one more finger
/// every 40 frames.
struct SyntheticHand {
    frame: usize,
}

impl HandLandmarker for SyntheticHand {
    fn detect(&mut self, _image: &Image) -> anyhow::Result<Detection> {
        let phase = self.frame / 40 % 7;
        self.frame += 1;
        if phase == 0 {
            return Ok(Detection::default());
        }

        use LandmarkIdx::*;
        let mut landmarks = [NormalizedLandmark::new(0.5, 0.75); NUM_LANDMARKS];
        let digits = [
            (ThumbIp, ThumbTip, 0.38),
            (IndexFingerPip, IndexFingerTip, 0.44),
            (MiddleFingerPip, MiddleFingerTip, 0.5),
            (RingFingerPip, RingFingerTip, 0.56),
            (PinkyPip, PinkyTip, 0.62),
        ];
        for (i, (joint, tip, x)) in digits.into_iter().enumerate() {
            let extended = i < phase - 1;
            landmarks[joint.id() as usize] = NormalizedLandmark::new(x, 0.5);
            landmarks[tip.id() as usize] = match (i, extended) {
                (0, true) => NormalizedLandmark::new(x - 0.06, 0.5),
                (0, false) => NormalizedLandmark::new(x + 0.04, 0.55),
                (_, true) => NormalizedLandmark::new(x, 0.3),
                (_, false) => NormalizedLandmark::new(x, 0.6),
            };
        }

        let hand = DetectedHand::new(&landmarks)?
            .with_handedness(Handedness::Right)
            .with_score(0.9);
        Ok(Detection::new(vec![hand]))
    }
}

fn main() -> anyhow::Result<()> {
    fingertips::init_logger!();

    let mut args = env::args().skip(1);
    let output = args.next();
    let background = match args.next() {
        Some(path) => Image::load(path)?,
        None => {
            let res = Resolution::new(1080, 720);
            let mut image = Image::new(res.width(), res.height());
            image.clear(Color::BLACK);
            image
        }
    };
    log::info!("running on {} frames", background.resolution());
    let mut source = StillFrames::new(background);

    let mut detector = HandDetector::new(SyntheticHand { frame: 0 }, DetectorOptions::from_env())?;
    let mut fps = FpsCounter::new("finger count");
    let mut clock = FrameClock::new();

    let mut last = None;
    for _ in 0..FRAMES {
        let mut image = source.read()?;
        let result = detector.process(&mut image)?;

        match result.hand(0) {
            Some(hand) => log::info!(
                "{} fingers up: {}",
                hand.fingers().count(),
                hand.fingers()
            ),
            None => log::info!("no hand in view"),
        }

        if let Some(rate) = clock.tick() {
            draw::fps(&mut image, rate);
        }
        last = Some(image);

        fps.tick_with(detector.timers().chain(source.timers()));
    }

    if let (Some(path), Some(image)) = (output, last) {
        image.save(&path)?;
        log::info!("saved last frame to {path}");
    }

    Ok(())
}
