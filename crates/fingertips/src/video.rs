//! Frame sources.
//!
//! Camera access is not part of this crate; camera backends implement [`FrameSource`]. Frames
//! must be handed out as RGB(A) [`Image`]s, so sources that capture BGR data should convert it
//! with [`Image::from_bgr8`].

use crate::image::Image;
use crate::timer::Timer;

/// A source of video frames, such as a webcam.
pub trait FrameSource {
    /// Reads the next frame, blocking until it is available.
    fn read(&mut self) -> anyhow::Result<Image>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn read(&mut self) -> anyhow::Result<Image> {
        (**self).read()
    }
}

/// A [`FrameSource`] that yields the same image over and over.
///
/// Useful for testing a frame loop without a camera attached.
pub struct StillFrames {
    image: Image,
    t_read: Timer,
}

impl StillFrames {
    pub fn new(image: Image) -> Self {
        log::debug!("serving still frames of {:?}", image);
        Self {
            image,
            t_read: Timer::new("read"),
        }
    }

    /// Returns profiling timers for this source.
    pub fn timers(&self) -> impl IntoIterator<Item = &Timer> + '_ {
        [&self.t_read]
    }
}

impl FrameSource for StillFrames {
    fn read(&mut self) -> anyhow::Result<Image> {
        Ok(self.t_read.time(|| self.image.clone()))
    }
}
