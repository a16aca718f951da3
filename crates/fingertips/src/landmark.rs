//! Landmark coordinates, as reported by a landmark model and as mapped into pixel space.

use crate::image::Resolution;

/// A landmark as output by a landmark model, in normalized image coordinates.
///
/// X and Y are in range `[0, 1]` relative to the input image's width and height (values slightly
/// outside that range can occur when the model extrapolates past the image border). Y points
/// down. The Z coordinate is optional since not every model reports depth, and it is not used for
/// any classification.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Default)]
pub struct NormalizedLandmark {
    x: f32,
    y: f32,
    z: Option<f32>,
}

impl NormalizedLandmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: None }
    }

    pub fn with_z(self, z: f32) -> Self {
        Self { z: Some(z), ..self }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> Option<f32> {
        self.z
    }

    /// Maps this landmark into the pixel space of an image with the given [`Resolution`].
    ///
    /// Each coordinate is scaled by the image dimension and rounded to the nearest integer (half
    /// away from zero).
    pub fn to_pixel(&self, res: Resolution) -> (i32, i32) {
        (
            (self.x * res.width() as f32).round() as i32,
            (self.y * res.height() as f32).round() as i32,
        )
    }
}

/// A landmark in pixel coordinates of a specific frame.
///
/// The identifier has a fixed meaning defined by the landmark model (see
/// [`hand::LandmarkIdx`][crate::hand::LandmarkIdx] for hands).
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Landmark {
    id: u8,
    x: i32,
    y: i32,
}

impl Landmark {
    #[inline]
    pub fn new(id: u8, x: i32, y: i32) -> Self {
        Self { id, x, y }
    }

    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_pixel_boundaries() {
        let res = Resolution::new(640, 480);
        assert_eq!(NormalizedLandmark::new(0.0, 0.0).to_pixel(res), (0, 0));
        assert_eq!(NormalizedLandmark::new(1.0, 1.0).to_pixel(res), (640, 480));
    }

    #[test]
    fn to_pixel_rounds_to_nearest() {
        let res = Resolution::new(10, 10);
        assert_eq!(NormalizedLandmark::new(0.14, 0.16).to_pixel(res), (1, 2));
        assert_eq!(NormalizedLandmark::new(0.25, 0.75).to_pixel(res), (3, 8));
    }

    #[test]
    fn to_pixel_out_of_frame() {
        let res = Resolution::new(100, 50);
        assert_eq!(NormalizedLandmark::new(-0.1, 1.2).to_pixel(res), (-10, 60));
    }

    #[test]
    fn z_is_optional() {
        let lm = NormalizedLandmark::new(0.5, 0.5);
        assert_eq!(lm.z(), None);
        assert_eq!(lm.with_z(-0.25).z(), Some(-0.25));
    }
}
