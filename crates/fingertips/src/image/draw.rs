//! Drawing primitives for visualizing landmarks.
//!
//! Every function returns a guard that draws when it is dropped, so properties like color can be
//! customized by chaining calls on the guard. Anything outside of the image is clipped.

use std::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::{self, Text, TextStyleBuilder},
};

use super::{Color, Image};

/// Guard returned by [`marker`]; draws the marker when dropped and allows customization.
pub struct DrawMarker<'a> {
    image: &'a mut Image,
    x: i32,
    y: i32,
    color: Color,
    size: u32,
}

impl DrawMarker<'_> {
    /// Sets the marker's color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the diameter of the marker.
    ///
    /// The default size is 5. The size must be *uneven* and *non-zero*. A size of 1 will result in
    /// a single pixel getting drawn.
    pub fn size(&mut self, size: u32) -> &mut Self {
        assert!(size != 0, "marker size must be greater than zero");
        assert!(size % 2 == 1, "marker size must be an uneven number");
        self.size = size;
        self
    }
}

impl Drop for DrawMarker<'_> {
    fn drop(&mut self) {
        if !near_image(self.image, (self.x, self.y)) {
            log::trace!("skipping marker at ({}, {})", self.x, self.y);
            return;
        }

        match Circle::with_center(Point::new(self.x, self.y), self.size)
            .into_styled(PrimitiveStyle::with_fill(self.color))
            .draw(&mut Target(&mut *self.image))
        {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Guard returned by [`line`]; draws the line when dropped and allows customization.
pub struct DrawLine<'a> {
    image: &'a mut Image,
    start: (i32, i32),
    end: (i32, i32),
    color: Color,
    stroke_width: u32,
}

impl DrawLine<'_> {
    /// Sets the line's color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Sets the line's stroke width.
    ///
    /// By default, a stroke width of 1 is used.
    pub fn stroke_width(&mut self, width: u32) -> &mut Self {
        self.stroke_width = width;
        self
    }
}

impl Drop for DrawLine<'_> {
    fn drop(&mut self) {
        if !near_image(self.image, self.start) || !near_image(self.image, self.end) {
            log::trace!("skipping line from {:?} to {:?}", self.start, self.end);
            return;
        }

        match Line::new(
            Point::new(self.start.0, self.start.1),
            Point::new(self.end.0, self.end.1),
        )
        .into_styled(PrimitiveStyle::with_stroke(self.color, self.stroke_width))
        .draw(&mut Target(&mut *self.image))
        {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Guard returned by [`text`]; draws the text when dropped and allows customization.
pub struct DrawText<'a> {
    image: &'a mut Image,
    x: i32,
    y: i32,
    text: &'a str,
    color: Color,
    alignment: text::Alignment,
    baseline: text::Baseline,
}

impl DrawText<'_> {
    /// Sets the text color.
    pub fn color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Aligns the left side of the text with the `x` coordinate.
    pub fn align_left(&mut self) -> &mut Self {
        self.alignment = text::Alignment::Left;
        self
    }
}

impl Drop for DrawText<'_> {
    fn drop(&mut self) {
        let character_style = MonoTextStyle::new(&FONT_10X20, self.color);
        let text_style = TextStyleBuilder::new()
            .alignment(self.alignment)
            .baseline(self.baseline)
            .build();
        match Text::with_text_style(
            self.text,
            Point::new(self.x, self.y),
            character_style,
            text_style,
        )
        .draw(&mut Target(&mut *self.image))
        {
            Ok(_) => {}
            Err(infallible) => match infallible {},
        }
    }
}

/// Draws a filled circular marker centered on `(x, y)`.
///
/// This is used to visualize individual landmarks.
pub fn marker(image: &mut Image, x: i32, y: i32) -> DrawMarker<'_> {
    DrawMarker {
        image,
        x,
        y,
        color: Color::MAGENTA,
        size: 5,
    }
}

/// Draws a line from `start` to `end`.
pub fn line(image: &mut Image, start: (i32, i32), end: (i32, i32)) -> DrawLine<'_> {
    DrawLine {
        image,
        start,
        end,
        color: Color::GREEN,
        stroke_width: 1,
    }
}

/// Draws a text string onto an image.
///
/// By default, the text is drawn centered horizontally and vertically around `x` and `y`.
pub fn text<'a>(image: &'a mut Image, x: i32, y: i32, text: &'a str) -> DrawText<'a> {
    DrawText {
        image,
        x,
        y,
        text,
        color: Color::RED,
        alignment: text::Alignment::Center,
        baseline: text::Baseline::Middle,
    }
}

/// Draws a frame rate readout in the top left corner of an image.
pub fn fps(image: &mut Image, fps: f32) {
    let label = format!("FPS: {}", fps as u32);
    text(image, 10, 70, &label)
        .align_left()
        .color(Color::BLUE);
}

/// How far outside of the image a marker or line endpoint may lie before it is skipped.
///
/// `embedded-graphics` computes extents with plain `i32` arithmetic, which overflows for
/// coordinates near the ends of the `i32` range.
const MAX_OFFSCREEN: i64 = 1 << 14;

fn near_image(image: &Image, (x, y): (i32, i32)) -> bool {
    let xs = -MAX_OFFSCREEN..=i64::from(image.width()) + MAX_OFFSCREEN;
    let ys = -MAX_OFFSCREEN..=i64::from(image.height()) + MAX_OFFSCREEN;
    xs.contains(&i64::from(x)) && ys.contains(&i64::from(y))
}

struct Target<'a>(&'a mut Image);

impl Dimensions for Target<'_> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle {
            top_left: Point { x: 0, y: 0 },
            size: Size {
                width: self.0.width(),
                height: self.0.height(),
            },
        }
    }
}

impl DrawTarget for Target<'_> {
    type Color = Color;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && (point.x as u32) < self.0.width()
                && point.y >= 0
                && (point.y as u32) < self.0.height()
            {
                self.0.set(point.x as u32, point.y as u32, color);
            }
        }

        Ok(())
    }
}
