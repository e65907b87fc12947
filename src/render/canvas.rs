//! RGBA drawing surface with the primitives the plots are made of
//!
//! The canvas starts fully transparent. Shapes and text are drawn with
//! `imageproc`; text is set in the embedded DejaVu Sans face.

use crate::io::configuration::points_to_pixels;
use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::imageops::{overlay, rotate270};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_antialiased_line_segment_mut, draw_filled_circle_mut, draw_filled_rect_mut,
    draw_hollow_circle_mut, draw_polygon_mut, draw_text_mut, text_size,
};
use imageproc::pixelops::interpolate;
use imageproc::point::Point;
use imageproc::rect::Rect;
use std::sync::LazyLock;

const FONT_DATA: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static FONT: LazyLock<Option<FontRef<'static>>> =
    LazyLock::new(|| FontRef::try_from_slice(FONT_DATA).ok());

/// Fully transparent pixel
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
/// Opaque black
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

// Lines at most this wide are drawn as single anti-aliased strokes
const HAIRLINE_WIDTH: f64 = 1.5;

/// Direction in which text runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    /// Left to right
    Horizontal,
    /// Bottom to top (rotated a quarter turn counter-clockwise)
    Vertical,
}

/// Owned drawing surface
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Transparent canvas of the given pixel size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, TRANSPARENT),
        }
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Read-only access to the pixels
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Set a single pixel; coordinates outside the canvas are ignored
    pub fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if let Some(pixel) = self.image.get_pixel_mut_checked(x, y) {
            *pixel = color;
        }
    }

    /// Fill the rectangle spanning `[x0, x1) x [y0, y1)` in pixel coordinates
    pub fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgba<u8>) {
        let left = x0.min(x1).round();
        let top = y0.min(y1).round();
        let width = (x0.max(x1).round() - left) as i64;
        let height = (y0.max(y1).round() - top) as i64;
        if width <= 0 || height <= 0 {
            return;
        }
        let rect = Rect::at(left as i32, top as i32).of_size(width as u32, height as u32);
        draw_filled_rect_mut(&mut self.image, rect, color);
    }

    /// Outline a rectangle with lines of the given width
    pub fn stroke_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, width: f64, color: Rgba<u8>) {
        let half = width / 2.0;
        self.fill_rect(x0 - half, y0 - half, x1 + half, y0 + half, color);
        self.fill_rect(x0 - half, y1 - half, x1 + half, y1 + half, color);
        self.fill_rect(x0 - half, y0 - half, x0 + half, y1 + half, color);
        self.fill_rect(x1 - half, y0 - half, x1 + half, y1 + half, color);
    }

    /// Stroke a straight segment
    pub fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba<u8>) {
        if !(from.0.is_finite() && from.1.is_finite() && to.0.is_finite() && to.1.is_finite()) {
            return;
        }

        if width <= HAIRLINE_WIDTH {
            draw_antialiased_line_segment_mut(
                &mut self.image,
                (from.0.round() as i32, from.1.round() as i32),
                (to.0.round() as i32, to.1.round() as i32),
                color,
                interpolate,
            );
            return;
        }

        let half = width / 2.0;
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = dx.hypot(dy);
        if length >= 0.5 {
            let (nx, ny) = (-dy / length * half, dx / length * half);
            let corner = |x: f64, y: f64| Point::new(x.round() as i32, y.round() as i32);
            let quad = [
                corner(from.0 + nx, from.1 + ny),
                corner(to.0 + nx, to.1 + ny),
                corner(to.0 - nx, to.1 - ny),
                corner(from.0 - nx, from.1 - ny),
            ];
            if quad.first() != quad.last() {
                draw_polygon_mut(&mut self.image, &quad, color);
            }
        }

        // Round joins between consecutive segments of a polyline
        let radius = (half - 0.5).round().max(0.0) as i32;
        draw_filled_circle_mut(
            &mut self.image,
            (from.0.round() as i32, from.1.round() as i32),
            radius,
            color,
        );
        draw_filled_circle_mut(
            &mut self.image,
            (to.0.round() as i32, to.1.round() as i32),
            radius,
            color,
        );
    }

    /// Filled circle with a one-pixel outline
    pub fn marker(&mut self, center: (f64, f64), radius: f64, fill: Rgba<u8>, edge: Rgba<u8>) {
        if !(center.0.is_finite() && center.1.is_finite()) {
            return;
        }
        let c = (center.0.round() as i32, center.1.round() as i32);
        let r = radius.round().max(1.0) as i32;
        draw_filled_circle_mut(&mut self.image, c, r, fill);
        draw_hollow_circle_mut(&mut self.image, c, r, edge);
    }

    /// Draw text with its top-left corner (before rotation) at `(x, y)`
    ///
    /// Vertical text runs upwards from `(x, y)`, which is then its bottom-left
    /// corner. Glyph coverage is blended over what is already drawn.
    pub fn draw_text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        scale: PxScale,
        direction: TextDirection,
        color: Rgba<u8>,
    ) {
        let Some(font) = FONT.as_ref() else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let (along, across) = text_extent(text, scale);
        let (width, height) = (along.ceil() as u32 + 2, across.ceil() as u32 + 2);

        // Coverage is rendered onto the text colour at zero alpha, so the
        // stamp carries straight alpha for the overlay blend
        let Rgba([r, g, b, _]) = color;
        let mut stamp = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 0]));
        draw_text_mut(&mut stamp, color, 0, 0, scale, font, text);

        let (ox, oy) = (x.round() as i64, y.round() as i64);
        match direction {
            TextDirection::Horizontal => overlay(&mut self.image, &stamp, ox, oy),
            TextDirection::Vertical => {
                let rotated = rotate270(&stamp);
                overlay(
                    &mut self.image,
                    &rotated,
                    ox,
                    oy - i64::from(rotated.height()),
                );
            }
        }
    }
}

/// Whether the embedded label font could be parsed
pub fn font_loaded() -> bool {
    FONT.is_some()
}

/// Glyph scale for a font size in points at the output resolution
pub fn font_scale(points: f64) -> PxScale {
    let px_per_em = points_to_pixels(points) as f32;
    let height_per_em = FONT
        .as_ref()
        .and_then(|font| Some(font.height_unscaled() / font.units_per_em()?))
        .unwrap_or(1.0);
    PxScale::from(px_per_em * height_per_em)
}

/// Size `(along, across)` in pixels of text drawn at the given scale
///
/// `across` is the full line height from ascender to descender.
pub fn text_extent(text: &str, scale: PxScale) -> (f64, f64) {
    let Some(font) = FONT.as_ref() else {
        return (0.0, 0.0);
    };
    let (width, _) = text_size(scale, font, text);
    let scaled = font.as_scaled(scale);
    (f64::from(width), f64::from(scaled.ascent() - scaled.descent()))
}
