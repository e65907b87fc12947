//! Single-axes figure with a vertical colorbar
//!
//! A [`Figure`] owns its canvas and the layout computed from the axis
//! ranges. Renderers draw data layers through it, then call
//! [`Figure::save`], which consumes the figure, adds frame, ticks, labels and
//! colorbar, crops to the drawn content and writes the PNG.

use crate::io::configuration::{
    AXIS_LABEL_FONT_PT, COLORBAR_ASPECT, COLORBAR_PAD_IN, CONTOUR_LABEL_FONT_PT,
    FIGURE_HEIGHT_IN, FIGURE_WIDTH_IN, FRAME_LINE_WIDTH_PT, MARKER_AREA_PT2, MAX_TICK_BINS,
    TICK_LABEL_FONT_PT, TICK_LENGTH_PT, TIGHT_PAD_IN, X_LABEL, Y_LABEL, inches_to_pixels,
    points_to_pixels,
};
use crate::io::error::{Result, computation_error};
use crate::io::png::write_png;
use crate::math::ticks::{decade_exponent, format_tick, linear_ticks, log_ticks};
use crate::render::canvas::{BLACK, Canvas, TextDirection, font_scale, text_extent};
use crate::render::colormap::ColorScale;
use crate::render::contour::{ContourLine, LabelBox, place_labels};
use crate::spatial::grid::{Extent, Grid, bilinear};
use ab_glyph::PxScale;
use image::{Rgba, RgbaImage};
use ndarray::Array2;
use std::path::Path;

// Relative size of sub- and superscripts
const SCRIPT_RATIO: f32 = 0.7;
// Relative expansion applied to zero-width axis ranges
const SINGULAR_EXPANDER: f64 = 0.05;
// Clearance around inline contour labels relative to their font scale
const LABEL_PAD_RATIO: f64 = 0.15;

/// Axis scale type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    /// Values map linearly onto the axis
    Linear,
    /// Decimal logarithms of values map linearly onto the axis
    Log,
}

/// Data range and scale of one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    min: f64,
    max: f64,
    scale: AxisScale,
}

impl Axis {
    /// Linear axis over an extent; a zero-width extent is widened slightly
    pub fn linear(extent: Extent) -> Self {
        let (min, max) = nonsingular(extent.min, extent.max);
        Self {
            min,
            max,
            scale: AxisScale::Linear,
        }
    }

    /// Logarithmic axis over the positive part of `values`
    ///
    /// # Errors
    ///
    /// Returns a computation error if no value is positive and finite
    pub fn log(values: &[f64]) -> Result<Self> {
        let positive: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| v.is_finite() && *v > 0.0)
            .collect();
        let extent = Extent::of(&positive).ok_or_else(|| {
            computation_error("log axis", &"axis has no positive extent to display")
        })?;
        let (lo, hi) = nonsingular(extent.min.log10(), extent.max.log10());
        Ok(Self {
            min: 10f64.powf(lo),
            max: 10f64.powf(hi),
            scale: AxisScale::Log,
        })
    }

    /// Lower axis limit
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper axis limit
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Scale type
    pub const fn scale(&self) -> AxisScale {
        self.scale
    }

    fn transform(&self, value: f64) -> Option<f64> {
        match self.scale {
            AxisScale::Linear => value.is_finite().then_some(value),
            AxisScale::Log => (value.is_finite() && value > 0.0).then(|| value.log10()),
        }
    }

    /// Span of the axis in transformed units (decades for log axes)
    pub fn transformed_span(&self) -> f64 {
        match (self.transform(self.min), self.transform(self.max)) {
            (Some(lo), Some(hi)) => hi - lo,
            _ => 0.0,
        }
    }

    /// Position of a value along the axis, 0 at `min` and 1 at `max`
    ///
    /// Returns `None` for values a log axis cannot show.
    pub fn fraction(&self, value: f64) -> Option<f64> {
        let t = self.transform(value)?;
        let lo = self.transform(self.min)?;
        let span = self.transformed_span();
        Some(if span > 0.0 { (t - lo) / span } else { 0.5 })
    }

    /// Labelled major ticks inside the axis range
    pub fn ticks(&self) -> Vec<Tick> {
        match self.scale {
            AxisScale::Linear => labelled_ticks(self.min, self.max),
            AxisScale::Log => log_ticks(self.min, self.max, MAX_TICK_BINS + 1)
                .major
                .into_iter()
                .map(|value| Tick {
                    value,
                    label: decade_exponent(value).map_or_else(
                        || TickLabel::Plain(format_tick(value)),
                        TickLabel::Power,
                    ),
                })
                .collect(),
        }
    }

    /// Unlabelled minor ticks of a log axis at integer multiples of each decade
    pub fn minor_ticks(&self) -> Vec<f64> {
        match self.scale {
            AxisScale::Linear => Vec::new(),
            AxisScale::Log => log_ticks(self.min, self.max, MAX_TICK_BINS + 1).minor,
        }
    }
}

// Widens a zero-width interval the way plotting libraries do
fn nonsingular(lo: f64, hi: f64) -> (f64, f64) {
    let magnitude = lo.abs().max(hi.abs());
    if hi - lo > magnitude * 1e-12 && hi > lo {
        return (lo, hi);
    }
    if magnitude == 0.0 {
        (-SINGULAR_EXPANDER, SINGULAR_EXPANDER)
    } else {
        (
            lo - SINGULAR_EXPANDER * lo.abs(),
            hi + SINGULAR_EXPANDER * hi.abs(),
        )
    }
}

// Ticks of at most `MAX_TICK_BINS` intervals labelled with their value
fn labelled_ticks(min: f64, max: f64) -> Vec<Tick> {
    linear_ticks(min, max, MAX_TICK_BINS + 1)
        .into_iter()
        .map(|value| Tick {
            value,
            label: TickLabel::Plain(format_tick(value)),
        })
        .collect()
}

/// Text of a tick label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickLabel {
    /// Plain number
    Plain(String),
    /// Power of ten drawn as `10` with a raised exponent
    Power(i32),
}

impl TickLabel {
    /// Size `(width, height)` in pixels at a font scale
    pub fn size(&self, scale: PxScale) -> (f64, f64) {
        match self {
            Self::Plain(text) => text_extent(text, scale),
            Self::Power(exponent) => {
                let (base_w, base_h) = text_extent("10", scale);
                let small = script_scale(scale);
                let (exp_w, exp_h) = text_extent(&exponent.to_string(), small);
                (base_w + exp_w, exp_h.mul_add(0.5, base_h))
            }
        }
    }

    fn draw(&self, canvas: &mut Canvas, x: f64, y: f64, scale: PxScale) {
        match self {
            Self::Plain(text) => {
                canvas.draw_text(x, y, text, scale, TextDirection::Horizontal, BLACK);
            }
            Self::Power(exponent) => {
                let small = script_scale(scale);
                let (base_w, _) = text_extent("10", scale);
                let (_, exp_h) = text_extent(&exponent.to_string(), small);
                let raise = exp_h * 0.5;
                canvas.draw_text(x, y + raise, "10", scale, TextDirection::Horizontal, BLACK);
                canvas.draw_text(
                    x + base_w,
                    y,
                    &exponent.to_string(),
                    small,
                    TextDirection::Horizontal,
                    BLACK,
                );
            }
        }
    }
}

/// Tick position with its label
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Data value at the tick
    pub value: f64,
    /// Label drawn next to it
    pub label: TickLabel,
}

fn script_scale(scale: PxScale) -> PxScale {
    PxScale {
        x: scale.x * SCRIPT_RATIO,
        y: scale.y * SCRIPT_RATIO,
    }
}

/// Axis label made of a base text and a lowered subscript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLabel {
    /// Main text
    pub base: &'static str,
    /// Subscript following the main text
    pub subscript: &'static str,
}

impl AxisLabel {
    /// Label from a `(base, subscript)` pair
    pub const fn new((base, subscript): (&'static str, &'static str)) -> Self {
        Self { base, subscript }
    }

    /// Size `(along, across)` in pixels at a font scale
    pub fn size(&self, scale: PxScale) -> (f64, f64) {
        let (base_along, base_across) = text_extent(self.base, scale);
        let small = script_scale(scale);
        let (sub_along, sub_across) = text_extent(self.subscript, small);
        (base_along + sub_along, sub_across.mul_add(0.5, base_across))
    }

    // `(x, y)` is the top-left corner for horizontal labels and the
    // bottom-left corner for vertical ones
    fn draw(&self, canvas: &mut Canvas, x: f64, y: f64, scale: PxScale, direction: TextDirection) {
        let small = script_scale(scale);
        let (advance, base_across) = text_extent(self.base, scale);
        let (_, sub_across) = text_extent(self.subscript, small);
        let drop = sub_across.mul_add(-0.5, base_across);

        canvas.draw_text(x, y, self.base, scale, direction, BLACK);
        match direction {
            TextDirection::Horizontal => {
                canvas.draw_text(x + advance, y + drop, self.subscript, small, direction, BLACK);
            }
            TextDirection::Vertical => {
                canvas.draw_text(x + drop, y - advance, self.subscript, small, direction, BLACK);
            }
        }
    }
}

/// How data units relate between the two axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    /// The axes box fills the space available
    Auto,
    /// One transformed unit spans the same number of pixels on both axes
    Equal,
}

/// Pixel rectangle of the axes or the colorbar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotRect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Right edge
    pub right: f64,
    /// Bottom edge
    pub bottom: f64,
}

impl PlotRect {
    /// Width in pixels
    pub const fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height in pixels
    pub const fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Owned drawing context for one plot
#[derive(Debug)]
pub struct Figure {
    canvas: Canvas,
    x_axis: Axis,
    y_axis: Axis,
    colorbar: ColorScale,
    x_ticks: Vec<Tick>,
    y_ticks: Vec<Tick>,
    colorbar_ticks: Vec<Tick>,
    axes: PlotRect,
    colorbar_rect: PlotRect,
}

impl Figure {
    /// Lay out axes and colorbar on a fresh transparent canvas
    pub fn new(x_axis: Axis, y_axis: Axis, aspect: Aspect, colorbar: ColorScale) -> Self {
        let width = inches_to_pixels(FIGURE_WIDTH_IN).round();
        let height = inches_to_pixels(FIGURE_HEIGHT_IN).round();
        let tick_scale = font_scale(TICK_LABEL_FONT_PT);
        let label_scale = font_scale(AXIS_LABEL_FONT_PT);
        let gap = points_to_pixels(TICK_LENGTH_PT);
        let outer = inches_to_pixels(TIGHT_PAD_IN);

        let x_ticks = x_axis.ticks();
        let y_ticks = y_axis.ticks();
        let colorbar_ticks = labelled_ticks(colorbar.min, colorbar.max);

        let widest = |ticks: &[Tick]| {
            ticks
                .iter()
                .map(|tick| tick.label.size(tick_scale).0)
                .fold(0.0, f64::max)
        };
        let tallest = |ticks: &[Tick]| {
            ticks
                .iter()
                .map(|tick| tick.label.size(tick_scale).1)
                .fold(0.0, f64::max)
        };
        let (_, x_label_h) = AxisLabel::new(X_LABEL).size(label_scale);
        let (_, y_label_h) = AxisLabel::new(Y_LABEL).size(label_scale);

        let left = outer + y_label_h + gap + widest(&y_ticks) + gap;
        let bottom = height - (outer + x_label_h + gap + tallest(&x_ticks) + gap);
        let top = outer + tallest(&y_ticks);
        let available_h = (bottom - top).max(1.0);
        let colorbar_w = available_h / COLORBAR_ASPECT;
        let colorbar_pad = inches_to_pixels(COLORBAR_PAD_IN);
        let right = width
            - (outer + widest(&colorbar_ticks) + 2.0 * gap + colorbar_w + colorbar_pad)
                .max(widest(&x_ticks) / 2.0 + outer);

        let mut axes = PlotRect {
            left,
            top,
            right: right.max(left + 1.0),
            bottom: bottom.max(top + 1.0),
        };
        if aspect == Aspect::Equal {
            axes = equal_aspect(axes, &x_axis, &y_axis);
        }

        let colorbar_w = (axes.height() / COLORBAR_ASPECT).max(1.0);
        let colorbar_rect = PlotRect {
            left: axes.right + colorbar_pad,
            top: axes.top,
            right: axes.right + colorbar_pad + colorbar_w,
            bottom: axes.bottom,
        };

        Self {
            canvas: Canvas::new(width as u32, height as u32),
            x_axis,
            y_axis,
            colorbar,
            x_ticks,
            y_ticks,
            colorbar_ticks,
            axes,
            colorbar_rect,
        }
    }

    /// Pixel rectangle of the axes box
    pub const fn axes_rect(&self) -> PlotRect {
        self.axes
    }

    /// Pixel rectangle of the colorbar
    pub const fn colorbar_rect(&self) -> PlotRect {
        self.colorbar_rect
    }

    /// Colour scale shown by the colorbar
    pub const fn colorbar_scale(&self) -> ColorScale {
        self.colorbar
    }

    /// Horizontal axis
    pub const fn x_axis(&self) -> Axis {
        self.x_axis
    }

    /// Vertical axis
    pub const fn y_axis(&self) -> Axis {
        self.y_axis
    }

    /// Canvas pixel of a data point, or `None` if an axis cannot show it
    pub fn to_pixel(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let fx = self.x_axis.fraction(x)?;
        let fy = self.y_axis.fraction(y)?;
        Some((
            fx.mul_add(self.axes.width(), self.axes.left),
            fy.mul_add(-self.axes.height(), self.axes.bottom),
        ))
    }

    /// Draw a field as an image filling the axes box
    ///
    /// Each grid node is the centre of an image cell; pixels are sampled
    /// bilinearly between node centres with the origin at the lower left.
    pub fn draw_image(&mut self, field: &Array2<f64>, scale: &ColorScale) {
        let (rows, cols) = field.dim();
        let rect = self.axes;
        let (x0, x1) = (rect.left.round() as i64, rect.right.round() as i64);
        let (y0, y1) = (rect.top.round() as i64, rect.bottom.round() as i64);

        for py in y0..y1 {
            let fy = (rect.bottom - (py as f64 + 0.5)) / rect.height();
            let row = fy.mul_add(rows as f64, -0.5);
            for px in x0..x1 {
                let fx = (px as f64 + 0.5 - rect.left) / rect.width();
                let col = fx.mul_add(cols as f64, -0.5);
                if let Some(color) = scale.color(bilinear(field, col, row)) {
                    self.canvas.put(px, py, color);
                }
            }
        }
    }

    /// Draw a pseudocolor mesh: cell `(i, j)` spans neighbouring nodes and
    /// takes the colour of its lower-left node; masked cells stay empty
    pub fn draw_mesh(&mut self, grid: &Grid, field: &Array2<f64>, scale: &ColorScale) {
        let xs = grid.xs();
        let ys = grid.ys();
        for (row, y_pair) in ys.windows(2).enumerate() {
            let [y_lo, y_hi] = y_pair else {
                continue;
            };
            for (col, x_pair) in xs.windows(2).enumerate() {
                let [x_lo, x_hi] = x_pair else {
                    continue;
                };
                let value = field.get((row, col)).copied().unwrap_or(f64::NAN);
                let Some(color) = scale.color(value) else {
                    continue;
                };
                let corners = (self.to_pixel(*x_lo, *y_lo), self.to_pixel(*x_hi, *y_hi));
                if let (Some(a), Some(b)) = corners {
                    self.canvas.fill_rect(a.0, a.1, b.0, b.1, color);
                }
            }
        }
    }

    /// Scatter markers coloured by their own value
    pub fn draw_scatter(&mut self, x: &[f64], y: &[f64], z: &[f64], scale: &ColorScale) {
        let radius = (MARKER_AREA_PT2 / std::f64::consts::PI).sqrt();
        let radius = points_to_pixels(radius);
        for ((&px, &py), &pz) in x.iter().zip(y).zip(z) {
            if let (Some(center), Some(fill)) = (self.to_pixel(px, py), scale.color(pz)) {
                self.canvas.marker(center, radius, fill, BLACK);
            }
        }
    }

    /// Stroke contour lines traced on `grid`
    ///
    /// With `labelled`, each long enough line gets an inline label of its
    /// level and the stroke is interrupted underneath it.
    pub fn draw_contours(
        &mut self,
        grid: &Grid,
        lines: &[ContourLine],
        width_pt: f64,
        color: Rgba<u8>,
        labelled: bool,
    ) {
        let pixel_lines: Vec<(f64, Vec<(f64, f64)>)> = lines
            .iter()
            .map(|line| {
                let points = line
                    .points
                    .iter()
                    .filter_map(|&(col, row)| {
                        let (x, y) = grid.point_at(col, row);
                        self.to_pixel(x, y)
                    })
                    .collect();
                (line.level, points)
            })
            .collect();

        let label_scale = font_scale(CONTOUR_LABEL_FONT_PT);
        let labels: Vec<LabelBox> = if labelled {
            let axes = self.axes;
            place_labels(
                &pixel_lines,
                |text| text_extent(text, label_scale),
                f64::from(label_scale.y) * LABEL_PAD_RATIO,
                (axes.left, axes.top, axes.right, axes.bottom),
            )
        } else {
            Vec::new()
        };

        let width = points_to_pixels(width_pt);
        for (_, points) in &pixel_lines {
            for pair in points.windows(2) {
                let [a, b] = pair else {
                    continue;
                };
                let mid = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
                if labels.iter().any(|label| label.contains(mid)) {
                    continue;
                }
                self.canvas.stroke_line(*a, *b, width, color);
            }
        }

        for label in &labels {
            let (text_w, text_h) = text_extent(&label.text, label_scale);
            self.canvas.draw_text(
                label.center.0 - text_w / 2.0,
                label.center.1 - text_h / 2.0,
                &label.text,
                label_scale,
                TextDirection::Horizontal,
                color,
            );
        }
    }

    fn draw_frame(&mut self) {
        let frame = points_to_pixels(FRAME_LINE_WIDTH_PT);
        let tick_len = points_to_pixels(TICK_LENGTH_PT);
        let tick_scale = font_scale(TICK_LABEL_FONT_PT);
        let rect = self.axes;

        let x_ticks: Vec<(f64, TickLabel)> = self
            .x_ticks
            .iter()
            .filter_map(|tick| {
                let (px, _) = self.to_pixel(tick.value, self.y_axis.min)?;
                Some((px, tick.label.clone()))
            })
            .collect();
        let y_ticks: Vec<(f64, TickLabel)> = self
            .y_ticks
            .iter()
            .filter_map(|tick| {
                let (_, py) = self.to_pixel(self.x_axis.min, tick.value)?;
                Some((py, tick.label.clone()))
            })
            .collect();
        let x_minor: Vec<f64> = self
            .x_axis
            .minor_ticks()
            .into_iter()
            .filter_map(|v| Some(self.to_pixel(v, self.y_axis.min)?.0))
            .collect();
        let y_minor: Vec<f64> = self
            .y_axis
            .minor_ticks()
            .into_iter()
            .filter_map(|v| Some(self.to_pixel(self.x_axis.min, v)?.1))
            .collect();

        // Ticks point inwards on all four sides
        for (px, _) in &x_ticks {
            self.tick_pair_vertical(*px, tick_len, frame);
        }
        for px in x_minor {
            self.tick_pair_vertical(px, tick_len / 2.0, frame / 2.0);
        }
        for (py, _) in &y_ticks {
            self.tick_pair_horizontal(*py, tick_len, frame);
        }
        for py in y_minor {
            self.tick_pair_horizontal(py, tick_len / 2.0, frame / 2.0);
        }

        self.canvas
            .stroke_rect(rect.left, rect.top, rect.right, rect.bottom, frame, BLACK);

        for (px, label) in x_ticks {
            let (w, _) = label.size(tick_scale);
            label.draw(&mut self.canvas, px - w / 2.0, rect.bottom + tick_len, tick_scale);
        }
        for (py, label) in y_ticks {
            let (w, h) = label.size(tick_scale);
            label.draw(
                &mut self.canvas,
                rect.left - tick_len - w,
                py - h / 2.0,
                tick_scale,
            );
        }
    }

    fn tick_pair_vertical(&mut self, px: f64, length: f64, width: f64) {
        let rect = self.axes;
        let (x0, x1) = (px - width / 2.0, px + width / 2.0);
        self.canvas.fill_rect(x0, rect.bottom - length, x1, rect.bottom, BLACK);
        self.canvas.fill_rect(x0, rect.top, x1, rect.top + length, BLACK);
    }

    fn tick_pair_horizontal(&mut self, py: f64, length: f64, width: f64) {
        let rect = self.axes;
        let (y0, y1) = (py - width / 2.0, py + width / 2.0);
        self.canvas.fill_rect(rect.left, y0, rect.left + length, y1, BLACK);
        self.canvas.fill_rect(rect.right - length, y0, rect.right, y1, BLACK);
    }

    fn draw_axis_labels(&mut self) {
        let label_scale = font_scale(AXIS_LABEL_FONT_PT);
        let tick_scale = font_scale(TICK_LABEL_FONT_PT);
        let gap = points_to_pixels(TICK_LENGTH_PT);
        let rect = self.axes;

        let x_label = AxisLabel::new(X_LABEL);
        let (along, _) = x_label.size(label_scale);
        let tick_h = self
            .x_ticks
            .iter()
            .map(|tick| tick.label.size(tick_scale).1)
            .fold(0.0, f64::max);
        x_label.draw(
            &mut self.canvas,
            (rect.left + rect.right - along) / 2.0,
            rect.bottom + gap + tick_h + gap,
            label_scale,
            TextDirection::Horizontal,
        );

        let y_label = AxisLabel::new(Y_LABEL);
        let (along, across) = y_label.size(label_scale);
        let tick_w = self
            .y_ticks
            .iter()
            .map(|tick| tick.label.size(tick_scale).0)
            .fold(0.0, f64::max);
        y_label.draw(
            &mut self.canvas,
            rect.left - gap - tick_w - gap - across,
            (rect.top + rect.bottom + along) / 2.0,
            label_scale,
            TextDirection::Vertical,
        );
    }

    fn draw_colorbar(&mut self) {
        let rect = self.colorbar_rect;
        let frame = points_to_pixels(FRAME_LINE_WIDTH_PT);
        let tick_len = points_to_pixels(TICK_LENGTH_PT);
        let tick_scale = font_scale(TICK_LABEL_FONT_PT);
        let scale = self.colorbar;

        let (y0, y1) = (rect.top.round() as i64, rect.bottom.round() as i64);
        for py in y0..y1 {
            let t = (rect.bottom - (py as f64 + 0.5)) / rect.height();
            let color = scale.colormap.sample(t);
            self.canvas
                .fill_rect(rect.left, py as f64, rect.right, py as f64 + 1.0, color);
        }
        self.canvas
            .stroke_rect(rect.left, rect.top, rect.right, rect.bottom, frame, BLACK);

        let span = scale.max - scale.min;
        for tick in &self.colorbar_ticks {
            let t = if span > 0.0 {
                (tick.value - scale.min) / span
            } else {
                0.5
            };
            let py = t.mul_add(-rect.height(), rect.bottom);
            self.canvas.fill_rect(
                rect.right,
                py - frame / 2.0,
                rect.right + tick_len,
                py + frame / 2.0,
                BLACK,
            );
            let (_, h) = tick.label.size(tick_scale);
            tick.label
                .draw(&mut self.canvas, rect.right + 2.0 * tick_len, py - h / 2.0, tick_scale);
        }
    }

    /// Finish the figure and write it as a tightly cropped PNG
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written
    pub fn save(mut self, path: &Path) -> Result<()> {
        let image = self.finish();
        write_png(&image, path)
    }

    /// Finish the figure and return the cropped pixels without writing them
    pub fn finish(&mut self) -> RgbaImage {
        self.draw_frame();
        self.draw_axis_labels();
        self.draw_colorbar();
        crop_to_content(self.canvas.image(), inches_to_pixels(TIGHT_PAD_IN).round() as u32)
    }
}

// Shrinks the box about its centre so both axes share a pixel-per-unit ratio
fn equal_aspect(rect: PlotRect, x_axis: &Axis, y_axis: &Axis) -> PlotRect {
    let x_span = x_axis.transformed_span();
    let y_span = y_axis.transformed_span();
    if x_span <= 0.0 || y_span <= 0.0 {
        return rect;
    }

    let ratio = y_span / x_span;
    let (width, height) = (rect.width(), rect.height());
    let (new_w, new_h) = if height / width > ratio {
        (width, (width * ratio).max(1.0))
    } else {
        ((height / ratio).max(1.0), height)
    };
    let cx = (rect.left + rect.right) / 2.0;
    let cy = (rect.top + rect.bottom) / 2.0;
    PlotRect {
        left: cx - new_w / 2.0,
        top: cy - new_h / 2.0,
        right: cx + new_w / 2.0,
        bottom: cy + new_h / 2.0,
    }
}

/// Copy of the smallest region holding every non-transparent pixel, with a
/// transparent margin of `pad` pixels on each side
///
/// An image with no visible pixel is returned unchanged.
pub fn crop_to_content(image: &RgbaImage, pad: u32) -> RgbaImage {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0.get(3).copied().unwrap_or(0) == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    let Some((x0, y0, x1, y1)) = bounds else {
        return image.clone();
    };

    let width = x1 - x0 + 1 + 2 * pad;
    let height = y1 - y0 + 1 + 2 * pad;
    RgbaImage::from_fn(width, height, |x, y| {
        let source = (
            (x + x0).checked_sub(pad),
            (y + y0).checked_sub(pad),
        );
        match source {
            (Some(sx), Some(sy)) if sx <= x1 && sy <= y1 => {
                image.get_pixel_checked(sx, sy).copied().unwrap_or(Rgba([0, 0, 0, 0]))
            }
            _ => Rgba([0, 0, 0, 0]),
        }
    })
}
