//! Colormaps and value-to-colour scales

use image::Rgba;

/// Piecewise-linear channel ramp as `(position, value)` anchors
type Ramp = &'static [(f64, f64)];

const JET_RED: Ramp = &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const JET_GREEN: Ramp = &[
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const JET_BLUE: Ramp = &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

/// Named colormaps used by the renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// Default map for images, scatter markers and their colorbars
    Jet,
    /// Spectral map used for the log-axes pseudocolor mesh
    Rainbow,
}

impl Colormap {
    /// Colour at normalised position `t` in `[0, 1]` (values outside are clamped)
    pub fn sample(self, t: f64) -> Rgba<u8> {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let [r, g, b] = match self {
            Self::Jet => [ramp(JET_RED, t), ramp(JET_GREEN, t), ramp(JET_BLUE, t)],
            Self::Rainbow => [
                (2.0 * t - 0.5).abs(),
                (std::f64::consts::PI * t).sin(),
                (std::f64::consts::FRAC_PI_2 * t).cos(),
            ],
        };
        Rgba([to_byte(r), to_byte(g), to_byte(b), 255])
    }
}

fn ramp(anchors: Ramp, t: f64) -> f64 {
    let mut previous = anchors.first().copied().unwrap_or((0.0, 0.0));
    for &(position, value) in anchors {
        if t <= position {
            let width = position - previous.0;
            if width <= 0.0 {
                return value;
            }
            let fraction = (t - previous.0) / width;
            return (value - previous.1).mul_add(fraction, previous.1);
        }
        previous = (position, value);
    }
    previous.1
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Maps data values linearly onto a colormap between `min` and `max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    /// Value drawn with the low end of the map
    pub min: f64,
    /// Value drawn with the high end of the map
    pub max: f64,
    /// Colormap sampled by the scale
    pub colormap: Colormap,
}

impl ColorScale {
    /// Scale spanning `[min, max]`
    pub const fn new(min: f64, max: f64, colormap: Colormap) -> Self {
        Self { min, max, colormap }
    }

    /// Normalised position of a value; a zero-width scale maps everything to 0.5
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            ((value - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }

    /// Colour of a value, or `None` for masked (non-finite) values
    pub fn color(&self, value: f64) -> Option<Rgba<u8>> {
        value
            .is_finite()
            .then(|| self.colormap.sample(self.normalize(value)))
    }
}
