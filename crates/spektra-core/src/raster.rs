//! Software rendering of a gradient into an RGBA8 buffer.
//!
//! Follows the CSS image rules closely enough for previews and exports:
//!
//! - stop positions fix up like CSS: a position smaller than an earlier one
//!   is raised to it, so hard edges come out as in a browser;
//! - the first color extends before the first stop, the last color after the
//!   last one;
//! - colors interpolate in premultiplied sRGB.

use std::fmt;

use crate::color::{ColorError, Rgba, parse_color};
use crate::model::{ColorStop, GradientConfig, GradientKind};

/// Largest width or height [`render`] accepts.
pub const MAX_DIMENSION: u32 = 16_384;

#[derive(Debug, Clone, PartialEq)]
pub enum RasterError {
    /// Stop `index` holds a color the grammar rejects.
    InvalidColor { index: usize, color: String, source: ColorError },
    /// Width or height is zero.
    EmptySize,
    /// A side exceeds [`MAX_DIMENSION`] or the buffer size overflows.
    TooLarge { width: u32, height: u32 },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor { index, color, source } => {
                write!(f, "stop {} has unusable color {color:?}: {source}", index + 1)
            }
            Self::EmptySize => f.write_str("image size must be at least 1x1"),
            Self::TooLarge { width, height } => {
                write!(f, "image size {width}x{height} exceeds {MAX_DIMENSION}x{MAX_DIMENSION}")
            }
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidColor { source, .. } => Some(source),
            Self::EmptySize | Self::TooLarge { .. } => None,
        }
    }
}

// ── Premul ────────────────────────────────────────────────────────────────

/// Premultiplied sRGB color used while blending.
///
/// Invariant: `r`, `g`, `b` are already multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
struct Premul {
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

impl Premul {
    fn from_rgba(c: Rgba) -> Self {
        let a = f64::from(c.a) / 255.0;
        Self {
            r: f64::from(c.r) / 255.0 * a,
            g: f64::from(c.g) / 255.0 * a,
            b: f64::from(c.b) / 255.0 * a,
            a,
        }
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |x: f64, y: f64| x + (y - x) * t;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Back to straight alpha. Fully transparent colors come out as zero.
    fn to_rgba(self) -> Rgba {
        if self.a <= 0.0 {
            return Rgba::TRANSPARENT;
        }
        let inv = 1.0 / self.a;
        Rgba::from_unit(self.r * inv, self.g * inv, self.b * inv, self.a)
    }
}

// ── Ramp ──────────────────────────────────────────────────────────────────

/// Resolved color stops: offsets in `[0, 1]` units, non-decreasing.
#[derive(Debug, Clone)]
struct Ramp {
    stops: Vec<(f64, Premul)>,
}

impl Ramp {
    fn resolve(stops: &[ColorStop]) -> Result<Self, RasterError> {
        let mut out = Vec::with_capacity(stops.len());
        let mut floor = f64::NEG_INFINITY;
        for (index, stop) in stops.iter().enumerate() {
            let rgba = parse_color(&stop.color).map_err(|source| RasterError::InvalidColor {
                index,
                color: stop.color.clone(),
                source,
            })?;
            let t = (stop.position / 100.0).max(floor);
            floor = t;
            out.push((t, Premul::from_rgba(rgba)));
        }
        Ok(Self { stops: out })
    }

    fn at(&self, t: f64) -> Premul {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Premul::default(),
        };
        if t <= first.0 {
            return first.1;
        }
        for pair in self.stops.windows(2) {
            let ((t0, c0), (t1, c1)) = (pair[0], pair[1]);
            if t >= t0 && t < t1 {
                return c0.lerp(c1, (t - t0) / (t1 - t0));
            }
        }
        last.1
    }
}

// ── Shader ────────────────────────────────────────────────────────────────

/// Maps a pixel to a position along the gradient.
#[derive(Debug, Copy, Clone)]
enum Geometry {
    Linear { dir_x: f64, dir_y: f64, length: f64, cx: f64, cy: f64 },
    Radial { cx: f64, cy: f64, radius: f64 },
    Conic { cx: f64, cy: f64, from: f64 },
}

impl Geometry {
    fn new(config: &GradientConfig, width: f64, height: f64) -> Self {
        let cx = config.center_x / 100.0 * width;
        let cy = config.center_y / 100.0 * height;
        match config.kind {
            GradientKind::Linear => {
                // 0deg points up, angles grow clockwise; y grows downwards.
                let a = config.angle.to_radians();
                let (dir_x, dir_y) = (a.sin(), -a.cos());
                let length = (width * dir_x).abs() + (height * dir_y).abs();
                Self::Linear { dir_x, dir_y, length, cx: width / 2.0, cy: height / 2.0 }
            }
            GradientKind::Radial => {
                // `circle` with the default `farthest-corner` extent.
                let radius = [(0.0, 0.0), (width, 0.0), (0.0, height), (width, height)]
                    .iter()
                    .map(|&(x, y)| (x - cx).hypot(y - cy))
                    .fold(0.0, f64::max);
                Self::Radial { cx, cy, radius }
            }
            GradientKind::Conic => Self::Conic { cx, cy, from: config.angle },
        }
    }

    fn offset(&self, x: f64, y: f64) -> f64 {
        match *self {
            Self::Linear { dir_x, dir_y, length, cx, cy } => {
                if length <= 0.0 {
                    return 0.0;
                }
                ((x - cx) * dir_x + (y - cy) * dir_y) / length + 0.5
            }
            Self::Radial { cx, cy, radius } => {
                if radius <= 0.0 {
                    return 0.0;
                }
                (x - cx).hypot(y - cy) / radius
            }
            Self::Conic { cx, cy, from } => {
                let theta = (x - cx).atan2(cy - y).to_degrees();
                (theta - from).rem_euclid(360.0) / 360.0
            }
        }
    }
}

/// A gradient prepared for sampling at a fixed box size.
#[derive(Debug, Clone)]
pub struct Shader {
    ramp: Ramp,
    geometry: Geometry,
}

impl Shader {
    pub fn new(config: &GradientConfig, width: u32, height: u32) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptySize);
        }
        Ok(Self {
            ramp: Ramp::resolve(&config.color_stops)?,
            geometry: Geometry::new(config, f64::from(width), f64::from(height)),
        })
    }

    /// Color at a point in box coordinates (pixel centers sit at `+0.5`).
    pub fn color_at(&self, x: f64, y: f64) -> Rgba {
        self.ramp.at(self.geometry.offset(x, y)).to_rgba()
    }
}

// ── Pixmap ────────────────────────────────────────────────────────────────

/// Straight-alpha RGBA8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.data[i..i + 4];
        Some(Rgba::new(px[0], px[1], px[2], px[3]))
    }
}

/// Renders `config` into a `width` x `height` image.
pub fn render(config: &GradientConfig, width: u32, height: u32) -> Result<Pixmap, RasterError> {
    let shader = Shader::new(config, width, height)?;
    let len = buffer_len(width, height).ok_or(RasterError::TooLarge { width, height })?;
    let mut data = Vec::with_capacity(len);
    for y in 0..height {
        for x in 0..width {
            let c = shader.color_at(f64::from(x) + 0.5, f64::from(y) + 0.5);
            data.extend_from_slice(&c.to_array());
        }
    }
    log::debug!("rendered {} gradient at {width}x{height}", config.kind);
    Ok(Pixmap { width, height, data })
}

/// Byte length of a `width` x `height` RGBA8 buffer, if within limits.
fn buffer_len(width: u32, height: u32) -> Option<usize> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return None;
    }
    (width as usize).checked_mul(height as usize)?.checked_mul(4)
}
