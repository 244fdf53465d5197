//! CSS text produced from a [`GradientConfig`].

use std::fmt;

use crate::model::{ColorStop, GradientConfig, GradientKind};

/// Title used for share payloads.
pub const SHARE_TITLE: &str = "Gradient Studio";

/// Renders `config` as a CSS `background-image` value.
///
/// Stops appear in sequence order, never sorted by position. Zero or one stop
/// yields degenerate but well-formed text rather than an error.
///
/// ```rust
/// use spektra_core::{css, ColorStop, GradientConfig, GradientKind, StopId};
///
/// let cfg = GradientConfig {
///     kind: GradientKind::Conic,
///     angle: 45.0,
///     center_x: 50.0,
///     center_y: 50.0,
///     color_stops: vec![
///         ColorStop::new(StopId::from("a"), "#000", 0.0),
///         ColorStop::new(StopId::from("b"), "#fff", 100.0),
///     ],
/// };
/// assert_eq!(css::serialize(&cfg), "conic-gradient(from 45deg at 50% 50%, #000 0%, #fff 100%)");
/// ```
pub fn serialize(config: &GradientConfig) -> String {
    let stops = stop_list(&config.color_stops);
    let angle = Num(config.angle);
    let (cx, cy) = (Num(config.center_x), Num(config.center_y));

    match config.kind {
        GradientKind::Linear => format!("linear-gradient({angle}deg, {stops})"),
        GradientKind::Radial => format!("radial-gradient(circle at {cx}% {cy}%, {stops})"),
        GradientKind::Conic => format!("conic-gradient(from {angle}deg at {cx}% {cy}%, {stops})"),
    }
}

/// `"<color> <position>%"` terms joined with `", "`.
pub fn stop_list(stops: &[ColorStop]) -> String {
    stops
        .iter()
        .map(|s| format!("{} {}%", s.color, Num(s.position)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Text placed on the clipboard: a complete CSS declaration.
pub fn copy_payload(css: &str) -> String {
    format!("background: {css};")
}

/// Content handed to a share target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

impl SharePayload {
    pub fn new(css: &str) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: format!("Check out this beautiful gradient!\nCSS: {}", copy_payload(css)),
        }
    }
}

/// Plain decimal form of a number: `90`, `12.5`, `-30`.
///
/// No rounding is applied. Negative zero prints as `0` so a slider dragged
/// back to the origin never emits `-0deg`.
#[derive(Debug, Copy, Clone)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            f.write_str("0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
