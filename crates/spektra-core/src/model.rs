use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::{StopId, StopIdGen};

/// Smallest stop count that produces a meaningful gradient.
///
/// Not enforced by the store; front ends use it to refuse removals.
pub const MIN_STOPS: usize = 2;

/// Position given to stops created by [`GradientStore::add_color_stop`](crate::GradientStore::add_color_stop).
pub const NEW_STOP_POSITION: f64 = 50.0;

// ── GradientKind ──────────────────────────────────────────────────────────

/// The three CSS gradient functions the editor can produce.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
    Conic,
}

impl GradientKind {
    pub const ALL: [GradientKind; 3] = [Self::Linear, Self::Radial, Self::Conic];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Radial => "radial",
            Self::Conic => "conic",
        }
    }

    /// CSS function name, e.g. `linear-gradient`.
    pub fn css_function(self) -> &'static str {
        match self {
            Self::Linear => "linear-gradient",
            Self::Radial => "radial-gradient",
            Self::Conic => "conic-gradient",
        }
    }

    /// Whether `angle` affects the output for this kind.
    pub fn uses_angle(self) -> bool {
        matches!(self, Self::Linear | Self::Conic)
    }

    /// Whether `center_x` / `center_y` affect the output for this kind.
    pub fn uses_center(self) -> bool {
        matches!(self, Self::Radial | Self::Conic)
    }
}

impl fmt::Display for GradientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no gradient kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown gradient type {:?} (expected linear, radial or conic)", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for GradientKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

// ── ColorStop ─────────────────────────────────────────────────────────────

/// A color at a percentage offset along the gradient.
///
/// `color` is any CSS color string and is echoed verbatim into the output.
/// `position` is expected in [0, 100] but is not clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub color: String,
    pub position: f64,
    pub id: StopId,
}

impl ColorStop {
    pub fn new(id: StopId, color: impl Into<String>, position: f64) -> Self {
        Self { color: color.into(), position, id }
    }
}

/// Partial update merged into an existing stop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopPatch {
    pub color: Option<String>,
    pub position: Option<f64>,
}

impl StopPatch {
    pub fn color(color: impl Into<String>) -> Self {
        Self { color: Some(color.into()), position: None }
    }

    pub fn position(position: f64) -> Self {
        Self { color: None, position: Some(position) }
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.position.is_none()
    }

    /// Returns `stop` with the patched fields replaced.
    #[must_use]
    pub fn apply(&self, stop: &ColorStop) -> ColorStop {
        ColorStop {
            color: self.color.clone().unwrap_or_else(|| stop.color.clone()),
            position: self.position.unwrap_or(stop.position),
            id: stop.id.clone(),
        }
    }
}

// ── GradientConfig ────────────────────────────────────────────────────────

/// Complete description of one gradient.
///
/// Field names serialize in the camelCase form used by saved gradients
/// (`type`, `centerX`, `colorStops`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientConfig {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    /// Degrees; used by linear and conic.
    pub angle: f64,
    /// Percent of the box width; used by radial and conic.
    pub center_x: f64,
    /// Percent of the box height; used by radial and conic.
    pub center_y: f64,
    /// Output order. Never sorted by position.
    pub color_stops: Vec<ColorStop>,
}

impl GradientConfig {
    pub const INITIAL_ANGLE: f64 = 90.0;
    pub const INITIAL_CENTER: f64 = 50.0;
    pub const INITIAL_STOPS: [(&'static str, f64); 2] = [("#FF0080", 0.0), ("#7928CA", 100.0)];

    /// The configuration every session starts with: a 90° linear blend from
    /// magenta to purple.
    pub fn initial(ids: &mut StopIdGen) -> Self {
        Self {
            kind: GradientKind::Linear,
            angle: Self::INITIAL_ANGLE,
            center_x: Self::INITIAL_CENTER,
            center_y: Self::INITIAL_CENTER,
            color_stops: Self::INITIAL_STOPS
                .iter()
                .map(|&(color, position)| ColorStop::new(ids.next_id(), color, position))
                .collect(),
        }
    }

    pub fn stop(&self, id: &StopId) -> Option<&ColorStop> {
        self.color_stops.iter().find(|s| &s.id == id)
    }

    pub fn stop_index(&self, id: &StopId) -> Option<usize> {
        self.color_stops.iter().position(|s| &s.id == id)
    }
}
