use serde::Serialize;

/// Final canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CanvasGeom {
    pub width: f32,
    pub height: f32,
}

/// The rounded switch chassis rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyGeom {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Corner status dot on a port.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorGeom {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortGeom {
    /// Internal 1-based port number; regular ports first, SFP after.
    pub number: u32,
    pub is_sfp: bool,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rx: f32,
    pub ry: f32,
    /// Fill color, always resolved from the port's VLAN.
    pub color: String,
    pub label: String,
    pub label_x: f32,
    pub label_y: f32,
    pub tooltip: String,
    pub indicator: Option<IndicatorGeom>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendShape {
    /// Filled square, used for VLAN entries.
    Swatch,
    /// Filled circle, used for port status entries.
    Dot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendItemGeom {
    pub shape: LegendShape,
    /// Top-left of the 10x10 marker cell; text starts at `x + 15`.
    pub x: f32,
    pub y: f32,
    /// Full item width (marker, text, padding) as packed into the row.
    pub width: f32,
    pub color: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendRowGeom {
    pub y: f32,
    pub items: Vec<LegendItemGeom>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendGeom {
    pub title_x: f32,
    pub title_y: f32,
    pub vlan_header_y: f32,
    pub vlan_rows: Vec<LegendRowGeom>,
    /// Present when the status section is rendered (4+ regular ports).
    pub status_header_y: Option<f32>,
    pub status_rows: Vec<LegendRowGeom>,
    /// Lowest pixel any legend glyph reaches; drives the canvas height.
    pub bottom: f32,
}

impl LegendGeom {
    pub fn rows(&self) -> impl Iterator<Item = &LegendRowGeom> {
        self.vlan_rows.iter().chain(self.status_rows.iter())
    }
}

/// Switch name and optional model line drawn on the chassis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderGeom {
    pub name: String,
    pub name_x: f32,
    pub name_y: f32,
    pub model: Option<String>,
    pub model_x: f32,
    pub model_y: f32,
}

/// A chassis LED (PWR, STATUS) with its text label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedGeom {
    pub label: String,
    pub color: String,
    pub circle_x: f32,
    pub circle_y: f32,
    pub radius: f32,
    pub text_x: f32,
    pub text_y: f32,
}

/// Non-fatal conditions the engine noted while laying out. Geometry is
/// still complete; rendering may clip or overlap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// The SFP block extends past the switch body's right edge.
    SfpOverflow { extent: f32, body_right: f32 },
}

impl std::fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SfpOverflow { extent, body_right } => write!(
                f,
                "SFP ports extend to x={extent:.1}, past the body edge at x={body_right:.1}"
            ),
        }
    }
}

/// The complete, immutable pixel geometry of one switch diagram.
/// Recomputed fresh on every call; consumed by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geometry {
    pub canvas: CanvasGeom,
    pub body: BodyGeom,
    pub background: String,
    pub header: HeaderGeom,
    pub leds: Vec<LedGeom>,
    pub ports: Vec<PortGeom>,
    pub legend: LegendGeom,
    pub warnings: Vec<LayoutWarning>,
}
