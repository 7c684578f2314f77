use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ir::PortStatus;

/// Fill colors for the three port statuses, used for the corner
/// indicator dots and the status legend entries.
pub const STATUS_UP_COLOR: &str = "#2ecc71";
pub const STATUS_DOWN_COLOR: &str = "#e74c3c";
pub const STATUS_DISABLED_COLOR: &str = "#000000";

pub fn status_color(status: PortStatus) -> &'static str {
    match status {
        PortStatus::Up => STATUS_UP_COLOR,
        PortStatus::Down => STATUS_DOWN_COLOR,
        PortStatus::Disabled => STATUS_DISABLED_COLOR,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub text_color: String,
    pub body_color: String,
    pub body_border_color: String,
    pub body_border_width: f32,
    pub port_label_color: String,
    pub port_border_color: String,
    /// VLAN id to fill color. Ports on a VLAN without an entry fall back
    /// to the VLAN 1 color.
    pub vlan_colors: BTreeMap<u32, String>,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            font_family: "Arial".to_string(),
            background: "#2c3e50".to_string(),
            text_color: "#ffffff".to_string(),
            body_color: "#3c4e60".to_string(),
            body_border_color: "#000000".to_string(),
            body_border_width: 2.0,
            port_label_color: "#ffffff".to_string(),
            port_border_color: "#000000".to_string(),
            vlan_colors: default_vlan_colors(),
        }
    }

    pub fn light() -> Self {
        Self {
            font_family: "Arial".to_string(),
            background: "#d3d3d3".to_string(),
            text_color: "#000000".to_string(),
            body_color: "#c0c0c0".to_string(),
            body_border_color: "#000000".to_string(),
            body_border_width: 2.0,
            port_label_color: "#ffffff".to_string(),
            port_border_color: "#000000".to_string(),
            vlan_colors: default_vlan_colors(),
        }
    }

    pub fn vlan_color(&self, vlan: u32) -> &str {
        self.vlan_colors
            .get(&vlan)
            .or_else(|| self.vlan_colors.get(&1))
            .map(String::as_str)
            .unwrap_or(DEFAULT_VLAN_COLOR)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// VLAN 1 blue, used whenever a VLAN has no color of its own.
pub const DEFAULT_VLAN_COLOR: &str = "#3498db";

pub fn default_vlan_colors() -> BTreeMap<u32, String> {
    [
        (1, DEFAULT_VLAN_COLOR),  // Default VLAN - blue
        (10, "#2ecc71"),          // Green
        (20, "#e74c3c"),          // Red
        (30, "#f39c12"),          // Orange
        (40, "#9b59b6"),          // Purple
        (50, "#1abc9c"),          // Turquoise
        (100, "#34495e"),         // Dark blue
        (200, "#7f8c8d"),         // Gray
    ]
    .into_iter()
    .map(|(id, color)| (id, color.to_string()))
    .collect()
}
