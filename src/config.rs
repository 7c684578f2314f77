use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ir::{LayoutMode, PortShape, SfpLayout, ZigzagStart};
use crate::theme::Theme;

/// A raw switch description as supplied by a caller. Construct one,
/// adjust fields, then call [`SwitchConfig::validate`] to obtain the
/// [`ValidatedConfig`] the layout engine accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    pub num_ports: u32,
    pub sfp_ports: u32,
    /// SFP-only switches carry no regular ports; `num_ports` is forced
    /// to zero and the SFP range widens to 4..=32.
    pub sfp_only_mode: bool,
    pub layout_mode: LayoutMode,
    pub sfp_layout: SfpLayout,
    pub port_width: f32,
    pub port_height: f32,
    pub port_spacing: f32,
    pub port_group_size: u32,
    pub port_group_spacing: f32,
    pub sfp_group_size: u32,
    pub switch_width: f32,
    pub switch_height: f32,
    pub port_start_number: u32,
    pub zigzag_start: ZigzagStart,
    pub port_shape: PortShape,
    pub show_status_indicator: bool,
    pub switch_name: String,
    pub model_name: String,
    pub legend_spacing: f32,
    pub legend_items_spacing: f32,
    pub legend_item_padding: f32,
    pub legend_row_offset: f32,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            num_ports: 24,
            sfp_ports: 0,
            sfp_only_mode: false,
            layout_mode: LayoutMode::Zigzag,
            sfp_layout: SfpLayout::Zigzag,
            port_width: 28.0,
            port_height: 28.0,
            port_spacing: 4.0,
            port_group_size: 0,
            port_group_spacing: 7.0,
            sfp_group_size: 0,
            switch_width: 800.0,
            switch_height: 130.0,
            port_start_number: 1,
            zigzag_start: ZigzagStart::Top,
            port_shape: PortShape::Square,
            show_status_indicator: true,
            switch_name: String::new(),
            model_name: String::new(),
            legend_spacing: 20.0,
            legend_items_spacing: 8.0,
            legend_item_padding: 3.0,
            legend_row_offset: 20.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("num_ports must be between 5 and 48, got {0}")]
    NumPorts(u32),
    #[error("sfp_ports must be between 0 and 6, got {0}")]
    SfpPorts(u32),
    #[error("in SFP-only mode, sfp_ports must be between 4 and 32, got {0}")]
    SfpOnlyPorts(u32),
    #[error("port_start_number must be 0 or 1, got {0}")]
    PortStartNumber(u32),
}

impl SwitchConfig {
    /// Normalize and range-check the description.
    ///
    /// Out-of-range port counts are rejected; size fields are clamped to
    /// their hard minimums instead (width 400, height 150, port sides
    /// 10, spacing 2). A missing switch name gets the conventional
    /// "<n>-Port Network Switch" / "<n>-Port SFP Switch" default.
    pub fn validate(mut self) -> Result<ValidatedConfig, ConfigError> {
        if self.sfp_only_mode {
            if !(4..=32).contains(&self.sfp_ports) {
                return Err(ConfigError::SfpOnlyPorts(self.sfp_ports));
            }
            self.num_ports = 0;
        } else {
            if !(5..=48).contains(&self.num_ports) {
                return Err(ConfigError::NumPorts(self.num_ports));
            }
            if self.sfp_ports > 6 {
                return Err(ConfigError::SfpPorts(self.sfp_ports));
            }
        }
        if self.port_start_number > 1 {
            return Err(ConfigError::PortStartNumber(self.port_start_number));
        }

        self.switch_width = self.switch_width.max(400.0);
        self.switch_height = self.switch_height.max(150.0);
        self.port_width = self.port_width.max(10.0);
        self.port_height = self.port_height.max(10.0);
        self.port_spacing = self.port_spacing.max(2.0);

        if self.switch_name.is_empty() {
            self.switch_name = if self.sfp_only_mode {
                format!("{}-Port SFP Switch", self.sfp_ports)
            } else {
                format!("{}-Port Network Switch", self.num_ports)
            };
        }

        Ok(ValidatedConfig(self))
    }
}

/// A [`SwitchConfig`] that passed validation. The layout engine only
/// accepts this type, so geometry is always computed over normalized,
/// in-range values.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedConfig(SwitchConfig);

impl std::ops::Deref for ValidatedConfig {
    type Target = SwitchConfig;

    fn deref(&self) -> &SwitchConfig {
        &self.0
    }
}

/// Fixed layout constants. These are the pixel conventions every
/// rendered switch shares; they are configuration rather than code so
/// that tests and alternative front ends can pin them explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between the canvas edge and the switch body on every side.
    pub canvas_margin: f32,
    /// Gap between the body edge and the nearest port, equal left and right.
    pub edge_margin: f32,
    /// Canvas x of the first port column.
    pub port_start_x: f32,
    /// Canvas y of the top port row.
    pub port_start_y: f32,
    /// Vertical gap between the two zigzag rows.
    pub row_spacing: f32,
    /// Gap between the last regular port and the first SFP port.
    pub sfp_gap: f32,
    pub sfp_width: f32,
    pub sfp_height: f32,
    pub legend_x: f32,
    pub legend_swatch_size: f32,
    /// Swatch-to-text offset inside one legend item.
    pub legend_text_offset: f32,
    pub legend_status_row_height: f32,
    pub legend_font_size: f32,
    pub legend_header_font_size: f32,
    /// Average legend item width used by the single-pass row estimate.
    pub legend_avg_item_width: f32,
    pub indicator_radius: f32,
    pub indicator_inset: f32,
    pub led_radius: f32,
    pub led_y: f32,
    pub led_text_y: f32,
    pub led_font_size: f32,
    pub led_edge_margin: f32,
    pub header_font_size: f32,
    pub model_font_size: f32,
    pub port_font_size: f32,
    pub min_canvas_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_margin: 10.0,
            edge_margin: 20.0,
            port_start_x: 30.0,
            port_start_y: 70.0,
            row_spacing: 4.0,
            sfp_gap: 20.0,
            sfp_width: 40.0,
            sfp_height: 20.0,
            legend_x: 30.0,
            legend_swatch_size: 10.0,
            legend_text_offset: 15.0,
            legend_status_row_height: 25.0,
            legend_font_size: 10.0,
            legend_header_font_size: 11.0,
            legend_avg_item_width: 150.0,
            indicator_radius: 3.0,
            indicator_inset: 5.0,
            led_radius: 5.0,
            led_y: 30.0,
            led_text_y: 35.0,
            led_font_size: 12.0,
            led_edge_margin: 12.0,
            header_font_size: 16.0,
            model_font_size: 12.0,
            port_font_size: 10.0,
            min_canvas_height: 240.0,
        }
    }
}

/// Hard floor for degenerate small switches. Anything at or below the
/// minimum configuration (10 regular + 1 SFP, or 4 SFP in SFP-only
/// mode) renders at these fixed widths instead of the narrower value
/// the running sum would produce.
#[derive(Debug, Clone, Copy)]
pub struct MinBodyFloor {
    pub sfp_only: bool,
    pub body_width: f32,
    pub canvas_width: f32,
}

pub const MIN_BODY_FLOORS: [MinBodyFloor; 2] = [
    MinBodyFloor {
        sfp_only: false,
        body_width: 260.0,
        canvas_width: 280.0,
    },
    MinBodyFloor {
        sfp_only: true,
        body_width: 260.0,
        canvas_width: 280.0,
    },
];

pub fn min_body_floor(sfp_only: bool) -> MinBodyFloor {
    MIN_BODY_FLOORS
        .iter()
        .copied()
        .find(|floor| floor.sfp_only == sfp_only)
        .unwrap_or(MIN_BODY_FLOORS[0])
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Raster scale factor for PNG output.
    pub png_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { png_scale: 1.0 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConfigFile {
    theme: Option<String>,
    vlan_colors: Option<std::collections::BTreeMap<u32, String>>,
    layout: Option<LayoutConfig>,
    render: Option<RenderConfig>,
}

/// Load overrides from a JSON config file; absent path means defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "dark" => config.theme = Theme::dark(),
            "light" => config.theme = Theme::light(),
            other => anyhow::bail!("unknown theme {other:?} (expected \"dark\" or \"light\")"),
        }
    }
    if let Some(vlan_colors) = parsed.vlan_colors {
        config.theme.vlan_colors.extend(vlan_colors);
    }
    if let Some(layout) = parsed.layout {
        config.layout = layout;
    }
    if let Some(render) = parsed.render {
        config.render = render;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = SwitchConfig::default().validate().expect("default config");
        assert_eq!(config.num_ports, 24);
        assert_eq!(config.switch_name, "24-Port Network Switch");
        // Requested 130 is below the hard minimum and gets clamped.
        assert_eq!(config.switch_height, 150.0);
    }

    #[test]
    fn rejects_out_of_range_port_counts() {
        let too_few = SwitchConfig {
            num_ports: 4,
            ..Default::default()
        };
        assert!(matches!(too_few.validate(), Err(ConfigError::NumPorts(4))));

        let too_many_sfp = SwitchConfig {
            sfp_ports: 7,
            ..Default::default()
        };
        assert!(matches!(
            too_many_sfp.validate(),
            Err(ConfigError::SfpPorts(7))
        ));
    }

    #[test]
    fn sfp_only_mode_forces_num_ports_to_zero() {
        let config = SwitchConfig {
            sfp_only_mode: true,
            sfp_ports: 8,
            num_ports: 24,
            ..Default::default()
        }
        .validate()
        .expect("sfp-only config");
        assert_eq!(config.num_ports, 0);
        assert_eq!(config.switch_name, "8-Port SFP Switch");
    }

    #[test]
    fn sfp_only_mode_has_its_own_range() {
        let config = SwitchConfig {
            sfp_only_mode: true,
            sfp_ports: 3,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SfpOnlyPorts(3))
        ));
    }

    #[test]
    fn port_start_number_must_be_zero_or_one() {
        let config = SwitchConfig {
            port_start_number: 2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PortStartNumber(2))
        ));
    }

    #[test]
    fn size_fields_clamp_instead_of_failing() {
        let config = SwitchConfig {
            switch_width: 100.0,
            switch_height: 50.0,
            port_width: 1.0,
            port_spacing: 0.0,
            ..Default::default()
        }
        .validate()
        .expect("clamped config");
        assert_eq!(config.switch_width, 400.0);
        assert_eq!(config.switch_height, 150.0);
        assert_eq!(config.port_width, 10.0);
        assert_eq!(config.port_spacing, 2.0);
    }

    #[test]
    fn floor_table_covers_both_modes() {
        assert_eq!(min_body_floor(false).canvas_width, 280.0);
        assert_eq!(min_body_floor(true).body_width, 260.0);
    }
}
