use crate::config::{LayoutConfig, ValidatedConfig};
use crate::ir::{LayoutMode, PortAssignment, PortShape, SfpLayout, ZigzagStart};
use crate::theme::{Theme, status_color};

use super::color::port_color;
use super::dimensions::{regular_column_x, sfp_right, sfp_x};
use super::types::{IndicatorGeom, LayoutWarning, PortGeom};

fn corner_radii(config: &ValidatedConfig) -> (f32, f32) {
    match config.port_shape {
        PortShape::Square => (0.0, 0.0),
        PortShape::Rounded => (2.0, 2.0),
        PortShape::Circular => {
            let radius = (config.port_width.min(config.port_height) / 2.0).floor();
            (radius, radius)
        }
    }
}

fn zigzag_row(config: &ValidatedConfig, index: u32) -> u32 {
    match config.zigzag_start {
        ZigzagStart::Top => index % 2,
        ZigzagStart::Bottom => (index + 1) % 2,
    }
}

fn indicator(
    config: &ValidatedConfig,
    layout: &LayoutConfig,
    x: f32,
    y: f32,
    width: f32,
    color: &'static str,
) -> Option<IndicatorGeom> {
    if !config.show_status_indicator {
        return None;
    }
    Some(IndicatorGeom {
        x: x + width - layout.indicator_inset,
        y: y + layout.indicator_inset,
        radius: layout.indicator_radius,
        color: color.to_string(),
    })
}

/// Place every regular and SFP port.
///
/// Regular ports come first, numbered 1..=num_ports; SFP ports continue
/// the sequence. `body_right` is the body's right edge on the canvas;
/// an SFP block reaching past it is reported as a warning, never
/// reflowed.
pub fn place_ports(
    config: &ValidatedConfig,
    layout: &LayoutConfig,
    assignment: &PortAssignment,
    theme: &Theme,
    body_right: f32,
) -> (Vec<PortGeom>, Vec<LayoutWarning>) {
    let mut ports = Vec::with_capacity((config.num_ports + config.sfp_ports) as usize);
    let mut warnings = Vec::new();
    let (rx, ry) = corner_radii(config);
    let row_step = config.port_height + layout.row_spacing;

    for i in 0..config.num_ports {
        let (x, y) = match config.layout_mode {
            LayoutMode::SingleRow => (regular_column_x(config, layout, i), layout.port_start_y),
            LayoutMode::Zigzag => {
                let row = zigzag_row(config, i);
                let col = i / 2;
                (
                    regular_column_x(config, layout, col),
                    layout.port_start_y + row as f32 * row_step,
                )
            }
        };

        let number = i + 1;
        let display = i + config.port_start_number;
        let label = assignment
            .label_for(number)
            .map(str::to_string)
            .unwrap_or_else(|| display.to_string());
        let status = assignment.status_for(number);
        let vlan = assignment.vlan_for(number);
        let color = port_color(number, assignment, theme);

        ports.push(PortGeom {
            number,
            is_sfp: false,
            x,
            y,
            width: config.port_width,
            height: config.port_height,
            rx,
            ry,
            color,
            label_x: x + config.port_width / 2.0,
            label_y: y + config.port_height / 2.0 + 4.0,
            tooltip: format!(
                "Port: {number}, Label: {label}, Status: {}, VLAN: {vlan}",
                status.as_str()
            ),
            label,
            indicator: indicator(config, layout, x, y, config.port_width, status_color(status)),
        });
    }

    // SFP ports continue the numbering after the regular block.
    for j in 0..config.sfp_ports {
        let (x, y) = match config.sfp_layout {
            SfpLayout::Horizontal => {
                let y = match config.layout_mode {
                    LayoutMode::SingleRow => layout.port_start_y,
                    // Aligned with the bottom zigzag row.
                    LayoutMode::Zigzag => layout.port_start_y + row_step,
                };
                (sfp_x(config, layout, j), y)
            }
            SfpLayout::Zigzag => {
                let row = zigzag_row(config, j);
                let col = j / 2;
                let y = match config.layout_mode {
                    LayoutMode::SingleRow => layout.port_start_y,
                    LayoutMode::Zigzag => layout.port_start_y + row as f32 * row_step,
                };
                (sfp_x(config, layout, col), y)
            }
        };

        let number = config.num_ports + j + 1;
        let display = j + config.port_start_number;
        let label = assignment
            .label_for(number)
            .map(str::to_string)
            .unwrap_or_else(|| format!("SFP{display}"));
        let status = assignment.status_for(number);
        let vlan = assignment.vlan_for(number);
        let color = port_color(number, assignment, theme);

        ports.push(PortGeom {
            number,
            is_sfp: true,
            x,
            y,
            width: layout.sfp_width,
            height: layout.sfp_height,
            rx: 2.0,
            ry: 2.0,
            color,
            label_x: x + layout.sfp_width / 2.0,
            label_y: y + layout.sfp_height / 2.0 + 4.0,
            tooltip: format!("SFP Port: {number}, Label: {label}, VLAN: {vlan}"),
            label,
            indicator: indicator(config, layout, x, y, layout.sfp_width, status_color(status)),
        });
    }

    if let Some(extent) = sfp_right(config, layout)
        && extent > body_right + 0.001
    {
        let warning = LayoutWarning::SfpOverflow {
            extent,
            body_right,
        };
        tracing::warn!(%warning, "SFP ports exceed the switch body; geometry is kept as computed");
        warnings.push(warning);
    }

    (ports, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwitchConfig;
    use crate::ir::PortStatus;

    fn validated(config: SwitchConfig) -> ValidatedConfig {
        config.validate().expect("test config")
    }

    fn place(config: &ValidatedConfig) -> Vec<PortGeom> {
        let layout = LayoutConfig::default();
        let (ports, _) = place_ports(
            config,
            &layout,
            &PortAssignment::new(),
            &Theme::dark(),
            10_000.0,
        );
        ports
    }

    #[test]
    fn zigzag_alternates_rows_and_walks_columns() {
        let config = validated(SwitchConfig {
            num_ports: 24,
            ..Default::default()
        });
        let ports = place(&config);
        let layout = LayoutConfig::default();

        // Port 1 top of column 0, port 2 below it, port 3 top of column 1.
        assert_eq!(ports[0].y, layout.port_start_y);
        assert_eq!(ports[1].x, ports[0].x);
        assert!(ports[1].y > ports[0].y);
        assert_eq!(ports[2].y, ports[0].y);
        assert!(ports[2].x > ports[0].x);
    }

    #[test]
    fn zigzag_bottom_start_flips_the_parity() {
        let config = validated(SwitchConfig {
            num_ports: 8,
            zigzag_start: ZigzagStart::Bottom,
            ..Default::default()
        });
        let ports = place(&config);
        assert!(ports[0].y > ports[1].y);
    }

    #[test]
    fn single_row_keeps_one_y() {
        let config = validated(SwitchConfig {
            num_ports: 8,
            layout_mode: LayoutMode::SingleRow,
            ..Default::default()
        });
        let ports = place(&config);
        let y = ports[0].y;
        assert!(ports.iter().all(|port| port.y == y));
        for pair in ports.windows(2) {
            assert!(pair[1].x > pair[0].x);
        }
    }

    #[test]
    fn numbering_is_strictly_increasing_with_sfp_after_regular() {
        let config = validated(SwitchConfig {
            num_ports: 8,
            sfp_ports: 2,
            layout_mode: LayoutMode::SingleRow,
            sfp_layout: SfpLayout::Horizontal,
            ..Default::default()
        });
        let ports = place(&config);
        assert_eq!(ports.len(), 10);
        for (idx, port) in ports.iter().enumerate() {
            assert_eq!(port.number, idx as u32 + 1);
        }
        assert!(ports[..8].iter().all(|port| !port.is_sfp));
        assert!(ports[8..].iter().all(|port| port.is_sfp));
    }

    #[test]
    fn horizontal_sfp_shares_the_single_row_y() {
        let config = validated(SwitchConfig {
            num_ports: 8,
            sfp_ports: 2,
            layout_mode: LayoutMode::SingleRow,
            sfp_layout: SfpLayout::Horizontal,
            ..Default::default()
        });
        let ports = place(&config);
        assert_eq!(ports[8].y, ports[0].y);
        // SFP block starts one gap after the last regular port.
        let layout = LayoutConfig::default();
        let last_regular = &ports[7];
        assert_eq!(ports[8].x, last_regular.x + last_regular.width + layout.sfp_gap);
    }

    #[test]
    fn sfp_only_mode_starts_at_the_regular_origin() {
        let config = validated(SwitchConfig {
            sfp_only_mode: true,
            sfp_ports: 4,
            ..Default::default()
        });
        let ports = place(&config);
        let layout = LayoutConfig::default();
        assert_eq!(ports.len(), 4);
        assert_eq!(ports[0].x, layout.port_start_x);
        assert_eq!(ports[0].number, 1);
    }

    #[test]
    fn start_number_shifts_labels_but_not_numbers() {
        let config = validated(SwitchConfig {
            num_ports: 5,
            sfp_ports: 1,
            port_start_number: 0,
            ..Default::default()
        });
        let ports = place(&config);
        assert_eq!(ports[0].number, 1);
        assert_eq!(ports[0].label, "0");
        assert_eq!(ports[4].label, "4");
        assert_eq!(ports[5].label, "SFP0");
        assert_eq!(ports[5].number, 6);
    }

    #[test]
    fn indicator_reflects_status_without_touching_fill() {
        let mut assignment = PortAssignment::new();
        assignment.set_status(2, PortStatus::Down);
        let config = validated(SwitchConfig {
            num_ports: 8,
            ..Default::default()
        });
        let layout = LayoutConfig::default();
        let (ports, _) = place_ports(&config, &layout, &assignment, &Theme::dark(), 10_000.0);
        let port = &ports[1];
        let indicator = port.indicator.as_ref().expect("indicator present");
        assert_eq!(indicator.color, "#e74c3c");
        assert_eq!(port.color, crate::theme::DEFAULT_VLAN_COLOR);
        assert_eq!(indicator.x, port.x + port.width - layout.indicator_inset);
    }

    #[test]
    fn indicators_can_be_disabled() {
        let config = validated(SwitchConfig {
            num_ports: 8,
            show_status_indicator: false,
            ..Default::default()
        });
        let ports = place(&config);
        assert!(ports.iter().all(|port| port.indicator.is_none()));
    }

    #[test]
    fn overflowing_sfp_block_warns_but_still_places() {
        let config = validated(SwitchConfig {
            num_ports: 24,
            sfp_ports: 6,
            sfp_layout: SfpLayout::Horizontal,
            ..Default::default()
        });
        let layout = LayoutConfig::default();
        // Deliberately narrow body edge to exercise the warning path.
        let (ports, warnings) = place_ports(
            &config,
            &layout,
            &PortAssignment::new(),
            &Theme::dark(),
            300.0,
        );
        assert_eq!(ports.len(), 30);
        assert!(matches!(
            warnings.as_slice(),
            [LayoutWarning::SfpOverflow { .. }]
        ));
    }
}
