use crate::config::{LayoutConfig, ValidatedConfig};
use crate::text_metrics::TextMeasure;
use crate::theme::{STATUS_DISABLED_COLOR, STATUS_DOWN_COLOR, STATUS_UP_COLOR, Theme};

use super::types::{LegendGeom, LegendItemGeom, LegendRowGeom, LegendShape};

/// Display names for well-known VLAN ids, appended after the id in the
/// legend entry ("10, Administration").
fn vlan_display_name(id: u32) -> Option<&'static str> {
    match id {
        1 => Some("Default"),
        5 => Some("Internet Uplink"),
        10 => Some("Administration"),
        20 => Some("Servere"),
        30 => Some("Netværksudstyr"),
        40 => Some("Kamera netværk"),
        50 => Some("Video Klienter"),
        51 => Some("GODIK"),
        60 => Some("Almindelige klienter"),
        70 => Some("Internet / Media"),
        80 => Some("Guest Network"),
        99 => Some("Trunk"),
        _ => None,
    }
}

fn vlan_label(id: u32) -> String {
    match vlan_display_name(id) {
        Some(name) => format!("{id}, {name}"),
        None => id.to_string(),
    }
}

/// Greedy first-fit packing of legend items into width-constrained rows.
///
/// An item wraps when its right edge would pass the available width,
/// unless it is the first item of its row; a single item wider than the
/// row is placed anyway.
#[allow(clippy::too_many_arguments)]
fn pack_items(
    items: &[(String, String)],
    shape: LegendShape,
    start_x: f32,
    start_y: f32,
    available_width: f32,
    row_advance: f32,
    text_offset: f32,
    item_padding: f32,
    font_size: f32,
    font_family: &str,
    measure: &dyn TextMeasure,
) -> (Vec<LegendRowGeom>, f32) {
    let mut rows: Vec<LegendRowGeom> = Vec::new();
    let mut current_x = start_x;
    let mut row_y = start_y;
    let mut current_row: Vec<LegendItemGeom> = Vec::new();

    for (label, color) in items {
        let text_width = measure.width(label, font_size, font_family);
        let item_width = text_offset + text_width + item_padding;

        if current_x + item_width > start_x + available_width && !current_row.is_empty() {
            rows.push(LegendRowGeom {
                y: row_y,
                items: std::mem::take(&mut current_row),
            });
            row_y += row_advance;
            current_x = start_x;
        }

        current_row.push(LegendItemGeom {
            shape,
            x: current_x,
            y: row_y,
            width: item_width,
            color: color.clone(),
            label: label.clone(),
        });
        current_x += item_width;
    }

    if !current_row.is_empty() {
        rows.push(LegendRowGeom {
            y: row_y,
            items: current_row,
        });
    }

    (rows, row_y)
}

/// Lay out the wrapped legend below the switch body: the title, the
/// VLAN section (squares, ids ascending), and the status section
/// (circles). Once the switch has 4 or more regular ports the status
/// section always carries all three entries, whether or not every
/// status is assigned.
pub fn layout_legend(
    config: &ValidatedConfig,
    layout: &LayoutConfig,
    used_vlans: &std::collections::BTreeSet<u32>,
    theme: &Theme,
    body_width: f32,
    measure: &dyn TextMeasure,
) -> LegendGeom {
    let legend_x = layout.legend_x;
    let available_width = body_width - 2.0 * legend_x + 20.0;

    let switch_bottom = config.switch_height - layout.canvas_margin;
    let title_y = switch_bottom + config.legend_spacing;
    let vlan_header_y = title_y + config.legend_items_spacing + 3.0;
    let vlan_items_y = vlan_header_y + config.legend_items_spacing;

    let vlan_items: Vec<(String, String)> = used_vlans
        .iter()
        .map(|&id| (vlan_label(id), theme.vlan_color(id).to_string()))
        .collect();

    let (vlan_rows, last_vlan_y) = pack_items(
        &vlan_items,
        LegendShape::Swatch,
        legend_x,
        vlan_items_y,
        available_width,
        config.legend_row_offset,
        layout.legend_text_offset,
        config.legend_item_padding,
        layout.legend_font_size,
        &theme.font_family,
        measure,
    );

    let mut status_header_y = None;
    let mut status_rows = Vec::new();
    let mut bottom = last_vlan_y + layout.legend_swatch_size;

    if config.num_ports >= 4 {
        let header_y = last_vlan_y + layout.legend_status_row_height;
        status_header_y = Some(header_y);
        let status_items = vec![
            ("Port up".to_string(), STATUS_UP_COLOR.to_string()),
            ("Port down".to_string(), STATUS_DOWN_COLOR.to_string()),
            ("Port disabled".to_string(), STATUS_DISABLED_COLOR.to_string()),
        ];
        let (rows, last_status_y) = pack_items(
            &status_items,
            LegendShape::Dot,
            legend_x,
            header_y + config.legend_items_spacing,
            available_width,
            layout.legend_status_row_height,
            layout.legend_text_offset,
            config.legend_item_padding,
            layout.legend_font_size,
            &theme.font_family,
            measure,
        );
        status_rows = rows;
        bottom = last_status_y + layout.legend_swatch_size;
    }

    LegendGeom {
        title_x: legend_x,
        title_y,
        vlan_header_y,
        vlan_rows,
        status_header_y,
        status_rows,
        bottom,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwitchConfig;
    use crate::text_metrics::ApproxMeasure;
    use std::collections::BTreeSet;

    fn validated(config: SwitchConfig) -> ValidatedConfig {
        config.validate().expect("test config")
    }

    fn legend_for(config: &ValidatedConfig, vlans: &[u32], body_width: f32) -> LegendGeom {
        let used: BTreeSet<u32> = vlans.iter().copied().collect();
        layout_legend(
            config,
            &LayoutConfig::default(),
            &used,
            &Theme::dark(),
            body_width,
            &ApproxMeasure,
        )
    }

    #[test]
    fn rows_respect_the_available_width() {
        let config = validated(SwitchConfig::default());
        let vlans: Vec<u32> = (1..=15).map(|n| n * 7).collect();
        let legend = legend_for(&config, &vlans, 260.0);

        let available = 260.0 - 2.0 * 30.0 + 20.0;
        for row in legend.rows() {
            let total: f32 = row.items.iter().map(|item| item.width).sum();
            if row.items.len() > 1 {
                assert!(
                    total <= available + 0.001,
                    "row of {} items is {total}px wide, limit {available}px",
                    row.items.len()
                );
            }
        }
    }

    #[test]
    fn many_vlans_on_a_narrow_body_wrap_to_multiple_rows() {
        let config = validated(SwitchConfig::default());
        let vlans: Vec<u32> = (1..=15).collect();
        let legend = legend_for(&config, &vlans, 260.0);
        assert!(legend.vlan_rows.len() >= 2);

        // Distinct rows sit at distinct heights.
        let mut ys: Vec<f32> = legend.vlan_rows.iter().map(|row| row.y).collect();
        ys.dedup();
        assert_eq!(ys.len(), legend.vlan_rows.len());
    }

    #[test]
    fn status_section_is_complete_for_four_or_more_ports() {
        let config = validated(SwitchConfig {
            num_ports: 5,
            ..Default::default()
        });
        let legend = legend_for(&config, &[1], 440.0);
        let labels: Vec<&str> = legend
            .status_rows
            .iter()
            .flat_map(|row| row.items.iter().map(|item| item.label.as_str()))
            .collect();
        assert_eq!(labels, vec!["Port up", "Port down", "Port disabled"]);
        assert!(legend.status_header_y.is_some());
        assert!(
            legend
                .status_rows
                .iter()
                .flat_map(|row| row.items.iter())
                .all(|item| item.shape == LegendShape::Dot)
        );
    }

    #[test]
    fn sfp_only_switch_has_no_status_section() {
        let config = validated(SwitchConfig {
            sfp_only_mode: true,
            sfp_ports: 8,
            ..Default::default()
        });
        let legend = legend_for(&config, &[1], 440.0);
        assert!(legend.status_rows.is_empty());
        assert!(legend.status_header_y.is_none());
    }

    #[test]
    fn vlan_entries_are_sorted_and_named() {
        let config = validated(SwitchConfig::default());
        let legend = legend_for(&config, &[99, 1, 20], 440.0);
        let labels: Vec<&str> = legend
            .vlan_rows
            .iter()
            .flat_map(|row| row.items.iter().map(|item| item.label.as_str()))
            .collect();
        assert_eq!(labels, vec!["1, Default", "20, Servere", "99, Trunk"]);
    }

    #[test]
    fn an_item_wider_than_the_row_still_gets_placed() {
        let items = vec![(
            "a very very very long legend label that fits nowhere".to_string(),
            "#123456".to_string(),
        )];
        let (rows, _) = pack_items(
            &items,
            LegendShape::Swatch,
            30.0,
            100.0,
            50.0,
            20.0,
            15.0,
            3.0,
            10.0,
            "Arial",
            &ApproxMeasure,
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].items.len(), 1);
        assert_eq!(rows[0].items[0].x, 30.0);
    }

    #[test]
    fn packing_depends_only_on_returned_widths() {
        // A second measurer returning the same numbers must produce the
        // same row assignment.
        struct Doubler;
        impl crate::text_metrics::TextMeasure for Doubler {
            fn width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
                ApproxMeasure.width(text, font_size, font_family)
            }
        }

        let config = validated(SwitchConfig::default());
        let used: BTreeSet<u32> = (1..=12).collect();
        let layout = LayoutConfig::default();
        let theme = Theme::dark();
        let a = layout_legend(&config, &layout, &used, &theme, 300.0, &ApproxMeasure);
        let b = layout_legend(&config, &layout, &used, &theme, 300.0, &Doubler);
        assert_eq!(a, b);
    }
}
