//! Layout engine: turns a validated switch description into the pixel
//! geometry of the finished diagram. Pure and deterministic; the only
//! outside dependency is the injected text measurer.

mod color;
mod dimensions;
mod legend;
mod ports;
mod types;

pub use dimensions::{Dimensions, calculate_dimensions};
pub use legend::layout_legend;
pub use ports::place_ports;
pub use types::{
    BodyGeom, CanvasGeom, Geometry, HeaderGeom, IndicatorGeom, LayoutWarning, LedGeom,
    LegendGeom, LegendItemGeom, LegendRowGeom, LegendShape, PortGeom,
};

use crate::config::{LayoutConfig, ValidatedConfig};
use crate::ir::PortAssignment;
use crate::text_metrics::TextMeasure;
use crate::theme::{STATUS_UP_COLOR, Theme};

const STATUS_LED_COLOR: &str = "#f1c40f";

fn header(config: &ValidatedConfig) -> HeaderGeom {
    HeaderGeom {
        name: config.switch_name.clone(),
        name_x: 30.0,
        name_y: 40.0,
        model: (!config.model_name.is_empty()).then(|| config.model_name.clone()),
        model_x: 30.0,
        model_y: 60.0,
    }
}

/// Chassis LEDs in the top-right corner. PWR is always present; a
/// STATUS LED joins it once the switch has more than 10 regular ports.
fn leds(
    config: &ValidatedConfig,
    layout: &LayoutConfig,
    body_right: f32,
    font_family: &str,
    measure: &dyn TextMeasure,
) -> Vec<LedGeom> {
    let pwr_width = measure.width("PWR", layout.led_font_size, font_family);
    let pwr_text_x = body_right - pwr_width - layout.led_edge_margin;
    let pwr_circle_x = pwr_text_x - 10.0;

    let mut leds = vec![LedGeom {
        label: "PWR".to_string(),
        color: STATUS_UP_COLOR.to_string(),
        circle_x: pwr_circle_x,
        circle_y: layout.led_y,
        radius: layout.led_radius,
        text_x: pwr_text_x,
        text_y: layout.led_text_y,
    }];

    if config.num_ports > 10 {
        let circle_x = pwr_circle_x - 50.0 - 15.0;
        leds.insert(
            0,
            LedGeom {
                label: "STATUS".to_string(),
                color: STATUS_LED_COLOR.to_string(),
                circle_x,
                circle_y: layout.led_y,
                radius: layout.led_radius,
                text_x: circle_x + 10.0,
                text_y: layout.led_text_y,
            },
        );
    }

    leds
}

/// Lay out the full diagram.
///
/// Every call recomputes from scratch; identical inputs give identical
/// geometry. The canvas height is taken from the legend's real bottom
/// edge, not the row estimate in [`calculate_dimensions`].
pub fn compute_geometry(
    config: &ValidatedConfig,
    assignment: &PortAssignment,
    theme: &Theme,
    layout: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> Geometry {
    let used_vlans = assignment.used_vlans();
    let used_statuses = assignment.used_statuses();
    let dims = calculate_dimensions(config, layout, used_vlans.len(), used_statuses.len());

    let body_right = layout.canvas_margin + dims.body_width;
    let (ports, warnings) = place_ports(config, layout, assignment, theme, body_right);
    let legend = layout_legend(config, layout, &used_vlans, theme, dims.body_width, measure);

    let canvas_height = (legend.bottom + 20.0).max(layout.min_canvas_height);

    Geometry {
        canvas: CanvasGeom {
            width: dims.canvas_width,
            height: canvas_height,
        },
        body: BodyGeom {
            x: layout.canvas_margin,
            y: layout.canvas_margin,
            width: dims.body_width,
            height: config.switch_height - 2.0 * layout.canvas_margin,
        },
        background: theme.background.clone(),
        header: header(config),
        leds: leds(config, layout, body_right, &theme.font_family, measure),
        ports,
        legend,
        warnings,
    }
}
