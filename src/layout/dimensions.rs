use crate::config::{LayoutConfig, ValidatedConfig, min_body_floor};
use crate::ir::{LayoutMode, SfpLayout};

/// Canvas and body sizing for one switch.
///
/// `canvas_height` is the single-pass estimate from the average-item
/// heuristic; the assembler replaces it with the height derived from the
/// legend engine's actual rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub body_width: f32,
    pub ports_per_row: u32,
    pub num_rows: u32,
}

/// Extra x shift from group separators left of the given column/index.
pub(super) fn group_extra(group_size: u32, group_spacing: f32, unit: u32) -> f32 {
    if group_size == 0 {
        return 0.0;
    }
    (unit / group_size) as f32 * group_spacing
}

pub(super) fn regular_columns(config: &ValidatedConfig) -> u32 {
    match config.layout_mode {
        LayoutMode::SingleRow => config.num_ports,
        LayoutMode::Zigzag => config.num_ports.div_ceil(2),
    }
}

/// x of the regular-port column. Zigzag grouping counts columns, so the
/// configured per-port group size is halved (two ports per column).
pub(super) fn regular_column_x(config: &ValidatedConfig, layout: &LayoutConfig, col: u32) -> f32 {
    let step = config.port_width + config.port_spacing;
    let extra = match config.layout_mode {
        LayoutMode::SingleRow => {
            group_extra(config.port_group_size, config.port_group_spacing, col)
        }
        LayoutMode::Zigzag => {
            let col_group = if config.port_group_size > 0 {
                (config.port_group_size / 2).max(1)
            } else {
                0
            };
            group_extra(col_group, config.port_group_spacing, col)
        }
    };
    layout.port_start_x + col as f32 * step + extra
}

/// Right edge of the regular-port block, if there is one.
pub(super) fn regular_right(config: &ValidatedConfig, layout: &LayoutConfig) -> Option<f32> {
    if config.num_ports == 0 {
        return None;
    }
    let last_col = regular_columns(config) - 1;
    Some(regular_column_x(config, layout, last_col) + config.port_width)
}

/// x where the SFP block starts: the regular start in SFP-only mode,
/// otherwise a fixed gap after the last regular port.
pub(super) fn sfp_start_x(config: &ValidatedConfig, layout: &LayoutConfig) -> f32 {
    match regular_right(config, layout) {
        Some(right) => right + layout.sfp_gap,
        None => layout.port_start_x,
    }
}

/// x of an SFP cell by column (zigzag) or index (horizontal).
pub(super) fn sfp_x(config: &ValidatedConfig, layout: &LayoutConfig, unit: u32) -> f32 {
    let step = layout.sfp_width + config.port_spacing;
    let extra = group_extra(config.sfp_group_size, config.port_group_spacing, unit);
    sfp_start_x(config, layout) + unit as f32 * step + extra
}

/// Right edge of the SFP block, if there is one.
pub(super) fn sfp_right(config: &ValidatedConfig, layout: &LayoutConfig) -> Option<f32> {
    if config.sfp_ports == 0 {
        return None;
    }
    let last_unit = match config.sfp_layout {
        SfpLayout::Horizontal => config.sfp_ports - 1,
        SfpLayout::Zigzag => config.sfp_ports.div_ceil(2) - 1,
    };
    Some(sfp_x(config, layout, last_unit) + layout.sfp_width)
}

/// Rightmost pixel any port reaches.
pub(super) fn content_right(config: &ValidatedConfig, layout: &LayoutConfig) -> f32 {
    let regular = regular_right(config, layout).unwrap_or(layout.port_start_x);
    match sfp_right(config, layout) {
        Some(sfp) => regular.max(sfp),
        None => regular,
    }
}

/// Body width no valid switch may drop under: room for the minimum
/// configuration (10 regular + 1 SFP, or 4 SFP in SFP-only mode).
fn min_natural_body_width(config: &ValidatedConfig, layout: &LayoutConfig) -> f32 {
    if config.sfp_only_mode {
        layout.port_start_x + 2.0 * (layout.sfp_width + config.port_spacing)
    } else {
        let regular = layout.port_start_x + 5.0 * (config.port_width + config.port_spacing);
        regular + layout.sfp_gap + layout.sfp_width
    }
}

/// Whether this configuration sits at or below the documented minimum
/// and therefore takes the fixed floor width instead of the computed one.
pub(super) fn at_or_below_minimum(config: &ValidatedConfig) -> bool {
    if config.sfp_only_mode {
        config.sfp_ports <= 4
    } else {
        config.num_ports < 10 || (config.num_ports == 10 && config.sfp_ports < 1)
    }
}

/// Rows the legend is likely to need, from the average-item-width
/// heuristic. Only an estimate; the legend engine's greedy wrap decides
/// the real count.
pub(super) fn estimate_legend_rows(
    layout: &LayoutConfig,
    canvas_width: f32,
    total_items: usize,
) -> u32 {
    let available = (canvas_width - 2.0 * layout.legend_x).max(layout.legend_avg_item_width);
    let items_per_row = (available / layout.legend_avg_item_width).floor().max(1.0) as usize;
    (total_items.max(1)).div_ceil(items_per_row) as u32
}

/// Compute canvas and body sizing for a validated configuration.
///
/// The body width is derived from the position of the rightmost port
/// plus the fixed edge margin, so the right margin always equals the
/// left one; widths never come from summing spacing left to right.
pub fn calculate_dimensions(
    config: &ValidatedConfig,
    layout: &LayoutConfig,
    used_vlans: usize,
    used_statuses: usize,
) -> Dimensions {
    let (ports_per_row, num_rows) = if config.sfp_only_mode {
        (0, 0)
    } else {
        match config.layout_mode {
            LayoutMode::SingleRow => (config.num_ports, 1),
            LayoutMode::Zigzag => (regular_columns(config), 2),
        }
    };

    let content = content_right(config, layout);
    let mut body_width = content + layout.edge_margin - layout.canvas_margin;
    body_width = body_width.max(min_natural_body_width(config, layout));
    if at_or_below_minimum(config) {
        body_width = body_width.max(min_body_floor(config.sfp_only_mode).body_width);
    }
    let canvas_width = body_width + 2.0 * layout.canvas_margin;

    let total_items = used_vlans + used_statuses;
    let estimated_rows = estimate_legend_rows(layout, canvas_width, total_items);
    let legend_height = 20.0
        + config.legend_items_spacing
        + estimated_rows as f32 * layout.legend_status_row_height;
    let canvas_height = (config.switch_height + config.legend_spacing + legend_height)
        .max(layout.min_canvas_height);

    Dimensions {
        canvas_width,
        canvas_height,
        body_width,
        ports_per_row,
        num_rows,
    }
}
