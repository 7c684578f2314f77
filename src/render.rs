use std::path::Path;

use anyhow::Result;

use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::layout::{Geometry, LegendItemGeom, LegendShape, PortGeom};
use crate::theme::Theme;

/// Serialize laid-out geometry into an SVG document. Pure string
/// assembly; every coordinate was already decided by the layout engine.
pub fn render_svg(geom: &Geometry, theme: &Theme, layout: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = geom.canvas.width;
    let height = geom.canvas.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        geom.background
    ));

    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"10\" ry=\"10\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        geom.body.x,
        geom.body.y,
        geom.body.width,
        geom.body.height,
        theme.body_color,
        theme.body_border_color,
        theme.body_border_width
    ));

    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
        geom.header.name_x,
        geom.header.name_y,
        theme.font_family,
        layout.header_font_size,
        theme.text_color,
        escape_xml(&geom.header.name)
    ));
    if let Some(model) = &geom.header.model {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">Model: {}</text>",
            geom.header.model_x,
            geom.header.model_y,
            theme.font_family,
            layout.model_font_size,
            theme.text_color,
            escape_xml(model)
        ));
    }

    for led in &geom.leds {
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\"/>",
            led.circle_x, led.circle_y, led.radius, led.color
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            led.text_x,
            led.text_y,
            theme.font_family,
            layout.led_font_size,
            theme.text_color,
            escape_xml(&led.label)
        ));
    }

    for port in &geom.ports {
        svg.push_str(&port_svg(port, theme, layout));
    }

    svg.push_str(&legend_svg(geom, theme, layout));

    svg.push_str("</svg>");
    svg
}

fn port_svg(port: &PortGeom, theme: &Theme, layout: &LayoutConfig) -> String {
    let mut group = String::new();
    group.push_str("<g>");
    group.push_str(&format!("<title>{}</title>", escape_xml(&port.tooltip)));
    group.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
        port.x,
        port.y,
        port.width,
        port.height,
        port.rx,
        port.ry,
        port.color,
        theme.port_border_color
    ));
    group.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        port.label_x,
        port.label_y,
        theme.font_family,
        layout.port_font_size,
        theme.port_label_color,
        escape_xml(&port.label)
    ));
    if let Some(indicator) = &port.indicator {
        group.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\"/>",
            indicator.x, indicator.y, indicator.radius, indicator.color
        ));
    }
    group.push_str("</g>");
    group
}

fn legend_item_svg(item: &LegendItemGeom, theme: &Theme, layout: &LayoutConfig) -> String {
    let mut out = String::new();
    let size = layout.legend_swatch_size;
    match item.shape {
        LegendShape::Swatch => {
            out.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"#000000\" stroke-width=\"1\"/>",
                item.x, item.y, size, size, item.color
            ));
        }
        LegendShape::Dot => {
            out.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\" stroke=\"#000000\" stroke-width=\"1\"/>",
                item.x + size / 2.0,
                item.y + size / 2.0,
                size / 2.0,
                item.color
            ));
        }
    }
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        item.x + layout.legend_text_offset,
        item.y + size - 1.0,
        theme.font_family,
        layout.legend_font_size,
        theme.text_color,
        escape_xml(&item.label)
    ));
    out
}

fn legend_svg(geom: &Geometry, theme: &Theme, layout: &LayoutConfig) -> String {
    let legend = &geom.legend;
    let mut out = String::new();

    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">Legend:</text>",
        legend.title_x,
        legend.title_y,
        theme.font_family,
        layout.model_font_size,
        theme.text_color
    ));
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">VLANs:</text>",
        legend.title_x,
        legend.vlan_header_y,
        theme.font_family,
        layout.legend_header_font_size,
        theme.text_color
    ));
    for row in &legend.vlan_rows {
        for item in &row.items {
            out.push_str(&legend_item_svg(item, theme, layout));
        }
    }

    if let Some(header_y) = legend.status_header_y {
        out.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">Port Status:</text>",
            legend.title_x,
            header_y,
            theme.font_family,
            layout.legend_header_font_size,
            theme.text_color
        ));
        for row in &legend.status_rows {
            for item in &row.items {
                out.push_str(&legend_item_svg(item, theme, layout));
            }
        }
    }

    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size();
    let scale = render_cfg.png_scale.max(0.1);
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("failed to allocate a {width}x{height} pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    let transform = resvg::tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
