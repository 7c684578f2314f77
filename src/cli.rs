use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::config::{SwitchConfig, load_config};
use crate::geometry_dump::{geometry_json, write_geometry_dump};
use crate::ir::{LayoutMode, PortAssignment, PortShape, PortStatus, SfpLayout, ZigzagStart};
use crate::layout::compute_geometry;
use crate::render::{render_svg, write_output_svg};
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::text_metrics::FontMeasure;
use crate::theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "switchsvg", version, about = "Network switch diagram generator")]
pub struct Args {
    /// Number of regular ports (5-48)
    #[arg(short = 'p', long = "ports", default_value_t = 24)]
    pub ports: u32,

    /// Number of SFP ports (0-6, or 4-32 with --sfp-only)
    #[arg(short = 's', long = "sfp", default_value_t = 0)]
    pub sfp: u32,

    /// SFP-only switch (no regular ports)
    #[arg(long = "sfp-only")]
    pub sfp_only: bool,

    /// Regular port arrangement
    #[arg(short = 'l', long = "layout", value_enum, default_value = "zigzag")]
    pub layout: LayoutArg,

    /// SFP port arrangement
    #[arg(long = "sfp-layout", value_enum, default_value = "zigzag")]
    pub sfp_layout: SfpLayoutArg,

    /// Which row the first zigzag port lands in
    #[arg(long = "zigzag-start", value_enum, default_value = "top")]
    pub zigzag_start: ZigzagStartArg,

    /// Insert a gap after every N ports (0 disables grouping)
    #[arg(short = 'g', long = "groups", default_value_t = 0)]
    pub groups: u32,

    /// Insert a gap after every N SFP ports (0 disables grouping)
    #[arg(long = "sfp-groups", default_value_t = 0)]
    pub sfp_groups: u32,

    /// First displayed port number (0 or 1)
    #[arg(long = "start-number", default_value_t = 1)]
    pub start_number: u32,

    /// Port rectangle shape
    #[arg(long = "shape", value_enum, default_value = "square")]
    pub shape: ShapeArg,

    /// Color theme (overrides the config file's choice)
    #[arg(short = 't', long = "theme", value_enum)]
    pub theme: Option<ThemeArg>,

    /// Switch name shown in the header (defaults to "<n>-Port Network Switch")
    #[arg(short = 'n', long = "name", default_value = "")]
    pub name: String,

    /// Model line shown under the name
    #[arg(short = 'm', long = "model", default_value = "")]
    pub model: String,

    /// Hide the per-port status indicator dots
    #[arg(long = "no-status-indicator")]
    pub no_status_indicator: bool,

    /// Per-port VLAN override, PORT=VLAN (repeatable)
    #[arg(long = "vlan", value_name = "PORT=VLAN", value_parser = parse_port_vlan)]
    pub vlan: Vec<(u32, u32)>,

    /// Per-port status override, PORT=up|down|disabled (repeatable)
    #[arg(long = "status", value_name = "PORT=STATE", value_parser = parse_port_status)]
    pub status: Vec<(u32, PortStatus)>,

    /// Per-port label override, PORT=TEXT (repeatable)
    #[arg(long = "label", value_name = "PORT=TEXT", value_parser = parse_port_label)]
    pub label: Vec<(u32, String)>,

    /// Output file. Defaults to stdout for svg and json.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "svg")]
    pub format: OutputFormat,

    /// Config JSON file (theme, vlanColors, layout constants)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LayoutArg {
    Zigzag,
    SingleRow,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SfpLayoutArg {
    Zigzag,
    Horizontal,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ZigzagStartArg {
    Top,
    Bottom,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ShapeArg {
    Square,
    Rounded,
    Circular,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ThemeArg {
    Dark,
    Light,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

fn parse_port_vlan(raw: &str) -> Result<(u32, u32), String> {
    let (port, vlan) = split_override(raw)?;
    let vlan = vlan
        .parse::<u32>()
        .map_err(|_| format!("invalid VLAN id {vlan:?}"))?;
    Ok((port, vlan))
}

fn parse_port_status(raw: &str) -> Result<(u32, PortStatus), String> {
    let (port, token) = split_override(raw)?;
    let status = PortStatus::from_token(&token)
        .ok_or_else(|| format!("invalid status {token:?} (expected up, down, or disabled)"))?;
    Ok((port, status))
}

fn parse_port_label(raw: &str) -> Result<(u32, String), String> {
    split_override(raw)
}

fn split_override(raw: &str) -> Result<(u32, String), String> {
    let (port, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PORT=VALUE, got {raw:?}"))?;
    let port = port
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid port number {port:?}"))?;
    Ok((port, value.to_string()))
}

impl Args {
    fn switch_config(&self) -> SwitchConfig {
        SwitchConfig {
            num_ports: self.ports,
            sfp_ports: self.sfp,
            sfp_only_mode: self.sfp_only,
            layout_mode: match self.layout {
                LayoutArg::Zigzag => LayoutMode::Zigzag,
                LayoutArg::SingleRow => LayoutMode::SingleRow,
            },
            sfp_layout: match self.sfp_layout {
                SfpLayoutArg::Zigzag => SfpLayout::Zigzag,
                SfpLayoutArg::Horizontal => SfpLayout::Horizontal,
            },
            zigzag_start: match self.zigzag_start {
                ZigzagStartArg::Top => ZigzagStart::Top,
                ZigzagStartArg::Bottom => ZigzagStart::Bottom,
            },
            port_shape: match self.shape {
                ShapeArg::Square => PortShape::Square,
                ShapeArg::Rounded => PortShape::Rounded,
                ShapeArg::Circular => PortShape::Circular,
            },
            port_group_size: self.groups,
            sfp_group_size: self.sfp_groups,
            port_start_number: self.start_number,
            show_status_indicator: !self.no_status_indicator,
            switch_name: self.name.clone(),
            model_name: self.model.clone(),
            ..Default::default()
        }
    }

    fn assignment(&self) -> PortAssignment {
        let mut assignment = PortAssignment::new();
        for &(port, vlan) in &self.vlan {
            assignment.set_vlan(port, vlan);
        }
        for &(port, status) in &self.status {
            assignment.set_status(port, status);
        }
        for (port, label) in &self.label {
            assignment.set_label(*port, label.clone());
        }
        assignment
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(choice) = args.theme {
        let mut theme = match choice {
            ThemeArg::Dark => Theme::dark(),
            ThemeArg::Light => Theme::light(),
        };
        theme.vlan_colors.extend(config.theme.vlan_colors.clone());
        config.theme = theme;
    }

    let switch = args
        .switch_config()
        .validate()
        .context("invalid switch description")?;
    let assignment = args.assignment();

    let measure = FontMeasure::new();
    let geometry = compute_geometry(&switch, &assignment, &config.theme, &config.layout, &measure);

    match args.format {
        OutputFormat::Svg => {
            let svg = render_svg(&geometry, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_geometry_dump(path, &switch, &geometry)?,
            None => println!("{}", geometry_json(&switch, &geometry)?),
        },
        OutputFormat::Png => {
            #[cfg(feature = "png")]
            {
                let path = args
                    .output
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("output path required for png output"))?;
                let svg = render_svg(&geometry, &config.theme, &config.layout);
                write_output_png(&svg, path, &config.render)?;
            }
            #[cfg(not(feature = "png"))]
            anyhow::bail!("this build does not include png support");
        }
    }

    Ok(())
}
