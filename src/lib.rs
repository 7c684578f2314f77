//! Network switch diagram generator.
//!
//! A validated [`config::SwitchConfig`] plus a [`ir::PortAssignment`]
//! goes through [`layout::compute_geometry`] to produce pixel-exact
//! [`layout::Geometry`], which [`render::render_svg`] serializes to SVG.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod geometry_dump;
pub mod ir;
pub mod layout;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{LayoutConfig, SwitchConfig, ValidatedConfig};
pub use ir::PortAssignment;
pub use layout::{Geometry, compute_geometry};
pub use render::render_svg;
pub use theme::Theme;
