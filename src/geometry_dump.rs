use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::config::ValidatedConfig;
use crate::layout::Geometry;

/// JSON envelope around the computed geometry, for debugging layouts
/// and driving alternative renderers.
#[derive(Debug, Serialize)]
pub struct GeometryDump<'a> {
    pub kind: &'static str,
    pub switch_name: &'a str,
    pub num_ports: u32,
    pub sfp_ports: u32,
    pub geometry: &'a Geometry,
}

impl<'a> GeometryDump<'a> {
    pub fn new(config: &'a ValidatedConfig, geometry: &'a Geometry) -> Self {
        Self {
            kind: "switch-diagram",
            switch_name: &config.switch_name,
            num_ports: config.num_ports,
            sfp_ports: config.sfp_ports,
            geometry,
        }
    }
}

pub fn write_geometry_dump(
    path: &Path,
    config: &ValidatedConfig,
    geometry: &Geometry,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &GeometryDump::new(config, geometry))?;
    Ok(())
}

/// Pretty-printed JSON for stdout output.
pub fn geometry_json(config: &ValidatedConfig, geometry: &Geometry) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&GeometryDump::new(
        config, geometry,
    ))?)
}
