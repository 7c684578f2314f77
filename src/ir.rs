use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Operational status of a single port. Shown as a small corner
/// indicator and in the legend; it never changes the port fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    Up,
    Down,
    Disabled,
}

impl PortStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Disabled => "disabled",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

/// Arrangement of the regular port block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Two rows, physically adjacent ports in adjacent columns.
    Zigzag,
    /// All regular ports on one horizontal line.
    SingleRow,
}

/// Arrangement of the SFP block, independent of the regular layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SfpLayout {
    Zigzag,
    Horizontal,
}

/// Which row the first zigzag port lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZigzagStart {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortShape {
    Square,
    Rounded,
    Circular,
}

/// Per-port VLAN, status, and label overrides, keyed by internal
/// 1-based port number (regular ports first, then SFP ports).
///
/// Anything not present falls back to VLAN 1 / status up / the numbering
/// scheme's default label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortAssignment {
    pub vlans: BTreeMap<u32, u32>,
    pub statuses: BTreeMap<u32, PortStatus>,
    pub labels: BTreeMap<u32, String>,
}

impl PortAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_vlan(&mut self, port: u32, vlan: u32) {
        self.vlans.insert(port, vlan);
    }

    pub fn set_status(&mut self, port: u32, status: PortStatus) {
        self.statuses.insert(port, status);
    }

    pub fn set_label(&mut self, port: u32, label: impl Into<String>) {
        self.labels.insert(port, label.into());
    }

    pub fn vlan_for(&self, port: u32) -> u32 {
        self.vlans.get(&port).copied().unwrap_or(1)
    }

    pub fn status_for(&self, port: u32) -> PortStatus {
        self.statuses.get(&port).copied().unwrap_or(PortStatus::Up)
    }

    pub fn label_for(&self, port: u32) -> Option<&str> {
        self.labels.get(&port).map(String::as_str)
    }

    /// VLANs that actually appear on this switch. Ports without an
    /// explicit entry sit on VLAN 1, so 1 is always included.
    pub fn used_vlans(&self) -> BTreeSet<u32> {
        let mut vlans: BTreeSet<u32> = self.vlans.values().copied().collect();
        vlans.insert(1);
        vlans
    }

    pub fn used_statuses(&self) -> BTreeSet<PortStatus> {
        let mut statuses: BTreeSet<PortStatus> = self.statuses.values().copied().collect();
        statuses.insert(PortStatus::Up);
        statuses
    }
}
