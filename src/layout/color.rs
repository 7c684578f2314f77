use crate::ir::PortAssignment;
use crate::theme::Theme;

/// Resolve a port's fill color from its VLAN assignment.
///
/// The fill is always the VLAN color; status is conveyed only through
/// the corner indicator and the legend. VLANs without a palette entry
/// fall back to the VLAN 1 default.
pub(super) fn port_color(port: u32, assignment: &PortAssignment, theme: &Theme) -> String {
    theme.vlan_color(assignment.vlan_for(port)).to_string()
}
