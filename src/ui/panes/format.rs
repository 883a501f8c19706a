//! Size formatting shared by the panes and the status board

use crate::constants::GIB;

/// Format a byte count as decimal-point gigabytes, e.g. `"1.50 GB"`
pub fn format_gb(bytes: usize) -> String {
    format!("{:.2} GB", bytes as f64 / GIB as f64)
}

/// Format a unit count with its suffix, e.g. `"3 GiB"`
pub fn format_units(units: usize, suffix: &str) -> String {
    format!("{} {}", units, suffix)
}
