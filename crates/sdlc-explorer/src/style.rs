//! Per-level node styling
//!
//! Deeper levels are drawn smaller; a node without a level is styled as
//! level 0.

use serde::Serialize;

// =============================================================================
// PALETTE
// =============================================================================

/// Fill colours for levels 1 through 6
pub const LEVEL_PALETTE: [&str; 6] = [
    "#1f77b4", // blue
    "#ff7f0e", // orange
    "#2ca02c", // green
    "#d62728", // red
    "#9467bd", // purple
    "#8c564b", // brown
];

/// Fill colour for levels outside the palette
pub const FALLBACK_COLOR: &str = "#e377c2";

// =============================================================================
// HIGHLIGHT
// =============================================================================

/// Opacity of nodes matching a search
pub const MATCH_OPACITY: f64 = 1.0;

/// Opacity of everything else while a search is active
pub const DIMMED_OPACITY: f64 = 0.3;

const BASE_RADIUS: u32 = 10;
const BASE_PULSE_RADIUS: u32 = 15;
const MIN_RADIUS: u32 = 5;

/// Visual attributes of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    /// Fill colour as `#rrggbb`
    pub color: &'static str,
    /// Circle radius
    pub radius: u32,
    /// Radius of the pulsing halo
    pub pulse_radius: u32,
    /// Radius used for collision avoidance
    pub collision_radius: u32,
}

impl NodeStyle {
    /// Style for a node at `level`
    #[must_use]
    pub fn for_level(level: Option<u32>) -> Self {
        let level = level.unwrap_or(0);
        let pulse_radius = BASE_PULSE_RADIUS.saturating_sub(level).max(MIN_RADIUS);
        Self {
            color: level_color(level),
            radius: BASE_RADIUS.saturating_sub(level).max(MIN_RADIUS),
            pulse_radius,
            collision_radius: pulse_radius * 2,
        }
    }
}

/// Palette entry for `level`, or [`FALLBACK_COLOR`]
#[must_use]
pub fn level_color(level: u32) -> &'static str {
    level
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
        .and_then(|index| LEVEL_PALETTE.get(index))
        .copied()
        .unwrap_or(FALLBACK_COLOR)
}
