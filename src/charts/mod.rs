//! Renderer-agnostic data for the dashboard charts
//!
//! Each model is `Serialize` so a front end can hand it to its charting
//! library as-is. Empty inputs carry the placeholder text to show instead.

pub mod credits;
pub mod emissions;

pub use credits::{BarChart, CreditsRow};
pub use emissions::{AreaChart, AreaPoint, LineChart, LinePoint, PieChart, PieSlice};

/// Slice/series colours, cycled when there are more entries than colours
pub const PALETTE: [&str; 8] = [
    "#10B981", // green-500
    "#3B82F6", // blue-500
    "#F59E0B", // amber-500
    "#EF4444", // red-500
    "#8B5CF6", // violet-500
    "#F97316", // orange-500
    "#06B6D4", // cyan-500
    "#84CC16", // lime-500
];

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), "#10B981");
        assert_eq!(palette_color(7), "#84CC16");
        assert_eq!(palette_color(8), "#10B981");
    }
}
