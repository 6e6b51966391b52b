use super::palette_color;
use crate::api::MonthlyTrend;
use crate::format::{format_tonnes, format_tonnes_axis, humanize_label};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

/// Emissions broken down by category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub slices: Vec<PieSlice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl PieChart {
    pub fn from_categories(categories: &BTreeMap<String, f64>) -> Self {
        let slices: Vec<PieSlice> = categories
            .iter()
            .enumerate()
            .map(|(i, (name, value))| PieSlice {
                name: humanize_label(name),
                value: *value,
                color: palette_color(i),
            })
            .collect();

        let empty_message = slices
            .is_empty()
            .then_some("No emissions data available");
        Self {
            slices,
            empty_message,
        }
    }

    pub fn tooltip(slice: &PieSlice) -> String {
        format!("{}: {}", slice.name, format_tonnes(slice.value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub month: String,
    pub emissions: f64,
}

/// Monthly emissions trend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub points: Vec<LinePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl LineChart {
    pub fn from_trends(trends: &[MonthlyTrend]) -> Self {
        let points: Vec<LinePoint> = trends
            .iter()
            .map(|t| LinePoint {
                month: t.month.clone(),
                emissions: t.emissions,
            })
            .collect();

        let empty_message = points.is_empty().then_some("No trend data available");
        Self {
            points,
            empty_message,
        }
    }

    pub fn axis_label(kg: f64) -> String {
        format_tonnes_axis(kg)
    }

    pub fn tooltip(point: &LinePoint) -> String {
        format!("{}: {}", point.month, format_tonnes(point.emissions))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaPoint {
    pub month: String,
    pub emissions: f64,
    pub offsets: f64,
    pub net: f64,
}

/// Emissions, offsets and what remains after offsetting, per month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaChart {
    pub points: Vec<AreaPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl AreaChart {
    pub fn from_trends(trends: &[MonthlyTrend]) -> Self {
        let points: Vec<AreaPoint> = trends
            .iter()
            .map(|t| AreaPoint {
                month: t.month.clone(),
                emissions: t.emissions,
                offsets: t.offsets,
                net: t.net(),
            })
            .collect();

        let empty_message = points
            .is_empty()
            .then_some("No net emissions data available");
        Self {
            points,
            empty_message,
        }
    }

    /// One line per series, in display order
    pub fn tooltip(point: &AreaPoint) -> Vec<String> {
        vec![
            format!("Emissions: {}", format_tonnes(point.emissions)),
            format!("Offsets: {}", format_tonnes(point.offsets)),
            format!("Net: {}", format_tonnes(point.net)),
        ]
    }
}
