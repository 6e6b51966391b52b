use anyhow::Result;
use carbon_portal::api::EmissionSummary;
use carbon_portal::catalog::Plan;
use carbon_portal::charts::{AreaChart, LineChart, PieChart};
use carbon_portal::config::Config;
use carbon_portal::format::{calculate_co2e, format_number, format_tonnes, ActivityType};
use serde::Serialize;

/// Render the effective configuration
pub fn render_config(config: &Config) -> String {
    let mut out = String::new();
    out.push_str("API config:\n");
    out.push_str(&format!("  base_url: {}\n", config.api.base_url));
    out.push_str(&format!("  timeout_secs: {}\n", config.api.timeout_secs));
    out.push_str("\nQueue config:\n");
    out.push_str(&format!("  grace_period_ms: {}\n", config.queue.grace_period_ms));
    out.push_str(&format!("  pacing_delay_ms: {}\n", config.queue.pacing_delay_ms));
    out.push_str("\nDisplay config:\n");
    out.push_str(&format!("  decimals: {}\n", config.display.decimals));
    out
}

/// Render a CO2e estimate for one activity
pub fn render_estimate(activity: &ActivityType, amount: f64, decimals: usize) -> String {
    let kg = calculate_co2e(activity, amount);
    format!(
        "{} {} of {} -> {} kg CO2e ({})",
        format_number(amount, decimals),
        activity.unit(),
        activity,
        format_number(kg, decimals),
        format_tonnes(kg)
    )
}

pub fn render_plans(plans: &[Plan]) -> String {
    let mut out = String::new();
    for plan in plans {
        let marker = if plan.popular { " ⭐ most popular" } else { "" };
        out.push_str(&format!("{} ({}){}\n", plan.name, plan.price, marker));
        out.push_str(&format!("  {}\n", plan.description));
        for feature in plan.features {
            out.push_str(&format!("  - {}\n", feature));
        }
        out.push_str(&format!(
            "  API: {}, {}\n",
            plan.api_limits.requests, plan.api_limits.rate_limit
        ));
        out.push_str(&format!("  {} -> {}\n\n", plan.cta, plan.cta_link));
    }
    out
}

#[derive(Serialize)]
pub struct SummaryCharts {
    pub categories: PieChart,
    pub trend: LineChart,
    pub net: AreaChart,
}

impl SummaryCharts {
    pub fn from_summary(summary: &EmissionSummary) -> Self {
        Self {
            categories: PieChart::from_categories(&summary.emissions_by_category),
            trend: LineChart::from_trends(&summary.monthly_trends),
            net: AreaChart::from_trends(&summary.monthly_trends),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn render_summary(summary: &EmissionSummary, decimals: usize) -> String {
    let charts = SummaryCharts::from_summary(summary);
    let mut out = String::new();
    out.push_str(&format!("Total emissions: {}\n", format_tonnes(summary.total_emissions)));
    out.push_str(&format!("Total offsets:   {}\n", format_tonnes(summary.total_offsets)));
    out.push_str(&format!("Net emissions:   {}\n", format_tonnes(summary.net_emissions)));
    out.push_str(&format!(
        "Offset:          {}%\n",
        format_number(summary.offset_percentage, decimals)
    ));

    out.push_str("\nBy category:\n");
    match charts.categories.empty_message {
        Some(message) => out.push_str(&format!("  {}\n", message)),
        None => {
            for slice in &charts.categories.slices {
                out.push_str(&format!("  {}\n", PieChart::tooltip(slice)));
            }
        }
    }

    out.push_str("\nMonthly:\n");
    match charts.net.empty_message {
        Some(message) => out.push_str(&format!("  {}\n", message)),
        None => {
            for point in &charts.net.points {
                out.push_str(&format!(
                    "  {}: {}\n",
                    point.month,
                    AreaChart::tooltip(point).join(" | ")
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbon_portal::api::MonthlyTrend;
    use carbon_portal::catalog::plans;

    #[test]
    fn test_render_estimate() {
        let line = render_estimate(&ActivityType::Electricity, 1200.0, 2);
        assert_eq!(
            line,
            "1,200.00 kWh of electricity -> 480.00 kg CO2e (0.480 tonnes CO₂e)"
        );
    }

    #[test]
    fn test_render_plans() {
        let out = render_plans(plans());
        assert!(out.contains("Professional ($99/month) ⭐ most popular"));
        assert!(out.contains("Starter (Free)"));
    }

    #[test]
    fn test_render_empty_summary() {
        let out = render_summary(&EmissionSummary::default(), 2);
        assert!(out.contains("No emissions data available"));
        assert!(out.contains("No net emissions data available"));
    }

    #[test]
    fn test_summary_json() {
        let summary = EmissionSummary {
            monthly_trends: vec![MonthlyTrend {
                month: "Jan".to_string(),
                emissions: 100.0,
                offsets: 40.0,
                net_emissions: None,
            }],
            ..EmissionSummary::default()
        };
        let json = SummaryCharts::from_summary(&summary).to_json().unwrap();
        assert!(json.contains("\"net\": 60.0"));
    }
}
