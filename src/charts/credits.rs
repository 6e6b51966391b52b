use serde::{Deserialize, Serialize};

/// Credit counts for one project or period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditsRow {
    pub name: String,
    pub purchased: f64,
    pub retired: f64,
    pub available: f64,
}

/// Purchased, retired and available credits side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub rows: Vec<CreditsRow>,
    pub series: [(&'static str, &'static str); 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl BarChart {
    pub fn new(rows: Vec<CreditsRow>) -> Self {
        let empty_message = rows
            .is_empty()
            .then_some("No carbon credits data available");
        Self {
            rows,
            series: [
                ("Purchased", "#3B82F6"),
                ("Retired", "#10B981"),
                ("Available", "#F59E0B"),
            ],
            empty_message,
        }
    }

    /// Totals across all rows: (purchased, retired, available)
    pub fn totals(&self) -> (f64, f64, f64) {
        self.rows.iter().fold((0.0, 0.0, 0.0), |(p, r, a), row| {
            (p + row.purchased, r + row.retired, a + row.available)
        })
    }

    pub fn tooltip(row: &CreditsRow) -> Vec<String> {
        vec![
            format!("Purchased: {} credits", row.purchased),
            format!("Retired: {} credits", row.retired),
            format!("Available: {} credits", row.available),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, purchased: f64, retired: f64, available: f64) -> CreditsRow {
        CreditsRow {
            name: name.to_string(),
            purchased,
            retired,
            available,
        }
    }

    #[test]
    fn test_bar_chart_totals() {
        let chart = BarChart::new(vec![
            row("Amazon Reforestation", 100.0, 40.0, 60.0),
            row("Wind Farm", 50.0, 50.0, 0.0),
        ]);

        assert!(chart.empty_message.is_none());
        assert_eq!(chart.totals(), (150.0, 90.0, 60.0));
        assert_eq!(chart.series[1], ("Retired", "#10B981"));
    }

    #[test]
    fn test_empty_bar_chart() {
        let chart = BarChart::new(Vec::new());
        assert_eq!(chart.empty_message, Some("No carbon credits data available"));
        assert_eq!(chart.totals(), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_tooltip() {
        let lines = BarChart::tooltip(&row("Solar", 12.0, 2.0, 10.0));
        assert_eq!(lines[0], "Purchased: 12 credits");
    }
}
