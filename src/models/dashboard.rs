use serde::{Deserialize, Serialize};

use super::wire;

/// `GET /dashboard` response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
}

/// Portfolio totals plus the data behind the income/expense chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(with = "wire::count", default)]
    pub total_properties: i64,
    #[serde(with = "wire::count", default)]
    pub total_tenants: i64,
    #[serde(with = "wire::amount", default)]
    pub income: f64,
    #[serde(with = "wire::amount", default)]
    pub expenses: f64,
    #[serde(default)]
    pub chart_data: ChartData,
    #[serde(default)]
    pub recent_activity: Vec<Activity>,
}

impl DashboardSummary {
    /// Income minus expenses
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Parallel series keyed by `labels` (usually month names)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub income: Vec<f64>,
    #[serde(default)]
    pub expenses: Vec<f64>,
}

/// One label of the chart with both series resolved
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRow {
    pub label: String,
    pub income: f64,
    pub expenses: f64,
}

impl MonthlyRow {
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

impl ChartData {
    /// Zip the series by label; a short series reads as zero
    pub fn rows(&self) -> Vec<MonthlyRow> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| MonthlyRow {
                label: label.clone(),
                income: self.income.get(i).copied().unwrap_or(0.0),
                expenses: self.expenses.get(i).copied().unwrap_or(0.0),
            })
            .collect()
    }

    /// Largest value across both series, used to scale bars
    pub fn max_value(&self) -> f64 {
        self.income
            .iter()
            .chain(self.expenses.iter())
            .copied()
            .fold(0.0, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Invoice,
    Expense,
}

/// Recent invoice or expense shown on the dashboard feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(with = "wire::amount")]
    pub amount: f64,
}

impl Activity {
    /// Invoices add to income, expenses subtract
    pub fn sign(&self) -> char {
        match self.kind {
            ActivityKind::Invoice => '+',
            ActivityKind::Expense => '-',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "summary": {
            "totalProperties": 3,
            "totalTenants": 8,
            "income": 5400.5,
            "expenses": "1200",
            "chartData": {
                "labels": ["Jan", "Feb", "Mar"],
                "income": [1800, 1800.5],
                "expenses": [400, 300, 500]
            },
            "recentActivity": [
                {"type": "invoice", "title": "Rent - Unit 2", "date": "2024-03-01", "amount": 900},
                {"type": "expense", "title": "Roof repair", "date": "2024-02-20", "amount": 500}
            ]
        }
    }"#;

    #[test]
    fn test_dashboard_from_wire() {
        let response: DashboardResponse = serde_json::from_str(SAMPLE).unwrap();
        let summary = response.summary;

        assert_eq!(summary.total_properties, 3);
        assert_eq!(summary.expenses, 1200.0);
        assert_eq!(summary.net(), 4200.5);
        assert_eq!(summary.recent_activity[1].kind, ActivityKind::Expense);
        assert_eq!(summary.recent_activity[1].sign(), '-');
    }

    #[test]
    fn test_chart_rows_pad_short_series() {
        let response: DashboardResponse = serde_json::from_str(SAMPLE).unwrap();
        let rows = response.summary.chart_data.rows();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].label, "Mar");
        assert_eq!(rows[2].income, 0.0);
        assert_eq!(rows[2].net(), -500.0);
        assert_eq!(response.summary.chart_data.max_value(), 1800.5);
    }

    #[test]
    fn test_empty_summary_defaults() {
        let response: DashboardResponse = serde_json::from_str(r#"{"summary": {}}"#).unwrap();
        assert!(response.summary.chart_data.is_empty());
        assert!(response.summary.recent_activity.is_empty());
    }
}
