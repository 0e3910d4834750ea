//! Terminal rendering for CLI results

use clap::ValueEnum;
use serde::Serialize;

use crate::models::{
    format_money, DashboardSummary, EnrichedInvoice, Expense, PendingUser, Property, Tenant,
};

/// How results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Width of the longest dashboard chart bar
const BAR_WIDTH: usize = 30;

/// Records that print as table rows
pub trait Tabular {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// Left-aligned columns sized to their widest cell
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let mut out = vec![line(headers.to_vec()), "-".repeat(total)];
    out.extend(rows.iter().map(|r| line(r.iter().map(String::as_str).collect())));
    out.join("\n")
}

/// Print records as a table or JSON array
pub fn print_records<T: Tabular + Serialize>(
    records: &[T],
    format: OutputFormat,
    empty_hint: &str,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Table if records.is_empty() => println!("{}", empty_hint),
        OutputFormat::Table => {
            let rows: Vec<_> = records.iter().map(Tabular::row).collect();
            println!("{}", render_table(&T::headers(), &rows));
        }
    }
    Ok(())
}

/// Print one record as label/value lines or a JSON object
pub fn print_record<T: Tabular + Serialize>(
    record: &T,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Table => {
            let headers = T::headers();
            let width = headers.iter().map(|h| h.len()).max().unwrap_or(0);
            for (label, value) in headers.iter().zip(record.row()) {
                println!("{:<width$}  {}", label, value, width = width);
            }
        }
    }
    Ok(())
}

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut out = vec![
        format!("Total Properties  {}", summary.total_properties),
        format!("Total Tenants     {}", summary.total_tenants),
        format!("Income            {}", format_money(summary.income)),
        format!("Expenses          {}", format_money(summary.expenses)),
        format!("Net               {}", format_money(summary.net())),
    ];

    out.push(String::new());
    out.push("Income vs Expenses".to_string());
    if summary.chart_data.is_empty() {
        out.push("  No data to display".to_string());
    } else {
        let max = summary.chart_data.max_value();
        let bar = |value: f64| -> String {
            if max <= 0.0 {
                return String::new();
            }
            "#".repeat(((value / max) * BAR_WIDTH as f64).round() as usize)
        };
        let label_width = summary
            .chart_data
            .labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);

        for row in summary.chart_data.rows() {
            out.push(format!(
                "  {:<lw$}  in  {:<bw$} {}",
                row.label,
                bar(row.income),
                format_money(row.income),
                lw = label_width,
                bw = BAR_WIDTH
            ));
            out.push(format!(
                "  {:<lw$}  out {:<bw$} {}",
                "",
                bar(row.expenses),
                format_money(row.expenses),
                lw = label_width,
                bw = BAR_WIDTH
            ));
        }
    }

    out.push(String::new());
    out.push("Recent Activity".to_string());
    if summary.recent_activity.is_empty() {
        out.push("  No recent activity".to_string());
    }
    for activity in &summary.recent_activity {
        out.push(format!(
            "  {}  {}  {}{}",
            activity.date,
            activity.title,
            activity.sign(),
            format_money(activity.amount)
        ));
    }

    out.join("\n")
}

impl Tabular for Property {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Address", "Units"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.address.clone(),
            self.total_units.to_string(),
        ]
    }
}

impl Tabular for Tenant {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Full Name", "Phone", "Property", "Start Date", "Rent"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.full_name.clone(),
            self.phone.clone(),
            self.property_id.to_string(),
            self.start_date.to_string(),
            format_money(self.rent_amount),
        ]
    }
}

impl Tabular for EnrichedInvoice {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Tenant", "Property", "Amount", "Due Date", "Status", "Paid Date"]
    }

    fn row(&self) -> Vec<String> {
        let invoice = &self.invoice;
        vec![
            invoice.id.to_string(),
            self.tenant_name.clone(),
            self.property_name.clone(),
            format_money(invoice.amount),
            invoice.due_date.to_string(),
            invoice.status.label().to_string(),
            invoice
                .paid_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl Tabular for Expense {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Description", "Category", "Date", "Amount"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.description.clone(),
            self.category.clone(),
            self.date.to_string(),
            format_money(self.amount),
        ]
    }
}

impl Tabular for PendingUser {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Email", "Date Requested"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.email.clone(),
            self.date_requested.format("%Y-%m-%d %H:%M").to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, ActivityKind, ChartData};

    #[test]
    fn test_render_table_aligns_columns() {
        let table = render_table(
            &["ID", "Name"],
            &[
                vec!["1".to_string(), "Apartment A".to_string()],
                vec!["12".to_string(), "B".to_string()],
            ],
        );
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines[0], "ID  Name");
        assert_eq!(lines[1], "-".repeat(15));
        assert_eq!(lines[2], "1   Apartment A");
        assert_eq!(lines[3], "12  B");
    }

    #[test]
    fn test_render_dashboard() {
        let summary = DashboardSummary {
            total_properties: 2,
            total_tenants: 3,
            income: 1000.0,
            expenses: 250.0,
            chart_data: ChartData {
                labels: vec!["Jan".to_string(), "Feb".to_string()],
                income: vec![1000.0, 0.0],
                expenses: vec![0.0, 250.0],
            },
            recent_activity: vec![Activity {
                kind: ActivityKind::Expense,
                title: "Roof repair".to_string(),
                date: "2024-02-20".to_string(),
                amount: 250.0,
            }],
        };

        let text = render_dashboard(&summary);
        assert!(text.contains("Net               $750.00"));
        assert!(text.contains(&"#".repeat(BAR_WIDTH)));
        assert!(text.contains("2024-02-20  Roof repair  -$250.00"));
    }

    #[test]
    fn test_render_empty_dashboard() {
        let text = render_dashboard(&DashboardSummary::default());
        assert!(text.contains("No data to display"));
        assert!(text.contains("No recent activity"));
    }
}
