//! Dashboard Route
//!
//! - GET /dashboard - Portfolio totals, monthly chart series and recent activity
//!
//! Income counts paid invoices only, booked on their paid date (due date
//! when no paid date was recorded). Expenses are booked on their date.

use axum::{extract::State, Json};
use chrono::{Datelike, NaiveDate, Utc};
use std::sync::Arc;

use crate::models::{Activity, ActivityKind, ChartData, DashboardResponse, DashboardSummary};
use crate::server::routes::auth::AuthUser;
use crate::server::state::{AppState, Database};

/// Months shown on the chart, ending with the current one
pub const CHART_MONTHS: u32 = 6;

/// Entries in the recent activity feed
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// GET /dashboard
pub async fn get_dashboard(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Json<DashboardResponse> {
    let db = state.db.read().await;
    Json(DashboardResponse {
        summary: summarize(&db, Utc::now().date_naive()),
    })
}

/// Build the dashboard summary as of `today`
pub fn summarize(db: &Database, today: NaiveDate) -> DashboardSummary {
    let paid: Vec<_> = db
        .invoices
        .iter()
        .filter(|i| i.is_paid())
        .map(|i| (i, i.paid_date.unwrap_or(i.due_date)))
        .collect();

    let months = recent_months(today, CHART_MONTHS);
    let mut chart = ChartData {
        labels: months.iter().map(|m| m.format("%b").to_string()).collect(),
        income: vec![0.0; months.len()],
        expenses: vec![0.0; months.len()],
    };
    for (invoice, booked) in &paid {
        if let Some(slot) = month_slot(&months, *booked) {
            chart.income[slot] += invoice.amount;
        }
    }
    for expense in db.expenses.iter() {
        if let Some(slot) = month_slot(&months, expense.date) {
            chart.expenses[slot] += expense.amount;
        }
    }

    let mut activity: Vec<(NaiveDate, Activity)> = paid
        .iter()
        .map(|(invoice, booked)| {
            let tenant = db
                .tenants
                .get(invoice.tenant_id)
                .map(|t| t.full_name.as_str())
                .unwrap_or(crate::models::NOT_AVAILABLE);
            let entry = Activity {
                kind: ActivityKind::Invoice,
                title: format!("Rent payment - {}", tenant),
                date: booked.to_string(),
                amount: invoice.amount,
            };
            (*booked, entry)
        })
        .chain(db.expenses.iter().map(|expense| {
            let entry = Activity {
                kind: ActivityKind::Expense,
                title: expense.description.clone(),
                date: expense.date.to_string(),
                amount: expense.amount,
            };
            (expense.date, entry)
        }))
        .collect();
    // Stable sort keeps invoices ahead of expenses on the same day
    activity.sort_by(|a, b| b.0.cmp(&a.0));

    DashboardSummary {
        total_properties: db.properties.len() as i64,
        total_tenants: db.tenants.len() as i64,
        income: paid.iter().map(|(i, _)| i.amount).sum(),
        expenses: db.expenses.iter().map(|e| e.amount).sum(),
        chart_data: chart,
        recent_activity: activity
            .into_iter()
            .take(RECENT_ACTIVITY_LIMIT)
            .map(|(_, entry)| entry)
            .collect(),
    }
}

/// First day of each of the last `count` months, oldest first
fn recent_months(today: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let current = today.year() * 12 + today.month0() as i32;
    (0..count as i32)
        .rev()
        .filter_map(|back| {
            let index = current - back;
            NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
        })
        .collect()
}

fn month_slot(months: &[NaiveDate], date: NaiveDate) -> Option<usize> {
    months
        .iter()
        .position(|m| m.year() == date.year() && m.month() == date.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Invoice, InvoiceStatus, Property, Tenant};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_db() -> Database {
        let mut db = Database::default();
        db.properties.insert_with(|id| Property {
            id,
            name: "Apartment A".to_string(),
            address: "123 Main St".to_string(),
            total_units: 4,
        });
        db.tenants.insert_with(|id| Tenant {
            id,
            property_id: 1,
            full_name: "Sara Haddad".to_string(),
            phone: String::new(),
            address: String::new(),
            start_date: date("2024-01-01"),
            rent_amount: 900.0,
        });
        for (status, due, paid) in [
            (InvoiceStatus::Paid, "2024-03-01", Some("2024-03-03")),
            (InvoiceStatus::Paid, "2024-01-01", None),
            (InvoiceStatus::Pending, "2024-03-01", None),
        ] {
            db.invoices.insert_with(|id| Invoice {
                id,
                tenant_id: 1,
                amount: 900.0,
                due_date: date(due),
                status,
                paid_date: paid.map(date),
            });
        }
        db.expenses.insert_with(|id| Expense {
            id,
            description: "Roof repair".to_string(),
            amount: 500.0,
            date: date("2024-02-20"),
            category: "Maintenance".to_string(),
        });
        db
    }

    #[test]
    fn test_recent_months_cross_year() {
        let months = recent_months(date("2024-02-15"), 6);
        assert_eq!(months.first(), Some(&date("2023-09-01")));
        assert_eq!(months.last(), Some(&date("2024-02-01")));
        assert_eq!(months.len(), 6);
    }

    #[test]
    fn test_summarize_totals() {
        let summary = summarize(&sample_db(), date("2024-03-15"));

        assert_eq!(summary.total_properties, 1);
        assert_eq!(summary.total_tenants, 1);
        assert_eq!(summary.income, 1800.0);
        assert_eq!(summary.expenses, 500.0);
        assert_eq!(summary.net(), 1300.0);
    }

    #[test]
    fn test_summarize_chart() {
        let chart = summarize(&sample_db(), date("2024-03-15")).chart_data;

        assert_eq!(chart.labels, vec!["Oct", "Nov", "Dec", "Jan", "Feb", "Mar"]);
        assert_eq!(chart.income, vec![0.0, 0.0, 0.0, 900.0, 0.0, 900.0]);
        assert_eq!(chart.expenses, vec![0.0, 0.0, 0.0, 0.0, 500.0, 0.0]);
    }

    #[test]
    fn test_summarize_activity_newest_first() {
        let activity = summarize(&sample_db(), date("2024-03-15")).recent_activity;

        let dates: Vec<_> = activity.iter().map(|a| a.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-03", "2024-02-20", "2024-01-01"]);
        assert_eq!(activity[0].title, "Rent payment - Sara Haddad");
        assert_eq!(activity[1].kind, ActivityKind::Expense);
    }

    #[test]
    fn test_empty_database() {
        let summary = summarize(&Database::default(), date("2024-03-15"));
        assert_eq!(summary.income, 0.0);
        assert!(summary.recent_activity.is_empty());
        assert_eq!(summary.chart_data.labels.len(), CHART_MONTHS as usize);
    }
}
