//! Domain Records
//!
//! Plain records mirrored from the RentDesk REST API. They are only ever
//! held in memory (per page or per command); the server owns persistence
//! and referential integrity.
//!
//! Each record has a matching `*Draft` type: the body of a create (`POST`)
//! or update (`PUT`) request, which is also the state of the add/edit form.

mod dashboard;
mod expense;
mod invoice;
mod property;
mod tenant;
mod user;
pub mod wire;

pub use dashboard::{
    Activity, ActivityKind, ChartData, DashboardResponse, DashboardSummary, MonthlyRow,
};
pub use expense::{Expense, ExpenseDraft};
pub use invoice::{EnrichedInvoice, Invoice, InvoiceDraft, InvoiceStatus, NOT_AVAILABLE};
pub use property::{Property, PropertyDraft};
pub use tenant::{Tenant, TenantDraft};
pub use user::{Credentials, LoginResponse, PendingUser, PendingUsersResponse, Registration};
pub use wire::{parse_amount, parse_count, parse_date, parse_id, parse_optional_date};

use thiserror::Error;

/// Record identifier assigned by the server
pub type RecordId = i64;

/// Client-side form validation failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be a number (got {value:?})")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be a date in YYYY-MM-DD format (got {value:?})")]
    InvalidDate { field: &'static str, value: String },

    #[error("{field} has an unsupported value {value:?}")]
    InvalidChoice { field: &'static str, value: String },

    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// Format an amount the way every table and receipt shows it
pub fn format_money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1200.0), "$1200.00");
        assert_eq!(format_money(-35.5), "-$35.50");
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::Required("name").to_string(), "name is required");
        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "Passwords do not match."
        );
    }
}
