use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{wire, RecordId, ValidationError};

/// An operating expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(with = "wire::count")]
    pub id: RecordId,
    pub description: String,
    #[serde(with = "wire::amount")]
    pub amount: f64,
    #[serde(with = "wire::date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub category: String,
}

/// Create/update body for an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub description: String,
    #[serde(with = "wire::amount")]
    pub amount: f64,
    #[serde(with = "wire::date")]
    pub date: NaiveDate,
    pub category: String,
}

impl Expense {
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            description: self.description.clone(),
            amount: self.amount,
            date: self.date,
            category: self.category.clone(),
        }
    }
}

impl ExpenseDraft {
    pub fn from_form(
        description: &str,
        amount: &str,
        date: &str,
        category: &str,
    ) -> Result<Self, ValidationError> {
        if description.trim().is_empty() {
            return Err(ValidationError::Required("description"));
        }
        Ok(Self {
            description: description.trim().to_string(),
            amount: wire::parse_amount("amount", amount)?,
            date: wire::parse_date("date", date)?,
            category: category.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_draft_from_form() {
        let draft = ExpenseDraft::from_form("Plumbing", "120.5", "2024-04-02", "Repairs").unwrap();
        assert_eq!(draft.amount, 120.5);
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());

        assert_eq!(
            ExpenseDraft::from_form("Plumbing", "120.5", "", "Repairs"),
            Err(ValidationError::Required("date"))
        );
    }
}
