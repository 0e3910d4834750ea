use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::{wire, Property, RecordId, Tenant, ValidationError};

/// Placeholder shown when an enrichment join finds nothing
pub const NOT_AVAILABLE: &str = "N/A";

/// Invoice payment status
///
/// Transitions are not constrained: the edit form may set any status
/// regardless of the previous one, and `Paid` does not require a paid date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 3] = [
        InvoiceStatus::Pending,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    /// Display label for select options
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            other => Err(format!(
                "unknown invoice status '{}' (expected pending, paid or overdue)",
                other
            )),
        }
    }
}

/// A rent invoice issued to a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(with = "wire::count")]
    pub id: RecordId,
    #[serde(with = "wire::count")]
    pub tenant_id: RecordId,
    #[serde(with = "wire::amount")]
    pub amount: f64,
    #[serde(with = "wire::date")]
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(with = "wire::optional_date", default)]
    pub paid_date: Option<NaiveDate>,
}

/// Create/update body for an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    #[serde(with = "wire::count")]
    pub tenant_id: RecordId,
    #[serde(with = "wire::amount")]
    pub amount: f64,
    #[serde(with = "wire::date")]
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(with = "wire::optional_date", default)]
    pub paid_date: Option<NaiveDate>,
}

impl Invoice {
    pub fn to_draft(&self) -> InvoiceDraft {
        InvoiceDraft {
            tenant_id: self.tenant_id,
            amount: self.amount,
            due_date: self.due_date,
            status: self.status,
            paid_date: self.paid_date,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }
}

impl InvoiceDraft {
    /// Build a draft from raw form fields
    ///
    /// Status and paid date are taken as entered: a paid invoice without a
    /// paid date is accepted, and a paid date is kept whatever the status.
    pub fn from_form(
        tenant_id: &str,
        amount: &str,
        due_date: &str,
        status: &str,
        paid_date: &str,
    ) -> Result<Self, ValidationError> {
        let status = if status.trim().is_empty() {
            InvoiceStatus::default()
        } else {
            status.parse().map_err(|_| ValidationError::InvalidChoice {
                field: "status",
                value: status.to_string(),
            })?
        };

        let paid_date = wire::parse_optional_date("paid_date", paid_date)?;

        Ok(Self {
            tenant_id: wire::parse_id("tenant_id", tenant_id)?,
            amount: wire::parse_amount("amount", amount)?,
            due_date: wire::parse_date("due_date", due_date)?,
            status,
            paid_date,
        })
    }
}

/// An invoice joined with its tenant and property display names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedInvoice {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub tenant_name: String,
    pub property_name: String,
}

impl EnrichedInvoice {
    /// Join one invoice against already-fetched tenants and properties
    pub fn enrich(invoice: Invoice, tenants: &[Tenant], properties: &[Property]) -> Self {
        let tenant = tenants.iter().find(|t| t.id == invoice.tenant_id);
        let property = tenant.and_then(|t| properties.iter().find(|p| p.id == t.property_id));

        Self {
            tenant_name: tenant
                .map(|t| t.full_name.clone())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            property_name: property
                .map(|p| p.name.clone())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            invoice,
        }
    }

    /// Join a whole list; lookups go through maps so large lists stay linear
    pub fn enrich_all(
        invoices: Vec<Invoice>,
        tenants: &[Tenant],
        properties: &[Property],
    ) -> Vec<Self> {
        let tenants_by_id: HashMap<RecordId, &Tenant> = tenants.iter().map(|t| (t.id, t)).collect();
        let properties_by_id: HashMap<RecordId, &Property> =
            properties.iter().map(|p| (p.id, p)).collect();

        invoices
            .into_iter()
            .map(|invoice| {
                let tenant = tenants_by_id.get(&invoice.tenant_id).copied();
                let property = tenant.and_then(|t| properties_by_id.get(&t.property_id).copied());
                Self {
                    tenant_name: tenant
                        .map(|t| t.full_name.clone())
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                    property_name: property
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                    invoice,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(id: RecordId, property_id: RecordId, name: &str) -> Tenant {
        Tenant {
            id,
            property_id,
            full_name: name.to_string(),
            phone: String::new(),
            address: String::new(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            rent_amount: 500.0,
        }
    }

    fn property(id: RecordId, name: &str) -> Property {
        Property {
            id,
            name: name.to_string(),
            address: String::new(),
            total_units: 1,
        }
    }

    fn invoice(id: RecordId, tenant_id: RecordId) -> Invoice {
        Invoice {
            id,
            tenant_id,
            amount: 500.0,
            due_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            status: InvoiceStatus::Pending,
            paid_date: None,
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&InvoiceStatus::Overdue).unwrap(), "\"overdue\"");
        assert_eq!("PAID".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
        assert!("void".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_invoice_empty_paid_date_is_none() {
        let json = r#"{"id": 1, "tenant_id": 2, "amount": 100, "due_date": "2024-02-01", "status": "pending", "paid_date": ""}"#;
        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.paid_date, None);
    }

    #[test]
    fn test_paid_without_paid_date_is_accepted() {
        let draft = InvoiceDraft::from_form("4", "950", "2024-03-01", "paid", "").unwrap();
        assert_eq!(draft.status, InvoiceStatus::Paid);
        assert_eq!(draft.paid_date, None);
    }

    #[test]
    fn test_paid_date_kept_for_other_statuses() {
        let draft =
            InvoiceDraft::from_form("4", "950", "2024-03-01", "overdue", "2024-03-05").unwrap();
        assert_eq!(draft.status, InvoiceStatus::Overdue);
        assert_eq!(draft.paid_date, NaiveDate::from_ymd_opt(2024, 3, 5));
    }

    #[test]
    fn test_enrich_joins_names() {
        let tenants = vec![tenant(10, 1, "Lina")];
        let properties = vec![property(1, "House B")];

        let enriched = EnrichedInvoice::enrich(invoice(1, 10), &tenants, &properties);
        assert_eq!(enriched.tenant_name, "Lina");
        assert_eq!(enriched.property_name, "House B");
    }

    #[test]
    fn test_enrich_missing_joins_fall_back() {
        let tenants = vec![tenant(10, 99, "Lina")];
        let all = EnrichedInvoice::enrich_all(vec![invoice(1, 10), invoice(2, 11)], &tenants, &[]);

        assert_eq!(all[0].tenant_name, "Lina");
        assert_eq!(all[0].property_name, NOT_AVAILABLE);
        assert_eq!(all[1].tenant_name, NOT_AVAILABLE);
        assert_eq!(all[1].property_name, NOT_AVAILABLE);
    }

    #[test]
    fn test_enriched_serializes_flat() {
        let enriched = EnrichedInvoice::enrich(invoice(1, 10), &[], &[]);
        let value = serde_json::to_value(&enriched).unwrap();
        assert_eq!(value["tenant_id"], 10);
        assert_eq!(value["tenant_name"], NOT_AVAILABLE);
    }
}
