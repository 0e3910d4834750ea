use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{wire, RecordId, ValidationError};

/// A tenant occupying a unit of a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    #[serde(with = "wire::count")]
    pub id: RecordId,
    #[serde(with = "wire::count")]
    pub property_id: RecordId,
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(with = "wire::date")]
    pub start_date: NaiveDate,
    #[serde(with = "wire::amount")]
    pub rent_amount: f64,
}

/// Create/update body for a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantDraft {
    #[serde(with = "wire::count")]
    pub property_id: RecordId,
    pub full_name: String,
    pub phone: String,
    pub address: String,
    #[serde(with = "wire::date")]
    pub start_date: NaiveDate,
    #[serde(with = "wire::amount")]
    pub rent_amount: f64,
}

impl Tenant {
    pub fn to_draft(&self) -> TenantDraft {
        TenantDraft {
            property_id: self.property_id,
            full_name: self.full_name.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            start_date: self.start_date,
            rent_amount: self.rent_amount,
        }
    }
}

impl TenantDraft {
    /// Build a draft from raw form fields
    pub fn from_form(
        property_id: &str,
        full_name: &str,
        phone: &str,
        address: &str,
        start_date: &str,
        rent_amount: &str,
    ) -> Result<Self, ValidationError> {
        if full_name.trim().is_empty() {
            return Err(ValidationError::Required("full_name"));
        }
        Ok(Self {
            property_id: wire::parse_id("property_id", property_id)?,
            full_name: full_name.trim().to_string(),
            phone: phone.trim().to_string(),
            address: address.trim().to_string(),
            start_date: wire::parse_date("start_date", start_date)?,
            rent_amount: wire::parse_amount("rent_amount", rent_amount)?,
        })
    }
}
