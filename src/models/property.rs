use serde::{Deserialize, Serialize};

use super::{wire, RecordId, ValidationError};

/// A rental property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(with = "wire::count")]
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(with = "wire::count", default)]
    pub total_units: i64,
}

/// Create/update body for a property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub name: String,
    pub address: String,
    #[serde(with = "wire::count")]
    pub total_units: i64,
}

impl Property {
    /// Pre-fill the edit form from this record
    pub fn to_draft(&self) -> PropertyDraft {
        PropertyDraft {
            name: self.name.clone(),
            address: self.address.clone(),
            total_units: self.total_units,
        }
    }
}

impl PropertyDraft {
    /// Build a draft from raw form fields
    pub fn from_form(
        name: &str,
        address: &str,
        total_units: &str,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }
        Ok(Self {
            name: name.trim().to_string(),
            address: address.trim().to_string(),
            total_units: wire::parse_count("total_units", total_units)?,
        })
    }
}
