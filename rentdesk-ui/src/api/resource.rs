//! Record types managed by the CRUD pages

use serde::de::DeserializeOwned;
use serde::Serialize;

use rentdesk::api::paths;
use rentdesk::models::{
    Expense, ExpenseDraft, Invoice, InvoiceDraft, Property, PropertyDraft, RecordId, Tenant,
    TenantDraft,
};

/// A record with a REST collection of its own
pub trait Resource: Clone + DeserializeOwned + 'static {
    type Draft: Clone + Serialize + 'static;

    /// Collection path ("/properties")
    const COLLECTION: &'static str;
    /// Lowercase display noun ("property")
    const NOUN: &'static str;

    fn id(&self) -> RecordId;
    fn to_draft(&self) -> Self::Draft;
}

impl Resource for Property {
    type Draft = PropertyDraft;
    const COLLECTION: &'static str = paths::PROPERTIES;
    const NOUN: &'static str = "property";

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_draft(&self) -> PropertyDraft {
        Property::to_draft(self)
    }
}

impl Resource for Tenant {
    type Draft = TenantDraft;
    const COLLECTION: &'static str = paths::TENANTS;
    const NOUN: &'static str = "tenant";

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_draft(&self) -> TenantDraft {
        Tenant::to_draft(self)
    }
}

impl Resource for Invoice {
    type Draft = InvoiceDraft;
    const COLLECTION: &'static str = paths::INVOICES;
    const NOUN: &'static str = "invoice";

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_draft(&self) -> InvoiceDraft {
        Invoice::to_draft(self)
    }
}

impl Resource for Expense {
    type Draft = ExpenseDraft;
    const COLLECTION: &'static str = paths::EXPENSES;
    const NOUN: &'static str = "expense";

    fn id(&self) -> RecordId {
        self.id
    }

    fn to_draft(&self) -> ExpenseDraft {
        Expense::to_draft(self)
    }
}
