//! Record Routes
//!
//! The same five endpoints for every record collection:
//!
//! - GET /{collection} - List all records
//! - POST /{collection} - Create a record (server assigns the id)
//! - GET /{collection}/:id - Get a record
//! - PUT /{collection}/:id - Replace a record
//! - DELETE /{collection}/:id - Delete a record
//!
//! Collections are `properties`, `tenants`, `invoices` and `expenses`.
//! References are checked on write only; deleting a property or tenant
//! leaves dependent rows in place.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::models::{
    Expense, ExpenseDraft, Invoice, InvoiceDraft, Property, PropertyDraft, RecordId, Tenant,
    TenantDraft,
};
use crate::server::dto::MessageResponse;
use crate::server::error::{ServerError, ServerResult};
use crate::server::routes::auth::AuthUser;
use crate::server::state::{AppState, Database, Table};

/// A record type stored in one of the server's tables
pub trait StoredRecord: Clone + Serialize + Send + Sync + 'static {
    type Draft: DeserializeOwned + Send + 'static;

    /// Lowercase display noun ("property")
    const NOUN: &'static str;

    fn table(db: &Database) -> &Table<Self>;
    fn table_mut(db: &mut Database) -> &mut Table<Self>;
    fn build(id: RecordId, draft: Self::Draft) -> Self;

    /// Reject drafts the store should not accept
    fn validate(_draft: &Self::Draft, _db: &Database) -> ServerResult<()> {
        Ok(())
    }
}

fn not_found<R: StoredRecord>(id: RecordId) -> ServerError {
    ServerError::NotFound(format!("No {} with id {}.", R::NOUN, id))
}

/// GET /{collection}
pub async fn list<R: StoredRecord>(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<R>> {
    let db = state.db.read().await;
    Json(R::table(&db).list())
}

/// GET /{collection}/:id
pub async fn get<R: StoredRecord>(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ServerResult<Json<R>> {
    let Path(id) = id?;
    let db = state.db.read().await;
    R::table(&db)
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found::<R>(id))
}

/// POST /{collection}
pub async fn create<R: StoredRecord>(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<R::Draft>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<R>)> {
    let Json(draft) = payload?;

    let mut db = state.db.write().await;
    R::validate(&draft, &db)?;

    let table = R::table_mut(&mut db);
    let id = table.insert_with(|id| R::build(id, draft));
    let record = table
        .get(id)
        .cloned()
        .ok_or_else(|| ServerError::Internal(format!("{} {} was not stored", R::NOUN, id)))?;
    tracing::info!(account = user.id, id, "Created {}", R::NOUN);

    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /{collection}/:id
pub async fn update<R: StoredRecord>(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    id: Result<Path<RecordId>, PathRejection>,
    payload: Result<Json<R::Draft>, JsonRejection>,
) -> ServerResult<Json<R>> {
    let Path(id) = id?;
    let Json(draft) = payload?;

    let mut db = state.db.write().await;
    if !R::table(&db).contains(id) {
        return Err(not_found::<R>(id));
    }
    R::validate(&draft, &db)?;

    let record = R::build(id, draft);
    R::table_mut(&mut db).replace(id, record.clone());
    tracing::info!(account = user.id, id, "Updated {}", R::NOUN);

    Ok(Json(record))
}

/// DELETE /{collection}/:id
pub async fn delete<R: StoredRecord>(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ServerResult<Json<MessageResponse>> {
    let Path(id) = id?;

    let mut db = state.db.write().await;
    R::table_mut(&mut db)
        .remove(id)
        .ok_or_else(|| not_found::<R>(id))?;
    tracing::info!(account = user.id, id, "Deleted {}", R::NOUN);

    Ok(Json(MessageResponse::new(format!("Deleted {} {}.", R::NOUN, id))))
}

fn require(value: &str, field: &str) -> ServerResult<()> {
    if value.trim().is_empty() {
        return Err(ServerError::Validation(format!("{} is required.", field)));
    }
    Ok(())
}

fn non_negative(value: f64, field: &str) -> ServerResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ServerError::Validation(format!(
            "{} must be a non-negative number.",
            field
        )));
    }
    Ok(())
}

impl StoredRecord for Property {
    type Draft = PropertyDraft;
    const NOUN: &'static str = "property";

    fn table(db: &Database) -> &Table<Self> {
        &db.properties
    }

    fn table_mut(db: &mut Database) -> &mut Table<Self> {
        &mut db.properties
    }

    fn build(id: RecordId, draft: PropertyDraft) -> Self {
        Property {
            id,
            name: draft.name,
            address: draft.address,
            total_units: draft.total_units,
        }
    }

    fn validate(draft: &PropertyDraft, _db: &Database) -> ServerResult<()> {
        require(&draft.name, "Name")?;
        if draft.total_units < 0 {
            return Err(ServerError::Validation(
                "Total units must not be negative.".to_string(),
            ));
        }
        Ok(())
    }
}

impl StoredRecord for Tenant {
    type Draft = TenantDraft;
    const NOUN: &'static str = "tenant";

    fn table(db: &Database) -> &Table<Self> {
        &db.tenants
    }

    fn table_mut(db: &mut Database) -> &mut Table<Self> {
        &mut db.tenants
    }

    fn build(id: RecordId, draft: TenantDraft) -> Self {
        Tenant {
            id,
            property_id: draft.property_id,
            full_name: draft.full_name,
            phone: draft.phone,
            address: draft.address,
            start_date: draft.start_date,
            rent_amount: draft.rent_amount,
        }
    }

    fn validate(draft: &TenantDraft, db: &Database) -> ServerResult<()> {
        require(&draft.full_name, "Full name")?;
        non_negative(draft.rent_amount, "Rent amount")?;
        if !db.properties.contains(draft.property_id) {
            return Err(ServerError::Validation(format!(
                "No property with id {}.",
                draft.property_id
            )));
        }
        Ok(())
    }
}

impl StoredRecord for Invoice {
    type Draft = InvoiceDraft;
    const NOUN: &'static str = "invoice";

    fn table(db: &Database) -> &Table<Self> {
        &db.invoices
    }

    fn table_mut(db: &mut Database) -> &mut Table<Self> {
        &mut db.invoices
    }

    fn build(id: RecordId, draft: InvoiceDraft) -> Self {
        Invoice {
            id,
            tenant_id: draft.tenant_id,
            amount: draft.amount,
            due_date: draft.due_date,
            status: draft.status,
            paid_date: draft.paid_date,
        }
    }

    fn validate(draft: &InvoiceDraft, db: &Database) -> ServerResult<()> {
        non_negative(draft.amount, "Amount")?;
        if !db.tenants.contains(draft.tenant_id) {
            return Err(ServerError::Validation(format!(
                "No tenant with id {}.",
                draft.tenant_id
            )));
        }
        Ok(())
    }
}

impl StoredRecord for Expense {
    type Draft = ExpenseDraft;
    const NOUN: &'static str = "expense";

    fn table(db: &Database) -> &Table<Self> {
        &db.expenses
    }

    fn table_mut(db: &mut Database) -> &mut Table<Self> {
        &mut db.expenses
    }

    fn build(id: RecordId, draft: ExpenseDraft) -> Self {
        Expense {
            id,
            description: draft.description,
            amount: draft.amount,
            date: draft.date,
            category: draft.category,
        }
    }

    fn validate(draft: &ExpenseDraft, _db: &Database) -> ServerResult<()> {
        require(&draft.description, "Description")?;
        non_negative(draft.amount, "Amount")
    }
}
