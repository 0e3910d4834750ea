#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;

use rentdesk::api::{ApiError, ApiResult, RentalApi};
use rentdesk::config::ServerConfig;
use rentdesk::models::{
    Credentials, DashboardSummary, Expense, ExpenseDraft, Invoice, InvoiceDraft, LoginResponse,
    PendingUser, Property, PropertyDraft, RecordId, Registration, Tenant, TenantDraft,
};
use rentdesk::server::{build_router, AppState};

/// Start the development server on an ephemeral port; returns its base URL
pub async fn spawn_server(config: ServerConfig) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = build_router(AppState::new(config));

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// In-memory property API with switchable failures
///
/// Only the property endpoints keep state; everything else is empty.
#[derive(Default)]
pub struct MockApi {
    properties: Mutex<Vec<Property>>,
    next_id: Mutex<RecordId>,
    failure: Mutex<Option<ApiError>>,
    calls: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn with_properties(properties: Vec<Property>) -> Self {
        let next_id = properties.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            properties: Mutex::new(properties),
            next_id: Mutex::new(next_id),
            ..Default::default()
        }
    }

    /// Make every following call fail with `err`
    pub fn fail_with(&self, err: ApiError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored(&self) -> Vec<Property> {
        self.properties.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call.into());
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn property(id: RecordId, name: &str) -> Property {
    Property {
        id,
        name: name.to_string(),
        address: format!("{} Main St", id),
        total_units: 2,
    }
}

fn missing(what: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        message: format!("No {}.", what),
    }
}

#[async_trait]
impl RentalApi for MockApi {
    async fn login(&self, _credentials: &Credentials) -> ApiResult<LoginResponse> {
        self.record("POST /login")?;
        Ok(LoginResponse {
            token: "a.b.c".to_string(),
            is_admin: false,
        })
    }

    async fn register(&self, _registration: &Registration) -> ApiResult<()> {
        self.record("POST /register")
    }

    async fn list_properties(&self) -> ApiResult<Vec<Property>> {
        self.record("GET /properties")?;
        Ok(self.stored())
    }

    async fn get_property(&self, id: RecordId) -> ApiResult<Property> {
        self.record(format!("GET /properties/{}", id))?;
        self.stored()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| missing("property"))
    }

    async fn create_property(&self, draft: &PropertyDraft) -> ApiResult<()> {
        self.record("POST /properties")?;
        let mut next_id = self.next_id.lock().unwrap();
        let id = (*next_id).max(1);
        *next_id = id + 1;
        self.properties.lock().unwrap().push(Property {
            id,
            name: draft.name.clone(),
            address: draft.address.clone(),
            total_units: draft.total_units,
        });
        Ok(())
    }

    async fn update_property(&self, id: RecordId, draft: &PropertyDraft) -> ApiResult<()> {
        self.record(format!("PUT /properties/{}", id))?;
        let mut properties = self.properties.lock().unwrap();
        let existing = properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| missing("property"))?;
        existing.name = draft.name.clone();
        existing.address = draft.address.clone();
        existing.total_units = draft.total_units;
        Ok(())
    }

    async fn delete_property(&self, id: RecordId) -> ApiResult<()> {
        self.record(format!("DELETE /properties/{}", id))?;
        self.properties.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn list_tenants(&self) -> ApiResult<Vec<Tenant>> {
        self.record("GET /tenants")?;
        Ok(Vec::new())
    }

    async fn get_tenant(&self, _id: RecordId) -> ApiResult<Tenant> {
        Err(missing("tenant"))
    }

    async fn create_tenant(&self, _draft: &TenantDraft) -> ApiResult<()> {
        self.record("POST /tenants")
    }

    async fn update_tenant(&self, id: RecordId, _draft: &TenantDraft) -> ApiResult<()> {
        self.record(format!("PUT /tenants/{}", id))
    }

    async fn delete_tenant(&self, id: RecordId) -> ApiResult<()> {
        self.record(format!("DELETE /tenants/{}", id))
    }

    async fn list_invoices(&self) -> ApiResult<Vec<Invoice>> {
        self.record("GET /invoices")?;
        Ok(Vec::new())
    }

    async fn get_invoice(&self, _id: RecordId) -> ApiResult<Invoice> {
        Err(missing("invoice"))
    }

    async fn create_invoice(&self, _draft: &InvoiceDraft) -> ApiResult<()> {
        self.record("POST /invoices")
    }

    async fn update_invoice(&self, id: RecordId, _draft: &InvoiceDraft) -> ApiResult<()> {
        self.record(format!("PUT /invoices/{}", id))
    }

    async fn delete_invoice(&self, id: RecordId) -> ApiResult<()> {
        self.record(format!("DELETE /invoices/{}", id))
    }

    async fn list_expenses(&self) -> ApiResult<Vec<Expense>> {
        self.record("GET /expenses")?;
        Ok(Vec::new())
    }

    async fn get_expense(&self, _id: RecordId) -> ApiResult<Expense> {
        Err(missing("expense"))
    }

    async fn create_expense(&self, _draft: &ExpenseDraft) -> ApiResult<()> {
        self.record("POST /expenses")
    }

    async fn update_expense(&self, id: RecordId, _draft: &ExpenseDraft) -> ApiResult<()> {
        self.record(format!("PUT /expenses/{}", id))
    }

    async fn delete_expense(&self, id: RecordId) -> ApiResult<()> {
        self.record(format!("DELETE /expenses/{}", id))
    }

    async fn dashboard(&self) -> ApiResult<DashboardSummary> {
        self.record("GET /dashboard")?;
        Ok(DashboardSummary::default())
    }

    async fn pending_users(&self) -> ApiResult<Vec<PendingUser>> {
        self.record("GET /admin/users/pending")?;
        Ok(Vec::new())
    }

    async fn approve_user(&self, id: RecordId) -> ApiResult<()> {
        self.record(format!("POST /admin/users/{}/approve", id))
    }

    async fn deny_user(&self, id: RecordId) -> ApiResult<()> {
        self.record(format!("POST /admin/users/{}/deny", id))
    }
}
