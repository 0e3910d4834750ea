//! RentDesk REST API client
//!
//! One typed method per backend endpoint, behind the [`RentalApi`] trait so
//! pages and commands can be exercised against a mock.
//!
//! # Endpoints
//!
//! ## Auth (no token)
//! - `POST /login` - `{email, password}` → `{token, isAdmin}`
//! - `POST /register` - `{email, password}`
//!
//! ## Records (bearer token)
//! - `GET/POST /properties`, `GET/PUT/DELETE /properties/:id`
//! - `GET/POST /tenants`, `GET/PUT/DELETE /tenants/:id`
//! - `GET/POST /invoices`, `GET/PUT/DELETE /invoices/:id`
//! - `GET/POST /expenses`, `GET/PUT/DELETE /expenses/:id`
//! - `GET /dashboard` - `{summary: {...}}`
//!
//! ## Admin (admin bearer token)
//! - `GET /admin/users/pending` - `{users: [...]}`
//! - `POST /admin/users/:id/approve`
//! - `POST /admin/users/:id/deny`
//!
//! Error responses carry `{"error": "..."}`.

pub mod error;
#[cfg(feature = "native")]
pub mod http;

pub use error::{ApiError, ApiResult, ErrorBody, FALLBACK_MESSAGE, NETWORK_MESSAGE};
#[cfg(feature = "native")]
pub use http::HttpClient;

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Endpoint paths, shared by every client and the development server
pub mod paths {
    use crate::models::RecordId;

    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
    pub const PROPERTIES: &str = "/properties";
    pub const TENANTS: &str = "/tenants";
    pub const INVOICES: &str = "/invoices";
    pub const EXPENSES: &str = "/expenses";
    pub const DASHBOARD: &str = "/dashboard";
    pub const PENDING_USERS: &str = "/admin/users/pending";

    /// `/{collection}/{id}`
    pub fn record(collection: &str, id: RecordId) -> String {
        format!("{}/{}", collection, id)
    }

    pub fn approve_user(id: RecordId) -> String {
        format!("/admin/users/{}/approve", id)
    }

    pub fn deny_user(id: RecordId) -> String {
        format!("/admin/users/{}/deny", id)
    }
}

/// Join a base URL and an endpoint path without doubling slashes
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(feature = "native")]
mod rental {
    use async_trait::async_trait;

    use super::ApiResult;
    use crate::models::{
        Credentials, DashboardSummary, Expense, ExpenseDraft, Invoice, InvoiceDraft,
        LoginResponse, PendingUser, Property, PropertyDraft, RecordId, Registration, Tenant,
        TenantDraft,
    };

    /// Typed interface to the REST backend
    ///
    /// Create/update return nothing: callers refetch the list afterwards.
    #[async_trait]
    pub trait RentalApi: Send + Sync {
        // Auth
        async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse>;
        async fn register(&self, registration: &Registration) -> ApiResult<()>;

        // Properties
        async fn list_properties(&self) -> ApiResult<Vec<Property>>;
        async fn get_property(&self, id: RecordId) -> ApiResult<Property>;
        async fn create_property(&self, draft: &PropertyDraft) -> ApiResult<()>;
        async fn update_property(&self, id: RecordId, draft: &PropertyDraft) -> ApiResult<()>;
        async fn delete_property(&self, id: RecordId) -> ApiResult<()>;

        // Tenants
        async fn list_tenants(&self) -> ApiResult<Vec<Tenant>>;
        async fn get_tenant(&self, id: RecordId) -> ApiResult<Tenant>;
        async fn create_tenant(&self, draft: &TenantDraft) -> ApiResult<()>;
        async fn update_tenant(&self, id: RecordId, draft: &TenantDraft) -> ApiResult<()>;
        async fn delete_tenant(&self, id: RecordId) -> ApiResult<()>;

        // Invoices
        async fn list_invoices(&self) -> ApiResult<Vec<Invoice>>;
        async fn get_invoice(&self, id: RecordId) -> ApiResult<Invoice>;
        async fn create_invoice(&self, draft: &InvoiceDraft) -> ApiResult<()>;
        async fn update_invoice(&self, id: RecordId, draft: &InvoiceDraft) -> ApiResult<()>;
        async fn delete_invoice(&self, id: RecordId) -> ApiResult<()>;

        // Expenses
        async fn list_expenses(&self) -> ApiResult<Vec<Expense>>;
        async fn get_expense(&self, id: RecordId) -> ApiResult<Expense>;
        async fn create_expense(&self, draft: &ExpenseDraft) -> ApiResult<()>;
        async fn update_expense(&self, id: RecordId, draft: &ExpenseDraft) -> ApiResult<()>;
        async fn delete_expense(&self, id: RecordId) -> ApiResult<()>;

        // Dashboard
        async fn dashboard(&self) -> ApiResult<DashboardSummary>;

        // Admin
        async fn pending_users(&self) -> ApiResult<Vec<PendingUser>>;
        async fn approve_user(&self, id: RecordId) -> ApiResult<()>;
        async fn deny_user(&self, id: RecordId) -> ApiResult<()>;
    }
}

#[cfg(feature = "native")]
pub use rental::RentalApi;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            endpoint_url("http://localhost:5000/", "/properties"),
            "http://localhost:5000/properties"
        );
        assert_eq!(
            endpoint_url("http://api.local/v1", &paths::record(paths::TENANTS, 4)),
            "http://api.local/v1/tenants/4"
        );
        assert_eq!(paths::approve_user(9), "/admin/users/9/approve");
    }
}
