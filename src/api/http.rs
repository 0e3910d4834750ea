//! reqwest implementation of [`RentalApi`]

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;

use super::{endpoint_url, paths, ApiError, ApiResult, RentalApi};
use crate::models::{
    Credentials, DashboardResponse, DashboardSummary, Expense, ExpenseDraft, Invoice,
    InvoiceDraft, LoginResponse, PendingUser, PendingUsersResponse, Property, PropertyDraft,
    RecordId, Registration, Tenant, TenantDraft,
};
use crate::session::Session;

/// HTTP client for the RentDesk backend
///
/// The bearer token is read from a session watch channel on every call, so
/// a login or logout elsewhere takes effect on the next request. Requests
/// are never retried; there is no timeout unless one is configured.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: watch::Receiver<Option<Session>>,
}

impl HttpClient {
    pub fn new(
        base_url: impl Into<String>,
        session: watch::Receiver<Option<Session>>,
    ) -> ApiResult<Self> {
        Self::with_timeout(base_url, session, None)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        session: watch::Receiver<Option<Session>>,
        timeout: Option<Duration>,
    ) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bearer(&self) -> ApiResult<String> {
        self.session
            .borrow()
            .as_ref()
            .map(Session::bearer)
            .ok_or(ApiError::NotAuthenticated)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(method = %method, path = %path, "API request");
        self.client.request(method, endpoint_url(&self.base_url, path))
    }

    fn authorized(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let bearer = self.bearer()?;
        Ok(self
            .request(method, path)
            .header(reqwest::header::AUTHORIZATION, bearer))
    }

    async fn execute(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("Request failed: {}", e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), error = %err, "API error response");
        Err(err)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.execute(self.authorized(Method::GET, path)?).await?;
        Self::decode(response).await
    }

    async fn send_json<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<()> {
        self.execute(self.authorized(method, path)?.json(body)).await?;
        Ok(())
    }

    async fn send_empty(&self, method: Method, path: &str) -> ApiResult<()> {
        self.execute(self.authorized(method, path)?).await?;
        Ok(())
    }
}

#[async_trait]
impl RentalApi for HttpClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        let response = self
            .execute(self.request(Method::POST, paths::LOGIN).json(credentials))
            .await?;
        Self::decode(response).await
    }

    async fn register(&self, registration: &Registration) -> ApiResult<()> {
        self.execute(self.request(Method::POST, paths::REGISTER).json(registration))
            .await?;
        Ok(())
    }

    async fn list_properties(&self) -> ApiResult<Vec<Property>> {
        self.get_json(paths::PROPERTIES).await
    }

    async fn get_property(&self, id: RecordId) -> ApiResult<Property> {
        self.get_json(&paths::record(paths::PROPERTIES, id)).await
    }

    async fn create_property(&self, draft: &PropertyDraft) -> ApiResult<()> {
        self.send_json(Method::POST, paths::PROPERTIES, draft).await
    }

    async fn update_property(&self, id: RecordId, draft: &PropertyDraft) -> ApiResult<()> {
        self.send_json(Method::PUT, &paths::record(paths::PROPERTIES, id), draft)
            .await
    }

    async fn delete_property(&self, id: RecordId) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &paths::record(paths::PROPERTIES, id))
            .await
    }

    async fn list_tenants(&self) -> ApiResult<Vec<Tenant>> {
        self.get_json(paths::TENANTS).await
    }

    async fn get_tenant(&self, id: RecordId) -> ApiResult<Tenant> {
        self.get_json(&paths::record(paths::TENANTS, id)).await
    }

    async fn create_tenant(&self, draft: &TenantDraft) -> ApiResult<()> {
        self.send_json(Method::POST, paths::TENANTS, draft).await
    }

    async fn update_tenant(&self, id: RecordId, draft: &TenantDraft) -> ApiResult<()> {
        self.send_json(Method::PUT, &paths::record(paths::TENANTS, id), draft)
            .await
    }

    async fn delete_tenant(&self, id: RecordId) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &paths::record(paths::TENANTS, id))
            .await
    }

    async fn list_invoices(&self) -> ApiResult<Vec<Invoice>> {
        self.get_json(paths::INVOICES).await
    }

    async fn get_invoice(&self, id: RecordId) -> ApiResult<Invoice> {
        self.get_json(&paths::record(paths::INVOICES, id)).await
    }

    async fn create_invoice(&self, draft: &InvoiceDraft) -> ApiResult<()> {
        self.send_json(Method::POST, paths::INVOICES, draft).await
    }

    async fn update_invoice(&self, id: RecordId, draft: &InvoiceDraft) -> ApiResult<()> {
        self.send_json(Method::PUT, &paths::record(paths::INVOICES, id), draft)
            .await
    }

    async fn delete_invoice(&self, id: RecordId) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &paths::record(paths::INVOICES, id))
            .await
    }

    async fn list_expenses(&self) -> ApiResult<Vec<Expense>> {
        self.get_json(paths::EXPENSES).await
    }

    async fn get_expense(&self, id: RecordId) -> ApiResult<Expense> {
        self.get_json(&paths::record(paths::EXPENSES, id)).await
    }

    async fn create_expense(&self, draft: &ExpenseDraft) -> ApiResult<()> {
        self.send_json(Method::POST, paths::EXPENSES, draft).await
    }

    async fn update_expense(&self, id: RecordId, draft: &ExpenseDraft) -> ApiResult<()> {
        self.send_json(Method::PUT, &paths::record(paths::EXPENSES, id), draft)
            .await
    }

    async fn delete_expense(&self, id: RecordId) -> ApiResult<()> {
        self.send_empty(Method::DELETE, &paths::record(paths::EXPENSES, id))
            .await
    }

    async fn dashboard(&self) -> ApiResult<DashboardSummary> {
        let response: DashboardResponse = self.get_json(paths::DASHBOARD).await?;
        Ok(response.summary)
    }

    async fn pending_users(&self) -> ApiResult<Vec<PendingUser>> {
        let response: PendingUsersResponse = self.get_json(paths::PENDING_USERS).await?;
        Ok(response.users)
    }

    async fn approve_user(&self, id: RecordId) -> ApiResult<()> {
        self.send_empty(Method::POST, &paths::approve_user(id)).await
    }

    async fn deny_user(&self, id: RecordId) -> ApiResult<()> {
        self.send_empty(Method::POST, &paths::deny_user(id)).await
    }
}
