//! HTTP API Client
//!
//! Functions for communicating with the RentDesk REST API. Authenticated
//! calls read the bearer token from local storage right before sending.

use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use rentdesk::api::{endpoint_url, paths, DEFAULT_API_URL};
use rentdesk::models::{
    Credentials, DashboardResponse, DashboardSummary, LoginResponse, PendingUser,
    PendingUsersResponse, RecordId, Registration,
};
use rentdesk::session::SessionStore;
use rentdesk::{ApiError, ApiResult};

use crate::state::LocalStorage;

const API_URL_KEY: &str = "rentdesk_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    url.trim().trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(API_URL_KEY, url.trim());
    }
}

fn url(path: &str) -> String {
    endpoint_url(&get_api_base(), path)
}

fn bearer() -> ApiResult<String> {
    SessionStore::new(LocalStorage)
        .load()
        .map(|s| s.bearer())
        .ok_or(ApiError::NotAuthenticated)
}

fn authorized(builder: RequestBuilder) -> ApiResult<RequestBuilder> {
    Ok(builder.header("Authorization", &bearer()?))
}

fn with_body<B: Serialize>(builder: RequestBuilder, body: &B) -> ApiResult<Request> {
    builder
        .json(body)
        .map_err(|e| ApiError::Decode(format!("Request build error: {}", e)))
}

fn without_body(builder: RequestBuilder) -> ApiResult<Request> {
    builder
        .build()
        .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))
}

/// Send and return the body of a 2xx response
async fn send(request: Request) -> ApiResult<String> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response(status, &body));
    }

    response
        .text()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn send_json<T: DeserializeOwned>(request: Request) -> ApiResult<T> {
    let body = send(request).await?;
    Ok(serde_json::from_str(&body)?)
}

// ============ Auth ============

pub async fn login(credentials: &Credentials) -> ApiResult<LoginResponse> {
    send_json(with_body(Request::post(&url(paths::LOGIN)), credentials)?).await
}

pub async fn register(registration: &Registration) -> ApiResult<()> {
    send(with_body(Request::post(&url(paths::REGISTER)), registration)?).await?;
    Ok(())
}

// ============ Records ============

pub async fn list<T: DeserializeOwned>(collection: &str) -> ApiResult<Vec<T>> {
    send_json(without_body(authorized(Request::get(&url(collection)))?)?).await
}

pub async fn create<D: Serialize>(collection: &str, draft: &D) -> ApiResult<()> {
    send(with_body(authorized(Request::post(&url(collection)))?, draft)?).await?;
    Ok(())
}

pub async fn update<D: Serialize>(collection: &str, id: RecordId, draft: &D) -> ApiResult<()> {
    let path = paths::record(collection, id);
    send(with_body(authorized(Request::put(&url(&path)))?, draft)?).await?;
    Ok(())
}

pub async fn delete(collection: &str, id: RecordId) -> ApiResult<()> {
    let path = paths::record(collection, id);
    send(without_body(authorized(Request::delete(&url(&path)))?)?).await?;
    Ok(())
}

// ============ Dashboard ============

pub async fn fetch_dashboard() -> ApiResult<DashboardSummary> {
    let response: DashboardResponse =
        send_json(without_body(authorized(Request::get(&url(paths::DASHBOARD)))?)?).await?;
    Ok(response.summary)
}

// ============ Admin ============

pub async fn fetch_pending_users() -> ApiResult<Vec<PendingUser>> {
    let response: PendingUsersResponse =
        send_json(without_body(authorized(Request::get(&url(paths::PENDING_USERS)))?)?).await?;
    Ok(response.users)
}

pub async fn approve_user(id: RecordId) -> ApiResult<()> {
    let path = paths::approve_user(id);
    send(without_body(authorized(Request::post(&url(&path)))?)?).await?;
    Ok(())
}

pub async fn deny_user(id: RecordId) -> ApiResult<()> {
    let path = paths::deny_user(id);
    send(without_body(authorized(Request::post(&url(&path)))?)?).await?;
    Ok(())
}
