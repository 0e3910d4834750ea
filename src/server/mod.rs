//! Development API Server
//!
//! An in-memory implementation of the RentDesk REST API, built with Axum.
//! It lets the CLI and the web dashboard run end to end without the real
//! backend. Nothing is persisted across restarts.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /login` - Exchange credentials for `{token, isAdmin}`
//! - `POST /register` - Request an account
//!
//! ## Records (bearer token)
//! - `GET /properties`, `POST /properties`
//! - `GET /properties/:id`, `PUT /properties/:id`, `DELETE /properties/:id`
//! - same for `/tenants`, `/invoices` and `/expenses`
//! - `GET /dashboard` - Totals, chart series and recent activity
//!
//! ## Admin (admin bearer token)
//! - `GET /admin/users/pending` - Approval queue
//! - `POST /admin/users/:id/approve` - Approve an account
//! - `POST /admin/users/:id/deny` - Deny an account
//!
//! ## Health
//! - `GET /health` - Liveness and uptime
//!
//! # Example
//!
//! ```rust,ignore
//! use rentdesk::config::ServerConfig;
//! use rentdesk::server::{serve, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     serve(AppState::new(config.clone()), &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::paths;
use crate::config::ServerConfig;
use crate::models::{Expense, Invoice, Property, Tenant};
use routes::records::{self, StoredRecord};

/// The five record endpoints for one collection
fn record_routes<R: StoredRecord>(collection: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(collection, get(records::list::<R>).post(records::create::<R>))
        .route(
            &format!("{}/:id", collection),
            get(records::get::<R>)
                .put(records::update::<R>)
                .delete(records::delete::<R>),
        )
}

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        // Auth routes
        .route(paths::LOGIN, post(routes::auth::login))
        .route(paths::REGISTER, post(routes::auth::register))
        // Record routes
        .merge(record_routes::<Property>(paths::PROPERTIES))
        .merge(record_routes::<Tenant>(paths::TENANTS))
        .merge(record_routes::<Invoice>(paths::INVOICES))
        .merge(record_routes::<Expense>(paths::EXPENSES))
        .route(paths::DASHBOARD, get(routes::dashboard::get_dashboard))
        // Admin routes
        .route(paths::PENDING_USERS, get(routes::admin::list_pending))
        .route("/admin/users/:id/approve", post(routes::admin::approve_user))
        .route("/admin/users/:id/deny", post(routes::admin::deny_user))
        // Health
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // the dashboard is served from another origin
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ServerConfig) -> ServerResult<()> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("RentDesk API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("RentDesk API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoginResponse, PendingUsersResponse};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        build_router(AppState::new(ServerConfig::default()))
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn login(app: &Router, email: &str, password: &str) -> Response {
        let body = serde_json::json!({ "email": email, "password": password }).to_string();
        app.clone()
            .oneshot(json_request("POST", "/login", None, &body))
            .await
            .unwrap()
    }

    async fn admin_token(app: &Router) -> String {
        let response = login(app, "admin@rentdesk.local", "admin").await;
        assert_eq!(response.status(), StatusCode::OK);
        let login: LoginResponse = read_json(response).await;
        assert!(login.is_admin);
        login.token
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/health", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = create_test_app();

        let response = login(&app, "admin@rentdesk.local", "nope").await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = read_json(response).await;
        assert_eq!(body["error"], "Invalid email or password.");
    }

    #[tokio::test]
    async fn test_login_token_carries_admin_claim() {
        let app = create_test_app();

        let token = admin_token(&app).await;

        let claims = crate::session::decode_claims(&token).unwrap();
        assert!(claims.is_admin);
        assert_eq!(claims.email.as_deref(), Some("admin@rentdesk.local"));
    }

    #[tokio::test]
    async fn test_registration_approval_flow() {
        let app = create_test_app();
        let admin = admin_token(&app).await;

        let body = r#"{"email": "owner@example.com", "password": "pw"}"#;
        let response = app
            .clone()
            .oneshot(json_request("POST", "/register", None, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // Pending accounts cannot log in yet
        let response = login(&app, "owner@example.com", "pw").await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(get_request("/admin/users/pending", Some(&admin)))
            .await
            .unwrap();
        let pending: PendingUsersResponse = read_json(response).await;
        assert_eq!(pending.users.len(), 1);
        let id = pending.users[0].id;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/admin/users/{}/approve", id),
                Some(&admin),
                "",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = login(&app, "owner@example.com", "pw").await;
        assert_eq!(response.status(), StatusCode::OK);
        let owner: LoginResponse = read_json(response).await;
        assert!(!owner.is_admin);
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let app = create_test_app();

        let body = r#"{"email": "Admin@rentdesk.local", "password": "pw"}"#;
        let response = app
            .oneshot(json_request("POST", "/register", None, body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_records_require_token() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(get_request("/properties", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(get_request("/properties", Some("forged")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_routes_require_admin() {
        let app = create_test_app();
        let admin = admin_token(&app).await;

        let body = r#"{"email": "owner@example.com", "password": "pw"}"#;
        app.clone()
            .oneshot(json_request("POST", "/register", None, body))
            .await
            .unwrap();
        app.clone()
            .oneshot(json_request("POST", "/admin/users/2/approve", Some(&admin), ""))
            .await
            .unwrap();
        let owner: LoginResponse = read_json(login(&app, "owner@example.com", "pw").await).await;

        let response = app
            .oneshot(get_request("/admin/users/pending", Some(&owner.token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_property_crud() {
        let app = create_test_app();
        let token = admin_token(&app).await;

        let body = r#"{"name": "Apartment A", "address": "123 Main St", "total_units": 4}"#;
        let response = app
            .clone()
            .oneshot(json_request("POST", "/properties", Some(&token), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Property = read_json(response).await;
        assert_eq!(created.id, 1);

        let body = r#"{"name": "Apartment A", "address": "125 Main St", "total_units": 6}"#;
        let response = app
            .clone()
            .oneshot(json_request("PUT", "/properties/1", Some(&token), body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get_request("/properties/1", Some(&token)))
            .await
            .unwrap();
        let fetched: Property = read_json(response).await;
        assert_eq!(fetched.total_units, 6);

        let response = app
            .clone()
            .oneshot(json_request("DELETE", "/properties/1", Some(&token), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(get_request("/properties/1", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tenant_requires_existing_property() {
        let app = create_test_app();
        let token = admin_token(&app).await;

        let body = r#"{"property_id": 42, "full_name": "Sara", "phone": "", "address": "",
                       "start_date": "2024-01-01", "rent_amount": 900}"#;
        let response = app
            .oneshot(json_request("POST", "/tenants", Some(&token), body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_json(response).await;
        assert_eq!(body["error"], "No property with id 42.");
    }

    #[tokio::test]
    async fn test_malformed_body_is_error_json() {
        let app = create_test_app();
        let token = admin_token(&app).await;

        let response = app
            .oneshot(json_request("POST", "/expenses", Some(&token), "not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = read_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let app = build_router(AppState::new(ServerConfig {
            seed_sample_data: true,
            ..Default::default()
        }));
        let token = admin_token(&app).await;

        let response = app
            .oneshot(get_request("/dashboard", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = read_json(response).await;
        assert_eq!(body["summary"]["totalProperties"], 3);
        assert_eq!(body["summary"]["totalTenants"], 3);
        assert_eq!(body["summary"]["chartData"]["labels"].as_array().map(Vec::len), Some(6));
    }
}
