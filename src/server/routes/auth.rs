//! Auth Routes
//!
//! - POST /login - Exchange email and password for a token
//! - POST /register - Request an account (pending until an admin approves)
//!
//! Also home to the bearer-token extractors used by every protected route.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{Credentials, LoginResponse, RecordId};
use crate::server::dto::{MessageResponse, RegisterRequest};
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::{AccountStatus, AppState};
use crate::session::{encode_token, TokenClaims};

const INVALID_CREDENTIALS: &str = "Invalid email or password.";
const PENDING_APPROVAL: &str = "Your account is pending approval by an administrator.";

/// An authenticated caller
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: RecordId,
    pub email: String,
    pub is_admin: bool,
}

/// An authenticated administrator
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ServerError::Unauthorized("Missing bearer token.".to_string()))?;

        let db = state.db.read().await;
        let account = db
            .account_for_token(token)
            .ok_or_else(|| ServerError::Unauthorized("Invalid or expired token.".to_string()))?;

        Ok(AuthUser {
            id: account.id,
            email: account.email.clone(),
            is_admin: account.is_admin,
        })
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(ServerError::Forbidden("Admin access required.".to_string()));
        }
        Ok(AdminUser(user))
    }
}

/// POST /login
///
/// 401 for unknown accounts or a wrong password, 403 while the account
/// still awaits approval.
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> ServerResult<Json<LoginResponse>> {
    let Json(credentials) = payload?;

    let mut db = state.db.write().await;
    let account = db
        .find_account_by_email(&credentials.email)
        .filter(|a| a.password == credentials.password)
        .cloned()
        .ok_or_else(|| ServerError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if account.status == AccountStatus::Pending {
        return Err(ServerError::Forbidden(PENDING_APPROVAL.to_string()));
    }

    let claims = TokenClaims {
        sub: Some(account.id.to_string()),
        email: Some(account.email.clone()),
        is_admin: account.is_admin,
        exp: None,
    };
    let token = encode_token(&claims, &Uuid::new_v4().simple().to_string());
    db.tokens.insert(token.clone(), account.id);

    tracing::info!(account = account.id, admin = account.is_admin, "Login");

    Ok(Json(LoginResponse {
        token,
        is_admin: account.is_admin,
    }))
}

/// POST /register
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload?;

    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ServerError::Validation("A valid email is required.".to_string()));
    }
    if req.password.is_empty() {
        return Err(ServerError::Validation("Password is required.".to_string()));
    }

    let mut db = state.db.write().await;
    if db.find_account_by_email(email).is_some() {
        return Err(ServerError::Conflict("Email is already registered.".to_string()));
    }

    let id = db.add_account(email, &req.password, false, AccountStatus::Pending);
    tracing::info!(account = id, "Registration pending approval");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Registration received. An administrator must approve the account.",
        )),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/properties");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&parts_with(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts_with(Some("Bearer  "))), None);
        assert_eq!(bearer_token(&parts_with(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts_with(None)), None);
    }
}
