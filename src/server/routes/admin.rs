//! Admin Routes
//!
//! Account approval queue. Every route requires an admin token.
//!
//! - GET /admin/users/pending - Accounts awaiting approval
//! - POST /admin/users/:id/approve - Activate a pending account
//! - POST /admin/users/:id/deny - Remove a pending account

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use std::sync::Arc;

use crate::models::{PendingUsersResponse, RecordId};
use crate::server::dto::MessageResponse;
use crate::server::error::{ServerError, ServerResult};
use crate::server::routes::auth::AdminUser;
use crate::server::state::{Account, AccountStatus, AppState, Database};

/// GET /admin/users/pending
pub async fn list_pending(
    _admin: AdminUser,
    State(state): State<Arc<AppState>>,
) -> Json<PendingUsersResponse> {
    let db = state.db.read().await;
    Json(PendingUsersResponse {
        users: db.pending_users(),
    })
}

/// POST /admin/users/:id/approve
pub async fn approve_user(
    AdminUser(admin): AdminUser,
    State(state): State<Arc<AppState>>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ServerResult<Json<MessageResponse>> {
    let Path(id) = id?;

    let mut db = state.db.write().await;
    let mut account = pending_account(&db, id)?;
    account.status = AccountStatus::Active;
    let email = account.email.clone();
    db.accounts.replace(id, account);

    tracing::info!(admin = admin.id, account = id, "Approved account");
    Ok(Json(MessageResponse::new(format!("Approved {}.", email))))
}

/// POST /admin/users/:id/deny
pub async fn deny_user(
    AdminUser(admin): AdminUser,
    State(state): State<Arc<AppState>>,
    id: Result<Path<RecordId>, PathRejection>,
) -> ServerResult<Json<MessageResponse>> {
    let Path(id) = id?;

    let mut db = state.db.write().await;
    let account = pending_account(&db, id)?;
    db.accounts.remove(id);
    db.revoke_tokens(id);

    tracing::info!(admin = admin.id, account = id, "Denied account");
    Ok(Json(MessageResponse::new(format!("Denied {}.", account.email))))
}

fn pending_account(db: &Database, id: RecordId) -> ServerResult<Account> {
    let account = db
        .accounts
        .get(id)
        .ok_or_else(|| ServerError::NotFound(format!("No user with id {}.", id)))?;

    if account.status != AccountStatus::Pending {
        return Err(ServerError::Validation(format!(
            "User {} is not awaiting approval.",
            id
        )));
    }
    Ok(account.clone())
}
