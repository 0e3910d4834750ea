//! Session handling
//!
//! The session is the only state shared between pages: an opaque bearer
//! token plus an admin flag, persisted under two storage keys (`token` and
//! `isAdmin`). Storage is abstracted behind [`SessionStorage`] so the same
//! logic runs over browser local storage, a JSON file for the CLI, or an
//! in-memory map in tests.
//!
//! [`SessionContext`] wraps the store with a watch channel: it is created
//! once, handed to whoever needs it, and every login/logout is observable
//! through [`SessionContext::subscribe`].

mod claims;
mod context;
mod storage;
mod store;

pub use claims::{decode_claims, encode_token, TokenClaims};
pub use context::SessionContext;
#[cfg(feature = "native")]
pub use storage::FileStorage;
pub use storage::{MemoryStorage, SessionStorage};
pub use store::{SessionStore, ADMIN_KEY, TOKEN_KEY};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::LoginResponse;

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub is_admin: bool,
}

impl Session {
    pub fn new(token: impl Into<String>, is_admin: bool) -> Self {
        Self {
            token: token.into(),
            is_admin,
        }
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Claims carried by the token, if it is decodable
    pub fn claims(&self) -> Option<TokenClaims> {
        decode_claims(&self.token)
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Session::new(response.token, response.is_admin)
    }
}

/// Errors from the session storage backends
#[derive(Error, Debug)]
pub enum SessionError {
    /// Backend rejected the operation (quota, private mode, no window)
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt session file {path:?}: {error}")]
    Corrupt { path: PathBuf, error: String },
}

pub type SessionResult<T> = Result<T, SessionError>;
