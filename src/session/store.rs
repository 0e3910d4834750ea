use super::{decode_claims, Session, SessionResult, SessionStorage};

/// Storage key of the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage key of the admin flag (`"true"` / `"false"`)
pub const ADMIN_KEY: &str = "isAdmin";

/// Reads and writes the [`Session`] through a [`SessionStorage`]
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the persisted session
    ///
    /// A missing or blank token means there is no session. The stored admin
    /// flag wins; when it is missing or unparseable the token's claims are
    /// consulted, and a token that cannot be decoded counts as non-admin.
    pub fn load(&self) -> Option<Session> {
        let token = self.storage.get_item(TOKEN_KEY)?;
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        let is_admin = self
            .storage
            .get_item(ADMIN_KEY)
            .and_then(|raw| parse_flag(&raw))
            .unwrap_or_else(|| decode_claims(token).map(|c| c.is_admin).unwrap_or(false));

        Some(Session::new(token, is_admin))
    }

    pub fn save(&self, session: &Session) -> SessionResult<()> {
        self.storage.set_item(TOKEN_KEY, &session.token)?;
        self.storage
            .set_item(ADMIN_KEY, if session.is_admin { "true" } else { "false" })?;
        Ok(())
    }

    /// Remove both keys; the second is attempted even if the first fails
    pub fn clear(&self) -> SessionResult<()> {
        let token = self.storage.remove_item(TOKEN_KEY);
        let admin = self.storage.remove_item(ADMIN_KEY);
        token.and(admin)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
