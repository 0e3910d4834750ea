use tokio::sync::watch;

use super::{Session, SessionResult, SessionStorage, SessionStore};

/// Shared session handle
///
/// Holds the persisted store and a watch channel carrying the current
/// session. There is a single writer (whoever performs login/logout);
/// receivers from [`subscribe`](Self::subscribe) never block it and always
/// observe the latest value.
#[derive(Debug)]
pub struct SessionContext<S> {
    store: SessionStore<S>,
    tx: watch::Sender<Option<Session>>,
}

impl<S: SessionStorage> SessionContext<S> {
    /// Create the context, seeding it from whatever the store holds
    pub fn new(store: SessionStore<S>) -> Self {
        let (tx, _rx) = watch::channel(store.load());
        Self { store, tx }
    }

    pub fn from_storage(storage: S) -> Self {
        Self::new(SessionStore::new(storage))
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.tx.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn is_admin(&self) -> bool {
        self.tx.borrow().as_ref().map(|s| s.is_admin).unwrap_or(false)
    }

    /// Persist the session, then publish it
    pub fn login(&self, session: Session) -> SessionResult<()> {
        self.store.save(&session)?;
        tracing::debug!(is_admin = session.is_admin, "Session started");
        self.tx.send_replace(Some(session));
        Ok(())
    }

    /// Publish the logged-out state and clear storage
    ///
    /// Subscribers see the logout even when clearing storage fails; the
    /// storage error is still returned.
    pub fn logout(&self) -> SessionResult<()> {
        self.tx.send_replace(None);
        tracing::debug!("Session cleared");
        self.store.clear()
    }

    /// Re-read storage, e.g. after another tab or process changed it
    pub fn reload(&self) -> Option<Session> {
        let session = self.store.load();
        self.tx.send_if_modified(|current| {
            if *current != session {
                *current = session.clone();
                true
            } else {
                false
            }
        });
        session
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }
}
