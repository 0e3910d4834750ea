//! Global Application State
//!
//! The session and the toast queue, as Leptos signals shared through
//! context. Page data stays local to each page.

use leptos::*;

use rentdesk::notify::Notification;
use rentdesk::session::{Session, SessionStore};
use rentdesk::ApiError;

use super::storage::LocalStorage;

/// A notification currently on screen
#[derive(Clone, Debug, PartialEq)]
pub struct ToastEntry {
    pub id: u64,
    pub notification: Notification,
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Signed-in session, mirrored to local storage
    pub session: RwSignal<Option<Session>>,
    /// Visible toasts, oldest first
    pub toasts: RwSignal<Vec<ToastEntry>>,
    next_toast_id: StoredValue<u64>,
}

fn store() -> SessionStore<LocalStorage> {
    SessionStore::new(LocalStorage)
}

/// Provide global state to the component tree
///
/// The session is restored from local storage so a reload keeps the user
/// signed in.
pub fn provide_global_state() {
    let state = GlobalState {
        session: create_rw_signal(store().load()),
        toasts: create_rw_signal(Vec::new()),
        next_toast_id: store_value(0),
    };

    provide_context(state);
}

impl GlobalState {
    pub fn is_admin(&self) -> bool {
        self.session
            .with(|s| s.as_ref().map(|s| s.is_admin).unwrap_or(false))
    }

    /// Persist and publish a new session
    pub fn login(&self, session: Session) {
        if let Err(e) = store().save(&session) {
            web_sys::console::error_1(&format!("Failed to persist session: {}", e).into());
        }
        self.session.set(Some(session));
    }

    /// Clear the stored session; the route guard then sends the user to login
    pub fn logout(&self) {
        if let Err(e) = store().clear() {
            web_sys::console::error_1(&format!("Failed to clear session: {}", e).into());
        }
        self.session.set(None);
    }

    /// Show a toast until its duration runs out
    pub fn notify(&self, notification: Notification) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id + 1);

        let duration = notification.duration_ms;
        self.toasts
            .update(|toasts| toasts.push(ToastEntry { id, notification }));

        let toasts = self.toasts;
        gloo_timers::callback::Timeout::new(duration, move || {
            toasts.update(|toasts| toasts.retain(|t| t.id != id));
        })
        .forget();
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    /// Report a failed request; a rejected token also ends the session
    pub fn report(&self, notification: Notification, err: &ApiError) {
        web_sys::console::error_1(&format!("Request failed: {}", err).into());
        self.notify(notification);
        if err.is_auth_failure() {
            self.logout();
        }
    }
}
