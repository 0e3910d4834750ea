//! # RentDesk
//!
//! Rental property management: properties, tenants, invoices and expenses
//! behind a token-authenticated REST API, with an admin approval queue for
//! new accounts.
//!
//! ## Modules
//!
//! - [`models`]: Records, drafts and the dashboard summary as they appear on the wire
//! - [`session`]: Token storage and the shared session context
//! - [`routing`]: Route table, guards and sidebar metadata
//! - [`listing`]: Sorting and searching of table rows
//! - [`api`]: REST endpoints, error mapping and the HTTP client
//! - [`notify`]: User-facing notifications
//! - [`receipt`]: Printable receipts for paid invoices
//! - [`crud`]: The list/add/edit/delete cycle shared by record pages
//! - [`server`]: In-memory development API server
//! - [`cli`]: Terminal front end
//!
//! Without the default `native` feature only the target-independent modules
//! are built; the browser dashboard uses the crate that way.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rentdesk::api::{HttpClient, RentalApi};
//! use rentdesk::models::Credentials;
//! use rentdesk::session::{MemoryStorage, Session, SessionContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = SessionContext::from_storage(MemoryStorage::new());
//!     let client = HttpClient::new("http://localhost:5000", context.subscribe())?;
//!
//!     // Sign in; later calls carry the bearer token
//!     let response = client
//!         .login(&Credentials::new("admin@rentdesk.local", "admin"))
//!         .await?;
//!     context.login(Session::from(response))?;
//!
//!     let pending = client.pending_users().await?;
//!     println!("{} accounts awaiting approval", pending.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod listing;
pub mod models;
pub mod notify;
pub mod receipt;
pub mod routing;
pub mod session;

#[cfg(feature = "native")]
pub mod cli;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod crud;
#[cfg(feature = "native")]
pub mod server;
#[cfg(feature = "native")]
pub mod telemetry;

// Re-export top-level types for convenience
pub use api::{ApiError, ApiResult};
pub use models::{
    DashboardSummary, EnrichedInvoice, Expense, Invoice, InvoiceStatus, PendingUser, Property,
    RecordId, Tenant, ValidationError,
};
pub use notify::{FormMode, Notification, NotificationLevel};
pub use receipt::{Receipt, ReceiptError};
pub use routing::{guard, GuardDecision, Route};
pub use session::{Session, SessionContext, SessionError, SessionStorage, SessionStore};

#[cfg(feature = "native")]
pub use api::{HttpClient, RentalApi};
#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};
#[cfg(feature = "native")]
pub use crud::{CrudPage, CrudResource, PageError};
#[cfg(feature = "native")]
pub use server::{build_router, serve, AppState, ServerError};
