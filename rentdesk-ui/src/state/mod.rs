//! State Management
//!
//! Global session and toast state, the local storage backend the session
//! is persisted in, and per-page CRUD state.

pub mod global;
pub mod records;
pub mod storage;

pub use global::{provide_global_state, GlobalState, ToastEntry};
pub use records::{use_lookup, use_records, FormMode, Records};
pub use storage::LocalStorage;
