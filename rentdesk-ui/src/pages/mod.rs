//! Page Components
//!
//! One component per route.

pub mod admin;
pub mod dashboard;
pub mod expenses;
pub mod invoices;
pub mod login;
pub mod properties;
pub mod register;
pub mod tenants;

pub use admin::Admin;
pub use dashboard::Dashboard;
pub use expenses::Expenses;
pub use invoices::Invoices;
pub use login::Login;
pub use properties::Properties;
pub use register::Register;
pub use tenants::Tenants;
