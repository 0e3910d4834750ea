//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod chart;
pub mod loading;
pub mod modal;
pub mod page_header;
pub mod receipt;
pub mod sidebar;
pub mod table;
pub mod toast;

pub use chart::Chart;
pub use loading::{CardSkeleton, Loading};
pub use modal::{Field, FormButtons, Modal, SelectField};
pub use page_header::PageHeader;
pub use receipt::{random_receipt_number, ReceiptModal};
pub use sidebar::Layout;
pub use table::{SearchBox, SortHeader};
pub use toast::Toast;
