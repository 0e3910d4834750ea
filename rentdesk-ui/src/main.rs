//! RentDesk Dashboard
//!
//! Rental property management UI built with Leptos (WASM).
//!
//! # Features
//!
//! - Properties, tenants, invoices and expenses with add/edit/delete
//! - Income vs expense chart and recent activity
//! - Printable receipts for paid invoices
//! - Account approval panel for administrators
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! Models, the session store and the route guard come from the `rentdesk`
//! crate; this crate only adds the browser bindings and the views.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
