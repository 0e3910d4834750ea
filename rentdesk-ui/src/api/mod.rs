//! API Client
//!
//! HTTP client for the RentDesk REST API.

pub mod client;
pub mod resource;

pub use client::*;
pub use resource::Resource;
