//! Core module
//!
//! Instance model, validation, persistence seam, and the launcher store.

pub mod api;
pub mod instance;
pub mod schema;
pub mod store;
pub mod version;
