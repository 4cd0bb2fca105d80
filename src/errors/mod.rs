//! Error types for index administration.

mod admin_error;

pub use admin_error::AdminError;
