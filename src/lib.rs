pub mod analysis;
pub mod api;
pub mod commands;
pub mod error;
pub mod models;

pub use commands::audit::AuditStore;
pub use error::{AuditError, AuditResult};
