//! Request handler module
//!
//! Routes requests to health probes or to dashboard page assembly.

pub mod page;
pub mod query;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
