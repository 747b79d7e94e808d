//! Request handler module
//!
//! Dispatches requests to the route table.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
