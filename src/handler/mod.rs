//! Request handler module
//!
//! The static file server: method dispatch, path translation, index files
//! and directory listings.

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
