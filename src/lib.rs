//! Static file server that serves JavaScript modules as
//! `application/javascript` and WebAssembly as `application/wasm`,
//! whatever MIME database the host has.
//!
//! [`http::mime::MimeTable`] is the content-type lookup; it is injected into
//! the file server through [`http::mime::ContentTypeResolver`] via
//! [`config::AppState`].

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use error::{Result, ServerError};
