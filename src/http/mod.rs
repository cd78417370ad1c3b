//! HTTP protocol layer module
//!
//! Content-type resolution, range parsing, cache validation and response
//! builders, independent of how requests are routed.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use mime::{ContentTypeResolver, MimeTable};
pub use range::{parse_range_header, RangeOutcome};
pub use response::{
    build_301_response, build_304_response, build_400_response, build_404_response,
    build_416_response, build_501_response,
};
