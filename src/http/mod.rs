//! HTTP protocol layer module
//!
//! Content delivery building blocks, decoupled from the asset matching logic:
//! validators and conditional requests, byte ranges, MIME types and the
//! response builders used by the middleware.

pub mod body;
pub mod conditional;
pub mod content;
pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use body::{AssetBody, BoxError};
pub use content::serve_content;
pub use response::{build_404_response, build_500_response};
