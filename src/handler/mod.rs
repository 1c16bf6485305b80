//! Request handler module
//!
//! Request interception for static assets: candidate resolution, serving a
//! single candidate, and the middleware service tying them together.

pub mod middleware;
pub mod resolve;
pub mod static_files;

// Re-export main entry points
pub use middleware::{static_assets, StaticAssets, StaticLayer};
pub use resolve::{Candidate, MatchSource};
