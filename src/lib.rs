//! Static asset middleware for hyper.
//!
//! Intercepts GET requests whose path names an allow-listed root-level file
//! (`favicon.ico`, `robots.txt`, plus any configured names) or starts with
//! the configured static root, and serves the file from disk. Everything else
//! is handed to the next service.
//!
//! ```no_run
//! use http_body_util::Full;
//! use hyper::body::Bytes;
//! use hyper::service::service_fn;
//! use hyper::{Request, Response, StatusCode};
//! use std::convert::Infallible;
//!
//! let fallback = service_fn(|_req: Request<hyper::body::Incoming>| async {
//!     let mut resp = Response::new(Full::new(Bytes::from_static(b"not here")));
//!     *resp.status_mut() = StatusCode::NOT_FOUND;
//!     Ok::<_, Infallible>(resp)
//! });
//!
//! // `/static/<anything>/app.css` falls back to `static/app.css`, marked `noindex`
//! let service = static_assets::StaticLayer::wildcard("static", ["manifest.json"]).layer(fallback);
//! # let _ = service;
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::{StaticConfig, DEFAULT_ASSETS};
pub use error::AssetError;
pub use handler::{static_assets, StaticAssets, StaticLayer};
pub use http::AssetBody;
