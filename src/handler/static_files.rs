//! Static file serving module
//!
//! Tries one resolved candidate: stat it, refuse directories, open it and
//! hand it to the content writer with the asset headers attached.

use super::resolve::{self, Candidate};
use crate::config::StaticConfig;
use crate::error::AssetError;
use crate::http::{self, AssetBody};
use hyper::header::{HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN};
use hyper::http::request::Parts;
use hyper::Response;
use std::fs::Metadata;
use std::path::PathBuf;
use tokio::fs::{self, File};
use tracing::{debug, trace};

/// Header telling crawlers not to index a non-canonical asset URL
pub const X_ROBOTS_TAG: HeaderName = HeaderName::from_static("x-robots-tag");

/// Value of [`X_ROBOTS_TAG`] on wildcard-matched responses
pub const NOINDEX_FOLLOW: &str = "noindex, follow";

/// Try to serve `candidate`
///
/// Returns `None` when the file does not exist, so the caller can move on to
/// the next candidate or the next handler. Directories and open failures are
/// answered here (404 and 500) and never fall through.
pub async fn serve(
    parts: &Parts,
    config: &StaticConfig,
    candidate: &Candidate,
) -> Option<Response<AssetBody>> {
    match open_asset(config, &candidate.location).await {
        Ok((file, metadata, path)) => {
            debug!(
                location = %candidate.location,
                source = ?candidate.source,
                path = %path.display(),
                "serving static asset"
            );
            let name = file_name(&path);
            let mut resp = http::serve_content(parts, file, &metadata, &name).await;
            decorate(&mut resp, candidate.is_canonical());
            Some(resp)
        }
        Err(err) => match err.status() {
            Some(status) => {
                debug!(location = %candidate.location, error = %err, "static asset error");
                Some(http::response::build_error_response(status))
            }
            None => {
                trace!(location = %candidate.location, error = %err, "static asset not handled");
                None
            }
        },
    }
}

/// Resolve, stat and open the file behind `location`
async fn open_asset(
    config: &StaticConfig,
    location: &str,
) -> Result<(File, Metadata, PathBuf), AssetError> {
    let path = resolve::resolve_path(config.base_dir(), location)?;

    let metadata = match fs::metadata(&path).await {
        Ok(m) => m,
        Err(source) => return Err(AssetError::Missing { path, source }),
    };

    if metadata.is_dir() {
        return Err(AssetError::IsDirectory { path });
    }

    match File::open(&path).await {
        Ok(file) => Ok((file, metadata, path)),
        Err(source) => Err(AssetError::Open { path, source }),
    }
}

/// Asset headers, set on every response the content writer produced
fn decorate(resp: &mut Response<AssetBody>, canonical: bool) {
    let headers = resp.headers_mut();
    if !canonical {
        headers.insert(X_ROBOTS_TAG, HeaderValue::from_static(NOINDEX_FOLLOW));
    }
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
