//! File content delivery
//!
//! Turns an opened file into a response, honouring conditional request
//! headers and single byte ranges. The status code (200, 206, 304, 412,
//! 416) is decided here; callers only decorate the result.

use super::body;
use super::conditional::{self, Precondition, Validators};
use super::range::{parse_range_header, RangeParseResult};
use super::response::{self, FileHead};
use super::{mime, AssetBody};
use hyper::header::RANGE;
use hyper::http::request::Parts;
use hyper::Response;
use std::fs::Metadata;
use std::io::SeekFrom;
use tokio::fs::File;
use tokio::io::AsyncSeekExt;

/// Deliver `file` for the request described by `parts`
///
/// `name` is used for `Content-Type` inference and `metadata` supplies the
/// size and modification time. The file handle ends up in the response body,
/// or is dropped here when the response has none.
pub async fn serve_content(
    parts: &Parts,
    mut file: File,
    metadata: &Metadata,
    name: &str,
) -> Response<AssetBody> {
    let validators = Validators::from_metadata(metadata);
    let last_modified = validators.last_modified_header();
    let size = metadata.len();

    match conditional::evaluate(&parts.headers, &validators) {
        Precondition::Failed => return response::build_412_response(),
        Precondition::NotModified => {
            return response::build_304_response(&validators.etag, last_modified.as_deref());
        }
        Precondition::Proceed => {}
    }

    let range_header = parts
        .headers
        .get(RANGE)
        .and_then(|v| v.to_str().ok())
        .filter(|_| conditional::range_allowed(&parts.headers, &validators));

    let content_type = mime::content_type_for(name);
    let mut head = FileHead {
        content_type: &content_type,
        etag: &validators.etag,
        last_modified: last_modified.as_deref(),
        content_length: size,
    };

    match parse_range_header(range_header, size) {
        RangeParseResult::Valid(range) => {
            if let Err(error) = file.seek(SeekFrom::Start(range.start)).await {
                tracing::debug!(name, %error, "failed to seek for range request");
                return response::build_500_response();
            }
            head.content_length = range.length();
            response::build_partial_response(
                &head,
                &range.content_range(size),
                body::file_stream(file, range.length()),
            )
        }
        RangeParseResult::NotSatisfiable => response::build_416_response(size),
        RangeParseResult::None => response::build_file_response(&head, body::file_stream(file, size)),
    }
}
