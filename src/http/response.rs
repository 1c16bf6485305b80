//! HTTP response building module
//!
//! Builders for the responses the middleware and the content writer produce
//! themselves. Successful file responses are assembled in [`super::content`].

use super::body::{self, AssetBody};
use hyper::header::{
    HeaderValue, ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, ETAG, LAST_MODIFIED,
    X_CONTENT_TYPE_OPTIONS,
};
use hyper::{Response, StatusCode};

/// `Content-Type` of plain-text error bodies
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Build a plain-text error response whose body is the status reason phrase
///
/// # Examples
/// ```
/// use hyper::StatusCode;
/// use static_assets::http::response::build_error_response;
///
/// let resp = build_error_response(StatusCode::NOT_FOUND);
/// assert_eq!(resp.status(), 404);
/// ```
pub fn build_error_response(status: StatusCode) -> Response<AssetBody> {
    let text = status.canonical_reason().unwrap_or("");
    let mut resp = Response::new(body::full(text));
    *resp.status_mut() = status;
    let headers = resp.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(text.len()));
    resp
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<AssetBody> {
    build_error_response(StatusCode::NOT_FOUND)
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<AssetBody> {
    build_error_response(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Build 412 Precondition Failed response
pub fn build_412_response() -> Response<AssetBody> {
    build_error_response(StatusCode::PRECONDITION_FAILED)
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, last_modified: Option<&str>) -> Response<AssetBody> {
    let mut builder = Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(ETAG, etag);
    if let Some(date) = last_modified {
        builder = builder.header(LAST_MODIFIED, date);
    }
    finish(builder, "304")
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: u64) -> Response<AssetBody> {
    let text = "Range Not Satisfiable";
    let builder = Response::builder()
        .status(StatusCode::RANGE_NOT_SATISFIABLE)
        .header(CONTENT_TYPE, TEXT_PLAIN)
        .header(CONTENT_RANGE, format!("bytes */{file_size}"))
        .header(CONTENT_LENGTH, text.len());
    builder
        .body(body::full(text))
        .unwrap_or_else(|e| fallback("416", &e))
}

/// Response head shared by full (200) and partial (206) file responses
pub struct FileHead<'a> {
    pub content_type: &'a str,
    pub etag: &'a str,
    pub last_modified: Option<&'a str>,
    pub content_length: u64,
}

/// Build 200 OK response with validators
pub fn build_file_response(head: &FileHead<'_>, data: AssetBody) -> Response<AssetBody> {
    file_builder(head, StatusCode::OK)
        .body(data)
        .unwrap_or_else(|e| fallback("200", &e))
}

/// Build 206 Partial Content response
pub fn build_partial_response(
    head: &FileHead<'_>,
    content_range: &str,
    data: AssetBody,
) -> Response<AssetBody> {
    file_builder(head, StatusCode::PARTIAL_CONTENT)
        .header(CONTENT_RANGE, content_range)
        .body(data)
        .unwrap_or_else(|e| fallback("206", &e))
}

fn file_builder(head: &FileHead<'_>, status: StatusCode) -> hyper::http::response::Builder {
    let mut builder = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, head.content_type)
        .header(CONTENT_LENGTH, head.content_length)
        .header(ACCEPT_RANGES, "bytes")
        .header(ETAG, head.etag);
    if let Some(date) = head.last_modified {
        builder = builder.header(LAST_MODIFIED, date);
    }
    builder
}

fn finish(builder: hyper::http::response::Builder, status: &str) -> Response<AssetBody> {
    builder
        .body(body::empty())
        .unwrap_or_else(|e| fallback(status, &e))
}

/// Log response build error and fall back to a bare 500
fn fallback(status: &str, error: &hyper::http::Error) -> Response<AssetBody> {
    tracing::debug!(status, %error, "failed to build response");
    build_500_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_error_response_body_is_reason_phrase() {
        let resp = build_404_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()[CONTENT_TYPE], TEXT_PLAIN);
        assert_eq!(resp.headers()[X_CONTENT_TYPE_OPTIONS], "nosniff");
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Not Found");
    }

    #[tokio::test]
    async fn test_500_response() {
        let resp = build_500_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Internal Server Error");
    }

    #[test]
    fn test_304_response_keeps_validators() {
        let resp = build_304_response("\"1-2\"", Some("Sun, 06 Nov 1994 08:49:37 GMT"));
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
        assert_eq!(resp.headers()[ETAG], "\"1-2\"");
        assert!(resp.headers().contains_key(LAST_MODIFIED));
        assert!(!resp.headers().contains_key(CONTENT_TYPE));
    }

    #[test]
    fn test_416_response() {
        let resp = build_416_response(1234);
        assert_eq!(resp.status(), StatusCode::RANGE_NOT_SATISFIABLE);
        assert_eq!(resp.headers()[CONTENT_RANGE], "bytes */1234");
    }

    #[test]
    fn test_partial_response_headers() {
        let head = FileHead {
            content_type: "text/css",
            etag: "\"a-b\"",
            last_modified: None,
            content_length: 10,
        };
        let resp = build_partial_response(&head, "bytes 0-9/100", body::empty());
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(resp.headers()[CONTENT_RANGE], "bytes 0-9/100");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "10");
        assert_eq!(resp.headers()[ACCEPT_RANGES], "bytes");
        assert!(!resp.headers().contains_key(LAST_MODIFIED));
    }
}
