use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::{
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_RANGE, CONTENT_TYPE, ETAG, IF_NONE_MATCH, RANGE,
};
use hyper::service::Service;
use hyper::{Method, Request, Response, StatusCode};
use static_assets::{AssetBody, StaticAssets, StaticConfig, StaticLayer};
use std::convert::Infallible;
use std::future::{ready, Ready};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

const X_ROBOTS_TAG: &str = "x-robots-tag";

/// Next handler that counts how often the middleware delegated to it
#[derive(Clone, Default)]
struct Next {
    hits: Arc<AtomicUsize>,
}

impl Service<Request<()>> for Next {
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, _req: Request<()>) -> Self::Future {
        self.hits.fetch_add(1, Ordering::SeqCst);
        let mut resp = Response::new(Full::new(Bytes::from_static(b"next")));
        *resp.status_mut() = StatusCode::IM_A_TEAPOT;
        ready(Ok(resp))
    }
}

struct Site {
    dir: TempDir,
}

impl Site {
    /// Layout:
    /// ```text
    /// favicon.ico
    /// robots.txt
    /// manifest.json
    /// staticfile.txt
    /// static/app.css
    /// static/css/site.css
    /// static/v1/app.css
    /// static/v1/css/      (empty directory)
    /// ```
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("static/css")).unwrap();
        std::fs::create_dir_all(root.join("static/v1/css")).unwrap();
        std::fs::write(root.join("favicon.ico"), b"\x00\x00\x01\x00icon").unwrap();
        std::fs::write(root.join("robots.txt"), "User-agent: *\nDisallow:\n").unwrap();
        std::fs::write(root.join("manifest.json"), "{}").unwrap();
        std::fs::write(root.join("staticfile.txt"), "loose prefix").unwrap();
        std::fs::write(root.join("static/app.css"), "body{}").unwrap();
        std::fs::write(root.join("static/css/site.css"), "h1{}").unwrap();
        std::fs::write(root.join("static/v1/app.css"), "versioned").unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn service(&self, wildcard: bool) -> (StaticAssets<Next>, Arc<AtomicUsize>) {
        let cfg = StaticConfig::new("static", ["manifest.json"], wildcard).with_base_dir(self.path());
        let next = Next::default();
        let hits = Arc::clone(&next.hits);
        (StaticLayer::from_config(cfg).layer(next), hits)
    }
}

fn get(uri: &str) -> Request<()> {
    Request::get(uri).body(()).unwrap()
}

async fn body_string(resp: Response<AssetBody>) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn serves_allow_listed_root_file() {
    let site = Site::new();
    let (svc, hits) = site.service(false);

    let resp = svc.call(get("/robots.txt")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(!resp.headers().contains_key(X_ROBOTS_TAG));
    assert_eq!(resp.headers()[CONTENT_TYPE], "text/plain; charset=utf-8");
    assert_eq!(body_string(resp).await, "User-agent: *\nDisallow:\n");

    let resp = svc.call(get("/favicon.ico")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[CONTENT_TYPE], "image/x-icon");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn serves_caller_supplied_allow_list_entry() {
    let site = Site::new();
    let (svc, hits) = site.service(false);

    let resp = svc.call(get("/manifest.json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[CONTENT_TYPE], "application/json");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn allow_listed_file_honours_range_and_conditional_headers() {
    let site = Site::new();
    let (svc, _hits) = site.service(false);

    let req = Request::get("/robots.txt").header(RANGE, "bytes=0-9").body(()).unwrap();
    let resp = svc.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(resp.headers()[CONTENT_RANGE], "bytes 0-9/24");
    assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let etag = resp.headers()[ETAG].clone();
    assert_eq!(body_string(resp).await, "User-agent");

    let req = Request::get("/robots.txt").header(IF_NONE_MATCH, etag).body(()).unwrap();
    let resp = svc.call(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn non_get_requests_always_delegate() {
    let site = Site::new();
    let (svc, hits) = site.service(true);

    for method in [Method::POST, Method::HEAD, Method::PUT, Method::DELETE] {
        let req = Request::builder()
            .method(method)
            .uri("/robots.txt")
            .body(())
            .unwrap();
        let resp = svc.call(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
        assert!(!resp.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
    }
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn directory_under_root_is_404() {
    let site = Site::new();
    let (svc, hits) = site.service(false);

    let resp = svc.call(get("/static/css")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(!resp.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
    assert_eq!(body_string(resp).await, "Not Found");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn unopenable_file_under_root_is_500() {
    let site = Site::new();
    let _listener = std::os::unix::net::UnixListener::bind(site.path().join("static/sock")).unwrap();
    let (svc, hits) = site.service(true);

    let resp = svc.call(get("/static/sock")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!resp.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
    assert_eq!(body_string(resp).await, "Internal Server Error");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn directory_match_stops_before_wildcard() {
    let site = Site::new();
    let (svc, hits) = site.service(true);

    // static/v1/css is a directory; static/css would be served by the wildcard
    let resp = svc.call(get("/static/v1/css")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wildcard_skips_one_segment_and_marks_noindex() {
    let site = Site::new();
    let (svc, hits) = site.service(true);

    let resp = svc.call(get("/static/tenant-42/css/site.css")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[X_ROBOTS_TAG], "noindex, follow");
    assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(body_string(resp).await, "h1{}");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn existing_file_wins_over_wildcard() {
    let site = Site::new();
    let (svc, _hits) = site.service(true);

    let resp = svc.call(get("/static/v1/app.css")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!resp.headers().contains_key(X_ROBOTS_TAG));
    assert_eq!(body_string(resp).await, "versioned");

    let resp = svc.call(get("/static/v2/app.css")).await.unwrap();
    assert_eq!(resp.headers()[X_ROBOTS_TAG], "noindex, follow");
    assert_eq!(body_string(resp).await, "body{}");
}

#[tokio::test]
async fn non_wildcard_does_not_skip_segments() {
    let site = Site::new();
    let (svc, hits) = site.service(false);

    let resp = svc.call(get("/static/tenant-42/css/site.css")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(body_string(resp).await, "next");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unmatched_path_falls_through_untouched() {
    let site = Site::new();
    let (svc, hits) = site.service(true);

    let resp = svc.call(get("/api/users")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert!(!resp.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(!resp.headers().contains_key(X_ROBOTS_TAG));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_files_fall_through() {
    let site = Site::new();
    std::fs::remove_file(site.path().join("favicon.ico")).unwrap();
    let (svc, hits) = site.service(true);

    let resp = svc.call(get("/favicon.ico")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);

    let resp = svc.call(get("/static/missing.css")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn root_prefix_is_a_plain_string_prefix() {
    let site = Site::new();
    let (svc, hits) = site.service(false);

    let resp = svc.call(get("/staticfile.txt")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "loose prefix");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn percent_encoded_paths_are_decoded() {
    let site = Site::new();
    std::fs::write(site.path().join("static/my file.css"), "spaced").unwrap();
    let (svc, _hits) = site.service(false);

    let resp = svc.call(get("/static/my%20file.css")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "spaced");
}

#[tokio::test]
async fn traversal_above_base_falls_through() {
    let site = Site::new();
    let (svc, hits) = site.service(false);

    let resp = svc.call(get("/static/../../etc/passwd")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let site = Site::new();
    let (svc, _hits) = site.service(true);

    let first = svc.call(get("/static/v9/app.css")).await.unwrap();
    let second = svc.call(get("/static/v9/app.css")).await.unwrap();
    assert_eq!(first.status(), second.status());
    assert_eq!(first.headers(), second.headers());
}

#[tokio::test]
async fn cloned_services_share_configuration() {
    let site = Site::new();
    let (svc, hits) = site.service(false);
    let clone = svc.clone();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let svc = clone.clone();
            tokio::spawn(async move { svc.call(get("/static/app.css")).await.unwrap().status() })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    drop(svc);
}
