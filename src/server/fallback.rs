// Fallback handler
// Terminal service behind the middleware: anything not served from disk is a 404

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::service::Service;
use hyper::{Request, Response, StatusCode};
use std::convert::Infallible;
use std::future::{ready, Ready};

/// Answers every request with `404 Not Found`
#[derive(Debug, Clone, Copy, Default)]
pub struct NotFound;

impl<B> Service<Request<B>> for NotFound {
    type Response = Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, _req: Request<B>) -> Self::Future {
        let mut resp = Response::new(Full::new(Bytes::from_static(b"404 Not Found")));
        *resp.status_mut() = StatusCode::NOT_FOUND;
        ready(Ok(resp))
    }
}
