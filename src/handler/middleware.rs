//! Static asset middleware
//!
//! [`StaticLayer`] is built once per installation and wraps the next
//! service of the chain into a [`StaticAssets`] service, which intercepts
//! GET requests for allow-listed files and files under the static root.

use super::{resolve, static_files};
use crate::config::StaticConfig;
use crate::http::{body, AssetBody};
use hyper::body::{Body, Bytes};
use hyper::service::Service;
use hyper::{Method, Request, Response};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::trace;

/// Middleware constructor: holds the immutable configuration
#[derive(Debug, Clone)]
pub struct StaticLayer {
    config: Arc<StaticConfig>,
}

/// Build the middleware for `root`, adding `extras` to the allow-list
///
/// With `wildcard` set, one arbitrary path segment after `root` is tolerated.
pub fn static_assets<I, T>(root: impl Into<String>, extras: I, wildcard: bool) -> StaticLayer
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    StaticLayer::from_config(StaticConfig::new(root, extras, wildcard))
}

impl StaticLayer {
    /// Strict prefix matching under `root`
    pub fn new<I, T>(root: impl Into<String>, extras: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        static_assets(root, extras, false)
    }

    /// Prefix matching that also skips one segment after `root`
    pub fn wildcard<I, T>(root: impl Into<String>, extras: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        static_assets(root, extras, true)
    }

    pub fn from_config(config: StaticConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &StaticConfig {
        &self.config
    }

    /// Wrap `next` into the intercepting service
    pub fn layer<S>(&self, next: S) -> StaticAssets<S> {
        StaticAssets {
            config: Arc::clone(&self.config),
            next: Arc::new(next),
        }
    }
}

/// Service serving static assets before delegating to `next`
#[derive(Debug)]
pub struct StaticAssets<S> {
    config: Arc<StaticConfig>,
    next: Arc<S>,
}

impl<S> Clone for StaticAssets<S> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            next: Arc::clone(&self.next),
        }
    }
}

impl<S> StaticAssets<S> {
    pub fn config(&self) -> &StaticConfig {
        &self.config
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for StaticAssets<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Send + Sync + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
    ResBody: Body<Data = Bytes> + Send + 'static,
    ResBody::Error: Into<body::BoxError>,
{
    type Response = Response<AssetBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<ReqBody>) -> Self::Future {
        let config = Arc::clone(&self.config);
        let next = Arc::clone(&self.next);

        Box::pin(async move {
            // Static files are only served over GET
            if req.method() != Method::GET {
                return forward(next.as_ref(), req).await;
            }

            let (parts, req_body) = req.into_parts();
            let location = resolve::request_location(parts.uri.path()).into_owned();

            for candidate in resolve::candidates(&config, &location) {
                if let Some(resp) = static_files::serve(&parts, &config, &candidate).await {
                    return Ok(resp);
                }
            }

            trace!(path = parts.uri.path(), "no static asset, delegating");
            forward(next.as_ref(), Request::from_parts(parts, req_body)).await
        })
    }
}

async fn forward<S, ReqBody, ResBody>(
    next: &S,
    req: Request<ReqBody>,
) -> Result<Response<AssetBody>, S::Error>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: Body<Data = Bytes> + Send + 'static,
    ResBody::Error: Into<body::BoxError>,
{
    let resp = next.call(req).await?;
    Ok(resp.map(body::boxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::service::service_fn;
    use std::convert::Infallible;

    #[test]
    fn test_layer_shares_config() {
        let layer = StaticLayer::wildcard("static", ["humans.txt"]);
        let svc = layer.layer(service_fn(|_req: Request<()>| async {
            Ok::<_, Infallible>(Response::new(Full::new(Bytes::new())))
        }));
        assert!(svc.config().wildcard());
        assert!(svc.config().is_allowed("humans.txt"));
        assert!(svc.config().is_allowed("favicon.ico"));
        assert!(Arc::ptr_eq(&layer.config, &svc.config));
    }

    #[test]
    fn test_non_wildcard_constructor() {
        let layer = StaticLayer::new("assets", Vec::<String>::new());
        assert!(!layer.config().wildcard());
        assert_eq!(layer.config().root(), "assets");
    }
}
