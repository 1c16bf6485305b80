//! Response body types
//!
//! Every response leaving the middleware uses [`AssetBody`], so that files
//! streamed from disk and bodies produced by the next handler share one type.

use futures_util::TryStreamExt;
use http_body_util::{combinators::UnsyncBoxBody, BodyExt, Empty, Full, StreamBody};
use hyper::body::{Body, Bytes, Frame};
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;

/// Boxed error carried by [`AssetBody`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Body type of every response produced by the middleware
pub type AssetBody = UnsyncBoxBody<Bytes, BoxError>;

/// Body with no content
pub fn empty() -> AssetBody {
    Empty::<Bytes>::new().map_err(Into::into).boxed_unsync()
}

/// Body holding an in-memory buffer
pub fn full(data: impl Into<Bytes>) -> AssetBody {
    Full::new(data.into()).map_err(Into::into).boxed_unsync()
}

/// Body streaming at most `len` bytes from the current position of `file`
///
/// The file handle is owned by the stream and closed when the body is dropped.
pub fn file_stream(file: File, len: u64) -> AssetBody {
    let stream = ReaderStream::new(file.take(len))
        .map_ok(Frame::data)
        .map_err(BoxError::from);
    StreamBody::new(stream).boxed_unsync()
}

/// Convert any body into an [`AssetBody`]
pub fn boxed<B>(body: B) -> AssetBody
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    body.map_err(Into::into).boxed_unsync()
}
