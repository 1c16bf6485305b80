//! Request path resolution
//!
//! Classifies a request location into the ordered list of files worth
//! trying: the allow-list entry, the location under the static root, and the
//! wildcard-adjusted location. The first candidate that is handled wins.

use crate::config::StaticConfig;
use crate::error::AssetError;
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

/// How a candidate was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// Exact match against the allow-list
    AllowList,
    /// Location starts with the static root
    Root,
    /// Location under the static root with one segment skipped
    WildcardRoot,
}

/// A file location worth trying for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub location: String,
    pub source: MatchSource,
}

impl Candidate {
    fn new(location: impl Into<String>, source: MatchSource) -> Self {
        Self {
            location: location.into(),
            source,
        }
    }

    /// Only wildcard matches are non-canonical
    pub fn is_canonical(&self) -> bool {
        self.source != MatchSource::WildcardRoot
    }
}

/// Root-relative location of a request path: percent-decoded, leading `/` removed
///
/// Undecodable paths are used as they are.
pub fn request_location(path: &str) -> Cow<'_, str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    urlencoding::decode(path).unwrap_or(Cow::Borrowed(path))
}

/// Ordered candidates for `location`
///
/// The root test is a plain string prefix: root `"foo"` also matches
/// `"foobar"`.
pub fn candidates(config: &StaticConfig, location: &str) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(3);

    if config.is_allowed(location) {
        out.push(Candidate::new(location, MatchSource::AllowList));
    }

    let root = config.root();
    if location.starts_with(root) {
        out.push(Candidate::new(location, MatchSource::Root));

        if config.wildcard() {
            if let Some(adjusted) = skip_wildcard_segment(root, location) {
                out.push(Candidate::new(adjusted, MatchSource::WildcardRoot));
            }
        }
    }

    out
}

/// Drop the first segment after `root`: `root/ANY/rest` becomes `root/rest`
///
/// `root/` is trimmed when present and the remainder is left alone
/// otherwise, then everything up to the next `/` is skipped. Returns `None`
/// when no separator follows.
pub fn skip_wildcard_segment(root: &str, location: &str) -> Option<String> {
    let prefix = format!("{root}/");
    let rest = location.strip_prefix(prefix.as_str()).unwrap_or(location);
    let sep = rest.find('/')?;
    Some(format!("{root}{}", &rest[sep..]))
}

/// Filesystem path of a candidate location
///
/// The location is joined onto `base` (or left relative to the working
/// directory) and cleaned lexically: `.` is dropped and `..` pops one
/// component. Climbing above the base is rejected.
pub fn resolve_path(base: Option<&Path>, location: &str) -> Result<PathBuf, AssetError> {
    let mut cleaned = PathBuf::new();
    let mut depth = 0usize;

    for component in Path::new(location).components() {
        match component {
            Component::Normal(part) => {
                cleaned.push(part);
                depth += 1;
            }
            Component::ParentDir => {
                if depth == 0 {
                    return Err(AssetError::OutsideBase {
                        location: location.to_string(),
                    });
                }
                cleaned.pop();
                depth -= 1;
            }
            // Request locations are always relative to the base
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    Ok(match base {
        Some(base) => base.join(cleaned),
        None if depth == 0 => PathBuf::from("."),
        None => cleaned,
    })
}
