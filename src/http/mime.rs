//! Content-Type inference from the served file name

use std::borrow::Cow;

/// Fallback for extensions without a registered type
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content-Type for `file_name`, guessed from its extension
///
/// Textual types carry an explicit UTF-8 charset.
///
/// # Examples
/// ```
/// use static_assets::http::mime::content_type_for;
/// assert_eq!(content_type_for("index.HTML"), "text/html; charset=utf-8");
/// assert_eq!(content_type_for("LICENSE"), "application/octet-stream");
/// ```
pub fn content_type_for(file_name: &str) -> Cow<'static, str> {
    match mime_guess::from_path(file_name).first_raw() {
        Some(essence) if essence.starts_with("text/") => {
            Cow::Owned(format!("{essence}; charset=utf-8"))
        }
        Some(essence) => Cow::Borrowed(essence),
        None => Cow::Borrowed(DEFAULT_CONTENT_TYPE),
    }
}
