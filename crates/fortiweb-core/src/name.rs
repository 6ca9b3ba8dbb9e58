//! Resource name sanitization.
//!
//! FortiWeb addresses child objects by nesting them under their parent's
//! name in the URL path, so a `/` inside a name would split the path. Names
//! are rewritten before they are embedded in a path segment or referenced
//! from another object's payload.
//!
//! A sanitized name is then percent-encoded as a single path segment, so URL
//! syntax inside a name (`?`, `#`, `%`, `\`) cannot change which object a
//! request addresses.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::borrow::Cow;

use crate::error::{Error, Result};

/// Character that separates path segments.
pub const PATH_SEPARATOR: char = '/';

/// Replacement used for [`PATH_SEPARATOR`] inside names.
pub const SEPARATOR_REPLACEMENT: char = '_';

/// Replace every path separator in `name` with an underscore.
///
/// Idempotent: sanitizing an already sanitized name returns it unchanged.
#[must_use]
pub fn sanitize_name(name: &str) -> Cow<'_, str> {
    if name.contains(PATH_SEPARATOR) {
        Cow::Owned(name.replace(PATH_SEPARATOR, &SEPARATOR_REPLACEMENT.to_string()))
    } else {
        Cow::Borrowed(name)
    }
}

/// Characters escaped inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Sanitize `name` and encode it as exactly one URL path segment.
///
/// Empty names and the dot segments `.` and `..` cannot address an object
/// and are rejected.
pub fn encode_segment(name: &str) -> Result<String> {
    let sanitized = sanitize_name(name);
    if matches!(sanitized.as_ref(), "" | "." | "..") {
        return Err(Error::Validation(format!(
            "`{name}` is not a usable object name"
        )));
    }

    Ok(utf8_percent_encode(&sanitized, PATH_SEGMENT).to_string())
}

/// Join a collection path and an encoded object name.
pub fn object_path(collection: &str, name: &str) -> Result<String> {
    Ok(format!(
        "{}/{}",
        collection.trim_end_matches(PATH_SEPARATOR),
        encode_segment(name)?
    ))
}
