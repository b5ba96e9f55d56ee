//! JSON body encoding and decoding.

use bytes::Bytes;

use crate::Result;

/// MIME type attached to requests that carry a JSON body.
pub const APPLICATION_JSON: &str = "application/json";

/// Serialize a value to JSON bytes, terminated by a newline.
///
/// `serde_json` never escapes HTML-sensitive characters, so `<`, `>` and `&`
/// inside strings reach the server literally.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use ghost_admin_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Post { html: String }
///
/// let post = Post { html: "<p>Fish & Chips</p>".to_string() };
/// let bytes = to_json(&post).expect("serialize");
/// assert_eq!(bytes.as_ref(), b"{\"html\":\"<p>Fish & Chips</p>\"}\n");
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    let mut buf = serde_json::to_vec(value)?;
    buf.push(b'\n');
    Ok(Bytes::from(buf))
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Only the first JSON value is read; anything after it is ignored.
///
/// # Errors
///
/// Returns [`crate::Error::JsonDeserialization`] with the path to the
/// offending field (e.g., "posts[0].title").
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Like [`from_json`], but a blank body decodes to `None` instead of failing.
///
/// # Errors
///
/// Returns [`crate::Error::JsonDeserialization`] if a non-blank body is invalid.
pub fn from_json_opt<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>> {
    if is_blank(bytes) {
        return Ok(None);
    }
    from_json(bytes).map(Some)
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Post {
        title: String,
        html: String,
    }

    #[test]
    fn to_json_keeps_html_characters() {
        let post = Post {
            title: "A < B && C > D".to_string(),
            html: "<script>alert('&')</script>".to_string(),
        };

        let bytes = to_json(&post).expect("serialize");
        let text = std::str::from_utf8(&bytes).expect("utf8");

        assert!(text.contains("A < B && C > D"));
        assert!(text.contains("<script>alert('&')</script>"));
        assert!(!text.contains("\\u003c"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn to_json_reports_unserializable_values() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(vec![1u8], "non-string keys are not JSON");

        let err = to_json(&map).expect_err("should fail");
        assert!(err.is_serialization());
    }

    #[test]
    fn from_json_ignores_trailing_data() {
        let bytes = br#"{"title":"t","html":"h"} {"ignored":true}"#;
        let post: Post = from_json(bytes).expect("deserialize");
        assert_eq!(post.title, "t");
    }

    #[test]
    fn from_json_error_carries_path() {
        #[derive(Debug, Deserialize)]
        struct Envelope {
            #[allow(dead_code)]
            posts: Vec<Post>,
        }

        let bytes = br#"{"posts":[{"title":"ok","html":"ok"},{"title":7,"html":"x"}]}"#;
        let err = from_json::<Envelope>(bytes).expect_err("should fail");

        assert!(err.is_decoding());
        let msg = err.to_string();
        assert!(msg.contains("posts[1].title"), "unexpected message: {msg}");
    }

    #[test]
    fn from_json_opt_tolerates_blank_bodies() {
        assert_eq!(from_json_opt::<Post>(b"").expect("empty"), None);
        assert_eq!(from_json_opt::<Post>(b" \r\n\t").expect("whitespace"), None);
        assert!(from_json_opt::<Post>(b"nope").is_err());
    }
}
