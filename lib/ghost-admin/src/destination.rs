//! Where a successful response body goes.

use std::fmt;
use std::io::Write;

use serde::de::{DeserializeOwned, IgnoredAny};

use crate::{Result, from_json_opt};

/// Target for the body of a `2xx` response.
///
/// The mode is fixed when the destination is built, so the body is either
/// decoded as JSON or copied out verbatim, never both.
pub enum Destination<'a, T = IgnoredAny> {
    /// Drop the body.
    None,
    /// Decode the body as JSON into `T`. A blank body leaves `T` untouched.
    Json(&'a mut T),
    /// Copy the body bytes verbatim, without looking at them.
    Raw(&'a mut (dyn Write + Send)),
}

impl Destination<'static, IgnoredAny> {
    /// A destination that discards the body.
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }
}

impl<'a> Destination<'a, IgnoredAny> {
    /// A destination that copies the body into `sink`.
    pub fn raw(sink: &'a mut (dyn Write + Send)) -> Self {
        Self::Raw(sink)
    }
}

impl<'a, T: DeserializeOwned> Destination<'a, T> {
    /// A destination that decodes the body into `value`.
    pub const fn json(value: &'a mut T) -> Self {
        Self::Json(value)
    }

    /// Deliver `body` according to the mode.
    pub(crate) fn fill(self, body: &[u8]) -> Result<()> {
        match self {
            Self::None => Ok(()),
            Self::Raw(sink) => {
                sink.write_all(body)?;
                sink.flush()?;
                Ok(())
            }
            Self::Json(value) => {
                if let Some(decoded) = from_json_opt(body)? {
                    *value = decoded;
                }
                Ok(())
            }
        }
    }
}

impl<T> fmt::Debug for Destination<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self {
            Self::None => "None",
            Self::Json(_) => "Json",
            Self::Raw(_) => "Raw",
        };
        f.debug_tuple("Destination").field(&mode).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, serde::Deserialize)]
    struct Tag {
        name: String,
    }

    #[test]
    fn json_decodes_into_value() {
        let mut tag = Tag::default();
        Destination::json(&mut tag)
            .fill(br#"{"name":"rust"}"#)
            .expect("decode");
        assert_eq!(tag.name, "rust");
    }

    #[test]
    fn json_leaves_value_untouched_on_blank_body() {
        let mut tag = Tag {
            name: "kept".to_string(),
        };
        Destination::json(&mut tag).fill(b"").expect("blank body");
        assert_eq!(tag.name, "kept");
    }

    #[test]
    fn raw_copies_invalid_json_verbatim() {
        let mut sink = Vec::new();
        Destination::raw(&mut sink)
            .fill(b"<html>not json</html>")
            .expect("copy");
        assert_eq!(sink, b"<html>not json</html>");
    }

    #[test]
    fn raw_surfaces_sink_failures() {
        struct Full;

        impl Write for Full {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("sink full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut sink = Full;
        let err = Destination::raw(&mut sink).fill(b"data").expect_err("sink");
        assert!(matches!(err, crate::Error::Sink(_)));
    }
}
