//! Escaping helpers for producing text and attribute values.
//!
//! The renderer copies [`Node::Text`](crate::Node::Text) and attribute values
//! verbatim. Whatever goes into them must already be safe for the position it
//! lands in; these helpers are one way to make it so.

use std::borrow::Cow;
use std::io::{self, Write};

/// Escape `&`, `<` and `>` for use as element content.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape(input, false)
}

/// Escape `&`, `<`, `>` and `"` for use inside a double-quoted attribute value.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
pub fn escape_attribute(input: &str) -> Cow<'_, str> {
    escape(input, true)
}

fn escape(input: &str, escape_quotes: bool) -> Cow<'_, str> {
    let needs_escape = |b: u8| matches!(b, b'&' | b'<' | b'>') || (escape_quotes && b == b'"');

    // Every byte we escape is ASCII, so `first` is always a char boundary.
    let Some(first) = input.bytes().position(needs_escape) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len() + 16);
    out.push_str(&input[..first]);
    for ch in input[first..].chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if escape_quotes => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Wraps a `Write` and escapes markup special characters as bytes pass through.
pub struct EscapingWriter<'a> {
    inner: &'a mut dyn Write,
    escape_quotes: bool,
}

impl<'a> EscapingWriter<'a> {
    /// Create an escaping writer for text content.
    /// Escapes: `&` `<` `>`
    pub fn text(inner: &'a mut dyn Write) -> Self {
        Self {
            inner,
            escape_quotes: false,
        }
    }

    /// Create an escaping writer for attribute values.
    /// Escapes: `&` `<` `>` `"`
    pub fn attribute(inner: &'a mut dyn Write) -> Self {
        Self {
            inner,
            escape_quotes: true,
        }
    }
}

impl Write for EscapingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut run_start = 0;
        for (i, &b) in buf.iter().enumerate() {
            let replacement: &[u8] = match b {
                b'&' => b"&amp;",
                b'<' => b"&lt;",
                b'>' => b"&gt;",
                b'"' if self.escape_quotes => b"&quot;",
                _ => continue,
            };
            self.inner.write_all(&buf[run_start..i])?;
            self.inner.write_all(replacement)?;
            run_start = i + 1;
        }
        self.inner.write_all(&buf[run_start..])?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
