//! Growable output writer with flush-on-overflow.
//!
//! The encoder appends into an owned buffer; [`ensure`](Encoder::ensure)
//! flushes to the attached sink whenever fewer free bytes remain than the
//! next append needs, which bounds the buffer's peak size regardless of how
//! much output is produced. Without a sink the buffer simply grows and the
//! caller takes it with [`into_inner`](Encoder::into_inner).
//!
//! Like the decoder, the encoder records the first failure (an I/O error
//! from a flush, a non-finite float, a fallback serialization error) and
//! surfaces it from [`close`](Encoder::close).

mod fields;

use std::fmt::Write as _;
use std::io::{self, Write as _};

use base64::{Engine as _, engine::general_purpose::STANDARD};

pub use fields::{Presence, Scalar};

use crate::error::Error;

pub(crate) const MIN_BUFFER_LEN: usize = 1024;
pub(crate) const DEFAULT_BUFFER_LEN: usize = 8 * 1024;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// ASCII bytes that pass through string escaping untouched.
const fn no_escape_table() -> [bool; 128] {
    let mut t = [true; 128];
    let mut i = 0;
    while i < 0x20 {
        t[i] = false;
        i += 1;
    }
    t[b'"' as usize] = false;
    t[b'\\' as usize] = false;
    t
}

static NO_ESCAPE: [bool; 128] = no_escape_table();

/// JSON writer over an optional byte sink.
pub struct Encoder<'w> {
    out: Option<Box<dyn io::Write + 'w>>,
    buf: Vec<u8>,
    err: Option<Error>,
}

impl<'w> Encoder<'w> {
    /// Creates an encoder flushing to `out`, with the default buffer
    /// capacity.
    pub fn new(out: impl io::Write + 'w) -> Self {
        Self::with_capacity(out, DEFAULT_BUFFER_LEN)
    }

    /// Creates an encoder flushing to `out` with at least `capacity` bytes
    /// of buffer (clamped to a 1 KiB minimum).
    pub fn with_capacity(out: impl io::Write + 'w, capacity: usize) -> Self {
        Encoder {
            out: Some(Box::new(out)),
            buf: Vec::with_capacity(capacity.max(MIN_BUFFER_LEN)),
            err: None,
        }
    }

    /// Creates a memory-only encoder; the buffer holds the whole output.
    #[must_use]
    pub fn memory() -> Encoder<'static> {
        Encoder {
            out: None,
            buf: Vec::with_capacity(MIN_BUFFER_LEN),
            err: None,
        }
    }

    pub(crate) fn from_parts(parts: EncoderParts, out: Box<dyn io::Write + 'w>) -> Self {
        let mut buf = parts.buf;
        buf.clear();
        Encoder {
            out: Some(out),
            buf,
            err: None,
        }
    }

    /// Detaches the sink and error and returns the reusable buffer.
    pub(crate) fn into_parts(self) -> EncoderParts {
        EncoderParts { buf: self.buf }
    }

    /// The encoded bytes accumulated so far (everything not yet flushed).
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the encoder and returns its buffer. Meaningful in memory
    /// mode, where nothing is ever flushed.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    /// Records `err` unless an earlier one is already stored.
    pub(crate) fn report(&mut self, err: Error) {
        if self.err.is_none() {
            self.err = Some(err);
        }
    }

    /// Flushes the remaining buffer to the sink and returns the first
    /// recorded error, if any.
    pub fn close(&mut self) -> Result<(), Error> {
        if let Some(e) = self.err.take() {
            return Err(e);
        }
        if let Some(out) = &mut self.out {
            if !self.buf.is_empty() {
                out.write_all(&self.buf).map_err(Error::Io)?;
                self.buf.clear();
            }
            out.flush().map_err(Error::Io)?;
        }
        Ok(())
    }

    /// Makes room for an append of `n` bytes: with a sink attached and
    /// insufficient free capacity, the buffer is flushed and cleared. In
    /// memory mode this is a no-op (the buffer grows).
    pub(crate) fn ensure(&mut self, n: usize) {
        if let Some(out) = &mut self.out {
            if self.buf.capacity() - self.buf.len() < n {
                if let Err(e) = out.write_all(&self.buf) {
                    if self.err.is_none() {
                        self.err = Some(Error::Io(e));
                    }
                    return;
                }
                self.buf.clear();
            }
        }
    }

    pub(crate) fn write_raw(&mut self, bytes: &[u8]) {
        self.ensure(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    // ---- value primitives --------------------------------------------------

    pub(crate) fn put_null(&mut self) {
        self.ensure(4);
        self.buf.extend_from_slice(b"null");
    }

    pub(crate) fn put_true(&mut self) {
        self.ensure(4);
        self.buf.extend_from_slice(b"true");
    }

    pub(crate) fn put_false(&mut self) {
        self.ensure(5);
        self.buf.extend_from_slice(b"false");
    }

    pub(crate) fn put_zero(&mut self) {
        self.ensure(1);
        self.buf.push(b'0');
    }

    pub(crate) fn put_i64(&mut self, v: i64) {
        self.ensure(21);
        let _ = write!(FmtBuf(&mut self.buf), "{v}");
    }

    pub(crate) fn put_u64(&mut self, v: u64) {
        self.ensure(21);
        let _ = write!(FmtBuf(&mut self.buf), "{v}");
    }

    pub(crate) fn put_f32(&mut self, v: f32) {
        self.ensure(32);
        let _ = write!(FmtBuf(&mut self.buf), "{v}");
    }

    pub(crate) fn put_f64(&mut self, v: f64) {
        self.ensure(32);
        let _ = write!(FmtBuf(&mut self.buf), "{v}");
    }

    pub(crate) fn put_string(&mut self, v: &str) {
        self.ensure(2 + v.len());
        self.buf.push(b'"');
        self.escape(v.as_bytes());
        self.buf.push(b'"');
    }

    pub(crate) fn put_bytes(&mut self, v: &[u8]) {
        let Some(n) = base64::encoded_len(v.len(), true) else {
            return;
        };
        self.ensure(2 + n);
        self.buf.push(b'"');
        let start = self.buf.len();
        self.buf.resize(start + n, 0);
        // exact-size output cannot fail
        if STANDARD.encode_slice(v, &mut self.buf[start..]).is_err() {
            self.buf.truncate(start);
        }
        self.buf.push(b'"');
    }

    pub(crate) fn put_empty_string(&mut self) {
        self.ensure(2);
        self.buf.extend_from_slice(b"\"\"");
    }

    pub(crate) fn put_empty_array(&mut self) {
        self.ensure(2);
        self.buf.extend_from_slice(b"[]");
    }

    pub(crate) fn put_empty_object(&mut self) {
        self.ensure(2);
        self.buf.extend_from_slice(b"{}");
    }

    // ---- member primitives -------------------------------------------------

    /// Appends `"name":`. Field names are caller-controlled literals and are
    /// not escaped.
    pub(crate) fn member(&mut self, name: &str) {
        self.ensure(4 + name.len());
        self.buf.push(b'"');
        self.buf.extend_from_slice(name.as_bytes());
        self.buf.extend_from_slice(b"\":");
    }

    pub(crate) fn null_member(&mut self, name: &str) {
        self.ensure(8 + name.len());
        self.member(name);
        self.buf.extend_from_slice(b"null,");
    }

    pub(crate) fn comma(&mut self) {
        self.buf.push(b',');
    }

    /// Replaces the trailing separator with `close`, or appends `close`
    /// when nothing was emitted since the opening bracket.
    pub(crate) fn seal(&mut self, close: u8) {
        match self.buf.last_mut() {
            Some(last) if *last == b',' => *last = close,
            _ => self.buf.push(close),
        }
    }

    /// Emits `{`, the value's fields, then repairs the trailing separator
    /// into `}`.
    pub fn write_object(&mut self, codec: &(impl crate::Message + ?Sized)) {
        self.ensure(2);
        self.buf.push(b'{');
        codec.encode_fields(self);
        self.seal(b'}');
    }

    // ---- escaping ----------------------------------------------------------

    /// Escapes string content into the buffer. Bytes below 0x80 pass through
    /// unless the safe table excludes them; invalid UTF-8 sequences become
    /// the replacement-character escape; U+2028/U+2029 are force-escaped so
    /// output can be embedded in script contexts.
    fn escape(&mut self, s: &[u8]) {
        let mut p = 0; // start of the pending verbatim run
        let mut i = 0;
        while i < s.len() {
            let c = s[i];
            if c < 0x80 {
                if NO_ESCAPE[c as usize] {
                    i += 1;
                    continue;
                }
                self.buf.extend_from_slice(&s[p..i]);
                match c {
                    b'\t' => self.buf.extend_from_slice(b"\\t"),
                    b'\r' => self.buf.extend_from_slice(b"\\r"),
                    b'\n' => self.buf.extend_from_slice(b"\\n"),
                    b'\\' => self.buf.extend_from_slice(b"\\\\"),
                    b'"' => self.buf.extend_from_slice(b"\\\""),
                    _ => {
                        self.buf.extend_from_slice(&[
                            b'\\',
                            b'u',
                            b'0',
                            b'0',
                            HEX[(c >> 4) as usize],
                            HEX[(c & 0xF) as usize],
                        ]);
                    }
                }
                i += 1;
                p = i;
                continue;
            }
            let (ch, width) = bstr::decode_utf8(&s[i..]);
            match ch {
                None => {
                    self.buf.extend_from_slice(&s[p..i]);
                    self.buf.extend_from_slice(b"\\ufffd");
                    i += width.max(1);
                    p = i;
                }
                Some(ch @ ('\u{2028}' | '\u{2029}')) => {
                    self.buf.extend_from_slice(&s[p..i]);
                    self.buf.extend_from_slice(b"\\u202");
                    self.buf.push(HEX[(ch as usize) & 0xF]);
                    i += width;
                    p = i;
                }
                Some(_) => i += width,
            }
        }
        self.buf.extend_from_slice(&s[p..]);
    }

    #[cfg(test)]
    pub(crate) fn escape_for_test(&mut self, s: &[u8]) {
        self.escape(s);
    }
}

impl io::Write for Encoder<'_> {
    fn write(&mut self, p: &[u8]) -> io::Result<usize> {
        self.write_raw(p);
        Ok(p.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reusable buffer recycled through the pool.
pub(crate) struct EncoderParts {
    buf: Vec<u8>,
}

impl EncoderParts {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        EncoderParts {
            buf: Vec::with_capacity(capacity.max(MIN_BUFFER_LEN)),
        }
    }
}

/// `fmt::Write` adapter so number formatting lands directly in the buffer.
struct FmtBuf<'a>(&'a mut Vec<u8>);

impl std::fmt::Write for FmtBuf<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}
