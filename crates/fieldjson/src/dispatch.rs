//! Fast-path / fallback message dispatch and the top-level entry points.
//!
//! [`Message`] is the codec capability. A record type opts into the fast
//! path by overriding the two field hooks (`decode_field`/`encode_fields`);
//! the provided value-level drivers then iterate fields by name with no
//! reflection. [`Dynamic`] instead overrides the value-level pair and routes
//! through `serde_json` — the designated fallback. Implementing the
//! value-level pair directly is also the seam for plugging in a different
//! fallback codec.

use std::io;

use serde::{Serialize, de::DeserializeOwned};

use crate::{decoder::Decoder, encoder::Encoder, error::Error, token::Token};

/// A value the codec can decode from and encode to JSON.
///
/// Fast-path types override [`decode_field`](Message::decode_field) and
/// [`encode_fields`](Message::encode_fields) and keep the provided
/// value-level drivers. A type that overrides neither pair decodes to its
/// default and encodes as `{}`.
pub trait Message {
    /// Decodes the field named `name`; the decoder is positioned on the
    /// field's value token. The default recognizes nothing, which makes the
    /// dispatcher skip the value structurally (unknown fields are ignored,
    /// not rejected).
    fn decode_field(&mut self, d: &mut Decoder<'_>, name: &str) {
        let _ = (d, name);
    }

    /// Emits the fields of `self` with the `field*` emitters, each followed
    /// by its separator; the dispatcher writes the braces and repairs the
    /// final separator. The default emits nothing.
    fn encode_fields(&self, w: &mut Encoder<'_>) {
        let _ = w;
    }

    /// Consumes the current token's value into `self`. The default is the
    /// fast path: an object decoded field-by-field through
    /// [`decode_field`](Message::decode_field).
    fn decode_json(&mut self, d: &mut Decoder<'_>) {
        match d.token() {
            Token::ObjectBegin => d.read_object(self),
            Token::Null => d.skip_null(),
            Token::Eof => d.unexpected_end(),
            Token::Error => {}
            _ => d.expected_token(Token::ObjectBegin),
        }
    }

    /// Appends `self` as one complete JSON value. The default is the fast
    /// path: `{`, [`encode_fields`](Message::encode_fields), `}`.
    fn encode_json(&self, w: &mut Encoder<'_>) {
        w.write_object(self);
    }
}

/// Fallback wrapper for types without field hooks.
///
/// Decoding captures the raw value text and hands it to `serde_json`;
/// encoding serializes through `serde_json` and appends the bytes. Slower
/// than the fast path, and the designated escape hatch rather than the
/// primary contract.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Dynamic<T>(pub T);

impl<T: Serialize + DeserializeOwned> Message for Dynamic<T> {
    fn decode_json(&mut self, d: &mut Decoder<'_>) {
        match d.token() {
            tok @ (Token::ObjectBegin | Token::ArrayBegin) => {
                tracing::debug!(target: "fieldjson", "dynamic fallback decode");
                let raw = d.dump_raw(tok);
                match serde_json::from_slice(&raw) {
                    Ok(v) => self.0 = v,
                    Err(e) => d.report(Error::Fallback(e)),
                }
            }
            Token::Str => {
                let s = d.read_string_raw();
                match serde_json::from_value(serde_json::Value::String(s)) {
                    Ok(v) => self.0 = v,
                    Err(e) => d.report(Error::Fallback(e)),
                }
            }
            Token::Number => {
                d.read_number();
                let parsed = serde_json::from_slice(d.number_bytes());
                match parsed {
                    Ok(v) => self.0 = v,
                    Err(e) => d.report(Error::Fallback(e)),
                }
            }
            Token::True => {
                d.skip_true();
                match serde_json::from_value(serde_json::Value::Bool(true)) {
                    Ok(v) => self.0 = v,
                    Err(e) => d.report(Error::Fallback(e)),
                }
            }
            Token::False => {
                d.skip_false();
                match serde_json::from_value(serde_json::Value::Bool(false)) {
                    Ok(v) => self.0 = v,
                    Err(e) => d.report(Error::Fallback(e)),
                }
            }
            Token::Null => d.skip_null(),
            Token::Eof => d.unexpected_end(),
            Token::Error => {}
            _ => d.invalid_character(),
        }
    }

    fn encode_json(&self, w: &mut Encoder<'_>) {
        tracing::debug!(target: "fieldjson", "dynamic fallback encode");
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => w.write_raw(&bytes),
            Err(e) => w.report(Error::Fallback(e)),
        }
    }
}

/// Decodes one message from a byte stream.
///
/// # Errors
///
/// Returns the first error the decoder accumulated, including trailing
/// input after the value.
pub fn from_reader<M: Message + Default>(input: impl io::Read) -> Result<M, Error> {
    let mut d = Decoder::from_reader(input);
    let mut m = M::default();
    m.decode_json(&mut d);
    d.close()?;
    Ok(m)
}

/// Decodes one message from an in-memory buffer (fixed-buffer mode, no
/// refills).
///
/// # Errors
///
/// Returns the first error the decoder accumulated.
pub fn from_slice<M: Message + Default>(data: &[u8]) -> Result<M, Error> {
    let mut d = Decoder::from_slice(data);
    let mut m = M::default();
    m.decode_json(&mut d);
    d.close()?;
    Ok(m)
}

/// Encodes `message` to a byte sink.
///
/// # Errors
///
/// Returns the first error the encoder accumulated (I/O or value errors).
pub fn to_writer<M: Message + ?Sized>(out: impl io::Write, message: &M) -> Result<(), Error> {
    let mut w = Encoder::new(out);
    message.encode_json(&mut w);
    w.close()
}

/// Encodes `message` into a fresh buffer.
///
/// # Errors
///
/// Returns the first error the encoder accumulated.
pub fn to_vec<M: Message + ?Sized>(message: &M) -> Result<Vec<u8>, Error> {
    let mut w = Encoder::memory();
    message.encode_json(&mut w);
    w.close()?;
    Ok(w.into_inner())
}
