//! Streaming JSON codec for proto-style messages.
//!
//! `fieldjson` encodes and decodes record types with scalar, optional,
//! repeated, and map fields without generic reflection on the hot path. A
//! type opts into the fast path by overriding the field hooks of
//! [`Message`]; anything else goes through the [`Dynamic`] serde fallback.
//! Encoders offer every field in four presence policies (plain plus the
//! three of [`Presence`]), and a [`CodecPool`] recycles codec buffers
//! across calls.
//!
//! ```rust
//! use fieldjson::{Decoder, Encoder, Message, Presence};
//!
//! #[derive(Default, PartialEq, Debug)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     label: String,
//! }
//!
//! impl Message for Point {
//!     fn decode_field(&mut self, d: &mut Decoder<'_>, name: &str) {
//!         match name {
//!             "x" => d.read_i32(&mut self.x),
//!             "y" => d.read_i32(&mut self.y),
//!             "label" => d.read_string(&mut self.label),
//!             _ => {}
//!         }
//!     }
//!
//!     fn encode_fields(&self, w: &mut Encoder<'_>) {
//!         w.field("x", &self.x, Presence::OmitDefault);
//!         w.field("y", &self.y, Presence::OmitDefault);
//!         w.field("label", self.label.as_str(), Presence::OmitDefault);
//!     }
//! }
//!
//! let p: Point = fieldjson::from_slice(b"{\"x\":1,\"label\":\"a\"}").unwrap();
//! assert_eq!(p, Point { x: 1, y: 0, label: "a".into() });
//! assert_eq!(fieldjson::to_vec(&p).unwrap(), b"{\"x\":1,\"label\":\"a\"}");
//! ```

mod decoder;
mod dispatch;
mod encoder;
mod enums;
mod error;
mod pool;
mod token;

#[cfg(test)]
mod tests;

pub use decoder::Decoder;
pub use dispatch::{Dynamic, Message, from_reader, from_slice, to_vec, to_writer};
pub use encoder::{Encoder, Presence, Scalar};
pub use enums::Enumeration;
pub use error::{Error, ParseError};
pub use pool::{CodecPool, PooledDecoder, PooledEncoder};
pub use token::Token;
