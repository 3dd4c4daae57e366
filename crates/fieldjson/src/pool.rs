//! Instance recycling.
//!
//! Buffer allocation dominates the cost of short decode/encode calls, so
//! the pool keeps the scratch state of finished codecs on thread-safe free
//! lists and rebinds it to fresh streams on acquisition. Guards release on
//! drop, so the state returns to the pool on every exit path, error paths
//! included. A guard is exclusively owned; nothing inside a codec instance
//! needs locking.

use std::io;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

use crate::{
    Message,
    decoder::{DEFAULT_BUFFER_LEN, Decoder, DecoderParts},
    encoder::{Encoder, EncoderParts},
    error::Error,
};

/// Shared free lists of decoder and encoder scratch state.
pub struct CodecPool {
    decoders: Mutex<Vec<DecoderParts>>,
    encoders: Mutex<Vec<EncoderParts>>,
    decoder_capacity: usize,
    encoder_capacity: usize,
}

impl CodecPool {
    /// Creates a pool producing codecs with the default buffer capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacities(DEFAULT_BUFFER_LEN, DEFAULT_BUFFER_LEN)
    }

    /// Creates a pool with explicit decoder/encoder buffer capacities
    /// (clamped to the 1 KiB minimum).
    #[must_use]
    pub fn with_capacities(decoder_capacity: usize, encoder_capacity: usize) -> Self {
        CodecPool {
            decoders: Mutex::new(Vec::new()),
            encoders: Mutex::new(Vec::new()),
            decoder_capacity,
            encoder_capacity,
        }
    }

    /// Acquires a decoder bound to `input`. The guard returns the scratch
    /// state to the pool when dropped.
    pub fn decoder<'p, 'de>(&'p self, input: impl io::Read + 'de) -> PooledDecoder<'p, 'de> {
        let parts = self.decoders.lock().pop().unwrap_or_else(|| {
            tracing::trace!(target: "fieldjson", "pool grows by one decoder");
            DecoderParts::with_capacity(self.decoder_capacity)
        });
        PooledDecoder {
            pool: self,
            codec: ManuallyDrop::new(Decoder::from_parts(parts, Box::new(input))),
        }
    }

    /// Acquires an encoder bound to `out`. The guard returns the scratch
    /// state to the pool when dropped.
    pub fn encoder<'p, 'w>(&'p self, out: impl io::Write + 'w) -> PooledEncoder<'p, 'w> {
        let parts = self.encoders.lock().pop().unwrap_or_else(|| {
            tracing::trace!(target: "fieldjson", "pool grows by one encoder");
            EncoderParts::with_capacity(self.encoder_capacity)
        });
        PooledEncoder {
            pool: self,
            codec: ManuallyDrop::new(Encoder::from_parts(parts, Box::new(out))),
        }
    }

    /// Decodes one message from `input` with a pooled decoder.
    ///
    /// # Errors
    ///
    /// Returns the first error the decoder accumulated.
    pub fn decode<M: Message + Default>(&self, input: impl io::Read) -> Result<M, Error> {
        let mut d = self.decoder(input);
        let mut m = M::default();
        m.decode_json(&mut d);
        d.close()?;
        Ok(m)
    }

    /// Encodes `message` to `out` with a pooled encoder.
    ///
    /// # Errors
    ///
    /// Returns the first error the encoder accumulated.
    pub fn encode<M: Message + ?Sized>(
        &self,
        out: impl io::Write,
        message: &M,
    ) -> Result<(), Error> {
        let mut w = self.encoder(out);
        message.encode_json(&mut w);
        w.close()
    }

    #[cfg(test)]
    pub(crate) fn idle_decoders(&self) -> usize {
        self.decoders.lock().len()
    }

    #[cfg(test)]
    pub(crate) fn idle_encoders(&self) -> usize {
        self.encoders.lock().len()
    }
}

impl Default for CodecPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive handle on a pooled decoder.
pub struct PooledDecoder<'p, 'de> {
    pool: &'p CodecPool,
    codec: ManuallyDrop<Decoder<'de>>,
}

impl<'de> Deref for PooledDecoder<'_, 'de> {
    type Target = Decoder<'de>;

    fn deref(&self) -> &Self::Target {
        &self.codec
    }
}

impl DerefMut for PooledDecoder<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.codec
    }
}

impl Drop for PooledDecoder<'_, '_> {
    fn drop(&mut self) {
        // SAFETY: taken exactly once; the field is not touched afterwards.
        let codec = unsafe { ManuallyDrop::take(&mut self.codec) };
        self.pool.decoders.lock().push(codec.into_parts());
    }
}

/// Exclusive handle on a pooled encoder.
pub struct PooledEncoder<'p, 'w> {
    pool: &'p CodecPool,
    codec: ManuallyDrop<Encoder<'w>>,
}

impl<'w> Deref for PooledEncoder<'_, 'w> {
    type Target = Encoder<'w>;

    fn deref(&self) -> &Self::Target {
        &self.codec
    }
}

impl DerefMut for PooledEncoder<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.codec
    }
}

impl Drop for PooledEncoder<'_, '_> {
    fn drop(&mut self) {
        // SAFETY: taken exactly once; the field is not touched afterwards.
        let codec = unsafe { ManuallyDrop::take(&mut self.codec) };
        self.pool.encoders.lock().push(codec.into_parts());
    }
}
