//! Per-type scalar decoders.
//!
//! Every reader consumes exactly one token value and follows the same table:
//! a matching token parses and stores, `null` is skipped leaving the
//! destination untouched, end of stream records an unexpected-end error, the
//! error sentinel is a no-op, and any other token records an expected-token
//! error naming the wanted kind.
//!
//! Narrow integer widths parse as 64-bit and truncate; out-of-range JSON
//! numbers wrap rather than error (inherited design choice).

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{Enumeration, error::Error, token::Token};

use super::Decoder;

macro_rules! number_readers {
    ($($(#[$meta:meta])* $read:ident / $read_opt:ident: $ty:ty = $raw:ident;)*) => {$(
        $(#[$meta])*
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
        pub fn $read(&mut self, out: &mut $ty) {
            match self.token {
                Token::Number => *out = self.$raw() as $ty,
                Token::Null => self.skip_null(),
                Token::Eof => self.unexpected_end(),
                Token::Error => {}
                _ => self.expected_token(Token::Number),
            }
        }

        /// Optional-slot variant: stores `Some(value)` on success and leaves
        /// the slot untouched on `null`.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
        pub fn $read_opt(&mut self, out: &mut Option<$ty>) {
            match self.token {
                Token::Number => *out = Some(self.$raw() as $ty),
                Token::Null => self.skip_null(),
                Token::Eof => self.unexpected_end(),
                Token::Error => {}
                _ => self.expected_token(Token::Number),
            }
        }
    )*};
}

impl Decoder<'_> {
    /// Decodes a JSON boolean into `out`.
    pub fn read_bool(&mut self, out: &mut bool) {
        match self.token {
            Token::True => {
                self.skip_true();
                *out = true;
            }
            Token::False => {
                self.skip_false();
                *out = false;
            }
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::True),
        }
    }

    pub fn read_bool_opt(&mut self, out: &mut Option<bool>) {
        match self.token {
            Token::True => {
                self.skip_true();
                *out = Some(true);
            }
            Token::False => {
                self.skip_false();
                *out = Some(false);
            }
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::True),
        }
    }

    number_readers! {
        /// Decodes a JSON number into `out`.
        read_i8 / read_i8_opt: i8 = read_i64_raw;
        read_i16 / read_i16_opt: i16 = read_i64_raw;
        read_i32 / read_i32_opt: i32 = read_i64_raw;
        read_i64 / read_i64_opt: i64 = read_i64_raw;
        read_u8 / read_u8_opt: u8 = read_u64_raw;
        read_u16 / read_u16_opt: u16 = read_u64_raw;
        read_u32 / read_u32_opt: u32 = read_u64_raw;
        read_u64 / read_u64_opt: u64 = read_u64_raw;
        read_f32 / read_f32_opt: f32 = read_f64_raw;
        read_f64 / read_f64_opt: f64 = read_f64_raw;
    }

    /// Decodes a JSON string into `out`.
    pub fn read_string(&mut self, out: &mut String) {
        match self.token {
            Token::Str => *out = self.read_string_raw(),
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::Str),
        }
    }

    pub fn read_string_opt(&mut self, out: &mut Option<String>) {
        match self.token {
            Token::Str => *out = Some(self.read_string_raw()),
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::Str),
        }
    }

    /// Decodes a base64 string into `out`. A base64 failure is recorded as
    /// the decoder's error.
    pub fn read_bytes(&mut self, out: &mut Vec<u8>) {
        match self.token {
            Token::Str => {
                let s = self.read_string_raw();
                match STANDARD.decode(&s) {
                    Ok(v) => *out = v,
                    Err(e) => self.report(Error::Base64(e)),
                }
            }
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::Str),
        }
    }

    pub fn read_bytes_opt(&mut self, out: &mut Option<Vec<u8>>) {
        match self.token {
            Token::Str => {
                let s = self.read_string_raw();
                match STANDARD.decode(&s) {
                    Ok(v) => *out = Some(v),
                    Err(e) => self.report(Error::Base64(e)),
                }
            }
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::Str),
        }
    }

    /// Decodes an enumeration from its wire ordinal.
    pub fn read_enum<E: Enumeration>(&mut self, out: &mut E) {
        match self.token {
            Token::Number => {
                #[allow(clippy::cast_possible_truncation)]
                {
                    *out = E::from_ordinal(self.read_i64_raw() as i32);
                }
            }
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::Number),
        }
    }

    pub fn read_enum_opt<E: Enumeration>(&mut self, out: &mut Option<E>) {
        match self.token {
            Token::Number => {
                #[allow(clippy::cast_possible_truncation)]
                {
                    *out = Some(E::from_ordinal(self.read_i64_raw() as i32));
                }
            }
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::Number),
        }
    }

    /// Decodes an enumeration from its JSON name. An unknown name is
    /// recorded as the decoder's error.
    pub fn read_enum_name<E: Enumeration>(&mut self, out: &mut E) {
        match self.token {
            Token::Str => {
                let s = self.read_string_raw();
                match E::from_name(&s) {
                    Some(e) => *out = e,
                    None => self.report(Error::UnknownEnumName(s)),
                }
            }
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::Str),
        }
    }

    pub fn read_enum_name_opt<E: Enumeration>(&mut self, out: &mut Option<E>) {
        match self.token {
            Token::Str => {
                let s = self.read_string_raw();
                match E::from_name(&s) {
                    Some(e) => *out = Some(e),
                    None => self.report(Error::UnknownEnumName(s)),
                }
            }
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::Str),
        }
    }
}
