//! Repeated, map, and message decoders.
//!
//! These wrap a per-element reader in the comma-or-close grammar. A comma
//! immediately followed by the closing bracket is malformed. Destinations
//! are truncated (capacity kept) before population so a decoder can be
//! reused against the same message.

use indexmap::IndexMap;

use crate::{Message, token::Token};

use super::Decoder;

impl<'de> Decoder<'de> {
    /// Decodes a JSON array into `out`, reading each element with `elem`.
    ///
    /// Scalar readers can be passed directly:
    /// `d.read_list(&mut v, Decoder::read_i32)`.
    pub fn read_list<T: Default>(
        &mut self,
        out: &mut Vec<T>,
        mut elem: impl FnMut(&mut Decoder<'de>, &mut T),
    ) {
        match self.token {
            Token::ArrayBegin => {
                out.clear();
                self.token = Token::Eof;
                if self.next() == Token::ArrayEnd {
                    return;
                }
                loop {
                    let mut v = T::default();
                    elem(self, &mut v);
                    out.push(v);
                    match self.next() {
                        Token::Comma => {
                            // ",]" is malformed
                            if self.next() == Token::ArrayEnd {
                                self.invalid_character();
                                return;
                            }
                        }
                        Token::ArrayEnd => return,
                        Token::Eof => {
                            self.unexpected_end();
                            return;
                        }
                        _ => {
                            self.invalid_character();
                            return;
                        }
                    }
                }
            }
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::ArrayBegin),
        }
    }

    /// Decodes a string-keyed JSON object into `out`, reading each value
    /// with `elem`. Entry order follows the stream.
    pub fn read_map<T: Default>(
        &mut self,
        out: &mut IndexMap<String, T>,
        mut elem: impl FnMut(&mut Decoder<'de>, &mut T),
    ) {
        match self.token {
            Token::ObjectBegin => {
                out.clear();
                self.token = Token::Eof;
                let mut t = self.next();
                if t == Token::ObjectEnd {
                    return;
                }
                loop {
                    match t {
                        Token::Str => {}
                        Token::Eof => {
                            self.unexpected_end();
                            return;
                        }
                        Token::Error => return,
                        _ => {
                            self.expected_token(Token::Str);
                            return;
                        }
                    }
                    let key = self.read_string_raw();
                    if self.next() != Token::Colon {
                        self.expected_token(Token::Colon);
                        return;
                    }
                    self.next();
                    let mut v = T::default();
                    elem(self, &mut v);
                    out.insert(key, v);
                    t = self.next();
                    match t {
                        Token::Comma => {
                            t = self.next();
                            // ",}" is malformed
                            if t == Token::ObjectEnd {
                                self.invalid_character();
                                return;
                            }
                        }
                        Token::ObjectEnd => return,
                        Token::Eof => {
                            self.unexpected_end();
                            return;
                        }
                        _ => {
                            self.invalid_character();
                            return;
                        }
                    }
                }
            }
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::ObjectBegin),
        }
    }

    /// Decodes a message into an owned slot, allocating the default message
    /// on first use. `null` leaves the slot as it was.
    pub fn read_message<M: Message + Default>(&mut self, out: &mut Option<M>) {
        match self.token {
            Token::ObjectBegin => out.get_or_insert_with(M::default).decode_json(self),
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::ObjectBegin),
        }
    }

    /// Element reader for message-valued lists and maps.
    pub fn read_message_value<M: Message>(&mut self, out: &mut M) {
        match self.token {
            Token::ObjectBegin => out.decode_json(self),
            Token::Null => self.skip_null(),
            Token::Eof => self.unexpected_end(),
            Token::Error => {}
            _ => self.expected_token(Token::ObjectBegin),
        }
    }

    /// Decodes a JSON array of messages.
    pub fn read_message_list<M: Message + Default>(&mut self, out: &mut Vec<M>) {
        self.read_list(out, Decoder::read_message_value);
    }

    /// Decodes a string-keyed object of messages.
    pub fn read_message_map<M: Message + Default>(&mut self, out: &mut IndexMap<String, M>) {
        self.read_map(out, Decoder::read_message_value);
    }
}
