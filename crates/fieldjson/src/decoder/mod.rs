//! Streaming JSON tokenizer and decode cursor.
//!
//! The decoder owns a fixed-capacity window over the input: stream mode
//! refills it from an [`io::Read`], fixed-buffer mode borrows the caller's
//! slice and never refills. Exactly one [`Token`] is current at any time and
//! [`next`](Decoder::next) advances past any unconsumed content of the
//! current token before scanning the following one, so callers may simply
//! ignore values they do not care about.
//!
//! Errors do not unwind. The first failure is recorded, the current token
//! becomes [`Token::Error`], and every later operation is a no-op;
//! [`close`](Decoder::close) returns the stored error. Parse errors carry an
//! absolute byte offset (window base + cursor) and a bounded snippet of the
//! offending region.

mod containers;
mod scalars;
#[cfg(test)]
mod tests;

use std::io::{self, Read as _};

use crate::{
    error::{Error, ParseError},
    token::Token,
};

pub(crate) const MAX_NESTING_DEPTH: usize = 256;
pub(crate) const MIN_BUFFER_LEN: usize = 1024;
pub(crate) const DEFAULT_BUFFER_LEN: usize = 8 * 1024;
const MAX_ERROR_LEN: usize = 16;

enum Input<'de> {
    /// Refillable stream; bytes live in the decoder's owned window.
    Stream(Box<dyn io::Read + 'de>),
    /// Fixed in-memory input; the window is the caller's slice.
    Bytes(&'de [u8]),
    /// Pooled and not bound to any input.
    Detached,
}

/// Cursor over a stream of JSON tokens.
///
/// Unpaired or invalid `\uXXXX` surrogate escapes decode to U+FFFD
/// REPLACEMENT CHARACTER; valid high/low pairs combine into one code point.
pub struct Decoder<'de> {
    input: Input<'de>,
    /// Owned window for stream mode; length equals capacity.
    buf: Vec<u8>,
    /// Read cursor into the window.
    mark: usize,
    /// Valid length of the window.
    size: usize,
    /// Bytes consumed before the current window. Error reporting only.
    base: u64,
    token: Token,
    depth: usize,
    /// Reusable scratch for raw number text.
    number: Vec<u8>,
    err: Option<Error>,
}

impl<'de> Decoder<'de> {
    /// Creates a stream-mode decoder with the default window capacity and
    /// scans the first token.
    pub fn from_reader(input: impl io::Read + 'de) -> Self {
        Self::with_capacity(input, DEFAULT_BUFFER_LEN)
    }

    /// Creates a stream-mode decoder with at least `capacity` bytes of
    /// window (clamped to a 1 KiB minimum).
    pub fn with_capacity(input: impl io::Read + 'de, capacity: usize) -> Self {
        let capacity = capacity.max(MIN_BUFFER_LEN);
        let mut d = Decoder {
            input: Input::Stream(Box::new(input)),
            buf: vec![0; capacity],
            mark: 0,
            size: 0,
            base: 0,
            token: Token::Eof,
            depth: 0,
            number: Vec::new(),
            err: None,
        };
        d.next();
        d
    }

    /// Creates a fixed-buffer decoder over `data`. No refills happen; the
    /// slice is the whole input.
    pub fn from_slice(data: &'de [u8]) -> Self {
        let mut d = Decoder {
            input: Input::Bytes(data),
            buf: Vec::new(),
            mark: 0,
            size: data.len(),
            base: 0,
            token: Token::Eof,
            depth: 0,
            number: Vec::new(),
            err: None,
        };
        d.next();
        d
    }

    pub(crate) fn from_parts(parts: DecoderParts, input: Box<dyn io::Read + 'de>) -> Self {
        let mut d = Decoder {
            input: Input::Stream(input),
            buf: parts.buf,
            mark: 0,
            size: 0,
            base: 0,
            token: Token::Eof,
            depth: 0,
            number: parts.number,
            err: None,
        };
        d.next();
        d
    }

    /// Detaches the input and error and returns the reusable buffers.
    pub(crate) fn into_parts(mut self) -> DecoderParts {
        self.number.clear();
        DecoderParts {
            buf: self.buf,
            number: self.number,
        }
    }

    /// The current token.
    #[must_use]
    pub fn token(&self) -> Token {
        self.token
    }

    /// Finishes the decode: any trailing token is an error, and the first
    /// recorded error (if any) is returned.
    pub fn close(&mut self) -> Result<(), Error> {
        if self.next() != Token::Eof {
            let idx = self.mark.saturating_sub(1);
            self.parse_error_at(idx, "trailing characters after top-level value".to_owned());
        }
        match self.err.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    // ---- window access ---------------------------------------------------

    #[inline]
    fn window(&self) -> &[u8] {
        match &self.input {
            Input::Bytes(b) => b,
            _ => &self.buf,
        }
    }

    #[inline]
    fn at(&self, idx: usize) -> u8 {
        self.window()[idx]
    }

    /// Refills the window from the stream. Returns `false` at end of input
    /// (or in fixed-buffer mode, which never refills).
    fn refill(&mut self) -> bool {
        let Input::Stream(rd) = &mut self.input else {
            return false;
        };
        self.base += self.size as u64;
        self.mark = 0;
        self.size = 0;
        while self.size < self.buf.len() {
            match rd.read(&mut self.buf[self.size..]) {
                Ok(0) => return self.size > 0,
                Ok(n) => self.size += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.report(Error::Io(e));
                    return false;
                }
            }
        }
        true
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.mark < self.size || self.refill() {
            let c = self.at(self.mark);
            self.mark += 1;
            Some(c)
        } else {
            None
        }
    }

    fn peek_byte(&mut self) -> Option<u8> {
        if self.mark < self.size || self.refill() {
            Some(self.at(self.mark))
        } else {
            None
        }
    }

    // ---- error recording -------------------------------------------------

    /// Records `err` unless an earlier one is already stored.
    pub(crate) fn report(&mut self, err: Error) {
        self.token = Token::Error;
        if self.err.is_none() {
            self.err = Some(err);
        }
    }

    fn parse_error_at(&mut self, mark: usize, reason: String) {
        if self.err.is_some() {
            self.token = Token::Error;
            return;
        }
        let start = mark.min(self.size);
        let end = self.size.min(start + MAX_ERROR_LEN);
        let snippet = format!("{}...", String::from_utf8_lossy(&self.window()[start..end]));
        self.report(Error::Parse(ParseError {
            reason,
            offset: self.base + mark as u64,
            snippet,
        }));
    }

    pub(crate) fn expected_token(&mut self, expected: Token) {
        let idx = self.mark.saturating_sub(1);
        let reason = if idx < self.size {
            format!(
                "expected {}, but got '{}'",
                expected.expected_name(),
                display_byte(self.at(idx))
            )
        } else {
            format!("expected {}, but got end of input", expected.expected_name())
        };
        self.parse_error_at(idx, reason);
    }

    fn expected_delimiter_at(&mut self, mark: usize, c: u8) {
        let reason = format!("expected <delimiter>, but got '{}'", display_byte(c));
        self.parse_error_at(mark, reason);
    }

    fn invalid_character_at(&mut self, mark: usize, c: u8) {
        let reason = format!("invalid character '{}'", display_byte(c));
        self.parse_error_at(mark, reason);
    }

    pub(crate) fn invalid_character(&mut self) {
        let idx = self.mark.saturating_sub(1);
        let c = if idx < self.size { self.at(idx) } else { 0 };
        self.invalid_character_at(idx, c);
    }

    pub(crate) fn unexpected_end(&mut self) {
        let idx = self.mark.saturating_sub(1);
        self.parse_error_at(idx, "unexpected end of JSON input".to_owned());
    }

    fn exceeded_depth(&mut self) {
        let idx = self.mark.saturating_sub(1);
        self.parse_error_at(idx, "exceed maximum depth of nesting".to_owned());
    }

    // ---- token scanning --------------------------------------------------

    /// Advances to the next token, first skipping whatever remains of the
    /// current one if the caller never consumed it.
    pub(crate) fn next(&mut self) -> Token {
        if self.err.is_some() {
            self.token = Token::Error;
            return Token::Error;
        }
        match self.token {
            Token::Eof => {}
            Token::ObjectBegin => self.skip_object(),
            Token::ArrayBegin => self.skip_array(),
            Token::Str => self.skip_string(),
            Token::Number => self.skip_number(),
            Token::True => self.skip_true(),
            Token::False => self.skip_false(),
            Token::Null => self.skip_null(),
            Token::ObjectEnd | Token::ArrayEnd | Token::Comma | Token::Colon => {
                self.token = Token::Eof;
            }
            Token::Error => return Token::Error,
        }
        loop {
            while self.mark < self.size {
                let c = self.at(self.mark);
                self.mark += 1;
                match c {
                    b' ' | b'\n' | b'\r' | b'\t' => {}
                    b'{' => {
                        self.depth += 1;
                        if self.depth > MAX_NESTING_DEPTH {
                            self.depth -= 1;
                            self.exceeded_depth();
                            return Token::Error;
                        }
                        self.token = Token::ObjectBegin;
                        return self.token;
                    }
                    b'}' => {
                        self.depth = self.depth.saturating_sub(1);
                        self.token = Token::ObjectEnd;
                        return self.token;
                    }
                    b'[' => {
                        self.depth += 1;
                        if self.depth > MAX_NESTING_DEPTH {
                            self.depth -= 1;
                            self.exceeded_depth();
                            return Token::Error;
                        }
                        self.token = Token::ArrayBegin;
                        return self.token;
                    }
                    b']' => {
                        self.depth = self.depth.saturating_sub(1);
                        self.token = Token::ArrayEnd;
                        return self.token;
                    }
                    b',' => {
                        self.token = Token::Comma;
                        return self.token;
                    }
                    b':' => {
                        self.token = Token::Colon;
                        return self.token;
                    }
                    b'"' => {
                        self.token = Token::Str;
                        return self.token;
                    }
                    b'0'..=b'9' | b'-' => {
                        self.number.clear();
                        self.number.push(c);
                        self.token = Token::Number;
                        return self.token;
                    }
                    b't' => {
                        self.token = Token::True;
                        return self.token;
                    }
                    b'f' => {
                        self.token = Token::False;
                        return self.token;
                    }
                    b'n' => {
                        self.token = Token::Null;
                        return self.token;
                    }
                    _ => {
                        self.invalid_character_at(self.mark - 1, c);
                        return Token::Error;
                    }
                }
            }
            if !self.refill() {
                // a failed refill may itself have recorded an I/O error
                return if self.err.is_some() { Token::Error } else { Token::Eof };
            }
        }
    }

    // ---- structural skips ------------------------------------------------

    /// Discards the value whose opening token is current. Returns `false`
    /// when the stream ended or an error was recorded.
    fn skip_value(&mut self, token: Token) -> bool {
        match token {
            Token::ObjectBegin => self.skip_object(),
            Token::ArrayBegin => self.skip_array(),
            Token::Str => self.skip_string(),
            Token::Number => self.skip_number(),
            Token::True => self.skip_true(),
            Token::False => self.skip_false(),
            Token::Null => self.skip_null(),
            Token::Eof => {
                self.unexpected_end();
                return false;
            }
            Token::Error => return false,
            Token::ObjectEnd | Token::ArrayEnd | Token::Comma | Token::Colon => {
                self.invalid_character();
                return false;
            }
        }
        true
    }

    pub(crate) fn skip_object(&mut self) {
        self.token = Token::Eof;
        let mut token = self.next();
        while token != Token::ObjectEnd {
            match token {
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
            if self.next() != Token::Colon {
                self.expected_token(Token::Colon);
                return;
            }
            let value = self.next();
            if !self.skip_value(value) {
                return;
            }
            token = self.next();
            if token == Token::Comma {
                token = self.next();
                // ",}" is malformed
                if token == Token::ObjectEnd {
                    self.invalid_character();
                    return;
                }
            }
        }
    }

    pub(crate) fn skip_array(&mut self) {
        self.token = Token::Eof;
        let mut token = self.next();
        while token != Token::ArrayEnd {
            if !self.skip_value(token) {
                return;
            }
            token = self.next();
            if token == Token::Comma {
                token = self.next();
                // ",]" is malformed
                if token == Token::ArrayEnd {
                    self.invalid_character();
                    return;
                }
            }
        }
    }

    // ---- strings ---------------------------------------------------------

    pub(crate) fn skip_string(&mut self) {
        self.token = Token::Eof;
        let mut escaped = false;
        loop {
            while self.mark < self.size {
                let c = self.at(self.mark);
                self.mark += 1;
                if c < 0x20 {
                    // record and keep scanning; first-error-wins
                    self.invalid_character_at(self.mark - 1, c);
                } else if c == b'"' && !escaped {
                    self.check_delimiter();
                    return;
                } else if c == b'\\' && !escaped {
                    escaped = true;
                } else {
                    escaped = false;
                }
            }
            if !self.refill() {
                self.unexpected_end();
                return;
            }
        }
    }

    /// Reads the content of the current string token. Unescaped runs are
    /// copied out of the window at most once; escapes decode through the
    /// scratch path. Invalid UTF-8 in the raw bytes is replaced lossily.
    pub(crate) fn read_string_raw(&mut self) -> String {
        self.token = Token::Eof;
        let mut out: Vec<u8> = Vec::new();
        'refill: loop {
            let mut i = self.mark;
            while i < self.size {
                let c = self.at(i);
                if c < 0x20 {
                    self.invalid_character_at(i, c);
                    i += 1;
                } else if c == b'"' {
                    let run = self.mark;
                    self.mark = i + 1;
                    out.extend_from_slice(&self.window()[run..i]);
                    self.check_delimiter();
                    return into_string(out);
                } else if c == b'\\' {
                    let run = self.mark;
                    self.mark = i + 1;
                    out.extend_from_slice(&self.window()[run..i]);
                    let selector = self.read_byte();
                    self.append_escape(&mut out, selector);
                    // the escape may have crossed a refill; restart the scan
                    continue 'refill;
                } else {
                    i += 1;
                }
            }
            out.extend_from_slice(&self.window()[self.mark..self.size]);
            if !self.refill() {
                self.unexpected_end();
                return into_string(out);
            }
        }
    }

    /// After a closing quote or literal, the next byte must be a JSON
    /// delimiter (or the end of input).
    fn check_delimiter(&mut self) {
        if let Some(c) = self.peek_byte() {
            if !is_delimiter(c) {
                self.expected_delimiter_at(self.mark, c);
            }
        }
    }

    /// Reads four hex digits of a `\uXXXX` escape.
    fn read_u4(&mut self) -> u32 {
        let mut ret: u32 = 0;
        for _ in 0..4 {
            match self.read_byte() {
                Some(c @ b'0'..=b'9') => ret = ret * 16 + u32::from(c - b'0'),
                Some(c @ b'a'..=b'f') => ret = ret * 16 + u32::from(c - b'a' + 10),
                Some(c @ b'A'..=b'F') => ret = ret * 16 + u32::from(c - b'A' + 10),
                Some(_) => {
                    self.invalid_character();
                    return 0;
                }
                None => {
                    self.unexpected_end();
                    return 0;
                }
            }
        }
        ret
    }

    /// Decodes one escape sequence into `out`. `selector` is the byte after
    /// the backslash.
    fn append_escape(&mut self, out: &mut Vec<u8>, selector: Option<u8>) {
        let Some(c) = selector else {
            self.unexpected_end();
            return;
        };
        match c {
            b'"' => out.push(b'"'),
            b'\\' => out.push(b'\\'),
            b'/' => out.push(b'/'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'u' => {
                let u1 = self.read_u4();
                if is_surrogate(u1) {
                    self.append_surrogate(out, u1);
                } else {
                    push_unit(out, u1);
                }
            }
            _ => self.invalid_character(),
        }
    }

    /// A `\uXXXX` in the surrogate range tries to combine with an
    /// immediately following low-surrogate escape; anything else leaves the
    /// unit standalone, which [`push_unit`] renders as U+FFFD.
    fn append_surrogate(&mut self, out: &mut Vec<u8>, u1: u32) {
        match self.peek_byte() {
            Some(b'\\') => {
                self.mark += 1;
            }
            _ => {
                push_unit(out, u1);
                return;
            }
        }
        match self.read_byte() {
            None => push_unit(out, u1),
            Some(b'u') => {
                let u2 = self.read_u4();
                if (0xD800..0xDC00).contains(&u1) && (0xDC00..0xE000).contains(&u2) {
                    let combined = 0x10000 + (((u1 - 0xD800) << 10) | (u2 - 0xDC00));
                    push_unit(out, combined);
                } else {
                    push_unit(out, u1);
                    push_unit(out, u2);
                }
            }
            Some(c) => {
                push_unit(out, u1);
                self.append_escape(out, Some(c));
            }
        }
    }

    // ---- numbers ---------------------------------------------------------

    pub(crate) fn skip_number(&mut self) {
        self.token = Token::Eof;
        let mut has_e = false;
        let mut after_e = false;
        let mut has_dot = false;
        loop {
            let mut i = self.mark;
            while i < self.size {
                let c = self.at(i);
                match c {
                    b'0'..=b'9' => after_e = false,
                    b'.' if !has_dot => has_dot = true,
                    b'e' | b'E' if !has_e => {
                        has_e = true;
                        has_dot = true;
                        after_e = true;
                    }
                    b'+' | b'-' if after_e => after_e = false,
                    _ => {
                        self.mark = i;
                        if !is_delimiter(c) {
                            self.expected_delimiter_at(i, c);
                        }
                        return;
                    }
                }
                i += 1;
            }
            self.mark = self.size;
            if !self.refill() {
                return;
            }
        }
    }

    /// Accumulates the rest of the current number token's raw text into the
    /// scratch (the scan in [`next`] already deposited the first byte).
    /// Validation is deferred to the typed parse.
    pub(crate) fn read_number(&mut self) {
        self.token = Token::Eof;
        let mut num = std::mem::take(&mut self.number);
        let mut has_e = false;
        let mut after_e = false;
        let mut has_dot = false;
        'outer: loop {
            let mut i = self.mark;
            while i < self.size {
                let c = self.at(i);
                match c {
                    b'0'..=b'9' => after_e = false,
                    b'.' if !has_dot => has_dot = true,
                    b'e' | b'E' if !has_e => {
                        has_e = true;
                        has_dot = true;
                        after_e = true;
                    }
                    b'+' | b'-' if after_e => after_e = false,
                    _ => {
                        num.extend_from_slice(&self.window()[self.mark..i]);
                        self.mark = i;
                        if !is_delimiter(c) {
                            self.expected_delimiter_at(i, c);
                        }
                        break 'outer;
                    }
                }
                i += 1;
            }
            num.extend_from_slice(&self.window()[self.mark..self.size]);
            self.mark = self.size;
            if !self.refill() {
                break;
            }
        }
        self.number = num;
    }

    pub(crate) fn read_i64_raw(&mut self) -> i64 {
        self.read_number();
        match std::str::from_utf8(&self.number).ok().and_then(|s| s.parse().ok()) {
            Some(v) => v,
            None => {
                let text = String::from_utf8_lossy(&self.number).into_owned();
                self.report(Error::InvalidNumber(text));
                0
            }
        }
    }

    pub(crate) fn read_u64_raw(&mut self) -> u64 {
        self.read_number();
        match std::str::from_utf8(&self.number).ok().and_then(|s| s.parse().ok()) {
            Some(v) => v,
            None => {
                let text = String::from_utf8_lossy(&self.number).into_owned();
                self.report(Error::InvalidNumber(text));
                0
            }
        }
    }

    pub(crate) fn read_f64_raw(&mut self) -> f64 {
        self.read_number();
        match std::str::from_utf8(&self.number).ok().and_then(|s| s.parse().ok()) {
            Some(v) => v,
            None => {
                let text = String::from_utf8_lossy(&self.number).into_owned();
                self.report(Error::InvalidNumber(text));
                0.0
            }
        }
    }

    pub(crate) fn number_bytes(&self) -> &[u8] {
        &self.number
    }

    // ---- literals --------------------------------------------------------

    pub(crate) fn skip_true(&mut self) {
        self.token = Token::Eof;
        self.expect_literal(b"rue", Token::True);
    }

    pub(crate) fn skip_false(&mut self) {
        self.token = Token::Eof;
        self.expect_literal(b"alse", Token::False);
    }

    pub(crate) fn skip_null(&mut self) {
        self.token = Token::Eof;
        self.expect_literal(b"ull", Token::Null);
    }

    /// Matches the remaining bytes of a literal whose first byte produced
    /// `expected`, then demands a delimiter.
    fn expect_literal(&mut self, rest: &'static [u8], expected: Token) {
        for &b in rest {
            if self.read_byte() != Some(b) {
                self.expected_token(expected);
            }
        }
        self.check_delimiter();
    }

    // ---- raw capture -----------------------------------------------------

    /// Re-serializes the current object or array as raw text, tracking quote
    /// and escape state so brackets inside strings are not miscounted. The
    /// output is what the dynamic fallback decoder consumes. A truncated
    /// stream yields truncated text; the fallback parse reports it.
    pub(crate) fn dump_raw(&mut self, token: Token) -> Vec<u8> {
        let (open, close) = match token {
            Token::ObjectBegin => (b'{', b'}'),
            Token::ArrayBegin => (b'[', b']'),
            _ => return Vec::new(),
        };
        self.token = Token::Eof;
        let mut data = Vec::with_capacity(256);
        data.push(open);
        let mut level = 1usize;
        let mut in_quotes = false;
        let mut was_escape = false;
        loop {
            let mut i = self.mark;
            while i < self.size {
                let c = self.at(i);
                if c == b'\\' && in_quotes {
                    was_escape = !was_escape;
                    i += 1;
                    continue;
                }
                if c == open && !in_quotes {
                    level += 1;
                } else if c == close && !in_quotes {
                    level -= 1;
                    if level == 0 {
                        let run = self.mark;
                        self.mark = i + 1;
                        data.extend_from_slice(&self.window()[run..self.mark]);
                        // rebalance the opening bracket counted by next()
                        self.depth = self.depth.saturating_sub(1);
                        return data;
                    }
                } else if c == b'"' && in_quotes {
                    in_quotes = was_escape;
                } else if c == b'"' {
                    in_quotes = true;
                }
                was_escape = false;
                i += 1;
            }
            data.extend_from_slice(&self.window()[self.mark..self.size]);
            if !self.refill() {
                return data;
            }
        }
    }

    // ---- object iteration ------------------------------------------------

    /// Iterates `"name": value` members of the current object, handing each
    /// named value to the message's `decode_field` hook. A member whose name
    /// the hook does not recognize is left unconsumed and structurally
    /// skipped by the following [`next`] call, so unknown fields are ignored
    /// rather than rejected.
    pub fn read_object(&mut self, codec: &mut (impl crate::Message + ?Sized)) {
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
            match self.next() {
                Token::Eof => {
                    self.unexpected_end();
                    return;
                }
                Token::Null => self.skip_null(),
                _ => codec.decode_field(self, &key),
            }
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
}

/// Reusable buffers recycled through the pool.
pub(crate) struct DecoderParts {
    buf: Vec<u8>,
    number: Vec<u8>,
}

impl DecoderParts {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        DecoderParts {
            buf: vec![0; capacity.max(MIN_BUFFER_LEN)],
            number: Vec::new(),
        }
    }
}

fn is_delimiter(c: u8) -> bool {
    matches!(
        c,
        b' ' | b'\t' | b'\r' | b'\n' | b'[' | b']' | b'{' | b'}' | b',' | b':'
    )
}

fn is_surrogate(u: u32) -> bool {
    (0xD800..0xE000).contains(&u)
}

/// Appends one decoded UTF-16 unit. Values outside the scalar range
/// (unpaired surrogates) become U+FFFD.
fn push_unit(out: &mut Vec<u8>, u: u32) {
    let ch = char::from_u32(u).unwrap_or('\u{FFFD}');
    let mut tmp = [0u8; 4];
    out.extend_from_slice(ch.encode_utf8(&mut tmp).as_bytes());
}

fn into_string(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn display_byte(c: u8) -> String {
    if c < 0x20 {
        format!("\\x{c:x}")
    } else {
        char::from(c).to_string()
    }
}
