use std::io;

use super::*;
use crate::Message;

/// Test reader yielding one byte per `read` call.
struct OneByte<'a>(&'a [u8]);

impl io::Read for OneByte<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.0.is_empty() || buf.is_empty() {
            return Ok(0);
        }
        buf[0] = self.0[0];
        self.0 = &self.0[1..];
        Ok(1)
    }
}

#[derive(Default, Debug, PartialEq)]
struct Named {
    name: String,
}

impl Message for Named {
    fn decode_field(&mut self, d: &mut Decoder<'_>, name: &str) {
        if name == "name" {
            d.read_string(&mut self.name);
        }
    }

    fn encode_fields(&self, w: &mut crate::Encoder<'_>) {
        w.field("name", self.name.as_str(), crate::Presence::OmitDefault);
    }
}

#[test]
fn scans_first_token_on_construction() {
    let d = Decoder::from_slice(b"  {\"a\":1}");
    assert_eq!(d.token(), Token::ObjectBegin);
    let d = Decoder::from_slice(b"[1]");
    assert_eq!(d.token(), Token::ArrayBegin);
    let d = Decoder::from_slice(b"");
    assert_eq!(d.token(), Token::Eof);
}

#[test]
fn reads_scalars() {
    let mut d = Decoder::from_slice(b"42");
    let mut v = 0i64;
    d.read_i64(&mut v);
    assert_eq!(v, 42);
    d.close().unwrap();

    let mut d = Decoder::from_slice(b"-7.25");
    let mut f = 0.0f64;
    d.read_f64(&mut f);
    assert_eq!(f, -7.25);
    d.close().unwrap();

    let mut d = Decoder::from_slice(b"true");
    let mut b = false;
    d.read_bool(&mut b);
    assert!(b);
    d.close().unwrap();

    let mut d = Decoder::from_slice(b"\"hi\"");
    let mut s = String::new();
    d.read_string(&mut s);
    assert_eq!(s, "hi");
    d.close().unwrap();
}

#[test]
fn null_leaves_destination_untouched() {
    let mut d = Decoder::from_slice(b"null");
    let mut v = 11i32;
    d.read_i32(&mut v);
    assert_eq!(v, 11);
    d.close().unwrap();

    let mut d = Decoder::from_slice(b"null");
    let mut o: Option<i32> = None;
    d.read_i32_opt(&mut o);
    assert_eq!(o, None);
    d.close().unwrap();
}

#[test]
fn wrong_token_names_the_expected_kind() {
    let mut d = Decoder::from_slice(b"\"nope\"");
    let mut v = 0i32;
    d.read_i32(&mut v);
    let err = d.close().unwrap_err();
    assert!(
        err.to_string().contains("expected <number>"),
        "unexpected message: {err}"
    );
}

#[test]
fn number_must_end_at_a_delimiter() {
    let mut d = Decoder::from_slice(b"1a");
    let mut v = 0i64;
    d.read_i64(&mut v);
    let err = d.close().unwrap_err();
    assert!(
        err.to_string().contains("expected <delimiter>"),
        "unexpected message: {err}"
    );
}

#[test]
fn unterminated_object_is_unexpected_end() {
    let mut d = Decoder::from_slice(b"{");
    let mut m = Named::default();
    m.decode_json(&mut d);
    let err = d.close().unwrap_err();
    assert!(
        err.to_string().contains("unexpected end of JSON input"),
        "unexpected message: {err}"
    );
}

#[test]
fn trailing_comma_in_array_is_rejected() {
    let mut d = Decoder::from_slice(b"[1,2,]");
    let mut v: Vec<i32> = Vec::new();
    d.read_list(&mut v, Decoder::read_i32);
    let err = d.close().unwrap_err();
    assert!(
        err.to_string().contains("invalid character"),
        "unexpected message: {err}"
    );
}

#[test]
fn trailing_comma_in_object_is_rejected() {
    let mut d = Decoder::from_slice(b"{\"a\":1,}");
    let mut m: indexmap::IndexMap<String, i32> = indexmap::IndexMap::new();
    d.read_map(&mut m, Decoder::read_i32);
    assert!(d.close().is_err());
}

#[test]
fn nesting_up_to_the_limit_is_accepted() {
    let mut data = Vec::new();
    data.extend(std::iter::repeat_n(b'[', MAX_NESTING_DEPTH));
    data.extend(std::iter::repeat_n(b']', MAX_NESTING_DEPTH));
    let mut d = Decoder::from_slice(&data);
    d.next(); // steps over the whole array
    d.close().unwrap();
}

#[test]
fn nesting_past_the_limit_is_rejected() {
    let mut data = Vec::new();
    data.extend(std::iter::repeat_n(b'[', MAX_NESTING_DEPTH + 1));
    data.extend(std::iter::repeat_n(b']', MAX_NESTING_DEPTH + 1));
    let mut d = Decoder::from_slice(&data);
    d.next();
    let err = d.close().unwrap_err();
    assert!(
        err.to_string().contains("exceed maximum depth"),
        "unexpected message: {err}"
    );
}

#[test]
fn escapes_decode() {
    let mut d = Decoder::from_slice(br#""a\"b\\c\/d\b\f\n\r\t""#);
    let mut s = String::new();
    d.read_string(&mut s);
    assert_eq!(s, "a\"b\\c/d\u{8}\u{c}\n\r\t");
    d.close().unwrap();
}

#[test]
fn unicode_escape_decodes() {
    let mut d = Decoder::from_slice(br#""A\u00e9""#);
    let mut s = String::new();
    d.read_string(&mut s);
    assert_eq!(s, "Aé");
    d.close().unwrap();
}

#[test]
fn surrogate_pair_combines() {
    let mut d = Decoder::from_slice(br#""\ud83d\ude00""#);
    let mut s = String::new();
    d.read_string(&mut s);
    assert_eq!(s, "\u{1F600}");
    d.close().unwrap();
}

#[test]
fn lone_surrogate_becomes_replacement_character() {
    let mut d = Decoder::from_slice(br#""\ud83d""#);
    let mut s = String::new();
    d.read_string(&mut s);
    assert_eq!(s, "\u{FFFD}");
    d.close().unwrap();
}

#[test]
fn surrogate_followed_by_plain_escape_keeps_both() {
    let mut d = Decoder::from_slice(br#""\ud83d\n""#);
    let mut s = String::new();
    d.read_string(&mut s);
    assert_eq!(s, "\u{FFFD}\n");
    d.close().unwrap();
}

#[test]
fn bytes_decode_base64() {
    let mut d = Decoder::from_slice(b"\"aGVsbG8=\"");
    let mut v = Vec::new();
    d.read_bytes(&mut v);
    assert_eq!(v, b"hello");
    d.close().unwrap();

    let mut d = Decoder::from_slice(b"\"!!!\"");
    let mut v = Vec::new();
    d.read_bytes(&mut v);
    assert!(matches!(d.close(), Err(Error::Base64(_))));
}

#[test]
fn unknown_fields_are_skipped() {
    let mut d = Decoder::from_slice(b"{\"unknownField\":1,\"name\":\"x\"}");
    let mut m = Named::default();
    m.decode_json(&mut d);
    d.close().unwrap();
    assert_eq!(m.name, "x");
}

#[test]
fn unknown_composite_fields_are_skipped() {
    let raw = br#"{"junk":{"deep":[{"a":"}"},null,true]},"name":"kept","more":[1,2,3]}"#;
    let mut d = Decoder::from_slice(raw);
    let mut m = Named::default();
    m.decode_json(&mut d);
    d.close().unwrap();
    assert_eq!(m.name, "kept");
}

#[test]
fn map_null_value_inserts_default() {
    let mut d = Decoder::from_slice(b"{\"a\":null,\"b\":2}");
    let mut m: indexmap::IndexMap<String, i32> = indexmap::IndexMap::new();
    d.read_map(&mut m, Decoder::read_i32);
    d.close().unwrap();
    assert_eq!(m.get("a"), Some(&0));
    assert_eq!(m.get("b"), Some(&2));
}

#[test]
fn list_reuse_truncates_previous_contents() {
    let mut v: Vec<i32> = vec![9, 9, 9, 9];
    let mut d = Decoder::from_slice(b"[1,2]");
    d.read_list(&mut v, Decoder::read_i32);
    d.close().unwrap();
    assert_eq!(v, [1, 2]);
}

#[test]
fn dump_raw_preserves_exact_text() {
    let raw = br#"{"a":"}{","b":[1,{"c":"\"}"}],"d":null}"#;
    let mut d = Decoder::from_slice(raw);
    let tok = d.token();
    let data = d.dump_raw(tok);
    assert_eq!(data, raw);
    d.close().unwrap();
}

#[test]
fn dump_raw_array() {
    let raw = br#"[1,"]]",[2,3]]"#;
    let mut d = Decoder::from_slice(raw);
    let tok = d.token();
    let data = d.dump_raw(tok);
    assert_eq!(data, raw);
    d.close().unwrap();
}

#[test]
fn trailing_input_is_an_error() {
    let mut d = Decoder::from_slice(b"1 2");
    let mut v = 0i32;
    d.read_i32(&mut v);
    let err = d.close().unwrap_err();
    assert!(
        err.to_string().contains("trailing characters"),
        "unexpected message: {err}"
    );
}

#[test]
fn first_error_wins() {
    // the bad literal poisons the decoder; later reads keep the first error
    let mut d = Decoder::from_slice(b"[tru,\"x\"]");
    let mut v: Vec<bool> = Vec::new();
    d.read_list(&mut v, Decoder::read_bool);
    let mut s = String::new();
    d.read_string(&mut s);
    assert_eq!(s, "");
    let err = d.close().unwrap_err();
    assert!(
        err.to_string().contains("expected <bool>"),
        "unexpected message: {err}"
    );
}

#[test]
fn errors_carry_absolute_offsets() {
    let mut d = Decoder::from_slice(b"  [1,2,]");
    let mut v: Vec<i32> = Vec::new();
    d.read_list(&mut v, Decoder::read_i32);
    match d.close().unwrap_err() {
        Error::Parse(p) => assert_eq!(p.offset, 7),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn error_snippets_are_bounded() {
    let mut data = b"x".to_vec();
    data.extend(std::iter::repeat_n(b'y', 100));
    let mut d = Decoder::from_slice(&data);
    match d.close().unwrap_err() {
        Error::Parse(p) => {
            assert!(p.snippet.ends_with("..."));
            assert!(p.snippet.len() <= MAX_ERROR_LEN + 3);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn streamed_input_matches_fixed_buffer() {
    // spans several 1 KiB refills so strings and numbers cross windows
    let long = "street \\\"42\\\", ünïcode ".repeat(200);
    let doc = format!("{{\"name\":\"{long}\",\"id\":123456789}}");

    #[derive(Default, PartialEq, Debug)]
    struct Rec {
        name: String,
        id: u64,
    }
    impl Message for Rec {
        fn decode_field(&mut self, d: &mut Decoder<'_>, name: &str) {
            match name {
                "name" => d.read_string(&mut self.name),
                "id" => d.read_u64(&mut self.id),
                _ => {}
            }
        }
        fn encode_fields(&self, _w: &mut crate::Encoder<'_>) {}
    }

    let mut fixed = Decoder::from_slice(doc.as_bytes());
    let mut a = Rec::default();
    a.decode_json(&mut fixed);
    fixed.close().unwrap();

    let mut streamed = Decoder::with_capacity(OneByte(doc.as_bytes()), MIN_BUFFER_LEN);
    let mut b = Rec::default();
    b.decode_json(&mut streamed);
    streamed.close().unwrap();

    assert_eq!(a, b);
    assert_eq!(a.id, 123_456_789);
}

#[test]
fn number_split_across_refills() {
    let pad = " ".repeat(MIN_BUFFER_LEN - 4);
    let doc = format!("{pad}1234567890 ");
    let mut d = Decoder::with_capacity(OneByte(doc.as_bytes()), MIN_BUFFER_LEN);
    let mut v = 0u64;
    d.read_u64(&mut v);
    assert_eq!(v, 1_234_567_890);
    d.close().unwrap();
}

#[test]
fn io_errors_are_reported() {
    struct Failing;
    impl io::Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("wire cut"))
        }
    }
    let mut d = Decoder::from_reader(Failing);
    assert!(matches!(d.close(), Err(Error::Io(_))));
}
