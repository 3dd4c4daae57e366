//! Presence-policy laws, per shape.

use indexmap::IndexMap;
use rstest::rstest;

use super::fixtures::{Color, Device};
use crate::{Encoder, Message, Presence};

struct Fields<F: Fn(&mut Encoder<'_>)>(F);

impl<F: Fn(&mut Encoder<'_>)> Message for Fields<F> {
    fn encode_fields(&self, w: &mut Encoder<'_>) {
        (self.0)(w);
    }
}

fn object(f: impl Fn(&mut Encoder<'_>)) -> String {
    let mut w = Encoder::memory();
    w.write_object(&Fields(f));
    w.close().unwrap();
    String::from_utf8(w.into_inner()).unwrap()
}

#[rstest]
#[case(Presence::OmitDefault, "{}")]
#[case(Presence::EmitDefault, r#"{"a":0}"#)]
#[case(Presence::CollapseNull, r#"{"a":0}"#)]
fn zero_scalar(#[case] presence: Presence, #[case] expected: &str) {
    assert_eq!(object(|w| w.field("a", &0i32, presence)), expected);
}

#[rstest]
#[case(Presence::OmitDefault)]
#[case(Presence::EmitDefault)]
#[case(Presence::CollapseNull)]
fn nonzero_scalar_always_appears(#[case] presence: Presence) {
    assert_eq!(object(|w| w.field("a", &7i32, presence)), r#"{"a":7}"#);
}

#[rstest]
#[case(Presence::OmitDefault, "{}")]
#[case(Presence::EmitDefault, r#"{"a":null}"#)]
#[case(Presence::CollapseNull, r#"{"a":0}"#)]
fn absent_optional_scalar(#[case] presence: Presence, #[case] expected: &str) {
    assert_eq!(object(|w| w.field_opt::<i64>("a", None, presence)), expected);
}

#[rstest]
#[case(Presence::OmitDefault, "{}")]
#[case(Presence::EmitDefault, r#"{"a":0}"#)]
#[case(Presence::CollapseNull, r#"{"a":0}"#)]
fn present_zero_optional_scalar(#[case] presence: Presence, #[case] expected: &str) {
    assert_eq!(
        object(|w| w.field_opt("a", Some(&0i64), presence)),
        expected
    );
}

#[rstest]
#[case(Presence::OmitDefault, "{}")]
#[case(Presence::EmitDefault, r#"{"a":""}"#)]
#[case(Presence::CollapseNull, r#"{"a":""}"#)]
fn empty_string(#[case] presence: Presence, #[case] expected: &str) {
    assert_eq!(object(|w| w.field("a", "", presence)), expected);
}

#[rstest]
#[case(Presence::OmitDefault, "{}")]
#[case(Presence::EmitDefault, r#"{"a":null}"#)]
#[case(Presence::CollapseNull, r#"{"a":""}"#)]
fn absent_optional_string(#[case] presence: Presence, #[case] expected: &str) {
    assert_eq!(object(|w| w.field_opt::<str>("a", None, presence)), expected);
}

#[rstest]
#[case(None, Presence::OmitDefault, "{}")]
#[case(None, Presence::EmitDefault, r#"{"a":null}"#)]
#[case(None, Presence::CollapseNull, r#"{"a":[]}"#)]
#[case(Some(&[][..]), Presence::OmitDefault, "{}")]
#[case(Some(&[][..]), Presence::EmitDefault, r#"{"a":[]}"#)]
#[case(Some(&[][..]), Presence::CollapseNull, r#"{"a":[]}"#)]
#[case(Some(&[4i32, 5][..]), Presence::OmitDefault, r#"{"a":[4,5]}"#)]
#[case(Some(&[4i32, 5][..]), Presence::EmitDefault, r#"{"a":[4,5]}"#)]
#[case(Some(&[4i32, 5][..]), Presence::CollapseNull, r#"{"a":[4,5]}"#)]
fn list_member(
    #[case] value: Option<&[i32]>,
    #[case] presence: Presence,
    #[case] expected: &str,
) {
    assert_eq!(object(|w| w.field_list("a", value, presence)), expected);
}

#[rstest]
#[case(Presence::OmitDefault, "{}")]
#[case(Presence::EmitDefault, r#"{"a":null}"#)]
#[case(Presence::CollapseNull, r#"{"a":{}}"#)]
fn absent_map(#[case] presence: Presence, #[case] expected: &str) {
    assert_eq!(object(|w| w.field_map::<i32>("a", None, presence)), expected);
}

#[rstest]
#[case(Presence::OmitDefault, "{}")]
#[case(Presence::EmitDefault, r#"{"a":{}}"#)]
#[case(Presence::CollapseNull, r#"{"a":{}}"#)]
fn empty_map(#[case] presence: Presence, #[case] expected: &str) {
    let m: IndexMap<String, i32> = IndexMap::new();
    assert_eq!(object(|w| w.field_map("a", Some(&m), presence)), expected);
}

#[test]
fn populated_map_member() {
    let mut m = IndexMap::new();
    m.insert("k".to_owned(), 0i32);
    assert_eq!(
        object(|w| w.field_map("a", Some(&m), Presence::OmitDefault)),
        r#"{"a":{"k":0}}"#
    );
}

#[rstest]
#[case(None, Presence::OmitDefault, "{}")]
#[case(None, Presence::EmitDefault, r#"{"a":null}"#)]
#[case(None, Presence::CollapseNull, r#"{"a":""}"#)]
#[case(Some(&b""[..]), Presence::OmitDefault, "{}")]
#[case(Some(&b""[..]), Presence::EmitDefault, r#"{"a":""}"#)]
#[case(Some(&b""[..]), Presence::CollapseNull, r#"{"a":""}"#)]
#[case(Some(&b"hi"[..]), Presence::OmitDefault, r#"{"a":"aGk="}"#)]
fn bytes_member(
    #[case] value: Option<&[u8]>,
    #[case] presence: Presence,
    #[case] expected: &str,
) {
    assert_eq!(object(|w| w.field_bytes("a", value, presence)), expected);
}

#[rstest]
#[case(Presence::OmitDefault, "{}")]
#[case(Presence::EmitDefault, r#"{"a":null}"#)]
#[case(Presence::CollapseNull, r#"{"a":{}}"#)]
fn absent_message(#[case] presence: Presence, #[case] expected: &str) {
    assert_eq!(
        object(|w| w.field_message::<Device>("a", None, presence)),
        expected
    );
}

#[rstest]
#[case(Presence::OmitDefault, "{}")]
#[case(Presence::EmitDefault, r#"{"a":0}"#)]
#[case(Presence::CollapseNull, r#"{"a":0}"#)]
fn default_enum_ordinal(#[case] presence: Presence, #[case] expected: &str) {
    assert_eq!(object(|w| w.field_enum("a", Color::Red, presence)), expected);
}

#[rstest]
#[case(Presence::OmitDefault)]
#[case(Presence::EmitDefault)]
#[case(Presence::CollapseNull)]
fn enum_names_are_always_written(#[case] presence: Presence) {
    assert_eq!(
        object(|w| w.field_enum_name("a", Color::Red, presence)),
        r#"{"a":"RED"}"#
    );
}

#[rstest]
#[case(Presence::OmitDefault, "{}")]
#[case(Presence::EmitDefault, r#"{"a":null}"#)]
#[case(Presence::CollapseNull, r#"{"a":"RED"}"#)]
fn absent_optional_enum_name(#[case] presence: Presence, #[case] expected: &str) {
    assert_eq!(
        object(|w| w.field_enum_name_opt::<Color>("a", None, presence)),
        expected
    );
}

#[test]
fn present_optional_enum_keeps_zero_ordinal() {
    // presence of the slot is meaningful, so OmitDefault keeps ordinal zero
    assert_eq!(
        object(|w| w.field_enum_opt("a", Some(Color::Red), Presence::OmitDefault)),
        r#"{"a":0}"#
    );
}

#[test]
fn collapse_never_emits_null() {
    let out = object(|w| {
        w.field_opt::<i64>("a", None, Presence::CollapseNull);
        w.field_opt::<str>("b", None, Presence::CollapseNull);
        w.field_list::<i32>("c", None, Presence::CollapseNull);
        w.field_map::<i32>("d", None, Presence::CollapseNull);
        w.field_bytes("e", None, Presence::CollapseNull);
        w.field_message::<Device>("f", None, Presence::CollapseNull);
    });
    assert!(!out.contains("null"), "collapse emitted null: {out}");
}

#[test]
fn round_trip_under_explicit_defaults() {
    // EmitDefault output decodes to the same values OmitDefault encodes
    let raw = object(|w| {
        w.field("id", &0u64, Presence::EmitDefault);
        w.field("name", "", Presence::EmitDefault);
    });
    assert_eq!(raw, r#"{"id":0,"name":""}"#);
}
