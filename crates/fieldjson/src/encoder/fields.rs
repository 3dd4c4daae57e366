//! Presence-aware field emitters.
//!
//! Every shape (scalar, optional, bytes, list, map, enum, message) is
//! offered plain (`value*`, a bare JSON value) and as a named member
//! (`field*`) under the three member policies of [`Presence`]. Member
//! emitters always append the trailing separator; the enclosing
//! [`write_object`](Encoder::write_object) repairs the last one into the
//! closing brace.

#![allow(clippy::float_cmp)]

use indexmap::IndexMap;

use crate::{Enumeration, Message, error::Error};

use super::Encoder;

/// How a named member represents an absent or default value.
///
/// The fourth behavior — plain emission, where a default is written
/// literally — is the `value*` method family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The member is absent from the output when the value is the type's
    /// default (zero, empty, `None`).
    OmitDefault,
    /// The member always appears; `None` is written as an explicit `null`.
    EmitDefault,
    /// The member always appears and never as `null`: absent values are
    /// written in their default form (`0`, `""`, `[]`, `{}`).
    CollapseNull,
}

/// A scalar value the encoder can emit directly.
pub trait Scalar {
    /// True when the value equals the type's zero/empty default.
    fn is_default(&self) -> bool;

    /// Appends the plain JSON form.
    fn emit(&self, w: &mut Encoder<'_>);

    /// Appends the type's default form (`0`, `false`, `""`).
    fn emit_zero(w: &mut Encoder<'_>);

    /// Rejects values with no JSON representation, recording the error.
    fn validate(&self, w: &mut Encoder<'_>) -> bool {
        let _ = w;
        true
    }
}

macro_rules! scalar_integers {
    ($($ty:ty => $put:ident($cast:ty);)*) => {$(
        impl Scalar for $ty {
            fn is_default(&self) -> bool {
                *self == 0
            }

            fn emit(&self, w: &mut Encoder<'_>) {
                w.$put(<$cast>::from(*self));
            }

            fn emit_zero(w: &mut Encoder<'_>) {
                w.put_zero();
            }
        }
    )*};
}

scalar_integers! {
    i8 => put_i64(i64);
    i16 => put_i64(i64);
    i32 => put_i64(i64);
    i64 => put_i64(i64);
    u8 => put_u64(u64);
    u16 => put_u64(u64);
    u32 => put_u64(u64);
    u64 => put_u64(u64);
}

impl Scalar for bool {
    fn is_default(&self) -> bool {
        !*self
    }

    fn emit(&self, w: &mut Encoder<'_>) {
        if *self {
            w.put_true();
        } else {
            w.put_false();
        }
    }

    fn emit_zero(w: &mut Encoder<'_>) {
        w.put_false();
    }
}

impl Scalar for f32 {
    fn is_default(&self) -> bool {
        *self == 0.0
    }

    fn emit(&self, w: &mut Encoder<'_>) {
        w.put_f32(*self);
    }

    fn emit_zero(w: &mut Encoder<'_>) {
        w.put_zero();
    }

    fn validate(&self, w: &mut Encoder<'_>) -> bool {
        if self.is_finite() {
            true
        } else {
            w.report(Error::NonFiniteNumber(f64::from(*self)));
            false
        }
    }
}

impl Scalar for f64 {
    fn is_default(&self) -> bool {
        *self == 0.0
    }

    fn emit(&self, w: &mut Encoder<'_>) {
        w.put_f64(*self);
    }

    fn emit_zero(w: &mut Encoder<'_>) {
        w.put_zero();
    }

    fn validate(&self, w: &mut Encoder<'_>) -> bool {
        if self.is_finite() {
            true
        } else {
            w.report(Error::NonFiniteNumber(*self));
            false
        }
    }
}

impl Scalar for str {
    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn emit(&self, w: &mut Encoder<'_>) {
        w.put_string(self);
    }

    fn emit_zero(w: &mut Encoder<'_>) {
        w.put_empty_string();
    }
}

impl Scalar for String {
    fn is_default(&self) -> bool {
        self.is_empty()
    }

    fn emit(&self, w: &mut Encoder<'_>) {
        w.put_string(self);
    }

    fn emit_zero(w: &mut Encoder<'_>) {
        w.put_empty_string();
    }
}

impl<'w> Encoder<'w> {
    // ---- scalars ---------------------------------------------------------

    /// Emits a bare scalar value; defaults are written literally.
    pub fn value<T: Scalar + ?Sized>(&mut self, v: &T) {
        if v.validate(self) {
            v.emit(self);
        }
    }

    /// Emits a bare optional scalar; `None` becomes `null`.
    pub fn value_opt<T: Scalar + ?Sized>(&mut self, v: Option<&T>) {
        match v {
            None => self.put_null(),
            Some(x) => self.value(x),
        }
    }

    /// Emits `"name": value` under the given presence policy.
    pub fn field<T: Scalar + ?Sized>(&mut self, name: &str, v: &T, presence: Presence) {
        if !v.validate(self) {
            return;
        }
        match presence {
            Presence::OmitDefault => {
                if !v.is_default() {
                    self.member(name);
                    v.emit(self);
                    self.comma();
                }
            }
            Presence::EmitDefault | Presence::CollapseNull => {
                self.member(name);
                v.emit(self);
                self.comma();
            }
        }
    }

    /// Emits an optional scalar member under the given presence policy.
    pub fn field_opt<T: Scalar + ?Sized>(&mut self, name: &str, v: Option<&T>, presence: Presence) {
        if let Some(x) = v {
            if !x.validate(self) {
                return;
            }
        }
        match presence {
            Presence::OmitDefault => {
                if let Some(x) = v {
                    if !x.is_default() {
                        self.member(name);
                        x.emit(self);
                        self.comma();
                    }
                }
            }
            Presence::EmitDefault => match v {
                None => self.null_member(name),
                Some(x) => {
                    self.member(name);
                    x.emit(self);
                    self.comma();
                }
            },
            Presence::CollapseNull => {
                self.member(name);
                match v {
                    Some(x) if !x.is_default() => x.emit(self),
                    _ => T::emit_zero(self),
                }
                self.comma();
            }
        }
    }

    // ---- bytes -----------------------------------------------------------

    /// Emits a bare bytes value as base64; `None` becomes `null`, empty
    /// becomes `""`.
    pub fn value_bytes(&mut self, v: Option<&[u8]>) {
        match v {
            None => self.put_null(),
            Some(b) if b.is_empty() => self.put_empty_string(),
            Some(b) => self.put_bytes(b),
        }
    }

    /// Emits a bytes member under the given presence policy.
    pub fn field_bytes(&mut self, name: &str, v: Option<&[u8]>, presence: Presence) {
        match presence {
            Presence::OmitDefault => {
                if let Some(b) = v {
                    if !b.is_empty() {
                        self.member(name);
                        self.put_bytes(b);
                        self.comma();
                    }
                }
            }
            Presence::EmitDefault => {
                match v {
                    None => return self.null_member(name),
                    Some(b) if b.is_empty() => {
                        self.member(name);
                        self.put_empty_string();
                    }
                    Some(b) => {
                        self.member(name);
                        self.put_bytes(b);
                    }
                }
                self.comma();
            }
            Presence::CollapseNull => {
                self.member(name);
                match v {
                    Some(b) if !b.is_empty() => self.put_bytes(b),
                    _ => self.put_empty_string(),
                }
                self.comma();
            }
        }
    }

    // ---- lists and maps --------------------------------------------------

    /// Emits a bare array, writing each element with `emit`. `None` becomes
    /// `null`, empty becomes `[]`.
    pub fn value_list_with<T>(&mut self, v: Option<&[T]>, emit: impl FnMut(&mut Self, &T)) {
        match v {
            None => self.put_null(),
            Some(items) if items.is_empty() => self.put_empty_array(),
            Some(items) => self.list_body(items, emit),
        }
    }

    /// Emits an array member under the given presence policy, writing each
    /// element with `emit`.
    pub fn field_list_with<T>(
        &mut self,
        name: &str,
        v: Option<&[T]>,
        presence: Presence,
        emit: impl FnMut(&mut Self, &T),
    ) {
        match presence {
            Presence::OmitDefault => {
                if let Some(items) = v {
                    if !items.is_empty() {
                        self.member(name);
                        self.list_body(items, emit);
                        self.comma();
                    }
                }
            }
            Presence::EmitDefault => {
                match v {
                    None => return self.null_member(name),
                    Some(items) if items.is_empty() => {
                        self.member(name);
                        self.put_empty_array();
                    }
                    Some(items) => {
                        self.member(name);
                        self.list_body(items, emit);
                    }
                }
                self.comma();
            }
            Presence::CollapseNull => {
                self.member(name);
                match v {
                    Some(items) if !items.is_empty() => self.list_body(items, emit),
                    _ => self.put_empty_array(),
                }
                self.comma();
            }
        }
    }

    /// Emits a bare string-keyed object, writing each value with `emit`.
    /// `None` becomes `null`, empty becomes `{}`.
    pub fn value_map_with<T>(
        &mut self,
        v: Option<&IndexMap<String, T>>,
        emit: impl FnMut(&mut Self, &T),
    ) {
        match v {
            None => self.put_null(),
            Some(m) if m.is_empty() => self.put_empty_object(),
            Some(m) => self.map_body(m, emit),
        }
    }

    /// Emits an object member under the given presence policy, writing each
    /// value with `emit`.
    pub fn field_map_with<T>(
        &mut self,
        name: &str,
        v: Option<&IndexMap<String, T>>,
        presence: Presence,
        emit: impl FnMut(&mut Self, &T),
    ) {
        match presence {
            Presence::OmitDefault => {
                if let Some(m) = v {
                    if !m.is_empty() {
                        self.member(name);
                        self.map_body(m, emit);
                        self.comma();
                    }
                }
            }
            Presence::EmitDefault => {
                match v {
                    None => return self.null_member(name),
                    Some(m) if m.is_empty() => {
                        self.member(name);
                        self.put_empty_object();
                    }
                    Some(m) => {
                        self.member(name);
                        self.map_body(m, emit);
                    }
                }
                self.comma();
            }
            Presence::CollapseNull => {
                self.member(name);
                match v {
                    Some(m) if !m.is_empty() => self.map_body(m, emit),
                    _ => self.put_empty_object(),
                }
                self.comma();
            }
        }
    }

    /// Emits a bare array of scalars.
    pub fn value_list<T: Scalar>(&mut self, v: Option<&[T]>) {
        self.value_list_with(v, Self::scalar_elem);
    }

    /// Emits a scalar array member under the given presence policy.
    pub fn field_list<T: Scalar>(&mut self, name: &str, v: Option<&[T]>, presence: Presence) {
        self.field_list_with(name, v, presence, Self::scalar_elem);
    }

    /// Emits a bare string-keyed object of scalars.
    pub fn value_map<T: Scalar>(&mut self, v: Option<&IndexMap<String, T>>) {
        self.value_map_with(v, Self::scalar_elem);
    }

    /// Emits a scalar map member under the given presence policy.
    pub fn field_map<T: Scalar>(
        &mut self,
        name: &str,
        v: Option<&IndexMap<String, T>>,
        presence: Presence,
    ) {
        self.field_map_with(name, v, presence, Self::scalar_elem);
    }

    // ---- enumerations ----------------------------------------------------

    /// Emits an enumeration's wire ordinal.
    pub fn value_enum<E: Enumeration>(&mut self, v: E) {
        self.put_i64(i64::from(v.ordinal()));
    }

    /// Emits an enumeration member as a number; ordinal zero is the
    /// default for `OmitDefault`.
    pub fn field_enum<E: Enumeration>(&mut self, name: &str, v: E, presence: Presence) {
        self.field(name, &v.ordinal(), presence);
    }

    /// Emits an optional enumeration member as a number. A present value is
    /// meaningful whatever its ordinal, so `OmitDefault` drops only `None`.
    pub fn field_enum_opt<E: Enumeration>(&mut self, name: &str, v: Option<E>, presence: Presence) {
        match presence {
            Presence::OmitDefault => {
                if let Some(e) = v {
                    self.member(name);
                    self.put_i64(i64::from(e.ordinal()));
                    self.comma();
                }
            }
            Presence::EmitDefault => match v {
                None => self.null_member(name),
                Some(e) => {
                    self.member(name);
                    self.put_i64(i64::from(e.ordinal()));
                    self.comma();
                }
            },
            Presence::CollapseNull => {
                self.member(name);
                self.put_i64(i64::from(v.unwrap_or_default().ordinal()));
                self.comma();
            }
        }
    }

    /// Emits an enumeration's JSON name.
    pub fn value_enum_name<E: Enumeration>(&mut self, v: E) {
        self.put_string(v.name());
    }

    /// Emits an enumeration member by name. Names are always written; the
    /// policy does not suppress them.
    pub fn field_enum_name<E: Enumeration>(&mut self, name: &str, v: E, _presence: Presence) {
        self.member(name);
        self.put_string(v.name());
        self.comma();
    }

    /// Emits an optional enumeration member by name; under `CollapseNull`
    /// an absent value is written as the default variant's name.
    pub fn field_enum_name_opt<E: Enumeration>(
        &mut self,
        name: &str,
        v: Option<E>,
        presence: Presence,
    ) {
        match presence {
            Presence::OmitDefault => {
                if let Some(e) = v {
                    self.member(name);
                    self.put_string(e.name());
                    self.comma();
                }
            }
            Presence::EmitDefault => match v {
                None => self.null_member(name),
                Some(e) => {
                    self.member(name);
                    self.put_string(e.name());
                    self.comma();
                }
            },
            Presence::CollapseNull => {
                self.member(name);
                self.put_string(v.unwrap_or_default().name());
                self.comma();
            }
        }
    }

    /// Emits a bare array of enumeration ordinals.
    pub fn value_enum_list<E: Enumeration>(&mut self, v: Option<&[E]>) {
        self.value_list_with(v, |w, e| w.value_enum(*e));
    }

    /// Emits an array member of enumeration ordinals.
    pub fn field_enum_list<E: Enumeration>(
        &mut self,
        name: &str,
        v: Option<&[E]>,
        presence: Presence,
    ) {
        self.field_list_with(name, v, presence, |w, e| w.value_enum(*e));
    }

    /// Emits a bare array of enumeration names.
    pub fn value_enum_name_list<E: Enumeration>(&mut self, v: Option<&[E]>) {
        self.value_list_with(v, |w, e| w.value_enum_name(*e));
    }

    /// Emits an array member of enumeration names.
    pub fn field_enum_name_list<E: Enumeration>(
        &mut self,
        name: &str,
        v: Option<&[E]>,
        presence: Presence,
    ) {
        self.field_list_with(name, v, presence, |w, e| w.value_enum_name(*e));
    }

    // ---- messages --------------------------------------------------------

    /// Emits a bare message; `None` becomes `null`.
    pub fn value_message<M: Message + ?Sized>(&mut self, v: Option<&M>) {
        match v {
            None => self.put_null(),
            Some(m) => m.encode_json(self),
        }
    }

    /// Emits a message member under the given presence policy; under
    /// `CollapseNull` an absent message is written as `{}`.
    pub fn field_message<M: Message + ?Sized>(
        &mut self,
        name: &str,
        v: Option<&M>,
        presence: Presence,
    ) {
        match presence {
            Presence::OmitDefault => {
                if let Some(m) = v {
                    self.member(name);
                    m.encode_json(self);
                    self.comma();
                }
            }
            Presence::EmitDefault => match v {
                None => self.null_member(name),
                Some(m) => {
                    self.member(name);
                    m.encode_json(self);
                    self.comma();
                }
            },
            Presence::CollapseNull => {
                self.member(name);
                match v {
                    Some(m) => m.encode_json(self),
                    None => self.put_empty_object(),
                }
                self.comma();
            }
        }
    }

    /// Emits a bare array of messages.
    pub fn value_message_list<M: Message>(&mut self, v: Option<&[M]>) {
        self.value_list_with(v, |w, m| m.encode_json(w));
    }

    /// Emits an array member of messages.
    pub fn field_message_list<M: Message>(
        &mut self,
        name: &str,
        v: Option<&[M]>,
        presence: Presence,
    ) {
        self.field_list_with(name, v, presence, |w, m| m.encode_json(w));
    }

    /// Emits a bare string-keyed object of messages.
    pub fn value_message_map<M: Message>(&mut self, v: Option<&IndexMap<String, M>>) {
        self.value_map_with(v, |w, m| m.encode_json(w));
    }

    /// Emits an object member of messages.
    pub fn field_message_map<M: Message>(
        &mut self,
        name: &str,
        v: Option<&IndexMap<String, M>>,
        presence: Presence,
    ) {
        self.field_map_with(name, v, presence, |w, m| m.encode_json(w));
    }

    // ---- bodies ----------------------------------------------------------

    fn scalar_elem<T: Scalar>(&mut self, it: &T) {
        if it.validate(self) {
            it.emit(self);
        }
    }

    /// Non-empty array body; the trailing separator is repaired into `]`.
    fn list_body<T>(&mut self, items: &[T], mut emit: impl FnMut(&mut Self, &T)) {
        self.ensure(2);
        self.buf.push(b'[');
        for it in items {
            emit(self, it);
            self.comma();
        }
        self.seal(b']');
    }

    /// Non-empty object body; keys are escaped strings.
    fn map_body<T>(&mut self, map: &IndexMap<String, T>, mut emit: impl FnMut(&mut Self, &T)) {
        self.ensure(2);
        self.buf.push(b'{');
        for (k, v) in map {
            self.put_string(k);
            self.buf.push(b':');
            emit(self, v);
            self.comma();
        }
        self.seal(b'}');
    }
}
