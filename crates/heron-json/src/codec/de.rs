//! Deserializer adapter that matches object keys to struct fields.
//!
//! Wraps the `serde_json` deserializer and, whenever a struct is requested,
//! rewrites incoming keys to the Rust field names they correspond to under
//! the active naming policy and case sensitivity. Keys that match no field
//! are passed through unchanged, and map keys are never touched.
//!
//! Some shapes are matched by serde itself from buffered content:
//! `#[serde(flatten)]` structs, internally tagged and untagged enums. Their
//! field lists are not visible here, so their keys are mapped back through
//! [`NamingPolicy::restore`] instead. Case-insensitive matching does not
//! reach those shapes.

use std::borrow::Cow;
use std::fmt;

use serde::de::value::StrDeserializer;
use serde::de::{
    self, DeserializeSeed, Deserializer, EnumAccess, Expected, MapAccess, SeqAccess, VariantAccess,
    Visitor,
};

use crate::naming::NamingPolicy;
use crate::options::JsonSerializerOptions;

/// Key matching rules taken from the serializer options.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KeyMatching {
    policy: Option<NamingPolicy>,
    case_insensitive: bool,
}

impl From<&JsonSerializerOptions> for KeyMatching {
    fn from(options: &JsonSerializerOptions) -> Self {
        Self {
            policy: options.property_naming_policy,
            case_insensitive: options.property_name_case_insensitive,
        }
    }
}

impl KeyMatching {
    fn json_name(self, field: &str) -> Cow<'_, str> {
        match self.policy {
            Some(policy) => policy.convert(field),
            None => Cow::Borrowed(field),
        }
    }

    /// Finds the field an incoming key refers to.
    fn field_for(self, key: &str, fields: &[&'static str]) -> Option<&'static str> {
        if let Some(field) = fields.iter().find(|f| self.json_name(f) == key) {
            return Some(*field);
        }

        if !self.case_insensitive {
            return None;
        }

        fields
            .iter()
            .find(|f| self.json_name(f).eq_ignore_ascii_case(key) || f.eq_ignore_ascii_case(key))
            .copied()
    }

    // Visitors serde uses to buffer content or to match keys by itself.
    fn mode_for<'de, V: Visitor<'de>>(self, visitor: &V) -> KeyMode {
        let Some(policy) = self.policy else {
            return KeyMode::Untouched;
        };

        let expecting = format!("{}", visitor as &dyn Expected);
        if expecting == "any value"
            || expecting.starts_with("internally tagged enum ")
            || expecting.starts_with("struct ")
        {
            KeyMode::Restored(policy)
        } else {
            KeyMode::Untouched
        }
    }
}

/// How the keys of the next object are presented to the visitor.
#[derive(Debug, Clone, Copy)]
enum KeyMode {
    Untouched,
    Fields(&'static [&'static str]),
    Restored(NamingPolicy),
}

/// Deserializer that applies [`KeyMatching`] to every struct it reaches.
pub(crate) struct MatchingDeserializer<D> {
    inner: D,
    matching: KeyMatching,
}

impl<D> MatchingDeserializer<D> {
    pub(crate) fn new(inner: D, matching: KeyMatching) -> Self {
        Self { inner, matching }
    }

    fn wrap<V>(&self, visitor: V, mode: KeyMode) -> Wrap<V> {
        Wrap {
            visitor,
            matching: self.matching,
            mode,
        }
    }
}

macro_rules! forward_wrapped {
    ($($method:ident($($arg:ident: $ty:ty),*)),* $(,)?) => {$(
        fn $method<V: Visitor<'de>>(self, $($arg: $ty,)* visitor: V) -> Result<V::Value, D::Error> {
            let visitor = self.wrap(visitor, KeyMode::Untouched);
            self.inner.$method($($arg,)* visitor)
        }
    )*};
}

impl<'de, D: Deserializer<'de>> Deserializer<'de> for MatchingDeserializer<D> {
    type Error = D::Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, D::Error> {
        let mode = self.matching.mode_for(&visitor);
        let visitor = self.wrap(visitor, mode);
        self.inner.deserialize_any(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, D::Error> {
        let mode = self.matching.mode_for(&visitor);
        let visitor = self.wrap(visitor, mode);
        self.inner.deserialize_map(visitor)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, D::Error> {
        let visitor = self.wrap(visitor, KeyMode::Fields(fields));
        self.inner.deserialize_struct(name, fields, visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, D::Error> {
        let visitor = self.wrap(visitor, KeyMode::Untouched);
        self.inner.deserialize_enum(name, variants, visitor)
    }

    forward_wrapped! {
        deserialize_bool(),
        deserialize_i8(),
        deserialize_i16(),
        deserialize_i32(),
        deserialize_i64(),
        deserialize_i128(),
        deserialize_u8(),
        deserialize_u16(),
        deserialize_u32(),
        deserialize_u64(),
        deserialize_u128(),
        deserialize_f32(),
        deserialize_f64(),
        deserialize_char(),
        deserialize_str(),
        deserialize_string(),
        deserialize_bytes(),
        deserialize_byte_buf(),
        deserialize_option(),
        deserialize_unit(),
        deserialize_unit_struct(name: &'static str),
        deserialize_newtype_struct(name: &'static str),
        deserialize_seq(),
        deserialize_tuple(len: usize),
        deserialize_tuple_struct(name: &'static str, len: usize),
        deserialize_identifier(),
        deserialize_ignored_any(),
    }

    fn is_human_readable(&self) -> bool {
        self.inner.is_human_readable()
    }
}

/// Visitor that keeps the matching rules attached to nested values.
struct Wrap<V> {
    visitor: V,
    matching: KeyMatching,
    mode: KeyMode,
}

macro_rules! forward_visits {
    ($($method:ident($ty:ty)),* $(,)?) => {$(
        fn $method<E: de::Error>(self, v: $ty) -> Result<Self::Value, E> {
            self.visitor.$method(v)
        }
    )*};
}

impl<'de, V: Visitor<'de>> Visitor<'de> for Wrap<V> {
    type Value = V::Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.visitor.expecting(f)
    }

    forward_visits! {
        visit_bool(bool),
        visit_i8(i8),
        visit_i16(i16),
        visit_i32(i32),
        visit_i64(i64),
        visit_i128(i128),
        visit_u8(u8),
        visit_u16(u16),
        visit_u32(u32),
        visit_u64(u64),
        visit_u128(u128),
        visit_f32(f32),
        visit_f64(f64),
        visit_char(char),
        visit_str(&str),
        visit_borrowed_str(&'de str),
        visit_string(String),
        visit_bytes(&[u8]),
        visit_borrowed_bytes(&'de [u8]),
        visit_byte_buf(Vec<u8>),
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        self.visitor.visit_none()
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        self.visitor.visit_unit()
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        self.visitor
            .visit_some(MatchingDeserializer::new(deserializer, self.matching))
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Self::Value, D::Error> {
        self.visitor
            .visit_newtype_struct(MatchingDeserializer::new(deserializer, self.matching))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        self.visitor.visit_seq(MatchingSeq {
            inner: seq,
            matching: self.matching,
        })
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        self.visitor.visit_map(MatchingMap {
            inner: map,
            matching: self.matching,
            mode: self.mode,
        })
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Self::Value, A::Error> {
        self.visitor.visit_enum(MatchingEnum {
            inner: data,
            matching: self.matching,
        })
    }
}

/// Seed for a nested value.
struct Nested<S> {
    seed: S,
    matching: KeyMatching,
}

impl<'de, S: DeserializeSeed<'de>> DeserializeSeed<'de> for Nested<S> {
    type Value = S::Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<S::Value, D::Error> {
        self.seed
            .deserialize(MatchingDeserializer::new(deserializer, self.matching))
    }
}

struct MatchingSeq<A> {
    inner: A,
    matching: KeyMatching,
}

impl<'de, A: SeqAccess<'de>> SeqAccess<'de> for MatchingSeq<A> {
    type Error = A::Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, A::Error> {
        self.inner.next_element_seed(Nested {
            seed,
            matching: self.matching,
        })
    }

    fn size_hint(&self) -> Option<usize> {
        self.inner.size_hint()
    }
}

struct MatchingMap<A> {
    inner: A,
    matching: KeyMatching,
    mode: KeyMode,
}

impl<'de, A: MapAccess<'de>> MapAccess<'de> for MatchingMap<A> {
    type Error = A::Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, A::Error> {
        match self.mode {
            KeyMode::Untouched => self.inner.next_key_seed(seed),
            mode => self.inner.next_key_seed(KeySeed {
                seed,
                matching: self.matching,
                mode,
            }),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, A::Error> {
        self.inner.next_value_seed(Nested {
            seed,
            matching: self.matching,
        })
    }

    fn size_hint(&self) -> Option<usize> {
        self.inner.size_hint()
    }
}

/// Reads an object key as a string and hands the matched name to `seed`.
struct KeySeed<S> {
    seed: S,
    matching: KeyMatching,
    mode: KeyMode,
}

impl<'de, S: DeserializeSeed<'de>> DeserializeSeed<'de> for KeySeed<S> {
    type Value = S::Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<S::Value, D::Error> {
        deserializer.deserialize_str(self)
    }
}

impl<'de, S: DeserializeSeed<'de>> Visitor<'de> for KeySeed<S> {
    type Value = S::Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object key")
    }

    fn visit_str<E: de::Error>(self, key: &str) -> Result<S::Value, E> {
        let name = match self.mode {
            KeyMode::Fields(fields) => {
                Cow::Borrowed(self.matching.field_for(key, fields).unwrap_or(key))
            }
            KeyMode::Restored(policy) => policy.restore(key),
            KeyMode::Untouched => Cow::Borrowed(key),
        };

        self.seed.deserialize(StrDeserializer::<E>::new(&*name))
    }
}

struct MatchingEnum<A> {
    inner: A,
    matching: KeyMatching,
}

impl<'de, A: EnumAccess<'de>> EnumAccess<'de> for MatchingEnum<A> {
    type Error = A::Error;
    type Variant = MatchingVariant<A::Variant>;

    fn variant_seed<V: DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, Self::Variant), A::Error> {
        let (value, variant) = self.inner.variant_seed(seed)?;
        Ok((
            value,
            MatchingVariant {
                inner: variant,
                matching: self.matching,
            },
        ))
    }
}

struct MatchingVariant<A> {
    inner: A,
    matching: KeyMatching,
}

impl<'de, A: VariantAccess<'de>> VariantAccess<'de> for MatchingVariant<A> {
    type Error = A::Error;

    fn unit_variant(self) -> Result<(), A::Error> {
        self.inner.unit_variant()
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value, A::Error> {
        self.inner.newtype_variant_seed(Nested {
            seed,
            matching: self.matching,
        })
    }

    fn tuple_variant<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value, A::Error> {
        self.inner.tuple_variant(
            len,
            Wrap {
                visitor,
                matching: self.matching,
                mode: KeyMode::Untouched,
            },
        )
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, A::Error> {
        self.inner.struct_variant(
            fields,
            Wrap {
                visitor,
                matching: self.matching,
                mode: KeyMode::Fields(fields),
            },
        )
    }
}
