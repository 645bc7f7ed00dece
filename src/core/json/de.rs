use super::dates::{self, LOCAL_DATE_TIME_TOKEN, LOCAL_DATE_TOKEN};
use super::JsonSettings;
use serde::de::{
    self, DeserializeSeed, Deserializer, EnumAccess, IntoDeserializer, MapAccess, SeqAccess,
    Unexpected, VariantAccess, Visitor,
};
use serde::forward_to_deserialize_any;
use serde_json::{Error, Map, Value};
use tracing::debug;

/// Deserializer over an owned [`Value`] that maps incoming keys and enum
/// variant names onto the Rust names using the wrapped [`JsonSettings`].
pub struct ContractDeserializer<'a> {
    value: Value,
    settings: &'a JsonSettings,
}

impl<'a> ContractDeserializer<'a> {
    pub fn new(value: Value, settings: &'a JsonSettings) -> Self {
        Self { value, settings }
    }
}

impl<'de, 'a> IntoDeserializer<'de, Error> for ContractDeserializer<'a> {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

impl<'de, 'a> Deserializer<'de> for ContractDeserializer<'a> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.value {
            Value::Array(items) => visitor.visit_seq(ContractSeqAccess::new(items, self.settings)),
            Value::Object(object) => {
                visitor.visit_map(ContractMapAccess::new(object, self.settings, &[]))
            }
            scalar => scalar.deserialize_any(visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    /// Date markers are read by the settings' date converters and handed on
    /// as RFC 3339 text; blank text is handed on as null.
    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        let settings = self.settings;
        let canonical = match (name, self.value) {
            (LOCAL_DATE_TIME_TOKEN, Value::String(text)) => settings
                .read_date_time(&text)
                .map_err(<Error as de::Error>::custom)?
                .map(|value| dates::to_canonical_text(&value)),
            (LOCAL_DATE_TOKEN, Value::String(text)) => settings
                .read_date(&text)
                .map_err(<Error as de::Error>::custom)?
                .map(|value| value.format(dates::DEFAULT_DATE_FORMAT).to_string()),
            (_, value) => {
                return visitor.visit_newtype_struct(ContractDeserializer::new(value, settings))
            }
        };
        visitor.visit_newtype_struct(canonical.map_or(Value::Null, Value::String))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        match self.value {
            Value::Object(object) => {
                visitor.visit_map(ContractMapAccess::new(object, self.settings, fields))
            }
            Value::Array(items) => visitor.visit_seq(ContractSeqAccess::new(items, self.settings)),
            other => other.deserialize_struct(name, fields, visitor),
        }
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        let fallback = self.settings.fallback_variant(variants);
        let (variant, value) = match (self.value, fallback) {
            (Value::String(variant), _) => (variant, None),
            (Value::Object(object), _) if object.len() == 1 => match object.into_iter().next() {
                Some((variant, value)) => (variant, Some(value)),
                None => return Err(de::Error::invalid_length(0, &"map with a single key")),
            },
            (Value::Number(number), Some(fallback)) => {
                debug!("{} is not a {} variant name, using {}", number, name, fallback);
                (fallback.to_owned(), None)
            }
            (other, _) => return other.deserialize_enum(name, variants, visitor),
        };

        let variant = match fallback {
            Some(fallback) if self.settings.resolve_variant(&variant, variants).is_none() => {
                debug!("`{}` is not a {} variant, using {}", variant, name, fallback);
                fallback.to_owned()
            }
            _ => variant,
        };

        visitor.visit_enum(ContractEnumAccess {
            variant,
            value,
            variants,
            settings: self.settings,
        })
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map identifier
        ignored_any
    }
}

struct ContractSeqAccess<'a> {
    items: std::vec::IntoIter<Value>,
    settings: &'a JsonSettings,
}

impl<'a> ContractSeqAccess<'a> {
    fn new(items: Vec<Value>, settings: &'a JsonSettings) -> Self {
        Self {
            items: items.into_iter(),
            settings,
        }
    }
}

impl<'de> SeqAccess<'de> for ContractSeqAccess<'_> {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, Error> {
        match self.items.next() {
            Some(value) => seed
                .deserialize(ContractDeserializer::new(value, self.settings))
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

/// Map access that renames keys to struct field names when `fields` is not
/// empty; plain maps keep their keys.
struct ContractMapAccess<'a> {
    entries: serde_json::map::IntoIter,
    pending: Option<Value>,
    fields: &'static [&'static str],
    settings: &'a JsonSettings,
}

impl<'a> ContractMapAccess<'a> {
    fn new(
        object: Map<String, Value>,
        settings: &'a JsonSettings,
        fields: &'static [&'static str],
    ) -> Self {
        Self {
            entries: object.into_iter(),
            pending: None,
            fields,
            settings,
        }
    }
}

impl<'de> MapAccess<'de> for ContractMapAccess<'_> {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>, Error> {
        let Some((key, value)) = self.entries.next() else {
            return Ok(None);
        };

        self.pending = Some(value);
        let key = match self.settings.resolve_field(&key, self.fields) {
            Some(field) => field.to_owned(),
            None => key,
        };
        seed.deserialize(Value::String(key)).map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, Error> {
        let value = self
            .pending
            .take()
            .ok_or_else(|| <Error as de::Error>::custom("value requested before its key"))?;
        seed.deserialize(ContractDeserializer::new(value, self.settings))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

struct ContractEnumAccess<'a> {
    variant: String,
    value: Option<Value>,
    variants: &'static [&'static str],
    settings: &'a JsonSettings,
}

impl<'de, 'a> EnumAccess<'de> for ContractEnumAccess<'a> {
    type Error = Error;
    type Variant = ContractVariantAccess<'a>;

    fn variant_seed<V: DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, Self::Variant), Error> {
        let variant = match self.settings.resolve_variant(&self.variant, self.variants) {
            Some(name) => name.to_owned(),
            None => self.variant,
        };
        let tag = seed.deserialize(Value::String(variant))?;

        Ok((
            tag,
            ContractVariantAccess {
                value: self.value,
                settings: self.settings,
            },
        ))
    }
}

struct ContractVariantAccess<'a> {
    value: Option<Value>,
    settings: &'a JsonSettings,
}

impl<'de> VariantAccess<'de> for ContractVariantAccess<'_> {
    type Error = Error;

    fn unit_variant(self) -> Result<(), Error> {
        match self.value {
            None | Some(Value::Null) => Ok(()),
            Some(_) => Err(de::Error::invalid_type(
                Unexpected::NewtypeVariant,
                &"unit variant",
            )),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value, Error> {
        match self.value {
            Some(value) => seed.deserialize(ContractDeserializer::new(value, self.settings)),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"newtype variant",
            )),
        }
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value, Error> {
        match self.value {
            Some(Value::Array(items)) => {
                visitor.visit_seq(ContractSeqAccess::new(items, self.settings))
            }
            _ => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"tuple variant",
            )),
        }
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        match self.value {
            Some(Value::Object(object)) => {
                visitor.visit_map(ContractMapAccess::new(object, self.settings, fields))
            }
            _ => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"struct variant",
            )),
        }
    }
}
