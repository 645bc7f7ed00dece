//! JSON settings: naming strategy, null handling and enum and date converters
//! applied on top of `serde_json`.
//!
//! Types keep their plain `Serialize`/`Deserialize` derives. The settings are
//! applied at runtime by [`ContractSerializer`] and [`ContractDeserializer`],
//! which rename keys and enum variants while the value tree is built or read.

pub mod dates;
mod de;
pub mod mask;
mod ser;

pub use dates::{DateConverter, DateTimeConverter, LocalDate, LocalDateTime};
pub use de::ContractDeserializer;
pub use mask::{mask_fields, mask_json, DEFAULT_MASK};
pub use ser::ContractSerializer;

use crate::core::case::{loose_eq, NamingStrategy};
use crate::utils::error::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

/// Enum and date handling plugged into a [`JsonSettings`].
///
/// A settings value holds at most one converter per kind of value (enums,
/// date-times, dates); for date-times the first one listed applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonConverter {
    /// Writes unit variants in the naming strategy's case and reads them back
    /// exactly, by strategy name or ignoring case and underscores.
    EnumWithContract,
    /// Writes variants as declared and reads them ignoring case and
    /// underscores. Unknown names and numbers read as the variant named
    /// `Undefined`, or else the first one.
    FlexibleEnum,
    /// Writes [`LocalDateTime`] values as UTC `%Y-%m-%dT%H:%M:%S%.6f` and
    /// reads naive text as UTC.
    IsoDateTime,
    /// Writes and reads [`LocalDateTime`] values as wall-clock text in the
    /// converter's zone.
    DateTime(DateTimeConverter),
    /// Writes and reads [`LocalDate`] values in the converter's format.
    Date(DateConverter),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConverterKind {
    Enum,
    DateTime,
    Date,
}

impl JsonConverter {
    fn kind(&self) -> ConverterKind {
        match self {
            Self::EnumWithContract | Self::FlexibleEnum => ConverterKind::Enum,
            Self::IsoDateTime | Self::DateTime(_) => ConverterKind::DateTime,
            Self::Date(_) => ConverterKind::Date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonSettings {
    pub naming: NamingStrategy,
    pub ignore_null_values: bool,
    pub converters: Vec<JsonConverter>,
}

static SNAKE_CASE: LazyLock<JsonSettings> =
    LazyLock::new(|| JsonSettings::new(NamingStrategy::Snake));
static CAMEL_CASE: LazyLock<JsonSettings> =
    LazyLock::new(|| JsonSettings::new(NamingStrategy::Camel));
static LOWER_CASE: LazyLock<JsonSettings> =
    LazyLock::new(|| JsonSettings::new(NamingStrategy::Lower));
static ORIGINAL_CASE: LazyLock<JsonSettings> =
    LazyLock::new(|| JsonSettings::new(NamingStrategy::Original));

impl Default for JsonSettings {
    fn default() -> Self {
        Self::new(NamingStrategy::Original)
    }
}

impl JsonSettings {
    /// Settings that ignore null values and use [`JsonConverter::EnumWithContract`]
    /// and [`JsonConverter::IsoDateTime`].
    pub fn new(naming: NamingStrategy) -> Self {
        Self {
            naming,
            ignore_null_values: true,
            converters: vec![JsonConverter::EnumWithContract, JsonConverter::IsoDateTime],
        }
    }

    pub fn snake_case() -> &'static JsonSettings {
        &SNAKE_CASE
    }

    pub fn camel_case() -> &'static JsonSettings {
        &CAMEL_CASE
    }

    pub fn lower_case() -> &'static JsonSettings {
        &LOWER_CASE
    }

    pub fn original_case() -> &'static JsonSettings {
        &ORIGINAL_CASE
    }

    /// Shared settings for a strategy name, see [`NamingStrategy::parse`].
    pub fn for_strategy(strategy: &str) -> &'static JsonSettings {
        match NamingStrategy::parse(strategy) {
            NamingStrategy::Snake => Self::snake_case(),
            NamingStrategy::Camel => Self::camel_case(),
            NamingStrategy::Lower => Self::lower_case(),
            NamingStrategy::Original => Self::original_case(),
        }
    }

    /// Adds `converter`, replacing the one handling the same kind of value.
    pub fn with_converter(mut self, converter: JsonConverter) -> Self {
        let kind = converter.kind();
        match self.converters.iter_mut().find(|current| current.kind() == kind) {
            Some(current) => *current = converter,
            None => self.converters.push(converter),
        }
        self
    }

    pub fn clear_converters(mut self) -> Self {
        self.converters.clear();
        self
    }

    /// Swaps the enum converter for [`JsonConverter::FlexibleEnum`]; date
    /// converters are kept.
    pub fn use_flexible_enum_converter(self) -> Self {
        self.with_converter(JsonConverter::FlexibleEnum)
    }

    pub fn with_date_time_converter(self, converter: DateTimeConverter) -> Self {
        self.with_converter(JsonConverter::DateTime(converter))
    }

    pub fn with_date_converter(self, converter: DateConverter) -> Self {
        self.with_converter(JsonConverter::Date(converter))
    }

    pub fn include_null_values(mut self) -> Self {
        self.ignore_null_values = false;
        self
    }

    pub fn has_converter(&self, converter: &JsonConverter) -> bool {
        self.converters.contains(converter)
    }

    pub fn to_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value> {
        Ok(value.serialize(ContractSerializer::new(self))?)
    }

    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string(&self.to_value(value)?)?)
    }

    pub fn serialize_pretty<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_value(value)?)?)
    }

    pub fn from_value<T: DeserializeOwned>(&self, value: Value) -> Result<T> {
        Ok(T::deserialize(ContractDeserializer::new(value, self))?)
    }

    pub fn deserialize<T: DeserializeOwned>(&self, json: &str) -> Result<T> {
        let value: Value = serde_json::from_str(json)?;
        self.from_value(value)
    }

    /// Like [`deserialize`](Self::deserialize) but blank or invalid input
    /// yields `None`.
    pub fn try_deserialize<T: DeserializeOwned>(&self, json: &str) -> Option<T> {
        if json.trim().is_empty() {
            return None;
        }

        match self.deserialize(json) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Ignoring invalid JSON payload: {}", e);
                None
            }
        }
    }

    /// Serialized key for a Rust field or map key.
    pub fn property_name(&self, key: &str) -> String {
        self.naming.apply(key)
    }

    /// Serialized form of a unit variant.
    pub fn variant_name(&self, variant: &str) -> String {
        if self.has_converter(&JsonConverter::EnumWithContract) {
            self.naming.apply(variant)
        } else {
            variant.to_owned()
        }
    }

    /// Variant used by [`JsonConverter::FlexibleEnum`] for unknown input.
    pub(crate) fn fallback_variant(&self, variants: &[&'static str]) -> Option<&'static str> {
        if !self.has_converter(&JsonConverter::FlexibleEnum) {
            return None;
        }
        variants
            .iter()
            .find(|variant| loose_eq(variant, "Undefined"))
            .or_else(|| variants.first())
            .copied()
    }

    pub(crate) fn write_date_time(&self, value: &DateTime<Utc>) -> String {
        for converter in &self.converters {
            match converter {
                JsonConverter::DateTime(converter) => return converter.write(value),
                JsonConverter::IsoDateTime => {
                    return value.format(dates::LOCAL_DATE_TIME_FORMAT).to_string();
                }
                _ => {}
            }
        }
        dates::to_canonical_text(value)
    }

    /// Naive text is read as UTC unless a [`JsonConverter::DateTime`] is
    /// listed first.
    pub(crate) fn read_date_time(&self, text: &str) -> Result<Option<DateTime<Utc>>> {
        for converter in &self.converters {
            if let JsonConverter::DateTime(converter) = converter {
                return converter.read(Some(text));
            }
            if *converter == JsonConverter::IsoDateTime {
                break;
            }
        }
        DateTimeConverter::utc().read(Some(text))
    }

    pub(crate) fn write_date(&self, value: &NaiveDate) -> String {
        self.date_converter().write(value)
    }

    pub(crate) fn read_date(&self, text: &str) -> Result<Option<NaiveDate>> {
        self.date_converter().read(Some(text))
    }

    fn date_converter(&self) -> DateConverter {
        self.converters
            .iter()
            .find_map(|converter| match converter {
                JsonConverter::Date(converter) => Some(converter.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    pub(crate) fn resolve_field(&self, key: &str, fields: &[&'static str]) -> Option<&'static str> {
        fields
            .iter()
            .find(|field| **field == key)
            .or_else(|| fields.iter().find(|field| self.naming.apply(field) == key))
            .or_else(|| fields.iter().find(|field| loose_eq(field, key)))
            .copied()
    }

    pub(crate) fn resolve_variant(
        &self,
        value: &str,
        variants: &[&'static str],
    ) -> Option<&'static str> {
        if self.converters.is_empty() {
            return variants.iter().find(|variant| **variant == value).copied();
        }
        self.resolve_field(value, variants)
    }
}

/// Deserializes `value` with `settings`, or the snake case settings when none
/// are given. Blank or invalid input yields `None`.
pub fn try_deserialize<T: DeserializeOwned>(
    value: &str,
    settings: Option<&JsonSettings>,
) -> Option<T> {
    settings
        .unwrap_or_else(|| JsonSettings::snake_case())
        .try_deserialize(value)
}
