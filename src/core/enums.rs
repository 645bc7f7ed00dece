//! Enum parsing and description helpers built on [`EnumContract`].

use crate::core::case::{loose_eq, NamingStrategy};
use crate::domain::ports::EnumContract;
use crate::utils::error::{PackError, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Declares a field-less enum and implements [`EnumContract`] for it.
///
/// Variants may carry an explicit discriminant and a description:
///
/// ```
/// pack_utils::enum_contract! {
///     pub enum PaymentStatus {
///         Undefined = 0,
///         Paid = 1 => "paid in full",
///         Refunded = 2,
///     }
/// }
///
/// use pack_utils::EnumContract;
/// assert_eq!(PaymentStatus::Paid.description(), Some("paid in full"));
/// assert_eq!(PaymentStatus::Refunded.value(), 2);
/// ```
///
/// The macro derives `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq` and `Hash`;
/// further attributes (serde derives, `repr`) are passed through.
#[macro_export]
macro_rules! enum_contract {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $variant:ident $(= $value:expr)? $(=> $description:literal)?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant $(= $value)?),+
        }

        impl $crate::EnumContract for $name {
            const NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            fn value(&self) -> i64 {
                *self as i64
            }

            fn description(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => None $(.or(Some($description)))?),+
                }
            }

            fn fallback() -> Self {
                let declared = [$(Self::$variant),+];
                declared
                    .iter()
                    .copied()
                    .find(|variant| {
                        $crate::core::case::loose_eq(
                            <Self as $crate::EnumContract>::name(variant),
                            "Undefined",
                        )
                    })
                    .unwrap_or(declared[0])
            }
        }
    };
}

pub fn from_value<E: EnumContract>(value: i64) -> Option<E> {
    E::VARIANTS.iter().copied().find(|variant| variant.value() == value)
}

/// Case-insensitive name or declared integer value.
pub fn parse_enum<E: EnumContract>(value: &str) -> Option<E> {
    let value = value.trim();
    E::VARIANTS
        .iter()
        .copied()
        .find(|variant| variant.name().eq_ignore_ascii_case(value))
        .or_else(|| value.parse::<i64>().ok().and_then(from_value::<E>))
}

/// Parses `value`, falling back to [`EnumContract::fallback`] when it is
/// missing or unknown.
pub fn convert_to_enum<E: EnumContract>(value: Option<&str>) -> E {
    let Some(value) = value else {
        return E::fallback();
    };

    parse_enum(value).unwrap_or_else(|| {
        tracing::debug!("`{}` is not a {} value, using fallback", value, E::NAME);
        E::fallback()
    })
}

/// Maps a variant of one enum onto the same-named variant of another.
pub fn convert_between<E: EnumContract, F: EnumContract>(value: F) -> E {
    convert_to_enum(Some(value.name()))
}

pub fn convert_all<E: EnumContract, S: AsRef<str>>(values: Option<&[S]>) -> Vec<E> {
    values
        .map(|values| {
            values
                .iter()
                .map(|value| convert_to_enum(Some(value.as_ref())))
                .collect()
        })
        .unwrap_or_default()
}

pub fn description_or_empty<E: EnumContract>(value: E) -> &'static str {
    value.description().unwrap_or_default()
}

/// Finds the variant whose description equals `description`; variants without
/// a description are matched by name.
pub fn enum_from_description<E: EnumContract>(
    description: &str,
    not_found_return_default: bool,
) -> Result<E> {
    let found = E::VARIANTS
        .iter()
        .copied()
        .find(|variant| match variant.description() {
            Some(text) => text == description,
            None => variant.name() == description,
        });

    match found {
        Some(variant) => Ok(variant),
        None if not_found_return_default => Ok(E::fallback()),
        None => Err(PackError::NotFound {
            value: description.to_string(),
            type_name: E::NAME.to_string(),
        }),
    }
}

/// Case-sensitive check; `None` is valid only when `accept_null` is set.
pub fn is_valid_to_parse<E: EnumContract>(value: Option<&str>, accept_null: bool) -> bool {
    let Some(value) = value else {
        return accept_null;
    };

    let value = value.trim();
    E::VARIANTS.iter().any(|variant| variant.name() == value)
        || value
            .parse::<i64>()
            .ok()
            .and_then(from_value::<E>)
            .is_some()
}

pub fn descriptions_of<E: EnumContract>(values: &[E]) -> Vec<&'static str> {
    values
        .iter()
        .filter_map(|value| value.description())
        .filter(|description| !description.trim().is_empty())
        .collect()
}

pub fn all_with_description<E: EnumContract>() -> Vec<E> {
    E::VARIANTS
        .iter()
        .copied()
        .filter(|variant| {
            variant
                .description()
                .is_some_and(|description| !description.trim().is_empty())
        })
        .collect()
}

/// Variant names as an API schema would list them under `strategy`.
pub fn schema_values<E: EnumContract>(strategy: NamingStrategy) -> Vec<String> {
    E::VARIANTS
        .iter()
        .map(|variant| strategy.apply(variant.name()))
        .collect()
}

/// Reads a string (ignoring case and underscores) or a declared integer.
pub fn read_flexible<E: EnumContract>(value: &Value) -> Option<E> {
    match value {
        Value::String(text) if !text.is_empty() => E::VARIANTS
            .iter()
            .copied()
            .find(|variant| loose_eq(variant.name(), text)),
        Value::Number(number) => number.as_i64().and_then(from_value),
        _ => None,
    }
}

/// Serde helpers for lenient enum fields:
/// `#[serde(deserialize_with = "pack_utils::core::enums::flexible::deserialize")]`.
pub mod flexible {
    use super::read_flexible;
    use crate::domain::ports::EnumContract;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Unknown or null input becomes [`EnumContract::fallback`].
    pub fn deserialize<'de, D, E>(deserializer: D) -> Result<E, D::Error>
    where
        D: Deserializer<'de>,
        E: EnumContract,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(read_flexible(&value).unwrap_or_else(|| {
            tracing::debug!("{} is not a {} value, using fallback", value, E::NAME);
            E::fallback()
        }))
    }

    pub mod option {
        use super::read_flexible;
        use crate::domain::ports::EnumContract;
        use serde::{Deserialize, Deserializer};
        use serde_json::Value;

        /// Unknown or null input becomes `None`.
        pub fn deserialize<'de, D, E>(deserializer: D) -> Result<Option<E>, D::Error>
        where
            D: Deserializer<'de>,
            E: EnumContract,
        {
            let value = Value::deserialize(deserializer)?;
            Ok(read_flexible(&value))
        }
    }
}

/// Reader for optional enum values that substitutes a default for unknown
/// strings. Null input and undefined integers still read as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDefault<E: EnumContract> {
    default: E,
}

impl<E: EnumContract> EnumDefault<E> {
    pub fn new(default: E) -> Self {
        Self { default }
    }

    pub fn default_value(&self) -> E {
        self.default
    }

    pub fn read(&self, value: &Value) -> Option<E> {
        match value {
            Value::String(text) if !text.is_empty() => Some(
                E::VARIANTS
                    .iter()
                    .copied()
                    .find(|variant| loose_eq(variant.name(), text))
                    .unwrap_or(self.default),
            ),
            Value::Number(number) => number.as_i64().and_then(from_value),
            _ => None,
        }
    }
}

/// Building block for `deserialize_with` functions of optional enum fields:
///
/// ```ignore
/// fn status_or_pending<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Status>, D::Error> {
///     deserialize_with_default(d, Status::Pending)
/// }
/// ```
pub fn deserialize_with_default<'de, D, E>(
    deserializer: D,
    default: E,
) -> std::result::Result<Option<E>, D::Error>
where
    D: Deserializer<'de>,
    E: EnumContract,
{
    let value = Value::deserialize(deserializer)?;
    Ok(EnumDefault::new(default).read(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    crate::enum_contract! {
        enum EnumTest1 {
            Undefined,
            Test1 => "test 1",
            Test2 => "test 2",
        }
    }

    crate::enum_contract! {
        enum EnumTest2 {
            Undefined,
            Test1 => "test 1.1",
            Test3,
        }
    }

    crate::enum_contract! {
        enum Numbered {
            Value1 = 2,
            Value2 = 4,
        }
    }

    #[test]
    fn test_convert_between_enums() {
        let converted: EnumTest1 = convert_between(EnumTest2::Test1);
        assert_eq!(converted, EnumTest1::Test1);
    }

    #[test]
    fn test_convert_to_enum_fallbacks() {
        assert_eq!(convert_to_enum::<EnumTest1>(None), EnumTest1::Undefined);
        assert_eq!(convert_to_enum::<EnumTest1>(Some("Some")), EnumTest1::Undefined);
        assert_eq!(convert_to_enum::<EnumTest1>(Some("test2")), EnumTest1::Test2);
        assert_eq!(convert_to_enum::<EnumTest1>(Some("1")), EnumTest1::Test1);
    }

    #[test]
    fn test_fallback_without_undefined_is_first() {
        assert_eq!(Numbered::fallback(), Numbered::Value1);
        assert_eq!(convert_to_enum::<Numbered>(Some("7")), Numbered::Value1);
    }

    #[test]
    fn test_convert_all() {
        let none: Option<&[&str]> = None;
        assert!(convert_all::<EnumTest1, _>(none).is_empty());

        let values = ["Test1", "Bla"];
        let converted: Vec<EnumTest1> = convert_all(Some(&values[..]));
        assert_eq!(converted, vec![EnumTest1::Test1, EnumTest1::Undefined]);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(description_or_empty(EnumTest1::Test1), "test 1");
        assert_eq!(description_or_empty(EnumTest1::Undefined), "");
        assert_eq!(
            descriptions_of(&[EnumTest1::Undefined, EnumTest1::Test1]),
            vec!["test 1"]
        );
        assert_eq!(
            all_with_description::<EnumTest1>(),
            vec![EnumTest1::Test1, EnumTest1::Test2]
        );
    }

    #[test]
    fn test_enum_from_description() {
        assert_eq!(
            enum_from_description::<EnumTest1>("test 1", true).unwrap(),
            EnumTest1::Test1
        );
        assert_eq!(
            enum_from_description::<EnumTest1>("Undefined", false).unwrap(),
            EnumTest1::Undefined
        );
        assert_eq!(
            enum_from_description::<EnumTest1>("test 12", true).unwrap(),
            EnumTest1::Undefined
        );

        let err = enum_from_description::<EnumTest1>("Bla", false).unwrap_err();
        assert_eq!(err.to_string(), "Bla not found in EnumTest1");
    }

    #[test]
    fn test_is_valid_to_parse() {
        assert!(is_valid_to_parse::<EnumTest1>(Some("Test1"), false));
        assert!(!is_valid_to_parse::<EnumTest1>(Some("test1"), false));
        assert!(!is_valid_to_parse::<EnumTest1>(Some("Test123"), false));
        assert!(is_valid_to_parse::<Numbered>(Some("4"), false));
        assert!(is_valid_to_parse::<EnumTest1>(None, true));
        assert!(!is_valid_to_parse::<EnumTest1>(None, false));
    }

    #[test]
    fn test_schema_values() {
        assert_eq!(
            schema_values::<Numbered>(NamingStrategy::Snake),
            vec!["value_1", "value_2"]
        );
        assert_eq!(
            schema_values::<Numbered>(NamingStrategy::Camel),
            vec!["value1", "value2"]
        );
    }

    #[test]
    fn test_read_flexible() {
        assert_eq!(read_flexible::<Numbered>(&json!("value_2")), Some(Numbered::Value2));
        assert_eq!(read_flexible::<Numbered>(&json!(2)), Some(Numbered::Value1));
        assert_eq!(read_flexible::<Numbered>(&json!(5)), None);
        assert_eq!(read_flexible::<Numbered>(&Value::Null), None);
    }

    #[test]
    fn test_enum_default_reader() {
        let reader = EnumDefault::new(EnumTest1::Test2);
        assert_eq!(reader.read(&json!("invalid_value")), Some(EnumTest1::Test2));
        assert_eq!(reader.read(&json!("test_1")), Some(EnumTest1::Test1));
        assert_eq!(reader.read(&json!(42)), None);
        assert_eq!(reader.read(&Value::Null), None);
        assert_eq!(reader.default_value(), EnumTest1::Test2);
    }
}
