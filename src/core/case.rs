//! Case conversion for property names and enum values.
//!
//! All converters treat an empty input as "no value" and return `None`, so
//! callers can tell a missing name apart from one that converts to text.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Rule mapping a property name to its serialized key form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NamingStrategy {
    Snake,
    Camel,
    Lower,
    #[default]
    Original,
}

impl NamingStrategy {
    /// Resolves a strategy name: `snake`/`snakecase`, `camel`/`camelcase`,
    /// `lower`/`lowercase`, ignoring case and surrounding whitespace. Anything
    /// else keeps names as they are.
    pub fn parse(strategy: &str) -> Self {
        match strategy.trim().to_lowercase().as_str() {
            "snake" | "snakecase" => Self::Snake,
            "camel" | "camelcase" => Self::Camel,
            "lower" | "lowercase" => Self::Lower,
            _ => Self::Original,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snake => "snake",
            Self::Camel => "camel",
            Self::Lower => "lower",
            Self::Original => "original",
        }
    }

    /// Renames a key. Unlike the free functions, an empty name stays empty.
    pub fn apply(&self, name: &str) -> String {
        let converted = match self {
            Self::Snake => to_snake_case(name),
            Self::Camel => to_camel_case(name),
            Self::Lower => to_lower_case(name),
            Self::Original => return name.to_owned(),
        };
        converted.unwrap_or_default()
    }
}

impl FromStr for NamingStrategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `SomeValue1` -> `some_value_1`.
///
/// An underscore goes before every uppercase letter except the first
/// character and before every digit run; existing underscores are not doubled.
pub fn to_snake_case(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    let mut result = String::with_capacity(value.len() + value.len() / 2);
    let mut previous: Option<char> = None;

    for ch in value.chars() {
        if let Some(prev) = previous {
            let starts_word =
                ch.is_uppercase() || (ch.is_ascii_digit() && !prev.is_ascii_digit());
            if starts_word && prev != '_' {
                result.push('_');
            }
        }
        result.extend(ch.to_lowercase());
        previous = Some(ch);
    }

    Some(result)
}

/// `some_value_1` -> `someValue1`, `HTMLParser` -> `htmlParser`.
///
/// Parts after the first underscore-separated part are capitalised. Inside a
/// run of uppercase letters only the first one and the one that starts the
/// next word are kept. The first letter of the result is lowered.
pub fn to_camel_case(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    let mut joined: Vec<char> = Vec::with_capacity(value.len());
    for (index, part) in value.split('_').filter(|part| !part.is_empty()).enumerate() {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            if index == 0 {
                joined.push(first);
            } else {
                joined.extend(first.to_uppercase());
            }
            joined.extend(chars);
        }
    }

    if joined.is_empty() {
        return None;
    }

    let mut result = String::with_capacity(joined.len());
    for (i, &ch) in joined.iter().enumerate() {
        let after_upper = i > 0 && joined[i - 1].is_uppercase();
        let before_upper_or_end = joined.get(i + 1).map_or(true, |next| next.is_uppercase());

        if i == 0 || (ch.is_uppercase() && after_upper && before_upper_or_end) {
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }

    Some(result)
}

pub fn to_lower_case(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    Some(value.to_lowercase())
}

/// Converts `value` with the strategy named by `strategy`; unknown strategy
/// names pass the value through.
pub fn to_case(value: &str, strategy: &str) -> Option<String> {
    match NamingStrategy::parse(strategy) {
        NamingStrategy::Snake => to_snake_case(value),
        NamingStrategy::Camel => to_camel_case(value),
        NamingStrategy::Lower => to_lower_case(value),
        NamingStrategy::Original => Some(value.to_owned()),
    }
}

/// Equality ignoring case and underscores: `value_test1` matches `ValueTest1`.
pub fn loose_eq(a: &str, b: &str) -> bool {
    normalized(a).eq(normalized(b))
}

fn normalized(value: &str) -> impl Iterator<Item = char> + '_ {
    value
        .chars()
        .filter(|ch| *ch != '_')
        .flat_map(char::to_lowercase)
}
