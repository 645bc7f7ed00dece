use crate::domain::model::CodeOptions;
use crate::utils::error::{PackError, Result};
use sha2::{Digest, Sha256};

const LOWER_CASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER_CASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Lowercase hex SHA-256 of `value` followed by the optional `gap` suffix.
pub fn sha256(value: &str, gap: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hasher.update(gap.unwrap_or_default().as_bytes());
    hex::encode(hasher.finalize())
}

pub fn random_sha256() -> String {
    let token = format!("{}{}", uuid::Uuid::new_v4(), nanoid::nanoid!());
    sha256(&token, None)
}

/// Random code drawn from the alphabets enabled in `options`, prefixed with
/// `options.prefix` when it is not blank.
pub fn create_code(options: &CodeOptions) -> Result<String> {
    if options.length == 0 {
        return Err(PackError::invalid_argument("length", "must be greater than zero"));
    }

    let alphabet: Vec<char> = [
        (options.lower_case, LOWER_CASE),
        (options.upper_case, UPPER_CASE),
        (options.digits, DIGITS),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .flat_map(|(_, characters)| characters.chars())
    .collect();

    if alphabet.is_empty() {
        return Err(PackError::invalid_argument(
            "alphabet",
            "enable at least one of lower case, upper case or digits",
        ));
    }

    let length = options.length;
    let code = nanoid::nanoid!(length, &alphabet);

    Ok(match options.prefix.as_deref().map(str::trim) {
        Some(prefix) if !prefix.is_empty() => format!("{}{}", prefix, code),
        _ => code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        assert_eq!(
            sha256("test", None),
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
        assert_eq!(sha256("te", Some("st")), sha256("test", None));
    }

    #[test]
    fn test_random_sha256() {
        let first = random_sha256();
        let second = random_sha256();
        assert_eq!(first.len(), 64);
        assert_ne!(first, second);
    }

    #[test]
    fn test_create_code_default() {
        let code = create_code(&CodeOptions::default()).unwrap();
        assert_eq!(code.len(), 16);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_create_code_digits_with_prefix() {
        let options = CodeOptions {
            prefix: Some("ord_".into()),
            length: 8,
            lower_case: false,
            upper_case: false,
            digits: true,
        };
        let code = create_code(&options).unwrap();
        assert!(code.starts_with("ord_"));
        assert_eq!(code.len(), 12);
        assert!(code[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_create_code_requires_alphabet() {
        let options = CodeOptions {
            lower_case: false,
            upper_case: false,
            digits: false,
            ..CodeOptions::default()
        };
        assert!(matches!(
            create_code(&options),
            Err(PackError::InvalidArgument { .. })
        ));
    }
}
