use crate::core::strings::replace_separators;
use crate::domain::model::SplitAddress;
use regex::Regex;

const SEPARATORS: [char; 9] = ['\\', '/', ',', '.', '\t', '-', '_', '\'', '"'];

const MISSING_TEXT: &str = "-";
const MISSING_CODE: &str = "??";
const MAX_TEXT_LEN: usize = 64;
const MAX_CODE_LEN: usize = 16;

/// Splits free-form address lines into street, number and neighborhood.
///
/// The house number is the first digit run of `line1`, or of `line2` when
/// `line1` has none; any Unicode decimal digit counts. Returns `None` when
/// `line1` or `zip_code` is blank.
pub fn split_address(
    line1: &str,
    line2: &str,
    city: &str,
    state: &str,
    country: &str,
    zip_code: &str,
) -> Option<SplitAddress> {
    if line1.trim().is_empty() || zip_code.trim().is_empty() {
        return None;
    }

    let digits = Regex::new(r"\d+").ok()?;
    let non_digits = Regex::new(r"\D").ok()?;

    let mut street = line1.to_string();
    let mut neighborhood = line2.to_string();
    let mut number = MISSING_TEXT.to_string();

    let line1_clean = replace_separators(Some(line1), &SEPARATORS, "");
    if let Some(found) = first_number(&digits, &line1_clean) {
        street = line1_clean.replace(found, "");
        number = found.to_string();
    } else {
        let line2_clean = replace_separators(Some(line2), &SEPARATORS, "");
        if let Some(found) = first_number(&digits, &line2_clean) {
            neighborhood = line2_clean.replace(found, "");
            number = found.to_string();
        }
    }

    Some(SplitAddress {
        street: truncate(or_default(street.trim(), MISSING_TEXT), MAX_TEXT_LEN),
        number: truncate(number, MAX_CODE_LEN),
        neighborhood: truncate(or_default(neighborhood.trim(), MISSING_TEXT), MAX_TEXT_LEN),
        city: truncate(or_default(city.trim(), MISSING_CODE), MAX_TEXT_LEN),
        state: or_default(state.trim(), MISSING_CODE),
        country: country.trim().to_string(),
        zip_code: truncate(
            non_digits.replace_all(zip_code, "").into_owned(),
            MAX_CODE_LEN,
        ),
    })
}

fn first_number<'t>(digits: &Regex, text: &'t str) -> Option<&'t str> {
    digits.find(text).map(|found| found.as_str())
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

fn truncate(value: String, max: usize) -> String {
    if value.chars().count() > max {
        value.chars().take(max).collect()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_required_fields() {
        assert!(split_address("", "Centro", "Rio", "RJ", "BR", "20000-000").is_none());
        assert!(split_address("Rua A, 10", "Centro", "Rio", "RJ", "BR", " ").is_none());
    }

    #[test]
    fn test_number_from_first_line() {
        let address =
            split_address("Rua Teste, 123", "Centro", "Rio de Janeiro", "RJ", "BR", "20.000-123")
                .unwrap();

        assert_eq!(address.street, "Rua Teste");
        assert_eq!(address.number, "123");
        assert_eq!(address.neighborhood, "Centro");
        assert_eq!(address.city, "Rio de Janeiro");
        assert_eq!(address.zip_code, "20000123");
    }

    #[test]
    fn test_number_from_second_line() {
        let address = split_address("Rua Teste", "Casa 42", "Rio", "RJ", "BR", "20000").unwrap();

        assert_eq!(address.street, "Rua Teste");
        assert_eq!(address.number, "42");
        assert_eq!(address.neighborhood, "Casa");
    }

    #[test]
    fn test_number_is_first_digit_run() {
        let address =
            split_address("Av. 7 de Setembro, 1500", "Sala 12", "Salvador", "BA", "BR", "40060-001")
                .unwrap();

        assert_eq!(address.number, "7");
        assert_eq!(address.street, "Av  de Setembro 1500");
        assert_eq!(address.neighborhood, "Sala 12");
        assert_eq!(address.zip_code, "40060001");
    }

    #[test]
    fn test_unicode_digits() {
        let address = split_address("Rua ١٢", "", "Rio", "RJ", "BR", "CEP ٢٠٠٠٠").unwrap();

        assert_eq!(address.number, "١٢");
        assert_eq!(address.zip_code, "٢٠٠٠٠");
    }

    #[test]
    fn test_defaults() {
        let address = split_address("Rua Teste", "", "", "", "BR", "20000").unwrap();

        assert_eq!(address.number, "-");
        assert_eq!(address.neighborhood, "-");
        assert_eq!(address.city, "??");
        assert_eq!(address.state, "??");
    }

    #[test]
    fn test_length_caps() {
        let long_street = "A".repeat(80);
        let address =
            split_address(&long_street, "", "C".repeat(70).as_str(), "SP", "BR", &"9".repeat(20))
                .unwrap();

        assert_eq!(address.street.len(), 64);
        assert_eq!(address.city.len(), 64);
        assert_eq!(address.zip_code.len(), 16);
    }
}
