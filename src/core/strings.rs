use crate::utils::error::{PackError, Result};
use base64::{engine::general_purpose, Engine as _};

/// Splits on any of `separators`, drops empty pieces and joins the rest with
/// `new_value`. A missing input yields an empty string.
pub fn replace_separators(value: Option<&str>, separators: &[char], new_value: &str) -> String {
    let Some(value) = value else {
        return String::new();
    };

    value
        .split(separators)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(new_value)
}

pub fn base64_encode(value: &str) -> String {
    general_purpose::STANDARD.encode(value.as_bytes())
}

pub fn base64_decode(value: &str) -> Result<String> {
    let bytes = general_purpose::STANDARD
        .decode(value.trim())
        .map_err(|e| PackError::invalid_argument("value", format!("Invalid base64: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| PackError::invalid_argument("value", format!("Invalid UTF-8: {}", e)))
}
