use crate::utils::error::{PackError, Result};
use chrono::format::{Item, StrftimeItems};
use crate::domain::model::LocalZone;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_time_zone(field_name: &str, value: &str) -> Result<LocalZone> {
    value
        .parse::<LocalZone>()
        .map_err(|e| PackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!(
                "Expected an IANA zone like America/Sao_Paulo or an offset like -03:00: {}",
                e
            ),
        })
}

pub fn validate_date_format(field_name: &str, format: &str) -> Result<()> {
    validate_non_empty_string(field_name, format)?;

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(PackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format.to_string(),
            reason: "Unsupported strftime specifier".to_string(),
        });
    }
    Ok(())
}
