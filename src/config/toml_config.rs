use crate::core::case::NamingStrategy;
use crate::core::json::dates::{DateConverter, DateTimeConverter};
use crate::core::json::JsonSettings;
use crate::domain::model::CodeOptions;
use crate::utils::error::{PackError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

const NAMING_VALUES: [&str; 7] = [
    "snake",
    "snakecase",
    "camel",
    "camelcase",
    "lower",
    "lowercase",
    "original",
];

/// Settings file of the toolkit. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    pub json: JsonConfig,
    pub dates: DatesConfig,
    pub signature: SignatureConfig,
    pub code: CodeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub naming: String,
    pub ignore_null_values: bool,
    pub flexible_enums: bool,
    /// Exchange date-times as wall-clock text in `dates.time_zone` instead of
    /// UTC.
    pub local_date_times: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            naming: "snake".to_string(),
            ignore_null_values: true,
            flexible_enums: false,
            local_date_times: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatesConfig {
    /// IANA zone such as `America/Sao_Paulo`, or a fixed offset like `-04:00`.
    #[serde(alias = "utc_offset")]
    pub time_zone: String,
    pub date_format: String,
}

impl Default for DatesConfig {
    fn default() -> Self {
        Self {
            time_zone: "America/Sao_Paulo".to_string(),
            date_format: crate::core::json::dates::DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    pub header_name: String,
    pub private_key: Option<String>,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            header_name: crate::adapters::headers::DEFAULT_SIGNATURE_HEADER.to_string(),
            private_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    pub prefix: Option<String>,
    pub length: usize,
    pub lower_case: bool,
    pub upper_case: bool,
    pub digits: bool,
}

impl Default for CodeConfig {
    fn default() -> Self {
        let options = CodeOptions::default();
        Self {
            prefix: options.prefix,
            length: options.length,
            lower_case: options.lower_case,
            upper_case: options.upper_case,
            digits: options.digits,
        }
    }
}

impl PackConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| PackError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left in place.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn json_settings(&self) -> Result<JsonSettings> {
        let mut settings = JsonSettings::new(NamingStrategy::parse(&self.json.naming))
            .with_date_converter(self.date_converter());
        if self.json.flexible_enums {
            settings = settings.use_flexible_enum_converter();
        }
        if self.json.local_date_times {
            settings = settings.with_date_time_converter(self.date_time_converter()?);
        }
        if !self.json.ignore_null_values {
            settings = settings.include_null_values();
        }
        Ok(settings)
    }

    pub fn date_time_converter(&self) -> Result<DateTimeConverter> {
        let zone = validation::validate_time_zone("dates.time_zone", &self.dates.time_zone)?;
        Ok(DateTimeConverter::with_zone(zone))
    }

    pub fn date_converter(&self) -> DateConverter {
        DateConverter::with_format(self.dates.date_format.clone())
    }

    pub fn code_options(&self) -> CodeOptions {
        CodeOptions {
            prefix: self.code.prefix.clone(),
            length: self.code.length,
            lower_case: self.code.lower_case,
            upper_case: self.code.upper_case,
            digits: self.code.digits,
        }
    }

    pub fn private_key(&self) -> Result<&str> {
        self.signature
            .private_key
            .as_deref()
            .ok_or_else(|| PackError::MissingConfigError {
                field: "signature.private_key".to_string(),
            })
    }
}

impl Validate for PackConfig {
    fn validate(&self) -> Result<()> {
        let naming = self.json.naming.trim().to_lowercase();
        if !NAMING_VALUES.contains(&naming.as_str()) {
            return Err(PackError::InvalidConfigValueError {
                field: "json.naming".to_string(),
                value: self.json.naming.clone(),
                reason: format!("Valid values: {}", NAMING_VALUES.join(", ")),
            });
        }

        validation::validate_time_zone("dates.time_zone", &self.dates.time_zone)?;
        validation::validate_date_format("dates.date_format", &self.dates.date_format)?;
        validation::validate_non_empty_string("signature.header_name", &self.signature.header_name)?;
        if let Some(key) = &self.signature.private_key {
            validation::validate_non_empty_string("signature.private_key", key)?;
        }

        validation::validate_range("code.length", self.code.length, 1, 255)?;
        if !(self.code.lower_case || self.code.upper_case || self.code.digits) {
            return Err(PackError::InvalidConfigValueError {
                field: "code".to_string(),
                value: "false".to_string(),
                reason: "Enable at least one of lower_case, upper_case or digits".to_string(),
            });
        }

        Ok(())
    }
}
