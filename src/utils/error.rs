use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid regex pattern: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Invalid URI: {0}")]
    UriError(#[from] url::ParseError),

    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("{value} not found in {type_name}")]
    NotFound { value: String, type_name: String },

    #[error("Unable to parse date `{value}`: {reason}")]
    DateParseError { value: String, reason: String },

    #[error("Invalid header: {message}")]
    HeaderError { message: String },

    #[error("Signature error: {message}")]
    SignatureError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value `{value}` for `{field}`: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

impl PackError {
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Short message for terminal output, without the error chain.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::SerializationError(e) => format!("The JSON input is not valid: {}", e),
            Self::RegexError(_) => "The regular expression could not be compiled".to_string(),
            Self::UriError(e) => format!("The URI is not valid: {}", e),
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::SerializationError(_) => "Validate the JSON document and the target shape",
            Self::RegexError(_) => "Check the pattern syntax; look-around is not supported",
            Self::UriError(_) => "Pass an absolute URI such as https://example.com/path",
            Self::InvalidArgument { .. } => "Check the arguments passed to the command",
            Self::NotFound { .. } => "Use one of the declared names or descriptions",
            Self::DateParseError { .. } => "Use an ISO 8601 value such as 2019-07-22T13:00:00",
            Self::HeaderError { .. } => "Header names and values must be visible ASCII",
            Self::SignatureError { .. } => "Check the private key and the signed payload",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration file and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, PackError>;
