use crate::config::PackConfig;
use crate::core::case::{self, NamingStrategy};
use crate::core::json::{self, JsonSettings};
use crate::core::{address, hash, signature, uri};
use crate::utils::error::{PackError, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pack-utils")]
#[command(about = "Case, JSON, signature, hashing and URI helpers for web services")]
#[command(version)]
pub struct CliArgs {
    /// TOML settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON on stderr")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Convert a name to snake, camel or lower case
    Case {
        value: String,
        #[arg(long, default_value = "snake")]
        strategy: String,
    },
    /// Re-key a JSON document (stdin when omitted) and optionally mask fields
    Json {
        document: Option<String>,
        #[arg(long, help = "Naming strategy, defaults to the configured one")]
        naming: Option<String>,
        #[arg(long, value_delimiter = ',')]
        mask: Vec<String>,
        #[arg(long)]
        pretty: bool,
    },
    /// HMAC-SHA256 signature of a message
    Sign {
        message: String,
        #[arg(long, help = "Private key, defaults to signature.private_key")]
        key: Option<String>,
    },
    /// Check a signature against a message
    Verify {
        signature: String,
        message: String,
        #[arg(long)]
        key: Option<String>,
    },
    /// SHA-256 of a value, or of random input when omitted
    Sha256 {
        value: Option<String>,
        #[arg(long)]
        gap: Option<String>,
    },
    /// Add, replace or remove a query-string parameter
    Query {
        uri: String,
        parameter: String,
        value: Option<String>,
    },
    /// Random code using the [code] settings
    Code {
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long)]
        length: Option<usize>,
    },
    /// Split address lines into street, number and neighborhood
    Address {
        #[arg(long)]
        line1: String,
        #[arg(long, default_value = "")]
        line2: String,
        #[arg(long, default_value = "")]
        city: String,
        #[arg(long, default_value = "")]
        state: String,
        #[arg(long, default_value = "")]
        country: String,
        #[arg(long)]
        zip: String,
    },
}

/// Runs `command` and returns the text to print on stdout.
pub fn execute(command: &Command, config: &PackConfig) -> Result<String> {
    match command {
        Command::Case { value, strategy } => Ok(case::to_case(value, strategy).unwrap_or_default()),
        Command::Json {
            document,
            naming,
            mask,
            pretty,
        } => {
            let text = match document {
                Some(text) => text.clone(),
                None => read_stdin()?,
            };
            let mut value: Value = serde_json::from_str(&text)?;
            if !mask.is_empty() {
                json::mask_fields(&mut value, mask.as_slice(), json::DEFAULT_MASK);
            }

            let settings = match naming {
                Some(naming) => JsonSettings::new(NamingStrategy::parse(naming)),
                None => config.json_settings()?,
            };
            if *pretty {
                settings.serialize_pretty(&value)
            } else {
                settings.serialize(&value)
            }
        }
        Command::Sign { message, key } => {
            let key = resolve_key(key.as_deref(), config)?;
            signature::create_signature(key, message)
        }
        Command::Verify {
            signature: expected,
            message,
            key,
        } => {
            let key = resolve_key(key.as_deref(), config)?;
            let valid = signature::validate_signature(expected, key, message);
            Ok(if valid { "valid" } else { "invalid" }.to_string())
        }
        Command::Sha256 { value, gap } => Ok(match value {
            Some(value) => hash::sha256(value, gap.as_deref()),
            None => hash::random_sha256(),
        }),
        Command::Query {
            uri: target,
            parameter,
            value,
        } => Ok(uri::add_query_string(target, parameter, value.as_deref())),
        Command::Code { prefix, length } => {
            let mut options = config.code_options();
            if prefix.is_some() {
                options.prefix = prefix.clone();
            }
            if let Some(length) = length {
                options.length = *length;
            }
            hash::create_code(&options)
        }
        Command::Address {
            line1,
            line2,
            city,
            state,
            country,
            zip,
        } => {
            let split = address::split_address(line1, line2, city, state, country, zip)
                .ok_or_else(|| PackError::invalid_argument("line1/zip", "both are required"))?;
            config.json_settings()?.serialize_pretty(&split)
        }
    }
}

fn resolve_key<'a>(key: Option<&'a str>, config: &'a PackConfig) -> Result<&'a str> {
    match key {
        Some(key) => Ok(key),
        None => config.private_key(),
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
