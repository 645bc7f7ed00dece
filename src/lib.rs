pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliArgs, Command};

pub use config::PackConfig;
pub use crate::core::case::NamingStrategy;
pub use crate::core::json::{JsonConverter, JsonSettings, LocalDate, LocalDateTime};
pub use domain::model::LocalZone;
pub use domain::ports::{EnumContract, TimeZoneProvider};
pub use utils::error::{PackError, Result};
