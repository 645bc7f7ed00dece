pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

pub use toml_config::{CodeConfig, DatesConfig, JsonConfig, PackConfig, SignatureConfig};
