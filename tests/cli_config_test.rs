#![cfg(feature = "cli")]

use anyhow::Result;
use clap::Parser;
use pack_utils::config::cli::execute;
use pack_utils::utils::validation::Validate;
use pack_utils::{CliArgs, Command, PackConfig, PackError};
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

fn run(config: &PackConfig, args: &[&str]) -> pack_utils::Result<String> {
    let args = CliArgs::parse_from(std::iter::once("pack-utils").chain(args.iter().copied()));
    execute(&args.command, config)
}

#[test]
fn test_commands_follow_config_file() -> Result<()> {
    let file = config_file(
        r#"
[json]
naming = "camel"

[signature]
private_key = "my-key"

[code]
prefix = "ord_"
length = 8
upper_case = false
lower_case = false
"#,
    )?;

    let config = PackConfig::from_file(file.path())?;
    config.validate()?;

    assert_eq!(
        run(&config, &["json", r#"{"user_name":"x","Address":{"zip_code":"1"}}"#])?,
        r#"{"userName":"x","address":{"zipCode":"1"}}"#
    );

    let signature = run(&config, &["sign", "some content"])?;
    assert_eq!(
        signature,
        "ae00f9ad096b6d2ca828e972bcda212ed74b338ebc1332c56b2d96bb06fc845e"
    );
    assert_eq!(run(&config, &["verify", signature.as_str(), "some content"])?, "valid");
    assert_eq!(run(&config, &["verify", signature.as_str(), "other content"])?, "invalid");

    let code = run(&config, &["code"])?;
    assert!(code.starts_with("ord_"));
    assert_eq!(code.len(), 12);
    assert!(code[4..].chars().all(|c| c.is_ascii_digit()));
    Ok(())
}

#[test]
fn test_naming_flag_overrides_config() -> Result<()> {
    let config = PackConfig::default();

    let output = run(
        &config,
        &["json", r#"{"userName":"x","secret":"y"}"#, "--naming", "lower", "--mask", "secret"],
    )?;
    assert_eq!(output, r#"{"username":"x","secret":"******"}"#);
    Ok(())
}

#[test]
fn test_utility_commands() -> Result<()> {
    let config = PackConfig::default();

    assert_eq!(run(&config, &["case", "SomeValue1", "--strategy", "camel"])?, "someValue1");
    assert_eq!(
        run(&config, &["sha256", "abc"])?,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_eq!(
        run(&config, &["query", "https://site.com/path?a=1&b=2", "b", "3"])?,
        "https://site.com/path?a=1&b=3"
    );
    assert_eq!(
        run(&config, &["query", "https://site.com/path?a=1&b=2", "a"])?,
        "https://site.com/path?b=2"
    );

    let address = run(
        &config,
        &["address", "--line1", "Rua Teste, 123", "--line2", "Centro", "--zip", "20000-123"],
    )?;
    assert!(address.contains(r#""number": "123""#));
    assert!(address.contains(r#""zip_code": "20000123""#));
    Ok(())
}

#[test]
fn test_sign_without_key_fails() -> Result<()> {
    let err = run(&PackConfig::default(), &["sign", "content"]).unwrap_err();

    assert!(matches!(err, PackError::MissingConfigError { .. }));
    assert!(err.user_friendly_message().contains("signature.private_key"));
    Ok(())
}

#[test]
fn test_invalid_config_file() -> Result<()> {
    let file = config_file("[code]\nlength = 0\n")?;
    let config = PackConfig::from_file(file.path())?;

    assert!(config.validate().is_err());
    assert!(PackConfig::from_file("/nonexistent/pack-utils.toml").is_err());
    Ok(())
}
