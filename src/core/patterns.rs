//! Regular expression builders for common input validation.

use crate::utils::error::Result;
use regex::Regex;

const OCTET: &str = r"(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])";
const URL: &str = r"https?://[a-zA-Z0-9.\-]+\.[a-zA-Z]+(:[a-zA-Z0-9]*)?/?([a-zA-Z0-9\-._:?,'/+&%$#=~])*[^.,)(\s]";
const SPECIAL: &str = r#"["'!@#$%¨&*()_\-+=§¬¢£¹²³\\/|,.<>;:?°ºª\[\]{}~^´`]"#;

fn ip() -> String {
    format!(r"({octet}\.){{3}}{octet}", octet = OCTET)
}

/// Dotted IPv4 address, `0.0.0.0` to `255.255.255.255`.
pub fn ip_pattern() -> String {
    format!("^{}$", ip())
}

pub fn url_pattern() -> String {
    format!("^{}$", URL)
}

pub fn url_or_ip_pattern() -> String {
    format!("^(({})|({}))$", URL, ip())
}

/// Letters only, between `min` and `max` characters.
pub fn alpha_pattern(min: usize, max: usize) -> String {
    format!("^[A-Za-z]{{{},{}}}$", min, max)
}

pub fn alpha_numeric_pattern(min: usize, max: usize) -> String {
    format!("^[A-Za-z0-9]{{{},{}}}$", min, max)
}

/// Whether every text matches `pattern`. A missing or empty list yields
/// `allow_empty`.
pub fn is_match<S: AsRef<str>>(texts: Option<&[S]>, pattern: &str, allow_empty: bool) -> Result<bool> {
    let texts = match texts {
        Some(texts) if !texts.is_empty() => texts,
        _ => return Ok(allow_empty),
    };

    let regex = Regex::new(pattern)?;
    Ok(texts.iter().all(|text| regex.is_match(text.as_ref())))
}

/// Password policy checked as a set of expressions: one for the length and
/// one per required character class.
#[derive(Debug, Clone)]
pub struct PasswordRules {
    rules: Vec<Regex>,
}

impl PasswordRules {
    pub fn is_match(&self, password: &str) -> bool {
        self.rules.iter().all(|rule| rule.is_match(password))
    }

    pub fn matches_all<S: AsRef<str>>(&self, passwords: &[S]) -> bool {
        passwords.iter().all(|password| self.is_match(password.as_ref()))
    }

    pub fn patterns(&self) -> Vec<&str> {
        self.rules.iter().map(Regex::as_str).collect()
    }
}

pub fn password_rules(
    min: usize,
    max: usize,
    requires_special: bool,
    requires_numeric: bool,
    requires_lower: bool,
    requires_upper: bool,
) -> Result<PasswordRules> {
    let length = format!("^.{{{},{}}}$", min, max);
    let patterns = [
        (true, length.as_str()),
        (requires_lower, "[a-z]"),
        (requires_upper, "[A-Z]"),
        (requires_numeric, "[0-9]"),
        (requires_special, SPECIAL),
    ];

    let rules = patterns
        .into_iter()
        .filter(|(required, _)| *required)
        .map(|(_, pattern)| Regex::new(pattern))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(PasswordRules { rules })
}
