//! HMAC-SHA256 request signatures, hex encoded in lowercase.

use crate::core::dictionary::to_dictionary;
use crate::utils::error::{PackError, Result};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

fn mac_for(private_key: &str) -> Result<HmacSha256> {
    HmacSha256::new_from_slice(private_key.as_bytes()).map_err(|e| PackError::SignatureError {
        message: e.to_string(),
    })
}

pub fn create_signature(private_key: &str, message: &str) -> Result<String> {
    let mut mac = mac_for(private_key)?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Signs the concatenation of `name + value` for every non-null top-level
/// field of `data`, in name order ignoring case (`amount`, `Uid`, `URL`).
/// Fields listed in `ignore_fields` are left out.
pub fn create_signature_from_object<T: Serialize + ?Sized>(
    private_key: &str,
    data: &T,
    ignore_fields: &[&str],
) -> Result<String> {
    create_signature(private_key, &signature_message(data, ignore_fields)?)
}

fn signature_message<T: Serialize + ?Sized>(data: &T, ignore_fields: &[&str]) -> Result<String> {
    let mut fields: Vec<(String, String)> = to_dictionary(data)?
        .into_iter()
        .filter(|(name, _)| !ignore_fields.contains(&name.as_str()))
        .collect();
    // Lower case sorts before upper case on ties.
    fields.sort_by(|(a, _), (b, _)| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| b.cmp(a))
    });

    let message = fields
        .into_iter()
        .fold(String::new(), |mut message, (name, value)| {
            message.push_str(&name);
            message.push_str(&value);
            message
        });
    Ok(message)
}

/// Constant-time check of a hex signature; hex case is ignored. Malformed
/// signatures are reported as invalid.
pub fn validate_signature(signature: &str, private_key: &str, message: &str) -> bool {
    let Ok(expected) = hex::decode(signature.trim()) else {
        debug!("Signature is not valid hex");
        return false;
    };

    match mac_for(private_key) {
        Ok(mut mac) => {
            mac.update(message.as_bytes());
            mac.verify_slice(&expected).is_ok()
        }
        Err(_) => false,
    }
}

pub fn validate_signature_from_object<T: Serialize + ?Sized>(
    signature: &str,
    private_key: &str,
    data: &T,
    ignore_fields: &[&str],
) -> bool {
    match signature_message(data, ignore_fields) {
        Ok(message) => validate_signature(signature, private_key, &message),
        Err(e) => {
            debug!("Unable to build signature message: {}", e);
            false
        }
    }
}
