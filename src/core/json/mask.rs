use crate::utils::error::Result;
use serde_json::Value;

pub const DEFAULT_MASK: &str = "******";

/// Replaces, at any depth, the value of every key found in `blacklist`
/// (ignoring case) with `mask`. Nested objects under a blacklisted key are
/// masked as a whole.
pub fn mask_fields<S: AsRef<str>>(value: &mut Value, blacklist: &[S], mask: &str) {
    match value {
        Value::Object(object) => {
            for (key, child) in object.iter_mut() {
                if blacklist
                    .iter()
                    .any(|blocked| blocked.as_ref().eq_ignore_ascii_case(key))
                {
                    *child = Value::String(mask.to_owned());
                } else {
                    mask_fields(child, blacklist, mask);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                mask_fields(item, blacklist, mask);
            }
        }
        _ => {}
    }
}

/// Text variant of [`mask_fields`]; uses [`DEFAULT_MASK`] when `mask` is `None`.
pub fn mask_json<S: AsRef<str>>(json: &str, blacklist: &[S], mask: Option<&str>) -> Result<String> {
    let mut value: Value = serde_json::from_str(json)?;
    mask_fields(&mut value, blacklist, mask.unwrap_or(DEFAULT_MASK));
    Ok(serde_json::to_string(&value)?)
}
