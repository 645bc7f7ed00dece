//! Request building helpers for outgoing `reqwest` calls.

use crate::adapters::headers::basic_auth_value;
use crate::core::json::JsonSettings;
use crate::utils::error::{PackError, Result};
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Body, Method, Request};
use serde::Serialize;
use std::collections::BTreeMap;

pub trait RequestExt {
    /// Appends one query parameter per key, joining its values with `,`.
    fn add_query_lists(&mut self, query: &BTreeMap<String, Vec<String>>);

    fn add_query_map(&mut self, query: &BTreeMap<String, String>);

    /// Sets a raw JSON body. Skipped for `GET` and for blank content.
    fn add_json_body_as_string(&mut self, content: &str);

    /// Serializes `body` with `settings` and sets it as the JSON body.
    fn add_json_body<T: Serialize + ?Sized>(&mut self, body: &T, settings: &JsonSettings) -> Result<()>;

    fn add_basic_auth(&mut self, user: &str, pass: &str) -> Result<()>;

    /// Sets `key` only when `value` is not blank.
    fn add_header_not_empty(&mut self, key: &str, value: &str) -> Result<()>;
}

impl RequestExt for Request {
    fn add_query_lists(&mut self, query: &BTreeMap<String, Vec<String>>) {
        if query.is_empty() {
            return;
        }
        self.url_mut()
            .query_pairs_mut()
            .extend_pairs(query.iter().map(|(name, values)| (name, values.join(","))));
    }

    fn add_query_map(&mut self, query: &BTreeMap<String, String>) {
        if query.is_empty() {
            return;
        }
        self.url_mut().query_pairs_mut().extend_pairs(query.iter());
    }

    fn add_json_body_as_string(&mut self, content: &str) {
        if self.method() == Method::GET || content.trim().is_empty() {
            return;
        }
        *self.body_mut() = Some(Body::from(content.to_string()));
        self.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    fn add_json_body<T: Serialize + ?Sized>(&mut self, body: &T, settings: &JsonSettings) -> Result<()> {
        let content = settings.serialize(body)?;
        self.add_json_body_as_string(&content);
        Ok(())
    }

    fn add_basic_auth(&mut self, user: &str, pass: &str) -> Result<()> {
        let value = HeaderValue::from_str(&basic_auth_value(user, pass)).map_err(|e| {
            PackError::HeaderError {
                message: e.to_string(),
            }
        })?;
        self.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }

    fn add_header_not_empty(&mut self, key: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Ok(());
        }

        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| PackError::HeaderError {
            message: format!("`{}`: {}", key, e),
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| PackError::HeaderError {
            message: format!("value of `{}`: {}", key, e),
        })?;
        self.headers_mut().insert(name, value);
        Ok(())
    }
}
