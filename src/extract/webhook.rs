//! Webhook extractor — defensive JSON field extraction.
//!
//! "Is this a valid webhook?" is a business question, so an unparseable
//! payload produces a structured `is_valid = false` record rather than an
//! error. Every nested access tolerates missing intermediate objects; the
//! engine never relies on a validation pre-check having run.

use serde_json::Value;

use crate::config::EngineConfig;
use crate::types::{NOT_FOUND, UNKNOWN, WebhookFields};

/// Extracts event fields from a JSON webhook payload.
#[derive(Debug)]
pub struct WebhookExtractor {
    preview_chars: usize,
}

impl WebhookExtractor {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            preview_chars: config.invalid_preview_chars,
        }
    }

    /// Extract webhook fields from `text`. Never fails outward: a parse
    /// failure yields the structured invalid record.
    pub fn extract(&self, text: &str) -> WebhookFields {
        let payload: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(_) => return self.invalid(text),
        };

        let data = payload.get("data");

        WebhookFields {
            is_valid: true,
            event_id: top_level_str(&payload, "id", NOT_FOUND),
            event_type: top_level_str(&payload, "type", UNKNOWN),
            source: top_level_str(&payload, "source", UNKNOWN),
            timestamp: top_level_str(&payload, "timestamp", NOT_FOUND),
            status: data
                .and_then(|d| d.get("status"))
                .and_then(Value::as_str)
                .map(str::to_string),
            // data.amount arrives in minor currency units
            amount: data
                .and_then(|d| d.get("amount"))
                .and_then(Value::as_f64)
                .map(|minor| minor / 100.0),
            currency: data
                .and_then(|d| d.get("currency"))
                .and_then(Value::as_str)
                .map(str::to_uppercase)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            customer_email: nested_customer_str(data, "email"),
            customer_name: nested_customer_str(data, "name"),
            metadata_keys: data
                .and_then(|d| d.get("metadata"))
                .and_then(Value::as_object)
                .map(|map| map.keys().cloned().collect())
                .unwrap_or_default(),
            payload_size: serde_json::to_string(&payload)
                .map(|s| s.len())
                .unwrap_or(text.len()),
            content_preview: None,
            error: None,
        }
    }

    /// Structured invalid-payload record: a definitive, successful answer
    /// that the content is not a valid webhook.
    fn invalid(&self, raw: &str) -> WebhookFields {
        WebhookFields {
            is_valid: false,
            event_id: NOT_FOUND.to_string(),
            event_type: UNKNOWN.to_string(),
            source: UNKNOWN.to_string(),
            timestamp: NOT_FOUND.to_string(),
            status: None,
            amount: None,
            currency: UNKNOWN.to_string(),
            customer_email: NOT_FOUND.to_string(),
            customer_name: NOT_FOUND.to_string(),
            metadata_keys: Vec::new(),
            payload_size: raw.len(),
            content_preview: Some(raw.chars().take(self.preview_chars).collect()),
            error: Some("Invalid JSON format".to_string()),
        }
    }
}

fn top_level_str(payload: &Value, key: &str, default: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

fn nested_customer_str(data: Option<&Value>, key: &str) -> String {
    data.and_then(|d| d.get("customer"))
        .and_then(|c| c.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| NOT_FOUND.to_string())
}
