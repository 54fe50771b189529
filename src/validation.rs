//! Optional pre-check validators.
//!
//! Collaborators (a transport layer, a UI) may run these before
//! `DocumentEngine::process` to report structural problems early. The
//! engine itself never requires them — extractors stay defensive either
//! way — so skipping validation only costs the caller the early report.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::patterns::PatternLibrary;
use crate::types::{InvoiceFields, NOT_FOUND};

/// Outcome of a pre-check: hard errors, soft warnings, and a quality
/// score that decays with each finding.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub score: f64,
}

impl ValidationReport {
    fn from_findings(errors: Vec<String>, warnings: Vec<String>, error_penalty: f64) -> Self {
        let score = (1.0 - errors.len() as f64 * error_penalty - warnings.len() as f64 * 0.1)
            .max(0.0);
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            score,
        }
    }
}

// ── Email ───────────────────────────────────────────────────────────

/// Structural pre-check for header-style email text.
#[derive(Debug)]
pub struct EmailValidator {
    patterns: Arc<PatternLibrary>,
}

impl EmailValidator {
    pub fn new(patterns: Arc<PatternLibrary>) -> Self {
        Self { patterns }
    }

    pub fn validate(&self, content: &str) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if content.trim().is_empty() {
            errors.push("Email content is empty".to_string());
            return ValidationReport::from_findings(errors, warnings, 0.2);
        }

        for (label, pattern) in [
            ("From", &self.patterns.from_header),
            ("To", &self.patterns.to_header),
            ("Subject", &self.patterns.subject_header),
        ] {
            match pattern.captures(content).and_then(|c| c.get(1)) {
                Some(value) if !value.as_str().trim().is_empty() => {}
                _ => errors.push(format!("Missing required field: {label}")),
            }
        }

        for (label, pattern) in [
            ("From", &self.patterns.from_header),
            ("To", &self.patterns.to_header),
        ] {
            if let Some(value) = pattern.captures(content).and_then(|c| c.get(1)) {
                for address in value.as_str().split(',') {
                    let address = address.trim();
                    if !address.is_empty() && !self.is_whole_address(address) {
                        errors.push(format!("Invalid email address in {label}: {address}"));
                    }
                }
            }
        }

        if let Some(subject) = self
            .patterns
            .subject_header
            .captures(content)
            .and_then(|c| c.get(1))
        {
            let subject = subject.as_str().trim();
            if subject.len() > 200 {
                warnings.push("Subject line is very long (>200 characters)".to_string());
            } else if !subject.is_empty() && subject.len() < 5 {
                warnings.push("Subject line is very short (<5 characters)".to_string());
            }
        }

        let lower = content.to_lowercase();
        let spam_hits: Vec<&str> = SPAM_KEYWORDS
            .iter()
            .copied()
            .filter(|kw| lower.contains(kw))
            .collect();
        if !spam_hits.is_empty() {
            warnings.push(format!(
                "Potential spam indicators found: {}",
                spam_hits.join(", ")
            ));
        }

        ValidationReport::from_findings(errors, warnings, 0.2)
    }

    fn is_whole_address(&self, candidate: &str) -> bool {
        self.patterns
            .email_address
            .find(candidate)
            .is_some_and(|m| m.as_str().len() == candidate.len())
    }
}

const SPAM_KEYWORDS: &[&str] = &[
    "urgent",
    "act now",
    "limited time",
    "click here",
    "free money",
    "guaranteed",
    "risk free",
    "no obligation",
];

// ── Invoice ─────────────────────────────────────────────────────────

/// Business-rule pre-check over already-extracted invoice fields.
#[derive(Debug, Default)]
pub struct InvoiceValidator;

impl InvoiceValidator {
    pub fn validate(&self, fields: &InvoiceFields) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if fields.invoice_numbers.is_empty() {
            errors.push("Missing required field: invoice_number".to_string());
        }
        if fields.dates_found.is_empty() {
            errors.push("Missing required field: date".to_string());
        }
        if fields.amounts.is_empty() {
            errors.push("Missing required field: total".to_string());
        } else if fields.total_amount == 0.0 {
            warnings.push("Total amount is zero".to_string());
        } else if fields.total_amount > 1_000_000.0 {
            warnings.push("Total amount is very large (>$1,000,000)".to_string());
        }

        if fields.vendor == NOT_FOUND {
            warnings.push("Vendor could not be identified".to_string());
        }

        ValidationReport::from_findings(errors, warnings, 0.25)
    }
}

// ── Webhook ─────────────────────────────────────────────────────────

/// Shape pre-check for webhook payloads.
#[derive(Debug, Default)]
pub struct WebhookValidator;

impl WebhookValidator {
    /// Validate raw text: parse first, then check the payload shape.
    pub fn validate_text(&self, content: &str) -> ValidationReport {
        match serde_json::from_str::<Value>(content) {
            Ok(payload) => self.validate(&payload),
            Err(err) => ValidationReport::from_findings(
                vec![format!("JSON parse error: {err}")],
                Vec::new(),
                0.2,
            ),
        }
    }

    pub fn validate(&self, payload: &Value) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let Some(object) = payload.as_object() else {
            errors.push("Webhook payload must be a JSON object".to_string());
            return ValidationReport::from_findings(errors, warnings, 0.2);
        };

        for field in ["type", "data"] {
            if !object.contains_key(field) {
                errors.push(format!("Missing required field: {field}"));
            }
        }

        if let Some(amount) = object.get("data").and_then(|d| d.get("amount")) {
            if !amount.is_number() {
                errors.push("Field 'data.amount' should be numeric".to_string());
            } else if amount.as_f64().unwrap_or(0.0) < 0.0 {
                warnings.push("Negative amount".to_string());
            }
        }

        for (key, value) in object {
            let is_id_field = key == "id" || key.ends_with("_id");
            if is_id_field && !value.is_string() && !value.is_number() {
                warnings.push(format!("ID field '{key}' should be string or number"));
            }
        }

        ValidationReport::from_findings(errors, warnings, 0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_validator() -> EmailValidator {
        EmailValidator::new(Arc::new(PatternLibrary::new()))
    }

    #[test]
    fn complete_email_passes() {
        let report = email_validator()
            .validate("From: a@b.com\nTo: c@d.com\nSubject: quarterly report\n\nAttached.");
        assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
        assert_eq!(report.score, 1.0);
    }

    #[test]
    fn empty_email_is_an_error() {
        let report = email_validator().validate("   \n  ");
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn missing_headers_are_errors() {
        let report = email_validator().validate("no headers at all");
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 3);
        // Three errors at −0.2 each
        assert!((report.score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn malformed_address_is_an_error() {
        let report =
            email_validator().validate("From: not-an-address\nTo: c@d.com\nSubject: hello\n\nx");
        assert!(!report.is_valid);
        assert!(report.errors[0].contains("Invalid email address in From"));
    }

    #[test]
    fn spam_keywords_are_warnings_not_errors() {
        let report = email_validator().validate(
            "From: a@b.com\nTo: c@d.com\nSubject: offer inside\n\nAct now — limited time!",
        );
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("act now"));
    }

    #[test]
    fn invoice_missing_everything() {
        let fields = InvoiceFields {
            invoice_numbers: vec![],
            amounts: vec![],
            total_amount: 0.0,
            dates_found: vec![],
            vendor: NOT_FOUND.into(),
            bill_to: NOT_FOUND.into(),
            currency: "Unknown".into(),
            line_item_count: 0,
        };
        let report = InvoiceValidator.validate(&fields);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 3);
        // 1 − 3×0.25 errors − 0.1 for the vendor warning
        assert!((report.score - 0.15).abs() < 1e-9);
    }

    #[test]
    fn webhook_requires_type_and_data() {
        let report = WebhookValidator.validate(&serde_json::json!({"id": "x"}));
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn webhook_non_numeric_amount_is_an_error() {
        let payload = serde_json::json!({"type": "charge", "data": {"amount": "12"}});
        let report = WebhookValidator.validate(&payload);
        assert!(!report.is_valid);
        assert!(report.errors[0].contains("should be numeric"));
    }

    #[test]
    fn webhook_text_parse_failure_is_reported() {
        let report = WebhookValidator.validate_text("{nope");
        assert!(!report.is_valid);
        assert!(report.errors[0].starts_with("JSON parse error"));
    }

    #[test]
    fn webhook_well_formed_payload_passes() {
        let payload = serde_json::json!({
            "id": "evt_1",
            "type": "payment",
            "data": {"amount": 1200, "currency": "usd"}
        });
        let report = WebhookValidator.validate(&payload);
        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
    }
}
