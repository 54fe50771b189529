//! Result assembly — wraps extractor output into the uniform envelope.
//!
//! Confidence is a completeness estimate, not a probability: a weighted
//! ratio of fields found vs. fields expected for the kind, where sentinel
//! and default values count as not found. The timestamp is stamped here,
//! at the point of processing completion.

use chrono::Utc;
use tracing::warn;

use crate::error::ExtractError;
use crate::types::{
    DocumentKind, EmailFields, ExtractedFields, InvoiceFields, NOT_FOUND, ProcessingResult,
    ProcessingStatus, UNKNOWN, WebhookFields,
};

/// Assemble the uniform envelope for a routed kind.
///
/// A structured invalid-webhook record still assembles as `Success` — the
/// payload's invalidity is the business answer. Only extractor-level
/// faults become a failure envelope.
pub fn assemble(
    kind: DocumentKind,
    outcome: Result<ExtractedFields, ExtractError>,
) -> ProcessingResult {
    match outcome {
        Ok(fields) => ProcessingResult {
            status: ProcessingStatus::Success,
            agent_used: kind,
            confidence: confidence(&fields),
            processed_data: Some(fields),
            timestamp: Utc::now(),
            error: None,
        },
        Err(err) => {
            warn!(kind = kind.label(), error = %err, "Extraction failed");
            ProcessingResult {
                status: ProcessingStatus::Failure,
                agent_used: kind,
                confidence: 0.0,
                processed_data: None,
                timestamp: Utc::now(),
                error: Some(err.to_string()),
            }
        }
    }
}

/// Weighted found/expected ratio for the kind, clamped to `[0, 1]`.
pub fn confidence(fields: &ExtractedFields) -> f64 {
    match fields {
        ExtractedFields::Email(f) => email_confidence(f),
        ExtractedFields::Invoice(f) => invoice_confidence(f),
        ExtractedFields::Webhook(f) => webhook_confidence(f),
    }
}

fn email_confidence(f: &EmailFields) -> f64 {
    weighted_ratio(&[
        (2.0, f.from != NOT_FOUND),
        (2.0, f.to != NOT_FOUND),
        (2.0, f.subject != NOT_FOUND),
        (1.0, !f.body.is_empty()),
        (1.0, !f.entities.emails.is_empty()),
        (1.0, !f.entities.phones.is_empty()),
        (1.0, !f.entities.dates.is_empty()),
    ])
}

fn invoice_confidence(f: &InvoiceFields) -> f64 {
    weighted_ratio(&[
        (2.0, !f.invoice_numbers.is_empty()),
        (2.0, !f.amounts.is_empty()),
        (1.0, f.total_amount > 0.0),
        (1.0, !f.dates_found.is_empty()),
        (1.0, f.vendor != NOT_FOUND),
        (1.0, f.bill_to != NOT_FOUND),
        (1.0, f.currency != UNKNOWN),
        (1.0, f.line_item_count > 0),
    ])
}

fn webhook_confidence(f: &WebhookFields) -> f64 {
    // An invalid payload is a definitive answer with zero field coverage
    if !f.is_valid {
        return 0.0;
    }
    weighted_ratio(&[
        (2.0, f.event_id != NOT_FOUND),
        (2.0, f.event_type != UNKNOWN),
        (1.0, f.source != UNKNOWN),
        (1.0, f.timestamp != NOT_FOUND),
        (1.0, f.amount.is_some()),
        (1.0, f.currency != UNKNOWN),
        (1.0, f.customer_email != NOT_FOUND),
        (1.0, f.customer_name != NOT_FOUND),
    ])
}

fn weighted_ratio(checks: &[(f64, bool)]) -> f64 {
    let expected: f64 = checks.iter().map(|(weight, _)| weight).sum();
    if expected == 0.0 {
        return 0.0;
    }
    let found: f64 = checks
        .iter()
        .filter(|(_, present)| *present)
        .map(|(weight, _)| weight)
        .sum();
    (found / expected).clamp(0.0, 1.0)
}
