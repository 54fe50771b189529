//! Shared types for the classification-and-extraction engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel for a field whose value could not be located in the input.
pub const NOT_FOUND: &str = "Not found";

/// Sentinel for a field whose value could not be categorized.
pub const UNKNOWN: &str = "Unknown";

// ── Document kind ───────────────────────────────────────────────────

/// The closed set of document kinds the engine classifies into.
///
/// Extension is a new variant plus an extractor arm in the engine's
/// dispatch match — checked at compile time, never a runtime registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Email,
    Invoice,
    Webhook,
}

impl DocumentKind {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Invoice => "invoice",
            Self::Webhook => "webhook",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "invoice" => Ok(Self::Invoice),
            "webhook" => Ok(Self::Webhook),
            other => Err(format!("unknown document kind: {other}")),
        }
    }
}

// ── Document ────────────────────────────────────────────────────────

/// An incoming document as submitted by a caller. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Raw content — free text or a JSON payload.
    pub content: String,
    /// Caller-declared kind; skips auto-detection when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_kind: Option<DocumentKind>,
    /// Optional side-band metadata (e.g. page count from a PDF-to-text
    /// collaborator). Never inspected for routing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

// ── Email fields ────────────────────────────────────────────────────

/// Sentiment label derived from keyword counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

/// Keyword-count sentiment. The scores are raw occurrence counts,
/// not a weighted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub positive_score: u32,
    pub negative_score: u32,
}

/// Entities collected from an email body by independent regex passes.
/// Each list may be empty; no deduplication beyond pattern distinctness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub dates: Vec<String>,
}

/// Structured fields extracted from an email document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailFields {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub sentiment: Sentiment,
    pub entities: Entities,
}

// ── Invoice fields ──────────────────────────────────────────────────

/// Structured fields extracted from an invoice document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceFields {
    /// `INV-YYYY-NNN` tokens in order of appearance (duplicates kept).
    pub invoice_numbers: Vec<String>,
    /// Currency-prefixed amounts, strictly positive, commas stripped.
    pub amounts: Vec<f64>,
    /// Largest extracted amount; `0.0` when no amounts were found.
    pub total_amount: f64,
    /// Long-form dates (`Month Day, Year`).
    pub dates_found: Vec<String>,
    pub vendor: String,
    pub bill_to: String,
    pub currency: String,
    /// Count of currency-bearing lines excluding total/subtotal lines.
    pub line_item_count: usize,
}

// ── Webhook fields ──────────────────────────────────────────────────

/// Structured fields extracted from a webhook payload.
///
/// Payload invalidity is a business answer, not a system failure:
/// unparseable JSON yields `is_valid = false` with the parse note in
/// `error`, inside a *successful* envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookFields {
    pub is_valid: bool,
    pub event_id: String,
    pub event_type: String,
    pub source: String,
    pub timestamp: String,
    /// Nested `data.status`, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Nested `data.amount`, converted from minor units (divided by 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub currency: String,
    pub customer_email: String,
    pub customer_name: String,
    /// Key set of `data.metadata`, when present.
    pub metadata_keys: Vec<String>,
    /// Serialized length of the parsed payload, or the raw content
    /// length when parsing failed.
    pub payload_size: usize,
    /// First characters of the raw content, kept only for invalid payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_preview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ── Extracted fields ────────────────────────────────────────────────

/// Kind-tagged extractor output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractedFields {
    Email(EmailFields),
    Invoice(InvoiceFields),
    Webhook(WebhookFields),
}

impl ExtractedFields {
    /// The kind this output belongs to.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Email(_) => DocumentKind::Email,
            Self::Invoice(_) => DocumentKind::Invoice,
            Self::Webhook(_) => DocumentKind::Webhook,
        }
    }
}

// ── Processing result ───────────────────────────────────────────────

/// Outcome status of a `process` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Success,
    Failure,
}

impl ProcessingStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Uniform envelope returned for every `process` call, regardless of kind.
///
/// Invariants: `confidence` is in `[0, 1]`; `status == Failure` exactly
/// when `error` is present and `processed_data` is absent. Never mutated
/// after assembly; owned solely by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub status: ProcessingStatus,
    pub agent_used: DocumentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_data: Option<ExtractedFields>,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
