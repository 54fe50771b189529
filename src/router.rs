//! Document router — decides which kind a document is.
//!
//! A declared kind is honored unconditionally. Otherwise auto-detection
//! runs in fixed priority order, first match wins:
//! 1. email — `From:`/`To:`/`Subject:` headers in sequence
//! 2. webhook — content parses as JSON
//! 3. invoice — `Invoice` token, an `INV-` number, or `$` + `Amount`
//! 4. fallback — email
//!
//! The fallback silently absorbs genuinely unrecognized content. That is
//! inherited behavior kept on purpose; callers see it only as a low
//! confidence score.

use std::sync::Arc;

use tracing::debug;

use crate::patterns::PatternLibrary;
use crate::types::DocumentKind;

/// Routes raw content to a document kind. Pure and deterministic:
/// identical inputs always resolve to the same kind, and routing never
/// fails — unrecognized content degrades to the fallback.
#[derive(Debug)]
pub struct DocumentRouter {
    patterns: Arc<PatternLibrary>,
}

impl DocumentRouter {
    pub fn new(patterns: Arc<PatternLibrary>) -> Self {
        Self { patterns }
    }

    /// Decide the kind for `content`.
    pub fn route(&self, content: &str, declared_kind: Option<DocumentKind>) -> DocumentKind {
        if let Some(kind) = declared_kind {
            debug!(kind = kind.label(), "Declared kind honored, skipping detection");
            return kind;
        }

        if self.patterns.header_sequence.is_match(content) {
            return DocumentKind::Email;
        }

        if serde_json::from_str::<serde_json::Value>(content).is_ok() {
            return DocumentKind::Webhook;
        }

        if content.contains("Invoice")
            || self.patterns.invoice_number.is_match(content)
            || (content.contains('$') && content.contains("Amount"))
        {
            return DocumentKind::Invoice;
        }

        debug!("No detector matched, falling back to email");
        DocumentKind::Email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> DocumentRouter {
        DocumentRouter::new(Arc::new(PatternLibrary::new()))
    }

    #[test]
    fn declared_kind_wins_over_content() {
        let r = router();
        // Content looks like JSON, but the caller said invoice
        let kind = r.route(r#"{"id": 1}"#, Some(DocumentKind::Invoice));
        assert_eq!(kind, DocumentKind::Invoice);
    }

    #[test]
    fn detects_email_headers() {
        let r = router();
        let kind = r.route("From: a@b.com\nTo: c@d.com\nSubject: hi\n\nbody", None);
        assert_eq!(kind, DocumentKind::Email);
    }

    #[test]
    fn email_beats_webhook_when_both_match() {
        let r = router();
        // Valid JSON that also carries the header sequence
        let kind = r.route(r#"{"raw": "From: a To: b Subject: c"}"#, None);
        assert_eq!(kind, DocumentKind::Email);
    }

    #[test]
    fn detects_json_as_webhook() {
        let r = router();
        let kind = r.route(r#"{"type": "payment", "data": {}}"#, None);
        assert_eq!(kind, DocumentKind::Webhook);
    }

    #[test]
    fn detects_invoice_by_literal_token() {
        let r = router();
        assert_eq!(r.route("Invoice for services rendered", None), DocumentKind::Invoice);
    }

    #[test]
    fn detects_invoice_by_number_pattern() {
        let r = router();
        assert_eq!(r.route("Ref: INV-2024-0157", None), DocumentKind::Invoice);
    }

    #[test]
    fn detects_invoice_by_currency_and_amount_word() {
        let r = router();
        assert_eq!(r.route("Amount due: $42.00", None), DocumentKind::Invoice);
    }

    #[test]
    fn currency_alone_is_not_an_invoice() {
        let r = router();
        // "$" without the word "Amount" falls through to email
        assert_eq!(r.route("lunch was $12", None), DocumentKind::Email);
    }

    #[test]
    fn unrecognized_content_falls_back_to_email() {
        let r = router();
        assert_eq!(r.route("completely unstructured text", None), DocumentKind::Email);
    }

    #[test]
    fn routing_is_deterministic() {
        let r = router();
        let content = "some ambiguous blob";
        assert_eq!(r.route(content, None), r.route(content, None));
    }
}
