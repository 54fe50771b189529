//! Shared pattern library — every regex the engine uses, compiled once.
//!
//! Built a single time at engine construction and shared read-only by the
//! router and all extractors. Patterns are immutable for the process
//! lifetime, so concurrent `process` calls need no coordination.

use regex::Regex;

/// Compiled matchers shared by the router and extractors.
#[derive(Debug)]
pub struct PatternLibrary {
    /// `From:` … `To:` … `Subject:` appearing in sequence — the email
    /// routing signal.
    pub header_sequence: Regex,
    /// `From:` header line, value captured (may be empty).
    pub from_header: Regex,
    /// `To:` header line, value captured.
    pub to_header: Regex,
    /// `Subject:` header line, value captured.
    pub subject_header: Regex,
    /// `Bill To:` label line, same-line value captured (may be empty).
    pub bill_to_label: Regex,
    /// Email addresses.
    pub email_address: Regex,
    /// Phone-like digit groups (`555-123-4567`, `555.123.4567`, bare runs).
    pub phone: Regex,
    /// Numeric dates (`3/5/2024`, `03-05-24`).
    pub numeric_date: Regex,
    /// Long-form dates (`March 5, 2024`).
    pub long_date: Regex,
    /// Relative date phrases (`tomorrow at 10am`, `today`).
    pub relative_date: Regex,
    /// Invoice numbers (`INV-2024-0157`).
    pub invoice_number: Regex,
    /// Currency-prefixed amounts, numeric part captured.
    pub amount: Regex,
}

impl PatternLibrary {
    /// Compile the full library. Patterns are literals, so compilation
    /// cannot fail at runtime.
    pub fn new() -> Self {
        Self {
            header_sequence: Regex::new(r"(?is)\bfrom:.*?\bto:.*?\bsubject:").unwrap(),
            from_header: Regex::new(r"(?im)^from:[ \t]*(.*)$").unwrap(),
            to_header: Regex::new(r"(?im)^to:[ \t]*(.*)$").unwrap(),
            subject_header: Regex::new(r"(?im)^subject:[ \t]*(.*)$").unwrap(),
            bill_to_label: Regex::new(r"(?im)^bill to:[ \t]*(.*)$").unwrap(),
            email_address: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
                .unwrap(),
            phone: Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").unwrap(),
            numeric_date: Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").unwrap(),
            long_date: Regex::new(
                r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december)\s+\d{1,2},\s+\d{4}\b",
            )
            .unwrap(),
            relative_date: Regex::new(
                r"(?i)\b(?:today|tomorrow|tonight|yesterday)(?:\s+at\s+\d{1,2}(?::\d{2})?\s*(?:am|pm)?)?\b",
            )
            .unwrap(),
            invoice_number: Regex::new(r"\bINV-\d{4}-\d{3,4}\b").unwrap(),
            amount: Regex::new(r"\$\s?([0-9][0-9,]*(?:\.[0-9]+)?)").unwrap(),
        }
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_sequence_requires_order() {
        let patterns = PatternLibrary::new();
        assert!(patterns
            .header_sequence
            .is_match("From: a@b.com\nTo: c@d.com\nSubject: hi"));
        // Subject before From — out of sequence
        assert!(!patterns
            .header_sequence
            .is_match("Subject: hi\nTo: c@d.com\nFrom: a@b.com"));
    }

    #[test]
    fn header_sequence_matches_inside_json() {
        let patterns = PatternLibrary::new();
        assert!(patterns
            .header_sequence
            .is_match(r#"{"raw": "From: a To: b Subject: c"}"#));
    }

    #[test]
    fn amount_captures_with_thousands_separators() {
        let patterns = PatternLibrary::new();
        let caps = patterns.amount.captures("Total: $4,860.00 due").unwrap();
        assert_eq!(&caps[1], "4,860.00");
    }

    #[test]
    fn invoice_number_requires_full_year() {
        let patterns = PatternLibrary::new();
        assert!(patterns.invoice_number.is_match("INV-2024-0157"));
        assert!(patterns.invoice_number.is_match("INV-2023-001"));
        assert!(!patterns.invoice_number.is_match("INV-24-0157"));
    }

    #[test]
    fn relative_date_captures_time_suffix() {
        let patterns = PatternLibrary::new();
        let m = patterns
            .relative_date
            .find("Let's meet tomorrow at 10am if that works")
            .unwrap();
        assert_eq!(m.as_str(), "tomorrow at 10am");
    }

    #[test]
    fn long_date_matches_month_day_year() {
        let patterns = PatternLibrary::new();
        let m = patterns.long_date.find("Invoice Date: March 5, 2024").unwrap();
        assert_eq!(m.as_str(), "March 5, 2024");
    }

    #[test]
    fn phone_matches_common_layouts() {
        let patterns = PatternLibrary::new();
        assert!(patterns.phone.is_match("call 555-123-4567 today"));
        assert!(patterns.phone.is_match("555.123.4567"));
        assert!(!patterns.phone.is_match("12-34"));
    }

    #[test]
    fn email_address_basic() {
        let patterns = PatternLibrary::new();
        let m = patterns
            .email_address
            .find("reach me at alice.smith+dev@example.co.uk thanks")
            .unwrap();
        assert_eq!(m.as_str(), "alice.smith+dev@example.co.uk");
    }
}
