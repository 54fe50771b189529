//! Invoice extractor — amounts, totals, numbers, parties.

use std::sync::Arc;

use regex::Regex;

use crate::patterns::PatternLibrary;
use crate::types::{InvoiceFields, NOT_FOUND, UNKNOWN};

/// Extracts financial fields from invoice-like text.
///
/// `total_amount` is the largest extracted amount — the heuristic assumes
/// the grand total is the biggest figure on the page. It misfires when a
/// single line item exceeds the stated total (tax breakdown ordering);
/// kept as-is pending product clarification.
#[derive(Debug)]
pub struct InvoiceExtractor {
    patterns: Arc<PatternLibrary>,
}

impl InvoiceExtractor {
    pub fn new(patterns: Arc<PatternLibrary>) -> Self {
        Self { patterns }
    }

    /// Extract invoice fields from `text`. Never fails: absent fields
    /// become sentinels, empty lists, or zero.
    pub fn extract(&self, text: &str) -> InvoiceFields {
        let amounts: Vec<f64> = self
            .patterns
            .amount
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| m.as_str().replace(',', "").parse::<f64>().ok())
            .filter(|amount| *amount > 0.0)
            .collect();

        let total_amount = amounts.iter().copied().fold(0.0_f64, f64::max);

        let invoice_numbers = self
            .patterns
            .invoice_number
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();

        let dates_found = self
            .patterns
            .long_date
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();

        let vendor = labeled_value(text, &self.patterns.from_header)
            .unwrap_or_else(|| NOT_FOUND.to_string());
        let bill_to = labeled_value(text, &self.patterns.bill_to_label)
            .unwrap_or_else(|| NOT_FOUND.to_string());

        let line_item_count = text
            .lines()
            .filter(|line| line.contains('$') && !is_total_line(line))
            .count();

        let currency = if text.contains('$') {
            "USD".to_string()
        } else {
            UNKNOWN.to_string()
        };

        InvoiceFields {
            invoice_numbers,
            amounts,
            total_amount,
            dates_found,
            vendor,
            bill_to,
            currency,
            line_item_count,
        }
    }
}

/// Total/subtotal rows are excluded from the line-item count.
fn is_total_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("total") || lower.contains("subtotal")
}

/// Value for a labeled line: the remainder of the label line itself, or —
/// when the label stands alone — the first non-empty line after it.
fn labeled_value(text: &str, label: &Regex) -> Option<String> {
    let caps = label.captures(text)?;
    let inline = caps.get(1).map_or("", |m| m.as_str()).trim();
    if !inline.is_empty() {
        return Some(inline.to_string());
    }

    let end = caps.get(0).map_or(0, |m| m.end());
    text[end..]
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}
