//! Email extractor — header block, sentiment, entities.

use std::sync::Arc;

use regex::Regex;

use crate::config::EngineConfig;
use crate::patterns::PatternLibrary;
use crate::types::{EmailFields, Entities, NOT_FOUND, Sentiment, SentimentLabel};

/// Extracts structured fields from header-style email text.
#[derive(Debug)]
pub struct EmailExtractor {
    patterns: Arc<PatternLibrary>,
    positive_keywords: Vec<String>,
    negative_keywords: Vec<String>,
}

impl EmailExtractor {
    pub fn new(patterns: Arc<PatternLibrary>, config: &EngineConfig) -> Self {
        Self {
            patterns,
            positive_keywords: config.positive_keywords.clone(),
            negative_keywords: config.negative_keywords.clone(),
        }
    }

    /// Extract email fields from `text`. Never fails: absent headers become
    /// sentinels, entity lists may be empty.
    pub fn extract(&self, text: &str) -> EmailFields {
        let from = header_value(&self.patterns.from_header, text);
        let to = header_value(&self.patterns.to_header, text);
        let subject = header_value(&self.patterns.subject_header, text);
        let body = body_text(text);

        let sentiment = self.analyze_sentiment(&body);
        let entities = self.extract_entities(&body);

        EmailFields {
            from: from.unwrap_or_else(|| NOT_FOUND.to_string()),
            to: to.unwrap_or_else(|| NOT_FOUND.to_string()),
            subject: subject.unwrap_or_else(|| NOT_FOUND.to_string()),
            body,
            sentiment,
            entities,
        }
    }

    /// Keyword-count sentiment over the body. Counts are raw substring
    /// occurrences; the label follows whichever count dominates.
    fn analyze_sentiment(&self, body: &str) -> Sentiment {
        let lower = body.to_lowercase();
        let positive_score = count_occurrences(&lower, &self.positive_keywords);
        let negative_score = count_occurrences(&lower, &self.negative_keywords);

        let label = if positive_score > negative_score {
            SentimentLabel::Positive
        } else if negative_score > positive_score {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        Sentiment {
            label,
            positive_score,
            negative_score,
        }
    }

    /// Independent regex passes over the body. Date collection includes
    /// relative phrases ("tomorrow at 10am") alongside literal dates.
    fn extract_entities(&self, body: &str) -> Entities {
        let emails = collect_matches(&self.patterns.email_address, body);
        let phones = collect_matches(&self.patterns.phone, body);

        let mut dates = collect_matches(&self.patterns.numeric_date, body);
        dates.extend(collect_matches(&self.patterns.long_date, body));
        dates.extend(collect_matches(&self.patterns.relative_date, body));

        Entities {
            emails,
            phones,
            dates,
        }
    }
}

/// First captured header value, trimmed; `None` when the header is absent
/// or empty.
fn header_value(header: &Regex, text: &str) -> Option<String> {
    header
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Everything that isn't a header line, joined back together.
fn body_text(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| {
            let lower = line.trim_start().to_ascii_lowercase();
            !line.trim().is_empty()
                && !lower.starts_with("from:")
                && !lower.starts_with("to:")
                && !lower.starts_with("subject:")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_matches(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn count_occurrences(lower_text: &str, keywords: &[String]) -> u32 {
    keywords
        .iter()
        .map(|kw| lower_text.matches(kw.as_str()).count() as u32)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> EmailExtractor {
        EmailExtractor::new(Arc::new(PatternLibrary::new()), &EngineConfig::default())
    }

    #[test]
    fn extracts_header_block() {
        let fields = extractor().extract(
            "From: alice@example.com\nTo: bob@example.com\nSubject: Meeting Tomorrow\n\nHi Bob,\nSee you then.",
        );
        assert_eq!(fields.from, "alice@example.com");
        assert_eq!(fields.to, "bob@example.com");
        assert_eq!(fields.subject, "Meeting Tomorrow");
        assert_eq!(fields.body, "Hi Bob,\nSee you then.");
    }

    #[test]
    fn missing_headers_become_sentinels() {
        let fields = extractor().extract("just a plain note with no headers");
        assert_eq!(fields.from, NOT_FOUND);
        assert_eq!(fields.to, NOT_FOUND);
        assert_eq!(fields.subject, NOT_FOUND);
        assert_eq!(fields.body, "just a plain note with no headers");
    }

    #[test]
    fn empty_header_value_is_not_found() {
        let fields = extractor().extract("From:\nTo: bob@example.com\nSubject: x\n\nhi");
        assert_eq!(fields.from, NOT_FOUND);
        assert_eq!(fields.to, "bob@example.com");
    }

    #[test]
    fn sentiment_positive_on_gratitude() {
        let fields = extractor().extract("Thank you so much, I really appreciate the help!");
        assert_eq!(fields.sentiment.label, SentimentLabel::Positive);
        assert_eq!(fields.sentiment.positive_score, 2);
        assert_eq!(fields.sentiment.negative_score, 0);
    }

    #[test]
    fn sentiment_negative_on_complaint() {
        let fields = extractor().extract("This is terrible. I am very disappointed and frustrated.");
        assert_eq!(fields.sentiment.label, SentimentLabel::Negative);
        assert_eq!(fields.sentiment.negative_score, 3);
    }

    #[test]
    fn sentiment_neutral_without_keywords() {
        let fields = extractor().extract("Let's meet tomorrow at 10am to review the draft.");
        assert_eq!(fields.sentiment.label, SentimentLabel::Neutral);
        assert_eq!(fields.sentiment.positive_score, 0);
        assert_eq!(fields.sentiment.negative_score, 0);
    }

    #[test]
    fn sentiment_tie_is_neutral() {
        let fields = extractor().extract("The demo was great but the rollout was terrible.");
        assert_eq!(fields.sentiment.label, SentimentLabel::Neutral);
        assert_eq!(fields.sentiment.positive_score, 1);
        assert_eq!(fields.sentiment.negative_score, 1);
    }

    #[test]
    fn entities_collected_from_body_only() {
        let fields = extractor().extract(
            "From: alice@example.com\nTo: bob@example.com\nSubject: contacts\n\nReach carol@example.org or 555-123-4567 by 12/31/2024.",
        );
        // Header addresses are not entities; only the body is scanned
        assert_eq!(fields.entities.emails, vec!["carol@example.org"]);
        assert_eq!(fields.entities.phones, vec!["555-123-4567"]);
        assert_eq!(fields.entities.dates, vec!["12/31/2024"]);
    }

    #[test]
    fn relative_date_phrase_is_an_entity() {
        let fields = extractor().extract(
            "From: a@b.com\nTo: c@d.com\nSubject: Meeting Tomorrow\n\nHi Bob,\nLet's meet tomorrow at 10am to discuss.",
        );
        assert!(fields
            .entities
            .dates
            .iter()
            .any(|d| d == "tomorrow at 10am"));
    }

    #[test]
    fn entity_lists_may_be_empty() {
        let fields = extractor().extract("From: a@b.com\nTo: c@d.com\nSubject: hi\n\nShort note.");
        assert!(fields.entities.emails.is_empty());
        assert!(fields.entities.phones.is_empty());
        assert!(fields.entities.dates.is_empty());
    }
}
