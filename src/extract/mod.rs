//! Kind-specific extractors.
//!
//! Each extractor is a pure function of its input text: no I/O, no shared
//! mutable state, every irregularity resolved into a sentinel or a
//! structured invalid record rather than an error.

pub mod email;
pub mod invoice;
pub mod webhook;

pub use email::EmailExtractor;
pub use invoice::InvoiceExtractor;
pub use webhook::WebhookExtractor;
