//! doc-triage — document classification and extraction engine.
//!
//! Classifies an incoming document (free text or JSON) as an email,
//! invoice, or webhook event, extracts a normalized set of structured
//! fields, and returns a uniform [`types::ProcessingResult`] envelope
//! with a confidence estimate. Routing, extraction, and assembly are
//! pure synchronous functions of the input; transport, persistence, and
//! binary-to-text conversion live with the caller.

pub mod assemble;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod patterns;
pub mod router;
pub mod types;
pub mod validation;
