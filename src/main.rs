use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use doc_triage::engine::DocumentEngine;
use doc_triage::patterns::PatternLibrary;
use doc_triage::types::{DocumentKind, ExtractedFields};
use doc_triage::validation::{EmailValidator, InvoiceValidator, WebhookValidator};

fn main() -> Result<()> {
    // Initialize tracing (logs go to stderr; stdout carries the result JSON)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut path: Option<String> = None;
    let mut declared_kind: Option<DocumentKind> = None;
    let mut run_validation = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--kind" => {
                let value = args
                    .next()
                    .context("--kind requires a value (email|invoice|webhook)")?;
                declared_kind =
                    Some(value.parse().map_err(|e: String| anyhow::anyhow!(e))?);
            }
            "--validate" => run_validation = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other if path.is_none() && !other.starts_with('-') => {
                path = Some(other.to_string());
            }
            other => bail!("unexpected argument: {other}"),
        }
    }

    let content = match &path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("failed to read {p}"))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    if content.trim().is_empty() {
        bail!("content is empty");
    }

    let engine = DocumentEngine::default();
    let result = engine.process(&content, declared_kind, None);

    if run_validation {
        let report = match result.agent_used {
            DocumentKind::Email => {
                EmailValidator::new(Arc::new(PatternLibrary::new())).validate(&content)
            }
            DocumentKind::Invoice => match &result.processed_data {
                Some(ExtractedFields::Invoice(fields)) => InvoiceValidator.validate(fields),
                _ => bail!("no invoice fields available to validate"),
            },
            DocumentKind::Webhook => WebhookValidator.validate_text(&content),
        };
        eprintln!("validation: {}", serde_json::to_string_pretty(&report)?);
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn print_usage() {
    eprintln!("doc-triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!();
    eprintln!("Usage: doc-triage [FILE] [--kind email|invoice|webhook] [--validate]");
    eprintln!();
    eprintln!("Reads FILE (or stdin) and prints the processing result as JSON.");
    eprintln!("  --kind      skip auto-detection and use the given kind");
    eprintln!("  --validate  also run the structural pre-check and print the report");
}
