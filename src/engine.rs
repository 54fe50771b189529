//! Document engine — the sole entry point for callers.
//!
//! Flow: route (declared kind or auto-detection) → kind-specific
//! extractor → envelope assembly. Each call is a pure, synchronous
//! computation over its inputs; the pattern library is compiled once at
//! construction and shared read-only, so invocations may run concurrently
//! without coordination.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::assemble::assemble;
use crate::config::EngineConfig;
use crate::error::ExtractError;
use crate::extract::{EmailExtractor, InvoiceExtractor, WebhookExtractor};
use crate::patterns::PatternLibrary;
use crate::router::DocumentRouter;
use crate::types::{Document, DocumentKind, ExtractedFields, ProcessingResult};

/// Classification-and-extraction engine.
#[derive(Debug)]
pub struct DocumentEngine {
    config: EngineConfig,
    router: DocumentRouter,
    email: EmailExtractor,
    invoice: InvoiceExtractor,
    webhook: WebhookExtractor,
}

impl DocumentEngine {
    /// Build an engine, compiling the pattern library once.
    pub fn new(config: EngineConfig) -> Self {
        let patterns = Arc::new(PatternLibrary::new());
        Self {
            router: DocumentRouter::new(Arc::clone(&patterns)),
            email: EmailExtractor::new(Arc::clone(&patterns), &config),
            invoice: InvoiceExtractor::new(patterns),
            webhook: WebhookExtractor::new(&config),
            config,
        }
    }

    /// Process raw content into the uniform envelope.
    ///
    /// Deterministic given identical inputs, up to the envelope timestamp.
    /// `metadata` is side-band context from collaborators (e.g. a
    /// PDF-to-text layer); it is logged but never inspected for routing.
    pub fn process(
        &self,
        content: &str,
        declared_kind: Option<DocumentKind>,
        metadata: Option<&serde_json::Value>,
    ) -> ProcessingResult {
        let trace_id = Uuid::new_v4();
        info!(
            %trace_id,
            declared = ?declared_kind,
            bytes = content.len(),
            "Processing document"
        );
        if let Some(meta) = metadata {
            debug!(%trace_id, %meta, "Caller-supplied metadata");
        }

        let kind = self.router.route(content, declared_kind);
        debug!(%trace_id, kind = kind.label(), "Document routed");

        let outcome = if content.len() > self.config.max_content_bytes {
            Err(ExtractError::InputTooLarge {
                size: content.len(),
                max: self.config.max_content_bytes,
            })
        } else {
            // Tagged-variant dispatch: adding a kind means adding an arm here,
            // enforced at compile time
            Ok(match kind {
                DocumentKind::Email => ExtractedFields::Email(self.email.extract(content)),
                DocumentKind::Invoice => ExtractedFields::Invoice(self.invoice.extract(content)),
                DocumentKind::Webhook => ExtractedFields::Webhook(self.webhook.extract(content)),
            })
        };

        let result = assemble(kind, outcome);
        info!(
            %trace_id,
            status = ?result.status,
            confidence = result.confidence,
            "Processing complete"
        );
        result
    }

    /// Convenience wrapper over [`Self::process`] for a submitted document.
    pub fn process_document(&self, document: &Document) -> ProcessingResult {
        self.process(
            &document.content,
            document.declared_kind,
            document.metadata.as_ref(),
        )
    }
}

impl Default for DocumentEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
