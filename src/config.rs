//! Configuration types.

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum accepted content size in bytes. Larger inputs produce a
    /// failure envelope instead of being extracted.
    pub max_content_bytes: usize,
    /// How many characters of raw content to keep as a preview when a
    /// webhook payload fails to parse.
    pub invalid_preview_chars: usize,
    /// Keywords counted toward a positive sentiment score.
    pub positive_keywords: Vec<String>,
    /// Keywords counted toward a negative sentiment score.
    pub negative_keywords: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_content_bytes: 10 * 1024 * 1024, // 10MB
            invalid_preview_chars: 100,
            positive_keywords: [
                "thank you",
                "thanks",
                "appreciate",
                "good",
                "great",
                "excellent",
                "happy",
                "pleased",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            negative_keywords: [
                "bad",
                "terrible",
                "awful",
                "angry",
                "frustrated",
                "disappointed",
                "unhappy",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}
