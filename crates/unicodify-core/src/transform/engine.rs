// Unicodify Transform Engine
// Dispatches a transformation id to its family implementation
//
// Transformations are pure: the engine holds only configuration and the
// static letter tables, so one engine can serve any number of callers.

use unicode_normalization::UnicodeNormalization;

use super::id::TransformationId;
use super::{casing, code_case, font, format, SpaceHandling, TransformError};

/// Configuration for the transform engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformConfig {
    /// Whether fonts with a space entry also substitute U+0020
    pub space: SpaceHandling,
}

#[derive(Debug, Clone, Default)]
pub struct TransformEngine {
    config: TransformConfig,
}

impl TransformEngine {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Transform text with a resolved id. Total over any input string.
    pub fn transform(&self, text: &str, id: TransformationId) -> String {
        match id {
            TransformationId::Casing(casing) => casing::apply(text, casing),
            TransformationId::CodeCasing(casing) => code_case::apply(text, casing),
            TransformationId::Font(font) => font::apply(text, font, self.config.space),
            TransformationId::Format(format) => format::apply(text, format),
        }
    }

    /// Resolve a textual id such as `font:serif-bold`, then transform
    pub fn transform_str(&self, text: &str, id: &str) -> Result<String, TransformError> {
        let id = id.parse::<TransformationId>().inspect_err(|e| {
            log::warn!("Rejected transformation request: {}", e);
        })?;
        Ok(self.transform(text, id))
    }

    /// Transform text taken from a selection, composing it to NFC first so
    /// decomposed letters reach the font tables as single characters
    pub fn transform_selection(&self, text: &str, id: TransformationId) -> String {
        let composed: String = text.nfc().collect();
        self.transform(&composed, id)
    }
}

/// Transform with the default configuration
pub fn transform(text: &str, id: TransformationId) -> String {
    TransformEngine::default().transform(text, id)
}

pub fn transform_str(text: &str, id: &str) -> Result<String, TransformError> {
    TransformEngine::default().transform_str(text, id)
}

pub fn transform_selection(text: &str, id: TransformationId) -> String {
    TransformEngine::default().transform_selection(text, id)
}
