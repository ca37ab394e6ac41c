use thiserror::Error;

use crate::extract::Extractor;
use crate::preprocess::{self, PreprocessError};
use crate::recognizer::{LanguageSet, OcrBackend, OcrError};
use crate::types::{IdRecord, MediaType, MAX_IMAGE_BYTES};
use crate::validate;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Unsupported media type {0:?} — only image/jpeg and image/png are accepted")]
    UnsupportedMediaType(String),
    #[error("Payload of {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },
    #[error("Image preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("No text recognized in image")]
    NoTextRecognized,
    #[error("No identity fields could be extracted")]
    NoFieldsExtracted,
}

/// One call processes one image to completion: input checks → normalize →
/// recognize → extract → validate → success criterion. Synchronous, no
/// retries, no shared state between calls; the only blocking external call
/// is the OCR backend itself.
pub struct ExtractionPipeline<R: OcrBackend> {
    recognizer: R,
    languages: LanguageSet,
}

impl<R: OcrBackend> ExtractionPipeline<R> {
    /// Pipeline with the identity-card default of combined Latin +
    /// Devanagari recognition.
    pub fn new(recognizer: R) -> Self {
        Self::with_languages(recognizer, LanguageSet::bilingual())
    }

    pub fn with_languages(recognizer: R, languages: LanguageSet) -> Self {
        Self { recognizer, languages }
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// Extract identity fields from one card image. Fails with a distinct
    /// error kind per stage so callers can render an actionable message;
    /// each stage's failure short-circuits the rest.
    pub fn extract_identity_fields(
        &self,
        data: &[u8],
        media_type: &str,
    ) -> Result<IdRecord, PipelineError> {
        if data.len() > MAX_IMAGE_BYTES {
            return Err(PipelineError::PayloadTooLarge {
                size: data.len(),
                limit: MAX_IMAGE_BYTES,
            });
        }
        if MediaType::from_mime(media_type).is_none() {
            return Err(PipelineError::UnsupportedMediaType(media_type.to_string()));
        }

        let normalized = preprocess::prepare_for_ocr_from_bytes(data)?;
        let text = self.recognizer.recognize(&normalized, &self.languages)?;
        if text.trim().is_empty() {
            return Err(PipelineError::NoTextRecognized);
        }
        tracing::debug!(chars = text.chars().count(), "recognized text");

        let record = validate::validate(Extractor::extract(&text));
        if !record.has_any_field() {
            return Err(PipelineError::NoFieldsExtracted);
        }
        Ok(record)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
