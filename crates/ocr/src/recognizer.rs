use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Tesseract not available — build with `tesseract` feature")]
    NotAvailable,
}

/// A script the OCR engine can be asked to recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    English,
    Devanagari,
}

impl Script {
    pub fn tesseract_code(self) -> &'static str {
        match self {
            Script::English => "eng",
            Script::Devanagari => "hin",
        }
    }
}

/// Scripts to recognize in a single engine invocation. Card layouts
/// interleave Latin and Devanagari line-by-line, so the engine is invoked
/// once with a combined language string, never once per script: relative
/// line order in the output must survive for the downstream patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet(Vec<Script>);

impl LanguageSet {
    pub fn new(scripts: Vec<Script>) -> Self {
        Self(scripts)
    }

    /// The default for identity cards: Latin plus Devanagari.
    pub fn bilingual() -> Self {
        Self(vec![Script::English, Script::Devanagari])
    }

    /// Combined-language string in tesseract syntax, e.g. `eng+hin`.
    pub fn tesseract_spec(&self) -> String {
        self.0
            .iter()
            .map(|s| s.tesseract_code())
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Abstraction over an OCR backend.
/// Implementations accept raw PNG/JPEG image bytes plus a language request
/// and return the recognized text. No text found is `Ok` with an empty
/// string, a recoverable outcome the caller classifies, not an error.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8], languages: &LanguageSet) -> Result<String, OcrError>;

    /// Whether the underlying engine can be reached at all. Used by hosts
    /// for liveness reporting.
    fn health_check(&self) -> Result<(), OcrError> {
        Ok(())
    }
}

// ── Mock backend (always available, used for tests) ───────────────────────────

/// Returns a pre-set string — useful for unit testing the extraction
/// pipeline without requiring Tesseract to be installed.
pub struct MockRecognizer {
    pub text: String,
}

impl MockRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl OcrBackend for MockRecognizer {
    fn recognize(&self, _image_bytes: &[u8], _languages: &LanguageSet) -> Result<String, OcrError> {
        Ok(self.text.clone())
    }
}

// ── Tesseract backend (optional, gated behind `tesseract` feature) ─────────────

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{LanguageSet, OcrBackend, OcrError};
    use leptess::{LepTess, Variable};

    pub struct TesseractRecognizer {
        data_path: Option<String>,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>) -> Self {
            Self { data_path }
        }

        fn init(&self, languages: &LanguageSet) -> Result<LepTess, OcrError> {
            LepTess::new(self.data_path.as_deref(), &languages.tesseract_spec())
                .map_err(|e| OcrError::Engine(e.to_string()))
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8], languages: &LanguageSet) -> Result<String, OcrError> {
            // A fresh engine per call keeps the backend usable from
            // concurrent requests without shared mutable state.
            let mut lt = self.init(languages)?;
            // PSM 3: fully automatic page segmentation. Card layouts are
            // mixed multi-block, not single-line or sparse text.
            lt.set_variable(Variable::TesseditPagesegMode, "3")
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ImageDecode(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }

        fn health_check(&self) -> Result<(), OcrError> {
            self.init(&LanguageSet::bilingual()).map(|_| ())
        }
    }
}
