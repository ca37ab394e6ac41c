pub mod extract;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod types;
pub mod validate;

pub use extract::Extractor;
pub use pipeline::{ExtractionPipeline, PipelineError};
pub use preprocess::{prepare_for_ocr_from_bytes, PreprocessError};
pub use recognizer::{LanguageSet, MockRecognizer, OcrBackend, OcrError, Script};
pub use types::{Field, Gender, IdRecord, MediaType, MAX_IMAGE_BYTES};
pub use validate::validate;

#[cfg(feature = "tesseract")]
pub use recognizer::tesseract_backend::TesseractRecognizer;
