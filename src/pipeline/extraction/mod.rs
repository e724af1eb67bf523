pub mod types;
pub mod format;
pub mod pdf;
pub mod document;

pub use types::*;
pub use format::*;
pub use pdf::*;
pub use document::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Unsupported format for extraction: {0}")]
    UnsupportedFormat(String),

    #[error("PDF is encrypted and no password was supplied")]
    Encrypted,

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),
}
