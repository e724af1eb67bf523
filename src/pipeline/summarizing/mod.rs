pub mod types;
pub mod prompt;
pub mod parser;
pub mod openai;
pub mod orchestrator;

pub use types::*;
pub use prompt::*;
pub use parser::*;
pub use openai::*;
pub use orchestrator::*;

use thiserror::Error;

use crate::pipeline::extraction::ExtractionError;

#[derive(Error, Debug)]
pub enum SummarizingError {
    #[error("Extraction failed for {filename}: {source}")]
    Extraction {
        filename: String,
        #[source]
        source: ExtractionError,
    },

    #[error("Completion API key is not configured (set OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("Completion service unreachable at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Completion service returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("Model output does not match the summary schema: {0}")]
    InvalidSummary(String),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
