use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SummarizingError;

/// Token counters reported by the completion service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub total_tokens: u32,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    /// Usage lines exactly as shown to the physician.
    pub fn render(&self) -> String {
        format!(
            "Total tokens: {}\nPrompt token: {}\nCompletion token: {}",
            self.total_tokens, self.prompt_tokens, self.completion_tokens
        )
    }
}

/// Raw completion text plus usage. The text is not trusted until parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    pub text: String,
    pub usage: TokenUsage,
}

/// Chat-completion client abstraction (allows mocking)
pub trait CompletionClient {
    fn complete(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<CompletionResult, SummarizingError>;
}

/// Document class the model assigns to each summary item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum DocumentHeading {
    LabReport,
    Prescription,
    Diagnosis,
    /// Any other document type; the body is then "Summary not available".
    Other(String),
}

impl DocumentHeading {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "lab report" => Self::LabReport,
            "prescription" => Self::Prescription,
            "diagnosis" => Self::Diagnosis,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::LabReport => "Lab Report",
            Self::Prescription => "Prescription",
            Self::Diagnosis => "Diagnosis",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for DocumentHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DocumentHeading> for String {
    fn from(heading: DocumentHeading) -> Self {
        heading.as_str().to_string()
    }
}

/// One validated item of the model's `summary` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub filename: String,
    pub heading: DocumentHeading,
    pub subheading: Option<String>,
    pub date: Option<NaiveDate>,
    pub page_number: Option<usize>,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub entries: Vec<SummaryEntry>,
}

/// Non-fatal problems found while validating the model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryWarning {
    UnparseableDate { index: usize, value: String },
    InvalidPageNumber { index: usize, value: String },
    UnknownFilename { index: usize, filename: String },
}

impl fmt::Display for SummaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparseableDate { index, value } => {
                write!(f, "item {index}: date {value:?} is not dd/mm/yyyy")
            }
            Self::InvalidPageNumber { index, value } => {
                write!(f, "item {index}: page number {value} is not a positive integer")
            }
            Self::UnknownFilename { index, filename } => {
                write!(f, "item {index}: file {filename:?} was not uploaded")
            }
        }
    }
}

/// Everything produced by one summary request.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub elapsed: Duration,
    pub raw_model_text: String,
    pub usage: TokenUsage,
    pub summary: ModelSummary,
    pub warnings: Vec<SummaryWarning>,
}

impl SummaryReport {
    pub fn elapsed_line(&self) -> String {
        format!("Time Taken: {:.3}", self.elapsed.as_secs_f64())
    }

    /// Elapsed time, raw model output, token usage, then any warnings.
    pub fn render(&self) -> String {
        let mut out = format!(
            "{}\n{}\n{}",
            self.elapsed_line(),
            self.raw_model_text,
            self.usage.render()
        );
        if !self.warnings.is_empty() {
            out.push_str("\nWarnings:");
            for warning in &self.warnings {
                out.push_str(&format!("\n- {warning}"));
            }
        }
        out
    }
}
