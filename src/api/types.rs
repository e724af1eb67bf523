//! Shared types for the web layer.

use std::sync::Arc;

use serde::Serialize;

use crate::config::AppConfig;
use crate::pipeline::summarizing::{ModelSummary, Summarizer, SummaryReport, SummaryWarning, TokenUsage};

/// Shared context for all routes. Immutable after startup.
#[derive(Clone)]
pub struct ApiContext {
    pub summarizer: Arc<Summarizer>,
    pub models: Arc<Vec<String>>,
}

impl ApiContext {
    pub fn new(summarizer: Summarizer, config: &AppConfig) -> Self {
        Self {
            summarizer: Arc::new(summarizer),
            models: Arc::new(config.models.clone()),
        }
    }

    pub fn is_known_model(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }
}

/// Body returned by `POST /api/summarize`.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Text shown in the output box.
    pub report: String,
    pub elapsed_secs: f64,
    pub usage: TokenUsage,
    pub summary: ModelSummary,
    pub warnings: Vec<SummaryWarning>,
}

impl From<SummaryReport> for SummaryResponse {
    fn from(report: SummaryReport) -> Self {
        Self {
            report: report.render(),
            elapsed_secs: report.elapsed.as_secs_f64(),
            usage: report.usage,
            summary: report.summary,
            warnings: report.warnings,
        }
    }
}
