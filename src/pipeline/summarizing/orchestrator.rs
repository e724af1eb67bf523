use std::sync::Arc;
use std::time::Instant;

use super::parser::parse_summary_response;
use super::prompt::{build_summary_prompt, SUMMARY_SYSTEM_PROMPT};
use super::types::{CompletionClient, SummaryReport};
use super::SummarizingError;
use crate::pipeline::extraction::{extract_document, PdfExtractor, UploadedFile};
use crate::pipeline::tokenizer::TokenCounter;

/// Orchestrates one summary request:
/// extract → prompt → completion → validate → report
pub struct Summarizer {
    extractor: Box<dyn PdfExtractor + Send + Sync>,
    client: Box<dyn CompletionClient + Send + Sync>,
    tokenizer: Arc<dyn TokenCounter>,
}

impl Summarizer {
    pub fn new(
        extractor: Box<dyn PdfExtractor + Send + Sync>,
        client: Box<dyn CompletionClient + Send + Sync>,
        tokenizer: Arc<dyn TokenCounter>,
    ) -> Self {
        Self {
            extractor,
            client,
            tokenizer,
        }
    }

    /// Summarize the uploaded files with `model`.
    ///
    /// Files are extracted strictly in order and any failure aborts the whole
    /// request. An empty file list still makes one completion call. Only the
    /// completion call is timed.
    pub fn summarize(
        &self,
        model: &str,
        files: &[UploadedFile],
    ) -> Result<SummaryReport, SummarizingError> {
        let mut documents = Vec::with_capacity(files.len());
        for file in files {
            let document = extract_document(self.extractor.as_ref(), file).map_err(|source| {
                SummarizingError::Extraction {
                    filename: file.name.clone(),
                    source,
                }
            })?;
            tracing::info!(
                filename = %document.filename,
                pages = document.body.len(),
                "Extracted document"
            );
            documents.push(document);
        }

        let prompt = build_summary_prompt(&documents)?;
        tracing::debug!(
            tokenizer = self.tokenizer.name(),
            estimated_prompt_tokens = self.tokenizer.count_tokens(&prompt)
                + self.tokenizer.count_tokens(SUMMARY_SYSTEM_PROMPT),
            "Prompt built"
        );

        let start = Instant::now();
        let completion = self.client.complete(model, SUMMARY_SYSTEM_PROMPT, &prompt)?;
        let elapsed = start.elapsed();

        tracing::info!(
            model,
            elapsed_ms = elapsed.as_millis() as u64,
            total_tokens = completion.usage.total_tokens,
            prompt_tokens = completion.usage.prompt_tokens,
            completion_tokens = completion.usage.completion_tokens,
            "Completion received"
        );

        let known: Vec<&str> = documents.iter().map(|d| d.filename.as_str()).collect();
        let (summary, warnings) = parse_summary_response(&completion.text, &known)?;
        if !warnings.is_empty() {
            tracing::warn!(count = warnings.len(), "Summary validation warnings");
        }

        Ok(SummaryReport {
            elapsed,
            raw_model_text: completion.text,
            usage: completion.usage,
            summary,
            warnings,
        })
    }
}
