//! Token counting for prompt diagnostics.
//!
//! Counts are informational only: the completion service reports the billed
//! usage, this is just an estimate logged before the call is made.

use thiserror::Error;

#[derive(Error, Debug)]
#[error("Tokenizer initialization failed: {0}")]
pub struct TokenizerError(String);

/// Pluggable token counter.
pub trait TokenCounter: Send + Sync {
    fn count_tokens(&self, text: &str) -> usize;
    fn name(&self) -> &str;
}

/// `cl100k_base` byte-pair encoding, as used by the GPT-3.5/GPT-4 families.
pub struct TiktokenCounter {
    bpe: tiktoken_rs::CoreBPE,
}

impl TiktokenCounter {
    pub fn cl100k() -> Result<Self, TokenizerError> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| TokenizerError(e.to_string()))?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for TiktokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }

    fn name(&self) -> &str {
        "cl100k_base"
    }
}

/// bytes/3 estimate. No vocabulary needed, used by tests.
pub struct BytesEstimateCounter;

impl TokenCounter for BytesEstimateCounter {
    fn count_tokens(&self, text: &str) -> usize {
        (text.len() + 2) / 3
    }

    fn name(&self) -> &str {
        "bytes-estimate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cl100k_counts_simple_text() {
        let counter = TiktokenCounter::cl100k().unwrap();
        assert_eq!(counter.count_tokens(""), 0);
        assert_eq!(counter.count_tokens("hello world"), 2);
        assert_eq!(counter.name(), "cl100k_base");
    }

    #[test]
    fn cl100k_grows_with_input() {
        let counter = TiktokenCounter::cl100k().unwrap();
        let short = counter.count_tokens("Aspirin 75mg once daily");
        let long = counter.count_tokens(&"Aspirin 75mg once daily. ".repeat(20));
        assert!(short > 0);
        assert!(long > short * 10);
    }

    #[test]
    fn bytes_estimate_rounds_up() {
        assert_eq!(BytesEstimateCounter.count_tokens(""), 0);
        assert_eq!(BytesEstimateCounter.count_tokens("a"), 1);
        assert_eq!(BytesEstimateCounter.count_tokens("abcd"), 2);
        assert_eq!(BytesEstimateCounter.count_tokens("abcdef"), 2);
    }
}
