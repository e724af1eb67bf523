pub mod api;
pub mod config;
pub mod pipeline;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{ApiContext, ServerError};
use crate::config::AppConfig;
use crate::pipeline::extraction::PdfTextExtractor;
use crate::pipeline::summarizing::{OpenAiClient, Summarizer};
use crate::pipeline::tokenizer::TiktokenCounter;

/// Build the services from configuration. Everything the request path needs
/// is constructed here and injected; nothing is global.
pub fn build_context(config: &AppConfig) -> Result<ApiContext, ServerError> {
    let client = OpenAiClient::new(
        &config.api_base_url,
        config.api_key.clone(),
        config.request_timeout_secs,
    )
    .map_err(|e| ServerError::Client(e.to_string()))?;

    if config.api_key.is_none() {
        tracing::warn!(
            "{} is not set; summary requests will fail until it is configured",
            config::API_KEY_ENV
        );
    }

    let summarizer = Summarizer::new(
        Box::new(PdfTextExtractor),
        Box::new(client),
        Arc::new(TiktokenCounter::cl100k()?),
    );
    Ok(ApiContext::new(summarizer, config))
}

/// Process entry: load configuration, initialize logging, serve until Ctrl-C.
pub fn run() -> Result<(), ServerError> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    // The blocking HTTP client is built outside the async runtime.
    let ctx = build_context(&config)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(api::serve(&config, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_builds_without_api_key() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        let ctx = build_context(&config).unwrap();
        assert!(ctx.is_known_model("gpt-4-turbo-2024-04-09"));
        assert!(!ctx.is_known_model("gpt-4"));
    }
}
