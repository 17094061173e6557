//! Claim extraction strategies.
//!
//! - `RegexClaimExtractor`: deterministic, always available.
//! - `LlmClaimExtractor`: asks a completion model through a host-supplied
//!   `CompletionTransport`.  Best effort only.
//! - `FallbackExtractor`: tries a primary strategy and falls back to the
//!   deterministic one on any error.
//!
//! Correctness never depends on the model path.  Missing configuration, a
//! transport failure or an unusable reply all end in the regex result.

use serde_json::Value;
use tracing::{debug, warn};

use tracechain_contracts::{
    claim::ClaimRecord,
    completion::CompletionRequest,
    error::{TraceError, TraceResult},
};
use tracechain_core::traits::{ClaimExtractor, CompletionTransport};

use crate::{extract::extract_claims_from_text, normalize::parse_claim_json};

pub const ENV_ENDPOINT: &str = "TRACECHAIN_LLM_ENDPOINT";
pub const ENV_API_KEY: &str = "TRACECHAIN_LLM_API_KEY";
pub const ENV_MODEL: &str = "TRACECHAIN_LLM_MODEL";

const DEFAULT_MODEL: &str = "gemini-pro";
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 400;

// ── Deterministic ─────────────────────────────────────────────────────────────

/// The regex extractor.  Never returns `Err`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexClaimExtractor;

impl ClaimExtractor for RegexClaimExtractor {
    fn extract(&self, text: &str) -> TraceResult<ClaimRecord> {
        Ok(extract_claims_from_text(text))
    }
}

// ── Model endpoint configuration ──────────────────────────────────────────────

/// Where and how to reach a completion model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub max_output_tokens: u32,
}

impl LlmConfig {
    /// Read the configuration from the process environment.
    ///
    /// Returns `None` unless both `TRACECHAIN_LLM_ENDPOINT` and
    /// `TRACECHAIN_LLM_API_KEY` are set and non-empty.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let endpoint = non_empty(ENV_ENDPOINT)?;
        let api_key = non_empty(ENV_API_KEY)?;
        Some(Self {
            endpoint,
            api_key,
            model: non_empty(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        })
    }

    pub fn request(&self, prompt: String) -> CompletionRequest {
        CompletionRequest {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            prompt,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

/// Pull the generated text out of a completion response body.
///
/// Accepts `{"output": ".."}`, `{"output_text": ".."}`,
/// `{"choices": [{"message": {"content": ".."}}]}` and
/// `{"choices": [{"output_text": ".."}]}`.  Any other JSON is returned
/// re-serialized; a non-JSON body is returned as is.
pub fn completion_text(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    let first_choice = value.get("choices").and_then(|c| c.get(0));
    let text = [
        value.get("output"),
        value.get("output_text"),
        first_choice
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content")),
        first_choice.and_then(|c| c.get("output_text")),
    ]
    .into_iter()
    .flatten()
    .find_map(Value::as_str)
    .map(str::to_string)
    .unwrap_or_else(|| value.to_string());
    text
}

// ── Model-backed ──────────────────────────────────────────────────────────────

/// Asks a completion model to extract the claim record.
pub struct LlmClaimExtractor<T: CompletionTransport> {
    config: Option<LlmConfig>,
    transport: T,
}

impl<T: CompletionTransport> LlmClaimExtractor<T> {
    /// `config` of `None` disables the extractor: every call is an error.
    pub fn new(config: Option<LlmConfig>, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn prompt(text: &str) -> String {
        format!(
            "Extract the certificate data from the text below.\n\
             Return ONLY a JSON object with the keys \"issuer\", \"product_or_document\", \
             \"productId\", \"batchNumber\", \"issueDate\" (strings) and \"claims\" (array of strings).\n\
             Use an empty string or empty array when a value is not present. \
             Do NOT invent or guess values that are not in the text.\n\n\
             Text:\n{text}"
        )
    }
}

impl<T: CompletionTransport> ClaimExtractor for LlmClaimExtractor<T> {
    fn extract(&self, text: &str) -> TraceResult<ClaimRecord> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| TraceError::TransportUnavailable {
                reason: format!("{ENV_ENDPOINT} or {ENV_API_KEY} not configured"),
            })?;

        let body = self.transport.complete(&config.request(Self::prompt(text)))?;
        let reply = completion_text(&body);
        let record = parse_claim_json(strip_code_fence(&reply)).map_err(|e| {
            TraceError::ExtractionFailed {
                reason: format!("model reply is not a claim record: {e}"),
            }
        })?;

        debug!(
            model = %config.model,
            claim_count = record.claims.len(),
            "claims extracted by model"
        );
        Ok(record)
    }
}

/// Models often wrap JSON in a Markdown fence.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

// ── Fail-closed wrapper ───────────────────────────────────────────────────────

/// Runs `primary`; on any error returns the deterministic regex result.
pub struct FallbackExtractor<P: ClaimExtractor> {
    primary: P,
    fallback: RegexClaimExtractor,
}

impl<P: ClaimExtractor> FallbackExtractor<P> {
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            fallback: RegexClaimExtractor,
        }
    }
}

impl<P: ClaimExtractor> ClaimExtractor for FallbackExtractor<P> {
    fn extract(&self, text: &str) -> TraceResult<ClaimRecord> {
        match self.primary.extract(text) {
            Ok(record) => Ok(record),
            Err(e) => {
                warn!(error = %e, "primary claim extractor failed; using regex extraction");
                self.fallback.extract(text)
            }
        }
    }
}
