//! Plain-language explanations of a verdict.
//!
//! The deterministic template restates the status and reasons it is given
//! and nothing else.  `VerificationAssistant` can ask a completion model for
//! friendlier wording, but any failure falls back to the template.

use tracing::{debug, warn};

use tracechain_contracts::{error::TraceResult, verdict::VerificationStatus};
use tracechain_core::traits::CompletionTransport;

use crate::strategy::{completion_text, LlmConfig};

const SYSTEM_PROMPT: &str = "You are a verification assistant. ONLY use the facts provided in \
the input. Do NOT invent facts, do NOT guess, and do NOT provide information that is not \
directly supported by the provided status and reasons.";

/// Explain `status` and `reasons` without adding any fact.
///
/// Paragraphs are separated by blank lines.  A `None` status asks the
/// reader to run verification first.
pub fn explain_deterministic(status: Option<VerificationStatus>, reasons: &[String]) -> String {
    let mut lines: Vec<String> = Vec::new();

    let Some(status) = status else {
        lines.push("Result: Unknown.".to_string());
        lines.push("No verification result is available.".to_string());
        lines.push("Action: Please run verification first.".to_string());
        return lines.join("\n\n");
    };

    lines.push(format!("Result: {status}."));
    lines.push(
        match status {
            VerificationStatus::Verified => {
                "Summary: The certificate passed all checks based on the provided data."
            }
            VerificationStatus::PartiallyVerified => {
                "Summary: The certificate passed some checks but has issues that may require follow-up."
            }
            VerificationStatus::Fake => {
                "Summary: The certificate failed verification checks based on the provided data."
            }
        }
        .to_string(),
    );

    if reasons.is_empty() {
        lines.push("Why: No specific reasons were provided.".to_string());
    } else {
        lines.push("Why:".to_string());
        lines.extend(
            reasons
                .iter()
                .enumerate()
                .map(|(i, reason)| format!("{}. {}", i + 1, reason)),
        );
    }

    lines.push(
        match status {
            VerificationStatus::Verified => {
                "Recommendation: Based on the provided verification data, the certificate can be trusted."
            }
            VerificationStatus::PartiallyVerified => {
                "Recommendation: Treat the certificate with caution. Consider contacting the issuer for clarification or verifying the missing fields."
            }
            VerificationStatus::Fake => {
                "Recommendation: Do not trust this certificate without further independent verification."
            }
        }
        .to_string(),
    );

    lines.push(
        "Note: This explanation is based only on the provided verification status and reasons \
         and does not introduce any additional facts."
            .to_string(),
    );

    lines.join("\n\n")
}

/// One-line acknowledgement of the verdict being explained.
pub fn verdict_summary(status: Option<VerificationStatus>, reasons: &[String]) -> String {
    let status = status.map(|s| s.as_str()).unwrap_or("Unknown");
    let reasons = if reasons.is_empty() {
        "None provided".to_string()
    } else {
        reasons.join(" | ")
    };
    format!("Verification data received. Status: {status}. Reasons: {reasons}.")
}

/// Where an explanation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplanationSource {
    Model,
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub text: String,
    pub source: ExplanationSource,
}

/// Explains verdicts, preferring a completion model when one is configured.
pub struct VerificationAssistant {
    model: Option<(LlmConfig, Box<dyn CompletionTransport>)>,
}

impl VerificationAssistant {
    /// An assistant that only uses the deterministic template.
    pub fn deterministic() -> Self {
        Self { model: None }
    }

    /// An assistant that asks `transport` first.  A `None` config behaves
    /// like `deterministic()`.
    pub fn with_transport(
        config: Option<LlmConfig>,
        transport: Box<dyn CompletionTransport>,
    ) -> Self {
        Self {
            model: config.map(|config| (config, transport)),
        }
    }

    pub fn prompt(status: VerificationStatus, reasons: &[String]) -> String {
        let reasons = if reasons.is_empty() {
            "None".to_string()
        } else {
            reasons.join(" | ")
        };
        format!(
            "{SYSTEM_PROMPT}\n\n\
             Explain the following verification result in plain language for a non-technical user.\n\n\
             Status: {status}\n\
             Reasons: {reasons}\n\n\
             Rules: Only use the information provided (status and reasons). Do not invent or \
             assume facts beyond these inputs. Keep the explanation short and clear."
        )
    }

    /// Explain a verdict.  Never fails.
    pub fn explain(&self, status: Option<VerificationStatus>, reasons: &[String]) -> Explanation {
        if let (Some(status), Some((config, transport))) = (status, &self.model) {
            match Self::ask_model(config, transport.as_ref(), status, reasons) {
                Ok(text) => {
                    debug!(model = %config.model, "verdict explained by model");
                    return Explanation {
                        text,
                        source: ExplanationSource::Model,
                    };
                }
                Err(e) => {
                    warn!(error = %e, "model explanation failed; using template");
                }
            }
        }

        Explanation {
            text: explain_deterministic(status, reasons),
            source: ExplanationSource::Template,
        }
    }

    fn ask_model(
        config: &LlmConfig,
        transport: &dyn CompletionTransport,
        status: VerificationStatus,
        reasons: &[String],
    ) -> TraceResult<String> {
        let body = transport.complete(&config.request(Self::prompt(status, reasons)))?;
        Ok(completion_text(&body))
    }
}

impl Default for VerificationAssistant {
    fn default() -> Self {
        Self::deterministic()
    }
}

#[cfg(test)]
mod tests {
    use tracechain_contracts::{completion::CompletionRequest, error::TraceError};

    use super::*;

    struct EchoTransport;

    impl CompletionTransport for EchoTransport {
        fn complete(&self, request: &CompletionRequest) -> TraceResult<String> {
            Ok(serde_json::json!({ "output_text": format!("model saw {} chars", request.prompt.len()) })
                .to_string())
        }
    }

    struct DownTransport;

    impl CompletionTransport for DownTransport {
        fn complete(&self, _request: &CompletionRequest) -> TraceResult<String> {
            Err(TraceError::TransportUnavailable {
                reason: "503 Service Unavailable".to_string(),
            })
        }
    }

    fn config() -> Option<LlmConfig> {
        LlmConfig::from_lookup(|key| Some(format!("value-for-{key}")))
    }

    fn reasons(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn template_for_partial_verdict() {
        let text = explain_deterministic(
            Some(VerificationStatus::PartiallyVerified),
            &reasons(&["Product ID missing", "Issue date not registered"]),
        );
        let paragraphs: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(paragraphs[0], "Result: Partially Verified.");
        assert!(paragraphs[1].starts_with("Summary: The certificate passed some checks"));
        assert_eq!(paragraphs[2], "Why:");
        assert_eq!(paragraphs[3], "1. Product ID missing");
        assert_eq!(paragraphs[4], "2. Issue date not registered");
        assert!(paragraphs[5].starts_with("Recommendation: Treat the certificate with caution."));
        assert!(paragraphs[6].starts_with("Note:"));
        assert_eq!(paragraphs.len(), 7);
    }

    #[test]
    fn template_without_reasons() {
        let text = explain_deterministic(Some(VerificationStatus::Fake), &[]);
        assert!(text.contains("Why: No specific reasons were provided."));
        assert!(text.contains("Do not trust this certificate"));
    }

    #[test]
    fn template_without_status() {
        assert_eq!(
            explain_deterministic(None, &reasons(&["ignored"])),
            "Result: Unknown.\n\nNo verification result is available.\n\nAction: Please run verification first."
        );
    }

    #[test]
    fn summary_line() {
        assert_eq!(
            verdict_summary(Some(VerificationStatus::Verified), &reasons(&["All checks passed"])),
            "Verification data received. Status: Verified. Reasons: All checks passed."
        );
        assert_eq!(
            verdict_summary(None, &[]),
            "Verification data received. Status: Unknown. Reasons: None provided."
        );
    }

    #[test]
    fn assistant_uses_model_when_available() {
        let assistant = VerificationAssistant::with_transport(config(), Box::new(EchoTransport));
        let explanation = assistant.explain(
            Some(VerificationStatus::Verified),
            &reasons(&["All checks passed"]),
        );
        assert_eq!(explanation.source, ExplanationSource::Model);
        assert!(explanation.text.starts_with("model saw "));
    }

    #[test]
    fn assistant_falls_back_to_template() {
        let verdict_reasons = reasons(&["Issuer not found on chain"]);
        let expected = explain_deterministic(Some(VerificationStatus::Fake), &verdict_reasons);

        let down = VerificationAssistant::with_transport(config(), Box::new(DownTransport));
        let explanation = down.explain(Some(VerificationStatus::Fake), &verdict_reasons);
        assert_eq!(explanation.source, ExplanationSource::Template);
        assert_eq!(explanation.text, expected);

        let unconfigured = VerificationAssistant::with_transport(None, Box::new(EchoTransport));
        assert_eq!(
            unconfigured
                .explain(Some(VerificationStatus::Fake), &verdict_reasons)
                .source,
            ExplanationSource::Template
        );
    }

    /// Without a verdict the model is never asked.
    #[test]
    fn assistant_needs_a_status() {
        let assistant = VerificationAssistant::with_transport(config(), Box::new(EchoTransport));
        let explanation = assistant.explain(None, &[]);
        assert_eq!(explanation.source, ExplanationSource::Template);
        assert!(explanation.text.contains("Please run verification first."));
    }

    #[test]
    fn prompt_carries_status_and_reasons_only() {
        let prompt = VerificationAssistant::prompt(
            VerificationStatus::PartiallyVerified,
            &reasons(&["Batch number missing", "Issue date missing"]),
        );
        assert!(prompt.starts_with("You are a verification assistant."));
        assert!(prompt.contains("Status: Partially Verified\nReasons: Batch number missing | Issue date missing"));
    }
}
