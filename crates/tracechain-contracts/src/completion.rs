//! Requests handed to a host-supplied completion transport.
//!
//! The toolkit never opens a connection itself.  It describes the call it
//! wants in a `CompletionRequest` and a transport owned by the host decides
//! how (and whether) to send it.

use serde::Serialize;
use serde_json::{json, Value};

/// One prompt → completion round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    /// URL the host should POST `body()` to.
    pub endpoint: String,

    /// Sent as a bearer token.  Never logged.
    #[serde(skip_serializing)]
    pub api_key: String,

    pub model: String,

    pub prompt: String,

    pub max_output_tokens: u32,
}

impl CompletionRequest {
    /// The JSON body: `{model, prompt, max_output_tokens}`.
    pub fn body(&self) -> Value {
        json!({
            "model": self.model,
            "prompt": self.prompt,
            "max_output_tokens": self.max_output_tokens,
        })
    }

    /// Value of the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}
