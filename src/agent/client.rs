//! HTTP client for the agent runtime.
//!
//! The runtime owns the scoring logic; this client only serializes the
//! two input records, performs one POST, and decodes the response.

use crate::models::{Applicant, Evaluation, PortfolioHealth};
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Failure modes of one agent invocation.
///
/// There is no retry or backoff; each error surfaces inline, and the
/// simulation loop downgrades it to a per-record warning.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("cannot connect to agent runtime at {url}")]
    Connect { url: String },

    #[error("failed to send request: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    #[error("agent runtime error {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed agent response: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
}

/// JSON payload sent to the runtime.
#[derive(Debug, Serialize)]
struct EvaluationRequest<'a> {
    #[serde(rename = "cliente")]
    applicant: &'a Applicant,
    #[serde(rename = "salud_cartera")]
    portfolio: &'a PortfolioHealth,
}

/// Client for the remote scoring agent.
pub struct AgentClient {
    http_client: reqwest::Client,
    url: String,
    timeout_seconds: u64,
}

impl AgentClient {
    /// Create a client for the given runtime endpoint.
    pub fn new(url: String, timeout_seconds: u64) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            url,
            timeout_seconds,
        }
    }

    /// The runtime endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Evaluate one applicant against the current portfolio health.
    pub async fn evaluate(
        &self,
        applicant: &Applicant,
        portfolio: &PortfolioHealth,
    ) -> Result<Evaluation, AgentError> {
        let request = EvaluationRequest {
            applicant,
            portfolio,
        };

        debug!("Invoking agent runtime at {}", self.url);

        let response = self
            .http_client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgentError::Timeout {
                        seconds: self.timeout_seconds,
                    }
                } else if e.is_connect() {
                    AgentError::Connect {
                        url: self.url.clone(),
                    }
                } else {
                    AgentError::Transport { source: e }
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Status { status, body });
        }

        response
            .json::<Evaluation>()
            .await
            .map_err(|e| AgentError::Decode { source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let applicant = Applicant::new(35.0, 50_000.0, 3.0, 0.3).unwrap();
        let portfolio = PortfolioHealth::new(1_000_000.0, 0.035, 500_000.0).unwrap();
        let request = EvaluationRequest {
            applicant: &applicant,
            portfolio: &portfolio,
        };

        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("cliente").is_some());
        assert!(json.get("salud_cartera").is_some());
        assert_eq!(json["cliente"]["edad"], 35.0);
        assert_eq!(json["salud_cartera"]["tasa_mora_actual"], 0.035);
    }

    #[test]
    fn test_client_keeps_url() {
        let client = AgentClient::new("http://localhost:8080/invocations".to_string(), 30);
        assert_eq!(client.url(), "http://localhost:8080/invocations");
    }

    #[test]
    fn test_error_messages() {
        let timeout = AgentError::Timeout { seconds: 30 };
        assert_eq!(timeout.to_string(), "request timed out after 30s");

        let connect = AgentError::Connect {
            url: "http://localhost:8080".to_string(),
        };
        assert!(connect.to_string().contains("http://localhost:8080"));
    }
}
