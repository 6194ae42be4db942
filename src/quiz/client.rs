use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use reqwest::StatusCode;
use thiserror::Error;

use super::session::{SessionId, SubmissionTicket};

/// Body of the team-matching request.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub start_year: i32,
    pub preferences: BTreeMap<String, u8>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchResponse {
    team_name: String,
    #[serde(default)]
    reason: String,
    #[serde(default)]
    year: Option<String>,
}

/// What the matching service answered, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub team_label: String,
    pub rationale: String,
    pub year: Option<String>,
}

impl From<MatchResponse> for MatchResult {
    fn from(response: MatchResponse) -> Self {
        Self {
            team_label: response.team_name,
            rationale: response.reason,
            year: response.year,
        }
    }
}

/// Any failure to get a usable answer from the matching service.
/// The variants only exist for logs; callers treat them all alike.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("matching service unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("matching service answered {0}")]
    Status(StatusCode),

    #[error("matching service sent an unreadable body: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait MatchService: Send + Sync {
    async fn submit(&self, request: &MatchRequest) -> Result<MatchResult, SubmissionError>;
}

pub struct HttpMatchService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMatchService {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SubmissionError::Transport)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MatchService for HttpMatchService {
    async fn submit(&self, request: &MatchRequest) -> Result<MatchResult, SubmissionError> {
        info!(
            "Submitting {} preferences (start year {}) to {}",
            request.preferences.len(),
            request.start_year,
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(SubmissionError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Status(status));
        }

        // Read as text first so a bad body is reported as Malformed, not Transport
        let body = response.text().await.map_err(SubmissionError::Transport)?;
        let parsed: MatchResponse =
            serde_json::from_str(&body).map_err(|e| SubmissionError::Malformed(e.to_string()))?;

        Ok(parsed.into())
    }
}

/// Outcome of one submission, addressed to the session that asked for it.
#[derive(Debug)]
pub struct Settlement {
    pub session_id: SessionId,
    pub outcome: Result<MatchResult, SubmissionError>,
}

/// Runs the submission and the minimum reveal delay side by side; returns
/// once both have finished.
pub async fn resolve(
    service: &dyn MatchService,
    ticket: SubmissionTicket,
    pacing: Duration,
) -> Settlement {
    let (outcome, ()) = tokio::join!(service.submit(&ticket.request), tokio::time::sleep(pacing));

    if let Err(e) = &outcome {
        warn!("Matching failed for session {}: {}", ticket.session_id, e);
    }

    Settlement {
        session_id: ticket.session_id,
        outcome,
    }
}
