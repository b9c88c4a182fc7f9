/// HTTP client for the remote advisor service (`/api/ai/suggest`, `/api/ai/plan`).
///
/// All remote advisor traffic goes through this client. Transport failures,
/// 429 and 5xx responses are retried with exponential backoff; any other
/// non-success status fails immediately.
use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::plan::{PlanDraft, PlanRequest};
use crate::models::questionnaire::QuestionnaireAnswers;
use crate::models::suggestion::SuggestionSet;

const SUGGEST_PATH: &str = "/api/ai/suggest";
const PLAN_PATH: &str = "/api/ai/plan";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_BACKOFF: Duration = Duration::from_millis(1000);
/// Upper bound on `ADVISOR_MAX_RETRIES`.
pub const MAX_ATTEMPTS: u32 = 10;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Gave up after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestPayload<'a> {
    user_id: Option<&'a str>,
    questionnaire: &'a QuestionnaireAnswers,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct AdvisorClient {
    client: Client,
    base_url: String,
    max_attempts: u32,
    backoff: Duration,
}

impl AdvisorClient {
    pub fn new(base_url: &str, max_attempts: u32) -> Result<Self, AdvisorError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_attempts: max_attempts.clamp(1, MAX_ATTEMPTS),
            backoff: DEFAULT_BACKOFF,
        })
    }

    /// Base delay for the first retry; doubles on each subsequent attempt.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Delay before retry number `attempt` (1-based): `backoff * 2^(attempt - 1)`, saturating.
    fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.backoff.saturating_mul(factor)
    }

    pub async fn suggest(&self, answers: &QuestionnaireAnswers) -> Result<SuggestionSet, AdvisorError> {
        let payload = SuggestPayload {
            user_id: answers.user_id.as_deref(),
            questionnaire: answers,
        };
        self.post_json(SUGGEST_PATH, &payload).await
    }

    pub async fn plan(&self, request: &PlanRequest) -> Result<PlanDraft, AdvisorError> {
        self.post_json(PLAN_PATH, request).await
    }

    /// POSTs `body` as JSON and deserializes the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AdvisorError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut last_error: Option<AdvisorError> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                let delay = self.retry_delay(attempt);
                warn!(
                    "Advisor call to {} attempt {} failed, retrying after {}ms...",
                    path,
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(AdvisorError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Advisor service returned {}: {}", status, body);
                last_error = Some(AdvisorError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            let text = response.text().await?;

            if !status.is_success() {
                let message = serde_json::from_str::<ApiErrorBody>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                return Err(AdvisorError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            debug!("Advisor call to {} succeeded ({} bytes)", path, text.len());
            return serde_json::from_str(&text).map_err(AdvisorError::Parse);
        }

        Err(last_error.unwrap_or(AdvisorError::Exhausted {
            attempts: self.max_attempts,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = AdvisorClient::new("http://advisor.local/", 3).unwrap();
        assert_eq!(client.base_url(), "http://advisor.local");
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        let client = AdvisorClient::new("http://advisor.local", 0).unwrap();
        assert_eq!(client.max_attempts, 1);
    }

    #[test]
    fn test_attempts_capped() {
        let client = AdvisorClient::new("http://advisor.local", 4_000_000_000).unwrap();
        assert_eq!(client.max_attempts, MAX_ATTEMPTS);
    }

    #[test]
    fn test_retry_delay_doubles_and_saturates() {
        let client = AdvisorClient::new("http://advisor.local", 3)
            .unwrap()
            .with_backoff(Duration::from_millis(100));
        assert_eq!(client.retry_delay(1), Duration::from_millis(100));
        assert_eq!(client.retry_delay(3), Duration::from_millis(400));
        // Shift past 32 bits and a huge base delay must not panic.
        assert_eq!(client.retry_delay(40), Duration::from_millis(100) * u32::MAX);
        let slow = client.with_backoff(Duration::MAX);
        assert_eq!(slow.retry_delay(5), Duration::MAX);
    }

    #[test]
    fn test_suggest_payload_shape() {
        let answers = QuestionnaireAnswers {
            user_id: Some("u-1".to_string()),
            coding_pref: 8,
            ..Default::default()
        };
        let payload = SuggestPayload {
            user_id: answers.user_id.as_deref(),
            questionnaire: &answers,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["userId"], "u-1");
        assert_eq!(value["questionnaire"]["codingPref"], 8);
    }

    #[tokio::test]
    async fn test_unreachable_host_reports_http_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = AdvisorClient::new("http://127.0.0.1:9", 2)
            .unwrap()
            .with_backoff(Duration::from_millis(1));
        let err = client
            .suggest(&QuestionnaireAnswers::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisorError::Http(_)), "got {err:?}");
    }
}
