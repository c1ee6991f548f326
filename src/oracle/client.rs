//! @ai:module:intent Classification oracle trait, chat-completions client, and offline mock
//! @ai:module:layer infrastructure
//! @ai:module:public_api ClassificationOracle, OpenAiOracle, MockOracle
//! @ai:module:stateless false

use crate::config::ApiConfig;
use crate::corpus::ClassificationRequest;
use crate::error::OracleError;
use crate::oracle::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::oracle::rate_limiter::{RateLimiter, RateLimiterTrait};
use crate::oracle::response::{parse_analysis, Recommendation, TokenAnalysis};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// @ai:intent Black-box scorer for token reliability
///            Any failure (network, timeout, bad payload) is an OracleError
#[allow(async_fn_in_trait)]
pub trait ClassificationOracle: Send + Sync {
    /// @ai:intent Classify a single token
    async fn classify(&self, request: &ClassificationRequest) -> Result<TokenAnalysis, OracleError>;
}

/// @ai:intent Chat completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// @ai:intent Chat completions response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// @ai:intent OpenAI-compatible chat completions oracle with rate limiting
pub struct OpenAiOracle {
    client: reqwest::Client,
    config: ApiConfig,
    rate_limiter: Arc<RateLimiter>,
    api_key: String,
}

impl OpenAiOracle {
    /// @ai:intent Create a new oracle client
    /// @ai:pre OPENAI_API_KEY environment variable is set
    /// @ai:effects env
    pub fn new(config: ApiConfig) -> Result<Self, OracleError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| OracleError::MissingApiKey)?;
        Self::with_api_key(config, api_key)
    }

    /// @ai:intent Create a client with an explicit key
    /// @ai:effects pure
    pub fn with_api_key(config: ApiConfig, api_key: String) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| OracleError::Network(e.to_string()))?;

        let rate_limiter = Arc::new(RateLimiter::new(config.requests_per_minute));

        Ok(Self {
            client,
            config,
            rate_limiter,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> OracleError {
        if err.is_timeout() {
            OracleError::Timeout(self.config.request_timeout_secs)
        } else {
            OracleError::Network(err.to_string())
        }
    }
}

impl ClassificationOracle for OpenAiOracle {
    /// @ai:intent Send the prompt and parse the reply into a validated analysis
    /// @ai:effects network
    async fn classify(&self, request: &ClassificationRequest) -> Result<TokenAnalysis, OracleError> {
        self.rate_limiter.wait().await;

        let prompt = build_prompt(request);
        let body = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        tracing::debug!("Classifying {} ({})", request.name, request.symbol);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(OracleError::Http {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                OracleError::Timeout(self.config.request_timeout_secs)
            } else {
                OracleError::MalformedResponse(e.to_string())
            }
        })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OracleError::MalformedResponse("response contained no message".to_string()))?;

        parse_analysis(&content)
    }
}

/// @ai:intent Deterministic offline oracle scoring tokens with simple heuristics
///            Used for dry runs; optionally simulates latency
#[derive(Debug, Clone, Default)]
pub struct MockOracle {
    latency: Option<Duration>,
}

impl MockOracle {
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Mock that sleeps before answering
    /// @ai:effects pure
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
        }
    }

    /// @ai:intent Score a request from holder base, smart money, liquidity and hype signals
    /// @ai:effects pure
    pub fn analyze(request: &ClassificationRequest) -> TokenAnalysis {
        let mut score: f64 = 0.5;
        let mut risk_factors = Vec::new();
        let mut positive_factors = Vec::new();

        if request.holder_count >= 10_000 {
            score += 0.15;
            positive_factors.push("broad holder base".to_string());
        } else if request.holder_count < 1_000 {
            score -= 0.1;
            risk_factors.push("very few holders".to_string());
        }

        if request.smart_money_buys >= 20 {
            score += 0.15;
            positive_factors.push("sustained smart money buying".to_string());
        } else if request.smart_money_buys < 5 {
            risk_factors.push("little smart money interest".to_string());
        }

        if request.liquidity >= 1_000_000.0 {
            score += 0.1;
            positive_factors.push("deep liquidity".to_string());
        } else if request.liquidity < 100_000.0 {
            score -= 0.1;
            risk_factors.push("thin liquidity".to_string());
        }

        if request.price_change_24h.abs() > 50.0 {
            score -= 0.35;
            risk_factors.push("abnormal 24h price move".to_string());
        }

        let hype_ratio = request.twitter_mentions as f64 / request.holder_count.max(1) as f64;
        if hype_ratio > 10.0 {
            score -= 0.25;
            risk_factors.push("social activity far exceeds holder count".to_string());
        }

        let reliability_score = score.clamp(0.0, 1.0);

        TokenAnalysis {
            token_address: request.token_address.clone(),
            name: request.name.clone(),
            reliability_score,
            recommendation: Recommendation::from_score(reliability_score),
            risk_factors,
            positive_factors,
            confidence: 0.6,
        }
    }
}

impl ClassificationOracle for MockOracle {
    /// @ai:effects time
    async fn classify(&self, request: &ClassificationRequest) -> Result<TokenAnalysis, OracleError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        Ok(Self::analyze(request))
    }
}
