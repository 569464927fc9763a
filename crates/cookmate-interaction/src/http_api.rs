//! HttpApiClient - REST implementation of the backend interfaces.
//!
//! Every call carries the bearer token from the configured `TokenProvider`.
//! Chat requests get their own, much longer timeout because the backend waits
//! on model inference before answering.

use async_trait::async_trait;
use cookmate_core::api::{
    ChatApi, ChatReply, ChatRequest, CookingSessionApi, EndSessionRequest, RecipeApi,
    StartSessionRequest, TokenProvider,
};
use cookmate_core::chat::ChatHistoryRecord;
use cookmate_core::cooking::{CookingSession, SessionId};
use cookmate_core::recipe::{Recipe, RecipeId};
use cookmate_core::{CookmateError, Result};
use cookmate_infrastructure::{CookmateConfig, StaticTokenProvider};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Client for the Cookmate REST backend.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    chat_timeout: Duration,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpApiClient {
    /// Creates a client. `request_timeout` applies to every call except chat.
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
        chat_timeout: Duration,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| CookmateError::internal(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            chat_timeout,
            tokens,
        })
    }

    /// Builds a client from configuration, using the configured token.
    pub fn from_config(config: &CookmateConfig) -> Result<Self> {
        let tokens = Arc::new(StaticTokenProvider::new(config.auth.token.clone()));
        Self::new(
            config.api.base_url.clone(),
            config.request_timeout(),
            config.chat_timeout(),
            tokens,
        )
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        builder: RequestBuilder,
    ) -> Result<T> {
        tracing::debug!(operation, "Sending API request");

        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|err| map_transport_error(operation, &err))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            if status == StatusCode::UNAUTHORIZED {
                self.tokens.on_unauthorized();
            }
            tracing::warn!(operation, status = status.as_u16(), "API request failed");
            return Err(map_http_error(operation, status, &body_text));
        }

        response.json::<T>().await.map_err(|err| {
            if err.is_timeout() {
                return CookmateError::timeout(operation);
            }
            CookmateError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to parse {operation} response: {err}"),
            }
        })
    }
}

#[async_trait]
impl RecipeApi for HttpApiClient {
    async fn get_recipe(&self, recipe_id: RecipeId) -> Result<Recipe> {
        let request = self.client.get(self.url(&format!("recipes/{recipe_id}")));
        self.execute("get recipe", request).await
    }
}

#[async_trait]
impl CookingSessionApi for HttpApiClient {
    async fn start_session(&self, recipe_id: RecipeId) -> Result<CookingSession> {
        let request = self
            .client
            .post(self.url("cooking-sessions"))
            .json(&StartSessionRequest { recipe_id });
        self.execute("start cooking session", request).await
    }

    async fn end_session(
        &self,
        session_id: SessionId,
        notes: Option<String>,
    ) -> Result<CookingSession> {
        let request = self
            .client
            .post(self.url(&format!("cooking-sessions/{session_id}/end")))
            .json(&EndSessionRequest { notes });
        self.execute("end cooking session", request).await
    }
}

#[async_trait]
impl ChatApi for HttpApiClient {
    async fn send_chat(&self, message: &str) -> Result<ChatReply> {
        let request = self
            .client
            .post(self.url("chat"))
            .timeout(self.chat_timeout)
            .json(&ChatRequest {
                message: message.to_string(),
            });
        self.execute("chat", request).await
    }

    async fn chat_history(&self) -> Result<Vec<ChatHistoryRecord>> {
        let request = self.client.get(self.url("chat/history"));
        self.execute("chat history", request).await
    }
}

/// Error bodies the backend is known to produce.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorResponse {
    Detail { detail: String },
    Message { message: String },
    Nested { error: ErrorBody },
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn map_transport_error(operation: &str, err: &reqwest::Error) -> CookmateError {
    if err.is_timeout() {
        CookmateError::timeout(operation)
    } else {
        CookmateError::network(format!("{operation} request failed: {err}"))
    }
}

fn map_http_error(operation: &str, status: StatusCode, body: &str) -> CookmateError {
    match status {
        StatusCode::UNAUTHORIZED => CookmateError::Unauthorized,
        StatusCode::NOT_FOUND => CookmateError::not_found("resource", operation),
        StatusCode::GATEWAY_TIMEOUT | StatusCode::REQUEST_TIMEOUT => {
            CookmateError::timeout(operation)
        }
        _ => CookmateError::http(status.as_u16(), extract_error_message(body)),
    }
}

fn extract_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse::Detail { detail }) => detail,
        Ok(ErrorResponse::Message { message }) => message,
        Ok(ErrorResponse::Nested { error }) => error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.to_string(),
    }
}
