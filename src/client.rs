use std::sync::Arc;
use std::time::Duration;
use log::{debug, trace, error};

use crate::config::GatewayConfig;
use crate::error::Error;
use crate::request::{
  CompletionRequest, CompletionResponse, Message, TEMPERATURE
};

/// Client for the configured completion endpoint.
///
/// Cloning shares the connection pool and the configuration.
#[derive(Debug, Clone)]
pub struct UpstreamClient
{   config: Arc<GatewayConfig>
  , http_client: reqwest::Client
}

impl UpstreamClient
{   /// Create a client from the startup configuration
    pub fn new(
      config: Arc<GatewayConfig>
    ) -> Result<Self, Error>
    {   debug!("Creating UpstreamClient for {}", config.url);
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs
        {   debug!("Upstream timeout set to {}s", secs);
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|e| {
          error!("Failed to build HTTP client: {}", e);
          Error::InvalidConfiguration(e.to_string())
        })?;

        Ok(UpstreamClient
        {   config
          , http_client
        })
    }

    /// Request body for a message sequence
    pub fn build_request(
      &self
    , messages: Vec<Message>
    ) -> CompletionRequest
    {   CompletionRequest
        {   model: self.config.model.clone()
          , messages
          , temperature: TEMPERATURE
          , max_tokens: self.config.max_tokens_on_wire()
        }
    }

    /// Issue exactly one completion call
    pub async fn send(
      &self
    , messages: Vec<Message>
    ) -> Result<CompletionResponse, Error>
    {   let request = self.build_request(messages);
        trace!("Completion request: {:?}", request);

        let response = self.http_client
          .post(&self.config.url)
          .header(
            "Authorization",
            format!("Bearer {}", self.config.token)
          )
          .header("Content-Type", "application/json")
          .json(&request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            Error::HttpError(e.to_string())
          })?;

        let status = response.status();
        trace!("Completion response status: {}", status);

        let body = response.bytes().await.map_err(|e| {
          error!("Failed to read response body: {}", e);
          Error::HttpError(e.to_string())
        })?;

        if !status.is_success()
        {   let text = String::from_utf8_lossy(&body).into_owned();
            error!("Completion API error {}: {}", status, text);
            return Err(Error::ApiError
            {   status: status.as_u16()
              , body: text
            });
        }

        let completion: CompletionResponse
          = serde_json::from_slice(&body).map_err(|e| {
            error!("Parse error: {}", e);
            Error::ParseError(e.to_string())
          })?;

        debug!(
          "Completion {} returned {} choices",
          completion.id, completion.choices.len()
        );
        Ok(completion)
    }
}
