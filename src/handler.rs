//! HTTP handlers and router

use std::sync::Arc;
use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use log::{debug, trace, warn, info};

use crate::client::UpstreamClient;
use crate::error::Error;
use crate::request::{Prompt, ResultEnvelope};

pub const PROMPT_PATH: &str = "/api/prompt";
pub const HEALTHCHECK_PATH: &str = "/api/healthcheck";

/// Shared per-process state
#[derive(Debug, Clone)]
pub struct AppState
{   pub client: UpstreamClient
}

pub fn router(client: UpstreamClient) -> Router
{   let state = Arc::new(AppState { client });
    Router::new()
      .route(PROMPT_PATH, any(prompt))
      .route(HEALTHCHECK_PATH, any(healthcheck))
      .with_state(state)
}

pub async fn healthcheck() -> (StatusCode, &'static str)
{   (StatusCode::OK, "ok")
}

pub async fn prompt(
  State(state): State<Arc<AppState>>
, request: Request
) -> Response
{   let method = request.method().clone();
    if method != Method::POST
    {   warn!("Rejecting {} on {}", method, PROMPT_PATH);
        let mut response
          = Error::MethodNotAllowed(method.to_string()).into_response();
        response.headers_mut().insert(
          header::ALLOW,
          header::HeaderValue::from_static("POST")
        );
        return response;
    }

    let body = read_body(request.into_body()).await;
    match handle_prompt(&state.client, &body).await
    {   Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response()
      , Err(e) => e.into_response()
    }
}

/// Parse, forward and shape one prompt
pub async fn handle_prompt(
  client: &UpstreamClient
, body: &[u8]
) -> Result<ResultEnvelope, Error>
{   let prompt = parse_prompt(body)?;
    debug!(
      "Forwarding prompt: context {} bytes, message {} bytes",
      prompt.context.len(), prompt.message.len()
    );

    let completion = client.send(prompt.to_messages()).await?;
    let envelope = ResultEnvelope::from_response(completion)?;
    info!(
      "Prompt answered by {} ({} tokens, {})",
      envelope.model, envelope.used_tokens, envelope.finish_reason
    );
    Ok(envelope)
}

/// A `null` body decodes to an empty prompt
pub fn parse_prompt(body: &[u8]) -> Result<Prompt, Error>
{   trace!("Prompt body: {}", String::from_utf8_lossy(body));
    serde_json::from_slice::<Option<Prompt>>(body)
      .map(Option::unwrap_or_default)
      .map_err(|e| {
        warn!("Bad prompt body: {}", e);
        Error::BadRequest(e.to_string())
      })
}

/// No size limit; a failed read is treated as an empty body
async fn read_body(body: Body) -> Vec<u8>
{   match to_bytes(body, usize::MAX).await
    {   Ok(bytes) => bytes.to_vec()
      , Err(e) => {
          warn!("Failed to read request body, treating as empty: {}", e);
          Vec::new()
        }
    }
}
