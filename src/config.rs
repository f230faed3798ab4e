//! Gateway configuration, read once at process start

use serde::{Deserialize, Serialize};
use log::{debug, warn};

pub const ENV_MODEL: &str = "GPT_MODEL";
pub const ENV_MAX_TOKENS: &str = "GPT_MAX_TOKENS";
pub const ENV_URL: &str = "GPT_URL";
pub const ENV_TOKEN: &str = "GPT_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "GPT_TIMEOUT_SECS";
pub const ENV_BIND_ADDR: &str = "GATEWAY_ADDR";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Gateway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig
{   /// Model name sent upstream
    pub model: String
  , /// Max tokens to generate, 0 leaves it off the wire
    pub max_tokens: u32
  , /// Completion endpoint URL
    pub url: String
  , /// Bearer credential, already quote-stripped
    pub token: String
  , /// Outbound request timeout in seconds, none when unset
    pub timeout_secs: Option<u64>
  , /// Listen address for the HTTP server
    pub bind_addr: String
}

impl Default for GatewayConfig
{   fn default() -> Self
    {   GatewayConfig
        {   model: String::new()
          , max_tokens: 0
          , url: String::new()
          , token: String::new()
          , timeout_secs: None
          , bind_addr: DEFAULT_BIND_ADDR.to_string()
        }
    }
}

impl GatewayConfig
{   /// Load configuration from the process environment
    pub fn from_env() -> Self
    {   Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Missing strings become empty. A non-numeric, negative or
    /// oversized max token value becomes 0 and is logged rather than
    /// rejected. Surrounding whitespace is ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String>
    {   let get = |key: &str| lookup(key).unwrap_or_default();

        let raw_max_tokens = get(ENV_MAX_TOKENS);
        let max_tokens = match raw_max_tokens.trim().parse::<i64>()
        {   Ok(n) => u32::try_from(n).unwrap_or_else(|_| {
              warn!(
                "{}={} is out of range, using 0",
                ENV_MAX_TOKENS, n
              );
              0
            })
          , Err(e) => {
              if !raw_max_tokens.is_empty()
              {   warn!(
                    "{}={:?} is not a number ({}), using 0",
                    ENV_MAX_TOKENS, raw_max_tokens, e
                  );
              }
              0
            }
        };

        let timeout_secs = lookup(ENV_TIMEOUT_SECS)
          .and_then(|raw| match raw.trim().parse::<u64>()
          {   Ok(secs) => Some(secs)
            , Err(e) => {
                warn!(
                  "{}={:?} is not a number ({}), no timeout",
                  ENV_TIMEOUT_SECS, raw, e
                );
                None
              }
          });

        let config = GatewayConfig
        {   model: get(ENV_MODEL)
          , max_tokens
          , url: get(ENV_URL)
          , token: strip_quotes(&get(ENV_TOKEN)).to_string()
          , timeout_secs
          , bind_addr: lookup(ENV_BIND_ADDR)
              .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
        };
        debug!(
          "Loaded config: model={:?} max_tokens={} url={:?}",
          config.model, config.max_tokens, config.url
        );
        config
    }

    /// Max tokens as sent upstream
    pub fn max_tokens_on_wire(&self) -> Option<u32>
    {   (self.max_tokens > 0).then_some(self.max_tokens)
    }
}

/// Remove one pair of literal double quotes wrapping a value
pub fn strip_quotes(value: &str) -> &str
{   value
      .strip_prefix('"')
      .and_then(|inner| inner.strip_suffix('"'))
      .unwrap_or(value)
}
