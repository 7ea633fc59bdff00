//! Configuration for the chat-completion provider

use std::path::Path;
use serde::{Deserialize, Serialize};
use log::debug;

/// Groq's OpenAI-compatible chat-completion endpoint
pub const DEFAULT_API_URL: &str
  = "https://api.groq.com/openai/v1/chat/completions";

/// Environment variable holding the provider API key
pub const API_KEY_ENV: &str = "MEDAI_API_KEY";
/// Secondary key variable, checked when `MEDAI_API_KEY` is unset
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable overriding the endpoint URL
pub const API_URL_ENV: &str = "MEDAI_API_URL";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig
{   /// Full chat-completion endpoint URL
    #[serde(default = "default_api_url")]
    pub api_url: String
  , /// Bearer token sent with every request
    #[serde(default)]
    pub api_key: Option<String>
  , /// Enable detailed logging of request bodies
    #[serde(default)]
    pub verbose: bool
}

fn default_api_url() -> String
{   DEFAULT_API_URL.to_string()
}

/// Value of `name`, treating a blank value as unset
fn non_blank_var(name: &str) -> Option<String>
{   std::env::var(name)
      .ok()
      .filter(|v| !v.trim().is_empty())
}

impl Default for ClientConfig
{   fn default() -> Self
    {   ClientConfig
        {   api_url: default_api_url()
          , api_key: None
          , verbose: false
        }
    }
}

impl ClientConfig
{   /// Create a config for an endpoint with a key
    pub fn new(
      api_url: impl Into<String>
    , api_key: Option<String>
    ) -> Self
    {   ClientConfig
        {   api_url: api_url.into()
          , api_key
          , verbose: false
        }
    }

    /// Build configuration from the process environment.
    /// Unset variables keep their defaults.
    pub fn from_env() -> Self
    {   let mut config = ClientConfig::default();
        if let Ok(url) = std::env::var(API_URL_ENV)
        {   debug!("Using endpoint from {}", API_URL_ENV);
            config.api_url = url;
        }
        config.api_key = non_blank_var(API_KEY_ENV)
          .or_else(|| non_blank_var(GROQ_API_KEY_ENV));
        config
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>)
      -> crate::error::Result<Self>
    {   let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&raw)
          .map_err(|e| {
            crate::error::Error::InvalidConfiguration(
              format!("{}: {}", path.display(), e)
            )
          })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that can never produce a request
    pub fn validate(&self) -> crate::error::Result<()>
    {   let url = self.api_url.trim();
        if url.is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "api_url is empty".to_string()
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://"))
        {   return Err(crate::error::Error::InvalidConfiguration(
              format!("api_url is not an http(s) URL: {}", url)
            ));
        }
        Ok(())
    }
}
