use log::{debug, trace, error};
use crate::request::{ChatCompletionResponse, PromptRequest};

// ===== Chat Completions Client =====

/// HTTP transport for OpenAI-compatible chat-completion endpoints.
/// One POST per call; no retry, no timeout.
pub struct ChatCompletionsClient
{   api_url: String
  , api_key: Option<String>
  , verbose: bool
  , http_client: reqwest::Client
}

impl ChatCompletionsClient
{   pub fn new(config: &crate::config::ClientConfig) -> Self
    {   debug!("Creating ChatCompletionsClient for {}", config.api_url);
        ChatCompletionsClient
        {   api_url: config.api_url.clone()
          , api_key: config.api_key.clone()
          , verbose: config.verbose
          , http_client: reqwest::Client::new()
        }
    }

    pub fn api_url(&self) -> &str
    {   &self.api_url
    }

    pub fn has_api_key(&self) -> bool
    {   self.api_key.is_some()
    }

    pub fn set_api_key(&mut self, key: String)
    {   debug!("Setting API key");
        self.api_key = Some(key);
    }

    fn get_api_key(&self) -> crate::error::Result<&str>
    {   self.api_key.as_deref()
          .filter(|k| !k.trim().is_empty())
          .ok_or_else(|| {
            error!("No API key configured for {}", self.api_url);
            crate::error::Error::MissingApiKey(self.api_url.clone())
          })
    }

    /// Send the request and return the first choice's content
    pub async fn complete(
      &self
    , request: &PromptRequest
    ) -> crate::error::Result<String>
    {   debug!("Sending completion for model: {}", request.model_id());

        let api_key = self.get_api_key()?;
        let body = request.to_chat_body();

        if self.verbose
        {   debug!("Chat request: {:?}", body);
        } else
        {   trace!("Chat request: {:?}", body);
        }

        let response = self.http_client
          .post(&self.api_url)
          .header("Authorization", format!("Bearer {}", api_key))
          .header("Content-Type", "application/json")
          .json(&body)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::Transport
            {   status: None
              , message: e.to_string()
              , payload: None
            }
          })?;

        let status = response.status();
        trace!("Chat response status: {}", status);

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_default();
            let payload
              = serde_json::from_str::<serde_json::Value>(&error_text)
                .ok();
            error!("API error {}: {}", status, error_text);
            return Err(crate::error::Error::Transport
            {   status: Some(status.as_u16())
              , message: status.canonical_reason()
                  .unwrap_or("Unknown error")
                  .to_string()
              , payload
            });
        }

        let chat_response: ChatCompletionResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::MalformedResponse(e.to_string())
          })?;

        chat_response.choices.into_iter().next()
          .map(|c| c.message.content)
          .ok_or_else(|| {
            error!("No choices in response");
            crate::error::Error::NoChoicesInResponse
          })
    }
}
