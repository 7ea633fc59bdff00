//! Request builder for chat-completion calls

use serde::{Deserialize, Serialize};

pub const DEFAULT_SYSTEM_MESSAGE: &str
  = "You are a helpful medical AI assistant providing accurate and useful information.";
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_MAX_TOKENS: usize = 2048;

/// Overridable request parameters. Unset fields use the defaults above.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions
{   pub system_message: Option<String>
  , pub model: Option<String>
  , pub temperature: Option<f64>
  , pub max_tokens: Option<usize>
}

impl RequestOptions
{   pub fn with_system_message(
      mut self
    , system_message: impl Into<String>
    ) -> Self
    {   self.system_message = Some(system_message.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self
    {   self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self
    {   self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self
    {   self.max_tokens = Some(max_tokens);
        self
    }
}

/// A fully resolved request, immutable once built
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptRequest
{   instruction_text: String
  , system_message: String
  , model_id: String
  , temperature: f64
  , max_tokens: usize
}

/// Build a request from instruction text and options.
/// Empty instruction text is accepted as is.
pub fn build(
  instruction_text: impl Into<String>
, options: &RequestOptions
) -> PromptRequest
{   PromptRequest
    {   instruction_text: instruction_text.into()
      , system_message: options.system_message.clone()
          .unwrap_or_else(|| DEFAULT_SYSTEM_MESSAGE.to_string())
      , model_id: options.model.clone()
          .unwrap_or_else(|| DEFAULT_MODEL.to_string())
      , temperature: options.temperature
          .unwrap_or(DEFAULT_TEMPERATURE)
      , max_tokens: options.max_tokens
          .unwrap_or(DEFAULT_MAX_TOKENS)
    }
}

impl PromptRequest
{   pub fn instruction_text(&self) -> &str
    {   &self.instruction_text
    }

    pub fn system_message(&self) -> &str
    {   &self.system_message
    }

    pub fn model_id(&self) -> &str
    {   &self.model_id
    }

    pub fn temperature(&self) -> f64
    {   self.temperature
    }

    pub fn max_tokens(&self) -> usize
    {   self.max_tokens
    }

    /// Wire body: system message first, then the user instruction
    pub fn to_chat_body(&self) -> ChatCompletionRequest
    {   ChatCompletionRequest
        {   model: self.model_id.clone()
          , messages: vec![
              ChatMessage
              {   role: "system".to_string()
                , content: self.system_message.clone()
              }
            , ChatMessage
              {   role: "user".to_string()
                , content: self.instruction_text.clone()
              }
            ]
          , temperature: self.temperature
          , max_tokens: self.max_tokens
        }
    }
}

// ===== Wire Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub temperature: f64
  , pub max_tokens: usize
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ChatMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
}
