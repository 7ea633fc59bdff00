use std::fmt;

/// Custom error type for medai operations
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq)]
pub enum Error
{   /// Network failure (no status) or non-2xx HTTP response
    Transport
    {   status: Option<u16>
      , message: String
      , payload: Option<serde_json::Value>
    }
  , /// No JSON-shaped region could be isolated (empty input)
    Extraction(String)
  , /// Extracted candidate is not valid top-level JSON
    JsonParse(String)
  , /// API key is missing
    MissingApiKey(String)
  , /// No choices in API response
    NoChoicesInResponse
  , /// 2xx response whose body could not be decoded
    MalformedResponse(String)
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Filesystem error while reading input or exporting results
    Io(String)
  , /// Generic error
    Other(String)
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error
{   /// HTTP status carried by a transport error, if any
    pub fn status(&self) -> Option<u16>
    {   match self
        {   Error::Transport { status, .. } => *status
          , _ => None
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::Transport { status: Some(code), message, .. } => {
              write!(f,
                "API request failed with status {}: {}",
                code, message
              )
            }
          , Error::Transport { status: None, message, .. } => {
              write!(f, "Failed to connect to AI service: {}", message)
            }
          , Error::Extraction(msg) => {
              write!(f, "No JSON found in AI response: {}", msg)
            }
          , Error::JsonParse(msg) => {
              write!(f,
                "Could not parse response from AI service: {}",
                msg
              )
            }
          , Error::MissingApiKey(what) => {
              write!(f, "Missing API key for: {}", what)
            }
          , Error::NoChoicesInResponse => {
              write!(f, "API response contained no choices")
            }
          , Error::MalformedResponse(msg) => {
              write!(f, "Malformed API response: {}", msg)
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Io(msg) => {
              write!(f, "I/O error: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error
{   fn from(e: std::io::Error) -> Self
    {   Error::Io(e.to_string())
    }
}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
