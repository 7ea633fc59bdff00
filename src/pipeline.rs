//! The request → completion → JSON pipeline shared by every caller

use std::path::Path;
use serde_json::Value;
use log::{debug, error, info};
use crate::providers::ChatCompletionsClient;
use crate::request::PromptRequest;

/// Run one request end to end and return the normalized result
pub async fn analyze(
  client: &ChatCompletionsClient
, request: &PromptRequest
) -> crate::error::Result<Value>
{   debug!("Running analysis with model: {}", request.model_id());
    let raw = client.complete(request).await?;
    normalize_completion(&raw)
}

/// Extract, parse and normalize a raw completion
pub fn normalize_completion(raw: &str) -> crate::error::Result<Value>
{   let parsed = crate::extract::parse_ai_response(raw)
      .map_err(|e| {
        error!("Could not read JSON from completion: {}", e);
        e
      })?;
    Ok(crate::normalize::normalize(parsed))
}

/// Write `value` as two-space indented JSON
pub fn export_pretty(
  value: &Value
, path: impl AsRef<Path>
) -> crate::error::Result<()>
{   let path = path.as_ref();
    let text = serde_json::to_string_pretty(value)
      .map_err(|e| crate::error::Error::Other(e.to_string()))?;
    std::fs::write(path, text)?;
    info!("Exported results to {}", path.display());
    Ok(())
}
