pub mod error;
pub mod config;
pub mod request;
pub mod providers;
pub mod extract;
pub mod normalize;
pub mod analysis;
pub mod pipeline;
pub mod client;

pub use error::{Error, Result};
pub use config::ClientConfig;
pub use request::{build, PromptRequest, RequestOptions};
pub use extract::{extract_json, parse_ai_response, parse_json};
pub use normalize::{normalize, normalize_ref, render_value};
pub use analysis::AnalysisTask;
pub use providers::ChatCompletionsClient;
pub use client::MedaiBackend;

/// MEDAI API INTERFACE:

// ===== Analyze =====

pub type AnalyzeReply = Result<serde_json::Value>;
pub type AnalyzeReplySender
  = tokio::sync::mpsc::UnboundedSender<AnalyzeReply>;

pub struct AnalyzeArgs
{   pub request: PromptRequest
  , pub reply: AnalyzeReplySender
}

// ===== SetApiKey =====

pub type SetApiKeyReply = Result<()>;
pub type SetApiKeyReplySender
  = tokio::sync::mpsc::UnboundedSender<SetApiKeyReply>;

pub struct SetApiKeyArgs
{   pub key: String
  , pub reply: SetApiKeyReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<()>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== MedaiHand (sender side) =====

pub struct MedaiHand
{   pub analyze_tx
      : tokio::sync::mpsc::UnboundedSender<AnalyzeArgs>
  , pub set_api_key_tx
      : tokio::sync::mpsc::UnboundedSender<SetApiKeyArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== MedaiFoot (receiver side) =====

pub struct MedaiFoot
{   pub analyze_rx
      : tokio::sync::mpsc::UnboundedReceiver<AnalyzeArgs>
  , pub set_api_key_rx
      : tokio::sync::mpsc::UnboundedReceiver<SetApiKeyArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}
