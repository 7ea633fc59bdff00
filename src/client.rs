use tokio::sync::mpsc;
use log::{debug, error, info};
use crate::MedaiFoot;

/// Public API for the medai backend - owns the task
pub struct MedaiBackend
{   hand: crate::MedaiHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl MedaiBackend
{   /// Create and spawn a new backend.
    /// Returns immediately - spawns background task
    pub fn new(config: crate::config::ClientConfig) -> Self
    {   debug!("Creating MedaiBackend with task ownership");

        let (analyze_tx, analyze_rx)
          = mpsc::unbounded_channel();
        let (set_api_key_tx, set_api_key_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = crate::MedaiHand
        {   analyze_tx
          , set_api_key_tx
          , kill_process_tx
        };

        let foot = crate::MedaiFoot
        {   analyze_rx
          , set_api_key_rx
          , kill_process_rx
        };

        let _task_handle = tokio::spawn(async move {
          run_backend_loop(foot, config).await
        });

        MedaiBackend
        {   hand
          , _task_handle
        }
    }

    /// Queue an analysis - returns almost immediately.
    /// Dropping the receiver discards the eventual result.
    pub async fn analyze(
      &self
    , request: crate::request::PromptRequest
    ) -> crate::error::Result<
        mpsc::UnboundedReceiver<crate::AnalyzeReply>
      >
    {   debug!("analyze queuing command for model: {}", request.model_id());
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::AnalyzeArgs
        {   request
          , reply: reply_tx
        };

        self.hand.analyze_tx
          .send(cmd)
          .map_err(|_| disconnected())?;

        Ok(reply_rx)
    }

    /// Replace the API key - returns almost immediately
    pub async fn set_api_key(
      &self
    , key: String
    ) -> crate::error::Result<
        mpsc::UnboundedReceiver<crate::SetApiKeyReply>
      >
    {   debug!("set_api_key queuing command");
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::SetApiKeyArgs
        {   key
          , reply: reply_tx
        };

        self.hand.set_api_key_tx
          .send(cmd)
          .map_err(|_| disconnected())?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the backend
    pub async fn shutdown(self)
      -> crate::error::Result<()>
    {   debug!("Shutting down MedaiBackend");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel already closed");
            crate::error::Error::Other(
              "Backend already shutdown".to_string()
            )
          })?;

        if let Some(result) = reply_rx.recv().await
        {   debug!("Backend shutdown confirmed");
            result
        } else
        {   error!("Backend exited before confirming shutdown");
            Err(crate::error::Error::Other(
              "Backend disconnected".to_string()
            ))
        }
    }
}

fn disconnected() -> crate::error::Error
{   error!("Backend channel closed");
    crate::error::Error::Other(
      "Backend disconnected".to_string()
    )
}

/// Commands for the analysis worker
enum WorkerCommand
{   Analyze(crate::AnalyzeArgs)
  , SetApiKey(crate::SetApiKeyArgs)
}

/// Analysis worker loop: owns the transport and serves commands one at
/// a time in arrival order, so a key update applies to every analysis
/// queued after it.
async fn run_worker_loop(
  mut cmd_rx: mpsc::UnboundedReceiver<WorkerCommand>
, config: crate::config::ClientConfig
)
{   debug!("Starting analysis worker loop");
    let mut client
      = crate::providers::ChatCompletionsClient::new(&config);

    while let Some(cmd) = cmd_rx.recv().await
    { match cmd
      {   WorkerCommand::Analyze(cmd) => {
            debug!("Processing Analyze for model: {}", cmd.request.model_id());
            let result
              = crate::pipeline::analyze(&client, &cmd.request).await;
            if cmd.reply.send(result).is_err()
            {   debug!("Analyze caller went away, result dropped");
            }
          }
        , WorkerCommand::SetApiKey(cmd) => {
            debug!("Processing SetApiKey");
            let result = if cmd.key.trim().is_empty()
            {   Err(crate::error::Error::InvalidConfiguration(
                  "API key is empty".to_string()
                ))
            } else
            {   client.set_api_key(cmd.key);
                Ok(())
            };
            let _ = cmd.reply.send(result);
          }
      }
    }
    debug!("Worker command channel closed");
}

/// Main backend event loop
///
/// Design: tokio::select! is ONLY for fast queueing.
/// Each arm hands its command to the analysis worker and returns, so
/// shutdown is never stuck behind an in-flight provider call. Work
/// still pending in the worker is aborted on shutdown.
async fn run_backend_loop(
  foot: crate::MedaiFoot
, config: crate::config::ClientConfig
)
{   debug!("Starting MedaiBackend event loop");
    let (worker_tx, worker_rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(async move {
      run_worker_loop(worker_rx, config).await
    });
    let MedaiFoot
    {   mut analyze_rx
      , mut set_api_key_rx
      , mut kill_process_rx
    } = foot;

    loop
    { tokio::select!
      { Some(cmd) = analyze_rx.recv() => {
          debug!("Received Analyze for model: {}", cmd.request.model_id());
          if let Err(mpsc::error::SendError(WorkerCommand::Analyze(cmd)))
            = worker_tx.send(WorkerCommand::Analyze(cmd))
          {   error!("Analysis worker stopped");
              let _ = cmd.reply.send(Err(crate::error::Error::Other(
                "Analysis worker stopped".to_string()
              )));
          }
        }
      , Some(cmd) = set_api_key_rx.recv() => {
          debug!("Received SetApiKey");
          if let Err(mpsc::error::SendError(WorkerCommand::SetApiKey(cmd)))
            = worker_tx.send(WorkerCommand::SetApiKey(cmd))
          {   error!("Analysis worker stopped");
              let _ = cmd.reply.send(Err(crate::error::Error::Other(
                "Analysis worker stopped".to_string()
              )));
          }
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          worker.abort();
          let _ = cmd.reply.send(Ok(()));
          info!("MedaiBackend shutting down");
          break;
        }
      , else => {
          debug!("All command channels closed");
          break;
        }
      }
    }
}
