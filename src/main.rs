use std::io::Read;
use std::path::PathBuf;
use clap::{Parser, Subcommand};
use log::{error, info, warn};
use medai::{AnalysisTask, ClientConfig, MedaiBackend, RequestOptions};

#[derive(Parser)]
#[command(name = "medai", version, about = "Medical AI analysis CLI", long_about = None)]
struct Cli
{   #[command(subcommand)]
    command: Commands
  , #[arg(long, default_value = "info", global = true)]
    log_level: String
  , /// JSON config file; environment variables are used when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>
}

#[derive(Subcommand)]
enum Commands
{   /// Send patient data to the provider and print normalized JSON
    Analyze
    {   #[arg(long, default_value = "patient-report")]
        task: AnalysisTask
      , #[arg(long, conflicts_with = "file")]
        text: Option<String>
      , #[arg(long)]
        file: Option<PathBuf>
      , /// Export results; without a value the task's default file
        /// name is used
        #[arg(long, num_args = 0..=1)]
        output: Option<Option<PathBuf>>
      , #[arg(long)]
        model: Option<String>
      , #[arg(long)]
        temperature: Option<f64>
      , #[arg(long)]
        max_tokens: Option<usize>
      , #[arg(long)]
        system: Option<String>
      , /// Show the task's sample result when analysis fails
        #[arg(long)]
        fallback: bool
    }
  , /// Extract and normalize JSON from a saved completion
    Extract
    {   #[arg(long)]
        file: Option<PathBuf>
    }
}

fn init_logging(level: &str)
{   env_logger::Builder::from_env(
      env_logger::Env::default().default_filter_or(level)
    ).init();
}

fn read_input(file: Option<PathBuf>) -> medai::Result<String>
{   match file
    {   Some(path) => Ok(std::fs::read_to_string(path)?)
      , None => {
          let mut buf = String::new();
          std::io::stdin().read_to_string(&mut buf)?;
          Ok(buf)
        }
    }
}

fn print_json(value: &serde_json::Value) -> medai::Result<()>
{   let text = serde_json::to_string_pretty(value)
      .map_err(|e| medai::Error::Other(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>>
{   let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command
    {   Commands::Analyze {
          task, text, file, output, model,
          temperature, max_tokens, system, fallback
        } => {
          let config = match cli.config
          {   Some(path) => ClientConfig::from_file(path)?
            , None => ClientConfig::from_env()
          };
          config.validate()?;

          let patient_text = match (text, file)
          {   (Some(text), _) => text
            , (None, Some(path)) => std::fs::read_to_string(path)?
            , (None, None) => {
                warn!("No patient text given, using sample patient");
                String::new()
              }
          };

          let options = RequestOptions
          {   system_message: system
            , model
            , temperature
            , max_tokens
          };
          let request = task.request(&patient_text, &options);

          let backend = MedaiBackend::new(config);
          let mut reply_rx = backend.analyze(request).await?;
          let outcome = reply_rx.recv().await
            .unwrap_or_else(|| Err(medai::Error::Other(
              "Backend disconnected".to_string()
            )));
          backend.shutdown().await?;

          let result = match (outcome, fallback, task.sample_result())
          {   (Ok(value), _, _) => value
            , (Err(e), true, Some(sample)) => {
                error!("Analysis failed: {}", e);
                warn!("Using sample {} result", task);
                sample
              }
            , (Err(e), _, _) => return Err(e.into())
          };

          print_json(&result)?;
          if let Some(requested) = output
          {   let path = task.export_path(requested);
              medai::pipeline::export_pretty(&result, &path)?;
          }
          info!("Analysis complete");
        }
      , Commands::Extract { file } => {
          let raw = read_input(file)?;
          let value = medai::pipeline::normalize_completion(&raw)?;
          print_json(&value)?;
        }
    }

    Ok(())
}
