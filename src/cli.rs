use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::ApiKey;
use crate::dashboard::Dashboard;
use crate::providers::gemini::{GeminiAnalyzer, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::render::export;
use crate::server::{self, AppState};

#[derive(Parser)]
#[command(name = "reviewdash")]
#[command(author, version, about = "AI project review dashboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Generative language API key
    #[arg(long, global = true, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model used for analysis
    #[arg(long, global = true, env = "REVIEWDASH_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the generative language API
    #[arg(long, global = true, env = "REVIEWDASH_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the interactive dashboard
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "REVIEWDASH_BIND", default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },

    /// Analyze one review file and write the report
    Analyze {
        /// Review document (.txt or .md)
        file: PathBuf,

        /// Directory the HTML report is written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Print the raw report JSON to stdout instead of writing HTML
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Pretty print JSON output
        #[arg(short, long, default_value_t = false)]
        pretty: bool,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        let analyzer = self.analyzer()?;

        match &self.command {
            Commands::Serve { bind } => {
                let state = Arc::new(AppState::new(Arc::new(analyzer)));
                server::serve(*bind, state).await?;
                Ok(())
            }
            Commands::Analyze {
                file,
                out_dir,
                json,
                pretty,
            } => {
                info!("Analyzing review file: {}", file.display());

                let filename = file
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let mut dashboard = Dashboard::new();
                dashboard.select_file(&filename, std::fs::read_to_string(file))?;
                dashboard.analyze_with(&analyzer).await?;

                if *json {
                    let value = dashboard.report().map(|report| report.as_value());
                    let json_output = if *pretty {
                        serde_json::to_string_pretty(&value)?
                    } else {
                        serde_json::to_string(&value)?
                    };
                    println!("{}", json_output);
                    return Ok(());
                }

                let artifact = export::export(dashboard.report())?;
                let path = artifact
                    .save(out_dir)
                    .with_context(|| format!("Failed to write report into {}", out_dir.display()))?;
                info!("Report written to: {}", path.display());

                Ok(())
            }
        }
    }

    fn analyzer(&self) -> Result<GeminiAnalyzer> {
        let api_key = ApiKey::new(self.api_key.as_deref().unwrap_or_default())?;

        let analyzer = GeminiAnalyzer::new(GeminiConfig {
            api_key,
            model: self.model.clone(),
            base_url: self.api_url.clone(),
        })?;
        Ok(analyzer)
    }
}
