use std::fs::{OpenOptions, create_dir_all};

use anyhow::{Context, Result};
use clap::Parser;
use quill_types::InputKind;
use quill_util::{AppConfig, data_path};
use tracing::info;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Overrides where the log file is written.
const LOG_PATH_ENV: &str = "QUILL_LOG_PATH";
const LOG_FILE_NAME: &str = "quill.log";

/// Edit a list of tags in the terminal, with live suggestions.
///
/// The final tag list is printed to stdout as a JSON array on exit.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about)]
struct Args {
    /// Initial tag; repeat to seed several
    #[arg(long = "tag", value_name = "TAG")]
    tags: Vec<String>,

    /// Hint shown while the field is empty
    #[arg(long)]
    placeholder: Option<String>,

    /// Never show the suggestion overlay
    #[arg(long)]
    no_autocomplete: bool,

    /// Base URL of the suggestion service (overrides API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Offline suggestion; repeat to offer several
    #[arg(long = "suggestion", value_name = "TEXT")]
    suggestions: Vec<String>,

    /// Field kind: text, search, email, url, number or password
    #[arg(long, value_name = "KIND")]
    kind: Option<InputKind>,
}

impl Args {
    /// CLI flags take priority over the file and the environment.
    fn apply_to(&self, config: &mut AppConfig) {
        if let Some(placeholder) = &self.placeholder {
            config.placeholder = placeholder.clone();
        }
        if self.no_autocomplete {
            config.auto_complete = false;
        }
        if let Some(api_url) = &self.api_url {
            config.api_url = Some(api_url.clone());
        }
        if let Some(kind) = self.kind {
            config.input_kind = kind;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    // Dropping the guard flushes buffered log lines.
    let _log_guard = init_tracing()?;

    let mut config = AppConfig::load().context("load configuration")?;
    args.apply_to(&mut config);
    info!(?config, "starting tag editor");

    let Args { tags, suggestions, .. } = args;
    let tags = quill_tui::run(config, tags, suggestions).await?;
    println!("{}", serde_json::to_string(&tags)?);
    Ok(())
}

/// The TUI owns the terminal, so logs go to a file.
fn init_tracing() -> Result<WorkerGuard> {
    let path = data_path(LOG_PATH_ENV, LOG_FILE_NAME);
    if let Some(parent) = path.parent() {
        create_dir_all(parent).with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let mut file_options = OpenOptions::new();
    file_options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        file_options.mode(0o600);
    }
    let file = file_options
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let (writer, guard) = non_blocking(file);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init();
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "quill",
            "--tag",
            "veg",
            "--tag",
            "fruit",
            "--no-autocomplete",
            "--api-url",
            "http://localhost:8080",
            "--kind",
            "search",
        ]);
        assert_eq!(args.tags, ["veg", "fruit"]);

        let mut config = AppConfig::default();
        args.apply_to(&mut config);
        assert!(!config.auto_complete);
        assert_eq!(config.api_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(config.input_kind, InputKind::Search);
        assert_eq!(config.placeholder, "");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(Args::try_parse_from(["quill", "--kind", "color"]).is_err());
    }
}
