//! # mindmap - session runner
//!
//! 1. **Tracing** - `RUST_LOG` filter (default `info`) on stderr
//! 2. **Suggestion client** - from `--config` or `MINDMAP_AI_*` variables
//! 3. **Script** - one command per line from `--script` or stdin
//! 4. **Export** - final `{nodes, edges}` JSON to `--output` or stdout

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

mod cli;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use mindmap::script::run_script;
use mindmap::MindMapEditor;
use mindmap_suggest::{SuggestionClient, SuggestionConfig, strategy};

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let args = Cli::parse();

    let config = match &args.config {
        Some(path) => SuggestionConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SuggestionConfig::from_env(),
    };
    info!(endpoint = %config.api_url, strategy = %config.strategy, "Suggestion client configured");
    let client = Arc::new(
        SuggestionClient::with_config(config).context("Failed to create suggestion client")?,
    );
    let strategy = strategy::from_config(client);

    let mut editor = MindMapEditor::with_root(args.root.clone());

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
            format!("Failed to open script {}", path.display())
        })?)),
        None => Box::new(io::stdin().lock()),
    };

    let rejected = run_script(
        &mut editor,
        strategy.as_ref(),
        input,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
    .await
    .context("Session script failed")?;

    let json = editor.export_json().context("Failed to export session")?;
    match &args.output {
        Some(path) => std::fs::write(path, format!("{json}\n"))
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{json}"),
    }

    info!(
        nodes = editor.nodes().len(),
        edges = editor.edges().len(),
        rejected,
        "Session finished"
    );
    Ok(())
}

/// Initialize tracing subscriber.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
