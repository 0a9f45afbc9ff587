//! CLI argument definitions using clap.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::path::PathBuf;

use clap::Parser;
use mindmap_graph::ROOT_LABEL;

/// Mind map session runner
#[derive(Parser, Debug)]
#[command(name = "mindmap")]
#[command(version)]
#[command(about = "Edit an in-memory mind map from a command script and export it as JSON")]
#[command(
    long_about = "Reads one editor command per line (select, add, ai, delete, rename, connect, connector, line, style, paste, key, context, show, export) from a script or stdin, applies it to a single session and writes the final {nodes, edges} export."
)]
pub struct Cli {
    /// Suggestion client config file (JSON or TOML). Defaults to MINDMAP_AI_* variables
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Command script; reads stdin when omitted
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Write the final export here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Label of the initial topic
    #[arg(long, default_value = ROOT_LABEL)]
    pub root: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mindmap"]).unwrap();
        assert_eq!(cli.root, "Main Topic");
        assert!(cli.script.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_flags() {
        let cli =
            Cli::try_parse_from(["mindmap", "-s", "plan.txt", "-o", "out.json", "--root", "Trip"])
                .unwrap();
        assert_eq!(cli.script, Some(PathBuf::from("plan.txt")));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.root, "Trip");
    }
}
