//! CLI command definitions for the `gaucho` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod opener;
pub mod prompt;
pub mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::state::BackendOverrides;

/// Generate and evaluate GauchoChat conversation openers.
#[derive(Parser)]
#[command(name = "gaucho", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans to stdout as OpenTelemetry traces.
    #[arg(long, global = true, env = "GAUCHO_OTEL_STDOUT")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a conversation opener for a saved conversation state.
    Opener(OpenerArgs),

    /// Print the prompt that would be sent, without calling the backend.
    Prompt {
        #[command(flatten)]
        conversation: ConversationArgs,
    },

    /// Convert an opener evaluation log into an HTML report.
    Report {
        /// Newline-delimited JSON log to read.
        input: PathBuf,

        /// HTML file to write.
        output: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Which conversation to build a prompt for.
#[derive(Args, Debug, Clone)]
pub struct ConversationArgs {
    /// JSON conversation state (`{"history": [...], "user_attributes": {...}}`).
    #[arg(long)]
    pub state: PathBuf,

    /// Continue the last assistant message instead of starting a new one.
    #[arg(long = "continue")]
    pub continued: bool,
}

#[derive(Args, Debug, Clone)]
pub struct OpenerArgs {
    #[command(flatten)]
    pub conversation: ConversationArgs,

    /// Controller address (overrides config.toml).
    #[arg(long)]
    pub controller: Option<String>,

    /// Worker address; skips the controller lookup.
    #[arg(long)]
    pub worker: Option<String>,

    /// Model name.
    #[arg(long)]
    pub model: Option<String>,

    /// Maximum number of generated tokens.
    #[arg(long)]
    pub max_new_tokens: Option<u32>,

    /// Seed for the fallback opener choice.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl OpenerArgs {
    pub fn overrides(&self) -> BackendOverrides {
        BackendOverrides {
            controller: self.controller.clone(),
            worker: self.worker.clone(),
            model: self.model.clone(),
            max_new_tokens: self.max_new_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_opener_with_overrides() {
        let cli = Cli::try_parse_from([
            "gaucho",
            "opener",
            "--state",
            "state.json",
            "--continue",
            "--worker",
            "http://localhost:21002",
            "--max-new-tokens",
            "32",
            "--seed",
            "7",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Opener(args) => {
                assert_eq!(args.conversation.state, PathBuf::from("state.json"));
                assert!(args.conversation.continued);
                assert_eq!(args.seed, Some(7));
                let overrides = args.overrides();
                assert_eq!(overrides.worker.as_deref(), Some("http://localhost:21002"));
                assert_eq!(overrides.max_new_tokens, Some(32));
                assert_eq!(overrides.controller, None);
            }
            _ => panic!("expected opener command"),
        }
    }

    #[test]
    fn parse_report() {
        let cli = Cli::try_parse_from(["gaucho", "-vv", "report", "in.log", "out.html"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Report { input, output } => {
                assert_eq!(input, PathBuf::from("in.log"));
                assert_eq!(output, PathBuf::from("out.html"));
            }
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn opener_requires_state() {
        assert!(Cli::try_parse_from(["gaucho", "opener"]).is_err());
    }
}
