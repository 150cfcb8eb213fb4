//! CLI argument definitions using clap

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::domain::Currency;

/// Split a bill into percentage shares and show the amount each person pays
#[derive(Parser, Debug)]
#[command(name = "billsplit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file (default: $XDG_CONFIG_HOME/billsplit/billsplit.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply edit steps to a split and print the result
    Split {
        #[command(flatten)]
        start: StartArgs,

        /// Edit steps, e.g. "set 1 70" add "currency EUR"
        steps: Vec<String>,
    },

    /// Edit a split line by line (stdin or script)
    Session {
        #[command(flatten)]
        start: StartArgs,

        /// Script with one command per line (default: stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        script: Option<PathBuf>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Starting values, overriding config and environment.
#[derive(Args, Debug, Default, Clone)]
pub struct StartArgs {
    /// Bill total
    #[arg(short, long)]
    pub total: Option<f64>,

    /// Number of people (equal split)
    #[arg(short = 'n', long)]
    pub people: Option<NonZeroUsize>,

    /// Display currency (USD, EUR, CAD)
    #[arg(short, long)]
    pub currency: Option<Currency>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config path
    Path,
}
