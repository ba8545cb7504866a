use clap::{ArgAction, Parser, Subcommand};
use nordic_processor::Mode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nordic-extract")]
#[command(about = "Extract the Nordic headword database as one XML document")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: nordic-extract.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Write the headword document to stdout")]
    Extract {
        /// Database to read; it is snapshotted, never modified
        #[arg(long)]
        filename: Option<PathBuf>,

        #[arg(long)]
        mode: Option<Mode>,

        /// Alphabet table, one letter per line
        #[arg(long)]
        alphabet: Option<PathBuf>,
    },

    #[command(about = "Export the narrative documents as HTML files")]
    Docs {
        #[arg(long)]
        filename: Option<PathBuf>,

        /// Prefix of the written files, `<prefix><id>.html`
        #[arg(long)]
        output_prefix: Option<String>,
    },

    #[command(about = "Sort lines from stdin by headword order")]
    Collate {
        #[arg(long)]
        alphabet: Option<PathBuf>,
    },
}
