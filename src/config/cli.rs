use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "tariff-sync")]
#[command(about = "Upload ERP products for tariff classification and write finalized tariff numbers back")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "tariff-sync.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create today's project, upload all products and poll once
    Run {
        #[command(flatten)]
        files: FileOverrides,

        /// Show the project and upload payloads without calling the API
        #[arg(long)]
        dry_run: bool,
    },
    /// Poll an existing project and write back finalized classifications
    Poll {
        /// Name of the project created by an earlier `run`
        #[arg(short, long)]
        project: String,

        #[command(flatten)]
        files: FileOverrides,
    },
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct FileOverrides {
    /// Override products.input_path
    #[arg(long)]
    pub products: Option<String>,

    /// Override products.output_path
    #[arg(long)]
    pub output: Option<String>,
}

impl Command {
    pub fn files(&self) -> &FileOverrides {
        match self {
            Command::Run { files, .. } | Command::Poll { files, .. } => files,
        }
    }
}
