//! CLI command definitions.

pub mod movies;
pub mod tables;

use clap::{Parser, Subcommand, ValueEnum};

/// Manage a DynamoDB movies table.
#[derive(Debug, Parser)]
#[command(name = "moviedb")]
#[command(version, about = "Manage a DynamoDB movies table", long_about = None)]
pub struct Cli {
    /// Table that movie commands operate on.
    #[arg(long, short, env = "MOVIEDB_TABLE", default_value = "Movies")]
    pub table: String,

    /// Custom DynamoDB endpoint (for local DynamoDB).
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// AWS region.
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Output format.
    #[arg(long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output with colors.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Table management.
    Tables(tables::TablesCommand),
    /// Movie items in the selected table.
    Movies(movies::MoviesCommand),
}
