//! Table CLI commands.

use clap::{Parser, Subcommand};

/// Table management commands.
#[derive(Debug, Parser)]
pub struct TablesCommand {
    #[command(subcommand)]
    pub action: TablesAction,
}

/// Available table actions.
#[derive(Debug, Subcommand)]
pub enum TablesAction {
    /// List table names.
    List,
    /// Create a movies table (Year partition key, Title sort key).
    Create {
        /// Table name.
        name: String,
        /// Return as soon as the table is requested, without waiting for it
        /// to become active.
        #[arg(long)]
        no_wait: bool,
    },
    /// Delete a table and all of its items.
    Delete {
        /// Table name.
        name: String,
        /// Return as soon as the deletion is requested, without waiting for
        /// the table to disappear.
        #[arg(long)]
        no_wait: bool,
    },
}
