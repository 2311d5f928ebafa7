//! Movie CLI commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Movie item commands.
#[derive(Debug, Parser)]
pub struct MoviesCommand {
    #[command(subcommand)]
    pub action: MoviesAction,
}

/// Available movie actions.
#[derive(Debug, Subcommand)]
pub enum MoviesAction {
    /// Insert a movie. Fails if it already exists.
    Put {
        /// Release year.
        year: i32,
        /// Movie title.
        title: String,
    },
    /// Set plot and/or rank on a movie.
    Update {
        /// Release year.
        year: i32,
        /// Movie title.
        title: String,
        /// New plot summary.
        #[arg(long)]
        plot: Option<String>,
        /// New rank.
        #[arg(long)]
        rank: Option<i64>,
        /// Fail instead of creating the movie when it does not exist.
        #[arg(long)]
        strict: bool,
    },
    /// Get a movie by year and title.
    Get {
        /// Release year.
        year: i32,
        /// Movie title.
        title: String,
    },
    /// Delete a movie by year and title.
    Delete {
        /// Release year.
        year: i32,
        /// Movie title.
        title: String,
    },
    /// List movies released in a year, ordered by title.
    Query {
        /// Release year.
        year: i32,
    },
    /// List movies released in a range of years (full table scan).
    Scan {
        /// First year, inclusive.
        low: i32,
        /// Last year, inclusive.
        high: i32,
    },
    /// List every movie in the table.
    List,
    /// Load movies from a JSON file (array of `{"year", "title", ...}`).
    Load {
        /// Path to the JSON file.
        path: PathBuf,
    },
}
