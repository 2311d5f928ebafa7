//! Pretty output formatting.

use moviedb_core::movie::{Decoded, Movie, MovieDetails};

use super::colors::{blue, cyan, yellow};

/// Format a movie for display.
pub fn format_movie(movie: &Movie) -> String {
    format!("{} ({})", cyan(&movie.title), movie.year)
}

/// Format a movie with its optional attributes.
pub fn format_details(details: &MovieDetails) -> String {
    let mut output = format_movie(&details.movie);
    if let Some(rank) = details.info.rank {
        output.push_str(&format!("\n  Rank: {}", rank));
    }
    if let Some(plot) = &details.info.plot {
        output.push_str(&format!("\n  Plot: {}", plot));
    }
    output
}

/// Format a decoded result set, noting dropped items and truncation.
pub fn format_movies(movies: &Decoded<Movie>) -> String {
    if movies.is_empty() && movies.is_complete() {
        return "No movies found.".to_string();
    }
    let mut output = format!("MOVIES ({})\n", movies.len());
    output.push_str(&"-".repeat(40));
    for movie in &movies.records {
        output.push_str(&format!("\n{}", format_movie(movie)));
    }
    for fault in &movies.faults {
        output.push_str(&format!("\n{}", yellow(&format!("skipped: {}", fault))));
    }
    if movies.truncated {
        output.push_str(&format!(
            "\n{}",
            yellow("more items exist beyond the first page")
        ));
    }
    output
}

/// Format table names for display.
pub fn format_tables(tables: &[String]) -> String {
    if tables.is_empty() {
        return "No tables found.".to_string();
    }
    let mut output = format!("TABLES ({})\n", tables.len());
    output.push_str(&"-".repeat(40));
    for table in tables {
        output.push_str(&format!("\n{}", blue(table)));
    }
    output
}
