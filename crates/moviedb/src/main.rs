//! moviedb CLI entry point.

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moviedb::cli::movies::MoviesAction;
use moviedb::cli::tables::TablesAction;
use moviedb::cli::{Cli, Commands, OutputFormat};
use moviedb::output::colors::{aeprintln, aprintln, green, red};
use moviedb::output::{format_output, pretty};
use moviedb::storage::dynamodb::{AwsConfig, DynamoDbStore};
use moviedb::MovieCatalog;
use moviedb_core::movie::{Movie, MovieInfo, MovieKey};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        aeprintln!("{} {:#}", red("error:"), err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moviedb=info,moviedb_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AwsConfig {
        endpoint_url: cli.endpoint_url.clone(),
        region: cli.region.clone(),
    };
    tracing::debug!(target_env = %config.target_display(), "Using DynamoDB");

    match cli.command {
        Commands::Tables(tables_cmd) => {
            let no_wait = matches!(
                tables_cmd.action,
                TablesAction::Create { no_wait: true, .. }
                    | TablesAction::Delete { no_wait: true, .. }
            );
            let store = DynamoDbStore::from_config(&config)
                .await
                .with_table_waits(!no_wait);
            let catalog = MovieCatalog::new(store);

            match tables_cmd.action {
                TablesAction::List => {
                    let tables = catalog.list_tables().await?;
                    match cli.format {
                        OutputFormat::Json => aprintln!("{}", format_output(&tables, cli.format)),
                        OutputFormat::Pretty => aprintln!("{}", pretty::format_tables(&tables)),
                    }
                }
                TablesAction::Create { name, .. } => {
                    catalog.create_table(&name).await?;
                    if !cli.quiet {
                        aprintln!("{} table {}", green("Created"), name);
                    }
                }
                TablesAction::Delete { name, .. } => {
                    catalog.delete_table(&name).await?;
                    if !cli.quiet {
                        aprintln!("{} table {}", green("Deleted"), name);
                    }
                }
            }
        }
        Commands::Movies(movies_cmd) => {
            let catalog = MovieCatalog::new(DynamoDbStore::from_config(&config).await);
            let table = cli.table.as_str();

            match movies_cmd.action {
                MoviesAction::Put { year, title } => {
                    let movie = Movie::new(year, title);
                    catalog.put_movie(table, &movie).await?;
                    if !cli.quiet {
                        aprintln!("{} {}", green("Inserted"), pretty::format_movie(&movie));
                    }
                }
                MoviesAction::Update {
                    year,
                    title,
                    plot,
                    rank,
                    strict,
                } => {
                    let key = MovieKey::new(year, title);
                    let patch = MovieInfo { plot, rank };
                    if strict {
                        catalog.update_existing_movie(table, &key, &patch).await?;
                    } else {
                        catalog.update_movie(table, &key, &patch).await?;
                    }
                    if !cli.quiet {
                        aprintln!("{} {}", green("Updated"), key);
                    }
                }
                MoviesAction::Get { year, title } => {
                    let key = MovieKey::new(year, title);
                    match catalog.get_movie(table, &key).await? {
                        Some(details) => match cli.format {
                            OutputFormat::Json => {
                                aprintln!("{}", format_output(&details, cli.format))
                            }
                            OutputFormat::Pretty => {
                                aprintln!("{}", pretty::format_details(&details))
                            }
                        },
                        None => anyhow::bail!("Movie not found: {}", key),
                    }
                }
                MoviesAction::Delete { year, title } => {
                    let key = MovieKey::new(year, title);
                    catalog.delete_movie(table, &key).await?;
                    if !cli.quiet {
                        aprintln!("{} {}", green("Deleted"), key);
                    }
                }
                MoviesAction::Query { year } => {
                    let movies = catalog.query_by_year(table, year).await?;
                    match cli.format {
                        OutputFormat::Json => aprintln!("{}", format_output(&movies, cli.format)),
                        OutputFormat::Pretty => aprintln!("{}", pretty::format_movies(&movies)),
                    }
                }
                MoviesAction::Scan { low, high } => {
                    let movies = catalog.scan_by_year_range(table, low, high).await?;
                    match cli.format {
                        OutputFormat::Json => aprintln!("{}", format_output(&movies, cli.format)),
                        OutputFormat::Pretty => aprintln!("{}", pretty::format_movies(&movies)),
                    }
                }
                MoviesAction::List => {
                    let movies = catalog.list_movies(table).await?;
                    match cli.format {
                        OutputFormat::Json => aprintln!("{}", format_output(&movies, cli.format)),
                        OutputFormat::Pretty => aprintln!("{}", pretty::format_movies(&movies)),
                    }
                }
                MoviesAction::Load { path } => {
                    let contents = fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    let movies: Vec<Movie> = serde_json::from_str(&contents)
                        .with_context(|| format!("Failed to parse {}", path.display()))?;
                    tracing::info!(path = %path.display(), records = movies.len(), "Loading movies");

                    let count = catalog.batch_insert(table, movies).await?;
                    if !cli.quiet {
                        aprintln!("{} {} movies into {}", green("Loaded"), count, table);
                    }
                }
            }
        }
    }

    Ok(())
}
