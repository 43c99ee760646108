//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::adapters::csv_adapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config::ExplorerConfig;
use crate::domain::dataset::Session;
use crate::domain::error::ExplorerError;
use crate::domain::options::derive_options;
use crate::domain::predicate::filter_records;
use crate::domain::selection::{DateFilter, FilterSelection};
use crate::ports::config_port::ConfigPort;
use crate::ports::record_store::RecordStore;

#[derive(Parser, Debug)]
#[command(name = "stockexplorer", about = "Browse and filter stock trade records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Filter the full dataset and write matching rows as CSV
    Query {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, requires = "year")]
        month: Option<u32>,
        #[arg(long, requires = "month")]
        day: Option<u32>,
        #[arg(long = "client")]
        clients: Vec<String>,
        #[arg(long = "security")]
        securities: Vec<String>,
        #[arg(long)]
        buy_sell: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the filter options available for a date selection
    Options {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, requires = "year")]
        month: Option<u32>,
    },
    /// Seed the SQLite store from a CSV file
    Import {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        csv: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Serve { config } => run_serve(&config),
        Command::Query {
            config,
            year,
            month,
            day,
            clients,
            securities,
            buy_sell,
            kind,
            output,
        } => {
            let selection = FilterSelection {
                date: DateFilter::from_parts(year, month, day),
                client_names: clients.into_iter().collect(),
                security_names: securities.into_iter().collect(),
                buy_sell,
                kind,
            };
            run_query(&config, &selection, output.as_ref())
        }
        Command::Options {
            config,
            year,
            month,
        } => run_options(&config, DateFilter::from_parts(year, month, None)),
        Command::Import { config, csv } => run_import(&config, &csv),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExplorerError> {
    eprintln!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

/// Picks the store backend: PostgreSQL when a connection string is
/// configured and the feature is built, SQLite otherwise.
pub fn open_store(
    config: &dyn ConfigPort,
) -> Result<Arc<dyn RecordStore + Send + Sync>, ExplorerError> {
    #[cfg(feature = "postgres")]
    {
        if config.get_string("postgres", "connection_string").is_some()
            || config.get_string("database", "conninfo").is_some()
        {
            let adapter = crate::adapters::postgres_adapter::PostgresAdapter::from_config(config)?;
            return Ok(Arc::new(adapter));
        }
    }

    #[cfg(feature = "sqlite")]
    {
        let adapter = crate::adapters::sqlite_adapter::SqliteAdapter::from_config(config)?;
        Ok(Arc::new(adapter))
    }

    #[cfg(not(feature = "sqlite"))]
    {
        Err(ExplorerError::ConfigMissing {
            section: "postgres".into(),
            key: "connection_string".into(),
        })
    }
}

pub fn load_session(config_path: &PathBuf) -> Result<(ExplorerConfig, Session), ExplorerError> {
    let adapter = load_config(config_path)?;
    let config = ExplorerConfig::from_config(&adapter)?;
    let store = open_store(&adapter)?;
    let session = Session::load(store.as_ref(), &config.normalizer(), config.preview_limit)?;
    Ok((config, session))
}

pub fn run_query(
    config_path: &PathBuf,
    selection: &FilterSelection,
    output: Option<&PathBuf>,
) -> Result<(), ExplorerError> {
    let (_, session) = load_session(config_path)?;
    let rows = filter_records(&session.full, selection);
    if rows.is_empty() {
        return Err(ExplorerError::NoData);
    }

    match output {
        Some(path) => {
            let file = File::create(path)?;
            csv_adapter::write_records(file, &session.full.columns, rows.iter().copied())?;
            eprintln!("Wrote {} rows to {}", rows.len(), path.display());
        }
        None => {
            let stdout = io::stdout().lock();
            csv_adapter::write_records(stdout, &session.full.columns, rows.iter().copied())?;
            eprintln!("{} rows", rows.len());
        }
    }
    Ok(())
}

pub fn run_options(config_path: &PathBuf, date: DateFilter) -> Result<(), ExplorerError> {
    let (_, session) = load_session(config_path)?;
    let selection = FilterSelection {
        date,
        ..Default::default()
    };
    let options = derive_options(&session.full, &selection);

    print_list("year", &options.year_labels());
    if selection.date.year().is_some() {
        print_list("month", &options.month_labels());
    }
    if selection.date.month().is_some() {
        print_list("day", &options.day_labels());
    }
    print_list("client_name", &options.client_names);
    print_list("security_name", &options.security_names);
    print_list("buy_sell", &options.buy_sell);
    print_list("type", &options.kinds);
    Ok(())
}

fn print_list(name: &str, values: &[String]) {
    println!("{name}: {}", values.join(", "));
}

pub fn run_import(config_path: &PathBuf, csv_path: &PathBuf) -> Result<(), ExplorerError> {
    #[cfg(feature = "sqlite")]
    {
        use crate::adapters::sqlite_adapter::SqliteAdapter;

        let adapter = load_config(config_path)?;
        let store = SqliteAdapter::from_config(&adapter)?;

        eprintln!("Reading {}", csv_path.display());
        let (headers, records) = csv_adapter::read_raw_records(File::open(csv_path)?)?;
        store.initialize_schema(&headers)?;
        let count = store.insert_records(&records)?;
        eprintln!("Imported {count} records");
        Ok(())
    }

    #[cfg(not(feature = "sqlite"))]
    {
        let _ = (config_path, csv_path);
        Err(ExplorerError::ConfigMissing {
            section: "sqlite".into(),
            key: "path".into(),
        })
    }
}

fn run_serve(config_path: &PathBuf) -> Result<(), ExplorerError> {
    #[cfg(any(feature = "web-sqlite", feature = "web-postgres"))]
    {
        use crate::adapters::web::{AppState, serve};

        let adapter = load_config(config_path)?;
        let config = ExplorerConfig::from_config(&adapter)?;
        let store = open_store(&adapter)?;
        let state = AppState::load(store, config)?;

        eprintln!("Starting web server on {}", state.config.listen);
        tokio::runtime::Runtime::new()?.block_on(serve(state))
    }

    #[cfg(not(any(feature = "web-sqlite", feature = "web-postgres")))]
    {
        let _ = config_path;
        Err(ExplorerError::ConfigMissing {
            section: "web".into(),
            key: "listen".into(),
        })
    }
}
