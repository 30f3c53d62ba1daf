//! jrel CLI: a flag pipeline over JSON/CSV tables.
//!
//! Tables are read from files (or stdin), collected into a database, run
//! through the requested operators, and emitted as JSON, CSV, or a
//! schema-only description.

use std::error::Error;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use jrel_core::prelude::{Database, Table, TableSpec, Value};
use jrel_io::csv::{table_from_csv, table_to_csv};
use jrel_io::json::{database_from_reader, database_to_json, table_from_reader, table_to_json};

#[derive(Parser)]
#[command(name = "jrel")]
#[command(about = "Relational-algebra queries over JSON and CSV tables", long_about = None)]
struct Cli {
    /// Table file to read; repeatable, "-" reads stdin
    #[arg(short = 't', long = "table")]
    tables: Vec<PathBuf>,

    /// Database file to read; repeatable
    #[arg(short = 'd', long = "database")]
    databases: Vec<PathBuf>,

    /// Input tables are CSV instead of JSON
    #[arg(short = 'C', long = "input-csv")]
    input_csv: bool,

    /// The first CSV record is the column heading row
    #[arg(long = "input-has-columns")]
    input_has_columns: bool,

    /// Comma-separated column names for headerless CSV input
    #[arg(long = "input-column-names")]
    input_column_names: Option<String>,

    /// Comma-separated list of columns to project
    #[arg(short = 'p', long)]
    project: Option<String>,

    /// Remove duplicate rows
    #[arg(short = 'D', long)]
    distinct: bool,

    /// Comma-separated columns to summarize over ("" for a global count)
    #[arg(short = 's', long = "summarize-per")]
    summarize_per: Option<String>,

    /// Comma-separated sort keys; prefix a column with '-' for descending
    #[arg(short = 'O', long = "order-by")]
    order_by: Option<String>,

    /// Keep only the first N rows
    #[arg(short = 'l', long)]
    limit: Option<usize>,

    /// Replace the result with its row count
    #[arg(short = 'c', long)]
    count: bool,

    /// Output as CSV instead of JSON
    #[arg(long)]
    csv: bool,

    /// String written for null cells in CSV output
    #[arg(long, default_value = "")]
    null: String,

    /// Pretty-print JSON output
    #[arg(short = 'P', long)]
    pretty: bool,

    /// Print the schema only, without row data
    #[arg(long)]
    describe: bool,

    /// Extract the named table from the database
    #[arg(long)]
    extract: Option<String>,

    /// Emit the whole database instead of a single table
    #[arg(long)]
    combine: bool,

    /// Set the output object's name
    #[arg(long)]
    name: Option<String>,

    /// Set the output object's comment
    #[arg(long)]
    comment: Option<String>,

    /// Output file (default stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut db = Database::new();
    let mut current: Option<Table> = None;

    for path in &cli.databases {
        let loaded = read_database(path)?;
        if db.name().is_none() {
            db.set_name(loaded.name().map(str::to_string).or_else(|| file_stem(path)));
        }
        for (name, table) in loaded.iter() {
            db.insert(name, table.clone());
        }
    }

    for path in &cli.tables {
        let table = read_table(&cli, path)?;
        let name = table
            .name()
            .map(str::to_string)
            .or_else(|| file_stem(path))
            .unwrap_or_else(|| "stdin".to_string());
        db.insert(name, table.clone());
        current = Some(table);
    }

    if cli.tables.is_empty() && cli.databases.is_empty() {
        let table = read_table(&cli, Path::new("-"))?;
        db.insert("stdin", table.clone());
        current = Some(table);
    }

    if let Some(name) = &cli.extract {
        let table = db
            .get(name)
            .ok_or_else(|| format!("no table {:?} in the database", name))?;
        current = Some(table.clone());
    }

    let current = match current {
        Some(t) => Some(apply_pipeline(t, &cli)?),
        None => None,
    };

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    match current {
        Some(mut table) if !cli.combine => {
            if cli.name.is_some() {
                table = table.with_name(cli.name.clone());
            }
            if cli.comment.is_some() {
                table = table.with_comment(cli.comment.clone());
            }
            if cli.csv {
                table_to_csv(&mut out, &table, &cli.null)?;
            } else {
                let text = table_to_json(&table, cli.pretty, !cli.describe)?;
                writeln!(out, "{}", text)?;
            }
        }
        _ => {
            if cli.name.is_some() {
                db.set_name(cli.name.clone());
            }
            if cli.comment.is_some() {
                db.set_comment(cli.comment.clone());
            }
            let text = database_to_json(&db, cli.pretty, !cli.describe)?;
            writeln!(out, "{}", text)?;
        }
    }
    Ok(())
}

fn apply_pipeline(mut table: Table, cli: &Cli) -> Result<Table, jrel_core::error::Error> {
    if let Some(project) = &cli.project {
        let columns: Vec<&str> = project.split(',').collect();
        tracing::debug!(?columns, "project");
        table = table.project(&columns)?;
    }
    if cli.distinct {
        tracing::debug!("distinct");
        table = table.distinct()?;
    }
    if let Some(per) = &cli.summarize_per {
        let columns: Vec<&str> = if per.is_empty() {
            Vec::new()
        } else {
            per.split(',').collect()
        };
        tracing::debug!(?columns, "summarize");
        table = table.summarize(&columns)?;
    }
    if let Some(order) = &cli.order_by {
        let specs: Vec<&str> = order.split(',').collect();
        tracing::debug!(?specs, "order by");
        table = table.order_by(&specs)?;
    }
    if let Some(limit) = cli.limit {
        tracing::debug!(limit, "limit");
        table = table.limit(limit)?;
    }
    if cli.count {
        table = Table::build(TableSpec {
            columns: Some(vec!["count".to_string()]),
            rows: vec![vec![Value::Int(table.len() as i64)]],
            ..Default::default()
        })?;
    }
    Ok(table)
}

fn read_table(cli: &Cli, path: &Path) -> Result<Table, Box<dyn Error>> {
    let reader = open_input(path)?;
    let table = if cli.input_csv {
        let headings = cli
            .input_column_names
            .as_ref()
            .map(|names| names.split(',').map(|c| c.trim().to_string()).collect());
        table_from_csv(reader, cli.input_has_columns, headings)?
    } else {
        table_from_reader(reader)?
    };
    Ok(table)
}

fn read_database(path: &Path) -> Result<Database, Box<dyn Error>> {
    Ok(database_from_reader(open_input(path)?)?)
}

fn open_input(path: &Path) -> Result<Box<dyn Read>, io::Error> {
    if path == Path::new("-") {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(File::open(path)?))
    }
}

fn file_stem(path: &Path) -> Option<String> {
    if path == Path::new("-") {
        return None;
    }
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}
