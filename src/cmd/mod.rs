mod graph;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

pub use graph::GraphOptions;

#[derive(Parser)]
#[command(name = "schema-erd")]
#[command(version)]
#[command(about = "Render SQLite and DuckDB schemas as entity-relationship diagrams", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an ERD from a database file
    Graph {
        /// SQLite or DuckDB database file
        db: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: mermaid, json, dot (default: from output extension, else mermaid)
        #[arg(short, long)]
        format: Option<String>,

        /// Only include specific tables (comma-separated)
        #[arg(short, long, alias = "schema")]
        tables: Option<String>,

        /// Exclude tables matching glob patterns (comma-separated)
        #[arg(short, long)]
        exclude: Option<String>,

        /// Guess undeclared relationships from `<name>_id` columns
        #[arg(short, long)]
        guess: bool,

        /// Also try inflected plural/singular table names when guessing
        #[arg(long, requires = "guess")]
        inflect: bool,

        /// Layout direction for DOT output: lr, tb
        #[arg(long)]
        layout: Option<String>,

        /// Database engine: sqlite, duckdb (auto-detected if not specified)
        #[arg(long)]
        engine: Option<String>,

        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Suppress status messages on stderr
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the JSON Schema of the JSON output format
    Schema,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Graph {
            db,
            output,
            format,
            tables,
            exclude,
            guess,
            inflect,
            layout,
            engine,
            config,
            quiet,
        } => graph::run(GraphOptions {
            db,
            output,
            format,
            tables,
            exclude,
            guess,
            inflect,
            layout,
            engine,
            config,
            quiet,
        }),
        Commands::Schema => {
            println!("{}", crate::json_schema::erd_schema_string());
            Ok(())
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "schema-erd", &mut io::stdout());
            Ok(())
        }
    }
}
