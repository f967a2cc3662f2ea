//! Graph command implementation for ERD generation.

use crate::config::ErdYamlConfig;
use crate::graph::{to_dot, to_json, to_mermaid, ErdView, Layout, OutputFormat};
use crate::introspect::{open_provider, Engine};
use crate::relations::{GuessStrategy, Origin};
use crate::schema::{parse_table_list, Schema, TableFilter};
use anyhow::{anyhow, bail, Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Graph command options
pub struct GraphOptions {
    pub db: PathBuf,
    pub output: Option<PathBuf>,
    pub format: Option<String>,
    pub tables: Option<String>,
    pub exclude: Option<String>,
    pub guess: bool,
    pub inflect: bool,
    pub layout: Option<String>,
    pub engine: Option<String>,
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

/// Settings after merging the config file with command-line flags
#[derive(Debug, Clone, PartialEq)]
struct ResolvedSettings {
    tables: Option<Vec<String>>,
    exclude: Vec<String>,
    guess: Option<GuessStrategy>,
    format: OutputFormat,
    layout: Layout,
    engine: Option<Engine>,
}

fn resolve_settings(opts: &GraphOptions, config: &ErdYamlConfig) -> Result<ResolvedSettings> {
    // An empty flag value lifts the allow-list; "," still selects nothing
    let tables = match opts.tables {
        Some(ref list) if list.trim().is_empty() => None,
        Some(ref list) => Some(parse_table_list(list)),
        None => config.tables.clone(),
    };

    let exclude = match opts.exclude {
        Some(ref list) => parse_table_list(list),
        None => config.exclude.clone(),
    };

    let guess = if opts.guess || config.guess {
        if opts.inflect || config.inflect {
            Some(GuessStrategy::Inflected)
        } else {
            Some(GuessStrategy::Simple)
        }
    } else {
        None
    };

    let config_path = opts.config.as_deref();

    let format = match parse_setting::<OutputFormat>(
        opts.format.as_deref(),
        config.format.as_deref(),
        config_path,
    )? {
        Some(format) => format,
        None => opts
            .output
            .as_ref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .and_then(OutputFormat::from_extension)
            .unwrap_or_default(),
    };

    let layout = parse_setting::<Layout>(opts.layout.as_deref(), config.layout.as_deref(), config_path)?
        .unwrap_or_default();

    let engine = parse_setting::<Engine>(opts.engine.as_deref(), config.engine.as_deref(), config_path)?;

    Ok(ResolvedSettings {
        tables,
        exclude,
        guess,
        format,
        layout,
        engine,
    })
}

/// Parse a setting taken from the flag, else from the config file.
///
/// Errors in a configured value name the config file.
fn parse_setting<T>(
    flag: Option<&str>,
    configured: Option<&str>,
    config_path: Option<&Path>,
) -> Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    if let Some(value) = flag {
        return value.parse().map(Some).map_err(|e: String| anyhow!(e));
    }

    let Some(value) = configured else {
        return Ok(None);
    };
    let parsed: Result<T> = value.parse().map_err(|e: String| anyhow!(e));
    match config_path {
        Some(path) => parsed
            .map(Some)
            .with_context(|| format!("Invalid config file: {}", path.display())),
        None => parsed.map(Some),
    }
}

/// Run the graph command
pub fn run(opts: GraphOptions) -> Result<()> {
    let config = match opts.config {
        Some(ref path) => ErdYamlConfig::load(path)?,
        None => ErdYamlConfig::default(),
    };
    let settings = resolve_settings(&opts, &config)?;

    if !opts.db.exists() {
        bail!("database file does not exist: {}", opts.db.display());
    }

    let engine = match settings.engine {
        Some(e) => e,
        None => Engine::detect(&opts.db)?,
    };

    // stdout carries only the document; keep stderr quiet for piped JSON
    let status = !opts.quiet && !(settings.format == OutputFormat::Json && opts.output.is_none());

    if status {
        eprintln!("Generating ERD: {} [engine: {}]", opts.db.display(), engine);
    }

    let filter = TableFilter::new(
        settings.tables.clone(),
        TableFilter::compile_patterns(&settings.exclude)?,
    );

    let provider = open_provider(&opts.db, Some(engine))?;
    let schema = Schema::load(provider.as_ref(), &filter)?;

    if schema.is_empty() && status {
        eprintln!("No tables in scope.");
    }

    let view = ErdView::build(schema, settings.guess);

    let output_content = match settings.format {
        OutputFormat::Mermaid => to_mermaid(&view),
        OutputFormat::Json => {
            let mut json = to_json(&view);
            json.push('\n');
            json
        }
        OutputFormat::Dot => to_dot(&view, settings.layout),
    };

    write_output(&output_content, opts.output.as_deref())?;

    if status {
        if let Some(ref out_path) = opts.output {
            eprintln!("ERD written to: {}", out_path.display());
        }
        eprintln!(
            "\nERD: {} tables, {} columns, {} relationships ({} declared, {} guessed)",
            view.table_count(),
            view.column_count(),
            view.relationship_count(),
            view.count_by_origin(Origin::Declared),
            view.count_by_origin(Origin::Guessed)
        );
    }

    Ok(())
}

fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(content.as_bytes())?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
