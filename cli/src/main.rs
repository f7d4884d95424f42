use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use resources_sql_core::{
    ConvertError, GeneratorConfig, convert, default_input_path, default_output_path, read_input,
    write_output,
};
use tracing_subscriber::EnvFilter;

/// Environment variable naming an optional YAML config file.
const CONFIG_ENV: &str = "RESOURCES_SQL_CONFIG";

#[derive(Debug, Parser)]
#[command(name = "resources-sql")]
#[command(about = "Generate an SQL INSERT script from a team resources CSV export")]
#[command(version)]
struct Cli {
    /// CSV export to convert (default: ~/Downloads/Team Resources-Grid view.csv).
    input: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

fn load_config() -> Result<GeneratorConfig, ConvertError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => {
            let path = PathBuf::from(path);
            tracing::debug!(path = %path.display(), "loading config");
            GeneratorConfig::load(&path)
        }
        _ => Ok(GeneratorConfig::default()),
    }
}

fn run(cli: Cli) -> Result<(), ConvertError> {
    let config = load_config()?;
    let input = cli.input.unwrap_or_else(default_input_path);
    let content = read_input(&input)?;

    let conversion = convert(&content, &config);
    eprintln!("Found {} resources to process", conversion.records_found);

    let output = match &config.output {
        Some(path) => path.clone(),
        None => default_output_path()?,
    };
    write_output(&output, &conversion.sql)?;

    eprintln!("SQL file generated: {}", output.display());
    eprintln!("Total records: {}", conversion.rows_written);
    Ok(())
}
