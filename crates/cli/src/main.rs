// brewmap CLI - look up brewery coordinates for a CSV name column

mod console;
mod exit_codes;
mod interrupt;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use brewmap_config::Settings;
use brewmap_pipeline::client::DEFAULT_ENDPOINT;
use brewmap_pipeline::engine::write_to;
use brewmap_pipeline::{CancelToken, LookupClient, Pipeline, PipelineError};

use console::ConsoleReporter;
use exit_codes::{pipeline_exit_code, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

const DEFAULT_NAME_COLUMN: usize = 2;
const DEFAULT_OUTPUT_NAME: &str = "results.csv";

#[derive(Parser)]
#[command(name = "brewmap")]
#[command(about = "Resolve brewery names in a CSV column to latitude/longitude")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Examples:
  brewmap -k 0123abcd -f breweries.csv
  brewmap -k 0123abcd -f breweries.csv -c 3 -o coords.csv
  brewmap -f breweries.csv -o - --quiet > coords.csv
  BREWMAP_API_KEY=0123abcd brewmap -f breweries.csv --json")]
struct Cli {
    /// Lookup service API key (default: BREWMAP_API_KEY env, then settings file)
    #[arg(long, short = 'k', env = "BREWMAP_API_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Input CSV file; the first line is a header
    #[arg(long, short = 'f')]
    file: PathBuf,

    /// Output file, or - for stdout (default: results.csv next to the input)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// 1-based column holding the brewery names (default: 2)
    #[arg(long, short = 'c')]
    column: Option<usize>,

    /// Lookup service base URL
    #[arg(long, env = "BREWMAP_ENDPOINT")]
    endpoint: Option<String>,

    /// Suppress progress on stdout
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Print a JSON run summary to stdout when done
    #[arg(long)]
    json: bool,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Create error from pipeline error with proper exit code.
    pub fn pipeline(err: PipelineError) -> Self {
        let code = pipeline_exit_code(&err);
        let (message, hint) = match &err {
            PipelineError::Cancelled => ("interrupted, no results written".to_string(), None),
            PipelineError::InvalidEndpoint(_) => (
                err.to_string(),
                Some("check --endpoint, BREWMAP_ENDPOINT, or lookup.endpoint in settings".to_string()),
            ),
            _ => (err.to_string(), None),
        };
        Self { code, message, hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ── Option resolution ───────────────────────────────────────────────

/// API key: flag or env (clap handles both) > settings file > error.
fn resolve_api_key(flag: Option<String>, settings: &Settings) -> Result<String, CliError> {
    let candidates = [flag, settings.api_key.clone()];
    candidates
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or_else(|| {
            CliError::args("no API key was provided").with_hint(format!(
                "use -k/--key, set BREWMAP_API_KEY, or add lookup.apiKey to {}",
                Settings::config_path_display(),
            ))
        })
}

/// 1-based column number (flag > settings > default) to a zero-based index.
fn resolve_name_column(flag: Option<usize>, settings: &Settings) -> Result<usize, CliError> {
    let column = flag.or(settings.name_column).unwrap_or(DEFAULT_NAME_COLUMN);
    if column == 0 {
        return Err(CliError::args("column numbers start at 1"));
    }
    Ok(column - 1)
}

#[derive(Debug, PartialEq)]
enum OutputTarget {
    File(PathBuf),
    Stdout,
}

fn resolve_output(input: &Path, flag: Option<PathBuf>) -> OutputTarget {
    match flag {
        Some(path) if path.as_os_str() == "-" => OutputTarget::Stdout,
        Some(path) => OutputTarget::File(path),
        None => OutputTarget::File(
            input
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(DEFAULT_OUTPUT_NAME),
        ),
    }
}

// ── Run ─────────────────────────────────────────────────────────────

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load();

    let key = resolve_api_key(cli.key, &settings)?;

    let input = cli.file;
    if !input.is_file() {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| input.display().to_string());
        return Err(CliError::args(format!("the file {} was not found", name)));
    }

    let name_column = resolve_name_column(cli.column, &settings)?;
    let output = resolve_output(&input, cli.output);
    if cli.json && output == OutputTarget::Stdout {
        return Err(CliError::args("--json cannot be combined with --output -"));
    }

    let endpoint = cli
        .endpoint
        .or(settings.endpoint)
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let cancel = CancelToken::new();
    interrupt::install(&cancel);

    let client = LookupClient::new(&endpoint, &key).map_err(CliError::pipeline)?;
    let pipeline = Pipeline::new(client, cancel);

    let stdout_reserved = cli.json || output == OutputTarget::Stdout;
    let reporter = ConsoleReporter::new(cli.quiet, stdout_reserved);

    let stats = match output {
        OutputTarget::File(path) => pipeline
            .run_to_file(&input, &path, name_column, &reporter)
            .map_err(CliError::pipeline)?,
        OutputTarget::Stdout => {
            let resolution = pipeline
                .run(&input, name_column, &reporter)
                .map_err(CliError::pipeline)?;
            pipeline.cancel_token().check().map_err(CliError::pipeline)?;
            let mut out = io::stdout().lock();
            write_to(&mut out, &resolution.lines())
                .map_err(|e| CliError::io(format!("cannot write to stdout: {}", e)))?;
            resolution.stats
        }
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|e| CliError::io(format!("failed to serialize summary: {}", e)))?;
        let mut out = io::stdout().lock();
        writeln!(out, "{}", json)
            .map_err(|e| CliError::io(format!("cannot write to stdout: {}", e)))?;
    }

    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────
