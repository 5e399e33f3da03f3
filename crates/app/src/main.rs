use std::fmt;
use std::path::{Path, PathBuf};

use services::{StudyServices, View};
use tracing::info;

mod logger;
mod repl;

const DEFAULT_DB_PATH: &str = "theory-progress.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidView { raw: String },
    InvalidDbPath { raw: String },
    InvalidLogLevel { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidView { raw } => write!(f, "invalid --view value: {raw}"),
            ArgsError::InvalidDbPath { raw } => write!(f, "invalid --db value: {raw:?}"),
            ArgsError::InvalidLogLevel { raw } => write!(f, "invalid --log-level value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  theory-study [--db <path> | --memory] [--view <scales|circle|progression>]");
    eprintln!("               [--scales <file.json>] [--questions <file.json>]");
    eprintln!("               [--log-level <filter>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_PATH}");
    eprintln!("  --view scales");
    eprintln!("  --log-level warn");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  THEORY_DB_PATH, THEORY_VIEW, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Backend {
    Sqlite(PathBuf),
    Memory,
}

#[derive(Debug)]
struct Args {
    backend: Backend,
    view: View,
    scales: Option<PathBuf>,
    questions: Option<PathBuf>,
    log_level: Option<String>,
}

impl Args {
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut db_path = env("THEORY_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_owned());
        let mut memory = false;
        let mut view = match env("THEORY_VIEW") {
            Some(raw) => parse_view(raw)?,
            None => View::default(),
        };
        let mut scales = None;
        let mut questions = None;
        let mut log_level = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => db_path = require_value(args, "--db")?,
                "--memory" => memory = true,
                "--view" => view = parse_view(require_value(args, "--view")?)?,
                "--scales" => scales = Some(PathBuf::from(require_value(args, "--scales")?)),
                "--questions" => {
                    questions = Some(PathBuf::from(require_value(args, "--questions")?));
                }
                "--log-level" => {
                    let raw = require_value(args, "--log-level")?;
                    // Bare level names are checked here; full filter directives
                    // are left to the subscriber.
                    if !raw.contains(['=', ',']) && logger::parse_level(&raw).is_err() {
                        return Err(ArgsError::InvalidLogLevel { raw });
                    }
                    log_level = Some(raw);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let backend = if memory {
            Backend::Memory
        } else {
            if db_path.trim().is_empty() {
                return Err(ArgsError::InvalidDbPath { raw: db_path });
            }
            Backend::Sqlite(PathBuf::from(db_path))
        };

        Ok(Some(Self {
            backend,
            view,
            scales,
            questions,
            log_level,
        }))
    }
}

fn parse_view(raw: String) -> Result<View, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidView { raw })
}

fn prepare_db_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn build_services(args: &Args) -> Result<StudyServices, Box<dyn std::error::Error>> {
    let mut services = match &args.backend {
        Backend::Memory => StudyServices::in_memory(),
        Backend::Sqlite(path) => {
            prepare_db_dir(path)?;
            StudyServices::open_sqlite(path)?
        }
    };

    let scales = args.scales.as_ref().map(std::fs::read_to_string).transpose()?;
    let questions = args
        .questions
        .as_ref()
        .map(std::fs::read_to_string)
        .transpose()?;
    services.load_catalogs_from_json(scales.as_deref(), questions.as_deref())?;

    services.switch_view(args.view);
    Ok(services)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(&mut argv, |key| std::env::var(key).ok()) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    logger::init(parsed.log_level.as_deref())?;
    info!(backend = ?parsed.backend, view = %parsed.view, "starting study session");

    let mut services = build_services(&parsed)?;
    repl::run(&mut services).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
