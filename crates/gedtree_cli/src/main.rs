//! `gedtree` command-line entry point.
//!
//! # Responsibility
//! - Load a `.ged` file and print parse, root, tree or stats output as JSON.
//! - Map core errors to stable codes and exit statuses.
//!
//! # Invariants
//! - stdout only ever carries JSON; diagnostics go to stderr.
//! - Exit status 2 means the file holds no individuals, 1 any other failure.
//! - Nothing is printed to stdout unless the whole JSON document rendered.

use clap::{Parser, Subcommand};
use gedtree_core::{
    default_log_level, find_root, init_logging, load_gedcom_file, parse_gedcom, FamilyTreeError,
    FamilyTreeService, ProjectionOptions, SourceError, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT,
};
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;

/// GEDCOM family tree builder.
#[derive(Parser)]
#[command(name = "gedtree", version, about = "GEDCOM family tree builder")]
struct Cli {
    /// Log level (trace|debug|info|warn|error); only used together with --log-dir
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print individuals and families as JSON
    Parse {
        /// Path to the .ged file
        file: PathBuf,
    },
    /// Print the selected root individual
    Root {
        /// Path to the .ged file
        file: PathBuf,
    },
    /// Print the family tree rooted at the selected or given individual
    Tree {
        /// Path to the .ged file
        file: PathBuf,
        /// Cross-reference id of the root, e.g. @I1@
        #[arg(long)]
        root: Option<String>,
        /// Generations to expand below the root (at most 100)
        #[arg(
            long,
            default_value_t = DEFAULT_MAX_DEPTH as u64,
            value_parser = clap::value_parser!(u64).range(0..=MAX_DEPTH_LIMIT as u64)
        )]
        max_depth: u64,
    },
    /// Print record counts and dangling reference count
    Stats {
        /// Path to the .ged file
        file: PathBuf,
    },
}

/// Failures surfaced by the CLI.
#[derive(Debug)]
enum CliError {
    /// Core loading, parsing or tree building failed.
    Tree(FamilyTreeError),
    /// Output could not be rendered as JSON.
    Serialize(serde_json::Error),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            Self::Tree(err) => err.code(),
            Self::Serialize(_) => "SERIALIZE",
        }
    }

    fn suggestion(&self) -> &'static str {
        match self {
            Self::Tree(err) => err.suggestion(),
            Self::Serialize(_) => "Please report this file; its records could not be rendered.",
        }
    }

    fn exit_status(&self) -> u8 {
        match self {
            Self::Tree(FamilyTreeError::NoIndividualsFound) => 2,
            _ => 1,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tree(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to render JSON output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Tree(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<FamilyTreeError> for CliError {
    fn from(value: FamilyTreeError) -> Self {
        Self::Tree(value)
    }
}

impl From<SourceError> for CliError {
    fn from(value: SourceError) -> Self {
        Self::Tree(FamilyTreeError::Source(value))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match (cli.log_dir.as_deref(), cli.log_level.as_deref()) {
        (Some(log_dir), level) => {
            let level = level.unwrap_or(default_log_level());
            if let Err(err) = init_logging(level, log_dir) {
                eprintln!("error[LOGGING_INIT]: {err}");
                return ExitCode::FAILURE;
            }
        }
        (None, Some(_)) => {
            eprintln!("warning: --log-level has no effect without --log-dir; logging is off");
        }
        (None, None) => {}
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Commands::Parse { file } => {
            let data = parse_gedcom(&load_gedcom_file(file)?);
            info!(
                "event=cli_command module=cli status=ok command=parse individuals={}",
                data.individuals.len()
            );
            print_json(&data, cli.pretty)?;
        }
        Commands::Root { file } => {
            let data = parse_gedcom(&load_gedcom_file(file)?);
            let root = find_root(&data).ok_or(FamilyTreeError::NoIndividualsFound)?;
            info!(
                "event=cli_command module=cli status=ok command=root kind={:?}",
                root.kind
            );
            print_json(&root, cli.pretty)?;
        }
        Commands::Tree {
            file,
            root,
            max_depth,
        } => {
            let max_depth = usize::try_from(*max_depth).unwrap_or(MAX_DEPTH_LIMIT);
            let service = FamilyTreeService::new(ProjectionOptions::with_max_depth(max_depth));
            let view = service.build_from_file(file, root.as_deref())?;
            if let Some(warning) = view.warning.as_deref() {
                eprintln!("warning: {warning}");
            }
            print_json(&view, cli.pretty)?;
        }
        Commands::Stats { file } => {
            let data = parse_gedcom(&load_gedcom_file(file)?);
            print_json(&data.stats(), cli.pretty)?;
        }
    }
    Ok(())
}

fn report(err: &CliError) -> ExitCode {
    eprintln!("error[{}]: {err}", err.code());
    eprintln!("{}", err.suggestion());
    warn!(
        "event=cli_command module=cli status=error code={}",
        err.code()
    );
    ExitCode::from(err.exit_status())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    println!("{}", render_json(value, pretty)?);
    Ok(())
}

fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(CliError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::{render_json, Cli, CliError};
    use clap::Parser;
    use gedtree_core::FamilyTreeError;
    use std::collections::BTreeMap;

    #[test]
    fn render_json_reports_serialize_failure() {
        let mut unrenderable = BTreeMap::new();
        unrenderable.insert(vec![1u8, 2], "non-string key");

        let err = render_json(&unrenderable, false).unwrap_err();
        assert!(matches!(err, CliError::Serialize(_)));
        assert_eq!(err.code(), "SERIALIZE");
        assert_eq!(err.exit_status(), 1);
    }

    #[test]
    fn no_individuals_maps_to_exit_status_2() {
        let err = CliError::from(FamilyTreeError::NoIndividualsFound);
        assert_eq!(err.code(), "NO_INDIVIDUALS_FOUND");
        assert_eq!(err.exit_status(), 2);
    }

    #[test]
    fn max_depth_above_limit_is_rejected() {
        assert!(Cli::try_parse_from(["gedtree", "tree", "a.ged", "--max-depth", "100"]).is_ok());
        assert!(Cli::try_parse_from(["gedtree", "tree", "a.ged", "--max-depth", "101"]).is_err());
        assert!(
            Cli::try_parse_from(["gedtree", "tree", "a.ged", "--max-depth", "1000000"]).is_err()
        );
    }
}
