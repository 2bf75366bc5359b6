mod error;
mod input;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use slotforge::{BoundMode, SolverConfig};
use tracing::info;

use crate::error::CliError;
use crate::input::Layout;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "slotforge")]
#[command(about = "Assign entities to persons from a preference spreadsheet")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Preference CSV to read")]
    input: PathBuf,
    #[arg(help = "File to write the assignment to")]
    output: PathBuf,
    #[arg(long, help = "Input has no count row or column; every capacity is 1")]
    no_custom_counts: bool,
    #[arg(long, value_name = "MODE", help = "Capacity semantics: exact, at-least or at-most")]
    bounds: Option<BoundMode>,
    #[arg(long, help = "Never pair anyone with a rank-4 (unavailable) entity")]
    forbid_unavailable: bool,
    #[arg(long, value_name = "FILE", help = "Solver configuration (TOML or YAML)")]
    config: Option<PathBuf>,
    #[arg(long, value_name = "SECONDS", help = "Give up after this many seconds")]
    time_limit: Option<u64>,
    #[arg(long, short, value_enum, default_value = "csv", help = "Output format")]
    format: OutputFormat,
    #[arg(long, short, help = "Only write the output file")]
    quiet: bool,
}

impl Cli {
    /// File configuration with command-line overrides applied.
    fn solver_config(&self) -> Result<SolverConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::load(path)?,
            None => SolverConfig::default(),
        };
        if let Some(mode) = self.bounds {
            config = config.with_bound_mode(mode);
        }
        if self.no_custom_counts {
            config = config.without_custom_counts();
        }
        if self.forbid_unavailable {
            config = config.with_forbid_unavailable(true);
        }
        if let Some(seconds) = self.time_limit {
            config = config.with_termination_seconds(seconds);
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if !cli.quiet {
        slotforge::console::init();
    }

    let config = cli.solver_config()?;
    let layout = Layout::from_custom_counts(config.custom_counts);
    let problem = input::read_problem(&cli.input, layout)?;
    info!(
        event = "input_read",
        path = %cli.input.display(),
        entities = problem.entity_count(),
        persons = problem.person_count(),
    );

    let assignment = slotforge::solve_with_config(&problem, &config)?;

    output::write_file(&assignment, &cli.output, cli.format)?;
    if !cli.quiet {
        output::print_report(&assignment)?;
    }
    Ok(())
}
