//! Assignment output: CSV or JSON files plus the console report.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use csv::WriterBuilder;
use slotforge::{Assignment, Preference};

use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `entity,person,preference` rows without a header.
    #[default]
    Csv,
    /// Array of objects with entity, person, preference and cost.
    Json,
}

/// Writes `assignment` to `path` in `format`.
pub fn write_file(
    assignment: &Assignment,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write(assignment, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

pub fn write<W: Write>(
    assignment: &Assignment,
    writer: W,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Csv => write_csv(assignment, writer),
        OutputFormat::Json => write_json(assignment, writer),
    }
}

pub fn write_csv<W: Write>(assignment: &Assignment, writer: W) -> Result<(), CliError> {
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
    for row in assignment {
        let rank = row.preference.rank().to_string();
        csv.write_record([row.entity.as_str(), row.person.as_str(), rank.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(assignment: &Assignment, mut writer: W) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut writer, assignment.rows())?;
    writeln!(writer)?;
    Ok(())
}

/// One line per pairing, in assignment order.
pub fn pairing_lines(assignment: &Assignment) -> Vec<String> {
    assignment
        .iter()
        .map(|row| {
            format!(
                "Person {} is assigned {} with priority {}",
                row.entity, row.person, row.preference
            )
        })
        .collect()
}

/// Pairings per rank and the totals.
pub fn summary(assignment: &Assignment) -> String {
    let histogram = assignment.rank_histogram();
    let total = assignment.len().max(1) as f64;

    let mut out = String::new();
    for (preference, count) in Preference::ALL.iter().zip(histogram) {
        let _ = writeln!(
            out,
            "  priority {}: {:>4} ({:5.1}%)",
            preference,
            count,
            100.0 * count as f64 / total
        );
    }
    let _ = writeln!(
        out,
        "  {} pairings, total cost {}",
        assignment.len(),
        assignment.total_cost()
    );
    out
}

/// Prints the pairing lines and the summary to stdout.
pub fn print_report(assignment: &Assignment) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for line in pairing_lines(assignment) {
        writeln!(stdout, "{line}")?;
    }
    writeln!(stdout)?;
    write!(stdout, "{}", summary(assignment))?;
    stdout.flush()
}
