//! Preference spreadsheet parsing.
//!
//! With custom counts the sheet reads:
//!
//! ```text
//! Assignment, Counts,   Ada, Grace, Linus
//! Counts,     ,         2,   1,     1
//! Morning,    2,        1,   2,     1
//! Evening,    1,        2,   1,     4
//! ```
//!
//! Without custom counts the second row and column are absent and every
//! capacity is 1.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use slotforge::{AssignmentProblem, Entity, Person, Preference};

use crate::error::CliError;

/// Sheet layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Capacities in row 2 and column B.
    CustomCounts,
    /// Names and ranks only.
    Plain,
}

impl Layout {
    pub fn from_custom_counts(custom_counts: bool) -> Self {
        if custom_counts {
            Layout::CustomCounts
        } else {
            Layout::Plain
        }
    }

    /// Leading columns before the first rank.
    fn label_columns(self) -> usize {
        match self {
            Layout::CustomCounts => 2,
            Layout::Plain => 1,
        }
    }
}

pub fn read_problem(path: impl AsRef<Path>, layout: Layout) -> Result<AssignmentProblem, CliError> {
    parse_problem(File::open(path)?, layout)
}

pub fn parse_problem<R: Read>(reader: R, layout: Layout) -> Result<AssignmentProblem, CliError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    // (1-based line, cells without trailing blanks)
    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
    for (i, record) in csv.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(i + 1, |p| p.line() as usize);
        let cells = trimmed_cells(&record);
        if !cells.is_empty() {
            rows.push((line, cells));
        }
    }

    let mut rows = rows.into_iter();
    let Some((_, header)) = rows.next() else {
        return Err(CliError::parse(1, 1, "empty input"));
    };
    let skip = layout.label_columns();
    let person_names: Vec<String> = header.into_iter().skip(skip).collect();

    let person_caps = match layout {
        Layout::CustomCounts => {
            let Some((line, counts)) = rows.next() else {
                return Err(CliError::parse(2, skip + 1, "missing person counts row"));
            };
            (0..person_names.len())
                .map(|j| {
                    let cell = counts.get(skip + j).map_or("", String::as_str);
                    parse_count(cell, line, skip + j + 1)
                })
                .collect::<Result<Vec<_>, _>>()?
        }
        Layout::Plain => vec![1; person_names.len()],
    };

    let mut entity_names = Vec::new();
    let mut entity_caps = Vec::new();
    let mut preferences = Vec::new();
    for (line, cells) in rows {
        entity_names.push(cells[0].clone());
        entity_caps.push(match layout {
            Layout::CustomCounts => {
                parse_count(cells.get(1).map_or("", String::as_str), line, 2)?
            }
            Layout::Plain => 1,
        });

        let ranks = &cells[skip.min(cells.len())..];
        if ranks.len() != person_names.len() {
            return Err(CliError::parse(
                line,
                skip + ranks.len().min(person_names.len()) + 1,
                format!(
                    "expected {} preferences, found {}",
                    person_names.len(),
                    ranks.len()
                ),
            ));
        }
        let row = ranks
            .iter()
            .enumerate()
            .map(|(j, cell)| parse_rank(cell, line, skip + j + 1))
            .collect::<Result<Vec<_>, _>>()?;
        preferences.push(row);
    }

    let entities = dedup_names(entity_names)
        .into_iter()
        .zip(entity_caps)
        .map(|(name, cap)| Entity::new(name, cap))
        .collect();
    let persons = dedup_names(person_names)
        .into_iter()
        .zip(person_caps)
        .map(|(name, cap)| Person::new(name, cap))
        .collect();

    Ok(AssignmentProblem::from_preferences(entities, persons, preferences)?)
}

/// Cells of `record` with trailing blanks removed.
fn trimmed_cells(record: &StringRecord) -> Vec<String> {
    let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
    while cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

fn parse_count(cell: &str, row: usize, column: usize) -> Result<usize, CliError> {
    cell.parse()
        .map_err(|_| CliError::parse(row, column, format!("invalid count '{cell}'")))
}

fn parse_rank(cell: &str, row: usize, column: usize) -> Result<Preference, CliError> {
    let rank: i64 = cell
        .parse()
        .map_err(|_| CliError::parse(row, column, format!("invalid preference '{cell}'")))?;
    Preference::new(rank).map_err(|e| CliError::parse(row, column, e.to_string()))
}

/// Renames repeats as `Name (2)`, `Name (3)`, ... keeping the first as is.
pub fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        if used.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let suffix = next_suffix.entry(name.clone()).or_insert(2);
        let renamed = loop {
            let candidate = format!("{name} ({suffix})");
            *suffix += 1;
            if used.insert(candidate.clone()) {
                break candidate;
            }
        };
        out.push(renamed);
    }
    out
}

#[cfg(test)]
mod tests {
    use slotforge::SlotForgeError;

    use super::*;

    const COUNTS_SHEET: &str = "\
Assignment,Counts,Ada,Grace,Linus
Counts,,2,1,1
Morning,2,1,2,1
Evening,1,2,1,4
Night,1,1,3,2
";

    #[test]
    fn test_custom_counts_layout() {
        let problem = parse_problem(COUNTS_SHEET.as_bytes(), Layout::CustomCounts).unwrap();

        assert_eq!(problem.entity_count(), 3);
        assert_eq!(problem.person_count(), 3);
        assert_eq!(problem.entities()[0], Entity::new("Morning", 2));
        assert_eq!(problem.persons()[0], Person::new("Ada", 2));
        assert_eq!(problem.preference(1, 2).rank(), 4);
        assert_eq!(problem.total_entity_capacity(), 4);
    }

    #[test]
    fn test_plain_layout() {
        let sheet = "Assignment,A,B,C\nentity1,1,2,3\nentity2,2,1,3\nentity3,3,3,1\n";
        let problem = parse_problem(sheet.as_bytes(), Layout::Plain).unwrap();

        assert_eq!(problem.entity_count(), 3);
        assert!(problem.has_unit_capacities());
        assert_eq!(problem.persons()[2].name, "C");
        assert_eq!(problem.preference(2, 2).rank(), 1);
    }

    #[test]
    fn test_trailing_blanks_and_empty_rows() {
        let sheet = "Assignment,A,B,,\n\nx,1,2,,\ny,2,1\n,,,\n";
        let problem = parse_problem(sheet.as_bytes(), Layout::Plain).unwrap();
        assert_eq!(problem.entity_count(), 2);
        assert_eq!(problem.person_count(), 2);
    }

    #[test]
    fn test_quoted_names() {
        let sheet = "Assignment,\"Lovelace, Ada\",Grace\n\"Section 1\",1,2\n";
        let problem = parse_problem(sheet.as_bytes(), Layout::Plain).unwrap();
        assert_eq!(problem.persons()[0].name, "Lovelace, Ada");
    }

    #[test]
    fn test_duplicate_names_are_suffixed() {
        let sheet = "Assignment,Ada,Ada,Grace,Ada\nS,1,2,3,4\nS,4,3,2,1\n";
        let problem = parse_problem(sheet.as_bytes(), Layout::Plain).unwrap();
        let persons: Vec<&str> = problem.persons().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(persons, vec!["Ada", "Ada (2)", "Grace", "Ada (3)"]);
        assert_eq!(problem.entities()[1].name, "S (2)");
    }

    #[test]
    fn test_dedup_avoids_existing_suffix() {
        let names = ["A", "A (2)", "A"].map(String::from).to_vec();
        assert_eq!(dedup_names(names), vec!["A", "A (2)", "A (3)"]);
    }

    #[test]
    fn test_bad_rank_reports_position() {
        let sheet = "Assignment,A,B\nx,1,two\n";
        let err = parse_problem(sheet.as_bytes(), Layout::Plain).unwrap_err();
        match err {
            CliError::Parse { row, column, message } => {
                assert_eq!((row, column), (2, 3));
                assert!(message.contains("two"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_rank() {
        let sheet = "Assignment,A\nx,5\n";
        let err = parse_problem(sheet.as_bytes(), Layout::Plain).unwrap_err();
        match err {
            CliError::Parse { row, column, message } => {
                assert_eq!((row, column), (2, 2));
                assert_eq!(message, SlotForgeError::InvalidPreference(5).to_string());
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_count_reports_position() {
        let sheet = "Assignment,Counts,A\nCounts,,x\nS,1,1\n";
        let err = parse_problem(sheet.as_bytes(), Layout::CustomCounts).unwrap_err();
        assert!(matches!(err, CliError::Parse { row: 2, column: 3, .. }));

        let sheet = "Assignment,Counts,A\nCounts,,1\nS,-1,1\n";
        let err = parse_problem(sheet.as_bytes(), Layout::CustomCounts).unwrap_err();
        assert!(matches!(err, CliError::Parse { row: 3, column: 2, .. }));
    }

    #[test]
    fn test_short_row() {
        let sheet = "Assignment,A,B,C\nx,1,2\n";
        let err = parse_problem(sheet.as_bytes(), Layout::Plain).unwrap_err();
        match err {
            CliError::Parse { row, message, .. } => {
                assert_eq!(row, 2);
                assert_eq!(message, "expected 3 preferences, found 2");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        let err = parse_problem("".as_bytes(), Layout::Plain).unwrap_err();
        assert!(matches!(err, CliError::Parse { row: 1, .. }));
    }
}
