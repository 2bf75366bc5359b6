//! Solver output.

use std::collections::BTreeMap;

use crate::preference::{Cost, Preference};

/// One realized pairing.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentRow {
    pub entity: String,
    pub person: String,
    pub preference: Preference,
    pub cost: Cost,
    /// Index of the entity in the problem.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub entity_index: usize,
    /// Index of the person in the problem.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub person_index: usize,
}

/// A complete assignment satisfying the capacity constraints.
///
/// Rows are ordered by entity index, then person index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    rows: Vec<AssignmentRow>,
}

impl Assignment {
    /// Creates an assignment, sorting rows into their canonical order.
    pub fn new(mut rows: Vec<AssignmentRow>) -> Self {
        rows.sort_by_key(|r| (r.entity_index, r.person_index));
        Self { rows }
    }

    pub fn rows(&self) -> &[AssignmentRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<AssignmentRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssignmentRow> {
        self.rows.iter()
    }

    pub fn total_cost(&self) -> Cost {
        self.rows.iter().map(|r| r.cost).sum()
    }

    /// Sum of preference ranks, the unweighted view of the total cost.
    pub fn total_rank(&self) -> u64 {
        self.rows.iter().map(|r| r.preference.rank() as u64).sum()
    }

    pub fn count_for_person(&self, person: &str) -> usize {
        self.rows.iter().filter(|r| r.person == person).count()
    }

    pub fn count_for_entity(&self, entity: &str) -> usize {
        self.rows.iter().filter(|r| r.entity == entity).count()
    }

    pub fn contains(&self, entity: &str, person: &str) -> bool {
        self.rows
            .iter()
            .any(|r| r.entity == entity && r.person == person)
    }

    /// Groups rows by person name.
    pub fn by_person(&self) -> BTreeMap<&str, Vec<&AssignmentRow>> {
        let mut groups: BTreeMap<&str, Vec<&AssignmentRow>> = BTreeMap::new();
        for row in &self.rows {
            groups.entry(row.person.as_str()).or_default().push(row);
        }
        groups
    }

    /// Groups rows by entity name.
    pub fn by_entity(&self) -> BTreeMap<&str, Vec<&AssignmentRow>> {
        let mut groups: BTreeMap<&str, Vec<&AssignmentRow>> = BTreeMap::new();
        for row in &self.rows {
            groups.entry(row.entity.as_str()).or_default().push(row);
        }
        groups
    }

    /// Number of pairings at each rank, most preferred first.
    pub fn rank_histogram(&self) -> [usize; 4] {
        let mut histogram = [0; 4];
        for row in &self.rows {
            histogram[row.preference.index()] += 1;
        }
        histogram
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a AssignmentRow;
    type IntoIter = std::slice::Iter<'a, AssignmentRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entity: usize, person: usize, rank: i64, cost: u64) -> AssignmentRow {
        AssignmentRow {
            entity: format!("E{entity}"),
            person: format!("P{person}"),
            preference: Preference::new(rank).unwrap(),
            cost: Cost::of(cost),
            entity_index: entity,
            person_index: person,
        }
    }

    #[test]
    fn test_rows_sorted() {
        let assignment = Assignment::new(vec![row(1, 0, 1, 1), row(0, 2, 2, 4), row(0, 1, 1, 1)]);
        let order: Vec<(usize, usize)> = assignment
            .iter()
            .map(|r| (r.entity_index, r.person_index))
            .collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (1, 0)]);
    }

    #[test]
    fn test_totals_and_counts() {
        let assignment = Assignment::new(vec![row(0, 0, 1, 1), row(1, 0, 3, 100), row(1, 1, 2, 4)]);

        assert_eq!(assignment.total_cost(), Cost::of(105));
        assert_eq!(assignment.total_rank(), 6);
        assert_eq!(assignment.count_for_person("P0"), 2);
        assert_eq!(assignment.count_for_entity("E1"), 2);
        assert!(assignment.contains("E1", "P1"));
        assert!(!assignment.contains("E0", "P1"));
        assert_eq!(assignment.rank_histogram(), [1, 1, 1, 0]);
    }

    #[test]
    fn test_groupings() {
        let assignment = Assignment::new(vec![row(0, 0, 1, 1), row(1, 0, 3, 100), row(1, 1, 2, 4)]);

        let by_person = assignment.by_person();
        assert_eq!(by_person["P0"].len(), 2);
        assert_eq!(by_person["P1"][0].entity, "E1");

        let by_entity = assignment.by_entity();
        assert_eq!(by_entity.len(), 2);
        assert_eq!(by_entity["E0"].len(), 1);
    }
}
