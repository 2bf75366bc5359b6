//! Assignment problem input: entities, persons and their preferences.

use std::collections::HashSet;

use crate::error::{Result, SlotForgeError};
use crate::preference::Preference;

/// A schedulable requirement offering `capacity` slots (e.g. a section or a shift).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub name: String,
    pub capacity: usize,
}

impl Entity {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }

    /// An entity with a single slot.
    pub fn unit(name: impl Into<String>) -> Self {
        Self::new(name, 1)
    }
}

/// An agent that may be assigned to `capacity` entities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub name: String,
    pub capacity: usize,
}

impl Person {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
        }
    }

    /// A person taking a single entity.
    pub fn unit(name: impl Into<String>) -> Self {
        Self::new(name, 1)
    }
}

/// Immutable input of one solve call.
///
/// Preferences form a dense matrix with one row per entity and one column
/// per person: `preference(e, p)` is how person `p` ranks entity `e`.
///
/// # Examples
///
/// ```
/// use slotforge_core::{AssignmentProblem, Entity, Person};
///
/// let problem = AssignmentProblem::new(
///     vec![Entity::unit("Section 1"), Entity::new("Section 2", 2)],
///     vec![Person::unit("Ada"), Person::new("Grace", 2)],
///     vec![vec![1, 2], vec![3, 1]],
/// )
/// .unwrap();
///
/// assert_eq!(problem.entity_count(), 2);
/// assert_eq!(problem.preference(1, 0).rank(), 3);
/// assert_eq!(problem.total_entity_capacity(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentProblem {
    entities: Vec<Entity>,
    persons: Vec<Person>,
    preferences: Vec<Preference>,
}

impl AssignmentProblem {
    /// Creates a problem from raw ranks.
    ///
    /// # Errors
    ///
    /// - [`SlotForgeError::DuplicateName`] if two entities or two persons share a name
    /// - [`SlotForgeError::DimensionMismatch`] if the matrix is not
    ///   `entities.len()` x `persons.len()`
    /// - [`SlotForgeError::InvalidPreference`] for ranks outside `1..=4`
    pub fn new(entities: Vec<Entity>, persons: Vec<Person>, ranks: Vec<Vec<i64>>) -> Result<Self> {
        check_shape(entities.len(), persons.len(), &ranks)?;
        let preferences = ranks
            .into_iter()
            .flatten()
            .map(Preference::new)
            .collect::<Result<Vec<_>>>()?;
        Self::build(entities, persons, preferences)
    }

    /// Creates a problem from already validated preferences.
    pub fn from_preferences(
        entities: Vec<Entity>,
        persons: Vec<Person>,
        preferences: Vec<Vec<Preference>>,
    ) -> Result<Self> {
        check_shape(entities.len(), persons.len(), &preferences)?;
        let preferences = preferences.into_iter().flatten().collect();
        Self::build(entities, persons, preferences)
    }

    fn build(
        entities: Vec<Entity>,
        persons: Vec<Person>,
        preferences: Vec<Preference>,
    ) -> Result<Self> {
        check_unique("entity", entities.iter().map(|e| e.name.as_str()))?;
        check_unique("person", persons.iter().map(|p| p.name.as_str()))?;
        Ok(Self {
            entities,
            persons,
            preferences,
        })
    }

    /// Resets every capacity to 1.
    pub fn with_unit_capacities(mut self) -> Self {
        self.entities.iter_mut().for_each(|e| e.capacity = 1);
        self.persons.iter_mut().for_each(|p| p.capacity = 1);
        self
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    /// How person `person` ranks entity `entity`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn preference(&self, entity: usize, person: usize) -> Preference {
        self.preferences[entity * self.persons.len() + person]
    }

    /// All rankings of one entity, in person order.
    pub fn preference_row(&self, entity: usize) -> &[Preference] {
        let width = self.persons.len();
        &self.preferences[entity * width..(entity + 1) * width]
    }

    /// Returns true if no entity or person takes more than one pairing.
    pub fn has_unit_capacities(&self) -> bool {
        self.entities.iter().all(|e| e.capacity <= 1)
            && self.persons.iter().all(|p| p.capacity <= 1)
    }

    /// Sum of entity capacities, saturating at `usize::MAX`.
    pub fn total_entity_capacity(&self) -> usize {
        self.entities
            .iter()
            .fold(0, |total: usize, e| total.saturating_add(e.capacity))
    }

    /// Sum of person capacities, saturating at `usize::MAX`.
    pub fn total_person_capacity(&self) -> usize {
        self.persons
            .iter()
            .fold(0, |total: usize, p| total.saturating_add(p.capacity))
    }
}

fn check_shape<T>(entities: usize, persons: usize, rows: &[Vec<T>]) -> Result<()> {
    let mismatch = |cols: usize| SlotForgeError::DimensionMismatch {
        expected_rows: entities,
        expected_cols: persons,
        rows: rows.len(),
        cols,
    };
    if rows.len() != entities {
        return Err(mismatch(rows.first().map_or(0, Vec::len)));
    }
    match rows.iter().find(|row| row.len() != persons) {
        Some(row) => Err(mismatch(row.len())),
        None => Ok(()),
    }
}

fn check_unique<'a>(kind: &'static str, names: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(SlotForgeError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(prefix: &str, n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn test_new_problem() {
        let entities = names("E", 2).into_iter().map(Entity::unit).collect();
        let persons = names("P", 3).into_iter().map(Person::unit).collect();
        let problem =
            AssignmentProblem::new(entities, persons, vec![vec![1, 2, 3], vec![4, 3, 2]]).unwrap();

        assert_eq!(problem.entity_count(), 2);
        assert_eq!(problem.person_count(), 3);
        assert_eq!(problem.preference(1, 0), Preference::UNAVAILABLE);
        assert_eq!(
            problem.preference_row(0).iter().map(|p| p.rank()).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(problem.has_unit_capacities());
    }

    #[test]
    fn test_row_count_mismatch() {
        let err = AssignmentProblem::new(
            vec![Entity::unit("E1"), Entity::unit("E2")],
            vec![Person::unit("P1")],
            vec![vec![1]],
        )
        .unwrap_err();

        assert_eq!(
            err,
            SlotForgeError::DimensionMismatch {
                expected_rows: 2,
                expected_cols: 1,
                rows: 1,
                cols: 1,
            }
        );
    }

    #[test]
    fn test_ragged_row() {
        let err = AssignmentProblem::new(
            vec![Entity::unit("E1"), Entity::unit("E2")],
            vec![Person::unit("P1"), Person::unit("P2")],
            vec![vec![1, 2], vec![1]],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SlotForgeError::DimensionMismatch { rows: 2, cols: 1, .. }
        ));
    }

    #[test]
    fn test_invalid_rank() {
        let err = AssignmentProblem::new(
            vec![Entity::unit("E1")],
            vec![Person::unit("P1"), Person::unit("P2")],
            vec![vec![1, 7]],
        )
        .unwrap_err();

        assert_eq!(err, SlotForgeError::InvalidPreference(7));
    }

    #[test]
    fn test_duplicate_names() {
        let err = AssignmentProblem::new(
            vec![Entity::unit("E1")],
            vec![Person::unit("Ada"), Person::unit("Ada")],
            vec![vec![1, 2]],
        )
        .unwrap_err();

        assert_eq!(
            err,
            SlotForgeError::DuplicateName {
                kind: "person",
                name: "Ada".to_string(),
            }
        );
    }

    #[test]
    fn test_unit_capacities() {
        let problem = AssignmentProblem::new(
            vec![Entity::new("E1", 3)],
            vec![Person::new("P1", 2), Person::new("P2", 0)],
            vec![vec![1, 2]],
        )
        .unwrap();

        assert!(!problem.has_unit_capacities());
        assert_eq!(problem.total_entity_capacity(), 3);
        assert_eq!(problem.total_person_capacity(), 2);

        let unit = problem.with_unit_capacities();
        assert!(unit.has_unit_capacities());
        assert_eq!(unit.total_person_capacity(), 2);
    }
}
