//! Resolves the employee an evaluation belongs to.
//!
//! Evaluations reference employees by id, registration code or display name,
//! and older documents only carry the name. Instead of silently picking the
//! first hit, [`match_employee`] returns every candidate ranked by strategy and
//! reports conflicting code/name hits as [`EmployeeMatch::Ambiguous`].

use super::domain::{EmployeeRecord, EmployeeRef, UNKNOWN_NAME};
use super::normalizer::normalize_name;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Id,
    Code,
    Name,
}

impl MatchStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Code => "code",
            Self::Name => "name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchCandidate {
    /// Index into the employee slice passed to [`match_employee`].
    pub index: usize,
    pub strategy: MatchStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EmployeeMatch {
    Matched {
        index: usize,
        strategy: MatchStrategy,
        candidates: Vec<MatchCandidate>,
    },
    Ambiguous {
        candidates: Vec<MatchCandidate>,
    },
    Unmatched,
}

impl EmployeeMatch {
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Matched { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn candidates(&self) -> &[MatchCandidate] {
        match self {
            Self::Matched { candidates, .. } | Self::Ambiguous { candidates } => candidates,
            Self::Unmatched => &[],
        }
    }
}

/// Employees with their matching keys computed once, so resolving many
/// evaluations does not re-normalize every employee name.
#[derive(Debug, Clone)]
pub struct EmployeeDirectory<'a> {
    employees: &'a [EmployeeRecord],
    name_keys: Vec<String>,
}

impl<'a> EmployeeDirectory<'a> {
    pub fn new(employees: &'a [EmployeeRecord]) -> Self {
        Self {
            employees,
            name_keys: employees
                .iter()
                .map(|employee| normalize_name(&employee.name))
                .collect(),
        }
    }

    pub fn employees(&self) -> &'a [EmployeeRecord] {
        self.employees
    }

    pub fn resolve(&self, reference: &EmployeeRef) -> EmployeeMatch {
        let employees = self.employees;
        let by_id = positions(employees, |_, employee| {
            reference.id.is_some() && employee.id == reference.id
        });
        let by_code = positions(employees, |_, employee| {
            reference.code.is_some() && employee.code == reference.code
        });

        let name_key = normalize_name(&reference.name);
        let by_name = if name_key.is_empty() || reference.name == UNKNOWN_NAME {
            Vec::new()
        } else {
            positions(employees, |index, _| self.name_keys[index] == name_key)
        };

        let candidates: Vec<MatchCandidate> = [
            (MatchStrategy::Id, &by_id),
            (MatchStrategy::Code, &by_code),
            (MatchStrategy::Name, &by_name),
        ]
        .into_iter()
        .flat_map(|(strategy, indexes)| {
            indexes
                .iter()
                .map(move |index| MatchCandidate { index: *index, strategy })
        })
        .collect();

        if let [index] = by_id.as_slice() {
            return EmployeeMatch::Matched {
                index: *index,
                strategy: MatchStrategy::Id,
                candidates,
            };
        }
        if by_id.len() > 1 {
            return EmployeeMatch::Ambiguous { candidates };
        }

        let mut distinct: Vec<usize> = by_code.iter().chain(by_name.iter()).copied().collect();
        distinct.sort_unstable();
        distinct.dedup();

        match distinct.as_slice() {
            [] => EmployeeMatch::Unmatched,
            [index] => EmployeeMatch::Matched {
                index: *index,
                strategy: if by_code.is_empty() {
                    MatchStrategy::Name
                } else {
                    MatchStrategy::Code
                },
                candidates,
            },
            _ => EmployeeMatch::Ambiguous { candidates },
        }
    }
}

/// One-off resolution. Use [`EmployeeDirectory`] when matching many
/// references against the same employees.
pub fn match_employee(reference: &EmployeeRef, employees: &[EmployeeRecord]) -> EmployeeMatch {
    EmployeeDirectory::new(employees).resolve(reference)
}

fn positions<F>(employees: &[EmployeeRecord], predicate: F) -> Vec<usize>
where
    F: Fn(usize, &EmployeeRecord) -> bool,
{
    employees
        .iter()
        .enumerate()
        .filter(|(index, employee)| predicate(*index, employee))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::normalizer::normalize_employees;
    use serde_json::json;

    fn employees() -> Vec<EmployeeRecord> {
        normalize_employees(&[
            json!({ "id": "emp-1", "matricula": "100", "nome": "Ana Souza" }),
            json!({ "id": "emp-2", "matricula": "200", "nome": "Bruno Lima" }),
            json!({ "id": "emp-3", "matricula": "300", "nome": "Ana  Souza" }),
        ])
    }

    fn reference(id: Option<&str>, code: Option<&str>, name: &str) -> EmployeeRef {
        EmployeeRef {
            id: id.map(str::to_string),
            code: code.map(str::to_string),
            name: name.to_string(),
        }
    }

    #[test]
    fn id_match_wins_over_other_strategies() {
        let outcome = match_employee(&reference(Some("emp-2"), Some("100"), "Ana Souza"), &employees());

        match outcome {
            EmployeeMatch::Matched {
                index, strategy, ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(strategy, MatchStrategy::Id);
            }
            other => panic!("expected id match, got {other:?}"),
        }
    }

    #[test]
    fn agreeing_code_and_name_resolve_by_code() {
        let outcome = match_employee(&reference(None, Some("200"), "bruno lima"), &employees());

        assert_eq!(outcome.index(), Some(1));
        let strategies: Vec<MatchStrategy> = outcome
            .candidates()
            .iter()
            .map(|candidate| candidate.strategy)
            .collect();
        assert_eq!(strategies, vec![MatchStrategy::Code, MatchStrategy::Name]);
    }

    #[test]
    fn disagreeing_code_and_name_are_ambiguous() {
        let outcome = match_employee(&reference(None, Some("200"), "Ana Souza"), &employees());

        match outcome {
            EmployeeMatch::Ambiguous { candidates } => {
                assert_eq!(candidates[0].strategy, MatchStrategy::Code);
                assert_eq!(candidates.len(), 3);
            }
            other => panic!("expected ambiguous match, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_without_other_keys_are_ambiguous() {
        let outcome = match_employee(&reference(None, None, "ANA SOUZA"), &employees());
        assert!(matches!(outcome, EmployeeMatch::Ambiguous { .. }));
        assert_eq!(outcome.index(), None);
    }

    #[test]
    fn unknown_references_are_unmatched() {
        let outcome = match_employee(&reference(Some("emp-9"), None, UNKNOWN_NAME), &employees());
        assert_eq!(outcome, EmployeeMatch::Unmatched);
        assert!(outcome.candidates().is_empty());

        let by_name = match_employee(&reference(None, None, "Bruno Lima"), &employees());
        assert_eq!(by_name.index(), Some(1));
    }

    #[test]
    fn directory_precomputes_name_keys_and_resolves_repeatedly() {
        let employees = employees();
        let directory = EmployeeDirectory::new(&employees);
        assert_eq!(
            directory.name_keys,
            vec!["ana souza", "bruno lima", "ana souza"]
        );

        for reference in [
            reference(Some("emp-2"), None, "Bruno Lima"),
            reference(None, Some("200"), "Ana Souza"),
            reference(None, None, "  bruno   LIMA "),
            reference(None, None, "Carla Dias"),
        ] {
            assert_eq!(
                directory.resolve(&reference),
                match_employee(&reference, &employees)
            );
        }
        assert_eq!(
            directory.resolve(&reference(None, None, "  bruno   LIMA ")).index(),
            Some(1)
        );
        assert_eq!(directory.employees().len(), 3);
    }
}
