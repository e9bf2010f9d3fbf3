use super::{mean, OrderedGroups, Running};
use crate::analytics::domain::{DiscType, DiscVector, EmployeeRecord, EvaluationRecord};
use crate::analytics::matching::{EmployeeDirectory, EmployeeMatch};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of primary types reported per group.
pub const TOP_TYPES: usize = 3;

/// Restricts the behavioral analysis to one company and, optionally, to a
/// sector, role or job level. Empty strings behave like `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehavioralScope {
    pub company: Option<String>,
    pub sector: Option<String>,
    pub role: Option<String>,
    pub level: Option<String>,
}

fn active(filter: &Option<String>) -> Option<&str> {
    filter
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

impl BehavioralScope {
    pub fn includes(&self, employee: &EmployeeRecord) -> bool {
        let company_ok = match active(&self.company) {
            Some(company) => employee.company.as_deref() == Some(company),
            None => true,
        };

        company_ok
            && active(&self.sector).map_or(true, |sector| employee.sector == sector)
            && active(&self.role).map_or(true, |role| employee.role == role)
            && active(&self.level).map_or(true, |level| employee.level == level)
    }

    /// Evaluations without a company reference stay eligible; they can still
    /// match an in-scope employee.
    pub fn includes_evaluation(&self, evaluation: &EvaluationRecord) -> bool {
        match (active(&self.company), evaluation.company.as_deref()) {
            (Some(scope), Some(company)) => scope == company,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingDimension {
    Sector,
    Role,
    Level,
}

impl GroupingDimension {
    pub const fn ordered() -> [Self; 3] {
        [Self::Sector, Self::Role, Self::Level]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Sector => "Setor",
            Self::Role => "Cargo",
            Self::Level => "Nível",
        }
    }

    pub fn key(self, employee: &EmployeeRecord) -> &str {
        match self {
            Self::Sector => &employee.sector,
            Self::Role => &employee.role,
            Self::Level => &employee.level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub disc_type: DiscType,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedType {
    pub disc_type: DiscType,
    /// Employees of this type in the group.
    pub count: usize,
    /// Employees of this type with at least one matched evaluation.
    pub scored_count: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTopTypes {
    pub group: String,
    pub employee_count: usize,
    pub top_types: Vec<RankedType>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupingStats {
    pub dimension: GroupingDimension,
    pub groups: Vec<GroupTopTypes>,
}

impl GroupingStats {
    pub fn group(&self, name: &str) -> Option<&GroupTopTypes> {
        self.groups.iter().find(|group| group.group == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehavioralStats {
    pub employee_count: usize,
    /// Employees carrying a DISC score vector.
    pub profiled_count: usize,
    pub dimension_means: DiscVector,
    pub type_counts: Vec<TypeCount>,
    pub groupings: Vec<GroupingStats>,
    pub matched_evaluations: usize,
    pub ambiguous_evaluations: usize,
    pub unmatched_evaluations: usize,
}

impl BehavioralStats {
    pub fn grouping(&self, dimension: GroupingDimension) -> Option<&GroupingStats> {
        self.groupings
            .iter()
            .find(|grouping| grouping.dimension == dimension)
    }

    pub fn type_count(&self, disc_type: DiscType) -> usize {
        self.type_counts
            .iter()
            .find(|entry| entry.disc_type == disc_type)
            .map_or(0, |entry| entry.count)
    }
}

pub fn behavioral_stats(
    employees: &[EmployeeRecord],
    evaluations: &[EvaluationRecord],
    scope: &BehavioralScope,
) -> BehavioralStats {
    let scoped: Vec<EmployeeRecord> = employees
        .iter()
        .filter(|employee| scope.includes(employee))
        .cloned()
        .collect();

    let mut scores = vec![Running::default(); scoped.len()];
    let mut matched_evaluations = 0;
    let mut ambiguous_evaluations = 0;
    let mut unmatched_evaluations = 0;
    let directory = EmployeeDirectory::new(&scoped);

    for evaluation in evaluations
        .iter()
        .filter(|evaluation| scope.includes_evaluation(evaluation))
    {
        match directory.resolve(&evaluation.employee) {
            EmployeeMatch::Matched {
                index, strategy, ..
            } => {
                debug!(
                    evaluation = %evaluation.id,
                    employee = %scoped[index].name,
                    strategy = strategy.label(),
                    "evaluation matched to employee"
                );
                scores[index].push(evaluation.score);
                matched_evaluations += 1;
            }
            EmployeeMatch::Ambiguous { candidates } => {
                warn!(
                    evaluation = %evaluation.id,
                    name = %evaluation.name(),
                    candidates = candidates.len(),
                    "ambiguous employee match, evaluation left out of behavioral scores"
                );
                ambiguous_evaluations += 1;
            }
            EmployeeMatch::Unmatched => unmatched_evaluations += 1,
        }
    }

    let profiles: Vec<&DiscVector> = scoped
        .iter()
        .filter_map(|employee| employee.disc.as_ref())
        .collect();
    let dimension_mean = |dimension: DiscType| {
        let total: f64 = profiles.iter().map(|disc| disc.get(dimension)).sum();
        mean(total, profiles.len())
    };
    let dimension_means = DiscVector {
        d: dimension_mean(DiscType::D),
        i: dimension_mean(DiscType::I),
        s: dimension_mean(DiscType::S),
        c: dimension_mean(DiscType::C),
    };

    let type_counts = DiscType::ordered()
        .into_iter()
        .map(|disc_type| TypeCount {
            disc_type,
            count: scoped
                .iter()
                .filter(|employee| employee.primary_type() == Some(disc_type))
                .count(),
        })
        .collect();

    let groupings = GroupingDimension::ordered()
        .into_iter()
        .map(|dimension| GroupingStats {
            dimension,
            groups: top_types_by_group(dimension, &scoped, &scores),
        })
        .collect();

    BehavioralStats {
        employee_count: scoped.len(),
        profiled_count: profiles.len(),
        dimension_means,
        type_counts,
        groupings,
        matched_evaluations,
        ambiguous_evaluations,
        unmatched_evaluations,
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct TypeTally {
    count: usize,
    scores: Running,
}

#[derive(Debug, Default)]
struct GroupTally {
    employees: usize,
    by_type: [TypeTally; 4],
}

fn top_types_by_group(
    dimension: GroupingDimension,
    employees: &[EmployeeRecord],
    scores: &[Running],
) -> Vec<GroupTopTypes> {
    let mut groups: OrderedGroups<GroupTally> = OrderedGroups::default();

    for (employee, running) in employees.iter().zip(scores) {
        let tally = groups.entry(dimension.key(employee));
        tally.employees += 1;

        let Some(disc_type) = employee.primary_type() else {
            continue;
        };
        let slot = &mut tally.by_type[disc_type as usize];
        slot.count += 1;
        if running.count > 0 {
            slot.scores.push(running.mean());
        }
    }

    groups
        .iter()
        .map(|(group, tally)| GroupTopTypes {
            group: group.to_string(),
            employee_count: tally.employees,
            top_types: rank_types(&tally.by_type),
        })
        .collect()
}

/// Mean score descending, then head count descending; the stable sort keeps
/// D, I, S, C priority for full ties.
fn rank_types(by_type: &[TypeTally; 4]) -> Vec<RankedType> {
    let mut ranked: Vec<RankedType> = DiscType::ordered()
        .into_iter()
        .zip(by_type.iter())
        .filter(|(_, tally)| tally.count > 0)
        .map(|(disc_type, tally)| RankedType {
            disc_type,
            count: tally.count,
            scored_count: tally.scores.count,
            average_score: tally.scores.mean(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.average_score
            .total_cmp(&a.average_score)
            .then_with(|| b.count.cmp(&a.count))
    });
    ranked.truncate(TOP_TYPES);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::normalizer::{normalize_employees, normalize_evaluations, ScorePolicy};
    use serde_json::{json, Value};

    fn employees(raw: Value) -> Vec<EmployeeRecord> {
        normalize_employees(raw.as_array().expect("array fixture"))
    }

    fn evaluations(raw: Value) -> Vec<EvaluationRecord> {
        normalize_evaluations(raw.as_array().expect("array fixture"), ScorePolicy::PassThrough)
    }

    fn ranked_types(group: &GroupTopTypes) -> Vec<DiscType> {
        group.top_types.iter().map(|entry| entry.disc_type).collect()
    }

    #[test]
    fn most_frequent_type_ranks_first_without_scores() {
        let team = employees(json!([
            { "nome": "A", "setor": "TI", "perfilDisc": "D" },
            { "nome": "B", "setor": "TI", "perfilDisc": "I" },
            { "nome": "C", "setor": "TI", "perfilDisc": "S" },
            { "nome": "D", "setor": "TI", "perfilDisc": "C" },
            { "nome": "E", "setor": "TI", "perfilDisc": "I" },
        ]));

        let stats = behavioral_stats(&team, &[], &BehavioralScope::default());

        assert_eq!(stats.type_count(DiscType::I), 2);
        let sector = stats
            .grouping(GroupingDimension::Sector)
            .and_then(|grouping| grouping.group("TI"))
            .expect("TI group");
        assert_eq!(sector.employee_count, 5);
        assert_eq!(ranked_types(sector), vec![DiscType::I, DiscType::D, DiscType::S]);
        assert_eq!(sector.top_types[0].count, 2);
        assert_eq!(sector.top_types[0].average_score, 0.0);
    }

    #[test]
    fn types_rank_by_mean_evaluation_score() {
        let team = employees(json!([
            { "id": "1", "nome": "Ana", "cargo": "Dev", "perfilDisc": "I" },
            { "id": "2", "nome": "Bia", "cargo": "Dev", "perfilDisc": "I" },
            { "id": "3", "nome": "Caio", "cargo": "Dev", "perfilDisc": "C" },
            { "id": "4", "nome": "Davi", "cargo": "Dev", "perfilDisc": "S" },
        ]));
        let reviews = evaluations(json!([
            { "colaboradorId": "1", "media": 8 },
            { "colaboradorId": "2", "media": 6 },
            { "colaboradorId": "2", "media": 6 },
            { "nome": "caio", "media": 9 },
            { "nome": "Zeca", "media": 10 },
        ]));

        let stats = behavioral_stats(&team, &reviews, &BehavioralScope::default());

        assert_eq!(stats.matched_evaluations, 4);
        assert_eq!(stats.unmatched_evaluations, 1);
        let dev = stats
            .grouping(GroupingDimension::Role)
            .and_then(|grouping| grouping.group("Dev"))
            .expect("Dev group");
        assert_eq!(ranked_types(dev), vec![DiscType::C, DiscType::I, DiscType::S]);
        let influence = dev.top_types[1];
        assert_eq!(influence.count, 2);
        assert_eq!(influence.scored_count, 2);
        assert_eq!(influence.average_score, 7.0);
        assert_eq!(dev.top_types[2].scored_count, 0);
    }

    #[test]
    fn dimension_means_cover_profiled_employees_only() {
        let team = employees(json!([
            { "nome": "A", "disc": { "D": 80, "I": 20, "S": 10, "C": 40 } },
            { "nome": "B", "disc": { "D": 20, "I": 60, "S": 30, "C": 20 } },
            { "nome": "C", "perfilDisc": "S" },
        ]));

        let stats = behavioral_stats(&team, &[], &BehavioralScope::default());

        assert_eq!(stats.employee_count, 3);
        assert_eq!(stats.profiled_count, 2);
        assert_eq!(
            stats.dimension_means,
            DiscVector { d: 50.0, i: 40.0, s: 20.0, c: 30.0 }
        );
        assert_eq!(stats.type_count(DiscType::D), 1);
        assert_eq!(stats.type_count(DiscType::I), 1);
        assert_eq!(stats.type_count(DiscType::S), 1);
        assert_eq!(stats.type_count(DiscType::C), 0);
    }

    #[test]
    fn scope_filters_company_and_level() {
        let team = employees(json!([
            { "nome": "A", "empresaId": "acme", "nivel": "Senior", "perfilDisc": "D" },
            { "nome": "B", "empresaId": "acme", "nivel": "Junior", "perfilDisc": "I" },
            { "nome": "C", "empresaId": "globex", "nivel": "Senior", "perfilDisc": "S" },
            { "nome": "D", "nivel": "Senior", "perfilDisc": "C" },
        ]));
        let reviews = evaluations(json!([
            { "nome": "A", "empresaId": "acme", "media": 7 },
            { "nome": "A", "empresaId": "globex", "media": 1 },
            { "nome": "A", "media": 9 },
        ]));
        let scope = BehavioralScope {
            company: Some("acme".to_string()),
            level: Some("Senior".to_string()),
            ..BehavioralScope::default()
        };

        let stats = behavioral_stats(&team, &reviews, &scope);

        assert_eq!(stats.employee_count, 1);
        assert_eq!(stats.matched_evaluations, 2);
        let level = stats
            .grouping(GroupingDimension::Level)
            .and_then(|grouping| grouping.group("Senior"))
            .expect("Senior group");
        assert_eq!(level.top_types[0].disc_type, DiscType::D);
        assert_eq!(level.top_types[0].average_score, 8.0);
    }

    #[test]
    fn ambiguous_matches_are_counted_not_scored() {
        let team = employees(json!([
            { "nome": "Ana", "perfilDisc": "D" },
            { "nome": "ana", "perfilDisc": "I" },
        ]));
        let reviews = evaluations(json!([{ "nome": "Ana", "media": 10 }]));

        let stats = behavioral_stats(&team, &reviews, &BehavioralScope::default());

        assert_eq!(stats.ambiguous_evaluations, 1);
        assert_eq!(stats.matched_evaluations, 0);
        let group = &stats.groupings[0].groups[0];
        assert!(group.top_types.iter().all(|entry| entry.scored_count == 0));
    }

    #[test]
    fn empty_input_is_fully_populated() {
        let stats = behavioral_stats(&[], &[], &BehavioralScope::default());

        assert_eq!(stats.employee_count, 0);
        assert_eq!(stats.dimension_means, DiscVector::default());
        assert_eq!(stats.type_counts.len(), 4);
        assert_eq!(stats.groupings.len(), 3);
        assert!(stats.groupings.iter().all(|grouping| grouping.groups.is_empty()));
    }
}
