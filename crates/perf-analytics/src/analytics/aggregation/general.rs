use super::{mean, OrderedGroups};
use crate::analytics::domain::EvaluationRecord;
use crate::analytics::normalizer::normalize_name;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPerformer {
    /// Position of the record in the aggregated slice.
    pub position: usize,
    pub record_id: String,
    pub name: String,
    pub sector: String,
    pub role: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneralMetrics {
    pub total: usize,
    pub average_score: f64,
    pub sector_count: usize,
    pub sector_distribution: Vec<GroupCount>,
    pub role_distribution: Vec<GroupCount>,
    pub employee_count: usize,
    pub top_performer: Option<TopPerformer>,
}

pub fn general_metrics(records: &[EvaluationRecord]) -> GeneralMetrics {
    let mut sectors: OrderedGroups<usize> = OrderedGroups::default();
    let mut roles: OrderedGroups<usize> = OrderedGroups::default();
    let mut employees = HashSet::new();
    let mut total_score = 0.0;

    for record in records {
        *sectors.entry(&record.sector) += 1;
        *roles.entry(&record.role) += 1;
        employees.insert(normalize_name(record.name()));
        total_score += record.score;
    }

    GeneralMetrics {
        total: records.len(),
        average_score: mean(total_score, records.len()),
        sector_count: sectors.len(),
        sector_distribution: distribution(&sectors),
        role_distribution: distribution(&roles),
        employee_count: employees.len(),
        top_performer: top_performer(records),
    }
}

fn distribution(groups: &OrderedGroups<usize>) -> Vec<GroupCount> {
    groups
        .iter()
        .map(|(label, count)| GroupCount {
            label: label.to_string(),
            count: *count,
        })
        .collect()
}

/// Stable descending sort by score; on ties the earliest record wins.
fn top_performer(records: &[EvaluationRecord]) -> Option<TopPerformer> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|a, b| records[*b].score.total_cmp(&records[*a].score));

    order.first().map(|position| {
        let record = &records[*position];
        TopPerformer {
            position: *position,
            record_id: record.id.clone(),
            name: record.name().to_string(),
            sector: record.sector.clone(),
            role: record.role.clone(),
            score: record.score,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::normalizer::{normalize_evaluations, ScorePolicy};
    use serde_json::json;

    fn records(raw: serde_json::Value) -> Vec<EvaluationRecord> {
        let raw = raw.as_array().cloned().unwrap_or_default();
        normalize_evaluations(&raw, ScorePolicy::PassThrough)
    }

    #[test]
    fn empty_set_yields_zeroed_metrics() {
        let metrics = general_metrics(&[]);
        assert_eq!(metrics, GeneralMetrics::default());
        assert_eq!(metrics.average_score, 0.0);
        assert!(metrics.top_performer.is_none());
    }

    #[test]
    fn distributions_follow_first_seen_order() {
        let evaluations = records(json!([
            { "nome": "Ana", "setor": "TI", "cargo": "Dev", "media": 8 },
            { "nome": "Bia", "setor": "RH", "cargo": "Analista", "media": 6 },
            { "nome": "ana ", "setor": "TI", "media": 7 },
            { "nome": "Caio", "media": 9 },
        ]));

        let metrics = general_metrics(&evaluations);

        assert_eq!(metrics.total, 4);
        assert_eq!(metrics.average_score, 7.5);
        assert_eq!(metrics.sector_count, 3);
        let sectors: Vec<(&str, usize)> = metrics
            .sector_distribution
            .iter()
            .map(|entry| (entry.label.as_str(), entry.count))
            .collect();
        assert_eq!(sectors, vec![("TI", 2), ("RH", 1), ("Geral", 1)]);
        let roles: Vec<&str> = metrics
            .role_distribution
            .iter()
            .map(|entry| entry.label.as_str())
            .collect();
        assert_eq!(roles, vec!["Dev", "Analista", "Não definido"]);
        assert_eq!(metrics.employee_count, 3);
    }

    #[test]
    fn top_performer_ties_go_to_first_record() {
        let evaluations = records(json!([
            { "id": "a", "nome": "Ana", "media": 7 },
            { "id": "b", "nome": "Bia", "media": 9.5 },
            { "id": "c", "nome": "Caio", "media": 9.5 },
        ]));

        let top = general_metrics(&evaluations)
            .top_performer
            .expect("top performer present");
        assert_eq!(top.record_id, "b");
        assert_eq!(top.position, 1);
        assert_eq!(top.score, 9.5);
    }

    #[test]
    fn mean_stays_in_range_for_in_range_scores() {
        let evaluations = records(json!([
            { "media": 0 }, { "media": 10 }, { "media": "3,3" }, { "media": 10 }
        ]));

        let average = general_metrics(&evaluations).average_score;
        assert!((0.0..=10.0).contains(&average));
    }
}
