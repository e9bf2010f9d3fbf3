use super::{OrderedGroups, Running};
use crate::analytics::domain::EvaluationRecord;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetencyCell {
    pub sector: String,
    pub average: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetencyRow {
    pub criterion: String,
    /// Only sectors with at least one score for this criterion, in column order.
    pub cells: Vec<CompetencyCell>,
    /// Weighted across every sector: total sum over total samples.
    pub overall: f64,
}

impl CompetencyRow {
    pub fn cell(&self, sector: &str) -> Option<&CompetencyCell> {
        self.cells.iter().find(|cell| cell.sector == sector)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompetencyMatrix {
    /// Column headers, discovered from the data in first-seen order.
    pub sectors: Vec<String>,
    pub rows: Vec<CompetencyRow>,
}

impl CompetencyMatrix {
    pub fn row(&self, criterion: &str) -> Option<&CompetencyRow> {
        self.rows.iter().find(|row| row.criterion == criterion)
    }

    pub fn average(&self, criterion: &str, sector: &str) -> Option<f64> {
        self.row(criterion)
            .and_then(|row| row.cell(sector))
            .map(|cell| cell.average)
    }
}

pub fn competency_matrix(records: &[EvaluationRecord]) -> CompetencyMatrix {
    let mut columns: OrderedGroups<()> = OrderedGroups::default();
    let mut criteria: OrderedGroups<OrderedGroups<Running>> = OrderedGroups::default();

    for record in records {
        for criterion in &record.criteria {
            columns.entry(&record.sector);
            criteria
                .entry(&criterion.name)
                .entry(&record.sector)
                .push(criterion.score);
        }
    }

    let sectors: Vec<String> = columns.keys().map(str::to_string).collect();
    let rows = criteria
        .iter()
        .map(|(criterion, by_sector)| {
            let mut overall = Running::default();
            let cells = sectors
                .iter()
                .filter_map(|sector| {
                    let running = by_sector.get(sector)?;
                    overall.merge(*running);
                    Some(CompetencyCell {
                        sector: sector.clone(),
                        average: running.mean(),
                        samples: running.count,
                    })
                })
                .collect();

            CompetencyRow {
                criterion: criterion.to_string(),
                cells,
                overall: overall.mean(),
            }
        })
        .collect();

    CompetencyMatrix { sectors, rows }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionBucket {
    pub month: String,
    pub leader_average: f64,
    pub other_average: f64,
    pub overall_average: f64,
    pub leader_count: usize,
    pub other_count: usize,
    pub target: f64,
}

/// Monthly buckets in ascending `YYYY-MM` order. Undated records are skipped.
pub fn temporal_evolution(records: &[EvaluationRecord], target: f64) -> Vec<EvolutionBucket> {
    let mut months: BTreeMap<String, (Running, Running)> = BTreeMap::new();

    for record in records {
        let Some(month) = record.month_key() else {
            continue;
        };

        let (leaders, others) = months.entry(month).or_default();
        if record.is_leader() {
            leaders.push(record.score);
        } else {
            others.push(record.score);
        }
    }

    months
        .into_iter()
        .map(|(month, (leaders, others))| {
            let mut overall = leaders;
            overall.merge(others);
            EvolutionBucket {
                month,
                leader_average: leaders.mean(),
                other_average: others.mean(),
                overall_average: overall.mean(),
                leader_count: leaders.count,
                other_count: others.count,
                target,
            }
        })
        .collect()
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
    fn matrix_cell_averages_scores_per_sector() {
        let evaluations = records(json!([
            { "setor": "Vendas", "detalhes": { "Comunicação": 6 } },
            { "setor": "Vendas", "detalhes": { "Comunicação": 8 } },
        ]));

        let matrix = competency_matrix(&evaluations);

        assert_eq!(matrix.average("Comunicação", "Vendas"), Some(7.0));
        assert_eq!(matrix.sectors, vec!["Vendas".to_string()]);
    }

    #[test]
    fn matrix_overall_is_weighted_by_samples() {
        let evaluations = records(json!([
            { "setor": "TI", "detalhes": { "Foco": 10, "Comunicação": 4 } },
            { "setor": "RH", "detalhes": { "Foco": 4 } },
            { "setor": "RH", "detalhes": { "Foco": 7 } },
            { "setor": "Financeiro", "respostas": { "Comunicação": "9" } },
        ]));

        let matrix = competency_matrix(&evaluations);

        assert_eq!(
            matrix.sectors,
            vec!["TI".to_string(), "RH".to_string(), "Financeiro".to_string()]
        );
        let foco = matrix.row("Foco").expect("foco row");
        assert_eq!(foco.cells.len(), 2);
        assert_eq!(foco.cell("RH").map(|cell| cell.average), Some(5.5));
        assert_eq!(foco.overall, 7.0);

        let comunicacao = matrix.row("Comunicação").expect("comunicação row");
        let sectors: Vec<&str> = comunicacao
            .cells
            .iter()
            .map(|cell| cell.sector.as_str())
            .collect();
        assert_eq!(sectors, vec!["TI", "Financeiro"]);
        assert_eq!(comunicacao.overall, 6.5);
        assert!(comunicacao.cell("RH").is_none());
    }

    #[test]
    fn evolution_splits_leaders_and_others_per_month() {
        let evaluations = records(json!([
            { "tipo": "lider", "data": "2024-03-15", "media": 9 },
            { "tipo": "colaborador", "data": "2024-03-15", "media": 7 },
        ]));

        let buckets = temporal_evolution(&evaluations, 9.0);

        assert_eq!(buckets.len(), 1);
        let march = &buckets[0];
        assert_eq!(march.month, "2024-03");
        assert_eq!(march.leader_average, 9.0);
        assert_eq!(march.other_average, 7.0);
        assert_eq!(march.overall_average, 8.0);
        assert_eq!(march.target, 9.0);
    }

    #[test]
    fn evolution_is_sorted_and_skips_undated_records() {
        let evaluations = records(json!([
            { "cargo": "Líder de Loja", "data": "2024-05-02", "media": 6 },
            { "data": "2024-01-20", "media": 8 },
            { "data": "sem data", "media": 10 },
            { "data": "2024-05-30", "media": 4 },
        ]));

        let buckets = temporal_evolution(&evaluations, 8.5);

        let months: Vec<&str> = buckets.iter().map(|bucket| bucket.month.as_str()).collect();
        assert_eq!(months, vec!["2024-01", "2024-05"]);

        let january = &buckets[0];
        assert_eq!(january.leader_average, 0.0);
        assert_eq!(january.leader_count, 0);
        assert_eq!(january.other_average, 8.0);

        let may = &buckets[1];
        assert_eq!(may.leader_average, 6.0);
        assert_eq!(may.other_average, 4.0);
        assert_eq!(may.overall_average, 5.0);
        assert!(buckets.iter().all(|bucket| bucket.target == 8.5));
    }
}
