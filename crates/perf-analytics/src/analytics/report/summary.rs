use super::views::{
    BehavioralView, CompetencyCellView, CompetencyMatrixView, CompetencyRowView, ComparisonRow,
    DashboardView, DiscDimensionView, DiscGroupView, DiscGroupingView, DiscRankedTypeView,
    DiscTypeCountView, DistributionPoint, EvolutionPoint, GeneralMetricsView, RankingEntry,
    TopPerformerView,
};
use crate::analytics::aggregation::{
    comparative_metrics, competency_matrix, general_metrics, temporal_evolution, BehavioralStats,
    ComparativeEntry, ComparativeMetrics, CompetencyMatrix, EvolutionBucket, GeneralMetrics,
    GroupCount,
};
use crate::analytics::domain::{DiscType, EvaluationRecord};

/// The non-behavioral derivations for one filtered evaluation set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsReport {
    pub general: GeneralMetrics,
    pub competency: CompetencyMatrix,
    pub evolution: Vec<EvolutionBucket>,
    pub comparative: ComparativeMetrics,
}

impl AnalyticsReport {
    pub fn build(records: &[EvaluationRecord], target_score: f64) -> Self {
        let general = general_metrics(records);
        let comparative = comparative_metrics(records, &general);

        Self {
            competency: competency_matrix(records),
            evolution: temporal_evolution(records, target_score),
            general,
            comparative,
        }
    }

    pub fn summary(&self) -> DashboardView {
        let general = &self.general;
        let top_performer = general.top_performer.as_ref().map(|top| TopPerformerView {
            record_id: top.record_id.clone(),
            name: top.name.clone(),
            sector: top.sector.clone(),
            role: top.role.clone(),
            score: top.score,
        });

        let competency = CompetencyMatrixView {
            sectors: self.competency.sectors.clone(),
            rows: self
                .competency
                .rows
                .iter()
                .map(|row| CompetencyRowView {
                    criterion: row.criterion.clone(),
                    overall: row.overall,
                    cells: row
                        .cells
                        .iter()
                        .map(|cell| CompetencyCellView {
                            sector: cell.sector.clone(),
                            average: cell.average,
                        })
                        .collect(),
                })
                .collect(),
        };

        let evolution = self
            .evolution
            .iter()
            .map(|bucket| EvolutionPoint {
                month: bucket.month.clone(),
                leaders: bucket.leader_average,
                others: bucket.other_average,
                overall: bucket.overall_average,
                target: bucket.target,
            })
            .collect();

        let comparison = self
            .comparative
            .entries
            .iter()
            .map(|entry| ComparisonRow {
                record_id: entry.record_id.clone(),
                name: entry.name.clone(),
                sector: entry.sector.clone(),
                month: entry.month.clone(),
                individual: entry.individual_score,
                sector_average: entry.sector_average,
                company_average: entry.company_average,
                vs_sector: entry.vs_sector(),
                vs_company: entry.vs_company(),
            })
            .collect();

        DashboardView {
            general: GeneralMetricsView {
                total_evaluations: general.total,
                average_score: general.average_score,
                sector_count: general.sector_count,
                employee_count: general.employee_count,
                top_performer,
                sector_distribution: chart_points(&general.sector_distribution),
                role_distribution: chart_points(&general.role_distribution),
            },
            competency,
            evolution,
            comparison,
            ranking: ranking(&self.comparative.entries),
        }
    }
}

fn chart_points(groups: &[GroupCount]) -> Vec<DistributionPoint> {
    groups
        .iter()
        .map(|group| DistributionPoint {
            name: group.label.clone(),
            value: group.count,
        })
        .collect()
}

/// Descending score; the stable sort keeps input order between equal scores.
fn ranking(entries: &[ComparativeEntry]) -> Vec<RankingEntry> {
    let mut ordered: Vec<&ComparativeEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| b.individual_score.total_cmp(&a.individual_score));

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, entry)| RankingEntry {
            position: index + 1,
            record_id: entry.record_id.clone(),
            name: entry.name.clone(),
            sector: entry.sector.clone(),
            month: entry.month.clone(),
            score: entry.individual_score,
        })
        .collect()
}

impl BehavioralStats {
    pub fn summary(&self) -> BehavioralView {
        let dimensions = DiscType::ordered()
            .into_iter()
            .map(|dimension| DiscDimensionView {
                dimension,
                label: dimension.label(),
                average: self.dimension_means.get(dimension),
            })
            .collect();

        let type_distribution = self
            .type_counts
            .iter()
            .map(|entry| DiscTypeCountView {
                disc_type: entry.disc_type,
                label: entry.disc_type.label(),
                count: entry.count,
            })
            .collect();

        let groupings = self
            .groupings
            .iter()
            .map(|grouping| DiscGroupingView {
                dimension: grouping.dimension,
                dimension_label: grouping.dimension.label(),
                groups: grouping
                    .groups
                    .iter()
                    .map(|group| DiscGroupView {
                        group: group.group.clone(),
                        employee_count: group.employee_count,
                        top_types: group
                            .top_types
                            .iter()
                            .map(|ranked| DiscRankedTypeView {
                                disc_type: ranked.disc_type,
                                label: ranked.disc_type.label(),
                                count: ranked.count,
                                average_score: ranked.average_score,
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        BehavioralView {
            employee_count: self.employee_count,
            profiled_count: self.profiled_count,
            dimensions,
            type_distribution,
            groupings,
            unmatched_evaluations: self.unmatched_evaluations,
            ambiguous_evaluations: self.ambiguous_evaluations,
        }
    }
}
