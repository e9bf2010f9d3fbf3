use crate::analytics::aggregation::GroupingDimension;
use crate::analytics::domain::DiscType;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionPoint {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPerformerView {
    pub record_id: String,
    pub name: String,
    pub sector: String,
    pub role: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralMetricsView {
    pub total_evaluations: usize,
    pub average_score: f64,
    pub sector_count: usize,
    pub employee_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_performer: Option<TopPerformerView>,
    pub sector_distribution: Vec<DistributionPoint>,
    pub role_distribution: Vec<DistributionPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetencyCellView {
    pub sector: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetencyRowView {
    pub criterion: String,
    pub overall: f64,
    pub cells: Vec<CompetencyCellView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetencyMatrixView {
    pub sectors: Vec<String>,
    pub rows: Vec<CompetencyRowView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionPoint {
    pub month: String,
    pub leaders: f64,
    pub others: f64,
    pub overall: f64,
    pub target: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub record_id: String,
    pub name: String,
    pub sector: String,
    pub month: String,
    pub individual: f64,
    pub sector_average: f64,
    pub company_average: f64,
    pub vs_sector: f64,
    pub vs_company: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub position: usize,
    pub record_id: String,
    pub name: String,
    pub sector: String,
    pub month: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub general: GeneralMetricsView,
    pub competency: CompetencyMatrixView,
    pub evolution: Vec<EvolutionPoint>,
    pub comparison: Vec<ComparisonRow>,
    pub ranking: Vec<RankingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscDimensionView {
    pub dimension: DiscType,
    pub label: &'static str,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscTypeCountView {
    pub disc_type: DiscType,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscRankedTypeView {
    pub disc_type: DiscType,
    pub label: &'static str,
    pub count: usize,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscGroupView {
    pub group: String,
    pub employee_count: usize,
    pub top_types: Vec<DiscRankedTypeView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscGroupingView {
    pub dimension: GroupingDimension,
    pub dimension_label: &'static str,
    pub groups: Vec<DiscGroupView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BehavioralView {
    pub employee_count: usize,
    pub profiled_count: usize,
    pub dimensions: Vec<DiscDimensionView>,
    pub type_distribution: Vec<DiscTypeCountView>,
    pub groupings: Vec<DiscGroupingView>,
    pub unmatched_evaluations: usize,
    pub ambiguous_evaluations: usize,
}
