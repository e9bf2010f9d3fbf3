use super::{GeneralMetrics, OrderedGroups, Running};
use crate::analytics::domain::EvaluationRecord;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorAverage {
    pub sector: String,
    pub average: f64,
    pub count: usize,
}

/// One evaluation placed against its sector and the whole company. Above or
/// below classification is left to the consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparativeEntry {
    pub record_id: String,
    pub name: String,
    pub sector: String,
    pub month: String,
    pub individual_score: f64,
    pub sector_average: f64,
    pub company_average: f64,
}

impl ComparativeEntry {
    pub fn vs_sector(&self) -> f64 {
        self.individual_score - self.sector_average
    }

    pub fn vs_company(&self) -> f64 {
        self.individual_score - self.company_average
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparativeMetrics {
    pub company_average: f64,
    pub sector_averages: Vec<SectorAverage>,
    pub entries: Vec<ComparativeEntry>,
}

pub fn comparative_metrics(
    records: &[EvaluationRecord],
    general: &GeneralMetrics,
) -> ComparativeMetrics {
    let mut sectors: OrderedGroups<Running> = OrderedGroups::default();
    for record in records {
        sectors.entry(&record.sector).push(record.score);
    }

    let company_average = general.average_score;
    let entries = records
        .iter()
        .map(|record| ComparativeEntry {
            record_id: record.id.clone(),
            name: record.name().to_string(),
            sector: record.sector.clone(),
            month: record.month_label(),
            individual_score: record.score,
            sector_average: sectors
                .get(&record.sector)
                .map(Running::mean)
                .unwrap_or(0.0),
            company_average,
        })
        .collect();

    let sector_averages = sectors
        .iter()
        .map(|(sector, running)| SectorAverage {
            sector: sector.to_string(),
            average: running.mean(),
            count: running.count,
        })
        .collect();

    ComparativeMetrics {
        company_average,
        sector_averages,
        entries,
    }
}
