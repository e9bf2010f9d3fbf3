use super::aggregation::{behavioral_stats, BehavioralScope};
use super::domain::{EmployeeRecord, EvaluationRecord};
use super::filter::{filter, FilterSpec};
use super::normalizer::{normalize_employees, normalize_evaluations};
use super::report::views::{BehavioralView, DashboardView};
use super::report::AnalyticsReport;
use crate::config::AnalyticsConfig;
use serde_json::Value;
use tracing::debug;

/// Stateless pipeline runner: normalize, filter, aggregate, assemble. Every
/// call recomputes from the inputs it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Same engine with a different reference line for the monthly series.
    pub fn with_target_score(self, target_score: f64) -> Self {
        Self {
            config: AnalyticsConfig {
                target_score,
                ..self.config
            },
        }
    }

    pub fn normalize_evaluations(&self, raw: &[Value]) -> Vec<EvaluationRecord> {
        normalize_evaluations(raw, self.config.score_policy)
    }

    pub fn normalize_employees(&self, raw: &[Value]) -> Vec<EmployeeRecord> {
        normalize_employees(raw)
    }

    pub fn aggregate(&self, records: &[EvaluationRecord]) -> AnalyticsReport {
        AnalyticsReport::build(records, self.config.target_score)
    }

    pub fn dashboard(&self, raw_evaluations: &[Value], spec: &FilterSpec) -> DashboardView {
        let records = self.normalize_evaluations(raw_evaluations);
        let filtered = filter(&records, spec);
        debug!(
            received = raw_evaluations.len(),
            retained = filtered.len(),
            target_score = self.config.target_score,
            "building evaluation dashboard"
        );

        self.aggregate(&filtered).summary()
    }

    pub fn behavioral(
        &self,
        raw_employees: &[Value],
        raw_evaluations: &[Value],
        scope: &BehavioralScope,
    ) -> BehavioralView {
        let employees = self.normalize_employees(raw_employees);
        let evaluations = self.normalize_evaluations(raw_evaluations);
        let stats = behavioral_stats(&employees, &evaluations, scope);
        debug!(
            employees = raw_employees.len(),
            in_scope = stats.employee_count,
            matched = stats.matched_evaluations,
            ambiguous = stats.ambiguous_evaluations,
            "building behavioral profile summary"
        );

        stats.summary()
    }
}
