use super::domain::EvaluationRecord;
use serde::{Deserialize, Serialize};

/// Declarative dashboard filter. Empty strings and `None` both mean "no
/// constraint"; date bounds are inclusive `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub name: String,
    pub sector: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && bound(&self.sector).is_none()
            && bound(&self.start).is_none()
            && bound(&self.end).is_none()
    }

    /// Date bounds compare lexically, which matches chronological order for
    /// ISO dates. Undated records carry an empty ISO string and therefore fail
    /// any lower bound.
    pub fn matches(&self, record: &EvaluationRecord) -> bool {
        let needle = self.name.trim().to_lowercase();
        if !needle.is_empty() && !record.name().to_lowercase().contains(&needle) {
            return false;
        }

        if let Some(sector) = bound(&self.sector) {
            if record.sector != sector {
                return false;
            }
        }

        let start = bound(&self.start);
        let end = bound(&self.end);
        if start.is_none() && end.is_none() {
            return true;
        }

        let date = record.date_iso();
        if date.is_empty() {
            return false;
        }

        start.map_or(true, |start| date.as_str() >= start)
            && end.map_or(true, |end| date.as_str() <= end)
    }
}

fn bound(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

pub fn filter(records: &[EvaluationRecord], spec: &FilterSpec) -> Vec<EvaluationRecord> {
    records
        .iter()
        .filter(|record| spec.matches(record))
        .cloned()
        .collect()
}
