//! Converts loosely typed evaluation and employee documents into the canonical
//! records the rest of the pipeline works on. Every function here is total:
//! missing or malformed fields degrade to documented fallbacks.

mod coerce;
mod fields;

pub use coerce::coerce_score;
pub(crate) use coerce::normalize_name;

use super::domain::{
    CriterionScore, DiscType, DiscVector, EmployeeRecord, EmployeeRef, EvaluationRecord,
    DEFAULT_LEVEL, DEFAULT_ROLE, DEFAULT_SECTOR, UNKNOWN_NAME,
};
use coerce::{first_text, parse_date, text};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What to do with scores outside the nominal `0..=10` range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    #[default]
    PassThrough,
    Clamp,
}

impl ScorePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "passthrough" | "pass_through" | "pass-through" => Some(Self::PassThrough),
            "clamp" => Some(Self::Clamp),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PassThrough => "passthrough",
            Self::Clamp => "clamp",
        }
    }

    pub fn apply(self, score: f64) -> f64 {
        match self {
            Self::PassThrough => score,
            Self::Clamp => score.clamp(0.0, 10.0),
        }
    }
}

pub fn normalize_evaluation(raw: &Value, policy: ScorePolicy) -> EvaluationRecord {
    let empty = Map::new();
    let record = raw.as_object().unwrap_or(&empty);

    let score = fields::evaluation::SCORE
        .iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
        .map(coerce_score)
        .unwrap_or(0.0);

    EvaluationRecord {
        id: text(record.get(fields::ID)).unwrap_or_default(),
        employee: EmployeeRef {
            id: text(record.get(fields::evaluation::EMPLOYEE_ID)),
            code: text(record.get(fields::evaluation::EMPLOYEE_CODE)),
            name: first_text(record, &fields::NAME).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        },
        sector: text(record.get(fields::SECTOR)).unwrap_or_else(|| DEFAULT_SECTOR.to_string()),
        role: text(record.get(fields::ROLE)).unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        kind: text(record.get(fields::evaluation::KIND))
            .and_then(|kind| fields::evaluation_kind(&kind)),
        date: parse_date(record.get(fields::evaluation::DATE)),
        score: policy.apply(score),
        criteria: criteria(record, policy),
        company: text(record.get(fields::COMPANY)),
    }
}

/// Current-schema criteria win outright; the legacy map is only read when the
/// current one is absent.
fn criteria(record: &Map<String, Value>, policy: ScorePolicy) -> Vec<CriterionScore> {
    let Some(source) = fields::evaluation::CRITERIA
        .iter()
        .find_map(|key| record.get(*key).and_then(Value::as_object))
    else {
        return Vec::new();
    };

    source
        .iter()
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, value)| CriterionScore {
            name: name.trim().to_string(),
            score: policy.apply(coerce_score(value)),
        })
        .collect()
}

pub fn normalize_employee(raw: &Value) -> EmployeeRecord {
    let empty = Map::new();
    let record = raw.as_object().unwrap_or(&empty);

    let disc_type = text(record.get(fields::employee::DISC_TYPE))
        .and_then(|code| DiscType::from_code(&code));
    let disc = record
        .get(fields::employee::DISC_SCORES)
        .and_then(Value::as_object)
        .map(disc_vector);

    EmployeeRecord {
        id: text(record.get(fields::ID)),
        code: text(record.get(fields::employee::CODE)),
        name: first_text(record, &fields::employee::NAME)
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        sector: text(record.get(fields::SECTOR)).unwrap_or_else(|| DEFAULT_SECTOR.to_string()),
        role: text(record.get(fields::ROLE)).unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        level: text(record.get(fields::employee::LEVEL))
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
        admission_date: parse_date(record.get(fields::employee::ADMISSION)),
        disc_type,
        disc,
        company: text(record.get(fields::COMPANY)),
    }
}

fn disc_vector(scores: &Map<String, Value>) -> DiscVector {
    let dimension = |upper: &str, lower: &str| {
        scores
            .get(upper)
            .or_else(|| scores.get(lower))
            .map(coerce_score)
            .unwrap_or(0.0)
    };

    DiscVector {
        d: dimension("D", "d"),
        i: dimension("I", "i"),
        s: dimension("S", "s"),
        c: dimension("C", "c"),
    }
}

pub fn normalize_evaluations(raw: &[Value], policy: ScorePolicy) -> Vec<EvaluationRecord> {
    raw.iter()
        .map(|record| normalize_evaluation(record, policy))
        .collect()
}

pub fn normalize_employees(raw: &[Value]) -> Vec<EmployeeRecord> {
    raw.iter().map(normalize_employee).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::domain::EvaluationKind;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn evaluation_fields_map_to_canonical_record() {
        let raw = json!({
            "id": "ev-10",
            "colaboradorId": "emp-7",
            "matricula": 1042,
            "nome": "Ana Souza",
            "setor": "Vendas",
            "cargo": "Líder Comercial",
            "tipo": "lider",
            "data": "2024-03-15",
            "media": "8,5",
            "detalhes": { "Comunicação": "9", "Liderança": 8 },
            "empresaId": "acme"
        });

        let record = normalize_evaluation(&raw, ScorePolicy::PassThrough);

        assert_eq!(record.id, "ev-10");
        assert_eq!(record.employee.id.as_deref(), Some("emp-7"));
        assert_eq!(record.employee.code.as_deref(), Some("1042"));
        assert_eq!(record.name(), "Ana Souza");
        assert_eq!(record.sector, "Vendas");
        assert_eq!(record.kind, Some(EvaluationKind::Leader));
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(record.score, 8.5);
        assert_eq!(
            record.criteria,
            vec![
                CriterionScore { name: "Comunicação".to_string(), score: 9.0 },
                CriterionScore { name: "Liderança".to_string(), score: 8.0 },
            ]
        );
        assert_eq!(record.company.as_deref(), Some("acme"));
    }

    #[test]
    fn missing_fields_fall_back_to_labels() {
        let record = normalize_evaluation(&json!({ "media": "abc" }), ScorePolicy::PassThrough);

        assert_eq!(record.name(), UNKNOWN_NAME);
        assert_eq!(record.sector, DEFAULT_SECTOR);
        assert_eq!(record.role, DEFAULT_ROLE);
        assert_eq!(record.score, 0.0);
        assert!(record.kind.is_none());
        assert!(record.date.is_none());
        assert!(record.criteria.is_empty());
    }

    #[test]
    fn normalization_is_total_over_arbitrary_values() {
        for raw in [
            json!(null),
            json!(42),
            json!("texto"),
            json!([1, 2, 3]),
            json!({ "nome": null, "setor": {}, "media": [], "detalhes": "x", "data": 5 }),
        ] {
            let record = normalize_evaluation(&raw, ScorePolicy::PassThrough);
            assert!(record.score.is_finite());
            assert_eq!(record.score, 0.0);
            assert_eq!(record.sector, DEFAULT_SECTOR);

            let employee = normalize_employee(&raw);
            assert_eq!(employee.name, UNKNOWN_NAME);
            assert!(employee.primary_type().is_none());
        }
    }

    #[test]
    fn name_resolution_uses_first_non_empty_candidate() {
        let record = normalize_evaluation(
            &json!({ "nome": "  ", "colaborador": "Bruno Lima" }),
            ScorePolicy::PassThrough,
        );
        assert_eq!(record.name(), "Bruno Lima");

        let record = normalize_evaluation(
            &json!({ "nome": "Carla", "colaborador": "Bruno Lima" }),
            ScorePolicy::PassThrough,
        );
        assert_eq!(record.name(), "Carla");
    }

    #[test]
    fn current_criteria_schema_wins_without_merging_legacy() {
        let raw = json!({
            "detalhes": { "Comunicação": 7 },
            "respostas": { "Pontualidade": 9 }
        });
        let record = normalize_evaluation(&raw, ScorePolicy::PassThrough);
        assert_eq!(record.criteria.len(), 1);
        assert_eq!(record.criteria[0].name, "Comunicação");

        let legacy = json!({ "respostas": { "Pontualidade": "9,5", "Foco": "n/a" } });
        let record = normalize_evaluation(&legacy, ScorePolicy::PassThrough);
        assert_eq!(record.criteria[0].score, 9.5);
        assert_eq!(record.criteria[1].score, 0.0);
    }

    #[test]
    fn legacy_score_field_is_used_when_media_missing() {
        let record = normalize_evaluation(&json!({ "nota": 6 }), ScorePolicy::PassThrough);
        assert_eq!(record.score, 6.0);
    }

    #[test]
    fn score_policy_controls_out_of_range_values() {
        let raw = json!({ "media": 12, "detalhes": { "Foco": -3 } });

        let passthrough = normalize_evaluation(&raw, ScorePolicy::PassThrough);
        assert_eq!(passthrough.score, 12.0);
        assert_eq!(passthrough.criteria[0].score, -3.0);

        let clamped = normalize_evaluation(&raw, ScorePolicy::Clamp);
        assert_eq!(clamped.score, 10.0);
        assert_eq!(clamped.criteria[0].score, 0.0);
    }

    #[test]
    fn score_policy_parses_config_values() {
        assert_eq!(ScorePolicy::parse("Clamp"), Some(ScorePolicy::Clamp));
        assert_eq!(ScorePolicy::parse("passthrough"), Some(ScorePolicy::PassThrough));
        assert_eq!(ScorePolicy::parse("round"), None);
    }

    #[test]
    fn employee_disc_profile_is_resolved() {
        let declared = normalize_employee(&json!({
            "id": "emp-1",
            "nomeCompleto": "Diego Alves",
            "nivel": "Pleno",
            "perfilDisc": "s",
            "disc": { "D": 90, "I": 10, "S": 20, "C": 5 }
        }));
        assert_eq!(declared.name, "Diego Alves");
        assert_eq!(declared.level, "Pleno");
        assert_eq!(declared.primary_type(), Some(DiscType::S));

        let derived = normalize_employee(&json!({
            "nome": "Eva",
            "disc": { "d": "30", "i": "30", "s": "10,5", "c": 2 }
        }));
        assert_eq!(derived.disc_type, None);
        assert_eq!(derived.primary_type(), Some(DiscType::D));
        assert_eq!(derived.disc.map(|disc| disc.s), Some(10.5));
        assert_eq!(derived.level, DEFAULT_LEVEL);
    }
}
