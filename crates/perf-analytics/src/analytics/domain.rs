use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SECTOR: &str = "Geral";
pub const DEFAULT_ROLE: &str = "Não definido";
pub const DEFAULT_LEVEL: &str = "Não definido";
pub const UNKNOWN_NAME: &str = "Desconhecido";
pub const UNKNOWN_MONTH: &str = "unknown";

/// Role fragments that mark an evaluation as a leadership assessment when the
/// evaluation type itself is missing.
pub const LEADER_ROLE_TOKENS: [&str; 2] = ["líder", "lider"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationKind {
    Leader,
    Contributor,
}

/// How an evaluation points back at the evaluated employee. Any of the three
/// may be missing; resolution happens in [`super::matching`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeRef {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionScore {
    pub name: String,
    pub score: f64,
}

/// Canonical evaluation produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationRecord {
    pub id: String,
    pub employee: EmployeeRef,
    pub sector: String,
    pub role: String,
    pub kind: Option<EvaluationKind>,
    pub date: Option<NaiveDate>,
    pub score: f64,
    pub criteria: Vec<CriterionScore>,
    pub company: Option<String>,
}

impl EvaluationRecord {
    pub fn name(&self) -> &str {
        &self.employee.name
    }

    /// `YYYY-MM-DD`, or an empty string when the date could not be parsed.
    pub fn date_iso(&self) -> String {
        self.date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    pub fn month_key(&self) -> Option<String> {
        self.date.map(|date| date.format("%Y-%m").to_string())
    }

    pub fn month_label(&self) -> String {
        self.month_key()
            .unwrap_or_else(|| UNKNOWN_MONTH.to_string())
    }

    pub fn is_leader(&self) -> bool {
        match self.kind {
            Some(kind) => kind == EvaluationKind::Leader,
            None => {
                let role = self.role.to_lowercase();
                LEADER_ROLE_TOKENS.iter().any(|token| role.contains(token))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiscType {
    D,
    I,
    S,
    C,
}

impl DiscType {
    /// Enumeration order doubles as the tie-break priority.
    pub const fn ordered() -> [Self; 4] {
        [Self::D, Self::I, Self::S, Self::C]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::D => "Dominância",
            Self::I => "Influência",
            Self::S => "Estabilidade",
            Self::C => "Conformidade",
        }
    }

    pub fn from_code(value: &str) -> Option<Self> {
        match value.trim().chars().next()?.to_ascii_uppercase() {
            'D' => Some(Self::D),
            'I' => Some(Self::I),
            'S' => Some(Self::S),
            'C' => Some(Self::C),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscVector {
    pub d: f64,
    pub i: f64,
    pub s: f64,
    pub c: f64,
}

impl DiscVector {
    pub fn get(&self, dimension: DiscType) -> f64 {
        match dimension {
            DiscType::D => self.d,
            DiscType::I => self.i,
            DiscType::S => self.s,
            DiscType::C => self.c,
        }
    }

    /// Strict maximum with D > I > S > C on ties. A vector without any
    /// positive dimension carries no profile.
    pub fn primary(&self) -> Option<DiscType> {
        let mut best: Option<(DiscType, f64)> = None;
        for dimension in DiscType::ordered() {
            let value = self.get(dimension);
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((dimension, value)),
            }
        }

        best.filter(|(_, value)| *value > 0.0)
            .map(|(dimension, _)| dimension)
    }
}

/// Canonical employee produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRecord {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: String,
    pub sector: String,
    pub role: String,
    pub level: String,
    pub admission_date: Option<NaiveDate>,
    pub disc_type: Option<DiscType>,
    pub disc: Option<DiscVector>,
    pub company: Option<String>,
}

impl EmployeeRecord {
    /// Declared primary type, otherwise the one derived from the score vector.
    /// An all-zero vector is an unfilled questionnaire and yields `None`.
    pub fn primary_type(&self) -> Option<DiscType> {
        self.disc_type
            .or_else(|| self.disc.as_ref().and_then(DiscVector::primary))
    }
}
