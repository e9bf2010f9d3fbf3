//! Raw document keys, current schema first and legacy names after.

use crate::analytics::domain::EvaluationKind;

pub(crate) const ID: &str = "id";
pub(crate) const COMPANY: &str = "empresaId";
pub(crate) const NAME: [&str; 2] = ["nome", "colaborador"];
pub(crate) const SECTOR: &str = "setor";
pub(crate) const ROLE: &str = "cargo";

pub(crate) mod evaluation {
    pub(crate) const EMPLOYEE_ID: &str = "colaboradorId";
    pub(crate) const EMPLOYEE_CODE: &str = "matricula";
    pub(crate) const KIND: &str = "tipo";
    pub(crate) const DATE: &str = "data";
    pub(crate) const SCORE: [&str; 2] = ["media", "nota"];
    pub(crate) const CRITERIA: [&str; 2] = ["detalhes", "respostas"];
}

pub(crate) mod employee {
    pub(crate) const NAME: [&str; 2] = ["nome", "nomeCompleto"];
    pub(crate) const CODE: &str = "matricula";
    pub(crate) const LEVEL: &str = "nivel";
    pub(crate) const ADMISSION: &str = "dataAdmissao";
    pub(crate) const DISC_TYPE: &str = "perfilDisc";
    pub(crate) const DISC_SCORES: &str = "disc";
}

pub(crate) fn evaluation_kind(value: &str) -> Option<EvaluationKind> {
    match value.trim().to_lowercase().as_str() {
        "lider" | "líder" | "leader" | "gestor" => Some(EvaluationKind::Leader),
        "colaborador" | "contributor" | "liderado" => Some(EvaluationKind::Contributor),
        _ => None,
    }
}
