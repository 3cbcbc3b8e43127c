//! Class (turma) record and payload.

use serde::{Deserialize, Serialize};

use super::Id;

/// A class as returned by `/turmas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turma {
    pub id: Id,
    pub nome: String,
    pub codigo: String,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default = "default_true")]
    pub ativa: bool,
    #[serde(default)]
    pub total_alunos: Option<u32>,
    #[serde(default)]
    pub total_presencas: Option<u32>,
}

/// Body for `POST /turmas` and `PUT /turmas/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurmaPayload {
    pub nome: String,
    pub codigo: String,
    pub descricao: Option<String>,
    pub ativa: bool,
}

fn default_true() -> bool {
    true
}
