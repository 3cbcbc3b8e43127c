//! Student (aluno) record and payload.

use serde::{Deserialize, Serialize};

use super::Id;

/// A student as returned by `/alunos`.
///
/// The backend also sends `turmaNome`/`turmaCodigo`; they are ignored and
/// the class name is always resolved against the local class list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aluno {
    pub id: Id,
    pub nome: String,
    pub matricula: String,
    pub email: String,
    pub turma_id: Id,
    #[serde(default = "default_true")]
    pub ativo: bool,
    #[serde(default)]
    pub total_presencas: Option<u32>,
}

/// Body for `POST /alunos` and `PUT /alunos/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlunoPayload {
    pub nome: String,
    pub matricula: String,
    pub email: String,
    pub turma_id: Id,
    pub ativo: bool,
}

fn default_true() -> bool {
    true
}
