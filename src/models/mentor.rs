//! Mentor record, role type and payload.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Id;

/// Mentor role, serialized as the backend's enum constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoMentor {
    Mentor,
    MentorTrainee,
    MentorCoordenador,
}

impl TipoMentor {
    pub const ALL: [TipoMentor; 3] = [Self::Mentor, Self::MentorTrainee, Self::MentorCoordenador];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Mentor => "Mentor",
            Self::MentorTrainee => "Mentor-trainee",
            Self::MentorCoordenador => "Mentor Coordenador",
        }
    }

    /// Enum constant as used in `/mentores/tipo/{tipo}`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Mentor => "MENTOR",
            Self::MentorTrainee => "MENTOR_TRAINEE",
            Self::MentorCoordenador => "MENTOR_COORDENADOR",
        }
    }
}

impl fmt::Display for TipoMentor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A mentor as returned by `/mentores`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    pub id: Id,
    pub nome: String,
    pub email: String,
    pub tipo_mentor: TipoMentor,
    #[serde(default = "default_true")]
    pub ativo: bool,
    #[serde(default)]
    pub total_presencas: Option<u32>,
}

/// Body for `POST /mentores` and `PUT /mentores/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorPayload {
    pub nome: String,
    pub email: String,
    pub tipo_mentor: TipoMentor,
    pub ativo: bool,
}

fn default_true() -> bool {
    true
}
