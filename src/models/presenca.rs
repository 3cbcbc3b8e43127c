//! Attendance (presença) record and payloads.

use serde::{Deserialize, Serialize};

use super::Id;

/// An attendance record as returned by `/presencas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presenca {
    pub id: Id,
    pub aluno_id: Id,
    pub turma_id: Id,
    /// `YYYY-MM-DD`
    pub data_presenca: String,
    /// `HH:MM` or `HH:MM:SS`
    pub hora_presenca: String,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub data_hora_registro: Option<String>,
    /// Denormalized names, only sent by `/presencas/relatorio`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aluno_nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aluno_matricula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turma_nome: Option<String>,
}

impl Presenca {
    /// Time of day without seconds.
    pub fn hora_curta(&self) -> &str {
        self.hora_presenca.get(..5).unwrap_or(&self.hora_presenca)
    }
}

/// Body for `POST /presencas` and `PUT /presencas/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresencaPayload {
    pub aluno_id: Id,
    pub turma_id: Id,
    pub data_presenca: String,
    pub hora_presenca: String,
    pub observacoes: Option<String>,
}

/// Body for `POST /presencas/rapida`; the server stamps date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresencaRapida {
    pub aluno_id: Id,
    pub turma_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_uses_numeric_ids() {
        let payload = PresencaPayload {
            aluno_id: 7,
            turma_id: 2,
            data_presenca: "2024-03-10".to_string(),
            hora_presenca: "08:15".to_string(),
            observacoes: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["alunoId"], 7);
        assert_eq!(json["turmaId"], 2);
        assert_eq!(json["dataPresenca"], "2024-03-10");
    }

    #[test]
    fn test_hora_curta() {
        let presenca: Presenca = serde_json::from_str(
            r#"{"id":1,"alunoId":1,"turmaId":1,"dataPresenca":"2024-01-01","horaPresenca":"09:30:12"}"#,
        )
        .unwrap();
        assert_eq!(presenca.hora_curta(), "09:30");
    }
}
