//! Mentor roll-call (chamada de mentores) records and payloads.

use serde::{Deserialize, Serialize};

use super::Id;

/// One mentor's presence inside a roll-call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participante {
    pub mentor_id: Id,
    #[serde(default)]
    pub presente: bool,
    #[serde(default)]
    pub mentor_nome: Option<String>,
    #[serde(default)]
    pub mentor_email: Option<String>,
}

/// A roll-call session as returned by `/chamadas-mentores`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChamadaMentor {
    pub id: Id,
    /// `YYYY-MM-DD`, unique per roll-call.
    pub data_chamada: String,
    #[serde(default)]
    pub observacoes: Option<String>,
    #[serde(default)]
    pub participantes: Vec<Participante>,
    #[serde(default)]
    pub total_mentores: Option<u32>,
    #[serde(default)]
    pub total_presentes: Option<u32>,
    #[serde(default)]
    pub total_ausentes: Option<u32>,
}

impl ChamadaMentor {
    /// Present count, preferring the backend's counter.
    pub fn presentes(&self) -> u32 {
        self.total_presentes
            .unwrap_or_else(|| self.participantes.iter().filter(|p| p.presente).count() as u32)
    }

    /// Participant count, preferring the backend's counter.
    pub fn total(&self) -> u32 {
        self.total_mentores.unwrap_or(self.participantes.len() as u32)
    }

    /// Rounded attendance percentage, 0 for an empty roll-call.
    pub fn percentual_presenca(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.presentes() as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Participant entry inside a create/update body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantePayload {
    pub mentor_id: Id,
    pub presente: bool,
}

/// Body for `POST /chamadas-mentores` and `PUT /chamadas-mentores/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChamadaMentorPayload {
    pub data_chamada: String,
    pub observacoes: Option<String>,
    pub participantes: Vec<ParticipantePayload>,
}

/// Aggregates from `/chamadas-mentores/estatisticas`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstatisticasChamadas {
    pub total_chamadas: u32,
    pub total_chamadas_mes_atual: u32,
    pub total_presentes_hoje: u32,
    pub total_ausentes_hoje: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chamada(presencas: &[bool]) -> ChamadaMentor {
        ChamadaMentor {
            id: 1,
            data_chamada: "2024-05-02".to_string(),
            observacoes: None,
            participantes: presencas
                .iter()
                .enumerate()
                .map(|(i, p)| Participante {
                    mentor_id: i as Id + 1,
                    presente: *p,
                    mentor_nome: None,
                    mentor_email: None,
                })
                .collect(),
            total_mentores: None,
            total_presentes: None,
            total_ausentes: None,
        }
    }

    #[test]
    fn test_percentual_rounds() {
        assert_eq!(chamada(&[true, true, false]).percentual_presenca(), 67);
    }

    #[test]
    fn test_percentual_empty_is_zero() {
        assert_eq!(chamada(&[]).percentual_presenca(), 0);
    }

    #[test]
    fn test_backend_counters_win() {
        let mut c = chamada(&[true]);
        c.total_mentores = Some(4);
        c.total_presentes = Some(2);
        assert_eq!(c.percentual_presenca(), 50);
    }
}
