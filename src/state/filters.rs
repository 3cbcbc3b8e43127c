//! Client-side filters for each list page.
//!
//! Every filter is a pure predicate over the loaded records; criteria combine
//! with logical AND and an empty criterion matches everything.

use super::entity::{ChamadaLookup, EntityFilter, PresencaLookup};
use super::lookup;
use crate::models::{Aluno, ChamadaMentor, Id, Mentor, Presenca, TipoMentor, Turma};

/// Case-insensitive substring match. An empty needle matches.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Format `YYYY-MM-DD` as `DD/MM/YYYY`. Anything else is returned as is.
pub fn format_date_br(date: &str) -> String {
    match date.get(..10).map(|d| d.split('-').collect::<Vec<_>>()).as_deref() {
        Some([y, m, d]) if y.len() == 4 && m.len() == 2 && d.len() == 2 => format!("{d}/{m}/{y}"),
        _ => date.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurmaFilter {
    pub termo: String,
}

impl EntityFilter<Turma> for TurmaFilter {
    fn matches(&self, turma: &Turma, _lookup: &()) -> bool {
        contains_ci(&turma.nome, &self.termo) || contains_ci(&turma.codigo, &self.termo)
    }

    fn is_active(&self) -> bool {
        !self.termo.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlunoFilter {
    pub termo: String,
    pub turma_id: Option<Id>,
}

impl EntityFilter<Aluno> for AlunoFilter {
    fn matches(&self, aluno: &Aluno, _turmas: &Vec<Turma>) -> bool {
        let text = contains_ci(&aluno.nome, &self.termo)
            || contains_ci(&aluno.matricula, &self.termo)
            || contains_ci(&aluno.email, &self.termo);
        let class = self.turma_id.is_none_or(|id| aluno.turma_id == id);
        text && class
    }

    fn is_active(&self) -> bool {
        !self.termo.trim().is_empty() || self.turma_id.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresencaFilter {
    pub termo: String,
    pub turma_id: Option<Id>,
    /// Exact `YYYY-MM-DD` match; empty means any date.
    pub data: String,
}

impl EntityFilter<Presenca> for PresencaFilter {
    fn matches(&self, presenca: &Presenca, lookup: &PresencaLookup) -> bool {
        let names = lookup::resolve_attendance(presenca, &lookup.alunos, &lookup.turmas);
        let text = contains_ci(names.aluno_nome, &self.termo)
            || contains_ci(names.aluno_matricula, &self.termo)
            || contains_ci(names.turma_nome, &self.termo);
        let class = self.turma_id.is_none_or(|id| presenca.turma_id == id);
        let data = self.data.trim();
        let date = data.is_empty() || presenca.data_presenca == data;
        text && class && date
    }

    fn is_active(&self) -> bool {
        !self.termo.trim().is_empty() || self.turma_id.is_some() || !self.data.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MentorFilter {
    pub termo: String,
    pub tipo: Option<TipoMentor>,
    pub ativo: Option<bool>,
}

impl EntityFilter<Mentor> for MentorFilter {
    fn matches(&self, mentor: &Mentor, _lookup: &()) -> bool {
        let text = contains_ci(&mentor.nome, &self.termo) || contains_ci(&mentor.email, &self.termo);
        let tipo = self.tipo.is_none_or(|t| mentor.tipo_mentor == t);
        let ativo = self.ativo.is_none_or(|a| mentor.ativo == a);
        text && tipo && ativo
    }

    fn is_active(&self) -> bool {
        !self.termo.trim().is_empty() || self.tipo.is_some() || self.ativo.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChamadaFilter {
    pub termo: String,
}

impl EntityFilter<ChamadaMentor> for ChamadaFilter {
    fn matches(&self, chamada: &ChamadaMentor, _lookup: &ChamadaLookup) -> bool {
        contains_ci(&chamada.data_chamada, &self.termo)
            || contains_ci(&format_date_br(&chamada.data_chamada), &self.termo)
            || contains_ci(chamada.observacoes.as_deref().unwrap_or_default(), &self.termo)
    }

    fn is_active(&self) -> bool {
        !self.termo.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::fixtures::{aluno, mentor, presenca, turma};

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("Ana Maria", "maria"));
        assert!(contains_ci("Ana Maria", "  "));
        assert!(!contains_ci("Ana Maria", "bia"));
    }

    #[test]
    fn test_format_date_br() {
        assert_eq!(format_date_br("2024-05-02"), "02/05/2024");
        assert_eq!(format_date_br("2024-05-02T10:00:00"), "02/05/2024");
        assert_eq!(format_date_br("ontem"), "ontem");
    }

    #[test]
    fn test_turma_filter_by_code() {
        let filter = TurmaFilter { termo: "ta-0".into() };
        assert!(filter.matches(&turma(1, "Turma A", "TA-01"), &()));
        assert!(!filter.matches(&turma(2, "Turma B", "TB-01"), &()));
    }

    #[test]
    fn test_aluno_filter_combines_text_and_class() {
        let filter = AlunoFilter {
            termo: "ana".into(),
            turma_id: Some(1),
        };
        assert!(filter.matches(&aluno(1, "Ana", 1), &Vec::new()));
        assert!(!filter.matches(&aluno(2, "Ana", 2), &Vec::new()));
        assert!(!filter.matches(&aluno(3, "Bia", 1), &Vec::new()));
    }

    #[test]
    fn test_aluno_filter_matches_email() {
        let mut a = aluno(1, "Ana", 1);
        a.email = "ana.souza@escola.br".into();
        let filter = AlunoFilter {
            termo: "SOUZA".into(),
            turma_id: None,
        };
        assert!(filter.matches(&a, &Vec::new()));
    }

    #[test]
    fn test_presenca_filter_uses_resolved_names() {
        let lookup = PresencaLookup {
            turmas: vec![turma(1, "Turma A", "TA")],
            alunos: vec![aluno(10, "Ana", 1)],
        };
        let p = presenca(1, 10, 1, "2024-05-02");

        let by_name = PresencaFilter {
            termo: "ana".into(),
            ..Default::default()
        };
        assert!(by_name.matches(&p, &lookup));

        let by_class = PresencaFilter {
            termo: "turma a".into(),
            ..Default::default()
        };
        assert!(by_class.matches(&p, &lookup));

        let wrong_date = PresencaFilter {
            data: "2024-05-03".into(),
            ..Default::default()
        };
        assert!(!wrong_date.matches(&p, &lookup));
    }

    #[test]
    fn test_mentor_filter_type_and_status() {
        let mut inactive = mentor(2, "Bruno", TipoMentor::Mentor);
        inactive.ativo = false;
        let trainee = mentor(1, "Carla", TipoMentor::MentorTrainee);

        let filter = MentorFilter {
            tipo: Some(TipoMentor::Mentor),
            ativo: Some(false),
            ..Default::default()
        };
        assert!(filter.matches(&inactive, &()));
        assert!(!filter.matches(&trainee, &()));
        assert!(filter.is_active());
        assert!(!MentorFilter::default().is_active());
    }

    #[test]
    fn test_chamada_filter_accepts_br_date() {
        let chamada = ChamadaMentor {
            id: 1,
            data_chamada: "2024-05-02".into(),
            observacoes: Some("Reunião semanal".into()),
            participantes: Vec::new(),
            total_mentores: None,
            total_presentes: None,
            total_ausentes: None,
        };
        let lookup = ChamadaLookup::default();
        assert!(ChamadaFilter { termo: "02/05".into() }.matches(&chamada, &lookup));
        assert!(ChamadaFilter { termo: "semanal".into() }.matches(&chamada, &lookup));
        assert!(!ChamadaFilter { termo: "mensal".into() }.matches(&chamada, &lookup));
    }
}
