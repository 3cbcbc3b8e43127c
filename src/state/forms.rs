//! Dialog forms and their validation rules.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use super::entity::EntityForm;
use super::lookup;
use crate::models::{
    Aluno, AlunoPayload, ChamadaMentor, ChamadaMentorPayload, Id, Mentor, MentorPayload, ParticipantePayload,
    Presenca, PresencaPayload, PresencaRapida, TipoMentor, Turma, TurmaPayload,
};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Loose email check: something@something.something, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// All messages joined on one line.
    pub fn summary(&self) -> String {
        self.0.values().cloned().collect::<Vec<_>>().join(" ")
    }

    fn into_result<T>(self, payload: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(payload()) } else { Err(self) }
    }
}

fn required(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok()
}

fn is_time(value: &str) -> bool {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M").is_ok() || NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurmaForm {
    pub nome: String,
    pub codigo: String,
    pub descricao: String,
    pub ativa: bool,
}

impl Default for TurmaForm {
    fn default() -> Self {
        Self {
            nome: String::new(),
            codigo: String::new(),
            descricao: String::new(),
            ativa: true,
        }
    }
}

impl EntityForm<Turma> for TurmaForm {
    fn from_record(turma: &Turma) -> Self {
        Self {
            nome: turma.nome.clone(),
            codigo: turma.codigo.clone(),
            descricao: turma.descricao.clone().unwrap_or_default(),
            ativa: turma.ativa,
        }
    }

    fn validate(&self) -> Result<TurmaPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        required(&mut errors, "nome", &self.nome, "Nome é obrigatório");
        required(&mut errors, "codigo", &self.codigo, "Código é obrigatório");
        errors.into_result(|| TurmaPayload {
            nome: self.nome.trim().to_string(),
            codigo: self.codigo.trim().to_string(),
            descricao: optional_text(&self.descricao),
            ativa: self.ativa,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlunoForm {
    pub nome: String,
    pub matricula: String,
    pub email: String,
    pub turma_id: Option<Id>,
    pub ativo: bool,
}

impl Default for AlunoForm {
    fn default() -> Self {
        Self {
            nome: String::new(),
            matricula: String::new(),
            email: String::new(),
            turma_id: None,
            ativo: true,
        }
    }
}

impl EntityForm<Aluno> for AlunoForm {
    fn from_record(aluno: &Aluno) -> Self {
        Self {
            nome: aluno.nome.clone(),
            matricula: aluno.matricula.clone(),
            email: aluno.email.clone(),
            turma_id: Some(aluno.turma_id),
            ativo: aluno.ativo,
        }
    }

    fn validate(&self) -> Result<AlunoPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        required(&mut errors, "nome", &self.nome, "Nome é obrigatório");
        required(&mut errors, "matricula", &self.matricula, "Matrícula é obrigatória");
        if self.email.trim().is_empty() {
            errors.insert("email", "Email é obrigatório");
        } else if !is_valid_email(self.email.trim()) {
            errors.insert("email", "Email deve ter um formato válido");
        }
        let Some(turma_id) = self.turma_id else {
            errors.insert("turma_id", "Turma é obrigatória");
            return Err(errors);
        };
        errors.into_result(|| AlunoPayload {
            nome: self.nome.trim().to_string(),
            matricula: self.matricula.trim().to_string(),
            email: self.email.trim().to_string(),
            turma_id,
            ativo: self.ativo,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresencaForm {
    pub turma_id: Option<Id>,
    pub aluno_id: Option<Id>,
    pub data_presenca: String,
    pub hora_presenca: String,
    pub observacoes: String,
}

impl PresencaForm {
    /// Change the class, clearing the student when the class differs.
    pub fn select_turma(&mut self, turma_id: Option<Id>) {
        if self.turma_id != turma_id {
            self.aluno_id = None;
        }
        self.turma_id = turma_id;
    }

    /// Students offered for the selected class. Empty until a class is chosen.
    pub fn eligible_students<'a>(&self, alunos: &'a [Aluno]) -> Vec<&'a Aluno> {
        match self.turma_id {
            Some(turma_id) => lookup::active_students_of(alunos, turma_id),
            None => Vec::new(),
        }
    }
}

impl EntityForm<Presenca> for PresencaForm {
    fn blank(now: NaiveDateTime) -> Self {
        Self {
            data_presenca: now.format("%Y-%m-%d").to_string(),
            hora_presenca: now.format("%H:%M").to_string(),
            ..Self::default()
        }
    }

    fn from_record(presenca: &Presenca) -> Self {
        Self {
            turma_id: Some(presenca.turma_id),
            aluno_id: Some(presenca.aluno_id),
            data_presenca: presenca.data_presenca.clone(),
            hora_presenca: presenca.hora_curta().to_string(),
            observacoes: presenca.observacoes.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<PresencaPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.aluno_id.is_none() {
            errors.insert("aluno_id", "Aluno é obrigatório");
        }
        if self.turma_id.is_none() {
            errors.insert("turma_id", "Turma é obrigatória");
        }
        if self.data_presenca.trim().is_empty() {
            errors.insert("data_presenca", "Data é obrigatória");
        } else if !is_iso_date(&self.data_presenca) {
            errors.insert("data_presenca", "Data deve estar no formato AAAA-MM-DD");
        }
        if self.hora_presenca.trim().is_empty() {
            errors.insert("hora_presenca", "Hora é obrigatória");
        } else if !is_time(&self.hora_presenca) {
            errors.insert("hora_presenca", "Hora deve estar no formato HH:MM");
        }
        let (Some(aluno_id), Some(turma_id)) = (self.aluno_id, self.turma_id) else {
            return Err(errors);
        };
        errors.into_result(|| PresencaPayload {
            aluno_id,
            turma_id,
            data_presenca: self.data_presenca.trim().to_string(),
            hora_presenca: self.hora_presenca.trim().to_string(),
            observacoes: optional_text(&self.observacoes),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MentorForm {
    pub nome: String,
    pub email: String,
    pub tipo_mentor: Option<TipoMentor>,
    pub ativo: bool,
}

impl Default for MentorForm {
    fn default() -> Self {
        Self {
            nome: String::new(),
            email: String::new(),
            tipo_mentor: None,
            ativo: true,
        }
    }
}

impl EntityForm<Mentor> for MentorForm {
    fn from_record(mentor: &Mentor) -> Self {
        Self {
            nome: mentor.nome.clone(),
            email: mentor.email.clone(),
            tipo_mentor: Some(mentor.tipo_mentor),
            ativo: mentor.ativo,
        }
    }

    fn validate(&self) -> Result<MentorPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        required(&mut errors, "nome", &self.nome, "Nome é obrigatório");
        if self.email.trim().is_empty() {
            errors.insert("email", "Email é obrigatório");
        } else if !is_valid_email(self.email.trim()) {
            errors.insert("email", "Email deve ter um formato válido");
        }
        let Some(tipo_mentor) = self.tipo_mentor else {
            errors.insert("tipo_mentor", "Tipo de mentor é obrigatório");
            return Err(errors);
        };
        errors.into_result(|| MentorPayload {
            nome: self.nome.trim().to_string(),
            email: self.email.trim().to_string(),
            tipo_mentor,
            ativo: self.ativo,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChamadaForm {
    pub data_chamada: String,
    pub observacoes: String,
    pub participantes: Vec<ParticipantePayload>,
}

impl ChamadaForm {
    /// Record one mentor's presence, adding the mentor if not yet listed.
    pub fn set_presence(&mut self, mentor_id: Id, presente: bool) {
        match self.participantes.iter_mut().find(|p| p.mentor_id == mentor_id) {
            Some(participante) => participante.presente = presente,
            None => self.participantes.push(ParticipantePayload { mentor_id, presente }),
        }
    }

    /// Mark every listed mentor present or absent.
    pub fn mark_all(&mut self, mentores: &[Mentor], presente: bool) {
        self.participantes = mentores
            .iter()
            .map(|m| ParticipantePayload {
                mentor_id: m.id,
                presente,
            })
            .collect();
    }

    pub fn is_present(&self, mentor_id: Id) -> bool {
        self.participantes
            .iter()
            .any(|p| p.mentor_id == mentor_id && p.presente)
    }

    pub fn total_presentes(&self) -> usize {
        self.participantes.iter().filter(|p| p.presente).count()
    }

    pub fn total_ausentes(&self) -> usize {
        self.participantes.iter().filter(|p| !p.presente).count()
    }
}

impl EntityForm<ChamadaMentor> for ChamadaForm {
    fn blank(now: NaiveDateTime) -> Self {
        Self {
            data_chamada: now.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    fn from_record(chamada: &ChamadaMentor) -> Self {
        Self {
            data_chamada: chamada.data_chamada.clone(),
            observacoes: chamada.observacoes.clone().unwrap_or_default(),
            participantes: chamada
                .participantes
                .iter()
                .map(|p| ParticipantePayload {
                    mentor_id: p.mentor_id,
                    presente: p.presente,
                })
                .collect(),
        }
    }

    fn validate(&self) -> Result<ChamadaMentorPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.data_chamada.trim().is_empty() {
            errors.insert("data_chamada", "Selecione uma data para a chamada.");
        } else if !is_iso_date(&self.data_chamada) {
            errors.insert("data_chamada", "Data deve estar no formato AAAA-MM-DD");
        }
        errors.into_result(|| ChamadaMentorPayload {
            data_chamada: self.data_chamada.trim().to_string(),
            observacoes: optional_text(&self.observacoes),
            participantes: self.participantes.clone(),
        })
    }
}

/// Quick attendance registration: pick a class, then one click per student.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuickRegister {
    pub turma_id: Option<Id>,
}

impl QuickRegister {
    /// Students listed for one-click registration.
    pub fn students<'a>(&self, alunos: &'a [Aluno]) -> Vec<&'a Aluno> {
        match self.turma_id {
            Some(turma_id) => lookup::active_students_of(alunos, turma_id),
            None => Vec::new(),
        }
    }

    /// Request for one student. No class selected means nothing to send.
    pub fn request(&self, aluno_id: Id) -> Option<PresencaRapida> {
        self.turma_id.map(|turma_id| PresencaRapida { aluno_id, turma_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::fixtures::{aluno, mentor};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(8, 5, 30)
            .unwrap()
    }

    #[test]
    fn test_email_regex() {
        assert!(is_valid_email("ana@escola.com"));
        assert!(is_valid_email("a.b+c@x.co.br"));
        assert!(!is_valid_email("ana@escola"));
        assert!(!is_valid_email("ana maria@escola.com"));
        assert!(!is_valid_email("@escola.com"));
    }

    #[test]
    fn test_turma_requires_name_and_code() {
        let errors = TurmaForm::default().validate().unwrap_err();
        assert_eq!(errors.get("nome"), Some("Nome é obrigatório"));
        assert_eq!(errors.get("codigo"), Some("Código é obrigatório"));
    }

    #[test]
    fn test_turma_blank_description_is_none() {
        let form = TurmaForm {
            nome: " Turma A ".into(),
            codigo: "TA".into(),
            descricao: "   ".into(),
            ativa: true,
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.nome, "Turma A");
        assert_eq!(payload.descricao, None);
    }

    #[test]
    fn test_aluno_invalid_email() {
        let form = AlunoForm {
            nome: "Ana".into(),
            matricula: "2024001".into(),
            email: "ana@escola".into(),
            turma_id: Some(1),
            ativo: true,
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("Email deve ter um formato válido"));
    }

    #[test]
    fn test_aluno_missing_class_reports_all_fields() {
        let errors = AlunoForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.get("turma_id").is_some());
    }

    #[test]
    fn test_aluno_round_trip_from_record() {
        let record = aluno(3, "Bia", 2);
        let payload = AlunoForm::from_record(&record).validate().unwrap();
        assert_eq!(payload.turma_id, 2);
        assert_eq!(payload.matricula, "M3");
    }

    #[test]
    fn test_presenca_blank_uses_now() {
        let form = PresencaForm::blank(now());
        assert_eq!(form.data_presenca, "2024-05-02");
        assert_eq!(form.hora_presenca, "08:05");
        assert!(form.aluno_id.is_none());
    }

    #[test]
    fn test_presenca_changing_class_clears_student() {
        let mut form = PresencaForm::blank(now());
        form.select_turma(Some(1));
        form.aluno_id = Some(10);
        form.select_turma(Some(1));
        assert_eq!(form.aluno_id, Some(10));
        form.select_turma(Some(2));
        assert_eq!(form.aluno_id, None);
    }

    #[test]
    fn test_presenca_eligible_students() {
        let mut inactive = aluno(3, "Caio", 1);
        inactive.ativo = false;
        let alunos = vec![aluno(1, "Ana", 1), aluno(2, "Bia", 2), inactive];
        let mut form = PresencaForm::default();
        assert!(form.eligible_students(&alunos).is_empty());
        form.select_turma(Some(1));
        let names: Vec<_> = form.eligible_students(&alunos).iter().map(|a| a.nome.as_str()).collect();
        assert_eq!(names, vec!["Ana"]);
    }

    #[test]
    fn test_presenca_requires_student() {
        let mut form = PresencaForm::blank(now());
        form.select_turma(Some(1));
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("aluno_id"), Some("Aluno é obrigatório"));
    }

    #[test]
    fn test_presenca_rejects_bad_time() {
        let form = PresencaForm {
            turma_id: Some(1),
            aluno_id: Some(2),
            data_presenca: "2024-05-02".into(),
            hora_presenca: "25:00".into(),
            observacoes: String::new(),
        };
        assert!(form.validate().unwrap_err().get("hora_presenca").is_some());
    }

    #[test]
    fn test_mentor_requires_type() {
        let form = MentorForm {
            nome: "Carla".into(),
            email: "carla@x.com".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("tipo_mentor"), Some("Tipo de mentor é obrigatório"));
    }

    #[test]
    fn test_chamada_presence_toggles() {
        let mentores = vec![
            mentor(1, "Ana", TipoMentor::Mentor),
            mentor(2, "Bruno", TipoMentor::MentorTrainee),
        ];
        let mut form = ChamadaForm::blank(now());
        assert_eq!(form.data_chamada, "2024-05-02");

        form.set_presence(1, true);
        form.set_presence(2, false);
        form.set_presence(1, false);
        assert_eq!(form.participantes.len(), 2);
        assert_eq!(form.total_ausentes(), 2);

        form.mark_all(&mentores, true);
        assert!(form.is_present(1) && form.is_present(2));
        assert_eq!(form.total_presentes(), 2);
    }

    #[test]
    fn test_chamada_requires_date() {
        let errors = ChamadaForm::default().validate().unwrap_err();
        assert_eq!(errors.summary(), "Selecione uma data para a chamada.");
    }

    #[test]
    fn test_quick_register_request() {
        let mut quick = QuickRegister::default();
        assert_eq!(quick.request(5), None);
        quick.turma_id = Some(2);
        assert_eq!(quick.request(5), Some(PresencaRapida { aluno_id: 5, turma_id: 2 }));
    }
}
