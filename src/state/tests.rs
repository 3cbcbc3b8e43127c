//! Page-level behavior against an in-memory repository.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio_util::sync::CancellationToken;

use super::entity::{Entity, EntityFilter};
use super::filters::{AlunoFilter, PresencaFilter};
use super::entity::PresencaLookup;
use super::executor::register_now;
use super::forms::QuickRegister;
use super::repository::{AttendanceActions, Repository};
use super::{Command, DialogPhase, Event, ListState, Outcome, dashboard, execute};
use crate::error::{AppError, Result};
use crate::models::{Aluno, ChamadaMentor, Id, Presenca, PresencaRapida, Turma};
use fixtures::{aluno, now, presenca, turma};

pub(crate) mod fixtures {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::models::{Aluno, Id, Mentor, Presenca, TipoMentor, Turma};

    pub fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 2)
            .unwrap()
            .and_hms_opt(8, 5, 30)
            .unwrap()
    }

    pub fn turma(id: Id, nome: &str, codigo: &str) -> Turma {
        Turma {
            id,
            nome: nome.to_string(),
            codigo: codigo.to_string(),
            descricao: None,
            ativa: true,
            total_alunos: None,
            total_presencas: None,
        }
    }

    pub fn aluno(id: Id, nome: &str, turma_id: Id) -> Aluno {
        Aluno {
            id,
            nome: nome.to_string(),
            matricula: format!("M{id}"),
            email: format!("{}@escola.com", nome.to_lowercase()),
            turma_id,
            ativo: true,
            total_presencas: None,
        }
    }

    pub fn presenca(id: Id, aluno_id: Id, turma_id: Id, data: &str) -> Presenca {
        Presenca {
            id,
            aluno_id,
            turma_id,
            data_presenca: data.to_string(),
            hora_presenca: "08:00:00".to_string(),
            observacoes: None,
            data_hora_registro: None,
            aluno_nome: None,
            aluno_matricula: None,
            turma_nome: None,
        }
    }

    pub fn mentor(id: Id, nome: &str, tipo: TipoMentor) -> Mentor {
        Mentor {
            id,
            nome: nome.to_string(),
            email: format!("{}@mentoria.com", nome.to_lowercase()),
            tipo_mentor: tipo,
            ativo: true,
            total_presencas: None,
        }
    }
}

/// In-memory repository that counts every call.
struct FakeRepository<E: Entity> {
    records: Vec<E>,
    lookup: E::Lookup,
    save_error: Option<StatusCode>,
    calls: AtomicUsize,
    saved: Mutex<Vec<E::Payload>>,
    removed: Mutex<Vec<Id>>,
}

impl<E: Entity> FakeRepository<E> {
    fn new(records: Vec<E>) -> Self {
        Self {
            records,
            lookup: E::Lookup::default(),
            save_error: None,
            calls: AtomicUsize::new(0),
            saved: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        }
    }

    fn failing_saves(mut self, status: StatusCode) -> Self {
        self.save_error = Some(status);
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn save(&self, payload: &E::Payload) -> Result<()> {
        self.hit();
        if let Some(status) = self.save_error {
            return Err(AppError::api(status, "rejeitado"));
        }
        self.saved.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for FakeRepository<E> {
    async fn list(&self) -> Result<Vec<E>> {
        self.hit();
        Ok(self.records.clone())
    }

    async fn lookup(&self) -> Result<E::Lookup> {
        Ok(self.lookup.clone())
    }

    async fn create(&self, payload: &E::Payload) -> Result<()> {
        self.save(payload)
    }

    async fn update(&self, _id: Id, payload: &E::Payload) -> Result<()> {
        self.save(payload)
    }

    async fn remove(&self, id: Id) -> Result<()> {
        self.hit();
        self.removed.lock().unwrap().push(id);
        Ok(())
    }
}

#[derive(Default)]
struct FakeAttendance {
    registered: Mutex<Vec<PresencaRapida>>,
}

#[async_trait]
impl AttendanceActions for FakeAttendance {
    async fn quick_register(&self, request: PresencaRapida) -> Result<()> {
        self.registered.lock().unwrap().push(request);
        Ok(())
    }
}

/// Run a command and fold its event back in, following up reloads.
async fn drive<E: Entity>(state: &mut ListState<E>, repo: &FakeRepository<E>, command: Command<E>) {
    let token = CancellationToken::new();
    let mut next = Some(command);
    while let Some(command) = next {
        let event = execute(repo, command, &token).await;
        next = state.apply(event);
    }
}

#[tokio::test]
async fn test_load_populates_records() {
    let repo = FakeRepository::new(vec![turma(1, "Turma A", "TA"), turma(2, "Turma B", "TB")]);
    let mut state = ListState::<Turma>::new();
    let command = state.load();
    drive(&mut state, &repo, command).await;
    assert_eq!(state.records.len(), 2);
    assert!(!state.loading);
    assert_eq!(repo.calls(), 1);
}

#[tokio::test]
async fn test_invalid_form_makes_no_call() {
    let repo = FakeRepository::<Aluno>::new(Vec::new());
    let mut state = ListState::<Aluno>::new();
    state.open_create(now());
    {
        let form = &mut state.dialog.as_mut().unwrap().form;
        form.nome = "Ana".into();
        form.matricula = "2024001".into();
        form.email = "ana@escola".into();
        form.turma_id = Some(1);
    }
    assert!(state.save().is_none());
    assert_eq!(repo.calls(), 0);
    assert_eq!(
        state.dialog.as_ref().unwrap().errors.get("email"),
        Some("Email deve ter um formato válido")
    );
}

#[tokio::test]
async fn test_valid_submit_sends_exactly_one_save() {
    let repo = FakeRepository::<Aluno>::new(Vec::new());
    let mut state = ListState::<Aluno>::new();
    state.open_create(now());
    {
        let form = &mut state.dialog.as_mut().unwrap().form;
        form.nome = "Ana".into();
        form.matricula = "2024001".into();
        form.email = "ana@escola.com".into();
        form.turma_id = Some(1);
    }
    let command = state.save().unwrap();
    assert!(state.save().is_none());
    drive(&mut state, &repo, command).await;

    assert_eq!(repo.saved.lock().unwrap().len(), 1);
    // One save plus the follow-up reload.
    assert_eq!(repo.calls(), 2);
    assert!(state.dialog.is_none());
    assert_eq!(
        state.take_outcome(),
        Some(Outcome::Success("Aluno criado com sucesso!".to_string()))
    );
}

#[tokio::test]
async fn test_duplicate_roll_call_date_keeps_form() {
    let repo = FakeRepository::<ChamadaMentor>::new(Vec::new()).failing_saves(StatusCode::BAD_REQUEST);
    let mut state = ListState::<ChamadaMentor>::new();
    state.open_create(now());
    state.dialog.as_mut().unwrap().form.observacoes = "Semanal".into();

    let command = state.save().unwrap();
    drive(&mut state, &repo, command).await;

    let dialog = state.dialog.as_ref().unwrap();
    assert_eq!(dialog.phase, DialogPhase::Open);
    assert_eq!(dialog.form.observacoes, "Semanal");
    assert_eq!(
        dialog.failure.as_deref(),
        Some("Erro: Já existe uma chamada para esta data.")
    );
    assert_eq!(repo.calls(), 1);
}

#[tokio::test]
async fn test_cancel_delete_makes_no_call() {
    let record = turma(1, "Turma A", "TA");
    let repo = FakeRepository::new(vec![record.clone()]);
    let mut state = ListState::<Turma>::new();
    state.request_delete(&record);
    state.cancel_delete();
    assert!(state.confirm_delete().is_none());
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn test_confirmed_delete_removes_once_and_reloads() {
    let record = presenca(4, 1, 1, "2024-05-02");
    let repo = FakeRepository::new(vec![record.clone()]);
    let mut state = ListState::<Presenca>::new();
    state.request_delete(&record);
    let command = state.confirm_delete().unwrap();
    drive(&mut state, &repo, command).await;
    assert_eq!(*repo.removed.lock().unwrap(), vec![4]);
    assert_eq!(repo.calls(), 2);
}

#[tokio::test]
async fn test_cancelled_token_issues_no_request() {
    let repo = FakeRepository::new(vec![turma(1, "Turma A", "TA")]);
    let token = CancellationToken::new();
    token.cancel();
    let event = execute(&repo, Command::<Turma>::Load, &token).await;
    assert!(matches!(event, Event::Cancelled));
    assert_eq!(repo.calls(), 0);

    let mut state = ListState::<Turma>::new();
    assert!(state.apply(event).is_none());
    assert!(state.records.is_empty());
}

#[tokio::test]
async fn test_quick_register_sends_one_request_per_click() {
    let actions = FakeAttendance::default();
    let token = CancellationToken::new();
    let mut quick = QuickRegister::default();

    assert!(quick.request(1).is_none());
    quick.turma_id = Some(2);
    for _ in 0..2 {
        let request = quick.request(1).unwrap();
        register_now(&actions, request, &token).await.unwrap();
    }

    assert_eq!(
        *actions.registered.lock().unwrap(),
        vec![PresencaRapida { aluno_id: 1, turma_id: 2 }; 2]
    );

    token.cancel();
    let request = quick.request(3).unwrap();
    assert!(matches!(
        register_now(&actions, request, &token).await,
        Err(AppError::Cancelled)
    ));
    assert_eq!(actions.registered.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_dashboard_today_count() {
    struct Collections;

    #[async_trait]
    impl Repository<Turma> for Collections {
        async fn list(&self) -> Result<Vec<Turma>> {
            let mut turma_a = turma(1, "Turma A", "TA");
            turma_a.total_alunos = Some(1);
            turma_a.total_presencas = Some(3);
            Ok(vec![turma_a])
        }
        async fn create(&self, _: &<Turma as Entity>::Payload) -> Result<()> {
            Ok(())
        }
        async fn update(&self, _: Id, _: &<Turma as Entity>::Payload) -> Result<()> {
            Ok(())
        }
        async fn remove(&self, _: Id) -> Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl Repository<Aluno> for Collections {
        async fn list(&self) -> Result<Vec<Aluno>> {
            Ok(vec![aluno(1, "Ana", 1)])
        }
        async fn create(&self, _: &<Aluno as Entity>::Payload) -> Result<()> {
            Ok(())
        }
        async fn update(&self, _: Id, _: &<Aluno as Entity>::Payload) -> Result<()> {
            Ok(())
        }
        async fn remove(&self, _: Id) -> Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl Repository<Presenca> for Collections {
        async fn list(&self) -> Result<Vec<Presenca>> {
            let today = dashboard::today_string();
            Ok(vec![
                presenca(1, 1, 1, "2024-01-01"),
                presenca(2, 1, 1, &today),
                presenca(3, 2, 1, &today),
            ])
        }
        async fn lookup(&self) -> Result<PresencaLookup> {
            let mut bruno = aluno(2, "Bruno", 1);
            bruno.ativo = false;
            Ok(PresencaLookup {
                turmas: vec![turma(1, "Turma A", "TA")],
                alunos: vec![aluno(1, "Ana", 1), bruno],
            })
        }
        async fn create(&self, _: &<Presenca as Entity>::Payload) -> Result<()> {
            Ok(())
        }
        async fn update(&self, _: Id, _: &<Presenca as Entity>::Payload) -> Result<()> {
            Ok(())
        }
        async fn remove(&self, _: Id) -> Result<()> {
            Ok(())
        }
    }

    let data = dashboard::load(&Collections, &CancellationToken::new()).await.unwrap();
    assert_eq!(data.summary.presencas_hoje, 2);
    assert_eq!(data.summary.total_presencas, 3);
    assert_eq!(data.summary.total_alunos, 1);
    assert_eq!(data.summary.series[0].presencas, 3);
    assert_eq!(data.recentes.len(), 3);

    let bruno_row = data.recentes.iter().find(|p| p.aluno_id == 2).unwrap();
    assert_eq!(data.resolve(bruno_row).aluno_nome, "Bruno");
}

#[test]
fn test_filters_return_subsets_and_are_idempotent() {
    let alunos = vec![aluno(1, "Ana", 1), aluno(2, "Bia", 2), aluno(3, "Ana Clara", 2)];
    let filter = AlunoFilter {
        termo: "ana".into(),
        turma_id: Some(2),
    };
    let once: Vec<Aluno> = alunos
        .iter()
        .filter(|a| filter.matches(a, &Vec::new()))
        .cloned()
        .collect();
    let twice: Vec<Aluno> = once
        .iter()
        .filter(|a| filter.matches(a, &Vec::new()))
        .cloned()
        .collect();
    assert_eq!(once, twice);
    assert_eq!(once.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3]);
}

#[test]
fn test_combined_filter_is_intersection() {
    let mut state = ListState::<Presenca>::new();
    state.records = vec![
        presenca(1, 1, 1, "2024-05-02"),
        presenca(2, 1, 2, "2024-05-02"),
        presenca(3, 1, 1, "2024-05-03"),
    ];

    state.filter = PresencaFilter {
        turma_id: Some(1),
        ..Default::default()
    };
    let by_class: Vec<Id> = state.filtered_view().iter().map(|p| p.id).collect();

    state.filter = PresencaFilter {
        data: "2024-05-02".into(),
        ..Default::default()
    };
    let by_date: Vec<Id> = state.filtered_view().iter().map(|p| p.id).collect();

    state.filter = PresencaFilter {
        turma_id: Some(1),
        data: "2024-05-02".into(),
        ..Default::default()
    };
    let both: Vec<Id> = state.filtered_view().iter().map(|p| p.id).collect();

    let expected: Vec<Id> = by_class.iter().copied().filter(|id| by_date.contains(id)).collect();
    assert_eq!(both, expected);
    assert_eq!(both, vec![1]);
}
