//! Read-only dashboard aggregates.

use chrono::Local;
use tokio_util::sync::CancellationToken;

use super::entity::PresencaLookup;
use super::executor::cancellable;
use super::list::Outcome;
use super::lookup::{AttendanceNames, resolve_attendance};
use super::repository::Repository;
use crate::error::{AppError, Result};
use crate::models::{Aluno, Presenca, Turma};

/// Attendance and enrolment of one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSeries {
    pub nome: String,
    pub alunos: usize,
    pub presencas: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_turmas: usize,
    pub total_alunos: usize,
    pub total_presencas: usize,
    pub presencas_hoje: usize,
    pub series: Vec<ClassSeries>,
}

impl DashboardSummary {
    /// Largest value across both series, used to scale the bar charts.
    pub fn series_max(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.alunos.max(s.presencas))
            .max()
            .unwrap_or(0)
    }
}

/// Number of records whose date string equals `date` exactly.
pub fn count_on_date(presencas: &[Presenca], date: &str) -> usize {
    presencas.iter().filter(|p| p.data_presenca == date).count()
}

/// Today's date in the local timezone, as `YYYY-MM-DD`.
pub fn today_string() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Derive the dashboard from the three collections. Per-class counts come
/// from each class's backend counters, one entry per class in list order;
/// a missing counter counts as 0.
pub fn compute(turmas: &[Turma], alunos: &[Aluno], presencas: &[Presenca], today: &str) -> DashboardSummary {
    let series = turmas
        .iter()
        .map(|turma| ClassSeries {
            nome: turma.nome.clone(),
            alunos: turma.total_alunos.unwrap_or(0) as usize,
            presencas: turma.total_presencas.unwrap_or(0) as usize,
        })
        .collect();

    DashboardSummary {
        total_turmas: turmas.len(),
        total_alunos: alunos.len(),
        total_presencas: presencas.len(),
        presencas_hoje: count_on_date(presencas, today),
        series,
    }
}

/// Most recent attendance records, newest first.
pub fn recent(presencas: &[Presenca], limit: usize) -> Vec<Presenca> {
    let mut sorted: Vec<_> = presencas.to_vec();
    sorted.sort_by(|a, b| {
        (b.data_presenca.as_str(), b.hora_presenca.as_str()).cmp(&(a.data_presenca.as_str(), a.hora_presenca.as_str()))
    });
    sorted.truncate(limit);
    sorted
}

/// Everything the dashboard page displays.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub recentes: Vec<Presenca>,
    /// Every class and student, for naming the recent records.
    pub lookup: PresencaLookup,
}

impl DashboardData {
    pub fn resolve<'a>(&'a self, presenca: &Presenca) -> AttendanceNames<'a> {
        resolve_attendance(presenca, &self.lookup.alunos, &self.lookup.turmas)
    }
}

/// Fetch the three collections and the name lookup concurrently, then
/// aggregate them. Totals count active classes and students only.
pub async fn load<R>(repo: &R, token: &CancellationToken) -> Result<DashboardData>
where
    R: Repository<Turma> + Repository<Aluno> + Repository<Presenca> + ?Sized,
{
    let fetch = async {
        tokio::try_join!(
            Repository::<Turma>::list(repo),
            Repository::<Aluno>::list(repo),
            Repository::<Presenca>::list(repo),
            Repository::<Presenca>::lookup(repo),
        )
    };
    let (turmas, alunos, presencas, lookup) = cancellable(token, fetch).await??;

    let summary = compute(&turmas, &alunos, &presencas, &today_string());
    tracing::debug!(
        "Dashboard: {} turmas, {} alunos, {} presencas",
        summary.total_turmas,
        summary.total_alunos,
        summary.total_presencas
    );
    Ok(DashboardData {
        summary,
        recentes: recent(&presencas, 5),
        lookup,
    })
}

/// Dashboard page state.
#[derive(Debug, Default)]
pub struct DashboardState {
    pub data: DashboardData,
    pub loading: bool,
}

impl DashboardState {
    pub fn start(&mut self) {
        self.loading = true;
    }

    /// Fold a finished load and return the failure to report, if any.
    /// A cancelled result belongs to an earlier visit and is ignored.
    pub fn apply(&mut self, result: Result<DashboardData>) -> Option<Outcome> {
        match result {
            Ok(data) => {
                self.loading = false;
                self.data = data;
                None
            }
            Err(AppError::Cancelled) => None,
            Err(e) => {
                self.loading = false;
                tracing::warn!("Dashboard load failed: {e}");
                Some(Outcome::Failure(
                    "Erro ao carregar dados. Verifique se o backend está rodando.".to_string(),
                ))
            }
        }
    }

    pub fn abandon(&mut self) {
        self.loading = false;
    }
}
