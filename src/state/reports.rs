//! Reports page state: filters, preview and file export.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use super::entity::PresencaLookup;
use super::executor::cancellable;
use super::list::Outcome;
use super::lookup::{self, AttendanceNames};
use crate::client::ApiClient;
use crate::error::{AppError, Result};
use crate::models::relatorio::export_filename;
use crate::models::{ExportFormat, Presenca, ReportKind};

pub use crate::models::relatorio::{ReportFilter, parse_flexible_date};

/// Rows shown in the report preview.
pub const PREVIEW_ROWS: usize = 10;

/// Backend report operations.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn report(&self, filter: &ReportFilter) -> Result<Vec<Presenca>>;

    async fn export(&self, kind: ReportKind, format: ExportFormat, filter: &ReportFilter) -> Result<Vec<u8>>;
}

#[async_trait]
impl ReportSource for ApiClient {
    async fn report(&self, filter: &ReportFilter) -> Result<Vec<Presenca>> {
        self.gerar_relatorio_presencas(filter).await
    }

    async fn export(&self, kind: ReportKind, format: ExportFormat, filter: &ReportFilter) -> Result<Vec<u8>> {
        self.exportar_relatorio(kind, format, filter).await
    }
}

/// Fetch the filtered dataset and keep the first [`PREVIEW_ROWS`].
pub async fn fetch_preview<S>(source: &S, filter: &ReportFilter, token: &CancellationToken) -> Result<Vec<Presenca>>
where
    S: ReportSource + ?Sized,
{
    let mut rows = cancellable(token, source.report(filter)).await??;
    rows.truncate(PREVIEW_ROWS);
    Ok(rows)
}

/// Download a report file.
pub async fn fetch_export<S>(
    source: &S,
    kind: ReportKind,
    format: ExportFormat,
    filter: &ReportFilter,
    token: &CancellationToken,
) -> Result<Vec<u8>>
where
    S: ReportSource + ?Sized,
{
    cancellable(token, source.export(kind, format, filter)).await?
}

/// Write downloaded bytes unchanged.
pub async fn write_export(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    tracing::info!("Report saved to {}", path.display());
    Ok(())
}

/// Destination used when no save dialog answer is available.
pub fn fallback_path(directory: &Path, kind: ReportKind, format: ExportFormat, date: NaiveDate) -> PathBuf {
    directory.join(export_filename(kind, format, date))
}

/// Reports page state.
#[derive(Debug, Default)]
pub struct ReportsState {
    pub filter: ReportFilter,
    /// Every class and student, inactive ones included.
    pub lookup: PresencaLookup,
    pub preview: Vec<Presenca>,
    pub loading_lookup: bool,
    pub loading_preview: bool,
    pub exporting: Option<(ReportKind, ExportFormat)>,
    outcome: Option<Outcome>,
}

impl ReportsState {
    /// Start a preview. Returns the filter to send, or `None` when the
    /// filter is invalid or a preview is already running.
    pub fn request_preview(&mut self) -> Option<ReportFilter> {
        if self.loading_preview {
            return None;
        }
        if let Err(message) = self.filter.validate() {
            self.outcome = Some(Outcome::Failure(message));
            return None;
        }
        self.loading_preview = true;
        Some(self.filter.clone())
    }

    /// Fold a finished preview. A cancelled result belongs to an earlier
    /// visit and leaves the current request's state alone.
    pub fn apply_preview(&mut self, result: Result<Vec<Presenca>>) {
        match result {
            Ok(mut rows) => {
                self.loading_preview = false;
                rows.truncate(PREVIEW_ROWS);
                self.preview = rows;
            }
            Err(AppError::Cancelled) => {}
            Err(e) => {
                self.loading_preview = false;
                tracing::warn!("Report preview failed: {e}");
                self.outcome = Some(Outcome::Failure("Erro ao gerar preview do relatório.".to_string()));
            }
        }
    }

    pub fn start_lookup(&mut self) {
        self.loading_lookup = true;
    }

    pub fn apply_lookup(&mut self, result: Result<PresencaLookup>) {
        match result {
            Ok(lookup) => {
                self.loading_lookup = false;
                self.lookup = lookup;
            }
            Err(AppError::Cancelled) => {}
            Err(e) => {
                self.loading_lookup = false;
                tracing::warn!("Report lookup load failed: {e}");
                self.outcome = Some(Outcome::Failure(
                    "Erro ao carregar turmas. Verifique se o backend está rodando.".to_string(),
                ));
            }
        }
    }

    /// Student and class names of a preview row, resolved against the
    /// loaded collections.
    pub fn resolve<'a>(&'a self, row: &Presenca) -> AttendanceNames<'a> {
        lookup::resolve_attendance(row, &self.lookup.alunos, &self.lookup.turmas)
    }

    /// Drop in-flight flags when the page is left.
    pub fn abandon(&mut self) {
        self.loading_lookup = false;
        self.loading_preview = false;
        self.exporting = None;
    }

    /// Reset every filter and drop the preview.
    pub fn clear_filters(&mut self) {
        self.filter = ReportFilter::default();
        self.preview.clear();
    }

    /// Start an export. Only one export runs at a time.
    pub fn request_export(&mut self, kind: ReportKind, format: ExportFormat) -> Option<ReportFilter> {
        if self.exporting.is_some() {
            return None;
        }
        if let Err(message) = self.filter.validate() {
            self.outcome = Some(Outcome::Failure(message));
            return None;
        }
        self.exporting = Some((kind, format));
        Some(self.filter.clone())
    }

    /// Record the end of an export. `Ok(None)` means the user dismissed
    /// the save dialog.
    pub fn finish_export(&mut self, result: Result<Option<PathBuf>>) {
        if matches!(result, Err(AppError::Cancelled)) {
            return;
        }
        self.exporting = None;
        match result {
            Ok(Some(path)) => {
                self.outcome = Some(Outcome::Success(format!(
                    "Relatório exportado com sucesso! Salvo em {}",
                    path.display()
                )));
            }
            Ok(None) | Err(AppError::Cancelled) => {}
            Err(e) => {
                tracing::warn!("Report export failed: {e}");
                self.outcome = Some(Outcome::Failure(format!("Erro ao exportar relatório: {e}")));
            }
        }
    }

    pub fn take_outcome(&mut self) -> Option<Outcome> {
        self.outcome.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::fixtures::{aluno, presenca, turma};
    use reqwest::StatusCode;
    use std::sync::Mutex;

    #[test]
    fn test_clear_filters_drops_preview() {
        let mut state = ReportsState::default();
        state.filter.turma_id = Some(1);
        state.preview = vec![presenca(1, 1, 1, "2024-01-01")];
        state.clear_filters();
        assert!(state.filter.is_empty());
        assert!(state.preview.is_empty());
    }

    #[test]
    fn test_preview_truncates() {
        let mut state = ReportsState::default();
        assert!(state.request_preview().is_some());
        assert!(state.request_preview().is_none());
        let rows = (1..=25).map(|i| presenca(i, 1, 1, "2024-01-01")).collect();
        state.apply_preview(Ok(rows));
        assert_eq!(state.preview.len(), PREVIEW_ROWS);
        assert!(!state.loading_preview);
    }

    #[test]
    fn test_stale_cancelled_preview_keeps_request_running() {
        let mut state = ReportsState::default();
        assert!(state.request_preview().is_some());
        state.apply_preview(Err(AppError::Cancelled));
        assert!(state.loading_preview);
        assert!(state.request_preview().is_none());

        state.apply_preview(Ok(vec![presenca(1, 1, 1, "2024-01-01")]));
        assert!(!state.loading_preview);
        assert_eq!(state.preview.len(), 1);
    }

    #[test]
    fn test_preview_names_come_from_lookup() {
        let mut inactive = aluno(11, "Bruno", 1);
        inactive.ativo = false;
        let mut state = ReportsState::default();
        state.apply_lookup(Ok(PresencaLookup {
            turmas: vec![turma(1, "Turma A", "TA")],
            alunos: vec![aluno(10, "Ana", 1), inactive],
        }));

        let mut row = presenca(1, 11, 1, "2024-01-01");
        row.aluno_nome = Some("Outro Nome".to_string());
        row.turma_nome = Some("Outra Turma".to_string());
        let names = state.resolve(&row);
        assert_eq!(names.aluno_nome, "Bruno");
        assert_eq!(names.aluno_matricula, "M11");
        assert_eq!(names.turma_nome, "Turma A");
    }

    #[test]
    fn test_export_outcomes() {
        let mut state = ReportsState::default();
        assert!(state.request_export(ReportKind::Turmas, ExportFormat::Csv).is_some());
        assert!(state.request_export(ReportKind::Alunos, ExportFormat::Csv).is_none());

        state.finish_export(Err(AppError::Cancelled));
        assert!(state.exporting.is_some());

        state.finish_export(Ok(None));
        assert!(state.exporting.is_none());
        assert!(state.take_outcome().is_none());

        state.finish_export(Err(AppError::api(StatusCode::INTERNAL_SERVER_ERROR, "falhou")));
        assert_eq!(
            state.take_outcome(),
            Some(Outcome::Failure("Erro ao exportar relatório: falhou".to_string()))
        );
    }

    #[test]
    fn test_fallback_path() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 9).unwrap();
        let path = fallback_path(Path::new("/tmp/out"), ReportKind::Alunos, ExportFormat::Csv, date);
        assert_eq!(path, PathBuf::from("/tmp/out/relatorio-alunos-2024-06-09.csv"));
    }

    struct FakeSource {
        rows: usize,
        calls: Mutex<Vec<ReportFilter>>,
    }

    #[async_trait]
    impl ReportSource for FakeSource {
        async fn report(&self, filter: &ReportFilter) -> Result<Vec<Presenca>> {
            self.calls.lock().unwrap().push(filter.clone());
            Ok((1..=self.rows as i64).map(|i| presenca(i, 1, 1, "2024-01-01")).collect())
        }

        async fn export(&self, _kind: ReportKind, _format: ExportFormat, _filter: &ReportFilter) -> Result<Vec<u8>> {
            Ok(b"id;nome\n".to_vec())
        }
    }

    #[tokio::test]
    async fn test_fetch_preview_limits_rows() {
        let source = FakeSource {
            rows: 12,
            calls: Mutex::new(Vec::new()),
        };
        let filter = ReportFilter {
            turma_id: Some(2),
            ..Default::default()
        };
        let rows = fetch_preview(&source, &filter, &CancellationToken::new()).await.unwrap();
        assert_eq!(rows.len(), PREVIEW_ROWS);
        assert_eq!(source.calls.lock().unwrap().as_slice(), &[filter]);
    }

    #[tokio::test]
    async fn test_cancelled_preview_makes_no_call() {
        let source = FakeSource {
            rows: 1,
            calls: Mutex::new(Vec::new()),
        };
        let token = CancellationToken::new();
        token.cancel();
        let result = fetch_preview(&source, &ReportFilter::default(), &token).await;
        assert!(matches!(result, Err(AppError::Cancelled)));
        assert!(source.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_export_keeps_bytes() {
        let path = std::env::temp_dir()
            .join(format!("controle-presenca-export-{}", std::process::id()))
            .join("relatorio.csv");
        let source = FakeSource {
            rows: 0,
            calls: Mutex::new(Vec::new()),
        };
        let bytes = fetch_export(
            &source,
            ReportKind::Turmas,
            ExportFormat::Csv,
            &ReportFilter::default(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
        write_export(&bytes, &path).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"id;nome\n");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
