//! Main application state and the async message loop.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Layout, RichText};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::models::relatorio::export_filename;
use crate::models::{Aluno, ChamadaMentor, ExportFormat, Id, Mentor, Presenca, ReportKind, Turma};
use crate::state::dashboard::{self, DashboardData, DashboardState};
use crate::state::entity::PresencaLookup;
use crate::state::executor::{cancellable, register_now};
use crate::state::forms::QuickRegister;
use crate::state::reports::{self, ReportsState};
use crate::state::repository::MentorActions;
use crate::state::{Command, Entity, Event, ListState, Outcome, Repository, execute};

use super::components::colors;
use super::{
    alunos_panel, chamadas_panel, dashboard as dashboard_panel, mentores_panel, presencas_panel, reports_panel,
    settings_panel, turmas_panel,
};

/// Current panel being displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Dashboard,
    Turmas,
    Alunos,
    Presencas,
    Mentores,
    Chamadas,
    Relatorios,
    Configuracoes,
}

impl Panel {
    pub const ALL: [Panel; 8] = [
        Panel::Dashboard,
        Panel::Turmas,
        Panel::Alunos,
        Panel::Presencas,
        Panel::Mentores,
        Panel::Chamadas,
        Panel::Relatorios,
        Panel::Configuracoes,
    ];

    /// Get the display name for the panel.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Dashboard => "Dashboard",
            Panel::Turmas => "Turmas",
            Panel::Alunos => "Alunos",
            Panel::Presencas => "Presenças",
            Panel::Mentores => "Mentores",
            Panel::Chamadas => "Chamadas",
            Panel::Relatorios => "Relatórios",
            Panel::Configuracoes => "Configurações",
        }
    }
}

/// Backend reachability as last tested.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Unknown,
    Testing,
    Connected,
    Failed(String),
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    Turmas(Event<Turma>),
    Alunos(Event<Aluno>),
    Presencas(Event<Presenca>),
    Mentores(Event<Mentor>),
    Chamadas(Event<ChamadaMentor>),

    DashboardLoaded(Result<DashboardData>),

    ReportLookupLoaded(Result<PresencaLookup>),
    ReportPreview(Result<Vec<Presenca>>),
    ExportFinished(Result<Option<PathBuf>>),

    QuickRegistered { nome: String, result: Result<()> },
    MentorReactivated { nome: String, result: Result<()> },
    ConnectionTested(Result<()>),
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

const MAX_LOG_ENTRIES: usize = 100;

/// An entity with a list panel in the app.
pub trait PageEntity: Entity {
    const PANEL: Panel;
    fn wrap(event: Event<Self>) -> UiMessage;
    fn page(app: &mut App) -> &mut ListState<Self>;
}

impl PageEntity for Turma {
    const PANEL: Panel = Panel::Turmas;

    fn wrap(event: Event<Self>) -> UiMessage {
        UiMessage::Turmas(event)
    }
    fn page(app: &mut App) -> &mut ListState<Self> {
        &mut app.turmas
    }
}

impl PageEntity for Aluno {
    const PANEL: Panel = Panel::Alunos;

    fn wrap(event: Event<Self>) -> UiMessage {
        UiMessage::Alunos(event)
    }
    fn page(app: &mut App) -> &mut ListState<Self> {
        &mut app.alunos
    }
}

impl PageEntity for Presenca {
    const PANEL: Panel = Panel::Presencas;

    fn wrap(event: Event<Self>) -> UiMessage {
        UiMessage::Presencas(event)
    }
    fn page(app: &mut App) -> &mut ListState<Self> {
        &mut app.presencas
    }
}

impl PageEntity for Mentor {
    const PANEL: Panel = Panel::Mentores;

    fn wrap(event: Event<Self>) -> UiMessage {
        UiMessage::Mentores(event)
    }
    fn page(app: &mut App) -> &mut ListState<Self> {
        &mut app.mentores
    }
}

impl PageEntity for ChamadaMentor {
    const PANEL: Panel = Panel::Chamadas;

    fn wrap(event: Event<Self>) -> UiMessage {
        UiMessage::Chamadas(event)
    }
    fn page(app: &mut App) -> &mut ListState<Self> {
        &mut app.chamadas
    }
}

/// Main application state.
pub struct App {
    // Runtime and backend
    pub rt: tokio::runtime::Runtime,
    pub client: Arc<ApiClient>,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Navigation
    pub current_panel: Panel,
    panel_token: CancellationToken,

    // Pages
    pub turmas: ListState<Turma>,
    pub alunos: ListState<Aluno>,
    pub presencas: ListState<Presenca>,
    pub mentores: ListState<Mentor>,
    pub chamadas: ListState<ChamadaMentor>,
    pub dashboard: DashboardState,
    pub reports: ReportsState,
    pub quick_register: QuickRegister,

    // Log messages
    pub log_messages: Vec<LogEntry>,

    // Configuration
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub config_modified: bool,
    pub connection_status: ConnectionStatus,

    // Dialogs
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, config_path: PathBuf, client: ApiClient, rt: tokio::runtime::Runtime) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut app = Self {
            rt,
            client: Arc::new(client),
            tx,
            rx,
            current_panel: Panel::default(),
            panel_token: CancellationToken::new(),
            turmas: ListState::new(),
            alunos: ListState::new(),
            presencas: ListState::new(),
            mentores: ListState::new(),
            chamadas: ListState::new(),
            dashboard: DashboardState::default(),
            reports: ReportsState::default(),
            quick_register: QuickRegister::default(),
            log_messages: Vec::new(),
            config,
            config_path,
            config_modified: false,
            connection_status: ConnectionStatus::default(),
            error_message: None,
            success_message: None,
        };

        app.log_info(format!("Conectando a {}", app.client.base_url()));
        app.enter_panel();
        app
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        if self.log_messages.len() > MAX_LOG_ENTRIES {
            self.log_messages.remove(0);
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Clear the activity log.
    pub fn clear_log(&mut self) {
        self.log_messages.clear();
    }

    /// Show an operation outcome in a dialog and the activity log.
    fn show_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success(message) => {
                self.log_success(message.clone());
                self.success_message = Some(message);
            }
            Outcome::Failure(message) => {
                self.log_error(message.clone());
                self.error_message = Some(message);
            }
        }
    }

    /// Switch panels, cancelling everything the old panel started.
    pub fn navigate(&mut self, panel: Panel) {
        if panel == self.current_panel {
            return;
        }

        tracing::debug!("Navigating {} -> {}", self.current_panel.name(), panel.name());
        self.panel_token.cancel();
        self.panel_token = CancellationToken::new();

        match self.current_panel {
            Panel::Turmas => self.turmas.abandon(),
            Panel::Alunos => self.alunos.abandon(),
            Panel::Presencas => self.presencas.abandon(),
            Panel::Mentores => self.mentores.abandon(),
            Panel::Chamadas => self.chamadas.abandon(),
            Panel::Dashboard => self.dashboard.abandon(),
            Panel::Relatorios => self.reports.abandon(),
            Panel::Configuracoes => {
                if self.connection_status == ConnectionStatus::Testing {
                    self.connection_status = ConnectionStatus::Unknown;
                }
            }
        }

        self.current_panel = panel;
        self.enter_panel();
    }

    /// Load what the current panel shows.
    fn enter_panel(&mut self) {
        match self.current_panel {
            Panel::Dashboard => self.load_dashboard(),
            Panel::Turmas => self.reload::<Turma>(),
            Panel::Alunos => self.reload::<Aluno>(),
            Panel::Presencas => self.reload::<Presenca>(),
            Panel::Mentores => self.reload::<Mentor>(),
            Panel::Chamadas => self.reload::<ChamadaMentor>(),
            Panel::Relatorios => self.load_report_lookup(),
            Panel::Configuracoes => {}
        }
    }

    /// Reload one list page.
    pub fn reload<E>(&mut self)
    where
        E: PageEntity,
        ApiClient: Repository<E>,
    {
        let command = E::page(self).load();
        self.run(command);
    }

    /// Run a page command in the background under the current panel token.
    pub fn run<E>(&self, command: Command<E>)
    where
        E: PageEntity,
        ApiClient: Repository<E>,
    {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let token = self.panel_token.clone();

        self.rt.spawn(async move {
            let event = execute(client.as_ref(), command, &token).await;
            let _ = tx.send(E::wrap(event));
        });
    }

    /// Run a command returned by a panel, if any.
    pub fn run_opt<E>(&self, command: Option<Command<E>>)
    where
        E: PageEntity,
        ApiClient: Repository<E>,
    {
        if let Some(command) = command {
            self.run(command);
        }
    }

    fn apply_event<E>(&mut self, event: Event<E>)
    where
        E: PageEntity,
        ApiClient: Repository<E>,
    {
        // Results that raced a navigation belong to a page that was left
        if self.current_panel != E::PANEL {
            return;
        }
        let page = E::page(self);
        let follow_up = page.apply(event);
        if let Some(outcome) = page.take_outcome() {
            self.show_outcome(outcome);
        }
        self.run_opt(follow_up);
    }

    /// Load dashboard collections.
    pub fn load_dashboard(&mut self) {
        self.dashboard.start();
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let token = self.panel_token.clone();

        self.rt.spawn(async move {
            let result = dashboard::load(client.as_ref(), &token).await;
            let _ = tx.send(UiMessage::DashboardLoaded(result));
        });
    }

    /// Load the classes and students used by the report filters and preview.
    pub fn load_report_lookup(&mut self) {
        self.reports.start_lookup();
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let token = self.panel_token.clone();

        self.rt.spawn(async move {
            let result = cancellable(&token, Repository::<Presenca>::lookup(client.as_ref()))
                .await
                .and_then(|inner| inner);
            let _ = tx.send(UiMessage::ReportLookupLoaded(result));
        });
    }

    /// Fetch the report preview for the current filters.
    pub fn generate_preview(&mut self) {
        let Some(filter) = self.reports.request_preview() else {
            self.drain_reports_outcome();
            return;
        };
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let token = self.panel_token.clone();

        self.rt.spawn(async move {
            let result = reports::fetch_preview(client.as_ref(), &filter, &token).await;
            let _ = tx.send(UiMessage::ReportPreview(result));
        });
    }

    /// Download a report and write it to disk.
    ///
    /// The destination is asked for before the download starts; dismissing
    /// the dialog cancels the export.
    pub fn export_report(&mut self, kind: ReportKind, format: ExportFormat) {
        let Some(filter) = self.reports.request_export(kind, format) else {
            self.drain_reports_outcome();
            return;
        };

        let default_name = export_filename(kind, format, Local::now().date_naive());
        let path = if self.config.export.ask_location {
            match show_save_dialog(&self.config.export.directory, &default_name, format) {
                Some(path) => path,
                None => {
                    self.reports.finish_export(Ok(None));
                    return;
                }
            }
        } else {
            reports::fallback_path(&self.config.export.directory, kind, format, Local::now().date_naive())
        };

        self.log_info(format!("Exportando relatório de {}...", kind.label().to_lowercase()));
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let token = self.panel_token.clone();

        self.rt.spawn(async move {
            let result: Result<Option<PathBuf>> = async {
                let bytes = reports::fetch_export(client.as_ref(), kind, format, &filter, &token).await?;
                reports::write_export(&bytes, &path).await?;
                Ok(Some(path))
            }
            .await;
            let _ = tx.send(UiMessage::ExportFinished(result));
        });
    }

    fn drain_reports_outcome(&mut self) {
        if let Some(outcome) = self.reports.take_outcome() {
            self.show_outcome(outcome);
        }
    }

    /// Register a student present right now.
    pub fn quick_register_student(&mut self, aluno: &Aluno) {
        let Some(request) = self.quick_register.request(aluno.id) else {
            return;
        };
        let nome = aluno.nome.clone();
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let token = self.panel_token.clone();

        self.rt.spawn(async move {
            let result = register_now(client.as_ref(), request, &token).await;
            let _ = tx.send(UiMessage::QuickRegistered { nome, result });
        });
    }

    /// Reactivate a soft-deleted mentor.
    pub fn reactivate_mentor(&mut self, id: Id, nome: String) {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let token = self.panel_token.clone();

        self.rt.spawn(async move {
            let result = cancellable(&token, client.reactivate(id)).await.and_then(|inner| inner);
            let _ = tx.send(UiMessage::MentorReactivated { nome, result });
        });
    }

    /// Test the backend URL currently typed in the settings.
    pub fn test_connection(&mut self) {
        let client = match ApiClient::new(&self.config.api.base_url) {
            Ok(client) => client,
            Err(e) => {
                self.connection_status = ConnectionStatus::Failed(e.to_string());
                return;
            }
        };
        self.connection_status = ConnectionStatus::Testing;
        self.log_info(format!("Testando conexão com {}", client.base_url()));
        let tx = self.tx.clone();
        let token = self.panel_token.clone();

        self.rt.spawn(async move {
            let result = cancellable(&token, client.test_connection()).await.and_then(|inner| inner);
            let _ = tx.send(UiMessage::ConnectionTested(result));
        });
    }

    /// Validate and persist the settings, then point the client at the new URL.
    pub fn save_config(&mut self) {
        if let Err(e) = self.config.validate() {
            self.error_message = Some(e.to_string());
            return;
        }

        match self.config.save(&self.config_path) {
            Ok(()) => {
                tracing::info!("Config saved to {}", self.config_path.display());
                self.config_modified = false;
                self.log_success("Configurações salvas");
            }
            Err(e) => {
                tracing::error!("Failed to save config: {e}");
                self.error_message = Some(format!("Erro ao salvar configurações: {e}"));
                return;
            }
        }

        if self.client.base_url().trim_end_matches('/') != self.config.api.base_url.trim().trim_end_matches('/') {
            match ApiClient::new(&self.config.api.base_url) {
                Ok(client) => {
                    self.client = Arc::new(client);
                    self.log_info(format!("Backend alterado para {}", self.client.base_url()));
                }
                Err(e) => self.error_message = Some(e.to_string()),
            }
        }
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::Turmas(event) => self.apply_event(event),
                UiMessage::Alunos(event) => self.apply_event(event),
                UiMessage::Presencas(event) => self.apply_event(event),
                UiMessage::Mentores(event) => self.apply_event(event),
                UiMessage::Chamadas(event) => self.apply_event(event),
                UiMessage::DashboardLoaded(result) => {
                    if let Some(outcome) = self.dashboard.apply(result)
                        && self.current_panel == Panel::Dashboard
                    {
                        self.show_outcome(outcome);
                    }
                }
                UiMessage::ReportLookupLoaded(result) => {
                    self.reports.apply_lookup(result);
                    if self.current_panel == Panel::Relatorios {
                        self.drain_reports_outcome();
                    } else {
                        self.reports.take_outcome();
                    }
                }
                UiMessage::ReportPreview(result) => {
                    self.reports.apply_preview(result);
                    self.drain_reports_outcome();
                }
                UiMessage::ExportFinished(result) => {
                    self.reports.finish_export(result);
                    self.drain_reports_outcome();
                }
                UiMessage::QuickRegistered { nome, result } => match result {
                    Ok(()) => {
                        self.log_info(format!("Presença rápida: {nome}"));
                        self.show_outcome(Outcome::Success("Presença registrada com sucesso!".to_string()));
                        if self.current_panel == Panel::Presencas {
                            self.reload::<Presenca>();
                        }
                    }
                    Err(AppError::Cancelled) => {}
                    Err(e) => self.show_outcome(Outcome::Failure(format!("Erro ao registrar presença: {e}"))),
                },
                UiMessage::MentorReactivated { nome, result } => match result {
                    Ok(()) => {
                        self.show_outcome(Outcome::Success(format!("Mentor \"{nome}\" reativado com sucesso!")));
                        if self.current_panel == Panel::Mentores {
                            self.reload::<Mentor>();
                        }
                    }
                    Err(AppError::Cancelled) => {}
                    Err(e) => self.show_outcome(Outcome::Failure(format!("Erro ao reativar mentor: {e}"))),
                },
                UiMessage::ConnectionTested(result) => match result {
                    Ok(()) => {
                        self.connection_status = ConnectionStatus::Connected;
                        self.log_success("Conexão com o backend bem-sucedida");
                    }
                    Err(AppError::Cancelled) => {}
                    Err(e) => {
                        self.log_error(format!("Falha na conexão: {e}"));
                        self.connection_status = ConnectionStatus::Failed(e.to_string());
                    }
                },
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.dashboard.loading
            || self.turmas.loading
            || self.alunos.loading
            || self.presencas.loading
            || self.mentores.loading
            || self.chamadas.loading
            || self.reports.loading_preview
            || self.reports.exporting.is_some()
            || self.connection_status == ConnectionStatus::Testing
    }

    /// Render the navigation bar.
    fn show_nav_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Controle de Presença").strong());
                ui.separator();
                for panel in Panel::ALL {
                    if ui
                        .selectable_label(self.current_panel == panel, panel.name())
                        .clicked()
                    {
                        self.navigate(panel);
                    }
                }
            });
        });
    }

    /// Render status bar (display only, no interaction).
    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(28.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let (color, text) = match &self.connection_status {
                        ConnectionStatus::Unknown => (colors::NEUTRAL, "não testado"),
                        ConnectionStatus::Testing => (colors::WARNING, "testando..."),
                        ConnectionStatus::Connected => (colors::SUCCESS, "conectado"),
                        ConnectionStatus::Failed(_) => (colors::ERROR, "falha na conexão"),
                    };
                    ui.colored_label(color, format!("Backend: {} ({text})", self.client.base_url()));

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.is_busy() {
                            ui.spinner();
                        }
                    });
                });
            });
    }

    /// Render modal dialogs (error, success).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(error) = self.error_message.clone() {
            egui::Window::new("Erro")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        if let Some(msg) = self.success_message.clone() {
            egui::Window::new("Sucesso")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_async_results();

        // Keep polling while background work is outstanding
        if self.is_busy()
            || self.turmas.deleting
            || self.alunos.deleting
            || self.presencas.deleting
            || self.mentores.deleting
            || self.chamadas.deleting
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        self.show_nav_bar(ctx);
        self.show_status_bar(ctx);
        self.show_dialogs(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let next = match self.current_panel {
                Panel::Dashboard => dashboard_panel::show(self, ui),
                Panel::Turmas => turmas_panel::show(self, ui).then_some(Panel::Dashboard),
                Panel::Alunos => alunos_panel::show(self, ui).then_some(Panel::Dashboard),
                Panel::Presencas => presencas_panel::show(self, ui).then_some(Panel::Dashboard),
                Panel::Mentores => mentores_panel::show(self, ui).then_some(Panel::Dashboard),
                Panel::Chamadas => chamadas_panel::show(self, ui).then_some(Panel::Dashboard),
                Panel::Relatorios => reports_panel::show(self, ui).then_some(Panel::Dashboard),
                Panel::Configuracoes => settings_panel::show(self, ui).then_some(Panel::Dashboard),
            };
            if let Some(panel) = next {
                self.navigate(panel);
            }
        });
    }
}

/// Open save file dialog and return selected path.
fn show_save_dialog(directory: &std::path::Path, default_name: &str, format: ExportFormat) -> Option<PathBuf> {
    let label = match format {
        ExportFormat::Csv => "CSV",
        ExportFormat::Excel => "Excel",
    };
    rfd::FileDialog::new()
        .set_directory(directory)
        .set_file_name(default_name)
        .add_filter(label, &[format.extension()])
        .save_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_app() -> App {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let client = ApiClient::new("http://127.0.0.1:9/api").unwrap();
        App::new(AppConfig::default(), PathBuf::from("config.toml"), client, rt)
    }

    #[test]
    fn test_quick_register_from_other_panel_skips_reload() {
        let mut app = offline_app();
        assert_eq!(app.current_panel, Panel::Dashboard);

        app.tx
            .send(UiMessage::QuickRegistered {
                nome: "Ana".into(),
                result: Ok(()),
            })
            .unwrap();
        app.poll_async_results();

        assert!(!app.presencas.loading);
        assert_eq!(app.success_message.as_deref(), Some("Presença registrada com sucesso!"));
    }

    #[test]
    fn test_mentor_reactivated_from_other_panel_skips_reload() {
        let mut app = offline_app();
        app.tx
            .send(UiMessage::MentorReactivated {
                nome: "Carla".into(),
                result: Ok(()),
            })
            .unwrap();
        app.poll_async_results();

        assert!(!app.mentores.loading);
    }
}
