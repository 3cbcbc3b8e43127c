//! Generic list page state: records, filter, edit dialog and delete
//! confirmation for one entity type.
//!
//! The container never performs I/O. User actions return a [`Command`] for
//! the caller to run (see [`execute`](super::execute)); the resulting
//! [`Event`] is fed back through [`ListState::apply`].

use chrono::NaiveDateTime;

use super::entity::{Entity, EntityFilter, EntityForm};
use super::forms::FieldErrors;
use crate::error::AppError;
use crate::models::Id;

/// Work requested by the page.
#[derive(Debug, Clone)]
pub enum Command<E: Entity> {
    Load,
    Create(E::Payload),
    Update(Id, E::Payload),
    Delete(Id),
}

/// Result of running a [`Command`].
#[derive(Debug)]
pub enum Event<E: Entity> {
    Loaded { records: Vec<E>, lookup: E::Lookup },
    LoadFailed(AppError),
    Saved,
    SaveFailed(AppError),
    Deleted,
    DeleteFailed(AppError),
    /// The page was left before the command finished.
    Cancelled,
}

/// User-facing result of the last operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Creating,
    Editing(Id),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Open,
    Submitting,
}

/// Open create/edit dialog.
#[derive(Debug, Clone)]
pub struct DialogState<E: Entity> {
    pub mode: DialogMode,
    pub form: E::Form,
    pub errors: FieldErrors,
    /// Backend rejection of the last submit.
    pub failure: Option<String>,
    pub phase: DialogPhase,
}

impl<E: Entity> DialogState<E> {
    fn new(mode: DialogMode, form: E::Form) -> Self {
        Self {
            mode,
            form,
            errors: FieldErrors::default(),
            failure: None,
            phase: DialogPhase::Open,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == DialogPhase::Submitting
    }

    pub fn title(&self) -> String {
        match self.mode {
            DialogMode::Creating if E::FEMININE => format!("Nova {}", E::NOUN),
            DialogMode::Creating => format!("Novo {}", E::NOUN),
            DialogMode::Editing(_) => format!("Editar {}", E::NOUN),
        }
    }
}

/// Record awaiting delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: Id,
    pub prompt: String,
}

pub struct ListState<E: Entity> {
    pub records: Vec<E>,
    pub lookup: E::Lookup,
    pub filter: E::Filter,
    pub loading: bool,
    pub deleting: bool,
    pub dialog: Option<DialogState<E>>,
    pub pending_delete: Option<PendingDelete>,
    outcome: Option<Outcome>,
}

impl<E: Entity> Default for ListState<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            lookup: E::Lookup::default(),
            filter: E::Filter::default(),
            loading: false,
            deleting: false,
            dialog: None,
            pending_delete: None,
            outcome: None,
        }
    }
}

impl<E: Entity> ListState<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (re)loading the list and its lookups.
    pub fn load(&mut self) -> Command<E> {
        self.loading = true;
        Command::Load
    }

    /// Records passing the current filter, in load order.
    pub fn filtered_view(&self) -> Vec<&E> {
        self.records
            .iter()
            .filter(|r| self.filter.matches(r, &self.lookup))
            .collect()
    }

    pub fn clear_filter(&mut self) {
        self.filter = E::Filter::default();
    }

    pub fn open_create(&mut self, now: NaiveDateTime) {
        self.dialog = Some(DialogState::new(DialogMode::Creating, E::Form::blank(now)));
    }

    pub fn open_edit(&mut self, record: &E) {
        self.dialog = Some(DialogState::new(
            DialogMode::Editing(record.id()),
            E::Form::from_record(record),
        ));
    }

    /// Close the dialog without saving. Ignored while a submit is in flight.
    pub fn close_dialog(&mut self) {
        if self.dialog.as_ref().is_some_and(|d| !d.is_submitting()) {
            self.dialog = None;
        }
    }

    pub fn request_delete(&mut self, record: &E) {
        self.pending_delete = Some(PendingDelete {
            id: record.id(),
            prompt: record.delete_prompt(&self.lookup),
        });
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirm the pending deletion, producing exactly one delete command.
    pub fn confirm_delete(&mut self) -> Option<Command<E>> {
        let pending = self.pending_delete.take()?;
        self.deleting = true;
        Some(Command::Delete(pending.id))
    }

    /// Validate the open dialog and produce the save command.
    ///
    /// Validation failures keep the dialog open with per-field errors and
    /// produce no command. A dialog already submitting produces nothing.
    pub fn save(&mut self) -> Option<Command<E>> {
        let dialog = self.dialog.as_mut()?;
        if dialog.is_submitting() {
            return None;
        }

        match dialog.form.validate() {
            Ok(payload) => {
                dialog.errors = FieldErrors::default();
                dialog.failure = None;
                dialog.phase = DialogPhase::Submitting;
                Some(match dialog.mode {
                    DialogMode::Creating => Command::Create(payload),
                    DialogMode::Editing(id) => Command::Update(id, payload),
                })
            }
            Err(errors) => {
                dialog.errors = errors;
                None
            }
        }
    }

    /// Fold a command result into the state. Successful writes return the
    /// follow-up reload.
    pub fn apply(&mut self, event: Event<E>) -> Option<Command<E>> {
        match event {
            Event::Loaded { records, lookup } => {
                self.records = records;
                self.lookup = lookup;
                self.loading = false;
                None
            }
            Event::LoadFailed(e) => {
                tracing::warn!("Failed to load {}: {e}", E::PLURAL);
                self.records.clear();
                self.loading = false;
                self.outcome = Some(Outcome::Failure(format!(
                    "Erro ao carregar {}. Verifique se o backend está rodando.",
                    E::PLURAL
                )));
                None
            }
            Event::Saved => {
                let message = match self.dialog.take().map(|d| d.mode) {
                    Some(DialogMode::Creating) => E::created_message(),
                    _ => E::updated_message(),
                };
                self.outcome = Some(Outcome::Success(message));
                Some(self.load())
            }
            Event::SaveFailed(e) => {
                let message = save_failure_message::<E>(&e);
                tracing::warn!("Failed to save {}: {e}", E::NOUN.to_lowercase());
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.phase = DialogPhase::Open;
                    dialog.failure = Some(message.clone());
                }
                self.outcome = Some(Outcome::Failure(message));
                None
            }
            Event::Deleted => {
                self.deleting = false;
                self.outcome = Some(Outcome::Success(E::removed_message()));
                Some(self.load())
            }
            Event::DeleteFailed(e) => {
                tracing::warn!("Failed to remove {}: {e}", E::NOUN.to_lowercase());
                self.deleting = false;
                self.outcome = Some(Outcome::Failure(format!(
                    "Erro ao remover {}: {e}",
                    E::NOUN.to_lowercase()
                )));
                None
            }
            Event::Cancelled => None,
        }
    }

    /// Drop in-flight and modal state when the page is left.
    pub fn abandon(&mut self) {
        self.loading = false;
        self.deleting = false;
        self.dialog = None;
        self.pending_delete = None;
    }

    /// Take the last outcome for display.
    pub fn take_outcome(&mut self) -> Option<Outcome> {
        self.outcome.take()
    }
}

fn save_failure_message<E: Entity>(error: &AppError) -> String {
    match E::conflict_message() {
        Some(message) if error.is_conflict() => message.to_string(),
        _ => format!("Erro ao salvar {}: {error}", E::NOUN.to_lowercase()),
    }
}
