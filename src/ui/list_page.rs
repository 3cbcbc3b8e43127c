//! Form and delete-confirmation windows shared by every list panel.

use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Ui};

use super::components::{colors, primary_button_with_icon, styled_button};
use crate::state::forms::FieldErrors;
use crate::state::{Command, Entity, ListState};

enum DialogAction {
    Save,
    Cancel,
}

/// Render the create/edit window of a list page, if open.
///
/// `fields` draws the entity-specific inputs. Returns the save command when
/// the form validates.
pub fn form_window<E, F>(ctx: &egui::Context, state: &mut ListState<E>, fields: F) -> Option<Command<E>>
where
    E: Entity,
    F: FnOnce(&mut Ui, &mut E::Form, &FieldErrors, &E::Lookup),
{
    let dialog = state.dialog.as_mut()?;
    let submitting = dialog.is_submitting();
    let mut action = None;
    let mut open = true;

    egui::Window::new(dialog.title())
        .collapsible(false)
        .resizable(false)
        .default_width(480.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            ui.add_space(10.0);

            ui.add_enabled_ui(!submitting, |ui| {
                ScrollArea::vertical().max_height(440.0).show(ui, |ui| {
                    fields(ui, &mut dialog.form, &dialog.errors, &state.lookup);
                });
            });

            if let Some(failure) = &dialog.failure {
                ui.add_space(8.0);
                ui.colored_label(colors::ERROR, failure);
            }

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancelar").clicked() {
                    action = Some(DialogAction::Cancel);
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if submitting {
                        ui.spinner();
                        ui.label("Salvando...");
                    } else if primary_button_with_icon(ui, "", "Salvar").clicked() {
                        action = Some(DialogAction::Save);
                    }
                });
            });
        });

    if !open {
        action = Some(DialogAction::Cancel);
    }

    match action {
        Some(DialogAction::Save) => state.save(),
        Some(DialogAction::Cancel) => {
            state.close_dialog();
            None
        }
        None => None,
    }
}

/// Render the delete confirmation window, if a deletion is pending.
///
/// Returns the delete command once confirmed.
pub fn delete_window<E: Entity>(ctx: &egui::Context, state: &mut ListState<E>) -> Option<Command<E>> {
    let prompt = state.pending_delete.as_ref()?.prompt.clone();
    let mut confirmed = false;
    let mut cancelled = false;

    egui::Window::new("Confirmar remoção")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(prompt);
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Cancelar").clicked() {
                    cancelled = true;
                }
                if ui
                    .button(RichText::new("Remover").color(colors::ERROR))
                    .clicked()
                {
                    confirmed = true;
                }
            });
        });

    if cancelled {
        state.cancel_delete();
        None
    } else if confirmed {
        state.confirm_delete()
    } else {
        None
    }
}

/// "Mostrando X de Y" line above a table.
pub fn count_label<E: Entity>(ui: &mut Ui, state: &ListState<E>, shown: usize) {
    ui.horizontal(|ui| {
        ui.label(format!("Mostrando {shown} de {} {}", state.records.len(), E::PLURAL));
        if state.loading {
            ui.spinner();
        }
        if state.deleting {
            ui.label(RichText::new("Removendo...").weak());
        }
    });
}
