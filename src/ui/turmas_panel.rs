//! Class management panel with CRUD and search.

use chrono::Local;
use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, PENCIL, PLUS, TRASH};

use super::app::App;
use super::components::{
    action_button, back_button, danger_action_button, empty_state, form_text, panel_header, primary_button_with_icon,
    search_box, status_badge, styled_button, styled_button_with_icon,
};
use super::list_page::{count_label, delete_window, form_window};
use crate::models::Turma;
use crate::state::EntityFilter;

/// Show the class panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Turmas", "Gerencie as turmas cadastradas");

    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Nova Turma").clicked() {
            app.turmas.open_create(Local::now().naive_local());
        }
        ui.add_space(10.0);
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Atualizar").clicked() {
            app.reload::<Turma>();
        }
    });

    ui.add_space(10.0);

    ui.horizontal(|ui| {
        ui.label("Buscar:");
        search_box(ui, &mut app.turmas.filter.termo, "Nome ou código...");
        if app.turmas.filter.is_active() {
            ui.add_space(10.0);
            if styled_button(ui, "Limpar").clicked() {
                app.turmas.clear_filter();
            }
        }
    });

    ui.add_space(15.0);

    show_table(app, ui);

    let ctx = ui.ctx().clone();
    let command = form_window(&ctx, &mut app.turmas, |ui, form, errors, _| {
        egui::Grid::new("turma_form_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Nome:");
                form_text(ui, &mut form.nome, "Ex: Turma A", errors.get("nome"));
                ui.end_row();

                ui.label("Código:");
                form_text(ui, &mut form.codigo, "Ex: TA-2024", errors.get("codigo"));
                ui.end_row();

                ui.label("Descrição:");
                ui.add(
                    egui::TextEdit::multiline(&mut form.descricao)
                        .desired_width(260.0)
                        .desired_rows(3)
                        .hint_text("Opcional"),
                );
                ui.end_row();

                ui.label("Ativa:");
                ui.checkbox(&mut form.ativa, "");
                ui.end_row();
            });
    });
    app.run_opt(command);

    let command = delete_window(&ctx, &mut app.turmas);
    app.run_opt(command);

    go_back
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let mut edit = None;
    let mut remove = None;

    let filtered = app.turmas.filtered_view();
    count_label(ui, &app.turmas, filtered.len());
    ui.add_space(10.0);

    if filtered.is_empty() {
        empty_state(ui, app.turmas.loading, app.turmas.filter.is_active(), "turmas");
        return;
    }

    ScrollArea::vertical().id_salt("turmas_scroll").show(ui, |ui| {
        egui::Grid::new("turmas_grid")
            .num_columns(7)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Código");
                ui.strong("Nome");
                ui.strong("Descrição");
                ui.strong("Alunos");
                ui.strong("Presenças");
                ui.strong("Status");
                ui.strong("Ações");
                ui.end_row();

                for turma in &filtered {
                    ui.label(&turma.codigo);
                    ui.label(&turma.nome);
                    ui.label(turma.descricao.as_deref().unwrap_or("-"));
                    ui.label(turma.total_alunos.unwrap_or(0).to_string());
                    ui.label(turma.total_presencas.unwrap_or(0).to_string());
                    status_badge(ui, turma.ativa);

                    ui.horizontal(|ui| {
                        if action_button(ui, PENCIL, "Editar").clicked() {
                            edit = Some((*turma).clone());
                        }
                        ui.add_space(4.0);
                        if danger_action_button(ui, TRASH, "Remover").clicked() {
                            remove = Some((*turma).clone());
                        }
                    });
                    ui.end_row();
                }
            });
    });

    if let Some(turma) = edit {
        app.turmas.open_edit(&turma);
    }
    if let Some(turma) = remove {
        app.turmas.request_delete(&turma);
    }
}
