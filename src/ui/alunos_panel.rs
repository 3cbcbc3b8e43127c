//! Student management panel.

use chrono::Local;
use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, PENCIL, PLUS, TRASH};

use super::app::App;
use super::components::{
    action_button, back_button, danger_action_button, empty_state, field_error, form_text, panel_header,
    primary_button_with_icon, search_box, status_badge, styled_button, styled_button_with_icon, turma_combo,
};
use super::list_page::{count_label, delete_window, form_window};
use crate::models::Aluno;
use crate::state::EntityFilter;
use crate::state::lookup::resolve_class_name;

/// Show the student panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Alunos", "Gerencie os alunos e suas turmas");

    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Novo Aluno").clicked() {
            app.alunos.open_create(Local::now().naive_local());
        }
        ui.add_space(10.0);
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Atualizar").clicked() {
            app.reload::<Aluno>();
        }
    });

    ui.add_space(10.0);

    ui.horizontal(|ui| {
        let page = &mut app.alunos;
        ui.label("Buscar:");
        search_box(ui, &mut page.filter.termo, "Nome, matrícula ou email...");

        ui.add_space(20.0);

        ui.label("Turma:");
        turma_combo(ui, "aluno_turma_filter", &page.lookup, &mut page.filter.turma_id, "Todas", false);

        if page.filter.is_active() {
            ui.add_space(10.0);
            if styled_button(ui, "Limpar").clicked() {
                page.clear_filter();
            }
        }
    });

    ui.add_space(15.0);

    show_table(app, ui);

    let ctx = ui.ctx().clone();
    let command = form_window(&ctx, &mut app.alunos, |ui, form, errors, turmas| {
        egui::Grid::new("aluno_form_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Nome:");
                form_text(ui, &mut form.nome, "Nome completo", errors.get("nome"));
                ui.end_row();

                ui.label("Matrícula:");
                form_text(ui, &mut form.matricula, "Ex: 2024001", errors.get("matricula"));
                ui.end_row();

                ui.label("Email:");
                form_text(ui, &mut form.email, "aluno@escola.com", errors.get("email"));
                ui.end_row();

                ui.label("Turma:");
                ui.vertical(|ui| {
                    turma_combo(ui, "aluno_form_turma", turmas, &mut form.turma_id, "Selecione...", true);
                    field_error(ui, errors.get("turma_id"));
                });
                ui.end_row();

                ui.label("Ativo:");
                ui.checkbox(&mut form.ativo, "");
                ui.end_row();
            });
    });
    app.run_opt(command);

    let command = delete_window(&ctx, &mut app.alunos);
    app.run_opt(command);

    go_back
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let mut edit = None;
    let mut remove = None;

    let filtered = app.alunos.filtered_view();
    count_label(ui, &app.alunos, filtered.len());
    ui.add_space(10.0);

    if filtered.is_empty() {
        empty_state(ui, app.alunos.loading, app.alunos.filter.is_active(), "alunos");
        return;
    }

    let turmas = &app.alunos.lookup;
    ScrollArea::vertical().id_salt("alunos_scroll").show(ui, |ui| {
        egui::Grid::new("alunos_grid")
            .num_columns(7)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Matrícula");
                ui.strong("Nome");
                ui.strong("Email");
                ui.strong("Turma");
                ui.strong("Presenças");
                ui.strong("Status");
                ui.strong("Ações");
                ui.end_row();

                for aluno in &filtered {
                    ui.label(&aluno.matricula);
                    ui.label(&aluno.nome);
                    ui.label(&aluno.email);
                    ui.label(resolve_class_name(aluno, turmas));
                    ui.label(aluno.total_presencas.unwrap_or(0).to_string());
                    status_badge(ui, aluno.ativo);

                    ui.horizontal(|ui| {
                        if action_button(ui, PENCIL, "Editar").clicked() {
                            edit = Some((*aluno).clone());
                        }
                        ui.add_space(4.0);
                        if danger_action_button(ui, TRASH, "Remover").clicked() {
                            remove = Some((*aluno).clone());
                        }
                    });
                    ui.end_row();
                }
            });
    });

    if let Some(aluno) = edit {
        app.alunos.open_edit(&aluno);
    }
    if let Some(aluno) = remove {
        app.alunos.request_delete(&aluno);
    }
}
