//! Attendance panel: record list, filters, manual entry and quick register.

use chrono::Local;
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CHECK, LIGHTNING, PENCIL, PLUS, TRASH};

use super::app::App;
use super::components::{
    action_button, back_button, danger_action_button, empty_state, field_error, form_text, panel_header,
    primary_button_with_icon, search_box, styled_button, styled_button_with_icon, turma_combo,
};
use super::list_page::{count_label, delete_window, form_window};
use crate::models::Presenca;
use crate::state::EntityFilter;
use crate::state::filters::format_date_br;
use crate::state::lookup::{find_aluno, resolve_attendance};

/// Show the attendance panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Presenças", "Registre e consulte a presença dos alunos");

    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Nova Presença").clicked() {
            app.presencas.open_create(Local::now().naive_local());
        }
        ui.add_space(10.0);
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Atualizar").clicked() {
            app.reload::<Presenca>();
        }
    });

    ui.add_space(10.0);
    show_quick_register(app, ui);
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        let page = &mut app.presencas;
        ui.label("Buscar:");
        search_box(ui, &mut page.filter.termo, "Aluno, matrícula ou turma...");

        ui.add_space(20.0);

        ui.label("Turma:");
        turma_combo(
            ui,
            "presenca_turma_filter",
            &page.lookup.turmas,
            &mut page.filter.turma_id,
            "Todas",
            false,
        );

        ui.add_space(20.0);

        ui.label("Data:");
        ui.add(
            egui::TextEdit::singleline(&mut page.filter.data)
                .desired_width(100.0)
                .hint_text("AAAA-MM-DD"),
        );

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
    let command = form_window(&ctx, &mut app.presencas, |ui, form, errors, lookup| {
        egui::Grid::new("presenca_form_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Turma:");
                ui.vertical(|ui| {
                    let mut turma_id = form.turma_id;
                    if turma_combo(ui, "presenca_form_turma", &lookup.turmas, &mut turma_id, "Selecione...", true) {
                        form.select_turma(turma_id);
                    }
                    field_error(ui, errors.get("turma_id"));
                });
                ui.end_row();

                ui.label("Aluno:");
                ui.vertical(|ui| {
                    let eligible = form.eligible_students(&lookup.alunos);
                    let selected = form
                        .aluno_id
                        .and_then(|id| find_aluno(&lookup.alunos, id))
                        .map(|a| a.nome.as_str())
                        .unwrap_or(if form.turma_id.is_some() {
                            "Selecione..."
                        } else {
                            "Escolha a turma primeiro"
                        });
                    ui.add_enabled_ui(form.turma_id.is_some(), |ui| {
                        egui::ComboBox::from_id_salt("presenca_form_aluno")
                            .width(260.0)
                            .selected_text(selected)
                            .show_ui(ui, |ui| {
                                for aluno in eligible {
                                    ui.selectable_value(
                                        &mut form.aluno_id,
                                        Some(aluno.id),
                                        format!("{} ({})", aluno.nome, aluno.matricula),
                                    );
                                }
                            });
                    });
                    field_error(ui, errors.get("aluno_id"));
                });
                ui.end_row();

                ui.label("Data:");
                form_text(ui, &mut form.data_presenca, "AAAA-MM-DD", errors.get("data_presenca"));
                ui.end_row();

                ui.label("Hora:");
                form_text(ui, &mut form.hora_presenca, "HH:MM", errors.get("hora_presenca"));
                ui.end_row();

                ui.label("Observações:");
                ui.add(
                    egui::TextEdit::multiline(&mut form.observacoes)
                        .desired_width(260.0)
                        .desired_rows(2)
                        .hint_text("Opcional"),
                );
                ui.end_row();
            });
    });
    app.run_opt(command);

    let command = delete_window(&ctx, &mut app.presencas);
    app.run_opt(command);

    go_back
}

/// One-click registration for the students of a class.
fn show_quick_register(app: &mut App, ui: &mut Ui) {
    let mut clicked = None;

    egui::CollapsingHeader::new(format!("{LIGHTNING} Registro rápido"))
        .default_open(false)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Turma:");
                turma_combo(
                    ui,
                    "quick_register_turma",
                    &app.presencas.lookup.turmas,
                    &mut app.quick_register.turma_id,
                    "Selecione...",
                    true,
                );
            });
            ui.add_space(8.0);

            if app.quick_register.turma_id.is_none() {
                ui.label(RichText::new("Selecione uma turma para listar os alunos.").weak());
                return;
            }

            let students = app.quick_register.students(&app.presencas.lookup.alunos);
            if students.is_empty() {
                ui.label(RichText::new("Nenhum aluno ativo nesta turma.").weak());
                return;
            }

            ScrollArea::vertical()
                .id_salt("quick_register_scroll")
                .max_height(180.0)
                .show(ui, |ui| {
                    egui::Grid::new("quick_register_grid")
                        .num_columns(3)
                        .striped(true)
                        .spacing([12.0, 6.0])
                        .show(ui, |ui| {
                            for aluno in students {
                                ui.label(&aluno.matricula);
                                ui.label(&aluno.nome);
                                if styled_button_with_icon(ui, CHECK, "Presente").clicked() {
                                    clicked = Some(aluno.clone());
                                }
                                ui.end_row();
                            }
                        });
                });
        });

    if let Some(aluno) = clicked {
        app.quick_register_student(&aluno);
    }
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let mut edit = None;
    let mut remove = None;

    let filtered = app.presencas.filtered_view();
    count_label(ui, &app.presencas, filtered.len());
    ui.add_space(10.0);

    if filtered.is_empty() {
        empty_state(ui, app.presencas.loading, app.presencas.filter.is_active(), "presenças");
        return;
    }

    let lookup = &app.presencas.lookup;
    ScrollArea::vertical().id_salt("presencas_scroll").show(ui, |ui| {
        egui::Grid::new("presencas_grid")
            .num_columns(7)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Data");
                ui.strong("Hora");
                ui.strong("Aluno");
                ui.strong("Matrícula");
                ui.strong("Turma");
                ui.strong("Observações");
                ui.strong("Ações");
                ui.end_row();

                for presenca in &filtered {
                    let names = resolve_attendance(presenca, &lookup.alunos, &lookup.turmas);
                    ui.label(format_date_br(&presenca.data_presenca));
                    ui.label(presenca.hora_curta());
                    ui.label(names.aluno_nome);
                    ui.label(names.aluno_matricula);
                    ui.label(names.turma_nome);
                    ui.label(presenca.observacoes.as_deref().unwrap_or("-"));

                    ui.horizontal(|ui| {
                        if action_button(ui, PENCIL, "Editar").clicked() {
                            edit = Some((*presenca).clone());
                        }
                        ui.add_space(4.0);
                        if danger_action_button(ui, TRASH, "Remover").clicked() {
                            remove = Some((*presenca).clone());
                        }
                    });
                    ui.end_row();
                }
            });
    });

    if let Some(presenca) = edit {
        app.presencas.open_edit(&presenca);
    }
    if let Some(presenca) = remove {
        app.presencas.request_delete(&presenca);
    }
}
