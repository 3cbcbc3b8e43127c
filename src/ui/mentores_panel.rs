//! Mentor management panel.

use chrono::Local;
use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROW_COUNTER_CLOCKWISE, ARROWS_CLOCKWISE, PENCIL, PLUS, TRASH};

use super::app::App;
use super::components::{
    action_button, back_button, danger_action_button, empty_state, field_error, form_text, panel_header,
    primary_button_with_icon, search_box, status_badge, styled_button, styled_button_with_icon,
};
use super::list_page::{count_label, delete_window, form_window};
use crate::models::{Mentor, TipoMentor};
use crate::state::EntityFilter;

enum RowAction {
    Edit(Mentor),
    Remove(Mentor),
    Reactivate(Mentor),
}

/// Show the mentor panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Mentores", "Cadastro de mentores, trainees e coordenadores");

    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Novo Mentor").clicked() {
            app.mentores.open_create(Local::now().naive_local());
        }
        ui.add_space(10.0);
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Atualizar").clicked() {
            app.reload::<Mentor>();
        }
    });

    ui.add_space(10.0);

    ui.horizontal(|ui| {
        let filter = &mut app.mentores.filter;
        ui.label("Buscar:");
        search_box(ui, &mut filter.termo, "Nome ou email...");

        ui.add_space(20.0);

        ui.label("Tipo:");
        egui::ComboBox::from_id_salt("mentor_tipo_filter")
            .width(170.0)
            .selected_text(filter.tipo.map(TipoMentor::label).unwrap_or("Todos"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.tipo, None, "Todos");
                for tipo in TipoMentor::ALL {
                    ui.selectable_value(&mut filter.tipo, Some(tipo), tipo.label());
                }
            });

        ui.add_space(20.0);

        ui.label("Status:");
        ui.selectable_value(&mut filter.ativo, None, "Todos");
        ui.selectable_value(&mut filter.ativo, Some(true), "Ativos");
        ui.selectable_value(&mut filter.ativo, Some(false), "Inativos");
    });

    if app.mentores.filter.is_active() {
        ui.add_space(6.0);
        if styled_button(ui, "Limpar filtros").clicked() {
            app.mentores.clear_filter();
        }
    }

    ui.add_space(15.0);

    show_table(app, ui);

    let ctx = ui.ctx().clone();
    let command = form_window(&ctx, &mut app.mentores, |ui, form, errors, _| {
        egui::Grid::new("mentor_form_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Nome:");
                form_text(ui, &mut form.nome, "Nome completo", errors.get("nome"));
                ui.end_row();

                ui.label("Email:");
                form_text(ui, &mut form.email, "mentor@escola.com", errors.get("email"));
                ui.end_row();

                ui.label("Tipo:");
                ui.vertical(|ui| {
                    egui::ComboBox::from_id_salt("mentor_form_tipo")
                        .width(200.0)
                        .selected_text(form.tipo_mentor.map(TipoMentor::label).unwrap_or("Selecione..."))
                        .show_ui(ui, |ui| {
                            for tipo in TipoMentor::ALL {
                                ui.selectable_value(&mut form.tipo_mentor, Some(tipo), tipo.label());
                            }
                        });
                    field_error(ui, errors.get("tipo_mentor"));
                });
                ui.end_row();

                ui.label("Ativo:");
                ui.checkbox(&mut form.ativo, "");
                ui.end_row();
            });
    });
    app.run_opt(command);

    let command = delete_window(&ctx, &mut app.mentores);
    app.run_opt(command);

    go_back
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let mut action = None;

    let filtered = app.mentores.filtered_view();
    count_label(ui, &app.mentores, filtered.len());
    ui.add_space(10.0);

    if filtered.is_empty() {
        empty_state(ui, app.mentores.loading, app.mentores.filter.is_active(), "mentores");
        return;
    }

    ScrollArea::vertical().id_salt("mentores_scroll").show(ui, |ui| {
        egui::Grid::new("mentores_grid")
            .num_columns(6)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Nome");
                ui.strong("Email");
                ui.strong("Tipo");
                ui.strong("Presenças");
                ui.strong("Status");
                ui.strong("Ações");
                ui.end_row();

                for mentor in &filtered {
                    ui.label(&mentor.nome);
                    ui.label(&mentor.email);
                    ui.label(mentor.tipo_mentor.label());
                    ui.label(mentor.total_presencas.unwrap_or(0).to_string());
                    status_badge(ui, mentor.ativo);

                    ui.horizontal(|ui| {
                        if action_button(ui, PENCIL, "Editar").clicked() {
                            action = Some(RowAction::Edit((*mentor).clone()));
                        }
                        ui.add_space(4.0);
                        if mentor.ativo {
                            if danger_action_button(ui, TRASH, "Desativar").clicked() {
                                action = Some(RowAction::Remove((*mentor).clone()));
                            }
                        } else if action_button(ui, ARROW_COUNTER_CLOCKWISE, "Reativar").clicked() {
                            action = Some(RowAction::Reactivate((*mentor).clone()));
                        }
                    });
                    ui.end_row();
                }
            });
    });

    match action {
        Some(RowAction::Edit(mentor)) => app.mentores.open_edit(&mentor),
        Some(RowAction::Remove(mentor)) => app.mentores.request_delete(&mentor),
        Some(RowAction::Reactivate(mentor)) => app.reactivate_mentor(mentor.id, mentor.nome),
        None => {}
    }
}
