//! Mentor roll-call panel.

use chrono::Local;
use eframe::egui::{self, Align, Layout, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CHECK_SQUARE, PENCIL, PLUS, SQUARE, TRASH};

use super::app::App;
use super::components::{
    action_button, back_button, colors, danger_action_button, empty_state, form_text, panel_header,
    primary_button_with_icon, search_box, section_frame, stat_card, styled_button, styled_button_with_icon,
};
use super::list_page::{count_label, delete_window, form_window};
use crate::models::ChamadaMentor;
use crate::state::EntityFilter;
use crate::state::filters::format_date_br;
use crate::state::lookup::{MISSING, find_mentor};

/// Show the roll-call panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Chamadas de Mentores", "Registre a presença dos mentores por data");

    let stats = &app.chamadas.lookup.estatisticas;
    ui.horizontal(|ui| {
        stat_card(ui, "Total de chamadas", &stats.total_chamadas.to_string(), "Desde o início");
        stat_card(ui, "Este mês", &stats.total_chamadas_mes_atual.to_string(), "Chamadas no mês atual");
        stat_card(ui, "Presentes hoje", &stats.total_presentes_hoje.to_string(), "Mentores presentes");
        stat_card(ui, "Ausentes hoje", &stats.total_ausentes_hoje.to_string(), "Mentores ausentes");
    });

    ui.add_space(10.0);

    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Nova Chamada").clicked() {
            app.chamadas.open_create(Local::now().naive_local());
        }
        ui.add_space(10.0);
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Atualizar").clicked() {
            app.reload::<ChamadaMentor>();
        }
        ui.add_space(20.0);

        ui.label("Buscar:");
        search_box(ui, &mut app.chamadas.filter.termo, "Data ou observação...");
        if app.chamadas.filter.is_active() {
            ui.add_space(10.0);
            if styled_button(ui, "Limpar").clicked() {
                app.chamadas.clear_filter();
            }
        }
    });

    ui.add_space(15.0);

    show_cards(app, ui);

    let ctx = ui.ctx().clone();
    let command = form_window(&ctx, &mut app.chamadas, |ui, form, errors, lookup| {
        egui::Grid::new("chamada_form_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Data:");
                form_text(ui, &mut form.data_chamada, "AAAA-MM-DD", errors.get("data_chamada"));
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

        ui.add_space(10.0);
        ui.separator();

        ui.horizontal(|ui| {
            ui.label(RichText::new("Mentores").strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if styled_button_with_icon(ui, SQUARE, "Nenhum").clicked() {
                    form.mark_all(&lookup.mentores, false);
                }
                if styled_button_with_icon(ui, CHECK_SQUARE, "Todos").clicked() {
                    form.mark_all(&lookup.mentores, true);
                }
            });
        });
        ui.add_space(6.0);

        if lookup.mentores.is_empty() {
            ui.label(RichText::new("Nenhum mentor ativo cadastrado.").weak());
        }
        for mentor in &lookup.mentores {
            let mut presente = form.is_present(mentor.id);
            let label = format!("{} ({})", mentor.nome, mentor.tipo_mentor.label());
            if ui.checkbox(&mut presente, label).changed() {
                form.set_presence(mentor.id, presente);
            }
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.colored_label(colors::SUCCESS, format!("Presentes: {}", form.total_presentes()));
            ui.add_space(10.0);
            ui.colored_label(colors::NEUTRAL, format!("Ausentes: {}", form.total_ausentes()));
        });
    });
    app.run_opt(command);

    let command = delete_window(&ctx, &mut app.chamadas);
    app.run_opt(command);

    go_back
}

fn show_cards(app: &mut App, ui: &mut Ui) {
    let mut edit = None;
    let mut remove = None;

    let filtered = app.chamadas.filtered_view();
    count_label(ui, &app.chamadas, filtered.len());
    ui.add_space(10.0);

    if filtered.is_empty() {
        empty_state(ui, app.chamadas.loading, app.chamadas.filter.is_active(), "chamadas");
        return;
    }

    let mentores = &app.chamadas.lookup.mentores;
    ScrollArea::vertical().id_salt("chamadas_scroll").show(ui, |ui| {
        for chamada in &filtered {
            section_frame(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format_date_br(&chamada.data_chamada)).strong().size(16.0));
                    ui.add_space(10.0);
                    ui.label(format!(
                        "{}/{} presentes ({}%)",
                        chamada.presentes(),
                        chamada.total(),
                        chamada.percentual_presenca()
                    ));

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if danger_action_button(ui, TRASH, "Remover").clicked() {
                            remove = Some((*chamada).clone());
                        }
                        ui.add_space(4.0);
                        if action_button(ui, PENCIL, "Editar").clicked() {
                            edit = Some((*chamada).clone());
                        }
                    });
                });

                ui.add(
                    egui::ProgressBar::new(chamada.percentual_presenca() as f32 / 100.0)
                        .desired_width(ui.available_width().min(400.0)),
                );

                if let Some(obs) = chamada.observacoes.as_deref().filter(|o| !o.is_empty()) {
                    ui.label(RichText::new(obs).weak());
                }

                egui::CollapsingHeader::new("Participantes")
                    .id_salt(("chamada_participantes", chamada.id))
                    .show(ui, |ui| {
                        for participante in &chamada.participantes {
                            let nome = participante
                                .mentor_nome
                                .as_deref()
                                .or_else(|| find_mentor(mentores, participante.mentor_id).map(|m| m.nome.as_str()))
                                .unwrap_or(MISSING);
                            ui.horizontal(|ui| {
                                if participante.presente {
                                    ui.colored_label(colors::SUCCESS, "Presente");
                                } else {
                                    ui.colored_label(colors::ERROR, "Ausente");
                                }
                                ui.label(nome);
                            });
                        }
                    });
            });
            ui.add_space(8.0);
        }
    });

    if let Some(chamada) = edit {
        app.chamadas.open_edit(&chamada);
    }
    if let Some(chamada) = remove {
        app.chamadas.request_delete(&chamada);
    }
}
