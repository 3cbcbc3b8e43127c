//! Dashboard panel with stats, per-class charts, recent attendance and activity log.

use eframe::egui::{self, Color32, RichText, ScrollArea, Sense, Ui};
use egui_phosphor::regular::{CALENDAR_CHECK, CHALKBOARD_TEACHER, CHART_BAR, CLIPBOARD_TEXT, GEAR, STUDENT, USERS};

use super::app::{App, LogLevel, Panel};
use super::components::{colors, dashboard_card, section_frame, stat_card};
use crate::state::dashboard::ClassSeries;
use crate::state::filters::format_date_br;

/// Show the dashboard panel.
///
/// Returns `Some(panel)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;

    ScrollArea::vertical().id_salt("dashboard_scroll").show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);

            ui.label(RichText::new("Controle de Presença").size(32.0).strong());
            ui.add_space(5.0);
            ui.label(RichText::new("Turmas, alunos e mentores").size(14.0).weak());

            ui.add_space(20.0);

            let summary = &app.dashboard.data.summary;
            ui.horizontal(|ui| {
                let available = ui.available_width();
                let start_offset = ((available - 700.0) / 2.0).max(0.0);
                ui.add_space(start_offset);

                stat_card(ui, "Turmas", &summary.total_turmas.to_string(), "Turmas cadastradas");
                stat_card(ui, "Alunos", &summary.total_alunos.to_string(), "Alunos cadastrados");
                stat_card(ui, "Presenças", &summary.total_presencas.to_string(), "Registros no total");
                stat_card(ui, "Presenças hoje", &summary.presencas_hoje.to_string(), "Registradas hoje");
            });

            if app.dashboard.loading {
                ui.add_space(5.0);
                ui.spinner();
            }

            ui.add_space(20.0);

            next_panel = nav_cards(ui);

            ui.add_space(20.0);
        });

        let available_width = ui.available_width();
        let column_width = (available_width - 40.0) / 2.0;

        ui.horizontal(|ui| {
            ui.add_space(10.0);

            ui.vertical(|ui| {
                ui.set_width(column_width);
                section_frame(ui, |ui| {
                    ui.set_min_width(column_width - 30.0);
                    ui.label(RichText::new("Alunos por turma").strong());
                    ui.add_space(10.0);
                    let max = app.dashboard.data.summary.series_max();
                    bar_chart(ui, &app.dashboard.data.summary.series, max, |s| s.alunos, colors::PRIMARY);
                });
            });

            ui.add_space(20.0);

            ui.vertical(|ui| {
                ui.set_width(column_width);
                section_frame(ui, |ui| {
                    ui.set_min_width(column_width - 30.0);
                    ui.label(RichText::new("Presenças por turma").strong());
                    ui.add_space(10.0);
                    let max = app.dashboard.data.summary.series_max();
                    bar_chart(ui, &app.dashboard.data.summary.series, max, |s| s.presencas, colors::ACCENT);
                });
            });
        });

        ui.add_space(20.0);

        ui.horizontal(|ui| {
            ui.add_space(10.0);

            // Left column - class summary and recent attendance
            ui.vertical(|ui| {
                ui.set_width(column_width);
                section_frame(ui, |ui| {
                    ui.set_min_width(column_width - 30.0);
                    ui.label(RichText::new("Resumo por turma").strong());
                    ui.add_space(10.0);
                    egui::Grid::new("dashboard_series_grid")
                        .num_columns(3)
                        .striped(true)
                        .spacing([12.0, 6.0])
                        .show(ui, |ui| {
                            ui.strong("Turma");
                            ui.strong("Alunos");
                            ui.strong("Presenças");
                            ui.end_row();
                            for serie in &app.dashboard.data.summary.series {
                                ui.label(&serie.nome);
                                ui.label(serie.alunos.to_string());
                                ui.label(serie.presencas.to_string());
                                ui.end_row();
                            }
                        });

                    ui.add_space(15.0);
                    ui.label(RichText::new("Presenças recentes").strong());
                    ui.add_space(6.0);
                    if app.dashboard.data.recentes.is_empty() {
                        ui.label(RichText::new("Nenhuma presença registrada").weak());
                    }
                    for presenca in &app.dashboard.data.recentes {
                        let names = app.dashboard.data.resolve(presenca);
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(format!(
                                    "{} {}",
                                    format_date_br(&presenca.data_presenca),
                                    presenca.hora_curta()
                                ))
                                .small()
                                .color(Color32::DARK_GRAY),
                            );
                            ui.label(names.aluno_nome);
                            ui.label(RichText::new(names.turma_nome).weak());
                        });
                    }
                });
            });

            ui.add_space(20.0);

            // Right column - Recent Activity
            ui.vertical(|ui| {
                ui.set_width(column_width);
                section_frame(ui, |ui| {
                    ui.set_min_width(column_width - 30.0);

                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Atividade recente").strong());
                        if !app.log_messages.is_empty() && ui.small_button("Limpar").clicked() {
                            app.clear_log();
                        }
                    });
                    ui.add_space(10.0);

                    ScrollArea::vertical()
                        .id_salt("activity_scroll")
                        .max_height(220.0)
                        .show(ui, |ui| {
                            if app.log_messages.is_empty() {
                                ui.label(RichText::new("Nenhuma atividade recente").weak());
                            } else {
                                for entry in app.log_messages.iter().rev().take(20) {
                                    let color = match entry.level {
                                        LogLevel::Info => Color32::GRAY,
                                        LogLevel::Success => colors::SUCCESS,
                                        LogLevel::Warning => colors::WARNING,
                                        LogLevel::Error => colors::ERROR,
                                    };

                                    ui.horizontal(|ui| {
                                        ui.label(
                                            RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                                .small()
                                                .color(Color32::DARK_GRAY),
                                        );
                                        ui.label(RichText::new(&entry.message).color(color));
                                    });
                                }
                            }
                        });
                });
            });
        });

        ui.add_space(20.0);
    });

    next_panel
}

/// Navigation cards to every other panel, in two rows.
fn nav_cards(ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;
    let rows: [&[(Panel, &str, &str)]; 2] = [
        &[
            (Panel::Turmas, "Organize as turmas", USERS),
            (Panel::Alunos, "Cadastro de alunos", STUDENT),
            (Panel::Presencas, "Registro de presença", CALENDAR_CHECK),
            (Panel::Mentores, "Equipe de mentores", CHALKBOARD_TEACHER),
        ],
        &[
            (Panel::Chamadas, "Chamada dos mentores", CLIPBOARD_TEXT),
            (Panel::Relatorios, "Relatórios e exportação", CHART_BAR),
            (Panel::Configuracoes, "Backend e preferências", GEAR),
        ],
    ];

    let available = ui.available_width();
    let num_cards = 4.0;
    let spacing = 30.0;
    let total_spacing = spacing * (num_cards - 1.0);
    let card_width = ((available - total_spacing) / num_cards).clamp(150.0, 220.0);
    let card_size = egui::vec2(card_width, card_width * 0.7);

    for row in rows {
        let count = row.len() as f32;
        let row_width = card_width * count + spacing * (count - 1.0);
        let start_offset = ((available - row_width) / 2.0).max(0.0);

        ui.horizontal(|ui| {
            ui.add_space(start_offset);
            for (i, (panel, description, icon)) in row.iter().enumerate() {
                if i > 0 {
                    ui.add_space(spacing);
                }
                if dashboard_card(ui, panel.name(), description, icon, card_size).clicked() {
                    next_panel = Some(*panel);
                }
            }
        });
        ui.add_space(15.0);
    }

    next_panel
}

/// Horizontal bars, one per class, scaled against `max`.
fn bar_chart(ui: &mut Ui, series: &[ClassSeries], max: usize, value: impl Fn(&ClassSeries) -> usize, color: Color32) {
    if series.is_empty() {
        ui.label(RichText::new("Sem dados").weak());
        return;
    }

    let label_width = 120.0;
    let bar_height = 18.0;
    let max = max.max(1) as f32;

    for serie in series {
        let count = value(serie);
        ui.horizontal(|ui| {
            ui.add_sized([label_width, bar_height], egui::Label::new(&serie.nome).truncate());

            let width = (ui.available_width() - 40.0).max(20.0);
            let (rect, _) = ui.allocate_exact_size(egui::vec2(width, bar_height), Sense::hover());
            let painter = ui.painter();
            painter.rect_filled(rect, 3.0, ui.visuals().faint_bg_color);

            let mut filled = rect;
            filled.set_width(rect.width() * count as f32 / max);
            if count > 0 {
                painter.rect_filled(filled, 3.0, color);
            }

            ui.label(count.to_string());
        });
    }
}
