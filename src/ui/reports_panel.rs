//! Reports panel: filters, preview and CSV/Excel export.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{BROOM, FILE_CSV, FILE_XLS, MAGNIFYING_GLASS};

use super::app::App;
use super::components::{
    back_button, colors, panel_header, primary_button_with_icon, section_frame, styled_button_with_icon, turma_combo,
};
use crate::models::{ExportFormat, ReportKind};
use crate::state::filters::format_date_br;
use crate::state::reports::{PREVIEW_ROWS, parse_flexible_date};

/// Show the reports panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let go_back = back_button(ui);

    panel_header(ui, "Relatórios", "Gere relatórios e exporte em CSV ou Excel");

    section_frame(ui, |ui| {
        ui.label(RichText::new("Filtros").strong());
        ui.add_space(8.0);

        let reports = &mut app.reports;
        ui.horizontal(|ui| {
            ui.label("Turma:");
            ui.add_enabled_ui(!reports.loading_lookup, |ui| {
                turma_combo(
                    ui,
                    "report_turma",
                    &reports.lookup.turmas,
                    &mut reports.filter.turma_id,
                    "Todas",
                    false,
                );
            });

            ui.add_space(20.0);
            ui.label("De:");
            date_input(ui, &mut reports.filter.data_inicio);

            ui.add_space(10.0);
            ui.label("Até:");
            date_input(ui, &mut reports.filter.data_fim);
        });
    });

    ui.add_space(10.0);

    ui.horizontal(|ui| {
        let previewing = app.reports.loading_preview;
        ui.add_enabled_ui(!previewing, |ui| {
            if primary_button_with_icon(ui, MAGNIFYING_GLASS, "Gerar Preview").clicked() {
                app.generate_preview();
            }
        });
        if previewing {
            ui.spinner();
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, BROOM, "Limpar Filtros").clicked() {
            app.reports.clear_filters();
        }
    });

    ui.add_space(15.0);

    if !app.reports.preview.is_empty() {
        show_preview(app, ui);
        ui.add_space(15.0);
    }

    ui.label(RichText::new("Exportar").strong());
    ui.add_space(8.0);

    let mut requested = None;
    ui.horizontal_wrapped(|ui| {
        for kind in ReportKind::ALL {
            section_frame(ui, |ui| {
                ui.set_min_width(220.0);
                ui.label(RichText::new(kind.label()).strong());
                ui.label(RichText::new(export_hint(kind)).small().weak());
                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    for (format, icon, label) in [
                        (ExportFormat::Csv, FILE_CSV, "CSV"),
                        (ExportFormat::Excel, FILE_XLS, "Excel"),
                    ] {
                        let busy = app.reports.exporting == Some((kind, format));
                        ui.add_enabled_ui(app.reports.exporting.is_none(), |ui| {
                            if styled_button_with_icon(ui, icon, label).clicked() {
                                requested = Some((kind, format));
                            }
                        });
                        if busy {
                            ui.spinner();
                        }
                    }
                });
            });
            ui.add_space(10.0);
        }
    });

    if let Some((kind, format)) = requested {
        app.export_report(kind, format);
    }

    go_back
}

/// Date text box that turns red on unparseable input.
fn date_input(ui: &mut Ui, value: &mut String) {
    let valid = value.trim().is_empty() || parse_flexible_date(value).is_some();
    ui.add(
        egui::TextEdit::singleline(value)
            .desired_width(100.0)
            .hint_text("AAAA-MM-DD")
            .text_color(if valid { ui.visuals().text_color() } else { colors::ERROR }),
    );
}

fn export_hint(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Presencas => "Usa turma e período",
        ReportKind::Alunos => "Usa apenas a turma",
        ReportKind::Turmas => "Todas as turmas",
    }
}

fn show_preview(app: &App, ui: &mut Ui) {
    let reports = &app.reports;
    ui.label(RichText::new(format!("Preview do relatório ({} primeiros registros)", reports.preview.len())).strong());
    if reports.preview.len() >= PREVIEW_ROWS {
        ui.label(RichText::new("Exporte o relatório para ver todos os registros.").small().weak());
    }
    ui.add_space(8.0);

    ScrollArea::vertical()
        .id_salt("report_preview_scroll")
        .max_height(300.0)
        .show(ui, |ui| {
            egui::Grid::new("report_preview_grid")
                .num_columns(5)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Data");
                    ui.strong("Hora");
                    ui.strong("Aluno");
                    ui.strong("Matrícula");
                    ui.strong("Turma");
                    ui.end_row();

                    for row in &reports.preview {
                        let names = reports.resolve(row);
                        ui.label(format_date_br(&row.data_presenca));
                        ui.label(row.hora_curta());
                        ui.label(names.aluno_nome);
                        ui.label(names.aluno_matricula);
                        ui.label(names.turma_nome);
                        ui.end_row();
                    }
                });
        });
}
