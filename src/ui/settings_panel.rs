//! Settings panel for backend, export, and logging configuration.

use eframe::egui::{self, RichText};
use egui_phosphor::regular::FOLDER_OPEN;

use super::app::{App, ConnectionStatus};
use super::components::{back_button, colors, panel_header};
use crate::config::AppConfig;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Show the settings panel.
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut egui::Ui) -> bool {
    let go_back = back_button(ui);
    panel_header(ui, "Configurações", "Backend, exportação e logs");

    egui::ScrollArea::vertical().show(ui, |ui| {
        // Backend
        ui.group(|ui| {
            ui.heading("Backend");
            ui.add_space(5.0);

            egui::Grid::new("api_settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("URL da API:");
                    if ui
                        .add(
                            egui::TextEdit::singleline(&mut app.config.api.base_url)
                                .desired_width(320.0)
                                .hint_text("http://localhost:8080/api"),
                        )
                        .changed()
                    {
                        app.config_modified = true;
                        app.connection_status = ConnectionStatus::Unknown;
                    }
                    ui.end_row();
                });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                let testing = app.connection_status == ConnectionStatus::Testing;
                if ui
                    .add_enabled(!testing, egui::Button::new("Testar conexão"))
                    .clicked()
                {
                    app.test_connection();
                }

                // Inline status indicator
                match &app.connection_status {
                    ConnectionStatus::Unknown => {}
                    ConnectionStatus::Testing => {
                        ui.spinner();
                    }
                    ConnectionStatus::Connected => {
                        ui.label(RichText::new("Conectado").color(colors::SUCCESS));
                    }
                    ConnectionStatus::Failed(e) => {
                        ui.label(RichText::new("Falhou").color(colors::ERROR)).on_hover_text(e);
                    }
                }
            });
        });

        ui.add_space(15.0);

        // Export
        ui.group(|ui| {
            ui.heading("Exportação");
            ui.add_space(5.0);

            egui::Grid::new("export_settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Pasta padrão:");
                    ui.horizontal(|ui| {
                        let mut directory = app.config.export.directory.display().to_string();
                        if ui
                            .add(egui::TextEdit::singleline(&mut directory).desired_width(280.0))
                            .changed()
                        {
                            app.config.export.directory = directory.into();
                            app.config_modified = true;
                        }
                        if ui.button(FOLDER_OPEN).on_hover_text("Escolher pasta").clicked()
                            && let Some(folder) = rfd::FileDialog::new()
                                .set_directory(&app.config.export.directory)
                                .pick_folder()
                        {
                            app.config.export.directory = folder;
                            app.config_modified = true;
                        }
                    });
                    ui.end_row();

                    ui.label("Salvar como:");
                    if ui
                        .checkbox(&mut app.config.export.ask_location, "Perguntar onde salvar cada arquivo")
                        .changed()
                    {
                        app.config_modified = true;
                    }
                    ui.end_row();
                });
        });

        ui.add_space(15.0);

        // Logging
        ui.group(|ui| {
            ui.heading("Logs");
            ui.add_space(5.0);

            egui::Grid::new("log_settings_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Nível:");
                    egui::ComboBox::from_id_salt("log_level")
                        .selected_text(app.config.log.level.as_str())
                        .show_ui(ui, |ui| {
                            for level in LOG_LEVELS {
                                if ui
                                    .selectable_label(app.config.log.level == level, level)
                                    .clicked()
                                {
                                    app.config.log.level = level.to_string();
                                    app.config_modified = true;
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Arquivo de log:");
                    if ui
                        .checkbox(&mut app.config.log.file_enabled, "Gravar em arquivo diário")
                        .changed()
                    {
                        app.config_modified = true;
                    }
                    ui.end_row();

                    ui.label("Pasta de logs:");
                    ui.label(RichText::new(AppConfig::log_dir().display().to_string()).weak());
                    ui.end_row();
                });

            ui.label(
                RichText::new("Alterações de log valem a partir da próxima inicialização.")
                    .small()
                    .weak(),
            );
        });

        ui.add_space(20.0);

        // Action buttons
        ui.horizontal(|ui| {
            let save_btn = egui::Button::new("Salvar configurações");
            if ui.add_enabled(app.config_modified, save_btn).clicked() {
                app.save_config();
            }

            if app.config_modified {
                ui.label(RichText::new("(alterações não salvas)").color(colors::WARNING).italics());
            }

            if ui.button("Restaurar padrões").clicked() {
                app.config = AppConfig::default();
                app.config_modified = true;
                app.connection_status = ConnectionStatus::Unknown;
            }
        });

        ui.add_space(10.0);
        ui.label(RichText::new(format!("Arquivo: {}", app.config_path.display())).small().weak());
    });

    go_back
}
