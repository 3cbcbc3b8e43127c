//! Shared UI components.

use eframe::egui::{self, Button, Color32, CornerRadius, Margin, Response, RichText, Sense, StrokeKind, Ui};

use crate::models::{Id, Turma};
use crate::state::lookup::{active_classes, find_turma};

/// Render a clickable dashboard card with dynamic size.
///
/// Returns the response which can be checked for `.clicked()`.
pub fn dashboard_card(ui: &mut Ui, title: &str, description: &str, icon: &str, size: egui::Vec2) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().interact(&response);
        let scale = size.x / 200.0;

        ui.painter().rect_filled(rect, 8.0, visuals.bg_fill);
        ui.painter()
            .rect_stroke(rect, 8.0, visuals.bg_stroke, StrokeKind::Outside);

        ui.painter().text(
            egui::pos2(rect.center().x, rect.top() + size.y * 0.25),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(32.0 * scale),
            visuals.text_color(),
        );
        ui.painter().text(
            egui::pos2(rect.center().x, rect.center().y + size.y * 0.07),
            egui::Align2::CENTER_CENTER,
            title,
            egui::FontId::proportional(17.0 * scale),
            visuals.text_color(),
        );
        ui.painter().text(
            egui::pos2(rect.center().x, rect.bottom() - size.y * 0.17),
            egui::Align2::CENTER_CENTER,
            description,
            egui::FontId::proportional(12.0 * scale),
            ui.visuals().weak_text_color(),
        );
    }

    response
}

/// Render a stat card with title, value, and subtitle.
pub fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}

/// Rounded section frame used for dashboard blocks and cards.
pub fn section_frame(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .corner_radius(CornerRadius::same(8))
        .show(ui, add_contents);
}

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const PRIMARY: Color32 = Color32::from_rgb(59, 130, 246);
    pub const ACCENT: Color32 = Color32::from_rgb(16, 185, 129);
}

/// Render a back button that returns true when clicked.
pub fn back_button(ui: &mut Ui) -> bool {
    ui.button(RichText::new("< Voltar ao Dashboard").size(14.0)).clicked()
}

/// Render a panel header with title and subtitle.
pub fn panel_header(ui: &mut Ui, title: &str, subtitle: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.label(RichText::new(subtitle).weak());
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(15.0);
}

pub fn styled_button(ui: &mut Ui, text: &str) -> Response {
    ui.add(Button::new(text).min_size(egui::vec2(80.0, 26.0)))
}

pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    ui.add(Button::new(format!("{icon} {text}")).min_size(egui::vec2(80.0, 26.0)))
}

pub fn primary_button_with_icon(ui: &mut Ui, icon: &str, text: &str) -> Response {
    let label = if icon.is_empty() {
        text.to_string()
    } else {
        format!("{icon} {text}")
    };
    ui.add(
        Button::new(RichText::new(label).color(Color32::WHITE))
            .fill(colors::PRIMARY)
            .min_size(egui::vec2(90.0, 26.0)),
    )
}

/// Small icon-only button for table rows.
pub fn action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(Button::new(icon).frame(false)).on_hover_text(tooltip)
}

pub fn danger_action_button(ui: &mut Ui, icon: &str, tooltip: &str) -> Response {
    ui.add(Button::new(RichText::new(icon).color(colors::ERROR)).frame(false))
        .on_hover_text(tooltip)
}

/// Text filter box with a hint.
pub fn search_box(ui: &mut Ui, value: &mut String, hint: &str) -> Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .desired_width(240.0)
            .hint_text(hint),
    )
}

/// Class selector. `none_label` names the empty choice.
///
/// With `active_only`, deactivated classes are not offered but a current
/// selection still shows its name.
pub fn turma_combo(
    ui: &mut Ui,
    id_salt: &str,
    turmas: &[Turma],
    selected: &mut Option<Id>,
    none_label: &str,
    active_only: bool,
) -> bool {
    let before = *selected;
    egui::ComboBox::from_id_salt(id_salt)
        .width(200.0)
        .selected_text(
            selected
                .and_then(|id| find_turma(turmas, id))
                .map(|t| t.nome.as_str())
                .unwrap_or(none_label),
        )
        .show_ui(ui, |ui| {
            ui.selectable_value(selected, None, none_label);
            let choices = if active_only {
                active_classes(turmas)
            } else {
                turmas.iter().collect()
            };
            for turma in choices {
                ui.selectable_value(selected, Some(turma.id), &turma.nome);
            }
        });
    before != *selected
}

/// Text input with a field error shown underneath.
pub fn form_text(ui: &mut Ui, value: &mut String, hint: &str, error: Option<&str>) {
    ui.vertical(|ui| {
        ui.add(
            egui::TextEdit::singleline(value)
                .desired_width(260.0)
                .hint_text(hint),
        );
        field_error(ui, error);
    });
}

pub fn field_error(ui: &mut Ui, error: Option<&str>) {
    if let Some(message) = error {
        ui.colored_label(colors::ERROR, RichText::new(message).small());
    }
}

/// "Ativo"/"Inativo" badge.
pub fn status_badge(ui: &mut Ui, active: bool) {
    if active {
        ui.colored_label(colors::SUCCESS, "Ativo");
    } else {
        ui.colored_label(colors::NEUTRAL, "Inativo");
    }
}

/// Centered placeholder for empty tables.
pub fn empty_state(ui: &mut Ui, loading: bool, filtered: bool, noun_plural: &str) {
    ui.add_space(20.0);
    ui.vertical_centered(|ui| {
        if loading {
            ui.spinner();
            ui.label("Carregando...");
        } else if filtered {
            ui.label(RichText::new(format!("Nenhum resultado para os filtros aplicados em {noun_plural}.")).weak());
        } else {
            ui.label(RichText::new(format!("Nenhum registro de {noun_plural} cadastrado.")).weak());
        }
    });
}
