use client_core::views::FormInput;
use eframe::egui;

/// Label, single-line input and inline error for one form field.
///
/// Returns the new, sanitized value when the user edited the field.
pub fn form_input(ui: &mut egui::Ui, input: &FormInput<'_>) -> Option<String> {
    let mut value = input.value.to_string();
    let mut edited = None;

    ui.add_space(6.0);
    ui.label(egui::RichText::new(input.label).strong());
    let edit = egui::TextEdit::singleline(&mut value)
        .id_salt(input.id)
        .desired_width(320.0);
    if ui.add(edit).changed() {
        edited = Some(input.sanitize(&value));
    }
    if let Some(error) = input.error {
        error_label(ui, error);
    }

    edited
}

pub fn error_label(ui: &mut egui::Ui, message: &str) {
    ui.colored_label(ui.visuals().error_fg_color, message);
}

/// Large outlined action button used in screen headers.
pub fn header_button(ui: &mut egui::Ui, enabled: bool, busy: bool, text: &str) -> bool {
    ui.horizontal(|ui| {
        if busy {
            ui.spinner();
        }
        ui.add_enabled(
            enabled,
            egui::Button::new(egui::RichText::new(text).size(18.0)).min_size(egui::vec2(0.0, 36.0)),
        )
        .clicked()
    })
    .inner
}

pub fn screen_title(ui: &mut egui::Ui, title: &str) {
    ui.label(egui::RichText::new(title).size(30.0).strong());
}
