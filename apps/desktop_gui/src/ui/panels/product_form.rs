use client_core::views::{FormField, ProductForm};
use eframe::egui;
use shared::domain::ProductType;

use crate::ui::widgets::{error_label, form_input, header_button, screen_title};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Save,
    Cancel,
}

pub fn show(ui: &mut egui::Ui, form: &mut ProductForm) -> Option<FormAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        screen_title(ui, "Product Add");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if header_button(ui, true, false, "CANCEL") {
                action = Some(FormAction::Cancel);
            }
            if header_button(ui, !form.is_busy(), form.is_busy(), "SAVE") {
                action = Some(FormAction::Save);
            }
        });
    });
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        let inputs = form.inputs();
        let (base, variant) = inputs.split_at(inputs.len().min(3));

        let mut edits: Vec<(FormField, String)> = base
            .iter()
            .filter_map(|input| form_input(ui, input).map(|value| (input.field, value)))
            .collect();

        let selected = type_switcher(ui, form.selected_type(), form.field_error(FormField::ProductType));

        edits.extend(
            variant
                .iter()
                .filter_map(|input| form_input(ui, input).map(|value| (input.field, value))),
        );

        for (field, value) in edits {
            form.set_field(field, value);
        }
        if selected != form.selected_type() {
            form.select_type(selected);
        }

        if let Some(error) = form.form_error() {
            ui.add_space(8.0);
            error_label(ui, error);
        }
    });

    if ui.input(|input| input.key_pressed(egui::Key::Enter)) && !form.is_busy() {
        action = action.or(Some(FormAction::Save));
    }

    action
}

fn type_switcher(
    ui: &mut egui::Ui,
    current: Option<ProductType>,
    error: Option<&str>,
) -> Option<ProductType> {
    let mut selected = current;
    ui.add_space(6.0);
    ui.label(egui::RichText::new(FormField::ProductType.label()).strong());
    egui::ComboBox::from_id_salt(FormField::ProductType.id())
        .selected_text(selected.map_or("Type Switcher", ProductType::label))
        .width(320.0)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, None, "Type Switcher");
            for product_type in ProductType::ALL {
                ui.selectable_value(&mut selected, Some(product_type), product_type.label());
            }
        });
    if let Some(error) = error {
        error_label(ui, error);
    }
    selected
}
