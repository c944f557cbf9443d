use client_core::views::ProductListView;
use eframe::egui;

use crate::ui::widgets::{error_label, header_button, screen_title};

const CARD_WIDTH: f32 = 220.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    AddProduct,
    MassDelete,
    Reload,
}

pub fn show(ui: &mut egui::Ui, view: &mut ProductListView) -> Option<ListAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        screen_title(ui, "Product List");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if header_button(ui, view.can_delete() && !view.is_busy(), view.is_busy(), "MASS DELETE") {
                action = Some(ListAction::MassDelete);
            }
            if header_button(ui, true, false, "ADD") {
                action = Some(ListAction::AddProduct);
            }
        });
    });
    if !view.selection().is_empty() {
        ui.weak(format!("{} selected", view.selection().len()));
    }
    if let Some(error) = view.error() {
        error_label(ui, error);
    }
    ui.separator();

    if !view.is_loaded() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading products...");
        });
        return action;
    }

    if let Some(error) = view.load_error() {
        let message = format!("Could not load products: {error}");
        error_label(ui, &message);
        if ui.button("Retry").clicked() {
            action = Some(ListAction::Reload);
        }
        return action;
    }

    if view.products().is_empty() {
        ui.weak("No products yet.");
        return action;
    }

    let products = view.products().to_vec();
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            for product in &products {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(CARD_WIDTH);
                    ui.horizontal(|ui| {
                        let mut checked = view.is_selected(product.id);
                        if ui.checkbox(&mut checked, "").changed() {
                            view.toggle(product.id, checked);
                        }
                        ui.vertical_centered(|ui| {
                            ui.label(egui::RichText::new(&product.sku).strong());
                            ui.label(&product.name);
                            ui.weak(product.product_type().label());
                            ui.label(product.kind.describe());
                            ui.label(product.price_label());
                        });
                    });
                });
            }
        });
    });

    action
}
