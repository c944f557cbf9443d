use std::time::Duration;

use client_core::{
    views::{DeleteOutcome, ProductForm, ProductListView, SubmitOutcome, ViewInstance},
    ApiError, DeleteRejected, Navigator, Route, SubmitRejected,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    orchestration::dispatch_backend_command,
};
use crate::ui::panels::{
    product_form::{self, FormAction},
    product_list::{self, ListAction},
};
use crate::ui::widgets::error_label;

/// The mounted screen. Replacing it unmounts the previous view, after which
/// completions addressed to that view are ignored.
enum Screen {
    List(ProductListView),
    AddProduct(ProductForm),
}

impl Screen {
    fn instance(&self) -> ViewInstance {
        match self {
            Self::List(view) => view.instance(),
            Self::AddProduct(form) => form.instance(),
        }
    }

    fn route(&self) -> Route {
        match self {
            Self::List(_) => Route::List,
            Self::AddProduct(_) => Route::AddProduct,
        }
    }
}

pub struct CatalogApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    api_base: String,
    screen: Screen,
    status: Option<UiError>,
}

impl CatalogApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_base: String,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            api_base,
            screen: Screen::List(ProductListView::new()),
            status: None,
        };
        app.request_listing();
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) -> bool {
        match dispatch_backend_command(&self.cmd_tx, cmd) {
            Ok(()) => true,
            Err(message) => {
                self.status = Some(UiError::from_message(UiErrorContext::General, message));
                false
            }
        }
    }

    fn request_listing(&mut self) {
        if let Screen::List(view) = &self.screen {
            let view = view.instance();
            self.dispatch(BackendCommand::LoadProducts { view });
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let Some(view) = event.view() {
                if view != self.screen.instance() {
                    tracing::debug!(
                        view = view.get(),
                        mounted = self.screen.instance().get(),
                        "dropping completion for unmounted view"
                    );
                    continue;
                }
            }

            match event {
                UiEvent::ProductsLoaded { result, .. } => {
                    if let Screen::List(view) = &mut self.screen {
                        match result {
                            Ok(products) => view.set_products(products),
                            Err(err) => {
                                view.set_load_error(&err);
                                self.status =
                                    Some(UiError::from_api(UiErrorContext::LoadProducts, &err));
                            }
                        }
                    }
                }
                UiEvent::CreateFinished { result, .. } => {
                    let Screen::AddProduct(form) = &mut self.screen else {
                        continue;
                    };
                    if let Err(err) = &result {
                        self.status = Some(UiError::from_api(UiErrorContext::SaveProduct, err));
                    }
                    if let SubmitOutcome::Navigate(route) = form.finish_submit(result) {
                        self.navigate(route);
                    }
                }
                UiEvent::DeleteFinished { result, .. } => {
                    let Screen::List(view) = &mut self.screen else {
                        continue;
                    };
                    if let Err(err) = &result {
                        self.status = Some(UiError::from_api(UiErrorContext::DeleteProducts, err));
                    }
                    if view.finish_delete(result) == DeleteOutcome::Deleted {
                        self.request_listing();
                    }
                }
                UiEvent::Error(err) => {
                    tracing::error!(
                        context = ?err.context(),
                        category = ?err.category(),
                        "{}",
                        err.message()
                    );
                    self.status = Some(err);
                }
            }
        }
    }

    fn handle_list_action(&mut self, action: ListAction) {
        let Screen::List(view) = &mut self.screen else {
            return;
        };
        match action {
            ListAction::AddProduct => {
                let route = view.add_product();
                self.navigate(route);
            }
            ListAction::Reload => self.request_listing(),
            ListAction::MassDelete => match view.begin_delete() {
                Ok(request) => {
                    let view_id = view.instance();
                    if !self.dispatch(BackendCommand::DeleteProducts {
                        view: view_id,
                        request,
                    }) {
                        if let Screen::List(view) = &mut self.screen {
                            view.finish_delete(Err(not_queued()));
                        }
                    }
                }
                Err(DeleteRejected::EmptySelection | DeleteRejected::InFlight) => {}
            },
        }
    }

    fn handle_form_action(&mut self, action: FormAction) {
        let Screen::AddProduct(form) = &mut self.screen else {
            return;
        };
        match action {
            FormAction::Cancel => {
                let route = form.cancel();
                self.navigate(route);
            }
            FormAction::Save => match form.begin_submit() {
                Ok(product) => {
                    let view = form.instance();
                    if !self.dispatch(BackendCommand::CreateProduct { view, product }) {
                        if let Screen::AddProduct(form) = &mut self.screen {
                            form.finish_submit(Err(not_queued()));
                        }
                    }
                }
                Err(SubmitRejected::Invalid(err)) => {
                    tracing::debug!("product form rejected locally: {err}");
                }
                Err(SubmitRejected::InFlight) => {}
            },
        }
    }

    /// Mounts a fresh view for `route`.
    fn remount(&mut self, route: Route) {
        self.screen = match route {
            Route::List => Screen::List(ProductListView::new()),
            Route::AddProduct => Screen::AddProduct(ProductForm::new()),
        };
        tracing::debug!(
            path = route.path(),
            view = self.screen.instance().get(),
            "mounted view"
        );
        self.request_listing();
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(format!("API: {}", self.api_base));
                ui.weak(self.screen.route().path());
                if let Some(status) = &self.status {
                    ui.separator();
                    error_label(ui, status.message());
                    let reload = status.is_retryable()
                        && status.context() == UiErrorContext::LoadProducts
                        && ui.small_button("Retry").clicked();
                    if ui.small_button("Dismiss").clicked() {
                        self.status = None;
                    }
                    if reload {
                        self.status = None;
                        self.request_listing();
                    }
                }
            });
        });
    }
}

fn not_queued() -> ApiError {
    ApiError::Transport("request could not be queued".to_string())
}

impl Navigator for CatalogApp {
    fn navigate(&mut self, route: Route) {
        self.status = None;
        self.remount(route);
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_status_bar(ctx);

        let mut list_action = None;
        let mut form_action = None;
        egui::CentralPanel::default().show(ctx, |ui| match &mut self.screen {
            Screen::List(view) => list_action = product_list::show(ui, view),
            Screen::AddProduct(form) => form_action = product_form::show(ui, form),
        });

        if let Some(action) = list_action {
            self.handle_list_action(action);
        }
        if let Some(action) = form_action {
            self.handle_form_action(action);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
