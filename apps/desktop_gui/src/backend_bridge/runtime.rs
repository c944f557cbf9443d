//! Backend worker: a tokio runtime on its own thread that executes
//! [`BackendCommand`]s against the product API and reports back as [`UiEvent`]s.

use std::{sync::Arc, thread};

use client_core::{flows, CatalogClient, Settings};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: Settings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let catalog = match CatalogClient::from_settings(&settings) {
                Ok(catalog) => Arc::new(catalog),
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    tracing::error!("failed to build product API client: {err}");
                    return;
                }
            };
            tracing::info!(api_base = %settings.api_base, "backend worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                let catalog = Arc::clone(&catalog);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = execute(&catalog, cmd).await;
                    if ui_tx.send(event).is_err() {
                        tracing::debug!("ui event queue closed; dropping backend result");
                    }
                });
            }
            tracing::info!("ui command queue closed; backend worker stopping");
        });
    });
}

async fn execute(catalog: &CatalogClient, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::LoadProducts { view } => {
            let cached = catalog.is_fresh().await;
            tracing::debug!(
                view = view.get(),
                cached,
                "loading product list"
            );
            UiEvent::ProductsLoaded {
                view,
                result: catalog.products().await,
            }
        }
        BackendCommand::CreateProduct { view, product } => UiEvent::CreateFinished {
            view,
            result: flows::create_product(catalog.api(), catalog, &product).await,
        },
        BackendCommand::DeleteProducts { view, request } => UiEvent::DeleteFinished {
            view,
            result: flows::delete_products(catalog.api(), catalog, &request).await,
        },
    }
}
