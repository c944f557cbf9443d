//! Backend commands queued from UI to backend worker.

use client_core::views::ViewInstance;
use shared::protocol::{DeleteProductsRequest, NewProduct};

/// Every command names the view that issued it so the completion can be
/// routed back, or dropped if that view is gone.
pub enum BackendCommand {
    LoadProducts {
        view: ViewInstance,
    },
    CreateProduct {
        view: ViewInstance,
        product: NewProduct,
    },
    DeleteProducts {
        view: ViewInstance,
        request: DeleteProductsRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadProducts { .. } => "load_products",
            Self::CreateProduct { .. } => "create_product",
            Self::DeleteProducts { .. } => "delete_products",
        }
    }
}
