use std::collections::BTreeSet;

use shared::{
    domain::{Product, ProductId},
    protocol::DeleteProductsRequest,
};
use tracing::{debug, warn};

use crate::{
    error::{ApiError, DeleteRejected},
    views::ViewInstance,
    Route,
};

/// Product ids marked for deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet(BTreeSet<ProductId>);

impl SelectionSet {
    pub fn set(&mut self, id: ProductId, selected: bool) {
        if selected {
            self.0.insert(id);
        } else {
            self.0.remove(&id);
        }
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn ids(&self) -> Vec<ProductId> {
        self.0.iter().copied().collect()
    }

    pub fn retain(&mut self, keep: impl FnMut(&ProductId) -> bool) {
        self.0.retain(keep);
    }

    pub fn to_delete_request(&self) -> DeleteProductsRequest {
        DeleteProductsRequest { ids: self.ids() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed,
}

pub struct ProductListView {
    instance: ViewInstance,
    products: Vec<Product>,
    loaded: bool,
    load_error: Option<String>,
    selection: SelectionSet,
    pending_delete: Option<DeleteProductsRequest>,
    error: Option<String>,
}

impl Default for ProductListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductListView {
    pub fn new() -> Self {
        Self {
            instance: ViewInstance::next(),
            products: Vec::new(),
            loaded: false,
            load_error: None,
            selection: SelectionSet::default(),
            pending_delete: None,
            error: None,
        }
    }

    pub fn instance(&self) -> ViewInstance {
        self.instance
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Replaces the listing. Selected ids that are gone from it are dropped.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.selection
            .retain(|id| products.iter().any(|product| product.id == *id));
        self.products = products;
        self.loaded = true;
        self.load_error = None;
    }

    pub fn set_load_error(&mut self, err: &ApiError) {
        warn!(view = self.instance.get(), "product list fetch failed: {err}");
        self.loaded = true;
        self.load_error = Some(err.to_string());
    }

    pub fn toggle(&mut self, id: ProductId, checked: bool) {
        self.selection.set(id, checked);
    }

    pub fn is_selected(&self, id: ProductId) -> bool {
        self.selection.contains(id)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Whether the mass delete action is enabled.
    pub fn can_delete(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn is_busy(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn begin_delete(&mut self) -> Result<DeleteProductsRequest, DeleteRejected> {
        if self.is_busy() {
            return Err(DeleteRejected::InFlight);
        }
        if self.selection.is_empty() {
            return Err(DeleteRejected::EmptySelection);
        }
        let request = self.selection.to_delete_request();
        debug!(
            view = self.instance.get(),
            count = request.ids.len(),
            "mass delete submitted"
        );
        self.error = None;
        self.pending_delete = Some(request.clone());
        Ok(request)
    }

    /// On failure the selection is kept so the user can retry.
    pub fn finish_delete(&mut self, result: Result<(), ApiError>) -> DeleteOutcome {
        let pending = self.pending_delete.take();
        match result {
            Ok(()) => {
                if let Some(request) = pending {
                    self.selection.retain(|id| !request.ids.contains(id));
                }
                self.error = None;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(view = self.instance.get(), "mass delete failed: {err}");
                self.error = Some(err.to_string());
                DeleteOutcome::Failed
            }
        }
    }

    pub fn add_product(&self) -> Route {
        Route::AddProduct
    }
}

#[cfg(test)]
#[path = "../tests/list_tests.rs"]
mod tests;
