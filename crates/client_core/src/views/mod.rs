//! Headless view models for the product list and the create-product form.

use std::sync::atomic::{AtomicU64, Ordering};

pub mod form;
pub mod input;
pub mod list;

pub use form::{FormField, ProductDraft, ProductForm, SubmitOutcome};
pub use input::{FormInput, InputMode};
pub use list::{DeleteOutcome, ProductListView, SelectionSet};

static NEXT_VIEW_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Identity of one mounted view.
///
/// Results of requests started by a view carry its instance, so a result
/// arriving after the view was replaced can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewInstance(u64);

impl ViewInstance {
    pub fn next() -> Self {
        Self(NEXT_VIEW_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}
