//! Mutation flows shared by every front end: call the API, revalidate the
//! listing on success, then hand the result back to the view.

use shared::protocol::{DeleteProductsRequest, NewProduct};
use tracing::info;

use crate::{
    api::ProductApi,
    error::{ApiError, DeleteRejected, SubmitRejected},
    views::{DeleteOutcome, ProductForm, ProductListView, SubmitOutcome},
    CatalogClient, Navigator, Revalidate, PRODUCTS_TAG,
};

/// Sends the create request and, only if it succeeded, revalidates the
/// product listing before returning.
pub async fn create_product(
    api: &dyn ProductApi,
    revalidator: &dyn Revalidate,
    product: &NewProduct,
) -> Result<(), ApiError> {
    api.create_product(product).await?;
    info!(sku = %product.sku, "product created");
    revalidator.revalidate(PRODUCTS_TAG).await;
    Ok(())
}

pub async fn delete_products(
    api: &dyn ProductApi,
    revalidator: &dyn Revalidate,
    request: &DeleteProductsRequest,
) -> Result<(), ApiError> {
    api.delete_products(request).await?;
    info!(count = request.ids.len(), "products deleted");
    revalidator.revalidate(PRODUCTS_TAG).await;
    Ok(())
}

pub async fn submit_product_form(
    form: &mut ProductForm,
    api: &dyn ProductApi,
    revalidator: &dyn Revalidate,
    navigator: &mut dyn Navigator,
) -> Result<SubmitOutcome, SubmitRejected> {
    let product = form.begin_submit()?;
    let result = create_product(api, revalidator, &product).await;
    let outcome = form.finish_submit(result);
    if let SubmitOutcome::Navigate(route) = outcome {
        navigator.navigate(route);
    }
    Ok(outcome)
}

pub async fn submit_mass_delete(
    view: &mut ProductListView,
    api: &dyn ProductApi,
    revalidator: &dyn Revalidate,
) -> Result<DeleteOutcome, DeleteRejected> {
    let request = view.begin_delete()?;
    let result = delete_products(api, revalidator, &request).await;
    Ok(view.finish_delete(result))
}

pub async fn load_products(view: &mut ProductListView, catalog: &CatalogClient) {
    match catalog.products().await {
        Ok(products) => view.set_products(products),
        Err(err) => view.set_load_error(&err),
    }
}

#[cfg(test)]
#[path = "tests/flows_tests.rs"]
mod tests;
