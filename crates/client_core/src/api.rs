use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart::Form, Client, Response};
use shared::{
    domain::Product,
    error::ErrorResponse,
    protocol::{
        add_product_route, delete_products_route, list_products_route, DeleteProductsRequest,
        NewProduct,
    },
};
use tracing::{debug, info, warn};

use crate::error::ApiError;

/// The remote product API.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;
    async fn create_product(&self, product: &NewProduct) -> Result<(), ApiError>;
    async fn delete_products(&self, request: &DeleteProductsRequest) -> Result<(), ApiError>;
}

pub struct HttpProductApi {
    http: Client,
    base_url: String,
}

impl HttpProductApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.base_url.trim_end_matches('/'))
    }
}

fn multipart_form(fields: Vec<(&'static str, String)>) -> Form {
    fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| form.text(name, value))
}

/// Passes 2xx responses through and turns anything else into
/// [`ApiError::Request`], preferring the server's `{"error": ...}` message.
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let message = ErrorResponse::message_from_body(&body)
        .unwrap_or_else(|| format!("request failed with status {status}"));
    Err(ApiError::Request {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.http.get(self.url(list_products_route())).send().await?;
        let body = ensure_success(response).await?.bytes().await?;

        let records: Vec<serde_json::Value> =
            serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))?;

        let mut products = Vec::with_capacity(records.len());
        for record in records {
            match serde_json::from_value::<Product>(record) {
                Ok(product) => products.push(product),
                Err(err) => warn!("skipping undecodable product record: {err}"),
            }
        }
        debug!(count = products.len(), "fetched product list");
        Ok(products)
    }

    async fn create_product(&self, product: &NewProduct) -> Result<(), ApiError> {
        info!(
            sku = %product.sku,
            product_type = %product.kind.product_type(),
            "creating product"
        );
        let response = self
            .http
            .post(self.url(add_product_route()))
            .multipart(multipart_form(product.form_fields()))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete_products(&self, request: &DeleteProductsRequest) -> Result<(), ApiError> {
        info!(count = request.ids.len(), "deleting products");
        let response = self
            .http
            .post(self.url(delete_products_route()))
            .multipart(multipart_form(request.form_fields()))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
