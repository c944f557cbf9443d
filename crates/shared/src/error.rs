use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ProductId, ProductType};

/// Body returned by the product API on a non-success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// Extracts the server message from a raw response body, if it carries one.
    pub fn message_from_body(body: &[u8]) -> Option<String> {
        let parsed: Self = serde_json::from_slice(body).ok()?;
        let message = parsed.error.trim();
        if message.is_empty() {
            None
        } else {
            Some(message.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionsParseError {
    #[error("expected HxWxL, got {0:?}")]
    Shape(String),
    #[error("dimension {part:?} in {input:?} is not a number")]
    NotANumber { input: String, part: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductDecodeError {
    #[error("product id {0:?} is not an integer")]
    InvalidId(String),
    #[error("product {id}: field `{field}` is not a number: {value:?}")]
    InvalidNumber {
        id: ProductId,
        field: &'static str,
        value: String,
    },
    #[error("product {id}: none of size, weight or dimensions is set")]
    MissingVariant { id: ProductId },
    #[error("product {id}: variant is ambiguous, populated fields: {fields}")]
    AmbiguousVariant { id: ProductId, fields: String },
    #[error("product {id}: type `{product_type}` requires field `{field}`")]
    MissingTypeField {
        id: ProductId,
        product_type: ProductType,
        field: &'static str,
    },
    #[error("product {id}: invalid dimensions: {source}")]
    InvalidDimensions {
        id: ProductId,
        source: DimensionsParseError,
    },
}
