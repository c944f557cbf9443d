use serde::{Deserialize, Serialize};

use crate::{
    domain::{Dimensions, Product, ProductId, ProductKind, ProductType},
    error::ProductDecodeError,
};

pub const DELETE_IDS_FIELD: &str = "idsToDelete[]";

pub fn list_products_route() -> &'static str {
    "/api/products"
}

pub fn add_product_route() -> &'static str {
    "/api/products/add"
}

pub fn delete_products_route() -> &'static str {
    "/api/products/delete"
}

/// Numbers arrive either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    Number(f64),
    Text(String),
}

impl WireNumber {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        }
        .filter(|value| value.is_finite())
    }

    fn raw(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireInteger {
    Integer(i64),
    Text(String),
}

/// A product record exactly as it travels over the wire.
///
/// Current servers tag the variant with `type`; older ones leave it out and
/// populate exactly one of `size`, `weight` or `dimensions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    pub id: WireInteger,
    pub sku: String,
    pub name: String,
    pub price: WireNumber,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
}

impl RawProduct {
    fn populated_variants(&self) -> Vec<ProductType> {
        let mut populated = Vec::new();
        if self.size.as_ref().is_some_and(|size| !size.is_blank()) {
            populated.push(ProductType::Disc);
        }
        if self.weight.as_ref().is_some_and(|weight| !weight.is_blank()) {
            populated.push(ProductType::Book);
        }
        if self
            .dimensions
            .as_deref()
            .is_some_and(|dimensions| !dimensions.trim().is_empty())
        {
            populated.push(ProductType::Furniture);
        }
        populated
    }
}

fn variant_field(product_type: ProductType) -> &'static str {
    match product_type {
        ProductType::Disc => "size",
        ProductType::Book => "weight",
        ProductType::Furniture => "dimensions",
    }
}

fn decode_number(
    id: ProductId,
    field: &'static str,
    value: &WireNumber,
) -> Result<f64, ProductDecodeError> {
    value
        .to_f64()
        .ok_or_else(|| ProductDecodeError::InvalidNumber {
            id,
            field,
            value: value.raw(),
        })
}

impl TryFrom<RawProduct> for Product {
    type Error = ProductDecodeError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let id = match &raw.id {
            WireInteger::Integer(id) => ProductId(*id),
            WireInteger::Text(text) => ProductId(
                text.trim()
                    .parse::<i64>()
                    .map_err(|_| ProductDecodeError::InvalidId(text.clone()))?,
            ),
        };
        let price = decode_number(id, "price", &raw.price)?;

        let product_type = match raw.product_type {
            Some(product_type) => product_type,
            None => match raw.populated_variants().as_slice() {
                [] => return Err(ProductDecodeError::MissingVariant { id }),
                [single] => *single,
                many => {
                    let fields = many
                        .iter()
                        .map(|product_type| variant_field(*product_type))
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(ProductDecodeError::AmbiguousVariant { id, fields });
                }
            },
        };

        let missing = || ProductDecodeError::MissingTypeField {
            id,
            product_type,
            field: variant_field(product_type),
        };

        let kind = match product_type {
            ProductType::Disc => {
                let size = raw.size.as_ref().filter(|size| !size.is_blank()).ok_or_else(missing)?;
                ProductKind::Disc {
                    size: decode_number(id, "size", size)?,
                }
            }
            ProductType::Book => {
                let weight = raw
                    .weight
                    .as_ref()
                    .filter(|weight| !weight.is_blank())
                    .ok_or_else(missing)?;
                ProductKind::Book {
                    weight: decode_number(id, "weight", weight)?,
                }
            }
            ProductType::Furniture => {
                let dimensions = raw
                    .dimensions
                    .as_deref()
                    .filter(|dimensions| !dimensions.trim().is_empty())
                    .ok_or_else(missing)?;
                ProductKind::Furniture {
                    dimensions: dimensions
                        .parse::<Dimensions>()
                        .map_err(|source| ProductDecodeError::InvalidDimensions { id, source })?,
                }
            }
        };

        Ok(Product {
            id,
            sku: raw.sku,
            name: raw.name,
            price,
            kind,
        })
    }
}

impl From<Product> for RawProduct {
    fn from(product: Product) -> Self {
        let mut raw = RawProduct {
            id: WireInteger::Integer(product.id.0),
            sku: product.sku,
            name: product.name,
            price: WireNumber::Number(product.price),
            product_type: Some(product.kind.product_type()),
            size: None,
            weight: None,
            dimensions: None,
        };
        match product.kind {
            ProductKind::Disc { size } => raw.size = Some(WireNumber::Number(size)),
            ProductKind::Book { weight } => raw.weight = Some(WireNumber::Number(weight)),
            ProductKind::Furniture { dimensions } => raw.dimensions = Some(dimensions.to_string()),
        }
        raw
    }
}

/// A validated product ready to be sent to the create endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub kind: ProductKind,
}

impl NewProduct {
    /// Multipart fields in send order. Exactly one variant field is present.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let (variant_key, variant_value) = self.kind.wire_field();
        vec![
            ("sku", self.sku.clone()),
            ("name", self.name.clone()),
            ("price", self.price.to_string()),
            ("type", self.kind.product_type().as_str().to_string()),
            (variant_key, variant_value),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteProductsRequest {
    pub ids: Vec<ProductId>,
}

impl DeleteProductsRequest {
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        self.ids
            .iter()
            .map(|id| (DELETE_IDS_FIELD, id.to_string()))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
