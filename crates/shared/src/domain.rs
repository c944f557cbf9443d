use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::DimensionsParseError, protocol::RawProduct};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[serde(alias = "Disc", alias = "dvd", alias = "DVD")]
    Disc,
    #[serde(alias = "Book")]
    Book,
    #[serde(alias = "Furniture")]
    Furniture,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [ProductType::Disc, ProductType::Book, ProductType::Furniture];

    /// Value of the `type` field on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disc => "disc",
            Self::Book => "book",
            Self::Furniture => "furniture",
        }
    }

    /// Name shown in the type selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disc => "DVD",
            Self::Book => "Book",
            Self::Furniture => "Furniture",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Furniture measurements in centimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
    pub length: f64,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.height, self.width, self.length)
    }
}

impl FromStr for Dimensions {
    type Err = DimensionsParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input.trim().split(['x', 'X']).map(str::trim).collect();
        let (height, width, length) = match parts.as_slice() {
            [height, width, length] => (*height, *width, *length),
            _ => return Err(DimensionsParseError::Shape(input.to_string())),
        };

        let parse = |part: &str| {
            part.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| DimensionsParseError::NotANumber {
                    input: input.to_string(),
                    part: part.to_string(),
                })
        };

        Ok(Self {
            height: parse(height)?,
            width: parse(width)?,
            length: parse(length)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductKind {
    Disc { size: f64 },
    Book { weight: f64 },
    Furniture { dimensions: Dimensions },
}

impl ProductKind {
    pub fn product_type(&self) -> ProductType {
        match self {
            Self::Disc { .. } => ProductType::Disc,
            Self::Book { .. } => ProductType::Book,
            Self::Furniture { .. } => ProductType::Furniture,
        }
    }

    /// Human readable variant attribute, e.g. `Size: 700 MB`.
    pub fn describe(&self) -> String {
        match self {
            Self::Disc { size } => format!("Size: {size} MB"),
            Self::Book { weight } => format!("Weight: {weight} KG"),
            Self::Furniture { dimensions } => format!("Dimensions: {dimensions}"),
        }
    }

    /// The single variant field sent to, and received from, the product API.
    pub fn wire_field(&self) -> (&'static str, String) {
        match self {
            Self::Disc { size } => ("size", size.to_string()),
            Self::Book { weight } => ("weight", weight.to_string()),
            Self::Furniture { dimensions } => ("dimensions", dimensions.to_string()),
        }
    }
}

/// A product as stored by the product API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProduct", into = "RawProduct")]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub kind: ProductKind,
}

impl Product {
    pub fn product_type(&self) -> ProductType {
        self.kind.product_type()
    }

    pub fn price_label(&self) -> String {
        format!("{:.2} $", self.price)
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
