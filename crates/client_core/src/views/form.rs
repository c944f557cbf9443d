use shared::{
    domain::{Dimensions, ProductKind, ProductType},
    protocol::NewProduct,
};
use tracing::{debug, warn};

use crate::{
    error::{ApiError, FieldErrors, SubmitRejected, ValidationError},
    views::{
        input::{FormInput, InputMode},
        ViewInstance,
    },
    Route,
};

pub const TYPE_REQUIRED_MESSAGE: &str = "Please select a product type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Sku,
    Name,
    Price,
    ProductType,
    Size,
    Weight,
    Height,
    Width,
    Length,
}

impl FormField {
    const BASE: [FormField; 3] = [FormField::Sku, FormField::Name, FormField::Price];

    pub fn id(self) -> &'static str {
        match self {
            Self::Sku => "sku",
            Self::Name => "name",
            Self::Price => "price",
            Self::ProductType => "productType",
            Self::Size => "size",
            Self::Weight => "weight",
            Self::Height => "height",
            Self::Width => "width",
            Self::Length => "length",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sku => "Sku:",
            Self::Name => "Name:",
            Self::Price => "Price ($):",
            Self::ProductType => "Product type:",
            Self::Size => "Size (MB):",
            Self::Weight => "Weight (KG):",
            Self::Height => "Height (CM):",
            Self::Width => "Width (CM):",
            Self::Length => "Length (CM):",
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            Self::Sku => "Sku",
            Self::Name => "Name",
            Self::Price => "Price",
            Self::ProductType => "Product type",
            Self::Size => "Size",
            Self::Weight => "Weight",
            Self::Height => "Height",
            Self::Width => "Width",
            Self::Length => "Length",
        }
    }

    pub fn input_mode(self) -> InputMode {
        match self {
            Self::Sku | Self::Name | Self::ProductType => InputMode::Text,
            _ => InputMode::Number,
        }
    }

    /// Fields that only exist for `product_type`.
    pub fn variant_fields(product_type: ProductType) -> &'static [FormField] {
        match product_type {
            ProductType::Disc => &[FormField::Size],
            ProductType::Book => &[FormField::Weight],
            ProductType::Furniture => &[FormField::Height, FormField::Width, FormField::Length],
        }
    }
}

/// Raw, not yet validated form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    pub price: String,
    pub product_type: Option<ProductType>,
    pub size: String,
    pub weight: String,
    pub height: String,
    pub width: String,
    pub length: String,
}

impl ProductDraft {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Sku => &self.sku,
            FormField::Name => &self.name,
            FormField::Price => &self.price,
            FormField::ProductType => self.product_type.map_or("", ProductType::as_str),
            FormField::Size => &self.size,
            FormField::Weight => &self.weight,
            FormField::Height => &self.height,
            FormField::Width => &self.width,
            FormField::Length => &self.length,
        }
    }

    fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Sku => Some(&mut self.sku),
            FormField::Name => Some(&mut self.name),
            FormField::Price => Some(&mut self.price),
            FormField::ProductType => None,
            FormField::Size => Some(&mut self.size),
            FormField::Weight => Some(&mut self.weight),
            FormField::Height => Some(&mut self.height),
            FormField::Width => Some(&mut self.width),
            FormField::Length => Some(&mut self.length),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Navigate(Route),
    Stay,
}

pub struct ProductForm {
    instance: ViewInstance,
    draft: ProductDraft,
    field_errors: FieldErrors,
    form_error: Option<String>,
    busy: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductForm {
    pub fn new() -> Self {
        Self {
            instance: ViewInstance::next(),
            draft: ProductDraft::default(),
            field_errors: FieldErrors::default(),
            form_error: None,
            busy: false,
        }
    }

    pub fn instance(&self) -> ViewInstance {
        self.instance
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn selected_type(&self) -> Option<ProductType> {
        self.draft.product_type
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn field_error(&self, field: FormField) -> Option<&str> {
        self.field_errors.get(field)
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Text inputs currently on screen: the base fields followed by the
    /// selected type's variant fields.
    pub fn visible_fields(&self) -> Vec<FormField> {
        let mut fields = FormField::BASE.to_vec();
        if let Some(product_type) = self.draft.product_type {
            fields.extend_from_slice(FormField::variant_fields(product_type));
        }
        fields
    }

    pub fn inputs(&self) -> Vec<FormInput<'_>> {
        self.visible_fields()
            .into_iter()
            .map(|field| FormInput {
                field,
                label: field.label(),
                id: field.id(),
                mode: field.input_mode(),
                value: self.draft.value(field),
                error: self.field_errors.get(field),
            })
            .collect()
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        let Some(slot) = self.draft.value_mut(field) else {
            return;
        };
        if *slot == value {
            return;
        }
        *slot = value;
        self.field_errors.remove(field);
        if field == FormField::Sku {
            self.form_error = None;
        }
    }

    /// Switches the variant field set. Values typed for the previous type
    /// are discarded.
    pub fn select_type(&mut self, product_type: Option<ProductType>) {
        if self.draft.product_type == product_type {
            return;
        }
        if let Some(previous) = self.draft.product_type {
            for field in FormField::variant_fields(previous) {
                if let Some(slot) = self.draft.value_mut(*field) {
                    slot.clear();
                }
                self.field_errors.remove(*field);
            }
        }
        self.draft.product_type = product_type;
        self.field_errors.remove(FormField::ProductType);
        self.form_error = None;
    }

    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let mut errors = FieldErrors::default();
        let sku = self.required_text(FormField::Sku, &mut errors);
        let name = self.required_text(FormField::Name, &mut errors);
        let price = self.number(FormField::Price, &mut errors);

        let kind = match self.draft.product_type {
            None => {
                errors.insert(FormField::ProductType, TYPE_REQUIRED_MESSAGE);
                None
            }
            Some(ProductType::Disc) => self
                .number(FormField::Size, &mut errors)
                .map(|size| ProductKind::Disc { size }),
            Some(ProductType::Book) => self
                .number(FormField::Weight, &mut errors)
                .map(|weight| ProductKind::Book { weight }),
            Some(ProductType::Furniture) => {
                let height = self.number(FormField::Height, &mut errors);
                let width = self.number(FormField::Width, &mut errors);
                let length = self.number(FormField::Length, &mut errors);
                match (height, width, length) {
                    (Some(height), Some(width), Some(length)) => Some(ProductKind::Furniture {
                        dimensions: Dimensions {
                            height,
                            width,
                            length,
                        },
                    }),
                    _ => None,
                }
            }
        };

        match (sku, name, price, kind) {
            (Some(sku), Some(name), Some(price), Some(kind)) if errors.is_empty() => {
                Ok(NewProduct {
                    sku,
                    name,
                    price,
                    kind,
                })
            }
            _ => Err(ValidationError(errors)),
        }
    }

    fn required_text(&self, field: FormField, errors: &mut FieldErrors) -> Option<String> {
        let value = self.draft.value(field).trim();
        if value.is_empty() {
            errors.insert(field, format!("{} is required", field.display_name()));
            return None;
        }
        Some(value.to_string())
    }

    fn number(&self, field: FormField, errors: &mut FieldErrors) -> Option<f64> {
        let raw = self.required_text(field, errors)?;
        match raw.parse::<f64>() {
            Ok(value) if !value.is_finite() => {
                errors.insert(field, format!("{} must be a number", field.display_name()));
                None
            }
            Ok(value) if value < 0.0 => {
                errors.insert(field, format!("{} must not be negative", field.display_name()));
                None
            }
            // `-0` passes the sign check; send it as `0`.
            Ok(value) => Some(value + 0.0),
            Err(_) => {
                errors.insert(field, format!("{} must be a number", field.display_name()));
                None
            }
        }
    }

    /// Validates and marks the form busy. The returned product is what must
    /// be sent to the create endpoint.
    pub fn begin_submit(&mut self) -> Result<NewProduct, SubmitRejected> {
        if self.busy {
            return Err(SubmitRejected::InFlight);
        }
        self.form_error = None;
        match self.validate() {
            Ok(product) => {
                self.field_errors = FieldErrors::default();
                self.busy = true;
                debug!(view = self.instance.get(), sku = %product.sku, "product form submitted");
                Ok(product)
            }
            Err(err) => {
                self.field_errors = err.0.clone();
                Err(SubmitRejected::Invalid(err))
            }
        }
    }

    pub fn finish_submit(&mut self, result: Result<(), ApiError>) -> SubmitOutcome {
        self.busy = false;
        match result {
            Ok(()) => {
                self.draft = ProductDraft::default();
                self.field_errors = FieldErrors::default();
                self.form_error = None;
                SubmitOutcome::Navigate(Route::List)
            }
            Err(err) => {
                warn!(view = self.instance.get(), "product save failed: {err}");
                self.form_error = Some(err.to_string());
                SubmitOutcome::Stay
            }
        }
    }

    /// Leaves the form without saving.
    pub fn cancel(&mut self) -> Route {
        self.draft = ProductDraft::default();
        self.field_errors = FieldErrors::default();
        self.form_error = None;
        Route::List
    }
}

#[cfg(test)]
#[path = "../tests/form_tests.rs"]
mod tests;
