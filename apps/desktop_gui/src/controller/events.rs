//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{views::ViewInstance, ApiError};
use shared::domain::Product;

pub enum UiEvent {
    ProductsLoaded {
        view: ViewInstance,
        result: Result<Vec<Product>, ApiError>,
    },
    CreateFinished {
        view: ViewInstance,
        result: Result<(), ApiError>,
    },
    DeleteFinished {
        view: ViewInstance,
        result: Result<(), ApiError>,
    },
    Error(UiError),
}

impl UiEvent {
    /// The view a completion belongs to; `None` for app-wide events.
    pub fn view(&self) -> Option<ViewInstance> {
        match self {
            Self::ProductsLoaded { view, .. }
            | Self::CreateFinished { view, .. }
            | Self::DeleteFinished { view, .. } => Some(*view),
            Self::Error(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Server,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadProducts,
    SaveProduct,
    DeleteProducts,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_api(context: UiErrorContext, err: &ApiError) -> Self {
        let category = match err {
            ApiError::Request { .. } => UiErrorCategory::Server,
            ApiError::Transport(_) => UiErrorCategory::Transport,
            ApiError::Decode(_) => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("malformed")
            || message_lower.contains("must use http")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timed out")
            || message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("disconnected")
            || message_lower.contains("queue is full")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Whether retrying the same action can reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        self.category == UiErrorCategory::Transport
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
