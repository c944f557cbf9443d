//! UI layer for the desktop GUI: app shell, screens, and widgets.

pub mod app;
pub mod panels;
pub mod widgets;

pub use app::CatalogApp;
