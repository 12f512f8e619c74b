//! UI layer: app shell, profile cards, edit modal, loading spinner, and theme.

pub mod app;
pub mod cards;
pub mod edit_popup;
pub mod spinner;
pub mod theme;

pub use app::ProfileCardsApp;
