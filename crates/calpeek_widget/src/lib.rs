// --- File: crates/calpeek_widget/src/lib.rs ---
//! Client-side view-models: the availability widget and the sign-in panel.
//!
//! Rendering is left to the host UI; these types own the state machines and
//! the text they display.

pub mod auth_panel;
pub mod client;
pub mod format;
#[cfg(test)]
mod format_test;
pub mod widget;
#[cfg(test)]
mod widget_proptest;

pub use auth_panel::{AuthActions, AuthPanel, PanelAction, PanelView, SessionStatus};
pub use client::{ApiClient, AvailabilityFetcher, FetchError};
pub use format::DisplayOptions;
pub use widget::{AvailabilityWidget, WidgetState};
