//! Serializable read models for the five sections of the app.
//!
//! Each builder is a pure function of the project list and an explicit
//! clock, so the desktop commands recompute them on every request.

pub mod dashboard;
pub mod materials;
pub mod projects;
pub mod reports;
pub mod visits;

use serde::Serialize;

/// Shown wherever a figure has nothing to be computed from.
pub const NOT_AVAILABLE: &str = "N/A";

/// A value together with its display label, e.g. a next milestone or "N/A".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Labeled<T> {
    pub value: Option<T>,
    pub label: String,
}

impl<T> Labeled<T> {
    pub fn new(value: Option<T>, label: impl FnOnce(&T) -> String) -> Self {
        let label = value
            .as_ref()
            .map(label)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Self { value, label }
    }
}
