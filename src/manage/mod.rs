//! Mutating operations on the project repository, one file per concern.
//!
//! Every operation goes through [`ProjectRepository::commit`], so a change is
//! normalised and persisted before it becomes visible.
//!
//! [`ProjectRepository::commit`]: crate::repository::ProjectRepository

use serde::{Deserialize, Serialize};

pub mod documents;
pub mod materials;
pub mod photos;
pub mod projects;
pub mod timeline;
pub mod visits;

/// Outcome of the confirmation prompt shown before a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn is_confirmed(self) -> bool {
        matches!(self, Confirmation::Confirmed)
    }
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}
