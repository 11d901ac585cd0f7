use crate::error::{AppError, Result};
use crate::lenient::{self, string_enum};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days before expiry at which a document starts being flagged.
pub const EXPIRY_WARNING_DAYS: i64 = 30;

string_enum! {
    pub enum DocumentType {
        Design => "Projeto",
        Permits => "Licenças",
        Reports => "Relatórios",
        Contracts => "Contratos",
        Other => "Outros",
    }
    default Other
}

string_enum! {
    pub enum DocumentStatus {
        Pending => "pending",
        Approved => "approved",
        Expired => "expired",
    }
    default Pending
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryState {
    Valid,
    ExpiringSoon,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default, deserialize_with = "lenient::date")]
    pub expiry_date: Option<NaiveDate>,
    /// Data URI of the uploaded file, or a path for seeded entries.
    #[serde(default, deserialize_with = "lenient::string")]
    pub file_data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentCategory {
    #[serde(rename = "type", default)]
    pub doc_type: DocumentType,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub items: Vec<Document>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInput {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub name: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default, deserialize_with = "lenient::date")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub file_data: String,
}

/// Fields editable on an existing document; the file itself is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEdit {
    pub name: String,
    pub status: DocumentStatus,
    #[serde(default, deserialize_with = "lenient::date")]
    pub expiry_date: Option<NaiveDate>,
}

impl DocumentInput {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid("document name cannot be empty"));
        }
        if self.file_data.trim().is_empty() {
            return Err(AppError::invalid("a document needs an attached file"));
        }
        Ok(())
    }

    pub fn into_document(self, id: String) -> Document {
        Document {
            id,
            name: self.name.trim().to_string(),
            status: self.status,
            expiry_date: self.expiry_date,
            file_data: self.file_data,
        }
    }
}

impl DocumentEdit {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid("document name cannot be empty"));
        }
        Ok(())
    }
}

impl Document {
    pub fn expiry_state(&self, today: NaiveDate) -> ExpiryState {
        if self.status == DocumentStatus::Expired {
            return ExpiryState::Expired;
        }
        match self.expiry_date {
            Some(expiry) if expiry < today => ExpiryState::Expired,
            Some(expiry) if (expiry - today).num_days() <= EXPIRY_WARNING_DAYS => {
                ExpiryState::ExpiringSoon
            }
            _ => ExpiryState::Valid,
        }
    }
}
