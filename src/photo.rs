use crate::error::{AppError, Result};
use crate::lenient;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    /// `data:image/png;base64,...` for uploads, a plain path for seeded photos.
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
}

/// Caption fields from the photo upload form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCaption {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
}

impl Photo {
    pub fn new(url: String, caption: PhotoCaption, today: NaiveDate) -> Result<Self> {
        if url.trim().is_empty() {
            return Err(AppError::invalid("photo has no image data"));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            url,
            description: caption.description.trim().to_string(),
            location: caption.location.trim().to_string(),
            date: caption.date.or(Some(today)),
        })
    }
}
