use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Material not found: {0}")]
    MaterialNotFound(String),

    #[error("Visit not found: {0}")]
    VisitNotFound(String),

    #[error("Phase not found: {0}")]
    PhaseNotFound(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Photo not found: {0}")]
    PhotoNotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Navigation error: {0}")]
    Navigation(String),

    #[error("State unavailable: {0}")]
    State(String),
}

impl AppError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidData(message.into())
    }
}

// The desktop frontend receives errors as plain strings
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
