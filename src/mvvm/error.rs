use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("failed to serialize value: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to deserialize value: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("folder doesn't exist: {path}")]
    FolderMissing { path: String },
    #[error("required value")]
    Required,
}
