use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model artifact not found at {}: export the model first", path.display())]
    MissingArtifact { path: PathBuf },
    #[error("Model artifact at {} is unusable: {reason}", path.display())]
    CorruptArtifact { path: PathBuf, reason: String },
    #[error("Row does not match the model schema: {0}")]
    SchemaMismatch(String),
    #[error("Model produced a non-finite prediction ({0})")]
    NonFinite(f64),
}
