mod error;
mod pipeline;
mod types;

pub use error::ModelError;
pub use pipeline::LinearPipeline;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
pub use types::Predictor;

/// Loads the exported price model. Called once at startup; the returned
/// handle is shared read-only by every request.
pub fn load_model(path: &Path) -> Result<Arc<dyn Predictor>, ModelError> {
    if !path.exists() {
        return Err(ModelError::MissingArtifact {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path).map_err(|e| ModelError::CorruptArtifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let pipeline =
        LinearPipeline::from_json(&bytes).map_err(|reason| ModelError::CorruptArtifact {
            path: path.to_path_buf(),
            reason,
        })?;

    info!(
        "Loaded price model '{}' (version {}, {} steps) from {}",
        pipeline.name,
        pipeline.version.as_deref().unwrap_or("unknown"),
        pipeline.steps.len(),
        path.display()
    );

    Ok(Arc::new(pipeline))
}
