use crate::model::error::ModelError;
use crate::row::FeatureRow;

/// A loaded price model. Implementations are immutable once constructed.
pub trait Predictor: Send + Sync {
    fn name(&self) -> &str;
    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError>;
}
