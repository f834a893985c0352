use crate::model::error::ModelError;
use crate::model::types::Predictor;
use crate::row::{Cell, FEATURE_COLUMNS, FeatureRow};
use serde::Deserialize;

/// Exported regression pipeline: per-column encoding followed by a linear
/// head. Categories unseen at training time contribute nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearPipeline {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub intercept: f64,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    OneHot {
        column: String,
        categories: Vec<String>,
        weights: Vec<f64>,
    },
    Scaled {
        column: String,
        mean: f64,
        scale: f64,
        weight: f64,
    },
}

impl Step {
    fn column(&self) -> &str {
        match self {
            Step::OneHot { column, .. } | Step::Scaled { column, .. } => column,
        }
    }

    fn contribution(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        let cell = row
            .get(self.column())
            .ok_or_else(|| ModelError::SchemaMismatch(format!("no column {}", self.column())))?;

        match (self, cell) {
            (
                Step::OneHot {
                    categories,
                    weights,
                    ..
                },
                Cell::Text(value),
            ) => Ok(categories
                .iter()
                .position(|category| category == value)
                .and_then(|index| weights.get(index).copied())
                .unwrap_or(0.0)),
            (
                Step::Scaled {
                    mean,
                    scale,
                    weight,
                    ..
                },
                Cell::Real(_) | Cell::Int(_),
            ) => {
                let value = cell.as_number().unwrap_or_default();
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                Ok((value - mean) / scale * weight)
            }
            (step, cell) => Err(ModelError::SchemaMismatch(format!(
                "column {} holds {cell:?}, which this step cannot encode",
                step.column()
            ))),
        }
    }
}

impl LinearPipeline {
    pub fn from_json(bytes: &[u8]) -> Result<Self, String> {
        let pipeline: Self = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
        pipeline.check()?;
        Ok(pipeline)
    }

    fn check(&self) -> Result<(), String> {
        if !self.intercept.is_finite() {
            return Err("intercept is not finite".to_string());
        }
        for step in &self.steps {
            if !FEATURE_COLUMNS.iter().any(|column| *column == step.column()) {
                return Err(format!("unknown input column {}", step.column()));
            }
            match step {
                Step::OneHot {
                    column,
                    categories,
                    weights,
                } => {
                    if categories.len() != weights.len() {
                        return Err(format!(
                            "{column}: {} categories but {} weights",
                            categories.len(),
                            weights.len()
                        ));
                    }
                    if weights.iter().any(|w| !w.is_finite()) {
                        return Err(format!("{column}: non-finite weight"));
                    }
                }
                Step::Scaled {
                    column,
                    mean,
                    scale,
                    weight,
                } => {
                    if ![mean, scale, weight].iter().all(|v| v.is_finite()) {
                        return Err(format!("{column}: non-finite scaler parameter"));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Predictor for LinearPipeline {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        let mut prediction = self.intercept;
        for step in &self.steps {
            prediction += step.contribution(row)?;
        }
        if !prediction.is_finite() {
            return Err(ModelError::NonFinite(prediction));
        }
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Airline, Class};
    use crate::row::FlightQuery;

    const ARTIFACT: &str = r#"{
        "name": "flight_price_model",
        "version": "2024-03",
        "intercept": 6000.0,
        "steps": [
            {"kind": "one_hot", "column": "airline",
             "categories": ["IndiGo", "Vistara"], "weights": [-500.0, 1500.0]},
            {"kind": "scaled", "column": "duration", "mean": 2.5, "scale": 0.0, "weight": 100.0},
            {"kind": "scaled", "column": "days_left", "mean": 30.0, "scale": 15.0, "weight": -900.0},
            {"kind": "scaled", "column": "class_num", "mean": 0.0, "scale": 1.0, "weight": 40000.0}
        ]
    }"#;

    fn pipeline() -> LinearPipeline {
        LinearPipeline::from_json(ARTIFACT.as_bytes()).unwrap()
    }

    #[test]
    fn sums_intercept_and_contributions() {
        let row = FeatureRow::from_query(&FlightQuery::default());
        // 6000 - 500 + 0 + (15 - 30) / 15 * -900
        assert_eq!(pipeline().predict(&row).unwrap(), 6400.0);
    }

    #[test]
    fn unknown_category_contributes_nothing() {
        let row = FeatureRow::from_query(&FlightQuery {
            airline: Airline::AirAsia,
            ..FlightQuery::default()
        });
        assert_eq!(pipeline().predict(&row).unwrap(), 6900.0);
    }

    #[test]
    fn business_class_raises_price() {
        let economy = FeatureRow::from_query(&FlightQuery::default());
        let business = FeatureRow::from_query(&FlightQuery {
            class: Class::Business,
            ..FlightQuery::default()
        });
        let model = pipeline();
        assert!(model.predict(&business).unwrap() > model.predict(&economy).unwrap());
    }

    #[test]
    fn rejects_unknown_column() {
        let artifact = r#"{"name": "m", "intercept": 0.0, "steps": [
            {"kind": "scaled", "column": "price", "mean": 0.0, "scale": 1.0, "weight": 1.0}
        ]}"#;
        let err = LinearPipeline::from_json(artifact.as_bytes()).unwrap_err();
        assert!(err.contains("price"));
    }

    #[test]
    fn rejects_mismatched_weights() {
        let artifact = r#"{"name": "m", "intercept": 0.0, "steps": [
            {"kind": "one_hot", "column": "airline", "categories": ["IndiGo"], "weights": []}
        ]}"#;
        assert!(LinearPipeline::from_json(artifact.as_bytes()).is_err());
    }

    #[test]
    fn encoding_wrong_column_type_is_a_schema_mismatch() {
        let artifact = r#"{"name": "m", "intercept": 0.0, "steps": [
            {"kind": "scaled", "column": "airline", "mean": 0.0, "scale": 1.0, "weight": 1.0}
        ]}"#;
        let model = LinearPipeline::from_json(artifact.as_bytes()).unwrap();
        let row = FeatureRow::from_query(&FlightQuery::default());
        assert!(matches!(
            model.predict(&row),
            Err(ModelError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn rejects_non_json() {
        assert!(LinearPipeline::from_json(b"\x80\x04joblib").is_err());
    }
}
