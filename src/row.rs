use crate::catalog::{
    Airline, City, Class, DAYS_LEFT_MAX, DAYS_LEFT_MIN, DURATION_MAX, DURATION_MIN, Stops,
    TimeBand,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Input columns of the price model, in the order it was trained on.
pub const FEATURE_COLUMNS: [&str; 9] = [
    "airline",
    "source_city",
    "destination_city",
    "departure_time",
    "arrival_time",
    "duration",
    "days_left",
    "stops_num",
    "class_num",
];

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("Departure and arrival are identical ({0}): pick two different cities")]
    InvalidSelection(City),
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// What the user picked on the search form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlightQuery {
    pub airline: Airline,
    pub source_city: City,
    pub destination_city: City,
    pub departure_time: TimeBand,
    pub arrival_time: TimeBand,
    pub duration: f64,
    pub days_left: i64,
    pub stops: Stops,
    pub class: Class,
}

impl Default for FlightQuery {
    fn default() -> Self {
        Self {
            airline: Airline::IndiGo,
            source_city: City::Delhi,
            destination_city: City::Mumbai,
            departure_time: TimeBand::Morning,
            arrival_time: TimeBand::Evening,
            duration: 2.5,
            days_left: 15,
            stops: Stops::Zero,
            class: Class::Economy,
        }
    }
}

impl FlightQuery {
    pub fn validate(&self) -> Result<(), QueryError> {
        if !(DURATION_MIN..=DURATION_MAX).contains(&self.duration) {
            return Err(QueryError::OutOfRange {
                field: "duration",
                value: self.duration,
                min: DURATION_MIN,
                max: DURATION_MAX,
            });
        }
        if !(DAYS_LEFT_MIN..=DAYS_LEFT_MAX).contains(&self.days_left) {
            return Err(QueryError::OutOfRange {
                field: "days_left",
                value: self.days_left as f64,
                min: DAYS_LEFT_MIN as f64,
                max: DAYS_LEFT_MAX as f64,
            });
        }
        if self.source_city == self.destination_city {
            return Err(QueryError::InvalidSelection(self.source_city));
        }
        Ok(())
    }
}

/// The single row handed to the predictor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub airline: String,
    pub source_city: String,
    pub destination_city: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: f64,
    pub days_left: i64,
    pub stops_num: i64,
    pub class_num: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Real(f64),
    Int(i64),
}

impl Cell<'_> {
    pub fn as_number(self) -> Option<f64> {
        match self {
            Cell::Text(_) => None,
            Cell::Real(value) => Some(value),
            Cell::Int(value) => Some(value as f64),
        }
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Real(value) => write!(f, "{value}"),
            Cell::Int(value) => write!(f, "{value}"),
        }
    }
}

impl FeatureRow {
    pub fn from_query(query: &FlightQuery) -> Self {
        Self {
            airline: query.airline.label().to_string(),
            source_city: query.source_city.label().to_string(),
            destination_city: query.destination_city.label().to_string(),
            departure_time: query.departure_time.label().to_string(),
            arrival_time: query.arrival_time.label().to_string(),
            duration: query.duration,
            days_left: query.days_left,
            stops_num: query.stops.code(),
            class_num: query.class.code(),
        }
    }

    /// Value of `column`, or `None` if it is not a model input.
    pub fn get(&self, column: &str) -> Option<Cell<'_>> {
        let cell = match column {
            "airline" => Cell::Text(&self.airline),
            "source_city" => Cell::Text(&self.source_city),
            "destination_city" => Cell::Text(&self.destination_city),
            "departure_time" => Cell::Text(&self.departure_time),
            "arrival_time" => Cell::Text(&self.arrival_time),
            "duration" => Cell::Real(self.duration),
            "days_left" => Cell::Int(self.days_left),
            "stops_num" => Cell::Int(self.stops_num),
            "class_num" => Cell::Int(self.class_num),
            _ => return None,
        };
        Some(cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&'static str, Cell<'_>)> + '_ {
        FEATURE_COLUMNS
            .iter()
            .filter_map(|column| self.get(column).map(|cell| (*column, cell)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_row_for_reference_query() {
        let row = FeatureRow::from_query(&FlightQuery::default());

        assert_eq!(row.airline, "IndiGo");
        assert_eq!(row.source_city, "Delhi");
        assert_eq!(row.destination_city, "Mumbai");
        assert_eq!(row.departure_time, "Morning");
        assert_eq!(row.arrival_time, "Evening");
        assert_eq!(row.duration, 2.5);
        assert_eq!(row.days_left, 15);
        assert_eq!(row.stops_num, 0);
        assert_eq!(row.class_num, 0);
    }

    #[test]
    fn row_construction_is_deterministic() {
        let query = FlightQuery {
            airline: Airline::Vistara,
            stops: Stops::TwoOrMore,
            class: Class::Business,
            ..FlightQuery::default()
        };

        let first = FeatureRow::from_query(&query);
        let second = FeatureRow::from_query(&query.clone());
        assert_eq!(first, second);
        assert_eq!(first.stops_num, 2);
        assert_eq!(first.class_num, 1);
    }

    #[test]
    fn cells_follow_column_order() {
        let row = FeatureRow::from_query(&FlightQuery::default());
        let columns: Vec<_> = row.cells().map(|(column, _)| column).collect();
        assert_eq!(columns, FEATURE_COLUMNS);

        let rendered: Vec<_> = row.cells().map(|(_, cell)| cell.to_string()).collect();
        assert_eq!(
            rendered,
            ["IndiGo", "Delhi", "Mumbai", "Morning", "Evening", "2.5", "15", "0", "0"]
        );
    }

    #[test]
    fn echoes_duration_exactly() {
        let query = FlightQuery {
            duration: 2.25,
            ..FlightQuery::default()
        };
        assert_eq!(query.validate(), Ok(()));

        let row = FeatureRow::from_query(&query);
        let duration = row
            .cells()
            .find(|(column, _)| *column == "duration")
            .map(|(_, cell)| cell.to_string());
        assert_eq!(row.duration, 2.25);
        assert_eq!(duration.as_deref(), Some("2.25"));
    }

    #[test]
    fn serializes_with_model_column_names() {
        let row = FeatureRow::from_query(&FlightQuery::default());
        let json = serde_json::to_value(&row).unwrap();
        let object = json.as_object().unwrap();

        for column in FEATURE_COLUMNS {
            assert!(object.contains_key(column), "missing {column}");
        }
        assert_eq!(json["duration"], serde_json::json!(2.5));
        assert_eq!(json["days_left"], serde_json::json!(15));
    }

    #[test]
    fn rejects_same_city() {
        let query = FlightQuery {
            destination_city: City::Delhi,
            ..FlightQuery::default()
        };
        assert_eq!(
            query.validate(),
            Err(QueryError::InvalidSelection(City::Delhi))
        );
    }

    #[test]
    fn rejects_out_of_range_numbers() {
        let too_long = FlightQuery {
            duration: 61.0,
            ..FlightQuery::default()
        };
        assert!(matches!(
            too_long.validate(),
            Err(QueryError::OutOfRange { field: "duration", .. })
        ));

        let too_late = FlightQuery {
            days_left: 0,
            ..FlightQuery::default()
        };
        assert!(matches!(
            too_late.validate(),
            Err(QueryError::OutOfRange { field: "days_left", .. })
        ));

        let nan = FlightQuery {
            duration: f64::NAN,
            ..FlightQuery::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn accepts_bounds() {
        let query = FlightQuery {
            duration: 60.0,
            days_left: 1,
            ..FlightQuery::default()
        };
        assert_eq!(query.validate(), Ok(()));
    }
}
