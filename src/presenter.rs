use crate::row::{FeatureRow, FlightQuery};

/// Everything the result panel shows for one submitted search.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub price: f64,
    pub formatted: String,
    pub pills: Vec<String>,
    pub row: FeatureRow,
}

impl Estimate {
    pub fn new(query: &FlightQuery, row: FeatureRow, raw_price: f64) -> Self {
        let price = clamp_price(raw_price);
        Self {
            price,
            formatted: format_inr(price),
            pills: summary_pills(query),
            row,
        }
    }
}

/// Prices never go below zero; NaN counts as zero.
pub fn clamp_price(price: f64) -> f64 {
    price.max(0.0)
}

/// Formats rupees rounded to the unit with space-separated thousands,
/// e.g. `52371.4` becomes `"₹ 52 371"`.
pub fn format_inr(amount: f64) -> String {
    let rounded = format!("{amount:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", rounded.as_str()),
    };
    // "-0" after rounding a tiny negative
    let sign = if digits.bytes().all(|b| b == b'0') { "" } else { sign };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    format!("₹ {sign}{grouped}")
}

pub fn summary_pills(query: &FlightQuery) -> Vec<String> {
    vec![
        format!("{} → {}", query.source_city, query.destination_city),
        query.airline.to_string(),
        format!("class: {}", query.class),
        format!("stops: {}", query.stops),
        format!("duration: {} h", query.duration),
        format!("D-{}", query.days_left),
        format!("departure: {}", query.departure_time),
        format!("arrival: {}", query.arrival_time),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_reference_price() {
        assert_eq!(format_inr(52371.4), "₹ 52 371");
    }

    #[test]
    fn formats_small_and_large_amounts() {
        assert_eq!(format_inr(0.0), "₹ 0");
        assert_eq!(format_inr(999.6), "₹ 1 000");
        assert_eq!(format_inr(123.0), "₹ 123");
        assert_eq!(format_inr(1234567.0), "₹ 1 234 567");
        assert_eq!(format_inr(-0.2), "₹ 0");
        assert_eq!(format_inr(-4500.0), "₹ -4 500");
    }

    #[test]
    fn clamps_negative_and_nan() {
        assert_eq!(clamp_price(-120.0), 0.0);
        assert_eq!(clamp_price(f64::NAN), 0.0);
        assert_eq!(clamp_price(8123.5), 8123.5);
    }

    #[test]
    fn estimate_is_never_negative() {
        let query = FlightQuery::default();
        let row = FeatureRow::from_query(&query);
        let estimate = Estimate::new(&query, row, -3000.0);

        assert_eq!(estimate.price, 0.0);
        assert_eq!(estimate.formatted, "₹ 0");
    }

    #[test]
    fn duration_pill_keeps_submitted_precision() {
        let query = FlightQuery {
            duration: 2.25,
            ..FlightQuery::default()
        };
        let pills = summary_pills(&query);
        assert!(pills.iter().any(|pill| pill == "duration: 2.25 h"));
    }

    #[test]
    fn pills_echo_query() {
        let pills = summary_pills(&FlightQuery::default());
        assert_eq!(
            pills,
            [
                "Delhi → Mumbai",
                "IndiGo",
                "class: Economy",
                "stops: zero",
                "duration: 2.5 h",
                "D-15",
                "departure: Morning",
                "arrival: Evening",
            ]
        );
    }
}
