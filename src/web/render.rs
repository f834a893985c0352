use crate::catalog::{
    Airline, City, Class, DAYS_LEFT_MAX, DAYS_LEFT_MIN, DURATION_MAX, DURATION_MIN,
    DURATION_STEP, Stops, TimeBand,
};
use crate::presenter::Estimate;
use crate::row::FlightQuery;
use crate::web::Outcome;
use std::fmt::{Display, Write};

const STYLE: &str = r#"
  body {font-family: system-ui, sans-serif; background: #0e1117; color: #fafafa; margin: 0;}
  .hero {text-align:center; padding: 2.2rem 0 1rem 0;}
  .hero h1 {font-size: 2.2rem; margin-bottom: .2rem;}
  .hero p {opacity:.75; margin-top: 0;}
  .searchwrap {max-width: 920px; margin: 0 auto; padding: 0 1rem;}
  .grid {display: grid; gap: 12px; align-items: end; margin-bottom: 12px;}
  .grid-3 {grid-template-columns: 1.1fr 1.1fr 1fr;}
  .grid-4 {grid-template-columns: repeat(4, 1fr);}
  .grid-2 {grid-template-columns: repeat(2, 1fr);}
  label {display: block; font-size: .85rem; opacity: .85; margin-bottom: 4px;}
  select, input[type=number] {width: 100%; padding: .45rem; border-radius: 8px;
    border: 1px solid rgba(255,255,255,0.12); background: #262730; color: inherit;}
  input[type=range] {width: 100%;}
  .segmented label {display: inline-block; margin-right: 10px;}
  button {width: 100%; border-radius: 12px; padding: 0.65rem 1rem; font-weight: 700;
    border: 1px solid rgba(255,255,255,0.2); background: #ff4b4b; color: white; cursor: pointer;}
  .results {max-width: 1200px; margin: 24px auto; padding: 0 1rem;
    display: grid; grid-template-columns: 1.2fr 0.8fr; gap: 24px;}
  .pill {display:inline-block; padding: 6px 10px; border-radius: 999px;
    border: 1px solid rgba(255,255,255,0.12); font-size: 0.85rem; opacity: .85;
    margin-right: 6px; margin-bottom: 6px;}
  .bigprice {font-size: 2.4rem; font-weight: 800; line-height: 1; margin: .2rem 0 .2rem 0;}
  .subtle {opacity:.75}
  .notice {max-width: 920px; margin: 24px auto; padding: .8rem 1rem; border-radius: 8px;}
  .warning {background: rgba(255, 193, 7, 0.15); border: 1px solid rgba(255, 193, 7, 0.4);}
  .error {background: rgba(255, 75, 75, 0.15); border: 1px solid rgba(255, 75, 75, 0.4);}
  table {border-collapse: collapse; width: 100%; font-size: .85rem;}
  th, td {border: 1px solid rgba(255,255,255,0.12); padding: 4px 6px; text-align: left;}
  .caption {font-size: .8rem; opacity: .6; margin-top: 6px;}
"#;

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn page(query: &FlightQuery, outcome: &Outcome) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Flight Price Finder</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>✈️</text></svg>">
<style>{STYLE}</style>
</head>
<body>
<div class="hero">
  <h1>✈️ Flight Price Finder</h1>
  <p>A flight-search style page to estimate the price of a ticket.</p>
</div>
{form}
{outcome}
</body>
</html>
"#,
        form = search_form(query),
        outcome = outcome_panel(outcome),
    );
    html
}

fn select<T: Copy + PartialEq + Display>(
    name: &str,
    title: &str,
    options: &[T],
    selected: T,
) -> String {
    let mut html = format!(r#"<div><label for="{name}">{title}</label><select id="{name}" name="{name}">"#);
    for option in options {
        let label = escape(&option.to_string());
        let marker = if *option == selected { " selected" } else { "" };
        let _ = write!(html, r#"<option value="{label}"{marker}>{label}</option>"#);
    }
    html.push_str("</select></div>");
    html
}

fn segmented(query: &FlightQuery) -> String {
    let mut html = String::from(r#"<div class="segmented"><label>Class</label>"#);
    for class in Class::ALL {
        let checked = if *class == query.class { " checked" } else { "" };
        let _ = write!(
            html,
            r#"<label><input type="radio" name="class" value="{class}"{checked}> {class}</label>"#
        );
    }
    html.push_str("</div>");
    html
}

fn search_form(query: &FlightQuery) -> String {
    format!(
        r#"<form class="searchwrap" method="post" action="/">
<div class="grid grid-3">
{source}
{destination}
{class}
</div>
<div class="grid grid-4">
{airline}
{stops}
<div><label for="days_left">Days before the flight: <output id="days_left_value">{days_left}</output></label>
<input type="range" id="days_left" name="days_left" min="{days_min}" max="{days_max}" value="{days_left}"
 oninput="document.getElementById('days_left_value').value = this.value"></div>
<div><label for="duration">Duration (hours)</label>
<input type="number" id="duration" name="duration" min="{duration_min}" max="{duration_max}" step="{duration_step}" value="{duration}"></div>
</div>
<div class="grid grid-2">
{departure}
{arrival}
</div>
<button type="submit">🔎 Search for the best price</button>
</form>"#,
        source = select("source_city", "Departure", City::ALL, query.source_city),
        destination = select(
            "destination_city",
            "Arrival",
            City::ALL,
            query.destination_city
        ),
        class = segmented(query),
        airline = select("airline", "Airline", Airline::ALL, query.airline),
        stops = select("stops", "Stops", Stops::ALL, query.stops),
        days_left = query.days_left,
        days_min = DAYS_LEFT_MIN,
        days_max = DAYS_LEFT_MAX,
        duration = query.duration,
        duration_min = DURATION_MIN,
        duration_max = DURATION_MAX,
        duration_step = DURATION_STEP,
        departure = select(
            "departure_time",
            "Departure slot",
            TimeBand::ALL,
            query.departure_time
        ),
        arrival = select(
            "arrival_time",
            "Arrival slot",
            TimeBand::ALL,
            query.arrival_time
        ),
    )
}

fn outcome_panel(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Idle => String::new(),
        Outcome::Rejected(err) => format!(
            r#"<div class="notice warning" role="alert">⚠️ {} 🙂</div>"#,
            escape(&err.to_string())
        ),
        Outcome::Failed(err) => format!(
            r#"<div class="notice error" role="alert">The price model could not estimate this flight: {}</div>"#,
            escape(&err.to_string())
        ),
        Outcome::Estimated(estimate) => result_panel(estimate),
    }
}

fn result_panel(estimate: &Estimate) -> String {
    let pills: String = estimate
        .pills
        .iter()
        .map(|pill| format!(r#"<span class="pill">{}</span>"#, escape(pill)))
        .collect();

    let mut header = String::new();
    let mut values = String::new();
    for (column, cell) in estimate.row.cells() {
        let _ = write!(header, "<th>{column}</th>");
        let _ = write!(values, "<td>{}</td>", escape(&cell.to_string()));
    }

    format!(
        r#"<div class="results">
<div>
<h3>Price estimate</h3>
<div class="bigprice">{price}</div>
<div class="subtle">Price estimated by the model (Indian rupees).</div>
<hr style="opacity:.15">
{pills}
</div>
<div>
<h3>Details sent to the model</h3>
<table><thead><tr>{header}</tr></thead><tbody><tr>{values}</tr></tbody></table>
<div class="caption">The model pipeline carries its own preprocessing (one-hot encoding, scaling, imputation).</div>
</div>
</div>"#,
        price = escape(&estimate.formatted),
    )
}
