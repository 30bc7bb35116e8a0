use std::fmt::Write;

use crate::model::{CleanupEvent, ForecastDay};
use crate::suitability::classify;

/// Render one card per forecast day, in input order.
pub fn weather_cards(days: &[ForecastDay]) -> String {
    let mut out = String::new();

    for day in days {
        let verdict = classify(day);
        let condition_text = escape_html(&day.condition_text);

        // write! into a String cannot fail.
        let _ = write!(
            out,
            r#"<div class="weather-card {class}">
  <div class="weather-card-header">
    <h3>{weekday}</h3>
    <img src="{icon}" alt="{condition}" class="weather-icon" width="64" height="64">
  </div>
  <div class="weather-card-body">
    <p class="temperature"><span class="high">{high}&deg;</span> / <span class="low">{low}&deg;</span></p>
    <p class="wind">{wind} km/h</p>
    <p class="precipitation">{precip}mm</p>
    <p class="beach-condition">{label}</p>
  </div>
</div>
"#,
            class = verdict.style_class(),
            weekday = day.date.format("%a"),
            icon = escape_html(&day.condition_icon_url),
            condition = condition_text,
            high = day.max_temp_c.round(),
            low = day.min_temp_c.round(),
            wind = day.max_wind_kph.round(),
            precip = day.total_precip_mm,
            label = verdict.label(),
        );
    }

    out
}

/// Render one card per cleanup event, in store order. The join action
/// carries the event id as a data attribute for the UI-binding layer.
pub fn event_cards(events: &[CleanupEvent]) -> String {
    let mut out = String::new();

    for event in events {
        let join_button = if event.joined {
            r#"<button class="cta-button" disabled>Joined &#10003;</button>"#.to_string()
        } else {
            format!(
                r#"<button class="cta-button" data-event-id="{}">Join Cleanup</button>"#,
                escape_html(&event.id),
            )
        };

        let _ = write!(
            out,
            r#"<div class="event-card">
  <h3>{title}</h3>
  <p>{date}</p>
  <p>{description}</p>
  {join_button}
</div>
"#,
            title = escape_html(&event.title),
            date = escape_html(&event.date),
            description = escape_html(&event.description),
        );
    }

    out
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
