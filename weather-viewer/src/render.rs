use std::fmt::Write;

use crate::state::ViewerState;

/// Render the panel as plain text: header, optional error banner, then the
/// loading placeholder, the empty-state message, or the selected day's
/// detail plus a strip of all days with the selected entry bracketed.
pub fn render(state: &ViewerState) -> String {
    let mut out = String::new();

    match state.location() {
        Some(loc) => {
            let _ = writeln!(out, "{}, {}", loc.name, loc.country);
        }
        None => out.push_str("Loading location...\n"),
    }
    out.push_str("Weather Forecast\n\n");

    if let Some(err) = state.error() {
        let _ = writeln!(out, "! {err} (press r to retry)\n");
    }

    if state.is_loading() {
        out.push_str("Loading weather data...\n");
        return out;
    }

    if state.days().is_empty() {
        out.push_str("No weather data available.\n");
        return out;
    }

    let selected = state.selected_index();
    let day = &state.days()[selected];
    let _ = writeln!(out, "{}", day.date);
    let _ = writeln!(
        out,
        "  {}°C  {} ({})  [{}]",
        day.temperature, day.condition, day.description, day.icon
    );
    let _ = writeln!(out, "  humidity {}%  wind {} m/s\n", day.humidity, day.wind_speed);

    let strip: Vec<String> = state
        .days()
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let tag = short_date(&d.date);
            if i == selected {
                format!("[{} {}°]", tag, d.temperature)
            } else {
                format!(" {} {}° ", tag, d.temperature)
            }
        })
        .collect();
    out.push_str(&strip.join(" "));
    out.push('\n');
    out.push_str("commands: n = next, p = previous, 0-9 = select, r = refresh, q = quit\n");

    out
}

/// Month-day part of either an RFC 3339 instant or a provider "dt_txt".
fn short_date(date: &str) -> &str {
    date.get(5..10).unwrap_or(date)
}
