//! Human-friendly rendering of weather reports. Presentation only: all
//! numbers arrive pre-aggregated from `skyview-core`.

use chrono::NaiveDate;
use skyview_core::{DayAggregate, Theme, Units, WeatherReport, display};

pub fn report(report: &WeatherReport, units: Units) {
    let current = &report.current;
    let theme = report.display.theme;

    println!("{}  [{}]", report.label, theme.label());
    println!(
        "{}  {}  {}",
        display::glyph(&current.condition, theme),
        fmt_temp(current.temperature),
        current.description,
    );
    println!(
        "Feels like {}   Humidity {}   Wind {}",
        fmt_temp(current.feels_like),
        fmt_humidity(current.humidity),
        fmt_wind(current.wind_speed, units),
    );
    println!(
        "Today {} / {}   observed {}",
        fmt_temp(current.temp_max),
        fmt_temp(current.temp_min),
        current.observed_at.format("%H:%M UTC"),
    );

    if report.days.is_empty() {
        return;
    }

    println!();
    for day in &report.days {
        day_card(day);
    }
}

fn day_card(day: &DayAggregate) {
    let theme = Theme::for_icon(&day.icon);
    let humidity = day
        .avg_humidity
        .map(|h| format!("Hum {h}%"))
        .unwrap_or_default();

    println!(
        "{:<4} {}  {} / {}  {}",
        weekday_short(&day.date),
        display::glyph(&day.condition, theme),
        fmt_temp(day.max),
        fmt_temp(day.min),
        humidity,
    );
}

fn weekday_short(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn fmt_temp(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}°", v.round() as i64),
        None => "--°".to_string(),
    }
}

fn fmt_humidity(value: Option<u8>) -> String {
    match value {
        Some(v) => format!("{v}%"),
        None => "--%".to_string(),
    }
}

fn fmt_wind(value: Option<f64>, units: Units) -> String {
    let unit = match units {
        Units::Metric => "m/s",
        Units::Imperial => "mph",
    };
    match value {
        Some(v) => format!("{v:.1} {unit}"),
        None => format!("-- {unit}"),
    }
}
