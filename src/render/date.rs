use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, Utc};
use log::warn;
use std::fmt::Write;

use super::html_escape;
use crate::settings::RenderSettings;

/// How date labels are presented.
#[derive(Debug, Clone)]
pub struct DateStyle {
    pub format: String,
    pub locale: Locale,
}

impl Default for DateStyle {
    fn default() -> Self {
        DateStyle {
            format: "%b %-d, %Y".to_string(),
            locale: Locale::en_US,
        }
    }
}

impl DateStyle {
    pub fn new(format: &str, locale: &str) -> Self {
        let locale = Locale::try_from(locale).unwrap_or_else(|_| {
            warn!("Unknown locale '{}', falling back to en_US", locale);
            Locale::en_US
        });
        DateStyle {
            format: format.to_string(),
            locale,
        }
    }

    pub fn from_settings(settings: &RenderSettings) -> Self {
        DateStyle::new(&settings.date_format, &settings.locale)
    }
}

fn parse_raw(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Human-readable label for an ISO date. Unparseable input, or a format the
/// locale formatter rejects, comes back unchanged.
pub fn format_date(raw: &str, style: &DateStyle) -> String {
    let Some(ndt) = parse_raw(raw) else {
        return raw.to_string();
    };
    let utc_dt = DateTime::<Utc>::from_naive_utc_and_offset(ndt, Utc);

    let mut out = String::new();
    match write!(out, "{}", utc_dt.format_localized(&style.format, style.locale)) {
        Ok(()) => out,
        Err(_) => {
            warn!("Bad date format '{}'", style.format);
            raw.to_string()
        }
    }
}

/// `<time>` element carrying the raw value as `datetime`.
pub fn time_element(raw: &str, style: &DateStyle) -> String {
    format!(
        "<time datetime=\"{}\">{}</time>",
        html_escape(raw),
        html_escape(&format_date(raw, style))
    )
}
