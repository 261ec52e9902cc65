use chrono::{DateTime, Locale, Utc};

// Every formatting call takes the locale from `Settings`; nothing in the
// crate mutates a process-wide locale.

pub fn short_date(ts: &DateTime<Utc>, locale: Locale) -> String {
    ts.format_localized("%e %B %Y", locale).to_string()
}

pub fn date_time(ts: &DateTime<Utc>, locale: Locale) -> String {
    ts.format_localized("%e %B %Y, %H:%M", locale).to_string()
}
