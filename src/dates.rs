use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;

/// Epoch values above this are taken as milliseconds rather than seconds.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Calendar date layout used for card dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    #[default]
    EnUs,
    EnGb,
    DeDe,
    Iso,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::DeDe => "de-DE",
            Locale::Iso => "iso",
        }
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let (y, m, d) = (date.year(), date.month(), date.day());
        match self {
            Locale::EnUs => format!("{m}/{d}/{y}"),
            Locale::EnGb => format!("{d:02}/{m:02}/{y}"),
            Locale::DeDe => format!("{d}.{m}.{y}"),
            Locale::Iso => format!("{y:04}-{m:02}-{d:02}"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Locale::EnUs),
            "en-gb" => Ok(Locale::EnGb),
            "de" | "de-de" => Ok(Locale::DeDe),
            "iso" | "iso-8601" => Ok(Locale::Iso),
            _ => Err(ConfigError::UnknownLocale(s.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = ConfigError;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<Locale> for String {
    fn from(l: Locale) -> Self { l.tag().to_string() }
}

/// Format a manifest date for display. Missing or unparseable input gives an empty string.
pub fn format_date(value: Option<&Value>, locale: Locale) -> String {
    value
        .and_then(parse_date)
        .map(|d| locale.format(d))
        .unwrap_or_default()
}

/// Interpret a manifest date value: epoch seconds (or milliseconds), RFC 3339, or a bare date.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(float_secs))
            .and_then(from_epoch),
        Value::String(s) => parse_date_str(s),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse::<i64>().ok().and_then(from_epoch);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

// Floats outside the i64 range would saturate on cast; treat them as garbage.
fn float_secs(f: f64) -> Option<i64> {
    (f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64).then(|| f as i64)
}

fn from_epoch(raw: i64) -> Option<NaiveDate> {
    let secs = if raw.unsigned_abs() > MILLIS_THRESHOLD as u64 { raw / 1000 } else { raw };
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_date_formats_per_locale() {
        let v = json!("2024-01-01");
        assert_eq!(format_date(Some(&v), Locale::EnUs), "1/1/2024");
        assert_eq!(format_date(Some(&v), Locale::EnGb), "01/01/2024");
        assert_eq!(format_date(Some(&v), Locale::DeDe), "1.1.2024");
        assert_eq!(format_date(Some(&v), Locale::Iso), "2024-01-01");
    }

    #[test]
    fn rfc3339_is_taken_in_utc() {
        let v = json!("2024-03-09T23:30:00-05:00");
        assert_eq!(format_date(Some(&v), Locale::Iso), "2024-03-10");
    }

    #[test]
    fn epoch_seconds_and_millis() {
        // 2023-11-14T22:13:20Z
        assert_eq!(format_date(Some(&json!(1_700_000_000)), Locale::Iso), "2023-11-14");
        assert_eq!(format_date(Some(&json!(1_700_000_000_000i64)), Locale::Iso), "2023-11-14");
        assert_eq!(format_date(Some(&json!("1700000000")), Locale::Iso), "2023-11-14");
    }

    #[test]
    fn missing_or_garbage_is_empty() {
        assert_eq!(format_date(None, Locale::EnUs), "");
        assert_eq!(format_date(Some(&Value::Null), Locale::EnUs), "");
        assert_eq!(format_date(Some(&json!("yesterday-ish")), Locale::EnUs), "");
        assert_eq!(format_date(Some(&json!("")), Locale::EnUs), "");
        assert_eq!(format_date(Some(&json!({"a": 1})), Locale::EnUs), "");
        assert_eq!(format_date(Some(&json!(true)), Locale::EnUs), "");
    }

    #[test]
    fn extreme_numbers_do_not_panic() {
        let min: Value = serde_json::from_str("-9223372036854775808").unwrap();
        assert_eq!(format_date(Some(&min), Locale::Iso), "");
        assert_eq!(format_date(Some(&json!(i64::MAX)), Locale::Iso), "");
        assert_eq!(format_date(Some(&json!(-1e300)), Locale::Iso), "");
        assert_eq!(format_date(Some(&json!(1e300)), Locale::Iso), "");
        assert_eq!(format_date(Some(&json!(u64::MAX)), Locale::Iso), "");
        assert_eq!(format_date(Some(&json!("99999999999999999999999")), Locale::Iso), "");
        // fractional seconds are truncated
        assert_eq!(format_date(Some(&json!(1_700_000_000.75)), Locale::Iso), "2023-11-14");
    }

    #[test]
    fn locale_parsing() {
        assert_eq!("en_US".parse::<Locale>().unwrap(), Locale::EnUs);
        assert_eq!("DE-de".parse::<Locale>().unwrap(), Locale::DeDe);
        assert!("xx-YY".parse::<Locale>().is_err());
    }
}
