//! Date and money formatting shared by the list views, query builder and exports.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Format used in query strings, payloads and export filenames
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used for dates in exported rows
pub const EXPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format a date as `yyyy-MM-dd`
pub fn format_query_date(date: NaiveDate) -> String {
    date.format(QUERY_DATE_FORMAT).to_string()
}

/// Format a date for exported rows (e.g. "14/03/2025")
pub fn format_export_date(date: NaiveDate) -> String {
    date.format(EXPORT_DATE_FORMAT).to_string()
}

/// Format a date for list rows (e.g. "14 Mar 2025")
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Parse the value of an `<input type="date">`. Empty input means "no date".
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, QUERY_DATE_FORMAT).ok()
}

/// Parse a date coming from the API. Accepts `yyyy-MM-dd` or an ISO date-time,
/// in which case only the date part is kept.
pub fn parse_api_date(value: &str) -> Option<NaiveDate> {
    let date_part = value
        .trim()
        .split(['T', ' '])
        .next()
        .unwrap_or_default();
    NaiveDate::parse_from_str(date_part, QUERY_DATE_FORMAT).ok()
}

/// Today's date in the local time zone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Format an amount with two decimals and thousands separators (e.g. "12,345.60")
pub fn format_money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// Format an amount the way it is written into exports: shortest decimal form
/// (`1500`, `12.5`), no grouping.
pub fn format_plain_amount(amount: f64) -> String {
    amount.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            RawAmount::Number(n) => Ok(n),
            RawAmount::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid amount: {s}"))),
        }
    }
}

/// Accept amounts sent as JSON numbers or numeric strings
pub(crate) fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    RawAmount::deserialize(deserializer)?.into_f64()
}

/// Like [`deserialize_amount`], but `null` becomes zero
pub(crate) fn deserialize_amount_or_zero<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<f64, D::Error> {
    match Option::<RawAmount>::deserialize(deserializer)? {
        Some(raw) => raw.into_f64(),
        None => Ok(0.0),
    }
}

pub(crate) fn deserialize_api_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_api_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
}
