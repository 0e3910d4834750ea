//! Wire format helpers
//!
//! The REST backend is trusted but loosely typed: dates come back either as
//! `YYYY-MM-DD` or as full timestamps, optional dates may be `null` or `""`,
//! and numeric columns are sometimes serialized as strings. These serde
//! adapters accept all of those shapes and always emit the canonical form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

use super::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date the way the backend may send it
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    // "2024-03-01 10:00:00" and similar: keep the date part
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok())
}

/// Parse a timestamp, treating a bare date as midnight UTC
pub fn parse_wire_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    parse_wire_date(raw)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn into_f64<E: de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrText::Number(n) => Ok(n),
            NumberOrText::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a number, got {:?}", s))),
        }
    }
}

/// `NaiveDate` as `YYYY-MM-DD`
pub mod date {
    use super::*;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_wire_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date {:?}", raw)))
    }
}

/// `Option<NaiveDate>`; `null` and `""` both mean absent
pub mod optional_date {
    use super::*;

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse_wire_date(&s)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date {:?}", s))),
        }
    }
}

/// `DateTime<Utc>` as RFC 3339
pub mod timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(
        ts: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_wire_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp {:?}", raw)))
    }
}

/// Money amounts: number or numeric string
pub mod amount {
    use super::*;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        NumberOrText::deserialize(deserializer)?.into_f64()
    }
}

/// Whole counts and ids: number or numeric string
pub mod count {
    use super::*;

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = NumberOrText::deserialize(deserializer)?.into_f64::<D::Error>()?;
        if value.fract() != 0.0 {
            return Err(de::Error::custom(format!("expected a whole number, got {}", value)));
        }
        Ok(value as i64)
    }
}

// ============================================
// Form input parsing
// ============================================

/// Parse a money field from form input
pub fn parse_amount(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim().trim_start_matches('$');
    if raw.is_empty() {
        return Err(ValidationError::Required(field));
    }
    raw.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// Parse a whole-number field (ids, unit counts) from form input
pub fn parse_count(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required(field));
    }
    raw.parse::<i64>().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Parse a record id typed or selected in a form
pub fn parse_id(field: &'static str, raw: &str) -> Result<i64, ValidationError> {
    let id = parse_count(field, raw)?;
    if id <= 0 {
        return Err(ValidationError::InvalidNumber {
            field,
            value: raw.trim().to_string(),
        });
    }
    Ok(id)
}

/// Parse a required date field from form input
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    parse_wire_date(raw).ok_or_else(|| ValidationError::InvalidDate {
        field,
        value: raw.trim().to_string(),
    })
}

/// Parse an optional date field; blank input is `None`
pub fn parse_optional_date(
    field: &'static str,
    raw: &str,
) -> Result<Option<NaiveDate>, ValidationError> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(field, raw).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_wire_date("2024-03-01"), Some(expected));
        assert_eq!(parse_wire_date("2024-03-01T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_wire_date("2024-03-01 12:30:00"), Some(expected));
        assert_eq!(parse_wire_date(""), None);
        assert_eq!(parse_wire_date("March 1st"), None);
    }

    #[test]
    fn test_parse_wire_timestamp_bare_date() {
        let ts = parse_wire_timestamp("2024-05-10").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-05-10T00:00:00+00:00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("amount", "1,250.50").unwrap(), 1250.5);
        assert_eq!(parse_amount("amount", "$40").unwrap(), 40.0);
        assert!(matches!(
            parse_amount("amount", "  "),
            Err(ValidationError::Required("amount"))
        ));
        assert!(matches!(
            parse_amount("amount", "abc"),
            Err(ValidationError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date("paid_date", "").unwrap(), None);
        assert!(parse_optional_date("paid_date", "2024-13-40").is_err());
    }
}
