//! Tolerant field decoding for the persisted project document.
//!
//! Documents written by older builds of the dashboard carry numeric ids,
//! numbers typed as strings (`"5000"`, `"80.00"`, `""`), empty dates and
//! missing collections. Every model field goes through one of these helpers
//! so the rest of the crate only ever sees normalised values.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Ids may be numbers (`Date.now()` style) or strings. Missing ids decode as
/// an empty string and are assigned at the repository boundary.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_f64(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_f64(&Value::deserialize(deserializer)?))
}

pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = value_to_f64(&Value::deserialize(deserializer)?).unwrap_or(0.0);
    Ok(value.max(0.0).min(u32::MAX as f64).round() as u32)
}

pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_date(&s),
        _ => None,
    })
}

/// `null` or a missing collection becomes an empty one.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

fn value_to_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.replace(',', ".").parse::<f64>().ok()
            }
        }
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Declares a closed string enumeration that serializes to its label and
/// decodes unknown labels as the default variant.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::AppError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim() {
                    $($label => Ok($name::$variant),)+
                    other => Err($crate::error::AppError::InvalidData(format!(
                        "unknown {}: {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                Ok(value
                    .as_str()
                    .and_then(|label| label.parse().ok())
                    .unwrap_or_default())
            }
        }
    };
}

pub(crate) use string_enum;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "id")]
        id: String,
        #[serde(default, deserialize_with = "number")]
        budget: f64,
        #[serde(default, deserialize_with = "opt_number")]
        limit: Option<f64>,
        #[serde(default, deserialize_with = "count")]
        units: u32,
        #[serde(default, deserialize_with = "date")]
        start: Option<NaiveDate>,
        #[serde(default, deserialize_with = "seq")]
        tags: Vec<String>,
    }

    #[test]
    fn accepts_legacy_shapes() {
        let sample: Sample = serde_json::from_str(
            r#"{"id": 1712345678901, "budget": "1500000", "limit": "", "units": "24",
                "start": "2024-01-15", "tags": null}"#,
        )
        .unwrap();
        assert_eq!(sample.id, "1712345678901");
        assert_eq!(sample.budget, 1_500_000.0);
        assert_eq!(sample.limit, None);
        assert_eq!(sample.units, 24);
        assert_eq!(sample.start, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert!(sample.tags.is_empty());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let sample: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(sample.id, "");
        assert_eq!(sample.budget, 0.0);
        assert_eq!(sample.units, 0);
        assert_eq!(sample.start, None);
    }

    #[test]
    fn parses_timestamps_and_rejects_garbage_dates() {
        assert_eq!(
            parse_date("2024-03-10T12:30:00.000Z"),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
        assert_eq!(parse_date("ontem"), None);
        assert_eq!(parse_date(""), None);
    }

    mod with_crate_result {
        #[allow(unused_imports)]
        use crate::error::Result;
        use crate::lenient::string_enum;

        string_enum! {
            pub enum Shift {
                Morning => "morning",
                Night => "night",
            }
            default Morning
        }
    }

    #[test]
    fn string_enum_expands_next_to_the_crate_result_alias() {
        use with_crate_result::Shift;

        assert_eq!("night".parse::<Shift>().unwrap(), Shift::Night);
        assert!("noon".parse::<Shift>().is_err());
        assert_eq!(serde_json::to_string(&Shift::Night).unwrap(), r#""night""#);
        let decoded: Shift = serde_json::from_str(r#""noon""#).unwrap();
        assert_eq!(decoded, Shift::Morning);
    }

    #[test]
    fn decimal_comma_is_understood() {
        assert_eq!(value_to_f64(&Value::String("0,5".into())), Some(0.5));
        assert_eq!(value_to_f64(&Value::String("abc".into())), None);
    }
}
