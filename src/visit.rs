use crate::error::{AppError, Result};
use crate::lenient;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    /// `HH:MM`, as entered.
    #[serde(default, deserialize_with = "lenient::string")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub purpose: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub participants: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub observations: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitInput {
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    pub time: String,
    pub purpose: String,
    pub participants: String,
    pub location: String,
    #[serde(default)]
    pub observations: String,
}

impl VisitInput {
    pub fn validate(&self) -> Result<()> {
        if self.date.is_none() {
            return Err(AppError::invalid("visit date is required"));
        }
        if parse_time(&self.time).is_none() {
            return Err(AppError::invalid(format!("invalid visit time: {:?}", self.time)));
        }
        for (field, value) in [
            ("purpose", &self.purpose),
            ("participants", &self.participants),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::invalid(format!("visit {} is required", field)));
            }
        }
        Ok(())
    }

    pub fn into_visit(self, id: String) -> Visit {
        Visit {
            id,
            date: self.date,
            time: self.time.trim().to_string(),
            purpose: self.purpose.trim().to_string(),
            participants: self.participants.trim().to_string(),
            location: self.location.trim().to_string(),
            observations: self.observations.trim().to_string(),
        }
    }
}

impl Visit {
    /// Scheduled moment; an unreadable time counts as the start of the day.
    pub fn scheduled_at(&self) -> Option<NaiveDateTime> {
        let time = parse_time(&self.time).unwrap_or(NaiveTime::MIN);
        self.date.map(|date| date.and_time(time))
    }
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspection() -> VisitInput {
        VisitInput {
            date: NaiveDate::from_ymd_opt(2024, 3, 26),
            time: "10:00".into(),
            purpose: "Inspeção de Qualidade".into(),
            participants: "Ana Paula, Roberto Carlos".into(),
            location: "Área comum".into(),
            observations: String::new(),
        }
    }

    #[test]
    fn observations_are_optional() {
        assert!(inspection().validate().is_ok());
    }

    #[test]
    fn required_fields_are_checked() {
        let mut input = inspection();
        input.location = "  ".into();
        assert!(input.validate().is_err());

        let mut input = inspection();
        input.time = "25:99".into();
        assert!(input.validate().is_err());
    }

    #[test]
    fn scheduled_at_combines_date_and_time() {
        let visit = inspection().into_visit("v-1".into());
        let expected = NaiveDate::from_ymd_opt(2024, 3, 26)
            .and_then(|d| d.and_hms_opt(10, 0, 0));
        assert_eq!(visit.scheduled_at(), expected);
    }
}
