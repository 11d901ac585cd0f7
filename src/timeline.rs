use crate::error::{AppError, Result};
use crate::lenient::{self, string_enum};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

string_enum! {
    pub enum TaskStatus {
        Pending => "pending",
        InProgress => "in_progress",
        Completed => "completed",
    }
    default Pending
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "lenient::number")]
    pub progress: f64,
}

/// A named stage of a project's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    #[serde(default, deserialize_with = "lenient::string")]
    pub phase: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub end_date: Option<NaiveDate>,
    /// Mean of task progress; recomputed on every timeline change.
    #[serde(default, deserialize_with = "lenient::number")]
    pub progress: f64,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub milestones: Vec<Milestone>,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub tasks: Vec<Task>,
}

/// Phase form input, submitted with its milestones and tasks in one go.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDraft {
    pub phase: String,
    #[serde(default, deserialize_with = "lenient::date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Task {
    pub fn new(name: impl Into<String>, status: TaskStatus, progress: f64) -> Self {
        Self {
            name: name.into(),
            status,
            progress,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid("task name cannot be empty"));
        }
        if !(0.0..=100.0).contains(&self.progress) {
            return Err(AppError::invalid(format!(
                "task progress must be within 0-100, got {}",
                self.progress
            )));
        }
        Ok(())
    }
}

impl Milestone {
    pub fn validate(&self) -> Result<()> {
        if self.date.is_none() {
            return Err(AppError::invalid("milestone date is required"));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::invalid("milestone description cannot be empty"));
        }
        Ok(())
    }
}

impl PhaseDraft {
    pub fn validate(&self) -> Result<()> {
        if self.phase.trim().is_empty() {
            return Err(AppError::invalid("phase name cannot be empty"));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(AppError::invalid(format!(
                    "phase ends {} before it starts {}",
                    end, start
                )));
            }
        }
        self.milestones.iter().try_for_each(Milestone::validate)?;
        self.tasks.iter().try_for_each(Task::validate)
    }

    /// Progress is left at zero; the repository recomputes it on commit.
    pub fn into_phase(self) -> Phase {
        Phase {
            phase: self.phase.trim().to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            progress: 0.0,
            milestones: self.milestones,
            tasks: self.tasks,
        }
    }
}

impl Phase {
    pub fn is_complete(&self) -> bool {
        self.progress >= 100.0
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= day && day <= end,
            (Some(start), None) => start <= day,
            (None, Some(end)) => day <= end,
            (None, None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_validation_checks_children() {
        let mut draft = PhaseDraft {
            phase: "Fundação".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 15),
            milestones: vec![],
            tasks: vec![Task::new("Escavação", TaskStatus::Completed, 100.0)],
        };
        assert!(draft.validate().is_ok());

        draft.tasks.push(Task::new("Armação", TaskStatus::InProgress, 120.0));
        assert!(draft.validate().is_err());
    }

    #[test]
    fn legacy_progress_strings_decode() {
        let phase: Phase = serde_json::from_str(
            r#"{"phase": "Estrutura", "progress": "53.33",
                "tasks": [{"name": "Laje", "status": "in_progress", "progress": "60"}]}"#,
        )
        .unwrap();
        assert_eq!(phase.progress, 53.33);
        assert_eq!(phase.tasks[0].progress, 60.0);
        assert!(phase.milestones.is_empty());
    }

    #[test]
    fn contains_is_inclusive() {
        let phase = PhaseDraft {
            phase: "Acabamento".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 31),
            ..Default::default()
        }
        .into_phase();
        assert!(phase.contains(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
        assert!(!phase.contains(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
    }
}
