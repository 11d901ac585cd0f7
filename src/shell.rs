//! Which section and project the window is showing, persisted between runs.

use crate::error::{AppError, Result};
use crate::project::Project;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Dashboard,
    Projects,
    Materials,
    Visits,
    Reports,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectTab {
    #[default]
    Overview,
    Timeline,
    Documents,
    Photos,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "projectId")]
pub enum ViewMode {
    #[default]
    Overview,
    Project(String),
}

impl ViewMode {
    pub fn project_id(&self) -> Option<&str> {
        match self {
            ViewMode::Overview => None,
            ViewMode::Project(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    #[serde(default)]
    pub section: Section,
    #[serde(default)]
    pub dashboard: ViewMode,
    #[serde(default)]
    pub projects: ViewMode,
    #[serde(default)]
    pub materials: ViewMode,
    #[serde(default)]
    pub visits: ViewMode,
    #[serde(default)]
    pub reports: ViewMode,
    #[serde(default)]
    pub project_tab: ProjectTab,
    #[serde(default)]
    pub last_saved_at: i64,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            section: Section::default(),
            dashboard: ViewMode::default(),
            projects: ViewMode::default(),
            materials: ViewMode::default(),
            visits: ViewMode::default(),
            reports: ViewMode::default(),
            project_tab: ProjectTab::default(),
            last_saved_at: chrono::Utc::now().timestamp(),
        }
    }
}

impl Navigation {
    pub fn mode(&self, section: Section) -> &ViewMode {
        match section {
            Section::Dashboard => &self.dashboard,
            Section::Projects => &self.projects,
            Section::Materials => &self.materials,
            Section::Visits => &self.visits,
            Section::Reports => &self.reports,
        }
    }

    fn mode_mut(&mut self, section: Section) -> &mut ViewMode {
        match section {
            Section::Dashboard => &mut self.dashboard,
            Section::Projects => &mut self.projects,
            Section::Materials => &mut self.materials,
            Section::Visits => &mut self.visits,
            Section::Reports => &mut self.reports,
        }
    }

    fn modes_mut(&mut self) -> [&mut ViewMode; 5] {
        [
            &mut self.dashboard,
            &mut self.projects,
            &mut self.materials,
            &mut self.visits,
            &mut self.reports,
        ]
    }

    pub fn select_section(&mut self, section: Section) {
        self.section = section;
    }

    pub fn show_overview(&mut self, section: Section) {
        *self.mode_mut(section) = ViewMode::Overview;
    }

    /// Opens `project_id` in `section`. The project tab starts over at
    /// [`ProjectTab::Overview`].
    pub fn select_project(
        &mut self,
        projects: &[Project],
        section: Section,
        project_id: &str,
    ) -> Result<()> {
        if !projects.iter().any(|p| p.id == project_id) {
            return Err(AppError::Navigation(format!("no project {}", project_id)));
        }
        self.section = section;
        *self.mode_mut(section) = ViewMode::Project(project_id.to_string());
        if section == Section::Projects {
            self.project_tab = ProjectTab::Overview;
        }
        Ok(())
    }

    /// Only available while a project is open in the projects section.
    pub fn select_tab(&mut self, tab: ProjectTab) -> Result<()> {
        if self.projects.project_id().is_none() {
            return Err(AppError::Navigation(
                "select a project before switching tabs".to_string(),
            ));
        }
        self.project_tab = tab;
        Ok(())
    }

    /// Falls back to the overview wherever a project that no longer exists
    /// is open. Returns whether anything changed.
    pub fn retain_existing(&mut self, projects: &[Project]) -> bool {
        let mut changed = false;
        for mode in self.modes_mut() {
            let gone = mode
                .project_id()
                .is_some_and(|id| !projects.iter().any(|p| p.id == id));
            if gone {
                *mode = ViewMode::Overview;
                changed = true;
            }
        }
        if self.projects == ViewMode::Overview {
            self.project_tab = ProjectTab::Overview;
        }
        changed
    }
}

pub fn save_navigation_state(state: &Navigation, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut state = state.clone();
    state.last_saved_at = chrono::Utc::now().timestamp();
    fs::write(path, serde_json::to_string_pretty(&state)?)?;
    Ok(())
}

/// Applies `change` to a copy of `current` and persists it at `path`.
/// `current` is replaced only once both succeeded.
pub fn commit_navigation<F>(current: &mut Navigation, path: &Path, change: F) -> Result<Navigation>
where
    F: FnOnce(&mut Navigation) -> Result<()>,
{
    let mut next = current.clone();
    change(&mut next)?;
    save_navigation_state(&next, path)?;
    *current = next;
    Ok(current.clone())
}

pub fn load_navigation_state(path: &Path) -> Result<Option<Navigation>> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&json)?))
}

pub fn clear_navigation_state(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectDetails;

    fn projects() -> Vec<Project> {
        vec![Project::new(ProjectDetails {
            name: "Edifício Horizonte".into(),
            ..Default::default()
        })]
    }

    #[test]
    fn tabs_need_a_selected_project() {
        let projects = projects();
        let mut nav = Navigation::default();
        assert!(matches!(
            nav.select_tab(ProjectTab::Photos),
            Err(AppError::Navigation(_))
        ));

        nav.select_project(&projects, Section::Projects, &projects[0].id)
            .unwrap();
        nav.select_tab(ProjectTab::Photos).unwrap();
        assert_eq!(nav.project_tab, ProjectTab::Photos);

        nav.select_project(&projects, Section::Projects, &projects[0].id)
            .unwrap();
        assert_eq!(nav.project_tab, ProjectTab::Overview);
    }

    #[test]
    fn unknown_project_cannot_be_selected() {
        let mut nav = Navigation::default();
        assert!(nav.select_project(&projects(), Section::Reports, "nope").is_err());
        assert_eq!(nav.section, Section::Dashboard);
    }

    #[test]
    fn sections_keep_their_own_mode() {
        let projects = projects();
        let mut nav = Navigation::default();
        nav.select_project(&projects, Section::Materials, &projects[0].id)
            .unwrap();
        nav.select_section(Section::Visits);
        assert_eq!(nav.mode(Section::Visits), &ViewMode::Overview);
        assert_eq!(nav.mode(Section::Materials).project_id(), Some(projects[0].id.as_str()));
        nav.show_overview(Section::Materials);
        assert_eq!(nav.mode(Section::Materials), &ViewMode::Overview);
    }

    #[test]
    fn deleted_projects_are_forgotten() {
        let projects = projects();
        let mut nav = Navigation::default();
        nav.select_project(&projects, Section::Projects, &projects[0].id)
            .unwrap();
        nav.select_tab(ProjectTab::Timeline).unwrap();
        assert!(!nav.retain_existing(&projects));
        assert!(nav.retain_existing(&[]));
        assert_eq!(nav.projects, ViewMode::Overview);
        assert_eq!(nav.project_tab, ProjectTab::Overview);
    }

    #[test]
    fn unsaved_changes_are_not_applied() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let unwritable = blocker.join("navigation.json");

        let projects = projects();
        let mut nav = Navigation::default();
        let before = nav.clone();
        let result = commit_navigation(&mut nav, &unwritable, |n| {
            n.select_project(&projects, Section::Visits, &projects[0].id)
        });
        assert!(result.is_err());
        assert_eq!(nav, before);

        let path = dir.path().join("navigation.json");
        let saved = commit_navigation(&mut nav, &path, |n| {
            n.select_section(Section::Materials);
            Ok(())
        })
        .unwrap();
        assert_eq!(nav.section, Section::Materials);
        assert_eq!(saved, nav);
        assert!(path.exists());
    }

    #[test]
    fn state_file_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navigation.json");
        assert_eq!(load_navigation_state(&path).unwrap(), None);

        let projects = projects();
        let mut nav = Navigation::default();
        nav.select_project(&projects, Section::Reports, &projects[0].id)
            .unwrap();
        save_navigation_state(&nav, &path).unwrap();

        let loaded = load_navigation_state(&path).unwrap().unwrap();
        assert_eq!(loaded.section, Section::Reports);
        assert_eq!(loaded.reports, nav.reports);

        clear_navigation_state(&path).unwrap();
        assert!(!path.exists());
        clear_navigation_state(&path).unwrap();
    }
}
