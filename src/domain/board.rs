use crate::{
    domain::project::ProjectStatus,
    error::{BoardError, Result},
};
use serde::{de::Error as _, Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for one project list on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub heading: String,
    pub status: ProjectStatus,
}

impl Column {
    pub fn new(heading: impl Into<String>, status: ProjectStatus) -> Self {
        Self {
            heading: heading.into(),
            status,
        }
    }

    /// Id of the list's root element, e.g. `active-projects`
    pub fn element_id(&self) -> String {
        format!("{}-projects", self.status.as_str())
    }

    /// Id of the `ul` receiving the cards, e.g. `active-projects-list`
    pub fn list_id(&self) -> String {
        format!("{}-projects-list", self.status.as_str())
    }
}

/// Template ids the view components instantiate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateIds {
    pub input: String,
    pub list: String,
    pub item: String,
}

impl Default for TemplateIds {
    fn default() -> Self {
        Self {
            input: "project-input".to_string(),
            list: "project-list".to_string(),
            item: "single-project".to_string(),
        }
    }
}

/// Element ids inside the input form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    pub form: String,
    pub title: String,
    pub description: String,
    pub effort: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            form: "user-input".to_string(),
            title: "title".to_string(),
            description: "description".to_string(),
            effort: "manday".to_string(),
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub host_id: String,
    pub templates: TemplateIds,
    pub fields: FormFields,
    pub columns: Vec<Column>,
    pub invalid_input_message: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            host_id: "app".to_string(),
            templates: TemplateIds::default(),
            fields: FormFields::default(),
            columns: vec![
                Column::new("Active Projects", ProjectStatus::Active),
                Column::new("Finished Projects", ProjectStatus::Finished),
            ],
            invalid_input_message: "Invalid input, please try again.".to_string(),
        }
    }
}

impl BoardConfig {
    /// Parses a JSON override; keys that are left out keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects a board with two columns for the same status
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.status) {
                return Err(BoardError::ConfigError(serde_json::Error::custom(format!(
                    "duplicate column for status '{}'",
                    column.status
                ))));
            }
        }
        Ok(())
    }

    /// Gets the column configuration for a status
    pub fn column_for_status(&self, status: ProjectStatus) -> Option<&Column> {
        self.columns.iter().find(|col| col.status == status)
    }
}
