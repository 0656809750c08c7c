use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Effort units that make up one person-month.
pub const DAYS_PER_MONTH: f64 = 20.0;

/// Opaque unique identifier for a project
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Generates a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which list a project currently belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Finished,
}

impl ProjectStatus {
    /// Lowercase key used in element ids (`active-projects`, `finished-projects-list`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Finished => write!(f, "Finished"),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            _ => Err(format!(
                "Invalid project status '{}'. Valid statuses: active, finished",
                s
            )),
        }
    }
}

/// A project on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Estimated effort in person-days
    pub effort: f64,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new active project with a freshly generated ID
    pub fn new(title: String, description: String, effort: f64) -> Self {
        Self {
            id: ProjectId::generate(),
            title,
            description,
            effort,
            status: ProjectStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// Human-readable effort, e.g. "19 person-days" or "2 person-months"
    pub fn effort_label(&self) -> String {
        effort_label(self.effort)
    }
}

/// Formats an effort estimate. Anything below 20 stays in days; 20 and up
/// is converted to months.
pub fn effort_label(effort: f64) -> String {
    if effort < DAYS_PER_MONTH {
        format!("{} person-days", effort)
    } else {
        format!("{} person-months", effort / DAYS_PER_MONTH)
    }
}
