pub mod board;
pub mod project;
pub mod validation;

pub use board::{BoardConfig, Column, FormFields, TemplateIds};
pub use project::{effort_label, Project, ProjectId, ProjectStatus, DAYS_PER_MONTH};
pub use validation::{validate, FieldValue, Validatable};
