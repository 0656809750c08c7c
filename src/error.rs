use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template has no root element: {0}")]
    EmptyTemplate(String),

    #[error("Element not found: #{0}")]
    ElementNotFound(String),

    #[error("No element matching '{selector}' inside {parent}")]
    MissingChild { selector: String, parent: String },

    #[error("Element is no longer attached to the document")]
    DetachedElement,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] serde_json::Error),
}
