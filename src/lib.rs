//! # Project Board
//!
//! An in-memory project board. Projects are added through a form, shown as
//! cards in an "active" list and dragged into a "finished" list.
//!
//! The crate is split into the observable [`ProjectStore`], the pure domain
//! types and validation in [`domain`], a headless page model in [`dom`] and
//! the view components in [`view`] that render store snapshots into it.
//! [`ProjectBoard`] wires all of them together.

pub mod app;
pub mod dom;
pub mod domain;
pub mod error;
pub mod layout;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use app::ProjectBoard;
pub use dom::{Document, DragOutcome, ElementId};
pub use domain::{
    board::{BoardConfig, Column},
    project::{Project, ProjectId, ProjectStatus},
    validation::{validate, Validatable},
};
pub use error::{BoardError, Result};
pub use layout::standard_document;
pub use store::ProjectStore;
