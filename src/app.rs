use crate::{
    dom::Document,
    domain::{BoardConfig, ProjectStatus},
    error::Result,
    store::ProjectStore,
    view::{ProjectInput, ProjectList},
};
use std::rc::Rc;
use tracing::debug;

/// A mounted board: one store, the input form and one list per column.
///
/// Dropping the board drops the components; their listeners stay registered
/// on the document but do nothing afterwards.
pub struct ProjectBoard {
    document: Document,
    store: ProjectStore,
    config: BoardConfig,
    input: Rc<ProjectInput>,
    lists: Vec<Rc<ProjectList>>,
}

impl ProjectBoard {
    /// Mounts every component into `document`. An invalid config or any
    /// missing template, host or required child element fails the whole mount.
    pub fn mount(document: &Document, config: BoardConfig) -> Result<Self> {
        config.validate()?;
        let store = ProjectStore::new();
        let input = ProjectInput::new(document, &store, &config)?;
        let lists = config
            .columns
            .iter()
            .map(|column| ProjectList::new(document, &store, &config, column.clone()))
            .collect::<Result<Vec<_>>>()?;

        debug!(columns = lists.len(), host = %config.host_id, "board mounted");

        Ok(Self {
            document: document.clone(),
            store,
            config,
            input,
            lists,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn input(&self) -> &ProjectInput {
        &self.input
    }

    pub fn lists(&self) -> &[Rc<ProjectList>] {
        &self.lists
    }

    /// The list showing projects with `status`, if the board has one
    pub fn list(&self, status: ProjectStatus) -> Option<&ProjectList> {
        self.lists
            .iter()
            .find(|list| list.status() == status)
            .map(|list| list.as_ref())
    }
}
