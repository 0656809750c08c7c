use crate::{
    dom::{Document, ElementId, Event, InsertPosition, PLAIN_TEXT},
    domain::{BoardConfig, Column, Project, ProjectId, ProjectStatus},
    error::{BoardError, Result},
    store::ProjectStore,
    view::{bind_drag_target, Component, ComponentSpec, DragTarget, Host, ProjectItem},
};
use std::{cell::RefCell, rc::Rc};
use tracing::{debug, error};

/// CSS class shown while a compatible drag hovers over the list
pub const DROPPABLE_CLASS: &str = "droppable";

/// A list of all projects with one status, and the drop target that moves
/// projects into that status
pub struct ProjectList {
    doc: Document,
    store: ProjectStore,
    column: Column,
    item_template: String,
    component: Component,
    list_element: ElementId,
    assigned: RefCell<Vec<Project>>,
    items: RefCell<Vec<Rc<ProjectItem>>>,
}

impl ProjectList {
    pub fn new(
        doc: &Document,
        store: &ProjectStore,
        config: &BoardConfig,
        column: Column,
    ) -> Result<Rc<Self>> {
        // Cards are built on every notification; check their template up front
        if !doc.has_template(&config.templates.item) {
            return Err(BoardError::TemplateNotFound(config.templates.item.clone()));
        }

        let component = Component::mount(
            doc,
            ComponentSpec {
                template_id: &config.templates.list,
                host: Host::Id(&config.host_id),
                position: InsertPosition::BeforeEnd,
                element_id: Some(column.element_id()),
            },
        )?;
        let list_element = doc.require_selector(component.element, "ul")?;

        let list = Rc::new(Self {
            doc: doc.clone(),
            store: store.clone(),
            column,
            item_template: config.templates.item.clone(),
            component,
            list_element,
            assigned: RefCell::new(Vec::new()),
            items: RefCell::new(Vec::new()),
        });

        bind_drag_target(doc, component.element, &list)?;
        let weak = Rc::downgrade(&list);
        store.subscribe(move |projects| {
            if let Some(list) = weak.upgrade() {
                list.on_projects_changed(projects);
            }
        });
        list.render_content()?;

        Ok(list)
    }

    pub fn status(&self) -> ProjectStatus {
        self.column.status
    }

    pub fn element(&self) -> ElementId {
        self.component.element
    }

    /// The `ul` that holds the cards
    pub fn list_element(&self) -> ElementId {
        self.list_element
    }

    /// Projects currently shown, in store order
    pub fn assigned_projects(&self) -> Vec<Project> {
        self.assigned.borrow().clone()
    }

    /// Card element for a project shown in this list
    pub fn card_for(&self, id: &ProjectId) -> Option<ElementId> {
        self.items
            .borrow()
            .iter()
            .find(|item| &item.project().id == id)
            .map(|item| item.element())
    }

    fn render_content(&self) -> Result<()> {
        self.doc.set_id(self.list_element, self.column.list_id())?;
        let heading = self.doc.require_selector(self.component.element, "h2")?;
        self.doc.set_text(heading, self.column.heading.as_str())
    }

    fn on_projects_changed(&self, projects: Vec<Project>) {
        let relevant: Vec<Project> = projects
            .into_iter()
            .filter(|p| p.status == self.column.status)
            .collect();
        *self.assigned.borrow_mut() = relevant;

        if let Err(err) = self.render_projects() {
            error!(list = %self.column.status, %err, "failed to render projects");
        }
    }

    /// Rebuilds every card from the assigned projects
    fn render_projects(&self) -> Result<()> {
        self.items.borrow_mut().clear();
        self.doc.clear_children(self.list_element)?;

        let assigned = self.assigned.borrow().clone();
        debug!(list = %self.column.status, count = assigned.len(), "rendering projects");

        let mut items = Vec::with_capacity(assigned.len());
        for project in assigned {
            items.push(ProjectItem::new(
                &self.doc,
                &self.item_template,
                self.list_element,
                project,
            )?);
        }
        *self.items.borrow_mut() = items;
        Ok(())
    }

    fn set_droppable(&self, droppable: bool) {
        let result = if droppable {
            self.doc.add_class(self.list_element, DROPPABLE_CLASS)
        } else {
            self.doc.remove_class(self.list_element, DROPPABLE_CLASS)
        };
        if let Err(err) = result {
            error!(list = %self.column.status, %err, "failed to toggle drop highlight");
        }
    }
}

impl DragTarget for ProjectList {
    fn drag_over(&self, event: &mut Event) {
        let accepts = event
            .data_transfer()
            .is_some_and(|dt| dt.types().first() == Some(&PLAIN_TEXT));
        if accepts {
            event.prevent_default();
            self.set_droppable(true);
        }
    }

    fn drop(&self, event: &mut Event) {
        let Some(payload) = event.data_transfer().map(|dt| dt.get_data(PLAIN_TEXT)) else {
            return;
        };
        self.set_droppable(false);
        self.store
            .move_project(&ProjectId::from(payload), self.column.status);
    }

    fn drag_leave(&self, _event: &mut Event) {
        self.set_droppable(false);
    }
}
