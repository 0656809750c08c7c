use crate::{
    dom::{Document, DropEffect, ElementId, Event, InsertPosition, PLAIN_TEXT},
    domain::Project,
    error::Result,
    view::{bind_draggable, Component, ComponentSpec, Draggable, Host},
};
use std::rc::Rc;
use tracing::debug;

/// A draggable card showing one project
pub struct ProjectItem {
    component: Component,
    project: Project,
}

impl ProjectItem {
    /// Appends a card for `project` to `host`
    pub fn new(
        doc: &Document,
        template_id: &str,
        host: ElementId,
        project: Project,
    ) -> Result<Rc<Self>> {
        let component = Component::mount(
            doc,
            ComponentSpec {
                template_id,
                host: Host::Element(host),
                position: InsertPosition::BeforeEnd,
                element_id: Some(project.id.to_string()),
            },
        )?;

        let item = Rc::new(Self { component, project });
        item.render_content(doc)?;
        bind_draggable(doc, component.element, &item)?;
        Ok(item)
    }

    pub fn element(&self) -> ElementId {
        self.component.element
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    fn render_content(&self, doc: &Document) -> Result<()> {
        let root = self.component.element;
        doc.set_text(doc.require_selector(root, "h2")?, self.project.title.as_str())?;
        doc.set_text(doc.require_selector(root, "h3")?, self.project.effort_label())?;
        doc.set_text(doc.require_selector(root, "p")?, self.project.description.as_str())?;
        Ok(())
    }
}

impl Draggable for ProjectItem {
    fn drag_start(&self, event: &mut Event) {
        if let Some(transfer) = event.data_transfer_mut() {
            transfer.set_data(PLAIN_TEXT, self.project.id.as_str());
            transfer.set_effect_allowed(DropEffect::Move);
        }
    }

    fn drag_end(&self, _event: &mut Event) {
        debug!(project_id = %self.project.id, "drag ended");
    }
}
