//! View components.
//!
//! Each component is mounted through [`Component::mount`]: look up a
//! template and a [`Host`], instantiate the template, optionally give the new
//! root an id and attach it to the host. Components then wire their own
//! listeners and fill in their text.
//!
//! Listeners hold a `Weak` reference back to their component. The owner
//! (usually [`crate::ProjectBoard`]) keeps the component alive.

pub mod input;
pub mod item;
pub mod list;

pub use input::ProjectInput;
pub use item::ProjectItem;
pub use list::ProjectList;

use crate::{
    dom::{Document, ElementId, Event, EventType, InsertPosition},
    error::{BoardError, Result},
};
use std::rc::{Rc, Weak};

/// The element a component attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Host<'a> {
    /// Looked up by id among attached elements
    Id(&'a str),
    /// An element the caller already holds
    Element(ElementId),
}

/// Where and how a component attaches itself
#[derive(Debug, Clone)]
pub struct ComponentSpec<'a> {
    pub template_id: &'a str,
    pub host: Host<'a>,
    pub position: InsertPosition,
    pub element_id: Option<String>,
}

/// A template instance attached to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub host: ElementId,
    pub element: ElementId,
}

impl Component {
    pub fn mount(doc: &Document, spec: ComponentSpec<'_>) -> Result<Self> {
        if !doc.has_template(spec.template_id) {
            return Err(BoardError::TemplateNotFound(spec.template_id.to_string()));
        }
        let host = match spec.host {
            Host::Id(id) => doc.require_element_by_id(id)?,
            Host::Element(el) if doc.exists(el) => el,
            Host::Element(_) => return Err(BoardError::DetachedElement),
        };
        let element = doc.import_template(spec.template_id)?;

        if let Some(id) = spec.element_id {
            doc.set_id(element, id)?;
        }
        doc.insert_adjacent(host, spec.position, element)?;

        Ok(Self { host, element })
    }
}

/// Something the user can pick up and drag
pub trait Draggable {
    fn drag_start(&self, event: &mut Event);
    fn drag_end(&self, event: &mut Event);
}

/// Something that can receive a dragged element
pub trait DragTarget {
    fn drag_over(&self, event: &mut Event);
    fn drop(&self, event: &mut Event);
    fn drag_leave(&self, event: &mut Event);
}

/// Registers a listener that forwards to `method` while `component` is alive
fn bind<T: 'static>(
    doc: &Document,
    el: ElementId,
    kind: EventType,
    component: &Rc<T>,
    method: fn(&T, &mut Event),
) -> Result<()> {
    let weak: Weak<T> = Rc::downgrade(component);
    doc.add_event_listener(el, kind, move |event| {
        if let Some(component) = weak.upgrade() {
            method(&component, event);
        }
    })
}

pub(crate) fn bind_draggable<T: Draggable + 'static>(
    doc: &Document,
    el: ElementId,
    component: &Rc<T>,
) -> Result<()> {
    bind(doc, el, EventType::DragStart, component, T::drag_start)?;
    bind(doc, el, EventType::DragEnd, component, T::drag_end)
}

pub(crate) fn bind_drag_target<T: DragTarget + 'static>(
    doc: &Document,
    el: ElementId,
    component: &Rc<T>,
) -> Result<()> {
    bind(doc, el, EventType::DragOver, component, T::drag_over)?;
    bind(doc, el, EventType::Drop, component, <T as DragTarget>::drop)?;
    bind(doc, el, EventType::DragLeave, component, T::drag_leave)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Markup;

    fn page() -> Document {
        let doc = Document::new();
        let app = doc.create_element(&Markup::new("div").id("app"));
        doc.append_to_body(app).unwrap();
        doc.register_template("box", vec![Markup::new("section").child(Markup::new("h2"))]);
        doc
    }

    #[test]
    fn test_mount_attaches_with_id() {
        let doc = page();
        let component = Component::mount(
            &doc,
            ComponentSpec {
                template_id: "box",
                host: Host::Id("app"),
                position: InsertPosition::BeforeEnd,
                element_id: Some("first-box".to_string()),
            },
        )
        .unwrap();

        assert_eq!(doc.get_element_by_id("first-box"), Some(component.element));
        assert_eq!(doc.parent(component.element), Some(component.host));
    }

    #[test]
    fn test_mount_at_start() {
        let doc = page();
        let spec = |position, id: &str| ComponentSpec {
            template_id: "box",
            host: Host::Id("app"),
            position,
            element_id: Some(id.to_string()),
        };
        let a = Component::mount(&doc, spec(InsertPosition::BeforeEnd, "a")).unwrap();
        let b = Component::mount(&doc, spec(InsertPosition::AfterBegin, "b")).unwrap();

        assert_eq!(doc.children(a.host), vec![b.element, a.element]);
    }

    #[test]
    fn test_mount_missing_template_or_host() {
        let doc = page();
        let missing_template = Component::mount(
            &doc,
            ComponentSpec {
                template_id: "nope",
                host: Host::Id("app"),
                position: InsertPosition::BeforeEnd,
                element_id: None,
            },
        );
        assert!(matches!(missing_template, Err(BoardError::TemplateNotFound(_))));

        let missing_host = Component::mount(
            &doc,
            ComponentSpec {
                template_id: "box",
                host: Host::Id("nowhere"),
                position: InsertPosition::BeforeEnd,
                element_id: None,
            },
        );
        assert!(matches!(missing_host, Err(BoardError::ElementNotFound(_))));
    }

    #[test]
    fn test_mount_into_held_element() {
        let doc = page();
        // Two hosts sharing an id; the held handle decides which one is used
        let first = doc.create_element(&Markup::new("ul").id("cards"));
        let second = doc.create_element(&Markup::new("ul").id("cards"));
        doc.append_to_body(first).unwrap();
        doc.append_to_body(second).unwrap();

        let component = Component::mount(
            &doc,
            ComponentSpec {
                template_id: "box",
                host: Host::Element(second),
                position: InsertPosition::BeforeEnd,
                element_id: None,
            },
        )
        .unwrap();

        assert_eq!(component.host, second);
        assert!(doc.children(first).is_empty());
        assert_eq!(doc.children(second), vec![component.element]);
    }

    #[test]
    fn test_mount_into_freed_element_fails() {
        let doc = page();
        let app = doc.get_element_by_id("app").unwrap();
        let gone = doc.create_element(&Markup::new("ul"));
        doc.insert_adjacent(app, InsertPosition::BeforeEnd, gone).unwrap();
        doc.clear_children(app).unwrap();

        let result = Component::mount(
            &doc,
            ComponentSpec {
                template_id: "box",
                host: Host::Element(gone),
                position: InsertPosition::BeforeEnd,
                element_id: None,
            },
        );
        assert!(matches!(result, Err(BoardError::DetachedElement)));
    }

    #[test]
    fn test_listener_stops_after_component_dropped() {
        use std::cell::Cell;

        struct Counter(Cell<u32>);
        impl Draggable for Counter {
            fn drag_start(&self, _event: &mut Event) {
                self.0.set(self.0.get() + 1);
            }
            fn drag_end(&self, _event: &mut Event) {}
        }

        let doc = page();
        let el = doc.get_element_by_id("app").unwrap();
        let counter = Rc::new(Counter(Cell::new(0)));
        bind_draggable(&doc, el, &counter).unwrap();

        doc.dispatch(el, Event::new(EventType::DragStart));
        assert_eq!(counter.0.get(), 1);

        let weak = Rc::downgrade(&counter);
        drop(counter);
        doc.dispatch(el, Event::new(EventType::DragStart));
        assert!(weak.upgrade().is_none());
    }
}
