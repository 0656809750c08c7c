//! Headless document model.
//!
//! [`Document`] is an in-memory element tree with the pieces of a browser
//! page the board relies on: templates, id and tag lookup, adjacent
//! insertion, class lists, form values, bubbling events, drag-and-drop and
//! blocking alerts.
//!
//! The document is a shared `Rc<RefCell<..>>` handle for a single thread.
//! Event listeners run with no borrow held, so a listener may freely change
//! the tree (including removing the element it was attached to).

pub mod event;
pub mod markup;

pub use event::{
    DataTransfer, DragOutcome, DropEffect, Event, EventType, TransferMode, PLAIN_TEXT,
};
pub use markup::Markup;

use crate::error::{BoardError, Result};
use std::{
    cell::RefCell,
    collections::{BTreeSet, HashMap},
    rc::Rc,
};
use tracing::warn;

/// Handle to an element in a [`Document`].
///
/// Slots are reused once an element is freed; the generation makes a stale
/// handle miss instead of reaching the new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    index: usize,
    generation: u32,
}

/// Where [`Document::insert_adjacent`] places the new element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// As the host's first child
    AfterBegin,
    /// As the host's last child
    BeforeEnd,
}

type Handler = Rc<dyn Fn(&mut Event)>;

/// Simple selector: `#id` or a tag name
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Id(String),
    Tag(String),
}

impl Selector {
    fn parse(selector: &str) -> Self {
        let selector = selector.trim();
        match selector.strip_prefix('#') {
            Some(id) => Self::Id(id.to_string()),
            None => Self::Tag(selector.to_lowercase()),
        }
    }

    fn matches(&self, node: &Node) -> bool {
        match self {
            Self::Id(id) => node.id.as_deref() == Some(id.as_str()),
            Self::Tag(tag) => &node.tag == tag,
        }
    }
}

struct Node {
    tag: String,
    id: Option<String>,
    text: String,
    value: String,
    classes: BTreeSet<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    handlers: Vec<(EventType, Handler)>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_lowercase(),
            id: None,
            text: String::new(),
            value: String::new(),
            classes: BTreeSet::new(),
            parent: None,
            children: Vec::new(),
            handlers: Vec::new(),
        }
    }

    fn describe(&self) -> String {
        match &self.id {
            Some(id) => format!("{}#{}", self.tag, id),
            None => self.tag.clone(),
        }
    }
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

struct Tree {
    slots: Vec<Slot>,
    vacant: Vec<usize>,
    body: ElementId,
    templates: HashMap<String, Vec<Markup>>,
    alerts: Vec<String>,
}

impl Tree {
    fn node(&self, el: ElementId) -> Option<&Node> {
        self.slots
            .get(el.index)
            .filter(|slot| slot.generation == el.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, el: ElementId) -> Result<&mut Node> {
        self.slots
            .get_mut(el.index)
            .filter(|slot| slot.generation == el.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(BoardError::DetachedElement)
    }

    /// Stores `node` in a vacant slot if there is one
    fn alloc(&mut self, node: Node) -> ElementId {
        if let Some(index) = self.vacant.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return ElementId {
                index,
                generation: slot.generation,
            };
        }

        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        ElementId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    fn build(&mut self, markup: &Markup, parent: Option<ElementId>) -> ElementId {
        let mut node = Node::new(&markup.tag);
        node.id = markup.id.clone();
        node.text = markup.text.clone();
        node.classes = markup.classes.iter().cloned().collect();
        node.parent = parent;
        let el = self.alloc(node);

        let children: Vec<ElementId> = markup
            .children
            .iter()
            .map(|child| self.build(child, Some(el)))
            .collect();
        if let Ok(node) = self.node_mut(el) {
            node.children = children;
        }
        el
    }

    /// Depth-first search below `root`, not including `root` itself
    fn find_descendant(&self, root: ElementId, selector: &Selector) -> Option<ElementId> {
        let node = self.node(root)?;
        for &child in &node.children {
            if self.node(child).is_some_and(|c| selector.matches(c)) {
                return Some(child);
            }
            if let Some(found) = self.find_descendant(child, selector) {
                return Some(found);
            }
        }
        None
    }

    fn detach(&mut self, el: ElementId) {
        let parent = self.node(el).and_then(|n| n.parent);
        if let Some(parent) = parent {
            if let Ok(p) = self.node_mut(parent) {
                p.children.retain(|&c| c != el);
            }
        }
        if let Ok(node) = self.node_mut(el) {
            node.parent = None;
        }
    }

    /// Frees `el` and everything below it, returning their slots for reuse
    fn free(&mut self, el: ElementId) {
        let Some(slot) = self
            .slots
            .get_mut(el.index)
            .filter(|slot| slot.generation == el.generation)
        else {
            return;
        };
        let Some(node) = slot.node.take() else {
            return;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(el.index);

        for child in node.children {
            self.free(child);
        }
    }

    fn is_attached(&self, el: ElementId) -> bool {
        let mut current = Some(el);
        while let Some(id) = current {
            if id == self.body {
                return true;
            }
            current = self.node(id).and_then(|n| n.parent);
        }
        false
    }
}

/// Shared handle to an in-memory page
#[derive(Clone)]
pub struct Document {
    tree: Rc<RefCell<Tree>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty page containing only a `body`
    pub fn new() -> Self {
        let mut tree = Tree {
            slots: Vec::new(),
            vacant: Vec::new(),
            body: ElementId {
                index: 0,
                generation: 0,
            },
            templates: HashMap::new(),
            alerts: Vec::new(),
        };
        tree.body = tree.alloc(Node::new("body"));
        Self {
            tree: Rc::new(RefCell::new(tree)),
        }
    }

    pub fn body(&self) -> ElementId {
        self.tree.borrow().body
    }

    /// Registers a `<template>` whose content is the given fragment
    pub fn register_template(
        &self,
        id: impl Into<String>,
        content: impl IntoIterator<Item = Markup>,
    ) {
        self.tree
            .borrow_mut()
            .templates
            .insert(id.into(), content.into_iter().collect());
    }

    pub fn has_template(&self, id: &str) -> bool {
        self.tree.borrow().templates.contains_key(id)
    }

    /// Deep-copies the first element of a template's content into a new,
    /// detached subtree
    pub fn import_template(&self, template_id: &str) -> Result<ElementId> {
        let mut tree = self.tree.borrow_mut();
        let root = tree
            .templates
            .get(template_id)
            .ok_or_else(|| BoardError::TemplateNotFound(template_id.to_string()))?
            .first()
            .cloned()
            .ok_or_else(|| BoardError::EmptyTemplate(template_id.to_string()))?;
        Ok(tree.build(&root, None))
    }

    /// Builds a detached element from markup
    pub fn create_element(&self, markup: &Markup) -> ElementId {
        self.tree.borrow_mut().build(markup, None)
    }

    /// Appends an element as the last child of `body`
    pub fn append_to_body(&self, el: ElementId) -> Result<()> {
        let body = self.body();
        self.insert_adjacent(body, InsertPosition::BeforeEnd, el)
    }

    /// Finds an attached element by id, in document order
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        let tree = self.tree.borrow();
        let selector = Selector::Id(id.to_string());
        tree.find_descendant(tree.body, &selector)
    }

    /// Like [`Document::get_element_by_id`] but a missing element is an error
    pub fn require_element_by_id(&self, id: &str) -> Result<ElementId> {
        self.get_element_by_id(id)
            .ok_or_else(|| BoardError::ElementNotFound(id.to_string()))
    }

    /// First descendant of `root` matching `#id` or a tag name
    pub fn query_selector(&self, root: ElementId, selector: &str) -> Option<ElementId> {
        self.tree
            .borrow()
            .find_descendant(root, &Selector::parse(selector))
    }

    /// Like [`Document::query_selector`] but a missing element is an error
    pub fn require_selector(&self, root: ElementId, selector: &str) -> Result<ElementId> {
        let tree = self.tree.borrow();
        let parent = tree.node(root).ok_or(BoardError::DetachedElement)?;
        tree.find_descendant(root, &Selector::parse(selector))
            .ok_or_else(|| BoardError::MissingChild {
                selector: selector.to_string(),
                parent: parent.describe(),
            })
    }

    /// Moves `el` under `host` at the given position
    pub fn insert_adjacent(
        &self,
        host: ElementId,
        position: InsertPosition,
        el: ElementId,
    ) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        tree.node_mut(el)?;
        tree.node_mut(host)?;
        tree.detach(el);

        let host_node = tree.node_mut(host)?;
        match position {
            InsertPosition::AfterBegin => host_node.children.insert(0, el),
            InsertPosition::BeforeEnd => host_node.children.push(el),
        }
        tree.node_mut(el)?.parent = Some(host);
        Ok(())
    }

    /// Removes and frees every child of `el`
    pub fn clear_children(&self, el: ElementId) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        let children = std::mem::take(&mut tree.node_mut(el)?.children);
        for child in children {
            tree.free(child);
        }
        Ok(())
    }

    /// Whether `el` still exists (attached or not)
    pub fn exists(&self, el: ElementId) -> bool {
        self.tree.borrow().node(el).is_some()
    }

    /// Number of arena slots, occupied or waiting for reuse
    pub fn slot_count(&self) -> usize {
        self.tree.borrow().slots.len()
    }

    /// Whether `el` is reachable from `body`
    pub fn is_attached(&self, el: ElementId) -> bool {
        self.tree.borrow().is_attached(el)
    }

    pub fn tag(&self, el: ElementId) -> Option<String> {
        self.tree.borrow().node(el).map(|n| n.tag.clone())
    }

    pub fn id(&self, el: ElementId) -> Option<String> {
        self.tree.borrow().node(el).and_then(|n| n.id.clone())
    }

    pub fn set_id(&self, el: ElementId, id: impl Into<String>) -> Result<()> {
        self.tree.borrow_mut().node_mut(el)?.id = Some(id.into());
        Ok(())
    }

    pub fn text(&self, el: ElementId) -> Option<String> {
        self.tree.borrow().node(el).map(|n| n.text.clone())
    }

    pub fn set_text(&self, el: ElementId, text: impl Into<String>) -> Result<()> {
        self.tree.borrow_mut().node_mut(el)?.text = text.into();
        Ok(())
    }

    /// Current value of a form control
    pub fn value(&self, el: ElementId) -> Option<String> {
        self.tree.borrow().node(el).map(|n| n.value.clone())
    }

    pub fn set_value(&self, el: ElementId, value: impl Into<String>) -> Result<()> {
        self.tree.borrow_mut().node_mut(el)?.value = value.into();
        Ok(())
    }

    pub fn add_class(&self, el: ElementId, class: &str) -> Result<()> {
        self.tree.borrow_mut().node_mut(el)?.classes.insert(class.to_string());
        Ok(())
    }

    pub fn remove_class(&self, el: ElementId, class: &str) -> Result<()> {
        self.tree.borrow_mut().node_mut(el)?.classes.remove(class);
        Ok(())
    }

    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.tree
            .borrow()
            .node(el)
            .is_some_and(|n| n.classes.contains(class))
    }

    pub fn children(&self, el: ElementId) -> Vec<ElementId> {
        self.tree
            .borrow()
            .node(el)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.tree.borrow().node(el).and_then(|n| n.parent)
    }

    pub fn add_event_listener(
        &self,
        el: ElementId,
        kind: EventType,
        handler: impl Fn(&mut Event) + 'static,
    ) -> Result<()> {
        self.tree
            .borrow_mut()
            .node_mut(el)?
            .handlers
            .push((kind, Rc::new(handler)));
        Ok(())
    }

    /// Delivers `event` to `target` and then to each ancestor in turn.
    /// Returns the event so the caller can inspect it afterwards.
    pub fn dispatch(&self, target: ElementId, mut event: Event) -> Event {
        event.set_target(target);
        let mut current = Some(target);

        while let Some(el) = current {
            // Collect handlers first; they may mutate the tree
            let (handlers, parent) = {
                let tree = self.tree.borrow();
                match tree.node(el) {
                    Some(node) => (
                        node.handlers
                            .iter()
                            .filter(|(kind, _)| *kind == event.kind())
                            .map(|(_, handler)| Rc::clone(handler))
                            .collect::<Vec<_>>(),
                        node.parent,
                    ),
                    None => break,
                }
            };

            event.set_current_target(el);
            for handler in handlers {
                handler(&mut event);
            }
            current = parent;
        }

        event
    }

    /// Fires a submit event on `form`. Returns `true` when a handler
    /// suppressed the default navigation.
    pub fn submit(&self, form: ElementId) -> bool {
        self.dispatch(form, Event::new(EventType::Submit))
            .default_prevented()
    }

    /// Runs a complete drag gesture from `source` to `target`.
    ///
    /// dragstart fires on the source, then dragover on the target. If the
    /// target prevents the dragover default it receives a drop, otherwise a
    /// dragleave. dragend fires on the source last, unless a handler removed
    /// the source along the way.
    pub fn drag_and_drop(&self, source: ElementId, target: ElementId) -> DragOutcome {
        let start = self.dispatch(
            source,
            Event::new(EventType::DragStart).with_data_transfer(DataTransfer::new()),
        );
        if start.default_prevented() {
            return DragOutcome::Cancelled;
        }
        let mut transfer = start.into_data_transfer().unwrap_or_default();

        transfer.set_mode(TransferMode::Protected);
        let over = self.dispatch(
            target,
            Event::new(EventType::DragOver).with_data_transfer(transfer),
        );
        let accepted = over.default_prevented();
        let mut transfer = over.into_data_transfer().unwrap_or_default();

        let outcome = if accepted {
            transfer.set_mode(TransferMode::ReadOnly);
            let drop = self.dispatch(
                target,
                Event::new(EventType::Drop).with_data_transfer(transfer),
            );
            transfer = drop.into_data_transfer().unwrap_or_default();
            DragOutcome::Dropped
        } else {
            let leave = self.dispatch(
                target,
                Event::new(EventType::DragLeave).with_data_transfer(transfer),
            );
            transfer = leave.into_data_transfer().unwrap_or_default();
            DragOutcome::Rejected
        };

        transfer.set_mode(TransferMode::Protected);
        if self.exists(source) {
            self.dispatch(
                source,
                Event::new(EventType::DragEnd).with_data_transfer(transfer),
            );
        }
        outcome
    }

    /// Shows a blocking message to the user
    pub fn alert(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(%message, "alert");
        self.tree.borrow_mut().alerts.push(message);
    }

    /// Every alert raised so far
    pub fn alerts(&self) -> Vec<String> {
        self.tree.borrow().alerts.clone()
    }

    /// Returns and clears the raised alerts
    pub fn take_alerts(&self) -> Vec<String> {
        std::mem::take(&mut self.tree.borrow_mut().alerts)
    }
}
