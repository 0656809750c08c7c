//! Observable project store.
//!
//! [`ProjectStore`] is the single owner of the project sequence. It is a
//! cheap `Rc` handle: clone it into every component that needs it, and all
//! clones see the same state.
//!
//! # Invariants
//!
//! 1. Projects keep insertion order and ids are unique.
//! 2. Every mutation that changes state notifies all listeners, in
//!    subscription order, each with its own copy of the sequence.
//! 3. Moving a project to the status it already has, or moving an unknown
//!    id, is a no-op and notifies nobody.

use crate::domain::{Project, ProjectId, ProjectStatus};
use std::{cell::RefCell, rc::Rc};
use tracing::{debug, trace};

/// Callback receiving a snapshot of the collection
pub type Listener<T> = Rc<dyn Fn(Vec<T>)>;

/// Ordered set of listeners for a collection of `T`
struct Listeners<T> {
    listeners: Vec<Listener<T>>,
}

impl<T: Clone> Listeners<T> {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    fn add(&mut self, listener: Listener<T>) {
        self.listeners.push(listener);
    }

    fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Clones the listener handles so they can be invoked without holding a borrow
    fn handles(&self) -> Vec<Listener<T>> {
        self.listeners.clone()
    }
}

impl<T: Clone> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct StoreState {
    projects: Vec<Project>,
    listeners: Listeners<Project>,
}

/// Shared handle to the project store
#[derive(Clone, Default)]
pub struct ProjectStore {
    state: Rc<RefCell<StoreState>>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. There is no way to unsubscribe.
    pub fn subscribe(&self, listener: impl Fn(Vec<Project>) + 'static) {
        self.state.borrow_mut().listeners.add(Rc::new(listener));
    }

    /// Appends a new active project and notifies listeners.
    ///
    /// No validation happens here; callers check their input first.
    pub fn add(&self, title: String, description: String, effort: f64) -> ProjectId {
        let project = Project::new(title, description, effort);
        let id = project.id.clone();
        debug!(project_id = %id, title = %project.title, "project added");

        self.state.borrow_mut().projects.push(project);
        self.notify();
        id
    }

    /// Moves a project to `new_status`. Returns `true` if the status changed.
    pub fn move_project(&self, id: &ProjectId, new_status: ProjectStatus) -> bool {
        let changed = {
            let mut state = self.state.borrow_mut();
            match state.projects.iter_mut().find(|p| &p.id == id) {
                Some(project) if project.status != new_status => {
                    debug!(
                        project_id = %id,
                        from = %project.status,
                        to = %new_status,
                        "project moved"
                    );
                    project.status = new_status;
                    true
                }
                Some(_) => {
                    trace!(
                        project_id = %id,
                        status = %new_status,
                        "status unchanged, ignoring move"
                    );
                    false
                }
                None => {
                    trace!(project_id = %id, "unknown project, ignoring move");
                    false
                }
            }
        };

        if changed {
            self.notify();
        }
        changed
    }

    /// Returns a copy of all projects in insertion order
    pub fn snapshot(&self) -> Vec<Project> {
        self.state.borrow().projects.clone()
    }

    /// Looks up a project by id
    pub fn get(&self, id: &ProjectId) -> Option<Project> {
        self.state
            .borrow()
            .projects
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().projects.is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    fn notify(&self) {
        // Release the borrow before calling out so listeners can read the store
        let (listeners, projects) = {
            let state = self.state.borrow();
            (state.listeners.handles(), state.projects.clone())
        };

        for listener in listeners {
            listener(projects.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn recording_store() -> (ProjectStore, Rc<RefCell<Vec<Vec<Project>>>>) {
        let store = ProjectStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |projects| sink.borrow_mut().push(projects));
        (store, seen)
    }

    #[test]
    fn test_add_notifies_with_new_project() {
        let (store, seen) = recording_store();

        let id = store.add("Build API".to_string(), "Initial backend work".to_string(), 10.0);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].len(), 1);
        let project = &seen[0][0];
        assert_eq!(project.id, id);
        assert_eq!(project.title, "Build API");
        assert_eq!(project.description, "Initial backend work");
        assert_eq!(project.effort, 10.0);
        assert_eq!(project.status, ProjectStatus::Active);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let store = ProjectStore::new();
        store.add("A".to_string(), "first one".to_string(), 1.0);
        store.add("B".to_string(), "second one".to_string(), 2.0);
        store.add("C".to_string(), "third one".to_string(), 3.0);

        let titles: Vec<_> = store.snapshot().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_move_changes_status_and_notifies() {
        let (store, seen) = recording_store();
        let id = store.add("A".to_string(), "first one".to_string(), 1.0);

        assert!(store.move_project(&id, ProjectStatus::Finished));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1][0].status, ProjectStatus::Finished);
    }

    #[test]
    fn test_move_to_same_status_is_noop() {
        let (store, seen) = recording_store();
        let id = store.add("A".to_string(), "first one".to_string(), 1.0);
        let before = store.snapshot();

        assert!(!store.move_project(&id, ProjectStatus::Active));

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_move_unknown_id_is_noop() {
        let (store, seen) = recording_store();
        store.add("A".to_string(), "first one".to_string(), 1.0);

        assert!(!store.move_project(&ProjectId::from("missing"), ProjectStatus::Finished));

        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(store.snapshot()[0].status, ProjectStatus::Active);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let store = ProjectStore::new();
        let received = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&received);
        store.subscribe(move |mut projects: Vec<Project>| {
            projects[0].title = "tampered".to_string();
            *sink.borrow_mut() = Some(projects);
        });

        store.add("Original".to_string(), "some text".to_string(), 5.0);

        assert!(received.borrow().is_some());
        assert_eq!(store.snapshot()[0].title, "Original");
    }

    #[test]
    fn test_listeners_called_in_subscription_order() {
        let store = ProjectStore::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let order = Rc::clone(&order);
            store.subscribe(move |_| order.borrow_mut().push(n));
        }

        store.add("A".to_string(), "first one".to_string(), 1.0);

        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        assert_eq!(store.listener_count(), 3);
    }

    #[test]
    fn test_listener_can_read_store() {
        let store = ProjectStore::new();
        let observed = Rc::new(RefCell::new(0));
        let handle = store.clone();
        let sink = Rc::clone(&observed);
        store.subscribe(move |_| *sink.borrow_mut() = handle.len());

        store.add("A".to_string(), "first one".to_string(), 1.0);

        assert_eq!(*observed.borrow(), 1);
    }

    #[test]
    fn test_ids_unique_under_repetition() {
        let store = ProjectStore::new();
        let ids: HashSet<_> = (0..10_000)
            .map(|n| store.add(format!("P{}", n), "description".to_string(), 1.0))
            .collect();

        assert_eq!(ids.len(), 10_000);
        assert_eq!(store.len(), 10_000);
    }

    #[test]
    fn test_get_by_id() {
        let store = ProjectStore::new();
        let id = store.add("A".to_string(), "first one".to_string(), 1.0);

        assert_eq!(store.get(&id).map(|p| p.title), Some("A".to_string()));
        assert!(store.get(&ProjectId::from("nope")).is_none());
    }
}
