//! Asynchronous membership-change notification.
//!
//! Each structural mutation of a [`Composite`](crate::Composite) dispatches
//! one notification round on a worker thread, so listener callbacks cannot
//! stall the mutating caller. Within a round every structure listener fires
//! before any change listener; ordering across rounds is not guaranteed.

use core::fmt;
use std::sync::{Arc, Mutex};
use std::thread;

/// What changed in one mutation of a composite.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeEvent {
    /// Name of the composite that changed.
    pub composite: String,
    /// Child names that were added.
    pub added: Vec<String>,
    /// Child names that were removed.
    pub removed: Vec<String>,
}

/// Told exactly which components were added or removed.
pub trait StructureListener: Send + Sync {
    fn structure_changed(&self, event: &CompositeEvent);
}

/// Told only that something changed.
pub trait ChangeListener: Send + Sync {
    fn changed(&self, composite: &str);
}

/// Listener registry and dispatcher.
///
/// Listeners are runtime wiring, not model state: cloning a notifier yields
/// an empty one, and any two notifiers compare equal.
#[derive(Default)]
pub struct Notifier {
    structure: Mutex<Vec<Arc<dyn StructureListener>>>,
    change: Mutex<Vec<Arc<dyn ChangeListener>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_structure_listener(&self, listener: Arc<dyn StructureListener>) {
        self.structure.lock().unwrap_or_else(|e| e.into_inner()).push(listener);
    }

    pub fn add_change_listener(&self, listener: Arc<dyn ChangeListener>) {
        self.change.lock().unwrap_or_else(|e| e.into_inner()).push(listener);
    }

    /// Dispatch one notification round for `event`.
    ///
    /// The caller's mutation must already be visible; the round runs on its
    /// own thread and this call returns immediately.
    pub fn notify(&self, event: CompositeEvent) {
        let structure: Vec<_> = self
            .structure
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let change: Vec<_> = self
            .change
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        if structure.is_empty() && change.is_empty() {
            return;
        }

        thread::spawn(move || {
            for listener in &structure {
                listener.structure_changed(&event);
            }
            for listener in &change {
                listener.changed(&event.composite);
            }
        });
    }
}

impl Clone for Notifier {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let structure = self.structure.lock().unwrap_or_else(|e| e.into_inner()).len();
        let change = self.change.lock().unwrap_or_else(|e| e.into_inner()).len();
        f.debug_struct("Notifier")
            .field("structure_listeners", &structure)
            .field("change_listeners", &change)
            .finish()
    }
}

impl PartialEq for Notifier {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}
