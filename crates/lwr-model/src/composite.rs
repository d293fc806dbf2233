//! Name-keyed component container.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::component::{Component, ComponentCore};
use crate::notify::{ChangeListener, CompositeEvent, Notifier, StructureListener};
use crate::tag::ComponentTag;

/// An ordered-by-name mapping of child components.
///
/// Child names are unique: adding a component under a name that is already
/// present leaves the container untouched. The composite exclusively owns
/// its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    core: ComponentCore,
    children: BTreeMap<String, Component>,
    notifier: Notifier,
}

impl Default for Composite {
    fn default() -> Self {
        Self::new()
    }
}

impl Composite {
    pub fn new() -> Self {
        let mut core = ComponentCore::new(ComponentTag::Composite);
        core.set_name("Composite 1");
        core.set_description("Composite 1's Description");
        Self {
            core,
            children: BTreeMap::new(),
            notifier: Notifier::new(),
        }
    }

    pub fn named(name: &str) -> Self {
        let mut composite = Self::new();
        composite.core.set_name(name);
        composite
    }

    pub fn core(&self) -> &ComponentCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    /// Add a child. Returns false (and changes nothing) when a child with
    /// the same name already exists.
    pub fn add_component(&mut self, child: Component) -> bool {
        let name = child.name().to_string();
        if self.children.contains_key(&name) {
            return false;
        }
        self.children.insert(name.clone(), child);
        self.notifier.notify(CompositeEvent {
            composite: self.core.name().to_string(),
            added: vec![name],
            removed: vec![],
        });
        true
    }

    /// Remove a child by name, returning it.
    pub fn remove_component(&mut self, name: &str) -> Option<Component> {
        let removed = self.children.remove(name);
        if removed.is_some() {
            self.notifier.notify(CompositeEvent {
                composite: self.core.name().to_string(),
                added: vec![],
                removed: vec![name.to_string()],
            });
        }
        removed
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.children.get(name)
    }

    pub fn component_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.children.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Child names in name order.
    pub fn names(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    /// Children in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Component)> {
        self.children.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn add_structure_listener(&self, listener: Arc<dyn StructureListener>) {
        self.notifier.add_structure_listener(listener);
    }

    pub fn add_change_listener(&self, listener: Arc<dyn ChangeListener>) {
        self.notifier.add_change_listener(listener);
    }
}
