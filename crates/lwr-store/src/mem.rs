//! In-memory container.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::container::{Container, GroupHandle};
use crate::tree::{Attribute, Dataset};
use crate::{StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Node {
    name: String,
    attributes: Vec<(String, Attribute)>,
    datasets: Vec<(String, Dataset)>,
    children: Vec<usize>,
}

impl Node {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            datasets: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// The in-memory [`Container`]: an append-only arena of groups.
///
/// Tracks the balance of `open_group`/`create_group` against `close_group`
/// so tests can assert that a complete codec pass leaks no handles.
#[derive(Debug, Serialize, Deserialize)]
pub struct MemStore {
    nodes: Vec<Node>,
    #[serde(skip)]
    open: Cell<i64>,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("/")],
            open: Cell::new(0),
        }
    }

    /// Opens minus closes since construction. Zero after any balanced pass.
    pub fn open_handles(&self) -> i64 {
        self.open.get()
    }

    /// Total number of groups, the root included.
    pub fn group_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, handle: GroupHandle) -> StoreResult<&Node> {
        self.nodes.get(handle.0).ok_or(StoreError::InvalidHandle)
    }

    fn node_mut(&mut self, handle: GroupHandle) -> StoreResult<&mut Node> {
        self.nodes
            .get_mut(handle.0)
            .ok_or(StoreError::InvalidHandle)
    }

    fn child_index(&self, parent: &Node, name: &str) -> Option<usize> {
        parent
            .children
            .iter()
            .copied()
            .find(|&i| self.nodes[i].name == name)
    }
}

impl PartialEq for MemStore {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Container for MemStore {
    fn root(&self) -> GroupHandle {
        GroupHandle(0)
    }

    fn create_group(&mut self, parent: GroupHandle, name: &str) -> StoreResult<GroupHandle> {
        if self.has_group(parent, name) {
            return Err(StoreError::DuplicateGroup {
                name: name.to_string(),
            });
        }
        self.node(parent)?;
        let index = self.nodes.len();
        self.nodes.push(Node::new(name));
        self.nodes[parent.0].children.push(index);
        self.open.set(self.open.get() + 1);
        Ok(GroupHandle(index))
    }

    fn open_group(&self, parent: GroupHandle, name: &str) -> StoreResult<GroupHandle> {
        let parent = self.node(parent)?;
        let index = self
            .child_index(parent, name)
            .ok_or_else(|| StoreError::GroupNotFound {
                name: name.to_string(),
            })?;
        self.open.set(self.open.get() + 1);
        Ok(GroupHandle(index))
    }

    fn close_group(&self, _group: GroupHandle) {
        self.open.set(self.open.get() - 1);
    }

    fn has_group(&self, parent: GroupHandle, name: &str) -> bool {
        self.node(parent)
            .map(|p| self.child_index(p, name).is_some())
            .unwrap_or(false)
    }

    fn child_group_names(&self, group: GroupHandle) -> Vec<String> {
        self.node(group)
            .map(|n| {
                n.children
                    .iter()
                    .map(|&i| self.nodes[i].name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn group_name(&self, group: GroupHandle) -> StoreResult<String> {
        Ok(self.node(group)?.name.clone())
    }

    fn write_attr(&mut self, group: GroupHandle, name: &str, value: Attribute) -> StoreResult<()> {
        let node = self.node_mut(group)?;
        match node.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => node.attributes.push((name.to_string(), value)),
        }
        Ok(())
    }

    fn read_attr(&self, group: GroupHandle, name: &str) -> StoreResult<Attribute> {
        self.node(group)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| StoreError::AttributeNotFound {
                name: name.to_string(),
            })
    }

    fn has_attr(&self, group: GroupHandle, name: &str) -> bool {
        self.node(group)
            .map(|n| n.attributes.iter().any(|(a, _)| a == name))
            .unwrap_or(false)
    }

    fn write_dataset(
        &mut self,
        group: GroupHandle,
        name: &str,
        dataset: Dataset,
    ) -> StoreResult<()> {
        let node = self.node_mut(group)?;
        match node.datasets.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = dataset,
            None => node.datasets.push((name.to_string(), dataset)),
        }
        Ok(())
    }

    fn read_dataset(&self, group: GroupHandle, name: &str) -> StoreResult<Dataset> {
        self.node(group)?
            .datasets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, dataset)| dataset.clone())
            .ok_or_else(|| StoreError::DatasetNotFound {
                name: name.to_string(),
            })
    }

    fn has_dataset(&self, group: GroupHandle, name: &str) -> bool {
        self.node(group)
            .map(|n| n.datasets.iter().any(|(d, _)| d == name))
            .unwrap_or(false)
    }

    fn dataset_names(&self, group: GroupHandle) -> Vec<String> {
        self.node(group)
            .map(|n| n.datasets.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }
}
