//! The capability interface the codec is written against.

use crate::tree::{Attribute, Dataset};
use crate::StoreResult;

/// An opaque token for an open group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupHandle(pub(crate) usize);

/// A hierarchical container: groups holding attributes, datasets, and child
/// groups.
///
/// Groups are scoped resources: every handle returned by
/// [`open_group`](Container::open_group) or
/// [`create_group`](Container::create_group) must be passed to
/// [`close_group`](Container::close_group) on every exit path, success or
/// failure. The root handle is always open and is never closed.
pub trait Container {
    /// The root group of the container.
    fn root(&self) -> GroupHandle;

    /// Create a child group and return it open. Fails when a group with
    /// that name already exists.
    fn create_group(&mut self, parent: GroupHandle, name: &str) -> StoreResult<GroupHandle>;

    /// Open an existing child group.
    fn open_group(&self, parent: GroupHandle, name: &str) -> StoreResult<GroupHandle>;

    /// Release a handle obtained from `open_group` or `create_group`.
    fn close_group(&self, group: GroupHandle);

    fn has_group(&self, parent: GroupHandle, name: &str) -> bool;

    /// Child group names in creation order.
    fn child_group_names(&self, group: GroupHandle) -> Vec<String>;

    /// The group's own name.
    fn group_name(&self, group: GroupHandle) -> StoreResult<String>;

    fn write_attr(&mut self, group: GroupHandle, name: &str, value: Attribute) -> StoreResult<()>;

    fn read_attr(&self, group: GroupHandle, name: &str) -> StoreResult<Attribute>;

    fn has_attr(&self, group: GroupHandle, name: &str) -> bool;

    fn write_dataset(&mut self, group: GroupHandle, name: &str, dataset: Dataset)
        -> StoreResult<()>;

    fn read_dataset(&self, group: GroupHandle, name: &str) -> StoreResult<Dataset>;

    fn has_dataset(&self, group: GroupHandle, name: &str) -> bool;

    /// Dataset names in creation order.
    fn dataset_names(&self, group: GroupHandle) -> Vec<String>;

    // Typed attribute helpers over read_attr/write_attr.

    fn write_int_attr(&mut self, group: GroupHandle, name: &str, value: i64) -> StoreResult<()> {
        self.write_attr(group, name, Attribute::Int(value))
    }

    fn write_float_attr(&mut self, group: GroupHandle, name: &str, value: f64) -> StoreResult<()> {
        self.write_attr(group, name, Attribute::Float(value))
    }

    fn write_str_attr(&mut self, group: GroupHandle, name: &str, value: &str) -> StoreResult<()> {
        self.write_attr(group, name, Attribute::Str(value.to_string()))
    }

    fn read_int_attr(&self, group: GroupHandle, name: &str) -> StoreResult<i64> {
        match self.read_attr(group, name)? {
            Attribute::Int(value) => Ok(value),
            _ => Err(crate::StoreError::TypeMismatch {
                what: format!("attribute \"{name}\""),
            }),
        }
    }

    fn read_float_attr(&self, group: GroupHandle, name: &str) -> StoreResult<f64> {
        match self.read_attr(group, name)? {
            Attribute::Float(value) => Ok(value),
            // Integer literals are acceptable where a float is expected.
            Attribute::Int(value) => Ok(value as f64),
            _ => Err(crate::StoreError::TypeMismatch {
                what: format!("attribute \"{name}\""),
            }),
        }
    }

    fn read_str_attr(&self, group: GroupHandle, name: &str) -> StoreResult<String> {
        match self.read_attr(group, name)? {
            Attribute::Str(value) => Ok(value),
            _ => Err(crate::StoreError::TypeMismatch {
                what: format!("attribute \"{name}\""),
            }),
        }
    }
}
