//! lwr-io: the tag-dispatched recursive codec between component trees and
//! containers.
//!
//! The writer walks a live tree depth-first, emitting one container group
//! per node plus the reserved `State Point Data` sub-group. The reader walks
//! the container depth-first, probing each group's `tag` attribute,
//! instantiating a shell through the factory, and dispatching to the
//! tag-specific read step. A node that cannot be read is logged and dropped;
//! it never aborts its siblings.

pub mod factory;
pub mod names;
pub mod reader;
pub mod writer;

pub use factory::create_component;
pub use reader::ComponentReader;
pub use writer::ComponentWriter;

use lwr_model::Component;
use lwr_store::{Container, StoreError};
use thiserror::Error;

pub type IoResult<T> = Result<T, IoError>;

#[derive(Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Dataset \"{name}\" has the wrong shape")]
    UnexpectedDataset { name: String },
}

/// Persist one component tree under the container root, in a group named
/// after the component.
pub fn write_tree<C: Container>(store: &mut C, component: &Component) -> IoResult<()> {
    let mut writer = ComponentWriter::new(store);
    writer.write_child(writer.root(), component)
}

/// Reconstruct the first component tree found under the container root.
///
/// Returns `None` when no root group holds a readable component.
pub fn read_tree<C: Container>(store: &C) -> Option<Component> {
    let reader = ComponentReader::new(store);
    let root = store.root();
    for name in store.child_group_names(root) {
        let Ok(group) = store.open_group(root, &name) else {
            continue;
        };
        let component = reader.read_component(group);
        store.close_group(group);
        if component.is_some() {
            return component;
        }
    }
    None
}
