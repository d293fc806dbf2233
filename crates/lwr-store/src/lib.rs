//! lwr-store: the hierarchical container trees are persisted in.
//!
//! A container is a tree of named groups; each group carries scalar
//! attributes, array datasets, and child groups. The codec in `lwr-io` is
//! written against the [`Container`] capability trait and never against a
//! concrete storage library; [`MemStore`] is the in-memory implementation
//! that also backs the binary file form.

pub mod container;
pub mod file;
pub mod mem;
pub mod tree;

pub use container::{Container, GroupHandle};
pub use file::{load, save};
pub use mem::MemStore;
pub use tree::{Attribute, Dataset, PointRow};

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No group named \"{name}\" here")]
    GroupNotFound { name: String },

    #[error("A group named \"{name}\" already exists here")]
    DuplicateGroup { name: String },

    #[error("No attribute named \"{name}\" on this group")]
    AttributeNotFound { name: String },

    #[error("No dataset named \"{name}\" on this group")]
    DatasetNotFound { name: String },

    #[error("Wrong type for {what}")]
    TypeMismatch { what: String },

    #[error("Stale or foreign group handle")]
    InvalidHandle,

    #[error("Not a container file (bad magic)")]
    BadMagic,

    #[error("Unsupported container format version {found}")]
    UnsupportedVersion { found: u8 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("Decoding error: {0}")]
    Decode(String),
}
