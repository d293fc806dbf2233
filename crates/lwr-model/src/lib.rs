//! lwr-model: the reactor component tree.
//!
//! Every node in the tree is a [`Component`]: a tagged variant embedding a
//! shared [`ComponentCore`] (identity plus a measurement provider) by value.
//! Containers come in two decoupled flavors:
//! - [`Composite`] owns children by unique name;
//! - [`GridManager`] records which name occupies which (row, column) cell.
//!
//! Assemblies pair the two (a membership composite plus a placement grid),
//! and [`Reactor`] keeps one such pair per assembly category.

pub mod assembly;
pub mod component;
pub mod composite;
pub mod grid;
pub mod labels;
pub mod material;
pub mod notify;
pub mod reactor;
pub mod ring;
pub mod rod;
pub mod tag;

// Re-exports
pub use assembly::{ControlBank, FuelAssembly, IncoreInstrument, PinAssembly, RodClusterAssembly};
pub use component::{Component, ComponentCore};
pub use composite::Composite;
pub use grid::GridManager;
pub use labels::GridLabels;
pub use material::{Material, MaterialBlock, MaterialKind};
pub use notify::{ChangeListener, CompositeEvent, Notifier, StructureListener};
pub use reactor::{AssemblyKind, Reactor};
pub use ring::{Ring, Tube, TubeType};
pub use rod::Rod;
pub use tag::ComponentTag;
