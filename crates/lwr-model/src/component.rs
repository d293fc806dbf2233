//! The base component identity and the tagged component sum type.

use lwr_core::TimeSeriesStore;

use crate::assembly::{
    ControlBank, FuelAssembly, IncoreInstrument, PinAssembly, RodClusterAssembly,
};
use crate::composite::Composite;
use crate::grid::GridManager;
use crate::labels::GridLabels;
use crate::material::{Material, MaterialBlock};
use crate::reactor::Reactor;
use crate::ring::{Ring, Tube};
use crate::rod::Rod;
use crate::tag::ComponentTag;

/// Identity and measurement state shared by every component variant.
///
/// Embedded by value wherever the tree needs a node; there is no base-class
/// hierarchy, variants delegate to their embedded core explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentCore {
    id: i32,
    name: String,
    description: String,
    tag: ComponentTag,
    data: TimeSeriesStore,
}

impl ComponentCore {
    pub fn new(tag: ComponentTag) -> Self {
        Self {
            id: 1,
            name: "Component 1".to_string(),
            description: "Component 1's Description".to_string(),
            tag,
            data: TimeSeriesStore::new(),
        }
    }

    pub fn with_name(tag: ComponentTag, name: &str) -> Self {
        let mut core = Self::new(tag);
        core.set_name(name);
        core
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Negative ids are rejected.
    pub fn set_id(&mut self, id: i32) {
        if id >= 0 {
            self.id = id;
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Empty or whitespace-only names are rejected; the kept value is
    /// trimmed.
    pub fn set_name(&mut self, name: &str) {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.name = trimmed.to_string();
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Empty or whitespace-only descriptions are rejected; the kept value is
    /// trimmed.
    pub fn set_description(&mut self, description: &str) {
        let trimmed = description.trim();
        if !trimmed.is_empty() {
            self.description = trimmed.to_string();
        }
    }

    pub fn tag(&self) -> ComponentTag {
        self.tag
    }

    /// Specializing constructors (Tube over Ring, the concrete assemblies
    /// over PinAssembly) stamp their own tag onto the embedded core.
    pub(crate) fn retag(&mut self, tag: ComponentTag) {
        self.tag = tag;
    }

    pub fn data(&self) -> &TimeSeriesStore {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut TimeSeriesStore {
        &mut self.data
    }
}

/// A node of the reactor tree: one variant per [`ComponentTag`].
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Basic(ComponentCore),
    Composite(Composite),
    GridManager(GridManager),
    GridLabels(GridLabels),
    Material(Material),
    MaterialBlock(MaterialBlock),
    Ring(Ring),
    Tube(Tube),
    Rod(Rod),
    PinAssembly(PinAssembly),
    FuelAssembly(FuelAssembly),
    RodClusterAssembly(RodClusterAssembly),
    ControlBank(ControlBank),
    IncoreInstrument(IncoreInstrument),
    Reactor(Reactor),
}

impl Component {
    pub fn core(&self) -> &ComponentCore {
        match self {
            Component::Basic(core) => core,
            Component::Composite(c) => c.core(),
            Component::GridManager(g) => g.core(),
            Component::GridLabels(l) => l.core(),
            Component::Material(m) => m.core(),
            Component::MaterialBlock(b) => b.core(),
            Component::Ring(r) => r.core(),
            Component::Tube(t) => t.core(),
            Component::Rod(r) => r.core(),
            Component::PinAssembly(a) => a.core(),
            Component::FuelAssembly(a) => a.core(),
            Component::RodClusterAssembly(a) => a.core(),
            Component::ControlBank(b) => b.core(),
            Component::IncoreInstrument(i) => i.core(),
            Component::Reactor(r) => r.core(),
        }
    }

    pub fn core_mut(&mut self) -> &mut ComponentCore {
        match self {
            Component::Basic(core) => core,
            Component::Composite(c) => c.core_mut(),
            Component::GridManager(g) => g.core_mut(),
            Component::GridLabels(l) => l.core_mut(),
            Component::Material(m) => m.core_mut(),
            Component::MaterialBlock(b) => b.core_mut(),
            Component::Ring(r) => r.core_mut(),
            Component::Tube(t) => t.core_mut(),
            Component::Rod(r) => r.core_mut(),
            Component::PinAssembly(a) => a.core_mut(),
            Component::FuelAssembly(a) => a.core_mut(),
            Component::RodClusterAssembly(a) => a.core_mut(),
            Component::ControlBank(b) => b.core_mut(),
            Component::IncoreInstrument(i) => i.core_mut(),
            Component::Reactor(r) => r.core_mut(),
        }
    }

    pub fn tag(&self) -> ComponentTag {
        self.core().tag()
    }

    pub fn name(&self) -> &str {
        self.core().name()
    }

    pub fn id(&self) -> i32 {
        self.core().id()
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(impl From<$ty> for Component {
            fn from(value: $ty) -> Self {
                Component::$variant(value)
            }
        })*
    };
}

impl_from_variant!(
    Composite => Composite,
    GridManager => GridManager,
    GridLabels => GridLabels,
    Material => Material,
    MaterialBlock => MaterialBlock,
    Ring => Ring,
    Tube => Tube,
    Rod => Rod,
    PinAssembly => PinAssembly,
    FuelAssembly => FuelAssembly,
    RodClusterAssembly => RodClusterAssembly,
    ControlBank => ControlBank,
    IncoreInstrument => IncoreInstrument,
    Reactor => Reactor,
);

#[cfg(test)]
mod tests {
    use super::*;
    use lwr_core::FeaturePoint;

    #[test]
    fn defaults() {
        let core = ComponentCore::new(ComponentTag::Component);
        assert_eq!(core.id(), 1);
        assert_eq!(core.name(), "Component 1");
        assert_eq!(core.description(), "Component 1's Description");
        assert_eq!(core.tag(), ComponentTag::Component);
        assert!(core.data().is_empty());
    }

    #[test]
    fn identity_setters_clamp() {
        let mut core = ComponentCore::new(ComponentTag::Component);

        core.set_id(-4);
        assert_eq!(core.id(), 1);
        core.set_id(0);
        assert_eq!(core.id(), 0);

        core.set_name("   ");
        assert_eq!(core.name(), "Component 1");
        core.set_name("  Rod A  ");
        assert_eq!(core.name(), "Rod A");

        core.set_description("");
        assert_eq!(core.description(), "Component 1's Description");
        core.set_description("first fuel rod");
        assert_eq!(core.description(), "first fuel rod");
    }

    #[test]
    fn structural_equality() {
        let mut a = ComponentCore::with_name(ComponentTag::Component, "X");
        let mut b = ComponentCore::with_name(ComponentTag::Component, "X");
        assert_eq!(a, b);

        a.data_mut().add(FeaturePoint::new("Flux"), 0.0);
        assert_ne!(a, b);
        b.data_mut().add(FeaturePoint::new("Flux"), 0.0);
        assert_eq!(a, b);
    }

    #[test]
    fn enum_delegates_to_core() {
        let mut component = Component::Basic(ComponentCore::with_name(
            ComponentTag::Component,
            "probe",
        ));
        assert_eq!(component.tag(), ComponentTag::Component);
        assert_eq!(component.name(), "probe");
        component.core_mut().set_id(7);
        assert_eq!(component.id(), 7);
    }
}
