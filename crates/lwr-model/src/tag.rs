//! Component discriminants.

use core::fmt;

/// Discriminant identifying a component's concrete variant.
///
/// The string form is what gets persisted as the `tag` attribute on a
/// container group, so the mapping here is part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentTag {
    Component,
    Composite,
    GridManager,
    GridLabels,
    Material,
    MaterialBlock,
    Ring,
    Tube,
    Rod,
    PinAssembly,
    FuelAssembly,
    RodClusterAssembly,
    ControlBank,
    IncoreInstrument,
    Reactor,
}

impl ComponentTag {
    /// Every tag, in a stable order.
    pub const ALL: [ComponentTag; 15] = [
        ComponentTag::Component,
        ComponentTag::Composite,
        ComponentTag::GridManager,
        ComponentTag::GridLabels,
        ComponentTag::Material,
        ComponentTag::MaterialBlock,
        ComponentTag::Ring,
        ComponentTag::Tube,
        ComponentTag::Rod,
        ComponentTag::PinAssembly,
        ComponentTag::FuelAssembly,
        ComponentTag::RodClusterAssembly,
        ComponentTag::ControlBank,
        ComponentTag::IncoreInstrument,
        ComponentTag::Reactor,
    ];

    /// The persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentTag::Component => "Component",
            ComponentTag::Composite => "Composite",
            ComponentTag::GridManager => "Grid Manager",
            ComponentTag::GridLabels => "Grid Labels",
            ComponentTag::Material => "Material",
            ComponentTag::MaterialBlock => "Material Block",
            ComponentTag::Ring => "Ring",
            ComponentTag::Tube => "Tube",
            ComponentTag::Rod => "Rod",
            ComponentTag::PinAssembly => "Pin Assembly",
            ComponentTag::FuelAssembly => "Fuel Assembly",
            ComponentTag::RodClusterAssembly => "Rod Cluster Assembly",
            ComponentTag::ControlBank => "Control Bank",
            ComponentTag::IncoreInstrument => "Incore Instrument",
            ComponentTag::Reactor => "Reactor",
        }
    }

    /// Parse the persisted string form. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.as_str() == s)
    }

    /// True for variants whose internal storage is sized at construction,
    /// meaning the `size` attribute must be read before dispatch.
    pub fn needs_size(&self) -> bool {
        matches!(
            self,
            ComponentTag::GridManager
                | ComponentTag::GridLabels
                | ComponentTag::PinAssembly
                | ComponentTag::FuelAssembly
                | ComponentTag::RodClusterAssembly
                | ComponentTag::Reactor
        )
    }
}

impl fmt::Display for ComponentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_form_round_trips() {
        for tag in ComponentTag::ALL {
            assert_eq!(ComponentTag::parse(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn unknown_string_is_none() {
        assert_eq!(ComponentTag::parse("Steam Generator"), None);
        assert_eq!(ComponentTag::parse(""), None);
    }

    #[test]
    fn sized_variants() {
        assert!(ComponentTag::GridManager.needs_size());
        assert!(ComponentTag::Reactor.needs_size());
        assert!(!ComponentTag::Rod.needs_size());
        assert!(!ComponentTag::Composite.needs_size());
    }
}
