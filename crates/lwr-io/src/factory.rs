//! Shell construction for the reader.

use lwr_model::{
    Component, ComponentCore, ComponentTag, Composite, ControlBank, FuelAssembly, GridLabels,
    GridManager, IncoreInstrument, Material, MaterialBlock, PinAssembly, Reactor,
    RodClusterAssembly, Ring, Rod, Tube,
};

/// Build the shell component for a tag.
///
/// Sized variants fix their internal storage at construction, so the size
/// attribute must already have been read when this is called; a missing
/// size falls back to the documented minimum of 1. Every field of the shell
/// is overwritten by the subsequent read step.
pub fn create_component(tag: ComponentTag, size: Option<usize>) -> Component {
    let size = size.unwrap_or(1);
    match tag {
        ComponentTag::Component => Component::Basic(ComponentCore::new(ComponentTag::Component)),
        ComponentTag::Composite => Component::Composite(Composite::new()),
        ComponentTag::GridManager => Component::GridManager(GridManager::new(size)),
        ComponentTag::GridLabels => Component::GridLabels(GridLabels::new(size)),
        ComponentTag::Material => Component::Material(Material::new()),
        ComponentTag::MaterialBlock => Component::MaterialBlock(MaterialBlock::new()),
        ComponentTag::Ring => Component::Ring(Ring::new()),
        ComponentTag::Tube => Component::Tube(Tube::new()),
        ComponentTag::Rod => Component::Rod(Rod::new()),
        ComponentTag::PinAssembly => Component::PinAssembly(PinAssembly::new(size)),
        ComponentTag::FuelAssembly => Component::FuelAssembly(FuelAssembly::new(size)),
        ComponentTag::RodClusterAssembly => {
            Component::RodClusterAssembly(RodClusterAssembly::new(size))
        }
        ComponentTag::ControlBank => Component::ControlBank(ControlBank::new()),
        ComponentTag::IncoreInstrument => Component::IncoreInstrument(IncoreInstrument::new()),
        ComponentTag::Reactor => Component::Reactor(Reactor::new(size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_builds_its_own_variant() {
        for tag in ComponentTag::ALL {
            let component = create_component(tag, Some(3));
            assert_eq!(component.tag(), tag, "factory mismatch for {tag}");
        }
    }

    #[test]
    fn missing_size_falls_back_to_minimum() {
        match create_component(ComponentTag::GridManager, None) {
            Component::GridManager(grid) => assert_eq!(grid.size(), 1),
            other => panic!("expected a grid manager, got {:?}", other.tag()),
        }
        match create_component(ComponentTag::Reactor, None) {
            Component::Reactor(reactor) => assert_eq!(reactor.size(), 1),
            other => panic!("expected a reactor, got {:?}", other.tag()),
        }
    }

    #[test]
    fn sized_variants_take_the_size() {
        match create_component(ComponentTag::FuelAssembly, Some(17)) {
            Component::FuelAssembly(assembly) => assert_eq!(assembly.size(), 17),
            other => panic!("expected a fuel assembly, got {:?}", other.tag()),
        }
    }
}
