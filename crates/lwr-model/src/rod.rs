//! Fuel rods.

use crate::component::ComponentCore;
use crate::material::{Material, MaterialBlock, MaterialKind};
use crate::ring::Ring;
use crate::tag::ComponentTag;

/// A fuel rod: pressurized fill gas inside a clad ring, with material blocks
/// stacked along the axis.
///
/// Blocks are kept sorted by axial position, bottom first.
#[derive(Debug, Clone, PartialEq)]
pub struct Rod {
    core: ComponentCore,
    pressure: f64,
    fill_gas: Material,
    clad: Ring,
    blocks: Vec<MaterialBlock>,
}

impl Default for Rod {
    fn default() -> Self {
        Self::new()
    }
}

impl Rod {
    pub fn new() -> Self {
        let mut core = ComponentCore::new(ComponentTag::Rod);
        core.set_name("Rod");

        let mut clad = Ring::new();
        clad.core_mut().set_name("Clad");

        Self {
            core,
            pressure: 2200.0,
            fill_gas: Material::named("Fill Gas", MaterialKind::Gas),
            clad,
            blocks: Vec::new(),
        }
    }

    pub fn named(name: &str) -> Self {
        let mut rod = Self::new();
        rod.core.set_name(name);
        rod
    }

    pub fn core(&self) -> &ComponentCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    /// Fill-gas pressure.
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Non-positive or non-finite pressures are rejected.
    pub fn set_pressure(&mut self, pressure: f64) {
        if pressure.is_finite() && pressure > 0.0 {
            self.pressure = pressure;
        }
    }

    pub fn fill_gas(&self) -> &Material {
        &self.fill_gas
    }

    pub fn set_fill_gas(&mut self, material: Material) {
        self.fill_gas = material;
    }

    pub fn clad(&self) -> &Ring {
        &self.clad
    }

    pub fn set_clad(&mut self, clad: Ring) {
        self.clad = clad;
    }

    /// Insert a block, keeping the stack sorted by position.
    pub fn add_block(&mut self, block: MaterialBlock) {
        self.blocks.push(block);
        self.blocks
            .sort_by(|a, b| a.position().total_cmp(&b.position()));
    }

    /// Replace the whole stack; the blocks are re-sorted by position.
    pub fn set_blocks(&mut self, mut blocks: Vec<MaterialBlock>) {
        blocks.sort_by(|a, b| a.position().total_cmp(&b.position()));
        self.blocks = blocks;
    }

    pub fn blocks(&self) -> &[MaterialBlock] {
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let rod = Rod::new();
        assert_eq!(rod.core().tag(), ComponentTag::Rod);
        assert_eq!(rod.pressure(), 2200.0);
        assert_eq!(rod.fill_gas().kind(), MaterialKind::Gas);
        assert_eq!(rod.clad().core().name(), "Clad");
        assert!(rod.blocks().is_empty());
    }

    #[test]
    fn pressure_clamps() {
        let mut rod = Rod::new();
        rod.set_pressure(-10.0);
        assert_eq!(rod.pressure(), 2200.0);
        rod.set_pressure(1800.0);
        assert_eq!(rod.pressure(), 1800.0);
    }

    #[test]
    fn blocks_sorted_by_position() {
        let mut rod = Rod::new();

        let mut top = MaterialBlock::new();
        top.core_mut().set_name("top");
        top.set_position(2.0);

        let mut bottom = MaterialBlock::new();
        bottom.core_mut().set_name("bottom");
        bottom.set_position(0.5);

        rod.add_block(top);
        rod.add_block(bottom);

        assert_eq!(rod.blocks()[0].core().name(), "bottom");
        assert_eq!(rod.blocks()[1].core().name(), "top");
    }
}
