//! Materials and axial material blocks.

use core::fmt;

use crate::component::ComponentCore;
use crate::ring::Ring;
use crate::tag::ComponentTag;

/// Phase of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    Gas,
    Liquid,
    Solid,
}

impl MaterialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Gas => "Gas",
            MaterialKind::Liquid => "Liquid",
            MaterialKind::Solid => "Solid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Gas" => Some(MaterialKind::Gas),
            "Liquid" => Some(MaterialKind::Liquid),
            "Solid" => Some(MaterialKind::Solid),
            _ => None,
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named material with a phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    core: ComponentCore,
    kind: MaterialKind,
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

impl Material {
    pub fn new() -> Self {
        let mut core = ComponentCore::new(ComponentTag::Material);
        core.set_name("Material");
        Self {
            core,
            kind: MaterialKind::Solid,
        }
    }

    pub fn named(name: &str, kind: MaterialKind) -> Self {
        let mut material = Self::new();
        material.core.set_name(name);
        material.kind = kind;
        material
    }

    pub fn core(&self) -> &ComponentCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: MaterialKind) {
        self.kind = kind;
    }
}

/// Concentric rings of material at one axial position along a rod.
///
/// Rings are kept sorted by outer radius, innermost first.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialBlock {
    core: ComponentCore,
    position: f64,
    rings: Vec<Ring>,
}

impl Default for MaterialBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialBlock {
    pub fn new() -> Self {
        let mut core = ComponentCore::new(ComponentTag::MaterialBlock);
        core.set_name("Material Block");
        Self {
            core,
            position: 0.0,
            rings: Vec::new(),
        }
    }

    pub fn core(&self) -> &ComponentCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    /// Axial position of the block along its rod.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Negative or non-finite positions are rejected.
    pub fn set_position(&mut self, position: f64) {
        if position.is_finite() && position >= 0.0 {
            self.position = position;
        }
    }

    pub fn add_ring(&mut self, ring: Ring) {
        self.rings.push(ring);
        self.rings
            .sort_by(|a, b| a.outer_radius().total_cmp(&b.outer_radius()));
    }

    /// Remove the first ring with the given name.
    pub fn remove_ring(&mut self, name: &str) -> Option<Ring> {
        let index = self.rings.iter().position(|r| r.core().name() == name)?;
        Some(self.rings.remove(index))
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// The ring whose annulus covers `radius`, if any.
    pub fn ring_at_radius(&self, radius: f64) -> Option<&Ring> {
        self.rings
            .iter()
            .find(|r| radius >= r.inner_radius() && radius <= r.outer_radius())
    }
}
