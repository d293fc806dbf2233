//! Annular geometry: rings and tubes.

use core::fmt;

use crate::component::ComponentCore;
use crate::material::Material;
use crate::tag::ComponentTag;

/// An annulus of a single material: height, inner radius, outer radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    core: ComponentCore,
    height: f64,
    inner_radius: f64,
    outer_radius: f64,
    material: Material,
}

impl Default for Ring {
    fn default() -> Self {
        Self::new()
    }
}

impl Ring {
    pub fn new() -> Self {
        let mut core = ComponentCore::new(ComponentTag::Ring);
        core.set_name("Ring");
        Self {
            core,
            height: 1.0,
            inner_radius: 0.0,
            outer_radius: 1.0,
            material: Material::new(),
        }
    }

    /// A ring for a specializing wrapper that stamps its own tag.
    pub(crate) fn with_tag(tag: ComponentTag) -> Self {
        let mut ring = Self::new();
        ring.core.retag(tag);
        ring
    }

    pub fn core(&self) -> &ComponentCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Non-positive or non-finite heights are rejected.
    pub fn set_height(&mut self, height: f64) {
        if height.is_finite() && height > 0.0 {
            self.height = height;
        }
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Negative or non-finite radii are rejected.
    pub fn set_inner_radius(&mut self, radius: f64) {
        if radius.is_finite() && radius >= 0.0 {
            self.inner_radius = radius;
        }
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Non-positive or non-finite radii are rejected.
    pub fn set_outer_radius(&mut self, radius: f64) {
        if radius.is_finite() && radius > 0.0 {
            self.outer_radius = radius;
        }
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }
}

/// What a tube is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TubeType {
    /// Guides a control rod.
    Guide,
    /// Carries incore instrumentation.
    Instrument,
}

impl TubeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TubeType::Guide => "Guide",
            TubeType::Instrument => "Instrument",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Guide" => Some(TubeType::Guide),
            "Instrument" => Some(TubeType::Instrument),
            _ => None,
        }
    }
}

impl fmt::Display for TubeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hollow ring with a purpose: guide or instrument tube.
///
/// Embeds [`Ring`] by value and delegates geometry to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tube {
    ring: Ring,
    kind: TubeType,
}

impl Default for Tube {
    fn default() -> Self {
        Self::new()
    }
}

impl Tube {
    pub fn new() -> Self {
        let mut ring = Ring::with_tag(ComponentTag::Tube);
        ring.core_mut().set_name("Tube");
        Self {
            ring,
            kind: TubeType::Guide,
        }
    }

    pub fn core(&self) -> &ComponentCore {
        self.ring.core()
    }

    pub fn core_mut(&mut self) -> &mut ComponentCore {
        self.ring.core_mut()
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn ring_mut(&mut self) -> &mut Ring {
        &mut self.ring
    }

    pub fn kind(&self) -> TubeType {
        self.kind
    }

    pub fn set_kind(&mut self, kind: TubeType) {
        self.kind = kind;
    }
}
