//! The reactor: one membership composite and one placement grid per
//! assembly category.

use core::fmt;

use lwr_core::{GridLocation, TimeSeriesStore};

use crate::component::{Component, ComponentCore};
use crate::composite::Composite;
use crate::grid::GridManager;
use crate::labels::GridLabels;
use crate::tag::ComponentTag;

/// The assembly categories a reactor tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssemblyKind {
    ControlBank,
    Fuel,
    IncoreInstrument,
    RodCluster,
}

impl AssemblyKind {
    pub const ALL: [AssemblyKind; 4] = [
        AssemblyKind::ControlBank,
        AssemblyKind::Fuel,
        AssemblyKind::IncoreInstrument,
        AssemblyKind::RodCluster,
    ];

    /// Reserved name of the category's membership composite. Part of the
    /// wire format; user component names must not collide with these.
    pub fn composite_name(&self) -> &'static str {
        match self {
            AssemblyKind::ControlBank => "Control Banks",
            AssemblyKind::Fuel => "Fuel Assemblies",
            AssemblyKind::IncoreInstrument => "Incore Instruments",
            AssemblyKind::RodCluster => "Rod Cluster Assemblies",
        }
    }

    /// Reserved name of the category's placement grid.
    pub fn grid_name(&self) -> &'static str {
        match self {
            AssemblyKind::ControlBank => "Control Bank Grid",
            AssemblyKind::Fuel => "Fuel Assembly Grid",
            AssemblyKind::IncoreInstrument => "Incore Instrument Grid",
            AssemblyKind::RodCluster => "Rod Cluster Assembly Grid",
        }
    }

    pub fn from_composite_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.composite_name() == name)
    }

    pub fn from_grid_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.grid_name() == name)
    }

    fn index(&self) -> usize {
        match self {
            AssemblyKind::ControlBank => 0,
            AssemblyKind::Fuel => 1,
            AssemblyKind::IncoreInstrument => 2,
            AssemblyKind::RodCluster => 3,
        }
    }
}

impl fmt::Display for AssemblyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AssemblyKind::ControlBank => "control bank",
            AssemblyKind::Fuel => "fuel",
            AssemblyKind::IncoreInstrument => "incore instrument",
            AssemblyKind::RodCluster => "rod cluster",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Category {
    members: Composite,
    grid: GridManager,
}

impl Category {
    fn new(kind: AssemblyKind, size: usize) -> Self {
        let mut members = Composite::named(kind.composite_name());
        members
            .core_mut()
            .set_description("A composite for assemblies of one category.");

        let mut grid = GridManager::new(size);
        grid.core_mut().set_name(kind.grid_name());

        Self { members, grid }
    }
}

/// A pressurized light-water reactor core.
///
/// Membership and spatial placement are kept as paired-but-separate
/// structures per category; the reactor's operations keep the pair's names
/// consistent with each other.
#[derive(Debug, Clone, PartialEq)]
pub struct Reactor {
    core: ComponentCore,
    size: usize,
    fuel_assembly_pitch: f64,
    categories: [Category; 4],
    labels: Option<GridLabels>,
}

impl Reactor {
    /// A core with `size` x `size` assembly positions. Sizes below 1 clamp
    /// to 1; the size is fixed for the lifetime of the reactor.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let mut core = ComponentCore::new(ComponentTag::Reactor);
        core.set_name("Reactor");
        core.set_description("Reactor's Description");
        Self {
            core,
            size,
            fuel_assembly_pitch: 1.0,
            categories: AssemblyKind::ALL.map(|kind| Category::new(kind, size)),
            labels: None,
        }
    }

    pub fn core(&self) -> &ComponentCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Center-to-center distance between adjacent fuel assemblies.
    pub fn fuel_assembly_pitch(&self) -> f64 {
        self.fuel_assembly_pitch
    }

    /// Non-positive or non-finite pitches are rejected.
    pub fn set_fuel_assembly_pitch(&mut self, pitch: f64) {
        if pitch.is_finite() && pitch > 0.0 {
            self.fuel_assembly_pitch = pitch;
        }
    }

    fn category(&self, kind: AssemblyKind) -> &Category {
        &self.categories[kind.index()]
    }

    fn category_mut(&mut self, kind: AssemblyKind) -> &mut Category {
        &mut self.categories[kind.index()]
    }

    /// Add an assembly to a category. Returns false when the category
    /// already has a member with the same name.
    pub fn add_assembly(&mut self, kind: AssemblyKind, assembly: Component) -> bool {
        self.category_mut(kind).members.add_component(assembly)
    }

    /// Remove an assembly and clear every grid cell it occupied.
    pub fn remove_assembly(&mut self, kind: AssemblyKind, name: &str) -> Option<Component> {
        let category = self.category_mut(kind);
        let removed = category.members.remove_component(name);
        if removed.is_some() {
            category.grid.remove_name(name);
        }
        removed
    }

    pub fn assembly_names(&self, kind: AssemblyKind) -> Vec<String> {
        self.category(kind).members.names()
    }

    pub fn assembly_by_name(&self, kind: AssemblyKind, name: &str) -> Option<&Component> {
        self.category(kind).members.component(name)
    }

    /// Place a member assembly at a cell. Returns false when the name is
    /// not a member of the category or the cell is out of range; an
    /// occupied cell is overwritten.
    pub fn set_assembly_location(
        &mut self,
        kind: AssemblyKind,
        name: &str,
        row: usize,
        column: usize,
    ) -> bool {
        let category = self.category_mut(kind);
        if !category.members.contains(name) {
            return false;
        }
        category
            .grid
            .add_component(name, GridLocation::new(row, column))
    }

    pub fn assembly_name_at(&self, kind: AssemblyKind, row: usize, column: usize) -> Option<&str> {
        self.category(kind)
            .grid
            .component_name(GridLocation::new(row, column))
    }

    pub fn assembly_locations(&self, kind: AssemblyKind, name: &str) -> Vec<GridLocation> {
        self.category(kind).grid.locations_of(name)
    }

    pub fn assembly_data_at(
        &self,
        kind: AssemblyKind,
        row: usize,
        column: usize,
    ) -> Option<&TimeSeriesStore> {
        self.category(kind).grid.data_at(GridLocation::new(row, column))
    }

    pub fn assembly_data_at_mut(
        &mut self,
        kind: AssemblyKind,
        row: usize,
        column: usize,
    ) -> Option<&mut TimeSeriesStore> {
        self.category_mut(kind)
            .grid
            .data_at_mut(GridLocation::new(row, column))
    }

    /// The category's membership composite (read-only).
    pub fn members(&self, kind: AssemblyKind) -> &Composite {
        &self.category(kind).members
    }

    /// The category's placement grid (read-only).
    pub fn grid(&self, kind: AssemblyKind) -> &GridManager {
        &self.category(kind).grid
    }

    pub fn labels(&self) -> Option<&GridLabels> {
        self.labels.as_ref()
    }

    /// Install core-map labels. Rejected unless the size matches.
    pub fn set_labels(&mut self, labels: GridLabels) -> bool {
        if labels.size() != self.size {
            return false;
        }
        self.labels = Some(labels);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::FuelAssembly;

    fn fuel(name: &str) -> Component {
        let mut assembly = FuelAssembly::new(3);
        assembly.core_mut().set_name(name);
        Component::FuelAssembly(assembly)
    }

    #[test]
    fn reserved_names_resolve_to_kinds() {
        for kind in AssemblyKind::ALL {
            assert_eq!(
                AssemblyKind::from_composite_name(kind.composite_name()),
                Some(kind)
            );
            assert_eq!(AssemblyKind::from_grid_name(kind.grid_name()), Some(kind));
        }
        assert_eq!(AssemblyKind::from_composite_name("Fuel Assembly Grid"), None);
    }

    #[test]
    fn membership_is_per_category() {
        let mut reactor = Reactor::new(15);
        assert!(reactor.add_assembly(AssemblyKind::Fuel, fuel("FA-01")));
        assert!(!reactor.add_assembly(AssemblyKind::Fuel, fuel("FA-01")));

        // The same name is fine in a different category.
        assert!(reactor.add_assembly(AssemblyKind::RodCluster, fuel("FA-01")));
        assert_eq!(reactor.assembly_names(AssemblyKind::Fuel), vec!["FA-01"]);
    }

    #[test]
    fn placement_requires_membership() {
        let mut reactor = Reactor::new(15);
        reactor.add_assembly(AssemblyKind::Fuel, fuel("FA-01"));

        assert!(!reactor.set_assembly_location(AssemblyKind::Fuel, "FA-02", 0, 0));
        assert!(reactor.set_assembly_location(AssemblyKind::Fuel, "FA-01", 7, 7));
        assert!(!reactor.set_assembly_location(AssemblyKind::Fuel, "FA-01", 15, 0));

        assert_eq!(
            reactor.assembly_name_at(AssemblyKind::Fuel, 7, 7),
            Some("FA-01")
        );
        assert!(reactor.assembly_data_at(AssemblyKind::Fuel, 7, 7).is_some());
    }

    #[test]
    fn removal_clears_placement() {
        let mut reactor = Reactor::new(15);
        reactor.add_assembly(AssemblyKind::Fuel, fuel("FA-01"));
        reactor.set_assembly_location(AssemblyKind::Fuel, "FA-01", 7, 7);

        let removed = reactor.remove_assembly(AssemblyKind::Fuel, "FA-01");
        assert!(removed.is_some());
        assert!(reactor.assembly_name_at(AssemblyKind::Fuel, 7, 7).is_none());
    }

    #[test]
    fn pitch_clamps() {
        let mut reactor = Reactor::new(15);
        reactor.set_fuel_assembly_pitch(-2.0);
        assert_eq!(reactor.fuel_assembly_pitch(), 1.0);
        reactor.set_fuel_assembly_pitch(21.5);
        assert_eq!(reactor.fuel_assembly_pitch(), 21.5);
    }

    #[test]
    fn label_size_must_match() {
        let mut reactor = Reactor::new(15);
        assert!(!reactor.set_labels(GridLabels::new(10)));
        assert!(reactor.labels().is_none());
        assert!(reactor.set_labels(GridLabels::new(15)));
        assert!(reactor.labels().is_some());
    }
}
