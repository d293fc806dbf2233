//! Assembly types: rod-bearing lattices and their specializations.

use lwr_core::{GridLocation, TimeSeriesStore};

use crate::component::{Component, ComponentCore};
use crate::composite::Composite;
use crate::grid::GridManager;
use crate::labels::GridLabels;
use crate::ring::{Ring, Tube};
use crate::rod::Rod;
use crate::tag::ComponentTag;

/// A square lattice of fuel rods: the shared base of the concrete
/// rod-bearing assemblies.
///
/// Membership (a composite of rods, keyed by name) and placement (a grid of
/// names) are deliberately separate structures; the assembly keeps the two
/// consistent through its own operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PinAssembly {
    core: ComponentCore,
    size: usize,
    rod_pitch: f64,
    rods: Composite,
    rod_grid: GridManager,
}

impl PinAssembly {
    /// Reserved name of the rod membership composite.
    pub const ROD_COMPOSITE_NAME: &'static str = "Rods";
    /// Reserved name of the rod placement grid.
    pub const ROD_GRID_NAME: &'static str = "Rod Grid";

    /// A `size` x `size` assembly. Sizes below 1 clamp to 1; the size is
    /// fixed for the lifetime of the assembly.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);

        let mut core = ComponentCore::new(ComponentTag::PinAssembly);
        core.set_name("Pin Assembly");
        core.set_description("Pin Assembly's Description");

        let mut rods = Composite::named(Self::ROD_COMPOSITE_NAME);
        rods.core_mut()
            .set_description("A composite that contains many rods.");

        let mut rod_grid = GridManager::new(size);
        rod_grid.core_mut().set_name(Self::ROD_GRID_NAME);

        Self {
            core,
            size,
            rod_pitch: 1.0,
            rods,
            rod_grid,
        }
    }

    /// A base for a specializing assembly that stamps its own tag.
    pub(crate) fn with_tag(tag: ComponentTag, size: usize) -> Self {
        let mut assembly = Self::new(size);
        assembly.core.retag(tag);
        assembly
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

    /// Center-to-center distance between adjacent rods.
    pub fn rod_pitch(&self) -> f64 {
        self.rod_pitch
    }

    /// Non-positive or non-finite pitches are rejected.
    pub fn set_rod_pitch(&mut self, pitch: f64) {
        if pitch.is_finite() && pitch > 0.0 {
            self.rod_pitch = pitch;
        }
    }

    /// Add a rod to the membership composite. Returns false when a rod with
    /// the same name is already a member.
    pub fn add_rod(&mut self, rod: Rod) -> bool {
        self.rods.add_component(Component::Rod(rod))
    }

    /// Remove a rod and clear every cell it occupied.
    pub fn remove_rod(&mut self, name: &str) -> bool {
        let removed = self.rods.remove_component(name).is_some();
        if removed {
            self.rod_grid.remove_name(name);
        }
        removed
    }

    pub fn rod_names(&self) -> Vec<String> {
        self.rods.names()
    }

    pub fn rod_by_name(&self, name: &str) -> Option<&Rod> {
        match self.rods.component(name) {
            Some(Component::Rod(rod)) => Some(rod),
            _ => None,
        }
    }

    /// Place a member rod at a cell. Returns false when the name is not a
    /// member or the cell is out of range; an occupied cell is overwritten.
    pub fn set_rod_location(&mut self, name: &str, row: usize, column: usize) -> bool {
        if !self.rods.contains(name) {
            return false;
        }
        self.rod_grid
            .add_component(name, GridLocation::new(row, column))
    }

    pub fn rod_name_at(&self, row: usize, column: usize) -> Option<&str> {
        self.rod_grid.component_name(GridLocation::new(row, column))
    }

    pub fn rod_locations(&self, name: &str) -> Vec<GridLocation> {
        self.rod_grid.locations_of(name)
    }

    /// Measurements recorded at a cell, present only while the cell is
    /// occupied.
    pub fn rod_data_at(&self, row: usize, column: usize) -> Option<&TimeSeriesStore> {
        self.rod_grid.data_at(GridLocation::new(row, column))
    }

    pub fn rod_data_at_mut(&mut self, row: usize, column: usize) -> Option<&mut TimeSeriesStore> {
        self.rod_grid.data_at_mut(GridLocation::new(row, column))
    }

    /// The membership composite (read-only; mutate through the assembly).
    pub fn rods(&self) -> &Composite {
        &self.rods
    }

    /// The placement grid (read-only; mutate through the assembly).
    pub fn rod_grid(&self) -> &GridManager {
        &self.rod_grid
    }
}

/// A fuel assembly: a pin lattice plus guide/instrument tubes and grid
/// labels.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelAssembly {
    base: PinAssembly,
    tubes: Composite,
    tube_grid: GridManager,
    labels: GridLabels,
}

impl FuelAssembly {
    /// Reserved name of the tube membership composite.
    pub const TUBE_COMPOSITE_NAME: &'static str = "Tubes";
    /// Reserved name of the tube placement grid.
    pub const TUBE_GRID_NAME: &'static str = "Tube Grid";
    /// Reserved name of the grid label provider.
    pub const LABELS_NAME: &'static str = "Grid Labels";

    pub fn new(size: usize) -> Self {
        let base = PinAssembly::with_tag(ComponentTag::FuelAssembly, size);
        let size = base.size();

        let mut tubes = Composite::named(Self::TUBE_COMPOSITE_NAME);
        tubes
            .core_mut()
            .set_description("A composite that contains many tubes.");

        let mut tube_grid = GridManager::new(size);
        tube_grid.core_mut().set_name(Self::TUBE_GRID_NAME);

        let mut labels = GridLabels::new(size);
        labels.core_mut().set_name(Self::LABELS_NAME);

        Self {
            base,
            tubes,
            tube_grid,
            labels,
        }
    }

    pub fn core(&self) -> &ComponentCore {
        self.base.core()
    }

    pub fn core_mut(&mut self) -> &mut ComponentCore {
        self.base.core_mut()
    }

    /// The rod lattice this assembly is built on.
    pub fn base(&self) -> &PinAssembly {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut PinAssembly {
        &mut self.base
    }

    pub fn size(&self) -> usize {
        self.base.size()
    }

    /// Add a tube to the membership composite. Returns false when a tube
    /// with the same name is already a member.
    pub fn add_tube(&mut self, tube: Tube) -> bool {
        self.tubes.add_component(Component::Tube(tube))
    }

    /// Remove a tube and clear every cell it occupied.
    pub fn remove_tube(&mut self, name: &str) -> bool {
        let removed = self.tubes.remove_component(name).is_some();
        if removed {
            self.tube_grid.remove_name(name);
        }
        removed
    }

    pub fn tube_names(&self) -> Vec<String> {
        self.tubes.names()
    }

    pub fn tube_by_name(&self, name: &str) -> Option<&Tube> {
        match self.tubes.component(name) {
            Some(Component::Tube(tube)) => Some(tube),
            _ => None,
        }
    }

    /// Place a member tube at a cell. Returns false when the name is not a
    /// member or the cell is out of range; an occupied cell is overwritten.
    pub fn set_tube_location(&mut self, name: &str, row: usize, column: usize) -> bool {
        if !self.tubes.contains(name) {
            return false;
        }
        self.tube_grid
            .add_component(name, GridLocation::new(row, column))
    }

    pub fn tube_name_at(&self, row: usize, column: usize) -> Option<&str> {
        self.tube_grid.component_name(GridLocation::new(row, column))
    }

    pub fn tube_locations(&self, name: &str) -> Vec<GridLocation> {
        self.tube_grid.locations_of(name)
    }

    pub fn tube_data_at(&self, row: usize, column: usize) -> Option<&TimeSeriesStore> {
        self.tube_grid.data_at(GridLocation::new(row, column))
    }

    pub fn tube_data_at_mut(&mut self, row: usize, column: usize) -> Option<&mut TimeSeriesStore> {
        self.tube_grid.data_at_mut(GridLocation::new(row, column))
    }

    pub fn tubes(&self) -> &Composite {
        &self.tubes
    }

    pub fn tube_grid(&self) -> &GridManager {
        &self.tube_grid
    }

    pub fn labels(&self) -> &GridLabels {
        &self.labels
    }

    /// Install a label provider. Rejected unless its size matches the
    /// assembly size.
    pub fn set_labels(&mut self, labels: GridLabels) -> bool {
        if labels.size() != self.size() {
            return false;
        }
        self.labels = labels;
        true
    }
}

/// A pin lattice used as a rod cluster control assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct RodClusterAssembly {
    base: PinAssembly,
}

impl RodClusterAssembly {
    pub fn new(size: usize) -> Self {
        Self {
            base: PinAssembly::with_tag(ComponentTag::RodClusterAssembly, size),
        }
    }

    pub fn core(&self) -> &ComponentCore {
        self.base.core()
    }

    pub fn core_mut(&mut self) -> &mut ComponentCore {
        self.base.core_mut()
    }

    pub fn base(&self) -> &PinAssembly {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut PinAssembly {
        &mut self.base
    }

    pub fn size(&self) -> usize {
        self.base.size()
    }
}

/// A bank of control rods stepped in and out of the core together.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlBank {
    core: ComponentCore,
    step_size: f64,
    max_steps: i32,
}

impl Default for ControlBank {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlBank {
    pub fn new() -> Self {
        let mut core = ComponentCore::new(ComponentTag::ControlBank);
        core.set_name("Control Bank");
        Self {
            core,
            step_size: 1.0,
            max_steps: 1,
        }
    }

    pub fn core(&self) -> &ComponentCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    /// Axial distance traveled per step.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Non-positive or non-finite step sizes are rejected.
    pub fn set_step_size(&mut self, step_size: f64) {
        if step_size.is_finite() && step_size > 0.0 {
            self.step_size = step_size;
        }
    }

    pub fn max_steps(&self) -> i32 {
        self.max_steps
    }

    /// Non-positive step counts are rejected.
    pub fn set_max_steps(&mut self, max_steps: i32) {
        if max_steps > 0 {
            self.max_steps = max_steps;
        }
    }

    /// Full travel of the bank: step size times the number of steps.
    pub fn stroke_length(&self) -> f64 {
        self.step_size * f64::from(self.max_steps)
    }
}

/// An incore instrument: a detector thimble placed in the core.
#[derive(Debug, Clone, PartialEq)]
pub struct IncoreInstrument {
    core: ComponentCore,
    thimble: Ring,
}

impl Default for IncoreInstrument {
    fn default() -> Self {
        Self::new()
    }
}

impl IncoreInstrument {
    pub fn new() -> Self {
        let mut core = ComponentCore::new(ComponentTag::IncoreInstrument);
        core.set_name("Incore Instrument");

        let mut thimble = Ring::new();
        thimble.core_mut().set_name("Thimble");

        Self { core, thimble }
    }

    pub fn core(&self) -> &ComponentCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    pub fn thimble(&self) -> &Ring {
        &self.thimble
    }

    pub fn set_thimble(&mut self, thimble: Ring) {
        self.thimble = thimble;
    }
}
