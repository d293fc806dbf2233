//! Spatial placement of named components on a square grid.

use std::collections::BTreeMap;

use lwr_core::{GridLocation, TimeSeriesStore};

use crate::component::ComponentCore;
use crate::tag::ComponentTag;

/// What occupies one grid cell: a component name plus the measurements taken
/// at that position over time.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEntry {
    name: String,
    data: TimeSeriesStore,
}

impl CellEntry {
    fn new(name: String) -> Self {
        Self {
            name,
            data: TimeSeriesStore::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &TimeSeriesStore {
        &self.data
    }
}

/// Maps (row, column) cells to component names.
///
/// The grid references components by name only; ownership stays with the
/// membership composite the grid is paired with. One name may occupy any
/// number of cells. Writing to an occupied cell replaces the prior occupant
/// and its data (last write wins).
#[derive(Debug, Clone, PartialEq)]
pub struct GridManager {
    core: ComponentCore,
    size: usize,
    cells: BTreeMap<GridLocation, CellEntry>,
}

impl GridManager {
    /// A grid of `size` x `size` cells. Sizes below 1 clamp to 1; the size
    /// is fixed for the lifetime of the grid.
    pub fn new(size: usize) -> Self {
        let mut core = ComponentCore::new(ComponentTag::GridManager);
        core.set_name("Grid Manager 1");
        core.set_description("Grid Manager 1's Description");
        Self {
            core,
            size: size.max(1),
            cells: BTreeMap::new(),
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

    /// Place `name` at `location`. Out-of-range locations are ignored
    /// (returns false); an occupied cell is overwritten, dropping the prior
    /// occupant's entry and data.
    pub fn add_component(&mut self, name: impl Into<String>, location: GridLocation) -> bool {
        if !location.in_bounds(self.size) {
            return false;
        }
        self.cells.insert(location, CellEntry::new(name.into()));
        true
    }

    /// Clear one cell, returning the name that occupied it.
    pub fn remove_at(&mut self, location: GridLocation) -> Option<String> {
        self.cells.remove(&location).map(|entry| entry.name)
    }

    /// Clear every cell holding `name` (and the data recorded there).
    /// Returns how many cells were cleared.
    pub fn remove_name(&mut self, name: &str) -> usize {
        let before = self.cells.len();
        self.cells.retain(|_, entry| entry.name != name);
        before - self.cells.len()
    }

    pub fn component_name(&self, location: GridLocation) -> Option<&str> {
        self.cells.get(&location).map(|entry| entry.name.as_str())
    }

    /// Every location holding `name`, in row-major order.
    pub fn locations_of(&self, name: &str) -> Vec<GridLocation> {
        self.cells
            .iter()
            .filter(|(_, entry)| entry.name == name)
            .map(|(location, _)| *location)
            .collect()
    }

    pub fn data_at(&self, location: GridLocation) -> Option<&TimeSeriesStore> {
        self.cells.get(&location).map(|entry| &entry.data)
    }

    pub fn data_at_mut(&mut self, location: GridLocation) -> Option<&mut TimeSeriesStore> {
        self.cells.get_mut(&location).map(|entry| &mut entry.data)
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (GridLocation, &CellEntry)> {
        self.cells.iter().map(|(location, entry)| (*location, entry))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lwr_core::FeaturePoint;

    #[test]
    fn size_clamps_to_minimum() {
        assert_eq!(GridManager::new(0).size(), 1);
        assert_eq!(GridManager::new(17).size(), 17);
    }

    #[test]
    fn out_of_range_adds_are_ignored() {
        let mut grid = GridManager::new(5);
        assert!(!grid.add_component("rodA", GridLocation::new(5, 0)));
        assert!(!grid.add_component("rodA", GridLocation::new(0, 5)));
        assert!(grid.is_empty());
    }

    #[test]
    fn overwrite_replaces_occupant_and_data() {
        let mut grid = GridManager::new(5);
        let loc = GridLocation::new(2, 3);

        assert!(grid.add_component("rodA", loc));
        grid.data_at_mut(loc)
            .unwrap()
            .add(FeaturePoint::new("Flux"), 0.0);

        assert!(grid.add_component("rodB", loc));
        assert_eq!(grid.component_name(loc), Some("rodB"));
        assert!(grid.locations_of("rodA").is_empty());
        // The prior occupant's data went with it.
        assert!(grid.data_at(loc).unwrap().is_empty());
    }

    #[test]
    fn one_name_many_cells() {
        let mut grid = GridManager::new(4);
        grid.add_component("tube", GridLocation::new(3, 1));
        grid.add_component("tube", GridLocation::new(0, 2));
        grid.add_component("rod", GridLocation::new(1, 1));

        assert_eq!(
            grid.locations_of("tube"),
            vec![GridLocation::new(0, 2), GridLocation::new(3, 1)]
        );
        assert_eq!(grid.cell_count(), 3);
    }

    #[test]
    fn remove_name_clears_all_cells() {
        let mut grid = GridManager::new(4);
        grid.add_component("tube", GridLocation::new(0, 0));
        grid.add_component("tube", GridLocation::new(1, 1));
        grid.add_component("rod", GridLocation::new(2, 2));

        assert_eq!(grid.remove_name("tube"), 2);
        assert!(grid.locations_of("tube").is_empty());
        assert_eq!(grid.component_name(GridLocation::new(2, 2)), Some("rod"));
    }

    #[test]
    fn remove_at_returns_name() {
        let mut grid = GridManager::new(4);
        grid.add_component("rod", GridLocation::new(2, 2));
        assert_eq!(grid.remove_at(GridLocation::new(2, 2)), Some("rod".into()));
        assert_eq!(grid.remove_at(GridLocation::new(2, 2)), None);
    }
}
