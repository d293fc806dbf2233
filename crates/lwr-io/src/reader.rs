//! Recursive-descent reconstruction of component trees.

use lwr_core::{FeaturePoint, GridLocation, TimeSeriesStore};
use lwr_model::{
    AssemblyKind, Component, ComponentCore, ComponentTag, Composite, ControlBank, FuelAssembly,
    GridLabels, GridManager, IncoreInstrument, Material, MaterialBlock, MaterialKind, PinAssembly,
    Reactor, Ring, Rod, Tube, TubeType,
};
use lwr_store::{Container, Dataset, GroupHandle};
use tracing::{debug, warn};

use crate::factory::create_component;
use crate::names;
use crate::{IoError, IoResult};

/// Rebuilds typed components from open container groups.
///
/// Dispatch is tag-driven: the `tag` attribute selects the shell to build
/// and the read step to run. Base read steps are plain functions invoked
/// first by the subtype steps, so shared content is read exactly once.
pub struct ComponentReader<'a, C: Container> {
    store: &'a C,
}

impl<'a, C: Container> ComponentReader<'a, C> {
    pub fn new(store: &'a C) -> Self {
        Self { store }
    }

    /// Read the component stored in an open group.
    ///
    /// Returns `None` when the group carries no `tag` attribute (not every
    /// container node is a modeled component), when the tag is unknown, or
    /// when reading the node's content fails. A failure is logged with the
    /// node's tag and name and never aborts sibling reads.
    pub fn read_component(&self, group: GroupHandle) -> Option<Component> {
        if !self.store.has_attr(group, names::TAG_ATTR) {
            return None;
        }

        let tag_string = match self.store.read_str_attr(group, names::TAG_ATTR) {
            Ok(value) => value,
            Err(error) => {
                warn!(%error, "could not read the tag attribute");
                return None;
            }
        };
        let Some(tag) = ComponentTag::parse(&tag_string) else {
            warn!(tag = %tag_string, "unknown component tag");
            return None;
        };

        // Sized variants fix their storage at construction, so the size
        // has to come out of the container before dispatch.
        let size = if self.store.has_attr(group, names::SIZE_ATTR) {
            self.store
                .read_int_attr(group, names::SIZE_ATTR)
                .ok()
                .map(|value| value.max(0) as usize)
        } else {
            None
        };

        let mut component = create_component(tag, size);
        if let Err(error) = self.read_into(group, &mut component) {
            warn!(
                tag = %tag,
                name = %component.name(),
                %error,
                "could not read component"
            );
            return None;
        }
        Some(component)
    }

    /// The tag-specific read dispatch: exactly one read step per variant.
    fn read_into(&self, group: GroupHandle, component: &mut Component) -> IoResult<()> {
        match component {
            Component::Basic(core) => self.read_core(group, core),
            Component::Composite(composite) => self.read_composite(group, composite),
            Component::GridManager(grid) => self.read_grid_manager(group, grid),
            Component::GridLabels(labels) => self.read_grid_labels(group, labels),
            Component::Material(material) => self.read_material(group, material),
            Component::MaterialBlock(block) => self.read_material_block(group, block),
            Component::Ring(ring) => self.read_ring(group, ring),
            Component::Tube(tube) => self.read_tube(group, tube),
            Component::Rod(rod) => self.read_rod(group, rod),
            Component::PinAssembly(assembly) => self.read_pin_assembly(group, assembly),
            Component::FuelAssembly(assembly) => self.read_fuel_assembly(group, assembly),
            Component::RodClusterAssembly(assembly) => {
                self.read_pin_assembly(group, assembly.base_mut())
            }
            Component::ControlBank(bank) => self.read_control_bank(group, bank),
            Component::IncoreInstrument(instrument) => {
                self.read_incore_instrument(group, instrument)
            }
            Component::Reactor(reactor) => self.read_reactor(group, reactor),
        }
    }

    /// Open `name` under `parent`, run `f`, and close it on every exit
    /// path.
    fn with_group<T>(
        &self,
        parent: GroupHandle,
        name: &str,
        f: impl FnOnce(GroupHandle) -> IoResult<T>,
    ) -> IoResult<T> {
        let group = self.store.open_group(parent, name)?;
        let result = f(group);
        self.store.close_group(group);
        result
    }

    /// Child groups that may hold components: everything except the
    /// reserved time-series group.
    fn child_groups(&self, group: GroupHandle) -> Vec<String> {
        self.store
            .child_group_names(group)
            .into_iter()
            .filter(|name| name != names::STATE_POINT_DATA)
            .collect()
    }

    /// The base read step shared by every variant: identity attributes and
    /// the `State Point Data` sub-group.
    fn read_core(&self, group: GroupHandle, core: &mut ComponentCore) -> IoResult<()> {
        let id = self.store.read_int_attr(group, names::ID_ATTR)?;
        core.set_id(id.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
        core.set_name(&self.store.read_str_attr(group, names::NAME_ATTR)?);
        core.set_description(&self.store.read_str_attr(group, names::DESCRIPTION_ATTR)?);
        self.read_state_point_data(group, core.data_mut())
    }

    /// Replay the reserved time-series group into a provider. Tolerates the
    /// group's absence.
    fn read_state_point_data(
        &self,
        group: GroupHandle,
        data: &mut TimeSeriesStore,
    ) -> IoResult<()> {
        if !self.store.has_group(group, names::STATE_POINT_DATA) {
            return Ok(());
        }
        self.with_group(group, names::STATE_POINT_DATA, |spd| {
            for timestep_name in self.store.child_group_names(spd) {
                self.with_group(spd, &timestep_name, |timestep| {
                    let time = self.store.read_float_attr(timestep, names::TIME_ATTR)?;
                    let units = self.store.read_str_attr(timestep, names::TIME_UNITS_ATTR)?;
                    data.set_time_units(&units);

                    for dataset_name in self.store.dataset_names(timestep) {
                        let Some(feature) = dataset_name.strip_suffix(names::DATA_TABLE_SUFFIX)
                        else {
                            continue;
                        };
                        match self.store.read_dataset(timestep, &dataset_name)? {
                            Dataset::PointTable(rows) => {
                                for row in rows {
                                    data.add(
                                        FeaturePoint {
                                            feature: feature.to_string(),
                                            value: row.value,
                                            uncertainty: row.uncertainty,
                                            units: row.units,
                                            position: row.position,
                                        },
                                        time,
                                    );
                                }
                            }
                            _ => {
                                return Err(IoError::UnexpectedDataset { name: dataset_name });
                            }
                        }
                    }
                    Ok(())
                })?;
            }
            Ok(())
        })
    }

    /// The composite read step: base content, then every child group that
    /// reads back as a component.
    fn read_composite(&self, group: GroupHandle, composite: &mut Composite) -> IoResult<()> {
        self.read_core(group, composite.core_mut())?;
        for child_name in self.child_groups(group) {
            let child = self.with_group(group, &child_name, |child| {
                Ok(self.read_component(child))
            })?;
            if let Some(child) = child {
                composite.add_component(child);
            }
        }
        Ok(())
    }

    /// The grid-manager read step: replay the `Positions` sub-group through
    /// the ordinal name table, then each cell's nested measurements through
    /// the shared units table.
    fn read_grid_manager(&self, group: GroupHandle, grid: &mut GridManager) -> IoResult<()> {
        self.read_core(group, grid.core_mut())?;
        if !self.store.has_group(group, names::POSITIONS) {
            return Ok(());
        }
        self.with_group(group, names::POSITIONS, |positions| {
            let names_table = match self.store.read_dataset(positions, names::POSITION_NAMES_TABLE)?
            {
                Dataset::StringVector(table) => table,
                _ => {
                    return Err(IoError::UnexpectedDataset {
                        name: names::POSITION_NAMES_TABLE.to_string(),
                    });
                }
            };

            let units_table = if self.store.has_dataset(positions, names::UNITS_TABLE) {
                match self.store.read_dataset(positions, names::UNITS_TABLE)? {
                    Dataset::StringVector(table) => Some(table),
                    _ => {
                        return Err(IoError::UnexpectedDataset {
                            name: names::UNITS_TABLE.to_string(),
                        });
                    }
                }
            } else {
                None
            };

            for cell_name in self.store.child_group_names(positions) {
                self.with_group(positions, &cell_name, |cell| {
                    let triple = match self.store.read_dataset(cell, names::POSITION_DATASET)? {
                        Dataset::IntVector(values) => values,
                        _ => {
                            return Err(IoError::UnexpectedDataset {
                                name: names::POSITION_DATASET.to_string(),
                            });
                        }
                    };
                    let &[row, column, ordinal] = &triple[..] else {
                        debug!(cell = %cell_name, "malformed position dataset, skipping cell");
                        return Ok(());
                    };
                    if row < 0 || column < 0 {
                        debug!(cell = %cell_name, "negative position, skipping cell");
                        return Ok(());
                    }
                    let Some(name) = usize::try_from(ordinal)
                        .ok()
                        .and_then(|i| names_table.get(i))
                    else {
                        debug!(cell = %cell_name, "dangling name ordinal, skipping cell");
                        return Ok(());
                    };

                    let location = GridLocation::new(row as usize, column as usize);
                    if !grid.add_component(name.clone(), location) {
                        debug!(cell = %cell_name, "position outside the grid, skipping cell");
                        return Ok(());
                    }
                    if let (Some(units), Some(data)) =
                        (units_table.as_deref(), grid.data_at_mut(location))
                    {
                        self.read_cell_data(cell, units, data)?;
                    }
                    Ok(())
                })?;
            }
            Ok(())
        })
    }

    /// Replay one cell's nested timestep groups. Unit strings are interned
    /// per grid: the head table's second column indexes the shared units
    /// table.
    fn read_cell_data(
        &self,
        cell: GroupHandle,
        units_table: &[String],
        data: &mut TimeSeriesStore,
    ) -> IoResult<()> {
        for timestep_name in self.store.child_group_names(cell) {
            self.with_group(cell, &timestep_name, |timestep| {
                let time = self.store.read_float_attr(timestep, names::TIME_ATTR)?;
                if self.store.has_attr(timestep, names::TIME_UNITS_ATTR) {
                    let units = self.store.read_str_attr(timestep, names::TIME_UNITS_ATTR)?;
                    data.set_time_units(&units);
                }

                let dataset_names = self.store.dataset_names(timestep);
                let mut pending: Vec<(String, Vec<FeaturePoint>)> = Vec::new();

                // Each feature's data table carries the numeric columns...
                for dataset_name in &dataset_names {
                    let Some(feature) = dataset_name.strip_suffix(names::DATA_TABLE_SUFFIX) else {
                        continue;
                    };
                    match self.store.read_dataset(timestep, dataset_name)? {
                        Dataset::FloatTable { columns: 5, values } => {
                            let points = values
                                .chunks_exact(5)
                                .map(|row| FeaturePoint {
                                    feature: feature.to_string(),
                                    value: row[0],
                                    uncertainty: row[1],
                                    units: String::new(),
                                    position: [row[2], row[3], row[4]],
                                })
                                .collect();
                            pending.push((feature.to_string(), points));
                        }
                        _ => {
                            return Err(IoError::UnexpectedDataset {
                                name: dataset_name.clone(),
                            });
                        }
                    }
                }

                // ...and its head table dereferences the units indirection.
                for dataset_name in &dataset_names {
                    let Some(feature) = dataset_name.strip_suffix(names::HEAD_TABLE_SUFFIX) else {
                        continue;
                    };
                    let Some((_, points)) =
                        pending.iter_mut().find(|(name, _)| name == feature)
                    else {
                        continue;
                    };
                    match self.store.read_dataset(timestep, dataset_name)? {
                        Dataset::IntTable { columns: 2, values } => {
                            for pair in values.chunks_exact(2) {
                                let point = usize::try_from(pair[0])
                                    .ok()
                                    .and_then(|i| points.get_mut(i));
                                let units = usize::try_from(pair[1])
                                    .ok()
                                    .and_then(|i| units_table.get(i));
                                if let (Some(point), Some(units)) = (point, units) {
                                    point.units = units.clone();
                                }
                            }
                        }
                        _ => {
                            return Err(IoError::UnexpectedDataset {
                                name: dataset_name.clone(),
                            });
                        }
                    }
                }

                for (_, points) in pending {
                    for point in points {
                        data.add(point, time);
                    }
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    fn read_grid_labels(&self, group: GroupHandle, labels: &mut GridLabels) -> IoResult<()> {
        self.read_core(group, labels.core_mut())?;
        if !self.store.has_group(group, names::LABELS_GROUP) {
            return Ok(());
        }
        self.with_group(group, names::LABELS_GROUP, |labels_group| {
            if self.store.has_dataset(labels_group, names::ROW_LABELS) {
                if let Dataset::StringVector(rows) =
                    self.store.read_dataset(labels_group, names::ROW_LABELS)?
                {
                    labels.set_row_labels(rows);
                }
            }
            if self.store.has_dataset(labels_group, names::COLUMN_LABELS) {
                if let Dataset::StringVector(columns) =
                    self.store.read_dataset(labels_group, names::COLUMN_LABELS)?
                {
                    labels.set_column_labels(columns);
                }
            }
            Ok(())
        })
    }

    fn read_material(&self, group: GroupHandle, material: &mut Material) -> IoResult<()> {
        self.read_core(group, material.core_mut())?;
        let kind = self.store.read_str_attr(group, names::MATERIAL_KIND_ATTR)?;
        if let Some(kind) = MaterialKind::parse(&kind) {
            material.set_kind(kind);
        }
        Ok(())
    }

    fn read_material_block(&self, group: GroupHandle, block: &mut MaterialBlock) -> IoResult<()> {
        self.read_core(group, block.core_mut())?;
        block.set_position(self.store.read_float_attr(group, names::POSITION_ATTR)?);
        for child_name in self.child_groups(group) {
            let child = self.with_group(group, &child_name, |child| {
                Ok(self.read_component(child))
            })?;
            if let Some(Component::Ring(ring)) = child {
                block.add_ring(ring);
            }
        }
        Ok(())
    }

    fn read_ring(&self, group: GroupHandle, ring: &mut Ring) -> IoResult<()> {
        self.read_core(group, ring.core_mut())?;
        ring.set_height(self.store.read_float_attr(group, names::HEIGHT_ATTR)?);
        ring.set_inner_radius(self.store.read_float_attr(group, names::INNER_RADIUS_ATTR)?);
        ring.set_outer_radius(self.store.read_float_attr(group, names::OUTER_RADIUS_ATTR)?);

        // The single child group holds the ring's material.
        for child_name in self.child_groups(group) {
            let child = self.with_group(group, &child_name, |child| {
                Ok(self.read_component(child))
            })?;
            if let Some(Component::Material(material)) = child {
                ring.set_material(material);
                break;
            }
        }
        Ok(())
    }

    fn read_tube(&self, group: GroupHandle, tube: &mut Tube) -> IoResult<()> {
        self.read_ring(group, tube.ring_mut())?;
        let kind = self.store.read_str_attr(group, names::TUBE_TYPE_ATTR)?;
        if let Some(kind) = TubeType::parse(&kind) {
            tube.set_kind(kind);
        }
        Ok(())
    }

    fn read_rod(&self, group: GroupHandle, rod: &mut Rod) -> IoResult<()> {
        self.read_core(group, rod.core_mut())?;
        rod.set_pressure(self.store.read_float_attr(group, names::PRESSURE_ATTR)?);

        let mut blocks = Vec::new();
        for child_name in self.child_groups(group) {
            let child = self.with_group(group, &child_name, |child| {
                Ok(self.read_component(child))
            })?;
            match child {
                Some(Component::Ring(clad)) => rod.set_clad(clad),
                Some(Component::Material(gas)) => rod.set_fill_gas(gas),
                Some(Component::MaterialBlock(block)) => blocks.push(block),
                _ => {}
            }
        }
        rod.set_blocks(blocks);
        Ok(())
    }

    /// The shared assembly read step: membership and placement are stored
    /// as sibling sub-groups and re-bound here after both are loaded.
    fn read_pin_assembly(&self, group: GroupHandle, assembly: &mut PinAssembly) -> IoResult<()> {
        self.read_core(group, assembly.core_mut())?;
        assembly.set_rod_pitch(self.store.read_float_attr(group, names::ROD_PITCH_ATTR)?);

        let mut rods = Composite::new();
        self.with_group(group, PinAssembly::ROD_COMPOSITE_NAME, |rods_group| {
            self.read_composite(rods_group, &mut rods)
        })?;

        let mut grid = GridManager::new(assembly.size());
        self.with_group(group, PinAssembly::ROD_GRID_NAME, |grid_group| {
            self.read_grid_manager(grid_group, &mut grid)
        })?;

        for name in rods.names() {
            if let Some(Component::Rod(rod)) = rods.remove_component(&name) {
                assembly.add_rod(rod);
            }
        }
        for name in assembly.rod_names() {
            for location in grid.locations_of(&name) {
                assembly.set_rod_location(&name, location.row, location.column);
                if let (Some(source), Some(target)) = (
                    grid.data_at(location),
                    assembly.rod_data_at_mut(location.row, location.column),
                ) {
                    *target = source.clone();
                }
            }
        }
        Ok(())
    }

    fn read_fuel_assembly(&self, group: GroupHandle, assembly: &mut FuelAssembly) -> IoResult<()> {
        self.read_pin_assembly(group, assembly.base_mut())?;

        if self.store.has_group(group, FuelAssembly::LABELS_NAME) {
            let mut labels = GridLabels::new(assembly.size());
            self.with_group(group, FuelAssembly::LABELS_NAME, |labels_group| {
                self.read_grid_labels(labels_group, &mut labels)
            })?;
            assembly.set_labels(labels);
        }

        let mut tubes = Composite::new();
        self.with_group(group, FuelAssembly::TUBE_COMPOSITE_NAME, |tubes_group| {
            self.read_composite(tubes_group, &mut tubes)
        })?;

        let mut grid = GridManager::new(assembly.size());
        self.with_group(group, FuelAssembly::TUBE_GRID_NAME, |grid_group| {
            self.read_grid_manager(grid_group, &mut grid)
        })?;

        for name in tubes.names() {
            if let Some(Component::Tube(tube)) = tubes.remove_component(&name) {
                assembly.add_tube(tube);
            }
        }
        for name in assembly.tube_names() {
            for location in grid.locations_of(&name) {
                assembly.set_tube_location(&name, location.row, location.column);
                if let (Some(source), Some(target)) = (
                    grid.data_at(location),
                    assembly.tube_data_at_mut(location.row, location.column),
                ) {
                    *target = source.clone();
                }
            }
        }
        Ok(())
    }

    fn read_control_bank(&self, group: GroupHandle, bank: &mut ControlBank) -> IoResult<()> {
        self.read_core(group, bank.core_mut())?;
        bank.set_step_size(self.store.read_float_attr(group, names::STEP_SIZE_ATTR)?);
        let max_steps = self.store.read_int_attr(group, names::MAX_STEPS_ATTR)?;
        bank.set_max_steps(max_steps.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
        Ok(())
    }

    fn read_incore_instrument(
        &self,
        group: GroupHandle,
        instrument: &mut IncoreInstrument,
    ) -> IoResult<()> {
        self.read_core(group, instrument.core_mut())?;
        for child_name in self.child_groups(group) {
            let child = self.with_group(group, &child_name, |child| {
                Ok(self.read_component(child))
            })?;
            if let Some(Component::Ring(thimble)) = child {
                instrument.set_thimble(thimble);
                break;
            }
        }
        Ok(())
    }

    /// The reactor read step: collect raw children, partition them into
    /// category composites, category grids, and labels by their reserved
    /// names, then replay every grid against its category's membership.
    /// Membership and placement are stored as siblings, so this two-phase
    /// reconciliation is what rebinds them.
    fn read_reactor(&self, group: GroupHandle, reactor: &mut Reactor) -> IoResult<()> {
        self.read_core(group, reactor.core_mut())?;
        reactor.set_fuel_assembly_pitch(
            self.store
                .read_float_attr(group, names::FUEL_ASSEMBLY_PITCH_ATTR)?,
        );

        let mut grids: Vec<(AssemblyKind, GridManager)> = Vec::new();
        for child_name in self.child_groups(group) {
            let child = self.with_group(group, &child_name, |child| {
                Ok(self.read_component(child))
            })?;
            match child {
                Some(Component::Composite(mut members)) => {
                    if let Some(kind) = AssemblyKind::from_composite_name(members.core().name()) {
                        for name in members.names() {
                            if let Some(assembly) = members.remove_component(&name) {
                                reactor.add_assembly(kind, assembly);
                            }
                        }
                    }
                }
                Some(Component::GridManager(grid)) => {
                    if let Some(kind) = AssemblyKind::from_grid_name(grid.core().name()) {
                        grids.push((kind, grid));
                    }
                }
                Some(Component::GridLabels(labels)) => {
                    reactor.set_labels(labels);
                }
                _ => {}
            }
        }

        for (kind, grid) in grids {
            for name in reactor.assembly_names(kind) {
                for location in grid.locations_of(&name) {
                    reactor.set_assembly_location(kind, &name, location.row, location.column);
                    if let (Some(source), Some(target)) = (
                        grid.data_at(location),
                        reactor.assembly_data_at_mut(kind, location.row, location.column),
                    ) {
                        *target = source.clone();
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lwr_store::MemStore;

    #[test]
    fn group_without_tag_reads_as_none() {
        let mut store = MemStore::new();
        let root = store.root();
        let group = store.create_group(root, "not a component").unwrap();
        store.write_int_attr(group, "whatever", 3).unwrap();

        let reader = ComponentReader::new(&store);
        assert!(reader.read_component(group).is_none());
        store.close_group(group);
        assert_eq!(store.open_handles(), 0);
    }

    #[test]
    fn unknown_tag_reads_as_none() {
        let mut store = MemStore::new();
        let root = store.root();
        let group = store.create_group(root, "mystery").unwrap();
        store.write_str_attr(group, names::TAG_ATTR, "Steam Generator").unwrap();

        let reader = ComponentReader::new(&store);
        assert!(reader.read_component(group).is_none());
        store.close_group(group);
        assert_eq!(store.open_handles(), 0);
    }

    #[test]
    fn truncated_component_reads_as_none_without_leaking_handles() {
        let mut store = MemStore::new();
        let root = store.root();
        let group = store.create_group(root, "broken").unwrap();
        store.write_str_attr(group, names::TAG_ATTR, "Component").unwrap();
        // Identity attributes are missing, so the base read step fails.

        let reader = ComponentReader::new(&store);
        assert!(reader.read_component(group).is_none());
        store.close_group(group);
        assert_eq!(store.open_handles(), 0);
    }
}
