//! Depth-first serialization of component trees.

use lwr_core::TimeSeriesStore;
use lwr_model::{
    AssemblyKind, Component, ComponentCore, Composite, ControlBank, FuelAssembly, GridLabels,
    GridManager, IncoreInstrument, Material, MaterialBlock, PinAssembly, Reactor, Ring, Rod, Tube,
};
use lwr_store::{Container, Dataset, GroupHandle, PointRow};
use tracing::warn;

use crate::names;
use crate::IoResult;

/// Writes components into open container groups.
///
/// One group per node: identity attributes, the reserved `State Point Data`
/// sub-group, then the type-specific content. The output is what
/// [`ComponentReader`](crate::ComponentReader) reconstructs from.
pub struct ComponentWriter<'a, C: Container> {
    store: &'a mut C,
}

impl<'a, C: Container> ComponentWriter<'a, C> {
    pub fn new(store: &'a mut C) -> Self {
        Self { store }
    }

    pub fn root(&self) -> GroupHandle {
        self.store.root()
    }

    /// Create a child group named after the component and write it there.
    ///
    /// A failure while writing the component's content is logged and the
    /// node abandoned; it never aborts sibling writes. Failure to create
    /// the group itself (a name collision) propagates to the enclosing
    /// node's boundary.
    pub fn write_child(&mut self, parent: GroupHandle, component: &Component) -> IoResult<()> {
        let group = self.store.create_group(parent, component.name())?;
        if let Err(error) = self.write_component(group, component) {
            warn!(
                tag = %component.tag(),
                name = %component.name(),
                %error,
                "could not write component"
            );
        }
        self.store.close_group(group);
        Ok(())
    }

    /// Write a component's content into an already-open group.
    pub fn write_component(&mut self, group: GroupHandle, component: &Component) -> IoResult<()> {
        match component {
            Component::Basic(core) => self.write_core(group, core),
            Component::Composite(composite) => self.write_composite(group, composite),
            Component::GridManager(grid) => self.write_grid_manager(group, grid),
            Component::GridLabels(labels) => self.write_grid_labels(group, labels),
            Component::Material(material) => self.write_material(group, material),
            Component::MaterialBlock(block) => self.write_material_block(group, block),
            Component::Ring(ring) => self.write_ring(group, ring),
            Component::Tube(tube) => self.write_tube(group, tube),
            Component::Rod(rod) => self.write_rod(group, rod),
            Component::PinAssembly(assembly) => self.write_pin_assembly(group, assembly),
            Component::FuelAssembly(assembly) => self.write_fuel_assembly(group, assembly),
            Component::RodClusterAssembly(assembly) => self.write_pin_assembly(group, assembly.base()),
            Component::ControlBank(bank) => self.write_control_bank(group, bank),
            Component::IncoreInstrument(instrument) => self.write_incore_instrument(group, instrument),
            Component::Reactor(reactor) => self.write_reactor(group, reactor),
        }
    }

    /// Create `name` under `parent`, run `f` on it, and close it on every
    /// exit path.
    fn with_new_group<T>(
        &mut self,
        parent: GroupHandle,
        name: &str,
        f: impl FnOnce(&mut Self, GroupHandle) -> IoResult<T>,
    ) -> IoResult<T> {
        let group = self.store.create_group(parent, name)?;
        let result = f(self, group);
        self.store.close_group(group);
        result
    }

    /// The base write step shared by every variant: tag, identity, and the
    /// `State Point Data` sub-group.
    fn write_core(&mut self, group: GroupHandle, core: &ComponentCore) -> IoResult<()> {
        self.store
            .write_str_attr(group, names::TAG_ATTR, core.tag().as_str())?;
        self.store
            .write_int_attr(group, names::ID_ATTR, i64::from(core.id()))?;
        self.store.write_str_attr(group, names::NAME_ATTR, core.name())?;
        self.store
            .write_str_attr(group, names::DESCRIPTION_ATTR, core.description())?;
        self.write_state_point_data(group, core.data())
    }

    /// One sub-group per timestep, one `<feature> dataTable` per feature.
    /// The group is written even when the provider is empty, keeping the
    /// layout uniform.
    fn write_state_point_data(&mut self, group: GroupHandle, data: &TimeSeriesStore) -> IoResult<()> {
        self.with_new_group(group, names::STATE_POINT_DATA, |w, spd| {
            for (step, time) in data.times().into_iter().enumerate() {
                let group_name = format!("{}{step}", names::TIMESTEP_PREFIX);
                w.with_new_group(spd, &group_name, |w, timestep| {
                    w.store.write_float_attr(timestep, names::TIME_ATTR, time)?;
                    w.store
                        .write_str_attr(timestep, names::TIME_UNITS_ATTR, data.time_units())?;
                    for feature in data.features_at(time) {
                        let rows: Vec<PointRow> = data
                            .data_at(time, &feature)
                            .iter()
                            .map(|point| PointRow {
                                value: point.value,
                                uncertainty: point.uncertainty,
                                units: point.units.clone(),
                                position: point.position,
                            })
                            .collect();
                        let dataset_name = format!("{feature}{}", names::DATA_TABLE_SUFFIX);
                        w.store
                            .write_dataset(timestep, &dataset_name, Dataset::PointTable(rows))?;
                    }
                    Ok(())
                })?;
            }
            Ok(())
        })
    }

    fn write_composite(&mut self, group: GroupHandle, composite: &Composite) -> IoResult<()> {
        self.write_core(group, composite.core())?;
        for (_, child) in composite.iter() {
            self.write_child(group, child)?;
        }
        Ok(())
    }

    /// Emit the `Positions` sub-group with the interned name/units lookup
    /// tables. A grid with no occupied cell gets no `Positions` group at
    /// all.
    fn write_grid_manager(&mut self, group: GroupHandle, grid: &GridManager) -> IoResult<()> {
        self.write_core(group, grid.core())?;
        self.store
            .write_int_attr(group, names::SIZE_ATTR, grid.size() as i64)?;

        if grid.is_empty() {
            return Ok(());
        }

        self.with_new_group(group, names::POSITIONS, |w, positions| {
            let mut names_table: Vec<String> = Vec::new();
            let mut units_table: Vec<String> = Vec::new();

            for (location, entry) in grid.occupied() {
                let ordinal = intern(&mut names_table, entry.name());
                let cell_name = format!(
                    "{}{} {}",
                    names::POSITION_PREFIX,
                    location.row,
                    location.column
                );
                w.with_new_group(positions, &cell_name, |w, cell| {
                    w.store.write_dataset(
                        cell,
                        names::POSITION_DATASET,
                        Dataset::IntVector(vec![
                            location.row as i64,
                            location.column as i64,
                            ordinal as i64,
                        ]),
                    )?;
                    w.write_cell_data(cell, entry.data(), &mut units_table)
                })?;
            }

            w.store.write_dataset(
                positions,
                names::POSITION_NAMES_TABLE,
                Dataset::StringVector(names_table),
            )?;
            if !units_table.is_empty() {
                w.store.write_dataset(
                    positions,
                    names::UNITS_TABLE,
                    Dataset::StringVector(units_table),
                )?;
            }
            Ok(())
        })
    }

    /// Per-cell measurements: a 5-column data table per feature plus a
    /// 2-column head table referencing the shared units table, so unit
    /// strings are stored once per grid.
    fn write_cell_data(
        &mut self,
        cell: GroupHandle,
        data: &TimeSeriesStore,
        units_table: &mut Vec<String>,
    ) -> IoResult<()> {
        for (step, time) in data.times().into_iter().enumerate() {
            let group_name = format!("{}{step}", names::TIMESTEP_PREFIX);
            let timestep = self.store.create_group(cell, &group_name)?;
            let result: IoResult<()> = (|| {
                self.store.write_float_attr(timestep, names::TIME_ATTR, time)?;
                self.store
                    .write_str_attr(timestep, names::TIME_UNITS_ATTR, data.time_units())?;
                for feature in data.features_at(time) {
                    let points = data.data_at(time, &feature);
                    let mut values = Vec::with_capacity(points.len() * 5);
                    let mut head = Vec::with_capacity(points.len() * 2);
                    for (row, point) in points.iter().enumerate() {
                        values.extend_from_slice(&[
                            point.value,
                            point.uncertainty,
                            point.position[0],
                            point.position[1],
                            point.position[2],
                        ]);
                        head.push(row as i64);
                        head.push(intern(units_table, &point.units) as i64);
                    }
                    self.store.write_dataset(
                        timestep,
                        &format!("{feature}{}", names::DATA_TABLE_SUFFIX),
                        Dataset::FloatTable { columns: 5, values },
                    )?;
                    self.store.write_dataset(
                        timestep,
                        &format!("{feature}{}", names::HEAD_TABLE_SUFFIX),
                        Dataset::IntTable { columns: 2, values: head },
                    )?;
                }
                Ok(())
            })();
            self.store.close_group(timestep);
            result?;
        }
        Ok(())
    }

    fn write_grid_labels(&mut self, group: GroupHandle, labels: &GridLabels) -> IoResult<()> {
        self.write_core(group, labels.core())?;
        self.store
            .write_int_attr(group, names::SIZE_ATTR, labels.size() as i64)?;
        self.with_new_group(group, names::LABELS_GROUP, |w, labels_group| {
            if !labels.row_labels().is_empty() {
                w.store.write_dataset(
                    labels_group,
                    names::ROW_LABELS,
                    Dataset::StringVector(labels.row_labels().to_vec()),
                )?;
            }
            if !labels.column_labels().is_empty() {
                w.store.write_dataset(
                    labels_group,
                    names::COLUMN_LABELS,
                    Dataset::StringVector(labels.column_labels().to_vec()),
                )?;
            }
            Ok(())
        })
    }

    fn write_material(&mut self, group: GroupHandle, material: &Material) -> IoResult<()> {
        self.write_core(group, material.core())?;
        self.store
            .write_str_attr(group, names::MATERIAL_KIND_ATTR, material.kind().as_str())
            .map_err(Into::into)
    }

    fn write_material_block(&mut self, group: GroupHandle, block: &MaterialBlock) -> IoResult<()> {
        self.write_core(group, block.core())?;
        self.store
            .write_float_attr(group, names::POSITION_ATTR, block.position())?;
        for ring in block.rings() {
            self.with_new_group(group, ring.core().name(), |w, g| w.write_ring(g, ring))?;
        }
        Ok(())
    }

    fn write_ring(&mut self, group: GroupHandle, ring: &Ring) -> IoResult<()> {
        self.write_core(group, ring.core())?;
        self.store
            .write_float_attr(group, names::HEIGHT_ATTR, ring.height())?;
        self.store
            .write_float_attr(group, names::INNER_RADIUS_ATTR, ring.inner_radius())?;
        self.store
            .write_float_attr(group, names::OUTER_RADIUS_ATTR, ring.outer_radius())?;
        let material = ring.material();
        self.with_new_group(group, material.core().name(), |w, g| {
            w.write_material(g, material)
        })
    }

    fn write_tube(&mut self, group: GroupHandle, tube: &Tube) -> IoResult<()> {
        self.write_ring(group, tube.ring())?;
        self.store
            .write_str_attr(group, names::TUBE_TYPE_ATTR, tube.kind().as_str())
            .map_err(Into::into)
    }

    fn write_rod(&mut self, group: GroupHandle, rod: &Rod) -> IoResult<()> {
        self.write_core(group, rod.core())?;
        self.store
            .write_float_attr(group, names::PRESSURE_ATTR, rod.pressure())?;

        let gas = rod.fill_gas();
        self.with_new_group(group, gas.core().name(), |w, g| w.write_material(g, gas))?;

        let clad = rod.clad();
        self.with_new_group(group, clad.core().name(), |w, g| w.write_ring(g, clad))?;

        for block in rod.blocks() {
            self.with_new_group(group, block.core().name(), |w, g| {
                w.write_material_block(g, block)
            })?;
        }
        Ok(())
    }

    fn write_pin_assembly(&mut self, group: GroupHandle, assembly: &PinAssembly) -> IoResult<()> {
        self.write_core(group, assembly.core())?;
        self.store
            .write_int_attr(group, names::SIZE_ATTR, assembly.size() as i64)?;
        self.store
            .write_float_attr(group, names::ROD_PITCH_ATTR, assembly.rod_pitch())?;

        let rods = assembly.rods();
        self.with_new_group(group, rods.core().name(), |w, g| w.write_composite(g, rods))?;

        let grid = assembly.rod_grid();
        self.with_new_group(group, grid.core().name(), |w, g| w.write_grid_manager(g, grid))
    }

    fn write_fuel_assembly(&mut self, group: GroupHandle, assembly: &FuelAssembly) -> IoResult<()> {
        self.write_pin_assembly(group, assembly.base())?;

        let labels = assembly.labels();
        self.with_new_group(group, labels.core().name(), |w, g| {
            w.write_grid_labels(g, labels)
        })?;

        let tubes = assembly.tubes();
        self.with_new_group(group, tubes.core().name(), |w, g| w.write_composite(g, tubes))?;

        let grid = assembly.tube_grid();
        self.with_new_group(group, grid.core().name(), |w, g| w.write_grid_manager(g, grid))
    }

    fn write_control_bank(&mut self, group: GroupHandle, bank: &ControlBank) -> IoResult<()> {
        self.write_core(group, bank.core())?;
        self.store
            .write_float_attr(group, names::STEP_SIZE_ATTR, bank.step_size())?;
        self.store
            .write_int_attr(group, names::MAX_STEPS_ATTR, i64::from(bank.max_steps()))
            .map_err(Into::into)
    }

    fn write_incore_instrument(
        &mut self,
        group: GroupHandle,
        instrument: &IncoreInstrument,
    ) -> IoResult<()> {
        self.write_core(group, instrument.core())?;
        let thimble = instrument.thimble();
        self.with_new_group(group, thimble.core().name(), |w, g| w.write_ring(g, thimble))
    }

    /// The reactor's category composites and grids are written as sibling
    /// children under their reserved names; the reader reassembles the
    /// pairs afterwards.
    fn write_reactor(&mut self, group: GroupHandle, reactor: &Reactor) -> IoResult<()> {
        self.write_core(group, reactor.core())?;
        self.store
            .write_int_attr(group, names::SIZE_ATTR, reactor.size() as i64)?;
        self.store.write_float_attr(
            group,
            names::FUEL_ASSEMBLY_PITCH_ATTR,
            reactor.fuel_assembly_pitch(),
        )?;

        if let Some(labels) = reactor.labels() {
            self.with_new_group(group, labels.core().name(), |w, g| {
                w.write_grid_labels(g, labels)
            })?;
        }

        for kind in AssemblyKind::ALL {
            let members = reactor.members(kind);
            self.with_new_group(group, members.core().name(), |w, g| {
                w.write_composite(g, members)
            })?;

            let grid = reactor.grid(kind);
            self.with_new_group(group, grid.core().name(), |w, g| {
                w.write_grid_manager(g, grid)
            })?;
        }
        Ok(())
    }
}

/// Index of `value` in the table, appending it on first sight.
fn intern(table: &mut Vec<String>, value: &str) -> usize {
    match table.iter().position(|v| v == value) {
        Some(index) => index,
        None => {
            table.push(value.to_string());
            table.len() - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lwr_core::FeaturePoint;
    use lwr_store::MemStore;

    #[test]
    fn interning_is_first_seen_order() {
        let mut table = Vec::new();
        assert_eq!(intern(&mut table, "K"), 0);
        assert_eq!(intern(&mut table, "MPa"), 1);
        assert_eq!(intern(&mut table, "K"), 0);
        assert_eq!(table, vec!["K", "MPa"]);
    }

    #[test]
    fn empty_grid_gets_no_positions_group() {
        let mut store = MemStore::new();
        let grid = GridManager::new(4);
        let root = store.root();
        let group = store.create_group(root, "grid").unwrap();
        ComponentWriter::new(&mut store)
            .write_component(group, &Component::GridManager(grid))
            .unwrap();
        store.close_group(group);

        let group = store.open_group(root, "grid").unwrap();
        assert!(!store.has_group(group, names::POSITIONS));
        assert!(store.has_group(group, names::STATE_POINT_DATA));
        store.close_group(group);
        assert_eq!(store.open_handles(), 0);
    }

    #[test]
    fn state_point_data_is_always_written() {
        let mut store = MemStore::new();
        let mut core = ComponentCore::new(lwr_model::ComponentTag::Component);
        core.data_mut().add(FeaturePoint::new("Flux"), 0.0);

        let root = store.root();
        let group = store.create_group(root, "c").unwrap();
        ComponentWriter::new(&mut store)
            .write_component(group, &Component::Basic(core))
            .unwrap();
        store.close_group(group);

        let group = store.open_group(root, "c").unwrap();
        let spd = store.open_group(group, names::STATE_POINT_DATA).unwrap();
        assert_eq!(store.child_group_names(spd), vec!["Timestep: 0"]);
        store.close_group(spd);
        store.close_group(group);
        assert_eq!(store.open_handles(), 0);
    }
}
