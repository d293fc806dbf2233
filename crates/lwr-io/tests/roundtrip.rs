//! Write-then-read integration tests over an in-memory container.

use lwr_core::{FeaturePoint, GridLocation};
use lwr_io::{create_component, read_tree, write_tree, ComponentReader, ComponentWriter};
use lwr_model::{
    AssemblyKind, Component, ComponentCore, ComponentTag, Composite, ControlBank, FuelAssembly,
    GridLabels, GridManager, IncoreInstrument, Material, MaterialBlock, MaterialKind, Reactor,
    Ring, Rod, Tube, TubeType,
};
use lwr_store::{Container, MemStore};

fn roundtrip(component: &Component) -> Component {
    let mut store = MemStore::new();
    write_tree(&mut store, component).unwrap();
    let read_back = read_tree(&store).expect("tree should read back");
    assert_eq!(store.open_handles(), 0, "codec leaked group handles");
    read_back
}

fn point(feature: &str, value: f64, units: &str) -> FeaturePoint {
    FeaturePoint::new(feature)
        .with_value(value)
        .with_uncertainty(value / 100.0)
        .with_units(units)
        .with_position([1.0, 2.0, 3.0])
}

#[test]
fn grid_manager_placement_survives_the_roundtrip() {
    let mut grid = GridManager::new(5);
    grid.add_component("rodA", GridLocation::new(2, 3));

    let read_back = roundtrip(&Component::GridManager(grid.clone()));
    let Component::GridManager(read_back) = read_back else {
        panic!("expected a grid manager");
    };

    assert_eq!(read_back.component_name(GridLocation::new(2, 3)), Some("rodA"));
    assert_eq!(read_back.locations_of("rodA"), vec![GridLocation::new(2, 3)]);
    assert_eq!(read_back, grid);
}

#[test]
fn grid_cell_measurements_survive_with_interned_units() {
    let mut grid = GridManager::new(5);
    grid.add_component("rodA", GridLocation::new(2, 3));
    grid.add_component("rodA", GridLocation::new(4, 0));
    grid.add_component("rodB", GridLocation::new(0, 0));

    let data = grid.data_at_mut(GridLocation::new(2, 3)).unwrap();
    data.add(point("Axial Flux", 1.0e13, "n/cm2-s"), 0.0);
    data.add(point("Axial Flux", 1.1e13, "n/cm2-s"), 0.0);
    data.add(point("Clad Temperature", 612.0, "K"), 0.0);
    data.add(point("Axial Flux", 0.9e13, "n/cm2-s"), 10.0);
    data.set_time_units("hours");

    let read_back = roundtrip(&Component::GridManager(grid.clone()));
    let Component::GridManager(read_back) = read_back else {
        panic!("expected a grid manager");
    };

    let data = read_back.data_at(GridLocation::new(2, 3)).unwrap();
    assert_eq!(data.times(), vec![0.0, 10.0]);
    assert_eq!(data.time_units(), "hours");
    // Both same-feature points at the same timestep must come back.
    assert_eq!(data.data_at(0.0, "Axial Flux").len(), 2);
    assert_eq!(data.data_at(0.0, "Axial Flux")[1].units, "n/cm2-s");
    assert_eq!(data.data_at(0.0, "Clad Temperature")[0].units, "K");
    assert_eq!(read_back, grid);
}

#[test]
fn composite_children_survive_and_order_by_name() {
    let mut composite = Composite::named("Internals");
    for name in ["Y", "X"] {
        let mut core = ComponentCore::with_name(ComponentTag::Component, name);
        core.data_mut().add(point("Flux", 5.0, "n/cm2-s"), 1.5);
        composite.add_component(Component::Basic(core));
    }

    let read_back = roundtrip(&Component::Composite(composite.clone()));
    let Component::Composite(read_back) = read_back else {
        panic!("expected a composite");
    };

    assert_eq!(read_back.names(), vec!["X", "Y"]);
    assert_eq!(read_back, composite);
}

#[test]
fn state_point_data_keeps_timestep_insertion_order() {
    let mut core = ComponentCore::with_name(ComponentTag::Component, "probe");
    core.data_mut().add(point("Flux", 1.0, "n/cm2-s"), 2.0);
    core.data_mut().add(point("Flux", 2.0, "n/cm2-s"), 0.5);
    core.data_mut().set_time_units("days");

    let read_back = roundtrip(&Component::Basic(core.clone()));
    // Non-chronological insertion order is part of the contract.
    assert_eq!(read_back.core().data().times(), vec![2.0, 0.5]);
    assert_eq!(read_back, Component::Basic(core));
}

#[test]
fn rod_with_blocks_and_rings_survives() {
    let mut rod = Rod::named("fuel rod 7");
    rod.set_pressure(1550.0);

    let mut clad = Ring::new();
    clad.core_mut().set_name("Zirc Clad");
    clad.set_height(3.8);
    clad.set_inner_radius(0.41);
    clad.set_outer_radius(0.47);
    clad.set_material(Material::named("Zircaloy-4", MaterialKind::Solid));
    rod.set_clad(clad);

    rod.set_fill_gas(Material::named("Helium", MaterialKind::Gas));

    let mut block = MaterialBlock::new();
    block.core_mut().set_name("pellet stack");
    block.set_position(1.2);
    let mut pellet = Ring::new();
    pellet.core_mut().set_name("Pellet");
    pellet.set_outer_radius(0.40);
    pellet.set_material(Material::named("UO2", MaterialKind::Solid));
    block.add_ring(pellet);
    rod.add_block(block);

    let read_back = roundtrip(&Component::Rod(rod.clone()));
    let Component::Rod(read_back) = read_back else {
        panic!("expected a rod");
    };

    assert_eq!(read_back.pressure(), 1550.0);
    assert_eq!(read_back.clad().material().core().name(), "Zircaloy-4");
    assert_eq!(read_back.blocks().len(), 1);
    assert_eq!(read_back.blocks()[0].rings()[0].core().name(), "Pellet");
    assert_eq!(read_back, rod);
}

#[test]
fn fuel_assembly_rebinds_membership_and_placement() {
    let mut assembly = FuelAssembly::new(17);
    assembly.core_mut().set_name("FA-01");
    assembly.base_mut().set_rod_pitch(1.26);

    assembly.base_mut().add_rod(Rod::named("rodA"));
    assembly.base_mut().add_rod(Rod::named("rodB"));
    assembly.base_mut().set_rod_location("rodA", 2, 3);
    assembly.base_mut().set_rod_location("rodA", 2, 4);
    assembly.base_mut().set_rod_location("rodB", 8, 8);
    assembly
        .base_mut()
        .rod_data_at_mut(2, 3)
        .unwrap()
        .add(point("Burnup", 41.5, "GWd/tU"), 100.0);

    let mut tube = Tube::new();
    tube.core_mut().set_name("instr tube");
    tube.set_kind(TubeType::Instrument);
    assembly.add_tube(tube);
    assembly.set_tube_location("instr tube", 8, 8);

    let mut labels = GridLabels::new(17);
    labels.set_row_labels((1..=17).map(|i| i.to_string()).collect());
    labels.set_column_labels((b'A'..=b'Q').map(|c| char::from(c).to_string()).collect());
    assembly.set_labels(labels.clone());

    let read_back = roundtrip(&Component::FuelAssembly(assembly.clone()));
    let Component::FuelAssembly(read_back) = read_back else {
        panic!("expected a fuel assembly");
    };

    assert_eq!(read_back.base().rod_name_at(2, 3), Some("rodA"));
    assert_eq!(
        read_back.base().rod_locations("rodA"),
        vec![GridLocation::new(2, 3), GridLocation::new(2, 4)]
    );
    assert_eq!(
        read_back.base().rod_data_at(2, 3).unwrap().data_at(100.0, "Burnup")[0].value,
        41.5
    );
    assert_eq!(read_back.tube_name_at(8, 8), Some("instr tube"));
    assert_eq!(read_back.tube_by_name("instr tube").unwrap().kind(), TubeType::Instrument);
    assert_eq!(read_back.labels().row_label(0), Some("1"));
    assert_eq!(read_back, assembly);
}

#[test]
fn reactor_reconciles_categories_after_reading() {
    let mut reactor = Reactor::new(15);
    reactor.core_mut().set_name("Plant Unit 1");
    reactor.set_fuel_assembly_pitch(21.5);

    let mut fa = FuelAssembly::new(17);
    fa.core_mut().set_name("FA-01");
    fa.base_mut().add_rod(Rod::named("rodA"));
    fa.base_mut().set_rod_location("rodA", 0, 0);
    reactor.add_assembly(AssemblyKind::Fuel, Component::FuelAssembly(fa));
    reactor.set_assembly_location(AssemblyKind::Fuel, "FA-01", 7, 7);
    reactor.set_assembly_location(AssemblyKind::Fuel, "FA-01", 7, 8);
    reactor
        .assembly_data_at_mut(AssemblyKind::Fuel, 7, 7)
        .unwrap()
        .add(point("Power Fraction", 0.012, "1"), 0.0);

    let mut bank = ControlBank::new();
    bank.core_mut().set_name("Bank D");
    bank.set_step_size(1.58);
    bank.set_max_steps(230);
    reactor.add_assembly(AssemblyKind::ControlBank, Component::ControlBank(bank));
    reactor.set_assembly_location(AssemblyKind::ControlBank, "Bank D", 3, 3);

    let mut instrument = IncoreInstrument::new();
    instrument.core_mut().set_name("detector 12");
    reactor.add_assembly(
        AssemblyKind::IncoreInstrument,
        Component::IncoreInstrument(instrument),
    );

    let mut labels = GridLabels::new(15);
    labels.set_row_labels((1..=15).map(|i| i.to_string()).collect());
    reactor.set_labels(labels);

    let read_back = roundtrip(&Component::Reactor(reactor.clone()));
    let Component::Reactor(read_back) = read_back else {
        panic!("expected a reactor");
    };

    assert_eq!(read_back.assembly_names(AssemblyKind::Fuel), vec!["FA-01"]);
    assert_eq!(read_back.assembly_name_at(AssemblyKind::Fuel, 7, 7), Some("FA-01"));
    assert_eq!(
        read_back.assembly_locations(AssemblyKind::Fuel, "FA-01"),
        vec![GridLocation::new(7, 7), GridLocation::new(7, 8)]
    );
    assert_eq!(
        read_back
            .assembly_data_at(AssemblyKind::Fuel, 7, 7)
            .unwrap()
            .data_at(0.0, "Power Fraction")[0]
            .value,
        0.012
    );
    assert_eq!(
        read_back.assembly_name_at(AssemblyKind::ControlBank, 3, 3),
        Some("Bank D")
    );
    assert!(read_back
        .assembly_by_name(AssemblyKind::IncoreInstrument, "detector 12")
        .is_some());
    assert_eq!(read_back, reactor);
}

#[test]
fn every_tag_roundtrips_to_its_own_variant() {
    for tag in ComponentTag::ALL {
        let component = create_component(tag, Some(3));
        let read_back = roundtrip(&component);
        assert_eq!(read_back.tag(), tag, "tag mismatch for {tag}");
        assert_eq!(read_back, component, "roundtrip mismatch for {tag}");
    }
}

#[test]
fn untagged_groups_are_not_components() {
    let mut composite = Composite::named("Internals");
    composite.add_component(Component::Basic(ComponentCore::with_name(
        ComponentTag::Component,
        "X",
    )));

    let mut store = MemStore::new();
    write_tree(&mut store, &Component::Composite(composite)).unwrap();

    // Plant an untagged group beside the real child.
    let root = store.root();
    let group = store.open_group(root, "Internals").unwrap();
    let noise = store.create_group(group, "annotations").unwrap();
    store.close_group(noise);
    store.close_group(group);

    let Component::Composite(read_back) = read_tree(&store).unwrap() else {
        panic!("expected a composite");
    };
    assert_eq!(read_back.names(), vec!["X"]);
}

#[test]
fn a_corrupted_child_is_dropped_but_siblings_survive() {
    let mut composite = Composite::named("Internals");
    for name in ["X", "Y", "Z"] {
        composite.add_component(Component::Basic(ComponentCore::with_name(
            ComponentTag::Component,
            name,
        )));
    }

    let mut store = MemStore::new();
    write_tree(&mut store, &Component::Composite(composite)).unwrap();

    // Corrupt one child's tag.
    let root = store.root();
    let group = store.open_group(root, "Internals").unwrap();
    let child = store.open_group(group, "Y").unwrap();
    store.write_str_attr(child, "tag", "Not A Real Tag").unwrap();
    store.close_group(child);
    store.close_group(group);

    let Component::Composite(read_back) = read_tree(&store).unwrap() else {
        panic!("expected a composite");
    };
    assert_eq!(read_back.names(), vec!["X", "Z"]);
    assert_eq!(store.open_handles(), 0);
}

#[test]
fn file_form_preserves_the_tree() {
    let mut grid = GridManager::new(5);
    grid.add_component("rodA", GridLocation::new(2, 3));
    grid.data_at_mut(GridLocation::new(2, 3))
        .unwrap()
        .add(point("Flux", 3.0, "n/cm2-s"), 0.0);
    let component = Component::GridManager(grid);

    let mut store = MemStore::new();
    write_tree(&mut store, &component).unwrap();

    let path = std::env::temp_dir().join("lwr_io_file_roundtrip.lwrk");
    lwr_store::save(&store, &path).unwrap();
    let loaded = lwr_store::load(&path).unwrap();

    assert_eq!(read_tree(&loaded).unwrap(), component);
}

#[test]
fn duplicate_root_write_fails_cleanly() {
    // Two distinct trees written under the same root name collide; the
    // second write fails cleanly rather than corrupting the first.
    let mut store = MemStore::new();
    let a = Component::Basic(ComponentCore::with_name(ComponentTag::Component, "X"));
    write_tree(&mut store, &a).unwrap();
    assert!(write_tree(&mut store, &a).is_err());
    assert_eq!(store.open_handles(), 0);

    // The original tree is intact.
    assert_eq!(read_tree(&store).unwrap(), a);
}

#[test]
fn reader_and_writer_agree_on_explicit_handles() {
    let mut store = MemStore::new();
    let root = store.root();
    let group = store.create_group(root, "standalone").unwrap();

    let mut bank = ControlBank::new();
    bank.core_mut().set_name("standalone");
    bank.set_step_size(0.66);
    ComponentWriter::new(&mut store)
        .write_component(group, &Component::ControlBank(bank.clone()))
        .unwrap();
    store.close_group(group);

    let group = store.open_group(root, "standalone").unwrap();
    let read_back = ComponentReader::new(&store).read_component(group).unwrap();
    store.close_group(group);

    assert_eq!(read_back, Component::ControlBank(bank));
    assert_eq!(store.open_handles(), 0);
}
