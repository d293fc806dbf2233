//! Randomized write-then-read coverage.

use lwr_core::{FeaturePoint, GridLocation};
use lwr_io::{read_tree, write_tree};
use lwr_model::{Component, ComponentCore, ComponentTag, Composite, GridManager};
use lwr_store::MemStore;
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9 ]{0,11}[a-z0-9]".prop_map(|s| s.trim().to_string())
}

fn point_strategy() -> impl Strategy<Value = (String, f64, f64, String)> {
    (
        name_strategy(),
        -1.0e6..1.0e6_f64,
        0.0..100.0_f64,
        prop_oneof![Just("K".to_string()), Just("MPa".to_string()), Just("1".to_string())],
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn basic_components_with_random_series_roundtrip(
        names in prop::collection::btree_set(name_strategy(), 1..6),
        points in prop::collection::vec((point_strategy(), 0.0..50.0_f64), 0..20),
    ) {
        let mut composite = Composite::named("randomized");
        let names: Vec<String> = names.into_iter().collect();
        for name in &names {
            composite.add_component(Component::Basic(ComponentCore::with_name(
                ComponentTag::Component,
                name,
            )));
        }

        // Scatter the points over the children.
        for (index, ((feature, value, uncertainty, units), time)) in points.into_iter().enumerate() {
            let target = names[index % names.len()].clone();
            if let Some(child) = composite.component_mut(&target) {
                child.core_mut().data_mut().add(
                    FeaturePoint::new(feature)
                        .with_value(value)
                        .with_uncertainty(uncertainty)
                        .with_units(units),
                    time,
                );
            }
        }

        let original = Component::Composite(composite);
        let mut store = MemStore::new();
        write_tree(&mut store, &original).unwrap();
        let read_back = read_tree(&store).expect("tree should read back");

        prop_assert_eq!(read_back, original);
        prop_assert_eq!(store.open_handles(), 0);
    }

    #[test]
    fn random_grids_roundtrip(
        size in 1_usize..12,
        cells in prop::collection::vec((0_usize..12, 0_usize..12, name_strategy()), 0..16),
    ) {
        let mut grid = GridManager::new(size);
        for (row, column, name) in cells {
            // Out-of-range cells are ignored by contract.
            grid.add_component(name, GridLocation::new(row, column));
        }

        let original = Component::GridManager(grid);
        let mut store = MemStore::new();
        write_tree(&mut store, &original).unwrap();
        let read_back = read_tree(&store).expect("tree should read back");

        prop_assert_eq!(read_back, original);
        prop_assert_eq!(store.open_handles(), 0);
    }
}
