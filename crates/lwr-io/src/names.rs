//! Reserved wire names shared by the reader and writer.
//!
//! These strings are structural contract: they identify the codec's own
//! sub-groups and datasets, and user-chosen component names must not
//! collide with them.

/// Attribute carrying the component discriminant.
pub const TAG_ATTR: &str = "tag";
/// Attribute carrying the construction size of sized components.
pub const SIZE_ATTR: &str = "size";

/// Sub-group holding a component's time-series measurements.
pub const STATE_POINT_DATA: &str = "State Point Data";
/// Prefix of per-timestep group names (`Timestep: 0`, `Timestep: 1`, ...).
pub const TIMESTEP_PREFIX: &str = "Timestep: ";
/// Attribute carrying a timestep's time value.
pub const TIME_ATTR: &str = "time";
/// Attribute carrying a timestep's time-unit string.
pub const TIME_UNITS_ATTR: &str = "units";

/// Suffix of per-feature measurement datasets.
pub const DATA_TABLE_SUFFIX: &str = " dataTable";
/// Suffix of per-feature units-lookup datasets.
pub const HEAD_TABLE_SUFFIX: &str = " headTable";

/// Sub-group of a grid manager holding its occupied cells.
pub const POSITIONS: &str = "Positions";
/// Ordinal-to-component-name lookup table inside `Positions`.
pub const POSITION_NAMES_TABLE: &str = "Simple Position Names Table";
/// Ordinal-to-unit-string lookup table inside `Positions`.
pub const UNITS_TABLE: &str = "Units Table";
/// Per-cell dataset: `[row, column, name ordinal]`.
pub const POSITION_DATASET: &str = "Position Dataset";
/// Prefix of per-cell group names (`Position 2 3`).
pub const POSITION_PREFIX: &str = "Position ";

/// Sub-group of a grid label provider holding its label tables.
pub const LABELS_GROUP: &str = "Labels";
pub const ROW_LABELS: &str = "Row Labels";
pub const COLUMN_LABELS: &str = "Column Labels";

/// Identity attributes shared by every component group.
pub const ID_ATTR: &str = "id";
pub const NAME_ATTR: &str = "name";
pub const DESCRIPTION_ATTR: &str = "description";

/// Type-specific attributes.
pub const ROD_PITCH_ATTR: &str = "rod_pitch";
pub const PRESSURE_ATTR: &str = "pressure";
pub const HEIGHT_ATTR: &str = "height";
pub const INNER_RADIUS_ATTR: &str = "inner_radius";
pub const OUTER_RADIUS_ATTR: &str = "outer_radius";
pub const MATERIAL_KIND_ATTR: &str = "material_kind";
pub const TUBE_TYPE_ATTR: &str = "tube_type";
pub const POSITION_ATTR: &str = "position";
pub const STEP_SIZE_ATTR: &str = "step_size";
pub const MAX_STEPS_ATTR: &str = "max_steps";
pub const FUEL_ASSEMBLY_PITCH_ATTR: &str = "fuel_assembly_pitch";
