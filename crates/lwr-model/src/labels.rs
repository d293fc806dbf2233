//! Row and column display labels for a grid.

use crate::component::ComponentCore;
use crate::tag::ComponentTag;

/// Optional human-readable labels for the rows and columns of a square grid
/// (e.g. "A".."R" columns and "1".."15" rows on a core map).
///
/// Label vectors are either empty (no labels) or exactly `size` long.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLabels {
    core: ComponentCore,
    size: usize,
    row_labels: Vec<String>,
    column_labels: Vec<String>,
}

impl GridLabels {
    pub fn new(size: usize) -> Self {
        let mut core = ComponentCore::new(ComponentTag::GridLabels);
        core.set_name("Grid Labels");
        Self {
            core,
            size: size.max(1),
            row_labels: Vec::new(),
            column_labels: Vec::new(),
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

    /// Install row labels. Rejected unless exactly one label per row.
    pub fn set_row_labels(&mut self, labels: Vec<String>) -> bool {
        if labels.len() != self.size {
            return false;
        }
        self.row_labels = labels;
        true
    }

    /// Install column labels. Rejected unless exactly one label per column.
    pub fn set_column_labels(&mut self, labels: Vec<String>) -> bool {
        if labels.len() != self.size {
            return false;
        }
        self.column_labels = labels;
        true
    }

    pub fn row_label(&self, row: usize) -> Option<&str> {
        self.row_labels.get(row).map(String::as_str)
    }

    pub fn column_label(&self, column: usize) -> Option<&str> {
        self.column_labels.get(column).map(String::as_str)
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("L{i}")).collect()
    }

    #[test]
    fn labels_must_match_size() {
        let mut grid_labels = GridLabels::new(3);
        assert!(!grid_labels.set_row_labels(labels(2)));
        assert!(grid_labels.row_labels().is_empty());

        assert!(grid_labels.set_row_labels(labels(3)));
        assert_eq!(grid_labels.row_label(0), Some("L0"));
        assert_eq!(grid_labels.row_label(3), None);
    }

    #[test]
    fn rows_and_columns_are_independent() {
        let mut grid_labels = GridLabels::new(2);
        assert!(grid_labels.set_column_labels(vec!["A".into(), "B".into()]));
        assert!(grid_labels.row_labels().is_empty());
        assert_eq!(grid_labels.column_label(1), Some("B"));
    }
}
