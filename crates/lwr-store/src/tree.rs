//! Value types stored in container groups.

use serde::{Deserialize, Serialize};

/// A scalar metadata value attached to a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Attribute {
    Int(i64),
    Float(f64),
    Str(String),
}

/// One row of a compound measurement table: value, uncertainty, unit string,
/// and 3-D position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRow {
    pub value: f64,
    pub uncertainty: f64,
    pub units: String,
    pub position: [f64; 3],
}

/// An array payload attached to a group.
///
/// Tables are row-major with a fixed column count; `values.len()` is always
/// a multiple of `columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Dataset {
    IntVector(Vec<i64>),
    StringVector(Vec<String>),
    IntTable { columns: usize, values: Vec<i64> },
    FloatTable { columns: usize, values: Vec<f64> },
    PointTable(Vec<PointRow>),
}

impl Dataset {
    /// Number of rows in the payload.
    pub fn rows(&self) -> usize {
        match self {
            Dataset::IntVector(v) => v.len(),
            Dataset::StringVector(v) => v.len(),
            Dataset::IntTable { columns, values } => {
                if *columns == 0 { 0 } else { values.len() / columns }
            }
            Dataset::FloatTable { columns, values } => {
                if *columns == 0 { 0 } else { values.len() / columns }
            }
            Dataset::PointTable(rows) => rows.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_counts() {
        assert_eq!(Dataset::IntVector(vec![1, 2, 3]).rows(), 3);
        assert_eq!(
            Dataset::FloatTable {
                columns: 5,
                values: vec![0.0; 10],
            }
            .rows(),
            2
        );
        assert_eq!(Dataset::PointTable(Vec::new()).rows(), 0);
    }
}
