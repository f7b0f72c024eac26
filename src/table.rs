//! Row-wise containment filters over a small in-memory table.
//!
//! A [`Table`] holds either only scalar cells or only collection cells; the
//! shape is checked once, when the table is built, so the filters themselves
//! cannot fail.

use std::{
    collections::HashSet,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Eq)]
pub enum TableError {
    MixedCellTypes,
    RaggedRow { row: usize, expected: usize, found: usize },
    SerdeError(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::MixedCellTypes => write!(
                f,
                "the table contains a mix of collection cells and scalar cells"
            ),
            TableError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, expected {}",
                row, found, expected
            ),
            TableError::SerdeError(e) => write!(f, "invalid table: {}", e),
        }
    }
}

impl std::error::Error for TableError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Reads a command-line value: integer, then float, then text.
    pub fn parse(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            CellValue::Integer(i)
        } else if let Ok(v) = raw.parse::<f64>() {
            CellValue::Float(v)
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    /// Comparison key: numbers compare by value across both variants.
    fn key(&self) -> ValueKey<'_> {
        match self {
            CellValue::Integer(i) => ValueKey::Integer(*i),
            CellValue::Float(v) if Self::is_integral(*v) => ValueKey::Integer(*v as i64),
            CellValue::Float(v) => ValueKey::Float(v.to_bits()),
            CellValue::Text(s) => ValueKey::Text(s),
        }
    }

    // also maps -0.0 to the integer 0
    fn is_integral(value: f64) -> bool {
        value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64
    }
}

#[derive(PartialEq, Eq, Hash)]
enum ValueKey<'a> {
    Integer(i64),
    Float(u64),
    Text(&'a str),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Collection(Vec<CellValue>),
    Scalar(CellValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Scalar,
    Collection,
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Scalar(_) => CellKind::Scalar,
            Cell::Collection(_) => CellKind::Collection,
        }
    }

    fn intersects(&self, query: &HashSet<CellValue>) -> bool {
        match self {
            Cell::Scalar(v) => query.contains(v),
            Cell::Collection(values) => values.iter().any(|v| query.contains(v)),
        }
    }

    fn is_superset_of(&self, query: &HashSet<CellValue>) -> bool {
        match self {
            Cell::Scalar(v) => query.iter().all(|q| q == v),
            Cell::Collection(values) => {
                let set: HashSet<&CellValue> = values.iter().collect();
                query.iter().all(|q| set.contains(q))
            }
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Scalar(v) => write!(f, "{}", v),
            Cell::Collection(values) => {
                let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", values.join(", "))
            }
        }
    }
}

impl<T: Into<CellValue>> FromIterator<T> for Cell {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Cell::Collection(iter.into_iter().map(Into::into).collect())
    }
}

/// Values searched for by the containment filters; a single value becomes a
/// singleton set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySet(HashSet<CellValue>);

impl QuerySet {
    pub fn values(&self) -> &HashSet<CellValue> {
        &self.0
    }
}

macro_rules! scalar_conversions {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Cell {
                fn from(value: $t) -> Self {
                    Cell::Scalar(value.into())
                }
            }

            impl From<$t> for QuerySet {
                fn from(value: $t) -> Self {
                    QuerySet(HashSet::from([value.into()]))
                }
            }
        )*
    };
}

scalar_conversions!(&str, String, i64, f64, CellValue);

impl From<HashSet<CellValue>> for QuerySet {
    fn from(values: HashSet<CellValue>) -> Self {
        QuerySet(values)
    }
}

impl<T: Into<CellValue>> FromIterator<T> for QuerySet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        QuerySet(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
    kind: CellKind,
}

impl Table {
    /// Builds a table, rejecting ragged rows and mixed cell shapes.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, TableError> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RaggedRow {
                    row: i,
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }

        let mut kinds = rows.iter().flatten().map(Cell::kind);
        let kind = kinds.next().unwrap_or(CellKind::Scalar);
        if kinds.any(|k| k != kind) {
            return Err(TableError::MixedCellTypes);
        }

        Ok(Table {
            columns,
            rows,
            kind,
        })
    }

    /// Parses `{"columns": [...], "rows": [[...], ...]}`; list cells are collections.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: RawTable =
            serde_json::from_str(json).map_err(|e| TableError::SerdeError(e.to_string()))?;
        Self::new(raw.columns, raw.rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row mask: true where at least one cell holds one of `values`.
    pub fn contains_any<Q: Into<QuerySet>>(&self, values: Q) -> Vec<bool> {
        let query = values.into();
        self.rows
            .iter()
            .map(|row| row.iter().any(|cell| cell.intersects(query.values())))
            .collect()
    }

    /// Row mask: true where every cell holds all of `values`.
    pub fn contains_all<Q: Into<QuerySet>>(&self, values: Q) -> Vec<bool> {
        let query = values.into();
        self.rows
            .iter()
            .map(|row| row.iter().all(|cell| cell.is_superset_of(query.values())))
            .collect()
    }

    /// Rows selected by `mask`.
    pub fn select(&self, mask: &[bool]) -> Vec<&[Cell]> {
        self.rows
            .iter()
            .zip(mask)
            .filter(|(_, keep)| **keep)
            .map(|(row, _)| row.as_slice())
            .collect()
    }
}
