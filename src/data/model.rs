use std::fmt;

use super::partition::Groups;

// ---------------------------------------------------------------------------
// FieldValue – a single cell of a row
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
///
/// CSV input arrives entirely as `Text`; coercion turns the numeric columns
/// into `Number`. JSON and Parquet inputs may carry numbers and nulls directly.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// `f64::NAN` is the not-a-number sentinel produced by coercion.
    Number(f64),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Null => write!(f, "<null>"),
        }
    }
}

impl FieldValue {
    /// Numeric view of the cell. Text is not parsed here; see
    /// [`coerce_fields`](super::coerce::coerce_fields).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value only when it is a finite number.
    pub fn as_finite(&self) -> Option<f64> {
        self.as_f64().filter(|v| v.is_finite())
    }
}

// ---------------------------------------------------------------------------
// Row – one record of the table
// ---------------------------------------------------------------------------

/// One record, with values aligned to [`Dataset::column_names`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<FieldValue>,
}

impl Row {
    pub fn new(values: Vec<FieldValue>) -> Self {
        Row { values }
    }

    /// Value at a column index; short rows read as `Null`.
    pub fn get(&self, idx: usize) -> &FieldValue {
        static NULL: FieldValue = FieldValue::Null;
        self.values.get(idx).unwrap_or(&NULL)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DataError {
    #[error("column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("unsupported file format: .{0}")]
    UnsupportedFormat(String),
}

/// The full parsed table, rows in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Ordered column names from the header row.
    pub column_names: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(column_names: Vec<String>, rows: Vec<Row>) -> Self {
        Dataset { column_names, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Locate a column by name.
    ///
    /// An exact match wins; otherwise the first ASCII case-insensitive match
    /// is used, so `PetalLength` and `petalLength` headers both resolve.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names
            .iter()
            .position(|c| c == name)
            .or_else(|| {
                self.column_names
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(name))
            })
    }

    /// Like [`column_index`](Self::column_index) but missing columns are an error.
    pub fn require_column(&self, name: &str) -> Result<usize, DataError> {
        self.column_index(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    /// All values of a numeric column, in row order. Non-numeric cells read
    /// as the NaN sentinel.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, DataError> {
        let idx = self.require_column(name)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).as_f64().unwrap_or(f64::NAN))
            .collect())
    }

    /// Partition rows by the value of `column`, keeping first-seen key order.
    pub fn group_by(&self, column: &str) -> Result<Groups<&Row>, DataError> {
        let idx = self.require_column(column)?;
        Ok(Groups::from_items(&self.rows, |row| row.get(idx).to_string()))
    }
}
