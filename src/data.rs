//! Input shapes and group extraction.
//!
//! Every plot call starts by resolving its [`PlotInput`] into an ordered list
//! of [`Group`]s. The input shape is an explicit variant, so dispatch happens
//! once here instead of being scattered through the plotting code.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

use crate::error::{Error, Result};
use crate::stats::filter_nan;

/// A categorical level used to split a vector into groups.
#[derive(Debug, Clone, PartialEq)]
pub enum Category {
    /// Numeric level.
    Number(f64),
    /// Text level.
    Text(String),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl Eq for Category {}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    /// Numbers sort before text; numbers use IEEE total order.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl From<f64> for Category {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Category {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Column-major numeric matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    columns: Vec<Vec<f64>>,
}

impl Matrix {
    /// Build from columns of equal length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the columns differ in length.
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some((i, col)) = columns.iter().enumerate().find(|(_, c)| c.len() != expected) {
                return Err(Error::ShapeMismatch {
                    what: format!("matrix column {}", i + 1),
                    expected,
                    actual: col.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Build from rows of equal length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the rows differ in length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(Error::ShapeMismatch {
                what: format!("matrix row {}", i + 1),
                expected: n_cols,
                actual: row.len(),
            });
        }
        let columns = (0..n_cols)
            .map(|j| rows.iter().map(|r| r[j]).collect())
            .collect();
        Ok(Self { columns })
    }

    /// Number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Column slices in order.
    #[must_use]
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }
}

/// A column of a record-like table.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Numeric field, plotted as one group.
    Numeric(Vec<f64>),
    /// Text field, skipped by extraction.
    Text(Vec<String>),
}

/// Record-like input: named columns in declaration order.
///
/// Columns may differ in length, as struct fields of a record can.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<(String, Column)>,
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a numeric column.
    #[must_use]
    pub fn numeric(mut self, name: &str, values: &[f64]) -> Self {
        self.columns
            .push((name.to_string(), Column::Numeric(values.to_vec())));
        self
    }

    /// Append a text column.
    #[must_use]
    pub fn text(mut self, name: &str, values: &[&str]) -> Self {
        self.columns.push((
            name.to_string(),
            Column::Text(values.iter().map(|s| (*s).to_string()).collect()),
        ));
        self
    }

    /// Column names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Look up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }
}

/// Any supported input shape.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotInput {
    /// One sample, plotted as a single group labeled "1".
    Vector(Vec<f64>),
    /// One sample split by a parallel category sequence.
    Categorical {
        /// Values.
        data: Vec<f64>,
        /// One category per value.
        categories: Vec<Category>,
    },
    /// One group per column.
    Matrix {
        /// The data.
        matrix: Matrix,
        /// Optional column names; must match the column count.
        names: Option<Vec<String>>,
    },
    /// One group per numeric column.
    Table(Table),
}

impl PlotInput {
    /// Vector input.
    #[must_use]
    pub fn vector(data: &[f64]) -> Self {
        Self::Vector(data.to_vec())
    }

    /// Vector input with categories.
    #[must_use]
    pub fn categorical<C: Into<Category> + Clone>(data: &[f64], categories: &[C]) -> Self {
        Self::Categorical {
            data: data.to_vec(),
            categories: categories.iter().cloned().map(Into::into).collect(),
        }
    }

    /// Matrix input labeled by 1-based column index.
    #[must_use]
    pub fn matrix(matrix: Matrix) -> Self {
        Self::Matrix {
            matrix,
            names: None,
        }
    }

    /// Matrix input with explicit column names.
    #[must_use]
    pub fn named_matrix(matrix: Matrix, names: &[&str]) -> Self {
        Self::Matrix {
            matrix,
            names: Some(names.iter().map(|s| (*s).to_string()).collect()),
        }
    }
}

impl From<Table> for PlotInput {
    fn from(t: Table) -> Self {
        Self::Table(t)
    }
}

impl From<Matrix> for PlotInput {
    fn from(m: Matrix) -> Self {
        Self::matrix(m)
    }
}

/// A labeled sample ready for plotting. NaN values are already removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Group label, unique within a plot call.
    pub label: String,
    /// Finite-or-infinite, NaN-free values.
    pub sample: Vec<f64>,
}

impl Group {
    /// Create a group, filtering NaN values.
    #[must_use]
    pub fn new(label: impl Into<String>, sample: &[f64]) -> Self {
        Self {
            label: label.into(),
            sample: filter_nan(sample),
        }
    }
}

/// Resolve an input into ordered, non-empty groups.
///
/// - tables: one group per numeric column in declaration order;
/// - categorical vectors: one group per distinct level in sorted order;
/// - plain vectors: a single group labeled "1";
/// - matrices: one group per column, labeled by name or 1-based index.
///
/// # Errors
///
/// [`Error::ShapeMismatch`] when categories or names do not match the data,
/// [`Error::EmptySample`] when a group has no values after NaN filtering or
/// the input yields no groups at all, [`Error::Configuration`] for duplicate
/// column names.
pub fn extract_groups(input: &PlotInput) -> Result<Vec<Group>> {
    let groups = match input {
        PlotInput::Table(table) => table
            .columns
            .iter()
            .filter_map(|(name, col)| match col {
                Column::Numeric(values) => Some(Group::new(name.clone(), values)),
                Column::Text(_) => None,
            })
            .collect(),
        PlotInput::Categorical { data, categories } => {
            if categories.len() != data.len() {
                return Err(Error::ShapeMismatch {
                    what: "categories".into(),
                    expected: data.len(),
                    actual: categories.len(),
                });
            }
            let mut levels: BTreeMap<&Category, Vec<f64>> = BTreeMap::new();
            for (value, level) in data.iter().zip(categories) {
                levels.entry(level).or_default().push(*value);
            }
            levels
                .into_iter()
                .map(|(level, values)| Group::new(level.to_string(), &values))
                .collect()
        }
        PlotInput::Vector(data) => vec![Group::new("1", data)],
        PlotInput::Matrix { matrix, names } => {
            if let Some(names) = names {
                if names.len() != matrix.n_cols() {
                    return Err(Error::ShapeMismatch {
                        what: "column names".into(),
                        expected: matrix.n_cols(),
                        actual: names.len(),
                    });
                }
            }
            matrix
                .columns()
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let label = names
                        .as_ref()
                        .map_or_else(|| (i + 1).to_string(), |n| n[i].clone());
                    if col.iter().all(|x| x.is_nan()) {
                        warn!(column = %label, "matrix column holds no numeric values");
                    }
                    Group::new(label, col)
                })
                .collect()
        }
    };

    validate_groups(&groups)?;
    Ok(groups)
}

/// Check that groups exist, have unique labels and non-empty samples.
fn validate_groups(groups: &[Group]) -> Result<()> {
    if groups.is_empty() {
        return Err(Error::EmptySample {
            label: "<no groups>".into(),
        });
    }
    for (i, group) in groups.iter().enumerate() {
        if group.sample.is_empty() {
            return Err(Error::EmptySample {
                label: group.label.clone(),
            });
        }
        if groups[..i].iter().any(|g| g.label == group.label) {
            return Err(Error::config(format!(
                "duplicate group label '{}'",
                group.label
            )));
        }
    }
    Ok(())
}

/// Reorder groups to follow `order`, which must be a permutation of labels.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if `order` names an unknown label, repeats
/// one, or leaves one out.
pub fn apply_group_order(mut groups: Vec<Group>, order: &[String]) -> Result<Vec<Group>> {
    if order.len() != groups.len() {
        return Err(Error::config(format!(
            "GroupOrder lists {} labels but the data has {} groups",
            order.len(),
            groups.len()
        )));
    }
    let mut ordered = Vec::with_capacity(groups.len());
    for label in order {
        let idx = groups
            .iter()
            .position(|g| &g.label == label)
            .ok_or_else(|| {
                Error::config(format!("GroupOrder names unknown or repeated group '{label}'"))
            })?;
        ordered.push(groups.swap_remove(idx));
    }
    Ok(ordered)
}
