use std::path::Path;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::Id3Error;

/// A single cell: a label, a nominal code, or a numeric measurement.
pub type Value = OrderedFloat<f64>;

/// One example. Index 0 holds the label, the remaining indices hold features.
pub type Row = Vec<Value>;

/// Label assigned when a node is built from no rows at all.
pub const DEFAULT_LABEL: Value = OrderedFloat(0.0);

/// Marker for an unknown cell.
///
/// Nominal splits treat it as one more category; numeric splits send it to the
/// `>= threshold` side because NaN orders above every number.
pub const MISSING: Value = OrderedFloat(f64::NAN);

/// Build a row from plain floats.
pub fn row_from_f64(values: &[f64]) -> Row {
    values.iter().copied().map(OrderedFloat).collect()
}

/// Column description, parallel to each row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Display name.
    pub name: String,
    /// `true` for categorical columns split by exact value.
    pub is_nominal: bool,
}

impl Attribute {
    pub fn nominal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_nominal: true,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_nominal: false,
        }
    }
}

/// Remaining number of times each numeric attribute may still be chosen.
///
/// One budget is shared by the whole recursion: a split consumed in one
/// subtree is gone for its siblings too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SplitBudget {
    remaining: Vec<u32>,
}

impl SplitBudget {
    pub fn new(remaining: Vec<u32>) -> Self {
        Self { remaining }
    }

    /// Give every numeric attribute `splits`; nominal columns get 0.
    pub fn uniform(attributes: &[Attribute], splits: u32) -> Self {
        let remaining = attributes
            .iter()
            .enumerate()
            .map(|(idx, attr)| {
                if idx == 0 || attr.is_nominal {
                    0
                } else {
                    splits
                }
            })
            .collect();
        Self { remaining }
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn remaining(&self, attribute: usize) -> u32 {
        self.remaining.get(attribute).copied().unwrap_or(0)
    }

    /// Whether `attribute` may still be used for a numeric split.
    pub fn allows(&self, attribute: usize) -> bool {
        self.remaining(attribute) != 0
    }

    pub(crate) fn consume(&mut self, attribute: usize) {
        if let Some(slot) = self.remaining.get_mut(attribute) {
            *slot = slot.saturating_sub(1);
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.remaining
    }
}

/// Check the structural preconditions of tree building.
pub fn validate_inputs<R: AsRef<[Value]>>(
    rows: &[R],
    attributes: &[Attribute],
    budget: &SplitBudget,
) -> Result<(), Id3Error> {
    if attributes.is_empty() {
        return Err(Id3Error::EmptyAttributes);
    }
    if budget.len() != attributes.len() {
        return Err(Id3Error::BudgetLength {
            expected: attributes.len(),
            found: budget.len(),
        });
    }
    for (row, values) in rows.iter().enumerate() {
        let found = values.as_ref().len();
        if found != attributes.len() {
            return Err(Id3Error::RowLength {
                row,
                expected: attributes.len(),
                found,
            });
        }
    }
    Ok(())
}

/// Labeled training data plus the metadata needed to grow a tree.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainDataset {
    /// Column metadata; entry 0 describes the label.
    pub attributes: Vec<Attribute>,
    /// Examples; `null` cells load as [`MISSING`].
    #[serde(deserialize_with = "deserialize_rows")]
    pub rows: Vec<Row>,
    /// Optional per-column numeric split budget.
    #[serde(default)]
    pub numeric_splits: Option<SplitBudget>,
}

impl TrainDataset {
    /// Load a dataset from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, Id3Error> {
        let bytes = std::fs::read(path).map_err(|source| Id3Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| Id3Error::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The dataset's own budget, or `default_splits` for every numeric column.
    pub fn split_budget(&self, default_splits: u32) -> SplitBudget {
        self.numeric_splits
            .clone()
            .unwrap_or_else(|| SplitBudget::uniform(&self.attributes, default_splits))
    }
}

fn deserialize_rows<'de, D>(deserializer: D) -> Result<Vec<Row>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Vec<Option<f64>>> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.map(OrderedFloat).unwrap_or(MISSING))
                .collect()
        })
        .collect())
}

/// Serde adapter for a single cell: `null` in JSON stands for [`MISSING`].
pub(crate) mod missing_as_null {
    use ordered_float::OrderedFloat;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{MISSING, Value};

    pub fn serialize<S>(value: &Value, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let cell = if value.0.is_nan() { None } else { Some(value.0) };
        cell.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cell: Option<f64> = Option::deserialize(deserializer)?;
        Ok(cell.map(OrderedFloat).unwrap_or(MISSING))
    }
}
