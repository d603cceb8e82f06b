//! ID3 decision-tree induction with gain-ratio attribute selection.
//!
//! Supports nominal attributes (one branch per observed value) and numeric
//! attributes (a single `<` / `>=` threshold), with:
//! - A per-attribute budget limiting how often numeric columns may be split.
//! - A configurable policy for charging depth on nominal splits.
//! - JSON model export/load and tree traversal for classification.

mod aggregates;
mod dataset;
mod error;
mod model;
mod partition;
mod select;
mod train;

pub use aggregates::{check_homogenous, entropy, intrinsic_value, label_counts, mode};
pub use dataset::{
    Attribute, DEFAULT_LABEL, MISSING, Row, SplitBudget, TrainDataset, Value, row_from_f64,
    validate_inputs,
};
pub use error::Id3Error;
pub use model::{Id3Model, MODEL_VERSION, NominalBranch, Node};
pub use partition::{NominalPartition, split_on_nominal, split_on_numerical};
pub use select::{
    BestAttribute, DEFAULT_NUMERIC_STRIDE, gain_ratio_nominal, gain_ratio_numeric,
    select_best_attribute,
};
pub use train::{DepthPolicy, TrainOptions, TreeBuilder, build_tree, train_id3};
