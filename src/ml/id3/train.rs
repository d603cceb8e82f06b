use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::aggregates::{check_homogenous, mode};
use super::dataset::{Attribute, DEFAULT_LABEL, SplitBudget, TrainDataset, Value, validate_inputs};
use super::error::Id3Error;
use super::model::{Id3Model, NominalBranch, Node};
use super::partition::{split_on_nominal, split_on_numerical};
use super::select::{BestAttribute, DEFAULT_NUMERIC_STRIDE, select_best_attribute};

/// How remaining depth is charged when a nominal split fans out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthPolicy {
    /// One unit per child built, so later siblings get progressively less depth.
    #[default]
    PerChild,
    /// One unit for the whole split; every child gets the same depth.
    PerNode,
}

/// Training hyperparameters.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Remaining depth at the root; 0 yields a single leaf.
    pub max_depth: i32,
    /// Row stride for sampling numeric thresholds.
    pub numeric_stride: usize,
    /// Depth accounting for nominal splits.
    pub depth_policy: DepthPolicy,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            max_depth: 10,
            numeric_stride: DEFAULT_NUMERIC_STRIDE,
            depth_policy: DepthPolicy::default(),
        }
    }
}

/// Recursive ID3 driver.
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    stride: usize,
    depth_policy: DepthPolicy,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            stride: DEFAULT_NUMERIC_STRIDE,
            depth_policy: DepthPolicy::default(),
        }
    }
}

impl TreeBuilder {
    pub fn new(stride: usize, depth_policy: DepthPolicy) -> Result<Self, Id3Error> {
        if stride == 0 {
            return Err(Id3Error::ZeroStride);
        }
        Ok(Self {
            stride,
            depth_policy,
        })
    }

    pub fn from_options(options: &TrainOptions) -> Result<Self, Id3Error> {
        Self::new(options.numeric_stride, options.depth_policy)
    }

    /// Validate the inputs, then grow a tree.
    ///
    /// `budget` is mutated in place: every numeric split spends one unit of
    /// its attribute's budget for the rest of the build.
    pub fn build<R: AsRef<[Value]>>(
        &self,
        rows: &[R],
        attributes: &[Attribute],
        budget: &mut SplitBudget,
        depth: i32,
    ) -> Result<Node, Id3Error> {
        validate_inputs(rows, attributes, budget)?;
        if rows.is_empty() {
            warn!("Building a tree from an empty data set; returning the default label");
        }
        Ok(self.grow(rows, attributes, budget, depth))
    }

    fn grow<R: AsRef<[Value]>>(
        &self,
        rows: &[R],
        attributes: &[Attribute],
        budget: &mut SplitBudget,
        depth: i32,
    ) -> Node {
        if rows.is_empty() {
            return Node::leaf(DEFAULT_LABEL);
        }
        if let Some(label) = check_homogenous(rows) {
            trace!(rows = rows.len(), %label, "homogeneous leaf");
            return Node::leaf(label);
        }
        let majority = mode(rows).unwrap_or(DEFAULT_LABEL);
        if attributes.len() < 2 || depth <= 0 {
            trace!(rows = rows.len(), depth, label = %majority, "depth exhausted");
            return Node::leaf(majority);
        }
        let Some(best) = select_best_attribute(rows, attributes, budget, self.stride) else {
            trace!(rows = rows.len(), label = %majority, "no informative attribute");
            return Node::leaf(majority);
        };

        let name = attributes[best.attribute].name.clone();
        debug!(
            attribute = best.attribute,
            name = %name,
            gain_ratio = best.gain_ratio,
            threshold = ?best.threshold.map(|t| t.0),
            rows = rows.len(),
            depth,
            "splitting"
        );
        match best {
            BestAttribute {
                attribute,
                threshold: Some(threshold),
                ..
            } => {
                budget.consume(attribute);
                let depth = depth - 1;
                let (low, high) = split_on_numerical(rows, attribute, threshold);
                let low = self.grow(&low, attributes, budget, depth);
                let high = self.grow(&high, attributes, budget, depth);
                Node::NumericSplit {
                    attribute,
                    name,
                    threshold,
                    children: Box::new([low, high]),
                }
            }
            BestAttribute { attribute, .. } => {
                let groups = split_on_nominal(rows, attribute);
                let mut child_depth = depth;
                if self.depth_policy == DepthPolicy::PerNode {
                    child_depth -= 1;
                }
                let mut children = Vec::with_capacity(groups.len());
                for (value, members) in groups {
                    if self.depth_policy == DepthPolicy::PerChild {
                        child_depth -= 1;
                    }
                    let node = self.grow(&members, attributes, budget, child_depth);
                    children.push(NominalBranch { value, node });
                }
                Node::NominalSplit {
                    attribute,
                    name,
                    children,
                }
            }
        }
    }
}

/// Grow a tree with the default stride and depth policy.
pub fn build_tree<R: AsRef<[Value]>>(
    rows: &[R],
    attributes: &[Attribute],
    budget: &mut SplitBudget,
    depth: i32,
) -> Result<Node, Id3Error> {
    TreeBuilder::default().build(rows, attributes, budget, depth)
}

/// Train a model from a dataset.
///
/// The dataset's budget (or `default_splits` per numeric column) is copied, so
/// the dataset itself is left untouched.
pub fn train_id3(
    dataset: &TrainDataset,
    options: &TrainOptions,
    default_splits: u32,
) -> Result<Id3Model, Id3Error> {
    let builder = TreeBuilder::from_options(options)?;
    let mut budget = dataset.split_budget(default_splits);
    let root = builder.build(&dataset.rows, &dataset.attributes, &mut budget, options.max_depth)?;
    info!(
        rows = dataset.rows.len(),
        nodes = root.node_count(),
        leaves = root.leaf_count(),
        depth = root.depth(),
        "Trained ID3 tree"
    );
    Ok(Id3Model::new(dataset.attributes.clone(), root))
}
