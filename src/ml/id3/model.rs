use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::dataset::{Attribute, Value};
use super::error::Id3Error;

/// Current on-disk model format.
pub const MODEL_VERSION: i64 = 1;

/// A decision tree node. Each node is exactly one of a leaf or a split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Terminal node carrying the predicted label.
    Leaf {
        #[serde(with = "super::dataset::missing_as_null")]
        label: Value,
    },
    /// One branch per nominal value observed during training.
    NominalSplit {
        attribute: usize,
        name: String,
        children: Vec<NominalBranch>,
    },
    /// Binary split: `children[0]` takes `value < threshold`, `children[1]` the rest.
    NumericSplit {
        attribute: usize,
        name: String,
        #[serde(with = "super::dataset::missing_as_null")]
        threshold: Value,
        children: Box<[Node; 2]>,
    },
}

/// Child of a nominal split, keyed by the attribute value that leads to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominalBranch {
    #[serde(with = "super::dataset::missing_as_null")]
    pub value: Value,
    pub node: Node,
}

impl Node {
    pub fn leaf(label: Value) -> Self {
        Node::Leaf { label }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Label of a leaf node, `None` for splits.
    pub fn label(&self) -> Option<Value> {
        match self {
            Node::Leaf { label } => Some(*label),
            _ => None,
        }
    }

    /// Split attribute of an internal node.
    pub fn attribute(&self) -> Option<usize> {
        match self {
            Node::Leaf { .. } => None,
            Node::NominalSplit { attribute, .. } | Node::NumericSplit { attribute, .. } => {
                Some(*attribute)
            }
        }
    }

    /// Direct children in branch order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Leaf { .. } => Vec::new(),
            Node::NominalSplit { children, .. } => children.iter().map(|b| &b.node).collect(),
            Node::NumericSplit { children, .. } => children.iter().collect(),
        }
    }

    /// Child reached by `value` under a nominal split.
    pub fn branch(&self, value: Value) -> Option<&Node> {
        match self {
            Node::NominalSplit { children, .. } => children
                .iter()
                .find(|branch| branch.value == value)
                .map(|branch| &branch.node),
            _ => None,
        }
    }

    /// Walk from this node to a leaf using the feature values of `row`.
    ///
    /// Returns `None` when the row is too short or holds a nominal value that
    /// no branch was built for.
    pub fn classify(&self, row: &[Value]) -> Option<Value> {
        let mut node = self;
        loop {
            node = match node {
                Node::Leaf { label } => return Some(*label),
                Node::NominalSplit { attribute, .. } => node.branch(*row.get(*attribute)?)?,
                Node::NumericSplit {
                    attribute,
                    threshold,
                    children,
                    ..
                } => {
                    let value = *row.get(*attribute)?;
                    if value < *threshold {
                        &children[0]
                    } else {
                        &children[1]
                    }
                }
            };
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.children()
            .into_iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Node::node_count)
            .sum::<usize>()
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.children().into_iter().map(Node::leaf_count).sum()
    }

    fn validate(&self, attributes: &[Attribute]) -> Result<(), Id3Error> {
        let (attribute, expect_nominal) = match self {
            Node::Leaf { .. } => return Ok(()),
            Node::NominalSplit { attribute, .. } => (*attribute, true),
            Node::NumericSplit { attribute, .. } => (*attribute, false),
        };
        if attribute == 0 {
            return Err(Id3Error::InvalidModel(
                "label column used as a split attribute".to_string(),
            ));
        }
        let Some(meta) = attributes.get(attribute) else {
            return Err(Id3Error::InvalidModel(format!(
                "split attribute {attribute} out of range ({} attributes)",
                attributes.len()
            )));
        };
        if meta.is_nominal != expect_nominal {
            return Err(Id3Error::InvalidModel(format!(
                "attribute {attribute} ({}) split with the wrong kind",
                meta.name
            )));
        }
        if let Node::NominalSplit { children, .. } = self
            && children.is_empty()
        {
            return Err(Id3Error::InvalidModel(format!(
                "nominal split on attribute {attribute} has no branches"
            )));
        }
        self.children()
            .into_iter()
            .try_for_each(|child| child.validate(attributes))
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        match self {
            Node::Leaf { label } => writeln!(f, "{pad}=> {label}"),
            Node::NominalSplit { name, children, .. } => {
                for branch in children {
                    writeln!(f, "{pad}{name} = {}", branch.value)?;
                    branch.node.write_indented(f, indent + 1)?;
                }
                Ok(())
            }
            Node::NumericSplit {
                name,
                threshold,
                children,
                ..
            } => {
                writeln!(f, "{pad}{name} < {threshold}")?;
                children[0].write_indented(f, indent + 1)?;
                writeln!(f, "{pad}{name} >= {threshold}")?;
                children[1].write_indented(f, indent + 1)
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// A trained tree together with the metadata needed to interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Id3Model {
    /// Model format version.
    pub model_version: i64,
    /// Column metadata the tree was trained with.
    pub attributes: Vec<Attribute>,
    /// Root of the tree.
    pub root: Node,
}

impl Id3Model {
    pub fn new(attributes: Vec<Attribute>, root: Node) -> Self {
        Self {
            model_version: MODEL_VERSION,
            attributes,
            root,
        }
    }

    /// Check that every split refers to a compatible attribute.
    pub fn validate(&self) -> Result<(), Id3Error> {
        if self.model_version != MODEL_VERSION {
            return Err(Id3Error::InvalidModel(format!(
                "unsupported model_version {} (expected {MODEL_VERSION})",
                self.model_version
            )));
        }
        if self.attributes.is_empty() {
            return Err(Id3Error::EmptyAttributes);
        }
        self.root.validate(&self.attributes)
    }

    /// Load and validate a model from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, Id3Error> {
        let bytes = std::fs::read(path).map_err(|source| Id3Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_slice(&bytes).map_err(|source| Id3Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        model.validate()?;
        Ok(model)
    }

    /// Write the model as pretty JSON, creating parent directories.
    pub fn save_json(&self, path: &Path) -> Result<(), Id3Error> {
        let io_error = |source| Id3Error::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let bytes = serde_json::to_vec_pretty(self).map_err(|source| Id3Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, bytes).map_err(io_error)
    }

    /// Predict the label of a row laid out like the training rows.
    pub fn predict(&self, row: &[Value]) -> Option<Value> {
        self.root.classify(row)
    }
}
