//! Evaluation metrics for trained trees.

use std::collections::BTreeSet;

use super::id3::{Id3Model, Value};

#[derive(Debug, Clone)]
/// Confusion matrix over a fixed, sorted label set.
pub struct ConfusionMatrix {
    /// Labels in index order.
    pub labels: Vec<Value>,
    /// Row-major `KxK` counts (`truth * K + predicted`).
    pub counts: Vec<u32>,
}

impl ConfusionMatrix {
    /// Create an empty matrix for the given labels (deduplicated and sorted).
    pub fn new(labels: impl IntoIterator<Item = Value>) -> Self {
        let labels: Vec<Value> = labels.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let k = labels.len();
        Self {
            labels,
            counts: vec![0; k * k],
        }
    }

    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    pub fn index_of(&self, label: Value) -> Option<usize> {
        self.labels.binary_search(&label).ok()
    }

    /// Record one prediction; labels outside the matrix are ignored.
    pub fn add(&mut self, truth: Value, predicted: Value) {
        let (Some(t), Some(p)) = (self.index_of(truth), self.index_of(predicted)) else {
            return;
        };
        let idx = t * self.n_classes() + p;
        self.counts[idx] = self.counts[idx].saturating_add(1);
    }

    pub fn get(&self, truth: usize, predicted: usize) -> u32 {
        self.counts[truth * self.n_classes() + predicted]
    }
}

#[derive(Debug, Clone)]
/// Precision/recall statistics for a single label.
pub struct PerClassStats {
    /// `TP / (TP + FP)`.
    pub precision: f32,
    /// `TP / (TP + FN)`.
    pub recall: f32,
    /// Total number of true examples for the label.
    pub support: u32,
}

/// Compute per-label precision and recall from a confusion matrix.
pub fn precision_recall_by_class(cm: &ConfusionMatrix) -> Vec<PerClassStats> {
    let k = cm.n_classes();
    (0..k)
        .map(|class_idx| {
            let tp = cm.get(class_idx, class_idx) as f32;
            let support: u32 = (0..k).map(|j| cm.get(class_idx, j)).sum();
            let predicted: u32 = (0..k).map(|i| cm.get(i, class_idx)).sum();
            let fn_ = support as f32 - tp;
            let fp = predicted as f32 - tp;
            PerClassStats {
                precision: if tp + fp == 0.0 { 0.0 } else { tp / (tp + fp) },
                recall: if tp + fn_ == 0.0 { 0.0 } else { tp / (tp + fn_) },
                support,
            }
        })
        .collect()
}

/// Overall accuracy of the predictions recorded in a confusion matrix.
pub fn accuracy(cm: &ConfusionMatrix) -> f32 {
    let k = cm.n_classes();
    let total: u64 = cm.counts.iter().map(|&c| c as u64).sum();
    if total == 0 {
        return 0.0;
    }
    let correct: u64 = (0..k).map(|i| cm.get(i, i) as u64).sum();
    correct as f32 / total as f32
}

/// Outcome of running a model over labeled rows.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub matrix: ConfusionMatrix,
    /// Rows the tree could not route to a leaf.
    pub unclassified: usize,
}

impl Evaluation {
    /// Accuracy over every row, counting unclassified rows as errors.
    pub fn accuracy(&self) -> f32 {
        let classified: u64 = self.matrix.counts.iter().map(|&c| c as u64).sum();
        let total = classified + self.unclassified as u64;
        if total == 0 {
            return 0.0;
        }
        let k = self.matrix.n_classes();
        let correct: u64 = (0..k).map(|i| self.matrix.get(i, i) as u64).sum();
        correct as f32 / total as f32
    }
}

/// Classify every row (label in column 0) and tally the results.
///
/// Rows without a label column count as unclassified.
pub fn evaluate<R: AsRef<[Value]>>(model: &Id3Model, rows: &[R]) -> Evaluation {
    let mut unclassified = 0usize;
    let mut predictions: Vec<(Value, Option<Value>)> = Vec::with_capacity(rows.len());
    for row in rows {
        let row = row.as_ref();
        match row.first() {
            Some(&truth) => predictions.push((truth, model.predict(row))),
            None => unclassified += 1,
        }
    }
    let labels = predictions
        .iter()
        .flat_map(|&(truth, predicted)| std::iter::once(truth).chain(predicted));
    let mut matrix = ConfusionMatrix::new(labels);
    for (truth, predicted) in predictions {
        match predicted {
            Some(predicted) => matrix.add(truth, predicted),
            None => unclassified += 1,
        }
    }
    Evaluation {
        matrix,
        unclassified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::id3::{Attribute, NominalBranch, Node, row_from_f64};
    use ordered_float::OrderedFloat;

    fn label(v: f64) -> Value {
        OrderedFloat(v)
    }

    #[test]
    fn matrix_sorts_and_dedups_labels() {
        let cm = ConfusionMatrix::new([label(2.0), label(0.0), label(2.0)]);
        assert_eq!(cm.labels, vec![label(0.0), label(2.0)]);
        assert_eq!(cm.index_of(label(2.0)), Some(1));
        assert_eq!(cm.index_of(label(1.0)), None);
    }

    #[test]
    fn precision_recall_and_accuracy() {
        let mut cm = ConfusionMatrix::new([label(0.0), label(1.0)]);
        cm.add(label(0.0), label(0.0));
        cm.add(label(0.0), label(1.0));
        cm.add(label(1.0), label(1.0));
        cm.add(label(1.0), label(1.0));
        let stats = precision_recall_by_class(&cm);
        assert_eq!(stats[0].support, 2);
        assert!((stats[0].precision - 1.0).abs() < 1e-6);
        assert!((stats[0].recall - 0.5).abs() < 1e-6);
        assert!((stats[1].precision - 2.0 / 3.0).abs() < 1e-6);
        assert!((stats[1].recall - 1.0).abs() < 1e-6);
        assert!((accuracy(&cm) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn evaluate_counts_unroutable_rows() {
        let model = Id3Model::new(
            vec![Attribute::nominal("y"), Attribute::nominal("color")],
            Node::NominalSplit {
                attribute: 1,
                name: "color".into(),
                children: vec![
                    NominalBranch {
                        value: label(0.0),
                        node: Node::leaf(label(0.0)),
                    },
                    NominalBranch {
                        value: label(1.0),
                        node: Node::leaf(label(1.0)),
                    },
                ],
            },
        );
        let rows = vec![
            row_from_f64(&[0.0, 0.0]),
            row_from_f64(&[1.0, 1.0]),
            row_from_f64(&[1.0, 0.0]),
            row_from_f64(&[1.0, 7.0]),
        ];
        let eval = evaluate(&model, &rows);
        assert_eq!(eval.unclassified, 1);
        assert!((accuracy(&eval.matrix) - 2.0 / 3.0).abs() < 1e-6);
        assert!((eval.accuracy() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn evaluate_counts_rows_without_label_as_unclassified() {
        let model = Id3Model::new(vec![Attribute::nominal("y")], Node::leaf(label(1.0)));
        let rows: Vec<Vec<Value>> = vec![Vec::new(), vec![label(1.0)]];
        let eval = evaluate(&model, &rows);
        assert_eq!(eval.unclassified, 1);
        assert_eq!(eval.matrix.labels, vec![label(1.0)]);
        assert!((eval.accuracy() - 0.5).abs() < 1e-6);
    }
}
