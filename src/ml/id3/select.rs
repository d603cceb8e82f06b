//! Gain-ratio attribute scoring and selection.

use ordered_float::OrderedFloat;
use tracing::trace;

use super::aggregates::{entropy, intrinsic_value};
use super::dataset::{Attribute, SplitBudget, Value};
use super::partition::{split_on_nominal, split_on_numerical};

/// Row stride used when sampling candidate numeric thresholds.
///
/// Only rows `0, stride, 2 * stride, ...` donate a candidate, which keeps the
/// search cheap on large inputs at the cost of exhaustiveness.
pub const DEFAULT_NUMERIC_STRIDE: usize = 1000;

/// Winning attribute of a selection round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestAttribute {
    /// Column index (never 0).
    pub attribute: usize,
    /// Gain ratio achieved; always positive.
    pub gain_ratio: f64,
    /// Split point for numeric winners, `None` for nominal ones.
    pub threshold: Option<Value>,
}

/// Gain ratio of splitting on every distinct value of a nominal attribute.
///
/// Single-valued attributes have zero intrinsic value and score 0.
pub fn gain_ratio_nominal<R: AsRef<[Value]>>(rows: &[R], attribute: usize) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let groups = split_on_nominal(rows, attribute);
    let parts: Vec<&[&[Value]]> = groups.iter().map(|(_, members)| members.as_slice()).collect();
    partition_gain_ratio(entropy(rows), rows.len(), &parts)
}

/// Best binary split of a numeric attribute as `(gain_ratio, threshold)`.
///
/// Candidate thresholds are the attribute values at rows `0, stride, ...`.
/// A sampled row holding [`MISSING`](super::MISSING) donates no candidate;
/// missing cells still land on the `>=` side of whatever threshold wins.
/// Ties keep the earliest candidate; `(0, 0)` means nothing helped.
pub fn gain_ratio_numeric<R: AsRef<[Value]>>(
    rows: &[R],
    attribute: usize,
    stride: usize,
) -> (f64, Value) {
    let parent = entropy(rows);
    let mut best_ratio = 0.0;
    let mut best_threshold = OrderedFloat(0.0);
    for candidate in rows.iter().step_by(stride.max(1)) {
        let threshold = candidate.as_ref()[attribute];
        if threshold.0.is_nan() {
            continue;
        }
        let (low, high) = split_on_numerical(rows, attribute, threshold);
        if low.is_empty() || high.is_empty() {
            continue;
        }
        let ratio = partition_gain_ratio(parent, rows.len(), &[low.as_slice(), high.as_slice()]);
        if ratio > best_ratio {
            best_ratio = ratio;
            best_threshold = threshold;
        }
    }
    (best_ratio, best_threshold)
}

/// Pick the attribute with the strictly highest positive gain ratio.
///
/// Numeric attributes whose budget is spent are skipped. Earlier columns win
/// ties. Returns `None` when no attribute carries any information.
pub fn select_best_attribute<R: AsRef<[Value]>>(
    rows: &[R],
    attributes: &[Attribute],
    budget: &SplitBudget,
    stride: usize,
) -> Option<BestAttribute> {
    let mut best: Option<BestAttribute> = None;
    for (attribute, meta) in attributes.iter().enumerate().skip(1) {
        let candidate = if meta.is_nominal {
            BestAttribute {
                attribute,
                gain_ratio: gain_ratio_nominal(rows, attribute),
                threshold: None,
            }
        } else {
            if !budget.allows(attribute) {
                trace!(attribute, name = %meta.name, "numeric split budget exhausted");
                continue;
            }
            let (gain_ratio, threshold) = gain_ratio_numeric(rows, attribute, stride);
            BestAttribute {
                attribute,
                gain_ratio,
                threshold: Some(threshold),
            }
        };
        let best_ratio = best.map_or(0.0, |current| current.gain_ratio);
        if candidate.gain_ratio > best_ratio {
            best = Some(candidate);
        }
    }
    best
}

fn partition_gain_ratio(parent_entropy: f64, total: usize, parts: &[&[&[Value]]]) -> f64 {
    let total_f = total as f64;
    let remainder: f64 = parts
        .iter()
        .map(|&part| part.len() as f64 / total_f * entropy(part))
        .sum();
    let sizes: Vec<usize> = parts.iter().map(|part| part.len()).collect();
    let split_info = intrinsic_value(&sizes);
    if split_info == 0.0 {
        return 0.0;
    }
    (parent_entropy - remainder) / split_info
}
