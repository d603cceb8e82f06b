//! Statistics over the label column.

use std::collections::HashMap;

use super::dataset::Value;

/// Count label occurrences in first-seen order.
pub fn label_counts<R: AsRef<[Value]>>(rows: &[R]) -> Vec<(Value, usize)> {
    let mut slots: HashMap<Value, usize> = HashMap::new();
    let mut counts: Vec<(Value, usize)> = Vec::new();
    for row in rows {
        let label = row.as_ref()[0];
        match slots.get(&label) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(label, counts.len());
                counts.push((label, 1));
            }
        }
    }
    counts
}

/// Most frequent label; ties go to the label seen first.
pub fn mode<R: AsRef<[Value]>>(rows: &[R]) -> Option<Value> {
    let mut best: Option<(Value, usize)> = None;
    for (label, count) in label_counts(rows) {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((label, count));
        }
    }
    best.map(|(label, _)| label)
}

/// The shared label when every row agrees, otherwise `None`.
pub fn check_homogenous<R: AsRef<[Value]>>(rows: &[R]) -> Option<Value> {
    let first = rows.first()?.as_ref()[0];
    rows.iter()
        .all(|row| row.as_ref()[0] == first)
        .then_some(first)
}

/// Shannon entropy (base 2) of the label distribution. Empty input yields 0.
pub fn entropy<R: AsRef<[Value]>>(rows: &[R]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let total = rows.len() as f64;
    let sum: f64 = label_counts(rows)
        .into_iter()
        .map(|(_, count)| {
            let p = count as f64 / total;
            p * p.log2()
        })
        .sum();
    -sum
}

/// Entropy of a split's partition sizes. Zero-sized parts contribute nothing.
pub fn intrinsic_value(sizes: &[usize]) -> f64 {
    let total: usize = sizes.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    sizes
        .iter()
        .filter(|&&size| size > 0)
        .map(|&size| {
            let p = size as f64 / total;
            -p * p.log2()
        })
        .sum()
}
