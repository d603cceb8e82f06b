//! Row partitioning for nominal and numeric splits.
//!
//! Partitions borrow the caller's rows, so recursion never copies row data.

use std::collections::HashMap;

use super::dataset::Value;

/// Rows grouped by one nominal value, in order of first occurrence.
pub type NominalPartition<'a> = Vec<(Value, Vec<&'a [Value]>)>;

/// Group rows by exact equality of the value at `attribute`.
pub fn split_on_nominal<R: AsRef<[Value]>>(rows: &[R], attribute: usize) -> NominalPartition<'_> {
    let mut slots: HashMap<Value, usize> = HashMap::new();
    let mut groups: NominalPartition<'_> = Vec::new();
    for row in rows {
        let row = row.as_ref();
        let key = row[attribute];
        match slots.get(&key) {
            Some(&slot) => groups[slot].1.push(row),
            None => {
                slots.insert(key, groups.len());
                groups.push((key, vec![row]));
            }
        }
    }
    groups
}

/// Split rows into `value < threshold` and `value >= threshold`, keeping row order.
pub fn split_on_numerical<R: AsRef<[Value]>>(
    rows: &[R],
    attribute: usize,
    threshold: Value,
) -> (Vec<&[Value]>, Vec<&[Value]>) {
    let mut low = Vec::new();
    let mut high = Vec::new();
    for row in rows {
        let row = row.as_ref();
        if row[attribute] < threshold {
            low.push(row);
        } else {
            high.push(row);
        }
    }
    (low, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::id3::dataset::{MISSING, Row, row_from_f64};
    use ordered_float::OrderedFloat;

    fn rows(data: &[[f64; 2]]) -> Vec<Row> {
        data.iter().map(|r| row_from_f64(r)).collect()
    }

    fn sorted(mut rows: Vec<Vec<Value>>) -> Vec<Vec<Value>> {
        rows.sort();
        rows
    }

    #[test]
    fn nominal_groups_in_first_seen_order() {
        let data = rows(&[
            [0.0, 4.0],
            [1.0, 3.0],
            [1.0, 2.0],
            [0.0, 0.0],
            [0.0, 0.0],
            [0.0, 4.0],
            [1.0, 4.0],
            [0.0, 2.0],
            [1.0, 2.0],
            [0.0, 1.0],
        ]);
        let groups = split_on_nominal(&data, 1);
        let keys: Vec<f64> = groups.iter().map(|(k, _)| k.0).collect();
        assert_eq!(keys, vec![4.0, 3.0, 2.0, 0.0, 1.0]);
        let fours: Vec<Row> = groups[0].1.iter().map(|r| r.to_vec()).collect();
        assert_eq!(fours, rows(&[[0.0, 4.0], [0.0, 4.0], [1.0, 4.0]]));
        let twos: Vec<Row> = groups[2].1.iter().map(|r| r.to_vec()).collect();
        assert_eq!(twos, rows(&[[1.0, 2.0], [0.0, 2.0], [1.0, 2.0]]));
    }

    #[test]
    fn nominal_partitions_cover_every_row_once() {
        let data = rows(&[[1.0, 2.0], [1.0, 0.0], [0.0, 0.0], [1.0, 3.0], [0.0, 2.0], [0.0, 3.0]]);
        let groups = split_on_nominal(&data, 1);
        let rejoined: Vec<Row> = groups
            .iter()
            .flat_map(|(_, members)| members.iter().map(|r| r.to_vec()))
            .collect();
        assert_eq!(sorted(rejoined), sorted(data.clone()));
        for (key, members) in &groups {
            assert!(members.iter().all(|r| r[1] == *key));
        }
    }

    #[test]
    fn missing_values_form_their_own_group() {
        let data = vec![
            row_from_f64(&[1.0, 2.0]),
            vec![OrderedFloat(0.0), MISSING],
            vec![OrderedFloat(1.0), MISSING],
        ];
        let groups = split_on_nominal(&data, 1);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].0, MISSING);
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn numeric_split_matches_reference() {
        let data = rows(&[
            [1.0, 0.25],
            [1.0, 0.89],
            [0.0, 0.93],
            [0.0, 0.48],
            [1.0, 0.19],
            [1.0, 0.49],
            [0.0, 0.6],
            [0.0, 0.6],
            [1.0, 0.34],
            [1.0, 0.19],
        ]);
        let (low, high) = split_on_numerical(&data, 1, OrderedFloat(0.48));
        let low: Vec<Row> = low.iter().map(|r| r.to_vec()).collect();
        let high: Vec<Row> = high.iter().map(|r| r.to_vec()).collect();
        assert_eq!(low, rows(&[[1.0, 0.25], [1.0, 0.19], [1.0, 0.34], [1.0, 0.19]]));
        assert_eq!(
            high,
            rows(&[[1.0, 0.89], [0.0, 0.93], [0.0, 0.48], [1.0, 0.49], [0.0, 0.6], [0.0, 0.6]])
        );
    }

    #[test]
    fn numeric_split_is_disjoint_and_complete() {
        let data = rows(&[
            [0.0, 0.91],
            [0.0, 0.84],
            [1.0, 0.82],
            [1.0, 0.07],
            [0.0, 0.82],
            [0.0, 0.59],
            [0.0, 0.87],
            [0.0, 0.17],
            [1.0, 0.05],
            [1.0, 0.76],
        ]);
        let threshold = OrderedFloat(0.17);
        let (low, high) = split_on_numerical(&data, 1, threshold);
        assert_eq!(low.len(), 2);
        assert_eq!(high.len(), 8);
        assert!(low.iter().all(|r| r[1] < threshold));
        assert!(high.iter().all(|r| r[1] >= threshold));
        let rejoined: Vec<Row> = low.iter().chain(high.iter()).map(|r| r.to_vec()).collect();
        assert_eq!(sorted(rejoined), sorted(data.clone()));
    }

    #[test]
    fn missing_numeric_values_go_high() {
        let data = vec![row_from_f64(&[0.0, 0.5]), vec![OrderedFloat(1.0), MISSING]];
        let (low, high) = split_on_numerical(&data, 1, OrderedFloat(1.0e9));
        assert_eq!(low.len(), 1);
        assert_eq!(high.len(), 1);
        assert_eq!(high[0][1], MISSING);
    }
}
