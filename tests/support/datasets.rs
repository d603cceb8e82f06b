use std::path::Path;

use id3tree::ml::id3::{Attribute, Row, row_from_f64};

/// Match results: label `winner`, nominal `weather`, numeric `rest_days`.
pub fn match_attributes() -> Vec<Attribute> {
    vec![
        Attribute::nominal("winner"),
        Attribute::nominal("weather"),
        Attribute::numeric("rest_days"),
    ]
}

pub fn match_rows() -> Vec<Row> {
    [
        [1.0, 0.0, 3.0],
        [1.0, 0.0, 4.0],
        [0.0, 1.0, 1.0],
        [0.0, 1.0, 2.0],
        [1.0, 1.0, 5.0],
        [0.0, 2.0, 1.0],
        [1.0, 2.0, 4.0],
        [0.0, 2.0, 0.0],
        [1.0, 0.0, 6.0],
        [0.0, 1.0, 0.0],
        [1.0, 2.0, 5.0],
        [0.0, 0.0, 1.0],
    ]
    .iter()
    .map(|r| row_from_f64(r))
    .collect()
}

/// Write rows and metadata in the JSON layout `TrainDataset::load_json` reads.
pub fn write_dataset_json(path: &Path, attributes: &[Attribute], rows: &[Row]) {
    let rows: Vec<Vec<serde_json::Value>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| {
                    if v.0.is_nan() {
                        serde_json::Value::Null
                    } else {
                        serde_json::json!(v.0)
                    }
                })
                .collect()
        })
        .collect();
    let doc = serde_json::json!({
        "attributes": attributes,
        "rows": rows,
    });
    std::fs::write(path, serde_json::to_vec_pretty(&doc).expect("encode dataset"))
        .expect("write dataset");
}
