//! Writes a small deterministic door-lock catalog to `sample_catalog.parquet`
//! for manual testing:  `cargo run --bin generate_sample`.

use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const OUTPUT: &str = "sample_catalog.parquet";

fn main() -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Modelo", DataType::Utf8, false),
        Field::new("Color", DataType::Utf8, true),
        Field::new("Price", DataType::Float64, true),
        Field::new("Connectivity", DataType::Utf8, true),
        Field::new("Battery Months", DataType::Int64, true),
        Field::new("Keypad", DataType::Boolean, true),
    ]));

    let models = StringArray::from(vec![
        "SL-100", "SL-200", "SL-300", "KX-10", "KX-20", "KX-30", "TB-1", "TB-2", "TB-3", "ZR-5",
    ]);
    let colors = StringArray::from(vec![
        Some("Black"),
        Some("Black"),
        Some("Silver"),
        Some("White"),
        Some("Silver"),
        None,
        Some("Black"),
        Some("White"),
        Some("Silver"),
        Some("Black"),
    ]);
    let prices = Float64Array::from(vec![
        Some(99.9),
        Some(149.9),
        Some(199.9),
        Some(89.0),
        Some(129.0),
        Some(129.0),
        Some(249.0),
        Some(299.0),
        None,
        Some(349.0),
    ]);
    let connectivity = StringArray::from(vec![
        Some("Bluetooth"),
        Some("Bluetooth"),
        Some("WiFi"),
        None,
        Some("Bluetooth"),
        Some("WiFi"),
        Some("WiFi"),
        Some("Zigbee"),
        Some("Zigbee"),
        Some("WiFi"),
    ]);
    let battery = Int64Array::from(vec![
        Some(6),
        Some(6),
        Some(12),
        Some(12),
        Some(12),
        Some(9),
        Some(18),
        Some(18),
        Some(12),
        None,
    ]);
    let keypad = BooleanArray::from(vec![
        Some(false),
        Some(true),
        Some(true),
        Some(true),
        Some(false),
        Some(true),
        Some(true),
        Some(true),
        Some(false),
        Some(true),
    ]);

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(models),
            Arc::new(colors),
            Arc::new(prices),
            Arc::new(connectivity),
            Arc::new(battery),
            Arc::new(keypad),
        ],
    )
    .context("assembling record batch")?;

    let file = File::create(OUTPUT).with_context(|| format!("creating {OUTPUT}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("opening parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;

    println!("Wrote {OUTPUT} ({} rows)", batch.num_rows());
    Ok(())
}
