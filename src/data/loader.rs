use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{AttrValue, Catalog, CatalogRow};

/// Structural problems with the input file, independent of the format.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("input file has no columns")]
    NoColumns,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalog from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one scalar cell per column
/// * `.json`    – `[{ "Model": "A", "Color": "Red", ... }, ...]`
/// * `.parquet` – scalar columns
///
/// Whatever the first column is called in the file, it becomes the "Model"
/// identifier column; the remaining columns become filterable attributes.
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one scalar cell per column.
/// Cell types are guessed per cell (int, float, bool, text); empty cells are
/// treated as missing.
fn load_csv(path: &Path) -> Result<Catalog> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        bail!(LoadError::NoColumns);
    }
    let attribute_columns: Vec<String> = headers[1..].to_vec();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let model = record.get(0).unwrap_or("").to_string();
        let mut attributes = BTreeMap::new();
        for (col_idx, col_name) in attribute_columns.iter().enumerate() {
            let cell = record.get(col_idx + 1).unwrap_or("");
            attributes.insert(col_name.clone(), guess_cell_type(cell));
        }
        rows.push(CatalogRow { model, attributes });
    }

    Ok(Catalog::from_rows(attribute_columns, rows))
}

fn guess_cell_type(s: &str) -> AttrValue {
    let s = s.trim();
    if s.is_empty() {
        return AttrValue::Missing;
    }
    if let Ok(i) = s.parse::<i64>() {
        return AttrValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return AttrValue::Float(f);
    }
    if s == "true" || s == "false" {
        return AttrValue::Bool(s == "true");
    }
    AttrValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Modelo": "A", "Color": "Red", "Price": 10 },
///   { "Modelo": "B", "Color": "Blue", "Price": 20 }
/// ]
/// ```
///
/// The first key of the first record is the identifier column. Column order
/// follows first appearance across the records (`serde_json` is built with
/// `preserve_order`).
fn load_json(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;
    if records.is_empty() {
        return Ok(Catalog::from_rows(Vec::new(), Vec::new()));
    }

    let id_key = records[0]
        .as_object()
        .context("Row 0 is not a JSON object")?
        .keys()
        .next()
        .cloned()
        .ok_or(LoadError::NoColumns)?;

    let mut attribute_columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let model = obj.get(&id_key).map(json_display).unwrap_or_default();

        let mut attributes = BTreeMap::new();
        for (key, val) in obj {
            if *key == id_key {
                continue;
            }
            if !attribute_columns.contains(key) {
                attribute_columns.push(key.clone());
            }
            attributes.insert(key.clone(), json_to_attr(val));
        }
        rows.push(CatalogRow { model, attributes });
    }

    Ok(Catalog::from_rows(attribute_columns, rows))
}

fn json_display(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_to_attr(val: &JsonValue) -> AttrValue {
    match val {
        JsonValue::String(s) => AttrValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                AttrValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                AttrValue::Float(f)
            } else {
                AttrValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => AttrValue::Bool(*b),
        JsonValue::Null => AttrValue::Missing,
        other => AttrValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet catalog. Scalar columns only; the first schema field is the
/// identifier, the rest become attributes (strings, ints, floats, bools).
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Catalog> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let schema = builder.schema().clone();
    if schema.fields().is_empty() {
        bail!(LoadError::NoColumns);
    }
    let attribute_columns: Vec<String> = schema
        .fields()
        .iter()
        .skip(1)
        .map(|f| f.name().clone())
        .collect();

    let reader = builder.build().context("building parquet reader")?;
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        for row_idx in 0..batch.num_rows() {
            let model = extract_attr_value(batch.column(0), row_idx).to_string();

            let mut attributes = BTreeMap::new();
            for (col_idx, col_name) in attribute_columns.iter().enumerate() {
                let value = extract_attr_value(batch.column(col_idx + 1), row_idx);
                attributes.insert(col_name.clone(), value);
            }
            rows.push(CatalogRow { model, attributes });
        }
    }

    Ok(Catalog::from_rows(attribute_columns, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_attr_value(col: &Arc<dyn Array>, row: usize) -> AttrValue {
    if col.is_null(row) {
        return AttrValue::Missing;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            // prettyprint display handles both string widths
            array_value_to_string(col.as_ref(), row)
                .map(AttrValue::Text)
                .unwrap_or(AttrValue::Missing)
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            AttrValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            AttrValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            AttrValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            AttrValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            AttrValue::Bool(arr.value(row))
        }
        _ => array_value_to_string(col.as_ref(), row)
            .map(AttrValue::Text)
            .unwrap_or(AttrValue::Missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::array::{Float64Array as ArrowF64, Int64Array as ArrowI64, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_first_column_is_identifier_whatever_its_header() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "locks.csv",
            "Produto,Color,Price\nA,Red,10\nB,Blue,20\nC,Red,20\n",
        );
        let catalog = load_file(&path).unwrap();
        assert_eq!(catalog.attribute_columns, vec!["Color", "Price"]);
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.rows[0].model, "A");
        assert_eq!(catalog.rows[2].get("Price"), &AttrValue::Integer(20));
    }

    #[test]
    fn csv_cell_types_are_guessed() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "locks.csv",
            "Model,Price,Weight,Keypad,Color\nA,10,1.5,true,Red\n",
        );
        let catalog = load_file(&path).unwrap();
        let row = &catalog.rows[0];
        assert_eq!(row.get("Price"), &AttrValue::Integer(10));
        assert_eq!(row.get("Weight"), &AttrValue::Float(1.5));
        assert_eq!(row.get("Keypad"), &AttrValue::Bool(true));
        assert_eq!(row.get("Color"), &AttrValue::Text("Red".into()));
    }

    #[test]
    fn csv_empty_cells_are_missing_and_not_options() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "locks.csv", "Model,Color\nA,\nB,Red\n");
        let catalog = load_file(&path).unwrap();
        assert!(catalog.rows[0].get("Color").is_missing());
        assert_eq!(catalog.options["Color"].len(), 1);
    }

    #[test]
    fn json_preserves_column_order_and_nulls() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "locks.json",
            r#"[
                {"Modelo": "A", "Color": "Red", "Price": 10},
                {"Modelo": "B", "Color": null, "Price": 20.5}
            ]"#,
        );
        let catalog = load_file(&path).unwrap();
        assert_eq!(catalog.attribute_columns, vec!["Color", "Price"]);
        assert_eq!(catalog.rows[0].model, "A");
        assert!(catalog.rows[1].get("Color").is_missing());
        assert_eq!(catalog.rows[1].get("Price"), &AttrValue::Float(20.5));
    }

    #[test]
    fn json_empty_array_is_an_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "locks.json", "[]");
        let catalog = load_file(&path).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.attribute_columns.is_empty());
    }

    #[test]
    fn parquet_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("locks.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Modelo", DataType::Utf8, false),
            Field::new("Color", DataType::Utf8, true),
            Field::new("Price", DataType::Int64, true),
            Field::new("Weight", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(StringArray::from(vec![Some("Red"), None])),
                Arc::new(ArrowI64::from(vec![10, 20])),
                Arc::new(ArrowF64::from(vec![1.5, 2.0])),
            ],
        )
        .unwrap();

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let catalog = load_file(&path).unwrap();
        assert_eq!(catalog.attribute_columns, vec!["Color", "Price", "Weight"]);
        assert_eq!(catalog.rows[0].model, "A");
        assert_eq!(catalog.rows[0].get("Color"), &AttrValue::Text("Red".into()));
        assert!(catalog.rows[1].get("Color").is_missing());
        assert_eq!(catalog.rows[1].get("Weight"), &AttrValue::Float(2.0));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "locks.xlsx", "");
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported file extension"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("does-not-exist.csv")).is_err());
    }
}
