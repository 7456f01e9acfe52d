use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{DataError, Dataset, FieldValue, Row};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus records; every cell is loaded as text
/// * `.json`    – `[{ "petalLength": 1.4, "species": "setosa", ... }, ...]`
/// * `.parquet` – flat columns of strings, integers, floats or booleans
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::debug!(
        "parsed {} rows with columns {:?} from {}",
        dataset.len(),
        dataset.column_names,
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line.
/// Cells stay text; numeric columns are converted later by coercion.
fn load_csv(path: &Path) -> Result<Dataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let values = record
            .iter()
            .map(|cell| FieldValue::Text(cell.to_string()))
            .collect();
        rows.push(Row::new(values));
    }

    Ok(Dataset::new(headers, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "petalLength": 1.4, "petalWidth": 0.2, "species": "setosa" },
///   ...
/// ]
/// ```
///
/// Columns are the union of keys in first-seen order; keys missing from a
/// record read as null.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut column_names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !column_names.contains(key) {
                column_names.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            let values = column_names
                .iter()
                .map(|col| obj.get(col).map(json_to_field).unwrap_or(FieldValue::Null))
                .collect();
            Row::new(values)
        })
        .collect();

    Ok(Dataset::new(column_names, rows))
}

fn json_to_field(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::Text(s.clone()),
        JsonValue::Number(n) => n
            .as_f64()
            .map(FieldValue::Number)
            .unwrap_or_else(|| FieldValue::Text(n.to_string())),
        JsonValue::Bool(b) => FieldValue::Text(b.to_string()),
        JsonValue::Null => FieldValue::Null,
        other => FieldValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet file. Every column becomes a dataset column; strings
/// load as text, integers and floats as numbers, booleans as text.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let column_names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        if batch.num_columns() != column_names.len() {
            bail!(
                "record batch has {} columns, schema has {}",
                batch.num_columns(),
                column_names.len()
            );
        }

        for row in 0..batch.num_rows() {
            let values = batch
                .columns()
                .iter()
                .map(|col| extract_field_value(col, row))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Row {row}"))?;
            rows.push(Row::new(values));
        }
    }

    Ok(Dataset::new(column_names, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_field_value(col: &Arc<dyn Array>, row: usize) -> Result<FieldValue> {
    if col.is_null(row) {
        return Ok(FieldValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => FieldValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => FieldValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            FieldValue::Number(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            FieldValue::Number(arr.value(row) as f64)
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            FieldValue::Number(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            FieldValue::Number(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col
                .as_any()
                .downcast_ref::<BooleanArray>()
                .context("expected BooleanArray")?;
            FieldValue::Text(arr.value(row).to_string())
        }
        other => bail!("unsupported parquet column type {other:?}"),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const IRIS_HEAD: &str = "\
sepalLength,sepalWidth,petalLength,petalWidth,species
5.1,3.5,1.4,0.2,setosa
7.0,3.2,4.7,1.4,versicolor
6.3,3.3,6.0,2.5,virginica
";

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    #[test]
    fn csv_cells_load_as_text() {
        let ds = read_csv(csv::Reader::from_reader(IRIS_HEAD.as_bytes())).unwrap();

        assert_eq!(
            ds.column_names,
            vec!["sepalLength", "sepalWidth", "petalLength", "petalWidth", "species"]
        );
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.rows[1].get(2), &text("4.7"));
        assert_eq!(ds.rows[2].get(4), &text("virginica"));
    }

    #[test]
    fn load_file_reads_csv_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(IRIS_HEAD.as_bytes()).unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.rows[0].get(0), &text("5.1"));
    }

    #[test]
    fn json_records_keep_numbers_and_fill_missing_keys() {
        let ds = parse_json(
            r#"[
                {"petalLength": 1.4, "species": "setosa"},
                {"petalLength": "4.7", "species": "versicolor", "note": null},
                {"species": "virginica"}
            ]"#,
        )
        .unwrap();

        assert_eq!(ds.len(), 3);
        let len_idx = ds.column_index("petalLength").unwrap();
        let note_idx = ds.column_index("note").unwrap();
        assert_eq!(ds.rows[0].get(len_idx), &FieldValue::Number(1.4));
        assert_eq!(ds.rows[1].get(len_idx), &text("4.7"));
        assert_eq!(ds.rows[2].get(len_idx), &FieldValue::Null);
        assert_eq!(ds.rows[0].get(note_idx), &FieldValue::Null);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        assert!(parse_json(r#"{"petalLength": 1.4}"#).is_err());
        assert!(parse_json(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn unsupported_extension_fails() {
        let err = load_file(Path::new("iris.xlsx")).unwrap_err();
        assert!(
            err.chain()
                .any(|e| e.to_string().contains("unsupported file format: .xlsx"))
        );
    }

    #[test]
    fn missing_file_fails_with_context() {
        let err = load_file(Path::new("/nonexistent/iris.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/iris.csv"));
    }

    #[test]
    fn parquet_round_trip_through_arrow_writer() {
        use arrow::array::{Float64Array, StringArray};
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("petalLength", DataType::Float64, true),
            Field::new("species", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![Some(1.4), None])),
                Arc::new(StringArray::from(vec!["setosa", "virginica"])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.column_names, vec!["petalLength", "species"]);
        assert_eq!(ds.rows[0].get(0), &FieldValue::Number(1.4));
        assert_eq!(ds.rows[1].get(0), &FieldValue::Null);
        assert_eq!(ds.rows[1].get(1), &text("virginica"));
    }
}
