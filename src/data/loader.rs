use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{Genotype, Sample, TimePoint};
use super::source::ReplicateCounter;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load measurement rows from a file.  Dispatch by extension.
///
/// Every format carries the same long-form columns:
/// `time`, `genotype`, optional `replicate`, `expression`.
///
/// * `.parquet` – string label columns, integer replicate, float expression
/// * `.json`    – `[{ "time": "P28", "genotype": "WT", "expression": 0.4 }, ...]`
/// * `.csv`     – header row with the column names above
pub fn load_file(path: &Path) -> Result<Vec<Sample>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let samples = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    if samples.is_empty() {
        bail!("{} contains no sample rows", path.display());
    }
    Ok(samples)
}

// ---------------------------------------------------------------------------
// Row assembly shared by all formats
// ---------------------------------------------------------------------------

/// One loosely typed row as it appears in CSV / JSON.
#[derive(Debug, Deserialize)]
struct RawRecord {
    time: String,
    genotype: String,
    #[serde(default)]
    replicate: Option<u32>,
    #[serde(default)]
    expression: Option<f64>,
}

struct RowBuilder {
    replicates: ReplicateCounter,
}

impl RowBuilder {
    fn new() -> Self {
        Self {
            replicates: ReplicateCounter::default(),
        }
    }

    /// Parse labels into typed axes; a missing expression becomes NaN.
    fn build(
        &mut self,
        row: usize,
        time: &str,
        genotype: &str,
        replicate: Option<u32>,
        expression: Option<f64>,
    ) -> Result<Sample> {
        let time: TimePoint = time.parse().with_context(|| format!("Row {row}"))?;
        let genotype: Genotype = genotype.parse().with_context(|| format!("Row {row}"))?;
        let replicate = self.replicates.assign(time, genotype, replicate);
        Ok(Sample {
            time,
            genotype,
            replicate,
            expression: expression.unwrap_or(f64::NAN),
        })
    }

    fn build_raw(&mut self, row: usize, rec: RawRecord) -> Result<Sample> {
        self.build(row, &rec.time, &rec.genotype, rec.replicate, rec.expression)
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "time": "E12.5", "genotype": "WT", "replicate": 1, "expression": 0.42 },
///   { "time": "E12.5", "genotype": "WT", "replicate": 2, "expression": null },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Sample>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<RawRecord> =
        serde_json::from_str(&text).context("parsing JSON sample records")?;

    let mut builder = RowBuilder::new();
    records
        .into_iter()
        .enumerate()
        .map(|(i, rec)| builder.build_raw(i, rec))
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming `time`, `genotype`, `expression` and
/// optionally `replicate`.  An empty `expression` cell is a missing value.
fn load_csv(path: &Path) -> Result<Vec<Sample>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let mut builder = RowBuilder::new();
    let mut samples = Vec::new();

    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let rec = result.with_context(|| format!("CSV row {row_no}"))?;
        samples.push(builder.build_raw(row_no, rec)?);
    }

    Ok(samples)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of sample rows.
///
/// Expected schema:
/// - `time`, `genotype`: Utf8 or LargeUtf8
/// - `replicate` (optional): Int32 or Int64
/// - `expression`: Float64 or Float32, nulls read as missing
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<Sample>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = RowBuilder::new();
    let mut samples = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let time_col = column(&batch, "time")?;
        let genotype_col = column(&batch, "genotype")?;
        let expression_col = column(&batch, "expression")?;
        let replicate_col = schema.index_of("replicate").ok().map(|i| batch.column(i));

        for row in 0..batch.num_rows() {
            let row_no = samples.len();
            let time = extract_string(time_col, row)
                .with_context(|| format!("Row {row_no}: failed to read 'time'"))?;
            let genotype = extract_string(genotype_col, row)
                .with_context(|| format!("Row {row_no}: failed to read 'genotype'"))?;
            let expression = extract_f64(expression_col, row)
                .with_context(|| format!("Row {row_no}: failed to read 'expression'"))?;
            let replicate = match replicate_col {
                Some(col) => extract_u32(col, row)
                    .with_context(|| format!("Row {row_no}: failed to read 'replicate'"))?,
                None => None,
            };

            samples.push(rows.build(row_no, &time, &genotype, replicate, expression)?);
        }
    }

    Ok(samples)
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null label");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(Some(arr.value(row)))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(Some(arr.value(row) as f64))
    } else {
        bail!("Expected Float64 or Float32, got {:?}", col.data_type())
    }
}

fn extract_u32(col: &Arc<dyn Array>, row: usize) -> Result<Option<u32>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        arr.value(row)
    } else if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        arr.value(row) as i64
    } else {
        bail!("Expected Int64 or Int32, got {:?}", col.data_type())
    };
    let value = u32::try_from(value).with_context(|| format!("replicate {value} out of range"))?;
    Ok(Some(value))
}
