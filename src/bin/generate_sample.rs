use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

use expression_curves::data::model::Sample;
use expression_curves::data::source::{Layout, SampleSource, SyntheticSource};

/// Write a synthetic WT / G93A sample table as Parquet and CSV.
#[derive(Parser, Debug)]
#[command(about)]
struct Args {
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Layout::Replicated)]
    layout: Layout,

    /// Output path stem; `.parquet` and `.csv` are appended
    #[arg(long, default_value = "sample_data")]
    out: PathBuf,
}

fn write_parquet(samples: &[Sample], path: &Path) -> Result<()> {
    let time_array = StringArray::from(
        samples.iter().map(|s| s.time.label()).collect::<Vec<_>>(),
    );
    let genotype_array = StringArray::from(
        samples.iter().map(|s| s.genotype.label()).collect::<Vec<_>>(),
    );
    let replicate_array = Int64Array::from(
        samples.iter().map(|s| s.replicate as i64).collect::<Vec<_>>(),
    );
    let expression_array = Float64Array::from(
        samples.iter().map(|s| s.expression).collect::<Vec<_>>(),
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("time", DataType::Utf8, false),
        Field::new("genotype", DataType::Utf8, false),
        Field::new("replicate", DataType::Int64, false),
        Field::new("expression", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(time_array),
            Arc::new(genotype_array),
            Arc::new(replicate_array),
            Arc::new(expression_array),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn write_csv(samples: &[Sample], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).context("creating CSV output")?;
    for s in samples {
        wtr.serialize(s)?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let source = SyntheticSource::new(args.seed, args.layout);
    let samples = source.samples()?;

    let parquet_path = args.out.with_extension("parquet");
    let csv_path = args.out.with_extension("csv");
    write_parquet(&samples, &parquet_path)?;
    write_csv(&samples, &csv_path)?;

    println!(
        "Wrote {} samples ({}) to {} and {}",
        samples.len(),
        source.describe(),
        parquet_path.display(),
        csv_path.display()
    );
    Ok(())
}
