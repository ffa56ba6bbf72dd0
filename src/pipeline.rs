use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::aggregate::{MeanTable, MissingPolicy, mean_table};
use crate::data::model::ExpressionDataset;
use crate::data::source::{FileSource, Layout, SampleSource, SyntheticSource};
use crate::figure::ExpressionFigure;

// ---------------------------------------------------------------------------
// Source -> mean table -> smoothed figure
// ---------------------------------------------------------------------------

/// Where the sample table comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceSpec {
    Synthetic { seed: u64, layout: Layout },
    File(PathBuf),
}

impl SourceSpec {
    pub fn into_source(self) -> Box<dyn SampleSource> {
        match self {
            SourceSpec::Synthetic { seed, layout } => Box::new(SyntheticSource::new(seed, layout)),
            SourceSpec::File(path) => Box::new(FileSource::new(path)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub source: SourceSpec,
    pub missing: MissingPolicy,
}

/// Result of one pass through the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub source_label: String,
    pub dataset: ExpressionDataset,
    pub table: MeanTable,
    pub figure: ExpressionFigure,
}

pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    let source = config.source.clone().into_source();
    run_with(source.as_ref(), config.missing)
}

/// Aggregate and smooth whatever `source` provides.
pub fn run_with(source: &dyn SampleSource, missing: MissingPolicy) -> Result<PipelineOutput> {
    let source_label = source.describe();
    let samples = source
        .samples()
        .with_context(|| format!("reading samples from {source_label}"))?;
    let dataset = ExpressionDataset::from_samples(samples);
    log::info!(
        "Loaded {} samples from {source_label} ({} time points, {} genotypes)",
        dataset.len(),
        dataset.time_points.len(),
        dataset.genotypes.len()
    );

    let table = mean_table(&dataset, missing).context("aggregating mean expression")?;
    if table.imputed_count() > 0 {
        log::info!("{} of {} cells imputed", table.imputed_count(), table.len());
    }

    let figure = ExpressionFigure::build(&table).context("smoothing mean expression")?;

    Ok(PipelineOutput {
        source_label,
        dataset,
        table,
        figure,
    })
}
