use std::collections::BTreeMap;
use std::io;

use clap::ValueEnum;
use thiserror::Error;

use super::model::{ExpressionDataset, Genotype, TimePoint};

// ---------------------------------------------------------------------------
// Missing-value policy
// ---------------------------------------------------------------------------

/// What to do with a (time, genotype) cell that has no finite replicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MissingPolicy {
    /// Fill with the mean of the present cell means in the same genotype
    /// column. An approximation for display purposes, not a statistical
    /// imputation. A column with no present means stays NaN.
    #[default]
    ColumnMean,
    /// Fail on the first missing cell.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregateError {
    #[error("no samples to aggregate")]
    Empty,
    #[error("no finite expression for {genotype} at {time}")]
    MissingCell { time: TimePoint, genotype: Genotype },
}

// ---------------------------------------------------------------------------
// MeanTable – time (rows) x genotype (columns)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanCell {
    pub value: f64,
    /// True when `value` came from the missing-value policy, not from replicates.
    pub imputed: bool,
}

/// Mean expression per (time, genotype).
#[derive(Debug, Clone, PartialEq)]
pub struct MeanTable {
    /// Row axis in chronological order.
    pub time_points: Vec<TimePoint>,
    /// Column axis.
    pub genotypes: Vec<Genotype>,
    cells: BTreeMap<(TimePoint, Genotype), MeanCell>,
}

impl MeanTable {
    pub fn cell(&self, time: TimePoint, genotype: Genotype) -> Option<MeanCell> {
        self.cells.get(&(time, genotype)).copied()
    }

    pub fn value(&self, time: TimePoint, genotype: Genotype) -> Option<f64> {
        self.cell(time, genotype).map(|c| c.value)
    }

    /// One value per row for a genotype column, in row order.
    pub fn series(&self, genotype: Genotype) -> Vec<f64> {
        self.time_points
            .iter()
            .map(|&t| self.value(t, genotype).unwrap_or(f64::NAN))
            .collect()
    }

    /// Number of cells (rows x columns).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn imputed_count(&self) -> usize {
        self.cells.values().filter(|c| c.imputed).count()
    }

    /// Write the table as CSV: a `time` column followed by one column per genotype.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> csv::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec!["time".to_string()];
        header.extend(self.genotypes.iter().map(|g| g.label().to_string()));
        wtr.write_record(&header)?;

        for &time in &self.time_points {
            let mut record = vec![time.label().to_string()];
            record.extend(self.genotypes.iter().map(|&g| {
                self.value(time, g)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            }));
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Group samples by (time, genotype) and average the finite expression values.
pub fn mean_table(
    dataset: &ExpressionDataset,
    policy: MissingPolicy,
) -> Result<MeanTable, AggregateError> {
    if dataset.is_empty() {
        return Err(AggregateError::Empty);
    }

    let mut sums: BTreeMap<(TimePoint, Genotype), (f64, usize)> = BTreeMap::new();
    for s in dataset.samples.iter().filter(|s| s.expression.is_finite()) {
        let acc = sums.entry((s.time, s.genotype)).or_insert((0.0, 0));
        acc.0 += s.expression;
        acc.1 += 1;
    }

    let time_points: Vec<TimePoint> = dataset.time_points.iter().copied().collect();
    let genotypes: Vec<Genotype> = dataset.genotypes.iter().copied().collect();
    let mut cells = BTreeMap::new();

    for &genotype in &genotypes {
        let present: Vec<(TimePoint, f64)> = time_points
            .iter()
            .filter_map(|&t| {
                sums.get(&(t, genotype))
                    .map(|&(sum, n)| (t, sum / n as f64))
            })
            .collect();

        let column_mean = if present.is_empty() {
            f64::NAN
        } else {
            present.iter().map(|(_, v)| v).sum::<f64>() / present.len() as f64
        };

        for &time in &time_points {
            let cell = match present.iter().find(|(t, _)| *t == time) {
                Some(&(_, value)) => MeanCell {
                    value,
                    imputed: false,
                },
                None => match policy {
                    MissingPolicy::Reject => {
                        return Err(AggregateError::MissingCell { time, genotype });
                    }
                    MissingPolicy::ColumnMean => {
                        log::warn!(
                            "No expression for {genotype} at {time}; filling with column mean {column_mean:.4}"
                        );
                        MeanCell {
                            value: column_mean,
                            imputed: true,
                        }
                    }
                },
            };
            cells.insert((time, genotype), cell);
        }
    }

    Ok(MeanTable {
        time_points,
        genotypes,
        cells,
    })
}
