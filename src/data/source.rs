use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::model::{Genotype, Sample, TimePoint};

// ---------------------------------------------------------------------------
// SampleSource – where measurements come from
// ---------------------------------------------------------------------------

/// An injectable provider of sample rows.
pub trait SampleSource {
    /// Short human-readable description used in logs and the status line.
    fn describe(&self) -> String;

    fn samples(&self) -> Result<Vec<Sample>>;
}

// ---------------------------------------------------------------------------
// Synthetic placeholder data
// ---------------------------------------------------------------------------

/// Row layout of the synthetic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Layout {
    /// 6 time points x 2 genotypes x 3 replicates (36 rows).
    #[default]
    Replicated,
    /// 15 rows per genotype with uneven group sizes.
    Reduced,
}

/// Rows per time point in the reduced layout, for each genotype.
const REDUCED_GROUP_SIZES: [(TimePoint, u32); 6] = [
    (TimePoint::E12_5, 4),
    (TimePoint::P28, 2),
    (TimePoint::P56, 2),
    (TimePoint::P84, 2),
    (TimePoint::P119, 2),
    (TimePoint::P150, 3),
];

pub const REPLICATES: u32 = 3;

/// Uniform `[0, 1)` expression values from a seeded RNG.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    pub seed: u64,
    pub layout: Layout,
}

impl SyntheticSource {
    pub fn new(seed: u64, layout: Layout) -> Self {
        Self { seed, layout }
    }

    /// Group sizes in row order: genotype-major, then time, as the table is emitted.
    fn groups(&self) -> Vec<(Genotype, TimePoint, u32)> {
        Genotype::ALL
            .into_iter()
            .flat_map(|g| {
                let sizes: Vec<(TimePoint, u32)> = match self.layout {
                    Layout::Replicated => {
                        TimePoint::ALL.into_iter().map(|t| (t, REPLICATES)).collect()
                    }
                    Layout::Reduced => REDUCED_GROUP_SIZES.to_vec(),
                };
                sizes.into_iter().map(move |(t, n)| (g, t, n))
            })
            .collect()
    }
}

impl SampleSource for SyntheticSource {
    fn describe(&self) -> String {
        format!("synthetic {:?} layout, seed {}", self.layout, self.seed)
    }

    fn samples(&self) -> Result<Vec<Sample>> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut rows = Vec::new();
        for (genotype, time, n) in self.groups() {
            for replicate in 1..=n {
                rows.push(Sample {
                    time,
                    genotype,
                    replicate,
                    expression: rng.random::<f64>(),
                });
            }
        }
        Ok(rows)
    }
}

// ---------------------------------------------------------------------------
// File-backed measurements
// ---------------------------------------------------------------------------

/// Measurements read from a `.csv`, `.json` or `.parquet` file.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SampleSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn samples(&self) -> Result<Vec<Sample>> {
        super::loader::load_file(&self.path)
    }
}

// ---------------------------------------------------------------------------
// Replicate numbering for sources that omit it
// ---------------------------------------------------------------------------

/// Hands out 1-based replicate indices per (time, genotype) group.
#[derive(Debug, Default)]
pub struct ReplicateCounter {
    seen: BTreeMap<(TimePoint, Genotype), u32>,
}

impl ReplicateCounter {
    /// Use `explicit` when given, otherwise the next index for the group.
    pub fn assign(&mut self, time: TimePoint, genotype: Genotype, explicit: Option<u32>) -> u32 {
        let counter = self.seen.entry((time, genotype)).or_default();
        *counter += 1;
        explicit.unwrap_or(*counter)
    }
}
