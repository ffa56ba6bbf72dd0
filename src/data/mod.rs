/// Data layer: core types, sample sources, and aggregation.
///
/// Architecture:
/// ```text
///  synthetic RNG  |  .parquet / .json / .csv
///        │                  │
///        ▼                  ▼
///   ┌──────────────────────────┐
///   │  source / loader          │  SampleSource → Vec<Sample>
///   └──────────────────────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ ExpressionDataset │  samples + covered time points / genotypes
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  mean per (time, genotype), missing-value policy → MeanTable
///   └──────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
pub mod source;
