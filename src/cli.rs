use std::path::PathBuf;

use clap::Parser;

use crate::data::aggregate::MissingPolicy;
use crate::data::source::Layout;
use crate::pipeline::{PipelineConfig, SourceSpec};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Seed for the synthetic sample table (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Synthetic table layout
    #[arg(long, value_enum, default_value_t = Layout::Replicated)]
    pub layout: Layout,

    /// Load measurements from a .csv, .json or .parquet file instead of synthesizing
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Policy for (time, genotype) cells without data
    #[arg(long, value_enum, default_value_t = MissingPolicy::ColumnMean)]
    pub missing: MissingPolicy,

    /// Write PNG charts and the mean table CSV to this directory
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Run without GUI (headless)
    #[arg(long, default_value_t = false)]
    pub nogui: bool,
}

impl Args {
    /// Resolve into a pipeline configuration, drawing a seed if none was given.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let source = match &self.input {
            Some(path) => SourceSpec::File(path.clone()),
            None => {
                let seed = self.seed.unwrap_or_else(rand::random);
                log::info!("Synthetic data seed: {seed}");
                SourceSpec::Synthetic {
                    seed,
                    layout: self.layout,
                }
            }
        };
        PipelineConfig {
            source,
            missing: self.missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["expression-curves", "--seed", "5"]);
        assert_eq!(args.layout, Layout::Replicated);
        assert_eq!(args.missing, MissingPolicy::ColumnMean);
        assert!(!args.nogui);
        assert_eq!(
            args.pipeline_config().source,
            SourceSpec::Synthetic {
                seed: 5,
                layout: Layout::Replicated
            }
        );
    }

    #[test]
    fn input_overrides_synthetic() {
        let args = Args::parse_from([
            "expression-curves",
            "--input",
            "data.csv",
            "--missing",
            "reject",
            "--layout",
            "reduced",
            "--nogui",
        ]);
        let config = args.pipeline_config();
        assert_eq!(config.source, SourceSpec::File(PathBuf::from("data.csv")));
        assert_eq!(config.missing, MissingPolicy::Reject);
        assert!(args.nogui);
    }
}
