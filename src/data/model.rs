use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// TimePoint – developmental / age stage
// ---------------------------------------------------------------------------

/// A sampled developmental stage.
///
/// Variant order is the canonical axis order (`E12.5` first, `P150` last), so
/// the derived `Ord` sorts chronologically rather than alphabetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimePoint {
    #[serde(rename = "E12.5")]
    E12_5,
    #[serde(rename = "P28")]
    P28,
    #[serde(rename = "P56")]
    P56,
    #[serde(rename = "P84")]
    P84,
    #[serde(rename = "P119")]
    P119,
    #[serde(rename = "P150")]
    P150,
}

impl TimePoint {
    /// All stages in axis order.
    pub const ALL: [TimePoint; 6] = [
        TimePoint::E12_5,
        TimePoint::P28,
        TimePoint::P56,
        TimePoint::P84,
        TimePoint::P119,
        TimePoint::P150,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimePoint::E12_5 => "E12.5",
            TimePoint::P28 => "P28",
            TimePoint::P56 => "P56",
            TimePoint::P84 => "P84",
            TimePoint::P119 => "P119",
            TimePoint::P150 => "P150",
        }
    }

    /// Age in days (embryonic days for `E12.5`, postnatal days otherwise).
    pub const fn days(self) -> f64 {
        match self {
            TimePoint::E12_5 => 12.5,
            TimePoint::P28 => 28.0,
            TimePoint::P56 => 56.0,
            TimePoint::P84 => 84.0,
            TimePoint::P119 => 119.0,
            TimePoint::P150 => 150.0,
        }
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Genotype – experimental condition
// ---------------------------------------------------------------------------

/// Wild-type or the SOD1 G93A disease model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Genotype {
    #[serde(rename = "WT")]
    WildType,
    #[serde(rename = "G93A")]
    G93A,
}

impl Genotype {
    pub const ALL: [Genotype; 2] = [Genotype::WildType, Genotype::G93A];

    pub fn label(self) -> &'static str {
        match self {
            Genotype::WildType => "WT",
            Genotype::G93A => "G93A",
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// -- Label parsing --

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("unknown time point '{0}' (expected one of E12.5, P28, P56, P84, P119, P150)")]
    TimePoint(String),
    #[error("unknown genotype '{0}' (expected WT or G93A)")]
    Genotype(String),
}

impl FromStr for TimePoint {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TimePoint::ALL
            .into_iter()
            .find(|tp| tp.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| LabelError::TimePoint(s.to_string()))
    }
}

impl FromStr for Genotype {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Genotype::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| LabelError::Genotype(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Sample – one row of the measurement table
// ---------------------------------------------------------------------------

/// A single replicate measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: TimePoint,
    pub genotype: Genotype,
    /// 1-based replicate index within its (time, genotype) group.
    pub replicate: u32,
    /// Expression value; NaN marks a missing measurement.
    pub expression: f64,
}

// ---------------------------------------------------------------------------
// ExpressionDataset – the complete sample table
// ---------------------------------------------------------------------------

/// All samples of one run with the axes they cover.
#[derive(Debug, Clone, Default)]
pub struct ExpressionDataset {
    pub samples: Vec<Sample>,
    /// Time points with at least one row, in axis order.
    pub time_points: BTreeSet<TimePoint>,
    /// Genotypes with at least one row.
    pub genotypes: BTreeSet<Genotype>,
}

impl ExpressionDataset {
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let time_points = samples.iter().map(|s| s.time).collect();
        let genotypes = samples.iter().map(|s| s.genotype).collect();
        ExpressionDataset {
            samples,
            time_points,
            genotypes,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_points_sort_chronologically() {
        let mut labels: Vec<TimePoint> = ["P150", "P28", "E12.5", "P119", "P56", "P84"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        labels.sort();
        assert_eq!(labels, TimePoint::ALL.to_vec());
    }

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("e12.5".parse::<TimePoint>().unwrap(), TimePoint::E12_5);
        assert_eq!(" wt ".parse::<Genotype>().unwrap(), Genotype::WildType);
        assert_eq!("g93a".parse::<Genotype>().unwrap(), Genotype::G93A);
    }

    #[test]
    fn rejects_unknown_labels() {
        assert_eq!(
            "P30".parse::<TimePoint>(),
            Err(LabelError::TimePoint("P30".into()))
        );
        assert!("SOD1".parse::<Genotype>().is_err());
    }

    #[test]
    fn dataset_collects_axes() {
        let ds = ExpressionDataset::from_samples(vec![
            Sample {
                time: TimePoint::P56,
                genotype: Genotype::G93A,
                replicate: 1,
                expression: 0.3,
            },
            Sample {
                time: TimePoint::E12_5,
                genotype: Genotype::G93A,
                replicate: 1,
                expression: 0.5,
            },
        ]);
        assert_eq!(
            ds.time_points.iter().copied().collect::<Vec<_>>(),
            vec![TimePoint::E12_5, TimePoint::P56]
        );
        assert_eq!(ds.genotypes.len(), 1);
        assert_eq!(ds.len(), 2);
    }
}
