use thiserror::Error;

use crate::data::aggregate::MeanTable;
use crate::data::model::Genotype;
use crate::spline::{CubicSpline, DENSE_POINTS, SplineError};

// ---------------------------------------------------------------------------
// Smoothed mean-expression figure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FigureError {
    #[error("mean table has no genotype columns")]
    NoSeries,
    #[error("fitting the {genotype} series")]
    Fit {
        genotype: Genotype,
        #[source]
        source: SplineError,
    },
}

/// A densely sampled spline through one genotype column.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedCurve {
    pub genotype: Genotype,
    /// `(row index, interpolated expression)` pairs.
    pub points: Vec<[f64; 2]>,
}

/// Fit a cubic spline over row indices `0..rows` and evaluate it at `n` points.
pub fn smooth_series(
    table: &MeanTable,
    genotype: Genotype,
    n: usize,
) -> Result<SmoothedCurve, SplineError> {
    let ys = table.series(genotype);
    let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
    let spline = CubicSpline::fit(&xs, &ys)?;
    Ok(SmoothedCurve {
        genotype,
        points: spline.sample(n),
    })
}

/// Everything needed to draw the mean-expression chart on any backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionFigure {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Tick position (row index) and time label.
    pub ticks: Vec<(f64, String)>,
    pub curves: Vec<SmoothedCurve>,
}

impl ExpressionFigure {
    pub fn build(table: &MeanTable) -> Result<Self, FigureError> {
        if table.genotypes.is_empty() {
            return Err(FigureError::NoSeries);
        }

        let curves = table
            .genotypes
            .iter()
            .map(|&genotype| {
                smooth_series(table, genotype, DENSE_POINTS)
                    .map_err(|source| FigureError::Fit { genotype, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let ticks = table
            .time_points
            .iter()
            .enumerate()
            .map(|(i, t)| (i as f64, t.label().to_string()))
            .collect();

        let names: Vec<&str> = table.genotypes.iter().map(|g| g.label()).collect();

        Ok(ExpressionFigure {
            title: format!("Mean Expression over Time for {}", names.join(" and ")),
            x_label: "Time",
            y_label: "Mean Expression",
            ticks,
            curves,
        })
    }

    /// Tick label at a row index, empty between rows.
    pub fn tick_label(&self, x: f64) -> String {
        self.ticks
            .iter()
            .find(|(pos, _)| (pos - x).abs() < 1e-6)
            .map(|(_, label)| label.clone())
            .unwrap_or_default()
    }

    pub fn x_range(&self) -> (f64, f64) {
        let last = self.ticks.last().map(|(x, _)| *x).unwrap_or(0.0);
        (0.0, last.max(1.0))
    }

    /// Curve extent padded by 5 %; a flat curve gets a unit-wide window.
    pub fn y_range(&self) -> (f64, f64) {
        let (lo, hi) = self
            .curves
            .iter()
            .flat_map(|c| c.points.iter().map(|p| p[1]))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                (lo.min(y), hi.max(y))
            });
        if !lo.is_finite() || !hi.is_finite() {
            return (0.0, 1.0);
        }
        let span = hi - lo;
        if span < f64::EPSILON {
            (lo - 0.5, hi + 0.5)
        } else {
            (lo - 0.05 * span, hi + 0.05 * span)
        }
    }
}
