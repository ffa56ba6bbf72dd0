//! Tests for the cubic interpolating spline and curve smoothing.
//!
//! ## Test Organization
//!
//! 1. **Interpolation** - passes through every knot, reproduces cubics
//! 2. **Dense sampling** - 300-point evaluation axis
//! 3. **Preconditions** - too few points, non-finite input, unordered x
//! 4. **Figure smoothing** - per-genotype curves from a mean table

use approx::assert_relative_eq;

use expression_curves::data::aggregate::{MissingPolicy, mean_table};
use expression_curves::data::model::{ExpressionDataset, Genotype, Sample, TimePoint};
use expression_curves::figure::{ExpressionFigure, FigureError, smooth_series};
use expression_curves::spline::{CubicSpline, DENSE_POINTS, SplineError};

const MEANS: [f64; 6] = [0.42, 0.77, 0.13, 0.58, 0.91, 0.36];

fn indices(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

// ============================================================================
// Interpolation
// ============================================================================

/// The fitted curve passes exactly through the six input means.
#[test]
fn test_interpolates_at_knots() {
    let xs = indices(6);
    let spline = CubicSpline::fit(&xs, &MEANS).unwrap();
    for (x, y) in xs.iter().zip(MEANS.iter()) {
        assert_relative_eq!(spline.eval(*x), *y, epsilon = 1e-12);
    }
}

/// Not-a-knot end conditions reproduce any cubic polynomial exactly.
#[test]
fn test_reproduces_cubic() {
    let f = |x: f64| 0.5 * x.powi(3) - 2.0 * x.powi(2) + x - 3.0;
    let xs = vec![0.0, 0.7, 1.5, 3.0, 3.2, 5.0];
    let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();
    let spline = CubicSpline::fit(&xs, &ys).unwrap();

    for x in [0.1, 1.0, 2.2, 3.1, 4.4, 4.99] {
        assert_relative_eq!(spline.eval(x), f(x), epsilon = 1e-9);
    }
}

/// Four points are enough, and give the single cubic through them.
#[test]
fn test_four_points() {
    let f = |x: f64| x.powi(3) - x;
    let xs = indices(4);
    let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();
    let spline = CubicSpline::fit(&xs, &ys).unwrap();
    assert_relative_eq!(spline.eval(1.5), f(1.5), epsilon = 1e-9);
}

/// Outside the knots the end pieces are extended rather than clamped.
#[test]
fn test_extrapolates_end_pieces() {
    let f = |x: f64| 2.0 * x.powi(3) + 1.0;
    let xs = indices(5);
    let ys: Vec<f64> = xs.iter().map(|&x| f(x)).collect();
    let spline = CubicSpline::fit(&xs, &ys).unwrap();
    assert_relative_eq!(spline.eval(-1.0), f(-1.0), epsilon = 1e-9);
    assert_relative_eq!(spline.eval(5.5), f(5.5), epsilon = 1e-9);
}

// ============================================================================
// Dense Sampling
// ============================================================================

#[test]
fn test_sample_produces_300_points() {
    let spline = CubicSpline::fit(&indices(6), &MEANS).unwrap();
    let points = spline.sample(DENSE_POINTS);

    assert_eq!(points.len(), 300);
    assert_eq!(points[0][0], 0.0);
    assert_eq!(points[299][0], 5.0);
    assert_relative_eq!(points[0][1], MEANS[0], epsilon = 1e-12);
    assert_relative_eq!(points[299][1], MEANS[5], epsilon = 1e-12);
}

#[test]
fn test_fit_is_deterministic() {
    let a = CubicSpline::fit(&indices(6), &MEANS).unwrap().sample(DENSE_POINTS);
    let b = CubicSpline::fit(&indices(6), &MEANS).unwrap().sample(DENSE_POINTS);
    assert_eq!(a, b);
}

// ============================================================================
// Preconditions
// ============================================================================

#[test]
fn test_too_few_points() {
    let err = CubicSpline::fit(&indices(3), &[1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(err, SplineError::TooFewPoints { got: 3, min: 4 });
}

#[test]
fn test_length_mismatch() {
    let err = CubicSpline::fit(&indices(6), &MEANS[..5]).unwrap_err();
    assert_eq!(err, SplineError::LengthMismatch { x_len: 6, y_len: 5 });
}

#[test]
fn test_non_finite_values() {
    let mut ys = MEANS;
    ys[3] = f64::NAN;
    assert_eq!(
        CubicSpline::fit(&indices(6), &ys).unwrap_err(),
        SplineError::NonFinite { index: 3 }
    );

    let mut xs = indices(6);
    xs[1] = f64::INFINITY;
    assert_eq!(
        CubicSpline::fit(&xs, &MEANS).unwrap_err(),
        SplineError::NonFinite { index: 1 }
    );
}

#[test]
fn test_x_must_increase() {
    let xs = vec![0.0, 1.0, 1.0, 2.0, 3.0];
    let err = CubicSpline::fit(&xs, &[0.0; 5]).unwrap_err();
    assert_eq!(err, SplineError::NotIncreasing { index: 2 });
}

// ============================================================================
// Figure Smoothing
// ============================================================================

fn table_from(values: &[(TimePoint, Genotype, f64)]) -> expression_curves::data::aggregate::MeanTable {
    let samples = values
        .iter()
        .map(|&(time, genotype, expression)| Sample {
            time,
            genotype,
            replicate: 1,
            expression,
        })
        .collect();
    mean_table(&ExpressionDataset::from_samples(samples), MissingPolicy::ColumnMean).unwrap()
}

#[test]
fn test_smooth_series_hits_table_means() {
    let rows: Vec<(TimePoint, Genotype, f64)> = TimePoint::ALL
        .iter()
        .zip(MEANS.iter())
        .map(|(&t, &v)| (t, Genotype::WildType, v))
        .collect();
    let table = table_from(&rows);

    let curve = smooth_series(&table, Genotype::WildType, DENSE_POINTS).unwrap();
    assert_eq!(curve.points.len(), DENSE_POINTS);

    // Index 0 and 5 are exact grid points of the dense axis.
    assert_relative_eq!(curve.points[0][1], MEANS[0], epsilon = 1e-12);
    assert_relative_eq!(curve.points[DENSE_POINTS - 1][1], MEANS[5], epsilon = 1e-12);
}

#[test]
fn test_figure_labels_and_ticks() {
    let mut rows = Vec::new();
    for (i, &t) in TimePoint::ALL.iter().enumerate() {
        rows.push((t, Genotype::WildType, MEANS[i]));
        rows.push((t, Genotype::G93A, MEANS[5 - i]));
    }
    let figure = ExpressionFigure::build(&table_from(&rows)).unwrap();

    assert_eq!(figure.title, "Mean Expression over Time for WT and G93A");
    assert_eq!(figure.curves.len(), 2);
    assert_eq!(figure.curves[0].genotype, Genotype::WildType);
    let labels: Vec<&str> = figure.ticks.iter().map(|(_, l)| l.as_str()).collect();
    assert_eq!(labels, vec!["E12.5", "P28", "P56", "P84", "P119", "P150"]);
    assert_eq!(figure.tick_label(3.0), "P84");
    assert_eq!(figure.tick_label(3.5), "");
    assert_eq!(figure.x_range(), (0.0, 5.0));
}

/// Only three time points present: the fit must fail loudly.
#[test]
fn test_figure_with_too_few_time_points() {
    let rows = vec![
        (TimePoint::E12_5, Genotype::WildType, 0.1),
        (TimePoint::P28, Genotype::WildType, 0.2),
        (TimePoint::P56, Genotype::WildType, 0.3),
    ];
    let err = ExpressionFigure::build(&table_from(&rows)).unwrap_err();
    assert_eq!(
        err,
        FigureError::Fit {
            genotype: Genotype::WildType,
            source: SplineError::TooFewPoints { got: 3, min: 4 }
        }
    );
}

/// A column with nothing to impute from surfaces as a non-finite fit error.
#[test]
fn test_figure_with_unresolved_column() {
    let mut rows = Vec::new();
    for (i, &t) in TimePoint::ALL.iter().enumerate() {
        rows.push((t, Genotype::WildType, MEANS[i]));
        rows.push((t, Genotype::G93A, f64::NAN));
    }
    let err = ExpressionFigure::build(&table_from(&rows)).unwrap_err();
    assert!(matches!(
        err,
        FigureError::Fit {
            genotype: Genotype::G93A,
            source: SplineError::NonFinite { index: 0 }
        }
    ));
}
