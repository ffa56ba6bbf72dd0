use thiserror::Error;

// ---------------------------------------------------------------------------
// Cubic interpolating spline
// ---------------------------------------------------------------------------

/// Points on the dense evaluation axis used for display curves.
pub const DENSE_POINTS: usize = 300;

/// Minimum knots for a cubic fit.
pub const MIN_POINTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    #[error("cubic spline needs at least {min} points, got {got}")]
    TooFewPoints { got: usize, min: usize },
    #[error("x has {x_len} values but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },
    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },
    #[error("x must be strictly increasing (index {index})")]
    NotIncreasing { index: usize },
    #[error("spline system is singular")]
    Singular,
}

/// Degree-3 piecewise polynomial through every knot, with not-a-knot end
/// conditions (third derivative continuous at the second and second-to-last
/// knots). Stored as knot values plus second derivatives.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    m: Vec<f64>,
}

impl CubicSpline {
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self, SplineError> {
        if xs.len() != ys.len() {
            return Err(SplineError::LengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        let n = xs.len();
        if n < MIN_POINTS {
            return Err(SplineError::TooFewPoints {
                got: n,
                min: MIN_POINTS,
            });
        }
        if let Some(index) = xs
            .iter()
            .zip(ys)
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(SplineError::NonFinite { index });
        }
        if let Some(w) = xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SplineError::NotIncreasing { index: w + 1 });
        }

        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let mut a = vec![vec![0.0; n]; n];
        let mut b = vec![0.0; n];

        // Not-a-knot at xs[1]: (M1 - M0) / h0 == (M2 - M1) / h1
        a[0][0] = -h[1];
        a[0][1] = h[0] + h[1];
        a[0][2] = -h[0];

        for i in 1..n - 1 {
            a[i][i - 1] = h[i - 1];
            a[i][i] = 2.0 * (h[i - 1] + h[i]);
            a[i][i + 1] = h[i];
            b[i] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
        }

        // Not-a-knot at xs[n-2]
        a[n - 1][n - 3] = -h[n - 2];
        a[n - 1][n - 2] = h[n - 3] + h[n - 2];
        a[n - 1][n - 1] = -h[n - 3];

        let m = solve_dense(a, b)?;

        Ok(CubicSpline {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            m,
        })
    }

    /// Evaluate at `x`; outside the knot range the end pieces are extended.
    pub fn eval(&self, x: f64) -> f64 {
        let last = self.xs.len() - 2;
        let i = self.xs.partition_point(|&k| k <= x).saturating_sub(1).min(last);

        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let (m0, m1) = (self.m[i], self.m[i + 1]);
        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;

        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }

    /// Evaluate on `n` evenly spaced points spanning the first to last knot.
    pub fn sample(&self, n: usize) -> Vec<[f64; 2]> {
        let (lo, hi) = (self.xs[0], self.xs[self.xs.len() - 1]);
        linspace(lo, hi, n)
            .into_iter()
            .map(|x| [x, self.eval(x)])
            .collect()
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Gaussian elimination with partial pivoting. Systems here are tiny (one row
/// per time point).
fn solve_dense(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, SplineError> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&r, &s| a[r][col].abs().total_cmp(&a[s][col].abs()))
            .ok_or(SplineError::Singular)?;
        if a[pivot][col].abs() < f64::EPSILON || !a[pivot][col].is_finite() {
            return Err(SplineError::Singular);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Ok(x)
}
