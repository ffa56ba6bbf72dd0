use std::fs::{File, create_dir_all};
use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use thiserror::Error;

use crate::archetype::{ARCHETYPE_DAYS, ARCHETYPES, Archetype, LINE_WIDTH, Y_RANGE, day_label};
use crate::color::{ARCHETYPE_COLOR, genotype_color, to_rgb};
use crate::data::aggregate::MeanTable;
use crate::figure::ExpressionFigure;

// ---------------------------------------------------------------------------
// PNG export
// ---------------------------------------------------------------------------

/// 10 x 6 in at 100 dpi.
pub const EXPRESSION_SIZE: (u32, u32) = (1000, 600);
/// 5 x 3 in at 100 dpi.
pub const ARCHETYPE_SIZE: (u32, u32) = (500, 300);

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("drawing chart: {0}")]
    Draw(String),
    #[error("encoding image")]
    Image(#[from] image::ImageError),
    #[error("pixel buffer does not match image size")]
    Buffer,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("writing CSV")]
    Csv(#[from] csv::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Draw(e.to_string())
}

// ---------------------------------------------------------------------------
// Axis with ticks only at fixed positions
// ---------------------------------------------------------------------------

/// Linear `f64` axis whose key points are exactly `ticks`.
pub struct FixedTicks {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl FixedTicks {
    pub fn new(range: Range<f64>, ticks: Vec<f64>) -> Self {
        Self {
            inner: range.into(),
            ticks,
        }
    }
}

impl Ranged for FixedTicks {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.max_num_points() == 0 {
            return Vec::new();
        }
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

impl ValueFormatter<f64> for FixedTicks {
    fn format(value: &f64) -> String {
        day_label(*value)
    }
}

/// Draw into an RGB buffer with `draw`, then encode it as PNG at `path`.
fn render_png<F>(path: &Path, (w, h): (u32, u32), draw: F) -> Result<(), ExportError>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>) -> Result<(), ExportError>,
{
    let mut buf = vec![0u8; (w * h * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        draw(&root)?;
        root.present().map_err(draw_err)?;
    }
    let img = image::RgbImage::from_raw(w, h, buf).ok_or(ExportError::Buffer)?;
    img.save(path)?;
    Ok(())
}

/// Two smoothed genotype curves with time-label ticks, legend and grid.
pub fn render_expression_png(figure: &ExpressionFigure, path: &Path) -> Result<(), ExportError> {
    render_png(path, EXPRESSION_SIZE, |root| {
        let (x_lo, x_hi) = figure.x_range();
        let (y_lo, y_hi) = figure.y_range();
        let key_points: Vec<f64> = figure.ticks.iter().map(|(x, _)| *x).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(&figure.title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(FixedTicks::new(x_lo..x_hi, key_points), y_lo..y_hi)
            .map_err(draw_err)?;

        let x_fmt = |x: &f64| figure.tick_label(*x);
        chart
            .configure_mesh()
            .x_desc(figure.x_label)
            .y_desc(figure.y_label)
            .x_label_formatter(&x_fmt)
            .draw()
            .map_err(draw_err)?;

        for curve in &figure.curves {
            let color = to_rgb(genotype_color(curve.genotype));
            chart
                .draw_series(LineSeries::new(
                    curve.points.iter().map(|p| (p[0], p[1])),
                    color.stroke_width(2),
                ))
                .map_err(draw_err)?
                .label(curve.genotype.label())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;
        Ok(())
    })
}

/// Single black archetype curve at the day ticks, no y ticks, y fixed to 0–1.2.
pub fn render_archetype_png(archetype: &Archetype, path: &Path) -> Result<(), ExportError> {
    render_png(path, ARCHETYPE_SIZE, |root| {
        let x_lo = ARCHETYPE_DAYS[0];
        let x_hi = ARCHETYPE_DAYS[ARCHETYPE_DAYS.len() - 1];
        let pad = (x_hi - x_lo) * 0.05;

        let mut chart = ChartBuilder::on(root)
            .caption(archetype.title, ("sans-serif", 16))
            .margin(8)
            .x_label_area_size(30)
            .y_label_area_size(10)
            .build_cartesian_2d(
                FixedTicks::new((x_lo - pad)..(x_hi + pad), ARCHETYPE_DAYS.to_vec()),
                Y_RANGE.0..Y_RANGE.1,
            )
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .y_labels(0)
            .draw()
            .map_err(draw_err)?;

        let color = to_rgb(ARCHETYPE_COLOR);
        chart
            .draw_series(LineSeries::new(
                archetype.points().into_iter().map(|p| (p[0], p[1])),
                color.stroke_width(LINE_WIDTH as u32),
            ))
            .map_err(draw_err)?;
        Ok(())
    })
}

/// Write the expression chart, every archetype chart and the mean table to `dir`.
/// Returns the written paths.
pub fn export_all(
    dir: &Path,
    figure: &ExpressionFigure,
    table: &MeanTable,
) -> Result<Vec<PathBuf>, ExportError> {
    create_dir_all(dir)?;
    let mut written = Vec::new();

    let path = dir.join("mean_expression.png");
    render_expression_png(figure, &path)?;
    written.push(path);

    for archetype in &ARCHETYPES {
        let path = dir.join(format!("{}.png", archetype.slug()));
        render_archetype_png(archetype, &path)?;
        written.push(path);
    }

    let path = dir.join("mean_expression.csv");
    table.write_csv(File::create(&path)?)?;
    written.push(path);

    for p in &written {
        log::info!("Wrote {}", p.display());
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_ticks_yield_only_given_positions() {
        let axis = FixedTicks::new(0.0..160.0, ARCHETYPE_DAYS.to_vec());
        assert_eq!(axis.key_points(10usize), ARCHETYPE_DAYS.to_vec());
        assert_eq!(axis.range(), 0.0..160.0);
        assert_eq!(axis.map(&80.0, (0, 100)), 50);
    }

    /// A zero label count (as set by `y_labels(0)`) draws no ticks at all.
    #[test]
    fn fixed_ticks_respect_zero_hint() {
        let axis = FixedTicks::new(0.0..1.2, vec![0.0, 0.6, 1.2]);
        assert!(axis.key_points(0usize).is_empty());
    }

    #[test]
    fn fixed_ticks_format_as_days() {
        assert_eq!(<FixedTicks as ValueFormatter<f64>>::format(&12.5), "12.5");
        assert_eq!(<FixedTicks as ValueFormatter<f64>>::format(&56.0), "56");
    }
}
