use eframe::egui::Ui;
use egui_plot::{GridInput, GridMark, Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::archetype::{ARCHETYPE_DAYS, Archetype, LINE_WIDTH, Y_RANGE, day_label};
use crate::color::{ARCHETYPE_COLOR, genotype_color, to_color32};
use crate::figure::ExpressionFigure;

// ---------------------------------------------------------------------------
// Mean-expression plot (central panel)
// ---------------------------------------------------------------------------

/// Grid marks exactly at the given positions.
fn fixed_marks(positions: Vec<f64>, step_size: f64) -> impl Fn(GridInput) -> Vec<GridMark> {
    move |_input: GridInput| {
        positions
            .iter()
            .map(|&value| GridMark { value, step_size })
            .collect()
    }
}

/// Render the smoothed WT / G93A curves with time-label ticks.
pub fn expression_plot(ui: &mut Ui, figure: &ExpressionFigure) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(figure.title.as_str());
    });

    let ticks = figure.ticks.clone();
    let positions: Vec<f64> = ticks.iter().map(|(x, _)| *x).collect();

    Plot::new("expression_plot")
        .legend(Legend::default())
        .x_axis_label(figure.x_label)
        .y_axis_label(figure.y_label)
        .x_grid_spacer(fixed_marks(positions, 1.0))
        .x_axis_formatter(move |mark, _range| {
            ticks
                .iter()
                .find(|(x, _)| (x - mark.value).abs() < 1e-6)
                .map(|(_, label)| label.clone())
                .unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for curve in &figure.curves {
                let points: PlotPoints = curve.points.iter().copied().collect();
                let line = Line::new("", points)
                    .name(curve.genotype.label())
                    .color(to_color32(genotype_color(curve.genotype)))
                    .width(2.0);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Archetype plot
// ---------------------------------------------------------------------------

/// Render one archetype: black line, day ticks, no y ticks, y fixed to 0–1.2.
/// Returns the bounds the plot was drawn with.
pub fn archetype_plot(ui: &mut Ui, index: usize, archetype: &Archetype) -> PlotBounds {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(archetype.title);
    });

    Plot::new(("archetype_plot", index))
        .show_axes([true, false])
        .x_grid_spacer(fixed_marks(ARCHETYPE_DAYS.to_vec(), 10.0))
        .x_axis_formatter(|mark, _range| day_label(mark.value))
        .auto_bounds([true, false])
        .default_y_bounds(Y_RANGE.0, Y_RANGE.1)
        .show_grid([false, false])
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            let points: PlotPoints = archetype.points().into_iter().collect();
            plot_ui.line(
                Line::new("", points)
                    .color(to_color32(ARCHETYPE_COLOR))
                    .width(LINE_WIDTH),
            );
            plot_ui.plot_bounds()
        })
        .inner
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use eframe::egui::{CentralPanel, Context, Pos2, RawInput, Rect, vec2};

    use super::*;
    use crate::archetype::ARCHETYPES;

    #[test]
    fn archetype_y_range_is_exact() {
        let ctx = Context::default();
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
            ..Default::default()
        };

        let mut bounds = None;
        for _ in 0..2 {
            let _ = ctx.run(input.clone(), |ctx| {
                CentralPanel::default().show(ctx, |ui| {
                    bounds = Some(archetype_plot(ui, 0, &ARCHETYPES[0]));
                });
            });
        }

        let bounds = bounds.unwrap();
        assert_relative_eq!(bounds.min()[1], Y_RANGE.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.max()[1], Y_RANGE.1, epsilon = 1e-9);
    }
}
