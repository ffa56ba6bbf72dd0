//! Mean-expression curves for WT vs. G93A RNA-seq time courses, plus the
//! idealized response-shape archetype charts.
//!
//! ```text
//!  SampleSource ─▶ ExpressionDataset ─▶ MeanTable ─▶ CubicSpline ─▶ ExpressionFigure
//!                                                                    │
//!                                              egui viewer ◀─────────┴────▶ PNG / CSV export
//! ```

pub mod app;
pub mod archetype;
pub mod cli;
pub mod color;
pub mod data;
pub mod figure;
pub mod pipeline;
pub mod render;
pub mod spline;
pub mod state;
pub mod ui;
