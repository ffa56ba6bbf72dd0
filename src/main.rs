use anyhow::Result;
use clap::Parser;
use eframe::egui;

use expression_curves::app::ExpressionCurvesApp;
use expression_curves::cli::Args;
use expression_curves::pipeline;
use expression_curves::render;
use expression_curves::state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.pipeline_config();
    let output = pipeline::run(&config)?;

    if let Some(dir) = &args.export {
        render::export_all(dir, &output.figure, &output.table)?;
    }

    if args.nogui {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(config, output);
    eframe::run_native(
        "Expression Curves",
        options,
        Box::new(|_cc| Ok(Box::new(ExpressionCurvesApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
