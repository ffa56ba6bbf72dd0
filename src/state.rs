use std::path::{Path, PathBuf};

use crate::archetype::{ARCHETYPES, Archetype};
use crate::pipeline::{self, PipelineConfig, PipelineOutput, SourceSpec};
use crate::render;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which chart the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Expression,
    /// Index into [`ARCHETYPES`].
    Archetype(usize),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// How the current output was produced.
    pub config: PipelineConfig,

    /// Latest successful pipeline run.
    pub output: PipelineOutput,

    pub view: View,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: PipelineConfig, output: PipelineOutput) -> Self {
        Self {
            config,
            output,
            view: View::default(),
            status_message: None,
        }
    }

    pub fn selected_archetype(&self) -> Option<&'static Archetype> {
        match self.view {
            View::Archetype(i) => ARCHETYPES.get(i),
            View::Expression => None,
        }
    }

    /// Re-run the pipeline with `config`; on failure keep the previous output.
    pub fn apply_config(&mut self, config: PipelineConfig) {
        match pipeline::run(&config) {
            Ok(output) => {
                self.status_message = None;
                self.config = config;
                self.output = output;
            }
            Err(e) => {
                log::error!("Pipeline failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Draw a fresh synthetic table, keeping the current layout.
    pub fn regenerate(&mut self) {
        let layout = match &self.config.source {
            SourceSpec::Synthetic { layout, .. } => *layout,
            SourceSpec::File(_) => Default::default(),
        };
        let seed: u64 = rand::random();
        log::info!("Regenerating synthetic data with seed {seed}");
        self.apply_config(PipelineConfig {
            source: SourceSpec::Synthetic { seed, layout },
            missing: self.config.missing,
        });
    }

    pub fn open_file(&mut self, path: PathBuf) {
        self.apply_config(PipelineConfig {
            source: SourceSpec::File(path),
            missing: self.config.missing,
        });
    }

    pub fn export(&mut self, dir: &Path) {
        match render::export_all(dir, &self.output.figure, &self.output.table) {
            Ok(paths) => {
                self.status_message = Some(format!(
                    "Exported {} files to {}",
                    paths.len(),
                    dir.display()
                ));
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
