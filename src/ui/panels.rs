use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::archetype::ARCHETYPES;
use crate::data::aggregate::MeanTable;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – chart list and mean table
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Charts");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.view == View::Expression, "Mean expression")
                .clicked()
            {
                state.view = View::Expression;
            }

            egui::CollapsingHeader::new(RichText::new("Response archetypes").strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for (i, archetype) in ARCHETYPES.iter().enumerate() {
                        let view = View::Archetype(i);
                        if ui
                            .selectable_label(state.view == view, archetype.title)
                            .clicked()
                        {
                            state.view = view;
                        }
                    }
                });

            ui.separator();
            ui.strong("Source");
            ui.label(state.output.source_label.as_str());
            ui.label(format!("{} samples", state.output.dataset.len()));

            ui.separator();
            ui.strong("Mean expression");
            mean_table_grid(ui, &state.output.table);
        });
}

/// Time x genotype means; imputed cells are marked with `*`.
fn mean_table_grid(ui: &mut Ui, table: &MeanTable) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto())
        .columns(Column::auto().at_least(60.0), table.genotypes.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Time");
            });
            for g in &table.genotypes {
                header.col(|ui| {
                    ui.strong(g.label());
                });
            }
        })
        .body(|mut body| {
            for &time in &table.time_points {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(time.label());
                    });
                    for &g in &table.genotypes {
                        row.col(|ui| match table.cell(time, g) {
                            Some(cell) if cell.imputed => {
                                ui.label(
                                    RichText::new(format!("{:.3}*", cell.value))
                                        .color(Color32::GRAY),
                                );
                            }
                            Some(cell) => {
                                ui.label(format!("{:.3}", cell.value));
                            }
                            None => {
                                ui.label("–");
                            }
                        });
                    }
                });
            }
        });

    if table.imputed_count() > 0 {
        ui.small("* filled with column mean");
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open measurements…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export PNG…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button("Regenerate").clicked() {
            state.regenerate();
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open expression measurements")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open_file(path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Export charts to folder")
        .pick_folder();

    if let Some(dir) = dir {
        state.export(&dir);
    }
}
