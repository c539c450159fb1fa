use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::{FilterResult, FilteredView};
use crate::data::model::{Catalog, MODEL_COLUMN};
use crate::state::AppState;

const ACCENT: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);

// ---------------------------------------------------------------------------
// Results table (central panel)
// ---------------------------------------------------------------------------

/// Render the title, instructions, and the filtered results.
pub fn results_panel(ui: &mut Ui, state: &AppState) {
    let Some(catalog) = &state.catalog else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a catalog to get started  (File → Open…)");
        });
        return;
    };

    ui.heading(RichText::new("Choose Your Digital Lock").color(ACCENT));
    ui.label("Select filters in the side panel to find the right lock.");
    ui.add_space(8.0);

    match &state.view {
        FilterResult::NoMatch => {
            ui.colored_label(Color32::RED, "No products match the selected filters.");
        }
        FilterResult::Rows(view) => {
            results_table(ui, catalog, view);
        }
    }
}

/// One header cell per active column, one row per matching product. Values
/// are stringified; the identifier column shows the model name.
fn results_table(ui: &mut Ui, catalog: &Catalog, view: &FilteredView) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(80.0), view.active_columns.len())
        .min_scrolled_height(0.0)
        .header(22.0, |mut header| {
            for col in &view.active_columns {
                header.col(|ui| {
                    ui.strong(RichText::new(col).color(ACCENT));
                });
            }
        })
        .body(|mut body| {
            for &idx in &view.row_indices {
                let product = &catalog.rows[idx];
                body.row(22.0, |mut row| {
                    for col in &view.active_columns {
                        row.col(|ui| {
                            if col.as_str() == MODEL_COLUMN {
                                ui.label(&product.model);
                            } else {
                                ui.label(product.get(col).to_string());
                            }
                        });
                    }
                });
            }
        });
}
