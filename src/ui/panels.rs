use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – per-column filter checklists
// ---------------------------------------------------------------------------

/// Render the left filter panel: one collapsible section per attribute
/// column, each holding that column's checklist, plus a Clear button.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(catalog) = &state.catalog else {
        ui.label("No catalog loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let columns = catalog.attribute_columns.clone();
    let options = catalog.options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in &columns {
                let Some(values) = options.get(col) else {
                    continue;
                };

                let n_selected = state.selection(col).map_or(0, |s| s.len());
                let header_text = format!("{col}  ({n_selected}/{})", values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        if values.is_empty() {
                            ui.weak("No values in this column.");
                        }
                        for val in values {
                            let mut checked =
                                state.selection(col).is_some_and(|s| s.contains(val));
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                state.toggle_filter_value(col, val);
                            }
                        }
                    });
            }

            ui.add_space(12.0);
            let clear = egui::Button::new(RichText::new("Clear").color(Color32::WHITE))
                .fill(Color32::from_rgb(0xff, 0x4d, 0x4d));
            if ui
                .add_sized([ui.available_width(), 28.0], clear)
                .clicked()
            {
                state.clear_filters();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(catalog) = &state.catalog {
            ui.label(format!(
                "{} models loaded, {} matching",
                catalog.len(),
                state.matching_rows()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open catalog")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(catalog) => {
                log::info!(
                    "Loaded {} models with columns {:?}",
                    catalog.len(),
                    catalog.attribute_columns
                );
                state.set_catalog(catalog);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
