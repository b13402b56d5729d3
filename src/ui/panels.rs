use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Dimension;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// A filter edit requested by the side panel, applied after drawing.
enum FilterAction {
    Toggle(Dimension, String),
    All(Dimension),
    None(Dimension),
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dashboard Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut actions = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                let all_values = dataset.distinct_in_file_order(dim);
                let selected = state.selection.get(dim);

                // Show count of selected / total in the header
                let header_text = format!(
                    "{}  ({}/{})",
                    dim.label(),
                    all_values.iter().filter(|v| selected.contains(*v)).count(),
                    all_values.len()
                );

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                actions.push(FilterAction::All(dim));
                            }
                            if ui.small_button("None").clicked() {
                                actions.push(FilterAction::None(dim));
                            }
                        });

                        for val in all_values {
                            // Colour swatch for dimensions that have chart colours.
                            let color = match dim {
                                Dimension::Region => Some(state.region_colors.color_for(val)),
                                Dimension::Category => Some(state.category_colors.color_for(val)),
                                Dimension::Segment => None,
                            };
                            let mut text = RichText::new(val);
                            if let Some(c) = color {
                                text = text.color(c);
                            }

                            let mut checked = selected.contains(val);
                            if ui.checkbox(&mut checked, text).changed() {
                                actions.push(FilterAction::Toggle(dim, val.clone()));
                            }
                        }
                    });
            }
        });

    for action in actions {
        match action {
            FilterAction::Toggle(dim, value) => state.toggle_filter_value(dim, &value),
            FilterAction::All(dim) => state.select_all(dim),
            FilterAction::None(dim) => state.select_none(dim),
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar and headings
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} orders loaded, {} visible",
                ds.len(),
                state.view.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

/// Dashboard title block.
pub fn header(ui: &mut Ui) {
    ui.heading(RichText::new("Superstore Sales Performance Dashboard").size(26.0));
    ui.label(RichText::new("Advanced Business Intelligence Dashboard").weak());
    ui.add_space(6.0);
}

/// Shown in place of the dashboard when the dataset failed to load.
pub fn load_error(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.heading("The sales dataset could not be loaded");
        ui.add_space(8.0);
        if let Some(msg) = &state.load_error {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
        ui.add_space(8.0);
        ui.label("Fix the file and reload, or open a different CSV.");
        ui.horizontal(|ui: &mut Ui| {
            if ui.button("Reload").clicked() {
                state.reload();
            }
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
            }
        });
    });
}

/// Download section at the bottom of the dashboard.
pub fn export_section(ui: &mut Ui, state: &mut AppState) {
    ui.label(RichText::new("Download Filtered Report").heading());
    let rows = state.view.visible_indices.len();
    if ui
        .button(format!("Download CSV Report ({rows} orders)"))
        .clicked()
    {
        export_file_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("CSV", &["csv"]);
    if let Some(dir) = state.data_path().parent() {
        dialog = dialog.set_directory(dir);
    }

    if let Some(path) = dialog.pick_file() {
        state.open(path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save filtered report")
        .set_file_name(state.config.export_file_name.as_str())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.save_export(&path);
    }
}
