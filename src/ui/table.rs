use eframe::egui::{RichText, ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::{Dataset, PROFIT_MARGIN_HEADER};
use crate::data::report::ViewModel;
use crate::format;

const ROW_HEIGHT: f32 = 18.0;

/// Scrollable preview of the rows that would be exported.
pub fn preview(ui: &mut Ui, dataset: &Dataset, view: &ViewModel) {
    ui.label(RichText::new("Filtered Orders").heading());
    if view.is_empty() {
        ui.label(RichText::new("No data for the current selection").weak());
        return;
    }

    let columns = &dataset.columns;
    ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(true)
                .max_scroll_height(300.0)
                .columns(TableColumn::auto().at_least(60.0), columns.len() + 1)
                .header(ROW_HEIGHT + 2.0, |mut header| {
                    for name in columns.iter().map(String::as_str).chain([PROFIT_MARGIN_HEADER]) {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, view.visible_indices.len(), |mut row| {
                        let rec = &dataset.records[view.visible_indices[row.index()]];
                        for name in columns {
                            row.col(|ui: &mut Ui| {
                                ui.label(rec.field(name));
                            });
                        }
                        row.col(|ui: &mut Ui| {
                            match rec.profit_margin {
                                Some(m) => ui.label(format::percent(m)),
                                None => ui.label(RichText::new("undefined").weak()),
                            };
                        });
                    });
                });
        });
}
