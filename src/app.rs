use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{charts, metrics, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalesDashboardApp {
    pub state: AppState,
}

impl SalesDashboardApp {
    /// Build the app and load the configured dataset.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.load();
        Self { state }
    }
}

impl eframe::App for SalesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // A dataset that failed to load renders nothing but the error.
        if self.state.load_error.is_some() {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::load_error(ui, &mut self.state);
            });
            return;
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, preview, export ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &mut self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    panels::header(ui);
    metrics::kpi_row(ui, &state.view);
    ui.separator();

    ui.columns(2, |cols: &mut [Ui]| {
        charts::region_sales(&mut cols[0], &state.view, &state.region_colors);
        charts::category_performance(&mut cols[1], &state.view);
    });
    ui.add_space(8.0);
    ui.columns(2, |cols: &mut [Ui]| {
        charts::top_sub_categories(&mut cols[0], &state.view, state.config.top_sub_categories);
        charts::discount_profit(&mut cols[1], &state.view);
    });

    ui.separator();
    if let Some(ds) = &state.dataset {
        table::preview(ui, ds, &state.view);
    }

    ui.separator();
    panels::export_section(ui, state);
}
