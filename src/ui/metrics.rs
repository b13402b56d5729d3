use eframe::egui::{RichText, Ui};

use crate::data::report::ViewModel;
use crate::format;

/// One KPI widget: small caption above a large value.
fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

/// The five headline KPIs side by side.
pub fn kpi_row(ui: &mut Ui, view: &ViewModel) {
    let k = &view.kpis;
    ui.columns(5, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Sales", format::currency(k.total_sales, 0));
        metric(&mut cols[1], "Total Profit", format::currency(k.total_profit, 0));
        metric(&mut cols[2], "Total Orders", k.total_orders.to_string());
        metric(&mut cols[3], "Avg Order Value", format::currency(k.avg_order_value, 2));
        metric(&mut cols[4], "Profit Margin", format::percent(k.profit_margin_ratio));
    });

    if view.undefined_margins > 0 {
        ui.label(
            RichText::new(format!(
                "{} orders with zero sales have no profit margin",
                view.undefined_margins
            ))
            .weak()
            .italics(),
        );
    }
}
