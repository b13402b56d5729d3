use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, GridMark, Legend, Plot, PlotPoints, Points,
};

use crate::color::{generate_palette, with_alpha, ColorMap};
use crate::data::aggregate::GroupTotal;
use crate::data::report::ViewModel;
use crate::format;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).heading());
}

/// Placeholder drawn instead of a plot when the series is empty.
fn empty_chart(ui: &mut Ui) {
    ui.allocate_ui(egui::vec2(ui.available_width(), CHART_HEIGHT), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new("No data for the current selection").weak());
        });
    });
}

/// Axis formatter that names integer grid positions after `labels`.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let pos = mark.value.round();
        if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

fn value_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    format::compact(mark.value)
}

/// Horizontal bars, first group at the top.
fn horizontal_bars(groups: &[GroupTotal], color: impl Fn(&str) -> Color32) -> (BarChart, Vec<String>) {
    let n = groups.len();
    let mut labels = vec![String::new(); n];
    let bars = groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let pos = n - 1 - i;
            labels[pos] = g.key.clone();
            Bar::new(pos as f64, g.value)
                .name(&g.key)
                .fill(color(&g.key))
                .width(0.7)
        })
        .collect();
    let chart = BarChart::new(bars)
        .horizontal()
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}\n{}", bar.name, format::currency(bar.value, 0))
        }));
    (chart, labels)
}

/// Plot horizontal bars with the group names on the y axis.
fn show_horizontal_bars(
    ui: &mut Ui,
    id: &str,
    axis_labels: (&str, &str),
    groups: &[GroupTotal],
    color: impl Fn(&str) -> Color32,
) {
    let (chart, labels) = horizontal_bars(groups, color);
    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(axis_labels.0)
        .y_axis_label(axis_labels.1)
        .x_axis_formatter(value_axis)
        .y_axis_formatter(category_axis(labels))
        .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .include_x(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart.name(axis_labels.0));
        });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Sales by region, ascending totals listed top-down.
pub fn region_sales(ui: &mut Ui, view: &ViewModel, colors: &ColorMap) {
    chart_title(ui, "Sales by Region");
    if view.region_sales.is_empty() {
        empty_chart(ui);
        return;
    }
    show_horizontal_bars(
        ui,
        "region_sales",
        ("Sales", "Region"),
        &view.region_sales,
        |k| colors.color_for(k),
    );
}

/// Sales and profit side by side for every category.
pub fn category_performance(ui: &mut Ui, view: &ViewModel) {
    chart_title(ui, "Category Performance");
    if view.category_performance.is_empty() {
        empty_chart(ui);
        return;
    }

    let palette = generate_palette(2);
    let labels: Vec<String> = view
        .category_performance
        .iter()
        .map(|c| c.category.clone())
        .collect();
    let mut sales_bars = Vec::with_capacity(labels.len());
    let mut profit_bars = Vec::with_capacity(labels.len());
    for (i, c) in view.category_performance.iter().enumerate() {
        let x = i as f64;
        sales_bars.push(Bar::new(x - 0.2, c.sales).name(&c.category).width(0.4));
        profit_bars.push(Bar::new(x + 0.2, c.profit).name(&c.category).width(0.4));
    }

    let sales = BarChart::new(sales_bars).name("Sales").color(palette[0]);
    let profit = BarChart::new(profit_bars).name("Profit").color(palette[1]);

    Plot::new("category_performance")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_formatter(category_axis(labels))
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .y_axis_formatter(value_axis)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(sales);
            plot_ui.bar_chart(profit);
        });
}

/// Most profitable sub-categories, best at the top.
pub fn top_sub_categories(ui: &mut Ui, view: &ViewModel, n: usize) {
    chart_title(ui, &format!("Top {n} Sub-Categories by Profit"));
    if view.top_sub_categories.is_empty() {
        empty_chart(ui);
        return;
    }
    let palette = generate_palette(view.top_sub_categories.len());
    let color_of = |key: &str| {
        view.top_sub_categories
            .iter()
            .position(|g| g.key == key)
            .and_then(|i| palette.get(i).copied())
            .unwrap_or(Color32::GRAY)
    };
    show_horizontal_bars(
        ui,
        "top_sub_categories",
        ("Profit", "Sub-Category"),
        &view.top_sub_categories,
        color_of,
    );
}

/// Discount against profit, one point per order.
pub fn discount_profit(ui: &mut Ui, view: &ViewModel) {
    chart_title(ui, "Discount vs Profit Analysis");
    if view.discount_profit.is_empty() {
        empty_chart(ui);
        return;
    }
    let points = Points::new(PlotPoints::new(view.discount_profit.clone()))
        .name("Orders")
        .radius(2.5)
        .color(with_alpha(Color32::LIGHT_BLUE, 0.6));

    Plot::new("discount_profit")
        .height(CHART_HEIGHT)
        .x_axis_label("Discount")
        .y_axis_label("Profit")
        .y_axis_formatter(value_axis)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(points);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(value: f64) -> GridMark {
        GridMark {
            value,
            step_size: 1.0,
        }
    }

    #[test]
    fn category_axis_labels_integer_positions_only() {
        let fmt = category_axis(vec!["East".into(), "West".into()]);
        let range = 0.0..=1.0;
        assert_eq!(fmt(mark(0.0), &range), "East");
        assert_eq!(fmt(mark(1.0), &range), "West");
        assert_eq!(fmt(mark(0.5), &range), "");
        assert_eq!(fmt(mark(-1.0), &range), "");
        assert_eq!(fmt(mark(2.0), &range), "");
    }

    #[test]
    fn horizontal_bars_put_first_group_on_top() {
        let groups = vec![
            GroupTotal { key: "Copiers".into(), value: 55.6 },
            GroupTotal { key: "Phones".into(), value: 44.5 },
            GroupTotal { key: "Tables".into(), value: -17.7 },
        ];
        let (_, labels) = horizontal_bars(&groups, |_| Color32::GRAY);
        assert_eq!(labels, ["Tables", "Phones", "Copiers"]);
    }
}
