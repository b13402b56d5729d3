use super::aggregate::{
    category_performance, discount_profit_pairs, region_sales, top_sub_categories_by_profit,
    undefined_margin_count, CategoryPerformance, GroupTotal, Kpis, TOP_SUB_CATEGORIES,
};
use super::filter::{filter, FilterSelection};
use super::model::Dataset;

/// Everything the presentation layer draws for one selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewModel {
    /// Dataset rows passing the selection, ascending.
    pub visible_indices: Vec<usize>,
    pub kpis: Kpis,
    pub region_sales: Vec<GroupTotal>,
    pub category_performance: Vec<CategoryPerformance>,
    pub top_sub_categories: Vec<GroupTotal>,
    pub discount_profit: Vec<[f64; 2]>,
    /// Visible orders with zero sales, hence no profit margin.
    pub undefined_margins: usize,
}

impl ViewModel {
    pub fn is_empty(&self) -> bool {
        self.visible_indices.is_empty()
    }
}

/// Filter and aggregate in one pass.  Pure; called on every selection change.
pub fn render(dataset: &Dataset, selection: &FilterSelection) -> ViewModel {
    render_top(dataset, selection, TOP_SUB_CATEGORIES)
}

/// [`render`] with a custom length for the sub-category leaderboard.
pub fn render_top(dataset: &Dataset, selection: &FilterSelection, top_n: usize) -> ViewModel {
    let view = filter(dataset, selection);
    log::debug!("selection matches {} of {} orders", view.len(), dataset.len());

    ViewModel {
        kpis: Kpis::compute(&view),
        region_sales: region_sales(&view),
        category_performance: category_performance(&view),
        top_sub_categories: top_sub_categories_by_profit(&view, top_n),
        discount_profit: discount_profit_pairs(&view),
        undefined_margins: undefined_margin_count(&view),
        visible_indices: view.indices().to_vec(),
    }
}
