use std::collections::{BTreeMap, HashMap};

use super::filter::FilteredView;
use super::model::Record;

/// Number of sub-categories shown in the profit leaderboard.
pub const TOP_SUB_CATEGORIES: usize = 10;

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

/// The five headline numbers of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kpis {
    pub total_sales: f64,
    pub total_profit: f64,
    pub total_orders: usize,
    /// Zero when there are no orders.
    pub avg_order_value: f64,
    /// Zero unless total sales are positive.
    pub profit_margin_ratio: f64,
}

impl Kpis {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        let (total_sales, total_profit) = view
            .records()
            .fold((0.0, 0.0), |(s, p), r| (s + r.sales, p + r.profit));
        let total_orders = view.len();

        let avg_order_value = if total_orders > 0 {
            total_sales / total_orders as f64
        } else {
            0.0
        };
        let profit_margin_ratio = if total_sales > 0.0 {
            total_profit / total_sales
        } else {
            0.0
        };

        Kpis {
            total_sales,
            total_profit,
            total_orders,
            avg_order_value,
            profit_margin_ratio,
        }
    }
}

// ---------------------------------------------------------------------------
// Grouped aggregates
// ---------------------------------------------------------------------------

/// One group key with its summed value.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub key: String,
    pub value: f64,
}

/// Sales and profit summed for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPerformance {
    pub category: String,
    pub sales: f64,
    pub profit: f64,
}

/// Sum `value` per `key`, groups in first-encountered order.
fn group_sum<'a>(
    records: impl Iterator<Item = &'a Record>,
    key: impl Fn(&'a Record) -> &'a str,
    value: impl Fn(&Record) -> f64,
) -> Vec<GroupTotal> {
    let mut groups: Vec<GroupTotal> = Vec::new();
    let mut slot: HashMap<&'a str, usize> = HashMap::new();
    for rec in records {
        let k = key(rec);
        let idx = *slot.entry(k).or_insert_with(|| {
            groups.push(GroupTotal {
                key: k.to_string(),
                value: 0.0,
            });
            groups.len() - 1
        });
        groups[idx].value += value(rec);
    }
    groups
}

/// Sales per region, ascending by total.  Equal totals keep the order in
/// which the regions first appear in the view.
pub fn region_sales(view: &FilteredView<'_>) -> Vec<GroupTotal> {
    let mut groups = group_sum(view.records(), |r| r.region.as_str(), |r| r.sales);
    groups.sort_by(|a, b| a.value.total_cmp(&b.value));
    groups
}

/// Sales and profit per category, ordered by category name.
pub fn category_performance(view: &FilteredView<'_>) -> Vec<CategoryPerformance> {
    let mut by_category: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for rec in view.records() {
        let entry = by_category.entry(rec.category.as_str()).or_default();
        entry.0 += rec.sales;
        entry.1 += rec.profit;
    }
    by_category
        .into_iter()
        .map(|(category, (sales, profit))| CategoryPerformance {
            category: category.to_string(),
            sales,
            profit,
        })
        .collect()
}

/// The `n` most profitable sub-categories, descending.  Equal totals keep
/// first-encountered order.
pub fn top_sub_categories_by_profit(view: &FilteredView<'_>, n: usize) -> Vec<GroupTotal> {
    let mut groups = group_sum(view.records(), |r| r.sub_category.as_str(), |r| r.profit);
    groups.sort_by(|a, b| b.value.total_cmp(&a.value));
    groups.truncate(n);
    groups
}

/// Raw `[discount, profit]` points for the scatter chart, in view order.
pub fn discount_profit_pairs(view: &FilteredView<'_>) -> Vec<[f64; 2]> {
    view.records().map(|r| [r.discount, r.profit]).collect()
}

/// Orders in the view whose profit margin is undefined (zero sales).
pub fn undefined_margin_count(view: &FilteredView<'_>) -> usize {
    view.records().filter(|r| r.profit_margin.is_none()).count()
}
