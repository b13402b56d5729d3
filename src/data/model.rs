use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Column – the typed input columns every dataset must carry
// ---------------------------------------------------------------------------

/// Input columns the dashboard reads by name.  Any other column in the file
/// is kept as opaque text on the [`Record`].
///
/// Discriminants follow [`Column::REQUIRED`], so `column as usize` indexes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(usize)]
pub enum Column {
    Region,
    Category,
    Segment,
    SubCategory,
    Sales,
    Profit,
    Discount,
}

impl Column {
    pub const REQUIRED: [Column; 7] = [
        Column::Region,
        Column::Category,
        Column::Segment,
        Column::SubCategory,
        Column::Sales,
        Column::Profit,
        Column::Discount,
    ];

    /// Header text as it appears in the CSV file.
    pub fn header(self) -> &'static str {
        match self {
            Column::Region => "Region",
            Column::Category => "Category",
            Column::Segment => "Segment",
            Column::SubCategory => "Sub-Category",
            Column::Sales => "Sales",
            Column::Profit => "Profit",
            Column::Discount => "Discount",
        }
    }

    pub fn from_header(name: &str) -> Option<Column> {
        Column::REQUIRED.into_iter().find(|c| c.header() == name)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Column::Sales | Column::Profit | Column::Discount)
    }
}

/// Header of the derived column added at load time and written on export.
pub const PROFIT_MARGIN_HEADER: &str = "Profit Margin";

// ---------------------------------------------------------------------------
// Dimension – the categorical columns the user can filter on
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Region,
    Category,
    Segment,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Region, Dimension::Category, Dimension::Segment];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Region => "Region",
            Dimension::Category => "Category",
            Dimension::Segment => "Segment",
        }
    }

    /// The record's value for this dimension.
    pub fn value_of(self, record: &Record) -> &str {
        match self {
            Dimension::Region => &record.region,
            Dimension::Category => &record.category,
            Dimension::Segment => &record.segment,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Record – one sales transaction (one CSV row)
// ---------------------------------------------------------------------------

/// A single sales transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub region: String,
    pub category: String,
    pub segment: String,
    pub sub_category: String,
    pub sales: f64,
    pub profit: f64,
    /// Fraction in `[0, 1]`; not range-checked.
    pub discount: f64,
    /// `profit / sales`, or `None` when the quotient is undefined
    /// (zero sales).  Never NaN or infinite.
    pub profit_margin: Option<f64>,
    /// Columns the dashboard does not interpret: column_name → raw text.
    pub extra: BTreeMap<String, String>,
}

impl Record {
    pub fn new(
        region: impl Into<String>,
        category: impl Into<String>,
        segment: impl Into<String>,
        sub_category: impl Into<String>,
        sales: f64,
        profit: f64,
        discount: f64,
    ) -> Self {
        Record {
            region: region.into(),
            category: category.into(),
            segment: segment.into(),
            sub_category: sub_category.into(),
            sales,
            profit,
            discount,
            profit_margin: profit_margin(profit, sales),
            extra: BTreeMap::new(),
        }
    }

    /// Text of a named column as it would be written on export.
    pub fn field(&self, column: &str) -> String {
        match Column::from_header(column) {
            Some(Column::Region) => self.region.clone(),
            Some(Column::Category) => self.category.clone(),
            Some(Column::Segment) => self.segment.clone(),
            Some(Column::SubCategory) => self.sub_category.clone(),
            Some(Column::Sales) => self.sales.to_string(),
            Some(Column::Profit) => self.profit.to_string(),
            Some(Column::Discount) => self.discount.to_string(),
            None => self.extra.get(column).cloned().unwrap_or_default(),
        }
    }
}

/// The derived Profit Margin.  Undefined when `sales` is zero.
pub fn profit_margin(profit: f64, sales: f64) -> Option<f64> {
    if sales == 0.0 {
        return None;
    }
    Some(profit / sales).filter(|m| m.is_finite())
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct values per dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Input header order (without the derived column).
    pub columns: Vec<String>,
    /// All records, in file order.
    pub records: Vec<Record>,
    /// For each filter dimension the sorted set of distinct values.
    pub unique_values: BTreeMap<Dimension, BTreeSet<String>>,
    /// The same values in order of first appearance in the file.
    pub first_seen: BTreeMap<Dimension, Vec<String>>,
}

impl Dataset {
    /// Build the dimension indices from loaded records.
    pub fn from_records(columns: Vec<String>, records: Vec<Record>) -> Self {
        let mut unique_values: BTreeMap<Dimension, BTreeSet<String>> = Dimension::ALL
            .into_iter()
            .map(|d| (d, BTreeSet::new()))
            .collect();
        let mut first_seen: BTreeMap<Dimension, Vec<String>> = Dimension::ALL
            .into_iter()
            .map(|d| (d, Vec::new()))
            .collect();

        for rec in &records {
            for dim in Dimension::ALL {
                let value = dim.value_of(rec);
                if unique_values.entry(dim).or_default().insert(value.to_string()) {
                    first_seen.entry(dim).or_default().push(value.to_string());
                }
            }
        }

        Dataset {
            columns,
            records,
            unique_values,
            first_seen,
        }
    }

    /// Dataset with just the required columns, in canonical order.
    pub fn with_required_columns(records: Vec<Record>) -> Self {
        let columns = Column::REQUIRED
            .into_iter()
            .map(|c| c.header().to_string())
            .collect();
        Self::from_records(columns, records)
    }

    /// Distinct values of a dimension present at load time.
    pub fn distinct(&self, dimension: Dimension) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.unique_values.get(&dimension).unwrap_or(&EMPTY)
    }

    /// Distinct values of a dimension in the order the file introduces them.
    pub fn distinct_in_file_order(&self, dimension: Dimension) -> &[String] {
        self.first_seen
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
