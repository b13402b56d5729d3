use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use encoding_rs::WINDOWS_1252;

use super::error::DataLoadError;
use super::model::{Column, Dataset, Record, PROFIT_MARGIN_HEADER};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a sales dataset from a CSV file.
///
/// The file is read as Windows-1252 (what `latin1` means in practice) unless
/// it starts with a UTF-8 byte-order mark, in which case it is read as UTF-8.
/// Exports written by this application carry the BOM, so they load back
/// without mangling non-ASCII text.
pub fn load_csv(path: &Path) -> Result<Dataset, DataLoadError> {
    let bytes = std::fs::read(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_bytes(&bytes)?;
    log::info!(
        "Loaded {} orders ({} columns) from {}",
        dataset.len(),
        dataset.columns.len(),
        path.display()
    );
    Ok(dataset)
}

/// Parse an in-memory CSV document.  See [`load_csv`].
pub fn load_bytes(bytes: &[u8]) -> Result<Dataset, DataLoadError> {
    let (text, encoding, had_errors) = WINDOWS_1252.decode(bytes);
    // Windows-1252 maps every byte; only a BOM-selected encoding can fail.
    if had_errors {
        return Err(DataLoadError::Encoding(encoding.name()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let layout = HeaderLayout::resolve(&headers)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let text = |c: Column| row.get(layout.index(c)).unwrap_or("");

        let sales = parse_number(text(Column::Sales), Column::Sales, line)?;
        let profit = parse_number(text(Column::Profit), Column::Profit, line)?;
        let discount = parse_number(text(Column::Discount), Column::Discount, line)?;

        let mut record = Record::new(
            text(Column::Region),
            text(Column::Category),
            text(Column::Segment),
            text(Column::SubCategory),
            sales,
            profit,
            discount,
        );
        record.extra = layout
            .extra
            .iter()
            .map(|(idx, name)| (name.clone(), row.get(*idx).unwrap_or("").to_string()))
            .collect::<BTreeMap<_, _>>();

        records.push(record);
    }

    let undefined = records.iter().filter(|r| r.profit_margin.is_none()).count();
    if undefined > 0 {
        log::debug!("{undefined} orders have zero sales; their profit margin is undefined");
    }

    Ok(Dataset::from_records(layout.columns, records))
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

/// Where each column of the input lives.
struct HeaderLayout {
    /// Position of each required column, in `Column::REQUIRED` order.
    required: [usize; Column::REQUIRED.len()],
    /// Uninterpreted columns: (position, name).
    extra: Vec<(usize, String)>,
    /// Header order kept on the dataset (derived column dropped).
    columns: Vec<String>,
}

impl HeaderLayout {
    fn resolve(headers: &[String]) -> Result<Self, DataLoadError> {
        let mut seen = BTreeSet::new();
        for h in headers {
            if !seen.insert(h.as_str()) {
                return Err(DataLoadError::DuplicateColumn(h.clone()));
            }
        }

        let mut required = [0usize; Column::REQUIRED.len()];
        for (slot, column) in required.iter_mut().zip(Column::REQUIRED) {
            *slot = headers
                .iter()
                .position(|h| h == column.header())
                .ok_or(DataLoadError::MissingColumn(column.header()))?;
        }

        // The derived column is always recomputed, never trusted from input.
        let columns: Vec<String> = headers
            .iter()
            .filter(|h| h.as_str() != PROFIT_MARGIN_HEADER)
            .cloned()
            .collect();

        let extra = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| Column::from_header(h).is_none() && h.as_str() != PROFIT_MARGIN_HEADER)
            .map(|(i, h)| (i, h.clone()))
            .collect();

        Ok(HeaderLayout {
            required,
            extra,
            columns,
        })
    }

    fn index(&self, column: Column) -> usize {
        self.required[column as usize]
    }
}

fn parse_number(s: &str, column: Column, line: u64) -> Result<f64, DataLoadError> {
    debug_assert!(column.is_numeric());
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataLoadError::InvalidNumber {
            line,
            column: column.header(),
            value: s.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dimension;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Order ID,Region,Category,Segment,Sub-Category,Sales,Profit,Discount";

    fn csv(rows: &[&str]) -> String {
        let mut s = String::from(HEADER);
        for r in rows {
            s.push('\n');
            s.push_str(r);
        }
        s.push('\n');
        s
    }

    #[test]
    fn parses_rows_and_derives_margin() {
        let text = csv(&[
            "A-1,West,Furniture,Consumer,Chairs,100,10,0.1",
            "A-2,East,Furniture,Corporate,Tables,200,-20,0.2",
        ]);
        let ds = load_bytes(text.as_bytes()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.columns.first().map(String::as_str), Some("Order ID"));
        let first = &ds.records[0];
        assert_eq!(first.region, "West");
        assert_eq!(first.sub_category, "Chairs");
        assert_eq!(first.sales, 100.0);
        assert_eq!(first.profit_margin, Some(0.1));
        assert_eq!(first.extra.get("Order ID").map(String::as_str), Some("A-1"));
        assert_eq!(ds.records[1].profit_margin, Some(-0.1));
        assert_eq!(ds.distinct(Dimension::Region).len(), 2);
    }

    #[test]
    fn zero_sales_yields_undefined_margin() {
        let text = csv(&["A-1,West,Furniture,Consumer,Chairs,0,-3,0.8"]);
        let ds = load_bytes(text.as_bytes()).unwrap();
        assert_eq!(ds.records[0].profit_margin, None);
    }

    #[test]
    fn decodes_latin1_bytes() {
        let mut bytes = b"Customer Name,Region,Category,Segment,Sub-Category,Sales,Profit,Discount\n".to_vec();
        // "Zoë" with ë as the single byte 0xEB.
        bytes.extend_from_slice(b"Zo\xEB,West,Furniture,Consumer,Chairs,1,1,0\n");
        let ds = load_bytes(&bytes).unwrap();
        assert_eq!(ds.records[0].extra["Customer Name"], "Zoë");
    }

    #[test]
    fn utf8_bom_switches_to_utf8() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("Customer Name,Region,Category,Segment,Sub-Category,Sales,Profit,Discount\n".as_bytes());
        bytes.extend_from_slice("Zoë,West,Furniture,Consumer,Chairs,1,1,0\n".as_bytes());
        let ds = load_bytes(&bytes).unwrap();
        assert_eq!(ds.columns[0], "Customer Name");
        assert_eq!(ds.records[0].extra["Customer Name"], "Zoë");
    }

    #[test]
    fn bom_with_invalid_utf8_is_rejected() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"Customer Name,Region,Category,Segment,Sub-Category,Sales,Profit,Discount\n");
        bytes.extend_from_slice(b"Zo\xEB,West,Furniture,Consumer,Chairs,1,1,0\n");
        let err = load_bytes(&bytes).unwrap_err();
        assert!(matches!(err, DataLoadError::Encoding("UTF-8")));
        assert_eq!(err.to_string(), "input is not valid UTF-8");
    }

    #[test]
    fn columns_are_read_by_name_in_any_order() {
        let text = "Discount,Profit,Sales,Sub-Category,Segment,Category,Region\n\
                    0.2,-5,50,Tables,Corporate,Furniture,East\n";
        let ds = load_bytes(text.as_bytes()).unwrap();
        let rec = &ds.records[0];
        assert_eq!(rec.region, "East");
        assert_eq!(rec.category, "Furniture");
        assert_eq!(rec.segment, "Corporate");
        assert_eq!(rec.sub_category, "Tables");
        assert_eq!(rec.sales, 50.0);
        assert_eq!(rec.profit, -5.0);
        assert_eq!(rec.discount, 0.2);
        assert_eq!(rec.profit_margin, Some(-0.1));
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let text = "Region,Category,Segment,Sales,Profit,Discount\nWest,Furniture,Consumer,1,1,0\n";
        let err = load_bytes(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn("Sub-Category")));
    }

    #[test]
    fn empty_input_is_missing_columns() {
        let err = load_bytes(b"").unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(_)));
    }

    #[test]
    fn duplicate_header_is_an_error() {
        let text = "Region,Region,Category,Segment,Sub-Category,Sales,Profit,Discount\n";
        let err = load_bytes(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateColumn(ref c) if c == "Region"));
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let text = csv(&["A-1,West,Furniture,Consumer,Chairs,100,10"]);
        let err = load_bytes(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::Csv(_)));
    }

    #[test]
    fn non_numeric_value_reports_line_and_column() {
        let text = csv(&[
            "A-1,West,Furniture,Consumer,Chairs,100,10,0.1",
            "A-2,West,Furniture,Consumer,Chairs,abc,10,0.1",
        ]);
        match load_bytes(text.as_bytes()).unwrap_err() {
            DataLoadError::InvalidNumber { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Sales");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nan_and_empty_numbers_are_rejected() {
        for bad in ["NaN", "inf", ""] {
            let row = format!("A-1,West,Furniture,Consumer,Chairs,100,{bad},0.1");
            let text = csv(&[row.as_str()]);
            let err = load_bytes(text.as_bytes()).unwrap_err();
            assert!(
                matches!(err, DataLoadError::InvalidNumber { column: "Profit", .. }),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn incoming_profit_margin_column_is_recomputed() {
        let text = "Region,Category,Segment,Sub-Category,Sales,Profit,Discount,Profit Margin\n\
                    West,Furniture,Consumer,Chairs,50,5,0,0.99\n";
        let ds = load_bytes(text.as_bytes()).unwrap();
        assert!(!ds.columns.iter().any(|c| c == PROFIT_MARGIN_HEADER));
        assert!(ds.records[0].extra.is_empty());
        assert_eq!(ds.records[0].profit_margin, Some(0.1));
    }

    #[test]
    fn load_csv_reads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv(&["A-1,South,Technology,Home Office,Phones,3.5,1.25,0"]).as_bytes())
            .unwrap();
        file.flush().unwrap();

        let ds = load_csv(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].segment, "Home Office");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }
}
