use std::io::Write;

use super::filter::FilteredView;
use super::model::PROFIT_MARGIN_HEADER;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the view as UTF-8 CSV: the input columns in their original order,
/// then the derived Profit Margin (an empty cell where it is undefined).
///
/// A byte-order mark is written first so the loader, which otherwise assumes
/// Latin-1, reads the export back as UTF-8.
pub fn write_csv<W: Write>(view: &FilteredView<'_>, mut out: W) -> csv::Result<()> {
    out.write_all(UTF8_BOM)?;

    let columns = &view.dataset().columns;
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(
        columns
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(PROFIT_MARGIN_HEADER)),
    )?;

    for rec in view.records() {
        let margin = rec.profit_margin.map(|m| m.to_string()).unwrap_or_default();
        writer.write_record(
            columns
                .iter()
                .map(|c| rec.field(c))
                .chain(std::iter::once(margin)),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// [`write_csv`] into memory, ready to hand to a save dialog.
pub fn to_csv_bytes(view: &FilteredView<'_>) -> csv::Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(view, &mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, FilterSelection};
    use crate::data::loader::load_bytes;
    use crate::data::model::{Dataset, Dimension};

    const SOURCE: &[u8] = b"Row ID,Customer Name,Region,Category,Segment,Sub-Category,Sales,Profit,Discount\n\
1,Zo\xEB Baker,West,Furniture,Consumer,Chairs,261.96,41.9136,0\n\
2,Claire Gute,East,Furniture,Corporate,Tables,957.5775,-383.031,0.45\n\
3,\"Hunter, Lopez\",West,Technology,Consumer,Phones,0,-4.5,0.8\n\
4,Sean O'Donnell,South,Office Supplies,Home Office,Binders,22.368,2.5164,0.2\n";

    #[test]
    fn export_starts_with_bom_and_appends_margin() {
        let ds = load_bytes(SOURCE).unwrap();
        let view = filter(&ds, &FilterSelection::all(&ds));
        let bytes = to_csv_bytes(&view).unwrap();

        assert!(bytes.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Row ID,Customer Name,Region,Category,Segment,Sub-Category,Sales,Profit,Discount,Profit Margin")
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("1,Zoë Baker,West,Furniture"));
        // Zero-sales row has an empty margin cell.
        let third = lines.nth(1).unwrap();
        assert!(third.starts_with("3,\"Hunter, Lopez\""));
        assert!(third.ends_with(",0.8,"));
    }

    #[test]
    fn export_round_trips_through_the_loader() {
        let ds = load_bytes(SOURCE).unwrap();
        let mut selection = FilterSelection::all(&ds);
        selection.toggle(Dimension::Region, "East");
        let view = filter(&ds, &selection);

        let reloaded = load_bytes(&to_csv_bytes(&view).unwrap()).unwrap();
        let expected: Vec<_> = view.records().cloned().collect();

        assert_eq!(reloaded.columns, ds.columns);
        assert_eq!(reloaded.records, expected);
    }

    #[test]
    fn empty_view_exports_header_only() {
        let ds = Dataset::with_required_columns(Vec::new());
        let view = filter(&ds, &FilterSelection::all(&ds));
        let bytes = to_csv_bytes(&view).unwrap();
        let text = std::str::from_utf8(&bytes[UTF8_BOM.len()..]).unwrap();
        assert_eq!(
            text,
            "Region,Category,Segment,Sub-Category,Sales,Profit,Discount,Profit Margin\n"
        );
    }
}
