use crate::domain::ports::CellGrid;
use crate::domain::sheet::{CellAddress, Column, Sheet, SheetRange, Workbook};
use crate::utils::error::Result;
use calamine::{open_workbook_auto_from_rs, Data, Dimensions, Range, Reader, Sheets};
use std::io::{Cursor, Read, Seek};

/// Decodes xlsx/xlsm/xlsb/xls/ods bytes into in-memory sheets.
pub fn decode_workbook(bytes: Vec<u8>) -> Result<Workbook> {
    let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let mut workbook = Workbook::new();

    for name in sheets.sheet_names() {
        let declared = declared_dimensions(&mut sheets, &name)?;
        let range = sheets.worksheet_range(&name)?;
        let mut sheet = sheet_from_range(&name, &range);
        if let Some(dims) = declared {
            // 沒有任何儲存格時，A1 只是預設值
            if sheet.cell_count() > 0 || dims != Dimensions::default() {
                sheet = sheet.with_declared_range(range_from_dimensions(dims));
            }
        }
        tracing::debug!(
            "Sheet '{}': {} cell(s), range {}",
            name,
            sheet.cell_count(),
            sheet
                .occupied_range()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "<empty>".to_string())
        );
        workbook.insert(sheet);
    }

    Ok(workbook)
}

/// The `<dimension>` record of an xlsx worksheet. It also covers formatted
/// blank cells, which the value range leaves out. Other formats have no
/// such record and keep the range of their stored cells.
fn declared_dimensions<RS: Read + Seek>(
    sheets: &mut Sheets<RS>,
    name: &str,
) -> Result<Option<Dimensions>> {
    match sheets {
        Sheets::Xlsx(xlsx) => {
            let dims = xlsx
                .worksheet_cells_reader(name)
                .map_err(calamine::Error::Xlsx)?
                .dimensions();
            Ok(Some(dims))
        }
        _ => Ok(None),
    }
}

fn range_from_dimensions(dims: Dimensions) -> SheetRange {
    SheetRange {
        start: CellAddress::new(Column::from_index(dims.start.1), dims.start.0 + 1),
        end: CellAddress::new(Column::from_index(dims.end.1), dims.end.0 + 1),
    }
}

fn sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);
    let (Some((start_row, start_col)), Some((end_row, end_col))) = (range.start(), range.end()) else {
        return sheet;
    };

    // calamine 的座標從 0 起算，試算表列號從 1 起算
    for (row_idx, row) in range.rows().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if let Some(value) = cell_text(cell) {
                let address = CellAddress::new(
                    Column::from_index(start_col + col_idx as u32),
                    start_row + row_idx as u32 + 1,
                );
                sheet.set_value(address, value);
            }
        }
    }

    sheet.with_declared_range(SheetRange {
        start: CellAddress::new(Column::from_index(start_col), start_row + 1),
        end: CellAddress::new(Column::from_index(end_col), end_row + 1),
    })
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        // Integral numbers without decimals, so port "1" reads as "1"
        Data::Float(n) if n.fract() == 0.0 && n.abs() < 1e15 => Some(format!("{}", *n as i64)),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::layout::SheetLayout;
    use crate::core::parser::TableParser;
    use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

    #[test]
    fn decodes_sheets_values_and_range() {
        let mut book = XlsxWorkbook::new();
        let sheet = book.add_worksheet();
        sheet.set_name("导出表").unwrap();
        sheet.write_string(0, 0, "机房").unwrap();
        sheet.write_string(1, 0, "R1").unwrap();
        sheet.write_number(1, 2, 3.0).unwrap();
        sheet.write_number(1, 3, 2.5).unwrap();
        sheet.write_string(4, 13, "空闲").unwrap();
        book.add_worksheet().set_name("空表").unwrap();
        let bytes = book.save_to_buffer().unwrap();

        let workbook = decode_workbook(bytes).unwrap();
        let names: Vec<&str> = workbook.sheet_names().collect();
        assert_eq!(names, vec!["导出表", "空表"]);

        let export = workbook.sheet("导出表").unwrap();
        assert_eq!(export.occupied_range().unwrap().to_string(), "A1:N5");
        assert_eq!(export.cell("A".parse().unwrap(), 2), Some("R1"));
        assert_eq!(export.cell("C".parse().unwrap(), 2), Some("3"));
        assert_eq!(export.cell("D".parse().unwrap(), 2), Some("2.5"));
        assert_eq!(export.cell("N".parse().unwrap(), 5), Some("空闲"));

        assert!(workbook.sheet("空表").unwrap().occupied_range().is_none());
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(decode_workbook(b"not a spreadsheet".to_vec()).is_err());
    }

    #[test]
    fn formatted_blank_rows_extend_the_declared_range() {
        let mut book = XlsxWorkbook::new();
        let bold = Format::new().set_bold();

        let sheet = book.add_worksheet();
        sheet.set_name("原端口").unwrap();
        sheet.write_string(0, 0, "端口核对").unwrap();
        sheet.write_string(1, 2, "机房").unwrap();
        for (col, value) in [(2, "R1"), (4, "S1"), (5, "P1"), (6, "在用"), (7, "L1")] {
            sheet.write_string(2, col, value).unwrap();
        }
        // 資料下方只有格式、沒有值的空白列
        sheet.write_blank(9, 7, &bold).unwrap();

        let sheet = book.add_worksheet();
        sheet.set_name("导出表").unwrap();
        sheet.write_blank(4, 13, &bold).unwrap();

        let workbook = decode_workbook(book.save_to_buffer().unwrap()).unwrap();

        let reference = workbook.sheet("原端口").unwrap();
        assert_eq!(reference.occupied_range().unwrap().to_string(), "A1:H10");
        let hierarchy = TableParser::from_layout(&SheetLayout::reference()).parse(reference);
        assert_eq!(hierarchy.port_count(), 1);

        let blanks_only = workbook.sheet("导出表").unwrap();
        assert_eq!(blanks_only.cell_count(), 0);
        assert_eq!(blanks_only.occupied_range().unwrap().last_row(), 5);
    }
}
