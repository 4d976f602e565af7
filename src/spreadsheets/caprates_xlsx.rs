use crate::analysis::nearby::CapRateRow;
use crate::errors::{ResultResp, ServerError};
use crate::responses::xlsx_response;
use rust_xlsxwriter::{Format, Workbook};

const HEADERS: [&str; 4] = ["Address", "Zestimate", "Rental Zestimate", "Cap Rate"];

/// Nearby cap-rate table as a workbook named after the origin ZPID.
pub fn export_caprates_xlsx(rows: &[CapRateRow], origin_zpid: &str) -> ResultResp {
    let buffer = caprates_workbook(rows)?;
    xlsx_response(buffer, &format!("caprates_{origin_zpid}.xlsx"))
}

pub fn caprates_workbook(rows: &[CapRateRow]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();
    let money = Format::new().set_num_format("$#,##0");

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| xlsx_err("header", e))?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &row.address)
            .map_err(|e| xlsx_err("address", e))?;
        worksheet
            .write_number_with_format(r, 1, row.zestimate, &money)
            .map_err(|e| xlsx_err("zestimate", e))?;
        worksheet
            .write_number_with_format(r, 2, row.rental_zestimate, &money)
            .map_err(|e| xlsx_err("rental zestimate", e))?;
        worksheet
            .write_string(r, 3, row.cap_rate.as_deref().unwrap_or("N/A"))
            .map_err(|e| xlsx_err("cap rate", e))?;
    }

    worksheet
        .set_column_width(0, 40)
        .map_err(|e| xlsx_err("column width", e))?;

    workbook
        .save_to_buffer()
        .map_err(|e| xlsx_err("workbook", e))
}

fn xlsx_err(what: &str, e: rust_xlsxwriter::XlsxError) -> ServerError {
    ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}
