//! Grid workbook renderer — projects a call sheet into a two-sheet XLSX
//! workbook addressed by (sheet, row, column).
//!
//! Structurally equivalent to the PDF renderer: same title, same 5-row info
//! grid, same 12-column scene table, same conditional second sheet. All cell
//! strings come from [`super::format`]. Errors map to `AppError::Render`;
//! nothing partial is ever returned.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

use crate::errors::{AppError, AppResult};
use crate::models::CallSheetDocument;

use super::format::{
    cast_row_cells, detail_entries, document_title, info_rows, scene_row_cells,
    schedule_row_cells, staff_row_cells, InfoCell, SectionFlags, CAST_COLUMNS,
    CAST_SECTION_TITLE, DETAIL_SECTION_TITLE, NOTES_SECTION_TITLE, SCENE_COLUMNS,
    SCHEDULE_COLUMNS, SCHEDULE_SECTION_TITLE, STAFF_COLUMNS, STAFF_SECTION_TITLE,
};

const MAIN_SHEET_NAME:   &str = "일일촬영계획표";
const DETAIL_SHEET_NAME: &str = "상세정보";

/// A4 in the xlsx paper-size table.
const PAPER_A4: u8 = 9;

/// Last column of the 12-column scene table; merges span the full width.
const LAST_COL: u16 = (SCENE_COLUMNS.len() - 1) as u16;

/// Explicit widths per scene-table column: narrow for codes, wide for text.
const SCENE_COLUMN_WIDTHS: [f64; 12] =
    [6.0, 6.0, 6.0, 8.0, 8.0, 8.0, 8.0, 6.0, 18.0, 30.0, 16.0, 24.0];

/// Cell formats reused across both sheets.
struct Styles {
    title:         Format,
    info_header:   Format,
    info_value:    Format,
    table_header:  Format,
    body:          Format,
    body_centered: Format,
    section_label: Format,
    notes:         Format,
}

impl Styles {
    fn new() -> Self {
        let bordered = Format::new().set_border(FormatBorder::Thin);
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(18)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            info_header: bordered
                .clone()
                .set_bold()
                .set_background_color(Color::RGB(0xF2F2F2)),
            info_value: bordered.clone(),
            table_header: bordered
                .clone()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Color::Black)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            body: bordered
                .clone()
                .set_text_wrap()
                .set_align(FormatAlign::VerticalCenter),
            body_centered: bordered
                .set_text_wrap()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            section_label: Format::new().set_bold().set_font_size(12),
            notes: Format::new()
                .set_border(FormatBorder::Thin)
                .set_text_wrap(),
        }
    }
}

/// Render the call sheet as an XLSX binary buffer.
pub fn render(doc_data: &CallSheetDocument) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();

    write_main_sheet(workbook.add_worksheet(), doc_data).map_err(render_err)?;

    let flags = SectionFlags::of(doc_data);
    if flags.second_page() {
        write_detail_sheet(workbook.add_worksheet(), doc_data, flags).map_err(render_err)?;
    }

    workbook.save_to_buffer().map_err(render_err)
}

// ── Sheet 1: title, info grid, scene table, notes ─────────────

fn write_main_sheet(
    worksheet: &mut Worksheet,
    doc_data: &CallSheetDocument,
) -> Result<(), XlsxError> {
    let styles = Styles::new();

    worksheet.set_name(MAIN_SHEET_NAME)?;
    worksheet.set_landscape();
    worksheet.set_paper_size(PAPER_A4);
    worksheet.set_print_fit_to_pages(1, 0);

    for (col, width) in SCENE_COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    // Merged title cell across the full table width.
    worksheet.merge_range(0, 0, 0, LAST_COL, &document_title(doc_data), &styles.title)?;
    worksheet.set_row_height(0, 30)?;

    // 5-row metadata grid at explicit coordinates. The trailing value cell of
    // the short rows (meeting place, address) is merged to the last column.
    let mut row: u32 = 1;
    for info_row in info_rows(doc_data) {
        let cell_count = info_row.len();
        for (col, cell) in info_row.iter().enumerate() {
            let col = col as u16;
            match cell {
                InfoCell::Header(text) => {
                    worksheet.write_string_with_format(row, col, text, &styles.info_header)?;
                }
                InfoCell::Value(text) => {
                    if col as usize == cell_count - 1 && cell_count <= 3 {
                        worksheet.merge_range(row, col, row, LAST_COL, text, &styles.info_value)?;
                    } else {
                        worksheet.write_string_with_format(row, col, text, &styles.info_value)?;
                    }
                }
            }
        }
        row += 1;
    }

    // Blank separator, then the scene table.
    row += 1;
    for (col, label) in SCENE_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(row, col as u16, *label, &styles.table_header)?;
    }
    row += 1;

    for (index, scene) in doc_data.scenes.iter().enumerate() {
        let cells = scene_row_cells(index, scene);
        for (col, cell) in cells.iter().enumerate() {
            let format = if col < 8 { &styles.body_centered } else { &styles.body };
            worksheet.write_string_with_format(row, col as u16, cell, format)?;
        }
        row += 1;
    }

    // Optional merged notes block after the last scene row.
    if let Some(notes) = doc_data
        .sheet
        .general_notes
        .as_deref()
        .filter(|n| !n.is_empty())
    {
        row += 1;
        worksheet.write_string_with_format(row, 0, NOTES_SECTION_TITLE, &styles.section_label)?;
        row += 1;
        worksheet.merge_range(row, 0, row, LAST_COL, notes, &styles.notes)?;
    }

    Ok(())
}

// ── Sheet 2: schedule, staff, details, cast ───────────────────

fn write_detail_sheet(
    worksheet: &mut Worksheet,
    doc_data: &CallSheetDocument,
    flags: SectionFlags,
) -> Result<(), XlsxError> {
    let styles = Styles::new();

    worksheet.set_name(DETAIL_SHEET_NAME)?;
    worksheet.set_landscape();
    worksheet.set_paper_size(PAPER_A4);

    for (col, width) in [14.0, 14.0, 12.0, 16.0, 14.0, 34.0, 16.0].iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    let mut row: u32 = 0;

    if flags.schedules {
        row = write_section_header(worksheet, &styles, row, SCHEDULE_SECTION_TITLE, &SCHEDULE_COLUMNS)?;
        for entry in &doc_data.schedules {
            for (col, cell) in schedule_row_cells(entry).iter().enumerate() {
                worksheet.write_string_with_format(row, col as u16, cell, &styles.body)?;
            }
            row += 1;
        }
        row += 1;
    }

    if flags.staff {
        row = write_section_header(worksheet, &styles, row, STAFF_SECTION_TITLE, &STAFF_COLUMNS)?;
        for entry in &doc_data.staff {
            for (col, cell) in staff_row_cells(entry).iter().enumerate() {
                worksheet.write_string_with_format(row, col as u16, cell, &styles.body)?;
            }
            row += 1;
        }
        row += 1;
    }

    if flags.details {
        worksheet.write_string_with_format(row, 0, DETAIL_SECTION_TITLE, &styles.section_label)?;
        row += 1;
        // Label/value pairs; the value cell is merged across the row so long
        // free text stays readable.
        for (label, value) in detail_entries(&doc_data.sheet) {
            worksheet.write_string_with_format(row, 0, label, &styles.info_header)?;
            worksheet.merge_range(row, 1, row, 6, &value, &styles.body)?;
            row += 1;
        }
        row += 1;
    }

    if flags.cast {
        row = write_section_header(worksheet, &styles, row, CAST_SECTION_TITLE, &CAST_COLUMNS)?;
        for member in &doc_data.cast {
            for (col, cell) in cast_row_cells(member).iter().enumerate() {
                worksheet.write_string_with_format(row, col as u16, cell, &styles.body)?;
            }
            row += 1;
        }
    }

    Ok(())
}

/// Section label row followed by a styled table header row; returns the row
/// index where data should start.
fn write_section_header(
    worksheet: &mut Worksheet,
    styles: &Styles,
    mut row: u32,
    title: &str,
    columns: &[&str],
) -> Result<u32, XlsxError> {
    worksheet.write_string_with_format(row, 0, title, &styles.section_label)?;
    row += 1;
    for (col, label) in columns.iter().enumerate() {
        worksheet.write_string_with_format(row, col as u16, *label, &styles.table_header)?;
    }
    Ok(row + 1)
}

fn render_err(e: XlsxError) -> AppError {
    AppError::Render(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CallSheet, CallSheetDocument, Project, ProjectStatus, StaffEntry};
    use chrono::NaiveDate;

    fn doc(staff: Vec<StaffEntry>) -> CallSheetDocument {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        CallSheetDocument {
            project: Project {
                id:            "p1".into(),
                user_id:       None,
                title:         "가을의 끝".into(),
                r#type:        None,
                production_co: None,
                director:      None,
                producer:      None,
                ad_name:       None,
                start_date:    None,
                end_date:      None,
                status:        ProjectStatus::Prep,
                created_at:    ts,
                updated_at:    ts,
            },
            sheet: CallSheet {
                id:                "cs1".into(),
                project_id:        "p1".into(),
                episode:           None,
                shooting_day:      1,
                shoot_date:        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                weather:           None,
                temp_min:          None,
                temp_max:          None,
                precipitation:     None,
                sunrise:           None,
                sunset:            None,
                director:          None,
                producer:          None,
                ad_name:           None,
                location:          None,
                address:           None,
                meeting_place:     None,
                parking_info:      None,
                emergency_contact: None,
                crew_call_time:    None,
                talent_call_time:  None,
                general_notes:     None,
                detail_direction:  None,
                detail_assist_dir: None,
                detail_camera:     None,
                detail_lighting:   None,
                detail_sound:      None,
                detail_art:        None,
                detail_wardrobe:   None,
                detail_production: None,
                detail_etc:        None,
                created_at:        ts,
                updated_at:        ts,
            },
            scenes:    vec![],
            schedules: vec![],
            staff,
            cast:      vec![],
        }
    }

    #[test]
    fn renders_a_zip_container() {
        let buf = render(&doc(vec![])).expect("render");
        // XLSX is a zip archive; check the magic instead of parsing it back.
        assert!(buf.len() > 4);
        assert_eq!(&buf[..2], b"PK");
    }

    #[test]
    fn staff_only_sheet_still_renders() {
        let staff = vec![StaffEntry {
            id:            String::new(),
            call_sheet_id: String::new(),
            ord:           0,
            position:      Some("촬영감독".into()),
            name:          Some("박촬영".into()),
            contact:       Some("010-0000-0000".into()),
        }];
        let buf = render(&doc(staff)).expect("render");
        assert_eq!(&buf[..2], b"PK");
    }
}
