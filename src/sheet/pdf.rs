//! Paginated flow renderer — projects a call sheet into an A4-landscape PDF.
//!
//! Layout mirrors the grid workbook renderer section for section; every cell
//! string comes from [`super::format`], so the two outputs can only differ in
//! geometry, never in content. Any assembly failure surfaces as a single
//! `AppError::Render` and no bytes are returned.

use std::path::{Path, PathBuf};

use genpdf::{
    elements::{self, Break, LinearLayout, PageBreak, Paragraph, TableLayout},
    fonts::{FontData, FontFamily},
    style::Style,
    Alignment, Document, Element, Size,
};

use crate::errors::{AppError, AppResult};
use crate::models::CallSheetDocument;

use super::format::{
    cast_row_cells, detail_entries, detail_page_title, document_title, info_rows,
    scene_row_cells, schedule_row_cells, staff_row_cells, InfoCell, SectionFlags,
    CAST_COLUMNS, CAST_SECTION_TITLE, DETAIL_SECTION_TITLE, NOTES_SECTION_TITLE,
    NO_SCENES_MESSAGE, NO_SCHEDULES_MESSAGE, NO_STAFF_MESSAGE, SCENE_COLUMNS,
    SCENE_SECTION_TITLE, SCHEDULE_COLUMNS, SCHEDULE_SECTION_TITLE, STAFF_COLUMNS,
    STAFF_SECTION_TITLE,
};

/// Relative column weights for the scene table, narrow for codes and wide for
/// free text, approximating the print sheet crews are used to.
const SCENE_WEIGHTS: [usize; 12] = [2, 2, 2, 2, 2, 2, 2, 2, 5, 7, 4, 5];

/// Render the call sheet as a PDF byte stream.
pub fn render(doc_data: &CallSheetDocument, font_dir: &Path, font_name: &str) -> AppResult<Vec<u8>> {
    let family = load_font_family(font_dir, font_name)?;

    let mut doc = Document::new(family);
    doc.set_title(document_title(doc_data));
    // A4 landscape, millimetres.
    doc.set_paper_size(Size::new(297, 210));
    doc.set_font_size(9);

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(8);
    doc.set_page_decorator(decorator);

    push_first_page(&mut doc, doc_data)?;

    let flags = SectionFlags::of(doc_data);
    if flags.second_page() {
        doc.push(PageBreak::new());
        push_detail_page(&mut doc, doc_data, flags)?;
    }

    let mut buf = Vec::new();
    doc.render(&mut buf).map_err(render_err)?;
    Ok(buf)
}

// ── Page 1: title, info grid, scene table, notes ──────────────

fn push_first_page(doc: &mut Document, doc_data: &CallSheetDocument) -> AppResult<()> {
    doc.push(
        Paragraph::new(document_title(doc_data))
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(14)),
    );
    doc.push(Break::new(0.5));

    for row in info_rows(doc_data) {
        doc.push(info_row_table(&row)?);
    }
    doc.push(Break::new(0.5));

    doc.push(section_title(SCENE_SECTION_TITLE));
    doc.push(scene_table(doc_data)?);

    if doc_data.scenes.is_empty() {
        doc.push(message_box(NO_SCENES_MESSAGE)?);
    }

    if let Some(notes) = doc_data
        .sheet
        .general_notes
        .as_deref()
        .filter(|n| !n.is_empty())
    {
        doc.push(Break::new(0.5));
        doc.push(section_title(NOTES_SECTION_TITLE));
        doc.push(Paragraph::new(notes).padded(2).framed());
    }

    Ok(())
}

/// One metadata row as its own bordered table; header cells bold, the trailing
/// value cell of the short rows takes the remaining width.
fn info_row_table(row: &[InfoCell]) -> AppResult<TableLayout> {
    let weights: Vec<usize> = row
        .iter()
        .enumerate()
        .map(|(i, cell)| match cell {
            InfoCell::Header(_) => 2,
            // A lone trailing value cell spans the rest of the row.
            InfoCell::Value(_) if i == row.len() - 1 && row.len() <= 3 => 14,
            InfoCell::Value(_) => 3,
        })
        .collect();

    let mut table = TableLayout::new(weights);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let mut table_row = table.row();
    for cell in row {
        table_row = match cell {
            InfoCell::Header(text) => table_row.element(
                Paragraph::new(text.clone())
                    .styled(Style::new().bold())
                    .padded(1),
            ),
            InfoCell::Value(text) => table_row.element(Paragraph::new(text.clone()).padded(1)),
        };
    }
    table_row.push().map_err(render_err)?;
    Ok(table)
}

fn scene_table(doc_data: &CallSheetDocument) -> AppResult<TableLayout> {
    let mut table = TableLayout::new(SCENE_WEIGHTS.to_vec());
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let mut header = table.row();
    for label in SCENE_COLUMNS {
        header = header.element(
            Paragraph::new(label.replace('\n', " "))
                .aligned(Alignment::Center)
                .styled(Style::new().bold())
                .padded(1),
        );
    }
    header.push().map_err(render_err)?;

    for (index, scene) in doc_data.scenes.iter().enumerate() {
        let cells = scene_row_cells(index, scene);
        let mut row = table.row();
        for (col, cell) in cells.into_iter().enumerate() {
            // Code columns are centered, free-text columns left-aligned.
            let paragraph = if col < 8 {
                Paragraph::new(cell).aligned(Alignment::Center)
            } else {
                Paragraph::new(cell)
            };
            row = row.element(paragraph.padded(1));
        }
        row.push().map_err(render_err)?;
    }

    Ok(table)
}

// ── Page 2: schedule + staff, detail grid, cast ───────────────

fn push_detail_page(
    doc: &mut Document,
    doc_data: &CallSheetDocument,
    flags: SectionFlags,
) -> AppResult<()> {
    doc.push(
        Paragraph::new(detail_page_title(doc_data))
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(14)),
    );
    doc.push(Break::new(0.5));

    // Schedule and staff sit side by side; when either exists both columns
    // render, the missing one as a placeholder box.
    if flags.schedules || flags.staff {
        let mut side_by_side = TableLayout::new(vec![1, 1]);

        let mut schedule_col = LinearLayout::vertical();
        schedule_col.push(section_title(SCHEDULE_SECTION_TITLE));
        if flags.schedules {
            schedule_col.push(schedule_table(doc_data)?);
        } else {
            schedule_col.push(message_box(NO_SCHEDULES_MESSAGE)?);
        }

        let mut staff_col = LinearLayout::vertical();
        staff_col.push(section_title(STAFF_SECTION_TITLE));
        if flags.staff {
            staff_col.push(staff_table(doc_data)?);
        } else {
            staff_col.push(message_box(NO_STAFF_MESSAGE)?);
        }

        side_by_side
            .row()
            .element(schedule_col.padded(1))
            .element(staff_col.padded(1))
            .push()
            .map_err(render_err)?;
        doc.push(side_by_side);
        doc.push(Break::new(0.5));
    }

    if flags.details {
        doc.push(section_title(DETAIL_SECTION_TITLE));
        doc.push(detail_grid(doc_data)?);
        doc.push(Break::new(0.5));
    }

    if flags.cast {
        doc.push(section_title(CAST_SECTION_TITLE));
        doc.push(cast_table(doc_data)?);
    }

    Ok(())
}

fn schedule_table(doc_data: &CallSheetDocument) -> AppResult<TableLayout> {
    let mut table = TableLayout::new(vec![1, 3]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let mut header = table.row();
    for label in SCHEDULE_COLUMNS {
        header = header.element(Paragraph::new(label).styled(Style::new().bold()).padded(1));
    }
    header.push().map_err(render_err)?;

    for entry in &doc_data.schedules {
        let mut row = table.row();
        for cell in schedule_row_cells(entry) {
            row = row.element(Paragraph::new(cell).padded(1));
        }
        row.push().map_err(render_err)?;
    }
    Ok(table)
}

fn staff_table(doc_data: &CallSheetDocument) -> AppResult<TableLayout> {
    let mut table = TableLayout::new(vec![2, 2, 3]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let mut header = table.row();
    for label in STAFF_COLUMNS {
        header = header.element(Paragraph::new(label).styled(Style::new().bold()).padded(1));
    }
    header.push().map_err(render_err)?;

    for entry in &doc_data.staff {
        let mut row = table.row();
        for cell in staff_row_cells(entry) {
            row = row.element(Paragraph::new(cell).padded(1));
        }
        row.push().map_err(render_err)?;
    }
    Ok(table)
}

/// The non-empty detail fields laid out three to a row, label above value.
fn detail_grid(doc_data: &CallSheetDocument) -> AppResult<TableLayout> {
    let entries = detail_entries(&doc_data.sheet);

    let mut table = TableLayout::new(vec![1, 1, 1]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    for chunk in entries.chunks(3) {
        let mut row = table.row();
        for (label, value) in chunk {
            let mut cell = LinearLayout::vertical();
            cell.push(Paragraph::new(*label).styled(Style::new().bold()));
            cell.push(Paragraph::new(value.clone()));
            row = row.element(cell.padded(1));
        }
        // Pad the last row out to the full three columns.
        for _ in chunk.len()..3 {
            row = row.element(Paragraph::new(""));
        }
        row.push().map_err(render_err)?;
    }

    Ok(table)
}

fn cast_table(doc_data: &CallSheetDocument) -> AppResult<TableLayout> {
    let mut table = TableLayout::new(vec![2, 2, 2, 2, 2, 4, 3]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let mut header = table.row();
    for label in CAST_COLUMNS {
        header = header.element(Paragraph::new(label).styled(Style::new().bold()).padded(1));
    }
    header.push().map_err(render_err)?;

    for member in &doc_data.cast {
        let mut row = table.row();
        for cell in cast_row_cells(member) {
            row = row.element(Paragraph::new(cell).padded(1));
        }
        row.push().map_err(render_err)?;
    }
    Ok(table)
}

// ── Building blocks ───────────────────────────────────────────

fn section_title(title: &str) -> impl Element {
    Paragraph::new(title).styled(Style::new().bold().with_font_size(10))
}

fn message_box(message: &str) -> AppResult<impl Element> {
    Ok(Paragraph::new(message).padded(2).framed())
}

// ── Fonts ─────────────────────────────────────────────────────

/// Load a font family from `{dir}/{name}-{Variant}.ttf`. Only Regular is
/// required; missing variants fall back to the regular face (the CJK families
/// used for these sheets typically ship Regular and Bold only).
fn load_font_family(dir: &Path, name: &str) -> AppResult<FontFamily<FontData>> {
    let variant_path = |variant: &str| -> PathBuf {
        let path = dir.join(format!("{name}-{variant}.ttf"));
        if path.exists() {
            path
        } else {
            dir.join(format!("{name}-Regular.ttf"))
        }
    };

    let load = |path: PathBuf| -> AppResult<FontData> {
        let bytes = std::fs::read(&path).map_err(|e| {
            AppError::Render(format!("Cannot read font file {}: {e}", path.display()))
        })?;
        FontData::new(bytes, None)
            .map_err(|e| AppError::Render(format!("Invalid font data in {}: {e}", path.display())))
    };

    Ok(FontFamily {
        regular:     load(variant_path("Regular"))?,
        bold:        load(variant_path("Bold"))?,
        italic:      load(variant_path("Italic"))?,
        bold_italic: load(variant_path("BoldItalic"))?,
    })
}

fn render_err(e: genpdf::error::Error) -> AppError {
    AppError::Render(e.to_string())
}
