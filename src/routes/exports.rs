//! `/call-sheets/{id}/export` routes — binary document downloads.
//!
//! Both endpoints load the same joined snapshot, hand it to one of the two
//! renderers and stream the result back with an RFC 5987 encoded filename.
//! A missing sheet is a 404 before any rendering starts; a renderer failure
//! is a single 500 with no partial body.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::path::Path as FsPath;

use crate::{
    errors::AppResult,
    sheet::{format, pdf, xlsx},
    state::AppState,
};

use super::call_sheets::load_call_sheet_document;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const PDF_CONTENT_TYPE: &str = "application/pdf";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/call-sheets/{id}/export/xlsx", get(export_xlsx))
        .route("/call-sheets/{id}/export/pdf",  get(export_pdf))
}

async fn export_xlsx(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let document = load_call_sheet_document(&state.pool, &id).await?;
    let buffer = xlsx::render(&document)?;
    let filename = format::export_filename(&document, "xlsx");

    tracing::info!(call_sheet_id = %id, bytes = buffer.len(), "Generated workbook export");
    Ok(attachment(XLSX_CONTENT_TYPE, &filename, buffer))
}

async fn export_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let document = load_call_sheet_document(&state.pool, &id).await?;
    let buffer = pdf::render(
        &document,
        FsPath::new(&state.config.pdf_font_dir),
        &state.config.pdf_font_name,
    )?;
    let filename = format::export_filename(&document, "pdf");

    tracing::info!(call_sheet_id = %id, bytes = buffer.len(), "Generated PDF export");
    Ok(attachment(PDF_CONTENT_TYPE, &filename, buffer))
}

/// Download response with a UTF-8 `filename*` so the Korean names survive the
/// Content-Disposition header.
fn attachment(content_type: &str, filename: &str, body: Vec<u8>) -> impl IntoResponse {
    let encoded = urlencoding::encode(filename).into_owned();
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename*=UTF-8''{encoded}"),
            ),
        ],
        body,
    )
}
