use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::Utc;
use tracing::{error, info};

use super::routes::{load_report, LoadError};
use super::AppState;
use crate::auth::CurrentSession;
use crate::spreadsheet::{export_filename, write_xlsx, XLSX_CONTENT_TYPE};

pub const LOGIN_REQUIRED: &str = "Faça login para baixar o arquivo";

/// Handler for the spreadsheet download (GET /export.xlsx).
///
/// Fetches a fresh channel report and returns it as a one-sheet workbook.
pub async fn export_xlsx(State(state): State<AppState>, current: CurrentSession) -> Response {
    let Some(username) = current.session.username.clone() else {
        return (StatusCode::UNAUTHORIZED, LOGIN_REQUIRED).into_response();
    };
    let Some(credentials) = current.session.credentials.clone() else {
        return Redirect::to("/").into_response();
    };

    let report = match load_report(&state, &current.token, &credentials).await {
        Ok(report) => report,
        Err(LoadError::OAuth(e)) => {
            error!(username = %username, error = %e, "Export needs a new Google connection");
            return Redirect::to("/").into_response();
        }
        Err(LoadError::Report(e)) => {
            error!(username = %username, error = %e, "Failed to load report for export");
            return (StatusCode::BAD_GATEWAY, e.to_string()).into_response();
        }
    };

    let bytes = match write_xlsx(&report) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = ?e, "Failed to write spreadsheet");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Falha ao gerar planilha").into_response();
        }
    };

    let filename = export_filename(Utc::now());
    info!(
        username = %username,
        filename = %filename,
        size = bytes.len(),
        videos = report.videos.len(),
        "Exported channel report"
    );

    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
