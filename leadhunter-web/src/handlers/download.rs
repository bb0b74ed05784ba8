//! CSV and Excel download handlers

use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use leadhunter_core::export::{
    CSV_CONTENT_TYPE, CSV_FILENAME, EXCEL_CONTENT_TYPE, EXCEL_FILENAME, leads_to_csv,
    leads_to_excel,
};
use leadhunter_core::LeadRecord;
use serde::Deserialize;

use super::errors::ApiError;

/// Leads the client wants exported, usually the last search result.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub results: Vec<LeadRecord>,
}

fn attachment(content_type: &str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Returns the website URLs of the posted leads as a CSV attachment.
///
/// # Errors
/// - `ApiError::BadRequest` - Body malformed
/// - `ApiError::Internal` - CSV could not be generated
pub async fn download_csv(
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::invalid_body(&rejection))?;

    let bytes = leads_to_csv(&request.results).map_err(|e| {
        tracing::error!("Error generating CSV: {e}");
        ApiError::internal("Failed to generate CSV file")
    })?;

    tracing::debug!("CSV export: {} rows", request.results.len());
    Ok(attachment(CSV_CONTENT_TYPE, CSV_FILENAME, bytes))
}

/// Returns names and phone numbers of the posted leads as an xlsx attachment.
///
/// # Errors
/// - `ApiError::BadRequest` - Body malformed
/// - `ApiError::Internal` - Workbook could not be generated
pub async fn download_excel(
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::invalid_body(&rejection))?;

    let bytes = leads_to_excel(&request.results).map_err(|e| {
        tracing::error!("Error generating Excel: {e}");
        ApiError::internal("Failed to generate Excel file")
    })?;

    tracing::debug!("Excel export: {} rows", request.results.len());
    Ok(attachment(EXCEL_CONTENT_TYPE, EXCEL_FILENAME, bytes))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    use super::*;

    #[tokio::test]
    async fn test_csv_attachment_headers() {
        let request = ExportRequest {
            results: vec![LeadRecord {
                name: "A".to_string(),
                website: Some("https://a.es".to_string()),
                phone: None,
                region: "Madrid".to_string(),
                business_type: "Franchises".to_string(),
            }],
        };

        let response = download_csv(Ok(Json(request))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=business_leads.csv"
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(String::from_utf8_lossy(&body).lines().nth(1), Some("https://a.es"));
    }

    #[tokio::test]
    async fn test_excel_attachment_headers() {
        let response = download_excel(Ok(Json(ExportRequest { results: vec![] })))
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=business_leads.xlsx"
        );
        assert_eq!(response.headers()[header::CONTENT_TYPE], EXCEL_CONTENT_TYPE);
    }
}
