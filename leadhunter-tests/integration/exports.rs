//! Export endpoints fed with search results.

use std::io::Cursor;

use calamine::{Reader, Xlsx, open_workbook_from_rs};
use hyper::StatusCode;
use serde_json::json;

use super::common::{json, memory_app, post_json};

#[tokio::test]
async fn test_csv_download_marks_missing_websites() {
    let body = json!({"results": [
        {"name": "A", "website": "", "phone": "", "region": "Madrid", "type": "Franchises"},
        {"name": "B", "website": "https://www.b.es", "region": "Madrid", "type": "Franchises"},
        {"name": "C", "region": "Madrid", "type": "Franchises"}
    ]});

    let (status, headers, bytes) = post_json(memory_app(), "/api/download/csv", body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["content-type"], "text/csv");
    assert_eq!(
        headers["content-disposition"],
        "attachment; filename=business_leads.csv"
    );

    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec!["Website URL", "Not available", "https://www.b.es", "Not available"]
    );
}

#[tokio::test]
async fn test_search_results_round_trip_into_excel() {
    let (status, _, leads) = post_json(
        memory_app(),
        "/api/search",
        json!({"regions": ["Extremadura"], "businessTypes": ["Franchises"]}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let leads = json(&leads);

    let (status, headers, bytes) = post_json(
        memory_app(),
        "/api/download/excel",
        json!({ "results": leads }).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers["content-type"],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        headers["content-disposition"],
        "attachment; filename=business_leads.xlsx"
    );

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range("Business Leads").unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();

    assert_eq!(rows[0], vec!["Business Name", "Phone Number"]);
    assert_eq!(rows.len(), leads.as_array().unwrap().len() + 1);
    assert_eq!(rows[1][0], leads[0]["name"].as_str().unwrap());
    assert_eq!(rows[1][1], leads[0]["phone"].as_str().unwrap());
}

#[tokio::test]
async fn test_excel_missing_phone_is_not_available() {
    let body = json!({"results": [{"name": "A", "region": "Madrid", "type": "Franchises"}]});
    let (status, _, bytes) = post_json(memory_app(), "/api/download/excel", body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range("Business Leads").unwrap();
    let second_row: Vec<String> = range.rows().nth(1).unwrap().iter().map(|c| c.to_string()).collect();
    assert_eq!(second_row, vec!["A", "Not available"]);
}

#[tokio::test]
async fn test_downloads_reject_malformed_bodies() {
    for uri in ["/api/download/csv", "/api/download/excel"] {
        for body in ["[]", r#"{"results": [{"website": "x"}]}"#, "{"] {
            let (status, _, response) = post_json(memory_app(), uri, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body}");
            assert_eq!(json(&response)["message"], "Invalid request body");
        }
    }
}
