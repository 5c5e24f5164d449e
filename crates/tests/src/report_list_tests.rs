use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::ReportQuery;

use crate::common::*;

fn page_body() -> serde_json::Value {
    json!({
        "data": [
            {
                "_id": "r1",
                "title": "Store A",
                "includesDocument": true,
                "generatedBy": {"name": "Ana Pérez", "username": "1030"},
                "createdAt": "2025-08-01T15:04:05Z",
                "incidentNumber": "INC-4411",
                "url": "https://cdn.example.com/r1.pdf"
            },
            {
                "_id": "r2",
                "title": "Store C",
                "includesDocument": false
            }
        ],
        "total": 12,
        "totalPages": 2
    })
}

#[tokio::test]
async fn list_sends_paging_and_search_parameters() {
    let mock = spawn_mock().await;
    mock.respond(REPORTS, StatusCode::OK, page_body());
    let query = ReportQuery {
        page: 2,
        limit: 10,
        search: "store".into(),
        incident_search: "4411".into(),
    };

    mock.api().list_reports(&query).await.unwrap();

    let recorded = mock.last(REPORTS);
    let param = |k: &str| recorded.query.get(k).cloned();
    assert_eq!(param("page").as_deref(), Some("2"));
    assert_eq!(param("limit").as_deref(), Some("10"));
    assert_eq!(param("search").as_deref(), Some("store"));
    assert_eq!(param("incidentSearch").as_deref(), Some("4411"));
}

#[tokio::test]
async fn list_parses_rows_and_totals() {
    let mock = spawn_mock().await;
    mock.respond(REPORTS, StatusCode::OK, page_body());

    let page = mock.api().list_reports(&ReportQuery::default()).await.unwrap();

    assert_eq!(page.total, 12);
    assert_eq!(page.total_pages, 2);
    assert!(page.has_next(1));
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].author(), "Ana Pérez");
    assert_eq!(page.data[0].incident_display(), "4411");
    assert_eq!(page.data[1].author(), "—");
    assert_eq!(page.data[1].incident_display(), "—");
    assert!(!page.data[1].includes_document);
}

#[tokio::test]
async fn out_of_range_query_is_normalised_before_sending() {
    let mock = spawn_mock().await;
    let query = ReportQuery {
        page: 0,
        limit: 7,
        ..Default::default()
    }
    .normalized();

    mock.api().list_reports(&query).await.unwrap();

    let recorded = mock.last(REPORTS);
    assert_eq!(recorded.query.get("page").map(String::as_str), Some("1"));
    assert_eq!(recorded.query.get("limit").map(String::as_str), Some("10"));
}

#[tokio::test]
async fn list_failure_is_reported() {
    let mock = spawn_mock().await;
    mock.respond(REPORTS, StatusCode::SERVICE_UNAVAILABLE, json!({}));

    let err = mock.api().list_reports(&ReportQuery::default()).await.unwrap_err();
    assert!(!err.friendly_message().is_empty());
}
