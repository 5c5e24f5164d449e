use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::AppErrorKind;

use crate::common::*;

#[tokio::test]
async fn delete_is_scoped_to_the_session() {
    let mock = spawn_mock().await;
    mock.respond(DELETE, StatusCode::OK, json!({"message": "deleted"}));

    mock.api().delete_report("r1", "1030").await.unwrap();

    let recorded = mock.last(DELETE);
    assert_eq!(recorded.method, Method::DELETE);
    assert_eq!(recorded.path, "/reports/r1");
    assert_eq!(recorded.query.get("sessionId").map(String::as_str), Some("1030"));
}

#[tokio::test]
async fn deleting_someone_elses_report_is_forbidden() {
    let mock = spawn_mock().await;
    mock.respond(DELETE, StatusCode::FORBIDDEN, json!({"error": "not owner"}));

    let err = mock.api().delete_report("r9", "1030").await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::Forbidden);
    assert_eq!(
        err.message,
        "You can only delete reports generated with your session"
    );
}

#[tokio::test]
async fn missing_report_keeps_server_message() {
    let mock = spawn_mock().await;
    mock.respond(DELETE, StatusCode::NOT_FOUND, json!({"message": "Report not found"}));

    let err = mock.api().delete_report("gone", "1030").await.unwrap_err();

    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "Report not found");
}
