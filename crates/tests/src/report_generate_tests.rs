use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{AppErrorKind, EvidenceCategory};
use wizard::{OpStatus, ReportRequest, SlotKind};

use crate::common::*;

const REPORT_URL: &str = "https://cdn.example.com/reports/r-1.pdf";

#[tokio::test]
async fn report_request_targets_session_and_location() {
    let mock = spawn_mock().await;
    mock.respond(REPORT, StatusCode::OK, json!({"url": REPORT_URL}));
    let request = ReportRequest {
        session_id: "tech 7/a".into(),
        location_id: "2".into(),
    };

    let report = mock.api().report_generate(&request).await.unwrap();
    assert_eq!(report.link(), Some(REPORT_URL));

    let recorded = mock.last(REPORT);
    assert_eq!(recorded.path, "/report/generate/tech 7/a");
    assert_eq!(recorded.query.get("locationId").map(String::as_str), Some("2"));
    assert_eq!(recorded.query.get("format").map(String::as_str), Some("json"));
}

/// A wizard at the report step with one photo of each kind.
async fn ready_wizard(mock: &MockService) -> TestWizard {
    let api = mock.api();
    let mut wizard = signed_in_wizard();
    wizard.select_location(Some("2"));
    wizard.advance();
    for category in [EvidenceCategory::Previa, EvidenceCategory::Posterior] {
        wizard.set_category(category);
        wizard.pick(SlotKind::EvidenceImage, vec![photo("x.jpg")]);
        wizard.submit_evidence(&api).await.unwrap();
    }
    wizard
}

#[tokio::test]
async fn generated_link_is_stored_and_shareable() {
    let mock = spawn_mock().await;
    mock.respond(REPORT, StatusCode::OK, json!({"url": REPORT_URL}));
    let mut wizard = ready_wizard(&mock).await;
    assert!(wizard.can_generate_report());

    let notice = wizard.generate_report(&mock.api()).await.unwrap().unwrap();

    assert!(!notice.is_error());
    assert_eq!(wizard.report_url(), Some(REPORT_URL));
    let share = wizard.share_link().unwrap();
    assert!(share.starts_with("https://wa.me/?text="));
    assert!(share.contains("Store%20B%20%E2%80%94%20X%2C%20B"));
    assert!(share.contains(&urlencode(REPORT_URL)));
}

fn urlencode(s: &str) -> String {
    s.replace(':', "%3A").replace('/', "%2F")
}

#[tokio::test]
async fn response_without_link_is_an_error() {
    let mock = spawn_mock().await;
    mock.respond(REPORT, StatusCode::OK, json!({"url": "  "}));
    let mut wizard = ready_wizard(&mock).await;

    let notice = wizard.generate_report(&mock.api()).await.unwrap().unwrap();

    assert!(notice.is_error());
    assert_eq!(wizard.report_url(), None);
    assert!(matches!(wizard.report_op().status(), OpStatus::Error(_)));
}

#[tokio::test]
async fn failure_can_be_retried() {
    let mock = spawn_mock().await;
    mock.respond_once(
        REPORT,
        StatusCode::GATEWAY_TIMEOUT,
        json!({"message": "Renderer timed out"}),
    );
    mock.respond(REPORT, StatusCode::OK, json!({"url": REPORT_URL}));
    let mut wizard = ready_wizard(&mock).await;
    let api = mock.api();

    let notice = wizard.generate_report(&api).await.unwrap().unwrap();
    assert_eq!(notice.message, "Renderer timed out");
    match wizard.report_op().status() {
        OpStatus::Error(e) => assert_eq!(e.kind, AppErrorKind::Timeout),
        other => panic!("expected an error, got {other:?}"),
    }

    wizard.retry_report();
    assert_eq!(wizard.report_op().status(), &OpStatus::Idle);
    wizard.generate_report(&api).await.unwrap();
    assert_eq!(wizard.report_url(), Some(REPORT_URL));
    assert_eq!(mock.requests_to(REPORT).len(), 2);
}

#[tokio::test]
async fn incomplete_evidence_never_reaches_the_server() {
    let mock = spawn_mock().await;
    let api = mock.api();
    let mut wizard = signed_in_wizard();
    wizard.select_location(Some("2"));
    wizard.advance();
    wizard.pick(SlotKind::EvidenceImage, vec![photo("only-before.jpg")]);
    wizard.submit_evidence(&api).await.unwrap();

    let err = wizard.generate_report(&api).await.unwrap_err();
    assert_eq!(err.message, "Upload at least one before and one after photo");
    assert!(mock.requests_to(REPORT).is_empty());
}
