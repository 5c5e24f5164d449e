use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{EvidenceCategory, UploadAck};
use wizard::{EvidenceUpload, NoticeLevel, SlotKind, Step};

use crate::common::*;

fn upload(note: Option<&str>) -> EvidenceUpload {
    EvidenceUpload {
        session_id: "1030".into(),
        location_id: "2".into(),
        category: EvidenceCategory::Posterior,
        file: photo("after.jpg"),
        note: note.map(str::to_string),
    }
}

#[tokio::test]
async fn evidence_is_sent_as_multipart_with_all_fields() {
    let mock = spawn_mock().await;
    mock.respond(EVIDENCE, StatusCode::OK, json!({"message": "Stored"}));

    let ack = mock.api().evidence_upload(&upload(Some("Broken shelf"))).await.unwrap();
    assert_eq!(ack, UploadAck { message: Some("Stored".into()) });

    let request = mock.last(EVIDENCE);
    assert_eq!(request.text("category").as_deref(), Some("posterior"));
    assert_eq!(request.text("sessionId").as_deref(), Some("1030"));
    assert_eq!(request.text("locationId").as_deref(), Some("2"));
    assert_eq!(request.text("note").as_deref(), Some("Broken shelf"));

    let files = request.files("file");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name.as_deref(), Some("after.jpg"));
    assert_eq!(files[0].content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(files[0].bytes, photo("after.jpg").bytes);
}

#[tokio::test]
async fn note_field_is_omitted_when_absent() {
    let mock = spawn_mock().await;

    mock.api().evidence_upload(&upload(None)).await.unwrap();

    let request = mock.last(EVIDENCE);
    assert!(!request.field_names().contains(&"note"));
}

#[tokio::test]
async fn unreadable_success_body_still_counts() {
    let mock = spawn_mock().await;
    mock.respond_raw(EVIDENCE, StatusCode::CREATED, "<html>ok</html>");

    let ack = mock.api().evidence_upload(&upload(None)).await.unwrap();
    assert_eq!(ack, UploadAck::default());
}

#[tokio::test]
async fn wizard_records_evidence_and_flips_category() {
    let mock = spawn_mock().await;
    let api = mock.api();
    let mut wizard = signed_in_wizard();
    wizard.select_location(Some("1"));
    wizard.advance();
    assert_eq!(wizard.step(), Step::Evidence);

    wizard.set_category(EvidenceCategory::Previa);
    wizard.pick(SlotKind::EvidenceImage, vec![photo("before.jpg")]);
    wizard.set_note("  entrance  ");
    let notice = wizard.submit_evidence(&api).await.unwrap().unwrap();

    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Evidence uploaded");
    assert_eq!(wizard.session().evidence().previa(), 1);
    assert_eq!(wizard.category(), EvidenceCategory::Posterior);
    assert!(wizard.slots().is_empty(SlotKind::EvidenceImage));
    assert_eq!(wizard.note(), "");
    assert_eq!(mock.last(EVIDENCE).text("note").as_deref(), Some("entrance"));
}

#[tokio::test]
async fn failed_evidence_upload_keeps_the_photo() {
    let mock = spawn_mock().await;
    mock.respond(
        EVIDENCE,
        StatusCode::PAYLOAD_TOO_LARGE,
        json!({"error": "File too large"}),
    );
    let api = mock.api();
    let mut wizard = signed_in_wizard();
    wizard.select_location(Some("1"));
    wizard.advance();
    wizard.pick(SlotKind::EvidenceImage, vec![photo("huge.jpg")]);

    let notice = wizard.submit_evidence(&api).await.unwrap().unwrap();

    assert!(notice.is_error());
    assert_eq!(notice.message, "File too large");
    assert_eq!(wizard.session().evidence().total(), 0);
    assert_eq!(wizard.slots().count(SlotKind::EvidenceImage), 1);
    assert!(!wizard.evidence_op().is_busy());
}

#[tokio::test]
async fn missing_photo_is_rejected_before_any_request() {
    let mock = spawn_mock().await;
    let mut wizard = signed_in_wizard();
    wizard.select_location(Some("1"));
    wizard.advance();

    let err = wizard.submit_evidence(&mock.api()).await.unwrap_err();
    assert_eq!(err.message, "Choose a photo first");
    assert!(mock.requests_to(EVIDENCE).is_empty());
}
