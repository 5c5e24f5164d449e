use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use wizard::{DocumentUpload, SlotKind, Step};

use crate::common::*;

#[tokio::test]
async fn pdf_and_images_travel_in_one_request() {
    let mock = spawn_mock().await;
    let upload = DocumentUpload {
        session_id: "1030".into(),
        location_id: "1".into(),
        pdf: Some(pdf("acta.pdf")),
        images: vec![photo("page1.jpg"), photo("page2.jpg")],
    };

    mock.api().document_upload(&upload).await.unwrap();

    let request = mock.last(DOCUMENT);
    assert_eq!(request.text("sessionId").as_deref(), Some("1030"));
    assert_eq!(request.text("locationId"), None);
    let pdfs = request.files("file");
    assert_eq!(pdfs.len(), 1);
    assert_eq!(pdfs[0].content_type.as_deref(), Some("application/pdf"));
    let names: Vec<Option<&str>> = request
        .files("images")
        .into_iter()
        .map(|p| p.file_name.as_deref())
        .collect();
    assert_eq!(names, vec![Some("page1.jpg"), Some("page2.jpg")]);
}

#[tokio::test]
async fn images_alone_are_enough() {
    let mock = spawn_mock().await;
    let upload = DocumentUpload {
        session_id: "1030".into(),
        location_id: "1".into(),
        pdf: None,
        images: vec![photo("signed.jpg")],
    };

    mock.api().document_upload(&upload).await.unwrap();

    let request = mock.last(DOCUMENT);
    assert!(request.files("file").is_empty());
    assert_eq!(request.files("images").len(), 1);
}

#[tokio::test]
async fn wizard_marks_document_ready_and_clears_slots() {
    let mock = spawn_mock().await;
    mock.respond(DOCUMENT, StatusCode::OK, json!({"message": "Document saved"}));
    let api = mock.api();
    let mut wizard = signed_in_wizard();
    wizard.select_location(Some("3"));
    wizard.advance();
    wizard.pick(SlotKind::EvidenceImage, vec![photo("a.jpg")]);
    wizard.submit_evidence(&api).await.unwrap();
    wizard.advance();
    assert_eq!(wizard.step(), Step::Document);
    assert!(!wizard.can_advance());

    wizard.pick(SlotKind::DocumentPdf, vec![pdf("acta.pdf")]);
    wizard.pick(SlotKind::DocumentImages, vec![photo("p1.jpg"), photo("p2.jpg")]);
    let notice = wizard.submit_document(&api).await.unwrap().unwrap();

    assert_eq!(notice.message, "Document saved");
    assert!(wizard.session().document_ready());
    assert!(wizard.can_advance());
    assert!(wizard.slots().is_empty(SlotKind::DocumentPdf));
    assert!(wizard.slots().is_empty(SlotKind::DocumentImages));
    assert_eq!(wizard.slots().registry().live_count(), 0);
}

#[tokio::test]
async fn empty_document_is_rejected_locally() {
    let mock = spawn_mock().await;
    let api = mock.api();
    let mut wizard = signed_in_wizard();
    wizard.select_location(Some("3"));
    wizard.advance();
    wizard.pick(SlotKind::EvidenceImage, vec![photo("a.jpg")]);
    wizard.submit_evidence(&api).await.unwrap();
    wizard.advance();

    let err = wizard.submit_document(&api).await.unwrap_err();
    assert_eq!(err.message, "Attach the signed PDF or at least one photo");
    assert!(mock.requests_to(DOCUMENT).is_empty());
}
