use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use shared_types::{EvidenceCategory, Location};
use wizard::{DataUrlPreviews, SessionStore, SlotKind, Step, Wizard};

use crate::common::*;

#[tokio::test]
async fn full_visit_from_location_to_share() {
    let mock = spawn_mock().await;
    mock.respond(LOCATIONS, StatusCode::OK, sample_locations());
    mock.respond(
        REPORT,
        StatusCode::OK,
        json!({"url": "https://cdn.example.com/r.pdf"}),
    );
    let api = mock.api();
    let mut wizard = signed_in_wizard();
    wizard.load_locations(&api).await.unwrap();

    // Step 1: narrow to department X, city B.
    wizard.set_department("X");
    wizard.set_city("B");
    let names: Vec<&str> = wizard
        .filtered_locations()
        .into_iter()
        .map(|l| l.name.as_str())
        .collect();
    assert_eq!(names, vec!["Store B"]);
    assert!(wizard.select_location(Some("2")));
    assert!(wizard.advance());

    // Step 2: before and after photos.
    for (category, name) in [
        (EvidenceCategory::Previa, "before.jpg"),
        (EvidenceCategory::Posterior, "after.jpg"),
    ] {
        wizard.set_category(category);
        wizard.pick(SlotKind::EvidenceImage, vec![photo(name)]);
        assert!(wizard.preview(SlotKind::EvidenceImage).is_some());
        wizard.submit_evidence(&api).await.unwrap();
    }
    assert!(wizard.session().evidence().is_complete());
    assert_eq!(wizard.slots().registry().live_count(), 0);
    assert!(wizard.advance());

    // Step 3: signed PDF.
    wizard.pick(SlotKind::DocumentPdf, vec![pdf("acta.pdf")]);
    wizard.submit_document(&api).await.unwrap();
    assert!(wizard.advance());
    assert_eq!(wizard.step(), Step::Report);

    // Step 4: report and share.
    wizard.generate_report(&api).await.unwrap();
    assert!(wizard.share_link().is_some());
    wizard.finish_share();
    assert!(!wizard.is_logged_in());
    assert_eq!(wizard.step(), Step::Location);
    assert_eq!(wizard.store().get("session.id"), None);

    let sent: Vec<&str> = mock.requests().iter().map(|r| r.route).collect();
    assert_eq!(sent, vec![LOCATIONS, EVIDENCE, EVIDENCE, DOCUMENT, REPORT]);
    let evidence = mock.requests_to(EVIDENCE);
    assert!(evidence.iter().all(|r| r.text("locationId").as_deref() == Some("2")));
}

#[tokio::test]
async fn answer_for_an_abandoned_location_is_discarded() {
    let mock = spawn_mock().await;
    let api = mock.api();
    let mut wizard = signed_in_wizard();
    wizard.select_location(Some("1"));
    wizard.advance();
    wizard.pick(SlotKind::EvidenceImage, vec![photo("late.jpg")]);

    let upload = wizard.begin_evidence_upload().unwrap();
    wizard.reset();
    assert!(wizard.select_location(Some("3")));
    let result = api.evidence_upload(&upload).await;
    let notice = wizard.finish_evidence_upload(&upload, result);

    assert_eq!(notice, None);
    assert_eq!(wizard.session().evidence().total(), 0);
    assert!(!wizard.evidence_op().is_busy());
}

#[tokio::test]
async fn going_back_does_not_lose_uploaded_evidence() {
    let mock = spawn_mock().await;
    let api = mock.api();
    let mut wizard = signed_in_wizard();
    wizard.select_location(Some("2"));
    wizard.advance();
    wizard.pick(SlotKind::EvidenceImage, vec![photo("before.jpg")]);
    wizard.submit_evidence(&api).await.unwrap();

    wizard.retreat();
    wizard.set_query("store c");
    assert!(!wizard.select_location(Some("3")));
    assert_eq!(wizard.session().location_id(), Some("2"));
    assert_eq!(wizard.session().evidence().previa(), 1);

    let store = wizard.store().clone();
    let restored = Wizard::new(store, DataUrlPreviews::default(), Default::default());
    assert_eq!(restored.step(), Step::Location);
    assert!(restored.session().is_location_locked());
}

#[tokio::test]
async fn progress_survives_a_restart() {
    let mock = spawn_mock().await;
    let api = mock.api();
    let mut wizard = signed_in_wizard();
    wizard.select_location(Some("2"));
    wizard.advance();
    wizard.pick(SlotKind::EvidenceImage, vec![photo("before.jpg")]);
    wizard.submit_evidence(&api).await.unwrap();

    let store = wizard.store().clone();
    let mut restored = Wizard::new(store, DataUrlPreviews::default(), Default::default());
    restored.set_locations(vec![
        Location::new("1", "Store A", "X", "A"),
        Location::new("2", "Store B", "X", "B"),
    ]);

    assert!(restored.is_logged_in());
    assert_eq!(restored.step(), Step::Evidence);
    assert_eq!(restored.session().location_id(), Some("2"));
    assert_eq!(restored.session().evidence().previa(), 1);
    assert!(restored.slots().is_empty(SlotKind::EvidenceImage));
}
