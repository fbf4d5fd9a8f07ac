//! Tests for payload encoding and delivery fallback.

mod common;

use common::{Channel, RecordingTransport};
use pong_turns::{
    AnyTurn, CupGrid, Delivery, Format, HttpTransport, Multiplier, ShotOutcome, Side,
    SubmitDelays, Submission, TurnEvent, TurnSelection, TurnSubmitter, build_payload,
};
use std::sync::Arc;
use std::time::Duration;

fn center_submission() -> Submission {
    let pending = vec!["1 Cen".to_string()];
    let grid = CupGrid::render(Format::Pyramid, None, Side::Theirs, &pending);
    let mut turn = AnyTurn::new(grid, Format::Pyramid);
    turn.enable_targeting().expect("Idle accepts targeting");
    turn.press_multiplier(Multiplier::Double).expect("Selecting accepts multiplier");
    turn.register_cup_click("1 Cen").expect("Re-hit accepted");
    turn.register_cup_click("3 Sx").expect("Valid click");
    match turn.register_cup_click("2 Dx").expect("Valid click") {
        TurnEvent::Completed(payload) => payload.into(),
        other => panic!("Expected completion, got {:?}", other),
    }
}

#[test]
fn test_turn_form_fields() {
    let fields = center_submission().form_fields();
    assert_eq!(
        fields,
        vec![
            ("formato", "Piramide".to_string()),
            ("risultato_tiro", "Centro".to_string()),
            ("bicchieri_multipli", "Doppio".to_string()),
            ("rehit_list", "1 Cen".to_string()),
            ("bicchiere_colpito", "3 Sx".to_string()),
            ("bicchiere_colpito", "2 Dx".to_string()),
        ]
    );
}

#[test]
fn test_format_change_sends_only_format() {
    let submission = Submission::FormatChange {
        format: Format::VerticalLine,
    };
    assert_eq!(
        submission.form_fields(),
        vec![("formato", "Linea Verticale".to_string())]
    );
}

#[test]
fn test_non_center_payload_drops_selection() {
    let selection = TurnSelection::new(Multiplier::Triple);
    let payload = build_payload(&selection, ShotOutcome::Rim, Format::Diamond);
    assert!(payload.hit_cups().is_empty());
    assert_eq!(payload.rehit_list(), "");
    assert_eq!(payload.multiplier(), Multiplier::Single);

    let fields = Submission::from(payload).form_fields();
    assert!(fields.contains(&("risultato_tiro", "Bordo".to_string())));
    assert!(fields.contains(&("bicchieri_multipli", String::new())));
    assert!(!fields.iter().any(|(key, _)| *key == "bicchiere_colpito"));
}

#[test]
fn test_json_tags_submission_kind() {
    let json = serde_json::to_value(Submission::FormatChange {
        format: Format::SingleCenter,
    })
    .expect("serializable");
    assert_eq!(
        json,
        serde_json::json!({"kind": "format_change", "format": "Singolo Centrale"})
    );
}

#[test]
fn test_http_urls() {
    let transport = HttpTransport::new("http://scores.local/".to_string(), "anna".to_string());
    assert_eq!(transport.form_url(), "http://scores.local/add/anna");
    assert_eq!(transport.async_url(), "http://scores.local/api/turn/anna");
}

#[test]
fn test_delays_by_submission() {
    let delays = SubmitDelays::default();
    assert_eq!(delays.for_submission(&center_submission()), Duration::from_millis(300));
    assert_eq!(
        delays.for_submission(&Submission::FormatChange {
            format: Format::Pyramid
        }),
        Duration::from_millis(1200)
    );
}

#[tokio::test]
async fn test_async_failure_falls_back_to_form() {
    let transport = RecordingTransport::failing_async();
    let submitter = TurnSubmitter::new(Arc::new(transport.clone()), SubmitDelays::none());

    let delivery = submitter
        .deliver(&center_submission())
        .await
        .expect("form fallback succeeds");

    assert_eq!(delivery, Delivery::Form);
    let channels: Vec<Channel> = transport.calls().iter().map(|(c, _)| *c).collect();
    assert_eq!(channels, vec![Channel::Async, Channel::Form]);
}

#[tokio::test]
async fn test_both_channels_failing_surfaces_error() {
    let transport = RecordingTransport::failing_everything();
    let submitter = TurnSubmitter::new(Arc::new(transport.clone()), SubmitDelays::none());

    let error = submitter
        .submit(center_submission())
        .expect("runtime available")
        .await
        .expect("task completes")
        .expect_err("both channels fail");
    assert!(error.message.contains("form rejected"));
}

#[tokio::test]
async fn test_form_only_skips_async() {
    let transport = RecordingTransport::default();
    let submitter = TurnSubmitter::new(Arc::new(transport.clone()), SubmitDelays::none()).form_only();

    let delivery = submitter
        .deliver(&center_submission())
        .await
        .expect("form succeeds");
    assert_eq!(delivery, Delivery::Form);
    assert_eq!(transport.calls().len(), 1);
    assert_eq!(transport.calls()[0].0, Channel::Form);
}

#[tokio::test(start_paused = true)]
async fn test_submit_waits_for_delay() {
    let transport = RecordingTransport::default();
    let delays = SubmitDelays {
        outcome: Duration::from_millis(500),
        ..SubmitDelays::none()
    };
    let submitter = TurnSubmitter::new(Arc::new(transport.clone()), delays);
    let miss = build_payload(&TurnSelection::default(), ShotOutcome::Miss, Format::Pyramid);

    let handle = submitter.submit(miss.into()).expect("runtime available");
    tokio::task::yield_now().await;
    assert!(transport.calls().is_empty());

    let delivery = handle.await.expect("task completes").expect("delivered");
    assert_eq!(delivery, Delivery::Async);
    assert_eq!(transport.calls().len(), 1);
}

#[test]
fn test_submit_without_runtime_is_an_error() {
    let transport = RecordingTransport::default();
    let submitter = TurnSubmitter::new(Arc::new(transport.clone()), SubmitDelays::none());

    let error = submitter
        .submit(center_submission())
        .expect_err("no runtime running");
    assert!(error.message.contains("No runtime"));
    assert!(transport.calls().is_empty());
}
