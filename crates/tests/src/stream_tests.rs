use crate::fixtures::{mock_model::MockModel, test_app::TestApp};
use serde_json::{Value, json};

/// Pulls the JSON payloads out of an SSE body (`data: <json>` frames).
fn parse_frames(body: &str) -> Vec<Value> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .map(|payload| serde_json::from_str(payload).expect("frame is not valid JSON"))
        .collect()
}

#[tokio::test]
async fn streaming_chat_emits_ordered_events_ending_in_final() {
    let app = TestApp::spawn(
        MockModel::healthy("mock-primary"),
        MockModel::healthy("mock-fallback"),
    )
    .await;

    let resp = app
        .chat(&json!({ "text": "नमस्ते", "streaming": true }))
        .await;
    assert_eq!(resp.status().as_u16(), 200);
    assert!(
        resp.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );

    // The server closes the stream after the final frame
    let body = resp.text().await.unwrap();
    let frames = parse_frames(&body);

    let types: Vec<&str> = frames
        .iter()
        .map(|f| f["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        vec![
            "status",
            "language_detected",
            "status",
            "status",
            "translation_chunk",
            "status",
            "status",
            "final"
        ]
    );

    assert_eq!(frames[0]["stage"], "detecting");
    assert_eq!(frames[1]["language"], "hi");
    assert_eq!(frames[1]["source"], "heuristic");
    assert_eq!(frames[4]["tier"], "primary");

    let last = frames.last().unwrap();
    assert_eq!(
        last["translated_text"],
        "[hi] I hear you, and I'm here for you."
    );
    assert_eq!(last["detected_language"], "hi");
    assert!(last["performance"]["total_ms"].is_u64());
}

#[tokio::test]
async fn streaming_with_everything_down_still_terminates() {
    let app = TestApp::spawn(
        MockModel::unreachable("mock-primary"),
        MockModel::unreachable("mock-fallback"),
    )
    .await;

    let resp = app
        .chat(&json!({ "text": "I want to end it all", "streaming": true }))
        .await;
    let body = resp.text().await.unwrap();
    let frames = parse_frames(&body);

    let last = frames.last().unwrap();
    assert_eq!(last["type"], "final");
    assert!(
        last["translated_text"]
            .as_str()
            .unwrap()
            .contains("14416")
    );
}

#[tokio::test]
async fn non_streaming_response_matches_the_final_frame_shape() {
    let app = TestApp::spawn(
        MockModel::healthy("mock-primary"),
        MockModel::healthy("mock-fallback"),
    )
    .await;

    let resp = app
        .chat(&json!({ "text": "नमस्ते", "streaming": true }))
        .await;
    let body = resp.text().await.unwrap();
    let final_frame = parse_frames(&body).pop().unwrap();

    let resp = app.chat(&json!({ "text": "नमस्ते" })).await;
    let sync_body: Value = resp.json().await.unwrap();

    for field in [
        "original_text",
        "translated_text",
        "detected_language",
        "target_language",
        "model",
    ] {
        assert_eq!(sync_body[field], final_frame[field], "field {field} differs");
    }
}
