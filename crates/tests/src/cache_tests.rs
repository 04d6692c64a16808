use crate::fixtures::{mock_model::MockModel, test_app::TestApp};
use serde_json::{Value, json};

async fn cache_size(app: &TestApp) -> u64 {
    let resp = app
        .client
        .get(app.url("/api/metrics"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    body["cache_size"].as_u64().unwrap()
}

#[tokio::test]
async fn clear_empties_the_cache_and_is_idempotent() {
    let app = TestApp::spawn(
        MockModel::healthy("mock-primary"),
        MockModel::healthy("mock-fallback"),
    )
    .await;

    app.chat(&json!({ "text": "नमस्ते" })).await;
    assert!(cache_size(&app).await >= 1);

    let resp = app
        .client
        .post(app.url("/api/cache/clear"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(cache_size(&app).await, 0);

    // Clearing again is harmless
    let resp = app
        .client
        .post(app.url("/api/cache/clear"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(cache_size(&app).await, 0);
}

#[tokio::test]
async fn cleared_cache_forces_a_fresh_model_call() {
    let primary = MockModel::healthy("mock-primary");
    let app = TestApp::spawn(primary.clone(), MockModel::healthy("mock-fallback")).await;

    app.chat(&json!({ "text": "नमस्ते" })).await;
    let after_first = primary
        .translate_calls
        .load(std::sync::atomic::Ordering::SeqCst);

    // Cached: no new translate calls
    app.chat(&json!({ "text": "नमस्ते" })).await;
    assert_eq!(
        primary
            .translate_calls
            .load(std::sync::atomic::Ordering::SeqCst),
        after_first
    );

    app.client
        .post(app.url("/api/cache/clear"))
        .send()
        .await
        .unwrap();

    // Miss again: the model is consulted anew
    app.chat(&json!({ "text": "नमस्ते" })).await;
    assert!(
        primary
            .translate_calls
            .load(std::sync::atomic::Ordering::SeqCst)
            > after_first
    );
}
