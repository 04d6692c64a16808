use axum::{
    Json,
    extract::State,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::StreamExt;
use serde::Deserialize;
use validator::Validate;

use manas_pipeline::{ChatTurn, ConversationContext, EventSink, LanguageCode};

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
    /// Reply language; unrecognized codes collapse to the pivot.
    pub target_language: Option<String>,
    #[serde(default)]
    pub streaming: bool,
    #[serde(default)]
    pub context: ConversationContext,
}

/// One conversational turn. `streaming: true` answers with an SSE stream
/// of pipeline events ending in a `final` frame; otherwise a single JSON
/// object with the completed result.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Response, ApiError> {
    body.validate()?;
    if body.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".to_string()));
    }

    let turn = ChatTurn {
        text: body.text,
        target_language: body
            .target_language
            .as_deref()
            .map(LanguageCode::parse_or_pivot),
        context: body.context,
    };

    if body.streaming {
        Ok(stream_chat(state, turn))
    } else {
        let response = state.orchestrator.process(turn, EventSink::disabled()).await;
        Ok(Json(response).into_response())
    }
}

/// The pipeline runs detached and publishes onto the sink; this handler
/// only relays frames. When the run finishes the sink drops, the stream
/// ends, and the connection closes after the `final` frame.
fn stream_chat(state: AppState, turn: ChatTurn) -> Response {
    let (sink, rx) = EventSink::channel();
    let orchestrator = state.orchestrator.clone();
    tokio::spawn(async move {
        orchestrator.process(turn, sink).await;
    });

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        let event = rx.recv().await?;
        Some((event, rx))
    })
    .map(|event| Event::default().json_data(&event));

    Sse::new(stream).keep_alive(KeepAlive::default()).into_response()
}
