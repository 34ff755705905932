//! Server-sent events stream of the caller's domain events.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::State,
    response::sse::{Event as SseEvent, KeepAlive, Sse},
    Extension,
};
use futures::stream::Stream;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::{auth::CurrentUser, main_lib::AppState};

/// Streams the authenticated user's own events; other users' events are
/// filtered out before they leave the server.
pub async fn stream_events(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let receiver = state.event_bus.subscribe();
    let user_id = current.user_id;

    let stream = BroadcastStream::new(receiver).filter_map(move |result| {
        let event = match result {
            Ok(event) if event.user_id() == user_id => event,
            // Skip foreign events and lagged-receiver gaps
            _ => return None,
        };
        SseEvent::default().json_data(&event).ok().map(Ok)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
