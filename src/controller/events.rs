use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::state::AppState;

/// GET /events - Server-push stream of committed reservations.
///
/// Each message is a JSON envelope `{type:"participant_created", participant}`.
/// The subscriber is registered on connect and removed when the client
/// disconnects and the stream is dropped. Lagging subscribers skip the messages
/// they missed instead of terminating the stream.
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.events.subscribe()).filter_map(|message| {
        let event = message.ok()?;
        Event::default().json_data(&event).ok().map(Ok)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
