//! Server-Sent Events stream of catalog events
//!
//! The UI observes snapshot changes here instead of polling; every
//! committed mutation and reconciliation pass arrives as a tagged JSON
//! event.

use crate::AppState;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

/// GET /events
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("New SSE client connected to catalog events");
    let mut rx = state.event_bus.subscribe();

    let stream = async_stream::stream! {
        yield Ok(Event::default().event("ConnectionStatus").data("connected"));

        loop {
            match rx.recv().await {
                Ok(event) => match Event::default().event("CatalogEvent").json_data(&event) {
                    Ok(sse_event) => {
                        debug!("SSE: forwarding catalog event");
                        yield Ok(sse_event);
                    }
                    Err(err) => warn!(error = %err, "SSE: failed to serialize event"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "SSE client lagged, events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
