use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    controller::{
        events::events,
        health::health,
        raffle::{check_number, get_participants, random_number, reserve_number},
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reserve-number", post(reserve_number))
        .route("/check-number", post(check_number))
        .route("/random-number", get(random_number))
        .route("/participants", get(get_participants))
        .route("/events", get(events))
        .route("/health", get(health))
}
