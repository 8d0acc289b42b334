use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::AppError,
    model::{
        api::{
            CheckNumberRequestDto, CheckNumberResponseDto, ParticipantsResponseDto,
            RandomNumberResponseDto, ReserveRequestDto, ReserveResponseDto,
        },
        participant::ReserveParam,
    },
    service::raffle::RaffleService,
    state::AppState,
};

/// POST /reserve-number - Reserve a raffle number for a participant.
///
/// Validates every field, checks availability across both stores and commits the
/// reservation. The spreadsheet append happens after the response, detached.
///
/// # Returns
/// - `200 OK`: confirmation message plus the committed participant
/// - `400 Bad Request`: accumulated validation messages
/// - `409 Conflict`: number or CPF already reserved
/// - `500 Internal Server Error`: storage failure (opaque message)
pub async fn reserve_number(
    State(state): State<AppState>,
    Json(body): Json<ReserveRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = RaffleService::new(&state.db, state.mirror.clone(), state.events.clone());

    let participant = service
        .reserve(ReserveParam {
            full_name: body.full_name,
            cpf: body.cpf,
            phone: body.phone,
            email: body.email,
            store: body.store,
            number: body.number,
            accepted: body.accepted,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(ReserveResponseDto {
            ok: true,
            message: "Reserva efetuada com sucesso.".to_string(),
            participant: participant.into_dto(),
        }),
    ))
}

/// POST /check-number - Check whether a raffle number is still available.
///
/// # Returns
/// - `200 OK`: canonical number, availability and which store answered
/// - `400 Bad Request`: malformed number
pub async fn check_number(
    State(state): State<AppState>,
    Json(body): Json<CheckNumberRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    let service = RaffleService::new(&state.db, state.mirror.clone(), state.events.clone());

    let availability = service.check_availability(&body.number).await?;

    Ok((
        StatusCode::OK,
        Json(CheckNumberResponseDto {
            ok: true,
            number: availability.number,
            available: availability.available,
            source: availability.source,
        }),
    ))
}

/// GET /random-number - Suggest a random free raffle number.
///
/// # Returns
/// - `200 OK`: a free canonical number, or null with a message when none remain
pub async fn random_number(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let service = RaffleService::new(&state.db, state.mirror.clone(), state.events.clone());

    let number = service.suggest_random_number().await?;
    let message = match number {
        Some(_) => None,
        None => Some("Sem números disponíveis.".to_string()),
    };

    Ok((
        StatusCode::OK,
        Json(RandomNumberResponseDto {
            ok: true,
            number,
            message,
        }),
    ))
}

/// GET /participants - List all committed reservations, newest first.
///
/// # Returns
/// - `200 OK`: every participant, most recent first
pub async fn get_participants(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let service = RaffleService::new(&state.db, state.mirror.clone(), state.events.clone());

    let participants = service.list_participants().await?;

    Ok((
        StatusCode::OK,
        Json(ParticipantsResponseDto {
            ok: true,
            participants: participants
                .into_iter()
                .map(|participant| participant.into_dto())
                .collect(),
        }),
    ))
}
