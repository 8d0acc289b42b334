//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints.

pub mod config;
pub mod sheets;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{config::ConfigError, sheets::SheetsError},
    model::api::ErrorResponseDto,
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Infrastructure variants use `#[from]` for
/// automatic conversion; the domain variants (`Validation`, `Conflict`, `BadRequest`)
/// carry the user-facing messages of the reservation flow.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Prevents normal application operation; surfaced at startup only.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side;
    /// the client receives an opaque message.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Cron scheduler error.
    ///
    /// Occurs while starting or running the sheets reconciliation job.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Remote mirror error.
    ///
    /// Fully internal: logged and recovered by the reconciliation task, never
    /// surfaced to end users and never failing a reservation request.
    #[error(transparent)]
    SheetsErr(#[from] SheetsError),

    /// I/O error during startup (data directory, listener binding).
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// One or more field-level validation failures, user-correctable.
    ///
    /// Results in 400 Bad Request with every accumulated message.
    #[error("Validação falhou.")]
    Validation(Vec<String>),

    /// Raffle number or CPF already used, from either store.
    ///
    /// Results in 409 Conflict with the provided message.
    #[error("{0}")]
    Conflict(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided message.
    #[error("{0}")]
    BadRequest(String),
}

/// Converts application errors into HTTP responses.
///
/// Maps each error variant to an appropriate HTTP status code and response body.
/// Internal errors are logged with full details but return generic messages to
/// avoid information leakage.
///
/// # Returns
/// - 400 Bad Request - `Validation` (with the accumulated messages) and `BadRequest`
/// - 409 Conflict - `Conflict`
/// - 500 Internal Server Error - all infrastructure errors, details logged only
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponseDto {
                    ok: false,
                    message: "Validação falhou.".to_string(),
                    errors: Some(errors),
                }),
            )
                .into_response(),
            Self::Conflict(message) => (
                StatusCode::CONFLICT,
                Json(ErrorResponseDto {
                    ok: false,
                    message,
                    errors: None,
                }),
            )
                .into_response(),
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponseDto {
                    ok: false,
                    message,
                    errors: None,
                }),
            )
                .into_response(),
            Self::DbErr(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponseDto {
                        ok: false,
                        message: "Erro no banco de dados.".to_string(),
                        errors: None,
                    }),
                )
                    .into_response()
            }
            err => {
                tracing::error!("{}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponseDto {
                        ok: false,
                        message: "Erro interno do servidor.".to_string(),
                        errors: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}
