//! HTTP request handlers.
//!
//! Controllers convert DTOs to operation parameters, call the service layer and map
//! domain models back to response DTOs. Error mapping lives on `AppError`.

pub mod events;
pub mod health;
pub mod raffle;
