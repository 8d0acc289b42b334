//! Domain models and API data transfer objects.

pub mod api;
pub mod participant;
