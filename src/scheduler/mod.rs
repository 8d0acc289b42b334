//! Background jobs.

pub mod sheets_sync;
