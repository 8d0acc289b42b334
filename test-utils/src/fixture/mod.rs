//! Fixtures for creating in-memory test data.

pub mod participant;
