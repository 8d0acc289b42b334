//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{notifier::EventBroadcaster, sheets::RemoteMirror};

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `Arc<dyn RemoteMirror>` is a reference-counted pointer
/// - `EventBroadcaster` wraps a broadcast sender handle
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Remote mirror client, `None` in local-only mode.
    pub mirror: Option<Arc<dyn RemoteMirror>>,

    /// Broadcast registry pushing participant events to connected viewers.
    pub events: EventBroadcaster,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `mirror` - Optional remote mirror client
    /// - `events` - Live-update broadcast registry
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        mirror: Option<Arc<dyn RemoteMirror>>,
        events: EventBroadcaster,
    ) -> Self {
        Self { db, mirror, events }
    }
}
