//! Mirror stubs shared by service and scheduler tests.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    error::sheets::SheetsError,
    sheets::{MirrorRow, MirrorSnapshot, RemoteMirror},
};

/// Mirror stub answering snapshots from fixed sets and recording appends.
#[derive(Default)]
pub struct StaticMirror {
    pub numbers: HashSet<String>,
    pub cpfs: HashSet<String>,
    pub appended: Mutex<Vec<MirrorRow>>,
}

impl StaticMirror {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_numbers<I: IntoIterator<Item = &'static str>>(numbers: I) -> Self {
        Self {
            numbers: numbers.into_iter().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn with_cpfs<I: IntoIterator<Item = String>>(cpfs: I) -> Self {
        Self {
            cpfs: cpfs.into_iter().collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl RemoteMirror for StaticMirror {
    async fn snapshot(&self) -> Result<MirrorSnapshot, SheetsError> {
        Ok(MirrorSnapshot {
            numbers: self.numbers.clone(),
            cpfs: self.cpfs.clone(),
        })
    }

    async fn append(&self, rows: &[MirrorRow]) -> Result<(), SheetsError> {
        self.appended.lock().await.extend(rows.iter().cloned());
        Ok(())
    }
}

/// Mirror stub where every call fails, for degraded-mode tests.
pub struct FailingMirror;

#[async_trait]
impl RemoteMirror for FailingMirror {
    async fn snapshot(&self) -> Result<MirrorSnapshot, SheetsError> {
        Err(SheetsError::Api {
            status: 503,
            message: "backend unavailable".to_string(),
        })
    }

    async fn append(&self, _rows: &[MirrorRow]) -> Result<(), SheetsError> {
        Err(SheetsError::Api {
            status: 503,
            message: "backend unavailable".to_string(),
        })
    }
}
