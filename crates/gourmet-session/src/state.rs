//! Observable session state.

use gourmet_api::ResultSet;
use gourmet_core::SearchCriteria;
use serde::Serialize;

/// Which kind of query the current result set came from.
///
/// Each variant carries the last value issued in that mode, which is what a
/// page change rebuilds its query from. `Normal(None)` is the state before
/// any search and after a reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionMode {
    Normal(Option<SearchCriteria>),
    FavoriteLookup(Vec<String>),
}

impl Default for SessionMode {
    fn default() -> Self {
        SessionMode::Normal(None)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

impl RequestStatus {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            RequestStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Snapshot handed to readers. Only the state machine mutates it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub mode: SessionMode,
    /// 1-based page cursor.
    pub page: u32,
    pub results: ResultSet,
    pub status: RequestStatus,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            mode: SessionMode::default(),
            page: 1,
            results: ResultSet::empty(),
            status: RequestStatus::Idle,
        }
    }
}
