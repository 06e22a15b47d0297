//! Search-session state machine.
//!
//! [`SearchMachine`] is synchronous and owns no I/O. Every fetch-triggering
//! intent returns a [`FetchTicket`] describing the request to make; the
//! caller performs it and hands the outcome back to [`SearchMachine::resolve`].
//!
//! Each intent that changes what should be on screen bumps a monotonic
//! sequence number. A resolution whose ticket is older than the latest
//! intent is discarded, so under overlapping requests the most recently
//! *issued* intent wins regardless of arrival order.

use gourmet_api::{build_query, id_query, ApiError, ResultSet, ShopQuery};
use gourmet_core::{start_offset, SearchCriteria};

use crate::state::{RequestStatus, SessionMode, SessionState};

/// A fetch the caller must perform on behalf of the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: ShopQuery,
    /// 1-based upstream offset.
    pub start: u32,
}

#[derive(Debug, Default)]
pub struct SearchMachine {
    state: SessionState,
    seq: u64,
    // Last value issued in each mode, kept while the other mode is active.
    last_criteria: Option<SearchCriteria>,
    last_ids: Option<Vec<String>>,
}

impl SearchMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn last_criteria(&self) -> Option<&SearchCriteria> {
        self.last_criteria.as_ref()
    }

    #[must_use]
    pub fn last_ids(&self) -> Option<&[String]> {
        self.last_ids.as_deref()
    }

    /// Fresh filtered search from page 1.
    pub fn begin_search(&mut self, criteria: SearchCriteria) -> FetchTicket {
        tracing::info!(range = %criteria.range, "search intent");
        let query = build_query(&criteria);
        self.last_criteria = Some(criteria.clone());
        self.state.mode = SessionMode::Normal(Some(criteria));
        self.state.page = 1;
        self.start_fetch(query, 1)
    }

    /// Bookmark lookup from page 1.
    ///
    /// An empty id list resolves immediately to an empty, successful result
    /// and returns `None`: no request is made.
    pub fn begin_search_by_ids(&mut self, ids: Vec<String>) -> Option<FetchTicket> {
        tracing::info!(count = ids.len(), "search-by-ids intent");
        self.state.page = 1;
        self.last_ids = Some(ids.clone());

        if ids.is_empty() {
            self.state.mode = SessionMode::FavoriteLookup(ids);
            self.seq += 1;
            self.state.results = ResultSet::empty();
            self.state.status = RequestStatus::Succeeded;
            return None;
        }

        let query = id_query(&ids);
        self.state.mode = SessionMode::FavoriteLookup(ids);
        Some(self.start_fetch(query, 1))
    }

    /// Moves to `page` and refetches using the active mode's stored value.
    ///
    /// `page` is not clamped. Returns `None`, leaving state untouched, when
    /// the active mode has nothing to rebuild from.
    pub fn begin_change_page(&mut self, page: u32) -> Option<FetchTicket> {
        let query = match &self.state.mode {
            SessionMode::Normal(Some(criteria)) => build_query(criteria),
            SessionMode::FavoriteLookup(ids) if !ids.is_empty() => id_query(ids),
            SessionMode::Normal(None) | SessionMode::FavoriteLookup(_) => {
                tracing::debug!(page, "change-page ignored: no active search");
                return None;
            }
        };

        tracing::info!(page, "change-page intent");
        self.state.page = page;
        Some(self.start_fetch(query, start_offset(page)))
    }

    /// Clears results and error, returns to page 1 in an empty normal mode.
    pub fn reset(&mut self) {
        tracing::info!("reset intent");
        self.seq += 1;
        self.state = SessionState::default();
        self.last_criteria = None;
        self.last_ids = None;
    }

    /// Applies the outcome of a fetch.
    ///
    /// Returns `false` when `seq` is stale and the outcome was discarded.
    pub fn resolve(&mut self, seq: u64, outcome: Result<ResultSet, ApiError>) -> bool {
        if seq != self.seq {
            tracing::debug!(seq, latest = self.seq, "discarding stale fetch result");
            return false;
        }

        match outcome {
            Ok(results) => {
                self.state.results = results;
                self.state.status = RequestStatus::Succeeded;
            }
            Err(err) => {
                tracing::warn!(kind = ?err.kind(), error = %err, "shop fetch failed");
                self.state.results.shops.clear();
                self.state.status = RequestStatus::Failed(err.user_message());
            }
        }
        true
    }

    fn start_fetch(&mut self, query: ShopQuery, start: u32) -> FetchTicket {
        self.seq += 1;
        self.state.status = RequestStatus::Loading;
        FetchTicket {
            seq: self.seq,
            query,
            start,
        }
    }
}

#[cfg(test)]
mod tests {
    use gourmet_core::{Amenity, Coordinates, SearchRange, Shop};

    use super::*;

    fn shops(ids: &[&str], total: u64) -> ResultSet {
        ResultSet {
            shops: ids
                .iter()
                .map(|id| Shop {
                    id: (*id).to_string(),
                    ..Shop::default()
                })
                .collect(),
            total_available: total,
        }
    }

    fn criteria_x() -> SearchCriteria {
        SearchCriteria::new(SearchRange::new(3).unwrap())
            .with_keyword("yakitori")
            .with_genre("G001")
            .with_budget("B003")
            .with_location(Coordinates::new(35.0, 139.0))
            .with_amenity(Amenity::Wifi)
    }

    #[test]
    fn starts_idle_on_page_one() {
        let machine = SearchMachine::new();
        assert_eq!(machine.state().status, RequestStatus::Idle);
        assert_eq!(machine.state().page, 1);
        assert_eq!(machine.state().mode, SessionMode::Normal(None));
    }

    #[test]
    fn search_loads_from_offset_one() {
        let mut machine = SearchMachine::new();
        let ticket = machine.begin_search(criteria_x());

        assert_eq!(ticket.start, 1);
        assert_eq!(ticket.query, build_query(&criteria_x()));
        assert!(machine.state().status.is_loading());
        assert_eq!(machine.state().mode, SessionMode::Normal(Some(criteria_x())));
    }

    #[test]
    fn search_success_replaces_results() {
        let mut machine = SearchMachine::new();
        let ticket = machine.begin_search(criteria_x());

        assert!(machine.resolve(ticket.seq, Ok(shops(&["A", "B"], 25))));
        assert_eq!(machine.state().status, RequestStatus::Succeeded);
        assert_eq!(machine.state().results.shops.len(), 2);
        assert_eq!(machine.state().results.total_available, 25);
    }

    #[test]
    fn empty_id_lookup_short_circuits() {
        let mut machine = SearchMachine::new();
        let first = machine.begin_search(criteria_x());
        machine.resolve(first.seq, Ok(shops(&["A"], 1)));

        assert!(machine.begin_search_by_ids(vec![]).is_none());
        assert_eq!(machine.state().status, RequestStatus::Succeeded);
        assert!(machine.state().results.shops.is_empty());
        assert_eq!(machine.state().results.total_available, 0);
        assert_eq!(machine.state().mode, SessionMode::FavoriteLookup(vec![]));
    }

    #[test]
    fn change_page_computes_offset() {
        let mut machine = SearchMachine::new();
        let ticket = machine.begin_search(criteria_x());
        machine.resolve(ticket.seq, Ok(shops(&["A"], 100)));

        let ticket = machine.begin_change_page(3).unwrap();
        assert_eq!(ticket.start, 41);
        assert_eq!(machine.state().page, 3);
    }

    #[test]
    fn change_page_does_not_clamp() {
        let mut machine = SearchMachine::new();
        machine.begin_search(criteria_x());
        let ticket = machine.begin_change_page(99).unwrap();
        assert_eq!(machine.state().page, 99);
        assert_eq!(ticket.start, 1961);
    }

    #[test]
    fn change_page_rebuilds_id_query_without_criteria() {
        let mut machine = SearchMachine::new();
        machine.begin_search(criteria_x());
        machine.begin_search_by_ids(vec!["id1".to_string(), "id2".to_string()]);

        let ticket = machine.begin_change_page(2).unwrap();
        assert_eq!(ticket.query.get("id"), Some("id1,id2"));
        assert_eq!(ticket.query.len(), 1);
        for key in ["keyword", "genre", "budget", "range", "lat", "lng", "wifi"] {
            assert!(!ticket.query.contains_key(key), "{key} leaked into id query");
        }
        assert_eq!(ticket.start, 21);
    }

    #[test]
    fn change_page_without_search_is_noop() {
        let mut machine = SearchMachine::new();
        assert!(machine.begin_change_page(2).is_none());
        assert_eq!(machine.state().page, 1);
        assert_eq!(machine.state().status, RequestStatus::Idle);
    }

    #[test]
    fn change_page_after_empty_id_lookup_is_noop() {
        let mut machine = SearchMachine::new();
        machine.begin_search_by_ids(vec![]);
        assert!(machine.begin_change_page(2).is_none());
        assert_eq!(machine.state().page, 1);
    }

    #[test]
    fn failure_clears_shops_and_sets_message() {
        let mut machine = SearchMachine::new();
        let ticket = machine.begin_search(criteria_x());
        machine.resolve(ticket.seq, Ok(shops(&["A"], 1)));

        let ticket = machine.begin_change_page(2).unwrap();
        machine.resolve(ticket.seq, Err(ApiError::Upstream("boom".to_string())));

        assert_eq!(
            machine.state().status,
            RequestStatus::Failed("boom".to_string())
        );
        assert_eq!(machine.state().status.error(), Some("boom"));
        assert!(machine.state().results.shops.is_empty());
    }

    #[test]
    fn missing_key_failure_uses_configuration_message() {
        let mut machine = SearchMachine::new();
        let ticket = machine.begin_search(criteria_x());
        machine.resolve(ticket.seq, Err(ApiError::MissingApiKey));
        assert_eq!(
            machine.state().status.error(),
            Some("API key is not configured.")
        );
    }

    #[test]
    fn reset_clears_everything_without_fetch() {
        let mut machine = SearchMachine::new();
        let ticket = machine.begin_search(criteria_x());
        machine.resolve(ticket.seq, Ok(shops(&["A"], 30)));
        machine.begin_change_page(2);

        machine.reset();
        assert_eq!(*machine.state(), SessionState::default());
        assert!(machine.begin_change_page(2).is_none());
    }

    #[test]
    fn stale_resolution_is_discarded() {
        let mut machine = SearchMachine::new();
        let slow = machine.begin_search(criteria_x());
        let fast = machine
            .begin_search_by_ids(vec!["B".to_string()])
            .unwrap();

        assert!(machine.resolve(fast.seq, Ok(shops(&["B"], 1))));
        assert!(!machine.resolve(slow.seq, Ok(shops(&["A1", "A2"], 50))));

        assert_eq!(machine.state().results.shops[0].id, "B");
        assert_eq!(machine.state().results.total_available, 1);
        assert_eq!(machine.state().status, RequestStatus::Succeeded);
    }

    #[test]
    fn resolution_after_reset_is_discarded() {
        let mut machine = SearchMachine::new();
        let ticket = machine.begin_search(criteria_x());
        machine.reset();

        assert!(!machine.resolve(ticket.seq, Ok(shops(&["A"], 1))));
        assert_eq!(machine.state().status, RequestStatus::Idle);
        assert!(machine.state().results.shops.is_empty());
    }

    #[test]
    fn both_modes_keep_their_last_value() {
        let mut machine = SearchMachine::new();
        machine.begin_search(criteria_x());
        machine.begin_search_by_ids(vec!["id1".to_string()]);

        assert_eq!(machine.last_criteria(), Some(&criteria_x()));
        assert_eq!(machine.last_ids(), Some(&["id1".to_string()][..]));

        machine.reset();
        assert!(machine.last_criteria().is_none());
        assert!(machine.last_ids().is_none());
    }

    #[test]
    fn new_search_supersedes_previous_mode() {
        let mut machine = SearchMachine::new();
        machine.begin_search_by_ids(vec!["A".to_string()]);
        machine.begin_search(criteria_x());
        let ticket = machine.begin_change_page(2).unwrap();
        assert_eq!(ticket.query, build_query(&criteria_x()));
        assert!(!ticket.query.contains_key("id"));
    }
}
