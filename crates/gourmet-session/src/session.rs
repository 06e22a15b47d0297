//! Async driver that runs [`SearchMachine`] tickets against a shop source.

use std::future::Future;

use gourmet_api::{ApiError, GourmetClient, ResultSet, ShopQuery};
use gourmet_core::SearchCriteria;
use tokio::sync::watch;

use crate::machine::{FetchTicket, SearchMachine};
use crate::state::SessionState;

/// Anything that can return one page of shops for a query.
pub trait ShopSource {
    fn fetch_page(
        &self,
        query: &ShopQuery,
        start: u32,
    ) -> impl Future<Output = Result<ResultSet, ApiError>> + Send;
}

impl ShopSource for GourmetClient {
    fn fetch_page(
        &self,
        query: &ShopQuery,
        start: u32,
    ) -> impl Future<Output = Result<ResultSet, ApiError>> + Send {
        self.fetch_shops(query, start)
    }
}

/// Owns the machine and publishes each state change to subscribers.
///
/// Intents run one at a time: each awaits its fetch before returning. Fetch
/// errors end up in [`SessionState::status`] and are never returned.
pub struct SearchSession<S> {
    source: S,
    machine: SearchMachine,
    tx: watch::Sender<SessionState>,
}

impl<S: ShopSource> SearchSession<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self {
            source,
            machine: SearchMachine::new(),
            tx,
        }
    }

    /// Receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        self.machine.state()
    }

    #[must_use]
    pub fn machine(&self) -> &SearchMachine {
        &self.machine
    }

    pub async fn search(&mut self, criteria: SearchCriteria) {
        let ticket = self.machine.begin_search(criteria);
        self.run(ticket).await;
    }

    pub async fn search_by_ids(&mut self, ids: Vec<String>) {
        match self.machine.begin_search_by_ids(ids) {
            Some(ticket) => self.run(ticket).await,
            None => self.publish(),
        }
    }

    pub async fn change_page(&mut self, page: u32) {
        if let Some(ticket) = self.machine.begin_change_page(page) {
            self.run(ticket).await;
        }
    }

    pub fn reset(&mut self) {
        self.machine.reset();
        self.publish();
    }

    async fn run(&mut self, ticket: FetchTicket) {
        self.publish();
        let outcome = self.source.fetch_page(&ticket.query, ticket.start).await;
        if self.machine.resolve(ticket.seq, outcome) {
            self.publish();
        }
    }

    fn publish(&self) {
        self.tx.send_replace(self.machine.state().clone());
    }
}
